use mayazcash_bindings::sys::global;
use tracing::info;

use crate::cmd::CheckArgs;
use crate::exit::{fault, CliResult, SUCCESS};
use crate::output::{print_value, OutputFormat};

pub fn run(_args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let report = global()
        .initialize()
        .map_err(|err| fault("contract check", err))?;
    info!(
        namespace = report.namespace,
        functions = report.functions_checked,
        "native library matches contract"
    );
    print_value(report, format)?;
    Ok(SUCCESS)
}
