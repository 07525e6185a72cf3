use mayazcash_bindings::{CONTRACT_VERSION, NAMESPACE};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("mayazcash {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: mayazcash");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("MAYAZCASH_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("namespace: {NAMESPACE}");
    println!("contract_version: {CONTRACT_VERSION}");
    println!("features: link={}, cli=true", cfg!(feature = "link"));

    Ok(SUCCESS)
}
