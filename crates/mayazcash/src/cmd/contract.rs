use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use mayazcash_bindings::contract::{expected, NAMESPACE};
use mayazcash_call::{ContractDescriptor, FunctionChecksum};
use serde::Serialize;

use crate::cmd::ContractArgs;
use crate::exit::{json_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct ContractOutput<'a> {
    namespace: &'a str,
    protocol_version: u32,
    checksums: &'a [FunctionChecksum],
}

pub fn run(args: ContractArgs, format: OutputFormat) -> CliResult<i32> {
    let contract = select(expected(), args.function.as_deref())?;
    let out = ContractOutput {
        namespace: NAMESPACE,
        protocol_version: contract.protocol_version,
        checksums: &contract.checksums,
    };

    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string(&out).map_err(|err| json_error("contract", err))?;
            println!("{text}");
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FUNCTION", "SYMBOL", "CHECKSUM"]);
            for entry in out.checksums {
                table.add_row(vec![
                    entry.function.to_string(),
                    format!("uniffi_{NAMESPACE}_checksum_func_{}", entry.function),
                    entry.checksum.to_string(),
                ]);
            }
            println!("namespace: {} (contract version {})", out.namespace, out.protocol_version);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("namespace={} contract_version={}", out.namespace, out.protocol_version);
            for entry in out.checksums {
                println!("{}={}", entry.function, entry.checksum);
            }
        }
    }

    Ok(SUCCESS)
}

fn select(contract: ContractDescriptor, function: Option<&str>) -> CliResult<ContractDescriptor> {
    let Some(function) = function else {
        return Ok(contract);
    };
    let checksums: Vec<FunctionChecksum> = contract
        .checksums
        .into_iter()
        .filter(|entry| entry.function == function)
        .collect();
    if checksums.is_empty() {
        return Err(CliError::new(
            USAGE,
            format!("contract: unknown function {function}"),
        ));
    }
    Ok(ContractDescriptor {
        protocol_version: contract.protocol_version,
        checksums,
    })
}
