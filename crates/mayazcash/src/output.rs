use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

use crate::exit::{json_error, CliResult};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Print a decoded value.
///
/// `Table` lists top-level fields; nested values are shown as compact JSON.
pub fn print_value<T>(value: &T, format: OutputFormat) -> CliResult<()>
where
    T: Serialize + std::fmt::Debug,
{
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string(value).map_err(|err| json_error("encode json", err))?;
            println!("{text}");
        }
        OutputFormat::Table => {
            let tree = serde_json::to_value(value).map_err(|err| json_error("encode json", err))?;
            println!("{}", field_table(&tree));
        }
        OutputFormat::Pretty => {
            println!("{value:#?}");
        }
    }
    Ok(())
}

fn field_table(tree: &Value) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["FIELD", "VALUE"]);

    match tree {
        Value::Object(fields) => {
            for (name, value) in fields {
                table.add_row(vec![name.clone(), cell(value)]);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                table.add_row(vec![index.to_string(), cell(value)]);
            }
        }
        other => {
            table.add_row(vec!["value".to_string(), cell(other)]);
        }
    }
    table
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
