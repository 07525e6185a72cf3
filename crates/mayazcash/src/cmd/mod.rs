use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

#[cfg(feature = "link")]
pub mod check;
pub mod contract;
pub mod decode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show version information.
    Version(VersionArgs),
    /// Print the compiled-in contract descriptor.
    Contract(ContractArgs),
    /// Decode a hex dump of a wire buffer.
    Decode(DecodeArgs),
    /// Verify the linked native library against the compiled-in contract.
    #[cfg(feature = "link")]
    Check(CheckArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Version(args) => version::run(args),
        Command::Contract(args) => contract::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        #[cfg(feature = "link")]
        Command::Check(args) => check::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct ContractArgs {
    /// Only show the checksum of this function.
    #[arg(long, value_name = "NAME")]
    pub function: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Type the buffer holds.
    #[arg(value_enum)]
    pub kind: decode::WireType,
    /// Buffer contents as hex; whitespace and a leading `0x` are ignored.
    pub hex: String,
}

#[cfg(feature = "link")]
#[derive(Args, Debug, Default)]
pub struct CheckArgs {}
