use clap::ValueEnum;
use mayazcash_bindings::{
    BlockTxs, Height, Output, PartialTx, Sighashes, TransparentKey, TxBytes, Utxo, VaultTx,
    ZcashError,
};
use mayazcash_wire::{read_tagged, WireCodec};
use serde::Serialize;
use tracing::debug;

use crate::cmd::DecodeArgs;
use crate::exit::{hex_error, wire_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_value, OutputFormat};

/// Wire types the `decode` command understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WireType {
    Height,
    Output,
    Utxo,
    Utxos,
    PartialTx,
    Sighashes,
    TransparentKey,
    TxBytes,
    VaultTx,
    VaultTxs,
    BlockTxs,
    /// `scan_blocks` result: an optional `BlockTxs`.
    ScanResult,
    /// A `ZcashError` from a status error buffer.
    Error,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = parse_hex(&args.hex)?;
    debug!(kind = ?args.kind, len = bytes.len(), "decoding buffer");
    match args.kind {
        WireType::Height => show::<Height>(&bytes, format),
        WireType::Output => show::<Output>(&bytes, format),
        WireType::Utxo => show::<Utxo>(&bytes, format),
        WireType::Utxos => show::<Vec<Utxo>>(&bytes, format),
        WireType::PartialTx => show::<PartialTx>(&bytes, format),
        WireType::Sighashes => show::<Sighashes>(&bytes, format),
        WireType::TransparentKey => show::<TransparentKey>(&bytes, format),
        WireType::TxBytes => show::<TxBytes>(&bytes, format),
        WireType::VaultTx => show::<VaultTx>(&bytes, format),
        WireType::VaultTxs => show::<Vec<VaultTx>>(&bytes, format),
        WireType::BlockTxs => show::<BlockTxs>(&bytes, format),
        WireType::ScanResult => show::<Option<BlockTxs>>(&bytes, format),
        WireType::Error => {
            let err: ZcashError =
                read_tagged(&bytes).map_err(|err| wire_error("decode error", err))?;
            print_value(&err, format)?;
            Ok(SUCCESS)
        }
    }
}

fn show<T>(bytes: &[u8], format: OutputFormat) -> CliResult<i32>
where
    T: WireCodec + Serialize + std::fmt::Debug,
{
    let value = T::from_wire(bytes).map_err(|err| wire_error("decode", err))?;
    print_value(&value, format)?;
    Ok(SUCCESS)
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    if digits.is_empty() {
        return Err(CliError::new(USAGE, "decode: no input bytes"));
    }
    hex::decode(digits).map_err(|err| hex_error("decode", err))
}
