//! Records exchanged with the component.
//!
//! Field order is part of the wire format and of each function's
//! checksum; do not reorder.

use bytes::Bytes;
use mayazcash_wire::{wire_enum, wire_record};

#[cfg(feature = "serde")]
fn hex_bytes<S: serde::Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

#[cfg(feature = "serde")]
fn hex_bytes_seq<S: serde::Serializer>(
    items: &[Bytes],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(items.iter().map(hex::encode))
}

wire_record! {
    /// A block height and its hash.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct Height {
        pub number: u32,
        #[cfg_attr(feature = "serde", serde(serialize_with = "hex_bytes"))]
        pub hash: Bytes,
    }
}

wire_record! {
    /// A payment leg.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct Output {
        pub address: String,
        pub amount: u64,
        pub memo: String,
    }
}

wire_record! {
    /// Transparent unspent output.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct Utxo {
        pub txid: String,
        pub height: u32,
        pub vout: u32,
        pub script: String,
        pub value: u64,
    }
}

wire_record! {
    /// A transaction plan that has not been signed yet.
    ///
    /// `tx_seed` makes the build deterministic, so the sighashes computed
    /// from a plan match the transaction later assembled from it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct PartialTx {
        pub height: u32,
        pub inputs: Vec<Utxo>,
        pub outputs: Vec<Output>,
        pub fee: u64,
        #[cfg_attr(feature = "serde", serde(serialize_with = "hex_bytes"))]
        pub tx_seed: Bytes,
    }
}

wire_record! {
    /// One signature hash per transparent input.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct Sighashes {
        #[cfg_attr(feature = "serde", serde(serialize_with = "hex_bytes_seq"))]
        pub hashes: Vec<Bytes>,
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct TransparentKey {
        #[cfg_attr(feature = "serde", serde(serialize_with = "hex_bytes"))]
        pub sk: Bytes,
        #[cfg_attr(feature = "serde", serde(serialize_with = "hex_bytes"))]
        pub pk: Bytes,
        pub addr: String,
    }
}

wire_record! {
    /// A signed transaction and its id.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct TxBytes {
        pub txid: String,
        #[cfg_attr(feature = "serde", serde(serialize_with = "hex_bytes"))]
        pub data: Bytes,
    }
}

wire_enum! {
    /// Which way a vault transaction moved funds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub enum Direction {
        Incoming = 1,
        Outgoing = 2,
    }
}

wire_record! {
    /// A transaction touching the vault.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct VaultTx {
        pub txid: String,
        pub height: u32,
        pub counterparty: Output,
        pub direction: Direction,
    }
}

wire_record! {
    /// Vault transactions found in a contiguous range of blocks.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct BlockTxs {
        pub start_hash: String,
        pub end_hash: String,
        pub start_height: u32,
        pub end_height: u32,
        pub txs: Vec<VaultTx>,
    }
}
