use mayazcash_call::{ComponentConfig, ContractDescriptor};

/// Namespace of the native library's symbols.
pub const NAMESPACE: &str = "maya_zcash";

/// Protocol version the native library must report.
pub const CONTRACT_VERSION: u32 = 24;

/// Signature checksum of every function these bindings call.
pub const CHECKSUMS: [(&str, u16); 19] = [
    ("apply_signatures", 24461),
    ("broadcast_raw_tx", 14042),
    ("build_vault_unauthorized_tx", 928),
    ("combine_vault", 25110),
    ("combine_vault_utxos", 39573),
    ("get_balance", 16973),
    ("get_latest_height", 41262),
    ("get_ovk", 17238),
    ("get_vault_address", 10814),
    ("init_logger", 363),
    ("list_utxos", 39673),
    ("match_with_blockchain_receiver", 55511),
    ("pay_from_vault", 56589),
    ("scan_blocks", 29804),
    ("scan_mempool", 2161),
    ("send_to_vault", 12684),
    ("sign_sighash", 29344),
    ("sk_to_pub", 14751),
    ("validate_address", 64411),
];

/// The compiled-in contract.
pub fn expected() -> ContractDescriptor {
    CHECKSUMS
        .iter()
        .fold(ContractDescriptor::new(CONTRACT_VERSION), |contract, (function, checksum)| {
            contract.with_function(*function, *checksum)
        })
}

pub fn config() -> ComponentConfig {
    ComponentConfig {
        namespace: NAMESPACE,
        contract: expected(),
    }
}
