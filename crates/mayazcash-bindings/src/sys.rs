//! Native symbols of `libmaya_zcash`.

use mayazcash_abi::{ForeignBytes, NativeAllocator, RustBuffer, RustCallStatus};
use mayazcash_call::ContractSource;
use once_cell::sync::Lazy;

use crate::client::ZcashClient;
use crate::native::ZcashNative;

#[link(name = "maya_zcash")]
extern "C" {
    fn ffi_maya_zcash_rustbuffer_alloc(size: i32, status: *mut RustCallStatus) -> RustBuffer;
    fn ffi_maya_zcash_rustbuffer_from_bytes(
        bytes: ForeignBytes,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn ffi_maya_zcash_rustbuffer_free(buf: RustBuffer, status: *mut RustCallStatus);
    fn ffi_maya_zcash_rustbuffer_reserve(
        buf: RustBuffer,
        additional: i32,
        status: *mut RustCallStatus,
    ) -> RustBuffer;

    fn ffi_maya_zcash_uniffi_contract_version(status: *mut RustCallStatus) -> u32;

    fn uniffi_maya_zcash_checksum_func_apply_signatures(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_broadcast_raw_tx(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_build_vault_unauthorized_tx(
        status: *mut RustCallStatus,
    ) -> u16;
    fn uniffi_maya_zcash_checksum_func_combine_vault(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_combine_vault_utxos(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_get_balance(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_get_latest_height(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_get_ovk(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_get_vault_address(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_init_logger(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_list_utxos(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_match_with_blockchain_receiver(
        status: *mut RustCallStatus,
    ) -> u16;
    fn uniffi_maya_zcash_checksum_func_pay_from_vault(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_scan_blocks(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_scan_mempool(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_send_to_vault(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_sign_sighash(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_sk_to_pub(status: *mut RustCallStatus) -> u16;
    fn uniffi_maya_zcash_checksum_func_validate_address(status: *mut RustCallStatus) -> u16;

    fn uniffi_maya_zcash_fn_func_apply_signatures(
        vault: RustBuffer,
        ptx: RustBuffer,
        signatures: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_broadcast_raw_tx(
        tx: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_build_vault_unauthorized_tx(
        vault: RustBuffer,
        ptx: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_combine_vault(
        height: u32,
        vault: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_combine_vault_utxos(
        height: u32,
        vault: RustBuffer,
        utxos: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_get_balance(
        address: RustBuffer,
        status: *mut RustCallStatus,
    ) -> u64;
    fn uniffi_maya_zcash_fn_func_get_latest_height(status: *mut RustCallStatus) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_get_ovk(
        pubkey: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_get_vault_address(
        pubkey: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_init_logger(status: *mut RustCallStatus);
    fn uniffi_maya_zcash_fn_func_list_utxos(
        address: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_match_with_blockchain_receiver(
        address: RustBuffer,
        receiver: RustBuffer,
        status: *mut RustCallStatus,
    ) -> i8;
    fn uniffi_maya_zcash_fn_func_pay_from_vault(
        height: u32,
        vault: RustBuffer,
        to: RustBuffer,
        amount: u64,
        memo: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_scan_blocks(
        pubkey: RustBuffer,
        prev_hashes: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_scan_mempool(
        pubkey: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_send_to_vault(
        expiry_height: u32,
        sk: RustBuffer,
        from: RustBuffer,
        vault: RustBuffer,
        amount: u64,
        memo: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_sign_sighash(
        sk: RustBuffer,
        sighash: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_sk_to_pub(
        wif: RustBuffer,
        status: *mut RustCallStatus,
    ) -> RustBuffer;
    fn uniffi_maya_zcash_fn_func_validate_address(
        address: RustBuffer,
        status: *mut RustCallStatus,
    ) -> i8;
}

/// The statically linked native library.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedLibrary;

// SAFETY (every `unsafe` block below): the symbols are declared with the
// signatures of the C header; the status pointer is a live `&mut`.
impl NativeAllocator for LinkedLibrary {
    fn rustbuffer_alloc(&self, size: i32, status: &mut RustCallStatus) -> RustBuffer {
        unsafe { ffi_maya_zcash_rustbuffer_alloc(size, status) }
    }

    unsafe fn rustbuffer_from_bytes(
        &self,
        bytes: ForeignBytes,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { ffi_maya_zcash_rustbuffer_from_bytes(bytes, status) }
    }

    unsafe fn rustbuffer_free(&self, buf: RustBuffer, status: &mut RustCallStatus) {
        unsafe { ffi_maya_zcash_rustbuffer_free(buf, status) }
    }

    unsafe fn rustbuffer_reserve(
        &self,
        buf: RustBuffer,
        additional: i32,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { ffi_maya_zcash_rustbuffer_reserve(buf, additional, status) }
    }
}

impl ContractSource for LinkedLibrary {
    fn contract_version(&self, status: &mut RustCallStatus) -> u32 {
        unsafe { ffi_maya_zcash_uniffi_contract_version(status) }
    }

    fn function_checksum(&self, function: &str, status: &mut RustCallStatus) -> Option<u16> {
        let checksum_fn: unsafe extern "C" fn(*mut RustCallStatus) -> u16 = match function {
            "apply_signatures" => uniffi_maya_zcash_checksum_func_apply_signatures,
            "broadcast_raw_tx" => uniffi_maya_zcash_checksum_func_broadcast_raw_tx,
            "build_vault_unauthorized_tx" => {
                uniffi_maya_zcash_checksum_func_build_vault_unauthorized_tx
            }
            "combine_vault" => uniffi_maya_zcash_checksum_func_combine_vault,
            "combine_vault_utxos" => uniffi_maya_zcash_checksum_func_combine_vault_utxos,
            "get_balance" => uniffi_maya_zcash_checksum_func_get_balance,
            "get_latest_height" => uniffi_maya_zcash_checksum_func_get_latest_height,
            "get_ovk" => uniffi_maya_zcash_checksum_func_get_ovk,
            "get_vault_address" => uniffi_maya_zcash_checksum_func_get_vault_address,
            "init_logger" => uniffi_maya_zcash_checksum_func_init_logger,
            "list_utxos" => uniffi_maya_zcash_checksum_func_list_utxos,
            "match_with_blockchain_receiver" => {
                uniffi_maya_zcash_checksum_func_match_with_blockchain_receiver
            }
            "pay_from_vault" => uniffi_maya_zcash_checksum_func_pay_from_vault,
            "scan_blocks" => uniffi_maya_zcash_checksum_func_scan_blocks,
            "scan_mempool" => uniffi_maya_zcash_checksum_func_scan_mempool,
            "send_to_vault" => uniffi_maya_zcash_checksum_func_send_to_vault,
            "sign_sighash" => uniffi_maya_zcash_checksum_func_sign_sighash,
            "sk_to_pub" => uniffi_maya_zcash_checksum_func_sk_to_pub,
            "validate_address" => uniffi_maya_zcash_checksum_func_validate_address,
            _ => return None,
        };
        Some(unsafe { checksum_fn(status) })
    }
}

impl ZcashNative for LinkedLibrary {
    unsafe fn apply_signatures(
        &self,
        vault: RustBuffer,
        ptx: RustBuffer,
        signatures: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_apply_signatures(vault, ptx, signatures, status) }
    }

    unsafe fn broadcast_raw_tx(&self, tx: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_broadcast_raw_tx(tx, status) }
    }

    unsafe fn build_vault_unauthorized_tx(
        &self,
        vault: RustBuffer,
        ptx: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_build_vault_unauthorized_tx(vault, ptx, status) }
    }

    unsafe fn combine_vault(
        &self,
        height: u32,
        vault: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_combine_vault(height, vault, status) }
    }

    unsafe fn combine_vault_utxos(
        &self,
        height: u32,
        vault: RustBuffer,
        utxos: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_combine_vault_utxos(height, vault, utxos, status) }
    }

    unsafe fn get_balance(&self, address: RustBuffer, status: &mut RustCallStatus) -> u64 {
        unsafe { uniffi_maya_zcash_fn_func_get_balance(address, status) }
    }

    fn get_latest_height(&self, status: &mut RustCallStatus) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_get_latest_height(status) }
    }

    unsafe fn get_ovk(&self, pubkey: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_get_ovk(pubkey, status) }
    }

    unsafe fn get_vault_address(
        &self,
        pubkey: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_get_vault_address(pubkey, status) }
    }

    fn init_logger(&self, status: &mut RustCallStatus) {
        unsafe { uniffi_maya_zcash_fn_func_init_logger(status) }
    }

    unsafe fn list_utxos(&self, address: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_list_utxos(address, status) }
    }

    unsafe fn match_with_blockchain_receiver(
        &self,
        address: RustBuffer,
        receiver: RustBuffer,
        status: &mut RustCallStatus,
    ) -> i8 {
        unsafe { uniffi_maya_zcash_fn_func_match_with_blockchain_receiver(address, receiver, status) }
    }

    unsafe fn pay_from_vault(
        &self,
        height: u32,
        vault: RustBuffer,
        to: RustBuffer,
        amount: u64,
        memo: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_pay_from_vault(height, vault, to, amount, memo, status) }
    }

    unsafe fn scan_blocks(
        &self,
        pubkey: RustBuffer,
        prev_hashes: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_scan_blocks(pubkey, prev_hashes, status) }
    }

    unsafe fn scan_mempool(&self, pubkey: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_scan_mempool(pubkey, status) }
    }

    unsafe fn send_to_vault(
        &self,
        expiry_height: u32,
        sk: RustBuffer,
        from: RustBuffer,
        vault: RustBuffer,
        amount: u64,
        memo: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe {
            uniffi_maya_zcash_fn_func_send_to_vault(
                expiry_height,
                sk,
                from,
                vault,
                amount,
                memo,
                status,
            )
        }
    }

    unsafe fn sign_sighash(
        &self,
        sk: RustBuffer,
        sighash: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_sign_sighash(sk, sighash, status) }
    }

    unsafe fn sk_to_pub(&self, wif: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        unsafe { uniffi_maya_zcash_fn_func_sk_to_pub(wif, status) }
    }

    unsafe fn validate_address(&self, address: RustBuffer, status: &mut RustCallStatus) -> i8 {
        unsafe { uniffi_maya_zcash_fn_func_validate_address(address, status) }
    }
}

static GLOBAL: Lazy<ZcashClient<LinkedLibrary>> = Lazy::new(|| ZcashClient::new(LinkedLibrary));

/// Process-wide client over the linked library.
///
/// Its contract gate is shared by every caller in the process.
pub fn global() -> &'static ZcashClient<LinkedLibrary> {
    &GLOBAL
}
