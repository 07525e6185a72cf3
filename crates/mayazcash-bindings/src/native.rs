use mayazcash_abi::{NativeAllocator, RustBuffer, RustCallStatus};
use mayazcash_call::ContractSource;

/// Raw entry points of the maya_zcash component.
///
/// One method per exported function, with the C signature: buffer
/// arguments are lowered values whose ownership passes to the callee, and
/// scalars travel by value. Implemented by the linked library (feature
/// `link`) and by in-process fakes.
///
/// # Safety
/// For every method, each `RustBuffer` argument must come from this
/// component's allocator and must not be used after the call.
#[allow(clippy::missing_safety_doc)]
pub trait ZcashNative: NativeAllocator + ContractSource {
    unsafe fn apply_signatures(
        &self,
        vault: RustBuffer,
        ptx: RustBuffer,
        signatures: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    unsafe fn broadcast_raw_tx(&self, tx: RustBuffer, status: &mut RustCallStatus) -> RustBuffer;

    unsafe fn build_vault_unauthorized_tx(
        &self,
        vault: RustBuffer,
        ptx: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    unsafe fn combine_vault(
        &self,
        height: u32,
        vault: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    unsafe fn combine_vault_utxos(
        &self,
        height: u32,
        vault: RustBuffer,
        utxos: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    unsafe fn get_balance(&self, address: RustBuffer, status: &mut RustCallStatus) -> u64;

    fn get_latest_height(&self, status: &mut RustCallStatus) -> RustBuffer;

    unsafe fn get_ovk(&self, pubkey: RustBuffer, status: &mut RustCallStatus) -> RustBuffer;

    unsafe fn get_vault_address(&self, pubkey: RustBuffer, status: &mut RustCallStatus)
        -> RustBuffer;

    fn init_logger(&self, status: &mut RustCallStatus);

    unsafe fn list_utxos(&self, address: RustBuffer, status: &mut RustCallStatus) -> RustBuffer;

    unsafe fn match_with_blockchain_receiver(
        &self,
        address: RustBuffer,
        receiver: RustBuffer,
        status: &mut RustCallStatus,
    ) -> i8;

    #[allow(clippy::too_many_arguments)]
    unsafe fn pay_from_vault(
        &self,
        height: u32,
        vault: RustBuffer,
        to: RustBuffer,
        amount: u64,
        memo: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    unsafe fn scan_blocks(
        &self,
        pubkey: RustBuffer,
        prev_hashes: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    unsafe fn scan_mempool(&self, pubkey: RustBuffer, status: &mut RustCallStatus) -> RustBuffer;

    #[allow(clippy::too_many_arguments)]
    unsafe fn send_to_vault(
        &self,
        expiry_height: u32,
        sk: RustBuffer,
        from: RustBuffer,
        vault: RustBuffer,
        amount: u64,
        memo: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    unsafe fn sign_sighash(
        &self,
        sk: RustBuffer,
        sighash: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer;

    unsafe fn sk_to_pub(&self, wif: RustBuffer, status: &mut RustCallStatus) -> RustBuffer;

    unsafe fn validate_address(&self, address: RustBuffer, status: &mut RustCallStatus) -> i8;
}
