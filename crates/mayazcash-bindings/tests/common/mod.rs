//! In-process stand-in for `libmaya_zcash`.
//!
//! Implements every entry point with the native-side scaffold, so calls go
//! through real buffers and real status codes. Balances, keys and
//! transactions are canned.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicIsize, AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use mayazcash_abi::{
    call_with_status, lift_arg, lower_error, lower_return, ForeignBytes, LocalAllocator,
    NativeAllocator, NativeError, RustBuffer, RustCallStatus, CALL_SUCCESS,
};
use mayazcash_bindings::{
    BlockTxs, Direction, Height, Output, PartialTx, Sighashes, TransparentKey, TxBytes, Utxo,
    VaultTx, ZcashClient, ZcashError, ZcashNative, CHECKSUMS, CONTRACT_VERSION,
};
use mayazcash_call::ContractSource;
use mayazcash_wire::WireCodec;

pub const VAULT_ADDRESS: &str = "u1vaultfake";
pub const TIP: u32 = 2_500_000;

type Outcome<T> = Result<T, NativeError>;

#[derive(Debug)]
pub struct FakeNative {
    version: u32,
    checksum_overrides: Vec<(&'static str, u16)>,
    missing: Option<&'static str>,
    panic_in: Mutex<Option<&'static str>>,
    forced: Mutex<Option<(i8, Vec<u8>)>>,
    discarding: AtomicBool,
    created: AtomicIsize,
    released: AtomicIsize,
    contract_reads: AtomicUsize,
    logger_inits: AtomicUsize,
    calls: Mutex<Vec<&'static str>>,
}

impl Default for FakeNative {
    fn default() -> Self {
        Self {
            version: CONTRACT_VERSION,
            checksum_overrides: Vec::new(),
            missing: None,
            panic_in: Mutex::new(None),
            forced: Mutex::new(None),
            discarding: AtomicBool::new(false),
            created: AtomicIsize::new(0),
            released: AtomicIsize::new(0),
            contract_reads: AtomicUsize::new(0),
            logger_inits: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeNative {
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_checksum(mut self, function: &'static str, checksum: u16) -> Self {
        self.checksum_overrides.push((function, checksum));
        self
    }

    pub fn without_function(mut self, function: &'static str) -> Self {
        self.missing = Some(function);
        self
    }

    /// Panic inside the next call to `function`.
    pub fn panic_in(&self, function: &'static str) {
        *self.panic_in.lock().unwrap() = Some(function);
    }

    /// Report `code` with `error_buf` on the next call. The body still runs
    /// so its arguments are released, but its outcome is thrown away.
    pub fn force_status(&self, code: i8, error_buf: &[u8]) {
        *self.forced.lock().unwrap() = Some((code, error_buf.to_vec()));
    }

    /// Native buffers handed out and not yet given back.
    pub fn live(&self) -> isize {
        self.created.load(Ordering::SeqCst) - self.released.load(Ordering::SeqCst)
    }

    /// Times the contract version was read.
    pub fn contract_reads(&self) -> usize {
        self.contract_reads.load(Ordering::SeqCst)
    }

    pub fn logger_inits(&self) -> usize {
        self.logger_inits.load(Ordering::SeqCst)
    }

    /// Functions whose body ran, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn created(&self, buf: &RustBuffer) {
        if !buf.data.is_null() {
            self.created.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn released(&self, buf: &RustBuffer) {
        if !buf.data.is_null() {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn run<T, F>(&self, function: &'static str, status: &mut RustCallStatus, f: F) -> T
    where
        T: Default,
        F: FnOnce() -> Outcome<T>,
    {
        let forced = self.forced.lock().unwrap().take();
        if let Some((code, body)) = forced {
            self.discarding.store(true, Ordering::SeqCst);
            let mut scratch = RustCallStatus::default();
            drop(call_with_status(&mut scratch, f));
            self.discarding.store(false, Ordering::SeqCst);
            drop(unsafe { scratch.take_error_buf().destroy_into_vec() }.unwrap());

            status.code = code;
            status.error_buf = RustBuffer::from_vec(body).unwrap();
            self.created(&status.error_buf);
            return T::default();
        }
        self.calls.lock().unwrap().push(function);
        let value = call_with_status(status, f);
        if status.code != CALL_SUCCESS {
            self.created(&status.error_buf);
        }
        value
    }

    /// Panics if a panic was requested for `function`.
    fn checkpoint(&self, function: &'static str) {
        let target = self.panic_in.lock().unwrap().take_if(|target| *target == function);
        if target.is_some() {
            panic!("boom in {function}");
        }
    }

    unsafe fn arg<T: WireCodec>(&self, buf: RustBuffer) -> Outcome<T> {
        self.released(&buf);
        unsafe { lift_arg(buf) }
    }

    fn ret<T: WireCodec>(&self, value: &T) -> Outcome<RustBuffer> {
        if self.discarding.load(Ordering::SeqCst) {
            return Ok(RustBuffer::default());
        }
        let buf = lower_return(value)?;
        self.created(&buf);
        Ok(buf)
    }
}

pub fn client() -> ZcashClient<FakeNative> {
    ZcashClient::new(FakeNative::default())
}

pub fn utxos() -> Vec<Utxo> {
    vec![
        Utxo {
            txid: "a1".into(),
            height: TIP - 10,
            vout: 0,
            script: "76a914aa".into(),
            value: 100_000,
        },
        Utxo {
            txid: "b2".into(),
            height: TIP - 3,
            vout: 1,
            script: "76a914bb".into(),
            value: 50_000,
        },
    ]
}

fn plan(height: u32, inputs: Vec<Utxo>, outputs: Vec<Output>) -> PartialTx {
    PartialTx {
        height,
        inputs,
        outputs,
        fee: 10_000,
        tx_seed: Bytes::from_static(&[9u8; 32]),
    }
}

fn domain(err: ZcashError) -> NativeError {
    lower_error(&err)
}

impl NativeAllocator for FakeNative {
    fn rustbuffer_alloc(&self, size: i32, status: &mut RustCallStatus) -> RustBuffer {
        let buf = LocalAllocator.rustbuffer_alloc(size, status);
        self.created(&buf);
        buf
    }

    unsafe fn rustbuffer_from_bytes(
        &self,
        bytes: ForeignBytes,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        let buf = unsafe { LocalAllocator.rustbuffer_from_bytes(bytes, status) };
        self.created(&buf);
        buf
    }

    unsafe fn rustbuffer_free(&self, buf: RustBuffer, status: &mut RustCallStatus) {
        self.released(&buf);
        unsafe { LocalAllocator.rustbuffer_free(buf, status) }
    }

    unsafe fn rustbuffer_reserve(
        &self,
        buf: RustBuffer,
        additional: i32,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        unsafe { LocalAllocator.rustbuffer_reserve(buf, additional, status) }
    }
}

impl ContractSource for FakeNative {
    fn contract_version(&self, _status: &mut RustCallStatus) -> u32 {
        self.contract_reads.fetch_add(1, Ordering::SeqCst);
        self.version
    }

    fn function_checksum(&self, function: &str, _status: &mut RustCallStatus) -> Option<u16> {
        if self.missing == Some(function) {
            return None;
        }
        self.checksum_overrides
            .iter()
            .chain(CHECKSUMS.iter())
            .find(|(name, _)| *name == function)
            .map(|(_, checksum)| *checksum)
    }
}

impl ZcashNative for FakeNative {
    unsafe fn apply_signatures(
        &self,
        vault: RustBuffer,
        ptx: RustBuffer,
        signatures: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        self.run("apply_signatures", status, || {
            let _vault: Bytes = unsafe { self.arg(vault) }?;
            let ptx: PartialTx = unsafe { self.arg(ptx) }?;
            let signatures: Vec<Bytes> = unsafe { self.arg(signatures) }?;
            self.checkpoint("apply_signatures");
            if signatures.len() != ptx.inputs.len() {
                return Err(domain(ZcashError::AssertError(format!(
                    "{} signatures for {} inputs",
                    signatures.len(),
                    ptx.inputs.len()
                ))));
            }
            let tx: Vec<u8> = signatures.iter().flat_map(|sig| sig.iter().copied()).collect();
            self.ret(&Bytes::from(tx))
        })
    }

    unsafe fn broadcast_raw_tx(&self, tx: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        self.run("broadcast_raw_tx", status, || {
            let tx: Bytes = unsafe { self.arg(tx) }?;
            self.checkpoint("broadcast_raw_tx");
            if tx.is_empty() {
                return Err(domain(ZcashError::TxRejected("empty transaction".into())));
            }
            self.ret(&format!("txid-{}", tx.len()))
        })
    }

    unsafe fn build_vault_unauthorized_tx(
        &self,
        vault: RustBuffer,
        ptx: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        self.run("build_vault_unauthorized_tx", status, || {
            let _vault: Bytes = unsafe { self.arg(vault) }?;
            let ptx: PartialTx = unsafe { self.arg(ptx) }?;
            self.checkpoint("build_vault_unauthorized_tx");
            let hashes = (0..ptx.inputs.len())
                .map(|index| Bytes::from(vec![index as u8; 32]))
                .collect();
            self.ret(&Sighashes { hashes })
        })
    }

    unsafe fn combine_vault(
        &self,
        height: u32,
        vault: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        self.run("combine_vault", status, || {
            let _vault: Bytes = unsafe { self.arg(vault) }?;
            self.checkpoint("combine_vault");
            let inputs = utxos();
            let total: u64 = inputs.iter().map(|utxo| utxo.value).sum();
            let output = Output {
                address: VAULT_ADDRESS.into(),
                amount: total - 10_000,
                memo: String::new(),
            };
            self.ret(&plan(height, inputs, vec![output]))
        })
    }

    unsafe fn combine_vault_utxos(
        &self,
        height: u32,
        vault: RustBuffer,
        utxos: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        self.run("combine_vault_utxos", status, || {
            let _vault: Bytes = unsafe { self.arg(vault) }?;
            let inputs: Vec<Utxo> = unsafe { self.arg(utxos) }?;
            self.checkpoint("combine_vault_utxos");
            let total: u64 = inputs.iter().map(|utxo| utxo.value).sum();
            if total <= 10_000 {
                return Err(domain(ZcashError::NotEnoughFunds("not enough funds".into())));
            }
            let output = Output {
                address: VAULT_ADDRESS.into(),
                amount: total - 10_000,
                memo: String::new(),
            };
            self.ret(&plan(height, inputs, vec![output]))
        })
    }

    unsafe fn get_balance(&self, address: RustBuffer, status: &mut RustCallStatus) -> u64 {
        self.run("get_balance", status, || {
            let address: String = unsafe { self.arg(address) }?;
            self.checkpoint("get_balance");
            match address.as_str() {
                "poor" => Err(domain(ZcashError::NotEnoughFunds("not enough funds".into()))),
                "" => Err(domain(ZcashError::InvalidAddress("empty address".into()))),
                _ => Ok(utxos().iter().map(|utxo| utxo.value).sum()),
            }
        })
    }

    fn get_latest_height(&self, status: &mut RustCallStatus) -> RustBuffer {
        self.run("get_latest_height", status, || {
            self.checkpoint("get_latest_height");
            self.ret(&Height {
                number: TIP,
                hash: Bytes::from_static(&[0xab; 32]),
            })
        })
    }

    unsafe fn get_ovk(&self, pubkey: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        self.run("get_ovk", status, || {
            let pubkey: Bytes = unsafe { self.arg(pubkey) }?;
            self.checkpoint("get_ovk");
            let seed = pubkey.first().copied().unwrap_or_default();
            self.ret(&Bytes::from(vec![seed; 32]))
        })
    }

    unsafe fn get_vault_address(
        &self,
        pubkey: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        self.run("get_vault_address", status, || {
            let pubkey: Bytes = unsafe { self.arg(pubkey) }?;
            self.checkpoint("get_vault_address");
            if pubkey.len() != 33 {
                return Err(domain(ZcashError::InvalidVaultPubkey(format!(
                    "expected 33 bytes, got {}",
                    pubkey.len()
                ))));
            }
            self.ret(&VAULT_ADDRESS.to_owned())
        })
    }

    fn init_logger(&self, status: &mut RustCallStatus) {
        self.run("init_logger", status, || {
            self.checkpoint("init_logger");
            self.logger_inits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    unsafe fn list_utxos(&self, address: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        self.run("list_utxos", status, || {
            let address: String = unsafe { self.arg(address) }?;
            self.checkpoint("list_utxos");
            if address == "poor" {
                return self.ret(&Vec::<Utxo>::new());
            }
            self.ret(&utxos())
        })
    }

    unsafe fn match_with_blockchain_receiver(
        &self,
        address: RustBuffer,
        receiver: RustBuffer,
        status: &mut RustCallStatus,
    ) -> i8 {
        self.run("match_with_blockchain_receiver", status, || {
            let address: String = unsafe { self.arg(address) }?;
            let receiver: String = unsafe { self.arg(receiver) }?;
            self.checkpoint("match_with_blockchain_receiver");
            if !address.starts_with("u1") {
                return Err(domain(ZcashError::InvalidAddress(address)));
            }
            Ok(i8::from(address.ends_with(&receiver)))
        })
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
        self.run("pay_from_vault", status, || {
            let _vault: Bytes = unsafe { self.arg(vault) }?;
            let to: String = unsafe { self.arg(to) }?;
            let memo: String = unsafe { self.arg(memo) }?;
            self.checkpoint("pay_from_vault");
            let available: u64 = utxos().iter().map(|utxo| utxo.value).sum();
            if amount.saturating_add(10_000) > available {
                return Err(domain(ZcashError::NotEnoughFunds("not enough funds".into())));
            }
            let output = Output {
                address: to,
                amount,
                memo,
            };
            self.ret(&plan(height, utxos(), vec![output]))
        })
    }

    unsafe fn scan_blocks(
        &self,
        pubkey: RustBuffer,
        prev_hashes: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        self.run("scan_blocks", status, || {
            let _pubkey: Bytes = unsafe { self.arg(pubkey) }?;
            let prev_hashes: Vec<String> = unsafe { self.arg(prev_hashes) }?;
            self.checkpoint("scan_blocks");
            let Some(start_hash) = prev_hashes.first() else {
                return self.ret(&None::<BlockTxs>);
            };
            if start_hash == "orphan" {
                return Err(domain(ZcashError::Reorg(format!(
                    "none of {} hashes on chain",
                    prev_hashes.len()
                ))));
            }
            let found = BlockTxs {
                start_hash: start_hash.clone(),
                end_hash: "tip".into(),
                start_height: TIP - 5,
                end_height: TIP,
                txs: vec![VaultTx {
                    txid: "c3".into(),
                    height: TIP - 1,
                    counterparty: Output {
                        address: "t1sender".into(),
                        amount: 25_000,
                        memo: "MEMO".into(),
                    },
                    direction: Direction::Incoming,
                }],
            };
            self.ret(&Some(found))
        })
    }

    unsafe fn scan_mempool(&self, pubkey: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        self.run("scan_mempool", status, || {
            let _pubkey: Bytes = unsafe { self.arg(pubkey) }?;
            self.checkpoint("scan_mempool");
            self.ret(&vec![VaultTx {
                txid: "d4".into(),
                height: 0,
                counterparty: Output {
                    address: "t1recipient".into(),
                    amount: 40_000,
                    memo: String::new(),
                },
                direction: Direction::Outgoing,
            }])
        })
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
        self.run("send_to_vault", status, || {
            let _sk: Bytes = unsafe { self.arg(sk) }?;
            let from: String = unsafe { self.arg(from) }?;
            let _vault: Bytes = unsafe { self.arg(vault) }?;
            let memo: String = unsafe { self.arg(memo) }?;
            self.checkpoint("send_to_vault");
            if from == "poor" || amount == 0 {
                return Err(domain(ZcashError::NotEnoughFunds("not enough funds".into())));
            }
            self.ret(&TxBytes {
                txid: format!("send-{expiry_height}-{amount}"),
                data: Bytes::from(memo.into_bytes()),
            })
        })
    }

    unsafe fn sign_sighash(
        &self,
        sk: RustBuffer,
        sighash: RustBuffer,
        status: &mut RustCallStatus,
    ) -> RustBuffer {
        self.run("sign_sighash", status, || {
            let _sk: Bytes = unsafe { self.arg(sk) }?;
            let sighash: Bytes = unsafe { self.arg(sighash) }?;
            self.checkpoint("sign_sighash");
            let mut signature = sighash.to_vec();
            signature.push(0x01);
            self.ret(&Bytes::from(signature))
        })
    }

    unsafe fn sk_to_pub(&self, wif: RustBuffer, status: &mut RustCallStatus) -> RustBuffer {
        self.run("sk_to_pub", status, || {
            let wif: String = unsafe { self.arg(wif) }?;
            self.checkpoint("sk_to_pub");
            if wif.is_empty() {
                return Err(domain(ZcashError::AssertError("empty WIF".into())));
            }
            self.ret(&TransparentKey {
                sk: Bytes::from_static(&[1u8; 32]),
                pk: Bytes::from_static(&[2u8; 33]),
                addr: "t1fake".into(),
            })
        })
    }

    unsafe fn validate_address(&self, address: RustBuffer, status: &mut RustCallStatus) -> i8 {
        self.run("validate_address", status, || {
            let address: String = unsafe { self.arg(address) }?;
            self.checkpoint("validate_address");
            Ok(i8::from(address.starts_with("t1") || address.starts_with("u1")))
        })
    }
}
