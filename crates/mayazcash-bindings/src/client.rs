use bytes::Bytes;
use mayazcash_call::{Component, ContractReport, Fault, OwnedBuffer};
use mayazcash_wire::WireCodec;

use crate::contract;
use crate::error::{Result, ZcashError};
use crate::native::ZcashNative;
use crate::types::{BlockTxs, Height, PartialTx, Sighashes, TransparentKey, TxBytes, Utxo, VaultTx};

/// Typed access to the maya_zcash component.
///
/// The first call verifies the library's contract; if that fails, every
/// call on this client returns the same fault.
#[derive(Debug)]
pub struct ZcashClient<L> {
    component: Component<L>,
}

// SAFETY (all `unsafe` blocks below): each buffer argument was lowered
// through this client's component, so it comes from the library's own
// allocator, and `into_raw` moves it into the call.
impl<L: ZcashNative> ZcashClient<L> {
    pub fn new(lib: L) -> Self {
        Self {
            component: Component::new(lib, contract::config()),
        }
    }

    pub fn component(&self) -> &Component<L> {
        &self.component
    }

    /// Run the contract check now instead of on first call.
    pub fn initialize(&self) -> std::result::Result<&ContractReport, Fault> {
        self.component.initialize()
    }

    fn blob(&self, bytes: &[u8]) -> std::result::Result<OwnedBuffer<'_, L>, Fault> {
        self.component.lower(&Bytes::copy_from_slice(bytes))
    }

    fn text(&self, text: &str) -> std::result::Result<OwnedBuffer<'_, L>, Fault> {
        self.component.lower(&text.to_owned())
    }

    fn value<T: WireCodec>(&self, value: &T) -> std::result::Result<OwnedBuffer<'_, L>, Fault> {
        self.component.lower(value)
    }

    /// Attach `signatures` to the transaction planned by `ptx`, returning
    /// the raw signed transaction.
    pub fn apply_signatures(
        &self,
        vault: &[u8],
        ptx: &PartialTx,
        signatures: &[Bytes],
    ) -> Result<Bytes> {
        let vault = self.blob(vault)?;
        let ptx = self.value(ptx)?;
        let signatures = self.value(&signatures.to_vec())?;
        self.component
            .call_buffer("apply_signatures", |lib, status| unsafe {
                lib.apply_signatures(vault.into_raw(), ptx.into_raw(), signatures.into_raw(), status)
            })
    }

    /// Broadcast a raw transaction and return its txid.
    pub fn broadcast_raw_tx(&self, tx: &[u8]) -> Result<String> {
        let tx = self.blob(tx)?;
        self.component.call_buffer("broadcast_raw_tx", |lib, status| unsafe {
            lib.broadcast_raw_tx(tx.into_raw(), status)
        })
    }

    pub fn build_vault_unauthorized_tx(&self, vault: &[u8], ptx: &PartialTx) -> Result<Sighashes> {
        let vault = self.blob(vault)?;
        let ptx = self.value(ptx)?;
        self.component
            .call_buffer("build_vault_unauthorized_tx", |lib, status| unsafe {
                lib.build_vault_unauthorized_tx(vault.into_raw(), ptx.into_raw(), status)
            })
    }

    /// Plan a transaction sweeping every vault UTXO back into the vault.
    pub fn combine_vault(&self, height: u32, vault: &[u8]) -> Result<PartialTx> {
        let vault = self.blob(vault)?;
        self.component.call_buffer("combine_vault", |lib, status| unsafe {
            lib.combine_vault(height, vault.into_raw(), status)
        })
    }

    /// Like [`ZcashClient::combine_vault`], restricted to `utxos`.
    pub fn combine_vault_utxos(
        &self,
        height: u32,
        vault: &[u8],
        utxos: &[Utxo],
    ) -> Result<PartialTx> {
        let vault = self.blob(vault)?;
        let utxos = self.value(&utxos.to_vec())?;
        self.component.call_buffer("combine_vault_utxos", |lib, status| unsafe {
            lib.combine_vault_utxos(height, vault.into_raw(), utxos.into_raw(), status)
        })
    }

    /// Transparent balance of `address`, in zatoshis.
    pub fn get_balance(&self, address: &str) -> Result<u64> {
        let address = self.text(address)?;
        self.component.call_value("get_balance", |lib, status| unsafe {
            lib.get_balance(address.into_raw(), status)
        })
    }

    pub fn get_latest_height(&self) -> Result<Height> {
        self.component
            .call_buffer("get_latest_height", |lib, status| lib.get_latest_height(status))
    }

    /// Outgoing viewing key of the vault controlled by `pubkey`.
    pub fn get_ovk(&self, pubkey: &[u8]) -> Result<Bytes> {
        let pubkey = self.blob(pubkey)?;
        self.component.call_buffer("get_ovk", |lib, status| unsafe {
            lib.get_ovk(pubkey.into_raw(), status)
        })
    }

    pub fn get_vault_address(&self, pubkey: &[u8]) -> Result<String> {
        let pubkey = self.blob(pubkey)?;
        self.component.call_buffer("get_vault_address", |lib, status| unsafe {
            lib.get_vault_address(pubkey.into_raw(), status)
        })
    }

    /// Install the component's own log subscriber.
    pub fn init_logger(&self) -> std::result::Result<(), Fault> {
        self.component
            .call_infallible("init_logger", |lib, status| lib.init_logger(status))
    }

    pub fn list_utxos(&self, address: &str) -> Result<Vec<Utxo>> {
        let address = self.text(address)?;
        self.component.call_buffer("list_utxos", |lib, status| unsafe {
            lib.list_utxos(address.into_raw(), status)
        })
    }

    /// True if `receiver` is one of the receivers of the unified `address`.
    pub fn match_with_blockchain_receiver(&self, address: &str, receiver: &str) -> Result<bool> {
        let address = self.text(address)?;
        let receiver = self.text(receiver)?;
        let raw: i8 = self
            .component
            .call_value::<ZcashError, _, _>("match_with_blockchain_receiver", |lib, status| unsafe {
                lib.match_with_blockchain_receiver(address.into_raw(), receiver.into_raw(), status)
            })?;
        Ok(raw != 0)
    }

    /// Plan a payment of `amount` zatoshis from the vault to `to`.
    pub fn pay_from_vault(
        &self,
        height: u32,
        vault: &[u8],
        to: &str,
        amount: u64,
        memo: &str,
    ) -> Result<PartialTx> {
        let vault = self.blob(vault)?;
        let to = self.text(to)?;
        let memo = self.text(memo)?;
        self.component.call_buffer("pay_from_vault", |lib, status| unsafe {
            lib.pay_from_vault(height, vault.into_raw(), to.into_raw(), amount, memo.into_raw(), status)
        })
    }

    /// Scan new blocks for vault transactions.
    ///
    /// `prev_hashes` are recent block hashes the caller already processed;
    /// `None` means there is nothing new. A reorg past every given hash is
    /// reported as [`ZcashError::Reorg`].
    pub fn scan_blocks(&self, pubkey: &[u8], prev_hashes: &[String]) -> Result<Option<BlockTxs>> {
        let pubkey = self.blob(pubkey)?;
        let prev_hashes = self.value(&prev_hashes.to_vec())?;
        self.component.call_buffer("scan_blocks", |lib, status| unsafe {
            lib.scan_blocks(pubkey.into_raw(), prev_hashes.into_raw(), status)
        })
    }

    pub fn scan_mempool(&self, pubkey: &[u8]) -> Result<Vec<VaultTx>> {
        let pubkey = self.blob(pubkey)?;
        self.component.call_buffer("scan_mempool", |lib, status| unsafe {
            lib.scan_mempool(pubkey.into_raw(), status)
        })
    }

    /// Build and sign a transparent payment from `from` into the vault.
    #[allow(clippy::too_many_arguments)]
    pub fn send_to_vault(
        &self,
        expiry_height: u32,
        sk: &[u8],
        from: &str,
        vault: &[u8],
        amount: u64,
        memo: &str,
    ) -> Result<TxBytes> {
        let sk = self.blob(sk)?;
        let from = self.text(from)?;
        let vault = self.blob(vault)?;
        let memo = self.text(memo)?;
        self.component.call_buffer("send_to_vault", |lib, status| unsafe {
            lib.send_to_vault(
                expiry_height,
                sk.into_raw(),
                from.into_raw(),
                vault.into_raw(),
                amount,
                memo.into_raw(),
                status,
            )
        })
    }

    pub fn sign_sighash(&self, sk: &[u8], sighash: &[u8]) -> Result<Bytes> {
        let sk = self.blob(sk)?;
        let sighash = self.blob(sighash)?;
        self.component.call_buffer("sign_sighash", |lib, status| unsafe {
            lib.sign_sighash(sk.into_raw(), sighash.into_raw(), status)
        })
    }

    /// Derive the key pair and transparent address of a WIF secret key.
    pub fn sk_to_pub(&self, wif: &str) -> Result<TransparentKey> {
        let wif = self.text(wif)?;
        self.component.call_buffer("sk_to_pub", |lib, status| unsafe {
            lib.sk_to_pub(wif.into_raw(), status)
        })
    }

    pub fn validate_address(&self, address: &str) -> Result<bool> {
        let address = self.text(address)?;
        let raw: i8 = self
            .component
            .call_value::<ZcashError, _, _>("validate_address", |lib, status| unsafe {
                lib.validate_address(address.into_raw(), status)
            })?;
        Ok(raw != 0)
    }
}
