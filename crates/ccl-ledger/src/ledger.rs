use std::sync::Arc;

use ccl_chain::{ChainReader, ChainWriter, LogTransport, SessionState};
use ccl_store::{chain_head_key, get_json, validate_asset_key, RecordStore, WALLET_KEY};
use ccl_types::{Seed, Timestamp};
use ccl_wallet::{PaymentSender, ValueNetwork, WalletIdentity};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::records::{Asset, AssetView, ChainHead, ChainPointer, ListedAsset, Participant};
use crate::seed_data::{SEED_ASSETS, SEED_PARTICIPANTS};

/// Message returned by a completed custody transfer.
pub const TRANSFER_SUCCESS: &str = "changeContainerHolder success";

/// Custody records kept consistent with per-asset chains and holder payments.
///
/// Operations are not atomic across the record store, the chain transport
/// and the value network. Each one aborts on its first error and leaves the
/// steps already committed in place; [`CustodyLedger::audit_asset`] reports
/// the resulting windows.
pub struct CustodyLedger {
    pub(crate) store: Arc<dyn RecordStore>,
    pub(crate) transport: Arc<dyn LogTransport>,
    writer: ChainWriter,
    payments: PaymentSender,
    pub(crate) config: LedgerConfig,
}

impl CustodyLedger {
    pub fn new(
        store: Arc<dyn RecordStore>,
        transport: Arc<dyn LogTransport>,
        network: Arc<dyn ValueNetwork>,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        let writer = ChainWriter::new(transport.clone(), config.channel()?)?;
        let payments = PaymentSender::new(network, config.security);
        Ok(Self {
            store,
            transport,
            writer,
            payments,
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Write the fixture assets, the participants, and the operating wallet.
    ///
    /// A store write failure aborts. An asset whose record cannot be encoded
    /// or whose chain cannot be started is logged and skipped. Every
    /// participant receives a freshly generated wallet on each run; the
    /// operating wallet never moves back to an already spent index.
    pub fn bootstrap(&self) -> Result<(), LedgerError> {
        let now = Timestamp::now();
        let mut recorded = 0usize;
        for seed in &SEED_ASSETS {
            let asset = Asset::new(seed.description, seed.location, seed.holder, now);
            match self.write_asset_with_chain(seed.key, &asset) {
                Ok(()) => recorded += 1,
                Err(err @ (LedgerError::WriteFailure { .. } | LedgerError::Store(_))) => {
                    return Err(err)
                }
                Err(err) => warn!(key = seed.key, error = %err, "skipping seed asset"),
            }
        }

        for seed in &SEED_PARTICIPANTS {
            let participant = Participant {
                role: seed.role.to_string(),
                description: seed.description.to_string(),
                wallet: WalletIdentity::generate(self.config.security),
            };
            self.put(seed.role, &participant)?;
        }

        let wallet = self.bootstrap_wallet()?;
        self.put(WALLET_KEY, &wallet)?;

        info!(
            assets = recorded,
            participants = SEED_PARTICIPANTS.len(),
            wallet = %wallet.address.short(),
            "ledger bootstrapped"
        );
        Ok(())
    }

    /// The operating wallet bootstrap persists.
    ///
    /// A wallet already stored for the same seed keeps its key index when
    /// that is ahead of the configured start, so a spent address is never
    /// handed out again. Without a configured seed the stored seed is reused.
    fn bootstrap_wallet(&self) -> Result<WalletIdentity, LedgerError> {
        let existing: Option<WalletIdentity> = self.get(WALLET_KEY)?;
        let start_index = self.config.wallet.start_index;
        let seed = match (&self.config.wallet.seed, &existing) {
            (Some(seed), _) => seed.clone(),
            (None, Some(stored)) => stored.seed.clone(),
            (None, None) => {
                warn!("no operating wallet seed configured, generating one");
                Seed::generate()
            }
        };

        match existing {
            Some(stored) if stored.seed == seed && stored.key_index > start_index => {
                warn!(
                    persisted = stored.key_index,
                    configured = start_index,
                    "keeping persisted wallet index ahead of configured start"
                );
                Ok(stored)
            }
            _ => Ok(WalletIdentity::new(seed, start_index, self.config.security)),
        }
    }

    /// Create or replace an asset record and start a new chain for it.
    ///
    /// If the chain cannot be started after the record was written, the
    /// asset is left without a chain head.
    pub fn record_asset(
        &self,
        id: &str,
        description: &str,
        location: &str,
        holder: &str,
    ) -> Result<(), LedgerError> {
        validate_asset_key(id).map_err(|e| LedgerError::InvalidArgument(e.to_string()))?;
        if self.is_participant(id)? {
            return Err(LedgerError::InvalidArgument(format!(
                "{id} is a participant role, not an asset key"
            )));
        }
        let asset = Asset::new(description, location, holder, Timestamp::now());
        self.write_asset_with_chain(id, &asset)?;
        info!(key = id, holder, "asset recorded");
        Ok(())
    }

    /// Current record, chain pointer, full history and holder payout address.
    pub fn query_asset(&self, id: &str) -> Result<AssetView, LedgerError> {
        let asset: Asset = self
            .get(id)?
            .ok_or_else(|| LedgerError::not_found(format!("container {id}")))?;
        let head = self.chain_head(id)?;

        let messages = self.reader_for(&head)?.read(&head.root)?;

        let participant = self.participant(&asset.holder)?;

        Ok(AssetView {
            container: asset,
            mamstate: ChainPointer {
                root: head.root,
                side_key: head.side_key,
            },
            messages: messages.join(", "),
            wallet: participant.wallet.address,
        })
    }

    /// Every record in the configured key range, in store order.
    pub fn query_all_assets(&self) -> Result<Vec<ListedAsset>, LedgerError> {
        let range = &self.config.key_range;
        let rows = self.store.range(&range.start, &range.end)?;
        rows.into_iter()
            .map(|(key, bytes)| {
                let record = serde_json::from_slice(&bytes)
                    .map_err(|e| LedgerError::Serialization(format!("{key}: {e}")))?;
                Ok(ListedAsset { key, record })
            })
            .collect()
    }

    /// Hand an asset to `new_holder` and pay its previous holder.
    ///
    /// Steps run in order and stop at the first failure without undoing the
    /// ones already committed: asset record, chain append and chain head,
    /// then the payment and the operating wallet's key index.
    pub fn transfer_custody(&self, id: &str, new_holder: &str) -> Result<&'static str, LedgerError> {
        let mut asset: Asset = self
            .get(id)?
            .ok_or_else(|| LedgerError::not_found(format!("container {id}")))?;
        let previous_holder = asset.holder.clone();
        asset.hand_over(new_holder);
        let payload = asset.to_json()?;
        self.put_raw(id, payload.as_bytes())?;

        let mut head = self.chain_head(id)?;
        let prior = SessionState::from_token(&head.session)?;
        let next = self.writer.append(&payload, prior)?;
        head.session = next.to_token()?;
        self.put(&chain_head_key(id), &head)?;
        debug!(key = id, index = next.index(), "custody appended to chain");

        let participant = self.participant(&previous_holder)?;
        let mut wallet: WalletIdentity = self
            .get(WALLET_KEY)?
            .ok_or_else(|| LedgerError::not_found("wallet data"))?;

        let next_index = self.payments.transfer_value(
            &wallet.seed,
            wallet.key_index,
            &participant.wallet.address,
            self.config.payment_amount,
        )?;
        wallet.advance_to(next_index, self.config.security)?;
        self.put(WALLET_KEY, &wallet)?;

        info!(
            key = id,
            from = %previous_holder,
            to = new_holder,
            paid = self.config.payment_amount,
            key_index = next_index,
            "custody transferred"
        );
        Ok(TRANSFER_SUCCESS)
    }

    fn write_asset_with_chain(&self, id: &str, asset: &Asset) -> Result<(), LedgerError> {
        let payload = asset.to_json()?;
        self.put_raw(id, payload.as_bytes())?;
        let genesis = self.writer.genesis(&payload)?;
        let head = ChainHead::from_genesis(genesis, self.writer.channel())?;
        self.put(&chain_head_key(id), &head)?;
        debug!(key = id, root = %head.root.short(), mode = %head.mode, "chain started");
        Ok(())
    }

    pub(crate) fn chain_head(&self, id: &str) -> Result<ChainHead, LedgerError> {
        self.get(&chain_head_key(id))?
            .ok_or_else(|| LedgerError::not_found(format!("chain head of {id}")))
    }

    /// The participant stored under `role`. A key holding any other kind of
    /// record does not name a participant.
    pub(crate) fn participant(&self, role: &str) -> Result<Participant, LedgerError> {
        self.store
            .get(role)?
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or_else(|| LedgerError::not_found(format!("participant {role}")))
    }

    fn is_participant(&self, key: &str) -> Result<bool, LedgerError> {
        if SEED_PARTICIPANTS.iter().any(|seed| seed.role == key) {
            return Ok(true);
        }
        match self.participant(key) {
            Ok(_) => Ok(true),
            Err(LedgerError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// A reader for the channel the chain was started with.
    pub(crate) fn reader_for(&self, head: &ChainHead) -> Result<ChainReader, LedgerError> {
        Ok(ChainReader::new(
            self.transport.clone(),
            head.channel(),
            self.config.read_limits(),
        )?)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LedgerError> {
        Ok(get_json(self.store.as_ref(), key)?)
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), LedgerError> {
        let bytes = serde_json::to_vec(value)?;
        self.put_raw(key, &bytes)
    }

    fn put_raw(&self, key: &str, bytes: &[u8]) -> Result<(), LedgerError> {
        self.store
            .put(key, bytes)
            .map_err(|e| LedgerError::write_failure(key, e))
    }
}
