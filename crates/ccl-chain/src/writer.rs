use std::sync::Arc;

use ccl_crypto::{channel_root, mask_payload, EntryLinkVerifier};
use ccl_types::{Address, Seed};
use tracing::debug;

use crate::config::ChannelConfig;
use crate::error::ChainError;
use crate::session::SessionState;
use crate::transport::{Entry, LogTransport};

/// Result of starting a new chain.
#[derive(Debug)]
pub struct Genesis {
    /// Identity seed of the chain. Every later root derives from it.
    pub seed: Seed,
    /// Session state for the first continuation append.
    pub state: SessionState,
    /// Root the whole chain can be read forward from.
    pub root: Address,
}

/// Appends entries to per-asset chains.
pub struct ChainWriter {
    transport: Arc<dyn LogTransport>,
    channel: ChannelConfig,
}

impl ChainWriter {
    pub fn new(transport: Arc<dyn LogTransport>, channel: ChannelConfig) -> Result<Self, ChainError> {
        channel.validate()?;
        Ok(Self { transport, channel })
    }

    pub fn channel(&self) -> &ChannelConfig {
        &self.channel
    }

    /// Start a new chain whose first entry is `payload`.
    pub fn genesis(&self, payload: &str) -> Result<Genesis, ChainError> {
        let seed = Seed::generate();
        let session = SessionState::start(seed.clone(), &self.channel);
        let root = session.next_root();
        let state = self.publish(payload, session)?;
        debug!(root = %root.short(), mode = %self.channel.mode, "chain genesis");
        Ok(Genesis { seed, state, root })
    }

    /// Extend a chain with `payload`, consuming the prior session state.
    ///
    /// The session is rebuilt strictly from `prior`, including its channel
    /// mode and side key. If the slot `prior` points at is already occupied,
    /// `prior` was used before and nothing is written.
    pub fn append(&self, payload: &str, prior: SessionState) -> Result<SessionState, ChainError> {
        let index = prior.index();
        let state = self.publish(payload, prior)?;
        debug!(index, "chain continuation");
        Ok(state)
    }

    fn publish(&self, payload: &str, session: SessionState) -> Result<SessionState, ChainError> {
        let next_index = session
            .index()
            .checked_add(1)
            .ok_or_else(|| ChainError::Serialization("channel index overflow".into()))?;
        let root = session.next_root();
        let address = session.next_address();
        if !self.transport.fetch(&address)?.is_empty() {
            return Err(ChainError::StaleSession {
                index: session.index(),
            });
        }

        let stored = if session.mode().is_confidential() {
            mask_payload(payload.as_bytes(), session.side_key(), &root)
        } else {
            payload.as_bytes().to_vec()
        };
        let prev_link = session.last_link();
        let link = EntryLinkVerifier::compute_link(&stored, prev_link);
        let next_root = channel_root(session.seed(), next_index);

        self.transport.attach(
            &address,
            Entry {
                payload: stored,
                next_root,
                link,
                prev_link,
            },
        )?;
        session.advanced(link)
    }
}
