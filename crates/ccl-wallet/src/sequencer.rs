use serde::{Deserialize, Serialize};

use ccl_crypto::wallet_address;
use ccl_types::{Address, SecurityLevel, Seed};

use crate::error::SequencerError;

/// An address issued for one key index, plus the index to persist next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedAddress {
    pub address: Address,
    pub next_index: u64,
}

/// Issues single-use addresses from a wallet seed and a monotonic index.
///
/// Issuance is pure. The caller must persist `next_index` before using the
/// wallet again; [`AddressSequencer::ensure_advance`] rejects any index that
/// does not move strictly forward.
pub struct AddressSequencer;

impl AddressSequencer {
    /// Derive the address at `current_index` and the index that follows it.
    pub fn issue(
        seed: &Seed,
        current_index: u64,
        security: SecurityLevel,
    ) -> Result<IssuedAddress, SequencerError> {
        let next_index = current_index
            .checked_add(1)
            .ok_or(SequencerError::IndexOverflow(current_index))?;
        Ok(IssuedAddress {
            address: wallet_address(seed, current_index, security),
            next_index,
        })
    }

    /// Reject a proposed index that does not strictly exceed the persisted one.
    pub fn ensure_advance(persisted: u64, proposed: u64) -> Result<(), SequencerError> {
        if proposed <= persisted {
            return Err(SequencerError::IndexRegression {
                persisted,
                proposed,
            });
        }
        Ok(())
    }
}

/// Wallet identity as stored in participant and operating-wallet records.
///
/// `address` is always the address at `key_index`: for a participant that
/// never spends, the index-0 payout address; for the operating wallet, the
/// input of its next payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletIdentity {
    pub seed: Seed,
    pub address: Address,
    pub key_index: u64,
}

impl WalletIdentity {
    /// A wallet positioned at `key_index`.
    pub fn new(seed: Seed, key_index: u64, security: SecurityLevel) -> Self {
        let address = wallet_address(&seed, key_index, security);
        Self {
            seed,
            address,
            key_index,
        }
    }

    /// A fresh random wallet at index 0.
    pub fn generate(security: SecurityLevel) -> Self {
        Self::new(Seed::generate(), 0, security)
    }

    /// Move the wallet to `next_index`, refusing to go backwards.
    pub fn advance_to(
        &mut self,
        next_index: u64,
        security: SecurityLevel,
    ) -> Result<(), SequencerError> {
        AddressSequencer::ensure_advance(self.key_index, next_index)?;
        self.key_index = next_index;
        self.address = wallet_address(&self.seed, next_index, security);
        Ok(())
    }
}
