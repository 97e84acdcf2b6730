use std::sync::Arc;

use ccl_types::{Address, SecurityLevel, Seed};
use tracing::debug;

use crate::error::SequencerError;
use crate::network::{Bundle, ValueNetwork};
use crate::sequencer::AddressSequencer;

/// Composes and broadcasts value transfers from a sequenced wallet.
pub struct PaymentSender {
    network: Arc<dyn ValueNetwork>,
    security: SecurityLevel,
}

impl PaymentSender {
    pub fn new(network: Arc<dyn ValueNetwork>, security: SecurityLevel) -> Self {
        Self { network, security }
    }

    pub fn security(&self) -> SecurityLevel {
        self.security
    }

    /// Pay `amount` from the wallet address at `index` to `to_address`.
    ///
    /// The whole balance of the input address is consumed; the rest lands on
    /// the address at `index + 1`. The spent check runs before anything is
    /// broadcast, since a broadcast cannot be retracted. Returns the index the
    /// caller must persist.
    pub fn transfer_value(
        &self,
        from_seed: &Seed,
        index: u64,
        to_address: &Address,
        amount: u64,
    ) -> Result<u64, SequencerError> {
        let input = AddressSequencer::issue(from_seed, index, self.security)?;
        let remainder = AddressSequencer::issue(from_seed, input.next_index, self.security)?;

        if self.network.was_spent(&input.address)? {
            return Err(SequencerError::AlreadySpent(input.address));
        }

        let available = self.network.balance(&input.address)?;
        if available < amount {
            return Err(SequencerError::InsufficientBalance {
                address: input.address,
                available,
                required: amount,
            });
        }

        let bundle = Bundle {
            input: input.address,
            input_balance: available,
            output: to_address.clone(),
            value: amount,
            remainder: remainder.address,
        };
        self.network.broadcast(&bundle)?;

        debug!(
            index,
            next_index = input.next_index,
            to = %to_address.short(),
            amount,
            "value transfer broadcast"
        );
        Ok(input.next_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryValueNetwork;
    use crate::sequencer::WalletIdentity;

    fn setup(funds: u64) -> (Arc<InMemoryValueNetwork>, PaymentSender, Seed, Address) {
        let network = Arc::new(InMemoryValueNetwork::new());
        let sender = PaymentSender::new(network.clone(), SecurityLevel::Medium);
        let seed = Seed::parse(&"W".repeat(81)).unwrap();
        let first = AddressSequencer::issue(&seed, 0, SecurityLevel::Medium)
            .unwrap()
            .address;
        network.fund(&first, funds);
        let recipient = WalletIdentity::generate(SecurityLevel::Medium).address;
        (network, sender, seed, recipient)
    }

    #[test]
    fn transfer_returns_next_index_and_moves_value() {
        let (network, sender, seed, recipient) = setup(100);
        let next = sender.transfer_value(&seed, 0, &recipient, 1).unwrap();
        assert_eq!(next, 1);
        assert_eq!(network.balance(&recipient).unwrap(), 1);

        let remainder = AddressSequencer::issue(&seed, 1, SecurityLevel::Medium)
            .unwrap()
            .address;
        assert_eq!(network.balance(&remainder).unwrap(), 99);
    }

    #[test]
    fn sequential_transfers_follow_the_remainder() {
        let (network, sender, seed, recipient) = setup(10);
        let mut index = 0;
        for _ in 0..5 {
            index = sender.transfer_value(&seed, index, &recipient, 2).unwrap();
        }
        assert_eq!(index, 5);
        assert_eq!(network.balance(&recipient).unwrap(), 10);
    }

    #[test]
    fn reusing_an_index_is_already_spent() {
        let (network, sender, seed, recipient) = setup(100);
        sender.transfer_value(&seed, 0, &recipient, 1).unwrap();

        let err = sender.transfer_value(&seed, 0, &recipient, 1).unwrap_err();
        assert!(matches!(err, SequencerError::AlreadySpent(_)));
        assert_eq!(network.bundles().len(), 1);
    }

    #[test]
    fn insufficient_balance_broadcasts_nothing() {
        let (network, sender, seed, recipient) = setup(3);
        let err = sender.transfer_value(&seed, 0, &recipient, 5).unwrap_err();
        assert!(matches!(
            err,
            SequencerError::InsufficientBalance {
                available: 3,
                required: 5,
                ..
            }
        ));
        assert!(network.bundles().is_empty());
    }

    #[test]
    fn network_failure_is_transfer_failed() {
        let (network, sender, seed, recipient) = setup(100);
        network.set_online(false);
        let err = sender.transfer_value(&seed, 0, &recipient, 1).unwrap_err();
        assert!(matches!(err, SequencerError::TransferFailed(_)));
    }
}
