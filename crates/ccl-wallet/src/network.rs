use ccl_types::Address;

use crate::error::NetworkError;

/// A signed value transfer ready to broadcast.
///
/// The input address is emptied: `value` goes to `output` and whatever is
/// left goes to `remainder`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    pub input: Address,
    pub input_balance: u64,
    pub output: Address,
    pub value: u64,
    pub remainder: Address,
}

impl Bundle {
    /// Value moved to the remainder address.
    pub fn remainder_value(&self) -> u64 {
        self.input_balance.saturating_sub(self.value)
    }
}

/// Remote value-transfer medium.
///
/// Broadcasts are irreversible: once `broadcast` returns `Ok`, the input
/// address counts as spent.
pub trait ValueNetwork: Send + Sync {
    /// Confirmed balance of an address.
    fn balance(&self, address: &Address) -> Result<u64, NetworkError>;

    /// Whether any bundle has ever spent from the address.
    fn was_spent(&self, address: &Address) -> Result<bool, NetworkError>;

    /// Attach a bundle to the network.
    fn broadcast(&self, bundle: &Bundle) -> Result<(), NetworkError>;
}
