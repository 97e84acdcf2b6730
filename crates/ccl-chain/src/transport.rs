use ccl_crypto::HasEntryLink;
use ccl_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// One published chain entry.
///
/// `payload` is stored as transmitted: masked on confidential channels.
/// `link` covers the stored payload and `prev_link`, so tampering with any
/// entry breaks the chain for readers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub payload: Vec<u8>,
    pub next_root: Address,
    pub link: [u8; 32],
    pub prev_link: Option<[u8; 32]>,
}

impl HasEntryLink for Entry {
    fn link(&self) -> [u8; 32] {
        self.link
    }

    fn prev_link(&self) -> Option<[u8; 32]> {
        self.prev_link
    }

    fn payload_bytes(&self) -> &[u8] {
        &self.payload
    }
}

/// Publish/fetch boundary of the distributed log carrying chain entries.
pub trait LogTransport: Send + Sync {
    /// Attach an entry at a transport address.
    fn attach(&self, address: &Address, entry: Entry) -> Result<(), ChainError>;

    /// All entries attached at an address, in attach order. Empty when the
    /// address was never written.
    fn fetch(&self, address: &Address) -> Result<Vec<Entry>, ChainError>;
}
