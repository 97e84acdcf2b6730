use crate::hasher::ContentHasher;

/// Trait for entries that participate in a linked chain.
pub trait HasEntryLink {
    /// The entry's own link digest.
    fn link(&self) -> [u8; 32];
    /// The previous entry's link digest (None for genesis).
    fn prev_link(&self) -> Option<[u8; 32]>;
    /// Payload bytes covered by the link.
    fn payload_bytes(&self) -> &[u8];
}

/// Entry-link integrity verifier.
///
/// Verifies that a sequence of entries forms a valid linked chain: each
/// entry's `prev_link` matches the previous entry's `link`, and each link is
/// correctly computed from its payload.
pub struct EntryLinkVerifier;

impl EntryLinkVerifier {
    /// Verify a chain of entries, in append order.
    pub fn verify_chain(entries: &[impl HasEntryLink]) -> Result<(), LinkError> {
        let mut expected_prev: Option<[u8; 32]> = None;
        for (index, entry) in entries.iter().enumerate() {
            Self::verify_next(expected_prev, entry, index)?;
            expected_prev = Some(entry.link());
        }
        Ok(())
    }

    /// Verify a single entry against the link of its predecessor.
    ///
    /// `index` is only used for error reporting.
    pub fn verify_next(
        expected_prev: Option<[u8; 32]>,
        entry: &impl HasEntryLink,
        index: usize,
    ) -> Result<(), LinkError> {
        match (expected_prev, entry.prev_link()) {
            (None, Some(_)) => return Err(LinkError::GenesisHasPrevLink),
            (Some(_), None) => return Err(LinkError::MissingPrevLink { index }),
            (Some(expected), Some(prev)) if expected != prev => {
                return Err(LinkError::BrokenLink { index })
            }
            _ => {}
        }

        let computed = Self::compute_link(entry.payload_bytes(), entry.prev_link());
        if computed != entry.link() {
            return Err(LinkError::LinkMismatch { index });
        }
        Ok(())
    }

    /// Compute the link digest for a payload and optional previous link.
    pub fn compute_link(payload: &[u8], prev_link: Option<[u8; 32]>) -> [u8; 32] {
        match prev_link {
            Some(prev) => ContentHasher::LINK.digest(&[&prev, payload]),
            None => ContentHasher::LINK.digest(&[payload]),
        }
    }
}

/// Errors from link verification.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("genesis entry has a previous link (should be None)")]
    GenesisHasPrevLink,

    #[error("broken link at index {index}: prev_link does not match")]
    BrokenLink { index: usize },

    #[error("missing prev_link at index {index} (should reference previous entry)")]
    MissingPrevLink { index: usize },

    #[error("link mismatch at index {index}: computed link differs from stored")]
    LinkMismatch { index: usize },
}
