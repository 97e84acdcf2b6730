use ccl_types::{Address, TRYTE_LEN};

/// Domain-separated BLAKE3 hasher.
///
/// Each hasher carries a domain tag (e.g. `"ccl-root-v1"`, `"ccl-address-v1"`)
/// that is prepended to every computation, so a chain root and a wallet
/// address derived from identical inputs never collide. Every input part is
/// length-prefixed before hashing.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for chain roots.
    pub const ROOT: Self = Self {
        domain: "ccl-root-v1",
    };
    /// Hasher for the transport location of a chain entry.
    pub const ENTRY: Self = Self {
        domain: "ccl-entry-v1",
    };
    /// Hasher for the link digest chaining entries together.
    pub const LINK: Self = Self {
        domain: "ccl-link-v1",
    };
    /// Hasher for wallet addresses.
    pub const ADDRESS: Self = Self {
        domain: "ccl-address-v1",
    };
    /// Hasher for the payload masking keystream.
    pub const MASK: Self = Self {
        domain: "ccl-mask-v1",
    };

    /// 32-byte digest over the given parts.
    pub fn digest(&self, parts: &[&[u8]]) -> [u8; 32] {
        *self.hasher(parts).finalize().as_bytes()
    }

    /// An 81-tryte address over the given parts.
    pub fn address(&self, parts: &[&[u8]]) -> Address {
        let mut out = [0u8; TRYTE_LEN];
        self.hasher(parts).finalize_xof().fill(&mut out);
        Address::from_digest(&out)
    }

    /// A keystream of `len` bytes over the given parts.
    pub fn keystream(&self, parts: &[&[u8]], len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.hasher(parts).finalize_xof().fill(&mut out);
        out
    }

    fn hasher(&self, parts: &[&[u8]]) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        for part in parts {
            hasher.update(&(part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        hasher
    }
}
