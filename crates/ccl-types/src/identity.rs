use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The 27-symbol tryte alphabet used for seeds, side keys, and addresses.
pub const TRYTE_ALPHABET: &[u8; 27] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ9";

/// Length of a seed, side key, or address in trytes.
pub const TRYTE_LEN: usize = 81;

/// Secret material backing a wallet or a chain identity.
///
/// A `Seed` is exactly 81 trytes drawn from [`TRYTE_ALPHABET`]. The same seed
/// always derives the same roots and addresses, so seeds are never logged:
/// `Debug` redacts everything but the first three characters.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

impl Seed {
    /// Generate a new cryptographically random seed.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let seed = (0..TRYTE_LEN)
            .map(|_| TRYTE_ALPHABET[rng.gen_range(0..TRYTE_ALPHABET.len())] as char)
            .collect();
        Self(seed)
    }

    /// Parse and validate a seed string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.len() != TRYTE_LEN {
            return Err(TypeError::InvalidLength {
                expected: TRYTE_LEN,
                actual: s.len(),
            });
        }
        if !is_trytes(s) {
            return Err(TypeError::InvalidTrytes(redact(s)));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl TryFrom<String> for Seed {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", redact(&self.0))
    }
}

/// Confidentiality key for private and restricted channels.
///
/// Side keys are normalized with [`SideKey::pad`]: characters outside the
/// tryte alphabet are dropped, the result is truncated to 81 trytes and
/// right-padded with `9`. An empty side key stays empty and is only valid for
/// channels that do not need one.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SideKey(String);

impl SideKey {
    /// The empty side key used by public channels.
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Normalize arbitrary text into a side key.
    pub fn pad(raw: &str) -> Self {
        let filtered: String = raw
            .to_ascii_uppercase()
            .chars()
            .filter(|c| c.is_ascii() && TRYTE_ALPHABET.contains(&(*c as u8)))
            .take(TRYTE_LEN)
            .collect();
        if filtered.is_empty() {
            return Self::none();
        }
        let padding = TRYTE_LEN - filtered.len();
        Self(format!("{filtered}{}", "9".repeat(padding)))
    }

    /// A random side key.
    pub fn generate() -> Self {
        Self(Seed::generate().0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<String> for SideKey {
    fn from(value: String) -> Self {
        Self::pad(&value)
    }
}

impl From<SideKey> for String {
    fn from(key: SideKey) -> Self {
        key.0
    }
}

impl fmt::Debug for SideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "SideKey(<none>)")
        } else {
            write!(f, "SideKey({})", redact(&self.0))
        }
    }
}

/// An 81-tryte address: a chain root, an entry location, or a payout address.
///
/// Addresses are public; unlike [`Seed`] they print in full.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Build an address from exactly 81 bytes, mapping each onto the tryte
    /// alphabet.
    pub fn from_digest(bytes: &[u8; TRYTE_LEN]) -> Self {
        let trytes = bytes
            .iter()
            .map(|b| TRYTE_ALPHABET[usize::from(*b) % TRYTE_ALPHABET.len()] as char)
            .collect();
        Self(trytes)
    }

    /// Parse and validate an address string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.len() != TRYTE_LEN {
            return Err(TypeError::InvalidLength {
                expected: TRYTE_LEN,
                actual: s.len(),
            });
        }
        if !is_trytes(s) {
            return Err(TypeError::InvalidTrytes(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Short identifier (first 9 trytes).
    pub fn short(&self) -> &str {
        &self.0[..9]
    }
}

impl TryFrom<String> for Address {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}...)", self.short())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_trytes(s: &str) -> bool {
    s.bytes().all(|b| TRYTE_ALPHABET.contains(&b))
}

fn redact(s: &str) -> String {
    let prefix: String = s.chars().take(3).collect();
    format!("{prefix}...")
}
