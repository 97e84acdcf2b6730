use ccl_types::{Address, ChannelMode, SecurityLevel, Seed, SideKey};

use crate::hasher::ContentHasher;

/// Root of the channel slot `index` for a chain identity seed.
pub fn channel_root(seed: &Seed, index: u64) -> Address {
    ContentHasher::ROOT.address(&[seed.as_bytes(), &index.to_le_bytes()])
}

/// Transport location of the entry published under `root`.
///
/// Public entries live at the root itself. Private entries live at a hash of
/// the root, so the root acts as the read key. Restricted entries also mix in
/// the side key.
pub fn entry_address(root: &Address, mode: ChannelMode, side_key: &SideKey) -> Address {
    match mode {
        ChannelMode::Public => root.clone(),
        ChannelMode::Private => ContentHasher::ENTRY.address(&[root.as_bytes()]),
        ChannelMode::Restricted => {
            ContentHasher::ENTRY.address(&[root.as_bytes(), side_key.as_bytes()])
        }
    }
}

/// Wallet address at `index` for `seed`. Pure: identical inputs always give
/// the identical address.
pub fn wallet_address(seed: &Seed, index: u64, security: SecurityLevel) -> Address {
    ContentHasher::ADDRESS.address(&[
        seed.as_bytes(),
        &index.to_le_bytes(),
        &[security.as_u8()],
    ])
}

/// XOR `payload` with a keystream bound to the side key and the entry root.
///
/// Applying the mask twice restores the input.
pub fn mask_payload(payload: &[u8], side_key: &SideKey, root: &Address) -> Vec<u8> {
    let stream =
        ContentHasher::MASK.keystream(&[side_key.as_bytes(), root.as_bytes()], payload.len());
    payload
        .iter()
        .zip(stream)
        .map(|(byte, key)| byte ^ key)
        .collect()
}
