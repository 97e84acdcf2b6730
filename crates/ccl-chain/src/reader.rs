use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use ccl_crypto::{entry_address, mask_payload, EntryLinkVerifier, HasEntryLink, LinkError};
use ccl_types::Address;
use tracing::debug;

use crate::config::{ChannelConfig, ReadLimits};
use crate::error::ChainError;
use crate::transport::{Entry, LogTransport};

/// Reads chains forward from any root.
pub struct ChainReader {
    transport: Arc<dyn LogTransport>,
    channel: ChannelConfig,
    limits: ReadLimits,
}

impl ChainReader {
    pub fn new(
        transport: Arc<dyn LogTransport>,
        channel: ChannelConfig,
        limits: ReadLimits,
    ) -> Result<Self, ChainError> {
        channel.validate()?;
        Ok(Self {
            transport,
            channel,
            limits,
        })
    }

    /// Lazily walk the chain starting at `root`.
    pub fn walk(&self, root: &Address) -> ForwardWalk {
        ForwardWalk {
            transport: self.transport.clone(),
            channel: self.channel.clone(),
            limits: self.limits,
            pointer: root.clone(),
            pending: VecDeque::new(),
            expected_prev: None,
            position: 0,
            hops: 0,
            started: Instant::now(),
            done: false,
        }
    }

    /// Every payload from `root` to the current end of the chain, in order.
    pub fn read(&self, root: &Address) -> Result<Vec<String>, ChainError> {
        let payloads: Vec<String> = self.walk(root).collect::<Result<_, _>>()?;
        debug!(root = %root.short(), entries = payloads.len(), "forward read");
        Ok(payloads)
    }
}

/// Iterator over the payloads of a chain, from a root to the first empty slot.
///
/// Each step fetches the batch at the current pointer, yields its payloads
/// and moves to the batch's next root. Links are checked as entries go by.
/// Past `max_hops` non-empty fetches, or once the read timeout elapses, the
/// walk yields [`ChainError::ReadExhausted`] and stops. Any error ends it.
pub struct ForwardWalk {
    transport: Arc<dyn LogTransport>,
    channel: ChannelConfig,
    limits: ReadLimits,
    pointer: Address,
    pending: VecDeque<String>,
    expected_prev: Option<[u8; 32]>,
    position: usize,
    hops: u32,
    started: Instant,
    done: bool,
}

impl ForwardWalk {
    fn exhausted(&mut self) -> ChainError {
        self.done = true;
        ChainError::ReadExhausted {
            hops: self.hops,
            elapsed_ms: self.started.elapsed().as_millis() as u64,
        }
    }

    fn next_batch(&mut self) -> Result<bool, ChainError> {
        if self.started.elapsed() >= self.limits.timeout {
            return Err(self.exhausted());
        }

        let address = entry_address(&self.pointer, self.channel.mode, &self.channel.side_key);
        let batch = self.transport.fetch(&address)?;
        if batch.is_empty() {
            return Ok(false);
        }

        self.hops += 1;
        if self.hops > self.limits.max_hops {
            return Err(self.exhausted());
        }

        let mut next_root = None;
        for entry in &batch {
            self.check_link(entry)?;
            let payload = self.open(entry)?;
            self.pending.push_back(payload);
            next_root = Some(entry.next_root.clone());
        }
        if let Some(root) = next_root {
            self.pointer = root;
        }
        Ok(true)
    }

    fn check_link(&mut self, entry: &Entry) -> Result<(), ChainError> {
        match self.expected_prev {
            Some(expected) => {
                EntryLinkVerifier::verify_next(Some(expected), entry, self.position)?
            }
            // A walk may start mid-chain, so the first entry's predecessor is unknown.
            None => {
                let computed =
                    EntryLinkVerifier::compute_link(entry.payload_bytes(), entry.prev_link());
                if computed != entry.link() {
                    return Err(LinkError::LinkMismatch {
                        index: self.position,
                    }
                    .into());
                }
            }
        }
        self.expected_prev = Some(entry.link);
        self.position += 1;
        Ok(())
    }

    fn open(&self, entry: &Entry) -> Result<String, ChainError> {
        let bytes = if self.channel.mode.is_confidential() {
            mask_payload(&entry.payload, &self.channel.side_key, &self.pointer)
        } else {
            entry.payload.clone()
        };
        String::from_utf8(bytes).map_err(|e| ChainError::Serialization(e.to_string()))
    }
}

impl Iterator for ForwardWalk {
    type Item = Result<String, ChainError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(payload) = self.pending.pop_front() {
            return Some(Ok(payload));
        }
        if self.done {
            return None;
        }
        match self.next_batch() {
            Ok(true) => self.pending.pop_front().map(Ok),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryTangle;
    use crate::writer::ChainWriter;
    use ccl_types::ChannelMode;
    use std::time::Duration;

    fn pair(
        channel: ChannelConfig,
        limits: ReadLimits,
    ) -> (Arc<InMemoryTangle>, ChainWriter, ChainReader) {
        let tangle = Arc::new(InMemoryTangle::new());
        let writer = ChainWriter::new(tangle.clone(), channel.clone()).unwrap();
        let reader = ChainReader::new(tangle.clone(), channel, limits).unwrap();
        (tangle, writer, reader)
    }

    fn write_chain(writer: &ChainWriter, payloads: &[&str]) -> Address {
        let genesis = writer.genesis(payloads[0]).unwrap();
        let mut state = genesis.state;
        for payload in &payloads[1..] {
            state = writer.append(payload, state).unwrap();
        }
        genesis.root
    }

    #[test]
    fn genesis_reads_back_alone() {
        let (_, writer, reader) = pair(ChannelConfig::public(), ReadLimits::default());
        let root = write_chain(&writer, &["first"]);
        assert_eq!(reader.read(&root).unwrap(), vec!["first"]);
    }

    #[test]
    fn appends_read_back_in_order() {
        let (_, writer, reader) = pair(ChannelConfig::public(), ReadLimits::default());
        let root = write_chain(&writer, &["s0", "s1", "s2", "s3"]);
        assert_eq!(reader.read(&root).unwrap(), vec!["s0", "s1", "s2", "s3"]);
    }

    #[test]
    fn confidential_modes_read_back() {
        for (mode, key) in [(ChannelMode::Private, ""), (ChannelMode::Restricted, "SIDE")] {
            let channel = ChannelConfig::new(mode, key).unwrap();
            let (_, writer, reader) = pair(channel, ReadLimits::default());
            let root = write_chain(&writer, &["{\"a\":1}", "{\"a\":2}"]);
            assert_eq!(reader.read(&root).unwrap(), vec!["{\"a\":1}", "{\"a\":2}"]);
        }
    }

    #[test]
    fn wrong_side_key_sees_nothing() {
        let channel = ChannelConfig::new(ChannelMode::Restricted, "RIGHT").unwrap();
        let (tangle, writer, _) = pair(channel, ReadLimits::default());
        let root = write_chain(&writer, &["secret"]);

        let other = ChannelConfig::new(ChannelMode::Restricted, "WRONG").unwrap();
        let reader = ChainReader::new(tangle, other, ReadLimits::default()).unwrap();
        assert!(reader.read(&root).unwrap().is_empty());
    }

    #[test]
    fn unknown_root_is_empty() {
        let (_, _, reader) = pair(ChannelConfig::public(), ReadLimits::default());
        let root = Address::parse(&"9".repeat(81)).unwrap();
        assert!(reader.read(&root).unwrap().is_empty());
    }

    #[test]
    fn walk_is_restartable_mid_chain() {
        let (tangle, writer, reader) = pair(ChannelConfig::public(), ReadLimits::default());
        let root = write_chain(&writer, &["a", "b", "c"]);
        let second = tangle.fetch(&root).unwrap().remove(0).next_root;
        assert_eq!(reader.read(&second).unwrap(), vec!["b", "c"]);
    }

    #[test]
    fn hop_bound_exhausts_read() {
        let limits = ReadLimits {
            max_hops: 2,
            timeout: Duration::from_secs(30),
        };
        let (_, writer, reader) = pair(ChannelConfig::public(), limits);
        let root = write_chain(&writer, &["a", "b", "c"]);

        let items: Vec<_> = reader.walk(&root).collect();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok() && items[1].is_ok());
        assert!(matches!(
            items[2],
            Err(ChainError::ReadExhausted { hops: 3, .. })
        ));
        assert!(matches!(
            reader.read(&root),
            Err(ChainError::ReadExhausted { .. })
        ));
    }

    #[test]
    fn chain_at_hop_bound_reads_fully() {
        let limits = ReadLimits {
            max_hops: 2,
            timeout: Duration::from_secs(30),
        };
        let (_, writer, reader) = pair(ChannelConfig::public(), limits);
        let root = write_chain(&writer, &["a", "b"]);
        assert_eq!(reader.read(&root).unwrap().len(), 2);
    }

    #[test]
    fn zero_timeout_exhausts_read() {
        let limits = ReadLimits {
            max_hops: 100,
            timeout: Duration::ZERO,
        };
        let (_, writer, reader) = pair(ChannelConfig::public(), limits);
        let root = write_chain(&writer, &["a"]);
        assert!(matches!(
            reader.read(&root),
            Err(ChainError::ReadExhausted { hops: 0, .. })
        ));
    }

    #[test]
    fn tampered_entry_breaks_the_walk() {
        let (tangle, writer, reader) = pair(ChannelConfig::public(), ReadLimits::default());
        let root = write_chain(&writer, &["a", "b", "c"]);
        let second_root = tangle.fetch(&root).unwrap().remove(0).next_root;

        let mut forged = tangle.fetch(&second_root).unwrap();
        forged[0].payload = b"B".to_vec();
        tangle.overwrite(&second_root, forged);

        let items: Vec<_> = reader.walk(&root).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref(), Ok("a"));
        assert!(matches!(
            items[1],
            Err(ChainError::BrokenChain(LinkError::LinkMismatch { index: 1 }))
        ));
    }

    #[test]
    fn transport_failure_ends_the_walk() {
        let (tangle, writer, reader) = pair(ChannelConfig::public(), ReadLimits::default());
        let root = write_chain(&writer, &["a"]);
        tangle.set_online(false);
        assert!(matches!(reader.read(&root), Err(ChainError::Transport(_))));
    }
}
