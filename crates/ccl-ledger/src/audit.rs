use ccl_chain::SessionState;
use ccl_store::chain_head_key;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LedgerError;
use crate::ledger::CustodyLedger;
use crate::records::{Asset, ChainHead};

/// Result of auditing one asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub asset: String,
    /// Entries read from the asset's chain, when it could be read.
    pub chain_entries: usize,
    pub violations: Vec<Violation>,
}

impl ConsistencyReport {
    /// Returns `true` if no check failed.
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, kind: ViolationKind, description: impl Into<String>) {
        self.violations.push(Violation {
            kind,
            description: description.into(),
        });
    }

    fn logged(self) -> Self {
        for violation in &self.violations {
            warn!(
                asset = %self.asset,
                kind = ?violation.kind,
                "{}",
                violation.description
            );
        }
        self
    }
}

/// A specific inconsistency between an asset record and its chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingAsset,
    UnreadableRecord,
    MissingChainHead,
    CorruptSession,
    UnreadableChain,
    /// The newest chain entry differs from the stored record.
    StaleChain,
    /// The slot the stored session points at is already occupied.
    StaleSession,
    MissingHolder,
}

impl CustodyLedger {
    /// Check one asset for the windows a partially failed operation leaves.
    ///
    /// Never writes. Fails only when the asset has neither a record nor a
    /// chain head, or when the store itself cannot be read.
    pub fn audit_asset(&self, id: &str) -> Result<ConsistencyReport, LedgerError> {
        let mut report = ConsistencyReport {
            asset: id.to_string(),
            chain_entries: 0,
            violations: Vec::new(),
        };

        let raw_asset = self.store.get(id)?;
        let raw_head = self.store.get(&chain_head_key(id))?;
        if raw_asset.is_none() && raw_head.is_none() {
            return Err(LedgerError::not_found(format!("container {id}")));
        }

        let asset = match &raw_asset {
            None => {
                report.push(ViolationKind::MissingAsset, "chain head without asset record");
                None
            }
            Some(bytes) => match serde_json::from_slice::<Asset>(bytes) {
                Ok(asset) => Some(asset),
                Err(e) => {
                    report.push(ViolationKind::UnreadableRecord, format!("asset record: {e}"));
                    None
                }
            },
        };

        if let Some(asset) = &asset {
            match self.participant(&asset.holder) {
                Ok(_) => {}
                Err(LedgerError::NotFound(_)) => report.push(
                    ViolationKind::MissingHolder,
                    format!("holder {} has no participant record", asset.holder),
                ),
                Err(err) => return Err(err),
            }
        }

        let head = match raw_head.map(|bytes| serde_json::from_slice::<ChainHead>(&bytes)) {
            None => {
                report.push(ViolationKind::MissingChainHead, "asset record without chain head");
                None
            }
            Some(Err(e)) => {
                report.push(ViolationKind::UnreadableRecord, format!("chain head: {e}"));
                None
            }
            Some(Ok(head)) => Some(head),
        };
        let Some(head) = head else {
            return Ok(report.logged());
        };

        let reader = self.reader_for(&head)?;
        match reader.read(&head.root) {
            Ok(payloads) => {
                report.chain_entries = payloads.len();
                let newest = payloads.last().map(String::as_bytes);
                if let (Some(stored), Some(newest)) = (raw_asset.as_deref(), newest) {
                    if stored != newest {
                        report.push(
                            ViolationKind::StaleChain,
                            "newest chain entry differs from the stored record",
                        );
                    }
                }
                if payloads.is_empty() {
                    report.push(ViolationKind::UnreadableChain, "chain has no entries at its root");
                }
            }
            Err(e) => report.push(ViolationKind::UnreadableChain, e.to_string()),
        }

        match SessionState::from_token(&head.session) {
            Ok(state) => match reader.walk(&state.next_root()).next() {
                None => {}
                Some(Ok(_)) => report.push(
                    ViolationKind::StaleSession,
                    format!("slot {} is already occupied", state.index()),
                ),
                Some(Err(e)) => report.push(ViolationKind::UnreadableChain, e.to_string()),
            },
            Err(e) => report.push(ViolationKind::CorruptSession, e.to_string()),
        }

        Ok(report.logged())
    }

    /// Audit every asset in the configured key range.
    pub fn audit_all(&self) -> Result<Vec<ConsistencyReport>, LedgerError> {
        let range = &self.config.key_range;
        self.store
            .range(&range.start, &range.end)?
            .into_iter()
            .map(|(key, _)| self.audit_asset(&key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tests::funded;
    use ccl_store::{RecordStore, WALLET_KEY};

    fn kinds(report: &ConsistencyReport) -> Vec<ViolationKind> {
        report.violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn fresh_ledger_is_consistent() {
        let h = funded(10);
        h.ledger.transfer_custody("1", "Customs").unwrap();
        let reports = h.ledger.audit_all().unwrap();
        assert_eq!(reports.len(), 10);
        assert!(reports.iter().all(ConsistencyReport::is_consistent));
        assert_eq!(reports[0].chain_entries, 2);
    }

    #[test]
    fn unknown_asset_is_not_found() {
        let h = funded(10);
        assert!(matches!(
            h.ledger.audit_asset("500"),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn failed_genesis_shows_missing_chain_head() {
        let h = funded(10);
        h.tangle.set_online(false);
        assert!(h.ledger.record_asset("70", "Dates", "x", "Producer").is_err());
        h.tangle.set_online(true);

        let report = h.ledger.audit_asset("70").unwrap();
        assert_eq!(kinds(&report), vec![ViolationKind::MissingChainHead]);
    }

    #[test]
    fn failed_append_shows_stale_chain() {
        let h = funded(10);
        h.tangle.set_online(false);
        assert!(h.ledger.transfer_custody("3", "Retailer").is_err());
        h.tangle.set_online(true);

        let report = h.ledger.audit_asset("3").unwrap();
        assert_eq!(kinds(&report), vec![ViolationKind::StaleChain]);
        assert_eq!(report.chain_entries, 1);
    }

    #[test]
    fn failed_head_write_shows_stale_session() {
        let h = funded(10);
        h.store.reject_writes_to("CHAIN_8");
        assert!(h.ledger.transfer_custody("8", "Retailer").is_err());
        h.store.accept_writes_to("CHAIN_8");

        let report = h.ledger.audit_asset("8").unwrap();
        assert_eq!(kinds(&report), vec![ViolationKind::StaleSession]);
    }

    #[test]
    fn payment_failure_leaves_chain_consistent() {
        let h = funded(0);
        assert!(h.ledger.transfer_custody("2", "Retailer").is_err());
        assert!(h.ledger.audit_asset("2").unwrap().is_consistent());
    }

    #[test]
    fn corrupt_token_and_missing_holder_are_reported() {
        let h = funded(10);
        let mut head: ChainHead = h.ledger.get(&chain_head_key("7")).unwrap().unwrap();
        head.session = "zz".into();
        h.store
            .put(&chain_head_key("7"), &serde_json::to_vec(&head).unwrap())
            .unwrap();
        h.ledger.record_asset("71", "Plums", "y", "Ghost").unwrap();

        assert_eq!(
            kinds(&h.ledger.audit_asset("7").unwrap()),
            vec![ViolationKind::CorruptSession]
        );
        assert_eq!(
            kinds(&h.ledger.audit_asset("71").unwrap()),
            vec![ViolationKind::MissingHolder]
        );
    }

    #[test]
    fn holder_naming_a_non_participant_record_is_missing() {
        let h = funded(10);
        h.ledger.record_asset("72", "Pears", "z", WALLET_KEY).unwrap();
        h.ledger.record_asset("73", "Quinces", "z", "1").unwrap();

        for id in ["72", "73"] {
            assert_eq!(
                kinds(&h.ledger.audit_asset(id).unwrap()),
                vec![ViolationKind::MissingHolder]
            );
        }
    }

    #[test]
    fn audit_never_writes() {
        let h = funded(10);
        let writes = h.store.write_count();
        let entries = h.tangle.entry_count();
        h.ledger.audit_all().unwrap();
        assert_eq!(h.store.write_count(), writes);
        assert_eq!(h.tangle.entry_count(), entries);
        assert!(h.store.get(WALLET_KEY).unwrap().is_some());
    }
}
