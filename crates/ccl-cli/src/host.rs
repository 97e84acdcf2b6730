use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use ccl_chain::InMemoryTangle;
use ccl_ledger::{invoke, CustodyLedger, LedgerConfig, Response};
use ccl_store::{get_json, InMemoryRecordStore, WALLET_KEY};
use ccl_types::Address;
use ccl_wallet::{InMemoryValueNetwork, WalletIdentity};
use tracing::info;

/// In-process host: record store, chain transport and value network, all in memory.
pub struct Host {
    store: Arc<InMemoryRecordStore>,
    network: Arc<InMemoryValueNetwork>,
    pub ledger: CustodyLedger,
    funds: u64,
}

impl Host {
    pub fn new(config: LedgerConfig, funds: u64) -> anyhow::Result<Self> {
        let store = Arc::new(InMemoryRecordStore::new());
        let tangle = Arc::new(InMemoryTangle::new());
        let network = Arc::new(InMemoryValueNetwork::new());
        let ledger = CustodyLedger::new(store.clone(), tangle, network.clone(), config)
            .context("failed to start custody ledger")?;
        Ok(Self {
            store,
            network,
            ledger,
            funds,
        })
    }

    /// Run one operation. A successful `initLedger` also funds the new
    /// operating wallet.
    pub fn run(&self, operation: &str, args: &[String]) -> anyhow::Result<Response> {
        let response = invoke(&self.ledger, operation, args)
            .with_context(|| format!("{operation} failed"))?;
        if operation == "initLedger" && self.funds > 0 {
            let address = self.fund_operating_wallet(self.funds)?;
            info!(wallet = %address.short(), funds = self.funds, "operating wallet funded");
        }
        Ok(response)
    }

    /// Credit the address the operating wallet will spend from next.
    pub fn fund_operating_wallet(&self, amount: u64) -> anyhow::Result<Address> {
        let wallet: WalletIdentity = get_json(self.store.as_ref(), WALLET_KEY)?
            .context("operating wallet has not been written yet")?;
        self.network.fund(&wallet.address, amount);
        Ok(wallet.address)
    }
}

/// Configuration from an optional TOML file, then the environment.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LedgerConfig> {
    let mut config = match path {
        Some(path) => LedgerConfig::load(path)?,
        None => LedgerConfig::default(),
    };
    config.apply_env()?;
    Ok(config)
}
