use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use ccl_types::Address;

use crate::error::NetworkError;
use crate::network::{Bundle, ValueNetwork};

/// In-memory value network for tests, local demos, and embedding.
pub struct InMemoryValueNetwork {
    inner: RwLock<NetworkState>,
    online: AtomicBool,
}

#[derive(Default)]
struct NetworkState {
    balances: HashMap<Address, u64>,
    spent: HashSet<Address>,
    bundles: Vec<Bundle>,
}

impl InMemoryValueNetwork {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(NetworkState::default()),
            online: AtomicBool::new(true),
        }
    }

    /// Credit `amount` to `address` out of thin air.
    pub fn fund(&self, address: &Address, amount: u64) {
        if let Ok(mut state) = self.inner.write() {
            *state.balances.entry(address.clone()).or_default() += amount;
        }
    }

    /// Take the network offline: every call fails until brought back.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Every bundle accepted so far, in broadcast order.
    pub fn bundles(&self) -> Vec<Bundle> {
        self.inner
            .read()
            .map(|state| state.bundles.clone())
            .unwrap_or_default()
    }

    fn ensure_online(&self) -> Result<(), NetworkError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(NetworkError("network unreachable".into()))
        }
    }
}

impl Default for InMemoryValueNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueNetwork for InMemoryValueNetwork {
    fn balance(&self, address: &Address) -> Result<u64, NetworkError> {
        self.ensure_online()?;
        let state = self
            .inner
            .read()
            .map_err(|_| NetworkError("network read lock poisoned".into()))?;
        Ok(state.balances.get(address).copied().unwrap_or(0))
    }

    fn was_spent(&self, address: &Address) -> Result<bool, NetworkError> {
        self.ensure_online()?;
        let state = self
            .inner
            .read()
            .map_err(|_| NetworkError("network read lock poisoned".into()))?;
        Ok(state.spent.contains(address))
    }

    fn broadcast(&self, bundle: &Bundle) -> Result<(), NetworkError> {
        self.ensure_online()?;
        let mut state = self
            .inner
            .write()
            .map_err(|_| NetworkError("network write lock poisoned".into()))?;

        if state.spent.contains(&bundle.input) {
            return Err(NetworkError(format!(
                "bundle input {} already spent",
                bundle.input.short()
            )));
        }
        let available = state.balances.get(&bundle.input).copied().unwrap_or(0);
        if available != bundle.input_balance || bundle.value > available {
            return Err(NetworkError(format!(
                "bundle input {} does not balance",
                bundle.input.short()
            )));
        }

        state.balances.insert(bundle.input.clone(), 0);
        state.spent.insert(bundle.input.clone());
        *state.balances.entry(bundle.output.clone()).or_default() += bundle.value;
        *state.balances.entry(bundle.remainder.clone()).or_default() += bundle.remainder_value();
        state.bundles.push(bundle.clone());
        Ok(())
    }
}
