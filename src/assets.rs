//! Best-effort asset loading state
//!
//! Each asset is pending, ready or failed. Consumers read only ready assets
//! and draw a fallback otherwise; startup waits for every asset to settle
//! (ready or failed), never for every asset to succeed.

use crate::error::AssetLoadError;

/// Load state of one asset
#[derive(Debug, Clone, PartialEq)]
pub enum AssetState<T> {
    Pending,
    Ready(T),
    Failed(AssetLoadError),
}

impl<T> AssetState<T> {
    pub fn is_settled(&self) -> bool {
        !matches!(self, AssetState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            AssetState::Ready(asset) => Some(asset),
            _ => None,
        }
    }
}

/// A fixed set of named assets keyed by `K`
#[derive(Debug, Clone)]
pub struct AssetSet<K, T> {
    slots: Vec<(K, AssetState<T>)>,
}

impl<K: Copy + PartialEq + std::fmt::Debug, T> AssetSet<K, T> {
    /// All keys start pending
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            slots: keys
                .into_iter()
                .map(|key| (key, AssetState::Pending))
                .collect(),
        }
    }

    fn slot_mut(&mut self, key: K) -> Option<&mut AssetState<T>> {
        self.slots
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, state)| state)
    }

    /// Record a successful load
    pub fn mark_ready(&mut self, key: K, asset: T) {
        if let Some(slot) = self.slot_mut(key) {
            *slot = AssetState::Ready(asset);
            self.log_progress();
        }
    }

    /// Record a failed load; the asset counts as settled
    pub fn mark_failed(&mut self, key: K, error: AssetLoadError) {
        log::warn!("{} ({:?})", error, key);
        if let Some(slot) = self.slot_mut(key) {
            *slot = AssetState::Failed(error);
            self.log_progress();
        }
    }

    fn log_progress(&self) {
        match self.pending_count() {
            0 => log::info!(
                "Assets settled: {} loaded, {} failed",
                self.slots.len() - self.failed_count(),
                self.failed_count()
            ),
            pending => log::debug!("{} assets still loading", pending),
        }
    }

    pub fn state(&self, key: K) -> Option<&AssetState<T>> {
        self.slots
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, state)| state)
    }

    /// The asset, only if it loaded
    pub fn get(&self, key: K) -> Option<&T> {
        self.state(key).and_then(AssetState::ready)
    }

    pub fn is_ready(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Every asset has either loaded or failed
    pub fn all_settled(&self) -> bool {
        self.slots.iter().all(|(_, state)| state.is_settled())
    }

    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, state)| !state.is_settled())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, state)| matches!(state, AssetState::Failed(_)))
            .count()
    }
}
