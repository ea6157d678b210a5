//! Shared application state.

use filinglens_model::Predictor;
use filinglens_store::FilingStore;

/// Immutable per-process state shared across handlers.
///
/// The store is prepared once at startup; the predictor fits lazily on
/// first use (or eagerly via [`Predictor::fit`] at boot).
#[derive(Debug)]
pub struct AppState {
    /// The prepared filing dataset.
    pub store: FilingStore,
    /// The prediction service over the same dataset.
    pub predictor: Predictor,
}

impl AppState {
    /// Build the state, wiring the predictor to the store's frame.
    #[must_use]
    pub fn new(store: FilingStore) -> Self {
        let predictor = Predictor::new(store.frame().clone());
        Self { store, predictor }
    }
}
