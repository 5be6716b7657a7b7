use crate::store::RecordStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
}
