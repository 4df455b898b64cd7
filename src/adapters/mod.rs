// Adapters layer: concrete implementations for external systems (artifact storage, http).

pub mod http;
pub mod storage;
