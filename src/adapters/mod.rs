// Adapters layer: concrete implementations for external systems (AI providers, saved-list storage).

pub mod ai;
pub mod storage;
