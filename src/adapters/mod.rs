// Adapters layer: concrete backends for the domain ports.

pub mod storage;

pub use storage::{FileStore, MemoryStore};
