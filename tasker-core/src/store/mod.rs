//! Snapshot persistence for agents

pub mod file;
pub mod memory;
pub mod traits;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{AgentSnapshot, SnapshotStore};
