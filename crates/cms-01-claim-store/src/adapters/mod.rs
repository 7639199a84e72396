pub mod memory;

pub use memory::{InMemoryBlobStore, InMemoryStore};
