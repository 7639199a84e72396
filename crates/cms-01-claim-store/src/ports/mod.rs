pub mod store;

pub use store::{CatalogStore, ClaimStore, DocumentBlobStore, UserStore};
