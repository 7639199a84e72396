pub mod inbound;

pub use inbound::*;

// Outbound dependencies of the engine, re-exported for callers wiring it up.
pub use cms_01_claim_store::{CatalogStore, ClaimStore, DocumentBlobStore, UserStore};
pub use shared_bus::NotificationSender;
