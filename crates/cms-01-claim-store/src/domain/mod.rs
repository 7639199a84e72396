pub mod claim_number;
pub mod errors;
pub mod mutation;

pub use claim_number::{format_claim_number, parse_claim_number};
pub use errors::StoreError;
pub use mutation::ClaimMutation;
