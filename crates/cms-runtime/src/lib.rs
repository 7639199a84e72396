//! Runtime wiring for the claim system.
//!
//! - `config` holds runtime configuration with environment overrides
//! - `container` builds the application context (stores, engine, read models)
//! - `seed` loads demonstration users, programmes and modules

pub mod config;
pub mod container;
pub mod seed;

pub use config::CmsConfig;
pub use container::AppContext;
