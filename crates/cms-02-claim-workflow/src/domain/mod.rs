pub mod actions;
pub mod draft;
pub mod validation;

pub use actions::*;
pub use draft::*;
pub use validation::*;
