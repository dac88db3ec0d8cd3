pub mod methods;
pub mod security;
pub mod types;

pub use methods::*;
pub use security::*;
pub use types::{Documentation, RamlObject, RamlResource};
