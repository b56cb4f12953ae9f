//! Identity primitives: the framework-facing record, the bearer-token wrapper, and the
//! username derivation rules.

pub mod record;
pub mod secret;
pub mod username;

pub use record::*;
pub use secret::*;
pub use username::*;
