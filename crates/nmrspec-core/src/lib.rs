//! Core spectrum types: domain/data type and layout enums, per-dimension
//! parameter records, the metadata bag and the shared error type.
//!
//! Every other crate in the workspace builds on these definitions.

pub mod dims;
pub mod enums;
pub mod error;
pub mod meta;

pub use dims::*;
pub use enums::*;
pub use error::*;
pub use meta::*;
