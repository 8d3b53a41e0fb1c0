//! # Domain Module
//!
//! Value types for settlement accounting.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
