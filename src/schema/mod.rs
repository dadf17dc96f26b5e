//! The column descriptor model: declared entity schemas and their parsed
//! storage types.
//!
//! This module is the input side of the compiler. Everything else derives
//! from the types declared here.

mod column;
mod encoded;
mod entity;

pub use column::*;
pub use encoded::*;
pub use entity::*;
