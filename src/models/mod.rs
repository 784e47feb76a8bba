//! Data models for the fleet console.
//!
//! These models match the backend JSON contract exactly for seamless interoperability.

mod file;
mod floor;
mod printer;
mod tag;

pub use file::*;
pub use floor::*;
pub use printer::*;
pub use tag::*;
