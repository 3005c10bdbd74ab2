//! Value types shared between the decode engine and its consumers.

mod check;
mod decoded;
mod input;

pub use check::*;
pub use decoded::*;
pub use input::*;
