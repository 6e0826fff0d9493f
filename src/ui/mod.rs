//! Terminal output for the caboose binary

pub mod error;
pub mod json;
pub mod output;
