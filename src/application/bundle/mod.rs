//! Bundle Use Case
//!
//! Writes a servable copy of the assets tree:
//! - every script/stylesheet source becomes one resolved output file under
//!   its output extension (`app.coffee` -> `app.js`)
//! - everything else is copied unchanged

mod options;
mod result;
mod use_case;


pub use options::BundleOptions;
pub use result::{BundleFailure, BundleResult};
pub use use_case::BundleUseCase;
