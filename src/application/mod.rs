//! Application Layer
//!
//! Use cases that orchestrate the domain services. This layer:
//! - Depends on the Domain layer (services, ports)
//! - Does NOT contain resolution rules (those are in Domain)
//! - Wires Infrastructure into the Domain
//!
//! ## Use Cases
//!
//! - `BundleUseCase` - Resolve a whole assets tree into an output directory
//! - `diagnose` - Clear a stale worker and smoke-test every foreign format

pub mod bundle;
pub mod diagnose;

pub use bundle::{BundleFailure, BundleOptions, BundleResult, BundleUseCase};
pub use diagnose::{diagnose, DiagnoseReport, FormatCheck};
