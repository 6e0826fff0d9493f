//! Domain Layer
//!
//! Pure resolution logic for Caboose.
//!
//! ## Structure
//!
//! - `services/` - Directive scanning, dependency resolution, bundling
//! - `ports/` - Interface definitions for infrastructure (file system, compiler)
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - File reads and compilation go through ports
//! 2. **Per-request state** - Each resolve call owns its `ResolutionContext`
//! 3. **Ports & Adapters** - Infrastructure supplies `LocalFs` and `CompileBridge`

pub mod ports;
pub mod services;
