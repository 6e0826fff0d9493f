//! Domain Services
//!
//! Stateless services over domain types:
//! - `directive_scanner`: finds `require` directives in file headers
//! - `resolver`: expands require graphs into ordered bodies
//! - `bundler`: joins bodies into output text

pub mod bundler;
pub mod directive_scanner;
pub mod resolver;

pub use directive_scanner::{extract_requires, scan_header, strip_directives, Directive, Header};
pub use resolver::{DependencyResolver, ResolutionContext, ResolveMode};
