//! Compiler port - turns foreign-format source text into native text

use crate::error::CabooseResult;
use crate::models::SourceFormat;

/// Compiles a foreign format (coffee, sass, scss) into its output format.
///
/// `CompileBridge` implements this by talking to the external worker. Results
/// are not cached by implementations; callers that want caching wrap them.
pub trait Compiler: Send + Sync {
    fn compile(&self, format: SourceFormat, content: &str) -> CabooseResult<String>;
}

impl<C: Compiler + ?Sized> Compiler for std::sync::Arc<C> {
    fn compile(&self, format: SourceFormat, content: &str) -> CabooseResult<String> {
        (**self).compile(format, content)
    }
}
