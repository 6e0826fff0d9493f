//! Bundler
//!
//! Joins resolved asset bodies into the final output text.

use crate::models::AssetKind;

/// Separator placed between consecutive bodies.
///
/// Bodies conventionally end in a newline, so this yields one blank line
/// between them. Both kinds share the rule.
fn separator(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Script | AssetKind::Stylesheet => "\n",
    }
}

/// Join bodies in resolution order.
///
/// Empty bodies (assets skipped because they were already included) keep
/// their position and contribute only the separator.
pub fn join<S: AsRef<str>>(kind: AssetKind, bodies: &[S]) -> String {
    let sep = separator(kind);
    let capacity = bodies.iter().map(|b| b.as_ref().len() + sep.len()).sum();
    let mut out = String::with_capacity(capacity);

    for (i, body) in bodies.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(body.as_ref());
    }
    out
}
