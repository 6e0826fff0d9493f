//! Property tests for header scanning and directive stripping.

use proptest::prelude::*;

use caboose::domain::services::{scan_header, strip_directives};
use caboose::SourceFormat;

fn any_format() -> impl Strategy<Value = SourceFormat> {
    prop::sample::select(SourceFormat::ALL.to_vec())
}

fn spec() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}(/[a-z_]{1,8}){0,2}").unwrap()
}

/// A line of code: starts with a letter, so it can never be a comment
fn code_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9 _;{}:.=()]{0,40}").unwrap()
}

fn line_marker(format: SourceFormat) -> &'static str {
    match format {
        SourceFormat::Coffee => "#=",
        _ => "//=",
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: scanning and stripping never panic on arbitrary input.
    #[test]
    fn property_scanner_never_panics(
        format in any_format(),
        raw in "(?s).{0,512}",
    ) {
        let header = scan_header(format, &raw);
        prop_assert!(header.end <= raw.lines().count());
        let _ = strip_directives(format, &raw);
    }

    /// PROPERTY: directives after the first line of code are body text.
    #[test]
    fn property_body_directives_are_ignored(
        format in prop::sample::select(vec![SourceFormat::Js, SourceFormat::Coffee]),
        first in code_line(),
        specs in proptest::collection::vec(spec(), 1..=4),
    ) {
        let mut raw = format!("{}\n", first);
        for s in &specs {
            raw.push_str(&format!("{} require {}\n", line_marker(format), s));
        }

        prop_assert!(scan_header(format, &raw).directives.is_empty());
        prop_assert_eq!(strip_directives(format, &raw), raw);
    }

    /// PROPERTY: header directives are found in order and stripping leaves the body.
    #[test]
    fn property_header_directives_strip_to_body(
        format in prop::sample::select(vec![SourceFormat::Js, SourceFormat::Coffee, SourceFormat::Scss]),
        specs in proptest::collection::vec(spec(), 0..=5),
        body in proptest::collection::vec(code_line(), 0..=6),
    ) {
        let mut raw = String::new();
        for s in &specs {
            raw.push_str(&format!("{} require {}\n", line_marker(format), s));
        }
        let body_text: String = body.iter().map(|l| format!("{}\n", l)).collect();
        raw.push_str(&body_text);

        let found: Vec<String> = scan_header(format, &raw)
            .directives
            .into_iter()
            .map(|d| d.spec)
            .collect();
        prop_assert_eq!(found, specs);
        prop_assert_eq!(strip_directives(format, &raw), body_text);
    }

    /// PROPERTY: a stylesheet block holding only directives is removed whole.
    #[test]
    fn property_directive_only_block_is_removed(
        specs in proptest::collection::vec(spec(), 1..=5),
        body in proptest::collection::vec(code_line(), 0..=6),
    ) {
        let mut raw = String::from("/*\n");
        for s in &specs {
            raw.push_str(&format!(" *= require {}\n", s));
        }
        raw.push_str(" */\n");
        let body_text: String = body.iter().map(|l| format!("{}\n", l)).collect();
        raw.push_str(&body_text);

        prop_assert_eq!(scan_header(SourceFormat::Css, &raw).directives.len(), specs.len());
        prop_assert_eq!(strip_directives(SourceFormat::Css, &raw), body_text);
    }
}
