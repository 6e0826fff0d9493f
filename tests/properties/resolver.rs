//! Property tests for dependency resolution.

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::tempdir;

use caboose::{CabooseError, CabooseResult, Compiler, DependencyResolver, LocalFs, ResolveMode, SourceFormat};

struct NoCompiler;

impl Compiler for NoCompiler {
    fn compile(&self, format: SourceFormat, _content: &str) -> CabooseResult<String> {
        Err(CabooseError::Compile {
            format: format.to_string(),
            message: "no compiler in this test".to_string(),
        })
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    fs::write(root.join(relative), content).unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: whatever the require graph (cycles included), resolution
    /// terminates and every reachable file's own body appears exactly once.
    #[test]
    fn property_each_asset_included_once(
        edges in proptest::collection::vec(proptest::collection::vec(0usize..6, 0..4), 6),
    ) {
        let dir = tempdir().unwrap();
        let root = dir.path();

        for (i, requires) in edges.iter().enumerate() {
            let mut content = String::new();
            for r in requires {
                content.push_str(&format!("//= require n{}\n", r));
            }
            content.push_str(&format!("@n{}@\n", i));
            write(root, &format!("n{}.js", i), &content);
        }

        let fs = LocalFs::new();
        let resolver = DependencyResolver::new(&fs, &NoCompiler, root);
        let out = resolver.resolve("/assets/n0.js", ResolveMode::Bundle).unwrap();

        // Reachability from n0
        let mut seen = vec![false; edges.len()];
        let mut stack = vec![0usize];
        while let Some(n) = stack.pop() {
            if std::mem::replace(&mut seen[n], true) {
                continue;
            }
            stack.extend(edges[n].iter().copied());
        }

        for (i, reachable) in seen.iter().enumerate() {
            let marker = format!("@n{}@", i);
            let expected = usize::from(*reachable);
            prop_assert_eq!(out.matches(&marker).count(), expected);
        }
        // The entry's own body always comes last
        prop_assert!(out.trim_end().ends_with("@n0@"));
    }
}
