mod common;

use common::TestEnv;

#[test]
fn test_compile_rejects_native_formats() {
    let env = TestEnv::new().with_native_assets();

    let result = env.run(&["compile", "assets/js/normal.js"]);

    assert!(!result.success);
    assert_eq!(
        result.stderr,
        "[ERROR] Unsupported format (assets/js/normal.js). Valid formats are: coffee, sass, scss.\n"
    );
}

#[cfg(unix)]
#[test]
fn test_compile_reports_worker_that_never_starts() {
    let env = TestEnv::new();
    env.write("assets/app.coffee", "a = 1\n").write(
        "caboose.toml",
        "[worker]\ncommand = [\"sh\", \"-c\", \"exit 0\"]\npid_file = \"worker.pid\"\n",
    );

    let result = env.run(&["compile", "assets/app.coffee"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("failed to start compiler worker `sh -c exit 0`"),
        "{}",
        result.stderr
    );
    assert!(result.stderr.contains("hint: check [worker] command"));
}
