mod common;

use common::TestEnv;

#[test]
fn test_unknown_config_key_warns_with_suggestion() {
    let env = TestEnv::new().with_native_assets();
    env.write("caboose.toml", "[assets]\nurl_prefx = \"/assets/\"\n");

    let result = env.run(&["resolve", "js/normal.js"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("Unknown config key 'url_prefx'"), "{}", result.stderr);
    assert!(result.stderr.contains("caboose.toml:2"));
    assert!(result.stderr.contains("Did you mean 'url_prefix'?"));
}

#[test]
fn test_json_mode_suppresses_config_warnings() {
    let env = TestEnv::new().with_native_assets();
    env.write("caboose.toml", "[assets]\nurl_prefx = \"/assets/\"\n");

    let result = env.run(&["resolve", "js/normal.js", "--json"]);

    assert!(result.success);
    assert!(!result.stderr.contains("Unknown config key"));
}

#[test]
fn test_invalid_config_fails() {
    let env = TestEnv::new().with_native_assets();
    env.write("caboose.toml", "[assets\n");

    let result = env.run(&["resolve", "js/normal.js"]);

    assert!(!result.success);
    assert!(result.stderr.starts_with("[ERROR] invalid config in"), "{}", result.stderr);
}

#[test]
fn test_explicit_config_flag() {
    let env = TestEnv::new().with_native_assets();
    env.write("conf/alt.toml", "[assets]\nbundle = true\n");

    let result = env.run(&["resolve", "js/require2.js", "--config", "conf/alt.toml"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(result.stdout, "@normal.js\n\n@sub/normal.js\n\n");
}

#[test]
fn test_missing_explicit_config_fails() {
    let env = TestEnv::new().with_native_assets();

    let result = env.run(&["resolve", "js/normal.js", "--config", "nope.toml"]);

    assert!(!result.success);
    assert!(result.stderr.contains("config file not found: nope.toml"));
}

#[test]
fn test_assets_root_env_override() {
    let env = TestEnv::new();
    env.write("frontend/app.js", "@frontend\n");

    let result = env.run_with_env(&["resolve", "app.js"], &[("CABOOSE_ASSETS_ROOT", "frontend")]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(result.stdout, "@frontend\n");
}
