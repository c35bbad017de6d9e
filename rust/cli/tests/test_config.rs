use fifty_cli::config::{self, Overrides, ValueSource};
use fifty_cli::run;
use serde_json::Value;
use serial_test::serial;

const VARS: &[&str] = &[
    "FIFTY_CONFIG",
    "FIFTY_BOTS",
    "FIFTY_SEED",
    "FIFTY_BOT_POLICY",
    "FIFTY_HUMAN_POLICY",
    "FIFTY_DELAY_MS",
];

fn clear_env() {
    for var in VARS {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

fn set(var: &str, value: &str) {
    unsafe {
        std::env::set_var(var, value);
    }
}

fn cfg_json() -> (i32, Value) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["fifty", "cfg"], &mut out, &mut err);
    let text = String::from_utf8(out).unwrap();
    let json = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (code, json)
}

#[test]
#[serial]
fn defaults_come_from_default() {
    clear_env();
    let (code, json) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["bots"]["value"].as_u64(), Some(1));
    assert_eq!(json["bots"]["source"].as_str(), Some("default"));
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["bot_policy"]["value"].as_str(), Some("baseline"));
    assert_eq!(json["delay_ms"]["value"].as_u64(), Some(0));
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fifty.toml");
    std::fs::write(&path, "bots = 2\nseed = 5\nbot_policy = \"cautious\"\n").unwrap();
    set("FIFTY_CONFIG", path.to_str().unwrap());
    set("FIFTY_SEED", "99");

    let (code, json) = cfg_json();
    clear_env();
    assert_eq!(code, 0);
    assert_eq!(json["bots"]["value"].as_u64(), Some(2));
    assert_eq!(json["bots"]["source"].as_str(), Some("file"));
    assert_eq!(json["seed"]["value"].as_u64(), Some(99));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["bot_policy"]["value"].as_str(), Some("cautious"));
    assert_eq!(json["human_policy"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn flags_override_env() {
    clear_env();
    set("FIFTY_BOTS", "3");
    set("FIFTY_BOT_POLICY", "random");
    let resolved = config::resolve(&Overrides {
        bots: Some(2),
        ..Overrides::default()
    })
    .unwrap();
    clear_env();
    assert_eq!(resolved.config.bots, 2);
    assert_eq!(resolved.sources.bots, ValueSource::Cli);
    assert_eq!(resolved.config.bot_policy, "random");
    assert_eq!(resolved.sources.bot_policy, ValueSource::Env);
}

#[test]
#[serial]
fn invalid_env_value_fails_cfg() {
    clear_env();
    set("FIFTY_BOTS", "many");
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["fifty", "cfg"], &mut out, &mut err);
    clear_env();
    assert_eq!(code, 2);
    assert!(String::from_utf8(err).unwrap().contains("FIFTY_BOTS"));
}

#[test]
#[serial]
fn out_of_range_env_value_is_rejected() {
    clear_env();
    set("FIFTY_BOTS", "0");
    let result = config::load_with_sources();
    clear_env();
    assert!(result.is_err());
}

#[test]
#[serial]
fn malformed_file_is_reported() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "bots = \"two\"\n").unwrap();
    set("FIFTY_CONFIG", path.to_str().unwrap());
    let result = config::load_with_sources();
    clear_env();
    let e = result.unwrap_err();
    assert!(e.to_string().contains("cannot parse config file"));
}
