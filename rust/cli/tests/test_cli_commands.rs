use fifty_cli::run;
use serial_test::serial;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["fifty"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn help_goes_to_stdout() {
    let (code, out, _) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    for cmd in ["play", "sim", "stats", "deal", "cfg"] {
        assert!(out.contains(cmd), "help should mention {}", cmd);
    }
}

#[test]
#[serial]
fn unknown_command_lists_commands() {
    let (code, _, err) = run_cli(&["shuffle"]);
    assert_eq!(code, 2);
    assert!(err.contains("Commands:"));
    assert!(err.contains("  stats"));
}

#[test]
#[serial]
fn deal_is_reproducible_from_a_seed() {
    let (code, first, _) = run_cli(&["deal", "--seed", "42", "--bots", "2"]);
    assert_eq!(code, 0);
    let (_, second, _) = run_cli(&["deal", "--seed", "42", "--bots", "2"]);
    assert_eq!(first, second);
    assert!(first.starts_with("deal: bots=2 seed=42"));
    assert!(first.contains("You "));
    assert!(first.contains("Bot 2 "));
    assert!(first.contains("Deck: 39 cards"));
    assert!(first.contains("Table: "));
}

#[test]
#[serial]
fn deal_rejects_too_many_bots() {
    let (code, _, err) = run_cli(&["deal", "--bots", "4"]);
    assert_eq!(code, 2);
    assert!(err.contains("bots must be between 1 and 3"), "stderr: {}", err);
}

#[test]
#[serial]
fn sim_rejects_unknown_policy() {
    let (code, _, err) = run_cli(&["sim", "--games", "1", "--bot-policy", "psychic"]);
    assert_eq!(code, 2);
    assert!(err.contains("psychic"));
}

#[test]
#[serial]
fn sim_needs_at_least_one_game() {
    let (code, _, err) = run_cli(&["sim", "--games", "0"]);
    assert_eq!(code, 2);
    assert!(err.contains("games must be >= 1"));
}

#[test]
#[serial]
fn stats_reports_missing_input() {
    let (code, _, err) = run_cli(&["stats", "--input", "/nonexistent/games.jsonl"]);
    assert_eq!(code, 2);
    assert!(err.contains("Input not found"));
}
