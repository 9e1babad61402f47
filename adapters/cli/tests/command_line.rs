use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_might-and-magic"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run might-and-magic")
}

#[test]
fn help_lists_every_tunable() {
    let output = run(&["--help"]);
    assert!(output.status.success(), "--help should exit cleanly");
    let stdout = String::from_utf8(output.stdout).expect("help is utf-8");

    for flag in [
        "--seed",
        "--dungeon-size",
        "--intro-seconds",
        "--max-events-per-frame",
        "--assets",
        "--vsync",
        "--show-fps",
        "--print-dungeon",
    ] {
        assert!(stdout.contains(flag), "help should mention {flag}");
    }
}

#[test]
fn zero_sized_dungeon_is_refused_before_any_window_opens() {
    let output = run(&["--print-dungeon", "--dungeon-size", "0"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("usage error is utf-8");
    assert!(stderr.contains("--dungeon-size"), "stderr was: {stderr}");
}

#[test]
fn zero_event_budget_is_refused() {
    let output = run(&["--print-dungeon", "--max-events-per-frame", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("usage error is utf-8");
    assert!(stderr.contains("--max-events-per-frame"), "stderr was: {stderr}");
}
