//! End-to-end tests for the logo-thicken binary

use std::fs;
use std::process::Command;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_logo-thicken"))
}

#[test]
fn test_cli_success_message_and_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    let output = dir.path().join("out.svg");
    fs::write(&input, r##"<svg><path fill="#FEFEFE"/><path fill="#123456"/></svg>"##).unwrap();

    let result = cli().arg(&input).arg(&output).output().unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains(&format!("Successfully processed logo to {}", output.display())));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Removed background path"), "{}", stderr);
    assert!(fs::read_to_string(&output).unwrap().contains("stroke=\"#123456\""));
}

#[test]
fn test_cli_quiet_suppresses_removal_log() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    fs::write(&input, r##"<svg><path fill="#FFF"/></svg>"##).unwrap();

    let result = cli()
        .arg("--quiet")
        .arg(&input)
        .arg(dir.path().join("out.svg"))
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(result.stderr.is_empty());
}

#[test]
fn test_cli_stroke_width_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    let output = dir.path().join("out.svg");
    fs::write(&input, r##"<svg><path fill="#123456"/></svg>"##).unwrap();

    let result = cli()
        .args(["--stroke-width", "5"])
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(fs::read_to_string(&output).unwrap().contains("stroke-width=\"5\""));
}

#[test]
fn test_cli_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    let output = dir.path().join("out.svg");
    let config = dir.path().join("thicken.toml");
    fs::write(&input, r##"<svg><path fill="#123456"/><path fill="#EEEEEE"/></svg>"##).unwrap();
    fs::write(&config, "[background]\nfills = [\"#eeeeee\"]\n\n[stroke]\nwidth = 7\n").unwrap();

    let result = cli()
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("stroke-width=\"7\""), "{}", svg);
    assert!(!svg.contains("#EEEEEE"), "{}", svg);
}

#[test]
fn test_cli_invalid_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    let config = dir.path().join("thicken.toml");
    fs::write(&input, "<svg/>").unwrap();
    fs::write(&config, "[stroke]\nwidth = \"thick\"\n").unwrap();

    let result = cli()
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .arg(dir.path().join("out.svg"))
        .output()
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Error loading config"), "{}", stderr);
}

#[test]
fn test_cli_background_fill_flag_replaces_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    let output = dir.path().join("out.svg");
    fs::write(&input, r##"<svg><path fill="#000000"/><path fill="#FEFEFE"/></svg>"##).unwrap();

    let result = cli()
        .args(["--background-fill", "#000000"])
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let svg = fs::read_to_string(&output).unwrap();
    assert!(!svg.contains("#000000"), "{}", svg);
    assert!(svg.contains(r##"<path fill="#FEFEFE" stroke="#FEFEFE" stroke-width="3"/>"##), "{}", svg);
}

#[test]
fn test_cli_keep_prefixes_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    let output = dir.path().join("out.svg");
    fs::write(
        &input,
        r##"<s:svg xmlns:s="http://www.w3.org/2000/svg"><s:path fill="#123"/></s:svg>"##,
    )
    .unwrap();

    let kept = cli()
        .arg("--keep-prefixes")
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();
    assert!(kept.status.success());
    assert!(fs::read_to_string(&output).unwrap().contains("<s:svg xmlns:s="));

    let normalized = cli().arg(&input).arg(&output).output().unwrap();
    assert!(normalized.status.success());
    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains("<svg xmlns=\"http://www.w3.org/2000/svg\">"));
}

#[test]
fn test_cli_verbose_prints_debug_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    fs::write(&input, r##"<svg><path fill="#123456"/></svg>"##).unwrap();

    let result = cli()
        .arg("-v")
        .arg(&input)
        .arg(dir.path().join("out.svg"))
        .output()
        .unwrap();

    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("debug: Thickened <path> with stroke #123456"), "{}", stderr);
}

#[test]
fn test_cli_parse_error_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.svg");
    let output = dir.path().join("out.svg");
    fs::write(&input, "<svg><path></svg>").unwrap();

    let result = cli().arg(&input).arg(&output).output().unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Error processing SVG"), "{}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_cli_missing_input_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    let result = cli()
        .arg(dir.path().join("missing.svg"))
        .arg(dir.path().join("out.svg"))
        .output()
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("failed to read"), "{}", stderr);
}
