//! Integration tests for jali CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::process::Command;

fn jali() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jali"))
}

#[test]
fn tiles_command_lists_all_families() {
    let output = jali().arg("tiles").output().expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "rails",
        "cornerArcs",
        "arcSweeps",
        "crossOverArcs",
        "arcs",
        "diagonals",
        "diagonalMesh",
        "overlappingArcs",
        "customTiles",
    ] {
        assert!(stdout.contains(name), "Should list '{name}'");
    }
}

#[test]
fn tiles_command_produces_json() {
    let output = jali().args(["tiles", "--json"]).output().expect("Failed to execute command");
    let infos: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(infos.as_array().map(|a| a.len()), Some(8));
}

#[test]
fn generate_writes_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("jali.svg");

    let output = jali()
        .args(["generate", "-W", "200", "-H", "200", "-t", "diagonals", "--seed", "1", "-o"])
        .arg(&out)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<?xml"), "Should have XML declaration");
    assert!(svg.contains("<clipPath"), "Should have the frame mask");
    assert_eq!(svg.matches("<polyline").count(), 100);
    assert!(svg.contains("</svg>"), "Should close SVG element");
}

#[test]
fn generate_to_stdout() {
    let output = jali()
        .args(["generate", "-W", "100", "-H", "100", "-r", "5", "--no-frame", "-o", "-"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<?xml"));
    assert!(!stdout.contains("clipPath"));
}

#[test]
fn same_seed_same_output() {
    let run = || {
        jali()
            .args(["generate", "-W", "120", "-H", "160", "--seed", "99", "-o", "-"])
            .output()
            .expect("Failed to execute command")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn dry_run_reports_json() {
    let output = jali()
        .args(["--json", "generate", "-W", "200", "-H", "200", "-t", "diagonals", "--dry-run"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["cells"], 100);
    assert_eq!(report["mesh_members"], 100);
    assert_eq!(report["frame_members"], 2);
}

#[test]
fn custom_tiles_from_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let tile = dir.path().join("leaf.svg");
    fs::write(
        &tile,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><path d="M 0 0 L 10 10"/></svg>"#,
    )
    .unwrap();

    let output = jali()
        .args(["generate", "-W", "100", "-H", "100", "-r", "5", "-t", "customTiles", "-o", "-", "--tile-svg"])
        .arg(&tile)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("vector-effect").count(), 25);
}

#[test]
fn custom_mode_without_tiles_exits_10() {
    let output = jali()
        .args(["generate", "-t", "customTiles", "--dry-run"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(10));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no custom tiles selected"));
}

#[test]
fn unknown_tile_exits_12() {
    let output = jali()
        .args(["generate", "-t", "hexagons", "--dry-run"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(12));
}

#[test]
fn missing_recipe_exits_11() {
    let output = jali()
        .args(["recipe", "/nonexistent/recipe.yaml"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(11));
}

#[test]
fn recipe_writes_svg_and_png() {
    let dir = tempfile::tempdir().unwrap();
    let recipe = dir.path().join("window.yaml");
    fs::write(
        &recipe,
        "name: window\ncanvas: {width: 120, height: 180}\nseed: 3\njali: {tile_type: cornerArcs, resolution: 6}\noutput: {svg: out/window.svg, png: out/window.png}\n",
    )
    .unwrap();

    let output = jali().arg("recipe").arg(&recipe).output().expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let svg = fs::read_to_string(dir.path().join("out/window.svg")).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 120 180""#));
    let png = fs::read(dir.path().join("out/window.png")).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn recipe_example_parses() {
    let output = jali().args(["recipe", "--example"]).output().expect("Failed to execute command");
    assert!(output.status.success());
    let example: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).expect("valid YAML");
    assert_eq!(example["jali"]["tile_type"].as_str(), Some("arcSweeps"));
}

#[test]
fn request_select_tiles_with_nothing_selected() {
    let output = jali()
        .args(["request", r#"{"type":"select-tiles"}"#])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(12));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "error");
    assert_eq!(lines[1]["type"], "tile-status");
    assert_eq!(lines[1]["value"], "no custom tiles selected");
}

#[test]
fn request_select_then_create() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("doc.svg");
    let messages = r#"[
        {"type":"select-tiles"},
        {"type":"create-jali","count":2,"resolution":5,"stroke":2,"tileType":"customTiles","frame":true}
    ]"#;

    let output = jali()
        .args(["request", messages, "-W", "100", "-H", "100", "--seed", "4"])
        .args(["--tile-path", "M 0 0 L 4 0 L 4 4 Z", "--tile-path", "M 0 0 L 4 4", "-o"])
        .arg(&out)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![r#"{"type":"tile-status","value":"2 custom tiles selected"}"#, r#"{"type":"done"}"#]);

    let svg = fs::read_to_string(&out).unwrap();
    assert_eq!(svg.matches("vector-effect").count(), 25);
}

#[test]
fn request_create_without_frame_selected() {
    let output = jali()
        .args(["request", r#"{"type":"create-jali","tileType":"rails"}"#, "--empty-selection"])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error: nothing selected, select one frame"));
}
