use std::process::Command;
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_ips-patcher").to_string()
}

const PATCH: &[u8] = b"PATCH\x00\x00\x05\x00\x03\xAA\xBB\xCCEOF";

#[test]
fn cli_applies_patch() {
    let dir = tempdir().unwrap();
    let patch = dir.path().join("fix.ips");
    let target = dir.path().join("game.bin");
    let output = dir.path().join("out.bin");

    std::fs::write(&patch, PATCH).unwrap();
    std::fs::write(&target, [0u8; 8]).unwrap();

    let out = Command::new(bin())
        .arg("--patch")
        .arg(&patch)
        .arg("--output")
        .arg(&output)
        .arg(&target)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        std::fs::read(&output).unwrap(),
        [0, 0, 0, 0, 0, 0xAA, 0xBB, 0xCC]
    );

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("fix.ips\t"));
    assert!(lines[0].ends_with(&format!("\t{} bytes", PATCH.len())));
    assert!(lines[1].starts_with("game.bin\t"));
    assert!(lines[2].ends_with("\t8 bytes"));
}

#[test]
fn cli_default_output_name() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("fix.ips"), PATCH).unwrap();
    std::fs::write(dir.path().join("game.bin"), b"").unwrap();

    let st = Command::new(bin())
        .current_dir(dir.path())
        .args(["-p", "fix.ips", "-t", "game.bin", "--quiet"])
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(
        std::fs::read(dir.path().join("patched.bin")).unwrap(),
        [0, 0, 0, 0, 0, 0xAA, 0xBB, 0xCC]
    );
}

#[test]
fn cli_json_stats() {
    let dir = tempdir().unwrap();
    let patch = dir.path().join("fix.ips");
    let target = dir.path().join("game.bin");
    std::fs::write(&patch, PATCH).unwrap();
    std::fs::write(&target, b"abc").unwrap();

    let out = Command::new(bin())
        .arg("-q")
        .arg("--json")
        .arg("-p")
        .arg(&patch)
        .arg("-o")
        .arg(dir.path().join("o.bin"))
        .arg(&target)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let json: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(json["clusters"], 1);
    assert_eq!(json["target"]["size"], 3);
    assert_eq!(json["output"]["size"], 8);
}

#[test]
fn cli_missing_patch_flag_exits_1() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("game.bin");
    std::fs::write(&target, b"x").unwrap();

    let st = Command::new(bin()).arg(&target).status().unwrap();
    assert_eq!(st.code(), Some(1));
}

#[test]
fn cli_missing_target_exits_1() {
    let dir = tempdir().unwrap();
    let patch = dir.path().join("fix.ips");
    std::fs::write(&patch, PATCH).unwrap();

    let st = Command::new(bin()).arg("-p").arg(&patch).status().unwrap();
    assert_eq!(st.code(), Some(1));
}

#[test]
fn cli_bad_patch_exits_1_without_output() {
    let dir = tempdir().unwrap();
    let patch = dir.path().join("bad.ips");
    let target = dir.path().join("game.bin");
    let output = dir.path().join("out.bin");
    std::fs::write(&patch, b"NOT AN IPS FILE").unwrap();
    std::fs::write(&target, b"x").unwrap();

    let out = Command::new(bin())
        .arg("-p")
        .arg(&patch)
        .arg("-o")
        .arg(&output)
        .arg(&target)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid magic"));
}

#[test]
fn cli_bad_patch_still_reports_patch_checksum() {
    let dir = tempdir().unwrap();
    let patch = dir.path().join("bad.ips");
    let target = dir.path().join("game.bin");
    std::fs::write(&patch, b"NOT AN IPS FILE").unwrap();
    std::fs::write(&target, b"x").unwrap();

    let out = Command::new(bin())
        .arg("-p")
        .arg(&patch)
        .arg("-o")
        .arg(dir.path().join("out.bin"))
        .arg(&target)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("bad.ips\t"));
    assert!(lines[0].ends_with("\t15 bytes"));
}

#[test]
fn cli_unreadable_target_exits_1() {
    let dir = tempdir().unwrap();
    let patch = dir.path().join("fix.ips");
    std::fs::write(&patch, PATCH).unwrap();

    let st = Command::new(bin())
        .arg("-p")
        .arg(&patch)
        .arg(dir.path().join("nope.bin"))
        .status()
        .unwrap();
    assert_eq!(st.code(), Some(1));
}

#[test]
fn cli_unknown_flag_exits_1() {
    let st = Command::new(bin()).arg("--bogus").status().unwrap();
    assert_eq!(st.code(), Some(1));
}

#[test]
fn cli_version_and_help_exit_0() {
    let out = Command::new(bin()).arg("-v").output().unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap().trim(),
        env!("CARGO_PKG_VERSION")
    );

    let out = Command::new(bin()).arg("--help").output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("--patch"));
}
