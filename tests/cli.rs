//! Integration tests for the slug_engine line protocol

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Isolated config and site snapshot paths
struct TestEnv {
    temp_dir: TempDir,
    store_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("site.bin");
        Self { temp_dir, store_path }
    }

    fn engine(&self) -> Command {
        let mut cmd = Command::cargo_bin("slug_engine").unwrap();
        cmd.env("RUST_LOG", "off").args([
            "--config",
            self.temp_dir.path().join("config.toml").to_str().unwrap(),
            "--store",
            self.store_path.to_str().unwrap(),
        ]);
        cmd
    }

    fn run(&self, script: &str) -> String {
        let output = self.engine().write_stdin(script).output().unwrap();
        assert!(output.status.success(), "engine failed: {:?}", output);
        String::from_utf8(output.stdout).unwrap()
    }
}

// =============================================================================
// Transliteration commands
// =============================================================================

#[test]
fn transliterate_and_classify() {
    let env = TestEnv::new();
    env.engine()
        .write_stdin("TRANSLITERATE سلام دنیا\nIS_LATIN hello-world\nIS_LATIN سلام\nHAS_PERSIAN abc اخبار\n")
        .assert()
        .success()
        .stdout("SLUG slam-dnya\nBOOL true\nBOOL false\nBOOL true\n");
}

#[test]
fn transliterate_blank_gives_empty_slug() {
    let env = TestEnv::new();
    let out = env.run("TRANSLITERATE    \n");
    assert_eq!(out, "SLUG \n");
}

#[test]
fn inspect_emits_json() {
    let env = TestEnv::new();
    env.engine()
        .write_stdin("INSPECT علی\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""slug":"ly""#))
        .stdout(predicate::str::contains(r#""has_persian_or_arabic":true"#));
}

#[test]
fn unknown_command_is_reported() {
    let env = TestEnv::new();
    env.engine()
        .write_stdin("FROBNICATE x\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ERR unknown command"));
}

// =============================================================================
// Resolution and bulk updates
// =============================================================================

#[test]
fn resolve_legacy_slug_by_name() {
    let env = TestEnv::new();
    let out = env.run("ADD_TERM\tcategory\tnews\tاخبار\nRESOLVE category اخبار\nRESOLVE category sports\n");
    assert_eq!(out, "OK\nRESOLVED news\nUNRESOLVED\n");
}

#[test]
fn request_rewrites_percent_encoded_tag() {
    let env = TestEnv::new();
    let out = env.run(
        "ADD_TERM\tpost_tag\takhbar\tاخبار\nREQUEST tag=%D8%A7%D8%AE%D8%A8%D8%A7%D8%B1&paged=2\n",
    );
    assert_eq!(out, "OK\nREWRITTEN 1 {\"paged\":\"2\",\"tag\":\"akhbar\"}\n");
}

#[test]
fn bulk_update_reports_counts() {
    let env = TestEnv::new();
    let out = env.run(concat!(
        "ADD_POST\tpost\t\tسلام دنیا\n",
        "ADD_POST\tpost\tkept\tعلی\n",
        "ADD_POST\tpost\t\t???\n",
        "BULK\n",
        "BULK 0 10 force\n",
        "BULK x\n",
    ));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "OK 1",
            "OK 2",
            "OK 3",
            "REPORT changed=1 skipped=2",
            "REPORT changed=2 skipped=1",
            "ERR bad offset \"x\"",
        ]
    );
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn exit_saves_site_for_next_run() {
    let env = TestEnv::new();
    let out = env.run("ADD_TERM\tcategory\tnews\tاخبار\nEXIT\nRESOLVE category اخبار\n");
    assert_eq!(out, "OK\n");
    assert!(env.store_path.exists());

    let out = env.run("RESOLVE category اخبار\n");
    assert_eq!(out, "RESOLVED news\n");
}

#[test]
fn eof_without_exit_does_not_save() {
    let env = TestEnv::new();
    env.run("ADD_TERM\tcategory\tnews\tاخبار\n");
    assert!(!env.store_path.exists());
}

#[test]
fn bad_config_fails_startup() {
    let env = TestEnv::new();
    fs::write(env.temp_dir.path().join("config.toml"), "not_a_key = 1\n").unwrap();
    env.engine()
        .write_stdin("TRANSLITERATE x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ConfigParse"));
}
