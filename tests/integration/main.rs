//! Integration tests for Harbor

mod lifecycle;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const SITE_CONFIG: &str = r#"
[agent]
prefix = "site"
version = "v4"
origin = "https://example.com"

[manifest]
urls = ["/", "/index.html", "/img/logo.png"]

[classifier]
dynamic_hosts = ["formspree.io"]
"#;

    fn harbor() -> Command {
        cargo_bin_cmd!("harbor")
    }

    fn with_config(dir: &TempDir) -> Command {
        let path = dir.path().join("harbor.toml");
        fs::write(&path, SITE_CONFIG).unwrap();
        let mut cmd = harbor();
        cmd.arg("--config").arg(path);
        cmd
    }

    #[test]
    fn help_displays() {
        harbor()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("caching agent for static websites"));
    }

    #[test]
    fn version_displays() {
        harbor()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("harbor"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        with_config(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[agent]").and(predicate::str::contains("v4")));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        with_config(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("harbor.toml"));
    }

    #[test]
    fn config_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new").join("harbor.toml");

        harbor()
            .arg("--config")
            .arg(&path)
            .args(["config", "init"])
            .assert()
            .success();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[manifest]"));
    }

    #[test]
    fn partitions_lists_version_set() {
        let dir = TempDir::new().unwrap();
        with_config(&dir)
            .arg("partitions")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("site-static-v4")
                    .and(predicate::str::contains("site-dynamic-v4"))
                    .and(predicate::str::contains("https://example.com/img/logo.png")),
            );
    }

    #[test]
    fn classify_routes() {
        let dir = TempDir::new().unwrap();
        with_config(&dir)
            .args(["classify", "https://example.com/img/logo.png"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cache-first"));

        with_config(&dir)
            .args(["classify", "https://example.com/contact", "--destination", "document"])
            .assert()
            .success()
            .stdout(predicate::str::contains("network-first"));

        with_config(&dir)
            .args(["classify", "data:text/plain,hi"])
            .assert()
            .success()
            .stdout(predicate::str::contains("skip"));
    }

    #[test]
    fn classify_rejects_relative_url() {
        let dir = TempDir::new().unwrap();
        with_config(&dir)
            .args(["classify", "/index.html"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid request URL"));
    }

    #[test]
    fn fallback_for_image() {
        harbor()
            .args(["fallback", "--destination", "image"])
            .assert()
            .success()
            .stdout(predicate::str::contains("HTTP 503").and(predicate::str::contains("text/plain")));
    }

    #[test]
    fn fallback_for_document() {
        harbor()
            .args(["fallback", "--body-only"])
            .assert()
            .success()
            .stdout(predicate::str::contains("<!DOCTYPE html>"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("harbor.toml");
        fs::write(&path, "[agent]\norigin = \"nope\"\n").unwrap();

        harbor()
            .arg("--config")
            .arg(&path)
            .arg("partitions")
            .assert()
            .failure()
            .stderr(predicate::str::contains("agent.origin"));
    }
}
