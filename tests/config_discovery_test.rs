// Config discovery relative to the process working directory.
// These tests move the working directory, so they are serialized.

use serial_test::serial;
use skillpack::config::Config;
use tempfile::TempDir;

#[test]
#[serial]
fn test_config_discovered_in_working_directory() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("skillpack.toml"),
        "[skill]\nname = \"from-cwd\"\n",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(tmp.path()).unwrap();
    let config = Config::load();
    std::env::set_current_dir(original).unwrap();

    assert_eq!(config.unwrap().skill.name, "from-cwd");
}

#[test]
#[serial]
fn test_defaults_used_when_no_config_present() {
    let tmp = TempDir::new().unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(tmp.path()).unwrap();
    let config = Config::load();
    std::env::set_current_dir(original).unwrap();

    assert_eq!(config.unwrap().skill.name, "prompt-architect");
}
