// The package self-test runner over fixture package trees.

use std::fs;
use std::path::PathBuf;

use skillpack::validator::ValidationSchema;
use tempfile::TempDir;

/// A package tree that satisfies every self-test check.
fn write_package_tree(tmp: &TempDir) -> PathBuf {
    let root = tmp.path().to_path_buf();
    let bundle = root.join("prompt-architect");
    let schema = ValidationSchema::default();

    fs::create_dir_all(bundle.join("references/frameworks")).unwrap();
    fs::create_dir_all(bundle.join("assets/templates")).unwrap();
    fs::create_dir_all(bundle.join("scripts")).unwrap();

    fs::write(bundle.join("SKILL.md"), "---\nname: x\n---\n").unwrap();
    fs::write(root.join("LICENSE"), "MIT").unwrap();
    fs::write(root.join("README.md"), "# readme").unwrap();
    fs::write(root.join("CHANGELOG.md"), "# changes").unwrap();

    for framework in &schema.required_frameworks {
        fs::write(bundle.join("references/frameworks").join(framework), "f").unwrap();
    }
    for template in &schema.required_templates {
        fs::write(bundle.join("assets/templates").join(template), "t").unwrap();
    }
    for script in &schema.required_scripts {
        fs::write(bundle.join("scripts").join(script), "s").unwrap();
    }

    fs::write(
        root.join("package.json"),
        r#"{
  "name": "claude-skill-prompt-architect",
  "version": "1.0.0",
  "description": "d",
  "main": "index.js",
  "keywords": ["claude-code"],
  "license": "MIT",
  "files": ["prompt-architect/"]
}"#,
    )
    .unwrap();

    root
}

#[test]
fn test_complete_package_passes_all_checks() {
    let tmp = TempDir::new().unwrap();
    let root = write_package_tree(&tmp);
    let result = skillpack::cli::selftest::run(Some(root.to_str().unwrap().to_string()), None);
    assert!(result.is_ok());
}

#[test]
fn test_missing_changelog_fails_the_run() {
    let tmp = TempDir::new().unwrap();
    let root = write_package_tree(&tmp);
    fs::remove_file(root.join("CHANGELOG.md")).unwrap();
    let result = skillpack::cli::selftest::run(Some(root.to_str().unwrap().to_string()), None);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("1 check(s) failed"));
}

#[test]
fn test_missing_keyword_fails_its_check() {
    let tmp = TempDir::new().unwrap();
    let root = write_package_tree(&tmp);
    let descriptor = fs::read_to_string(root.join("package.json"))
        .unwrap()
        .replace("claude-code", "other-keyword");
    fs::write(root.join("package.json"), descriptor).unwrap();
    let result = skillpack::cli::selftest::run(Some(root.to_str().unwrap().to_string()), None);
    assert!(result.is_err());
}
