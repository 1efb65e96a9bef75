// Validation of a full bundle fixture against the default schema.

use std::fs;
use std::path::{Path, PathBuf};

use skillpack::validator::{SkillValidator, ValidationSchema};
use tempfile::TempDir;

/// Lay out a bundle plus package descriptor that satisfies every default
/// schema expectation. Returns (package_root, bundle_root).
fn write_conforming_package(tmp: &TempDir) -> (PathBuf, PathBuf) {
    let package_root = tmp.path().to_path_buf();
    let bundle_root = package_root.join("prompt-architect");
    let schema = ValidationSchema::default();

    for dir in &schema.required_directories {
        fs::create_dir_all(bundle_root.join(dir)).unwrap();
    }
    fs::write(
        bundle_root.join("SKILL.md"),
        "---\nname: prompt-architect\ndescription: Structured prompt design\n---\n\n# Guide\n",
    )
    .unwrap();

    for framework in &schema.required_frameworks {
        fs::write(
            bundle_root.join("references/frameworks").join(framework),
            "f".repeat(6000),
        )
        .unwrap();
    }
    for template in &schema.required_templates {
        fs::write(
            bundle_root.join("assets/templates").join(template),
            "fill me in",
        )
        .unwrap();
    }
    for script in &schema.required_scripts {
        fs::write(bundle_root.join("scripts").join(script), "print('ok')").unwrap();
    }

    fs::write(
        package_root.join("package.json"),
        r#"{
  "name": "claude-skill-prompt-architect",
  "version": "2.0.1",
  "description": "Prompt design skill",
  "main": "index.js",
  "keywords": ["claude-code"],
  "license": "MIT",
  "files": ["prompt-architect/"]
}"#,
    )
    .unwrap();

    (package_root, bundle_root)
}

fn validate(package_root: &Path, bundle_root: &Path) -> skillpack::validator::ValidationReport {
    SkillValidator::new(ValidationSchema::default()).validate(bundle_root, package_root)
}

#[test]
fn test_conforming_package_passes_cleanly() {
    let tmp = TempDir::new().unwrap();
    let (package_root, bundle_root) = write_conforming_package(&tmp);
    let report = validate(&package_root, &bundle_root);
    assert!(report.passed(), "unexpected findings: {:?}", report.findings);
    assert_eq!(report.warning_count(), 0);
}

#[test]
fn test_one_error_per_missing_item() {
    let tmp = TempDir::new().unwrap();
    let (package_root, bundle_root) = write_conforming_package(&tmp);

    // Remove one item from each required category.
    fs::remove_file(bundle_root.join("references/frameworks/risen.md")).unwrap();
    fs::remove_file(bundle_root.join("assets/templates/hybrid_template.txt")).unwrap();
    fs::remove_file(bundle_root.join("scripts/framework_analyzer.py")).unwrap();

    let report = validate(&package_root, &bundle_root);
    assert_eq!(report.error_count(), 3);
    assert!(!report.passed());
}

#[test]
fn test_warnings_do_not_fail_the_pass() {
    let tmp = TempDir::new().unwrap();
    let (package_root, bundle_root) = write_conforming_package(&tmp);

    // Undersized framework file and a descriptor without the files array.
    fs::write(
        bundle_root.join("references/frameworks/rtf.md"),
        "tiny",
    )
    .unwrap();
    let descriptor = fs::read_to_string(package_root.join("package.json"))
        .unwrap()
        .replace(",\n  \"files\": [\"prompt-architect/\"]", "");
    fs::write(package_root.join("package.json"), descriptor).unwrap();

    let report = validate(&package_root, &bundle_root);
    assert!(report.passed());
    assert_eq!(report.warning_count(), 2);
}

#[test]
fn test_missing_bundle_root_short_circuits() {
    let tmp = TempDir::new().unwrap();
    let (package_root, _) = write_conforming_package(&tmp);
    let report = validate(&package_root, &package_root.join("absent"));
    // One fatal finding; the package descriptor is never inspected.
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_validate_cli_exit_semantics() {
    let tmp = TempDir::new().unwrap();
    let (_, bundle_root) = write_conforming_package(&tmp);

    let ok = skillpack::cli::validate::run(
        Some(bundle_root.to_str().unwrap().to_string()),
        None,
    );
    assert!(ok.is_ok());

    fs::remove_file(bundle_root.join("SKILL.md")).unwrap();
    let err = skillpack::cli::validate::run(
        Some(bundle_root.to_str().unwrap().to_string()),
        None,
    );
    assert!(err.is_err());
}
