//! Structural validation of a skill bundle.
//!
//! Walks a declared schema of required directories, files, and manifest
//! fields against an on-disk bundle and accumulates every problem found.
//! Nothing short-circuits except a missing bundle root, which is fatal.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The bundle's manifest file, expected at the bundle root.
pub const MANIFEST_FILE: &str = "SKILL.md";
/// The package descriptor, expected at the package root.
pub const PACKAGE_FILE: &str = "package.json";
/// Keyword every published skill package is expected to carry.
pub const PACKAGE_KEYWORD: &str = "claude-code";

/// Subdirectory holding framework reference documents.
pub const FRAMEWORKS_DIR: &str = "references/frameworks";
/// Subdirectory holding fill-in templates.
pub const TEMPLATES_DIR: &str = "assets/templates";
/// Subdirectory holding auxiliary scripts.
pub const SCRIPTS_DIR: &str = "scripts";

/// Framework files below this size draw an advisory warning.
const MIN_FRAMEWORK_BYTES: u64 = 5000;
/// Manifests above this size draw an advisory warning.
const MAX_MANIFEST_BYTES: usize = 100 * 1024;
/// Maximum length of the manifest `name` field.
const MAX_NAME_LEN: usize = 64;
/// Maximum length of the manifest `description` field.
const MAX_DESCRIPTION_LEN: usize = 1024;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid regex"));
static SEMVER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+(-[a-z0-9.]+)?$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Structural requirement violated; fails validation.
    Error,
    /// Quality hint; never fails validation.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

/// Accumulated findings from one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    fn error(&mut self, message: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Error,
            message: message.into(),
        });
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Warnings alone never fail a pass.
    pub fn passed(&self) -> bool {
        self.error_count() == 0
    }
}

/// The fixed set of expectations a bundle is validated against.
/// Built once at process start (from config defaults or a config file) and
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSchema {
    #[serde(default = "default_required_directories")]
    pub required_directories: Vec<String>,
    #[serde(default = "default_required_frameworks")]
    pub required_frameworks: Vec<String>,
    #[serde(default = "default_required_templates")]
    pub required_templates: Vec<String>,
    #[serde(default = "default_required_scripts")]
    pub required_scripts: Vec<String>,
    #[serde(default = "default_required_manifest_fields")]
    pub required_manifest_fields: Vec<String>,
    #[serde(default = "default_required_package_fields")]
    pub required_package_fields: Vec<String>,
}

impl Default for ValidationSchema {
    fn default() -> Self {
        Self {
            required_directories: default_required_directories(),
            required_frameworks: default_required_frameworks(),
            required_templates: default_required_templates(),
            required_scripts: default_required_scripts(),
            required_manifest_fields: default_required_manifest_fields(),
            required_package_fields: default_required_package_fields(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_required_directories() -> Vec<String> {
    strings(&[SCRIPTS_DIR, FRAMEWORKS_DIR, TEMPLATES_DIR])
}

fn default_required_frameworks() -> Vec<String> {
    strings(&[
        "co-star.md",
        "risen.md",
        "rise.md",
        "tidd-ec.md",
        "rtf.md",
        "chain-of-thought.md",
        "chain-of-density.md",
    ])
}

fn default_required_templates() -> Vec<String> {
    strings(&[
        "co-star_template.txt",
        "risen_template.txt",
        "rise-ie_template.txt",
        "rise-ix_template.txt",
        "tidd-ec_template.txt",
        "rtf_template.txt",
        "hybrid_template.txt",
    ])
}

fn default_required_scripts() -> Vec<String> {
    strings(&["framework_analyzer.py", "prompt_evaluator.py"])
}

fn default_required_manifest_fields() -> Vec<String> {
    strings(&["name", "description"])
}

fn default_required_package_fields() -> Vec<String> {
    strings(&["name", "version", "description", "main", "keywords", "license"])
}

pub struct SkillValidator {
    schema: ValidationSchema,
}

impl SkillValidator {
    pub fn new(schema: ValidationSchema) -> Self {
        Self { schema }
    }

    /// Validate the bundle at `bundle_root` and the package descriptor at
    /// `package_root`. Read-only: the bundle is never mutated.
    ///
    /// Every check runs and accumulates findings; only a missing bundle
    /// root halts the pass, with exactly one finding.
    pub fn validate(&self, bundle_root: &Path, package_root: &Path) -> ValidationReport {
        let mut report = ValidationReport::default();

        if !bundle_root.exists() {
            report.error(format!(
                "Skill directory not found: {}",
                bundle_root.display()
            ));
            return report;
        }
        debug!("validating bundle at {}", bundle_root.display());

        self.check_manifest(bundle_root, &mut report);
        self.check_directories(bundle_root, &mut report);
        self.check_frameworks(bundle_root, &mut report);
        self.check_templates(bundle_root, &mut report);
        self.check_scripts(bundle_root, &mut report);
        self.check_package(package_root, &mut report);

        report
    }

    fn check_manifest(&self, bundle_root: &Path, report: &mut ValidationReport) {
        let path = bundle_root.join(MANIFEST_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                report.error(format!("{} not found", MANIFEST_FILE));
                return;
            }
        };

        let Some(header) = extract_frontmatter(&content) else {
            report.error(format!(
                "{} missing frontmatter (---...---)",
                MANIFEST_FILE
            ));
            return;
        };

        for field in &self.schema.required_manifest_fields {
            if !header.contains_key(field) {
                report.error(format!(
                    "{} missing required field: {}",
                    MANIFEST_FILE, field
                ));
            }
        }

        if let Some(name) = header.get("name") {
            if !NAME_PATTERN.is_match(name) {
                report.error(format!(
                    "Invalid skill name format: \"{}\" (use lowercase, numbers, hyphens only)",
                    name
                ));
            } else if name.len() > MAX_NAME_LEN {
                report.error(format!(
                    "Skill name too long: {} characters (max {})",
                    name.len(),
                    MAX_NAME_LEN
                ));
            }
        }

        if let Some(description) = header.get("description") {
            if description.len() > MAX_DESCRIPTION_LEN {
                report.error(format!(
                    "Description too long: {} characters (max {})",
                    description.len(),
                    MAX_DESCRIPTION_LEN
                ));
            }
        }

        if content.len() > MAX_MANIFEST_BYTES {
            report.warning(format!(
                "{} is quite large (> 100 KB). Consider splitting content.",
                MANIFEST_FILE
            ));
        }
    }

    fn check_directories(&self, bundle_root: &Path, report: &mut ValidationReport) {
        for dir in &self.schema.required_directories {
            if !bundle_root.join(dir).exists() {
                report.error(format!("Required directory missing: {}", dir));
            }
        }
    }

    fn check_frameworks(&self, bundle_root: &Path, report: &mut ValidationReport) {
        for framework in &self.schema.required_frameworks {
            let path = bundle_root.join(FRAMEWORKS_DIR).join(framework);
            match fs::metadata(&path) {
                Err(_) => {
                    report.error(format!("Framework file missing: {}", framework));
                }
                Ok(meta) => {
                    if meta.len() < MIN_FRAMEWORK_BYTES {
                        report.warning(format!(
                            "Framework {} seems small (< 5 KB)",
                            framework
                        ));
                    }
                }
            }
        }
    }

    fn check_templates(&self, bundle_root: &Path, report: &mut ValidationReport) {
        for template in &self.schema.required_templates {
            if !bundle_root.join(TEMPLATES_DIR).join(template).exists() {
                report.error(format!("Template file missing: {}", template));
            }
        }
    }

    fn check_scripts(&self, bundle_root: &Path, report: &mut ValidationReport) {
        for script in &self.schema.required_scripts {
            if !bundle_root.join(SCRIPTS_DIR).join(script).exists() {
                report.error(format!("Script file missing: {}", script));
            }
        }
    }

    fn check_package(&self, package_root: &Path, report: &mut ValidationReport) {
        let path = package_root.join(PACKAGE_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                report.error(format!("{} not found", PACKAGE_FILE));
                return;
            }
        };

        let descriptor: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                report.error(format!("{} is not valid JSON: {}", PACKAGE_FILE, err));
                return;
            }
        };

        for field in &self.schema.required_package_fields {
            let missing = match descriptor.get(field) {
                None | Some(serde_json::Value::Null) => true,
                Some(serde_json::Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            if missing {
                report.error(format!(
                    "{} missing required field: {}",
                    PACKAGE_FILE, field
                ));
            }
        }

        if let Some(version) = descriptor.get("version").and_then(|v| v.as_str()) {
            if !SEMVER_PATTERN.is_match(version) {
                report.error(format!(
                    "Invalid version format: {} (use semver: X.Y.Z)",
                    version
                ));
            }
        }

        if let Some(keywords) = descriptor.get("keywords").and_then(|v| v.as_array()) {
            let has_sentinel = keywords
                .iter()
                .any(|k| k.as_str() == Some(PACKAGE_KEYWORD));
            if !has_sentinel {
                report.warning(format!(
                    "{} keywords should include \"{}\"",
                    PACKAGE_FILE, PACKAGE_KEYWORD
                ));
            }
        }

        let has_files = descriptor
            .get("files")
            .and_then(|v| v.as_array())
            .map(|files| !files.is_empty())
            .unwrap_or(false);
        if !has_files {
            report.warning(format!(
                "{} should specify a \"files\" array for publishing",
                PACKAGE_FILE
            ));
        }
    }

    /// Print every finding plus a summary line.
    pub fn print_report(&self, report: &ValidationReport) {
        for finding in &report.findings {
            match finding.severity {
                Severity::Error => println!("❌ {}", finding.message),
                Severity::Warning => println!("⚠️  {}", finding.message),
            }
        }

        println!("{}", "=".repeat(50));
        let errors = report.error_count();
        let warnings = report.warning_count();
        if errors == 0 && warnings == 0 {
            println!("✨ All validation checks passed");
        } else if errors == 0 {
            println!("⚠️  Validation passed with {} warning(s)", warnings);
        } else {
            println!(
                "❌ Validation failed with {} error(s) and {} warning(s)",
                errors, warnings
            );
        }
    }
}

/// Parse the `---`-delimited key/value block at the top of a manifest.
/// Returns None when the block is absent or never closed. Lines without a
/// colon are skipped; everything after the closing delimiter is free-form
/// content and is not parsed.
fn extract_frontmatter(content: &str) -> Option<HashMap<String, String>> {
    let mut lines = content.lines();
    if lines.next()?.trim() != "---" {
        return None;
    }

    let mut fields = HashMap::new();
    for line in lines {
        if line.trim() == "---" {
            return Some(fields);
        }
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    None
}
