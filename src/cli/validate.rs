use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::config::Config;
use crate::validator::SkillValidator;

/// Validate the bundle and the package descriptor next to it.
/// Exit status is decided purely by the error count; warnings never fail.
pub fn run(bundle: Option<String>, config_path: Option<String>) -> Result<()> {
    let config = Config::load_with_path(config_path)?;

    let bundle_root = match bundle {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?.join(&config.skill.name),
    };
    let package_root = bundle_root
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("🔍 Validating skill bundle: {}\n", bundle_root.display());

    let validator = SkillValidator::new(config.schema);
    let report = validator.validate(&bundle_root, &package_root);
    validator.print_report(&report);

    if !report.passed() {
        bail!("{} validation error(s) found", report.error_count());
    }
    Ok(())
}
