//! Package self-test: quick presence and shape checks over the whole
//! package tree, with a pass/fail tally.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use crate::config::Config;
use crate::validator::{
    FRAMEWORKS_DIR, MANIFEST_FILE, PACKAGE_FILE, PACKAGE_KEYWORD, SCRIPTS_DIR, TEMPLATES_DIR,
};

type CheckFn = Box<dyn Fn(&Path) -> Result<()>>;

pub fn run(package_root: Option<String>, config_path: Option<String>) -> Result<()> {
    let config = Config::load_with_path(config_path)?;
    let root = match package_root {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?,
    };

    println!("🧪 Running checks for the {} package...\n", config.skill.name);

    let mut passed = 0;
    let mut failed = 0;
    for (name, check) in build_checks(&config) {
        match check(&root) {
            Ok(()) => {
                println!("✅ {}", name);
                passed += 1;
            }
            Err(err) => {
                println!("❌ {}", name);
                println!("   {}", err);
                failed += 1;
            }
        }
    }

    println!("\n{}", "=".repeat(50));
    println!("Checks completed: {} total", passed + failed);
    println!("✅ Passed: {}", passed);
    if failed > 0 {
        println!("❌ Failed: {}", failed);
        bail!("{} check(s) failed", failed);
    }
    println!("\n✨ All checks passed!");
    Ok(())
}

fn exists(root: &Path, relative: &str) -> Result<()> {
    if root.join(relative).exists() {
        Ok(())
    } else {
        Err(anyhow!("{} not found", relative))
    }
}

fn read_descriptor(root: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(root.join(PACKAGE_FILE))?;
    Ok(serde_json::from_str(&content)?)
}

fn build_checks(config: &Config) -> Vec<(String, CheckFn)> {
    let skill = config.skill.name.clone();
    let mut checks: Vec<(String, CheckFn)> = Vec::new();

    checks.push((
        format!("{} exists", PACKAGE_FILE),
        Box::new(|root| exists(root, PACKAGE_FILE)),
    ));
    checks.push((
        format!("{} is valid JSON", PACKAGE_FILE),
        Box::new(|root| read_descriptor(root).map(|_| ())),
    ));

    let skill_dir = skill.clone();
    checks.push((
        format!("{} exists", MANIFEST_FILE),
        Box::new(move |root| {
            exists(root, &format!("{}/{}", skill_dir, MANIFEST_FILE))
        }),
    ));

    for doc in ["LICENSE", "README.md", "CHANGELOG.md"] {
        checks.push((
            format!("{} exists", doc),
            Box::new(move |root| exists(root, doc)),
        ));
    }

    let frameworks = config.schema.required_frameworks.clone();
    let skill_dir = skill.clone();
    checks.push((
        "all framework files exist".to_string(),
        Box::new(move |root| {
            for framework in &frameworks {
                exists(
                    root,
                    &format!("{}/{}/{}", skill_dir, FRAMEWORKS_DIR, framework),
                )?;
            }
            Ok(())
        }),
    ));

    let templates = config.schema.required_templates.clone();
    let skill_dir = skill.clone();
    checks.push((
        "all template files exist".to_string(),
        Box::new(move |root| {
            for template in &templates {
                exists(
                    root,
                    &format!("{}/{}/{}", skill_dir, TEMPLATES_DIR, template),
                )?;
            }
            Ok(())
        }),
    ));

    let scripts = config.schema.required_scripts.clone();
    let skill_dir = skill.clone();
    checks.push((
        "all script files exist".to_string(),
        Box::new(move |root| {
            for script in &scripts {
                exists(root, &format!("{}/{}/{}", skill_dir, SCRIPTS_DIR, script))?;
            }
            Ok(())
        }),
    ));

    let fields = config.schema.required_package_fields.clone();
    checks.push((
        format!("{} has required fields", PACKAGE_FILE),
        Box::new(move |root| {
            let descriptor = read_descriptor(root)?;
            for field in &fields {
                if descriptor.get(field).is_none() {
                    bail!("missing field: {}", field);
                }
            }
            Ok(())
        }),
    ));

    checks.push((
        format!("{} keywords include \"{}\"", PACKAGE_FILE, PACKAGE_KEYWORD),
        Box::new(|root| {
            let descriptor = read_descriptor(root)?;
            let found = descriptor
                .get("keywords")
                .and_then(|v| v.as_array())
                .map(|keywords| {
                    keywords.iter().any(|k| k.as_str() == Some(PACKAGE_KEYWORD))
                })
                .unwrap_or(false);
            if !found {
                bail!("missing \"{}\" keyword", PACKAGE_KEYWORD);
            }
            Ok(())
        }),
    ));

    checks
}
