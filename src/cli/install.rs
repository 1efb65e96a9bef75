use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::error::InstallError;
use crate::locator::{InstallTarget, Locator};
use crate::mirror;
use crate::validator::MANIFEST_FILE;

/// What an install attempt did.
#[derive(Debug)]
pub enum InstallOutcome {
    /// Destination already present and force not requested. Deliberately a
    /// success, not an error: re-running the installer is harmless.
    AlreadyInstalled(PathBuf),
    Installed {
        source: PathBuf,
        destination: PathBuf,
    },
}

/// The full install flow: resolve the destination, honor the idempotency
/// guarantee, locate the source, mirror it, then verify the manifest marker
/// landed. All failures abort immediately; a partially-copied tree is left
/// on disk for the operator to re-run with force.
pub fn install(
    locator: &Locator,
    cwd: &Path,
    home: &Path,
    project_scoped: bool,
    force: bool,
) -> crate::error::Result<InstallOutcome> {
    let destination = locator.resolve_destination(project_scoped, cwd, home);

    if destination.exists() && !force {
        return Ok(InstallOutcome::AlreadyInstalled(destination));
    }

    let source = locator.resolve_source(cwd)?;
    let target = InstallTarget {
        source: source.clone(),
        destination: destination.clone(),
        force,
    };
    mirror::mirror(&target)?;

    // The copy can succeed while the source bundle itself is incomplete.
    mirror::verify_marker(&destination, MANIFEST_FILE)?;
    debug!("verified {} at {}", MANIFEST_FILE, destination.display());

    Ok(InstallOutcome::Installed {
        source,
        destination,
    })
}

pub fn run(project_scoped: bool, force: bool, config_path: Option<String>) -> Result<()> {
    let config = Config::load_with_path(config_path)?;
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let home = dirs::home_dir().context("cannot determine home directory")?;

    let locator = Locator::new(&config.skill.name, &config.skill.package);

    match install(&locator, &cwd, &home, project_scoped, force) {
        Ok(InstallOutcome::AlreadyInstalled(destination)) => {
            println!("⚠️  {} is already installed", config.skill.name);
            println!("   Location: {}", destination.display());
            println!("   To reinstall, use: skillpack install --force");
            Ok(())
        }
        Ok(InstallOutcome::Installed {
            source,
            destination,
        }) => {
            println!("✅ Installed {} skill", config.skill.name);
            println!("   From: {}", source.display());
            println!("   To:   {}", destination.display());
            if project_scoped {
                println!("   The skill is only available in this project.");
                println!("   Consider committing .claude/skills/ so the team shares it.");
            } else {
                println!("   The skill is available in all your projects.");
            }
            Ok(())
        }
        Err(err) => Err(fail(err)),
    }
}

/// Surface the remediation hint before handing the error up for the exit.
fn fail(err: InstallError) -> anyhow::Error {
    if let Some(hint) = err.remediation() {
        println!("💡 {}", hint);
    }
    err.into()
}
