//! Source and destination resolution for a skill installation.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::debug;

use crate::config::{SKILLS_DIR, TOOL_DIR};
use crate::error::{InstallError, Result};
use crate::util::run_cmd_with_timeout;

/// Timeout for the global package-root lookup (seconds).
const GLOBAL_ROOT_TIMEOUT_SECS: u64 = 10;

/// A resolved installation: where to copy from, where to copy to.
/// Built once per invocation and immutable afterwards.
#[derive(Debug, Clone)]
pub struct InstallTarget {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub force: bool,
}

type GlobalRootQuery = Box<dyn Fn() -> Option<PathBuf>>;

/// Resolves which candidate source directory holds the skill files and
/// where they should be installed.
pub struct Locator {
    skill_name: String,
    package_name: String,
    global_root: GlobalRootQuery,
}

impl Locator {
    pub fn new(skill_name: &str, package_name: &str) -> Self {
        Self {
            skill_name: skill_name.to_string(),
            package_name: package_name.to_string(),
            global_root: Box::new(npm_global_root),
        }
    }

    /// Replace the global package-root lookup. Tests stub this to avoid
    /// shelling out.
    #[allow(dead_code)]
    pub fn with_global_root(mut self, query: impl Fn() -> Option<PathBuf> + 'static) -> Self {
        self.global_root = Box::new(query);
        self
    }

    /// Pick the skill source directory. Candidates, in order: the project's
    /// dependency tree, the global package root, then a path next to the
    /// running binary (development fallback). The first one that exists on
    /// disk wins.
    pub fn resolve_source(&self, cwd: &Path) -> Result<PathBuf> {
        let local = cwd
            .join("node_modules")
            .join(&self.package_name)
            .join(&self.skill_name);
        if local.exists() {
            debug!("using project-local source: {}", local.display());
            return Ok(local);
        }

        // Best-effort: a failed lookup just skips this candidate.
        if let Some(root) = (self.global_root)() {
            let global = root.join(&self.package_name).join(&self.skill_name);
            if global.exists() {
                debug!("using global source: {}", global.display());
                return Ok(global);
            }
        }

        let fallback = dev_fallback(&self.skill_name).unwrap_or(local);
        if fallback.exists() {
            debug!("using development fallback source: {}", fallback.display());
            return Ok(fallback);
        }

        Err(InstallError::SourceNotFound { path: fallback })
    }

    /// Where the skill lands. A pure function of the scope flag; no
    /// filesystem access happens here.
    pub fn resolve_destination(&self, project_scoped: bool, cwd: &Path, home: &Path) -> PathBuf {
        let base = if project_scoped { cwd } else { home };
        base.join(TOOL_DIR).join(SKILLS_DIR).join(&self.skill_name)
    }
}

/// Sibling of the installed binary's directory, for running straight out of
/// a source checkout.
fn dev_fallback(skill_name: &str) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("..").join(skill_name))
}

/// Ask npm for its global package root. Any failure (binary missing,
/// non-zero exit, timeout, unreadable output) yields None.
fn npm_global_root() -> Option<PathBuf> {
    let mut cmd = Command::new("npm");
    cmd.args(["root", "-g"]);
    let output = run_cmd_with_timeout(cmd, Duration::from_secs(GLOBAL_ROOT_TIMEOUT_SECS)).ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn locator() -> Locator {
        Locator::new("my-skill", "my-package").with_global_root(|| None)
    }

    #[test]
    fn test_project_local_candidate_wins() {
        let tmp = TempDir::new().unwrap();
        let local = tmp
            .path()
            .join("node_modules")
            .join("my-package")
            .join("my-skill");
        fs::create_dir_all(&local).unwrap();

        let resolved = locator().resolve_source(tmp.path()).unwrap();
        assert_eq!(resolved, local);
    }

    #[test]
    fn test_global_candidate_used_when_local_absent() {
        let tmp = TempDir::new().unwrap();
        let global_root = tmp.path().join("global");
        let global = global_root.join("my-package").join("my-skill");
        fs::create_dir_all(&global).unwrap();

        let root = global_root.clone();
        let locator = Locator::new("my-skill", "my-package").with_global_root(move || Some(root.clone()));

        let cwd = TempDir::new().unwrap();
        let resolved = locator.resolve_source(cwd.path()).unwrap();
        assert_eq!(resolved, global);
    }

    #[test]
    fn test_local_preferred_over_global() {
        let tmp = TempDir::new().unwrap();
        let local = tmp
            .path()
            .join("node_modules")
            .join("my-package")
            .join("my-skill");
        fs::create_dir_all(&local).unwrap();

        let global_root = tmp.path().join("global");
        let global = global_root.join("my-package").join("my-skill");
        fs::create_dir_all(&global).unwrap();

        let root = global_root.clone();
        let locator = Locator::new("my-skill", "my-package").with_global_root(move || Some(root.clone()));
        let resolved = locator.resolve_source(tmp.path()).unwrap();
        assert_eq!(resolved, local);
    }

    #[test]
    fn test_failed_global_query_is_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let result = locator().resolve_source(tmp.path());
        // No candidate exists anywhere; the error carries the attempted path.
        assert!(matches!(
            result,
            Err(InstallError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_source_not_found_names_a_path() {
        let tmp = TempDir::new().unwrap();
        let err = locator().resolve_source(tmp.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("looked in"));
    }

    #[test]
    fn test_destination_project_scoped() {
        let cwd = Path::new("/work/project");
        let home = Path::new("/home/user");
        let dest = locator().resolve_destination(true, cwd, home);
        assert_eq!(
            dest,
            Path::new("/work/project/.claude/skills/my-skill")
        );
    }

    #[test]
    fn test_destination_user_scoped() {
        let cwd = Path::new("/work/project");
        let home = Path::new("/home/user");
        let dest = locator().resolve_destination(false, cwd, home);
        assert_eq!(dest, Path::new("/home/user/.claude/skills/my-skill"));
    }
}
