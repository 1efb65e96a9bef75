//! Typed failures for the install engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InstallError>;

/// Everything that can go wrong between locating a skill source tree and
/// verifying the installed copy.
#[derive(Debug, Error)]
pub enum InstallError {
    /// No candidate source location contained the skill files.
    #[error("could not find the skill files (looked in: {})", path.display())]
    SourceNotFound { path: PathBuf },

    /// The filesystem refused access while preparing or writing the destination.
    #[error("permission denied: {}", path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure during the copy.
    #[error("failed to copy {}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The copy finished without error but the manifest is missing from the
    /// destination root, which means the source bundle itself is incomplete.
    #[error("SKILL.md not found in {} after installation", path.display())]
    Verification { path: PathBuf },
}

impl InstallError {
    /// Classify an I/O failure at `path`. Permission denials get their own
    /// variant so the caller can print a scope-specific remediation hint.
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            InstallError::Permission { path, source }
        } else {
            InstallError::Copy { path, source }
        }
    }

    /// Remediation hint for the user, when one applies.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            InstallError::SourceNotFound { .. } => {
                Some("Try reinstalling the package that ships the skill")
            }
            InstallError::Permission { .. } => Some(
                "Retry with elevated privileges (e.g. sudo), or install into the \
                 current project instead: skillpack install --project",
            ),
            InstallError::Verification { .. } => {
                Some("The source bundle looks corrupt; reinstall the package and retry")
            }
            InstallError::Copy { .. } => None,
        }
    }
}
