//! Renaming the package directory in place.

use std::path::{Component, Path, PathBuf};

use crate::error::{ConfigureError, Result};

/// What [`rename_package_dir`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The directory already had the requested name.
    Unchanged { dir: PathBuf },
    /// The directory was moved. `replaced` is true when an existing directory at
    /// the destination was deleted first.
    Renamed {
        from: PathBuf,
        to: PathBuf,
        replaced: bool,
    },
}

impl RenameOutcome {
    /// Location of the package directory after the rename.
    pub fn package_dir(&self) -> &Path {
        match self {
            Self::Unchanged { dir } => dir,
            Self::Renamed { to, .. } => to,
        }
    }
}

/// Check that `new_name` names a single directory entry.
///
/// Empty names, `.`, `..` and anything containing a path separator would resolve
/// to the parent directory or somewhere outside it.
pub fn validate_package_name(new_name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(ConfigureError::InvalidPackageName {
            name: new_name.to_string(),
            reason,
        })
    };
    if new_name.is_empty() {
        return invalid("name is empty");
    }
    if new_name.contains(['/', '\\']) {
        return invalid("name contains a path separator");
    }
    let mut components = Path::new(new_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => invalid("name does not denote a single directory"),
    }
}

/// Destination path for renaming `package_dir` to `new_name`, next to the original.
pub fn destination(package_dir: &Path, new_name: &str) -> PathBuf {
    package_dir
        .parent()
        .map(|parent| parent.join(new_name))
        .unwrap_or_else(|| PathBuf::from(new_name))
}

/// Rename `package_dir` to `new_name`.
///
/// A no-op when the names already match. Otherwise any existing directory at the
/// destination is removed first. The removal is irreversible. Names rejected by
/// [`validate_package_name`] fail before anything on disk is touched.
pub fn rename_package_dir(package_dir: &Path, new_name: &str) -> Result<RenameOutcome> {
    validate_package_name(new_name)?;
    let to = destination(package_dir, new_name);
    if to == package_dir {
        tracing::info!(dir = %package_dir.display(), "package directory already named {new_name}");
        return Ok(RenameOutcome::Unchanged {
            dir: package_dir.to_path_buf(),
        });
    }

    let replaced = to.exists();
    if replaced {
        tracing::warn!(dir = %to.display(), "removing existing destination directory");
        std::fs::remove_dir_all(&to).map_err(|e| ConfigureError::RenameFailed {
            from: package_dir.to_path_buf(),
            to: to.clone(),
            source: e,
        })?;
    }

    std::fs::rename(package_dir, &to).map_err(|e| ConfigureError::RenameFailed {
        from: package_dir.to_path_buf(),
        to: to.clone(),
        source: e,
    })?;
    tracing::info!(from = %package_dir.display(), to = %to.display(), "renamed package directory");

    Ok(RenameOutcome::Renamed {
        from: package_dir.to_path_buf(),
        to,
        replaced,
    })
}
