//! Discovery of the scaffold's package directory.

use std::path::{Path, PathBuf};

use crate::error::{ConfigureError, Result};

/// Find the package directory under `src_dir`.
///
/// Candidates are the immediate child directories whose names do not start with
/// `.` or `_` and that contain `entry_marker`. Children are visited in name order,
/// so when several qualify the result is still deterministic. A missing `src_dir`
/// is reported as [`ConfigureError::PackageNotFound`]; any other failure to list it
/// keeps the I/O cause.
pub fn resolve_package_dir(src_dir: &Path, entry_marker: &str) -> Result<PathBuf> {
    let not_found = || ConfigureError::PackageNotFound {
        src_dir: src_dir.to_path_buf(),
    };

    let entries = std::fs::read_dir(src_dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => not_found(),
        _ => ConfigureError::ReadFile {
            path: src_dir.to_path_buf(),
            source: e,
        },
    })?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| !name.starts_with('.') && !name.starts_with('_'))
        })
        .collect();
    candidates.sort();

    let found = candidates
        .into_iter()
        .find(|dir| dir.join(entry_marker).is_file())
        .ok_or_else(not_found)?;

    tracing::debug!(package_dir = %found.display(), "resolved package directory");
    Ok(found)
}

/// The package name of a resolved package directory.
pub fn package_name(package_dir: &Path) -> String {
    package_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_package(src: &Path, name: &str, with_marker: bool) {
        let dir = src.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        if with_marker {
            std::fs::write(dir.join("__main__.py"), "").unwrap();
        }
    }

    #[test]
    fn test_resolves_single_package() {
        let tmp = tempfile::tempdir().unwrap();
        make_package(tmp.path(), "python_template", true);

        let found = resolve_package_dir(tmp.path(), "__main__.py").unwrap();
        assert_eq!(found, tmp.path().join("python_template"));
        assert_eq!(package_name(&found), "python_template");
    }

    #[test]
    fn test_skips_hidden_and_private() {
        let tmp = tempfile::tempdir().unwrap();
        make_package(tmp.path(), ".cache", true);
        make_package(tmp.path(), "__pycache__", true);
        make_package(tmp.path(), "_internal", true);
        make_package(tmp.path(), "real_pkg", true);

        let found = resolve_package_dir(tmp.path(), "__main__.py").unwrap();
        assert_eq!(package_name(&found), "real_pkg");
    }

    #[test]
    fn test_requires_entry_marker() {
        let tmp = tempfile::tempdir().unwrap();
        make_package(tmp.path(), "aaa_no_marker", false);
        make_package(tmp.path(), "zzz_pkg", true);

        let found = resolve_package_dir(tmp.path(), "__main__.py").unwrap();
        assert_eq!(package_name(&found), "zzz_pkg");
    }

    #[test]
    fn test_multiple_candidates_first_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        make_package(tmp.path(), "beta", true);
        make_package(tmp.path(), "alpha", true);

        let found = resolve_package_dir(tmp.path(), "__main__.py").unwrap();
        assert_eq!(package_name(&found), "alpha");
    }

    #[test]
    fn test_ignores_plain_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("setup.py"), "").unwrap();
        assert!(matches!(
            resolve_package_dir(tmp.path(), "__main__.py"),
            Err(ConfigureError::PackageNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_src_dir() {
        let result = resolve_package_dir(Path::new("/tmp/nonexistent_pytemplate_src"), "__main__.py");
        assert!(matches!(result, Err(ConfigureError::PackageNotFound { .. })));
    }

    #[test]
    fn test_unlistable_src_dir_keeps_io_cause() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        std::fs::write(&src, "not a directory").unwrap();

        match resolve_package_dir(&src, "__main__.py") {
            Err(ConfigureError::ReadFile { path, source }) => {
                assert_eq!(path, src);
                assert_ne!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
