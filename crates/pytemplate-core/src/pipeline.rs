//! The configuration pipeline.
//!
//! Stages run strictly in order:
//!
//! 1. resolve the current package directory
//! 2. rename it to the new package name
//! 3. rewrite import references in the package and tests
//! 4. rewrite the manifest
//! 5. rewrite the README
//!
//! [`Configurator::plan`] runs stage 1 and reports what the rename will do, so a
//! caller can ask before an existing directory is deleted. [`Configurator::execute`]
//! runs the rest. The first failing stage stops the run; completed stages are not
//! rolled back.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::TemplateLayout;
use crate::error::Result;
use crate::manifest;
use crate::metadata::ProjectMetadata;
use crate::readme::ReadmeRewriter;
use crate::rename::{self, RenameOutcome};
use crate::resolver;
use crate::rules::RewriteReport;
use crate::sources::{self, SourceRewriteReport};

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvePackage,
    RenameDirectory,
    RewriteSources,
    RewriteManifest,
    RewriteReadme,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::ResolvePackage,
        Stage::RenameDirectory,
        Stage::RewriteSources,
        Stage::RewriteManifest,
        Stage::RewriteReadme,
    ];

    /// 1-based position in the pipeline.
    pub fn index(&self) -> u32 {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) as u32 + 1
    }

    pub fn total() -> u32 {
        Self::ALL.len() as u32
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResolvePackage => "package resolution",
            Self::RenameDirectory => "package rename",
            Self::RewriteSources => "source reference rewrite",
            Self::RewriteManifest => "manifest rewrite",
            Self::RewriteReadme => "README rewrite",
        };
        f.write_str(name)
    }
}

/// Receives progress notifications as stages run.
pub trait Reporter {
    fn stage_started(&mut self, _stage: Stage) {}
    fn stage_finished(&mut self, _stage: Stage, _detail: &str) {}
}

/// A reporter that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}

/// Result of the resolution stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub old_package_dir: PathBuf,
    pub old_package_name: String,
    /// Where the package directory will live after the rename.
    pub destination: PathBuf,
    /// An unrelated directory already occupies `destination` and will be deleted.
    pub overwrites_existing: bool,
}

/// Everything the pipeline changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub rename: RenameOutcome,
    pub sources: SourceRewriteReport,
    pub manifest: RewriteReport,
    pub readme: RewriteReport,
}

/// Runs the configuration pipeline against a project root.
pub struct Configurator {
    root: PathBuf,
    layout: TemplateLayout,
    readme: ReadmeRewriter,
}

impl Configurator {
    pub fn new(root: impl Into<PathBuf>, layout: TemplateLayout, readme: ReadmeRewriter) -> Self {
        Self {
            root: root.into(),
            layout,
            readme,
        }
    }

    fn path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Resolve the current package and work out what the rename will do.
    pub fn plan(&self, meta: &ProjectMetadata, reporter: &mut dyn Reporter) -> Result<Plan> {
        let stage = Stage::ResolvePackage;
        reporter.stage_started(stage);

        let src_dir = self.path(&self.layout.src_dir);
        let old_package_dir = resolver::resolve_package_dir(&src_dir, &self.layout.entry_marker)
            .map_err(|e| e.in_stage(stage))?;
        let old_package_name = resolver::package_name(&old_package_dir);
        rename::validate_package_name(&meta.package_name).map_err(|e| e.in_stage(stage))?;
        let destination = rename::destination(&old_package_dir, &meta.package_name);
        let overwrites_existing = destination != old_package_dir && destination.exists();

        reporter.stage_finished(stage, &format!("found package '{old_package_name}'"));
        Ok(Plan {
            old_package_dir,
            old_package_name,
            destination,
            overwrites_existing,
        })
    }

    /// Run the stages after resolution.
    pub fn execute(
        &self,
        plan: &Plan,
        meta: &ProjectMetadata,
        reporter: &mut dyn Reporter,
    ) -> Result<RunReport> {
        let new_name = meta.package_name.as_str();

        let stage = Stage::RenameDirectory;
        reporter.stage_started(stage);
        let rename = rename::rename_package_dir(&plan.old_package_dir, new_name)
            .map_err(|e| e.in_stage(stage))?;
        let detail = match &rename {
            RenameOutcome::Unchanged { .. } => format!("already named '{new_name}'"),
            RenameOutcome::Renamed { replaced: true, .. } => {
                format!("renamed to '{new_name}' (replaced existing directory)")
            }
            RenameOutcome::Renamed { .. } => format!("renamed to '{new_name}'"),
        };
        reporter.stage_finished(stage, &detail);

        let stage = Stage::RewriteSources;
        reporter.stage_started(stage);
        let scan_dirs = [
            rename.package_dir().to_path_buf(),
            self.path(&self.layout.tests_dir),
        ];
        let sources = sources::rewrite_references(
            &scan_dirs,
            &self.layout.source_extension,
            &plan.old_package_name,
            new_name,
        )
        .map_err(|e| e.in_stage(stage))?;
        reporter.stage_finished(
            stage,
            &format!(
                "{} of {} files updated",
                sources.files_changed.len(),
                sources.files_scanned
            ),
        );

        let stage = Stage::RewriteManifest;
        reporter.stage_started(stage);
        let manifest = manifest::rewrite_manifest(
            &self.path(&self.layout.manifest),
            meta,
            &plan.old_package_name,
        )
        .map_err(|e| e.in_stage(stage))?;
        reporter.stage_finished(stage, &rules_detail(&manifest));

        let stage = Stage::RewriteReadme;
        reporter.stage_started(stage);
        let readme = self
            .readme
            .rewrite(&self.path(&self.layout.readme), meta, &plan.old_package_name)
            .map_err(|e| e.in_stage(stage))?;
        reporter.stage_finished(stage, &rules_detail(&readme));

        Ok(RunReport {
            rename,
            sources,
            manifest,
            readme,
        })
    }

    /// [`plan`](Self::plan) then [`execute`](Self::execute).
    pub fn run(&self, meta: &ProjectMetadata, reporter: &mut dyn Reporter) -> Result<RunReport> {
        let plan = self.plan(meta, reporter)?;
        self.execute(&plan, meta, reporter)
    }
}

fn rules_detail(report: &RewriteReport) -> String {
    let applied: Vec<&str> = report.applied.iter().map(|(l, _)| l.as_str()).collect();
    if report.skipped.is_empty() {
        format!("updated {}", applied.join(", "))
    } else {
        format!(
            "updated {}; not present: {}",
            applied.join(", "),
            report.skipped.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigureError;

    const PYPROJECT: &str = r#"[project]
name = "python_template"
version = "0.3.1"
description = "A template for Python projects."
authors = [{name = "Your Name", email = "your.email@example.com"}]

[project.scripts]
pt = "python_template.cli:main"
"#;

    const README: &str = "# Python Template

A template for Python projects.

1. `git clone git@github.com:username/python-template.git`
2. `cd python-template`

Run `python -m python_template --help`.
";

    fn scaffold() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let pkg = root.join("src/python_template");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::create_dir_all(root.join("src/__pycache__")).unwrap();
        std::fs::create_dir_all(root.join("tests")).unwrap();
        std::fs::write(pkg.join("__main__.py"), "from python_template.cli import main\n\nraise SystemExit(main())\n").unwrap();
        std::fs::write(pkg.join("cli.py"), "from python_template.logging_utils import initialize_logging\n").unwrap();
        std::fs::write(
            root.join("tests/test_main.py"),
            "import python_template\nfrom python_template.cli import main_logic\n\ndef test_ok():\n    assert python_template.cli.main_logic()\n",
        )
        .unwrap();
        std::fs::write(root.join("pyproject.toml"), PYPROJECT).unwrap();
        std::fs::write(root.join("README.md"), README).unwrap();
        tmp
    }

    fn meta() -> ProjectMetadata {
        ProjectMetadata::new(
            "Ada",
            "ada@example.com",
            "git@github.com:ada/engine-notes.git",
            "engine_notes",
            "Engine Notes",
            "Notes on the analytical engine.",
        )
    }

    fn configurator(root: &Path) -> Configurator {
        Configurator::new(
            root,
            TemplateLayout::default(),
            ReadmeRewriter::builtin().unwrap(),
        )
    }

    #[derive(Default)]
    struct Recorder(Vec<(Stage, bool)>);

    impl Reporter for Recorder {
        fn stage_started(&mut self, stage: Stage) {
            self.0.push((stage, false));
        }
        fn stage_finished(&mut self, stage: Stage, _detail: &str) {
            self.0.push((stage, true));
        }
    }

    #[test]
    fn test_stage_indices() {
        assert_eq!(Stage::ResolvePackage.index(), 1);
        assert_eq!(Stage::RewriteReadme.index(), Stage::total());
    }

    #[test]
    fn test_full_run() {
        let tmp = scaffold();
        let root = tmp.path();
        let mut recorder = Recorder::default();

        let report = configurator(root).run(&meta(), &mut recorder).unwrap();

        assert_eq!(recorder.0.len(), 10);
        assert_eq!(recorder.0.first(), Some(&(Stage::ResolvePackage, false)));
        assert_eq!(recorder.0.last(), Some(&(Stage::RewriteReadme, true)));
        assert!(!root.join("src/python_template").exists());
        let pkg = root.join("src/engine_notes");
        assert_eq!(report.rename.package_dir(), pkg.as_path());
        assert_eq!(report.sources.files_changed.len(), 3);
        assert_eq!(
            std::fs::read_to_string(pkg.join("__main__.py")).unwrap(),
            "from engine_notes.cli import main\n\nraise SystemExit(main())\n"
        );
        assert_eq!(
            std::fs::read_to_string(root.join("tests/test_main.py")).unwrap(),
            "import engine_notes\nfrom engine_notes.cli import main_logic\n\ndef test_ok():\n    assert engine_notes.cli.main_logic()\n"
        );

        let fields = manifest::read_fields(&root.join("pyproject.toml")).unwrap();
        assert_eq!(fields.name.as_deref(), Some("engine_notes"));
        assert_eq!(fields.version.as_deref(), Some("0.0.0"));
        let pyproject = std::fs::read_to_string(root.join("pyproject.toml")).unwrap();
        assert!(pyproject.contains(r#"pt = "engine_notes.cli:main""#));

        let readme = std::fs::read_to_string(root.join("README.md")).unwrap();
        assert!(readme.starts_with("# Engine Notes\n\nNotes on the analytical engine.\n"));
        assert!(readme.contains("`cd engine-notes`"));
        assert!(readme.contains("`python -m engine_notes --help`"));
    }

    #[test]
    fn test_second_run_is_noop_rename() {
        let tmp = scaffold();
        let configurator = configurator(tmp.path());
        configurator.run(&meta(), &mut NoopReporter).unwrap();

        let plan = configurator.plan(&meta(), &mut NoopReporter).unwrap();
        assert_eq!(plan.old_package_name, "engine_notes");
        assert!(!plan.overwrites_existing);

        let report = configurator.execute(&plan, &meta(), &mut NoopReporter).unwrap();
        assert!(matches!(report.rename, RenameOutcome::Unchanged { .. }));
        assert!(report.sources.files_changed.is_empty());
        assert!(!report.manifest.changed);
    }

    #[test]
    fn test_plan_detects_existing_destination() {
        let tmp = scaffold();
        std::fs::create_dir_all(tmp.path().join("src/engine_notes")).unwrap();

        let plan = configurator(tmp.path()).plan(&meta(), &mut NoopReporter).unwrap();
        assert_eq!(plan.old_package_name, "python_template");
        assert!(plan.overwrites_existing);
    }

    #[test]
    fn test_missing_package_aborts_before_changes() {
        let tmp = scaffold();
        std::fs::remove_file(tmp.path().join("src/python_template/__main__.py")).unwrap();
        let mut recorder = Recorder::default();

        let err = configurator(tmp.path()).run(&meta(), &mut recorder).unwrap_err();
        match err {
            ConfigureError::StageFailed { stage, source } => {
                assert_eq!(stage, Stage::ResolvePackage);
                assert!(matches!(*source, ConfigureError::PackageNotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(recorder.0, vec![(Stage::ResolvePackage, false)]);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("pyproject.toml")).unwrap(),
            PYPROJECT
        );
    }

    #[test]
    fn test_empty_package_name_rejected_by_plan() {
        let tmp = scaffold();
        let mut meta = meta();
        meta.package_name = String::new();

        let err = configurator(tmp.path()).run(&meta, &mut NoopReporter).unwrap_err();
        match err {
            ConfigureError::StageFailed { stage, source } => {
                assert_eq!(stage, Stage::ResolvePackage);
                assert!(matches!(*source, ConfigureError::InvalidPackageName { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(tmp.path().join("src/python_template/__main__.py").is_file());
        assert!(tmp.path().join("src/__pycache__").is_dir());
    }

    #[test]
    fn test_manifest_failure_stops_before_readme() {
        let tmp = scaffold();
        let broken = PYPROJECT.replace("authors = [{name = \"Your Name\", email = \"your.email@example.com\"}]\n", "");
        std::fs::write(tmp.path().join("pyproject.toml"), &broken).unwrap();

        let err = configurator(tmp.path()).run(&meta(), &mut NoopReporter).unwrap_err();
        assert!(matches!(
            err,
            ConfigureError::StageFailed {
                stage: Stage::RewriteManifest,
                ..
            }
        ));
        // earlier stages are not rolled back
        assert!(tmp.path().join("src/engine_notes").is_dir());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("README.md")).unwrap(),
            README
        );
    }
}
