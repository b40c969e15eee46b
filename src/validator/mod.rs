use std::path::{Path, PathBuf};
use log::{debug, info, trace, warn};

use crate::error::EnvironmentError;
use crate::probe::PathProbe;
use crate::types::{ExpectedStructure, StructuralMismatch, ValidationReport};

/// What to do when an existence check fails with an I/O error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IoErrorPolicy {
    /// Stop the pass and surface an [`EnvironmentError`]
    #[default]
    Abort,
    /// Count the path as missing
    TreatAsMissing,
}

/// Checks an [`ExpectedStructure`] against a filesystem.
///
/// Every directory and file is checked in declaration order and all
/// mismatches are collected, so one run reports everything that is wrong.
/// Files under a missing directory are not checked.
#[derive(Debug, Clone)]
pub struct StructureValidator {
    structure: ExpectedStructure,
    root: PathBuf,
    io_policy: IoErrorPolicy,
}

impl StructureValidator {
    pub fn new(structure: ExpectedStructure) -> Self {
        Self {
            structure,
            root: PathBuf::new(),
            io_policy: IoErrorPolicy::default(),
        }
    }

    /// Resolve table entries against `root` instead of the working directory
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_io_policy(mut self, policy: IoErrorPolicy) -> Self {
        self.io_policy = policy;
        self
    }

    /// Run a single pass and return the findings.
    ///
    /// Only reads from `probe`. Fails only when a check errors and the policy
    /// is [`IoErrorPolicy::Abort`].
    pub fn validate<P: PathProbe + ?Sized>(&self, probe: &P) -> Result<ValidationReport, EnvironmentError> {
        debug!(
            "Validating {} directories ({} checks) under {}",
            self.structure.len(),
            self.structure.check_count(),
            self.display_root()
        );

        if self.structure.is_empty() {
            warn!("Expected structure is empty, nothing to check");
        }

        let mut report = ValidationReport::new();

        for entry in self.structure.entries() {
            let dir_path = self.root.join(&entry.path);
            if !self.check(probe, &dir_path)? {
                debug!("Missing directory: {}", dir_path.display());
                report.push(StructuralMismatch::MissingDirectory {
                    path: entry.path.clone(),
                });
                continue;
            }
            trace!("Found directory: {}", dir_path.display());

            for file in &entry.files {
                let file_path = dir_path.join(file);
                if self.check(probe, &file_path)? {
                    trace!("  Found file: {}", file_path.display());
                } else {
                    debug!("Missing file: {}", file_path.display());
                    report.push(StructuralMismatch::MissingFile {
                        directory: entry.path.clone(),
                        file: file.clone(),
                    });
                }
            }
        }

        info!(
            "Structure check complete: {} missing directories, {} missing files",
            report.missing_directories(),
            report.missing_files()
        );

        Ok(report)
    }

    fn check<P: PathProbe + ?Sized>(&self, probe: &P, path: &Path) -> Result<bool, EnvironmentError> {
        match probe.exists(path) {
            Ok(found) => Ok(found),
            Err(e) => match self.io_policy {
                IoErrorPolicy::TreatAsMissing => {
                    warn!("Could not check {}, treating as missing: {}", path.display(), e);
                    Ok(false)
                }
                IoErrorPolicy::Abort => Err(EnvironmentError::Probe {
                    path: path.to_path_buf(),
                    source: e,
                }),
            },
        }
    }

    fn display_root(&self) -> String {
        if self.root.as_os_str().is_empty() {
            ".".to_string()
        } else {
            self.root.display().to_string()
        }
    }
}
