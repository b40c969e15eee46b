use std::fmt;
use std::process::ExitCode;

/// One directory in the expected layout along with the files it must contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRequirement {
    pub path: String,
    pub files: Vec<String>,
}

/// Ordered table of required directories and, per directory, required files.
///
/// Iteration always follows declaration order so that two runs against the
/// same filesystem print the same lines in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedStructure {
    entries: Vec<DirectoryRequirement>,
}

const DEFAULT_LAYOUT: &[(&str, &[&str])] = &[
    ("infrastructure/docker", &["docker-compose.yml"]),
    ("infrastructure/kubernetes/base", &["namespace.yaml"]),
    ("infrastructure/kubernetes/configmaps", &[]),
    ("infrastructure/kubernetes/deployments", &[]),
    ("infrastructure/terraform", &["main.tf"]),
    ("services", &[]),
    ("edge-server/config", &["edge-config.yaml"]),
    ("shared", &[]),
    ("docs", &["PROJECT_CONTEXT.md", "PROJECT_STRUCTURE.md"]),
];

impl ExpectedStructure {
    /// Empty table, filled with [`ExpectedStructure::directory`]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn directory(mut self, path: &str, files: &[&str]) -> Self {
        self.entries.push(DirectoryRequirement {
            path: path.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    pub fn entries(&self) -> &[DirectoryRequirement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of existence checks a pass performs when every directory is present
    pub fn check_count(&self) -> usize {
        self.entries.iter().map(|e| 1 + e.files.len()).sum()
    }
}

impl Default for ExpectedStructure {
    /// The compiled-in project layout
    fn default() -> Self {
        DEFAULT_LAYOUT
            .iter()
            .fold(Self::new(), |table, &(dir, files)| table.directory(dir, files))
    }
}

/// A single discrepancy between the expected layout and the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralMismatch {
    MissingDirectory { path: String },
    MissingFile { directory: String, file: String },
}

impl StructuralMismatch {
    pub fn kind(&self) -> &'static str {
        match self {
            StructuralMismatch::MissingDirectory { .. } => "missing_directory",
            StructuralMismatch::MissingFile { .. } => "missing_file",
        }
    }

    /// Path of the missing entry relative to the validation root
    pub fn path(&self) -> String {
        match self {
            StructuralMismatch::MissingDirectory { path } => path.clone(),
            StructuralMismatch::MissingFile { directory, file } => format!("{}/{}", directory, file),
        }
    }
}

impl fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralMismatch::MissingDirectory { path } => write!(f, "Missing directory: {}", path),
            StructuralMismatch::MissingFile { directory, file } => {
                write!(f, "Missing file: {}/{}", directory, file)
            }
        }
    }
}

/// Findings of one validation pass, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    mismatches: Vec<StructuralMismatch>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mismatch: StructuralMismatch) {
        self.mismatches.push(mismatch);
    }

    pub fn mismatches(&self) -> &[StructuralMismatch] {
        &self.mismatches
    }

    pub fn is_success(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.mismatches.iter().map(ToString::to_string).collect()
    }

    pub fn missing_directories(&self) -> usize {
        self.mismatches
            .iter()
            .filter(|m| matches!(m, StructuralMismatch::MissingDirectory { .. }))
            .count()
    }

    pub fn missing_files(&self) -> usize {
        self.mismatches.len() - self.missing_directories()
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.is_success() {
            ExitStatus::Passed
        } else {
            ExitStatus::Failed
        }
    }
}

/// Process outcome of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Passed,
    Failed,
    EnvironmentError,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Passed => 0,
            ExitStatus::Failed => 1,
            ExitStatus::EnvironmentError => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
