pub mod error;
pub mod probe;
pub mod report;
pub mod types;
pub mod validator;

use std::io::Write;
use std::path::Path;
use anyhow::Result;
use log::{error, info, warn};

pub use error::EnvironmentError;
pub use probe::{DiskProbe, MemoryProbe, PathProbe};
pub use report::OutputFormat;
pub use types::{DirectoryRequirement, ExitStatus, ExpectedStructure, StructuralMismatch, ValidationReport};
pub use validator::{IoErrorPolicy, StructureValidator};

/// Configuration for one validation run
#[derive(Debug, Clone)]
pub struct ValidationConfig<'a> {
    /// Directory the expected paths are resolved against; `None` means the working directory
    pub root: Option<&'a Path>,
    /// Report format written to the output stream
    pub format: OutputFormat,
    /// Handling of I/O errors raised by existence checks
    pub io_policy: IoErrorPolicy,
}

impl Default for ValidationConfig<'_> {
    fn default() -> Self {
        Self {
            root: None,
            format: OutputFormat::Text,
            io_policy: IoErrorPolicy::Abort,
        }
    }
}

/// Main entry point: check the compiled-in layout on disk and write the report to `out`
pub fn validate_structure<W: Write + ?Sized>(config: ValidationConfig<'_>, out: &mut W) -> Result<ExitStatus> {
    validate_with(ExpectedStructure::default(), &DiskProbe, config, out)
}

/// Same as [`validate_structure`] with an explicit table and probe
pub fn validate_with<P, W>(
    structure: ExpectedStructure,
    probe: &P,
    config: ValidationConfig<'_>,
    out: &mut W,
) -> Result<ExitStatus>
where
    P: PathProbe + ?Sized,
    W: Write + ?Sized,
{
    info!("Starting structure validation with configuration:");
    info!("  Root: {}", config.root.map_or(".".into(), |r| r.display().to_string()));
    info!("  Format: {:?}", config.format);
    info!("  I/O error policy: {:?}", config.io_policy);

    let mut validator = StructureValidator::new(structure).with_io_policy(config.io_policy);
    if let Some(root) = config.root {
        match probe.exists(root) {
            Ok(true) => {}
            Ok(false) => return Err(abort(EnvironmentError::MissingRoot(root.to_path_buf()))),
            Err(e) if config.io_policy == IoErrorPolicy::TreatAsMissing => {
                warn!("Could not check root {}, continuing: {}", root.display(), e);
            }
            Err(e) => {
                return Err(abort(EnvironmentError::Probe {
                    path: root.to_path_buf(),
                    source: e,
                }));
            }
        }
        validator = validator.with_root(root);
    }

    let report = validator.validate(probe).map_err(abort)?;

    report::render(&report, config.format, out)?;
    Ok(report.exit_status())
}

fn abort(err: EnvironmentError) -> anyhow::Error {
    error!("Structure validation aborted: {}", err);
    err.into()
}
