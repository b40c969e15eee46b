use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of the environment itself, as opposed to a structural mismatch.
/// Aborts the validation pass.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("cannot check {}: {}", .path.display(), .source)]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("validation root does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
}
