use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use log::trace;

/// Existence check against some filesystem
pub trait PathProbe {
    /// Returns `Ok(false)` when nothing lives at `path` and `Err` when the
    /// answer could not be determined.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

impl<P: PathProbe + ?Sized> PathProbe for &P {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        (**self).exists(path)
    }
}

/// Probe backed by the real filesystem metadata
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskProbe;

impl PathProbe for DiskProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(_) => Ok(true),
            // NotADirectory: a regular file sits where a parent directory should be
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => {
                trace!("Metadata lookup failed for {}: {}", path.display(), e);
                Err(e)
            }
        }
    }
}

fn is_absent(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}

/// In-memory filesystem for tests and dry runs.
///
/// Adding a path also makes every ancestor of it exist, the way creating a
/// file on disk requires its parents.
#[derive(Debug, Default, Clone)]
pub struct MemoryProbe {
    paths: HashSet<PathBuf>,
    failures: HashMap<PathBuf, io::ErrorKind>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.insert(path);
        self
    }

    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.insert(path);
        }
        self
    }

    /// Make lookups of `path` fail with `kind`
    pub fn with_failure<P: AsRef<Path>>(mut self, path: P, kind: io::ErrorKind) -> Self {
        self.failures.insert(path.as_ref().to_path_buf(), kind);
        self
    }

    pub fn insert<P: AsRef<Path>>(&mut self, path: P) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.paths.insert(ancestor.to_path_buf());
        }
    }

    pub fn remove<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        self.paths.retain(|p| !p.starts_with(path));
    }
}

impl PathProbe for MemoryProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        if let Some(kind) = self.failures.get(path) {
            return Err(io::Error::new(*kind, format!("simulated failure for {}", path.display())));
        }
        Ok(self.paths.contains(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_disk_probe_existing_and_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("present.txt");
        File::create(&file_path).expect("Failed to create file");

        let probe = DiskProbe;
        assert!(probe.exists(temp_dir.path()).unwrap());
        assert!(probe.exists(&file_path).unwrap());
        assert!(!probe.exists(&temp_dir.path().join("absent.txt")).unwrap());
    }

    #[test]
    fn test_disk_probe_file_as_parent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("docs");
        File::create(&file_path).expect("Failed to create file");

        // `docs` is a regular file, so nothing can live beneath it
        let nested = file_path.join("PROJECT_CONTEXT.md");
        assert!(!DiskProbe.exists(&nested).unwrap());
    }

    #[test]
    fn test_memory_probe_ancestors() {
        let probe = MemoryProbe::new().with_path("infrastructure/docker/docker-compose.yml");
        assert!(probe.exists(Path::new("infrastructure")).unwrap());
        assert!(probe.exists(Path::new("infrastructure/docker")).unwrap());
        assert!(probe.exists(Path::new("infrastructure/docker/docker-compose.yml")).unwrap());
        assert!(!probe.exists(Path::new("infrastructure/terraform")).unwrap());
    }

    #[test]
    fn test_memory_probe_remove_subtree() {
        let mut probe = MemoryProbe::new().with_paths(["docs/PROJECT_CONTEXT.md", "shared"]);
        probe.remove("docs");
        assert!(!probe.exists(Path::new("docs")).unwrap());
        assert!(!probe.exists(Path::new("docs/PROJECT_CONTEXT.md")).unwrap());
        assert!(probe.exists(Path::new("shared")).unwrap());
    }

    #[test]
    fn test_memory_probe_failure() {
        let probe = MemoryProbe::new()
            .with_path("docs")
            .with_failure("docs", io::ErrorKind::PermissionDenied);
        let err = probe.exists(Path::new("docs")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
