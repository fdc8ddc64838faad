//! Per-track scratch directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Prefix of every scratch directory name.
pub const SCRATCH_PREFIX: &str = "rtpad-";

/// A scratch directory owned by a single track.
///
/// The directory is only removed by [`ScratchSpace::remove`]; a track that
/// fails leaves its segments behind for inspection.
#[derive(Debug)]
pub struct ScratchSpace {
    dir: PathBuf,
}

impl ScratchSpace {
    /// Create `<root>/rtpad-<uuid>`.
    pub fn create(root: &Path) -> io::Result<Self> {
        let dir = root.join(format!("{}{}", SCRATCH_PREFIX, Uuid::new_v4()));
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Path of a named segment inside the directory.
    pub fn segment(&self, stem: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", stem, extension))
    }

    /// Delete the directory and everything in it.
    pub fn remove(self) -> io::Result<()> {
        fs::remove_dir_all(&self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn each_track_gets_its_own_directory() {
        let root = tempdir().unwrap();
        let a = ScratchSpace::create(root.path()).unwrap();
        let b = ScratchSpace::create(root.path()).unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().is_dir());
        assert!(a
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(SCRATCH_PREFIX));
    }

    #[test]
    fn segments_live_inside_and_remove_cleans_up() {
        let root = tempdir().unwrap();
        let scratch = ScratchSpace::create(root.path()).unwrap();
        let segment = scratch.segment("padding", "ts");
        fs::write(&segment, b"x").unwrap();

        assert_eq!(segment.parent(), Some(scratch.path()));
        assert!(segment.ends_with("padding.ts"));

        let dir = scratch.path().to_path_buf();
        scratch.remove().unwrap();
        assert!(!dir.exists());
    }
}
