use std::path::{Path, PathBuf};

/// One entry in the track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// Text shown in the list and in error dialogs.
    pub name: String,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Build a track whose list name is `path` relative to `root`.
    pub fn relative_to(path: &Path, root: &Path) -> Self {
        let name = path
            .strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string();
        Self {
            path: path.to_path_buf(),
            name,
        }
    }
}
