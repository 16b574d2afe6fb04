// Standard Library Imports
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

// External Crate Imports
use color_eyre::eyre::{OptionExt, Result};
use serde::{Deserialize, Serialize};

// Public API ==========================================================================================================

/// Files with this suffix are an operating system artefact (macOS folder metadata) and are never sent over the wire
pub const IGNORED_SUFFIX: &str = ".DS_Store";

/// The metadata handed back to the host once an upload has been confirmed. An empty `filename` means that there is
/// nothing waiting to be confirmed
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub filename: String,
    pub content_type: String,
}

impl SelectedFile {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filename.is_empty()
    }
}

impl From<&LocalFile> for SelectedFile {
    fn from(file: &LocalFile) -> Self {
        Self {
            filename: file.name().to_owned(),
            content_type: file.content_type().to_owned(),
        }
    }
}

/// A file picked by the user, not yet read into memory
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    content_type: String,
    size: Option<u64>,
}

impl LocalFile {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(OsStr::to_str)
            .ok_or_eyre("the selected path doesn't end in a (UTF-8) file name")?
            .to_owned();
        // NOTE: Browsers derive `File.type` from the extension alone and report an empty string when they don't know
        // it, so this does the same rather than sniffing the file contents
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_owned();
        let size = fs::metadata(path).ok().map(|metadata| metadata.len());

        Ok(Self::from_parts(path, name, content_type, size))
    }

    #[must_use]
    pub fn from_parts(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        content_type: impl Into<String>,
        size: Option<u64>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            content_type: content_type.into(),
            size,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        self.size
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.name.ends_with(IGNORED_SUFFIX)
    }
}

// Unit Tests ==========================================================================================================
