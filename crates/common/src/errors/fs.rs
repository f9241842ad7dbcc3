use std::{
    io,
    path::{Path, PathBuf},
};

/// Various error variants for `fs` operations that serve as an addition to the io::Error which
/// does not provide any information about the path.
#[derive(Debug, thiserror::Error)]
pub enum FsPathError {
    /// Provides additional path context for [`std::fs::write`].
    #[error("failed to write to {path:?}: {source}")]
    Write { source: io::Error, path: PathBuf },
    /// Provides additional path context for [`std::fs::read`].
    #[error("failed to read from {path:?}: {source}")]
    Read { source: io::Error, path: PathBuf },
    /// Provides additional path context for [`std::fs::create_dir_all`].
    #[error("failed to create dir {path:?}: {source}")]
    CreateDir { source: io::Error, path: PathBuf },
    /// Provides additional path context for [`std::fs::remove_file`].
    #[error("failed to remove file {path:?}: {source}")]
    RemoveFile { source: io::Error, path: PathBuf },
    /// Provides additional context for failing to deserialize a JSON file.
    #[error("failed to parse json file {path:?}: {err}")]
    ReadJson { err: serde_json::Error, path: PathBuf },
    /// Provides additional context for failing to serialize a JSON file.
    #[error("failed to write json file {path:?}: {err}")]
    WriteJson { err: serde_json::Error, path: PathBuf },
}

impl FsPathError {
    /// Returns the complementary error variant for [`std::fs::write`].
    pub fn write(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Write { source, path: path.into() }
    }

    /// Returns the complementary error variant for [`std::fs::read`].
    pub fn read(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Read { source, path: path.into() }
    }

    /// Returns the complementary error variant for [`std::fs::create_dir_all`].
    pub fn create_dir(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::CreateDir { source, path: path.into() }
    }

    /// Returns the complementary error variant for [`std::fs::remove_file`].
    pub fn remove_file(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::RemoveFile { source, path: path.into() }
    }

    /// Whether the underlying io error is a "not found".
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Write { source, .. }
            | Self::Read { source, .. }
            | Self::CreateDir { source, .. }
            | Self::RemoveFile { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::ReadJson { .. } | Self::WriteJson { .. } => false,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        match self {
            Self::Write { path, .. }
            | Self::Read { path, .. }
            | Self::CreateDir { path, .. }
            | Self::RemoveFile { path, .. }
            | Self::ReadJson { path, .. }
            | Self::WriteJson { path, .. } => path,
        }
    }
}
