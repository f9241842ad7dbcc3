//! Contains various `std::fs` wrapper functions that also contain the target path in their errors.

use crate::errors::FsPathError;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

type Result<T> = std::result::Result<T, FsPathError>;

/// Wrapper for [`std::fs::create_dir_all`].
pub fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|err| FsPathError::create_dir(err, path))
}

/// Reads the JSON file and deserializes it into the provided type.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|err| FsPathError::read(err, path))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|err| FsPathError::ReadJson { err, path: path.to_path_buf() })
}

/// Writes the object as a pretty JSON object, creating missing parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, obj: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let file = File::create(path).map_err(|err| FsPathError::write(err, path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, obj)
        .map_err(|err| FsPathError::WriteJson { err, path: path.to_path_buf() })?;
    writer.flush().map_err(|err| FsPathError::write(err, path))
}

/// Removes the file, treating an already missing file as success.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) => {
            let err = FsPathError::remove_file(err, path);
            if err.is_not_found() {
                trace!(path = ?err.path(), "file already removed");
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn json_file_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/record.json");
        let record = Record { name: "punk".into(), count: 3 };

        write_json_file(&path, &record).unwrap();
        let read: Record = read_json_file(&path).unwrap();
        assert_eq!(read, record);

        remove_file_if_exists(&path).unwrap();
        assert!(!path.exists());
        remove_file_if_exists(&path).unwrap();
    }

    #[test]
    fn missing_json_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json_file::<Record>(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
