//! Filesystem-backed attribute directory.
//!
//! Each named value is one small file under a base directory, which plays
//! the role the per-device property store has on the original platform.
//! Names are percent-escaped so characters like `:` stay filename-safe on
//! every filesystem.

use presslink_traits::{AttributeDirectory, DirectoryError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// An attribute directory storing one value file per name.
///
/// The base directory is created lazily on the first write, so a
/// directory for a device that never stores anything leaves no trace.
/// Integer values are stored as decimal text.
#[derive(Debug)]
pub struct FilesystemAttributeDirectory {
    base_path: PathBuf,
}

impl FilesystemAttributeDirectory {
    /// Creates a directory rooted at `base_path`. The path does not have
    /// to exist yet.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Returns the base path for this directory.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    fn value_path(&self, name: &str) -> PathBuf {
        self.base_path.join(escape_name(name))
    }

    fn read_value(&self, name: &str) -> Result<Option<String>, DirectoryError> {
        match fs::read_to_string(self.value_path(name)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(DirectoryError::AccessFailed {
                name: name.to_string(),
                message: err.to_string(),
            }),
        }
    }

    fn write_value(&self, name: &str, value: &str) -> Result<(), DirectoryError> {
        fs::create_dir_all(&self.base_path).map_err(|err| DirectoryError::AccessFailed {
            name: name.to_string(),
            message: err.to_string(),
        })?;
        fs::write(self.value_path(name), value).map_err(|err| DirectoryError::AccessFailed {
            name: name.to_string(),
            message: err.to_string(),
        })
    }
}

impl AttributeDirectory for FilesystemAttributeDirectory {
    fn get_u32(&self, name: &str) -> Result<Option<u32>, DirectoryError> {
        Ok(self
            .read_value(name)?
            .and_then(|value| value.trim().parse::<u32>().ok()))
    }

    fn set_u32(&self, name: &str, value: u32) -> Result<(), DirectoryError> {
        self.write_value(name, &value.to_string())
    }

    fn get_string(&self, name: &str) -> Result<Option<String>, DirectoryError> {
        self.read_value(name)
    }

    fn set_string(&self, name: &str, value: &str) -> Result<(), DirectoryError> {
        self.write_value(name, value)
    }

    fn remove(&self, name: &str) -> Result<(), DirectoryError> {
        match fs::remove_file(self.value_path(name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DirectoryError::AccessFailed {
                name: name.to_string(),
                message: err.to_string(),
            }),
        }
    }

    fn names_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DirectoryError> {
        let entries = match fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(DirectoryError::Io(err.to_string())),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| DirectoryError::Io(err.to_string()))?;
            let Some(file_name) = entry.file_name().to_str().map(unescape_name) else {
                continue;
            };
            if file_name.starts_with(prefix) {
                names.push(file_name);
            }
        }
        Ok(names)
    }

    fn name(&self) -> &'static str {
        "FilesystemAttributeDirectory"
    }
}

fn escape_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                escaped.push(byte as char)
            }
            _ => escaped.push_str(&format!("%{byte:02X}")),
        }
    }
    escaped
}

fn unescape_name(file_name: &str) -> String {
    fn hex_val(byte: u8) -> Option<u8> {
        (byte as char).to_digit(16).map(|digit| digit as u8)
    }

    let bytes = file_name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && let (Some(high), Some(low)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2]))
        {
            out.push(high * 16 + low);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
