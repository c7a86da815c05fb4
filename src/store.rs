//! Flat-file record store
//!
//! One record per line, `name,age,grade`, no header and no escaping.
//! Lines that do not parse are skipped on load. A missing file reads as an
//! empty store.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::{format_grade, StudentRecord};

/// Handle to the store file. Holds no records between calls.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every well-formed record in file order
    pub fn load(&self) -> Result<Vec<StudentRecord>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Store {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read store {}", self.path.display())
                })
            }
        };

        let mut records = Vec::new();
        for (idx, bytes) in contents.split(|b| *b == b'\n').enumerate() {
            let Ok(line) = std::str::from_utf8(bytes) else {
                debug!("Skipping line {} with invalid UTF-8: {:?}", idx + 1, String::from_utf8_lossy(bytes));
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some(record) => records.push(record),
                None => debug!("Skipping malformed line {}: {:?}", idx + 1, line),
            }
        }
        Ok(records)
    }

    /// Overwrite the file with the given records
    pub fn save(&self, records: &[StudentRecord]) -> Result<()> {
        self.ensure_parent()?;

        let mut contents = String::new();
        for record in records {
            contents.push_str(&format_line(record));
            contents.push('\n');
        }

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write store {}", self.path.display()))?;
        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Add one record at the end of the file, creating it if needed
    pub fn append(&self, record: &StudentRecord) -> Result<()> {
        self.ensure_parent()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open store {}", self.path.display()))?;

        let mut line = String::new();
        if !ends_with_newline(&mut file)? {
            line.push('\n');
        }
        line.push_str(&format_line(record));
        line.push('\n');

        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to append to store {}", self.path.display()))?;
        debug!("Appended '{}' to {}", record.name, self.path.display());
        Ok(())
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .context("Failed to create store directory")?;
            }
        }
        Ok(())
    }
}

/// True for an empty file too, so nothing is inserted before the first record.
fn ends_with_newline(file: &mut fs::File) -> Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Parse `name,age,grade`. Exactly three fields, each trimmed.
pub fn parse_line(line: &str) -> Option<StudentRecord> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    let [name, age, grade] = parts.as_slice() else {
        return None;
    };
    let age = age.trim().parse::<u32>().ok()?;
    let grade = grade.trim().parse::<f64>().ok()?;
    Some(StudentRecord::new(name.trim(), age, grade))
}

pub fn format_line(record: &StudentRecord) -> String {
    format!("{},{},{}", record.name, record.age, format_grade(record.grade))
}
