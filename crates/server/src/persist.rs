//! Append-only record files shared by the credential and history stores.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Append `record` as one line of `path`, creating the file if needed.
///
/// A hand-edited file may lack its final newline; one is written first in
/// that case so the new record never joins the previous line.
pub fn append_line(path: &Path, record: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open {:?}", path))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat {:?}", path))?
        .len();
    let mut line = String::with_capacity(record.len() + 2);
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .with_context(|| format!("Failed to read {:?}", path))?;
        if last[0] != b'\n' {
            line.push('\n');
        }
    }
    line.push_str(record);
    line.push('\n');

    file.write_all(line.as_bytes())
        .with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("film-forge-{}-{}.txt", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_creates_missing_file() {
        let path = temp_file("append-new");
        append_line(&path, "alice pw").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "alice pw\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_terminates_unfinished_last_line() {
        let path = temp_file("append-unterminated");
        fs::write(&path, "alice pw").unwrap();
        append_line(&path, "bob secret").unwrap();
        append_line(&path, "carol pw2").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "alice pw\nbob secret\ncarol pw2\n"
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_file_gets_no_blank_line() {
        let path = temp_file("append-empty");
        fs::write(&path, "").unwrap();
        append_line(&path, "alice 3").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "alice 3\n");
        let _ = fs::remove_file(&path);
    }
}
