//! Crash-resilient JSON array log, one file per gesture label.
//!
//! Records arrive one at a time from a long-running capture loop, and the
//! process may be killed between any two appends. The file is therefore kept
//! parseable after every call: `append` strips the trailing `]`, writes the
//! record, and puts the `]` back as the new final byte. The read-modify-write
//! per record is acceptable because writes are paced by the poll interval.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::models::{GestureLabel, SignalRecord};

/// Deterministic log path for a label inside `dir`.
pub fn log_path(dir: &Path, label: GestureLabel) -> PathBuf {
    dir.join(label.log_file_name())
}

/// Create the file holding only the array-open token. A file that already
/// has content is left untouched, so re-initialization preserves earlier
/// records. Fails if the path is unwritable.
pub fn initialize(path: &Path) -> Result<()> {
    let empty = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };
    if empty {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory {}", parent.display())
                })?;
            }
        }
        fs::write(path, b"[")
            .with_context(|| format!("failed to initialize log file {}", path.display()))?;
        info!("initialized gesture log {}", path.display());
    }
    Ok(())
}

/// Append one record, leaving the file a valid JSON array.
///
/// If the file currently ends with `]` that byte is truncated first; a `,\n`
/// separator is written unless this is the first record. The truncate-then-
/// rewrite sequence is the only instant the file is not a closed array,
/// which is why finalization waits for the capture task to join.
pub fn append(path: &Path, record: &SignalRecord) -> Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let mut len = file
        .seek(SeekFrom::End(0))
        .with_context(|| format!("failed to seek in log file {}", path.display()))?;

    if len == 0 {
        // Appending to a never-initialized file; open the array ourselves.
        file.write_all(b"[")?;
        len = 1;
    } else {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] == b']' {
            len -= 1;
            file.set_len(len)?;
        }
        file.seek(SeekFrom::Start(len))?;
    }

    if len > 1 {
        file.write_all(b",\n")?;
    }

    let json = serde_json::to_string_pretty(record).context("failed to serialize record")?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n]")
        .with_context(|| format!("failed to append to log file {}", path.display()))?;
    Ok(())
}

/// Ensure the file ends with the array-close token. Idempotent: a missing
/// file is a no-op, a zero-length file becomes an empty array, and a file
/// already ending in `]` is left byte-for-byte unchanged.
pub fn finalize(path: &Path) -> Result<()> {
    let mut file = match OpenOptions::new().read(true).write(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to open log file {}", path.display()))
        }
    };

    let len = file
        .seek(SeekFrom::End(0))
        .with_context(|| format!("failed to seek in log file {}", path.display()))?;

    if len == 0 {
        file.write_all(b"[]")
            .with_context(|| format!("failed to finalize log file {}", path.display()))?;
        info!("finalized empty gesture log {}", path.display());
        return Ok(());
    }

    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] != b']' {
        file.write_all(b"]")
            .with_context(|| format!("failed to finalize log file {}", path.display()))?;
        info!("finalized gesture log {}", path.display());
    }
    Ok(())
}

/// Load a finalized log back into memory, for inspection and tests.
pub fn read_records(path: &Path) -> Result<Vec<SignalRecord>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read log file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("log file {} is not a valid record array", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_log(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be set")
            .as_nanos();
        std::env::temp_dir().join(format!("airgest-log-{name}-{nanos}.json"))
    }

    fn sample_record(rssi: i32) -> SignalRecord {
        SignalRecord {
            timestamp: format!("2026-08-07 12:00:00.{:06}", rssi.unsigned_abs()),
            ssid: "HomeNet".to_string(),
            bssid: "aa:bb:cc:dd:ee:ff".to_string(),
            rssi,
            gesture: GestureLabel::Swipe,
        }
    }

    #[test]
    fn file_parses_after_every_append() {
        let path = temp_log("every-append");
        initialize(&path).expect("initialize should succeed");

        for count in 1..=4 {
            append(&path, &sample_record(-40 - count)).expect("append should succeed");
            let contents = fs::read_to_string(&path).expect("log should be readable");
            let parsed: Vec<SignalRecord> =
                serde_json::from_str(&contents).expect("log should stay valid JSON");
            assert_eq!(parsed.len(), count as usize);
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn finalize_is_idempotent() {
        let path = temp_log("idempotent");
        initialize(&path).expect("initialize should succeed");
        append(&path, &sample_record(-50)).expect("append should succeed");

        finalize(&path).expect("first finalize should succeed");
        let once = fs::read(&path).expect("log should be readable");

        finalize(&path).expect("second finalize should succeed");
        finalize(&path).expect("third finalize should succeed");
        let thrice = fs::read(&path).expect("log should be readable");

        assert_eq!(once, thrice);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn initialize_then_finalize_yields_empty_array() {
        let path = temp_log("empty-array");
        initialize(&path).expect("initialize should succeed");
        finalize(&path).expect("finalize should succeed");

        let contents = fs::read_to_string(&path).expect("log should be readable");
        assert_eq!(contents, "[]");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn reinitialize_preserves_existing_content() {
        let path = temp_log("reinit");
        initialize(&path).expect("initialize should succeed");
        append(&path, &sample_record(-60)).expect("append should succeed");
        let before = fs::read(&path).expect("log should be readable");

        initialize(&path).expect("re-initialize should succeed");
        let after = fs::read(&path).expect("log should be readable");

        assert_eq!(before, after);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn finalize_missing_file_is_noop() {
        let path = temp_log("missing");
        finalize(&path).expect("finalize should tolerate a missing file");
        assert!(!path.exists());
    }

    #[test]
    fn finalize_zero_length_file_becomes_empty_array() {
        let path = temp_log("zero-length");
        fs::write(&path, b"").expect("file should be creatable");
        finalize(&path).expect("finalize should succeed");

        let contents = fs::read_to_string(&path).expect("log should be readable");
        assert_eq!(contents, "[]");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn append_reopens_a_finalized_log() {
        let path = temp_log("reopen");
        initialize(&path).expect("initialize should succeed");
        append(&path, &sample_record(-41)).expect("first append should succeed");
        finalize(&path).expect("finalize should succeed");

        append(&path, &sample_record(-42)).expect("append after finalize should succeed");
        finalize(&path).expect("second finalize should succeed");

        let records = read_records(&path).expect("log should parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rssi, -41);
        assert_eq!(records[1].rssi, -42);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn append_reopens_a_finalized_empty_log_without_separator() {
        let path = temp_log("reopen-empty");
        initialize(&path).expect("initialize should succeed");
        finalize(&path).expect("finalize should succeed");

        append(&path, &sample_record(-45)).expect("append should succeed");
        let records = read_records(&path).expect("log should parse");
        assert_eq!(records.len(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn read_records_roundtrips_appends() {
        let path = temp_log("roundtrip");
        initialize(&path).expect("initialize should succeed");
        let first = sample_record(-40);
        let second = sample_record(-42);
        append(&path, &first).expect("append should succeed");
        append(&path, &second).expect("append should succeed");

        let records = read_records(&path).expect("log should parse");
        assert_eq!(records, vec![first, second]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn log_path_is_named_after_the_label() {
        let path = log_path(Path::new("/tmp/data"), GestureLabel::PushPull);
        assert_eq!(path, PathBuf::from("/tmp/data/push-pull_rssi.json"));
    }
}
