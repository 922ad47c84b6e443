//! Exported trace file loading and decoding

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::domain::observation::Observation;

/// UTF-8 byte order mark, emitted by some export tools on Windows.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Errors from loading an exported trace file
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File '{0}' not found")]
    NotFound(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of observations, got {0}")]
    NotAnArray(&'static str),
}

/// Load and decode an exported trace file into its observation list.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>, ReadError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReadError::NotFound(path.display().to_string()),
        _ => ReadError::Io(e),
    })?;

    let text = decode_bytes(&bytes);
    let value: JsonValue = serde_json::from_str(&text)?;
    if !value.is_array() {
        return Err(ReadError::NotAnArray(json_type_name(&value)));
    }

    let observations: Vec<Observation> = serde_json::from_value(value)?;
    tracing::debug!(count = observations.len(), "Loaded exported observations");
    Ok(observations)
}

/// Decode file bytes as UTF-8 (skipping a BOM), falling back to Windows-1252.
fn decode_bytes(bytes: &[u8]) -> String {
    let stripped = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(stripped) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::warn!("File is not valid UTF-8, decoding as Windows-1252");
            // The fallback decodes the raw bytes, BOM included.
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn write_fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).expect("write fixture");
        path
    }

    #[test]
    fn test_load_utf8() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_fixture(
            &dir,
            "trace.json",
            "[{\"id\":\"obs-1\",\"name\":\"café\"}]".as_bytes(),
        );

        let observations = load_observations(&path).expect("load");

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].id, "obs-1");
        assert_eq!(observations[0].name.as_deref(), Some("café"));
    }

    #[test]
    fn test_load_skips_bom() {
        let dir = TempDir::new().expect("tempdir");
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(br#"[{"id":"a"}]"#);
        let path = write_fixture(&dir, "trace.json", &bytes);

        let observations = load_observations(&path).expect("load");

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].id, "a");
    }

    #[test]
    fn test_load_windows_1252() {
        let dir = TempDir::new().expect("tempdir");
        // 0xE9 is é in Windows-1252 and invalid UTF-8 on its own.
        let mut bytes = br#"[{"id":"a","name":""#.to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(br#""}]"#);
        let path = write_fixture(&dir, "trace.json", &bytes);

        let observations = load_observations(&path).expect("load");

        assert_eq!(observations[0].name.as_deref(), Some("é"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("missing.json");

        let err = load_observations(&path).expect_err("should fail");

        assert!(matches!(err, ReadError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_fixture(&dir, "trace.json", b"not json");

        let err = load_observations(&path).expect_err("should fail");

        assert!(matches!(err, ReadError::Json(_)));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_fixture(&dir, "trace.json", b"{}");

        let err = load_observations(&path).expect_err("should fail");

        assert!(matches!(err, ReadError::NotAnArray(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_load_rejects_observation_without_id() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_fixture(&dir, "trace.json", br#"[{"name":"x"}]"#);

        let err = load_observations(&path).expect_err("should fail");

        assert!(matches!(err, ReadError::Json(_)));
    }

    #[test]
    fn test_load_empty_array() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_fixture(&dir, "trace.json", b"[]");

        let observations = load_observations(&path).expect("load");

        assert!(observations.is_empty());
    }
}
