//! Flat-file JSON access: read a file into a value or a typed failure, write a value back.
//!
//! This is the only place raw i/o and parse failures are caught. Everything above it
//! works with [`StoreError`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

use crate::error::StoreError;

/// Read and parse the JSON file at `path`.
pub fn read_json(path: &Path) -> Result<Value, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::from_io(path, e))?;
    let value = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded JSON from {}", path.display());
    Ok(value)
}

/// Overwrite `path` with `value`, pretty-printed with four-space indentation.
///
/// The content is written to a temporary file next to the target and renamed over it,
/// so a crash mid-write leaves the previous file intact. An existing target keeps its
/// permissions. Creates the parent directory.
pub fn write_json(path: &Path, value: &Value) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| StoreError::from_io(dir, e))?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::InvalidRecord {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::from_io(dir, e))?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| StoreError::from_io(tmp.path(), e))?;
    }
    tmp.write_all(&buf)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| StoreError::from_io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| StoreError::from_io(path, e.error))?;
    log::debug!("wrote JSON to {}", path.display());
    Ok(())
}

/// True if `value` is an object containing every key in `keys`.
pub fn has_keys(value: &Value, keys: &[&str]) -> bool {
    value
        .as_object()
        .map(|obj| keys.iter().all(|k| obj.contains_key(*k)))
        .unwrap_or(false)
}

/// Read a record that must be a JSON object carrying `required` keys, then deserialize it.
///
/// All missing keys are reported together. A present key with the wrong value type is an
/// [`StoreError::InvalidRecord`].
pub fn read_record<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<T, StoreError> {
    let value = read_json(path)?;
    let Some(obj) = value.as_object() else {
        return Err(StoreError::InvalidRecord {
            path: path.to_path_buf(),
            detail: format!("expected a JSON object, found {}", json_type_name(&value)),
        });
    };
    let missing: Vec<String> = required
        .iter()
        .filter(|k| !obj.contains_key(**k))
        .map(|k| k.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::MissingKeys {
            path: path.to_path_buf(),
            missing,
        });
    }
    serde_json::from_value(value).map_err(|e| StoreError::InvalidRecord {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Pair {
        a: u32,
        #[allow(dead_code)]
        b: String,
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn read_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(read_json(&path).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn read_invalid_utf8_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        std::fs::write(&path, [b'"', 0xff, 0xfe, b'"']).unwrap();
        assert_eq!(read_json(&path).unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn write_creates_parent_and_indents_four_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_json(&path, &json!({ "LastChat": "x" })).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"LastChat\": \"x\"\n}");
        assert_eq!(read_json(&path).unwrap(), json!({ "LastChat": "x" }));
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &json!({ "v": 1 })).unwrap();
        write_json(&path, &json!({ "v": 2 })).unwrap();
        assert_eq!(read_json(&path).unwrap(), json!({ "v": 2 }));
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_target_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".temp.json");
        std::fs::write(&path, r#"{ "LastChat": "" }"#).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        write_json(&path, &json!({ "LastChat": "a.json" })).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn read_record_reports_all_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.json");
        std::fs::write(&path, r#"{ "c": true }"#).unwrap();
        match read_record::<Pair>(&path, &["a", "b"]).unwrap_err() {
            StoreError::MissingKeys { missing, .. } => assert_eq!(missing, vec!["a", "b"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_record_rejects_non_object_and_wrong_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            read_record::<Pair>(&path, &["a"]).unwrap_err(),
            StoreError::InvalidRecord { .. }
        ));
        std::fs::write(&path, r#"{ "a": "one", "b": "x" }"#).unwrap();
        assert_eq!(
            read_record::<Pair>(&path, &["a", "b"]).unwrap_err().kind(),
            ErrorKind::Schema
        );
        std::fs::write(&path, r#"{ "a": 1, "b": "x" }"#).unwrap();
        assert_eq!(read_record::<Pair>(&path, &["a", "b"]).unwrap().a, 1);
    }

    #[test]
    fn has_keys_requires_object_superset() {
        assert!(has_keys(&json!({ "a": 1, "b": 2 }), &["a"]));
        assert!(!has_keys(&json!({ "a": 1 }), &["a", "b"]));
        assert!(!has_keys(&json!(["a"]), &["a"]));
    }
}
