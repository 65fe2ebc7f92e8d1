//! Physical constants source.
//!
//! The builtin table ships inside the domain crate; a user may point
//! `tools.constants_file` at a JSON file with the same shape
//! (`{ "key": { "name", "value", "unit", "symbol" } }`) to replace it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tutor_domain::{ConstantError, ConstantTable};

/// Errors loading a constants file.
#[derive(Error, Debug)]
pub enum ConstantsLoadError {
    #[error("Failed to read constants file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid constants file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConstantError,
    },
}

/// Load the constants table from `path`, or the builtin table when `None`.
pub fn load_constants(path: Option<&Path>) -> Result<Arc<ConstantTable>, ConstantsLoadError> {
    let Some(path) = path else {
        return Ok(Arc::new(ConstantTable::builtin().clone()));
    };

    let json = std::fs::read_to_string(path).map_err(|source| ConstantsLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = ConstantTable::from_json(&json).map_err(|source| ConstantsLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Loaded {} constants from {}",
        table.len(),
        path.display()
    );
    Ok(Arc::new(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_when_no_path() {
        let table = load_constants(None).unwrap();
        assert_eq!(table.len(), ConstantTable::builtin().len());
        assert!(table.lookup("speedOfLight").is_ok());
    }

    #[test]
    fn test_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constants.json");
        std::fs::write(
            &path,
            r#"{"speedOfSound": {"name": "Speed of sound in air", "value": 343, "unit": "m/s", "symbol": "v_s"}}"#,
        )
        .unwrap();

        let table = load_constants(Some(&path)).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("speedOfSound").unwrap().value, 343.0);
        assert!(!table.contains("speedOfLight"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_constants(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, ConstantsLoadError::Io { .. }));
    }

    #[test]
    fn test_duplicate_key_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        std::fs::write(
            &path,
            r#"{"c": {"name": "a", "value": 1, "unit": "x"}, "c": {"name": "b", "value": 2, "unit": "y"}}"#,
        )
        .unwrap();

        let err = load_constants(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            ConstantsLoadError::Invalid {
                source: ConstantError::DuplicateKey(_),
                ..
            }
        ));
    }
}
