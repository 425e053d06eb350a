//! JSON output for converted splits and the type registry.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{split_output_path, types_output_path};
use crate::error::Result;
use crate::registry::TypeRegistry;
use crate::types::{Document, Split};

/// Wrapper giving the types file its `{"entities": {...}}` shape.
#[derive(Debug, Serialize)]
struct TypesFile<'a> {
    entities: &'a TypeRegistry,
}

/// Serialize `value` as JSON to `path`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// A failed run never leaves a truncated output file behind.
fn write_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut writer = BufWriter::new(File::create(&temp_file)?);
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Write one split's documents to `<base>/<prefix>_<split>.json`.
///
/// # Returns
/// Path to the saved file
pub fn save_split(
    base: &Path,
    prefix: &str,
    split: Split,
    documents: &[Document],
) -> Result<PathBuf> {
    let path = split_output_path(base, prefix, split);
    write_json_atomic(documents, &path)?;
    tracing::info!(
        split = %split,
        documents = documents.len(),
        path = %path.display(),
        "Saved documents"
    );
    Ok(path)
}

/// Write the type registry to `<base>/<prefix>_types.json`.
///
/// # Returns
/// Path to the saved file
pub fn save_types(base: &Path, prefix: &str, registry: &TypeRegistry) -> Result<PathBuf> {
    let path = types_output_path(base, prefix);
    write_json_atomic(&TypesFile { entities: registry }, &path)?;
    tracing::info!(types = registry.len(), path = %path.display(), "Saved types");
    Ok(path)
}

/// Render the types file content without writing it.
pub fn types_json(registry: &TypeRegistry) -> Result<String> {
    Ok(serde_json::to_string(&TypesFile { entities: registry })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Entity;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_documents() -> Vec<Document> {
        let mut doc = Document::new();
        doc.push_token("Sophocles");
        doc.push_token("wrote");
        doc.entities.push(Entity::new("pers", 0, 1));
        vec![doc.seal()]
    }

    #[test]
    fn test_save_split() {
        let dir = tempdir().unwrap();
        let path = save_split(dir.path(), "hipe2022", Split::Dev, &sample_documents()).unwrap();

        assert_eq!(path, dir.path().join("hipe2022_dev.json"));
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            r#"[{"tokens":["Sophocles","wrote"],"extended":["Sophocles","wrote"],"entities":[{"type":"pers","start":0,"end":1}]}]"#
        );
    }

    #[test]
    fn test_save_split_empty() {
        let dir = tempdir().unwrap();
        let path = save_split(dir.path(), "hipe2022", Split::Test, &[]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");
    }

    #[test]
    fn test_save_split_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        save_split(dir.path(), "hipe2022", Split::Train, &sample_documents()).unwrap();
        assert!(!dir.path().join(".hipe2022_train.json.tmp").exists());
    }

    #[test]
    fn test_save_types() {
        let dir = tempdir().unwrap();
        let mut registry = TypeRegistry::new();
        registry.register("work");
        registry.register("pers");

        let path = save_types(dir.path(), "hipe2022", &registry).unwrap();
        assert_eq!(path, dir.path().join("hipe2022_types.json"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            r#"{"entities":{"pers":{"short":"pers"},"work":{"short":"work"}}}"#
        );
    }

    #[test]
    fn test_types_json_empty() {
        assert_eq!(
            types_json(&TypeRegistry::new()).unwrap(),
            r#"{"entities":{}}"#
        );
    }

    #[test]
    fn test_save_split_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = save_split(&missing, "hipe2022", Split::Dev, &[]);
        assert!(matches!(result, Err(crate::error::ConverterError::Io(_))));
    }
}
