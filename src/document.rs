//! Document-level pipeline: load, renumber `properties`, save.

use crate::allocate::IdAllocator;
use crate::config::CategoryBases;
use crate::index::PropertyIndex;
use crate::models::Property;
use crate::order::order_output;
use crate::rewrite::rewrite_properties;
use crate::stats::RenumberStats;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const PROPERTIES_KEY: &str = "properties";

/// Runs index, allocation, rewrite and output ordering over a property list.
pub fn renumber_properties(
    props: &[Property],
    allocator: &IdAllocator,
) -> (Vec<Property>, RenumberStats) {
    let index = PropertyIndex::build(props);
    let allocation = allocator.allocate(props, &index);
    let rewritten = rewrite_properties(props, &allocation.id_map);
    let ordered = order_output(props, &index, rewritten);
    (ordered, RenumberStats::collect(props, &allocation))
}

/// Renumbers the `properties` list of a document in place. Every other
/// top-level key is left as is. A missing or null `properties` counts as empty.
pub fn renumber_document(
    doc: &mut Map<String, Value>,
    allocator: &IdAllocator,
) -> Result<RenumberStats> {
    let props: Vec<Property> = match doc.get_mut(PROPERTIES_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value(value.take())
            .context("Failed to parse properties list")?,
    };

    let (ordered, stats) = renumber_properties(&props, allocator);
    let value = serde_json::to_value(ordered).context("Failed to serialize properties")?;
    doc.insert(PROPERTIES_KEY.to_string(), value);

    Ok(stats)
}

pub fn load_document(path: &Path) -> Result<Map<String, Value>> {
    let file = File::open(path).with_context(|| format!("Failed to open input: {:?}", path))?;
    let doc: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON document: {:?}", path))?;

    match doc {
        Value::Object(map) => Ok(map),
        other => bail!(
            "Expected a JSON object at the top level of {:?}, found {}",
            path,
            json_kind(&other)
        ),
    }
}

/// Writes pretty JSON (2-space indent, non-ASCII kept literal) atomically via
/// rename. On failure the temp file is removed and `path` is left untouched.
pub fn save_document<T: Serialize + ?Sized>(doc: &T, path: &Path) -> Result<()> {
    let tmp_path = temp_path(path);
    if let Err(e) = write_pretty(doc, &tmp_path) {
        if let Err(rm) = fs::remove_file(&tmp_path) {
            warn!(error = %rm, path = ?tmp_path, "Failed to remove temp output file");
        }
        return Err(e);
    }

    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to rename temp output file to: {:?}", path))?;

    info!(path = ?path, "Document written");
    Ok(())
}

/// Load, renumber, save.
pub fn run(input: &Path, output: &Path, bases: CategoryBases) -> Result<RenumberStats> {
    let mut doc = load_document(input)?;
    info!(path = ?input, "Document loaded");

    let allocator = IdAllocator::new(bases);
    let stats = renumber_document(&mut doc, &allocator)?;
    info!(
        properties = stats.properties,
        renumbered = stats.renumbered,
        "Properties renumbered"
    );

    save_document(&doc, output)?;
    Ok(stats)
}

fn write_pretty<T: Serialize + ?Sized>(doc: &T, tmp_path: &Path) -> Result<()> {
    let file = File::create(tmp_path)
        .with_context(|| format!("Failed to create temp output file: {:?}", tmp_path))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, doc).context("Failed to serialize document")?;
    writer
        .flush()
        .with_context(|| format!("Failed to write output: {:?}", tmp_path))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn json_kind(value: &Value) -> &'static str {
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
    use serde_json::json;
    use tempfile::TempDir;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn missing_properties_becomes_empty_list() {
        let mut doc = object(json!({"type": "tableplop-character-v2", "private": false}));
        let stats = renumber_document(&mut doc, &IdAllocator::new(CategoryBases::default())).unwrap();

        assert_eq!(stats.properties, 0);
        assert_eq!(doc.get("properties"), Some(&json!([])));
        assert_eq!(doc.get("private"), Some(&json!(false)));
    }

    #[test]
    fn properties_keep_key_position() {
        let mut doc = object(json!({
            "type": "tableplop-character-v2",
            "properties": [{"id": 1, "parentId": null, "type": "tab-section", "value": "Feats"}],
            "private": true
        }));
        renumber_document(&mut doc, &IdAllocator::new(CategoryBases::default())).unwrap();

        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["type", "properties", "private"]);
        assert_eq!(doc["properties"][0]["id"], json!(50_000_001));
    }

    #[test]
    fn malformed_properties_is_an_error() {
        let mut doc = object(json!({"properties": "nope"}));
        let result = renumber_document(&mut doc, &IdAllocator::new(CategoryBases::default()));
        assert!(result.is_err());
    }

    #[test]
    fn load_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "[1, 2]").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("an array"));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(load_document(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn save_writes_pretty_unicode_and_removes_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let doc = object(json!({"name": "Élodie ✨", "properties": []}));

        save_document(&doc, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Élodie ✨"));
        assert!(text.contains("\n  \"properties\": []"));
        assert!(!temp_path(&path).exists());
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn failed_save_leaves_no_temp_and_keeps_existing_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "previous").unwrap();

        let err = save_document(&Unserializable, &path).unwrap_err();

        assert!(format!("{:#}", err).contains("cannot serialize"));
        assert!(!temp_path(&path).exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
    }

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(
            temp_path(Path::new("/out/sheet.json")),
            PathBuf::from("/out/sheet.json.tmp")
        );
    }
}
