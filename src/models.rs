use crate::config::TAB_SECTION_TYPE;
use anyhow::{bail, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;

pub type PropertyId = i64;

pub const ID_KEY: &str = "id";
pub const PARENT_ID_KEY: &str = "parentId";
pub const TYPE_KEY: &str = "type";
pub const VALUE_KEY: &str = "value";
pub const RANK_KEY: &str = "rank";
pub const CHARACTER_ID_KEY: &str = "characterId";

/// A single Tableplop property record.
///
/// The record keeps its own fields, in their original order, and writes them
/// back as read. `id` and `parentId` are checked and cached on load; the
/// other fields the renumbering reads are typed views over the field map.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    id: Option<PropertyId>,
    parent_id: Option<PropertyId>,
    fields: Map<String, Value>,
}

impl Property {
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        let id = id_field(&fields, ID_KEY)?;
        let parent_id = id_field(&fields, PARENT_ID_KEY)?;
        Ok(Self {
            id,
            parent_id,
            fields,
        })
    }

    /// `None` when the key is absent or null.
    pub fn id(&self) -> Option<PropertyId> {
        self.id
    }

    /// `None` for a top-level record.
    pub fn parent_id(&self) -> Option<PropertyId> {
        self.parent_id
    }

    pub fn kind(&self) -> Option<&str> {
        self.fields.get(TYPE_KEY).and_then(Value::as_str)
    }

    pub fn value(&self) -> Option<&Value> {
        self.fields.get(VALUE_KEY)
    }

    /// Sibling rank; any JSON number, 0 when absent, null or not numeric.
    pub fn rank(&self) -> f64 {
        self.fields
            .get(RANK_KEY)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// A top-level `tab-section`, i.e. the root of one tab's subtree.
    pub fn is_tab_root(&self) -> bool {
        self.parent_id.is_none() && self.kind() == Some(TAB_SECTION_TYPE)
    }

    /// Tab name carried in `value`; empty when missing or not a string.
    pub fn tab_name(&self) -> &str {
        self.value().and_then(Value::as_str).unwrap_or("")
    }

    /// Sibling order: `rank` ascending, then `id`, both defaulting to 0.
    pub fn cmp_siblings(&self, other: &Self) -> Ordering {
        self.rank()
            .total_cmp(&other.rank())
            .then_with(|| self.id.unwrap_or(0).cmp(&other.id.unwrap_or(0)))
    }

    /// Replaces `id` in place, keeping its position among the fields.
    pub fn set_id(&mut self, id: PropertyId) {
        self.id = Some(id);
        self.fields.insert(ID_KEY.to_string(), Value::from(id));
    }

    /// Writes `parentId`, as null for a top-level record. The key is added
    /// at the end when the record did not carry it.
    pub fn set_parent_id(&mut self, parent_id: Option<PropertyId>) {
        self.parent_id = parent_id;
        let value = parent_id.map(Value::from).unwrap_or(Value::Null);
        self.fields.insert(PARENT_ID_KEY.to_string(), value);
    }

    /// Detaches the record from its owning character.
    pub fn clear_character(&mut self) {
        self.fields.insert(CHARACTER_ID_KEY.to_string(), Value::Null);
    }
}

fn id_field(fields: &Map<String, Value>, key: &str) -> Result<Option<PropertyId>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match value.as_i64() {
            Some(id) => Ok(Some(id)),
            None => bail!("Property {} must be an integer, found {}", key, value),
        },
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::deserialize(deserializer)?;
        Property::from_fields(fields).map_err(|e| de::Error::custom(format!("{:#}", e)))
    }
}
