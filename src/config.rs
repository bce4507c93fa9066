use rustc_hash::FxHashMap;

/// `type` tag that, together with an absent `parentId`, marks a tab root
pub const TAB_SECTION_TYPE: &str = "tab-section";

/// Default tab name to ID base table. New IDs in a tab start at `base + 1`.
pub const DEFAULT_TAB_BASES: [(&str, i64); 5] = [
    ("Character", 10_000_000),
    ("Inventory", 30_000_000),
    ("Feats", 50_000_000),
    ("Spells", 70_000_000),
    ("Background", 90_000_000),
];

/// Immutable mapping from tab name to its numeric ID base.
#[derive(Debug, Clone)]
pub struct CategoryBases {
    bases: FxHashMap<String, i64>,
}

impl CategoryBases {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            bases: entries
                .into_iter()
                .map(|(name, base)| (name.into(), base))
                .collect(),
        }
    }

    pub fn base_for(&self, tab_name: &str) -> Option<i64> {
        self.bases.get(tab_name).copied()
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl Default for CategoryBases {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_BASES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_five_tabs() {
        let bases = CategoryBases::default();
        assert_eq!(bases.len(), 5);
        assert_eq!(bases.base_for("Character"), Some(10_000_000));
        assert_eq!(bases.base_for("Background"), Some(90_000_000));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let bases = CategoryBases::default();
        assert_eq!(bases.base_for("character"), None);
        assert_eq!(bases.base_for("Actions"), None);
    }

    #[test]
    fn custom_table() {
        let bases = CategoryBases::new([("Notes", 500)]);
        assert_eq!(bases.base_for("Notes"), Some(500));
        assert_eq!(bases.base_for("Character"), None);
    }
}
