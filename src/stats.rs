use crate::allocate::Allocation;
use crate::models::Property;

/// Counters collected during one renumbering run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenumberStats {
    pub properties: usize,
    /// Records whose id was replaced
    pub renumbered: usize,
    /// `(tab name, ids assigned)` per resolved tab, in processing order
    pub per_tab: Vec<(String, usize)>,
    pub skipped_tabs: Vec<String>,
}

impl RenumberStats {
    pub fn collect(props: &[Property], allocation: &Allocation) -> Self {
        let renumbered = props
            .iter()
            .filter(|p| p.id().is_some_and(|id| allocation.id_map.contains_key(&id)))
            .count();

        Self {
            properties: props.len(),
            renumbered,
            per_tab: allocation.per_tab.clone(),
            skipped_tabs: allocation.skipped_tabs.clone(),
        }
    }

    /// Records that kept their original id
    pub fn untouched(&self) -> usize {
        self.properties - self.renumbered
    }
}
