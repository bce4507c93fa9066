use crate::allocate::IdMap;
use crate::models::Property;

/// Copies every property with `id` and `parentId` remapped and the owning
/// character cleared. Output positions match input positions.
///
/// Unmapped ids and dangling parent references are kept verbatim. `parentId`
/// and `characterId` are always written; every other field is left exactly
/// as it was read, including its position and any explicit null.
pub fn rewrite_properties(props: &[Property], id_map: &IdMap) -> Vec<Property> {
    props
        .iter()
        .map(|prop| {
            let mut out = prop.clone();
            if let Some(&new_id) = prop.id().and_then(|id| id_map.get(&id)) {
                out.set_id(new_id);
            }
            out.set_parent_id(
                prop.parent_id()
                    .map(|parent| id_map.get(&parent).copied().unwrap_or(parent)),
            );
            out.clear_character();
            out
        })
        .collect()
}
