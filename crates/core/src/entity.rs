//! Entity trait: identity that survives changes to the rest of the record.

use std::collections::HashSet;

use crate::error::DomainError;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Check that no identifier appears twice in `items`.
///
/// Returns the first duplicated identifier as `DomainError::InvalidId`.
pub fn ensure_unique_ids<'a, E, I>(items: I) -> Result<(), DomainError>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(DomainError::invalid_id(format!(
                "duplicate identifier {}",
                item.id()
            )));
        }
    }
    Ok(())
}
