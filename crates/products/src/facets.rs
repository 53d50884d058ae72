use std::collections::BTreeSet;

use crate::record::ProductRecord;

/// Distinct category tags across the whole catalog, sorted ascending.
///
/// Always computed over the unfiltered catalog so the facet list shows the
/// complete tag space regardless of the active search.
pub fn category_facets(catalog: &[ProductRecord]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(ProductRecord::tags)
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
