//! Substring search over the catalog.
//!
//! A record matches when **any** of name, description, sku or one of its
//! category tags contains the query, compared after lower-casing both sides.
//! No tokenizing, no fuzzy matching. Absent optional fields never match.

use crate::record::ProductRecord;

/// A parsed search string.
///
/// Blank (empty or whitespace-only) queries match everything. Otherwise the
/// needle is the raw query lower-cased, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: Option<String>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let needle = if raw.trim().is_empty() {
            None
        } else {
            Some(raw.to_lowercase())
        };
        Self { needle }
    }

    /// True when the query imposes no restriction.
    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, record: &ProductRecord) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        contains(&record.name, needle)
            || contains(&record.description, needle)
            || record.sku.as_deref().is_some_and(|sku| contains(sku, needle))
            || record.tags().iter().any(|tag| contains(tag, needle))
    }

    /// Ordered subsequence of `catalog` matching this query.
    pub fn apply<'a>(&self, catalog: &'a [ProductRecord]) -> Vec<&'a ProductRecord> {
        catalog.iter().filter(|record| self.matches(record)).collect()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Filter `catalog` by `query`, preserving the catalog order.
pub fn filter<'a>(catalog: &'a [ProductRecord], query: &str) -> Vec<&'a ProductRecord> {
    SearchQuery::parse(query).apply(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new("1", "Copper Coil", "Heavy gauge winding")
                .with_sku("CU-200")
                .with_categories(["Coils", "Copper"]),
            ProductRecord::new("2", "Brass Valve", "Quarter-turn valve").with_sku("BV-10"),
            ProductRecord::new("3", "Steel Pipe", "Seamless, 2m").with_categories(["Pipes"]),
            ProductRecord::new("4", "Gasket", "Fits coil housings"),
        ]
    }

    fn ids(records: &[&ProductRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn blank_query_returns_catalog_in_order() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "")), ["1", "2", "3", "4"]);
        assert_eq!(ids(&filter(&catalog, "   \t")), ["1", "2", "3", "4"]);
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let catalog = catalog();

        // name and description
        assert_eq!(ids(&filter(&catalog, "COIL")), ["1", "4"]);
        // sku
        assert_eq!(ids(&filter(&catalog, "bv-1")), ["2"]);
        // category tag
        assert_eq!(ids(&filter(&catalog, "pipes")), ["3"]);
    }

    #[test]
    fn absent_fields_are_skipped() {
        let catalog = catalog();
        // Record 4 has neither sku nor tags; it must not match a sku-only query.
        assert_eq!(ids(&filter(&catalog, "cu-200")), ["1"]);
        assert!(filter(&catalog, "zzz").is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_needle() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "brass ")), ["2"]);
        assert!(filter(&catalog, " gasket").is_empty());
    }

    #[test]
    fn category_single_value_fields_are_not_searched() {
        let catalog = vec![ProductRecord::new("1", "Widget", "Plain").with_category("Hydraulics")];
        assert!(filter(&catalog, "hydraulics").is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn record_strategy() -> impl Strategy<Value = ProductRecord> {
            (
                "[A-Za-z ]{0,16}",
                "[A-Za-z ]{0,32}",
                proptest::option::of("[A-Z0-9-]{1,8}"),
                proptest::option::of(proptest::collection::vec("[a-z]{1,8}", 0..4)),
            )
                .prop_map(|(name, description, sku, categories)| {
                    let mut record = ProductRecord::new("tmp", name, description);
                    record.sku = sku;
                    record.categories = categories;
                    record
                })
        }

        fn catalog_strategy() -> impl Strategy<Value = Vec<ProductRecord>> {
            proptest::collection::vec(record_strategy(), 0..40).prop_map(|mut records| {
                for (i, record) in records.iter_mut().enumerate() {
                    record.id = format!("p-{i}").into();
                }
                records
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: the result is an order-preserving subsequence of the catalog.
            #[test]
            fn filter_is_ordered_subsequence(
                catalog in catalog_strategy(),
                query in "[A-Za-z]{0,3}"
            ) {
                let result = filter(&catalog, &query);

                let mut cursor = 0;
                for record in &result {
                    let position = catalog[cursor..]
                        .iter()
                        .position(|candidate| std::ptr::eq(candidate, *record));
                    prop_assert!(position.is_some(), "record {} out of order", record.id);
                    cursor += position.unwrap() + 1;
                }
            }

            /// Property: the empty query is the identity.
            #[test]
            fn empty_query_is_identity(catalog in catalog_strategy()) {
                let result = filter(&catalog, "");
                prop_assert_eq!(result.len(), catalog.len());
                for (kept, source) in result.iter().zip(catalog.iter()) {
                    prop_assert!(std::ptr::eq(*kept, source));
                }
            }

            /// Property: every hit contains the query in at least one searchable field.
            #[test]
            fn every_hit_contains_query(catalog in catalog_strategy(), query in "[A-Za-z]{1,3}") {
                let needle = query.to_lowercase();
                for record in filter(&catalog, &query) {
                    let hit = record.name.to_lowercase().contains(&needle)
                        || record.description.to_lowercase().contains(&needle)
                        || record.sku.as_deref().is_some_and(|s| s.to_lowercase().contains(&needle))
                        || record.tags().iter().any(|t| t.to_lowercase().contains(&needle));
                    prop_assert!(hit, "record {} matched without a field hit", record.id);
                }
            }
        }
    }
}
