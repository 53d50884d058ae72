//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two value objects holding the same
//! values are interchangeable (a price, a category facet, a page cursor).

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (`Price(12.5) == Price(12.5)`)
/// - **Entity**: has identity (two product records with the same id are the
///   same product, even if their names differ)
///
/// Value objects should be immutable: to "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(12.5), Price(12.5));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
