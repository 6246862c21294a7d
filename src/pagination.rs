//! # Pagination Module
//!
//! Offset/limit windows, the `page`/`perPage` request parameters that derive
//! them, and the paginated collection a use case returns.
//!
//! Request types opt into pagination by composition: they list
//! [`PaginationParams::PAGE`] and [`PaginationParams::PER_PAGE`] among their
//! fields and merge [`PaginationParams::rules`] into their own rules.
//!
//! ```rust
//! use usecase_http::pagination::{Pagination, PaginationParams};
//!
//! let window = PaginationParams::new("3", None::<i64>).pagination().unwrap();
//! assert_eq!(window, Pagination::new(40, Some(20)));
//! ```

use crate::coerce::coerce;
use crate::request::{FieldSet, FieldSpec};
use crate::signature::TypeSignature;
use crate::validation::{Numeric, PatchValidation, Positive, Rules};
use crate::value::{FieldValue, ValueType};
use serde::{Deserialize, Serialize};

/// Page size used when the request does not send `perPage`.
pub const DEFAULT_PER_PAGE: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("Page must be a positive integer")]
    InvalidPage(i64),
    #[error("Page window is out of range")]
    Overflow,
}

/// A window into a result set. `limit: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    offset: i64,
    limit: Option<i64>,
}

impl Pagination {
    #[must_use]
    pub const fn new(offset: i64, limit: Option<i64>) -> Self {
        Self { offset, limit }
    }

    /// One-based `page` of `limit` items each.
    pub fn from_page(page: i64, limit: i64) -> Result<Self, PaginationError> {
        if page <= 0 {
            return Err(PaginationError::InvalidPage(page));
        }
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or(PaginationError::Overflow)?;
        Ok(Self::new(offset, Some(limit)))
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }
}

impl Default for Pagination {
    /// First 50 items.
    fn default() -> Self {
        Self::new(0, Some(50))
    }
}

const PAGE_SIGNATURE: TypeSignature =
    TypeSignature::of(&[ValueType::String, ValueType::Int]).nullable();

/// Raw `page`/`perPage` values as sent by the client: a string, an integer or
/// absent (`null`).
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationParams {
    pub page: FieldValue,
    pub per_page: FieldValue,
}

impl PaginationParams {
    pub const PAGE: FieldSpec = FieldSpec::new("page", PAGE_SIGNATURE).default_null();
    pub const PER_PAGE: FieldSpec = FieldSpec::new("perPage", PAGE_SIGNATURE).default_null();

    pub fn new(page: impl Into<FieldValue>, per_page: impl Into<FieldValue>) -> Self {
        Self {
            page: page.into(),
            per_page: per_page.into(),
        }
    }

    /// Read `page` and `perPage` from populated fields; missing or unset
    /// fields count as absent.
    #[must_use]
    pub fn from_fields(fields: &FieldSet) -> Self {
        let read = |spec: &FieldSpec| fields.get(spec.name).cloned().unwrap_or(FieldValue::Null);
        Self {
            page: read(&Self::PAGE),
            per_page: read(&Self::PER_PAGE),
        }
    }

    /// Both parameters, when sent, must be positive numbers.
    #[must_use]
    pub fn rules() -> Rules {
        Rules::new()
            .field(
                Self::PAGE.name,
                PatchValidation::new().with(Positive).with(Numeric),
            )
            .field(
                Self::PER_PAGE.name,
                PatchValidation::new().with(Positive).with(Numeric),
            )
    }

    /// Window for these parameters with the standard page size.
    pub fn pagination(&self) -> Result<Pagination, PaginationError> {
        self.pagination_with_default(DEFAULT_PER_PAGE)
    }

    /// Absent `page` means page 1, absent `perPage` means `default_per_page`.
    pub fn pagination_with_default(
        &self,
        default_per_page: i64,
    ) -> Result<Pagination, PaginationError> {
        let page = to_int(&self.page)?.unwrap_or(1);
        let per_page = to_int(&self.per_page)?.unwrap_or(default_per_page);
        Pagination::from_page(page, per_page)
    }
}

/// `None` when absent; unparseable strings count as zero. Numbers too large
/// for an `i64` are an overflow rather than a saturated page.
fn to_int(value: &FieldValue) -> Result<Option<i64>, PaginationError> {
    if matches!(value, FieldValue::Null | FieldValue::Undefined) {
        return Ok(None);
    }
    if let Some(i) = coerce(value, ValueType::Int).and_then(|v| v.as_i64()) {
        return Ok(Some(i));
    }
    if coerce(value, ValueType::Float).is_some() {
        return Err(PaginationError::Overflow);
    }
    Ok(Some(0))
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedCollection<T> {
    items: Vec<T>,
    count: u64,
    pagination: Option<Pagination>,
}

impl<T> PaginatedCollection<T> {
    pub fn new(items: Vec<T>, count: u64, pagination: Option<Pagination>) -> Self {
        Self {
            items,
            count,
            pagination,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total matching items; may exceed `items().len()`.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PaginatedCollection<U> {
        PaginatedCollection {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            pagination: self.pagination,
        }
    }
}

impl<T> IntoIterator for PaginatedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PaginatedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let p = Pagination::default();
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), Some(50));
    }

    #[test]
    fn test_from_page() {
        for (page, limit, offset) in [(1, 50, 0), (2, 50, 50), (5, 10, 40), (100, 25, 2475), (5, 1, 4)] {
            let p = Pagination::from_page(page, limit).unwrap();
            assert_eq!(p.offset(), offset);
            assert_eq!(p.limit(), Some(limit));
        }
    }

    #[test]
    fn test_from_page_rejects_non_positive() {
        for page in [0, -1, -100] {
            let err = Pagination::from_page(page, 20).unwrap_err();
            assert_eq!(err.to_string(), "Page must be a positive integer");
        }
    }

    #[test]
    fn test_from_page_overflow() {
        assert_eq!(Pagination::from_page(i64::MAX, 20), Err(PaginationError::Overflow));
        assert_eq!(Pagination::from_page(i64::MAX, 1), Ok(Pagination::new(i64::MAX - 1, Some(1))));
    }

    #[test]
    fn test_params_out_of_range() {
        let err = PaginationParams::new("1e300", FieldValue::Null).pagination();
        assert_eq!(err, Err(PaginationError::Overflow));
        let err = PaginationParams::new(FieldValue::Float(1e20), FieldValue::Null).pagination();
        assert_eq!(err, Err(PaginationError::Overflow));
    }

    #[test]
    fn test_params_defaults() {
        let p = PaginationParams::new(FieldValue::Null, FieldValue::Null)
            .pagination()
            .unwrap();
        assert_eq!(p, Pagination::new(0, Some(20)));
    }

    #[test]
    fn test_params_strings_and_ints() {
        let cases = [
            (FieldValue::from("5"), FieldValue::from("25"), 100, 25),
            (FieldValue::Int(3), FieldValue::Int(15), 30, 15),
            (FieldValue::from("10"), FieldValue::from("100"), 900, 100),
            (FieldValue::Null, FieldValue::Int(50), 0, 50),
        ];
        for (page, per_page, offset, limit) in cases {
            let p = PaginationParams::new(page, per_page).pagination().unwrap();
            assert_eq!((p.offset(), p.limit()), (offset, Some(limit)));
        }
    }

    #[test]
    fn test_garbage_page_is_rejected() {
        let err = PaginationParams::new("abc", FieldValue::Null).pagination();
        assert_eq!(err, Err(PaginationError::InvalidPage(0)));
    }

    #[test]
    fn test_collection_keeps_total_count() {
        let c = PaginatedCollection::new(vec!["a", "b"], 100, Some(Pagination::new(0, Some(2))));
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.count(), 100);
        assert_eq!(c.pagination().and_then(Pagination::limit), Some(2));
        assert_eq!(c.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
