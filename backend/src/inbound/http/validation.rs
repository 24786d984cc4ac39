//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query strings and path segments arrive as raw text so handlers can report
//! which field was wrong instead of relying on Actix's generic extractor
//! errors. Every helper returns an `invalid_request` error whose details name
//! the field, the rejected value and a stable machine-readable code.

use std::num::NonZeroU32;
use std::str::FromStr;

use pagination::PageRequest;
use serde_json::json;

use crate::domain::{Error, ListingId, ListingStatus, SearchQuery, SearchScope, SortMode};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidPage,
    InvalidSort,
    InvalidScope,
    InvalidStatus,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::InvalidSort => "invalid_sort",
            ErrorCode::InvalidScope => "invalid_scope",
            ErrorCode::InvalidStatus => "invalid_status",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) const PAGE_FIELD: FieldName = FieldName::new("page");
pub(crate) const SORT_FIELD: FieldName = FieldName::new("sort");
pub(crate) const QUERY_FIELD: FieldName = FieldName::new("q");
pub(crate) const SCOPE_FIELD: FieldName = FieldName::new("scope");
pub(crate) const STATUS_FIELD: FieldName = FieldName::new("status");
pub(crate) const LISTING_ID_FIELD: FieldName = FieldName::new("id");

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

/// Parse a listing id from a path segment.
pub(crate) fn parse_listing_id(value: &str) -> Result<ListingId, Error> {
    ListingId::from_str(value).map_err(|_| invalid_uuid_error(LISTING_ID_FIELD, value))
}

/// Parse the 1-based `page` parameter; absent means the first page.
///
/// Zero, negative and non-numeric values are rejected. Pages past the end are
/// accepted and resolve to an empty page.
pub(crate) fn parse_page(value: Option<&str>, page_size: NonZeroU32) -> Result<PageRequest, Error> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(PageRequest::first(page_size));
    };
    let invalid = || {
        ValidationError::new(PAGE_FIELD.as_str(), "page must be a positive integer")
            .with_value(ErrorCode::InvalidPage, raw)
    };
    let number: u32 = raw.parse().map_err(|_| invalid())?;
    PageRequest::new(number, page_size.get()).map_err(|_| invalid())
}

/// Parse the `sort` parameter; absent or blank means newest first.
pub(crate) fn parse_sort(value: Option<&str>) -> Result<SortMode, Error> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(SortMode::default()),
        Some(raw) => raw.parse().map_err(|_| {
            ValidationError::new(
                SORT_FIELD.as_str(),
                "sort must be one of newest, priceDesc, priceAsc",
            )
            .with_value(ErrorCode::InvalidSort, raw)
        }),
    }
}

/// Parse the `scope` parameter; absent means a full search.
pub(crate) fn parse_scope(value: Option<&str>) -> Result<SearchScope, Error> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(SearchScope::default()),
        Some("quick") => Ok(SearchScope::Quick),
        Some("full") => Ok(SearchScope::Full),
        Some(raw) => Err(
            ValidationError::new(SCOPE_FIELD.as_str(), "scope must be quick or full")
                .with_value(ErrorCode::InvalidScope, raw),
        ),
    }
}

/// Parse the mandatory search text.
pub(crate) fn parse_query(value: Option<&str>) -> Result<SearchQuery, Error> {
    let raw = value.ok_or_else(|| missing_field_error(QUERY_FIELD))?;
    SearchQuery::new(raw).map_err(|err| {
        ValidationError::new(QUERY_FIELD.as_str(), err.to_string())
            .with_code(ErrorCode::MissingField)
    })
}

/// Parse a listing status code.
pub(crate) fn parse_status(value: &str) -> Result<ListingStatus, Error> {
    ListingStatus::from_str(value).map_err(|_| {
        ValidationError::new(STATUS_FIELD.as_str(), "status must be active, sold or hidden")
            .with_value(ErrorCode::InvalidStatus, value)
    })
}
