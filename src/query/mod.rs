//! Query construction
//!
//! A [`QueryBuilder`] accumulates the parameters of one logical request
//! against a module and validates pagination values at the point they are
//! set, so misuse surfaces before any network interaction. Building a
//! request produces an immutable [`QuerySpec`] snapshot; the builder itself
//! stays usable, which is what lets auto-pagination re-execute it once per
//! page with only the page number varying.

use crate::entity::{EntityDescriptor, ModuleResolver};
use crate::error::{Error, Result};
use crate::version::{ApiVersion, PageLimits};
use std::collections::HashMap;


/// Wire name of the page-number parameter
pub const PAGE_PARAM: &str = "page";

/// Wire name of the page-size parameter
pub const PER_PAGE_PARAM: &str = "per_page";

/// Scalar value of a query parameter
///
/// Callers keep type information until request build time; values render to
/// wire strings only when the request is emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Float(f64),
}

impl ParamValue {
    /// Render the value as it goes on the wire
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Float(f) => f.to_string(),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

/// Immutable snapshot of one request against a module
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    /// Target module
    pub module: String,
    /// Accumulated query parameters (keys unique, last write wins)
    pub parameters: HashMap<String, ParamValue>,
    /// Explicit page number, when the caller took manual control
    pub page: Option<u32>,
    /// Requested page size
    pub per_page: Option<u32>,
    /// Whether the paginator should drive this query across all pages
    pub auto_paginate: bool,
}

impl QuerySpec {
    /// Render the final wire parameters for this request
    ///
    /// The pagination fields own the `page` and `per_page` keys; a free-form
    /// parameter with either name is overwritten here. `per_page` falls back
    /// to the protocol default so the emitted value and the paginator's
    /// stopping decision can never disagree.
    pub fn wire_parameters(&self, limits: PageLimits) -> HashMap<String, String> {
        let mut params: HashMap<String, String> = self
            .parameters
            .iter()
            .map(|(key, value)| (key.clone(), value.to_wire()))
            .collect();

        if let Some(page) = self.page {
            params.insert(PAGE_PARAM.to_string(), page.to_string());
        }
        let per_page = self.per_page.unwrap_or(limits.default_per_page);
        params.insert(PER_PAGE_PARAM.to_string(), per_page.to_string());

        params
    }
}

/// Fluent accumulator for one logical query against a module
///
/// Fallible setters validate synchronously and return the builder, so
/// chains read naturally and fail at the offending call site:
///
/// ```
/// use crmkit::query::QueryBuilder;
/// use crmkit::version::ApiVersion;
///
/// # fn main() -> crmkit::Result<()> {
/// let builder = QueryBuilder::new("Leads", ApiVersion::V2)
///     .parameter("sort_order", "asc")
///     .per_page(100)?;
/// let spec = builder.build_request();
/// assert!(spec.auto_paginate);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    spec: QuerySpec,
    limits: PageLimits,
}

impl QueryBuilder {
    /// Start a query against a module
    pub fn new(module: impl Into<String>, version: ApiVersion) -> Self {
        Self {
            spec: QuerySpec {
                module: module.into(),
                parameters: HashMap::new(),
                page: None,
                per_page: None,
                auto_paginate: true,
            },
            limits: version.limits(),
        }
    }

    /// Start a query against the module an entity type resolves to
    pub fn for_entity(descriptor: &EntityDescriptor, version: ApiVersion) -> Self {
        Self::new(ModuleResolver::resolve(descriptor).module, version)
    }

    /// Set a query parameter, overwriting any prior value for the key
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.spec.parameters.insert(key.into(), value.into());
        self
    }

    /// Request one specific page, taking manual control of pagination
    ///
    /// Fails with [`Error::InvalidParameter`] when `page` is zero. On
    /// success auto-pagination is switched off: an explicit page means the
    /// caller drives.
    pub fn page(mut self, page: u32) -> Result<Self> {
        if page == 0 {
            return Err(Error::invalid_parameter(
                PAGE_PARAM,
                "page numbers start at 1",
            ));
        }
        self.spec.page = Some(page);
        self.spec.auto_paginate = false;
        Ok(self)
    }

    /// Set the page size
    ///
    /// Fails with [`Error::InvalidParameter`] when `count` is zero or above
    /// the protocol ceiling. Does not touch the auto-pagination flag.
    pub fn per_page(mut self, count: u32) -> Result<Self> {
        if count == 0 || count > self.limits.max_per_page {
            return Err(Error::invalid_parameter(
                PER_PAGE_PARAM,
                format!("must be between 1 and {}", self.limits.max_per_page),
            ));
        }
        self.spec.per_page = Some(count);
        Ok(self)
    }

    /// Set the auto-pagination flag unconditionally
    ///
    /// Legal after an explicit page: last write wins, and the explicit page
    /// then pins where auto-pagination starts.
    #[must_use]
    pub fn auto_paginate(mut self, flag: bool) -> Self {
        self.spec.auto_paginate = flag;
        self
    }

    /// The page-size limits this builder validates against
    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Produce an immutable snapshot of the current state
    ///
    /// Does not mutate the builder; repeated calls on an unmodified builder
    /// yield identical snapshots.
    pub fn build_request(&self) -> QuerySpec {
        self.spec.clone()
    }
}
