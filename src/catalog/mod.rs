//! Template catalog.
//!
//! The catalog is an explicit, ordered list of `Template` records built once
//! at startup (`Catalog::builtin`, optionally merged with a YAML catalog
//! file) and never mutated afterwards. Lookup by id is exact and
//! case-sensitive.

mod builtin;
pub mod check;
mod registry;
pub mod types;


pub use check::{CatalogIssue, check_catalog, check_template};
pub use registry::Catalog;
pub use types::{
    DataSourceTemplate, HttpMethod, MarketDefaults, OUTCOME_FIELD, OutcomeDefault, ResultShape,
    SelectOption, ShapeComponent, Template, TemplateSummary, VariableKind, VariableSpec,
};
