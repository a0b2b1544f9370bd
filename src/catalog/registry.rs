//! The immutable template registry.

use super::builtin;
use super::types::{Template, TemplateSummary};
use crate::error::{MarketError, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// An ordered, immutable list of templates with an id index.
///
/// Built once at startup and then only read, so a `&Catalog` can be shared
/// freely across threads.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_templates(builtin::templates()).expect("builtin template ids are unique")
    }

    /// Build a catalog from an explicit list, keeping its order.
    ///
    /// Fails with `CatalogError` when two templates share an id.
    pub fn from_templates(templates: Vec<Template>) -> Result<Self> {
        let mut index = HashMap::with_capacity(templates.len());
        for (position, template) in templates.iter().enumerate() {
            if index.insert(template.id.clone(), position).is_some() {
                return Err(MarketError::CatalogError(format!(
                    "duplicate template id '{}'",
                    template.id
                )));
            }
        }
        debug!(count = templates.len(), "catalog built");
        Ok(Self { templates, index })
    }

    /// Parse a catalog file: a YAML list of templates.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let templates: Vec<Template> = serde_yaml::from_str(yaml)
            .map_err(|e| MarketError::CatalogError(format!("failed to parse catalog YAML: {}", e)))?;
        Self::from_templates(templates)
    }

    /// Load a catalog file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MarketError::CatalogError(format!(
                "failed to read catalog file '{}': {}",
                path.display(),
                e
            ))
        })?;
        debug!(path = %path.display(), "loading catalog file");
        Self::from_yaml(&content)
    }

    /// Append `other`'s templates after this catalog's, rejecting id collisions.
    pub fn merged(self, other: Catalog) -> Result<Self> {
        let mut templates = self.templates;
        templates.extend(other.templates);
        Self::from_templates(templates)
    }

    /// Public summaries of every template, in declared order.
    pub fn list_templates(&self) -> Vec<TemplateSummary> {
        self.templates.iter().map(TemplateSummary::from).collect()
    }

    /// Look up a template by exact (case-sensitive) id.
    pub fn get_template(&self, id: &str) -> Option<&Template> {
        self.index.get(id).map(|&position| &self.templates[position])
    }

    /// All templates, in declared order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
