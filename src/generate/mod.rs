//! Market generation.
//!
//! `Generator::generate` is the single entry point: resolve the template,
//! bind variables, substitute prose, compile data sources, copy defaults.
//! It either returns a complete `GeneratedMarket` or exactly one error.

use crate::binding::{Variables, bind};
use crate::catalog::{Catalog, MarketDefaults};
use crate::compiler::{DataSourceQuery, compile_data_sources};
use crate::config::Config;
use crate::error::{MarketError, Result};
use crate::substitute::Substituter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};


/// A concrete market definition produced from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMarket {
    pub template_id: String,
    pub question: String,
    pub resolution_definition: String,
    /// Queries in consensus order.
    pub data_sources: Vec<DataSourceQuery>,
    /// The template's defaults, untouched by variables.
    pub defaults: MarketDefaults,
}

/// Per-deployment generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Value of `{{apiProxyPrefix}}` unless the caller supplies one.
    pub api_proxy_prefix: String,
    /// Fail on unresolved placeholders instead of leaving them in the output.
    pub strict_placeholders: bool,
}

impl GeneratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_proxy_prefix: config.api_proxy_prefix().to_string(),
            strict_placeholders: config.strict_placeholders,
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Generates markets from a catalog.
///
/// Holds only shared references and immutable options, so one generator can
/// serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    catalog: &'a Catalog,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    pub fn new(catalog: &'a Catalog, options: GeneratorOptions) -> Self {
        Self { catalog, options }
    }

    /// Generate a market from template `template_id`.
    ///
    /// # Errors
    ///
    /// * `MarketError::TemplateNotFound` - no template has this id
    /// * `MarketError::InvalidAttestationTime` - `attestationTime` missing or unparsable
    /// * `MarketError::UnresolvedPlaceholder` - strict mode only
    pub fn generate(&self, template_id: &str, variables: &Variables) -> Result<GeneratedMarket> {
        debug!(%template_id, "generate: called");

        let template = self
            .catalog
            .get_template(template_id)
            .ok_or_else(|| MarketError::TemplateNotFound(template_id.to_string()))?;

        let binding = bind(
            &template.variables,
            variables,
            &self.options.api_proxy_prefix,
        )?;
        let substituter =
            Substituter::new(&binding)?.strict(self.options.strict_placeholders);

        let rendered = substituter
            .apply_field(&template.question, "question")
            .and_then(|question| {
                let resolution = substituter
                    .apply_field(&template.resolution_definition, "resolutionDefinition")?;
                let sources = compile_data_sources(&template.data_sources, &substituter)?;
                Ok((question, resolution, sources))
            });
        let (question, resolution_definition, data_sources) = match rendered {
            Ok(parts) => parts,
            Err(err) => {
                warn!(%template_id, error = %err, "generate: rejected");
                return Err(err);
            }
        };

        info!(
            %template_id,
            sources = data_sources.len(),
            "generate: market generated"
        );

        Ok(GeneratedMarket {
            template_id: template.id.clone(),
            question,
            resolution_definition,
            data_sources,
            defaults: template.defaults.clone(),
        })
    }
}

/// Generate with default options (lenient substitution, default environment's proxy).
pub fn generate(
    catalog: &Catalog,
    template_id: &str,
    variables: &Variables,
) -> Result<GeneratedMarket> {
    Generator::new(catalog, GeneratorOptions::default()).generate(template_id, variables)
}
