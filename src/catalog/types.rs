//! Template record types.
//!
//! Everything here is plain data: templates are authored once (in
//! `builtin.rs` or an extra catalog file) and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A parameterized prediction-market pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique, case-sensitive identifier (e.g. "flr-price").
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Image reference shown by UIs (URL or asset key).
    #[serde(default)]
    pub image: String,
    /// Variable schema keyed by variable name.
    #[serde(default)]
    pub variables: BTreeMap<String, VariableSpec>,
    /// Question prose with `{{token}}` placeholders.
    pub question: String,
    /// Resolution-definition prose with `{{token}}` placeholders.
    pub resolution_definition: String,
    /// Data sources in consensus order: the first is primary, the rest corroborate it.
    pub data_sources: Vec<DataSourceTemplate>,
    pub defaults: MarketDefaults,
}

/// Public projection of a template, as returned by `Catalog::list_templates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub variables: BTreeMap<String, VariableSpec>,
}

impl From<&Template> for TemplateSummary {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            category: template.category.clone(),
            image: template.image.clone(),
            variables: template.variables.clone(),
        }
    }
}

/// Type tag of a template variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// Short free text (team names, symbols).
    Text,
    /// Number, optionally with a display precision.
    Number,
    /// An instant, given as an RFC 3339 string.
    Datetime,
    /// One value out of `options`.
    Select,
    /// Id of an externally resolved entity (match, coin). Used for UI linking only.
    Entity,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::Text => "text",
            VariableKind::Number => "number",
            VariableKind::Datetime => "datetime",
            VariableKind::Select => "select",
            VariableKind::Entity => "entity",
        }
    }
}

/// Schema entry for one template variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSpec {
    #[serde(rename = "type")]
    pub kind: VariableKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Maximum fraction digits when the value is displayed (numbers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Kind of external entity referenced (entity variables only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl VariableSpec {
    fn new(kind: VariableKind) -> Self {
        Self {
            kind,
            required: false,
            label: None,
            default: None,
            decimals: None,
            options: Vec::new(),
            entity: None,
        }
    }

    pub fn text() -> Self {
        Self::new(VariableKind::Text)
    }

    pub fn number() -> Self {
        Self::new(VariableKind::Number)
    }

    pub fn datetime() -> Self {
        Self::new(VariableKind::Datetime)
    }

    pub fn select(options: &[(&str, &str)]) -> Self {
        let mut spec = Self::new(VariableKind::Select);
        spec.options = options
            .iter()
            .map(|(value, label)| SelectOption {
                value: (*value).to_string(),
                label: (*label).to_string(),
            })
            .collect();
        spec
    }

    pub fn entity(kind: &str) -> Self {
        let mut spec = Self::new(VariableKind::Entity);
        spec.entity = Some(kind.to_string());
        spec
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }
}

/// A value/label pair for select variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// HTTP method of a data-source query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

/// One external source of truth plus the rule that reduces its response to an outcome index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceTemplate {
    /// Short display name (e.g. "coingecko").
    pub name: String,
    #[serde(default)]
    pub method: HttpMethod,
    /// Endpoint URL with placeholders.
    pub endpoint: String,
    /// Query parameters; values carry placeholders, keys do not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<BTreeMap<String, String>>,
    /// Static headers, copied verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Static request body, copied verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// jq expression yielding `{outcomeIdx: N}` or `{}` when unresolved.
    pub extraction_rule: String,
    #[serde(default)]
    pub result_shape: ResultShape,
}

/// ABI-style tuple descriptor of what the extraction rule produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultShape {
    pub components: Vec<ShapeComponent>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One field of a `ResultShape` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeComponent {
    pub internal_type: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Name of the single field every extraction rule must produce.
pub const OUTCOME_FIELD: &str = "outcomeIdx";

impl ResultShape {
    /// The `(uint256 outcomeIdx)` tuple shared by every data source.
    pub fn outcome_index() -> Self {
        Self {
            components: vec![ShapeComponent {
                internal_type: "uint256".to_string(),
                name: OUTCOME_FIELD.to_string(),
                kind: "uint256".to_string(),
            }],
            name: "outcome".to_string(),
            kind: "tuple".to_string(),
        }
    }

    /// Whether this is exactly one unsigned integer field named `outcomeIdx`.
    pub fn is_outcome_index(&self) -> bool {
        self.kind == "tuple"
            && matches!(
                self.components.as_slice(),
                [c] if c.name == OUTCOME_FIELD && c.kind.starts_with("uint")
            )
    }
}

impl Default for ResultShape {
    fn default() -> Self {
        Self::outcome_index()
    }
}

/// Market parameters copied verbatim into every generated market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDefaults {
    /// Outcomes indexed by position; `outcomes[i]` is outcome index `i`.
    pub outcomes: Vec<OutcomeDefault>,
    /// Share of data sources (percent) that must agree before resolution.
    pub consensus_threshold_pct: u8,
    pub collateral_token: String,
    pub market_cap_pct: u8,
}

/// A declared outcome and where UIs should show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeDefault {
    pub name: String,
    pub display_order: u32,
}

impl OutcomeDefault {
    pub fn new(name: &str, display_order: u32) -> Self {
        Self {
            name: name.to_string(),
            display_order,
        }
    }
}
