//! Data source compilation.
//!
//! Turns a template's `DataSourceTemplate`s into concrete `DataSourceQuery`
//! descriptors for the oracle executor. Output order is declared order: the
//! first query is the primary source and later ones corroborate it, so the
//! order carries resolution semantics.

use crate::catalog::{DataSourceTemplate, HttpMethod, ResultShape};
use crate::error::{MarketError, Result};
use crate::substitute::Substituter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A ready-to-dispatch data-source query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceQuery {
    pub name: String,
    pub method: HttpMethod,
    pub endpoint: String,
    /// Absent when the template declares no query parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    pub extraction_rule: String,
    /// The result shape serialized as JSON, independent of any in-memory type.
    pub result_shape: String,
}

/// Serialize a result shape to its self-contained JSON form.
pub fn serialize_result_shape(shape: &ResultShape) -> Result<String> {
    serde_json::to_string(shape)
        .map_err(|e| MarketError::CatalogError(format!("failed to serialize result shape: {}", e)))
}

/// Compile one data source.
///
/// Substitutes the endpoint, every query-parameter value and the extraction
/// rule; method, headers and body are copied verbatim.
pub fn compile_data_source(
    position: usize,
    source: &DataSourceTemplate,
    substituter: &Substituter<'_>,
) -> Result<DataSourceQuery> {
    let field = |name: &str| format!("dataSources[{}].{}", position, name);

    let endpoint = substituter.apply_field(&source.endpoint, &field("endpoint"))?;

    let query_params = match &source.query_params {
        Some(params) if !params.is_empty() => {
            let mut compiled = BTreeMap::new();
            for (key, value) in params {
                let rendered =
                    substituter.apply_field(value, &field(&format!("queryParams.{}", key)))?;
                compiled.insert(key.clone(), rendered);
            }
            Some(compiled)
        }
        _ => None,
    };

    let extraction_rule =
        substituter.apply_field(&source.extraction_rule, &field("extractionRule"))?;

    Ok(DataSourceQuery {
        name: source.name.clone(),
        method: source.method,
        endpoint,
        query_params,
        headers: source.headers.clone(),
        body: source.body.clone(),
        extraction_rule,
        result_shape: serialize_result_shape(&source.result_shape)?,
    })
}

/// Compile every data source, preserving declared order.
pub fn compile_data_sources(
    sources: &[DataSourceTemplate],
    substituter: &Substituter<'_>,
) -> Result<Vec<DataSourceQuery>> {
    sources
        .iter()
        .enumerate()
        .map(|(position, source)| compile_data_source(position, source, substituter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingContext;

    fn source(name: &str, endpoint: &str, rule: &str) -> DataSourceTemplate {
        DataSourceTemplate {
            name: name.to_string(),
            method: HttpMethod::Get,
            endpoint: endpoint.to_string(),
            query_params: None,
            headers: None,
            body: None,
            extraction_rule: rule.to_string(),
            result_shape: ResultShape::outcome_index(),
        }
    }

    fn binding() -> BindingContext {
        [
            ("apiProxyPrefix", "https://proxy.test"),
            ("coinId", "bitcoin"),
            ("price", "100"),
            ("comparisonOp", ">="),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_order_is_preserved() {
        let sources = vec![
            source("a", "{{apiProxyPrefix}}/a", "0"),
            source("b", "{{apiProxyPrefix}}/b", "1"),
            source("c", "{{apiProxyPrefix}}/c", "2"),
        ];
        let b = binding();
        let subst = Substituter::new(&b).unwrap();
        let compiled = compile_data_sources(&sources, &subst).unwrap();
        let names: Vec<&str> = compiled.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(compiled[2].endpoint, "https://proxy.test/c");
    }

    #[test]
    fn test_endpoint_params_and_rule_are_substituted() {
        let mut s = source(
            "coingecko",
            "{{apiProxyPrefix}}/coins/{{coinId}}",
            ".usd {{comparisonOp}} {{price}}",
        );
        s.query_params = Some(BTreeMap::from([
            ("ids".to_string(), "{{coinId}}".to_string()),
            ("vs".to_string(), "usd".to_string()),
        ]));
        let b = binding();
        let subst = Substituter::new(&b).unwrap();
        let q = compile_data_source(0, &s, &subst).unwrap();

        assert_eq!(q.endpoint, "https://proxy.test/coins/bitcoin");
        let params = q.query_params.unwrap();
        assert_eq!(params.get("ids").map(String::as_str), Some("bitcoin"));
        assert_eq!(params.get("vs").map(String::as_str), Some("usd"));
        assert_eq!(q.extraction_rule, ".usd >= 100");
    }

    #[test]
    fn test_missing_or_empty_query_params_are_omitted() {
        let b = binding();
        let subst = Substituter::new(&b).unwrap();

        let q = compile_data_source(0, &source("a", "/a", "0"), &subst).unwrap();
        assert!(q.query_params.is_none());

        let mut s = source("a", "/a", "0");
        s.query_params = Some(BTreeMap::new());
        let q = compile_data_source(0, &s, &subst).unwrap();
        assert!(q.query_params.is_none());

        let json = serde_json::to_value(&q).unwrap();
        assert!(json.get("queryParams").is_none());
    }

    #[test]
    fn test_headers_and_body_are_copied_verbatim() {
        let mut s = source("a", "/a", "0");
        s.method = HttpMethod::Post;
        s.headers = Some(BTreeMap::from([(
            "X-Coin".to_string(),
            "{{coinId}}".to_string(),
        )]));
        s.body = Some(serde_json::json!({ "coin": "{{coinId}}" }));
        let b = binding();
        let subst = Substituter::new(&b).unwrap();
        let q = compile_data_source(0, &s, &subst).unwrap();

        assert_eq!(q.method, HttpMethod::Post);
        assert_eq!(
            q.headers.unwrap().get("X-Coin").map(String::as_str),
            Some("{{coinId}}")
        );
        assert_eq!(q.body.unwrap()["coin"], "{{coinId}}");
    }

    #[test]
    fn test_result_shape_is_serialized_to_json() {
        let b = binding();
        let subst = Substituter::new(&b).unwrap();
        let q = compile_data_source(0, &source("a", "/a", "0"), &subst).unwrap();

        let parsed: ResultShape = serde_json::from_str(&q.result_shape).unwrap();
        assert!(parsed.is_outcome_index());
        assert!(q.result_shape.contains("\"name\":\"outcomeIdx\""));
        assert!(q.result_shape.contains("\"type\":\"tuple\""));
    }

    #[test]
    fn test_strict_mode_names_the_failing_field() {
        let mut s = source("a", "/a", "0");
        s.query_params = Some(BTreeMap::from([(
            "symbol".to_string(),
            "{{symbol}}".to_string(),
        )]));
        let b = binding();
        let subst = Substituter::new(&b).unwrap().strict(true);
        let err = compile_data_sources(&[source("ok", "/ok", "0"), s], &subst).unwrap_err();
        assert_eq!(
            err,
            MarketError::UnresolvedPlaceholder {
                token: "{{symbol}}".to_string(),
                field: "dataSources[1].queryParams.symbol".to_string(),
            }
        );
    }
}
