//! Knowledge base schema types.

use serde::{Deserialize, Serialize};

/// Static dataset backing recommendations, loaded once at process start.
///
/// All sequence fields default to empty when absent from the JSON file, so a
/// sparse data file deserializes without errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBase {
    /// Opaque brand record, passed through to the prompt unexamined.
    pub brand: serde_json::Value,
    /// Opaque contact record, passed through to the prompt unexamined.
    pub contact: serde_json::Value,
    /// Service packages, in presentation order.
    pub packages: Vec<Package>,
    /// FAQ entries, in presentation order.
    pub faq: Vec<FaqEntry>,
    /// Question-to-package routing rules.
    pub routing: RoutingConfig,
}

/// A service package offered to prospects.
///
/// Only `id` is interpreted; every other descriptive field rides in the
/// flattened map and reaches the prompt untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Unique package identifier referenced by routing rules.
    pub id: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// A single FAQ entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqEntry {
    /// Question text, matched against the visitor's question.
    pub q: String,
    /// Answer text, passed through unexamined.
    pub a: String,
}

/// Routing section of the knowledge base.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingConfig {
    /// Rules mapping trigger substrings to package ids.
    pub package_suggestion_rules: Vec<SuggestionRule>,
}

/// A rule associating trigger substrings with a target package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestionRule {
    /// Substring patterns matched case-insensitively against the question.
    pub triggers: Vec<String>,
    /// Package id selected when a trigger matches. Rules without a target
    /// are ignored.
    pub target_package_id: Option<String>,
}

/// Per-request filtered view of the knowledge base.
///
/// Borrows from the [`KnowledgeBase`]; constructed by
/// [`KnowledgeBase::reduce`], serialized into the prompt, and discarded with
/// the request.
#[derive(Debug, Serialize)]
pub struct ReducedContext<'a> {
    pub brand: &'a serde_json::Value,
    pub contact: &'a serde_json::Value,
    pub packages: Vec<&'a Package>,
    pub faq: Vec<&'a FaqEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_deserializes_with_defaults() {
        let kb: KnowledgeBase = serde_json::from_str("{}").unwrap();
        assert!(kb.brand.is_null());
        assert!(kb.packages.is_empty());
        assert!(kb.faq.is_empty());
        assert!(kb.routing.package_suggestion_rules.is_empty());
    }

    #[test]
    fn test_package_preserves_descriptive_fields() {
        let json = r#"{
            "id": "pkg-audit",
            "name": "Security Audit",
            "durationWeeks": 2
        }"#;
        let package: Package = serde_json::from_str(json).unwrap();
        assert_eq!(package.id, "pkg-audit");
        assert_eq!(package.details["name"], "Security Audit");
        assert_eq!(package.details["durationWeeks"], 2);

        // Round-trip keeps the descriptive fields at the top level.
        let value = serde_json::to_value(&package).unwrap();
        assert_eq!(value["id"], "pkg-audit");
        assert_eq!(value["name"], "Security Audit");
    }

    #[test]
    fn test_routing_rules_use_camel_case_names() {
        let json = r#"{
            "packageSuggestionRules": [
                { "triggers": ["migration"], "targetPackageId": "pkg-migration" }
            ]
        }"#;
        let routing: RoutingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(routing.package_suggestion_rules.len(), 1);
        assert_eq!(
            routing.package_suggestion_rules[0].target_package_id.as_deref(),
            Some("pkg-migration")
        );
    }

    #[test]
    fn test_rule_without_target_deserializes() {
        let json = r#"{ "triggers": ["pricing"] }"#;
        let rule: SuggestionRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.triggers, vec!["pricing"]);
        assert!(rule.target_package_id.is_none());
    }

    #[test]
    fn test_faq_entry_defaults_to_empty_strings() {
        let entry: FaqEntry = serde_json::from_str("{}").unwrap();
        assert!(entry.q.is_empty());
        assert!(entry.a.is_empty());
    }

    #[test]
    fn test_reduced_context_serializes_all_sections() {
        let kb = KnowledgeBase {
            brand: serde_json::json!({ "name": "CelesteIQ" }),
            contact: serde_json::json!({ "email": "hello@celesteiq.com" }),
            packages: vec![Package {
                id: "pkg-audit".to_string(),
                details: serde_json::Map::new(),
            }],
            faq: vec![FaqEntry {
                q: "What do you offer?".to_string(),
                a: "Packages.".to_string(),
            }],
            routing: RoutingConfig::default(),
        };
        let context = ReducedContext {
            brand: &kb.brand,
            contact: &kb.contact,
            packages: kb.packages.iter().collect(),
            faq: kb.faq.iter().collect(),
        };

        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(value["brand"]["name"], "CelesteIQ");
        assert_eq!(value["contact"]["email"], "hello@celesteiq.com");
        assert_eq!(value["packages"][0]["id"], "pkg-audit");
        assert_eq!(value["faq"][0]["q"], "What do you offer?");
    }
}
