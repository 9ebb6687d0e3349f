//! Swagger 1.2 data model shared by the parser and every emitter.
//!
//! Field names follow the JSON layout the generated runtime module unmarshals
//! into, so every type here serializes to exactly the wire form served to
//! documentation clients.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Swagger specification version written into every listing and declaration.
pub const SWAGGER_VERSION: &str = "1.2";

/// Identifier of one API group.
///
/// Used both as a map key and as a directory name in the JSON tree output,
/// so it never carries leading or trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiGroupKey(String);

impl ApiGroupKey {
    /// Builds a key from a resource path such as `/pets` or `pets/`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the trimmed key is empty or contains
    /// `.` / `..` segments.
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(Error::Configuration(format!(
                "API group key '{}' is empty after trimming",
                raw
            )));
        }
        if trimmed
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(Error::Configuration(format!(
                "API group key '{}' is not a safe path",
                raw
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The sanitized key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key as a relative filesystem path.
    pub fn to_relative_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl TryFrom<String> for ApiGroupKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<ApiGroupKey> for String {
    fn from(key: ApiGroupKey) -> Self {
        key.0
    }
}

impl fmt::Display for ApiGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every documented group, ordered by key.
pub type TopLevelApis = BTreeMap<ApiGroupKey, ApiDeclaration>;

/// Root summary of the whole API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListing {
    pub api_version: String,
    pub swagger_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_path: String,
    #[serde(default)]
    pub apis: Vec<ApiRef>,
    #[serde(default)]
    pub info: Info,
}

/// Reference from the resource listing to one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRef {
    pub path: String,
    #[serde(default)]
    pub description: String,
}

/// Descriptive information about the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contact: String,
    #[serde(default, rename = "termsOfServiceUrl", skip_serializing_if = "String::is_empty")]
    pub terms_of_service_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license: String,
    #[serde(default, rename = "licenseUrl", skip_serializing_if = "String::is_empty")]
    pub license_url: String,
}

/// Per-group declaration of routes and models
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDeclaration {
    pub api_version: String,
    pub swagger_version: String,
    #[serde(default)]
    pub base_path: String,
    pub resource_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(default)]
    pub apis: Vec<ApiEntry>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub models: BTreeMap<String, Model>,
}

/// One documented route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEntry {
    /// Raw path template, e.g. `/pets/:id`
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// A single HTTP operation on a route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub http_method: String,
    pub nickname: String,
    #[serde(rename = "type", default)]
    pub response_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response_messages: Vec<ResponseMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
}

/// Element type of an array-valued operation result or property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsRef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Operation parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// path, query, body, header or form
    pub param_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(rename = "type", default)]
    pub param_data_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub required: bool,
}

/// Documented response code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub response_model: String,
}

/// Model definition derived from a source struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, ModelProperty>,
}

/// Property of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelProperty {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// The complete model consumed by the emitters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiModel {
    pub resource_listing: ResourceListing,
    pub apis: TopLevelApis,
}

impl ApiModel {
    pub fn new(resource_listing: ResourceListing, apis: TopLevelApis) -> Self {
        Self {
            resource_listing,
            apis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_group_key_trims_slashes() {
        assert_eq!(ApiGroupKey::new("/pets/").unwrap().as_str(), "pets");
        assert_eq!(ApiGroupKey::new(" /v1/users ").unwrap().as_str(), "v1/users");
    }

    #[test]
    fn test_group_key_rejects_unsafe_values() {
        assert!(ApiGroupKey::new("/").is_err());
        assert!(ApiGroupKey::new("").is_err());
        assert!(ApiGroupKey::new("../etc").is_err());
        assert!(ApiGroupKey::new("a//b").is_err());
    }

    #[test]
    fn test_group_key_relative_path() {
        let key = ApiGroupKey::new("v1/users").unwrap();
        assert_eq!(key.to_relative_path(), PathBuf::from("v1").join("users"));
    }

    #[test]
    fn test_group_key_as_json_map_key() {
        let mut apis = TopLevelApis::new();
        apis.insert(
            ApiGroupKey::new("store").unwrap(),
            ApiDeclaration::default(),
        );
        apis.insert(ApiGroupKey::new("pets").unwrap(), ApiDeclaration::default());

        let json = serde_json::to_string(&apis).unwrap();
        assert!(json.find("\"pets\"").unwrap() < json.find("\"store\"").unwrap());

        let back: TopLevelApis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, apis);
    }

    #[test]
    fn test_group_key_deserialize_rejects_empty() {
        let result: std::result::Result<ApiGroupKey, _> = serde_json::from_str("\"/\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_operation_field_names() {
        let op = Operation {
            http_method: "GET".to_string(),
            nickname: "getPet".to_string(),
            response_type: "Pet".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["httpMethod"], "GET");
        assert_eq!(value["type"], "Pet");
        assert!(value.get("items").is_none());
    }
}
