//! Plugin and pipeline declarations.
//!
//! These values are built once from declarative documents and never mutated
//! by rendering. Wire names follow the logging resource the documents come
//! from (`type`, `valueFrom.secretKeyRef`, ...).

use std::collections::BTreeMap;
use std::path::Path;

use logpipe_secure::SecretReference;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A filter or output stage of the log agent and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    /// Selects the template the plugin is rendered with.
    #[serde(rename = "type")]
    pub plugin_type: String,

    #[serde(default)]
    pub name: String,

    /// Resolved and written into the context in this order; a later
    /// parameter overwrites an earlier one with the same name.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Plugin {
    pub fn new(plugin_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            plugin_type: plugin_type.into(),
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Parse a single plugin from a YAML (or JSON) document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ModelError> {
        serde_yaml::from_str(contents).map_err(|source| ModelError::Parse {
            origin: "plugin document".to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        load_document(path)
    }

    /// True when no parameter takes its value from a secret.
    pub fn is_literal_only(&self) -> bool {
        self.parameters
            .iter()
            .all(|p| matches!(p.source(), ParameterSource::Literal(_)))
    }
}

/// Where a parameter's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSource {
    Literal(String),
    Secret(SecretReference),
}

/// A named value supplied to a plugin.
///
/// The name is never empty. On the wire a parameter carries an optional
/// literal `value` and an optional `valueFrom`; when both are present the
/// secret reference wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParameterDocument", into = "ParameterDocument")]
pub struct Parameter {
    name: String,
    source: ParameterSource,
}

impl Parameter {
    pub fn new(name: impl Into<String>, source: ParameterSource) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyParameterName);
        }
        Ok(Self { name, source })
    }

    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ModelError> {
        Self::new(name, ParameterSource::Literal(value.into()))
    }

    pub fn secret(
        name: impl Into<String>,
        secret_name: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::new(
            name,
            ParameterSource::Secret(SecretReference::new(secret_name, key)),
        )
    }

    /// The context key this parameter is written under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &ParameterSource {
        &self.source
    }

    pub fn secret_reference(&self) -> Option<&SecretReference> {
        match &self.source {
            ParameterSource::Secret(reference) => Some(reference),
            ParameterSource::Literal(_) => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParameterDocument {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_from: Option<ValueFrom>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueFrom {
    secret_key_ref: SecretReference,
}

impl TryFrom<ParameterDocument> for Parameter {
    type Error = ModelError;

    fn try_from(doc: ParameterDocument) -> Result<Self, Self::Error> {
        let source = match doc.value_from {
            Some(value_from) => ParameterSource::Secret(value_from.secret_key_ref),
            None => ParameterSource::Literal(doc.value.unwrap_or_default()),
        };
        Self::new(doc.name, source)
    }
}

impl From<Parameter> for ParameterDocument {
    fn from(parameter: Parameter) -> Self {
        let (value, value_from) = match parameter.source {
            ParameterSource::Literal(value) => (Some(value), None),
            ParameterSource::Secret(secret_key_ref) => (None, Some(ValueFrom { secret_key_ref })),
        };
        Self {
            name: parameter.name,
            value,
            value_from,
        }
    }
}

/// Selects which log streams a pipeline applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    #[serde(default)]
    pub label: BTreeMap<String, String>,
}

/// A complete logging pipeline: an input selector plus ordered filter and output
/// plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingPipeline {
    #[serde(default)]
    pub input: Input,
    #[serde(default)]
    pub filter: Vec<Plugin>,
    #[serde(default)]
    pub output: Vec<Plugin>,
}

impl LoggingPipeline {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ModelError> {
        serde_yaml::from_str(contents).map_err(|source| ModelError::Parse {
            origin: "pipeline document".to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        load_document(path)
    }
}

fn load_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ModelError::Parse {
        origin: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_parameter() {
        let plugin = Plugin::from_yaml_str(
            r#"
type: tail
name: app-logs
parameters:
  - name: path
    value: /var/log/app.log
"#,
        )
        .unwrap();
        assert_eq!(plugin.plugin_type, "tail");
        assert_eq!(plugin.name, "app-logs");
        assert_eq!(
            plugin.parameters[0].source(),
            &ParameterSource::Literal("/var/log/app.log".to_string())
        );
        assert!(plugin.is_literal_only());
    }

    #[test]
    fn test_value_from_takes_precedence() {
        let plugin = Plugin::from_yaml_str(
            r#"
type: mysql
parameters:
  - name: password
    value: ignored
    valueFrom:
      secretKeyRef:
        name: db-cred
        key: password
"#,
        )
        .unwrap();
        assert_eq!(
            plugin.parameters[0].secret_reference(),
            Some(&SecretReference::new("db-cred", "password"))
        );
        assert!(!plugin.is_literal_only());
    }

    #[test]
    fn test_missing_value_is_empty_literal() {
        let plugin = Plugin::from_yaml_str("type: stdout\nparameters:\n  - name: flag\n").unwrap();
        assert_eq!(
            plugin.parameters[0].source(),
            &ParameterSource::Literal(String::new())
        );
    }

    #[test]
    fn test_empty_parameter_name_rejected() {
        assert!(matches!(
            Parameter::literal("", "x"),
            Err(ModelError::EmptyParameterName)
        ));

        let err = Plugin::from_yaml_str("type: stdout\nparameters:\n  - name: ''\n    value: x\n")
            .unwrap_err();
        assert!(err.to_string().contains("parameter name must not be empty"));
    }

    #[test]
    fn test_parameter_serializes_to_wire_shape() {
        let yaml = serde_yaml::to_string(&Parameter::secret("password", "db-cred", "pw").unwrap())
            .unwrap();
        assert!(yaml.contains("valueFrom"));
        assert!(yaml.contains("secretKeyRef"));
        assert!(!yaml.contains("value:"));
    }

    #[test]
    fn test_parse_pipeline() {
        let pipeline = LoggingPipeline::from_yaml_str(
            r#"
input:
  label:
    app: nginx
filter:
  - type: parser
    name: nginx-parser
    parameters:
      - name: format
        value: nginx
output:
  - type: s3
    name: archive
    parameters:
      - name: s3_bucket
        value: logs
"#,
        )
        .unwrap();
        assert_eq!(pipeline.input.label.get("app").map(String::as_str), Some("nginx"));
        assert_eq!(pipeline.filter.len(), 1);
        assert_eq!(pipeline.output[0].plugin_type, "s3");
    }

    #[test]
    fn test_load_missing_file() {
        let err = LoggingPipeline::load(Path::new("/nonexistent/pipeline.yaml")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
