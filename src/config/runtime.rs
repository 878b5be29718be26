// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::builder::{MatrixSpec, SignalNames};
use crate::config::{validate_provider_config, ElementConfig, MatrixConfig, MatrixKindConfig, ProviderConfig};
use crate::errors::TreeError;
use crate::model::{Node, ParameterSpec};
use crate::observability::messages::tree::TreeBuilt;
use crate::observability::messages::StructuredLog;
use crate::provider::Provider;
use crate::traits::Dispatcher;

/// Default name reported for trees whose file does not name them.
const DEFAULT_TREE_NAME: &str = "provider";

/// Provider tree builder - turns a validated tree file into a live tree.
///
/// The `TreeBuilder` runs the same builder operations a host would call in
/// code, so the declarative and the programmatic paths produce identical trees.
///
/// # Examples
///
/// ## Building a provider from configuration
/// ```
/// use std::sync::Arc;
/// use emberplus_provider::config::{ProviderConfig, TreeBuilder};
/// use emberplus_provider::backends::ChannelDispatcher;
///
/// let cfg: ProviderConfig = serde_yaml::from_str(r#"
/// elements:
///   - {type: boolean, number: 1, identifier: power, value: true}
/// "#).unwrap();
///
/// let (dispatcher, _notifications) = ChannelDispatcher::new();
/// let provider = TreeBuilder::from_config(&cfg, Arc::new(dispatcher)).unwrap();
///
/// assert!(provider.resolve(&[1]).is_some());
/// ```
pub struct TreeBuilder;

impl TreeBuilder {
    /// Validate `cfg` and build a provider serving its tree.
    ///
    /// # Arguments
    /// * `cfg` - Parsed tree file
    /// * `dispatcher` - Collaborator notified of every later value change
    ///
    /// # Returns
    /// A provider ready to serve requests, or every validation problem at once
    pub fn from_config(cfg: &ProviderConfig, dispatcher: Arc<dyn Dispatcher>) -> Result<Provider, TreeError> {
        validate_provider_config(cfg).map_err(TreeError::Validation)?;

        let mut provider = Provider::new(dispatcher);
        Self::build_into(provider.root_mut(), &cfg.elements)?;

        TreeBuilt {
            name: cfg.name.as_deref().unwrap_or(DEFAULT_TREE_NAME),
            top_level_count: provider.root().len(),
        }
        .log();
        Ok(provider)
    }

    /// Bind `elements` under `node`, recursing into nested nodes.
    pub fn build_into(node: &mut Node, elements: &[ElementConfig]) -> Result<(), TreeError> {
        for element in elements {
            match element {
                ElementConfig::Node(c) => {
                    let child = node.add_node_with_description(c.number, &c.identifier, c.description.clone())?;
                    Self::build_into(child, &c.children)?;
                }
                ElementConfig::String(c) => {
                    let spec = flags(ParameterSpec::new(c.value.clone()), c.writable, c.persistable, &c.description);
                    node.add_string_parameter(c.number, &c.identifier, spec)?;
                }
                ElementConfig::Boolean(c) => {
                    let spec = flags(ParameterSpec::new(c.value), c.writable, c.persistable, &c.description);
                    node.add_boolean_parameter(c.number, &c.identifier, spec)?;
                }
                ElementConfig::Integer(c) => {
                    let (min, max) = c.range();
                    let spec = flags(ParameterSpec::new(c.value), c.writable, c.persistable, &c.description)
                        .range(min, max);
                    node.add_integer_parameter(c.number, &c.identifier, spec)?;
                }
                ElementConfig::Real(c) => {
                    let (min, max) = c.range();
                    let spec = flags(ParameterSpec::new(c.value), c.writable, c.persistable, &c.description)
                        .range(min, max);
                    node.add_real_parameter(c.number, &c.identifier, spec)?;
                }
                ElementConfig::Enum(c) => {
                    let spec = flags(ParameterSpec::new(c.value), c.writable, c.persistable, &c.description);
                    node.add_enum_parameter(c.number, &c.identifier, c.values.as_slice(), spec)?;
                }
                ElementConfig::Matrix(c) => {
                    node.add_matrix(c.number, &c.identifier, matrix_spec(c))?;
                }
            }
        }
        Ok(())
    }
}

fn flags<T: crate::model::ParameterValue>(
    mut spec: ParameterSpec<T>,
    writable: bool,
    persistable: bool,
    description: &Option<String>,
) -> ParameterSpec<T> {
    spec.is_writable = writable;
    spec.is_persistable = persistable;
    spec.description = description.clone();
    spec
}

fn matrix_spec(c: &MatrixConfig) -> MatrixSpec {
    let targets = SignalNames::from(&c.targets);
    let sources = SignalNames::from(&c.sources);

    let mut spec = match c.kind {
        MatrixKindConfig::OneToN => MatrixSpec::one_to_n(targets, sources),
        MatrixKindConfig::BlindSource => {
            MatrixSpec::blind_source(targets, sources, c.blind_source.clone().unwrap_or_default())
        }
        MatrixKindConfig::Dynamic => MatrixSpec::dynamic(targets, sources),
    };
    spec.is_writable = c.writable;
    spec.description = c.description.clone();
    if let Some(identifier) = &c.matrix_identifier {
        spec.matrix_identifier = identifier.clone();
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingDispatcher;
    use crate::glow::{Document, QualifiedElement};
    use crate::model::Value;

    const TREE_YAML: &str = r#"
name: studio
elements:
  - type: node
    number: 1
    identifier: device
    description: Main unit
    children:
      - {type: string, number: 1, identifier: name, value: Desk A, persistable: true}
      - {type: integer, number: 2, identifier: gain, value: 3, min: -20, max: 20, writable: true}
      - {type: enum, number: 3, identifier: mode, values: [off, on], value: 1, writable: true}
      - type: matrix
        number: 4
        identifier: router
        kind: one_to_n
        targets: [Out 1, Out 2]
        sources: {0: x, 2: y}
"#;

    fn build_in_code(dispatcher: Arc<RecordingDispatcher>) -> Provider {
        let mut provider = Provider::new(dispatcher);
        let device = provider
            .root_mut()
            .add_described_sub_node(1, "device", "Main unit")
            .unwrap();
        device
            .add_string_parameter(1, "name", ParameterSpec::new("Desk A".to_string()).persistable())
            .unwrap();
        device
            .add_integer_parameter(2, "gain", ParameterSpec::new(3).writable().range(-20, 20))
            .unwrap();
        device
            .add_enum_parameter(3, "mode", &["off", "on"], ParameterSpec::new(1).writable())
            .unwrap();
        let sources = std::collections::BTreeMap::from([(0, "x"), (2, "y")]);
        device
            .add_matrix(4, "router", MatrixSpec::one_to_n(["Out 1", "Out 2"], sources))
            .unwrap();
        provider
    }

    /// Every element of the tree, depth first, as rendered for peers.
    fn flatten(provider: &Provider) -> Vec<QualifiedElement> {
        fn walk(node: &Node, out: &mut Vec<QualifiedElement>) {
            for child in node.children() {
                out.push(QualifiedElement::from_element(child));
                if let Some(node) = child.as_node() {
                    walk(node, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(provider.root(), &mut out);
        out
    }

    #[test]
    fn test_tree_file_builds_same_structure_as_code() {
        let cfg: ProviderConfig = serde_yaml::from_str(TREE_YAML).unwrap();

        let from_file = TreeBuilder::from_config(&cfg, Arc::new(RecordingDispatcher::default())).unwrap();
        let from_code = build_in_code(Arc::new(RecordingDispatcher::default()));

        assert_eq!(flatten(&from_file), flatten(&from_code));
        assert_eq!(
            Document::root_directory(from_file.root()),
            Document::root_directory(from_code.root())
        );
    }

    #[test]
    fn test_built_tree_is_live() {
        let cfg: ProviderConfig = serde_yaml::from_str(TREE_YAML).unwrap();
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let mut provider = TreeBuilder::from_config(&cfg, dispatcher.clone()).unwrap();
        let client = crate::backends::stub::RecordingClient::default();

        assert!(provider.set_parameter(&[1, 2], &Value::Integer(-5), &client));
        assert!(!provider.set_parameter(&[1, 1], &Value::from("read-only"), &client));

        assert_eq!(dispatcher.parameter_changes(), vec![(vec![1, 2], Value::Integer(-5))]);
    }

    #[test]
    fn test_invalid_tree_builds_nothing() {
        let cfg: ProviderConfig = serde_yaml::from_str(
            "elements: [{type: enum, number: 1, identifier: mode, values: []}]",
        )
        .unwrap();

        let err = TreeBuilder::from_config(&cfg, Arc::new(RecordingDispatcher::default())).unwrap_err();

        assert!(matches!(err, TreeError::Validation(ref errors) if errors.len() == 1));
    }
}
