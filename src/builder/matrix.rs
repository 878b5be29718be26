// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Matrix builders.
//!
//! A matrix is bound as a small subtree:
//!
//! ```text
//! <identifier>          wrapper node at the requested slot
//!   labels        (1)
//!     targets     (1)   t-0, t-1, ...  one string parameter per target
//!     sources     (2)   b-0, s-1, ...  one string parameter per source
//!   matrix        (2)   the matrix element itself
//! ```
//!
//! Label parameters sit at the slot equal to their signal number.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::consts::{
    BLIND_SOURCE_COUNT, DEFAULT_MATRIX_IDENTIFIER, LABELS_IDENTIFIER, LABELS_SLOT, MATRIX_SLOT,
    SOURCE_LABELS_IDENTIFIER, SOURCE_LABELS_SLOT, TARGET_LABELS_IDENTIFIER, TARGET_LABELS_SLOT,
    UNUSED_SIGNAL_LABEL,
};
use crate::errors::TreeError;
use crate::model::{
    assert_identifier_valid, Element, Matrix, MatrixKind, MatrixLayout, Node, ParameterSpec,
    RemoteConnector, Signal, XpointTable,
};

/// Display names for a matrix's targets or sources.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalNames {
    /// One signal per name, numbered in order.
    Dense(Vec<String>),
    /// Names keyed by signal number. Gaps up to the highest key become unused
    /// placeholder signals; negative keys are ignored.
    Sparse(BTreeMap<i32, String>),
}

impl SignalNames {
    /// Label and unused flag for every signal, in numbering order.
    pub fn expand(&self) -> Vec<(String, bool)> {
        match self {
            SignalNames::Dense(names) => names.iter().map(|n| (n.clone(), false)).collect(),
            SignalNames::Sparse(names) => {
                let Some(max) = names.keys().copied().filter(|k| *k >= 0).max() else {
                    return Vec::new();
                };
                (0..=max)
                    .map(|n| match names.get(&n) {
                        Some(name) => (name.clone(), false),
                        None => (UNUSED_SIGNAL_LABEL.to_string(), true),
                    })
                    .collect()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.expand().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for SignalNames {
    fn from(names: Vec<String>) -> Self {
        SignalNames::Dense(names)
    }
}

impl From<Vec<&str>> for SignalNames {
    fn from(names: Vec<&str>) -> Self {
        SignalNames::Dense(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SignalNames {
    fn from(names: [&str; N]) -> Self {
        SignalNames::Dense(names.into_iter().map(str::to_string).collect())
    }
}

impl From<BTreeMap<i32, String>> for SignalNames {
    fn from(names: BTreeMap<i32, String>) -> Self {
        SignalNames::Sparse(names)
    }
}

impl From<BTreeMap<i32, &str>> for SignalNames {
    fn from(names: BTreeMap<i32, &str>) -> Self {
        SignalNames::Sparse(names.into_iter().map(|(k, v)| (k, v.to_string())).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatrixVariant {
    OneToN,
    /// Source 0 is a blind source with this label; real sources follow it.
    BlindSource { blind_name: String },
    Dynamic,
}

/// Everything needed to bind one matrix subtree.
///
/// ```
/// use emberplus_provider::builder::MatrixSpec;
///
/// let spec = MatrixSpec::one_to_n(["Out 1", "Out 2"], ["In 1", "In 2", "In 3"])
///     .description("Main router")
///     .matrix_identifier("router");
/// assert!(spec.is_writable);
/// ```
pub struct MatrixSpec {
    pub variant: MatrixVariant,
    pub targets: SignalNames,
    pub sources: SignalNames,
    pub is_writable: bool,
    pub description: Option<String>,
    pub matrix_identifier: String,
    pub remote_connector: Option<RemoteConnector>,
}

impl MatrixSpec {
    fn new(variant: MatrixVariant, targets: SignalNames, sources: SignalNames) -> Self {
        Self {
            variant,
            targets,
            sources,
            is_writable: true,
            description: None,
            matrix_identifier: DEFAULT_MATRIX_IDENTIFIER.to_string(),
            remote_connector: None,
        }
    }

    pub fn one_to_n(targets: impl Into<SignalNames>, sources: impl Into<SignalNames>) -> Self {
        Self::new(MatrixVariant::OneToN, targets.into(), sources.into())
    }

    pub fn blind_source(
        targets: impl Into<SignalNames>,
        sources: impl Into<SignalNames>,
        blind_name: impl Into<String>,
    ) -> Self {
        let variant = MatrixVariant::BlindSource {
            blind_name: blind_name.into(),
        };
        Self::new(variant, targets.into(), sources.into())
    }

    pub fn dynamic(targets: impl Into<SignalNames>, sources: impl Into<SignalNames>) -> Self {
        Self::new(MatrixVariant::Dynamic, targets.into(), sources.into())
    }

    pub fn read_only(mut self) -> Self {
        self.is_writable = false;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn matrix_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.matrix_identifier = identifier.into();
        self
    }

    pub fn remote_connector<F>(mut self, connector: F) -> Self
    where
        F: Fn(&Signal, &[&Signal], &Matrix) -> bool + Send + Sync + 'static,
    {
        self.remote_connector = Some(Box::new(connector));
        self
    }
}

impl Node {
    /// Bind a matrix subtree at `number`. Returns the wrapper node.
    pub fn add_matrix(
        &mut self,
        number: i32,
        identifier: &str,
        spec: MatrixSpec,
    ) -> Result<&mut Node, TreeError> {
        let MatrixSpec {
            variant,
            targets,
            sources,
            is_writable,
            description,
            matrix_identifier,
            remote_connector,
        } = spec;

        assert_identifier_valid(&matrix_identifier)?;
        let header = self.child_header(number, identifier)?.with_description(description);
        let mut wrapper = Node::with_header(header, Arc::clone(self.dispatcher()));

        let labels = wrapper.add_sub_node(LABELS_SLOT, LABELS_IDENTIFIER)?;
        let labels_path = labels.path().to_vec();

        let target_labels = labels.add_sub_node(TARGET_LABELS_SLOT, TARGET_LABELS_IDENTIFIER)?;
        let target_names = targets
            .expand()
            .into_iter()
            .enumerate()
            .map(|(n, (name, unused))| (n as i32, n as i32, "t", name, unused));
        let targets = add_signals(target_labels, target_names)?;

        let source_labels = labels.add_sub_node(SOURCE_LABELS_SLOT, SOURCE_LABELS_IDENTIFIER)?;
        let sources = match &variant {
            MatrixVariant::BlindSource { blind_name } => {
                let blind = std::iter::once((0, 0, "b", blind_name.clone(), false));
                let real = sources
                    .expand()
                    .into_iter()
                    .enumerate()
                    .map(|(n, (name, unused))| (n as i32 + BLIND_SOURCE_COUNT, n as i32, "s", name, unused));
                add_signals(source_labels, blind.chain(real))?
            }
            MatrixVariant::OneToN | MatrixVariant::Dynamic => {
                let names = sources
                    .expand()
                    .into_iter()
                    .enumerate()
                    .map(|(n, (name, unused))| (n as i32, n as i32, "s", name, unused));
                add_signals(source_labels, names)?
            }
        };

        let kind = match variant {
            MatrixVariant::OneToN => MatrixKind::OneToN,
            MatrixVariant::BlindSource { .. } => MatrixKind::OneToNBlindSource { blind_source: 0 },
            MatrixVariant::Dynamic => MatrixKind::Dynamic(XpointTable::new(&targets, &sources)),
        };

        let matrix_header = wrapper.child_header(MATRIX_SLOT, &matrix_identifier)?;
        let layout = MatrixLayout {
            targets,
            sources,
            labels_path,
        };
        let matrix = Matrix::new(
            matrix_header,
            layout,
            kind,
            is_writable,
            remote_connector,
            Arc::clone(self.dispatcher()),
        );
        wrapper.insert_child(Element::Matrix(matrix));

        match self.insert_child(Element::Node(wrapper)) {
            Element::Node(node) => Ok(node),
            _ => unreachable!("slot {} was just bound to a node", number),
        }
    }
}

/// Create one writable label parameter per signal under `labels` and return
/// the signals pointing at them.
///
/// Each item is `(signal number, label index, prefix, name, unused)`. The label
/// sits at slot = signal number; its identifier uses the index within its own
/// group, so real sources behind a blind source still start at `s-0`.
fn add_signals(
    labels: &mut Node,
    names: impl Iterator<Item = (i32, i32, &'static str, String, bool)>,
) -> Result<Vec<Signal>, TreeError> {
    names
        .map(|(number, index, prefix, name, unused)| {
            let identifier = format!("{}-{}", prefix, index);
            let label = labels.add_string_parameter(number, &identifier, ParameterSpec::new(name).writable())?;
            Ok(Signal::new(number, label.path().to_vec(), unused))
        })
        .collect()
}
