// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Response documents and the tree walker that renders them.

use serde::Serialize;

use super::InvocationResult;
use crate::model::{Element, Function, Matrix, Node, ParameterElement, ParameterType, TupleItem, Value};

/// A fully formed response addressed to one peer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "document", rename_all = "snake_case")]
pub enum Document {
    /// Collection of qualified (absolute-path) elements.
    Root { elements: Vec<QualifiedElement> },
    InvocationResult(InvocationResult),
}

impl Document {
    pub fn elements(elements: Vec<QualifiedElement>) -> Self {
        Document::Root { elements }
    }

    /// Directory listing of the tree root.
    pub fn root_directory(root: &Node) -> Self {
        Self::elements(root.children().map(QualifiedElement::from_element).collect())
    }

    /// Directory listing for an addressed element: a node lists its children,
    /// a leaf describes itself.
    pub fn directory(element: &Element) -> Self {
        match element {
            Element::Node(node) => Self::root_directory(node),
            Element::Parameter(_) | Element::Matrix(_) | Element::Function(_) => {
                Self::elements(vec![QualifiedElement::from_element(element)])
            }
        }
    }

    /// Qualified elements carried by a root document; empty for invocation results.
    pub fn qualified_elements(&self) -> &[QualifiedElement] {
        match self {
            Document::Root { elements } => elements,
            Document::InvocationResult(_) => &[],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One element addressed by its absolute path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualifiedElement {
    Node {
        path: Vec<i32>,
        identifier: String,
        description: Option<String>,
        child_count: usize,
    },
    Parameter(QualifiedParameter),
    Matrix {
        path: Vec<i32>,
        identifier: String,
        description: Option<String>,
        is_writable: bool,
        target_count: usize,
        source_count: usize,
        labels_path: Vec<i32>,
        connections: Vec<ConnectionState>,
    },
    Function {
        path: Vec<i32>,
        identifier: String,
        description: Option<String>,
        arguments: Vec<TupleItem>,
        result: Vec<TupleItem>,
    },
}

impl QualifiedElement {
    pub fn from_element(element: &Element) -> Self {
        match element {
            Element::Node(node) => QualifiedElement::Node {
                path: node.path().to_vec(),
                identifier: node.identifier().to_string(),
                description: node.header().description().map(str::to_string),
                child_count: node.len(),
            },
            Element::Parameter(parameter) => {
                QualifiedElement::Parameter(QualifiedParameter::from_parameter(parameter))
            }
            Element::Matrix(matrix) => Self::from_matrix(matrix),
            Element::Function(function) => Self::from_function(function),
        }
    }

    fn from_matrix(matrix: &Matrix) -> Self {
        QualifiedElement::Matrix {
            path: matrix.path().to_vec(),
            identifier: matrix.identifier().to_string(),
            description: matrix.header().description().map(str::to_string),
            is_writable: matrix.is_writable(),
            target_count: matrix.targets().len(),
            source_count: matrix.sources().len(),
            labels_path: matrix.labels_path().to_vec(),
            connections: matrix
                .targets()
                .iter()
                .map(|target| ConnectionState {
                    target: target.number(),
                    sources: target.connected_sources().to_vec(),
                })
                .collect(),
        }
    }

    fn from_function(function: &Function) -> Self {
        QualifiedElement::Function {
            path: function.path().to_vec(),
            identifier: function.identifier().to_string(),
            description: function.header().description().map(str::to_string),
            arguments: function.arguments().to_vec(),
            result: function.result().to_vec(),
        }
    }

    pub fn path(&self) -> &[i32] {
        match self {
            QualifiedElement::Node { path, .. }
            | QualifiedElement::Matrix { path, .. }
            | QualifiedElement::Function { path, .. } => path,
            QualifiedElement::Parameter(parameter) => &parameter.path,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            QualifiedElement::Node { identifier, .. }
            | QualifiedElement::Matrix { identifier, .. }
            | QualifiedElement::Function { identifier, .. } => identifier,
            QualifiedElement::Parameter(parameter) => &parameter.identifier,
        }
    }
}

/// Parameter description as sent to peers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifiedParameter {
    pub path: Vec<i32>,
    pub identifier: String,
    pub description: Option<String>,
    pub parameter_type: ParameterType,
    pub value: Option<Value>,
    pub minimum: Option<Value>,
    pub maximum: Option<Value>,
    /// Enum display strings joined with line breaks.
    pub enumeration: Option<String>,
    pub is_writable: bool,
    pub is_persistable: bool,
}

impl QualifiedParameter {
    pub fn from_parameter(parameter: &ParameterElement) -> Self {
        let (minimum, maximum) = match parameter.range() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };
        let enumeration = match parameter {
            ParameterElement::Enum(p) => Some(p.enumeration()),
            _ => None,
        };

        Self {
            path: parameter.header().path().to_vec(),
            identifier: parameter.header().identifier().to_string(),
            description: parameter.header().description().map(str::to_string),
            parameter_type: parameter.parameter_type(),
            value: Some(parameter.value()),
            minimum,
            maximum,
            enumeration,
            is_writable: parameter.is_writable(),
            is_persistable: parameter.is_persistable(),
        }
    }
}

/// Connected sources of one matrix target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionState {
    pub target: i32,
    pub sources: Vec<i32>,
}
