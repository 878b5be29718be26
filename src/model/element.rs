// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Element identity and the closed set of element kinds.
//!
//! Every addressable thing in the provider tree is an [`Element`]. Its
//! [`ElementHeader`] carries the slot number, the validated identifier and the
//! numeric path peers use to address it. Paths are computed once when the element
//! is bound under its parent; the tree is never restructured afterwards, so the
//! stored path always equals `parent.path + [number]`.

use crate::errors::TreeError;
use crate::traits::DynamicPathHandler;

use super::{Function, Matrix, Node, ParameterElement};

/// Identity shared by every element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementHeader {
    number: i32,
    identifier: String,
    path: Vec<i32>,
    identifier_path: String,
    description: Option<String>,
}

impl ElementHeader {
    /// Header of the unaddressable tree root.
    pub(crate) fn root() -> Self {
        Self {
            number: 0,
            identifier: "root".to_string(),
            path: Vec::new(),
            identifier_path: String::new(),
            description: None,
        }
    }

    /// Header of a child bound under `parent` at slot `number`.
    pub(crate) fn child_of(
        parent: &ElementHeader,
        number: i32,
        identifier: &str,
    ) -> Result<Self, TreeError> {
        assert_identifier_valid(identifier)?;

        let mut path = parent.path.clone();
        path.push(number);

        let identifier_path = if parent.identifier_path.is_empty() {
            identifier.to_string()
        } else {
            format!("{}/{}", parent.identifier_path, identifier)
        };

        Ok(Self {
            number,
            identifier: identifier.to_string(),
            path,
            identifier_path,
            description: None,
        })
    }

    pub(crate) fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Numeric protocol address, root first.
    pub fn path(&self) -> &[i32] {
        &self.path
    }

    /// Slash-joined identifiers, used in logs and errors.
    pub fn identifier_path(&self) -> &str {
        &self.identifier_path
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Check an identifier against the characters the protocol allows.
///
/// Identifiers must be non-empty, start with an ASCII letter or `_`, and
/// otherwise contain only ASCII letters, digits, `_` and `-`.
pub fn assert_identifier_valid(identifier: &str) -> Result<(), TreeError> {
    let invalid = |reason| TreeError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason,
    };

    let mut chars = identifier.chars();
    match chars.next() {
        None => return Err(invalid("identifier is empty")),
        Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
            return Err(invalid("identifier must start with a letter or '_'"));
        }
        Some(_) => {}
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-')) {
        return Err(invalid("identifier may only contain letters, digits, '_' and '-'"));
    }

    Ok(())
}

/// Every kind of element the tree can hold.
///
/// Tree walkers (directory listing, document rendering) match exhaustively on
/// this enum, so adding a kind forces every walker to handle it.
#[derive(Debug)]
pub enum Element {
    Node(Node),
    Parameter(ParameterElement),
    Matrix(Matrix),
    Function(Function),
}

impl Element {
    pub fn header(&self) -> &ElementHeader {
        match self {
            Element::Node(node) => node.header(),
            Element::Parameter(parameter) => parameter.header(),
            Element::Matrix(matrix) => matrix.header(),
            Element::Function(function) => function.header(),
        }
    }

    pub fn number(&self) -> i32 {
        self.header().number()
    }

    pub fn identifier(&self) -> &str {
        self.header().identifier()
    }

    pub fn path(&self) -> &[i32] {
        self.header().path()
    }

    /// Human-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Node(_) => "node",
            Element::Parameter(parameter) => parameter.kind(),
            Element::Matrix(_) => "matrix",
            Element::Function(_) => "function",
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Element::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Element::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&ParameterElement> {
        match self {
            Element::Parameter(parameter) => Some(parameter),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Element::Matrix(matrix) => Some(matrix),
            _ => None,
        }
    }

    pub fn as_matrix_mut(&mut self) -> Option<&mut Matrix> {
        match self {
            Element::Matrix(matrix) => Some(matrix),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Element::Function(function) => Some(function),
            _ => None,
        }
    }

    /// The dynamic path capability, for the element kinds that have it.
    pub fn as_dynamic_path_handler(&self) -> Option<&dyn DynamicPathHandler> {
        match self {
            Element::Matrix(matrix) if matrix.is_dynamic() => Some(matrix),
            _ => None,
        }
    }

    pub fn as_dynamic_path_handler_mut(&mut self) -> Option<&mut dyn DynamicPathHandler> {
        match self {
            Element::Matrix(matrix) if matrix.is_dynamic() => Some(matrix),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_validation_table_driven() {
        struct TestCase {
            identifier: &'static str,
            valid: bool,
        }

        let test_cases = vec![
            TestCase { identifier: "gain", valid: true },
            TestCase { identifier: "_hidden", valid: true },
            TestCase { identifier: "t-0", valid: true },
            TestCase { identifier: "dynamicGain", valid: true },
            TestCase { identifier: "Input_12", valid: true },
            TestCase { identifier: "", valid: false },
            TestCase { identifier: "0gain", valid: false },
            TestCase { identifier: "-gain", valid: false },
            TestCase { identifier: "has space", valid: false },
            TestCase { identifier: "a/b", valid: false },
            TestCase { identifier: "gain.left", valid: false },
            TestCase { identifier: "Ä", valid: false },
        ];

        for case in test_cases {
            assert_eq!(
                assert_identifier_valid(case.identifier).is_ok(),
                case.valid,
                "identifier {:?}",
                case.identifier
            );
        }
    }

    #[test]
    fn test_child_header_extends_parent_path() {
        let root = ElementHeader::root();
        let device = ElementHeader::child_of(&root, 1, "device").unwrap();
        let gain = ElementHeader::child_of(&device, 4, "gain").unwrap();

        assert_eq!(root.path(), &[] as &[i32]);
        assert_eq!(device.path(), &[1]);
        assert_eq!(gain.path(), &[1, 4]);
        assert_eq!(gain.identifier_path(), "device/gain");
    }

    #[test]
    fn test_child_header_rejects_invalid_identifier() {
        let root = ElementHeader::root();
        let err = ElementHeader::child_of(&root, 1, "bad name").unwrap_err();
        assert!(matches!(err, TreeError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_empty_description_is_dropped() {
        let root = ElementHeader::root();
        let header = ElementHeader::child_of(&root, 1, "device")
            .unwrap()
            .with_description(Some(String::new()));
        assert_eq!(header.description(), None);
    }
}
