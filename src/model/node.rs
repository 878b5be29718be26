// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use indexmap::IndexMap;

use crate::errors::TreeError;
use crate::observability::messages::tree::ElementRegistered;
use crate::observability::messages::StructuredLog;
use crate::traits::{Dispatcher, DynamicPathHandler};

use super::{Element, ElementHeader, EnumParameter, Parameter, ParameterElement, TreeParameter};

/// Container element holding children keyed by slot number, in insertion order.
///
/// Every node carries a handle to the tree's dispatcher so the elements built
/// under it can notify peers of changes.
pub struct Node {
    header: ElementHeader,
    dispatcher: Arc<dyn Dispatcher>,
    children: IndexMap<i32, Element>,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("identifier_path", &self.header.identifier_path())
            .field("path", &self.header.path())
            .field("children", &self.children)
            .finish()
    }
}

impl Node {
    /// Create the unaddressable root of a provider tree.
    pub fn root(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self::with_header(ElementHeader::root(), dispatcher)
    }

    pub(crate) fn with_header(header: ElementHeader, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            header,
            dispatcher,
            children: IndexMap::new(),
        }
    }

    pub fn header(&self) -> &ElementHeader {
        &self.header
    }

    pub fn path(&self) -> &[i32] {
        self.header.path()
    }

    pub fn identifier(&self) -> &str {
        self.header.identifier()
    }

    pub fn dispatcher(&self) -> &Arc<dyn Dispatcher> {
        &self.dispatcher
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.values()
    }

    pub fn child(&self, number: i32) -> Option<&Element> {
        self.children.get(&number)
    }

    pub fn child_mut(&mut self, number: i32) -> Option<&mut Element> {
        self.children.get_mut(&number)
    }

    pub fn contains_slot(&self, number: i32) -> bool {
        self.children.contains_key(&number)
    }

    /// One past the highest occupied slot, or 1 for an empty node.
    pub fn next_free_slot(&self) -> i32 {
        self.children.keys().max().map_or(1, |max| max + 1)
    }

    /// Header for a new child at `number`, failing if the identifier is invalid
    /// or the slot is taken.
    pub(crate) fn child_header(&self, number: i32, identifier: &str) -> Result<ElementHeader, TreeError> {
        if let Some(existing) = self.children.get(&number) {
            return Err(TreeError::DuplicateSlot {
                parent: self.header.identifier_path().to_string(),
                number,
                existing: existing.identifier().to_string(),
            });
        }
        ElementHeader::child_of(&self.header, number, identifier)
    }

    /// Bind a child whose header came from [`Node::child_header`].
    pub(crate) fn insert_child(&mut self, element: Element) -> &mut Element {
        ElementRegistered {
            identifier_path: element.header().identifier_path(),
            path: element.path(),
            kind: element.kind(),
        }
        .log();
        self.children.entry(element.number()).or_insert(element)
    }

    /// Walk `path` from this node. An empty path resolves to nothing.
    pub fn resolve(&self, path: &[i32]) -> Option<&Element> {
        let (first, rest) = path.split_first()?;
        let child = self.children.get(first)?;
        if rest.is_empty() {
            return Some(child);
        }
        child.as_node()?.resolve(rest)
    }

    pub fn resolve_mut(&mut self, path: &[i32]) -> Option<&mut Element> {
        let (first, rest) = path.split_first()?;
        let child = self.children.get_mut(first)?;
        if rest.is_empty() {
            return Some(child);
        }
        child.as_node_mut()?.resolve_mut(rest)
    }

    /// Find the deepest element on `path` that synthesizes children the tree
    /// does not hold. Only addresses strictly below that element qualify.
    pub fn resolve_dynamic_handler(&self, path: &[i32]) -> Option<&dyn DynamicPathHandler> {
        let (first, rest) = path.split_first()?;
        if rest.is_empty() {
            return None;
        }
        match self.children.get(first)? {
            Element::Node(node) => node.resolve_dynamic_handler(rest),
            other => other.as_dynamic_path_handler(),
        }
    }

    pub fn resolve_dynamic_handler_mut(&mut self, path: &[i32]) -> Option<&mut dyn DynamicPathHandler> {
        let (first, rest) = path.split_first()?;
        if rest.is_empty() {
            return None;
        }
        match self.children.get_mut(first)? {
            Element::Node(node) => node.resolve_dynamic_handler_mut(rest),
            other => other.as_dynamic_path_handler_mut(),
        }
    }

    /// Typed lookup of a parameter child.
    pub fn get_parameter<T: TreeParameter>(&self, number: i32) -> Option<&Parameter<T>> {
        T::from_element(self.child(number)?.as_parameter()?)
    }

    pub fn get_parameter_mut<T: TreeParameter>(&mut self, number: i32) -> Option<&mut Parameter<T>> {
        match self.child_mut(number)? {
            Element::Parameter(parameter) => T::from_element_mut(parameter),
            _ => None,
        }
    }

    pub fn get_enum_parameter(&self, number: i32) -> Option<&EnumParameter> {
        match self.child(number)?.as_parameter()? {
            ParameterElement::Enum(parameter) => Some(parameter),
            _ => None,
        }
    }

    pub fn get_enum_parameter_mut(&mut self, number: i32) -> Option<&mut EnumParameter> {
        match self.child_mut(number)? {
            Element::Parameter(ParameterElement::Enum(parameter)) => Some(parameter),
            _ => None,
        }
    }

    pub fn get_node(&self, number: i32) -> Option<&Node> {
        self.child(number)?.as_node()
    }

    pub fn get_node_mut(&mut self, number: i32) -> Option<&mut Node> {
        self.child_mut(number)?.as_node_mut()
    }

    /// Local update of the parameter at `number`.
    ///
    /// Applies and notifies only when the value differs. Returns `false` when
    /// nothing changed, including when no parameter of type `T` sits at the slot.
    pub fn update_parameter<T: TreeParameter>(&mut self, number: i32, value: T) -> bool {
        match self.get_parameter_mut::<T>(number) {
            Some(parameter) if *parameter.value() != value => {
                parameter.set_value(value);
                true
            }
            _ => false,
        }
    }

    /// Local update of the enum parameter at `number` by index.
    pub fn update_enum_parameter(&mut self, number: i32, index: i64) -> bool {
        match self.get_enum_parameter_mut(number) {
            Some(parameter) if parameter.selected() != index => {
                parameter.set_value(index);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingDispatcher;
    use crate::model::{ParameterSpec, Value};

    fn tree() -> (Node, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let mut root = Node::root(dispatcher.clone());
        let device = root.add_sub_node(1, "device").unwrap();
        device
            .add_integer_parameter(3, "gain", ParameterSpec::new(10).writable())
            .unwrap();
        device
            .add_enum_parameter(4, "mode", &["off", "on"], ParameterSpec::new(0))
            .unwrap();
        (root, dispatcher)
    }

    #[test]
    fn test_paths_extend_parent_path() {
        let (root, _) = tree();

        let device = root.resolve(&[1]).unwrap();
        let gain = root.resolve(&[1, 3]).unwrap();

        assert_eq!(device.path(), &[1]);
        assert_eq!(gain.path(), &[1, 3]);
        assert_eq!(gain.header().identifier_path(), "device/gain");
    }

    #[test]
    fn test_duplicate_slot_fails_and_keeps_original() {
        let (mut root, _) = tree();
        let device = root.get_node_mut(1).unwrap();

        let err = device
            .add_string_parameter(3, "label", ParameterSpec::new(String::new()))
            .unwrap_err();

        assert!(matches!(
            err,
            TreeError::DuplicateSlot { number: 3, ref existing, .. } if existing == "gain"
        ));
        assert!(device.get_parameter::<i64>(3).is_some());
    }

    #[test]
    fn test_unresolved_paths_return_none() {
        let (root, _) = tree();

        let paths: [&[i32]; 5] = [&[], &[2], &[1, 9], &[1, 3, 0], &[-1]];
        for path in paths {
            assert!(root.resolve(path).is_none(), "path {:?}", path);
        }
    }

    #[test]
    fn test_typed_lookup_checks_type() {
        let (root, _) = tree();
        let device = root.get_node(1).unwrap();

        assert_eq!(device.get_parameter::<i64>(3).map(|p| *p.value()), Some(10));
        assert!(device.get_parameter::<f64>(3).is_none());
        assert!(device.get_parameter::<i64>(4).is_none());
        assert_eq!(device.get_enum_parameter(4).map(|p| p.maximum()), Some(1));
    }

    #[test]
    fn test_update_parameter_only_notifies_changes() {
        let (mut root, dispatcher) = tree();
        let device = root.get_node_mut(1).unwrap();

        assert!(!device.update_parameter(3, 10_i64));
        assert!(device.update_parameter(3, 11_i64));
        assert!(!device.update_parameter(3, 11.0_f64));
        assert!(!device.update_parameter(9, 1_i64));
        assert!(device.update_enum_parameter(4, 1));
        assert!(!device.update_enum_parameter(4, 1));

        assert_eq!(
            dispatcher.parameter_changes(),
            vec![
                (vec![1, 3], Value::Integer(11)),
                (vec![1, 4], Value::Integer(1)),
            ]
        );
    }

    #[test]
    fn test_next_free_slot() {
        let (root, _) = tree();
        assert_eq!(root.next_free_slot(), 2);
        assert_eq!(root.get_node(1).unwrap().next_free_slot(), 5);
    }
}
