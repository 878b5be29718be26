// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::TreeError;
use crate::model::{
    BooleanParameter, Element, EnumParameter, Function, IntegerParameter, Node, Parameter,
    ParameterElement, ParameterSpec, RealParameter, StringParameter, TreeParameter, TupleItem,
};
use crate::traits::FunctionHandler;

/// Builder operations binding new children under a node.
///
/// Every operation validates the identifier and checks the slot before touching
/// the tree, so a failed call leaves the node unchanged.
impl Node {
    pub fn add_sub_node(&mut self, number: i32, identifier: &str) -> Result<&mut Node, TreeError> {
        self.add_node_with_description(number, identifier, None)
    }

    pub fn add_described_sub_node(
        &mut self,
        number: i32,
        identifier: &str,
        description: impl Into<String>,
    ) -> Result<&mut Node, TreeError> {
        self.add_node_with_description(number, identifier, Some(description.into()))
    }

    pub(crate) fn add_node_with_description(
        &mut self,
        number: i32,
        identifier: &str,
        description: Option<String>,
    ) -> Result<&mut Node, TreeError> {
        let header = self.child_header(number, identifier)?.with_description(description);
        let node = Node::with_header(header, Arc::clone(self.dispatcher()));
        match self.insert_child(Element::Node(node)) {
            Element::Node(node) => Ok(node),
            _ => unreachable!("slot {} was just bound to a node", number),
        }
    }

    pub fn add_string_parameter(
        &mut self,
        number: i32,
        identifier: &str,
        spec: ParameterSpec<String>,
    ) -> Result<&mut StringParameter, TreeError> {
        self.add_parameter(number, identifier, spec)
    }

    pub fn add_boolean_parameter(
        &mut self,
        number: i32,
        identifier: &str,
        spec: ParameterSpec<bool>,
    ) -> Result<&mut BooleanParameter, TreeError> {
        self.add_parameter(number, identifier, spec)
    }

    /// Integer parameters without a range get `0..=255`.
    pub fn add_integer_parameter(
        &mut self,
        number: i32,
        identifier: &str,
        spec: ParameterSpec<i64>,
    ) -> Result<&mut IntegerParameter, TreeError> {
        self.add_parameter(number, identifier, spec)
    }

    /// Real parameters without a range get `0.0..=255.0`.
    pub fn add_real_parameter(
        &mut self,
        number: i32,
        identifier: &str,
        spec: ParameterSpec<f64>,
    ) -> Result<&mut RealParameter, TreeError> {
        self.add_parameter(number, identifier, spec)
    }

    pub fn add_parameter<T: TreeParameter>(
        &mut self,
        number: i32,
        identifier: &str,
        spec: ParameterSpec<T>,
    ) -> Result<&mut Parameter<T>, TreeError> {
        let header = self.child_header(number, identifier)?;
        let parameter = Parameter::new(header, spec, Arc::clone(self.dispatcher()));
        match self.insert_child(Element::Parameter(T::wrap(parameter))) {
            Element::Parameter(parameter) => match T::from_element_mut(parameter) {
                Some(parameter) => Ok(parameter),
                None => unreachable!("slot {} was just bound to a {} parameter", number, T::TYPE),
            },
            _ => unreachable!("slot {} was just bound to a parameter", number),
        }
    }

    /// Enum parameter selecting one of `values`. Any range in `spec` is replaced
    /// by `0..=values.len()-1`.
    pub fn add_enum_parameter<S: AsRef<str>>(
        &mut self,
        number: i32,
        identifier: &str,
        values: &[S],
        spec: ParameterSpec<i64>,
    ) -> Result<&mut EnumParameter, TreeError> {
        let header = self.child_header(number, identifier)?;
        let values = values.iter().map(|v| v.as_ref().to_string()).collect();
        let parameter = EnumParameter::new(header, values, spec, Arc::clone(self.dispatcher()));
        match self.insert_child(Element::Parameter(ParameterElement::Enum(parameter))) {
            Element::Parameter(ParameterElement::Enum(parameter)) => Ok(parameter),
            _ => unreachable!("slot {} was just bound to an enum parameter", number),
        }
    }

    /// Function with the given signature. An empty `result` declares a function
    /// that returns nothing.
    pub fn add_function<H>(
        &mut self,
        number: i32,
        identifier: &str,
        arguments: Vec<TupleItem>,
        result: Vec<TupleItem>,
        handler: H,
    ) -> Result<&mut Function, TreeError>
    where
        H: FunctionHandler + 'static,
    {
        let header = self.child_header(number, identifier)?;
        let function = Function::new(header, arguments, result, Arc::new(handler));
        match self.insert_child(Element::Function(function)) {
            Element::Function(function) => Ok(function),
            _ => unreachable!("slot {} was just bound to a function", number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingDispatcher;
    use crate::model::{ParameterType, Value};
    use crate::traits::from_fn;

    fn root() -> Node {
        Node::root(Arc::new(RecordingDispatcher::default()))
    }

    #[test]
    fn test_invalid_identifier_leaves_node_unchanged() {
        let mut root = root();

        let err = root.add_sub_node(1, "bad id").unwrap_err();

        assert!(matches!(err, TreeError::InvalidIdentifier { .. }));
        assert!(root.is_empty());
    }

    #[test]
    fn test_parameters_keep_spec_state() {
        let mut root = root();
        let device = root.add_described_sub_node(1, "device", "Main unit").unwrap();

        device
            .add_string_parameter(1, "name", ParameterSpec::new("desk".to_string()).persistable())
            .unwrap();
        device
            .add_boolean_parameter(2, "mute", ParameterSpec::new(true).writable())
            .unwrap();
        device
            .add_real_parameter(3, "level", ParameterSpec::new(-6.0).range(-60.0, 0.0))
            .unwrap();

        let name = device.get_parameter::<String>(1).unwrap();
        assert_eq!(name.value(), "desk");
        assert!(name.is_persistable());
        assert!(!name.is_writable());
        assert!(device.get_parameter::<bool>(2).unwrap().is_writable());
        assert_eq!(device.get_parameter::<f64>(3).unwrap().range(), Some(&(-60.0, 0.0)));
        assert_eq!(root.get_node(1).unwrap().header().description(), Some("Main unit"));
    }

    #[test]
    fn test_enum_parameter_bounds() {
        let mut root = root();

        let mode = root
            .add_enum_parameter(1, "mode", &["a", "b", "c"], ParameterSpec::new(2))
            .unwrap();

        assert_eq!(mode.minimum(), 0);
        assert_eq!(mode.maximum(), 2);
        assert_eq!(
            root.child(1).unwrap().as_parameter().unwrap().parameter_type(),
            ParameterType::Enum
        );
    }

    #[tokio::test]
    async fn test_function_is_invocable_after_building() {
        let mut root = root();
        let functions = root.add_sub_node(2, "functions").unwrap();

        let function = functions
            .add_function(
                1,
                "negate",
                vec![TupleItem::boolean("input")],
                vec![TupleItem::boolean("output")],
                from_fn(|args: Vec<Value>| async move {
                    match args.as_slice() {
                        [Value::Boolean(b)] => vec![Value::Boolean(!b)],
                        _ => vec![],
                    }
                }),
            )
            .unwrap();

        assert_eq!(function.path(), &[2, 1]);
        let result = function
            .invoke(Some(crate::glow::Invocation::new(
                Some(3),
                Some(vec![Value::Boolean(false)]),
            )))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.result, vec![Value::Boolean(true)]);
    }
}
