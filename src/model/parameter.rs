// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed leaf parameters.
//!
//! A [`Parameter<T>`] holds the current value of one protocol type together with
//! its flags and an optional remote setter. Remote writes come from peers and are
//! checked (writability, type, range, setter veto); local writes come from the
//! hosting application and are applied unconditionally. Both notify the
//! dispatcher so peers see the new value.

use std::fmt;
use std::sync::Arc;

use crate::observability::messages::parameter::{
    LocalUpdateApplied, RemoteSetAccepted, RemoteSetRejected,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Dispatcher;

use super::{ElementHeader, EnumParameter, ParameterType, ParameterValue, Value};

/// Callback deciding whether a remote write of `candidate` is accepted.
///
/// The second argument is the parameter as it is before the write.
pub type RemoteSetter<T> = Box<dyn Fn(&T, &Parameter<T>) -> bool + Send + Sync>;

pub type StringParameter = Parameter<String>;
pub type BooleanParameter = Parameter<bool>;
pub type IntegerParameter = Parameter<i64>;
pub type RealParameter = Parameter<f64>;

/// Initial state for a parameter handed to the builder operations.
///
/// ```
/// use emberplus_provider::model::ParameterSpec;
///
/// let spec = ParameterSpec::new(12_i64)
///     .writable()
///     .range(0, 100)
///     .description("Input gain");
/// assert!(spec.is_writable);
/// assert_eq!(spec.range, Some((0, 100)));
/// ```
pub struct ParameterSpec<T: ParameterValue> {
    pub value: T,
    pub is_writable: bool,
    pub is_persistable: bool,
    pub description: Option<String>,
    /// Inclusive bounds. Integer and real parameters fall back to their
    /// default range when this is left empty.
    pub range: Option<(T, T)>,
    pub remote_setter: Option<RemoteSetter<T>>,
}

impl<T: ParameterValue + Default> Default for ParameterSpec<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ParameterValue> ParameterSpec<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            is_writable: false,
            is_persistable: false,
            description: None,
            range: None,
            remote_setter: None,
        }
    }

    pub fn writable(mut self) -> Self {
        self.is_writable = true;
        self
    }

    pub fn persistable(mut self) -> Self {
        self.is_persistable = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn range(mut self, minimum: T, maximum: T) -> Self {
        self.range = Some((minimum, maximum));
        self
    }

    pub fn remote_setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(&T, &Parameter<T>) -> bool + Send + Sync + 'static,
    {
        self.remote_setter = Some(Box::new(setter));
        self
    }
}

pub struct Parameter<T: ParameterValue> {
    header: ElementHeader,
    value: T,
    range: Option<(T, T)>,
    is_writable: bool,
    is_persistable: bool,
    remote_setter: Option<RemoteSetter<T>>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl<T: ParameterValue> fmt::Debug for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("identifier_path", &self.header.identifier_path())
            .field("path", &self.header.path())
            .field("value", &self.value)
            .field("range", &self.range)
            .field("is_writable", &self.is_writable)
            .field("is_persistable", &self.is_persistable)
            .field("has_remote_setter", &self.remote_setter.is_some())
            .finish()
    }
}

impl<T: ParameterValue> Parameter<T> {
    pub(crate) fn new(
        header: ElementHeader,
        spec: ParameterSpec<T>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        let header = header.with_description(spec.description);
        Self {
            header,
            value: spec.value,
            range: spec.range.or_else(T::default_range),
            is_writable: spec.is_writable,
            is_persistable: spec.is_persistable,
            remote_setter: spec.remote_setter,
            dispatcher,
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

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn range(&self) -> Option<&(T, T)> {
        self.range.as_ref()
    }

    pub fn is_writable(&self) -> bool {
        self.is_writable
    }

    pub fn is_persistable(&self) -> bool {
        self.is_persistable
    }

    pub fn in_range(&self, candidate: &T) -> bool {
        match &self.range {
            // Written so that NaN falls outside every range.
            Some((minimum, maximum)) => minimum <= candidate && candidate <= maximum,
            None => true,
        }
    }

    /// Apply a write requested by a peer. Returns whether the value was accepted.
    ///
    /// Checks run in order: writability, type, range, then the remote setter if
    /// one is bound. Rejections change nothing and are only logged at debug.
    pub fn remote_set(&mut self, value: &Value) -> bool {
        if !self.is_writable {
            return self.reject("parameter is read-only");
        }

        let Some(candidate) = T::from_value(value) else {
            return self.reject("value has the wrong type");
        };

        if !self.in_range(&candidate) {
            return self.reject("value is outside the parameter range");
        }

        if let Some(setter) = &self.remote_setter {
            if !setter(&candidate, self) {
                return self.reject("remote setter declined the value");
            }
        }

        self.value = candidate;
        let value = self.value.to_value();
        RemoteSetAccepted {
            identifier_path: self.header.identifier_path(),
            path: self.header.path(),
            value: &value,
        }
        .log();
        self.dispatcher
            .notify_parameter_value_changed(self.header.path(), &value);
        true
    }

    /// Apply a write from the hosting application. Bypasses writability, range
    /// and the remote setter.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
        let value = self.value.to_value();
        LocalUpdateApplied {
            identifier_path: self.header.identifier_path(),
            value: &value,
        }
        .log();
        self.dispatcher
            .notify_parameter_value_changed(self.header.path(), &value);
    }

    fn reject(&self, reason: &str) -> bool {
        RemoteSetRejected {
            identifier_path: self.header.identifier_path(),
            reason,
        }
        .log();
        false
    }
}

/// A parameter of any supported type, as stored in the tree.
#[derive(Debug)]
pub enum ParameterElement {
    String(StringParameter),
    Boolean(BooleanParameter),
    Integer(IntegerParameter),
    Enum(EnumParameter),
    Real(RealParameter),
}

impl ParameterElement {
    pub fn header(&self) -> &ElementHeader {
        match self {
            ParameterElement::String(p) => p.header(),
            ParameterElement::Boolean(p) => p.header(),
            ParameterElement::Integer(p) => p.header(),
            ParameterElement::Enum(p) => p.header(),
            ParameterElement::Real(p) => p.header(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParameterElement::String(_) => "string parameter",
            ParameterElement::Boolean(_) => "boolean parameter",
            ParameterElement::Integer(_) => "integer parameter",
            ParameterElement::Enum(_) => "enum parameter",
            ParameterElement::Real(_) => "real parameter",
        }
    }

    pub fn parameter_type(&self) -> ParameterType {
        match self {
            ParameterElement::String(_) => ParameterType::String,
            ParameterElement::Boolean(_) => ParameterType::Boolean,
            ParameterElement::Integer(_) => ParameterType::Integer,
            ParameterElement::Enum(_) => ParameterType::Enum,
            ParameterElement::Real(_) => ParameterType::Real,
        }
    }

    pub fn value(&self) -> Value {
        match self {
            ParameterElement::String(p) => p.value().to_value(),
            ParameterElement::Boolean(p) => p.value().to_value(),
            ParameterElement::Integer(p) => p.value().to_value(),
            ParameterElement::Enum(p) => Value::Integer(p.selected()),
            ParameterElement::Real(p) => p.value().to_value(),
        }
    }

    /// Inclusive bounds as protocol values; strings and booleans have none.
    pub fn range(&self) -> Option<(Value, Value)> {
        match self {
            ParameterElement::String(_) | ParameterElement::Boolean(_) => None,
            ParameterElement::Integer(p) => p
                .range()
                .map(|(min, max)| (Value::Integer(*min), Value::Integer(*max))),
            ParameterElement::Enum(p) => {
                Some((Value::Integer(p.minimum()), Value::Integer(p.maximum())))
            }
            ParameterElement::Real(p) => p
                .range()
                .map(|(min, max)| (Value::Real(*min), Value::Real(*max))),
        }
    }

    pub fn is_writable(&self) -> bool {
        match self {
            ParameterElement::String(p) => p.is_writable(),
            ParameterElement::Boolean(p) => p.is_writable(),
            ParameterElement::Integer(p) => p.is_writable(),
            ParameterElement::Enum(p) => p.is_writable(),
            ParameterElement::Real(p) => p.is_writable(),
        }
    }

    pub fn is_persistable(&self) -> bool {
        match self {
            ParameterElement::String(p) => p.is_persistable(),
            ParameterElement::Boolean(p) => p.is_persistable(),
            ParameterElement::Integer(p) => p.is_persistable(),
            ParameterElement::Enum(p) => p.is_persistable(),
            ParameterElement::Real(p) => p.is_persistable(),
        }
    }

    pub fn remote_set(&mut self, value: &Value) -> bool {
        match self {
            ParameterElement::String(p) => p.remote_set(value),
            ParameterElement::Boolean(p) => p.remote_set(value),
            ParameterElement::Integer(p) => p.remote_set(value),
            ParameterElement::Enum(p) => p.remote_set(value),
            ParameterElement::Real(p) => p.remote_set(value),
        }
    }
}

/// Value types that map onto exactly one [`ParameterElement`] variant.
///
/// Enum parameters are long-valued but are reached through
/// [`EnumParameter`] lookups rather than through `i64`.
pub trait TreeParameter: ParameterValue {
    fn wrap(parameter: Parameter<Self>) -> ParameterElement;

    fn from_element(element: &ParameterElement) -> Option<&Parameter<Self>>;

    fn from_element_mut(element: &mut ParameterElement) -> Option<&mut Parameter<Self>>;
}

macro_rules! tree_parameter {
    ($ty:ty, $variant:ident) => {
        impl TreeParameter for $ty {
            fn wrap(parameter: Parameter<Self>) -> ParameterElement {
                ParameterElement::$variant(parameter)
            }

            fn from_element(element: &ParameterElement) -> Option<&Parameter<Self>> {
                match element {
                    ParameterElement::$variant(p) => Some(p),
                    _ => None,
                }
            }

            fn from_element_mut(element: &mut ParameterElement) -> Option<&mut Parameter<Self>> {
                match element {
                    ParameterElement::$variant(p) => Some(p),
                    _ => None,
                }
            }
        }
    };
}

tree_parameter!(String, String);
tree_parameter!(bool, Boolean);
tree_parameter!(i64, Integer);
tree_parameter!(f64, Real);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingDispatcher;

    fn parameter<T: ParameterValue>(
        spec: ParameterSpec<T>,
    ) -> (Parameter<T>, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let root = ElementHeader::root();
        let header = ElementHeader::child_of(&root, 3, "gain").unwrap();
        (Parameter::new(header, spec, dispatcher.clone()), dispatcher)
    }

    #[test]
    fn test_remote_set_table_driven() {
        struct TestCase {
            name: &'static str,
            spec: fn() -> ParameterSpec<i64>,
            value: Value,
            accepted: bool,
        }

        let test_cases = vec![
            TestCase {
                name: "writable in range",
                spec: || ParameterSpec::new(0).writable().range(0, 10),
                value: Value::Integer(5),
                accepted: true,
            },
            TestCase {
                name: "read-only",
                spec: || ParameterSpec::new(0).range(0, 10),
                value: Value::Integer(5),
                accepted: false,
            },
            TestCase {
                name: "wrong type",
                spec: || ParameterSpec::new(0).writable().range(0, 10),
                value: Value::Real(5.0),
                accepted: false,
            },
            TestCase {
                name: "above maximum",
                spec: || ParameterSpec::new(0).writable().range(0, 10),
                value: Value::Integer(11),
                accepted: false,
            },
            TestCase {
                name: "below minimum",
                spec: || ParameterSpec::new(0).writable().range(0, 10),
                value: Value::Integer(-1),
                accepted: false,
            },
            TestCase {
                name: "inclusive bounds",
                spec: || ParameterSpec::new(0).writable().range(0, 10),
                value: Value::Integer(10),
                accepted: true,
            },
            TestCase {
                name: "setter veto",
                spec: || {
                    ParameterSpec::new(0)
                        .writable()
                        .remote_setter(|candidate: &i64, _: &Parameter<i64>| candidate % 2 == 0)
                },
                value: Value::Integer(3),
                accepted: false,
            },
            TestCase {
                name: "setter accepts",
                spec: || {
                    ParameterSpec::new(0)
                        .writable()
                        .remote_setter(|candidate: &i64, _: &Parameter<i64>| candidate % 2 == 0)
                },
                value: Value::Integer(4),
                accepted: true,
            },
        ];

        for case in test_cases {
            let (mut p, dispatcher) = parameter((case.spec)());
            assert_eq!(p.remote_set(&case.value), case.accepted, "case: {}", case.name);

            let notifications = dispatcher.parameter_changes();
            if case.accepted {
                assert_eq!(notifications, vec![(vec![3], case.value.clone())], "case: {}", case.name);
                assert_eq!(p.value().to_value(), case.value, "case: {}", case.name);
            } else {
                assert!(notifications.is_empty(), "case: {}", case.name);
                assert_eq!(*p.value(), 0, "case: {}", case.name);
            }
        }
    }

    #[test]
    fn test_default_ranges_apply_to_numeric_parameters() {
        let (mut integer, _) = parameter(ParameterSpec::new(0_i64).writable());
        assert_eq!(integer.range(), Some(&(0, 255)));
        assert!(!integer.remote_set(&Value::Integer(256)));

        let (real, _) = parameter(ParameterSpec::new(0.0_f64));
        assert_eq!(real.range(), Some(&(0.0, 255.0)));

        let (string, _) = parameter(ParameterSpec::new(String::new()));
        assert_eq!(string.range(), None);
    }

    #[test]
    fn test_real_rejects_nan() {
        let (mut p, _) = parameter(ParameterSpec::new(1.0_f64).writable());
        assert!(!p.remote_set(&Value::Real(f64::NAN)));
        assert_eq!(*p.value(), 1.0);
    }

    #[test]
    fn test_setter_sees_current_value() {
        let (mut p, _) = parameter(
            ParameterSpec::new("old".to_string())
                .writable()
                .remote_setter(|candidate: &String, current: &Parameter<String>| {
                    current.value() == "old" && candidate.starts_with('n')
                }),
        );

        assert!(p.remote_set(&Value::from("new")));
        assert!(!p.remote_set(&Value::from("next")));
        assert_eq!(p.value(), "new");
    }

    #[test]
    fn test_local_update_bypasses_checks() {
        let (mut p, dispatcher) = parameter(
            ParameterSpec::new(false).remote_setter(|_: &bool, _: &Parameter<bool>| false),
        );

        p.set_value(true);

        assert!(*p.value());
        assert_eq!(
            dispatcher.parameter_changes(),
            vec![(vec![3], Value::Boolean(true))]
        );
    }

    #[test]
    fn test_element_wrapper_reports_type_and_range() {
        let (p, _) = parameter(ParameterSpec::new(2.5_f64).range(-1.0, 3.0).persistable());
        let element = f64::wrap(p);

        assert_eq!(element.parameter_type(), ParameterType::Real);
        assert_eq!(element.value(), Value::Real(2.5));
        assert_eq!(element.range(), Some((Value::Real(-1.0), Value::Real(3.0))));
        assert!(element.is_persistable());
        assert!(!element.is_writable());
        assert!(f64::from_element(&element).is_some());
        assert!(i64::from_element(&element).is_none());
    }
}
