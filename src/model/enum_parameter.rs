// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::traits::Dispatcher;

use super::{ElementHeader, IntegerParameter, Parameter, ParameterSpec, Value};

/// Integer parameter selecting one entry of a fixed list of display strings.
///
/// The range is always `0..=count-1`. An empty list leaves the maximum at -1,
/// which rejects every remote write.
#[derive(Debug)]
pub struct EnumParameter {
    inner: IntegerParameter,
    enum_values: Vec<String>,
}

impl EnumParameter {
    pub(crate) fn new(
        header: ElementHeader,
        enum_values: Vec<String>,
        spec: ParameterSpec<i64>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        let maximum = enum_values.len() as i64 - 1;
        let spec = ParameterSpec { range: Some((0, maximum)), ..spec };
        Self {
            inner: Parameter::new(header, spec, dispatcher),
            enum_values,
        }
    }

    pub fn header(&self) -> &ElementHeader {
        self.inner.header()
    }

    pub fn minimum(&self) -> i64 {
        0
    }

    pub fn maximum(&self) -> i64 {
        self.enum_values.len() as i64 - 1
    }

    pub fn enum_values(&self) -> &[String] {
        &self.enum_values
    }

    /// Display strings joined with line breaks, as peers expect them.
    pub fn enumeration(&self) -> String {
        self.enum_values.join("\n")
    }

    /// Index of the selected entry.
    pub fn selected(&self) -> i64 {
        *self.inner.value()
    }

    /// Display string of the selected entry, if the index is inside the list.
    pub fn selected_name(&self) -> Option<&str> {
        usize::try_from(self.selected())
            .ok()
            .and_then(|index| self.enum_values.get(index))
            .map(String::as_str)
    }

    pub fn is_writable(&self) -> bool {
        self.inner.is_writable()
    }

    pub fn is_persistable(&self) -> bool {
        self.inner.is_persistable()
    }

    pub fn remote_set(&mut self, value: &Value) -> bool {
        self.inner.remote_set(value)
    }

    pub fn set_value(&mut self, index: i64) {
        self.inner.set_value(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingDispatcher;

    fn enum_parameter(values: &[&str], spec: ParameterSpec<i64>) -> EnumParameter {
        let root = ElementHeader::root();
        let header = ElementHeader::child_of(&root, 1, "mode").unwrap();
        EnumParameter::new(
            header,
            values.iter().map(|v| v.to_string()).collect(),
            spec,
            Arc::new(RecordingDispatcher::default()),
        )
    }

    #[test]
    fn test_bounds_follow_value_count() {
        let p = enum_parameter(&["off", "on", "auto"], ParameterSpec::new(1));

        assert_eq!(p.minimum(), 0);
        assert_eq!(p.maximum(), 2);
        assert_eq!(p.enumeration(), "off\non\nauto");
        assert_eq!(p.selected_name(), Some("on"));
    }

    #[test]
    fn test_caller_range_is_replaced() {
        let mut p = enum_parameter(&["a", "b"], ParameterSpec::new(0).writable().range(0, 10));

        assert!(!p.remote_set(&Value::Integer(2)));
        assert!(p.remote_set(&Value::Integer(1)));
        assert_eq!(p.selected(), 1);
    }

    #[test]
    fn test_empty_enumeration_rejects_every_write() {
        let mut p = enum_parameter(&[], ParameterSpec::new(0).writable());

        assert_eq!(p.maximum(), -1);
        assert_eq!(p.enumeration(), "");
        assert!(!p.remote_set(&Value::Integer(0)));
        assert_eq!(p.selected_name(), None);
    }
}
