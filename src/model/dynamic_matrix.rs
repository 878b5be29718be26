// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-crosspoint parameters of dynamic matrices.
//!
//! A dynamic matrix keeps a gain for every (target, source) pair. These gains
//! are not static children of the tree; peers reach them below the matrix path
//! as
//!
//! ```text
//! matrix path + [0 (parameters), 3 (connections), target, source, 1 (gain)]
//! ```
//!
//! and the matrix answers through its [`DynamicPathHandler`] implementation.

use std::collections::BTreeMap;

use crate::glow::{Command, Document, QualifiedElement, QualifiedParameter};
use crate::observability::messages::matrix::{CrosspointGainChanged, DynamicPathIgnored};
use crate::observability::messages::StructuredLog;
use crate::traits::{Client, DynamicPathHandler};

use super::{Matrix, MatrixKind, ParameterType, Signal, Value};

pub const MINIMUM_GAIN: f64 = -128.0;
pub const MAXIMUM_GAIN: f64 = 15.0;

/// First path element below the matrix for the synthesized parameter subtree.
pub const PARAMETERS_SUB_IDENTIFIER: i32 = 0;
pub const CONNECTIONS_SLOT: i32 = 3;
pub const GAIN_SLOT: i32 = 1;
pub const GAIN_IDENTIFIER: &str = "dynamicGain";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XpointParams {
    pub gain: f64,
}

impl Default for XpointParams {
    fn default() -> Self {
        Self { gain: MINIMUM_GAIN }
    }
}

/// Crosspoint parameters for every (target, source) pair, keyed by signal number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XpointTable {
    xpoints: BTreeMap<i32, BTreeMap<i32, XpointParams>>,
}

impl XpointTable {
    pub(crate) fn new(targets: &[Signal], sources: &[Signal]) -> Self {
        let xpoints = targets
            .iter()
            .map(|target| {
                let row = sources
                    .iter()
                    .map(|source| (source.number(), XpointParams::default()))
                    .collect();
                (target.number(), row)
            })
            .collect();
        Self { xpoints }
    }

    pub fn get(&self, target: i32, source: i32) -> Option<&XpointParams> {
        self.xpoints.get(&target)?.get(&source)
    }

    fn get_mut(&mut self, target: i32, source: i32) -> Option<&mut XpointParams> {
        self.xpoints.get_mut(&target)?.get_mut(&source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &XpointParams)> {
        self.xpoints.iter().flat_map(|(target, row)| {
            row.iter().map(move |(source, params)| (*target, *source, params))
        })
    }
}

impl Matrix {
    pub fn xpoints(&self) -> Option<&XpointTable> {
        match &self.kind {
            MatrixKind::Dynamic(table) => Some(table),
            _ => None,
        }
    }

    pub fn xpoint_gain(&self, target: i32, source: i32) -> Option<f64> {
        self.xpoints()?.get(target, source).map(|p| p.gain)
    }

    fn ignore_dynamic(&self, path: &[i32], reason: &str) -> bool {
        DynamicPathIgnored {
            identifier_path: self.header.identifier_path(),
            path,
            reason,
        }
        .log();
        false
    }
}

impl DynamicPathHandler for Matrix {
    fn handle_parameter(&mut self, value: &Value, path: &[i32], _source: &dyn Client) -> bool {
        let Some(suffix) = path.strip_prefix(self.header.path()) else {
            return self.ignore_dynamic(path, "path is outside this matrix");
        };
        let (target, source) = match *suffix {
            [PARAMETERS_SUB_IDENTIFIER, CONNECTIONS_SLOT, target, source, GAIN_SLOT] => {
                (target, source)
            }
            _ => return self.ignore_dynamic(path, "not a crosspoint gain"),
        };
        let Some(gain) = value.as_real() else {
            return self.ignore_dynamic(path, "gain must be a real value");
        };
        if !(MINIMUM_GAIN..=MAXIMUM_GAIN).contains(&gain) {
            return self.ignore_dynamic(path, "gain is outside its range");
        }

        let MatrixKind::Dynamic(table) = &mut self.kind else {
            return false;
        };
        let Some(params) = table.get_mut(target, source) else {
            return self.ignore_dynamic(path, "unknown crosspoint");
        };
        params.gain = gain;

        CrosspointGainChanged {
            identifier_path: self.header.identifier_path(),
            target,
            source,
            gain,
        }
        .log();
        self.dispatcher
            .notify_parameter_value_changed(path, &Value::Real(gain));
        true
    }

    fn handle_command(&self, command: Command, path: &[i32], source: &dyn Client) -> bool {
        if command != Command::GetDirectory {
            return self.ignore_dynamic(path, "only directory requests are answered");
        }
        let Some(suffix) = path.strip_prefix(self.header.path()) else {
            return self.ignore_dynamic(path, "path is outside this matrix");
        };
        let (target, source_number) = match *suffix {
            [PARAMETERS_SUB_IDENTIFIER, CONNECTIONS_SLOT, target, source] => (target, source),
            _ => return self.ignore_dynamic(path, "not a crosspoint"),
        };
        let Some(gain) = self.xpoint_gain(target, source_number) else {
            return self.ignore_dynamic(path, "unknown crosspoint");
        };

        let mut gain_path = path.to_vec();
        gain_path.push(GAIN_SLOT);
        let parameter = QualifiedParameter {
            path: gain_path,
            identifier: GAIN_IDENTIFIER.to_string(),
            description: None,
            parameter_type: ParameterType::Real,
            value: Some(Value::Real(gain)),
            minimum: Some(Value::Real(MINIMUM_GAIN)),
            maximum: Some(Value::Real(MAXIMUM_GAIN)),
            enumeration: None,
            is_writable: true,
            is_persistable: false,
        };
        source.write(Document::elements(vec![QualifiedElement::Parameter(parameter)]));
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backends::stub::{RecordingClient, RecordingDispatcher};
    use crate::model::{ElementHeader, MatrixLayout};

    fn signals(count: i32) -> Vec<Signal> {
        (0..count).map(|n| Signal::new(n, vec![], false)).collect()
    }

    fn dynamic_matrix() -> (Matrix, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let root = ElementHeader::root();
        let wrapper = ElementHeader::child_of(&root, 5, "mixer").unwrap();
        let header = ElementHeader::child_of(&wrapper, 2, "matrix").unwrap();
        let targets = signals(2);
        let sources = signals(3);
        let kind = MatrixKind::Dynamic(XpointTable::new(&targets, &sources));
        let layout = MatrixLayout {
            targets,
            sources,
            labels_path: vec![5, 1],
        };
        (
            Matrix::new(header, layout, kind, true, None, dispatcher.clone()),
            dispatcher,
        )
    }

    #[test]
    fn test_all_gains_start_at_minimum() {
        let (m, _) = dynamic_matrix();
        let table = m.xpoints().unwrap();

        assert_eq!(table.iter().count(), 6);
        assert!(table.iter().all(|(_, _, p)| p.gain == -128.0));
    }

    #[test]
    fn test_gain_write_updates_and_notifies() {
        let (mut m, dispatcher) = dynamic_matrix();
        let client = RecordingClient::default();
        let path = [5, 2, 0, 3, 1, 2, 1];

        assert!(m.handle_parameter(&Value::Real(-6.0), &path, &client));

        assert_eq!(m.xpoint_gain(1, 2), Some(-6.0));
        assert_eq!(
            dispatcher.parameter_changes(),
            vec![(path.to_vec(), Value::Real(-6.0))]
        );
        assert!(client.documents().is_empty());
    }

    #[test]
    fn test_invalid_gain_writes_are_ignored() {
        let cases: Vec<(&str, Vec<i32>, Value)> = vec![
            ("integer value", vec![5, 2, 0, 3, 1, 2, 1], Value::Integer(-6)),
            ("above maximum", vec![5, 2, 0, 3, 1, 2, 1], Value::Real(16.0)),
            ("unknown target", vec![5, 2, 0, 3, 9, 2, 1], Value::Real(-6.0)),
            ("unknown source", vec![5, 2, 0, 3, 1, 9, 1], Value::Real(-6.0)),
            ("wrong leaf", vec![5, 2, 0, 3, 1, 2, 2], Value::Real(-6.0)),
            ("wrong section", vec![5, 2, 0, 4, 1, 2, 1], Value::Real(-6.0)),
            ("too short", vec![5, 2, 0, 3, 1, 2], Value::Real(-6.0)),
            ("other element", vec![6, 2, 0, 3, 1, 2, 1], Value::Real(-6.0)),
        ];

        for (name, path, value) in cases {
            let (mut m, dispatcher) = dynamic_matrix();
            let client = RecordingClient::default();

            assert!(!m.handle_parameter(&value, &path, &client), "case: {}", name);
            assert!(m.xpoints().unwrap().iter().all(|(_, _, p)| p.gain == -128.0), "case: {}", name);
            assert!(dispatcher.parameter_changes().is_empty(), "case: {}", name);
        }
    }

    #[test]
    fn test_directory_query_describes_gain() {
        let (m, _) = dynamic_matrix();
        let client = RecordingClient::default();

        assert!(m.handle_command(Command::GetDirectory, &[5, 2, 0, 3, 1, 0], &client));

        let documents = client.documents();
        assert_eq!(documents.len(), 1);
        let elements = documents[0].qualified_elements();
        assert_eq!(elements.len(), 1);
        let QualifiedElement::Parameter(gain) = &elements[0] else {
            panic!("expected a parameter, got {:?}", elements[0]);
        };
        assert_eq!(gain.path, vec![5, 2, 0, 3, 1, 0, 1]);
        assert_eq!(gain.identifier, "dynamicGain");
        assert_eq!(gain.value, Some(Value::Real(-128.0)));
        assert_eq!(gain.minimum, Some(Value::Real(-128.0)));
        assert_eq!(gain.maximum, Some(Value::Real(15.0)));
    }

    #[test]
    fn test_directory_query_for_unknown_pair_writes_nothing() {
        let (m, _) = dynamic_matrix();
        let client = RecordingClient::default();

        assert!(!m.handle_command(Command::GetDirectory, &[5, 2, 0, 3, 99, 0], &client));
        assert!(!m.handle_command(Command::Subscribe, &[5, 2, 0, 3, 1, 0], &client));
        assert!(client.documents().is_empty());
    }
}
