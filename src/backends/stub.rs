// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Mutex;

use crate::glow::Document;
use crate::model::Value;
use crate::traits::{Client, Dispatcher};

/// A dispatcher that records every notification for later inspection
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    parameter_changes: Mutex<Vec<(Vec<i32>, Value)>>,
    matrix_connections: Mutex<Vec<(Vec<i32>, i32, Vec<i32>)>>,
}

impl RecordingDispatcher {
    pub fn parameter_changes(&self) -> Vec<(Vec<i32>, Value)> {
        self.parameter_changes.lock().unwrap().clone()
    }

    pub fn matrix_connections(&self) -> Vec<(Vec<i32>, i32, Vec<i32>)> {
        self.matrix_connections.lock().unwrap().clone()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn notify_parameter_value_changed(&self, path: &[i32], value: &Value) {
        self.parameter_changes
            .lock()
            .unwrap()
            .push((path.to_vec(), value.clone()));
    }

    fn notify_matrix_connection(&self, matrix_path: &[i32], target: i32, sources: &[i32]) {
        self.matrix_connections
            .lock()
            .unwrap()
            .push((matrix_path.to_vec(), target, sources.to_vec()));
    }
}

/// A client that records every document written to it
#[derive(Debug, Default)]
pub struct RecordingClient {
    documents: Mutex<Vec<Document>>,
}

impl RecordingClient {
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }
}

impl Client for RecordingClient {
    fn write(&self, document: Document) {
        self.documents.lock().unwrap().push(document);
    }
}
