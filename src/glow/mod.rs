// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Request and response shapes exchanged with the dispatch collaborator.
//!
//! These mirror the logical content of the protocol's tree-exchange messages
//! without committing to a wire encoding. A decoder turns incoming bytes into
//! [`Command`], [`Invocation`] and plain [`Value`](crate::model::Value)s; an
//! encoder turns [`Document`]s and [`Notification`]s back into bytes.

mod document;

pub use document::{ConnectionState, Document, QualifiedElement, QualifiedParameter};

use serde::{Deserialize, Serialize};

use crate::model::Value;

/// Commands a peer can address to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Directory/metadata query for the addressed element.
    GetDirectory,
    Subscribe,
    Unsubscribe,
}

impl Command {
    /// Numeric command code as used on the wire.
    pub fn number(self) -> i32 {
        match self {
            Command::Subscribe => 30,
            Command::Unsubscribe => 31,
            Command::GetDirectory => 32,
        }
    }
}

/// A peer's request to write one parameter, addressed by absolute path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterUpdate {
    pub path: Vec<i32>,
    pub value: Value,
}

impl ParameterUpdate {
    pub fn new(path: impl Into<Vec<i32>>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// Body of a function invocation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Invocation {
    /// Correlation id; absent when the peer does not want a response.
    pub invocation_id: Option<i32>,
    /// Argument values; peers use both `None` and an empty list for "no arguments".
    pub arguments: Option<Vec<Value>>,
}

impl Invocation {
    pub fn new(invocation_id: Option<i32>, arguments: Option<Vec<Value>>) -> Self {
        Self {
            invocation_id,
            arguments,
        }
    }
}

/// Correlated response to an invocation that carried an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationResult {
    pub invocation_id: i32,
    pub success: bool,
    pub result: Vec<Value>,
}

/// Outbound change notification, as produced by a channel-backed dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    ParameterValueChanged {
        path: Vec<i32>,
        value: Value,
    },
    MatrixConnection {
        matrix_path: Vec<i32>,
        target: i32,
        sources: Vec<i32>,
    },
}
