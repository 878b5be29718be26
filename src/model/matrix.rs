// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Signal routing matrices.
//!
//! A [`Matrix`] owns its target and source [`Signal`]s and applies
//! connect/disconnect requests to them. The variant behaviour lives in
//! [`MatrixKind`]:
//!
//! * `OneToN` routes sources to targets with no further rules.
//! * `OneToNBlindSource` reserves source 0 as the "blind" source meaning
//!   intentionally disconnected. Targets start on it, fall back to it when their
//!   last source is removed, and leave it as soon as a real source is connected.
//! * `Dynamic` also keeps a gain per crosspoint, exposed to peers through the
//!   dynamic path protocol (see [`super::dynamic_matrix`]).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::observability::messages::matrix::{ConnectionChanged, ConnectionRejected};
use crate::observability::messages::StructuredLog;
use crate::traits::Dispatcher;

use super::{ElementHeader, Signal, XpointTable};

/// Callback deciding whether a remote connect request is accepted.
///
/// Receives the target, the resolved candidate sources and the matrix as it is
/// before the change.
pub type RemoteConnector = Box<dyn Fn(&Signal, &[&Signal], &Matrix) -> bool + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectOperation {
    /// Add the sources to the target's connected set.
    Connect,
    /// Replace the target's connected set with the sources.
    ConnectAbsolute,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatrixKind {
    OneToN,
    OneToNBlindSource { blind_source: i32 },
    Dynamic(XpointTable),
}

/// Signals and label location produced by the matrix builders.
pub(crate) struct MatrixLayout {
    pub targets: Vec<Signal>,
    pub sources: Vec<Signal>,
    pub labels_path: Vec<i32>,
}

pub struct Matrix {
    pub(super) header: ElementHeader,
    targets: Vec<Signal>,
    sources: Vec<Signal>,
    labels_path: Vec<i32>,
    is_writable: bool,
    pub(super) kind: MatrixKind,
    remote_connector: Option<RemoteConnector>,
    pub(super) dispatcher: Arc<dyn Dispatcher>,
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("identifier_path", &self.header.identifier_path())
            .field("path", &self.header.path())
            .field("kind", &self.kind)
            .field("targets", &self.targets)
            .field("sources", &self.sources)
            .field("is_writable", &self.is_writable)
            .field("has_remote_connector", &self.remote_connector.is_some())
            .finish()
    }
}

impl Matrix {
    pub(crate) fn new(
        header: ElementHeader,
        layout: MatrixLayout,
        kind: MatrixKind,
        is_writable: bool,
        remote_connector: Option<RemoteConnector>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        let MatrixLayout {
            mut targets,
            sources,
            labels_path,
        } = layout;

        if let MatrixKind::OneToNBlindSource { blind_source } = kind {
            for target in &mut targets {
                target.normalize_blind(blind_source);
            }
        }

        Self {
            header,
            targets,
            sources,
            labels_path,
            is_writable,
            kind,
            remote_connector,
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

    pub fn kind(&self) -> &MatrixKind {
        &self.kind
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.kind, MatrixKind::Dynamic(_))
    }

    pub fn is_writable(&self) -> bool {
        self.is_writable
    }

    pub fn targets(&self) -> &[Signal] {
        &self.targets
    }

    pub fn sources(&self) -> &[Signal] {
        &self.sources
    }

    /// Path of the `labels` node holding the signal label parameters.
    pub fn labels_path(&self) -> &[i32] {
        &self.labels_path
    }

    pub fn target(&self, number: i32) -> Option<&Signal> {
        self.targets.iter().find(|s| s.number() == number)
    }

    pub fn source(&self, number: i32) -> Option<&Signal> {
        self.sources.iter().find(|s| s.number() == number)
    }

    /// Blind source number, for blind-source matrices.
    pub fn blind_source(&self) -> Option<i32> {
        match self.kind {
            MatrixKind::OneToNBlindSource { blind_source } => Some(blind_source),
            _ => None,
        }
    }

    /// Apply a peer's connect request. Returns whether the request was applied.
    ///
    /// The whole request is dropped if the matrix is read-only, the target or any
    /// source is unknown, or the remote connector declines it.
    pub fn connect(&mut self, target: i32, sources: &[i32], operation: ConnectOperation) -> bool {
        if !self.is_writable {
            return self.reject(target, "matrix is read-only");
        }

        let Some(target_index) = self.targets.iter().position(|s| s.number() == target) else {
            return self.reject(target, "unknown target");
        };

        let mut source_indices = Vec::with_capacity(sources.len());
        for number in sources {
            match self.sources.iter().position(|s| s.number() == *number) {
                Some(index) => source_indices.push(index),
                None => return self.reject(target, "unknown source"),
            }
        }

        if let Some(connector) = &self.remote_connector {
            let candidates: Vec<&Signal> = source_indices.iter().map(|i| &self.sources[*i]).collect();
            if !connector(&self.targets[target_index], &candidates, self) {
                return self.reject(target, "remote connector declined the request");
            }
        }

        self.apply(target_index, &source_indices, operation);

        let connected = self.targets[target_index].connected_sources();
        ConnectionChanged {
            identifier_path: self.header.identifier_path(),
            target,
            operation,
            connected,
        }
        .log();
        self.dispatcher
            .notify_matrix_connection(self.header.path(), target, connected);
        true
    }

    fn apply(&mut self, target_index: usize, source_indices: &[usize], operation: ConnectOperation) {
        let sources = source_indices.iter().map(|i| &self.sources[*i]);
        let target = &mut self.targets[target_index];

        match operation {
            ConnectOperation::Connect => target.connect(sources, false),
            ConnectOperation::ConnectAbsolute => target.connect(sources, true),
            ConnectOperation::Disconnect => target.disconnect(sources),
        }

        if let MatrixKind::OneToNBlindSource { blind_source } = self.kind {
            target.normalize_blind(blind_source);
        }
    }

    fn reject(&self, target: i32, reason: &str) -> bool {
        ConnectionRejected {
            identifier_path: self.header.identifier_path(),
            target,
            reason,
        }
        .log();
        false
    }
}
