// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for matrix routing and dynamic crosspoint requests.

use crate::model::ConnectOperation;
use crate::observability::messages::{dotted, StructuredLog};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A connect/disconnect request changed a target's connections.
///
/// # Log Level
/// `info!` - Routing change
///
/// # Example
/// ```
/// use emberplus_provider::model::ConnectOperation;
/// use emberplus_provider::observability::messages::matrix::ConnectionChanged;
///
/// let msg = ConnectionChanged {
///     identifier_path: "router/matrix",
///     target: 0,
///     operation: ConnectOperation::ConnectAbsolute,
///     connected: &[1, 2],
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ConnectionChanged<'a> {
    pub identifier_path: &'a str,
    pub target: i32,
    pub operation: ConnectOperation,
    pub connected: &'a [i32],
}

impl Display for ConnectionChanged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Matrix '{}' target {} after {:?}: sources [{}]",
            self.identifier_path,
            self.target,
            self.operation,
            self.connected
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl StructuredLog for ConnectionChanged<'_> {
    fn log(&self) {
        tracing::info!(
            identifier_path = self.identifier_path,
            target = self.target,
            operation = ?self.operation,
            connected_count = self.connected.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "matrix_connection",
            span_name = name,
            identifier_path = self.identifier_path,
            target = self.target,
        )
    }
}

/// A connect/disconnect request was dropped.
///
/// # Log Level
/// `debug!` - Unknown signals and vetoed requests are not errors
pub struct ConnectionRejected<'a> {
    pub identifier_path: &'a str,
    pub target: i32,
    pub reason: &'a str,
}

impl Display for ConnectionRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Matrix '{}' ignored request for target {}: {}",
            self.identifier_path, self.target, self.reason
        )
    }
}

impl StructuredLog for ConnectionRejected<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier_path = self.identifier_path,
            target = self.target,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "matrix_connection_rejected",
            span_name = name,
            identifier_path = self.identifier_path,
            target = self.target,
        )
    }
}

/// A peer changed a synthesized crosspoint gain.
///
/// # Log Level
/// `info!` - Routing change
pub struct CrosspointGainChanged<'a> {
    pub identifier_path: &'a str,
    pub target: i32,
    pub source: i32,
    pub gain: f64,
}

impl Display for CrosspointGainChanged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Matrix '{}' crosspoint {}/{} gain set to {} dB",
            self.identifier_path, self.target, self.source, self.gain
        )
    }
}

impl StructuredLog for CrosspointGainChanged<'_> {
    fn log(&self) {
        tracing::info!(
            identifier_path = self.identifier_path,
            target = self.target,
            source = self.source,
            gain = self.gain,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "crosspoint_gain",
            span_name = name,
            identifier_path = self.identifier_path,
            target = self.target,
            source = self.source,
        )
    }
}

/// A dynamic path request below a matrix did not match anything it synthesizes.
///
/// # Log Level
/// `debug!`
pub struct DynamicPathIgnored<'a> {
    pub identifier_path: &'a str,
    pub path: &'a [i32],
    pub reason: &'a str,
}

impl Display for DynamicPathIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Matrix '{}' ignored dynamic path {}: {}",
            self.identifier_path,
            dotted(self.path),
            self.reason
        )
    }
}

impl StructuredLog for DynamicPathIgnored<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier_path = self.identifier_path,
            path = %dotted(self.path),
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dynamic_path_ignored",
            span_name = name,
            identifier_path = self.identifier_path,
            path = %dotted(self.path),
        )
    }
}
