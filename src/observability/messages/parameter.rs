// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for parameter writes.
//!
//! This module contains message types for logging events related to:
//! * Remote set requests that were accepted
//! * Remote set requests that were rejected (read-only, wrong type, range, veto)
//! * Local updates pushed by the hosting application

use crate::model::Value;
use crate::observability::messages::{dotted, StructuredLog};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Remote set request accepted and applied.
///
/// # Log Level
/// `info!` - A peer changed provider state
///
/// # Example
/// ```
/// use emberplus_provider::model::Value;
/// use emberplus_provider::observability::messages::parameter::RemoteSetAccepted;
///
/// let value = Value::Integer(42);
/// let msg = RemoteSetAccepted {
///     identifier_path: "device/gain",
///     path: &[1, 3],
///     value: &value,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RemoteSetAccepted<'a> {
    pub identifier_path: &'a str,
    pub path: &'a [i32],
    pub value: &'a Value,
}

impl Display for RemoteSetAccepted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Parameter '{}' set remotely to {}",
            self.identifier_path, self.value
        )
    }
}

impl StructuredLog for RemoteSetAccepted<'_> {
    fn log(&self) {
        tracing::info!(
            identifier_path = self.identifier_path,
            path = %dotted(self.path),
            value = %self.value,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "remote_set",
            span_name = name,
            identifier_path = self.identifier_path,
            path = %dotted(self.path),
        )
    }
}

/// Remote set request dropped without changing state.
///
/// # Log Level
/// `debug!` - Misbehaving peers are tolerated silently
pub struct RemoteSetRejected<'a> {
    pub identifier_path: &'a str,
    pub reason: &'a str,
}

impl Display for RemoteSetRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Remote set on '{}' rejected: {}",
            self.identifier_path, self.reason
        )
    }
}

impl StructuredLog for RemoteSetRejected<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier_path = self.identifier_path,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "remote_set_rejected",
            span_name = name,
            identifier_path = self.identifier_path,
        )
    }
}

/// Hosting application pushed a new value.
///
/// # Log Level
/// `debug!` - Local updates can be frequent (meters, status)
pub struct LocalUpdateApplied<'a> {
    pub identifier_path: &'a str,
    pub value: &'a Value,
}

impl Display for LocalUpdateApplied<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Setting '{}' to {}", self.identifier_path, self.value)
    }
}

impl StructuredLog for LocalUpdateApplied<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier_path = self.identifier_path,
            value = %self.value,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "local_update",
            span_name = name,
            identifier_path = self.identifier_path,
        )
    }
}
