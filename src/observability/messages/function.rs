// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for function invocation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Invocation passed argument validation and is about to await its callback.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use emberplus_provider::observability::messages::function::InvocationStarted;
///
/// let msg = InvocationStarted {
///     identifier_path: "device/functions/reset",
///     invocation_id: Some(7),
///     argument_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct InvocationStarted<'a> {
    pub identifier_path: &'a str,
    pub invocation_id: Option<i32>,
    pub argument_count: usize,
}

impl Display for InvocationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Invoking function '{}' (invocation_id={:?}, arguments={})",
            self.identifier_path, self.invocation_id, self.argument_count
        )
    }
}

impl StructuredLog for InvocationStarted<'_> {
    fn log(&self) {
        tracing::info!(
            identifier_path = self.identifier_path,
            invocation_id = ?self.invocation_id,
            argument_count = self.argument_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "function_invocation",
            span_name = name,
            identifier_path = self.identifier_path,
            invocation_id = ?self.invocation_id,
        )
    }
}

/// Invocation finished and its result matched the declared signature.
///
/// # Log Level
/// `info!` - Important operational event
pub struct InvocationCompleted<'a> {
    pub identifier_path: &'a str,
    pub invocation_id: Option<i32>,
    pub result_count: usize,
    pub duration: std::time::Duration,
}

impl Display for InvocationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Function '{}' completed: invocation_id={:?}, results={}, duration={:?}",
            self.identifier_path, self.invocation_id, self.result_count, self.duration
        )
    }
}

impl StructuredLog for InvocationCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            identifier_path = self.identifier_path,
            invocation_id = ?self.invocation_id,
            result_count = self.result_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "function_completed",
            span_name = name,
            identifier_path = self.identifier_path,
            duration = ?self.duration,
        )
    }
}

/// Invocation failed validation before or after its callback.
///
/// # Log Level
/// `warn!` - A peer sent an incompatible call
pub struct InvocationFailed<'a> {
    pub identifier_path: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for InvocationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Function '{}' invocation failed: {}",
            self.identifier_path, self.error
        )
    }
}

impl StructuredLog for InvocationFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            identifier_path = self.identifier_path,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "function_failed",
            span_name = name,
            identifier_path = self.identifier_path,
        )
    }
}
