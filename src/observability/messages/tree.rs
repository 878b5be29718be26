// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for tree construction and request routing.

use crate::observability::messages::{dotted, StructuredLog};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An element was bound under its parent.
///
/// # Log Level
/// `debug!` - Construction detail, one per element
///
/// # Example
/// ```
/// use emberplus_provider::observability::messages::tree::ElementRegistered;
///
/// let msg = ElementRegistered {
///     identifier_path: "device/gain",
///     path: &[1, 3],
///     kind: "integer parameter",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ElementRegistered<'a> {
    pub identifier_path: &'a str,
    pub path: &'a [i32],
    pub kind: &'a str,
}

impl Display for ElementRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered {} '{}' at {}",
            self.kind,
            self.identifier_path,
            dotted(self.path)
        )
    }
}

impl StructuredLog for ElementRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier_path = self.identifier_path,
            path = %dotted(self.path),
            kind = self.kind,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "element_registered",
            span_name = name,
            identifier_path = self.identifier_path,
            path = %dotted(self.path),
        )
    }
}

/// Declarative tree finished building.
///
/// # Log Level
/// `info!` - Startup milestone
pub struct TreeBuilt<'a> {
    pub name: &'a str,
    pub top_level_count: usize,
}

impl Display for TreeBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Provider tree '{}' built with {} top-level elements",
            self.name, self.top_level_count
        )
    }
}

impl StructuredLog for TreeBuilt<'_> {
    fn log(&self) {
        tracing::info!(
            name = self.name,
            top_level_count = self.top_level_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "tree_built",
            span_name = name,
            name = self.name,
            top_level_count = self.top_level_count,
        )
    }
}

/// A peer request addressed something that neither static nor dynamic
/// resolution could answer.
///
/// # Log Level
/// `debug!` - Stale or malicious addresses are expected and ignored
pub struct RequestIgnored<'a> {
    pub request: &'a str,
    pub path: &'a [i32],
    pub reason: &'a str,
}

impl Display for RequestIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Ignoring {} request at {}: {}",
            self.request,
            dotted(self.path),
            self.reason
        )
    }
}

impl StructuredLog for RequestIgnored<'_> {
    fn log(&self) {
        tracing::debug!(
            request = self.request,
            path = %dotted(self.path),
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "request_ignored",
            span_name = name,
            request = self.request,
            path = %dotted(self.path),
        )
    }
}
