// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::glow::Document;
use crate::model::Value;

/// Outbound change notification towards every connected peer.
///
/// Notifications are fire-and-forget. Implementations may deliver them more than
/// once and in any order relative to each other.
pub trait Dispatcher: Send + Sync {
    fn notify_parameter_value_changed(&self, path: &[i32], value: &Value);

    /// A target's connected set changed after an accepted connect request.
    fn notify_matrix_connection(&self, _matrix_path: &[i32], _target: i32, _sources: &[i32]) {}
}

/// A single connected peer that responses can be written to.
pub trait Client: Send + Sync {
    fn write(&self, document: Document);
}
