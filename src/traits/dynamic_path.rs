// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::glow::Command;
use crate::model::Value;
use crate::traits::Client;

/// Fallback resolver for addresses below an element that have no static child.
///
/// The request surface consults this only after static resolution failed, with
/// the full request path. Implementations answer for the part of their subtree
/// they synthesize and ignore everything else without error.
pub trait DynamicPathHandler {
    /// Apply a parameter write. Returns whether any state changed.
    fn handle_parameter(&mut self, value: &Value, path: &[i32], source: &dyn Client) -> bool;

    /// Answer a command. Returns whether a response was written to `source`.
    fn handle_command(&self, command: Command, path: &[i32], source: &dyn Client) -> bool;
}
