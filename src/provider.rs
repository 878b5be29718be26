// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Request surface used by the dispatch collaborator.
//!
//! The dispatcher decodes peer messages into numeric paths and calls into a
//! [`Provider`]. Every request is first resolved statically against the tree;
//! only when no static element answers is the deepest element with the dynamic
//! path capability asked. Requests nothing answers are dropped and logged at
//! debug, never surfaced as errors.
//!
//! Requests are expected one at a time (`&mut self`). Function invocations are
//! the exception: [`Provider::invoke`] hands back an owned future so the caller
//! can spawn it and keep serving requests while the handler runs.

use std::future::Future;
use std::sync::Arc;

use crate::config::{ProviderConfig, TreeBuilder};
use crate::errors::{InvocationError, TreeError};
use crate::glow::{Command, Document, Invocation, InvocationResult, ParameterUpdate};
use crate::model::{ConnectOperation, Element, Node, Value};
use crate::observability::messages::tree::RequestIgnored;
use crate::observability::messages::{dotted, StructuredLog};
use crate::traits::{Client, Dispatcher};

/// A provider tree together with the operations peers can request on it.
#[derive(Debug)]
pub struct Provider {
    root: Node,
}

impl Provider {
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            root: Node::root(dispatcher),
        }
    }

    /// Validate and build a tree file.
    pub fn from_config(cfg: &ProviderConfig, dispatcher: Arc<dyn Dispatcher>) -> Result<Self, TreeError> {
        TreeBuilder::from_config(cfg, dispatcher)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Root node, for builder operations and local updates by the host.
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Node at `path` for attaching more children. An empty path is the root.
    pub fn node_mut(&mut self, path: &[i32]) -> Result<&mut Node, TreeError> {
        if path.is_empty() {
            return Ok(&mut self.root);
        }
        self.root
            .resolve_mut(path)
            .and_then(Element::as_node_mut)
            .ok_or_else(|| TreeError::UnknownParent {
                path: dotted(path),
            })
    }

    pub fn resolve(&self, path: &[i32]) -> Option<&Element> {
        self.root.resolve(path)
    }

    pub fn resolve_mut(&mut self, path: &[i32]) -> Option<&mut Element> {
        self.root.resolve_mut(path)
    }

    /// Apply a peer's parameter write. Returns whether any state changed.
    pub fn set_parameter(&mut self, path: &[i32], value: &Value, source: &dyn Client) -> bool {
        match self.root.resolve_mut(path) {
            Some(Element::Parameter(parameter)) => return parameter.remote_set(value),
            Some(_) => return ignore("set", path, "element is not a parameter"),
            None => {}
        }

        match self.root.resolve_dynamic_handler_mut(path) {
            Some(handler) => handler.handle_parameter(value, path, source),
            None => ignore("set", path, "no element at this path"),
        }
    }

    pub fn apply_update(&mut self, update: &ParameterUpdate, source: &dyn Client) -> bool {
        self.set_parameter(&update.path, &update.value, source)
    }

    /// Answer a command. Returns whether a response was written to `source`.
    ///
    /// Directory requests on static elements are answered here; an empty path
    /// addresses the root. Subscriptions are tracked by the dispatcher, not the
    /// tree, so they are acknowledged without a response.
    pub fn handle_command(&self, path: &[i32], command: Command, source: &dyn Client) -> bool {
        let document = if path.is_empty() {
            Some(Document::root_directory(&self.root))
        } else {
            self.root.resolve(path).map(Document::directory)
        };

        match (document, command) {
            (Some(document), Command::GetDirectory) => {
                source.write(document);
                true
            }
            (Some(_), Command::Subscribe | Command::Unsubscribe) => {
                ignore("subscription", path, "subscriptions are handled by the dispatcher")
            }
            (None, _) => match self.root.resolve_dynamic_handler(path) {
                Some(handler) => handler.handle_command(command, path, source),
                None => ignore("command", path, "no element at this path"),
            },
        }
    }

    /// Apply a peer's connect request to the matrix at `path`.
    pub fn connect(
        &mut self,
        path: &[i32],
        target: i32,
        sources: &[i32],
        operation: ConnectOperation,
    ) -> bool {
        match self.root.resolve_mut(path).and_then(Element::as_matrix_mut) {
            Some(matrix) => matrix.connect(target, sources, operation),
            None => ignore("connect", path, "no matrix at this path"),
        }
    }

    /// Start an invocation of the function at `path`.
    ///
    /// Returns `None` when no function lives there. The future borrows nothing
    /// from the provider.
    pub fn invoke(
        &self,
        path: &[i32],
        invocation: Option<Invocation>,
    ) -> Option<impl Future<Output = Result<Option<InvocationResult>, InvocationError>> + Send + 'static>
    {
        match self.root.resolve(path).and_then(Element::as_function) {
            Some(function) => Some(function.invoke(invocation)),
            None => {
                ignore("invoke", path, "no function at this path");
                None
            }
        }
    }

    /// Start an invocation whose correlated result is written to `source` as an
    /// invocation result document.
    ///
    /// Invocations without an id complete without writing anything. Failures are
    /// returned to the caller and nothing is written.
    pub fn invoke_with_reply(
        &self,
        path: &[i32],
        invocation: Option<Invocation>,
        source: Arc<dyn Client>,
    ) -> Option<impl Future<Output = Result<bool, InvocationError>> + Send + 'static> {
        let invocation = self.invoke(path, invocation)?;
        Some(async move {
            match invocation.await? {
                Some(result) => {
                    source.write(Document::InvocationResult(result));
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

fn ignore(request: &str, path: &[i32], reason: &str) -> bool {
    RequestIgnored {
        request,
        path,
        reason,
    }
    .log();
    false
}
