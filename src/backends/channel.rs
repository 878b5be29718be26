// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::glow::{Document, Notification};
use crate::model::Value;
use crate::traits::{Client, Dispatcher};

/// Dispatcher forwarding every notification to a transport task over a channel.
///
/// Sending never blocks the tree. Once the receiving task is gone,
/// notifications are dropped with a debug log.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    sender: UnboundedSender<Notification>,
}

impl ChannelDispatcher {
    /// Create a dispatcher and the receiver the transport task drains.
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }

    fn send(&self, notification: Notification) {
        if let Err(err) = self.sender.send(notification) {
            tracing::debug!(notification = ?err.0, "Notification dropped: transport is gone");
        }
    }
}

impl Dispatcher for ChannelDispatcher {
    fn notify_parameter_value_changed(&self, path: &[i32], value: &Value) {
        self.send(Notification::ParameterValueChanged {
            path: path.to_vec(),
            value: value.clone(),
        });
    }

    fn notify_matrix_connection(&self, matrix_path: &[i32], target: i32, sources: &[i32]) {
        self.send(Notification::MatrixConnection {
            matrix_path: matrix_path.to_vec(),
            target,
            sources: sources.to_vec(),
        });
    }
}

/// One connected peer whose responses are forwarded over a channel.
#[derive(Debug, Clone)]
pub struct ChannelClient {
    sender: UnboundedSender<Document>,
}

impl ChannelClient {
    pub fn new() -> (Self, UnboundedReceiver<Document>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Client for ChannelClient {
    fn write(&self, document: Document) {
        if self.sender.send(document).is_err() {
            tracing::debug!("Response dropped: peer is gone");
        }
    }
}
