// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Collaborator implementations for hosting a provider tree.
//!
//! The tree talks to the outside world only through the [`Dispatcher`] and
//! [`Client`] traits. This module provides implementations of both.
//!
//! # Available Backends
//!
//! ## Channel Backend
//! Forwards notifications and responses over `tokio` unbounded channels:
//! - **ChannelDispatcher**: change notifications for every connected peer
//! - **ChannelClient**: responses addressed to one peer
//! - **Use Case**: a transport task owning the sockets drains the receivers and
//!   encodes what it receives
//!
//! ## Stub Backend (Test-Only)
//! Recording doubles for unit tests (only available in test builds):
//! - **RecordingDispatcher**: keeps every notification
//! - **RecordingClient**: keeps every written document
//!
//! [`Dispatcher`]: crate::traits::Dispatcher
//! [`Client`]: crate::traits::Client

pub mod channel;

#[cfg(test)]
pub mod stub;

pub use channel::{ChannelClient, ChannelDispatcher};
