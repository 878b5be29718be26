// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational logging in the provider goes through message
//! types in [`messages`]. Each message is a small struct with a `Display`
//! implementation plus a [`messages::StructuredLog`] implementation that emits
//! the event at the right level with structured fields.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::tree` - tree construction and request routing
//! * `messages::parameter` - remote and local parameter writes
//! * `messages::matrix` - connection changes and dynamic crosspoint requests
//! * `messages::function` - function invocation lifecycle
//!
//! # Usage
//!
//! ```rust
//! use emberplus_provider::observability::messages::{parameter::RemoteSetRejected, StructuredLog};
//!
//! let msg = RemoteSetRejected {
//!     identifier_path: "device/gain",
//!     reason: "parameter is read-only",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
