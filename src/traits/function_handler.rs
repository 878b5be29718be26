// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::future::Future;

use crate::model::Value;

/// The asynchronous body bound to a tree function.
///
/// Several invocations of the same handler can be in flight at once, so any
/// state a handler keeps must tolerate concurrent callers.
#[async_trait]
pub trait FunctionHandler: Send + Sync {
    async fn call(&self, arguments: Vec<Value>) -> Vec<Value>;
}

/// Adapts an async closure into a [`FunctionHandler`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> FunctionHandler for FnHandler<F>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Vec<Value>> + Send + 'static,
{
    async fn call(&self, arguments: Vec<Value>) -> Vec<Value> {
        (self.0)(arguments).await
    }
}

/// Wrap an async closure as a function handler.
///
/// ```
/// use emberplus_provider::model::Value;
/// use emberplus_provider::traits::from_fn;
///
/// let handler = from_fn(|args: Vec<Value>| async move { args });
/// # let _ = handler;
/// ```
pub fn from_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Vec<Value>> + Send + 'static,
{
    FnHandler(f)
}
