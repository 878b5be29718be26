// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Invocable tree functions.
//!
//! A [`Function`] pairs an argument/result signature with an asynchronous
//! [`FunctionHandler`]. [`Function::invoke`] checks the peer's invocation
//! against the signature, awaits the handler, then checks the handler's result
//! the same way.
//!
//! The returned future owns shared handles to the signature and handler and
//! borrows nothing from the tree. Callers spawn it and keep serving other
//! requests (including writes to the tree) while it runs; nothing about the tree
//! is assumed to be stable across the await.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::errors::{InvocationError, ValueMismatch};
use crate::glow::{Invocation, InvocationResult};
use crate::observability::messages::function::{
    InvocationCompleted, InvocationFailed, InvocationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::FunctionHandler;

use super::{ElementHeader, ParameterType, Value};

/// One named, typed position in an argument or result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TupleItem {
    pub name: String,
    pub parameter_type: ParameterType,
}

impl TupleItem {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParameterType::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Boolean)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Integer)
    }

    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Real)
    }
}

pub struct Function {
    header: ElementHeader,
    arguments: Arc<[TupleItem]>,
    /// Empty when the function returns nothing.
    result: Arc<[TupleItem]>,
    handler: Arc<dyn FunctionHandler>,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("identifier_path", &self.header.identifier_path())
            .field("path", &self.header.path())
            .field("arguments", &self.arguments)
            .field("result", &self.result)
            .finish()
    }
}

impl Function {
    pub(crate) fn new(
        header: ElementHeader,
        arguments: Vec<TupleItem>,
        result: Vec<TupleItem>,
        handler: Arc<dyn FunctionHandler>,
    ) -> Self {
        Self {
            header,
            arguments: arguments.into(),
            result: result.into(),
            handler,
        }
    }

    pub fn header(&self) -> &ElementHeader {
        &self.header
    }

    pub fn path(&self) -> &[i32] {
        self.header.path()
    }

    pub fn identifier(&self) -> &str {
        self.header.identifier()
    }

    pub fn arguments(&self) -> &[TupleItem] {
        &self.arguments
    }

    pub fn result(&self) -> &[TupleItem] {
        &self.result
    }

    pub fn has_result(&self) -> bool {
        !self.result.is_empty()
    }

    /// Run one invocation.
    ///
    /// Resolves to `Ok(Some(..))` with a result correlated to the invocation id
    /// when the peer supplied one, and to `Ok(None)` when it did not want a
    /// response. Signature mismatches resolve to an [`InvocationError`] and the
    /// handler is not called for argument mismatches.
    pub fn invoke(
        &self,
        invocation: Option<Invocation>,
    ) -> impl Future<Output = Result<Option<InvocationResult>, InvocationError>> + Send + 'static
    {
        let identifier_path = self.header.identifier_path().to_string();
        let arguments = Arc::clone(&self.arguments);
        let result = Arc::clone(&self.result);
        let handler = Arc::clone(&self.handler);

        async move {
            let outcome = run_invocation(&identifier_path, &arguments, &result, handler, invocation).await;
            if let Err(error) = &outcome {
                InvocationFailed {
                    identifier_path: &identifier_path,
                    error,
                }
                .log();
            }
            outcome
        }
    }
}

async fn run_invocation(
    identifier_path: &str,
    declared_arguments: &[TupleItem],
    declared_result: &[TupleItem],
    handler: Arc<dyn FunctionHandler>,
    invocation: Option<Invocation>,
) -> Result<Option<InvocationResult>, InvocationError> {
    let (invocation_id, arguments) = match invocation {
        None if !declared_arguments.is_empty() => {
            return Err(InvocationError::MissingArguments {
                function: identifier_path.to_string(),
            });
        }
        None => (None, Vec::new()),
        // Peers send both an absent and an empty list for "no arguments".
        Some(Invocation {
            invocation_id,
            arguments,
        }) => (invocation_id, arguments.unwrap_or_default()),
    };

    check_values(&arguments, declared_arguments).map_err(|reason| {
        InvocationError::ArgumentMismatch {
            function: identifier_path.to_string(),
            reason,
        }
    })?;

    if invocation_id.is_none() && !declared_result.is_empty() {
        return Err(InvocationError::MissingInvocationId {
            function: identifier_path.to_string(),
        });
    }

    InvocationStarted {
        identifier_path,
        invocation_id,
        argument_count: arguments.len(),
    }
    .log();
    let started = Instant::now();

    let values = handler.call(arguments).await;

    check_values(&values, declared_result).map_err(|reason| InvocationError::ResultMismatch {
        function: identifier_path.to_string(),
        reason,
    })?;

    InvocationCompleted {
        identifier_path,
        invocation_id,
        result_count: values.len(),
        duration: started.elapsed(),
    }
    .log();

    Ok(invocation_id.map(|invocation_id| InvocationResult {
        invocation_id,
        success: true,
        result: values,
    }))
}

/// Check count and type tags of `values` against `expected`.
fn check_values(values: &[Value], expected: &[TupleItem]) -> Result<(), ValueMismatch> {
    if values.len() != expected.len() {
        return Err(ValueMismatch::Count {
            expected: expected.len(),
            actual: values.len(),
        });
    }

    for (index, (value, item)) in values.iter().zip(expected).enumerate() {
        if value.parameter_type() != item.parameter_type {
            return Err(ValueMismatch::Type {
                index,
                name: item.name.clone(),
                expected: item.parameter_type,
                actual: value.parameter_type(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::from_fn;

    /// String arguments are answered with their length, anything else with `reply`.
    fn function(arguments: Vec<TupleItem>, result: Vec<TupleItem>, reply: Vec<Value>) -> Function {
        let root = ElementHeader::root();
        let header = ElementHeader::child_of(&root, 1, "fn").unwrap();
        let handler = from_fn(move |args: Vec<Value>| {
            let reply = reply.clone();
            async move {
                match args.first() {
                    Some(Value::String(s)) => vec![Value::Integer(s.len() as i64)],
                    _ => reply,
                }
            }
        });
        Function::new(header, arguments, result, Arc::new(handler))
    }

    #[tokio::test]
    async fn test_zero_argument_function_accepts_empty_and_absent_lists() {
        let f = function(vec![], vec![TupleItem::boolean("ok")], vec![Value::Boolean(true)]);

        let absent = f.invoke(Some(Invocation::new(Some(1), None))).await.unwrap();
        let empty = f.invoke(Some(Invocation::new(Some(2), Some(vec![])))).await.unwrap();

        assert_eq!(absent.unwrap().result, vec![Value::Boolean(true)]);
        assert_eq!(empty.unwrap().invocation_id, 2);
    }

    #[tokio::test]
    async fn test_one_argument_function_rejects_zero_arguments() {
        let f = function(
            vec![TupleItem::string("name")],
            vec![TupleItem::integer("length")],
            vec![],
        );

        let err = f
            .invoke(Some(Invocation::new(Some(1), Some(vec![]))))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            InvocationError::ArgumentMismatch {
                function: "fn".to_string(),
                reason: ValueMismatch::Count { expected: 1, actual: 0 },
            }
        );
    }

    #[tokio::test]
    async fn test_invocation_validation_table_driven() {
        struct TestCase {
            name: &'static str,
            arguments: Vec<TupleItem>,
            result: Vec<TupleItem>,
            invocation: Option<Invocation>,
            reply: Vec<Value>,
            expected: Result<Option<Vec<Value>>, &'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "no body, no arguments",
                arguments: vec![],
                result: vec![],
                invocation: None,
                reply: vec![],
                expected: Ok(None),
            },
            TestCase {
                name: "no body, declared arguments",
                arguments: vec![TupleItem::string("name")],
                result: vec![],
                invocation: None,
                reply: vec![],
                expected: Err("missing arguments"),
            },
            TestCase {
                name: "wrong argument type",
                arguments: vec![TupleItem::string("name")],
                result: vec![TupleItem::integer("length")],
                invocation: Some(Invocation::new(Some(4), Some(vec![Value::Integer(3)]))),
                reply: vec![Value::Integer(3)],
                expected: Err("argument mismatch"),
            },
            TestCase {
                name: "result without invocation id",
                arguments: vec![TupleItem::string("name")],
                result: vec![TupleItem::integer("length")],
                invocation: Some(Invocation::new(None, Some(vec![Value::from("abc")]))),
                reply: vec![],
                expected: Err("missing invocation id"),
            },
            TestCase {
                name: "handler breaks result signature",
                arguments: vec![],
                result: vec![TupleItem::integer("count")],
                invocation: Some(Invocation::new(Some(9), None)),
                reply: vec![Value::Real(1.0)],
                expected: Err("result mismatch"),
            },
            TestCase {
                name: "valid call with result",
                arguments: vec![TupleItem::string("name")],
                result: vec![TupleItem::integer("length")],
                invocation: Some(Invocation::new(Some(5), Some(vec![Value::from("abcd")]))),
                reply: vec![],
                expected: Ok(Some(vec![Value::Integer(4)])),
            },
        ];

        for case in test_cases {
            let f = function(case.arguments, case.result, case.reply);
            let outcome = f.invoke(case.invocation).await;

            match (outcome, case.expected) {
                (Ok(actual), Ok(expected)) => {
                    assert_eq!(actual.map(|r| r.result), expected, "case: {}", case.name)
                }
                (Err(err), Err(kind)) => {
                    let matched = match kind {
                        "missing arguments" => matches!(err, InvocationError::MissingArguments { .. }),
                        "argument mismatch" => matches!(err, InvocationError::ArgumentMismatch { .. }),
                        "missing invocation id" => {
                            matches!(err, InvocationError::MissingInvocationId { .. })
                        }
                        "result mismatch" => matches!(err, InvocationError::ResultMismatch { .. }),
                        _ => false,
                    };
                    assert!(matched, "case: {} got {:?}", case.name, err);
                }
                (outcome, expected) => {
                    panic!("case: {} got {:?}, expected {:?}", case.name, outcome, expected)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_undeclared_result_values_are_rejected() {
        let f = function(vec![], vec![], vec![Value::Boolean(true)]);
        let outcome = f.invoke(Some(Invocation::default())).await;

        assert!(matches!(
            outcome,
            Err(InvocationError::ResultMismatch {
                reason: ValueMismatch::Count { expected: 0, actual: 1 },
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_no_response_without_invocation_id() {
        let f = function(vec![], vec![], vec![]);
        assert_eq!(f.invoke(Some(Invocation::default())).await, Ok(None));
    }
}
