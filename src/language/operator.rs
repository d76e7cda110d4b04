/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     operator.rs
 * Purpose:  Operator definitions, precedence-aware merging, and the
 *           type-directed dispatch used at evaluation time
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx-eval
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::sync::Arc;

use crate::error::EvalError;
use crate::evaluable::Evaluable;
use crate::parser::Parser;
use crate::value::Value;

pub type NumberFn = Arc<dyn Fn(f64, f64) -> Result<Value, EvalError> + Send + Sync>;
pub type TextFn = Arc<dyn Fn(&str, &str) -> Result<Value, EvalError> + Send + Sync>;
pub type BoolFn = Arc<dyn Fn(bool, bool) -> Result<Value, EvalError> + Send + Sync>;
pub type ArbitraryFn = Arc<dyn Fn(&Value, &Value) -> Result<Value, EvalError> + Send + Sync>;

/// Predicate over the evaluated left operand. Returning `Some(result)`
/// supplies the operator's value without evaluating the right operand.
pub type ShortCircuitFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Builds a new evaluable directly from the two *unevaluated* operand
/// evaluables, for operators whose right side is a literal pattern
/// rather than a runtime value.
pub type DirectFn =
    Arc<dyn Fn(Evaluable, Evaluable) -> Result<Evaluable, EvalError> + Send + Sync>;

/// Parse-time continuation for postfix operators: receives the parser
/// and the already-parsed left evaluable and consumes whatever follows.
pub type PostfixFn =
    Arc<dyn Fn(&mut Parser, Evaluable) -> Result<Evaluable, EvalError> + Send + Sync>;

/// Operator associativity. Everything is left-associative unless a
/// grammar fragment declares otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// A type-restricted infix handler. Handlers for one symbol accumulate
/// across grammar merges and are tried in registration order.
#[derive(Clone)]
pub enum TypedHandler {
    Number(NumberFn),
    Text(TextFn),
    Bool(BoolFn),
}

/// A mergeable infix operator: any mix of type-restricted handlers, a
/// generic fallback, and a short-circuit predicate, under one binding
/// power.
#[derive(Clone)]
pub struct InfixOperator {
    pub(crate) precedence: u8,
    pub(crate) assoc: Assoc,
    pub(crate) handlers: Vec<TypedHandler>,
    pub(crate) arbitrary: Option<ArbitraryFn>,
    pub(crate) short_circuit: Option<ShortCircuitFn>,
}

impl InfixOperator {
    pub(crate) fn empty() -> Self {
        Self {
            precedence: 0,
            assoc: Assoc::Left,
            handlers: Vec::new(),
            arbitrary: None,
            short_circuit: None,
        }
    }

    /// Builds the runtime evaluable for `left <symbol> right`.
    ///
    /// Evaluation order: left operand, then the short-circuit predicate
    /// (which may finish early), then the right operand, then dispatch.
    pub(crate) fn build(&self, symbol: &str, left: Evaluable, right: Evaluable) -> Evaluable {
        let handlers = self.handlers.clone();
        let arbitrary = self.arbitrary.clone();
        let short_circuit = self.short_circuit.clone();
        let symbol = symbol.to_string();

        Evaluable::new(move |cancel, parameter| {
            let a = left.evaluate(cancel, parameter)?;

            if let Some(sc) = &short_circuit {
                if let Some(result) = (**sc)(&a) {
                    return Ok(result);
                }
            }

            let b = right.evaluate(cancel, parameter)?;
            dispatch(&symbol, &handlers, &arbitrary, &a, &b)
        })
    }
}

/// Dispatches one infix application to the registered handlers.
///
/// Priority: exact-kind typed handlers in registration order, then the
/// generic fallback, then typed handlers again under permissive
/// coercion. Text handlers stay strict in the coercion pass so mixing
/// a number into string concatenation is a type error, not silent
/// stringification.
fn dispatch(
    symbol: &str,
    handlers: &[TypedHandler],
    arbitrary: &Option<ArbitraryFn>,
    a: &Value,
    b: &Value,
) -> Result<Value, EvalError> {
    for handler in handlers {
        match handler {
            TypedHandler::Number(f) => {
                if let (Value::Number(x), Value::Number(y)) = (a, b) {
                    return (**f)(*x, *y);
                }
            }
            TypedHandler::Text(f) => {
                if let (Value::String(x), Value::String(y)) = (a, b) {
                    return (**f)(x, y);
                }
            }
            TypedHandler::Bool(f) => {
                if let (Value::Bool(x), Value::Bool(y)) = (a, b) {
                    return (**f)(*x, *y);
                }
            }
        }
    }

    if let Some(f) = arbitrary {
        return (**f)(a, b);
    }

    for handler in handlers {
        match handler {
            TypedHandler::Number(f) => {
                if let (Some(x), Some(y)) = (a.as_float(), b.as_float()) {
                    return (**f)(x, y);
                }
            }
            TypedHandler::Bool(f) => {
                if let (Some(x), Some(y)) = (a.as_bool(), b.as_bool()) {
                    return (**f)(x, y);
                }
            }
            TypedHandler::Text(_) => {}
        }
    }

    Err(EvalError::type_error(format!(
        "invalid operation: {} {} {}",
        a.type_name(),
        symbol,
        b.type_name()
    )))
}

/// An operator whose builder receives the unevaluated operand
/// evaluables (pattern-style operators such as regex matching).
#[derive(Clone)]
pub struct DirectOperator {
    pub(crate) precedence: u8,
    pub(crate) assoc: Assoc,
    pub(crate) builder: DirectFn,
}

/// An operator that takes over parsing after the left operand
/// (ternary-style constructs).
#[derive(Clone)]
pub struct PostfixOperator {
    pub(crate) precedence: u8,
    pub(crate) assoc: Assoc,
    pub(crate) continuation: PostfixFn,
}

/// One entry of a grammar's operator table.
///
/// `Precedence` declares binding power without semantics; it is expected
/// to be completed by a later merge that supplies a handler for the
/// same symbol.
#[derive(Clone)]
pub enum OperatorDef {
    Infix(InfixOperator),
    Direct(DirectOperator),
    Postfix(PostfixOperator),
    Precedence { power: u8, assoc: Assoc },
}

impl OperatorDef {
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            OperatorDef::Infix(op) => op.precedence,
            OperatorDef::Direct(op) => op.precedence,
            OperatorDef::Postfix(op) => op.precedence,
            OperatorDef::Precedence { power, .. } => *power,
        }
    }

    pub(crate) fn assoc(&self) -> Assoc {
        match self {
            OperatorDef::Infix(op) => op.assoc,
            OperatorDef::Direct(op) => op.assoc,
            OperatorDef::Postfix(op) => op.assoc,
            OperatorDef::Precedence { assoc, .. } => *assoc,
        }
    }

    fn set_precedence(&mut self, power: u8, assoc: Assoc) {
        match self {
            OperatorDef::Infix(op) => {
                op.precedence = power;
                op.assoc = assoc;
            }
            OperatorDef::Direct(op) => {
                op.precedence = power;
                op.assoc = assoc;
            }
            OperatorDef::Postfix(op) => {
                op.precedence = power;
                op.assoc = assoc;
            }
            OperatorDef::Precedence {
                power: p,
                assoc: a,
            } => {
                *p = power;
                *a = assoc;
            }
        }
    }

    /// Combines an incoming operator definition with whatever an earlier
    /// fragment registered under the same symbol.
    ///
    /// - A bare precedence declaration only re-binds power/associativity
    ///   of the existing entry (last declaration wins).
    /// - Infix into infix accumulates typed handlers in registration
    ///   order; an incoming fallback or short-circuit slot overwrites.
    /// - Any other kind collision: the later entry replaces the earlier
    ///   one, inheriting its binding power when it declares none.
    pub(crate) fn merge(existing: Option<OperatorDef>, incoming: OperatorDef) -> OperatorDef {
        match (existing, incoming) {
            (None, incoming) => incoming,

            (Some(mut existing), OperatorDef::Precedence { power, assoc }) => {
                existing.set_precedence(power, assoc);
                existing
            }

            (Some(OperatorDef::Infix(mut existing)), OperatorDef::Infix(incoming)) => {
                existing.handlers.extend(incoming.handlers);
                if incoming.arbitrary.is_some() {
                    existing.arbitrary = incoming.arbitrary;
                }
                if incoming.short_circuit.is_some() {
                    existing.short_circuit = incoming.short_circuit;
                }
                if incoming.precedence != 0 {
                    existing.precedence = incoming.precedence;
                    existing.assoc = incoming.assoc;
                }
                OperatorDef::Infix(existing)
            }

            (Some(existing), mut incoming) => {
                if incoming.precedence() == 0 {
                    incoming.set_precedence(existing.precedence(), existing.assoc());
                }
                incoming
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_infix(precedence: u8) -> OperatorDef {
        let mut op = InfixOperator::empty();
        op.precedence = precedence;
        op.handlers
            .push(TypedHandler::Number(Arc::new(|a, b| Ok(Value::Number(a + b)))));
        OperatorDef::Infix(op)
    }

    fn bool_infix() -> OperatorDef {
        let mut op = InfixOperator::empty();
        op.handlers
            .push(TypedHandler::Bool(Arc::new(|a, b| Ok(Value::Bool(a & b)))));
        OperatorDef::Infix(op)
    }

    #[test]
    fn precedence_declaration_completes_a_handler_entry() {
        let merged = OperatorDef::merge(
            Some(number_infix(0)),
            OperatorDef::Precedence {
                power: 120,
                assoc: Assoc::Left,
            },
        );
        assert_eq!(merged.precedence(), 120);
        assert!(matches!(merged, OperatorDef::Infix(_)));
    }

    #[test]
    fn handler_entry_inherits_earlier_precedence_declaration() {
        let merged = OperatorDef::merge(
            Some(OperatorDef::Precedence {
                power: 40,
                assoc: Assoc::Left,
            }),
            number_infix(0),
        );
        assert_eq!(merged.precedence(), 40);
        assert!(matches!(merged, OperatorDef::Infix(_)));
    }

    #[test]
    fn conflicting_precedence_declarations_last_wins() {
        let first = OperatorDef::merge(
            Some(number_infix(0)),
            OperatorDef::Precedence {
                power: 10,
                assoc: Assoc::Left,
            },
        );
        let second = OperatorDef::merge(
            Some(first),
            OperatorDef::Precedence {
                power: 90,
                assoc: Assoc::Left,
            },
        );
        assert_eq!(second.precedence(), 90);
    }

    #[test]
    fn typed_handlers_accumulate_across_merges() {
        let merged = OperatorDef::merge(Some(number_infix(120)), bool_infix());
        match merged {
            OperatorDef::Infix(op) => {
                assert_eq!(op.handlers.len(), 2);
                assert_eq!(op.precedence, 120);
            }
            _ => panic!("expected an infix entry"),
        }
    }

    #[test]
    fn dispatch_prefers_exact_kind_then_falls_back() {
        let mut op = InfixOperator::empty();
        op.handlers
            .push(TypedHandler::Number(Arc::new(|a, b| Ok(Value::Number(a * b)))));
        op.arbitrary = Some(Arc::new(|_, _| Ok(Value::String("generic".into()))));

        let exact = dispatch(
            "op",
            &op.handlers,
            &op.arbitrary,
            &Value::Number(3.0),
            &Value::Number(4.0),
        )
        .unwrap();
        assert_eq!(exact, Value::Number(12.0));

        let generic = dispatch(
            "op",
            &op.handlers,
            &op.arbitrary,
            &Value::Bool(true),
            &Value::Null,
        )
        .unwrap();
        assert_eq!(generic, Value::String("generic".into()));
    }

    #[test]
    fn dispatch_coerces_numeric_strings_when_no_fallback_exists() {
        let mut op = InfixOperator::empty();
        op.handlers
            .push(TypedHandler::Number(Arc::new(|a, b| Ok(Value::Number(a * b)))));

        let coerced = dispatch(
            "*",
            &op.handlers,
            &None,
            &Value::String("5".into()),
            &Value::Number(3.0),
        )
        .unwrap();
        assert_eq!(coerced, Value::Number(15.0));

        let err = dispatch(
            "*",
            &op.handlers,
            &None,
            &Value::String("claw".into()),
            &Value::Number(3.0),
        )
        .unwrap_err();
        assert_eq!(err.code, "E_TYPE");
    }
}
