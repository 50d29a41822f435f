//! The evaluation engine for executing a parsed expression against a feature.

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::context::{Attributes, Feature};
use crate::error::ExprError;
use crate::functions;
use crate::value::Value;
use std::cmp::Ordering;

/// Everything an expression can read while it is evaluated.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub feature: &'a dyn Feature,
    pub variables: &'a Attributes,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(feature: &'a dyn Feature, variables: &'a Attributes) -> Self {
        Self { feature, variables }
    }
}

/// Evaluates an expression and returns a concrete `Value`.
pub fn evaluate(expr: &Expression, e_ctx: &EvaluationContext<'_>) -> Result<Value, ExprError> {
    match expr {
        Expression::Literal(v) => Ok(v.clone()),
        Expression::Attribute(name) => e_ctx
            .feature
            .get(name)
            .ok_or_else(|| ExprError::MissingAttribute(name.clone())),
        Expression::Variable(name) => e_ctx
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| ExprError::UnknownVariable(name.clone())),
        Expression::FunctionCall { name, args } => {
            let mut evaluated_args = Vec::with_capacity(args.len());
            for arg in args {
                evaluated_args.push(evaluate(arg, e_ctx)?);
            }
            functions::evaluate_function(name, evaluated_args)
        }
        Expression::BinaryOp { left, op, right } => evaluate_binary(left, *op, right, e_ctx),
        Expression::UnaryOp { op, expr } => {
            let val = evaluate(expr, e_ctx)?;
            match op {
                UnaryOperator::Minus => Ok(Value::Number(-val.to_number()?)),
                UnaryOperator::Not => Ok(Value::Boolean(!val.is_truthy())),
            }
        }
    }
}

fn evaluate_binary(
    left: &Expression,
    op: BinaryOperator,
    right: &Expression,
    e_ctx: &EvaluationContext<'_>,
) -> Result<Value, ExprError> {
    // `and` / `or` short-circuit, so the right side may reference absent attributes.
    match op {
        BinaryOperator::Or => {
            let l = evaluate(left, e_ctx)?.is_truthy();
            return Ok(Value::Boolean(l || evaluate(right, e_ctx)?.is_truthy()));
        }
        BinaryOperator::And => {
            let l = evaluate(left, e_ctx)?.is_truthy();
            return Ok(Value::Boolean(l && evaluate(right, e_ctx)?.is_truthy()));
        }
        _ => {}
    }

    let l = evaluate(left, e_ctx)?;
    let r = evaluate(right, e_ctx)?;
    let ordering = |accept: fn(Ordering) -> bool| Value::Boolean(l.compare(&r).is_some_and(accept));

    let result = match op {
        BinaryOperator::Equals => Value::Boolean(l.equals(&r)),
        BinaryOperator::NotEquals => Value::Boolean(!l.equals(&r)),
        BinaryOperator::LessThan => ordering(Ordering::is_lt),
        BinaryOperator::LessThanOrEqual => ordering(Ordering::is_le),
        BinaryOperator::GreaterThan => ordering(Ordering::is_gt),
        BinaryOperator::GreaterThanOrEqual => ordering(Ordering::is_ge),
        BinaryOperator::Plus => match (&l, &r) {
            (Value::String(_), _) | (_, Value::String(_)) => Value::String(format!("{}{}", l, r)),
            _ => Value::Number(l.to_number()? + r.to_number()?),
        },
        BinaryOperator::Minus => Value::Number(l.to_number()? - r.to_number()?),
        BinaryOperator::Multiply => Value::Number(l.to_number()? * r.to_number()?),
        BinaryOperator::Divide | BinaryOperator::Modulo => {
            let (n, d) = (l.to_number()?, r.to_number()?);
            if d == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            if op == BinaryOperator::Divide {
                Value::Number(n / d)
            } else {
                Value::Number(n % d)
            }
        }
        BinaryOperator::Or | BinaryOperator::And => unreachable!("handled above"),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MapFeature;
    use crate::parser::parse_expression;

    fn eval_with(source: &str, feature: &MapFeature, vars: &Attributes) -> Result<Value, ExprError> {
        let expr = parse_expression(source).unwrap();
        evaluate(&expr, &EvaluationContext::new(feature, vars))
    }

    fn eval(source: &str) -> Result<Value, ExprError> {
        let feature = MapFeature::new(1)
            .with("name", "Main St")
            .with("lanes", 4.0)
            .with("ref", "A1")
            .with("oneway", true)
            .with("note", Value::Null);
        let mut vars = Attributes::new();
        vars.insert("zoom".to_string(), Value::from(14.0));
        eval_with(source, &feature, &vars)
    }

    #[test]
    fn test_attribute_and_variable_lookup() {
        assert_eq!(eval("[name]").unwrap(), Value::from("Main St"));
        assert_eq!(eval("@zoom").unwrap(), Value::from(14.0));
        assert_eq!(eval("[note]").unwrap(), Value::Null);
        assert_eq!(
            eval("[missing]").unwrap_err(),
            ExprError::MissingAttribute("missing".into())
        );
        assert_eq!(
            eval("@scale").unwrap_err(),
            ExprError::UnknownVariable("scale".into())
        );
    }

    #[test]
    fn test_arithmetic_and_concatenation() {
        assert_eq!(eval("[lanes] * 2 + 1").unwrap(), Value::from(9.0));
        assert_eq!(eval("[name] + ' (' + [ref] + ')'").unwrap(), Value::from("Main St (A1)"));
        assert_eq!(eval("'lanes: ' + [lanes]").unwrap(), Value::from("lanes: 4"));
        assert_eq!(eval("[lanes] % 3").unwrap(), Value::from(1.0));
        assert_eq!(eval("-[lanes]").unwrap(), Value::from(-4.0));
        assert_eq!(eval("[lanes] / 0").unwrap_err(), ExprError::DivisionByZero);
        assert!(matches!(
            eval("[note] * 2").unwrap_err(),
            ExprError::TypeMismatch { expected: "number", .. }
        ));
    }

    #[test]
    fn test_comparisons_and_logic() {
        assert_eq!(eval("[lanes] = '4'").unwrap(), Value::from(true));
        assert_eq!(eval("[lanes] >= 4 and @zoom > 12").unwrap(), Value::from(true));
        assert_eq!(eval("[ref] < 'B'").unwrap(), Value::from(true));
        assert_eq!(eval("[ref] < 3").unwrap(), Value::from(false));
        assert_eq!(eval("not [oneway]").unwrap(), Value::from(false));
        assert_eq!(eval("[note] = null").unwrap(), Value::from(true));
    }

    #[test]
    fn test_logic_short_circuits() {
        assert_eq!(eval("[oneway] or [missing]").unwrap(), Value::from(true));
        assert_eq!(eval("false and [missing]").unwrap(), Value::from(false));
        assert!(eval("true and [missing]").is_err());
    }

    #[test]
    fn test_function_results() {
        assert_eq!(eval("upper([name])").unwrap(), Value::from("MAIN ST"));
        assert_eq!(eval("max([lanes], @zoom)").unwrap(), Value::from(14.0));
        assert_eq!(eval("length([ref])").unwrap(), Value::from(2.0));
    }
}
