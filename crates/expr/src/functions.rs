//! Built-in functions callable from expressions.

use crate::error::ExprError;
use crate::value::Value;

/// Name and argument count of every built-in function.
const FUNCTIONS: &[(&str, usize)] = &[
    // Numeric, one argument
    ("sin", 1),
    ("cos", 1),
    ("tan", 1),
    ("atan", 1),
    ("exp", 1),
    ("log", 1),
    ("abs", 1),
    // Numeric, two arguments
    ("min", 2),
    ("max", 2),
    ("pow", 2),
    // String
    ("length", 1),
    ("upper", 1),
    ("lower", 1),
];

pub fn arity(name: &str) -> Option<usize> {
    FUNCTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, arity)| *arity)
}

/// Parse-time check that `name` exists and takes `found` arguments.
pub fn check_call(name: &str, found: usize) -> Result<(), ExprError> {
    match arity(name) {
        None => Err(ExprError::UnknownFunction(name.to_string())),
        Some(expected) if expected != found => Err(ExprError::Arity {
            function: name.to_string(),
            expected,
            found,
        }),
        Some(_) => Ok(()),
    }
}

/// Dispatches a function call to the correct implementation.
pub fn evaluate_function(name: &str, args: Vec<Value>) -> Result<Value, ExprError> {
    check_call(name, args.len())?;
    let number = |i: usize| args[i].to_number();

    let result = match name {
        "sin" => Value::Number(number(0)?.sin()),
        "cos" => Value::Number(number(0)?.cos()),
        "tan" => Value::Number(number(0)?.tan()),
        "atan" => Value::Number(number(0)?.atan()),
        "exp" => Value::Number(number(0)?.exp()),
        "log" => Value::Number(number(0)?.ln()),
        "abs" => Value::Number(number(0)?.abs()),
        "min" => Value::Number(number(0)?.min(number(1)?)),
        "max" => Value::Number(number(0)?.max(number(1)?)),
        "pow" => Value::Number(number(0)?.powf(number(1)?)),
        "length" => Value::Number(args[0].to_string().chars().count() as f64),
        "upper" => Value::String(args[0].to_string().to_uppercase()),
        "lower" => Value::String(args[0].to_string().to_lowercase()),
        _ => return Err(ExprError::UnknownFunction(name.to_string())),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_functions() {
        assert_eq!(
            evaluate_function("max", vec![Value::from(3.0), Value::from("7")]).unwrap(),
            Value::Number(7.0)
        );
        assert_eq!(
            evaluate_function("pow", vec![Value::from(2.0), Value::from(10.0)]).unwrap(),
            Value::Number(1024.0)
        );
        assert_eq!(
            evaluate_function("abs", vec![Value::from(-4.5)]).unwrap(),
            Value::Number(4.5)
        );
        assert!(evaluate_function("abs", vec![Value::Null]).is_err());
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(
            evaluate_function("length", vec![Value::from("Zürich")]).unwrap(),
            Value::Number(6.0)
        );
        assert_eq!(
            evaluate_function("upper", vec![Value::from("main st")]).unwrap(),
            Value::from("MAIN ST")
        );
        assert_eq!(
            evaluate_function("lower", vec![Value::from(12.0)]).unwrap(),
            Value::from("12")
        );
    }

    #[test]
    fn test_unknown_and_arity() {
        assert_eq!(
            evaluate_function("nope", vec![]).unwrap_err(),
            ExprError::UnknownFunction("nope".into())
        );
        assert!(matches!(
            check_call("min", 3),
            Err(ExprError::Arity { expected: 2, found: 3, .. })
        ));
    }
}
