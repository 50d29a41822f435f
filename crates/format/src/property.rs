//! Property values that are either fixed or computed per feature.

use lettering_expr::ast::write_quoted;
use lettering_expr::{
    Attributes, EvaluationContext, ExprError, Expression, ExpressionSet, MapFeature, Value,
    evaluate, parse_expression,
};
use lettering_types::Color;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// A type a property can resolve to.
pub trait PropertyType: Sized + Clone + PartialEq + Debug {
    /// Converts an expression result, failing on values of the wrong shape.
    fn from_value(value: Value) -> Result<Self, ExprError>;

    /// Parses the plain (non-expression) document form.
    fn parse_literal(text: &str) -> Result<Self, String>;

    /// The document form of a literal; must be accepted by `PropertyValue::parse`.
    fn to_literal(&self) -> String;
}

impl PropertyType for f64 {
    fn from_value(value: Value) -> Result<Self, ExprError> {
        value.to_number()
    }

    fn parse_literal(text: &str) -> Result<Self, String> {
        text.trim().parse().map_err(|e| format!("{}", e))
    }

    fn to_literal(&self) -> String {
        self.to_string()
    }
}

impl PropertyType for String {
    fn from_value(value: Value) -> Result<Self, ExprError> {
        Ok(value.to_string())
    }

    fn parse_literal(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }

    fn to_literal(&self) -> String {
        let mut quoted = String::with_capacity(self.len() + 2);
        // Writing into a String cannot fail.
        let _ = write_quoted(&mut quoted, self);
        quoted
    }
}

impl PropertyType for Color {
    fn from_value(value: Value) -> Result<Self, ExprError> {
        match &value {
            Value::String(s) => Color::parse(s).map_err(|_| ExprError::TypeMismatch {
                expected: "color",
                found: format!("string '{}'", s),
            }),
            other => Err(ExprError::TypeMismatch {
                expected: "color",
                found: format!("{} '{}'", other.type_name(), other),
            }),
        }
    }

    fn parse_literal(text: &str) -> Result<Self, String> {
        Color::parse(text).map_err(|e| e.to_string())
    }

    fn to_literal(&self) -> String {
        self.to_string()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyParseError {
    #[error(transparent)]
    Expression(#[from] ExprError),

    #[error("{0}")]
    Literal(String),
}

/// A literal `T`, or an expression evaluated to `T` each time it is resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue<T> {
    Literal(T),
    Expression(Arc<Expression>),
}

impl<T> From<T> for PropertyValue<T> {
    fn from(value: T) -> Self {
        PropertyValue::Literal(value)
    }
}

impl<T: PropertyType> PropertyValue<T> {
    /// Wraps an expression source without constant folding.
    pub fn expression(source: &str) -> Result<Self, ExprError> {
        Ok(PropertyValue::Expression(Arc::new(parse_expression(source)?)))
    }

    /// Parses the document form of a property.
    ///
    /// The text is read as an expression first. An expression that references
    /// no attributes or variables is folded to a literal; text that is not an
    /// expression at all is read as a plain literal of `T` (`#ff0000`, `red`, `-`).
    pub fn parse(text: &str) -> Result<Self, PropertyParseError> {
        match parse_expression(text) {
            Ok(expr) if expr.is_constant() => {
                let folded = evaluate(&expr, &constant_context()).and_then(T::from_value);
                match folded {
                    Ok(value) => Ok(PropertyValue::Literal(value)),
                    Err(e) => T::parse_literal(text)
                        .map(PropertyValue::Literal)
                        .map_err(|_| PropertyParseError::Expression(e)),
                }
            }
            Ok(expr) => Ok(PropertyValue::Expression(Arc::new(expr))),
            Err(expr_err) => match T::parse_literal(text) {
                Ok(value) => Ok(PropertyValue::Literal(value)),
                // Report whichever reading the author most likely intended.
                Err(_) if text.contains(['[', '@', '(']) => Err(expr_err.into()),
                Err(literal_err) => Err(PropertyParseError::Literal(literal_err)),
            },
        }
    }

    /// Produces the value for one feature. Literals pass through unchanged.
    pub fn resolve(&self, e_ctx: &EvaluationContext<'_>) -> Result<T, ExprError> {
        match self {
            PropertyValue::Literal(value) => Ok(value.clone()),
            PropertyValue::Expression(expr) => T::from_value(evaluate(expr, e_ctx)?),
        }
    }

    pub fn as_expression(&self) -> Option<&Arc<Expression>> {
        match self {
            PropertyValue::Expression(expr) => Some(expr),
            PropertyValue::Literal(_) => None,
        }
    }

    pub fn collect_expressions(&self, set: &mut ExpressionSet) {
        if let Some(expr) = self.as_expression() {
            set.insert(expr);
        }
    }

    /// Text accepted back by [`PropertyValue::parse`].
    pub fn to_config_text(&self) -> String {
        match self {
            PropertyValue::Literal(value) => value.to_literal(),
            PropertyValue::Expression(expr) => expr.to_string(),
        }
    }
}

fn constant_context() -> EvaluationContext<'static> {
    static NO_FEATURE: std::sync::LazyLock<MapFeature> = std::sync::LazyLock::new(MapFeature::default);
    static NO_VARIABLES: std::sync::LazyLock<Attributes> = std::sync::LazyLock::new(Attributes::new);
    EvaluationContext::new(&*NO_FEATURE, &*NO_VARIABLES)
}
