//! A `nom`-based parser for the feature expression language.

use super::ast::*;
use crate::error::ExprError;
use crate::functions;
use crate::value::Value;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, satisfy},
    combinator::{map, not, peek, recognize, value},
    multi::{many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded, terminated},
};

// --- Main Public Parser ---

pub fn parse_expression(input: &str) -> Result<Expression, ExprError> {
    let expr = match expression(input.trim()) {
        Ok(("", expr)) => expr,
        Ok((rem, _)) => {
            return Err(ExprError::Parse(
                input.to_string(),
                format!("Parser did not consume all input. Remainder: '{}'", rem),
            ));
        }
        Err(e) => return Err(ExprError::Parse(input.to_string(), e.to_string())),
    };
    check_calls(&expr)?;
    Ok(expr)
}

/// Rejects calls to unknown functions or with the wrong number of arguments.
fn check_calls(expr: &Expression) -> Result<(), ExprError> {
    let mut result = Ok(());
    expr.walk(&mut |e| {
        if result.is_err() {
            return;
        }
        if let Expression::FunctionCall { name, args } = e {
            result = functions::check_call(name, args.len());
        }
    });
    result
}

// --- Combinators & Helpers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A word that must not run on into an identifier (`or` but not `orange`).
fn keyword<'a>(word: &'static str) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    terminated(tag(word), not(satisfy(is_ident_char)))
}

fn build_binary_expr_parser<'a, F, G>(
    sub_expr_parser: F,
    op_parser: G,
) -> impl FnMut(&'a str) -> IResult<&'a str, Expression>
where
    F: Parser<&'a str, Output = Expression, Error = nom::error::Error<&'a str>> + Clone,
    G: Parser<&'a str, Output = BinaryOperator, Error = nom::error::Error<&'a str>> + Clone,
{
    move |input: &str| {
        let (input, mut left) = sub_expr_parser.clone().parse(input)?;
        let (input, remainder) = many0(pair(ws(op_parser.clone()), sub_expr_parser.clone())).parse(input)?;

        for (op, right) in remainder {
            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok((input, left))
    }
}

// --- Expression Parsers (in order of precedence) ---

fn expression(input: &str) -> IResult<&str, Expression> {
    or_expr(input)
}

fn or_op(input: &str) -> IResult<&str, BinaryOperator> {
    value(BinaryOperator::Or, alt((tag("||"), keyword("or")))).parse(input)
}

fn and_op(input: &str) -> IResult<&str, BinaryOperator> {
    value(BinaryOperator::And, alt((tag("&&"), keyword("and")))).parse(input)
}

fn or_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(and_expr, or_op)(input)
}

fn and_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(not_expr, and_op)(input)
}

fn not_expr(input: &str) -> IResult<&str, Expression> {
    let negation = ws(alt((keyword("not"), terminated(tag("!"), not(char('='))))));
    alt((
        map(preceded(negation, not_expr), |expr| Expression::UnaryOp {
            op: UnaryOperator::Not,
            expr: Box::new(expr),
        }),
        comparison_expr,
    ))
    .parse(input)
}

fn comparison_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::LessThanOrEqual, alt((tag("<="), keyword("le")))),
        value(BinaryOperator::GreaterThanOrEqual, alt((tag(">="), keyword("ge")))),
        value(BinaryOperator::NotEquals, alt((tag("!="), tag("<>"), keyword("neq")))),
        value(BinaryOperator::Equals, alt((tag("=="), tag("="), keyword("eq")))),
        value(BinaryOperator::LessThan, alt((tag("<"), keyword("lt")))),
        value(BinaryOperator::GreaterThan, alt((tag(">"), keyword("gt")))),
    ))
    .parse(input)
}

fn additive_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Plus, char('+')),
        value(BinaryOperator::Minus, char('-')),
    ))
    .parse(input)
}

fn multiplicative_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Multiply, char('*')),
        value(BinaryOperator::Divide, char('/')),
        value(BinaryOperator::Modulo, char('%')),
    ))
    .parse(input)
}

fn comparison_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(additive_expr, comparison_op)(input)
}

fn additive_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(multiplicative_expr, additive_op)(input)
}

fn multiplicative_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(unary_expr, multiplicative_op)(input)
}

fn unary_expr(input: &str) -> IResult<&str, Expression> {
    alt((
        map(preceded(ws(char('-')), unary_expr), |expr| Expression::UnaryOp {
            op: UnaryOperator::Minus,
            expr: Box::new(expr),
        }),
        primary_expr,
    ))
    .parse(input)
}

fn primary_expr(input: &str) -> IResult<&str, Expression> {
    ws(alt((
        delimited(ws(char('(')), expression, char(')')),
        attribute_reference,
        variable_reference,
        map(string_literal, |s| Expression::Literal(Value::String(s))),
        keyword_literal,
        function_call,
        map(double, |n| Expression::Literal(Value::Number(n))),
    )))
    .parse(input)
}

// --- Literal Parsers ---

fn keyword_literal(input: &str) -> IResult<&str, Expression> {
    alt((
        value(Expression::Literal(Value::Boolean(true)), keyword("true")),
        value(Expression::Literal(Value::Boolean(false)), keyword("false")),
        value(Expression::Literal(Value::Null), keyword("null")),
    ))
    .parse(input)
}

/// A single- or double-quoted string. Backslash escapes the quote, a backslash or `n`.
fn string_literal(input: &str) -> IResult<&str, String> {
    let (rest, quote) = alt((char('\''), char('"'))).parse(input)?;
    let mut out = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            c if c == quote => return Ok((&rest[i + c.len_utf8()..], out)),
            c => out.push(c),
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

// --- Reference Parsers ---

fn attribute_reference(input: &str) -> IResult<&str, Expression> {
    map(
        delimited(char('['), take_while1(|c: char| c != ']'), char(']')),
        |name: &str| Expression::Attribute(name.to_string()),
    )
    .parse(input)
}

fn variable_reference(input: &str) -> IResult<&str, Expression> {
    map(preceded(char('@'), identifier), |name| {
        Expression::Variable(name.to_string())
    })
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(is_ident_char),
    ))
    .parse(input)
}

// --- Function Call Parser ---

fn function_call(input: &str) -> IResult<&str, Expression> {
    // Lookahead for '(' keeps a bare word from being read as a call.
    let (i, name) = identifier(input)?;
    let (i, _) = peek(ws(char('('))).parse(i)?;
    let (i, _) = multispace0(i)?;
    let (i, args) = delimited(
        char('('),
        separated_list0(ws(char(',')), expression),
        ws(char(')')),
    )
    .parse(i)?;

    Ok((
        i,
        Expression::FunctionCall {
            name: name.to_string(),
            args,
        },
    ))
}
