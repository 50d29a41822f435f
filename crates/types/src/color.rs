use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, map_res, opt},
    number::complete::double,
    sequence::{delimited, preceded, terminated},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid color '{0}'")]
    Invalid(String),

    #[error("Invalid hex color length in '{value}': expected 3, 6 or 8 digits, got {len}")]
    HexLength { value: String, len: usize },

    #[error("Color component out of range in '{0}'")]
    OutOfRange(String),
}

/// An RGBA color. Channels are 8-bit, alpha is a fraction in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
        self.a.to_bits().hash(state);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or a named color.
    pub fn parse(s: &str) -> Result<Color, ColorParseError> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(s, hex);
        }
        if let Some(named) = named_color(s) {
            return Ok(named);
        }
        match all_consuming(rgb_function).parse(s) {
            Ok((_, Some(color))) => Ok(color),
            Ok((_, None)) => Err(ColorParseError::OutOfRange(s.to_string())),
            Err(_) => Err(ColorParseError::Invalid(s.to_string())),
        }
    }

    fn parse_hex(original: &str, hex: &str) -> Result<Color, ColorParseError> {
        let component = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ColorParseError::Invalid(original.to_string()))
        };
        // Byte slicing below needs ASCII input.
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::Invalid(original.to_string()));
        }

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = component(&hex[0..1].repeat(2))?;
                let g = component(&hex[1..2].repeat(2))?;
                let b = component(&hex[2..3].repeat(2))?;
                Ok(Color::rgb(r, g, b))
            }
            6 | 8 => {
                let r = component(&hex[0..2])?;
                let g = component(&hex[2..4])?;
                let b = component(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    f32::from(component(&hex[6..8])?) / 255.0
                } else {
                    1.0
                };
                Ok(Color { r, g, b, a })
            }
            len => Err(ColorParseError::HexLength {
                value: original.to_string(),
                len,
            }),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "transparent" => Color::TRANSPARENT,
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "lime" => Color::rgb(0, 255, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "navy" => Color::rgb(0, 0, 128),
        "maroon" => Color::rgb(128, 0, 0),
        "olive" => Color::rgb(128, 128, 0),
        "teal" => Color::rgb(0, 128, 128),
        "silver" => Color::rgb(192, 192, 192),
        "gray" | "grey" => Color::gray(128),
        "brown" => Color::rgb(165, 42, 42),
        "pink" => Color::rgb(255, 192, 203),
        _ => return None,
    };
    Some(color)
}

fn ws<'a, F, O>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn channel(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 3, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u8>()
    })
    .parse(input)
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)`. Yields `None` for an alpha outside `0..=1`.
fn rgb_function(input: &str) -> IResult<&str, Option<Color>> {
    alt((
        map(
            preceded(
                tag_no_case("rgba"),
                delimited(
                    ws(char('(')),
                    (
                        terminated(ws(channel), char(',')),
                        terminated(ws(channel), char(',')),
                        terminated(ws(channel), char(',')),
                        ws(double),
                    ),
                    char(')'),
                ),
            ),
            |(r, g, b, a)| (0.0..=1.0).contains(&a).then_some(Color { r, g, b, a: a as f32 }),
        ),
        map(
            preceded(
                tag_no_case("rgb"),
                delimited(
                    ws(char('(')),
                    (
                        terminated(ws(channel), char(',')),
                        terminated(ws(channel), char(',')),
                        ws(channel),
                        opt(char(',')),
                    ),
                    char(')'),
                ),
            ),
            |(r, g, b, _)| Some(Color::rgb(r, g, b)),
        ),
    ))
    .parse(input)
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
