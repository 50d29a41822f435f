use lettering_expr::ExprError;
use thiserror::Error;

/// Position of an element in the source document. Line 0 means the element was
/// built in code rather than parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub col: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            f.write_str("unknown position")
        } else {
            write!(f, "line {}, column {}", self.line, self.col)
        }
    }
}

impl From<roxmltree::TextPos> for Location {
    fn from(pos: roxmltree::TextPos) -> Self {
        Location {
            line: pos.row,
            col: pos.col,
        }
    }
}

/// Errors raised while loading or writing a formatting document. Any of these
/// rejects the whole document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("XML writing error: {0}")]
    XmlWrite(String),

    #[error("Unknown formatting node <{tag}> at {location}")]
    UnknownNode { tag: String, location: Location },

    #[error("Expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: &'static str, found: String },

    #[error("Invalid value '{value}' for '{property}' at {location}: {message}")]
    InvalidValue {
        property: String,
        value: String,
        message: String,
        location: Location,
    },

    #[error("Invalid expression for '{property}' at {location}: {source}")]
    Expression {
        property: String,
        source: ExprError,
        location: Location,
    },
}

/// Errors raised while applying a formatting tree to a feature.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Failed to evaluate '{property}': {source}")]
    Property {
        property: &'static str,
        source: ExprError,
    },

    #[error("Failed to evaluate label text: {0}")]
    Text(#[source] ExprError),
}
