//! Resolves label formatting documents into styled text runs.
//!
//! ```no_run
//! use lettering::{Attributes, CharProperties, FormatTree, MapFeature};
//!
//! let tree = FormatTree::from_xml(
//!     r#"<TextTemplate><Format fill="[colour]"><size>12</size>[name]</Format></TextTemplate>"#,
//! )?;
//! let feature = MapFeature::new(1).with("name", "Elm Road").with("colour", "#336699");
//! let layout = tree.layout(&CharProperties::default(), &feature, &Attributes::new())?;
//! assert_eq!(layout.text(), "Elm Road");
//! # Ok::<(), lettering::PipelineError>(())
//! ```

pub mod error;
pub mod source;
pub mod tree;

pub use error::PipelineError;
pub use source::{features_from_geojson, json_to_value};
pub use tree::{FormatTree, ROOT_TAG};

pub use lettering_expr::{
    Attributes, ExprError, Expression, ExpressionSet, Feature, MapFeature, Value,
    parse_expression,
};
pub use lettering_format::{
    CharProperties, ConfigError, ConfigNode, Format, FormatError, FormatNode, LayoutSink,
    ListNode, NodePtr, NodeRegistry, PropertyValue, TextLayout, TextNode, TextRun,
};
pub use lettering_types::{Color, TextTransform};
