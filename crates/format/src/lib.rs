//! Formatting cascade for map labels.
//!
//! A formatting tree is read from an XML document into nodes that each override
//! part of the incoming [`CharProperties`]. Applying the tree to a feature walks
//! it top-down and hands every piece of label text, with its resolved
//! properties, to a [`LayoutSink`].

pub mod document;
pub mod error;
pub mod layout;
pub mod node;
pub mod nodes;
pub mod properties;
pub mod property;
pub mod registry;

pub use document::{ConfigContent, ConfigNode};
pub use error::{ConfigError, FormatError, Location};
pub use layout::{LayoutSink, TextLayout, TextRun};
pub use node::{FormatNode, NodePtr};
pub use nodes::{Format, ListNode, TextNode};
pub use properties::CharProperties;
pub use property::{PropertyParseError, PropertyType, PropertyValue};
pub use registry::{NodeBuilder, NodeRegistry};
