//! The common interface of formatting tree nodes.

use crate::document::ConfigNode;
use crate::error::FormatError;
use crate::layout::LayoutSink;
use crate::properties::CharProperties;
use lettering_expr::{Attributes, ExpressionSet, Feature};
use std::fmt::Debug;

/// A node of a formatting tree.
///
/// Trees are built once and then only read, so nodes must be shareable across
/// threads that lay out different features at the same time.
pub trait FormatNode: Debug + Send + Sync {
    /// Resolves this node for one feature, writing any text it produces to `output`.
    /// `properties` belongs to the caller and is never modified.
    fn apply(
        &self,
        properties: &CharProperties,
        feature: &dyn Feature,
        attrs: &Attributes,
        output: &mut dyn LayoutSink,
    ) -> Result<(), FormatError>;

    /// Appends this node's document form to `parent`.
    fn to_config(&self, parent: &mut ConfigNode);

    /// Adds every expression reachable from this node to `set`.
    fn collect_expressions(&self, set: &mut ExpressionSet);
}

pub type NodePtr = Box<dyn FormatNode>;
