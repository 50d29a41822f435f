//! A loaded formatting document, ready to be applied to features.

use lettering_expr::{Attributes, ExpressionSet, Feature};
use lettering_format::{
    CharProperties, ConfigError, ConfigNode, FormatError, LayoutSink, NodePtr, NodeRegistry,
    TextLayout,
};
use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Name of the document's root element.
pub const ROOT_TAG: &str = "TextTemplate";

/// An immutable formatting tree plus the expressions it references.
///
/// The tree is only read after loading, so one instance can lay out any number
/// of features concurrently.
#[derive(Debug, Default)]
pub struct FormatTree {
    root: Option<NodePtr>,
    expressions: ExpressionSet,
}

impl FormatTree {
    /// Wraps an already built node. An empty tree produces no text.
    pub fn new(root: Option<NodePtr>) -> Self {
        let mut expressions = ExpressionSet::new();
        if let Some(node) = &root {
            node.collect_expressions(&mut expressions);
        }
        Self { root, expressions }
    }

    /// Loads a `<TextTemplate>` document using the built-in node kinds.
    pub fn from_xml(source: &str) -> Result<Self, ConfigError> {
        Self::from_xml_with_registry(source, &NodeRegistry::default())
    }

    pub fn from_xml_with_registry(source: &str, registry: &NodeRegistry) -> Result<Self, ConfigError> {
        Self::from_config(&ConfigNode::parse(source)?, registry)
    }

    pub fn from_config(element: &ConfigNode, registry: &NodeRegistry) -> Result<Self, ConfigError> {
        if element.name() != ROOT_TAG {
            return Err(ConfigError::UnexpectedRoot {
                expected: ROOT_TAG,
                found: element.name().to_string(),
            });
        }
        let tree = Self::new(registry.build_content(element, &[])?);
        log::debug!(
            "Loaded formatting tree with {} expression(s) over attributes {:?}",
            tree.expressions.len(),
            tree.required_attributes()
        );
        Ok(tree)
    }

    pub fn root(&self) -> Option<&NodePtr> {
        self.root.as_ref()
    }

    pub fn expressions(&self) -> &ExpressionSet {
        &self.expressions
    }

    /// Feature attributes a data source must supply for this tree.
    pub fn required_attributes(&self) -> BTreeSet<String> {
        self.expressions.attribute_names()
    }

    /// Applies the tree to one feature, starting from `defaults`.
    pub fn apply(
        &self,
        defaults: &CharProperties,
        feature: &dyn Feature,
        attrs: &Attributes,
        output: &mut dyn LayoutSink,
    ) -> Result<(), FormatError> {
        match &self.root {
            Some(root) => root.apply(defaults, feature, attrs, output),
            None => Ok(()),
        }
    }

    pub fn layout(
        &self,
        defaults: &CharProperties,
        feature: &dyn Feature,
        attrs: &Attributes,
    ) -> Result<TextLayout, FormatError> {
        let mut layout = TextLayout::new();
        self.apply(defaults, feature, attrs, &mut layout)?;
        Ok(layout)
    }

    /// Lays out every feature, each into its own [`TextLayout`]. Results keep
    /// the order of `features`.
    pub fn layout_batch<F: Feature + Sync>(
        &self,
        defaults: &CharProperties,
        features: &[F],
        attrs: &Attributes,
    ) -> Vec<Result<TextLayout, FormatError>> {
        #[cfg(feature = "parallel")]
        let iter = features.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = features.iter();

        iter.map(|feature| self.layout(defaults, feature, attrs))
            .collect()
    }

    /// The document form of the tree, rooted at `<TextTemplate>`.
    pub fn to_config(&self) -> ConfigNode {
        let mut element = ConfigNode::new(ROOT_TAG);
        if let Some(root) = &self.root {
            root.to_config(&mut element);
        }
        element
    }

    pub fn to_xml(&self) -> Result<String, ConfigError> {
        self.to_config().to_xml_string()
    }
}
