use crate::document::{ConfigContent, ConfigNode};
use crate::error::{ConfigError, FormatError};
use crate::layout::LayoutSink;
use crate::node::{FormatNode, NodePtr};
use crate::properties::CharProperties;
use crate::nodes::TextNode;
use crate::registry::NodeRegistry;
use lettering_expr::{Attributes, ExpressionSet, Feature};

/// Applies each child in turn with the same incoming properties.
///
/// Lists have no document form of their own: the children are written straight
/// into the parent element, and any element whose content has several items is
/// read back as a list. Text that would follow other text is written as a
/// `<Text>` element, since adjacent character data reads back as one expression.
#[derive(Debug, Default)]
pub struct ListNode {
    children: Vec<NodePtr>,
}

impl ListNode {
    pub const TAG: &'static str = "List";

    pub fn new(children: Vec<NodePtr>) -> Self {
        Self { children }
    }

    pub fn push(&mut self, child: NodePtr) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[NodePtr] {
        &self.children
    }

    /// Builds a list from an explicit `<List>` element.
    pub fn from_config(element: &ConfigNode, registry: &NodeRegistry) -> Result<Self, ConfigError> {
        Ok(Self::new(registry.build_nodes(element, &[])?))
    }
}

impl FormatNode for ListNode {
    fn apply(
        &self,
        properties: &CharProperties,
        feature: &dyn Feature,
        attrs: &Attributes,
        output: &mut dyn LayoutSink,
    ) -> Result<(), FormatError> {
        for child in &self.children {
            child.apply(properties, feature, attrs, output)?;
        }
        Ok(())
    }

    fn to_config(&self, parent: &mut ConfigNode) {
        for child in &self.children {
            let mut written = ConfigNode::new(Self::TAG);
            child.to_config(&mut written);
            for item in written.into_content() {
                match item {
                    ConfigContent::Text(text)
                        if matches!(parent.content().last(), Some(ConfigContent::Text(_))) =>
                    {
                        parent.push_text_element(TextNode::TAG, text);
                    }
                    item => parent.push_content(item),
                }
            }
        }
    }

    fn collect_expressions(&self, set: &mut ExpressionSet) {
        for child in &self.children {
            child.collect_expressions(set);
        }
    }
}
