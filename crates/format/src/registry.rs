//! Maps document tag names to node constructors.

use crate::document::{ConfigContent, ConfigNode};
use crate::error::ConfigError;
use crate::node::NodePtr;
use crate::nodes::{Format, ListNode, TextNode};
use std::collections::HashMap;

/// Builds a node from its element. The registry is passed along so the
/// constructor can build nested content.
pub type NodeBuilder = fn(&ConfigNode, &NodeRegistry) -> Result<NodePtr, ConfigError>;

#[derive(Debug, Clone)]
pub struct NodeRegistry {
    builders: HashMap<String, NodeBuilder>,
}

impl Default for NodeRegistry {
    /// A registry with the built-in `Format`, `List` and `Text` nodes.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Format::TAG, build_format);
        registry.register(ListNode::TAG, build_list);
        registry.register(TextNode::TAG, build_text);
        registry
    }
}

fn build_format(element: &ConfigNode, registry: &NodeRegistry) -> Result<NodePtr, ConfigError> {
    Ok(Box::new(Format::from_config(element, registry)?))
}

fn build_list(element: &ConfigNode, registry: &NodeRegistry) -> Result<NodePtr, ConfigError> {
    Ok(Box::new(ListNode::from_config(element, registry)?))
}

fn build_text(element: &ConfigNode, _registry: &NodeRegistry) -> Result<NodePtr, ConfigError> {
    Ok(Box::new(TextNode::from_config(element)?))
}

impl NodeRegistry {
    /// An empty registry. Text content is still understood.
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registers `builder` for `tag`, returning the builder it replaces.
    pub fn register(&mut self, tag: impl Into<String>, builder: NodeBuilder) -> Option<NodeBuilder> {
        self.builders.insert(tag.into(), builder)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.builders.contains_key(tag)
    }

    /// Builds the node for `element`, dispatching on its tag.
    pub fn build(&self, element: &ConfigNode) -> Result<NodePtr, ConfigError> {
        let builder = self
            .builders
            .get(element.name())
            .ok_or_else(|| ConfigError::UnknownNode {
                tag: element.name().to_string(),
                location: element.location(),
            })?;
        log::debug!("Building <{}> at {}", element.name(), element.location());
        builder(element, self)
    }

    /// Builds one node per content item of `element`, in document order.
    ///
    /// Text becomes a text node and child elements are dispatched by tag, except
    /// the `reserved` names, which belong to the parent.
    pub fn build_nodes(
        &self,
        element: &ConfigNode,
        reserved: &[&str],
    ) -> Result<Vec<NodePtr>, ConfigError> {
        let mut nodes: Vec<NodePtr> = Vec::new();
        for item in element.content() {
            match item {
                ConfigContent::Text(text) => {
                    nodes.push(Box::new(TextNode::parse(text, element.location())?));
                }
                ConfigContent::Element(child) if reserved.contains(&child.name()) => {}
                ConfigContent::Element(child) => nodes.push(self.build(child)?),
            }
        }
        Ok(nodes)
    }

    /// Builds the content of `element` as a single node: several items are
    /// wrapped in a list and no items yields `None`.
    pub fn build_content(
        &self,
        element: &ConfigNode,
        reserved: &[&str],
    ) -> Result<Option<NodePtr>, ConfigError> {
        let mut nodes = self.build_nodes(element, reserved)?;
        Ok(match nodes.len() {
            0 => None,
            1 => nodes.pop(),
            _ => Some(Box::new(ListNode::new(nodes))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_fails_the_load() {
        let _ = env_logger::builder().is_test(true).try_init();

        let registry = NodeRegistry::default();
        let element = ConfigNode::parse(
            "<Format face-name='x'>\n  <Format><Layout/></Format>\n</Format>",
        )
        .unwrap();
        match registry.build(&element) {
            Err(ConfigError::UnknownNode { tag, location }) => {
                assert_eq!(tag, "Layout");
                assert_eq!(location.line, 2);
            }
            other => panic!("expected UnknownNode, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_tags_can_be_registered() {
        let mut registry = NodeRegistry::new();
        assert!(!registry.contains("Format"));
        registry.register("Span", build_format);
        let element = ConfigNode::parse("<Span fill='red'>[name]</Span>").unwrap();
        assert!(registry.build(&element).is_ok());
    }

    #[test]
    fn test_content_shapes() {
        let registry = NodeRegistry::default();
        let empty = ConfigNode::parse("<Format><size>3</size></Format>").unwrap();
        assert!(registry.build_content(&empty, &["size"]).unwrap().is_none());

        let several = ConfigNode::parse("<Format>[a]<Format/>[b]</Format>").unwrap();
        let node = registry.build_content(&several, &[]).unwrap().unwrap();
        assert!(format!("{:?}", node).starts_with("ListNode"));
    }
}
