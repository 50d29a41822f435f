use crate::document::ConfigNode;
use crate::error::{ConfigError, FormatError, Location};
use crate::layout::LayoutSink;
use crate::node::FormatNode;
use crate::properties::CharProperties;
use lettering_expr::{
    Attributes, EvaluationContext, Expression, ExpressionSet, Feature, evaluate, parse_expression,
};
use std::sync::Arc;

/// A leaf producing label text from an expression such as `[name]` or `'km'`.
#[derive(Debug, Clone)]
pub struct TextNode {
    expr: Arc<Expression>,
}

impl TextNode {
    /// Explicit element form, used where bare character data would run into
    /// neighbouring text.
    pub const TAG: &'static str = "Text";

    pub fn new(expr: Expression) -> Self {
        Self {
            expr: Arc::new(expr),
        }
    }

    /// Parses element text. Unlike property values, text is always an expression,
    /// so plain words must be quoted.
    pub fn parse(source: &str, location: Location) -> Result<Self, ConfigError> {
        let expr = parse_expression(source).map_err(|source| ConfigError::Expression {
            property: "text".to_string(),
            source,
            location,
        })?;
        Ok(Self::new(expr))
    }

    /// Builds a node from a `<Text>` element holding the expression.
    pub fn from_config(element: &ConfigNode) -> Result<Self, ConfigError> {
        let source = element.text().ok_or_else(|| ConfigError::InvalidValue {
            property: "text".to_string(),
            value: String::new(),
            message: "<Text> needs an expression".to_string(),
            location: element.location(),
        })?;
        Self::parse(&source, element.location())
    }

    pub fn expression(&self) -> &Arc<Expression> {
        &self.expr
    }
}

impl FormatNode for TextNode {
    fn apply(
        &self,
        properties: &CharProperties,
        feature: &dyn Feature,
        attrs: &Attributes,
        output: &mut dyn LayoutSink,
    ) -> Result<(), FormatError> {
        let e_ctx = EvaluationContext::new(feature, attrs);
        let value = evaluate(&self.expr, &e_ctx).map_err(FormatError::Text)?;
        let text = properties.text_transform.apply(&value.to_string());
        if !text.is_empty() {
            output.append_run(text, properties.clone());
        }
        Ok(())
    }

    fn to_config(&self, parent: &mut ConfigNode) {
        parent.push_text(self.expr.to_string());
    }

    fn collect_expressions(&self, set: &mut ExpressionSet) {
        set.insert(&self.expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextLayout;
    use lettering_expr::{ExprError, MapFeature};
    use lettering_types::TextTransform;

    #[test]
    fn test_text_is_transformed_with_cascaded_properties() {
        let node = TextNode::parse("[name] + ' ' + [ref]", Location::default()).unwrap();
        let feature = MapFeature::new(1).with("name", "high street").with("ref", 12.0);
        let props = CharProperties {
            text_transform: TextTransform::Uppercase,
            ..Default::default()
        };

        let mut layout = TextLayout::new();
        node.apply(&props, &feature, &Attributes::new(), &mut layout).unwrap();
        assert_eq!(layout.text(), "HIGH STREET 12");
        assert_eq!(layout.runs()[0].properties, props);
    }

    #[test]
    fn test_empty_text_adds_no_run() {
        let node = TextNode::parse("[name]", Location::default()).unwrap();
        let feature = MapFeature::new(1).with("name", "");
        let mut layout = TextLayout::new();
        node.apply(&CharProperties::default(), &feature, &Attributes::new(), &mut layout)
            .unwrap();
        assert!(layout.is_empty());
    }

    #[test]
    fn test_missing_attribute_is_reported() {
        let node = TextNode::parse("[name]", Location::default()).unwrap();
        let mut layout = TextLayout::new();
        let err = node
            .apply(&CharProperties::default(), &MapFeature::new(1), &Attributes::new(), &mut layout)
            .unwrap_err();
        assert_eq!(err, FormatError::Text(ExprError::MissingAttribute("name".into())));
    }

    #[test]
    fn test_text_element() {
        let element = ConfigNode::parse("<Text>'km'</Text>").unwrap();
        let node = TextNode::from_config(&element).unwrap();
        assert_eq!(node.expression().to_string(), "'km'");

        let empty = ConfigNode::parse("<Text/>").unwrap();
        assert!(matches!(
            TextNode::from_config(&empty),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unquoted_words_are_rejected() {
        let err = TextNode::parse("Main Street", Location { line: 3, col: 9 }).unwrap_err();
        assert!(matches!(err, ConfigError::Expression { ref property, location, .. }
            if property == "text" && location.line == 3));
    }
}
