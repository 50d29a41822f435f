//! The override node: a set of optional property overrides applied to
//! everything beneath it.

use crate::document::ConfigNode;
use crate::error::{ConfigError, FormatError};
use crate::layout::LayoutSink;
use crate::node::{FormatNode, NodePtr};
use crate::properties::CharProperties;
use crate::property::{PropertyParseError, PropertyType, PropertyValue};
use crate::registry::NodeRegistry;
use lettering_expr::{Attributes, EvaluationContext, ExpressionSet, Feature};
use lettering_types::{Color, TextTransform};
use log::warn;

const SIZE: &str = "size";
const CHARACTER_SPACING: &str = "character-spacing";
const LINE_SPACING: &str = "line-spacing";
const OPACITY: &str = "opacity";
const WRAP_CHARACTER: &str = "wrap-character";
const LEGACY_WRAP_CHARACTER: &str = "wrap_char";
const HALO_RADIUS: &str = "halo-radius";
const FACE_NAME: &str = "face-name";
const WRAP_BEFORE: &str = "wrap-before";
const TEXT_TRANSFORM: &str = "text-transform";
const FILL: &str = "fill";
const HALO_FILL: &str = "halo-fill";

/// Names that hold property values rather than content when they appear as
/// child elements.
const PROPERTY_ELEMENTS: &[&str] = &[
    SIZE,
    CHARACTER_SPACING,
    LINE_SPACING,
    OPACITY,
    WRAP_CHARACTER,
    LEGACY_WRAP_CHARACTER,
    HALO_RADIUS,
    FILL,
    HALO_FILL,
];

const ATTRIBUTES: &[&str] = &[FACE_NAME, WRAP_BEFORE, TEXT_TRANSFORM];

/// Overrides a subset of the character properties for its child.
///
/// `None` inherits the incoming value. Property-valued fields may hold an
/// expression, evaluated against each feature the node is applied to.
#[derive(Debug, Default)]
pub struct Format {
    pub face_name: Option<String>,
    pub text_size: Option<PropertyValue<f64>>,
    pub character_spacing: Option<PropertyValue<f64>>,
    pub line_spacing: Option<PropertyValue<f64>>,
    pub text_opacity: Option<PropertyValue<f64>>,
    pub wrap_before: Option<bool>,
    pub wrap_char: Option<PropertyValue<String>>,
    pub text_transform: Option<TextTransform>,
    pub fill: Option<PropertyValue<Color>>,
    pub halo_fill: Option<PropertyValue<Color>>,
    pub halo_radius: Option<PropertyValue<f64>>,
    pub child: Option<NodePtr>,
}

impl Format {
    pub const TAG: &'static str = "Format";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_child(mut self, child: NodePtr) -> Self {
        self.child = Some(child);
        self
    }

    /// Builds a node from a `<Format>` element.
    ///
    /// Properties are read from nested elements or from attributes of the same
    /// name; everything else in the element's content becomes the child.
    pub fn from_config(element: &ConfigNode, registry: &NodeRegistry) -> Result<Self, ConfigError> {
        let mut node = Format {
            child: registry.build_content(element, PROPERTY_ELEMENTS)?,
            ..Default::default()
        };

        for (name, _) in element.attributes() {
            if !ATTRIBUTES.contains(&name) && !PROPERTY_ELEMENTS.contains(&name) {
                warn!("Ignoring unknown attribute '{}' on <{}> at {}", name, Self::TAG, element.location());
            }
        }

        node.face_name = element.attr(FACE_NAME).map(str::to_string);
        node.text_size = read_property(element, SIZE)?;
        node.character_spacing = read_property(element, CHARACTER_SPACING)?;
        node.line_spacing = read_property(element, LINE_SPACING)?;
        node.text_opacity = read_property(element, OPACITY)?;
        node.halo_radius = read_property(element, HALO_RADIUS)?;
        node.fill = read_property(element, FILL)?;
        node.halo_fill = read_property(element, HALO_FILL)?;

        node.wrap_char = read_property(element, WRAP_CHARACTER)?;
        if node.wrap_char.is_none() {
            node.wrap_char = read_property(element, LEGACY_WRAP_CHARACTER)?;
            if node.wrap_char.is_some() {
                warn!(
                    "'{}' at {} is deprecated, use '{}'",
                    LEGACY_WRAP_CHARACTER,
                    element.location(),
                    WRAP_CHARACTER
                );
            }
        }

        if let Some(value) = element.attr(WRAP_BEFORE) {
            let parsed = parse_bool(value).ok_or_else(|| ConfigError::InvalidValue {
                property: WRAP_BEFORE.to_string(),
                value: value.to_string(),
                message: "expected a boolean".to_string(),
                location: element.location(),
            })?;
            node.wrap_before = Some(parsed);
        }

        if let Some(value) = element.attr(TEXT_TRANSFORM) {
            let parsed = value
                .parse::<TextTransform>()
                .map_err(|e| ConfigError::InvalidValue {
                    property: TEXT_TRANSFORM.to_string(),
                    value: value.to_string(),
                    message: e.to_string(),
                    location: element.location(),
                })?;
            node.text_transform = Some(parsed);
        }

        Ok(node)
    }
}

impl FormatNode for Format {
    fn apply(
        &self,
        properties: &CharProperties,
        feature: &dyn Feature,
        attrs: &Attributes,
        output: &mut dyn LayoutSink,
    ) -> Result<(), FormatError> {
        let e_ctx = EvaluationContext::new(feature, attrs);
        let mut props = properties.clone();

        if let Some(face_name) = &self.face_name {
            props.face_name = face_name.clone();
        }
        if let Some(value) = &self.text_size {
            props.text_size = resolve(SIZE, value, &e_ctx)?;
        }
        if let Some(value) = &self.character_spacing {
            props.character_spacing = resolve(CHARACTER_SPACING, value, &e_ctx)?;
        }
        if let Some(value) = &self.line_spacing {
            props.line_spacing = resolve(LINE_SPACING, value, &e_ctx)?;
        }
        if let Some(value) = &self.text_opacity {
            props.text_opacity = resolve(OPACITY, value, &e_ctx)?;
        }
        if let Some(wrap_before) = self.wrap_before {
            props.wrap_before = wrap_before;
        }
        if let Some(value) = &self.wrap_char {
            // Only the first character is used; an empty string keeps the inherited one.
            if let Some(c) = resolve(WRAP_CHARACTER, value, &e_ctx)?.chars().next() {
                props.wrap_char = c;
            }
        }
        if let Some(transform) = self.text_transform {
            props.text_transform = transform;
        }
        if let Some(value) = &self.fill {
            props.fill = resolve(FILL, value, &e_ctx)?;
        }
        if let Some(value) = &self.halo_fill {
            props.halo_fill = resolve(HALO_FILL, value, &e_ctx)?;
        }
        if let Some(value) = &self.halo_radius {
            props.halo_radius = resolve(HALO_RADIUS, value, &e_ctx)?;
        }

        match &self.child {
            Some(child) => child.apply(&props, feature, attrs, output),
            None => {
                warn!("formatting has no effect: no attached content");
                Ok(())
            }
        }
    }

    fn to_config(&self, parent: &mut ConfigNode) {
        let element = parent.push_element(ConfigNode::new(Self::TAG));

        if let Some(face_name) = &self.face_name {
            element.set_attr(FACE_NAME, face_name);
        }
        if let Some(wrap_before) = self.wrap_before {
            element.set_attr(WRAP_BEFORE, wrap_before);
        }
        if let Some(transform) = self.text_transform {
            element.set_attr(TEXT_TRANSFORM, transform);
        }
        if let Some(fill) = &self.fill {
            element.set_attr(FILL, fill.to_config_text());
        }
        if let Some(halo_fill) = &self.halo_fill {
            element.set_attr(HALO_FILL, halo_fill.to_config_text());
        }

        write_property(element, SIZE, &self.text_size);
        write_property(element, CHARACTER_SPACING, &self.character_spacing);
        write_property(element, LINE_SPACING, &self.line_spacing);
        write_property(element, OPACITY, &self.text_opacity);
        write_property(element, WRAP_CHARACTER, &self.wrap_char);
        write_property(element, HALO_RADIUS, &self.halo_radius);

        if let Some(child) = &self.child {
            child.to_config(element);
        }
    }

    fn collect_expressions(&self, set: &mut ExpressionSet) {
        let numeric = [
            &self.text_size,
            &self.character_spacing,
            &self.line_spacing,
            &self.text_opacity,
            &self.halo_radius,
        ];
        for value in numeric.into_iter().flatten() {
            value.collect_expressions(set);
        }
        if let Some(value) = &self.wrap_char {
            value.collect_expressions(set);
        }
        for value in [&self.fill, &self.halo_fill].into_iter().flatten() {
            value.collect_expressions(set);
        }

        if let Some(child) = &self.child {
            child.collect_expressions(set);
        }
    }
}

fn resolve<T: PropertyType>(
    property: &'static str,
    value: &PropertyValue<T>,
    e_ctx: &EvaluationContext<'_>,
) -> Result<T, FormatError> {
    value
        .resolve(e_ctx)
        .map_err(|source| FormatError::Property { property, source })
}

/// Reads a property from the nested element `name`, falling back to an
/// attribute of the same name.
fn read_property<T: PropertyType>(
    element: &ConfigNode,
    name: &str,
) -> Result<Option<PropertyValue<T>>, ConfigError> {
    let (text, location) = match element.child(name) {
        Some(child) => (child.text().unwrap_or_default(), child.location()),
        None => match element.attr(name) {
            Some(value) => (value.to_string(), element.location()),
            None => return Ok(None),
        },
    };

    match PropertyValue::parse(&text) {
        Ok(value) => Ok(Some(value)),
        Err(PropertyParseError::Expression(source)) => Err(ConfigError::Expression {
            property: name.to_string(),
            source,
            location,
        }),
        Err(PropertyParseError::Literal(message)) => Err(ConfigError::InvalidValue {
            property: name.to_string(),
            value: text,
            message,
            location,
        }),
    }
}

fn write_property<T: PropertyType>(
    element: &mut ConfigNode,
    name: &str,
    value: &Option<PropertyValue<T>>,
) {
    if let Some(value) = value {
        element.push_text_element(name, value.to_config_text());
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
