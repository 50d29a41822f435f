//! The fully resolved character properties handed to text layout.

use lettering_types::{Color, TextTransform};
use serde::{Deserialize, Serialize};

/// Every text-rendering parameter with a concrete value.
///
/// A cascade step clones the incoming record and overwrites only the fields its
/// node sets, so parent and child never share a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CharProperties {
    pub face_name: String,
    pub text_size: f64,
    pub character_spacing: f64,
    pub line_spacing: f64,
    pub text_opacity: f64,
    pub wrap_before: bool,
    pub wrap_char: char,
    pub text_transform: TextTransform,
    pub fill: Color,
    pub halo_fill: Color,
    pub halo_radius: f64,
}

impl Default for CharProperties {
    fn default() -> Self {
        Self {
            face_name: String::new(),
            text_size: 10.0,
            character_spacing: 0.0,
            line_spacing: 0.0,
            text_opacity: 1.0,
            wrap_before: false,
            wrap_char: ' ',
            text_transform: TextTransform::None,
            fill: Color::BLACK,
            halo_fill: Color::WHITE,
            halo_radius: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_json_keys() {
        let props: CharProperties =
            serde_json::from_str(r#"{ "face-name": "DejaVu Sans", "text-size": 14, "fill": "navy" }"#)
                .unwrap();
        assert_eq!(props.face_name, "DejaVu Sans");
        assert_eq!(props.text_size, 14.0);
        assert_eq!(props.fill, Color::rgb(0, 0, 128));
        assert_eq!(props.halo_fill, Color::WHITE);
        assert_eq!(props.wrap_char, ' ');
    }
}
