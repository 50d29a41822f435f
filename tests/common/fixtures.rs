use lettering::{CharProperties, Color, MapFeature};

/// Wraps formatting content in a `<TextTemplate>` document.
pub fn template(body: &str) -> String {
    format!("<TextTemplate>{}</TextTemplate>", body)
}

/// A road feature with a name and a rank attribute.
pub fn road(id: i64, name: &str, rank: f64) -> MapFeature {
    MapFeature::new(id).with("name", name).with("rank", rank)
}

/// The starting properties most tests cascade from.
pub fn base_properties() -> CharProperties {
    CharProperties {
        face_name: "DejaVu Sans".to_string(),
        text_size: 10.0,
        fill: Color::rgb(0x33, 0x33, 0x33),
        ..Default::default()
    }
}
