mod common;

use common::fixtures::*;
use common::TestResult;
use lettering::{
    Attributes, CharProperties, Color, ExprError, FormatError, FormatTree, MapFeature, TextTransform,
    Value,
};

#[test]
fn test_unset_properties_are_inherited() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = FormatTree::from_xml(&template(
        r#"<Format face-name="Arial"><Format><size>14</size>[name]</Format></Format>"#,
    ))?;
    let layout = tree.layout(&base_properties(), &road(1, "Elm Road", 3.0), &Attributes::new())?;

    assert_eq!(layout.runs().len(), 1);
    let expected = CharProperties {
        face_name: "Arial".to_string(),
        text_size: 14.0,
        ..base_properties()
    };
    assert_eq!(layout.runs()[0].properties, expected);
    Ok(())
}

#[test]
fn test_inner_override_wins() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = FormatTree::from_xml(&template(
        r##"<Format fill="blue" halo-radius="1"><Format fill="#ff0000">[name]</Format></Format>"##,
    ))?;
    let layout = tree.layout(&base_properties(), &road(1, "Elm Road", 3.0), &Attributes::new())?;

    let props = &layout.runs()[0].properties;
    assert_eq!(props.fill, Color::rgb(255, 0, 0));
    assert_eq!(props.halo_radius, 1.0);
    Ok(())
}

#[test]
fn test_override_does_not_leak_to_siblings() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = FormatTree::from_xml(&template(
        r#"<Format>
             <size>10</size>
             <Format><size>20</size>[name]</Format>
             ' ' + [rank]
           </Format>"#,
    ))?;
    let layout = tree.layout(&base_properties(), &road(1, "Elm Road", 3.0), &Attributes::new())?;

    let sizes: Vec<f64> = layout.runs().iter().map(|r| r.properties.text_size).collect();
    assert_eq!(sizes, vec![20.0, 10.0]);
    assert_eq!(layout.text(), "Elm Road 3");
    Ok(())
}

#[test]
fn test_fill_from_feature_attribute() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = FormatTree::from_xml(&template(r#"<Format fill="[colour]">[name]</Format>"#))?;
    let attrs = Attributes::new();

    let red = road(1, "A", 1.0).with("colour", "#ff0000");
    let navy = road(2, "B", 1.0).with("colour", "navy");
    assert_eq!(
        tree.layout(&base_properties(), &red, &attrs)?.runs()[0].properties.fill,
        Color::rgb(255, 0, 0)
    );
    assert_eq!(
        tree.layout(&base_properties(), &navy, &attrs)?.runs()[0].properties.fill,
        Color::rgb(0, 0, 128)
    );
    Ok(())
}

#[test]
fn test_wrap_character_edge_cases() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let feature = road(1, "Elm Road", 3.0);

    let empty = FormatTree::from_xml(&template("<Format><wrap-character></wrap-character>[name]</Format>"))?;
    let layout = empty.layout(&base_properties(), &feature, &Attributes::new())?;
    assert_eq!(layout.runs()[0].properties.wrap_char, ' ');

    let long = FormatTree::from_xml(&template("<Format wrap-character=\"'XY'\">[name]</Format>"))?;
    let layout = long.layout(&base_properties(), &feature, &Attributes::new())?;
    assert_eq!(layout.runs()[0].properties.wrap_char, 'X');

    let computed = FormatTree::from_xml(&template("<Format><wrap-character>[wrap]</wrap-character>[name]</Format>"))?;
    let blank = road(2, "Elm Road", 3.0).with("wrap", "");
    let layout = computed.layout(&base_properties(), &blank, &Attributes::new())?;
    assert_eq!(layout.runs()[0].properties.wrap_char, ' ');
    let dashed = road(3, "Elm Road", 3.0).with("wrap", "-/");
    let layout = computed.layout(&base_properties(), &dashed, &Attributes::new())?;
    assert_eq!(layout.runs()[0].properties.wrap_char, '-');
    Ok(())
}

#[test]
fn test_non_ascii_colour_from_feature_is_an_error() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = FormatTree::from_xml(&template(r#"<Format fill="[c]">[name]</Format>"#))?;
    let feature = road(1, "Elm Road", 3.0).with("c", "#aéaaa");
    let err = tree
        .layout(&base_properties(), &feature, &Attributes::new())
        .unwrap_err();
    assert!(matches!(
        err,
        FormatError::Property { property: "fill", source: ExprError::TypeMismatch { expected: "color", .. } }
    ));
    Ok(())
}

#[test]
fn test_variables_and_functions() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = FormatTree::from_xml(&template(
        r#"<Format text-transform="uppercase">
             <size>max(@base, [rank] * 4)</size>
             <opacity>[rank] / 10</opacity>
             [name] + ' (' + length([name]) + ')'
           </Format>"#,
    ))?;
    let mut attrs = Attributes::new();
    attrs.insert("base".to_string(), Value::from(9.0));

    let layout = tree.layout(&base_properties(), &road(1, "Elm Rd", 3.0), &attrs)?;
    let run = &layout.runs()[0];
    assert_eq!(run.text, "ELM RD (6)");
    assert_eq!(run.properties.text_size, 12.0);
    assert_eq!(run.properties.text_opacity, 0.3);
    assert_eq!(run.properties.text_transform, TextTransform::Uppercase);
    Ok(())
}

#[test]
fn test_evaluation_errors_name_the_property() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = FormatTree::from_xml(&template(r#"<Format halo-fill="[halo]">[name]</Format>"#))?;
    let err = tree
        .layout(&base_properties(), &MapFeature::new(1).with("name", "x"), &Attributes::new())
        .unwrap_err();
    assert_eq!(
        err,
        FormatError::Property {
            property: "halo-fill",
            source: ExprError::MissingAttribute("halo".to_string()),
        }
    );
    Ok(())
}

#[test]
fn test_required_attributes() -> TestResult {
    let tree = FormatTree::from_xml(&template(
        r#"<Format fill="[colour]"><size>@base + [rank]</size>[name]<Format>[ref]</Format></Format>"#,
    ))?;
    let attributes: Vec<String> = tree.required_attributes().into_iter().collect();
    assert_eq!(attributes, vec!["colour", "name", "rank", "ref"]);
    assert_eq!(tree.expressions().len(), 4);
    assert!(tree.expressions().variable_names().contains("base"));
    Ok(())
}
