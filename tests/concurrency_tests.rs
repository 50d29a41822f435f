mod common;

use common::fixtures::*;
use common::TestResult;
use lettering::{Attributes, Color, FormatTree};
use std::sync::Arc;
use std::thread;

const STYLE: &str = r#"<Format fill="[colour]"><size>[rank] + 10</size>[name]</Format>"#;

#[test]
fn test_shared_tree_across_threads() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = Arc::new(FormatTree::from_xml(&template(STYLE))?);
    let first = road(1, "North Way", 1.0).with("colour", "#ff0000");
    let second = road(2, "South Way", 4.0).with("colour", "#0000ff");

    thread::scope(|s| {
        let workers: Vec<_> = [(&first, "North Way", Color::rgb(255, 0, 0), 11.0),
                               (&second, "South Way", Color::rgb(0, 0, 255), 14.0)]
            .into_iter()
            .map(|(feature, text, fill, size)| {
                let tree = Arc::clone(&tree);
                s.spawn(move || {
                    let attrs = Attributes::new();
                    for _ in 0..200 {
                        let layout = tree.layout(&base_properties(), feature, &attrs).unwrap();
                        assert_eq!(layout.text(), text);
                        assert_eq!(layout.runs()[0].properties.fill, fill);
                        assert_eq!(layout.runs()[0].properties.text_size, size);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
    });
    Ok(())
}

#[test]
fn test_batch_layout_matches_sequential() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = FormatTree::from_xml(&template(STYLE))?;
    let features: Vec<_> = (0..500)
        .map(|i| {
            let colour = if i % 2 == 0 { "#ff0000" } else { "navy" };
            road(i, &format!("Street {}", i), (i % 7) as f64).with("colour", colour)
        })
        .collect();
    let attrs = Attributes::new();

    let batch = tree.layout_batch(&base_properties(), &features, &attrs);
    assert_eq!(batch.len(), features.len());
    for (feature, result) in features.iter().zip(batch) {
        assert_eq!(result?, tree.layout(&base_properties(), feature, &attrs)?);
    }
    Ok(())
}
