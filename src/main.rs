use clap::Parser;
use lettering::{
    Attributes, CharProperties, FormatTree, PipelineError, Value, features_from_geojson,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Applies a label formatting document to GeoJSON features and prints the
/// resulting text runs as JSON.
#[derive(Parser, Debug)]
#[command(name = "lettering", version)]
struct Args {
    /// Formatting document with a <TextTemplate> root
    style: PathBuf,

    /// GeoJSON FeatureCollection to label
    #[arg(required_unless_present = "check")]
    features: Option<PathBuf>,

    /// JSON file with the starting character properties
    #[arg(long)]
    defaults: Option<PathBuf>,

    /// Extra value visible to expressions as @NAME
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_variable)]
    variables: Vec<(String, String)>,

    /// Only load the document and list the attributes it reads
    #[arg(long)]
    check: bool,
}

#[derive(Serialize)]
struct LabelOutput<'a> {
    id: i64,
    text: String,
    runs: &'a [lettering::TextRun],
}

fn parse_variable(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", arg))
}

fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let args = Args::parse();

    let tree = FormatTree::from_xml(&fs::read_to_string(&args.style)?)?;
    if args.check {
        let attributes: Vec<String> = tree.required_attributes().into_iter().collect();
        println!(
            "{}: ok, {} expression(s), attributes: [{}]",
            args.style.display(),
            tree.expressions().len(),
            attributes.join(", ")
        );
        return Ok(());
    }

    let defaults: CharProperties = match &args.defaults {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => CharProperties::default(),
    };
    let attrs: Attributes = args
        .variables
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect();

    let Some(features_path) = &args.features else {
        return Err(PipelineError::InvalidInput("no features file given".to_string()));
    };
    let features = features_from_geojson(&fs::read_to_string(features_path)?)?;

    let mut failed = 0;
    for (feature, result) in features
        .iter()
        .zip(tree.layout_batch(&defaults, &features, &attrs))
    {
        match result {
            Ok(layout) => {
                let label = LabelOutput {
                    id: feature.id,
                    text: layout.text(),
                    runs: layout.runs(),
                };
                println!("{}", serde_json::to_string(&label)?);
            }
            Err(e) => {
                failed += 1;
                log::error!("Feature {}: {}", feature.id, e);
            }
        }
    }

    if failed > 0 {
        log::warn!("{} of {} feature(s) could not be labelled", failed, features.len());
    }
    Ok(())
}
