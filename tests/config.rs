use linemap::{AttributeMap, BBox, ConfigError, Error, Geometry, Line, Map, MemorySource, RenderConfig, Rgb8};

use std::sync::Arc;

const CONFIG: &str = r#"{
    "canvasWidth": 64,
    "canvasHeight": 32,
    "bbox": {"xmin": 0.0, "ymin": 0.0, "xmax": 64.0, "ymax": 32.0},
    "orderDimensions": ["layer", "casing_core"],
    "outputPath": "rails.png",
    "background": [0, 0, 0]
}"#;

#[test]
fn map_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("render.json");
    std::fs::write(&cfg_path, CONFIG).unwrap();

    let mut cfg = RenderConfig::load(&cfg_path).unwrap();
    assert_eq!(cfg.bbox, BBox::new(0.0, 0.0, 64.0, 32.0));
    assert_eq!(cfg.order_dimensions, vec!["layer".to_string(), "casing_core".to_string()]);
    cfg.output_path = dir.path().join(&cfg.output_path);

    let rails = Arc::new(MemorySource::new().with(Geometry::line(&[(0.0, 16.0), (64.0, 16.0)]), AttributeMap::new()));
    let mut map = Map::from_config(&cfg);
    map.attach(Line::new().data(rails).color(Rgb8::white()).width(2.0));
    assert_eq!(map.project(32.0, 16.0), Ok((32.0, 16.0)));
    map.render_to_file(&cfg.output_path).unwrap();

    let img = linemap::read_file(&cfg.output_path).unwrap();
    assert_eq!((img.width, img.height), (64, 32));
    assert_eq!(img.pixel(0, 0), Rgb8::black());
    assert_eq!(img.pixel(32, 15), Rgb8::white());
}

#[test]
fn broken_configuration() {
    let err = RenderConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let dir = tempfile::tempdir().unwrap();
    let missing = RenderConfig::load(dir.path().join("none.json")).unwrap_err();
    assert!(matches!(missing, Error::Io(_)));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"canvasWidth": "wide"}"#).unwrap();
    assert!(matches!(RenderConfig::load(&bad), Err(Error::Config(ConfigError::Invalid(_)))));
}

#[test]
fn zero_sized_canvas_fails_at_render() {
    let cfg = RenderConfig::from_json_str(&CONFIG.replace("\"canvasWidth\": 64", "\"canvasWidth\": 0")).unwrap();
    let mut map = Map::from_config(&cfg);
    assert!(matches!(map.render(), Err(Error::Config(ConfigError::EmptyCanvas { width: 0, height: 32 }))));
}
