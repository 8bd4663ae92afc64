use linemap::order::compare;
use linemap::{AttributeMap, Line, Map, MemorySource, OrderKey, OrderSpec, Rgb8, ConfigError};
use linemap::{Geometry, LineWithCasing, CASING_CORE};

use std::cmp::Ordering;
use std::sync::Arc;

fn dims(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn compare_is_lexicographic() {
    let d = dims(&["layer", "casing_core", "road_type"]);
    let a = OrderKey::new().with("layer", 0).with("casing_core", 1).with("road_type", 0);
    let b = OrderKey::new().with("layer", 1).with("casing_core", 0).with("road_type", 0);
    let c = OrderKey::new().with("layer", 0).with("casing_core", 1).with("road_type", 3);
    assert_eq!(compare(&a, &b, &d), Ordering::Less);
    assert_eq!(compare(&b, &a, &d), Ordering::Greater);
    assert_eq!(compare(&a, &c, &d), Ordering::Less);
    assert_eq!(compare(&a, &a, &d), Ordering::Equal);
}

#[test]
fn missing_dimension_reads_as_zero() {
    let d = dims(&["layer", "z"]);
    let a = OrderKey::new().with("z", 2);
    let b = OrderKey::new().with("layer", 0.0).with("z", 2);
    let neg = OrderKey::new().with("layer", -1);
    assert_eq!(compare(&a, &b, &d), Ordering::Equal);
    assert_eq!(compare(&neg, &a, &d), Ordering::Less);
    assert_eq!(compare(&OrderKey::new().with("layer", -0.0), &OrderKey::new(), &d), Ordering::Equal);
}

#[test]
fn dimensions_outside_the_spec_are_ignored() {
    let d = dims(&["layer"]);
    let a = OrderKey::new().with("other", 9);
    let b = OrderKey::new().with("other", 1);
    assert_eq!(compare(&a, &b, &d), Ordering::Equal);
}

#[test]
fn order_spec_is_validated() {
    assert_eq!(OrderSpec::new(["layer", ""]).unwrap_err(), ConfigError::EmptyDimension);
    assert_eq!(OrderSpec::new(["layer", "  "]).unwrap_err(), ConfigError::EmptyDimension);
}

/// Line with color and layer taken from the attributes
fn tagged_line(src: Arc<MemorySource>) -> Line {
    Line::new()
        .data(src)
        .color_fn(|a| Ok(Rgb8::new(a.int("id")? as u8, 0, 0)))
        .order_fn(|a| Ok(OrderKey::new().with("layer", a.int_lossy("layer") as f64)))
}

#[test]
fn sort_is_stable() {
    let mut src = MemorySource::new();
    for (id, layer) in [(1, 1), (2, 0), (3, 1), (4, 0), (5, 1), (6, 0)] {
        src.push(Geometry::line(&[(0.0, 0.0), (1.0, 1.0)]), AttributeMap::new().with("id", id).with("layer", layer));
    }
    let mut map = Map::new();
    map.configure_canvas(10, 10)
        .configure_bbox(0.0, 0.0, 10.0, 10.0)
        .configure_order(["layer"])
        .attach(tagged_line(Arc::new(src)));
    map.render().unwrap();

    let ids: Vec<u8> = map.features().iter().map(|f| f.color().r).collect();
    assert_eq!(ids, vec![2, 4, 6, 1, 3, 5]);
}

#[test]
fn later_symbolizer_keeps_its_place_among_equal_keys() {
    let first = Arc::new(MemorySource::new().with(Geometry::line(&[(0.0, 0.0), (1.0, 1.0)]), AttributeMap::new().with("id", 1)));
    let second = Arc::new(MemorySource::new().with(Geometry::line(&[(0.0, 0.0), (1.0, 1.0)]), AttributeMap::new().with("id", 2)));
    let mut map = Map::new();
    map.configure_canvas(10, 10)
        .configure_bbox(0.0, 0.0, 10.0, 10.0)
        .configure_order(["layer"])
        .attach(tagged_line(second))
        .attach(tagged_line(first));
    map.render().unwrap();
    let ids: Vec<u8> = map.features().iter().map(|f| f.color().r).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn casings_interleave_across_layers() {
    // A bridge on layer 1 over a road on layer 0, plus a road on layer 0
    // of a higher road type
    let roads = Arc::new(
        MemorySource::new()
            .with(Geometry::line(&[(0.0, 5.0), (10.0, 5.0)]), AttributeMap::new().with("layer", "1").with("type", 1))
            .with(Geometry::line(&[(5.0, 0.0), (5.0, 10.0)]), AttributeMap::new().with("layer", "0").with("type", 2))
            .with(Geometry::line(&[(0.0, 2.0), (10.0, 2.0)]), AttributeMap::new().with("layer", "0").with("type", 1)),
    );
    let mut map = Map::new();
    map.configure_canvas(10, 10)
        .configure_bbox(0.0, 0.0, 10.0, 10.0)
        .configure_order(["layer", CASING_CORE, "road_type"])
        .attach(
            LineWithCasing::new()
                .data(roads)
                .order_fn(|a| {
                    Ok(OrderKey::new()
                        .with("layer", a.int_lossy("layer") as f64)
                        .with("road_type", a.int("type")? as f64))
                })
                .core_width(2.0)
                .casing_width(2.0),
        );
    map.render().unwrap();

    let keys: Vec<(f64, f64, f64)> = map
        .features()
        .iter()
        .map(|f| (f.order().get("layer"), f.order().get(CASING_CORE), f.order().get("road_type")))
        .collect();
    assert_eq!(
        keys,
        vec![
            (0.0, 0.0, 1.0),
            (0.0, 0.0, 2.0),
            (0.0, 1.0, 1.0),
            (0.0, 1.0, 2.0),
            (1.0, 0.0, 1.0),
            (1.0, 1.0, 1.0),
        ]
    );
}
