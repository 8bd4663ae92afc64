use linemap::{BBox, ConfigError, Map, Projection};

#[test]
fn projection_law() {
    let mut map = Map::new();
    map.configure_canvas(200, 100).configure_bbox(0.0, 0.0, 100.0, 100.0);
    assert_eq!(map.project(50.0, 50.0), Ok((100.0, 50.0)));
    assert_eq!(map.project(0.0, 0.0), Ok((0.0, 100.0)));
    assert_eq!(map.project(100.0, 100.0), Ok((200.0, 0.0)));
    assert_eq!(map.project(0.0, 100.0), Ok((0.0, 0.0)));
}

#[test]
fn points_outside_the_box_project_outside_the_canvas() {
    let p = Projection::new(100, 100, BBox::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    let (x, y) = p.project(-5.0, 15.0);
    assert_eq!((x, y), (-50.0, -50.0));
}

#[test]
fn geographic_box() {
    let p = Projection::new(1200, 700, BBox::new(8.38, 48.995, 8.42, 49.01)).unwrap();
    let (x, y) = p.project(8.40, 49.0025);
    assert!((x - 600.0).abs() < 1e-6);
    assert!((y - 350.0).abs() < 1e-6);
}

#[test]
fn invalid_configuration() {
    let mut map = Map::new();
    map.configure_canvas(0, 100).configure_bbox(0.0, 0.0, 1.0, 1.0);
    assert_eq!(map.project(0.0, 0.0), Err(ConfigError::EmptyCanvas { width: 0, height: 100 }));

    map.configure_canvas(10, 10).configure_bbox(0.0, 1.0, 1.0, 1.0);
    assert!(matches!(map.project(0.0, 0.0), Err(ConfigError::DegenerateBBox { .. })));

    map.configure_bbox(0.0, 0.0, f64::NAN, 1.0);
    assert!(matches!(map.project(0.0, 0.0), Err(ConfigError::DegenerateBBox { .. })));
}
