use super::*;

#[test]
fn canvas_round_trip_with_scroll() {
    let mut v = Viewport::new(200.0);
    v.canvas_scroll = Vec2::new(15.0, 30.0);
    let c = Point::new(20.0, 40.0);
    let g = v.canvas_to_global(c);
    assert_eq!(g, Point::new(205.0, 10.0));
    assert_eq!(v.global_to_canvas(g), c);
    assert_eq!(c + v.canvas_offset(), g);
}

#[test]
fn palette_scroll_moves_templates_up() {
    let mut v = Viewport::new(200.0);
    v.palette_scroll = Vec2::new(0.0, 100.0);
    assert_eq!(v.palette_to_global(Point::new(34.0, 492.0)), Point::new(34.0, 392.0));
    assert_eq!(v.global_to_palette(Point::new(34.0, 392.0)), Point::new(34.0, 492.0));
}

#[test]
fn palette_region_is_left_of_its_width() {
    let v = Viewport::new(200.0);
    assert!(v.is_over_palette(Point::new(199.9, 0.0)));
    assert!(!v.is_over_palette(Point::new(200.0, 0.0)));
}
