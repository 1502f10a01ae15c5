use super::*;
use crate::foundation::core::{Point, Rect, Rgb, Size};

#[test]
fn document_has_one_element_per_primitive() {
    let mut list = DisplayList::new(Size::new(100.0, 50.0));
    list.push(Primitive::RoundRect {
        rect: Rect::new(0.0, 0.0, 10.0, 20.0),
        radius: 10.0,
        fill: Rgb(0xdddddd),
        opacity: 1.0,
    });
    list.push(Primitive::Circle {
        center: Point::new(5.0, 5.0),
        radius: 2.0,
        fill: Rgb::WHITE,
    });
    list.push(Primitive::Line {
        from: Point::new(1.0, 0.0),
        to: Point::new(1.0, 50.0),
        width: 1.0,
        color: Rgb(0xcecdce),
    });
    let svg = to_svg(&list);
    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r##"<rect x="0" y="0" width="10" height="20" rx="10" fill="#dddddd"/>"##));
    assert!(svg.contains(r##"<circle cx="5" cy="5" r="2" fill="#ffffff"/>"##));
    assert!(svg.contains(r##"stroke="#cecdce""##));
}

#[test]
fn labels_are_escaped_and_empty_ones_skipped() {
    let mut list = DisplayList::new(Size::new(10.0, 10.0));
    for text in ["a<b & \"c\"", ""] {
        list.push(Primitive::Label {
            text: text.to_owned(),
            center: Point::new(5.0, 5.0),
            size_px: 14.0,
            color: Rgb::BLACK,
        });
    }
    let svg = to_svg(&list);
    assert_eq!(svg.matches("<text").count(), 1);
    assert!(svg.contains("a&lt;b &amp; &quot;c&quot;</text>"));
}

#[test]
fn translucent_rects_carry_opacity() {
    let mut list = DisplayList::new(Size::new(10.0, 10.0));
    list.push(Primitive::RoundRect {
        rect: Rect::new(0.0, 0.0, 4.0, 4.0),
        radius: 0.0,
        fill: Rgb(0x67c23a),
        opacity: 0.5,
    });
    assert!(to_svg(&list).contains(r#"fill-opacity="0.5""#));
}
