use super::*;
use crate::foundation::config::BlocksConfig;
use crate::interaction::session::DragSource;
use crate::layout::block::Tint;
use crate::layout::measure::FixedAdvance;
use crate::layout::walker::LayoutEngine;

fn tree(src: &str) -> BlockTree {
    LayoutEngine::new(Default::default(), Box::new(FixedAdvance::default()))
        .layout(src)
        .unwrap()
}

fn count(list: &DisplayList, pred: impl Fn(&Primitive) -> bool) -> usize {
    list.items.iter().filter(|p| pred(p)).count()
}

#[test]
fn binary_tree_draws_parents_first() {
    let t = tree("a + b");
    let list = tree_scene(&t, &GeometryConfig::default(), 10.0);
    assert_eq!(list.size, Size::new(118.0, 56.0));
    assert_eq!(list.items.len(), 10);
    assert!(matches!(
        &list.items[0],
        Primitive::RoundRect { rect, fill, .. } if *rect == Rect::new(10.0, 10.0, 108.0, 46.0) && *fill == BACKGROUND_FILL
    ));
    assert!(matches!(list.items.last(), Some(Primitive::Circle { .. })));
    let labels: Vec<_> = list
        .items
        .iter()
        .filter_map(|p| match p {
            Primitive::Label { text, size_px, .. } => Some((text.as_str(), *size_px)),
            _ => None,
        })
        .collect();
    assert_eq!(labels, [("a", 14.0), ("b", 14.0), ("+", 16.0)]);
}

#[test]
fn collision_ring_shows_only_when_visible() {
    let mut t = tree("a + b");
    let rings = |t: &BlockTree| {
        count(&tree_scene(t, &GeometryConfig::default(), 0.0), |p| {
            matches!(p, Primitive::RoundRect { .. })
        })
    };
    let before = rings(&t);

    let leaf = t.leaves()[0];
    t.get_mut(leaf).unwrap().set_collision_tint(Tint::Match, 1.0);
    let list = tree_scene(&t, &GeometryConfig::default(), 0.0);
    assert_eq!(rings(&t), before + 1);
    assert!(list.items.iter().any(|p| matches!(
        p,
        Primitive::RoundRect { fill, .. } if *fill == Tint::Match.rgb()
    )));
}

#[test]
fn drag_tints_reach_the_display_list() {
    let mut t = tree("not true");
    let root = t.root_id();
    let b = t.get_mut(root).unwrap();
    b.set_background_tint(Tint::Dragging);
    b.set_handle_tint(Tint::Mismatch);
    let list = tree_scene(&t, &GeometryConfig::default(), 0.0);
    assert!(list.items.iter().any(|p| matches!(
        p,
        Primitive::RoundRect { fill, .. } if *fill == Rgb(0xdddddd)
    )));
    assert!(list.items.iter().any(|p| matches!(
        p,
        Primitive::Circle { fill, .. } if *fill == Rgb(0xf56c6c)
    )));
}

#[test]
fn session_scene_draws_lifted_root_once() {
    let mut s = Session::new(BlocksConfig::default()).unwrap();
    let id = s
        .add_expression("x + y", Point::new(20.0, 40.0))
        .unwrap();
    let size = Size::new(800.0, 900.0);
    let x_labels = |s: &Session| {
        count(&session_scene(s, size), |p| {
            matches!(p, Primitive::Label { text, .. } if text == "x")
        })
    };
    assert_eq!(x_labels(&s), 1);

    let root = s.canvas().get(id).unwrap().root_id();
    let at = s
        .grab_point(DragSource::Canvas { placed: id, block: root })
        .unwrap();
    s.pointer_down(at).unwrap();
    assert_eq!(x_labels(&s), 1);

    let list = session_scene(&s, size);
    assert_eq!(
        count(&list, |p| matches!(p, Primitive::Line { color, .. } if *color == DIVIDER_COLOR)),
        1
    );
    // 15 templates, each with one handle, plus the dragged root
    assert_eq!(count(&list, |p| matches!(p, Primitive::Circle { .. })), 16);
}
