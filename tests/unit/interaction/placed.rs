use super::*;

fn p(expr: &str) -> PlacedExpression {
    PlacedExpression::new(expr, Point::new(0.0, 0.0))
}

#[test]
fn ids_are_stable_and_never_reused() {
    let mut all = PlacedExpressions::new();
    let a = all.add(p("a"));
    let b = all.add(p("b"));
    assert_ne!(a, b);

    assert_eq!(all.remove(a).unwrap().expression, "a");
    assert!(all.remove(a).is_none());
    let c = all.add(p("c"));
    assert!(c != a && c != b);
    assert_eq!(all.ids(), vec![b, c]);
}

#[test]
fn set_keeps_position_in_z_order() {
    let mut all: PlacedExpressions = [p("a"), p("b"), p("c")].into_iter().collect();
    let ids = all.ids();
    let old = all.set(ids[1], p("x")).unwrap();
    assert_eq!(old.expression, "b");
    let texts: Vec<_> = all.iter().map(|(_, e)| e.expression.as_str()).collect();
    assert_eq!(texts, ["a", "x", "c"]);
    assert!(all.set(PlacedId(99), p("y")).is_none());
}

#[test]
fn clear_keeps_counting() {
    let mut all = PlacedExpressions::new();
    let a = all.add(p("a"));
    all.clear();
    assert!(all.is_empty());
    assert!(!all.contains(a));
    assert!(all.add(p("b")) > a);
}

#[test]
fn placed_expression_json() {
    let e = PlacedExpression::new("(a+b)", Point::new(20.0, 40.0));
    let json = serde_json::to_string(&e).unwrap();
    assert_eq!(json, r#"{"expression":"(a+b)","origin":{"x":20.0,"y":40.0}}"#);
    let back: PlacedExpression = serde_json::from_str(&json).unwrap();
    assert_eq!(back, e);
}
