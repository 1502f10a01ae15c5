use super::*;
use crate::layout::block::{Arrangement, BlockTree};
use crate::layout::measure::FixedAdvance;

fn engine() -> LayoutEngine {
    LayoutEngine::new(GeometryConfig::default(), Box::new(FixedAdvance::default()))
}

fn leaf_texts(t: &BlockTree) -> Vec<String> {
    t.leaves()
        .iter()
        .map(|&id| t.get(id).unwrap().expression.clone())
        .collect()
}

#[test]
fn leaves_are_collected_left_to_right() {
    let t = engine().layout("a + b * c - d").unwrap();
    assert_eq!(leaf_texts(&t), ["a", "b", "c", "d"]);
    assert_eq!(t.branches().len(), 3);
    assert_eq!(t.expression(), "((a+(b*c))-d)");
}

#[test]
fn block_ids_index_the_arena() {
    let t = engine().layout("(a > 1 and b) or not equalText(c, \"x\")").unwrap();
    for (i, b) in t.iter().enumerate() {
        assert_eq!(b.id.index(), i);
        assert_eq!(t.get(b.id).map(|g| g.id), Some(b.id));
    }
}

#[test]
fn parentheses_never_produce_blocks() {
    let plain = engine().layout("a + b").unwrap();
    let wrapped = engine().layout("((a) + ((b)))").unwrap();
    assert_eq!(plain.len(), 3);
    assert_eq!(plain, wrapped);
}

#[test]
fn addresses_record_text_slot_and_parent() {
    let t = engine().layout("a + (b + c)").unwrap();
    let c = t.get(t.leaves()[2]).unwrap();
    let steps = c.address.steps();
    assert_eq!(
        steps,
        [
            AddressStep::root("(a+(b+c))"),
            AddressStep::child("(b+c)", Slot(1), "(a+(b+c))"),
            AddressStep::child("c", Slot(1), "(b+c)"),
        ]
    );
    assert_eq!(t.root().address.len(), 1);
}

#[test]
fn leaf_types_follow_slot_and_literal() {
    let t = engine().layout("equalText(s, \"x\") and (n > 1)").unwrap();
    let types: Vec<_> = t
        .leaves()
        .iter()
        .map(|&id| {
            let b = t.get(id).unwrap();
            (b.expression.clone(), b.result_type)
        })
        .collect();
    assert_eq!(
        types,
        [
            ("s".to_owned(), ResultType::String),
            ("\"x\"".to_owned(), ResultType::String),
            ("n".to_owned(), ResultType::Number),
            ("1".to_owned(), ResultType::Number),
        ]
    );
    assert_eq!(t.root().result_type, ResultType::Boolean);
}

#[test]
fn lone_symbol_is_a_number_root_leaf() {
    let t = engine().layout("x").unwrap();
    assert_eq!(t.len(), 1);
    let root = t.root();
    assert!(root.flags.is_root && root.flags.is_leaf);
    assert_eq!(root.result_type, ResultType::Number);
}

#[test]
fn labels_hide_nan_and_quotes() {
    let t = engine().layout("equalText(\"hi\", \"\") or NaN > 2").unwrap();
    let labels: Vec<_> = t
        .leaves()
        .iter()
        .map(|&id| t.get(id).unwrap().leaf_shape().unwrap().label.clone())
        .collect();
    assert_eq!(labels, ["hi", "", "", "2"]);
}

#[test]
fn shapes_follow_operator_family() {
    let t = engine().layout("-(a * b) == c").unwrap();
    let arrangement = |text: &str| {
        t.iter()
            .find(|b| b.expression == text)
            .and_then(|b| b.branch_shape())
            .map(|s| s.arrangement)
    };
    assert_eq!(arrangement("(a*b)"), Some(Arrangement::Infix));
    assert_eq!(arrangement("(-(a*b))"), Some(Arrangement::Stacked));
    assert_eq!(arrangement("((-(a*b))==c)"), Some(Arrangement::Infix));

    let neg = t.iter().find(|b| b.expression == "(-(a*b))").unwrap();
    assert_eq!(neg.result_type, ResultType::Number);
    assert_eq!(neg.branch_shape().unwrap().label, "-");
}

#[test]
fn unsupported_constructs_fail_the_whole_pass() {
    let mut e = engine();
    assert!(matches!(
        e.layout("a ^ b").unwrap_err(),
        BlocksError::UnknownOperatorKind(_)
    ));
    assert!(matches!(
        e.layout("1 + sin(x)").unwrap_err(),
        BlocksError::UnknownFunctionKind(name) if name == "sin"
    ));
    assert!(matches!(
        e.layout("null").unwrap_err(),
        BlocksError::UnknownValueKind(_)
    ));
    assert!(matches!(e.layout("a +").unwrap_err(), BlocksError::Parse(_)));
}

#[test]
fn layout_is_deterministic() {
    let src = "(a + 1) * (b / 2) >= c xor not d";
    assert_eq!(engine().layout(src).unwrap(), engine().layout(src).unwrap());
}

#[test]
fn default_templates_all_lay_out() {
    let mut e = engine();
    for t in crate::foundation::config::default_templates() {
        let tree = e.layout(&t.expression).unwrap();
        assert!(!tree.root().is_leaf(), "{}", t.expression);
    }
}
