use super::*;
use crate::foundation::error::BlocksError;
use crate::layout::measure::FixedAdvance;
use crate::layout::walker::LayoutEngine;

fn address_of(expression: &str, block_text: &str) -> StructuralAddress {
    let mut engine = LayoutEngine::new(Default::default(), Box::new(FixedAdvance::default()));
    let tree = engine.layout(expression).unwrap();
    tree.iter()
        .find(|b| b.expression == block_text)
        .map(|b| b.address.clone())
        .unwrap()
}

#[test]
fn simple_replace() {
    let addr = address_of("a+b", "a");
    assert_eq!(transform("a+b", &addr, "NaN").unwrap(), "(NaN+b)");
}

#[test]
fn nested_replace() {
    let addr = address_of("a+(b+c)", "c");
    assert_eq!(transform("a+(b+c)", &addr, "d").unwrap(), "(a+(b+d))");
}

#[test]
fn replace_root() {
    let addr = address_of("a*b", "(a*b)");
    assert_eq!(transform("a*b", &addr, "x - 1").unwrap(), "(x-1)");
}

#[test]
fn identical_siblings_are_told_apart_by_slot() {
    let src = "(a+b)*(a+b)";
    let mut engine = LayoutEngine::new(Default::default(), Box::new(FixedAdvance::default()));
    let tree = engine.layout(src).unwrap();
    let a_blocks: Vec<_> = tree
        .leaves()
        .iter()
        .map(|&id| tree.get(id).unwrap())
        .filter(|b| b.expression == "a")
        .collect();
    assert_eq!(a_blocks.len(), 2);

    assert_eq!(
        transform(src, &a_blocks[0].address, "x").unwrap(),
        "((x+b)*(a+b))"
    );
    assert_eq!(
        transform(src, &a_blocks[1].address, "x").unwrap(),
        "((a+b)*(x+b))"
    );
}

#[test]
fn replacing_inside_functions_and_keywords() {
    let src = "equalText(s, \"t\") and not flag";
    let addr = address_of(src, "\"t\"");
    assert_eq!(
        transform(src, &addr, "\"u\"").unwrap(),
        "(equalText(s, \"u\") and (not flag))"
    );
    let addr = address_of(src, "flag");
    assert_eq!(
        transform(src, &addr, "true").unwrap(),
        "(equalText(s, \"t\") and (not true))"
    );
}

#[test]
fn replacing_a_branch_with_its_placeholder() {
    let src = "(a*b)+c";
    let addr = address_of(src, "(a*b)");
    assert_eq!(transform(src, &addr, "NaN").unwrap(), "(NaN+c)");
}

#[test]
fn every_block_replaced_with_itself_is_identity() {
    let corpus = [
        "a + b",
        "a + (b + c)",
        "(a+b)*(a+b)",
        "-(x - 1) / 2",
        "a > 1 and (b < 2 or not c)",
        "equalText(\"x\", s) xor true",
        "NaN + NaN",
        "((a))",
    ];
    let mut engine = LayoutEngine::new(Default::default(), Box::new(FixedAdvance::default()));
    for src in corpus {
        let tree = engine.layout(src).unwrap();
        let canonical = tree.expression().to_owned();
        for b in tree.iter() {
            let out = transform(src, &b.address, &b.expression).unwrap();
            assert_eq!(out, canonical, "{src} @ {}", b.address);
        }
    }
}

#[test]
fn stale_address_is_a_silent_no_op() {
    let addr = address_of("a+b", "a");
    assert_eq!(transform("a-b", &addr, "z").unwrap(), "(a-b)");
    assert_eq!(
        transform("(a + b)", &StructuralAddress::default(), "z").unwrap(),
        "(a+b)"
    );
}

#[test]
fn malformed_replacement_is_a_parse_error() {
    let addr = address_of("a+b", "a");
    let err = transform("a+b", &addr, "1 +").unwrap_err();
    assert!(matches!(err, BlocksError::Parse(_)));
}

#[test]
fn malformed_expression_is_a_parse_error() {
    let err = transform("a+*", &StructuralAddress::default(), "1").unwrap_err();
    assert!(matches!(err, BlocksError::Parse(_)));
}
