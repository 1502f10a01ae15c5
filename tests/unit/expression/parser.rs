use super::*;

fn canon(src: &str) -> String {
    parse(src).unwrap().to_canonical()
}

fn ungrouped(node: Node) -> Node {
    match node {
        Node::Parenthesis(inner) => ungrouped(*inner),
        Node::Operator { op, operands } => Node::Operator {
            op,
            operands: operands.into_iter().map(ungrouped).collect(),
        },
        Node::Function { name, operands } => Node::Function {
            name,
            operands: operands.into_iter().map(ungrouped).collect(),
        },
        atom => atom,
    }
}

#[test]
fn canonical_form_is_fully_parenthesized() {
    assert_eq!(canon("a+b"), "(a+b)");
    assert_eq!(canon("a + (b + c)"), "(a+(b+c))");
    assert_eq!(canon("a * b + c"), "((a*b)+c)");
    assert_eq!(canon("NaN * NaN"), "(NaN*NaN)");
    assert_eq!(canon("a >= b"), "(a>=b)");
    assert_eq!(canon("true and true"), "(true and true)");
    assert_eq!(canon("not a"), "(not a)");
    assert_eq!(canon("-a"), "(-a)");
    assert_eq!(canon(r#"equalText(a, "leak")"#), r#"equalText(a, "leak")"#);
    assert_eq!(canon("((a))"), "a");
}

#[test]
fn canonical_form_is_idempotent() {
    for src in [
        "a+(b+c)",
        "(NaN + NaN != NaN + NaN or NaN + NaN + NaN > NaN - NaN) and (NaN - NaN) / (NaN + NaN) != (NaN - NaN) / (NaN + NaN) + NaN * NaN and true",
        r#"dof == false and (equalText(L3, "leak") or equalText(A, "leak") and equalText(B, "leak"))"#,
        "not (a xor b) or c",
        "2^-3^2",
        "1.5e3 - .25",
        r#"equalText("a\"b", "")"#,
    ] {
        let once = canon(src);
        let twice = canon(&once);
        assert_eq!(once, twice, "source: {src}");
        assert_eq!(
            ungrouped(parse(&once).unwrap()),
            ungrouped(parse(src).unwrap()),
            "source: {src}"
        );
    }
}

#[test]
fn precedence_follows_the_grammar() {
    assert_eq!(canon("a or b xor c and d"), "(a or (b xor (c and d)))");
    assert_eq!(canon("a + 1 > b * 2"), "((a+1)>(b*2))");
    assert_eq!(canon("not a == b"), "((not a)==b)");
    assert_eq!(canon("a - b - c"), "((a-b)-c)");
    assert_eq!(canon("-2^2"), "(-(2^2))");
}

#[test]
fn keywords_become_constants() {
    assert_eq!(parse("true").unwrap(), Node::Constant(Value::Bool(true)));
    assert_eq!(parse("null").unwrap(), Node::Constant(Value::Null));
    match parse("NaN").unwrap() {
        Node::Constant(Value::Number(v)) => assert!(v.is_nan()),
        other => panic!("unexpected ast: {other:?}"),
    }
    assert_eq!(canon("Infinity"), "Infinity");
    assert_eq!(parse("x1").unwrap(), Node::Symbol("x1".to_owned()));
}

#[test]
fn explicit_parentheses_are_kept_as_nodes() {
    match parse("a+(b)").unwrap() {
        Node::Operator { op: Op::Add, operands } => {
            assert!(matches!(operands[1], Node::Parenthesis(_)));
            assert_eq!(operands[1].strip_parens(), &Node::Symbol("b".to_owned()));
        }
        other => panic!("unexpected ast: {other:?}"),
    }
}

#[test]
fn calls_collect_arguments() {
    match parse("f()").unwrap() {
        Node::Function { name, operands } => {
            assert_eq!(name, "f");
            assert!(operands.is_empty());
        }
        other => panic!("unexpected ast: {other:?}"),
    }
    assert_eq!(parse("g(a, b+c, d)").unwrap().operands().len(), 3);
}

#[test]
fn malformed_text_is_a_parse_error() {
    assert!(parse("").is_err());
    assert!(parse("   ").is_err());
    assert!(parse("a +").is_err());
    assert!(parse("(a").is_err());
    assert!(parse("a b").is_err());
    assert!(parse("f(a,)").is_err());
    let err = parse("a + )").unwrap_err();
    assert_eq!(err.offset, 4);
}
