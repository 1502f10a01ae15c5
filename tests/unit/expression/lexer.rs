use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn lexes_keywords_and_two_char_operators() {
    assert_eq!(
        kinds("a >= 1 and not b != c"),
        vec![
            TokenKind::Ident("a".to_owned()),
            TokenKind::Ge,
            TokenKind::Number(1.0),
            TokenKind::And,
            TokenKind::Not,
            TokenKind::Ident("b".to_owned()),
            TokenKind::Ne,
            TokenKind::Ident("c".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lexes_numbers_with_fraction_and_exponent() {
    assert_eq!(kinds(".5")[0], TokenKind::Number(0.5));
    assert_eq!(kinds("2.25")[0], TokenKind::Number(2.25));
    assert_eq!(kinds("1e3")[0], TokenKind::Number(1000.0));
    assert!(lex("1e").is_err());
}

#[test]
fn lexes_strings_with_escapes() {
    assert_eq!(kinds(r#""a\"b""#)[0], TokenKind::Str("a\"b".to_owned()));
    assert_eq!(kinds("'leak'")[0], TokenKind::Str("leak".to_owned()));
    assert_eq!(kinds(r#""""#)[0], TokenKind::Str(String::new()));
    let err = lex("\"open").unwrap_err();
    assert_eq!(err.offset, 0);
    assert!(lex(r#""\q""#).is_err());
}

#[test]
fn spans_cover_source_bytes() {
    let toks = lex("ab <= 12").unwrap();
    assert_eq!(toks[0].span, Span { start: 0, end: 2 });
    assert_eq!(toks[1].span, Span { start: 3, end: 5 });
    assert_eq!(toks[2].span, Span { start: 6, end: 8 });
    assert_eq!(toks[3].span, Span { start: 8, end: 8 });
}

#[test]
fn rejects_unknown_characters() {
    let err = lex("a & b").unwrap_err();
    assert_eq!(err.offset, 2);
    assert!(err.message.contains('&'));
}
