use super::*;
use pretty_assertions::assert_eq;

fn kinds(src: &str) -> Vec<TokenKind> {
    tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_semicolon_inserted_after_line_ending_tokens() {
    use TokenKind::*;
    assert_eq!(
        kinds("package p\ntype T struct {\n\ta int\n}\n"),
        vec![
            Package, Ident, Semi, Type, Ident, Struct, LBrace, Ident, Ident, Semi, RBrace, Semi,
            Eof
        ]
    );
}

#[test]
fn test_no_semicolon_after_operators_and_open_delimiters() {
    use TokenKind::*;
    assert_eq!(
        kinds("x = a +\n b\nf(\n)"),
        vec![Ident, Assign, Ident, Plus, Ident, Semi, Ident, LParen, RParen, Semi, Eof]
    );
}

#[test]
fn test_comments_are_trivia() {
    use TokenKind::*;
    assert_eq!(kinds("a // trailing\nb"), vec![Ident, Semi, Ident, Semi, Eof]);
    // A block comment spanning lines acts like a newline.
    assert_eq!(kinds("a /* x\n y */ b"), vec![Ident, Semi, Ident, Semi, Eof]);
    assert_eq!(kinds("a /* x */ b"), vec![Ident, Ident, Semi, Eof]);
}

#[test]
fn test_block_comments() {
    use TokenKind::*;
    assert_eq!(kinds("/* hi */\npackage p\n"), vec![Package, Ident, Semi, Eof]);
    assert_eq!(
        kinds("/*\nCopyright 2023\n*/\npackage p\n"),
        vec![Package, Ident, Semi, Eof]
    );
    assert_eq!(kinds("a /** x **/ b"), vec![Ident, Ident, Semi, Eof]);
    assert_eq!(kinds("a /* x */ / b"), vec![Ident, Slash, Ident, Semi, Eof]);
}

#[test]
fn test_unterminated_block_comment() {
    let err = tokenize("a /* never closed").unwrap_err();
    assert_eq!(err.message, "comment not terminated");
    assert_eq!(err.span, 2..17);
}

#[test]
fn test_semicolon_at_end_of_file() {
    use TokenKind::*;
    assert_eq!(kinds("return"), vec![Return, Semi, Eof]);
    assert_eq!(kinds("{"), vec![LBrace, Eof]);
}

#[test]
fn test_literals() {
    let tokens = tokenize(r#"0x1F 1_000 .5 1e9 'x' "a\"b" `raw
string`"#)
    .unwrap();
    let summary: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text)).collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Number, "0x1F"),
            (TokenKind::Number, "1_000"),
            (TokenKind::Number, ".5"),
            (TokenKind::Number, "1e9"),
            (TokenKind::Char, "'x'"),
            (TokenKind::String, r#""a\"b""#),
            (TokenKind::RawString, "`raw\nstring`"),
            (TokenKind::Semi, ""),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_ellipsis_and_tilde() {
    use TokenKind::*;
    assert_eq!(
        kinds("[...]int ~int | string <-chan"),
        vec![LBrack, Ellipsis, RBrack, Ident, Tilde, Ident, Pipe, Ident, Arrow, Chan, Eof]
    );
}

#[test]
fn test_unicode_identifiers() {
    let tokens = tokenize("héllo wörld").unwrap();
    assert_eq!(tokens[0].text, "héllo");
    assert_eq!(tokens[1].text, "wörld");
}

#[test]
fn test_invalid_character_is_an_error() {
    let err = tokenize("a $ b").unwrap_err();
    assert_eq!(err.span, 2..3);
}

#[test]
fn test_parse_int_literal() {
    assert_eq!(parse_int_literal("42"), Some(42));
    assert_eq!(parse_int_literal("1_000"), Some(1000));
    assert_eq!(parse_int_literal("0x1F"), Some(31));
    assert_eq!(parse_int_literal("0b101"), Some(5));
    assert_eq!(parse_int_literal("0o17"), Some(15));
    assert_eq!(parse_int_literal("017"), Some(15));
    assert_eq!(parse_int_literal("0"), Some(0));
    assert_eq!(parse_int_literal("1.5"), None);
    assert_eq!(parse_int_literal("2i"), None);
}

#[test]
fn test_parse_const_int() {
    assert_eq!(parse_const_int("0x1F"), Some(31));
    assert_eq!(parse_const_int("1e3"), Some(1000));
    assert_eq!(parse_const_int("1E3"), Some(1000));
    assert_eq!(parse_const_int("2.50e1"), Some(25));
    assert_eq!(parse_const_int("1_0.0"), Some(10));
    assert_eq!(parse_const_int("0.0"), Some(0));
    assert_eq!(parse_const_int("4e+0"), Some(4));
    assert_eq!(parse_const_int("100e-2"), Some(1));
    assert_eq!(parse_const_int("1.5"), None);
    assert_eq!(parse_const_int(".5"), None);
    assert_eq!(parse_const_int("1e-1"), None);
    assert_eq!(parse_const_int("1e30"), None);
    assert_eq!(parse_const_int("1e3i"), None);
    assert_eq!(parse_const_int("09"), None);
}

#[test]
fn test_unquote() {
    assert_eq!(unquote(r#""json:\"a\"""#).as_deref(), Some(r#"json:"a""#));
    assert_eq!(unquote("`json:\"a\"`").as_deref(), Some(r#"json:"a""#));
    assert_eq!(unquote(r#""\x41é\101\t""#).as_deref(), Some("Aé\u{41}\t"));
    assert_eq!(unquote(r#""\xc3\xa9""#).as_deref(), Some("é"));
    assert_eq!(unquote(r#""\q""#), None);
}
