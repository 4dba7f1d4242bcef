//! Go tokenizer.
//!
//! Raw tokens come from a `logos` lexer. [`tokenize`] then drops trivia and
//! applies Go's automatic semicolon insertion, so the parser only ever sees
//! explicit statement terminators.

use logos::Logos;
use std::ops::Range;

use super::error::ParseError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f\r]+")]
pub enum TokenKind {
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    // Keywords
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("chan")]
    Chan,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("else")]
    Else,
    #[token("fallthrough")]
    Fallthrough,
    #[token("for")]
    For,
    #[token("func")]
    Func,
    #[token("go")]
    Go,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("package")]
    Package,
    #[token("range")]
    Range,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("type")]
    Type,
    #[token("var")]
    Var,

    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?i?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?i?")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?([pP][+-]?[0-9_]+)?i?")]
    #[regex(r"0[bB][01_]+i?")]
    #[regex(r"0[oO][0-7_]+i?")]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,

    #[regex(r"`[^`]*`")]
    RawString,

    #[regex(r"'([^'\\\n]|\\[^\n])+'")]
    Char,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AndNot,
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    AssignOp,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<-")]
    Arrow,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("==")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Assign,
    #[token("!")]
    Not,
    #[token("~")]
    Tilde,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token(":=")]
    Define,

    /// End of input. Never produced by logos; appended by [`tokenize`].
    Eof,
}

impl TokenKind {
    /// Whether a newline directly after this token terminates the statement.
    fn ends_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::RawString
                | TokenKind::Char
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Fallthrough
                | TokenKind::Return
                | TokenKind::Inc
                | TokenKind::Dec
                | TokenKind::RParen
                | TokenKind::RBrack
                | TokenKind::RBrace
        )
    }

    /// Human-readable form for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Newline => "newline",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::String | TokenKind::RawString => "string literal",
            TokenKind::Char => "rune literal",
            TokenKind::Break => "`break`",
            TokenKind::Case => "`case`",
            TokenKind::Chan => "`chan`",
            TokenKind::Const => "`const`",
            TokenKind::Continue => "`continue`",
            TokenKind::Default => "`default`",
            TokenKind::Defer => "`defer`",
            TokenKind::Else => "`else`",
            TokenKind::Fallthrough => "`fallthrough`",
            TokenKind::For => "`for`",
            TokenKind::Func => "`func`",
            TokenKind::Go => "`go`",
            TokenKind::Goto => "`goto`",
            TokenKind::If => "`if`",
            TokenKind::Import => "`import`",
            TokenKind::Interface => "`interface`",
            TokenKind::Map => "`map`",
            TokenKind::Package => "`package`",
            TokenKind::Range => "`range`",
            TokenKind::Return => "`return`",
            TokenKind::Select => "`select`",
            TokenKind::Struct => "`struct`",
            TokenKind::Switch => "`switch`",
            TokenKind::Type => "`type`",
            TokenKind::Var => "`var`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrack => "`[`",
            TokenKind::RBrack => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semi => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Colon => "`:`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Shl => "`<<`",
            TokenKind::Shr => "`>>`",
            TokenKind::AndNot => "`&^`",
            TokenKind::AssignOp => "assignment operator",
            TokenKind::AndAnd => "`&&`",
            TokenKind::OrOr => "`||`",
            TokenKind::Arrow => "`<-`",
            TokenKind::Inc => "`++`",
            TokenKind::Dec => "`--`",
            TokenKind::Eq => "`==`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Assign => "`=`",
            TokenKind::Not => "`!`",
            TokenKind::Tilde => "`~`",
            TokenKind::NotEq => "`!=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Define => "`:=`",
            TokenKind::Eof => "end of file",
        }
    }
}

/// Consumes a block comment body up to and including `*/`. An unterminated
/// comment swallows the rest of the input and fails.
fn lex_block_comment(lex: &mut logos::Lexer<'_, TokenKind>) -> bool {
    let rem = lex.remainder();
    match rem.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(rem.len());
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Source text. Empty for inserted semicolons and end of file.
    pub text: &'src str,
    pub span: Range<usize>,
}

/// Tokenizes a whole source file.
///
/// The result always ends with exactly one [`TokenKind::Eof`] token.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut lexer = TokenKind::lexer(src);

    let insert_semi = |tokens: &mut Vec<Token<'_>>, at: usize| {
        if tokens.last().is_some_and(|last| last.kind.ends_statement()) {
            tokens.push(Token {
                kind: TokenKind::Semi,
                text: "",
                span: at..at,
            });
        }
    };

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(kind) => kind,
            Err(()) if lexer.slice().starts_with("/*") => {
                return Err(ParseError::new("comment not terminated", span));
            }
            Err(()) => {
                return Err(ParseError::new(
                    format!("unexpected character {:?}", lexer.slice()),
                    span,
                ));
            }
        };

        match kind {
            TokenKind::Newline => insert_semi(&mut tokens, span.start),
            TokenKind::LineComment => {}
            TokenKind::BlockComment => {
                if lexer.slice().contains('\n') {
                    insert_semi(&mut tokens, span.start);
                }
            }
            kind => tokens.push(Token {
                kind,
                text: lexer.slice(),
                span,
            }),
        }
    }

    insert_semi(&mut tokens, src.len());
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        span: src.len()..src.len(),
    });
    Ok(tokens)
}

/// Value of a numeric literal that denotes a non-negative integer constant:
/// integer literals, and decimal floating-point literals with an integral
/// value such as `1e3` or `2.50e1`.
pub fn parse_const_int(text: &str) -> Option<u64> {
    parse_int_literal(text).or_else(|| parse_integral_float(text))
}

fn parse_integral_float(text: &str) -> Option<u64> {
    let text: String = text.chars().filter(|&c| c != '_').collect();
    let is_float = text.contains(['.', 'e', 'E']);
    if !is_float || text.ends_with('i') || text.starts_with("0x") || text.starts_with("0X") {
        return None;
    }
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => (&text[..at], text[at + 1..].parse::<i32>().ok()?),
        None => (text.as_str(), 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits = format!("{int_part}{frac_part}");
    let mut exponent = exponent.checked_sub(i32::try_from(frac_part.len()).ok()?)?;
    while exponent < 0 && digits.ends_with('0') {
        digits.pop();
        exponent += 1;
    }
    if exponent < 0 {
        return None;
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    let value: u64 = digits.parse().ok()?;
    value.checked_mul(10u64.checked_pow(u32::try_from(exponent).ok()?)?)
}

/// Parses the value of an integer literal. Returns `None` for floating-point
/// and imaginary literals, and for values that do not fit in `u64`.
pub fn parse_int_literal(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    let (radix, body) = if let Some(rest) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, rest)
    } else if let Some(rest) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        (2, rest)
    } else if let Some(rest) = digits
        .strip_prefix("0o")
        .or_else(|| digits.strip_prefix("0O"))
    {
        (8, rest)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits.as_str())
    };
    u64::from_str_radix(body, radix).ok()
}

/// Decodes an interpreted (`"..."`) or raw (`` `...` ``) string literal.
pub fn unquote(text: &str) -> Option<String> {
    if let Some(raw) = text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        // Carriage returns are discarded from raw literals.
        return Some(raw.chars().filter(|&c| c != '\r').collect());
    }

    let body = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut bytes: Vec<u8> = Vec::new();
    let mut chars = body.chars();

    // Escapes such as `\xff` produce raw bytes; collect them until the next
    // character and validate the run as UTF-8.
    let flush = |bytes: &mut Vec<u8>, out: &mut String| -> Option<()> {
        if !bytes.is_empty() {
            out.push_str(std::str::from_utf8(bytes).ok()?);
            bytes.clear();
        }
        Some(())
    };

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush(&mut bytes, &mut out)?;
            out.push(c);
            continue;
        }
        let escaped = chars.next()?;
        let simple = match escaped {
            'a' => Some('\u{7}'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\u{b}'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            _ => None,
        };
        if let Some(simple) = simple {
            flush(&mut bytes, &mut out)?;
            out.push(simple);
            continue;
        }
        match escaped {
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                bytes.push(u8::from_str_radix(&hex, 16).ok()?);
            }
            '0'..='7' => {
                let mut oct = String::from(escaped);
                oct.extend(chars.by_ref().take(2));
                bytes.push(u8::from_str_radix(&oct, 8).ok()?);
            }
            'u' | 'U' => {
                let width = if escaped == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(width).collect();
                let value = u32::from_str_radix(&hex, 16).ok()?;
                flush(&mut bytes, &mut out)?;
                out.push(char::from_u32(value)?);
            }
            _ => return None,
        }
    }
    flush(&mut bytes, &mut out)?;
    Some(out)
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod lexer_test;
