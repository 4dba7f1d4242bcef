//! Recursive-descent parser for Go declarations.
//!
//! Parses a whole file but keeps only what type translation needs. Function
//! and variable declarations are skipped by balanced-delimiter scanning, so
//! function bodies never have to be understood.

use gunion_types::ChanDir;

use super::error::ParseError;
use super::lexer::{Token, TokenKind, parse_const_int, tokenize, unquote};
use super::syntax::*;

/// Parses a Go source file.
pub fn parse_file(src: &str) -> Result<SourceFile, ParseError> {
    let tokens = tokenize(src)?;
    Parser::new(src, tokens).parse_file()
}

struct Parser<'src> {
    src: &'src str,
    tokens: Vec<Token<'src>>,
    pos: usize,
}

/// One entry of a parameter list before names and types are sorted out.
enum ParamEntry {
    /// A lone identifier: a parameter name or a type name.
    Bare(Ident),
    Named(Ident, TypeExpr, bool),
    Type(TypeExpr, bool),
}

impl<'src> Parser<'src> {
    fn new(src: &'src str, tokens: Vec<Token<'src>>) -> Self {
        Self {
            src,
            tokens,
            pos: 0,
        }
    }

    // ---- token helpers ----

    fn peek(&self) -> TokenKind {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn current(&self) -> &Token<'src> {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn bump(&mut self) -> Token<'src> {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        if self.peek() == kind {
            Ok(self.bump())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            TokenKind::Semi if token.text.is_empty() => "newline",
            kind => kind.describe(),
        };
        ParseError::new(
            format!("expected {expected}, found {found}"),
            token.span.clone(),
        )
    }

    fn ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.expect(TokenKind::Ident)?;
        Ok(Ident {
            name: token.text.to_string(),
            span: token.span,
        })
    }

    /// Ends a declaration: `;`, or nothing before a closing delimiter.
    fn end_decl(&mut self, closing: TokenKind) -> Result<(), ParseError> {
        if self.eat(TokenKind::Semi) || self.peek() == closing {
            Ok(())
        } else {
            Err(self.unexpected("`;` or newline"))
        }
    }

    fn span_from(&self, start: usize) -> Span {
        let end = self.tokens[..self.pos]
            .last()
            .map_or(start, |t| t.span.end)
            .max(start);
        start..end
    }

    /// Index of the token matching the opening delimiter at `open`.
    fn matching(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
        }
        None
    }

    fn starts_type(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Ident
                | TokenKind::Star
                | TokenKind::LBrack
                | TokenKind::LParen
                | TokenKind::Func
                | TokenKind::Map
                | TokenKind::Chan
                | TokenKind::Struct
                | TokenKind::Interface
                | TokenKind::Arrow
        )
    }

    /// At `ident [`, decides whether the bracket opens an array or slice type
    /// belonging to a name (`a [4]int`) rather than type arguments of a
    /// generic type (`Generic[int]`).
    fn ident_then_array(&self) -> bool {
        if self.peek_at(2) == TokenKind::RBrack {
            return true;
        }
        match self.matching(self.pos + 1) {
            Some(close) => {
                let after = self.tokens.get(close + 1).map_or(TokenKind::Eof, |t| t.kind);
                Self::starts_type(after)
            }
            None => false,
        }
    }

    // ---- declarations ----

    fn parse_file(mut self) -> Result<SourceFile, ParseError> {
        while self.eat(TokenKind::Semi) {}
        self.expect(TokenKind::Package)?;
        let package = self.ident()?;
        self.end_decl(TokenKind::Eof)?;

        let mut file = SourceFile {
            package,
            imports: Vec::new(),
            types: Vec::new(),
            consts: Vec::new(),
        };

        loop {
            match self.peek() {
                TokenKind::Semi => {
                    self.bump();
                }
                TokenKind::Import => {
                    self.bump();
                    self.group(|p| {
                        let spec = p.import_spec()?;
                        file.imports.push(spec);
                        Ok(())
                    })?;
                }
                _ => break,
            }
        }

        loop {
            match self.peek() {
                TokenKind::Eof => break,
                TokenKind::Semi => {
                    self.bump();
                }
                TokenKind::Type => {
                    self.bump();
                    self.group(|p| {
                        let spec = p.type_spec()?;
                        file.types.push(spec);
                        Ok(())
                    })?;
                }
                TokenKind::Const => {
                    self.bump();
                    let specs = self.const_decl()?;
                    file.consts.extend(specs);
                }
                TokenKind::Var | TokenKind::Func => self.skip_decl()?,
                TokenKind::Import => {
                    return Err(self.unexpected("declaration (imports must come first)"));
                }
                _ => return Err(self.unexpected("declaration")),
            }
        }
        Ok(file)
    }

    /// Parses `spec` or `( spec; spec; ... )`.
    fn group(
        &mut self,
        mut spec: impl FnMut(&mut Self) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        if self.eat(TokenKind::LParen) {
            loop {
                while self.eat(TokenKind::Semi) {}
                if self.eat(TokenKind::RParen) {
                    break;
                }
                spec(self)?;
                self.end_decl(TokenKind::RParen)?;
            }
            self.end_decl(TokenKind::Eof)
        } else {
            spec(self)?;
            self.end_decl(TokenKind::Eof)
        }
    }

    fn import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let start = self.current().span.start;
        let name = match self.peek() {
            TokenKind::Ident => Some(self.ident()?),
            TokenKind::Dot => {
                let token = self.bump();
                Some(Ident {
                    name: ".".to_string(),
                    span: token.span,
                })
            }
            _ => None,
        };
        let token = match self.peek() {
            TokenKind::String | TokenKind::RawString => self.bump(),
            _ => return Err(self.unexpected("import path")),
        };
        let path = unquote(token.text)
            .ok_or_else(|| ParseError::new("invalid import path literal", token.span.clone()))?;
        Ok(ImportSpec {
            name,
            path,
            span: self.span_from(start),
        })
    }

    fn type_spec(&mut self) -> Result<TypeSpec, ParseError> {
        let name = self.ident()?;
        let type_params = if self.peek() == TokenKind::LBrack && self.at_type_params() {
            self.type_params()?
        } else {
            Vec::new()
        };
        let alias = self.eat(TokenKind::Assign);
        let ty = self.parse_type()?;
        Ok(TypeSpec {
            name,
            type_params,
            alias,
            ty,
        })
    }

    /// At `type T [`, distinguishes `[P any]` from an array length `[N]`.
    fn at_type_params(&self) -> bool {
        self.peek_at(1) == TokenKind::Ident
            && matches!(
                self.peek_at(2),
                TokenKind::Ident
                    | TokenKind::Comma
                    | TokenKind::Tilde
                    | TokenKind::LBrack
                    | TokenKind::Interface
                    | TokenKind::Func
                    | TokenKind::Map
                    | TokenKind::Chan
                    | TokenKind::Struct
                    | TokenKind::Arrow
            )
    }

    fn type_params(&mut self) -> Result<Vec<TypeParamDecl>, ParseError> {
        self.expect(TokenKind::LBrack)?;
        let mut params = Vec::new();
        let mut pending: Vec<Ident> = Vec::new();
        loop {
            if self.eat(TokenKind::RBrack) {
                if !pending.is_empty() {
                    return Err(self.unexpected("type constraint"));
                }
                break;
            }
            pending.push(self.ident()?);
            if self.eat(TokenKind::Comma) {
                continue;
            }
            let constraint = self.constraint()?;
            for name in pending.drain(..) {
                params.push(TypeParamDecl {
                    name,
                    constraint: constraint.clone(),
                });
            }
            if !self.eat(TokenKind::Comma) {
                self.expect(TokenKind::RBrack)?;
                break;
            }
        }
        Ok(params)
    }

    /// `~A | B | C`. A single term without `~` is returned as-is.
    fn constraint(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        let mut terms = Vec::new();
        loop {
            let tilde = self.eat(TokenKind::Tilde);
            let ty = self.parse_type()?;
            terms.push(UnionTerm { tilde, ty });
            if !self.eat(TokenKind::Pipe) {
                break;
            }
        }
        if terms.len() == 1 && !terms[0].tilde {
            return Ok(terms.remove(0).ty);
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Union(terms),
            span: self.span_from(start),
        })
    }

    fn const_decl(&mut self) -> Result<Vec<ConstSpec>, ParseError> {
        let mut specs = Vec::new();
        if self.eat(TokenKind::LParen) {
            let mut previous: Vec<Vec<Token<'src>>> = Vec::new();
            let mut iota = 0u64;
            loop {
                while self.eat(TokenKind::Semi) {}
                if self.eat(TokenKind::RParen) {
                    break;
                }
                self.const_spec(iota, &mut previous, &mut specs)?;
                self.end_decl(TokenKind::RParen)?;
                iota += 1;
            }
            self.end_decl(TokenKind::Eof)?;
        } else {
            self.const_spec(0, &mut Vec::new(), &mut specs)?;
            self.end_decl(TokenKind::Eof)?;
        }
        Ok(specs)
    }

    /// Parses `a, b [T] [= x, y]`. Without `=`, the previous spec's
    /// expressions repeat, as Go does inside a group.
    fn const_spec(
        &mut self,
        iota: u64,
        previous: &mut Vec<Vec<Token<'src>>>,
        specs: &mut Vec<ConstSpec>,
    ) -> Result<(), ParseError> {
        let mut names = vec![self.ident()?];
        while self.eat(TokenKind::Comma) {
            names.push(self.ident()?);
        }
        if !matches!(
            self.peek(),
            TokenKind::Assign | TokenKind::Semi | TokenKind::RParen
        ) {
            self.parse_type()?;
        }
        if self.eat(TokenKind::Assign) {
            *previous = self.expr_list()?;
        }
        for (i, name) in names.into_iter().enumerate() {
            let value = previous
                .get(i)
                .map_or(ConstValue::Unknown, |expr| eval_const(expr, iota));
            specs.push(ConstSpec { name, value });
        }
        Ok(())
    }

    /// Collects comma-separated expressions up to the end of the constant declaration line.
    fn expr_list(&mut self) -> Result<Vec<Vec<Token<'src>>>, ParseError> {
        let mut exprs = vec![Vec::new()];
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::Eof => return Err(self.unexpected("expression")),
                TokenKind::Semi | TokenKind::RParen if depth == 0 => break,
                TokenKind::Comma if depth == 0 => {
                    self.bump();
                    exprs.push(Vec::new());
                    continue;
                }
                TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            let token = self.bump();
            if let Some(expr) = exprs.last_mut() {
                expr.push(token);
            }
        }
        Ok(exprs)
    }

    /// Skips a `var` or `func` declaration.
    fn skip_decl(&mut self) -> Result<(), ParseError> {
        let start = self.current().span.clone();
        self.bump();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::Eof if depth == 0 => return Ok(()),
                TokenKind::Eof => {
                    return Err(ParseError::new("unterminated declaration", start));
                }
                TokenKind::Semi if depth == 0 => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| self.unexpected("declaration"))?;
                }
                _ => {}
            }
            self.bump();
        }
    }

    // ---- types ----

    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        let kind = match self.peek() {
            TokenKind::Ident => return self.type_name(),
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect(TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::Star => {
                self.bump();
                TypeExprKind::Pointer(Box::new(self.parse_type()?))
            }
            TokenKind::LBrack => {
                self.bump();
                if self.eat(TokenKind::RBrack) {
                    TypeExprKind::Slice(Box::new(self.parse_type()?))
                } else {
                    let len = self.array_len()?;
                    TypeExprKind::Array {
                        len,
                        elem: Box::new(self.parse_type()?),
                    }
                }
            }
            TokenKind::Map => {
                self.bump();
                self.expect(TokenKind::LBrack)?;
                let key = self.parse_type()?;
                self.expect(TokenKind::RBrack)?;
                let value = self.parse_type()?;
                TypeExprKind::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                }
            }
            TokenKind::Chan => {
                self.bump();
                let dir = if self.eat(TokenKind::Arrow) {
                    ChanDir::SendOnly
                } else {
                    ChanDir::SendRecv
                };
                TypeExprKind::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                }
            }
            TokenKind::Arrow => {
                self.bump();
                self.expect(TokenKind::Chan)?;
                TypeExprKind::Chan {
                    dir: ChanDir::RecvOnly,
                    elem: Box::new(self.parse_type()?),
                }
            }
            TokenKind::Func => {
                self.bump();
                TypeExprKind::Func(self.signature()?)
            }
            TokenKind::Struct => {
                self.bump();
                TypeExprKind::Struct(self.struct_fields()?)
            }
            TokenKind::Interface => {
                self.bump();
                TypeExprKind::Interface(self.interface_elems()?)
            }
            _ => return Err(self.unexpected("type")),
        };
        Ok(TypeExpr {
            kind,
            span: self.span_from(start),
        })
    }

    /// `Name`, `pkg.Name`, optionally followed by type arguments.
    fn type_name(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        let first = self.ident()?;
        let (package, name) = if self.eat(TokenKind::Dot) {
            (Some(first), self.ident()?)
        } else {
            (None, first)
        };
        let mut args = Vec::new();
        if self.peek() == TokenKind::LBrack && self.peek_at(1) != TokenKind::RBrack {
            self.bump();
            loop {
                args.push(self.parse_type()?);
                if !self.eat(TokenKind::Comma) || self.peek() == TokenKind::RBrack {
                    break;
                }
            }
            self.expect(TokenKind::RBrack)?;
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Name {
                package,
                name,
                args,
            },
            span: self.span_from(start),
        })
    }

    /// Array length, after `[`. Consumes the closing `]`.
    fn array_len(&mut self) -> Result<ArrayLen, ParseError> {
        if self.peek() == TokenKind::Ellipsis && self.peek_at(1) == TokenKind::RBrack {
            self.bump();
            self.bump();
            return Ok(ArrayLen::Ellipsis);
        }
        let open = self.pos - 1;
        let close = self
            .matching(open)
            .ok_or_else(|| self.unexpected("`]`"))?;
        let inner = &self.tokens[self.pos..close];
        let len = match inner {
            [] => return Err(self.unexpected("array length")),
            [token] if token.kind == TokenKind::Number => match parse_const_int(token.text) {
                Some(n) => ArrayLen::Literal(n),
                None => ArrayLen::Expr(token.text.to_string()),
            },
            [token] if token.kind == TokenKind::Ident => ArrayLen::Name(Ident {
                name: token.text.to_string(),
                span: token.span.clone(),
            }),
            [first, .., last] => {
                ArrayLen::Expr(self.src[first.span.start..last.span.end].to_string())
            }
            [token] => ArrayLen::Expr(token.text.to_string()),
        };
        self.pos = close + 1;
        Ok(len)
    }

    fn signature(&mut self) -> Result<FuncType, ParseError> {
        let (params, variadic) = self.param_list(true)?;
        let results = match self.peek() {
            TokenKind::LParen => self.param_list(false)?.0,
            kind if Self::starts_type(kind) => vec![ParamDecl {
                name: None,
                ty: self.parse_type()?,
            }],
            _ => Vec::new(),
        };
        Ok(FuncType {
            params,
            results,
            variadic,
        })
    }

    /// Parses `( ... )`, resolving Go's grouping of names and types:
    /// `(a, b int)` names both parameters, `(int, string)` names none.
    fn param_list(&mut self, allow_variadic: bool) -> Result<(Vec<ParamDecl>, bool), ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut entries = Vec::new();
        while self.peek() != TokenKind::RParen {
            entries.push(self.param_entry()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect(TokenKind::RParen)?;

        let variadic_at = entries.iter().position(|entry| {
            matches!(
                entry,
                ParamEntry::Named(_, _, true) | ParamEntry::Type(_, true)
            )
        });
        let variadic = match variadic_at {
            Some(i) if !allow_variadic || i + 1 != entries.len() => {
                return Err(ParseError::new(
                    "can only use ... with final parameter in list",
                    close.span,
                ));
            }
            Some(_) => true,
            None => false,
        };

        let any_named = entries
            .iter()
            .any(|entry| matches!(entry, ParamEntry::Named(..)));
        let mut params = Vec::with_capacity(entries.len());
        if any_named {
            let mut pending: Vec<Ident> = Vec::new();
            for entry in entries {
                match entry {
                    ParamEntry::Bare(name) => pending.push(name),
                    ParamEntry::Named(name, ty, _) => {
                        for name in pending.drain(..) {
                            params.push(ParamDecl {
                                name: Some(name),
                                ty: ty.clone(),
                            });
                        }
                        params.push(ParamDecl {
                            name: Some(name),
                            ty,
                        });
                    }
                    ParamEntry::Type(ty, _) => {
                        return Err(ParseError::new(
                            "mixed named and unnamed parameters",
                            ty.span,
                        ));
                    }
                }
            }
            if !pending.is_empty() {
                return Err(ParseError::new(
                    "mixed named and unnamed parameters",
                    close.span,
                ));
            }
        } else {
            for entry in entries {
                let ty = match entry {
                    ParamEntry::Bare(name) => TypeExpr {
                        span: name.span.clone(),
                        kind: TypeExprKind::Name {
                            package: None,
                            name,
                            args: Vec::new(),
                        },
                    },
                    ParamEntry::Type(ty, _) | ParamEntry::Named(_, ty, _) => ty,
                };
                params.push(ParamDecl { name: None, ty });
            }
        }
        Ok((params, variadic))
    }

    fn param_entry(&mut self) -> Result<ParamEntry, ParseError> {
        if self.eat(TokenKind::Ellipsis) {
            return Ok(ParamEntry::Type(self.parse_type()?, true));
        }
        if self.peek() != TokenKind::Ident {
            return Ok(ParamEntry::Type(self.parse_type()?, false));
        }
        match self.peek_at(1) {
            TokenKind::Comma | TokenKind::RParen => Ok(ParamEntry::Bare(self.ident()?)),
            TokenKind::Dot => Ok(ParamEntry::Type(self.parse_type()?, false)),
            TokenKind::Ellipsis => {
                let name = self.ident()?;
                self.bump();
                Ok(ParamEntry::Named(name, self.parse_type()?, true))
            }
            TokenKind::LBrack if !self.ident_then_array() => {
                Ok(ParamEntry::Type(self.parse_type()?, false))
            }
            kind if Self::starts_type(kind) => {
                let name = self.ident()?;
                Ok(ParamEntry::Named(name, self.parse_type()?, false))
            }
            _ => Ok(ParamEntry::Type(self.parse_type()?, false)),
        }
    }

    fn struct_fields(&mut self) -> Result<Vec<FieldDecl>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        loop {
            while self.eat(TokenKind::Semi) {}
            if self.eat(TokenKind::RBrace) {
                break;
            }
            self.field_decl(&mut fields)?;
            self.end_decl(TokenKind::RBrace)?;
        }
        Ok(fields)
    }

    fn field_decl(&mut self, fields: &mut Vec<FieldDecl>) -> Result<(), ParseError> {
        let embedded_start = self.pos;
        let embedded = match self.peek() {
            TokenKind::Star => true,
            TokenKind::Ident => match self.peek_at(1) {
                TokenKind::Dot
                | TokenKind::Semi
                | TokenKind::RBrace
                | TokenKind::String
                | TokenKind::RawString => true,
                TokenKind::LBrack => !self.ident_then_array(),
                _ => false,
            },
            _ => return Err(self.unexpected("field name or embedded type")),
        };

        if embedded {
            let start = self.current().span.start;
            let pointer = self.eat(TokenKind::Star);
            let base = self.type_name()?;
            let name = match &base.kind {
                TypeExprKind::Name { name, .. } => name.clone(),
                _ => {
                    return Err(ParseError::new(
                        "expected embedded type name",
                        self.tokens[embedded_start].span.clone(),
                    ));
                }
            };
            let ty = if pointer {
                TypeExpr {
                    kind: TypeExprKind::Pointer(Box::new(base)),
                    span: self.span_from(start),
                }
            } else {
                base
            };
            let tag = self.tag()?;
            fields.push(FieldDecl {
                name,
                ty,
                tag,
                embedded: true,
            });
            return Ok(());
        }

        let mut names = vec![self.ident()?];
        while self.eat(TokenKind::Comma) {
            names.push(self.ident()?);
        }
        let ty = self.parse_type()?;
        let tag = self.tag()?;
        for name in names {
            fields.push(FieldDecl {
                name,
                ty: ty.clone(),
                tag: tag.clone(),
                embedded: false,
            });
        }
        Ok(())
    }

    fn tag(&mut self) -> Result<Option<String>, ParseError> {
        match self.peek() {
            TokenKind::String | TokenKind::RawString => {
                let token = self.bump();
                unquote(token.text)
                    .map(Some)
                    .ok_or_else(|| ParseError::new("invalid struct tag literal", token.span))
            }
            _ => Ok(None),
        }
    }

    fn interface_elems(&mut self) -> Result<Vec<InterfaceElem>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut elems = Vec::new();
        loop {
            while self.eat(TokenKind::Semi) {}
            if self.eat(TokenKind::RBrace) {
                break;
            }
            if self.peek() == TokenKind::Ident && self.peek_at(1) == TokenKind::LParen {
                let name = self.ident()?;
                let func = self.signature()?;
                elems.push(InterfaceElem::Method { name, func });
            } else {
                elems.push(InterfaceElem::Embed(self.constraint()?));
            }
            self.end_decl(TokenKind::RBrace)?;
        }
        Ok(elems)
    }
}

/// Evaluates a constant expression if it is an integer literal or `iota`.
fn eval_const(expr: &[Token<'_>], iota: u64) -> ConstValue {
    match expr {
        [token] if token.kind == TokenKind::Number => {
            parse_const_int(token.text).map_or(ConstValue::Unknown, ConstValue::Int)
        }
        [token] if token.kind == TokenKind::Ident && token.text == "iota" => ConstValue::Int(iota),
        _ => ConstValue::Unknown,
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod parser_test;
