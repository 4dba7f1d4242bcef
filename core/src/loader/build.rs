//! Build constraints: which files of a directory belong to the package for
//! the target platform.
//!
//! Two mechanisms decide it, as for `go build`: `_GOOS`/`_GOARCH` file-name
//! suffixes, and `//go:build` (or legacy `// +build`) lines in the file
//! header.

use std::ops::Range;

use super::error::ParseError;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Target platform and enabled tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub cgo: bool,
    /// Extra tags, as given to `go build -tags`.
    pub tags: Vec<String>,
}

impl BuildContext {
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            cgo: true,
            tags: Vec::new(),
        }
    }

    /// The host platform, overridden by `GOOS`, `GOARCH` and `CGO_ENABLED`
    /// as read through `env`.
    pub fn from_env(env: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());
        let mut context = Self::new(
            non_empty("GOOS").unwrap_or_else(|| host_os().to_string()),
            non_empty("GOARCH").unwrap_or_else(|| host_arch().to_string()),
        );
        if let Some(cgo) = non_empty("CGO_ENABLED") {
            context.cgo = cgo != "0";
        }
        context
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether a single build tag is satisfied.
    pub fn matches_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch || tag == "gc" {
            return true;
        }
        match tag {
            "cgo" => self.cgo,
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            _ => is_release_tag(tag) || self.tags.iter().any(|t| t == tag),
        }
    }

    /// Whether the `_GOOS`, `_GOARCH` or `_GOOS_GOARCH` suffix of a file name,
    /// if any, matches.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.split('.').next().unwrap_or_default();
        let Some(first) = stem.find('_') else {
            return true;
        };
        let mut parts: Vec<&str> = stem[first..].split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }
        match parts.as_slice() {
            [.., os, arch] if KNOWN_OS.contains(os) && KNOWN_ARCH.contains(arch) => {
                self.matches_tag(os) && self.matches_tag(arch)
            }
            [.., last] if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => {
                self.matches_tag(last)
            }
            _ => true,
        }
    }

    /// Evaluates the constraint lines in the header of `source`. Files
    /// without constraints always match.
    pub fn matches_source(&self, source: &str) -> Result<bool, ParseError> {
        let header = Header::scan(source)?;
        if let Some((expr, span)) = header.go_build {
            let expr = Expr::parse(expr).map_err(|message| ParseError::new(message, span))?;
            return Ok(expr.eval(self));
        }
        Ok(header
            .plus_build
            .iter()
            .all(|line| plus_build_matches(self, line)))
    }
}

/// `go1.N` tags. The toolchain version is unknown, so every release counts.
fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.")
        .is_some_and(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()))
}

fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

fn host_arch() -> &'static str {
    let little = cfg!(target_endian = "little");
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" if little => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if little => "mipsle",
        "mips64" if little => "mips64le",
        "wasm32" => "wasm",
        arch => arch,
    }
}

/// `// +build a,!b c`: space-separated alternatives of comma-separated terms.
fn plus_build_matches(context: &BuildContext, line: &str) -> bool {
    line.split_whitespace().any(|option| {
        option.split(',').all(|term| match term.strip_prefix('!') {
            Some(tag) => !context.matches_tag(tag),
            None => context.matches_tag(term),
        })
    })
}

/// Constraint lines found before the package clause.
#[derive(Debug, Default)]
struct Header<'src> {
    go_build: Option<(&'src str, Range<usize>)>,
    plus_build: Vec<&'src str>,
}

impl<'src> Header<'src> {
    fn scan(source: &'src str) -> Result<Self, ParseError> {
        let mut header = Header::default();
        let mut in_block = false;
        let mut offset = 0;

        for raw in source.split_inclusive('\n') {
            let start = offset;
            offset += raw.len();
            let line = raw.trim();

            if in_block {
                match line.find("*/") {
                    Some(end) => {
                        in_block = false;
                        if !line[end + 2..].trim().is_empty() {
                            break;
                        }
                    }
                    None => continue,
                }
                continue;
            }
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("/*") {
                match rest.find("*/") {
                    Some(end) if rest[end + 2..].trim().is_empty() => continue,
                    Some(_) => break,
                    None => {
                        in_block = true;
                        continue;
                    }
                }
            }
            let Some(comment) = line.strip_prefix("//") else {
                break;
            };

            if let Some(expr) = comment.strip_prefix("go:build") {
                if !expr.is_empty() && !expr.starts_with(char::is_whitespace) {
                    continue;
                }
                let span = start..start + raw.trim_end().len();
                if header.go_build.is_some() {
                    return Err(ParseError::new("multiple //go:build comments", span));
                }
                header.go_build = Some((expr.trim(), span));
            } else if let Some(rest) = comment.trim_start().strip_prefix("+build") {
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    header.plus_build.push(rest.trim());
                }
            }
        }
        Ok(header)
    }
}

/// A `//go:build` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn parse(text: &str) -> Result<Expr, String> {
        let mut parser = ExprParser { text, pos: 0 };
        if parser.at_end() {
            return Err("empty //go:build expression".to_string());
        }
        let expr = parser.or()?;
        if !parser.at_end() {
            return Err(format!("unexpected {:?}", parser.rest()));
        }
        Ok(expr)
    }

    fn eval(&self, context: &BuildContext) -> bool {
        match self {
            Expr::Tag(tag) => context.matches_tag(tag),
            Expr::Not(inner) => !inner.eval(context),
            Expr::And(lhs, rhs) => lhs.eval(context) && rhs.eval(context),
            Expr::Or(lhs, rhs) => lhs.eval(context) || rhs.eval(context),
        }
    }
}

struct ExprParser<'a> {
    text: &'a str,
    pos: usize,
}

impl ExprParser<'_> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn skip_space(&mut self) {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;
    }

    fn at_end(&mut self) -> bool {
        self.skip_space();
        self.rest().is_empty()
    }

    fn eat(&mut self, op: &str) -> bool {
        self.skip_space();
        if self.rest().starts_with(op) {
            self.pos += op.len();
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Result<Expr, String> {
        let mut expr = self.and()?;
        while self.eat("||") {
            expr = Expr::Or(Box::new(expr), Box::new(self.and()?));
        }
        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, String> {
        let mut expr = self.not()?;
        while self.eat("&&") {
            expr = Expr::And(Box::new(expr), Box::new(self.not()?));
        }
        Ok(expr)
    }

    fn not(&mut self) -> Result<Expr, String> {
        if self.eat("!") {
            return Ok(Expr::Not(Box::new(self.not()?)));
        }
        if self.eat("(") {
            let expr = self.or()?;
            if !self.eat(")") {
                return Err("missing )".to_string());
            }
            return Ok(expr);
        }
        self.tag()
    }

    fn tag(&mut self) -> Result<Expr, String> {
        self.skip_space();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(rest.len());
        if len == 0 {
            return match rest.chars().next() {
                Some(c) => Err(format!("unexpected {c:?}")),
                None => Err("unexpected end of expression".to_string()),
            };
        }
        let tag = rest[..len].to_string();
        self.pos += len;
        Ok(Expr::Tag(tag))
    }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod build_test;
