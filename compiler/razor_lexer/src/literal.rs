//! Lexical rules of the code grammar as pure functions over `&str`.
//!
//! Each function receives the remaining input starting at the construct
//! and returns how many bytes it spans. The scanning tokenizer drives them
//! from its cursor; the adapter's host lexer calls them from logos
//! callbacks, so both tokenizers agree on every boundary.

use memchr::memmem;
use razor_diagnostic::{Diagnostic, ErrorCode};
use razor_ir::{CodeTokenKind, Span};

/// Extent of a delimited construct.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Scanned {
    pub len: usize,
    pub terminated: bool,
}

impl Scanned {
    fn closed(len: usize) -> Self {
        Scanned {
            len,
            terminated: true,
        }
    }

    fn open(len: usize) -> Self {
        Scanned {
            len,
            terminated: false,
        }
    }
}

// ─── Character classes ──────────────────────────────────────────────

#[inline]
pub(crate) fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Horizontal whitespace: space separators plus tab, vertical tab, form
/// feed and the byte order mark.
#[inline]
pub(crate) fn is_whitespace(c: char) -> bool {
    match c {
        ' ' | '\t' | '\u{B}' | '\u{C}' | '\u{FEFF}' => true,
        c if c.is_ascii() => false,
        c => c.is_whitespace() && !is_newline(c),
    }
}

#[inline]
pub(crate) fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

#[inline]
pub(crate) fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

// ─── Trivia ─────────────────────────────────────────────────────────

/// Length of the newline at the start of `s`, or 0.
#[inline]
pub(crate) fn newline_len(s: &str) -> usize {
    if s.starts_with("\r\n") {
        return 2;
    }
    match s.chars().next() {
        Some(c) if is_newline(c) => c.len_utf8(),
        _ => 0,
    }
}

pub(crate) fn whitespace_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !is_whitespace(c))
        .map_or(s.len(), |(i, _)| i)
}

/// `//` comment up to (not including) the end of the line.
pub(crate) fn line_comment_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| is_newline(c))
        .map_or(s.len(), |(i, _)| i)
}

/// `/* ... */`; runs to the end of input when unterminated.
pub(crate) fn block_comment(s: &str) -> Scanned {
    match memmem::find(s.as_bytes().get(2..).unwrap_or_default(), b"*/") {
        Some(i) => Scanned::closed(i + 4),
        None => Scanned::open(s.len()),
    }
}

// ─── Words & numbers ────────────────────────────────────────────────

pub(crate) fn ident_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if is_ident_start(c) => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !is_ident_continue(c))
        .map_or(s.len(), |(i, _)| i)
}

/// Numeric literal starting with a digit or `.digit`.
///
/// Returns the length and whether the literal is real (has a fraction,
/// exponent or real suffix).
pub(crate) fn number_len(s: &str) -> (usize, bool) {
    let b = s.as_bytes();
    let at = |i: usize| b.get(i).copied().unwrap_or(0);

    if at(0) == b'0' && matches!(at(1), b'x' | b'X') && at(2).is_ascii_hexdigit() {
        let mut i = 3;
        while at(i).is_ascii_hexdigit() || at(i) == b'_' {
            i += 1;
        }
        return (i + integer_suffix_len(&b[i..]), false);
    }
    if at(0) == b'0' && matches!(at(1), b'b' | b'B') && matches!(at(2), b'0' | b'1') {
        let mut i = 3;
        while matches!(at(i), b'0' | b'1' | b'_') {
            i += 1;
        }
        return (i + integer_suffix_len(&b[i..]), false);
    }

    let eat_digits = |mut i: usize| {
        while at(i).is_ascii_digit() || at(i) == b'_' {
            i += 1;
        }
        i
    };
    let (mut i, mut real) = if at(0) == b'.' {
        (eat_digits(1), true)
    } else {
        let whole = eat_digits(0);
        if at(whole) == b'.' && at(whole + 1).is_ascii_digit() {
            (eat_digits(whole + 1), true)
        } else {
            (whole, false)
        }
    };
    if matches!(at(i), b'e' | b'E') {
        let sign = usize::from(matches!(at(i + 1), b'+' | b'-'));
        if at(i + 1 + sign).is_ascii_digit() {
            i = eat_digits(i + 1 + sign);
            real = true;
        }
    }
    if matches!(at(i), b'f' | b'F' | b'd' | b'D' | b'm' | b'M') {
        return (i + 1, true);
    }
    if real {
        (i, true)
    } else {
        (i + integer_suffix_len(&b[i..]), false)
    }
}

/// `u`, `l`, `ul`, `lu` in any case.
fn integer_suffix_len(b: &[u8]) -> usize {
    let is_suffix = |c: u8| matches!(c, b'u' | b'U' | b'l' | b'L');
    match b {
        [x, y, ..]
            if is_suffix(*x)
                && is_suffix(*y)
                && !x.eq_ignore_ascii_case(y) =>
        {
            2
        }
        [x, ..] if is_suffix(*x) => 1,
        _ => 0,
    }
}

// ─── Strings & characters ───────────────────────────────────────────

/// `"..."` with backslash escapes; may not span lines.
pub(crate) fn regular_string(s: &str) -> Scanned {
    quoted(s, 1, '"')
}

/// `'x'` with backslash escapes; may not span lines.
pub(crate) fn char_literal(s: &str) -> Scanned {
    quoted(s, 1, '\'')
}

fn quoted(s: &str, open: usize, quote: char) -> Scanned {
    let mut chars = s[open..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            c if c == quote => return Scanned::closed(open + i + 1),
            '\\' => match chars.clone().next() {
                Some((_, next)) if !is_newline(next) => {
                    chars.next();
                }
                _ => {}
            },
            c if is_newline(c) => return Scanned::open(open + i),
            _ => {}
        }
    }
    Scanned::open(s.len())
}

/// `@"..."` (and `$@"`, `@$"`); `""` escapes a quote, newlines allowed.
///
/// `open` is the byte length of the prefix including the opening quote.
pub(crate) fn verbatim_string(s: &str, open: usize) -> Scanned {
    let b = s.as_bytes();
    let mut i = open;
    while let Some(offset) = memchr::memchr(b'"', &b[i..]) {
        i += offset + 1;
        if b.get(i) == Some(&b'"') {
            i += 1;
        } else {
            return Scanned::closed(i);
        }
    }
    Scanned::open(s.len())
}

/// `$"..."` / `$@"..."`: like the plain forms, with `{expr}` holes that
/// may themselves contain string and character literals.
pub(crate) fn interpolated_string(s: &str, open: usize, verbatim: bool) -> Scanned {
    let b = s.as_bytes();
    let at = |i: usize| b.get(i).copied();
    let mut i = open;
    let mut depth = 0u32;
    loop {
        let Some(c) = at(i) else {
            return Scanned::open(s.len());
        };
        if depth == 0 {
            match c {
                b'"' if verbatim && at(i + 1) == Some(b'"') => i += 2,
                b'"' => return Scanned::closed(i + 1),
                b'{' if at(i + 1) == Some(b'{') => i += 2,
                b'{' => {
                    depth = 1;
                    i += 1;
                }
                b'\\' if !verbatim => {
                    i += 1;
                    match s[i..].chars().next() {
                        Some(next) if !is_newline(next) => i += next.len_utf8(),
                        _ => {}
                    }
                }
                b'\n' | b'\r' if !verbatim => return Scanned::open(i),
                _ => i += char_len_at(s, i),
            }
        } else {
            match c {
                b'{' => {
                    depth += 1;
                    i += 1;
                }
                b'}' => {
                    depth -= 1;
                    i += 1;
                }
                b'"' => i += regular_string(&s[i..]).len.max(1),
                b'\'' => i += char_literal(&s[i..]).len.max(1),
                b'\n' | b'\r' if !verbatim => return Scanned::open(i),
                _ => i += char_len_at(s, i),
            }
        }
    }
}

/// `"""..."""` raw string; closes at the first run of as many quotes as
/// opened it. `open` is the offset of the first quote.
pub(crate) fn raw_string(s: &str, open: usize) -> Scanned {
    let b = s.as_bytes();
    let quotes = b[open..].iter().take_while(|&&c| c == b'"').count();
    let body = open + quotes;
    let closer = &b[open..body];
    match memmem::find(&b[body..], closer) {
        Some(i) => Scanned::closed(body + i + quotes),
        None => Scanned::open(s.len()),
    }
}

fn char_len_at(s: &str, i: usize) -> usize {
    s[i..].chars().next().map_or(1, char::len_utf8)
}

/// Diagnostic for an unterminated literal or comment of `kind` at `start`.
pub(crate) fn unterminated(kind: CodeTokenKind, start: u32) -> Option<Diagnostic> {
    let (code, len) = match kind {
        CodeTokenKind::StringLiteral => (ErrorCode::UnterminatedStringLiteral, 1),
        CodeTokenKind::CharacterLiteral => (ErrorCode::UnterminatedCharacterLiteral, 1),
        CodeTokenKind::CSharpComment => (ErrorCode::BlockCommentNotTerminated, 2),
        _ => return None,
    };
    Some(Diagnostic::error(code, Span::from_len(start, len)))
}

// ─── Operators ──────────────────────────────────────────────────────

/// Longest first within each leading character; `>>` is deliberately
/// absent.
static OPERATORS: &[(&str, CodeTokenKind)] = &[
    ("??=", CodeTokenKind::NullCoalesceAssign),
    ("<<=", CodeTokenKind::LeftShiftAssign),
    ("..", CodeTokenKind::Range),
    ("::", CodeTokenKind::DoubleColon),
    ("??", CodeTokenKind::NullCoalesce),
    ("->", CodeTokenKind::Arrow),
    ("--", CodeTokenKind::Decrement),
    ("-=", CodeTokenKind::MinusAssign),
    ("=>", CodeTokenKind::FatArrow),
    ("==", CodeTokenKind::Equals),
    ("!=", CodeTokenKind::NotEqual),
    ("<<", CodeTokenKind::LeftShift),
    ("<=", CodeTokenKind::LessThanEqual),
    (">=", CodeTokenKind::GreaterThanEqual),
    ("++", CodeTokenKind::Increment),
    ("+=", CodeTokenKind::PlusAssign),
    ("*=", CodeTokenKind::MultiplyAssign),
    ("/=", CodeTokenKind::DivideAssign),
    ("%=", CodeTokenKind::ModuloAssign),
    ("&&", CodeTokenKind::DoubleAnd),
    ("&=", CodeTokenKind::AndAssign),
    ("||", CodeTokenKind::DoubleOr),
    ("|=", CodeTokenKind::OrAssign),
    ("^=", CodeTokenKind::XorAssign),
    ("{", CodeTokenKind::LeftBrace),
    ("}", CodeTokenKind::RightBrace),
    ("(", CodeTokenKind::LeftParen),
    (")", CodeTokenKind::RightParen),
    ("[", CodeTokenKind::LeftBracket),
    ("]", CodeTokenKind::RightBracket),
    (";", CodeTokenKind::Semicolon),
    (",", CodeTokenKind::Comma),
    (".", CodeTokenKind::Dot),
    (":", CodeTokenKind::Colon),
    ("?", CodeTokenKind::QuestionMark),
    ("#", CodeTokenKind::Hash),
    ("=", CodeTokenKind::Assign),
    ("!", CodeTokenKind::Not),
    ("<", CodeTokenKind::LessThan),
    (">", CodeTokenKind::GreaterThan),
    ("+", CodeTokenKind::Plus),
    ("-", CodeTokenKind::Minus),
    ("*", CodeTokenKind::Star),
    ("/", CodeTokenKind::Slash),
    ("%", CodeTokenKind::Modulo),
    ("&", CodeTokenKind::And),
    ("|", CodeTokenKind::Or),
    ("^", CodeTokenKind::Xor),
    ("~", CodeTokenKind::Tilde),
];

/// Longest operator or punctuation at the start of `s`.
pub(crate) fn operator(s: &str) -> Option<(CodeTokenKind, usize)> {
    OPERATORS
        .iter()
        .find(|(text, _)| s.starts_with(text))
        .map(|&(text, kind)| (kind, text.len()))
}
