//! Host lexer for the code grammar, generated by logos.
//!
//! Knows the code grammar's lexical structure (verbatim identifiers, every
//! string form, comments) but nothing about Razor. Delimited constructs are
//! matched by their opener and extended by callbacks sharing the rules in
//! [`crate::literal`].

use logos::{Lexer, Logos};
use razor_ir::CodeTokenKind;

use crate::literal;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostToken {
    #[regex(r"[\t\x0B\x0C\x{FEFF}\p{Zs}]+")]
    Whitespace,

    #[regex(r"\r\n|[\n\r\x{85}\x{2028}\x{2029}]")]
    NewLine,

    #[regex(r"//[^\n\r\x{85}\x{2028}\x{2029}]*")]
    LineComment,

    /// `true` when the closing `*/` was found.
    #[token("/*", block_comment)]
    BlockComment(bool),

    #[regex(r"[_\p{Alphabetic}]", identifier)]
    Identifier,

    /// `@name`: an identifier escaped with `@`.
    #[regex(r"@[_\p{Alphabetic}]", verbatim_identifier)]
    VerbatimIdentifier,

    /// `true` for real literals.
    #[regex(r"[0-9]|\.[0-9]", number)]
    Number(bool),

    /// `true` when terminated.
    #[token("\"", |lex| extend(lex, literal::regular_string))]
    #[token("\"\"\"", |lex| extend(lex, |s| literal::raw_string(s, 0)))]
    #[token("$\"\"\"", |lex| extend(lex, |s| literal::raw_string(s, 1)))]
    #[token("@\"", |lex| extend(lex, |s| literal::verbatim_string(s, 2)))]
    #[token("$\"", |lex| extend(lex, |s| literal::interpolated_string(s, 2, false)))]
    #[token("$@\"", |lex| extend(lex, |s| literal::interpolated_string(s, 3, true)))]
    #[token("@$\"", |lex| extend(lex, |s| literal::interpolated_string(s, 3, true)))]
    String(bool),

    /// `true` when terminated.
    #[token("'", |lex| extend(lex, literal::char_literal))]
    Char(bool),

    #[token("@")]
    At,
    #[token("#")]
    Hash,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token("?")]
    Question,
    #[token("??")]
    QuestionQuestion,
    #[token("??=")]
    QuestionQuestionEq,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,

    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token("<<")]
    Shl,
    #[token("<<=")]
    ShlEq,
    // `>>` is never one token; generic argument lists close with two `>`.
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("+=")]
    PlusEq,
    #[token("++")]
    PlusPlus,
    #[token("-")]
    Minus,
    #[token("-=")]
    MinusEq,
    #[token("--")]
    MinusMinus,
    #[token("*")]
    Star,
    #[token("*=")]
    StarEq,
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashEq,
    #[token("%")]
    Percent,
    #[token("%=")]
    PercentEq,
    #[token("&")]
    Amp,
    #[token("&=")]
    AmpEq,
    #[token("&&")]
    AmpAmp,
    #[token("|")]
    Pipe,
    #[token("|=")]
    PipeEq,
    #[token("||")]
    PipePipe,
    #[token("^")]
    Caret,
    #[token("^=")]
    CaretEq,
    #[token("~")]
    Tilde,
}

/// Input from the start of the current match to the end.
fn from_match_start<'s>(lex: &Lexer<'s, HostToken>) -> &'s str {
    &lex.source()[lex.span().start..]
}

/// Grow the current match to the extent `scan` computes from its start.
fn extend(lex: &mut Lexer<'_, HostToken>, scan: impl Fn(&str) -> literal::Scanned) -> bool {
    let scanned = scan(from_match_start(lex));
    let matched = lex.slice().len();
    lex.bump(scanned.len.saturating_sub(matched));
    scanned.terminated
}

fn block_comment(lex: &mut Lexer<'_, HostToken>) -> bool {
    extend(lex, literal::block_comment)
}

fn identifier(lex: &mut Lexer<'_, HostToken>) {
    let len = literal::ident_len(from_match_start(lex));
    let matched = lex.slice().len();
    lex.bump(len.saturating_sub(matched));
}

fn verbatim_identifier(lex: &mut Lexer<'_, HostToken>) {
    let len = 1 + literal::ident_len(&from_match_start(lex)[1..]);
    let matched = lex.slice().len();
    lex.bump(len.saturating_sub(matched));
}

fn number(lex: &mut Lexer<'_, HostToken>) -> bool {
    let (len, real) = literal::number_len(from_match_start(lex));
    let matched = lex.slice().len();
    lex.bump(len.saturating_sub(matched));
    real
}

impl HostToken {
    /// Code-grammar kind for tokens that map one-to-one.
    ///
    /// Tokens needing context (identifiers, `#`, verbatim identifiers) are
    /// resolved by the adapter and return `None`.
    pub(crate) fn simple_kind(self) -> Option<CodeTokenKind> {
        use CodeTokenKind as K;
        Some(match self {
            HostToken::Whitespace => K::Whitespace,
            HostToken::NewLine => K::NewLine,
            HostToken::LineComment | HostToken::BlockComment(_) => K::CSharpComment,
            HostToken::Number(true) => K::RealLiteral,
            HostToken::Number(false) => K::IntegerLiteral,
            HostToken::String(_) => K::StringLiteral,
            HostToken::Char(_) => K::CharacterLiteral,
            HostToken::At => K::Transition,
            HostToken::LBrace => K::LeftBrace,
            HostToken::RBrace => K::RightBrace,
            HostToken::LParen => K::LeftParen,
            HostToken::RParen => K::RightParen,
            HostToken::LBracket => K::LeftBracket,
            HostToken::RBracket => K::RightBracket,
            HostToken::Semicolon => K::Semicolon,
            HostToken::Comma => K::Comma,
            HostToken::Dot => K::Dot,
            HostToken::DotDot => K::Range,
            HostToken::Colon => K::Colon,
            HostToken::ColonColon => K::DoubleColon,
            HostToken::Question => K::QuestionMark,
            HostToken::QuestionQuestion => K::NullCoalesce,
            HostToken::QuestionQuestionEq => K::NullCoalesceAssign,
            HostToken::Arrow => K::Arrow,
            HostToken::FatArrow => K::FatArrow,
            HostToken::Eq => K::Assign,
            HostToken::EqEq => K::Equals,
            HostToken::NotEq => K::NotEqual,
            HostToken::Bang => K::Not,
            HostToken::Lt => K::LessThan,
            HostToken::LtEq => K::LessThanEqual,
            HostToken::Shl => K::LeftShift,
            HostToken::ShlEq => K::LeftShiftAssign,
            HostToken::Gt => K::GreaterThan,
            HostToken::GtEq => K::GreaterThanEqual,
            HostToken::Plus => K::Plus,
            HostToken::PlusEq => K::PlusAssign,
            HostToken::PlusPlus => K::Increment,
            HostToken::Minus => K::Minus,
            HostToken::MinusEq => K::MinusAssign,
            HostToken::MinusMinus => K::Decrement,
            HostToken::Star => K::Star,
            HostToken::StarEq => K::MultiplyAssign,
            HostToken::Slash => K::Slash,
            HostToken::SlashEq => K::DivideAssign,
            HostToken::Percent => K::Modulo,
            HostToken::PercentEq => K::ModuloAssign,
            HostToken::Amp => K::And,
            HostToken::AmpEq => K::AndAssign,
            HostToken::AmpAmp => K::DoubleAnd,
            HostToken::Pipe => K::Or,
            HostToken::PipeEq => K::OrAssign,
            HostToken::PipePipe => K::DoubleOr,
            HostToken::Caret => K::Xor,
            HostToken::CaretEq => K::XorAssign,
            HostToken::Tilde => K::Tilde,
            HostToken::Identifier | HostToken::VerbatimIdentifier | HostToken::Hash => {
                return None;
            }
        })
    }

    /// Whether a terminator was found, for delimited tokens.
    pub(crate) fn is_terminated(self) -> bool {
        match self {
            HostToken::BlockComment(t) | HostToken::String(t) | HostToken::Char(t) => t,
            _ => true,
        }
    }
}

/// Lex a single host token at the start of `rest`.
///
/// Returns the token (or `None` for a character the host lexer rejects) and
/// its byte length.
pub(crate) fn lex_one(rest: &str) -> Option<(Option<HostToken>, usize)> {
    let mut lexer = HostToken::lexer(rest);
    let result = lexer.next()?;
    match result {
        Ok(token) => Some((Some(token), lexer.span().end)),
        Err(()) => Some((None, rest.chars().next().map_or(1, char::len_utf8))),
    }
}

#[cfg(test)]
mod tests;
