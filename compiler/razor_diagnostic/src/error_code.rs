//! Stable diagnostic identifiers.
//!
//! Consumers (editors, code generators) key off the id and span only; the
//! message text may change between releases.

use std::fmt;

/// Diagnostic ids.
///
/// Ranges by category:
/// - RZ10xx: lexical
/// - RZ11xx: structural
/// - RZ12xx: directive shape
/// - RZ13xx: policy
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexical (RZ10xx)
    /// `"` literal not closed before end of line.
    UnterminatedStringLiteral,
    /// `'` literal not closed before end of line.
    UnterminatedCharacterLiteral,
    /// `/*` without `*/`.
    BlockCommentNotTerminated,
    /// `@*` without `*@`.
    RazorCommentNotTerminated,

    // Structural (RZ11xx)
    /// `@` at end of file.
    UnexpectedEndOfFileAtStartOfCodeBlock,
    /// `@` followed by whitespace.
    UnexpectedWhiteSpaceAtStartOfCodeBlock,
    /// `@` followed by a character that cannot start code.
    UnexpectedCharacterAtStartOfCodeBlock,
    /// Block opened with `{` never closed.
    ExpectedEndOfBlockBeforeEof,
    /// Bracket pair never closed.
    ExpectedCloseBracketBeforeEof,
    /// Control keyword without its required `(`.
    ExpectedOpenParenAfterKeyword,
    /// Single-statement control-flow body containing markup.
    SingleLineControlFlowStatementsCannotContainMarkup,
    /// `@keyword` inside a code block.
    UnexpectedKeywordAfterAt,
    /// `@{` inside a code block.
    UnexpectedNestedCodeBlock,
    /// `else`/`catch`/`finally` without its opening block.
    UnexpectedContinuationKeyword,
    /// Element without an end tag.
    MissingEndTag,
    /// End tag without a start tag.
    UnexpectedEndTag,
    /// `<text>` tag with attributes.
    TextTagCannotContainAttributes,

    // Directive shape (RZ12xx)
    DuplicateDirective,
    DirectiveExpectsTypeName,
    DirectiveExpectsNamespace,
    DirectiveExpectsIdentifier,
    DirectiveExpectsQuotedStringLiteral,
    DirectiveExpectsBooleanLiteral,
    DirectiveExpectsCSharpAttribute,
    DirectiveExpectsGenericTypeConstraint,
    DirectiveExpectsIdentifierOrExpression,
    DirectiveTokensMustBeSeparatedByWhitespace,
    /// Unexpected content after a directive's arguments.
    UnexpectedDirectiveLiteral,
    /// End of file where a directive body was expected.
    UnexpectedEofAfterDirective,

    // Policy (RZ13xx)
    /// `@class`, `@namespace`, ...
    ReservedWord,
    DirectiveNotAllowedInAttribute,
    SectionsCannotBeNested,
    /// File-scoped directive inside a code block.
    DirectiveMustAppearAtTopLevel,
}

impl ErrorCode {
    /// All error codes, in id order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::UnterminatedStringLiteral,
        ErrorCode::UnterminatedCharacterLiteral,
        ErrorCode::BlockCommentNotTerminated,
        ErrorCode::RazorCommentNotTerminated,
        ErrorCode::UnexpectedEndOfFileAtStartOfCodeBlock,
        ErrorCode::UnexpectedWhiteSpaceAtStartOfCodeBlock,
        ErrorCode::UnexpectedCharacterAtStartOfCodeBlock,
        ErrorCode::ExpectedEndOfBlockBeforeEof,
        ErrorCode::ExpectedCloseBracketBeforeEof,
        ErrorCode::ExpectedOpenParenAfterKeyword,
        ErrorCode::SingleLineControlFlowStatementsCannotContainMarkup,
        ErrorCode::UnexpectedKeywordAfterAt,
        ErrorCode::UnexpectedNestedCodeBlock,
        ErrorCode::UnexpectedContinuationKeyword,
        ErrorCode::MissingEndTag,
        ErrorCode::UnexpectedEndTag,
        ErrorCode::TextTagCannotContainAttributes,
        ErrorCode::DuplicateDirective,
        ErrorCode::DirectiveExpectsTypeName,
        ErrorCode::DirectiveExpectsNamespace,
        ErrorCode::DirectiveExpectsIdentifier,
        ErrorCode::DirectiveExpectsQuotedStringLiteral,
        ErrorCode::DirectiveExpectsBooleanLiteral,
        ErrorCode::DirectiveExpectsCSharpAttribute,
        ErrorCode::DirectiveExpectsGenericTypeConstraint,
        ErrorCode::DirectiveExpectsIdentifierOrExpression,
        ErrorCode::DirectiveTokensMustBeSeparatedByWhitespace,
        ErrorCode::UnexpectedDirectiveLiteral,
        ErrorCode::UnexpectedEofAfterDirective,
        ErrorCode::ReservedWord,
        ErrorCode::DirectiveNotAllowedInAttribute,
        ErrorCode::SectionsCannotBeNested,
        ErrorCode::DirectiveMustAppearAtTopLevel,
    ];

    /// Stable id (e.g. `"RZ1107"`).
    pub const fn id(self) -> &'static str {
        match self {
            ErrorCode::UnterminatedStringLiteral => "RZ1000",
            ErrorCode::UnterminatedCharacterLiteral => "RZ1001",
            ErrorCode::BlockCommentNotTerminated => "RZ1002",
            ErrorCode::RazorCommentNotTerminated => "RZ1003",
            ErrorCode::UnexpectedEndOfFileAtStartOfCodeBlock => "RZ1100",
            ErrorCode::UnexpectedWhiteSpaceAtStartOfCodeBlock => "RZ1101",
            ErrorCode::UnexpectedCharacterAtStartOfCodeBlock => "RZ1102",
            ErrorCode::ExpectedEndOfBlockBeforeEof => "RZ1103",
            ErrorCode::ExpectedCloseBracketBeforeEof => "RZ1104",
            ErrorCode::ExpectedOpenParenAfterKeyword => "RZ1105",
            ErrorCode::SingleLineControlFlowStatementsCannotContainMarkup => "RZ1106",
            ErrorCode::UnexpectedKeywordAfterAt => "RZ1107",
            ErrorCode::UnexpectedNestedCodeBlock => "RZ1108",
            ErrorCode::UnexpectedContinuationKeyword => "RZ1109",
            ErrorCode::MissingEndTag => "RZ1110",
            ErrorCode::UnexpectedEndTag => "RZ1111",
            ErrorCode::TextTagCannotContainAttributes => "RZ1112",
            ErrorCode::DuplicateDirective => "RZ1200",
            ErrorCode::DirectiveExpectsTypeName => "RZ1201",
            ErrorCode::DirectiveExpectsNamespace => "RZ1202",
            ErrorCode::DirectiveExpectsIdentifier => "RZ1203",
            ErrorCode::DirectiveExpectsQuotedStringLiteral => "RZ1204",
            ErrorCode::DirectiveExpectsBooleanLiteral => "RZ1205",
            ErrorCode::DirectiveExpectsCSharpAttribute => "RZ1206",
            ErrorCode::DirectiveExpectsGenericTypeConstraint => "RZ1207",
            ErrorCode::DirectiveExpectsIdentifierOrExpression => "RZ1208",
            ErrorCode::DirectiveTokensMustBeSeparatedByWhitespace => "RZ1209",
            ErrorCode::UnexpectedDirectiveLiteral => "RZ1210",
            ErrorCode::UnexpectedEofAfterDirective => "RZ1211",
            ErrorCode::ReservedWord => "RZ1300",
            ErrorCode::DirectiveNotAllowedInAttribute => "RZ1301",
            ErrorCode::SectionsCannotBeNested => "RZ1302",
            ErrorCode::DirectiveMustAppearAtTopLevel => "RZ1303",
        }
    }

    /// Message template; `{0}`, `{1}`, ... are replaced by diagnostic arguments.
    pub const fn template(self) -> &'static str {
        match self {
            ErrorCode::UnterminatedStringLiteral => {
                "Unterminated string literal. Strings that start with a quotation mark (\") must be terminated before the end of the line."
            }
            ErrorCode::UnterminatedCharacterLiteral => "Unterminated character literal.",
            ErrorCode::BlockCommentNotTerminated => "End of file was reached before the end of the block comment.",
            ErrorCode::RazorCommentNotTerminated => "End of file was reached before the end of the Razor comment.",
            ErrorCode::UnexpectedEndOfFileAtStartOfCodeBlock => {
                "End-of-file was found after the \"@\" character. \"@\" must be followed by a valid code block."
            }
            ErrorCode::UnexpectedWhiteSpaceAtStartOfCodeBlock => {
                "A space or line break was encountered after the \"@\" character. Only valid identifiers, keywords, comments, \"(\" and \"{\" are valid at the start of a code block."
            }
            ErrorCode::UnexpectedCharacterAtStartOfCodeBlock => {
                "\"{0}\" is not valid at the start of a code block. Only identifiers, keywords, comments, \"(\" and \"{\" are valid."
            }
            ErrorCode::ExpectedEndOfBlockBeforeEof => {
                "The {0} block is missing a closing \"}\" character. Make sure you have a matching \"}\" character for all the \"{\" characters within this block."
            }
            ErrorCode::ExpectedCloseBracketBeforeEof => {
                "An opening \"{0}\" is missing the corresponding closing \"{1}\"."
            }
            ErrorCode::ExpectedOpenParenAfterKeyword => "Expected a \"(\" after the \"{0}\" keyword.",
            ErrorCode::SingleLineControlFlowStatementsCannotContainMarkup => {
                "Single-statement control-flow statements in Razor documents should not contain markup. Markup should be enclosed in \"{\" and \"}\"."
            }
            ErrorCode::UnexpectedKeywordAfterAt => {
                "Unexpected \"{0}\" keyword after \"@\" character. Once inside code, you do not need to prefix constructs like \"{0}\" with \"@\"."
            }
            ErrorCode::UnexpectedNestedCodeBlock => {
                "Unexpected \"{\" after \"@\" character. Once inside the body of a code block you do not need to use \"@{\" to switch to code."
            }
            ErrorCode::UnexpectedContinuationKeyword => {
                "\"{0}\" cannot be used without the block it continues."
            }
            ErrorCode::MissingEndTag => "The \"{0}\" element was not closed. All elements must be either self-closing or have a matching end tag.",
            ErrorCode::UnexpectedEndTag => "Encountered end tag \"{0}\" with no matching start tag.",
            ErrorCode::TextTagCannotContainAttributes => "\"<text>\" and \"</text>\" tags cannot contain attributes.",
            ErrorCode::DuplicateDirective => "The \"{0}\" directive may only occur once per document.",
            ErrorCode::DirectiveExpectsTypeName => "The \"{0}\" directive expects a type name.",
            ErrorCode::DirectiveExpectsNamespace => "The \"{0}\" directive expects a namespace name.",
            ErrorCode::DirectiveExpectsIdentifier => "The \"{0}\" directive expects an identifier.",
            ErrorCode::DirectiveExpectsQuotedStringLiteral => "The \"{0}\" directive expects a string surrounded by double quotes.",
            ErrorCode::DirectiveExpectsBooleanLiteral => "The \"{0}\" directive expects a boolean literal.",
            ErrorCode::DirectiveExpectsCSharpAttribute => "The \"{0}\" directive expects an attribute list enclosed in \"[\" and \"]\".",
            ErrorCode::DirectiveExpectsGenericTypeConstraint => "The \"{0}\" directive expects a generic type constraint clause.",
            ErrorCode::DirectiveExpectsIdentifierOrExpression => "The \"{0}\" directive expects an identifier or explicit expression.",
            ErrorCode::DirectiveTokensMustBeSeparatedByWhitespace => "The \"{0}\" directive must have its tokens separated by whitespace.",
            ErrorCode::UnexpectedDirectiveLiteral => "Unexpected literal following the \"{0}\" directive. Expected \"{1}\".",
            ErrorCode::UnexpectedEofAfterDirective => "Unexpected end of file following the \"{0}\" directive. Expected \"{1}\".",
            ErrorCode::ReservedWord => "\"{0}\" is a reserved word and cannot be used in implicit expressions. An explicit expression (\"@()\") must be used.",
            ErrorCode::DirectiveNotAllowedInAttribute => "The \"{0}\" directive cannot appear inside an attribute value.",
            ErrorCode::SectionsCannotBeNested => "Section blocks (\"@section Header { ... }\") cannot be nested. Only one level of section blocks is allowed.",
            ErrorCode::DirectiveMustAppearAtTopLevel => "The \"{0}\" directive must appear at the start of the line and outside of any code block.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests;
