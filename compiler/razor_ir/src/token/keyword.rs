//! Keywords of the embedded code grammar.

use std::fmt;

/// Reserved and contextual keywords the code grammar distinguishes.
///
/// Contextual keywords (`await`, `when`, `where`) are included because the
/// parser reacts to them; other contextual words (`var`, `nameof`, ...)
/// stay plain identifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Abstract,
    As,
    Await,
    Base,
    Bool,
    Break,
    Byte,
    Case,
    Catch,
    Char,
    Checked,
    Class,
    Const,
    Continue,
    Decimal,
    Default,
    Delegate,
    Do,
    Double,
    Else,
    Enum,
    Event,
    Explicit,
    Extern,
    False,
    Finally,
    Fixed,
    Float,
    For,
    Foreach,
    Goto,
    If,
    Implicit,
    In,
    Int,
    Interface,
    Internal,
    Is,
    Lock,
    Long,
    Namespace,
    New,
    Null,
    Object,
    Operator,
    Out,
    Override,
    Params,
    Private,
    Protected,
    Public,
    Readonly,
    Ref,
    Return,
    Sbyte,
    Sealed,
    Short,
    Sizeof,
    Stackalloc,
    Static,
    String,
    Struct,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Uint,
    Ulong,
    Unchecked,
    Unsafe,
    Ushort,
    Using,
    Virtual,
    Void,
    Volatile,
    When,
    Where,
    While,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: &'static [Keyword] = &[
        Keyword::Abstract,
        Keyword::As,
        Keyword::Await,
        Keyword::Base,
        Keyword::Bool,
        Keyword::Break,
        Keyword::Byte,
        Keyword::Case,
        Keyword::Catch,
        Keyword::Char,
        Keyword::Checked,
        Keyword::Class,
        Keyword::Const,
        Keyword::Continue,
        Keyword::Decimal,
        Keyword::Default,
        Keyword::Delegate,
        Keyword::Do,
        Keyword::Double,
        Keyword::Else,
        Keyword::Enum,
        Keyword::Event,
        Keyword::Explicit,
        Keyword::Extern,
        Keyword::False,
        Keyword::Finally,
        Keyword::Fixed,
        Keyword::Float,
        Keyword::For,
        Keyword::Foreach,
        Keyword::Goto,
        Keyword::If,
        Keyword::Implicit,
        Keyword::In,
        Keyword::Int,
        Keyword::Interface,
        Keyword::Internal,
        Keyword::Is,
        Keyword::Lock,
        Keyword::Long,
        Keyword::Namespace,
        Keyword::New,
        Keyword::Null,
        Keyword::Object,
        Keyword::Operator,
        Keyword::Out,
        Keyword::Override,
        Keyword::Params,
        Keyword::Private,
        Keyword::Protected,
        Keyword::Public,
        Keyword::Readonly,
        Keyword::Ref,
        Keyword::Return,
        Keyword::Sbyte,
        Keyword::Sealed,
        Keyword::Short,
        Keyword::Sizeof,
        Keyword::Stackalloc,
        Keyword::Static,
        Keyword::String,
        Keyword::Struct,
        Keyword::Switch,
        Keyword::This,
        Keyword::Throw,
        Keyword::True,
        Keyword::Try,
        Keyword::Typeof,
        Keyword::Uint,
        Keyword::Ulong,
        Keyword::Unchecked,
        Keyword::Unsafe,
        Keyword::Ushort,
        Keyword::Using,
        Keyword::Virtual,
        Keyword::Void,
        Keyword::Volatile,
        Keyword::When,
        Keyword::Where,
        Keyword::While,
    ];

    /// Source spelling of the keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Abstract => "abstract",
            Keyword::As => "as",
            Keyword::Await => "await",
            Keyword::Base => "base",
            Keyword::Bool => "bool",
            Keyword::Break => "break",
            Keyword::Byte => "byte",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Char => "char",
            Keyword::Checked => "checked",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Decimal => "decimal",
            Keyword::Default => "default",
            Keyword::Delegate => "delegate",
            Keyword::Do => "do",
            Keyword::Double => "double",
            Keyword::Else => "else",
            Keyword::Enum => "enum",
            Keyword::Event => "event",
            Keyword::Explicit => "explicit",
            Keyword::Extern => "extern",
            Keyword::False => "false",
            Keyword::Finally => "finally",
            Keyword::Fixed => "fixed",
            Keyword::Float => "float",
            Keyword::For => "for",
            Keyword::Foreach => "foreach",
            Keyword::Goto => "goto",
            Keyword::If => "if",
            Keyword::Implicit => "implicit",
            Keyword::In => "in",
            Keyword::Int => "int",
            Keyword::Interface => "interface",
            Keyword::Internal => "internal",
            Keyword::Is => "is",
            Keyword::Lock => "lock",
            Keyword::Long => "long",
            Keyword::Namespace => "namespace",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Object => "object",
            Keyword::Operator => "operator",
            Keyword::Out => "out",
            Keyword::Override => "override",
            Keyword::Params => "params",
            Keyword::Private => "private",
            Keyword::Protected => "protected",
            Keyword::Public => "public",
            Keyword::Readonly => "readonly",
            Keyword::Ref => "ref",
            Keyword::Return => "return",
            Keyword::Sbyte => "sbyte",
            Keyword::Sealed => "sealed",
            Keyword::Short => "short",
            Keyword::Sizeof => "sizeof",
            Keyword::Stackalloc => "stackalloc",
            Keyword::Static => "static",
            Keyword::String => "string",
            Keyword::Struct => "struct",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Uint => "uint",
            Keyword::Ulong => "ulong",
            Keyword::Unchecked => "unchecked",
            Keyword::Unsafe => "unsafe",
            Keyword::Ushort => "ushort",
            Keyword::Using => "using",
            Keyword::Virtual => "virtual",
            Keyword::Void => "void",
            Keyword::Volatile => "volatile",
            Keyword::When => "when",
            Keyword::Where => "where",
            Keyword::While => "while",
        }
    }

    /// Keywords that open a control-flow block after a transition
    /// (`@if`, `@foreach`, ...).
    pub const fn is_control_flow(self) -> bool {
        matches!(
            self,
            Keyword::If
                | Keyword::For
                | Keyword::Foreach
                | Keyword::While
                | Keyword::Switch
                | Keyword::Lock
                | Keyword::Try
                | Keyword::Do
                | Keyword::Using
        )
    }

    /// Keywords that continue a previous block (`else`, `catch`, `finally`)
    /// and are not valid on their own.
    pub const fn is_continuation(self) -> bool {
        matches!(self, Keyword::Else | Keyword::Catch | Keyword::Finally)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
