//! Keyword resolution for the code grammar.
//!
//! Length-bucketed lookup: keywords range from 2 to 10 bytes and all start
//! with a lowercase ASCII letter, so most identifiers are rejected before
//! any string comparison.

use razor_ir::Keyword;

/// Look up a keyword by text.
///
/// Returns `None` for ordinary identifiers, including contextual words the
/// grammar does not react to (`var`, `nameof`, ...).
#[inline]
pub fn lookup(text: &str) -> Option<Keyword> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    if !(2..=10).contains(&len) || !bytes[0].is_ascii_lowercase() {
        return None;
    }

    match len {
        2 => match text {
            "as" => Some(Keyword::As),
            "do" => Some(Keyword::Do),
            "if" => Some(Keyword::If),
            "in" => Some(Keyword::In),
            "is" => Some(Keyword::Is),
            _ => None,
        },
        3 => match text {
            "for" => Some(Keyword::For),
            "int" => Some(Keyword::Int),
            "new" => Some(Keyword::New),
            "out" => Some(Keyword::Out),
            "ref" => Some(Keyword::Ref),
            "try" => Some(Keyword::Try),
            _ => None,
        },
        4 => match text {
            "base" => Some(Keyword::Base),
            "bool" => Some(Keyword::Bool),
            "byte" => Some(Keyword::Byte),
            "case" => Some(Keyword::Case),
            "char" => Some(Keyword::Char),
            "else" => Some(Keyword::Else),
            "enum" => Some(Keyword::Enum),
            "goto" => Some(Keyword::Goto),
            "lock" => Some(Keyword::Lock),
            "long" => Some(Keyword::Long),
            "null" => Some(Keyword::Null),
            "this" => Some(Keyword::This),
            "true" => Some(Keyword::True),
            "uint" => Some(Keyword::Uint),
            "void" => Some(Keyword::Void),
            "when" => Some(Keyword::When),
            _ => None,
        },
        5 => match text {
            "await" => Some(Keyword::Await),
            "break" => Some(Keyword::Break),
            "catch" => Some(Keyword::Catch),
            "class" => Some(Keyword::Class),
            "const" => Some(Keyword::Const),
            "event" => Some(Keyword::Event),
            "false" => Some(Keyword::False),
            "fixed" => Some(Keyword::Fixed),
            "float" => Some(Keyword::Float),
            "sbyte" => Some(Keyword::Sbyte),
            "short" => Some(Keyword::Short),
            "throw" => Some(Keyword::Throw),
            "ulong" => Some(Keyword::Ulong),
            "using" => Some(Keyword::Using),
            "where" => Some(Keyword::Where),
            "while" => Some(Keyword::While),
            _ => None,
        },
        6 => match text {
            "double" => Some(Keyword::Double),
            "extern" => Some(Keyword::Extern),
            "object" => Some(Keyword::Object),
            "params" => Some(Keyword::Params),
            "public" => Some(Keyword::Public),
            "return" => Some(Keyword::Return),
            "sealed" => Some(Keyword::Sealed),
            "sizeof" => Some(Keyword::Sizeof),
            "static" => Some(Keyword::Static),
            "string" => Some(Keyword::String),
            "struct" => Some(Keyword::Struct),
            "switch" => Some(Keyword::Switch),
            "typeof" => Some(Keyword::Typeof),
            "unsafe" => Some(Keyword::Unsafe),
            "ushort" => Some(Keyword::Ushort),
            _ => None,
        },
        7 => match text {
            "checked" => Some(Keyword::Checked),
            "decimal" => Some(Keyword::Decimal),
            "default" => Some(Keyword::Default),
            "finally" => Some(Keyword::Finally),
            "foreach" => Some(Keyword::Foreach),
            "private" => Some(Keyword::Private),
            "virtual" => Some(Keyword::Virtual),
            _ => None,
        },
        8 => match text {
            "abstract" => Some(Keyword::Abstract),
            "continue" => Some(Keyword::Continue),
            "delegate" => Some(Keyword::Delegate),
            "explicit" => Some(Keyword::Explicit),
            "implicit" => Some(Keyword::Implicit),
            "internal" => Some(Keyword::Internal),
            "operator" => Some(Keyword::Operator),
            "override" => Some(Keyword::Override),
            "readonly" => Some(Keyword::Readonly),
            "volatile" => Some(Keyword::Volatile),
            _ => None,
        },
        9 => match text {
            "interface" => Some(Keyword::Interface),
            "namespace" => Some(Keyword::Namespace),
            "protected" => Some(Keyword::Protected),
            "unchecked" => Some(Keyword::Unchecked),
            _ => None,
        },
        10 => match text {
            "stackalloc" => Some(Keyword::Stackalloc),
            _ => None,
        },
        _ => None,
    }
}
