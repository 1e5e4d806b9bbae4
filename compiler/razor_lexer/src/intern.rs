//! Static bodies for short, frequent tokens.
//!
//! Punctuation, single spaces and newlines make up most tokens in a
//! template. Borrowing their text from this table avoids an allocation per
//! token.

use std::borrow::Cow;

use razor_ir::TokenText;

/// Sorted by byte value so lookup can binary search.
static SHORT_TEXTS: &[&str] = &[
    "\t",
    "\n",
    "\r",
    "\r\n",
    " ",
    "  ",
    "   ",
    "!",
    "!=",
    "\"",
    "#",
    "%",
    "%=",
    "&",
    "&&",
    "&=",
    "'",
    "(",
    ")",
    "*",
    "*=",
    "+",
    "++",
    "+=",
    ",",
    "-",
    "--",
    "-=",
    "->",
    ".",
    "..",
    "/",
    "/=",
    ":",
    "::",
    ";",
    "<",
    "<<",
    "<<=",
    "<=",
    "=",
    "==",
    "=>",
    ">",
    ">=",
    "?",
    "??",
    "??=",
    "@",
    "[",
    "]",
    "^",
    "^=",
    "{",
    "|",
    "|=",
    "||",
    "}",
    "~",
];

/// Text for a token body, borrowed from the static table when possible.
#[inline]
pub fn intern(text: &str) -> TokenText {
    if text.len() <= 3 {
        if let Ok(index) = SHORT_TEXTS.binary_search(&text) {
            return Cow::Borrowed(SHORT_TEXTS[index]);
        }
    }
    Cow::Owned(text.to_owned())
}
