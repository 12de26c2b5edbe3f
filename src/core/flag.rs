// src/core/flag.rs

//! The 3-character flag code stored for each menu item.
//!
//! | position | field     | codes                                   |
//! |----------|-----------|-----------------------------------------|
//! | 1        | attribute | `-` exec, `*` open next menu, `B` back  |
//! | 2        | after     | `-` continue, `*` end, `I` minimize     |
//! | 3        | hidden    | `*` hidden, `-` visible                 |
//!
//! Decoding is permissive: a missing or unrecognized character leaves that field
//! at the fallback value supplied by the caller. It never fails.

use crate::models::{ItemAfter, ItemAttribute};

/// The three item fields carried by a flag code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFlags {
    /// First position.
    pub attribute: ItemAttribute,
    /// Second position.
    pub after: ItemAfter,
    /// Third position.
    pub hidden: bool,
}

/// Encodes the three fields. The result is always three characters long.
pub fn encode(attribute: ItemAttribute, after: ItemAfter, hidden: bool) -> String {
    [
        attribute_code(attribute),
        after_code(after),
        hidden_code(hidden),
    ]
    .iter()
    .collect()
}

/// Decodes `code`, keeping the given values for positions it does not recognize.
pub fn decode(
    code: &str,
    attribute: ItemAttribute,
    after: ItemAfter,
    hidden: bool,
) -> DecodedFlags {
    let mut chars = code.chars();

    let attribute = match chars.next() {
        Some('-') => ItemAttribute::ExecApplication,
        Some('*') => ItemAttribute::OpenNextMenu,
        Some('B') => ItemAttribute::BackPrevMenu,
        _ => attribute,
    };
    let after = match chars.next() {
        Some('-') => ItemAfter::Continue,
        Some('*') => ItemAfter::End,
        Some('I') => ItemAfter::Minimize,
        _ => after,
    };
    let hidden = match chars.next() {
        Some('*') => true,
        Some('-') => false,
        _ => hidden,
    };

    DecodedFlags {
        attribute,
        after,
        hidden,
    }
}

/// True if `code` has three characters and each is recognized at its position.
pub fn is_valid(code: &str) -> bool {
    let chars: Vec<char> = code.chars().collect();
    matches!(
        chars.as_slice(),
        ['-' | '*' | 'B', '-' | '*' | 'I', '-' | '*']
    )
}

/// True if the fields encode to the default code `---`.
pub fn is_default(attribute: ItemAttribute, after: ItemAfter, hidden: bool) -> bool {
    attribute == ItemAttribute::ExecApplication && after == ItemAfter::Continue && !hidden
}

fn attribute_code(attribute: ItemAttribute) -> char {
    match attribute {
        ItemAttribute::ExecApplication => '-',
        ItemAttribute::OpenNextMenu => '*',
        ItemAttribute::BackPrevMenu => 'B',
    }
}

fn after_code(after: ItemAfter) -> char {
    match after {
        ItemAfter::Continue => '-',
        ItemAfter::End => '*',
        ItemAfter::Minimize => 'I',
    }
}

fn hidden_code(hidden: bool) -> char {
    if hidden { '*' } else { '-' }
}
