//! Bracket token families recognized in node declarations
//!
//! Each family is a matched open/close pair with a Mermaid node shape.
//! Several open tokens are prefixes of others (`(` of `((`, `[` of `[[`
//! and `[(`, `{` of `{{`), so lookups walk [`TokenFamily::ALL`] in order
//! and the first family whose open token matches wins.

use std::fmt;

/// Node-shape bracket pairs matching Mermaid.js syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenFamily {
    /// Circle: `A((label))`
    Circle,
    /// Cylinder (database): `A[(label)]`
    Cylinder,
    /// Subroutine: `A[[label]]`
    Subroutine,
    /// Hexagon: `A{{label}}`
    Hexagon,
    /// Rectangle: `A[label]`
    Rectangle,
    /// Rounded rectangle: `A(label)`
    Rounded,
    /// Diamond (decision): `A{label}`
    Diamond,
}

impl TokenFamily {
    /// All families in match precedence order.
    ///
    /// Two-character open tokens come before the one-character tokens they
    /// start with; within a length the order is the table order.
    pub const ALL: [TokenFamily; 7] = [
        TokenFamily::Circle,
        TokenFamily::Cylinder,
        TokenFamily::Subroutine,
        TokenFamily::Hexagon,
        TokenFamily::Rectangle,
        TokenFamily::Rounded,
        TokenFamily::Diamond,
    ];

    pub fn open(self) -> &'static str {
        match self {
            TokenFamily::Circle => "((",
            TokenFamily::Cylinder => "[(",
            TokenFamily::Subroutine => "[[",
            TokenFamily::Hexagon => "{{",
            TokenFamily::Rectangle => "[",
            TokenFamily::Rounded => "(",
            TokenFamily::Diamond => "{",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            TokenFamily::Circle => "))",
            TokenFamily::Cylinder => ")]",
            TokenFamily::Subroutine => "]]",
            TokenFamily::Hexagon => "}}",
            TokenFamily::Rectangle => "]",
            TokenFamily::Rounded => ")",
            TokenFamily::Diamond => "}",
        }
    }

    /// Length of the open token in characters
    pub fn open_len(self) -> usize {
        self.open().len()
    }

    /// Length of the close token in characters
    pub fn close_len(self) -> usize {
        self.close().len()
    }

    /// Returns true if the open token starts at `at`
    pub fn opens_at(self, chars: &[char], at: usize) -> bool {
        token_at(chars, at, self.open())
    }

    /// Returns true if the close token starts at `at`
    pub fn closes_at(self, chars: &[char], at: usize) -> bool {
        token_at(chars, at, self.close())
    }

    /// Find the family whose open token starts at `at`, longest match first
    pub fn match_open(chars: &[char], at: usize) -> Option<TokenFamily> {
        Self::ALL
            .iter()
            .copied()
            .find(|family| family.opens_at(chars, at))
    }

    /// Returns true if `c` can begin any open token
    pub fn is_open_char(c: char) -> bool {
        matches!(c, '[' | '(' | '{')
    }
}

impl fmt::Display for TokenFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenFamily::Circle => write!(f, "circle"),
            TokenFamily::Cylinder => write!(f, "cylinder"),
            TokenFamily::Subroutine => write!(f, "subroutine"),
            TokenFamily::Hexagon => write!(f, "hexagon"),
            TokenFamily::Rectangle => write!(f, "rectangle"),
            TokenFamily::Rounded => write!(f, "rounded"),
            TokenFamily::Diamond => write!(f, "diamond"),
        }
    }
}

// Tokens are ASCII, so byte length equals character length.
fn token_at(chars: &[char], at: usize, token: &str) -> bool {
    let len = token.len();
    at + len <= chars.len() && token.chars().zip(&chars[at..at + len]).all(|(t, c)| t == *c)
}
