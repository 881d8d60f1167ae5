//! Option-string compilation.
//!
//! A POSIX option-string such as `":ab:c"` declares the recognized short
//! option characters and which of them take an argument. Compilation is a
//! pure function of the string; the parser recompiles on every step so the
//! option-string may legitimately change between calls.

use log::trace;

/// Map an option character to its bit position in the 62-bit masks.
///
/// POSIX guideline 3 restricts option names to single alphanumeric
/// characters, so `a`-`z`, `A`-`Z` and `0`-`9` are the whole alphabet.
pub(crate) fn mask_index(c: char) -> Option<u32> {
    match c {
        'a'..='z' => Some(c as u32 - 'a' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 26),
        '0'..='9' => Some(c as u32 - '0' as u32 + 52),
        _ => None,
    }
}

/// A compiled option-string: membership and arity as bit masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptSpec {
    known: u64,
    wants_arg: u64,
    colon_mode: bool,
}

impl OptSpec {
    /// Compile `optstring` into bit masks.
    ///
    /// A leading `:` selects colon-mode error reporting. A leading `+` or
    /// `-` (the POSIXLY_CORRECT markers) is consumed and otherwise ignored;
    /// a colon after such a marker is not a mode switch. Characters outside
    /// `[A-Za-z0-9]` never register. The first declaration of a character
    /// wins; re-declarations and any colon following them are ignored.
    pub fn compile(optstring: &str) -> Self {
        let mut spec = OptSpec {
            known: 0,
            wants_arg: 0,
            colon_mode: false,
        };

        let mut rest = optstring;
        if let Some(r) = rest.strip_prefix(':') {
            spec.colon_mode = true;
            rest = r;
        } else if let Some(r) = rest.strip_prefix(['+', '-']) {
            rest = r;
        }

        let mut chars = rest.chars().peekable();
        while let Some(c) = chars.next() {
            let Some(idx) = mask_index(c) else {
                trace!("optstring: ignoring invalid character {:?}", c);
                continue;
            };
            if spec.known & (1 << idx) != 0 {
                trace!("optstring: -{} already registered", c);
                continue;
            }
            spec.known |= 1 << idx;
            if chars.peek() == Some(&':') {
                spec.wants_arg |= 1 << idx;
                chars.next();
            }
        }

        spec
    }

    /// Whether `c` is a declared option character.
    pub fn is_known(&self, c: char) -> bool {
        matches!(mask_index(c), Some(idx) if self.known & (1 << idx) != 0)
    }

    /// Whether `c` is declared to take an argument.
    pub fn wants_arg(&self, c: char) -> bool {
        matches!(mask_index(c), Some(idx) if self.wants_arg & (1 << idx) != 0)
    }

    /// Whether the option-string began with `:`, switching missing-argument
    /// reporting from `?` to `:`.
    pub fn colon_mode(&self) -> bool {
        self.colon_mode
    }
}
