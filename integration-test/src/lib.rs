//! Shared helpers for the conformance suites.

use getopt::{parse_next, LongOpt, OptState, Token};

/// Upper bound on parse steps per scenario; a state-machine regression
/// must fail the test instead of hanging the suite.
pub const MAX_STEPS: usize = 16;

/// Drive a parse to the end of options, collecting every token produced.
///
/// Stops at the first error token as well, since an unknown option does
/// not advance the cursor and would otherwise repeat forever.
pub fn drain<'a>(
    argv: &[&'a str],
    optstring: &str,
    longopts: Option<&[LongOpt<'_>]>,
    longonly: bool,
    state: &mut OptState<'a>,
) -> Vec<Token<'a>> {
    let mut seen = Vec::new();
    for _ in 0..MAX_STEPS {
        match parse_next(argv, optstring, longopts, longonly, state) {
            Token::End => return seen,
            token @ (Token::Unknown(_) | Token::MissingArg(_)) => {
                seen.push(token);
                return seen;
            }
            token => seen.push(token),
        }
    }
    panic!("parse did not reach the end of options within {MAX_STEPS} steps");
}

/// Short-option convenience over [`drain`].
pub fn drain_short<'a>(
    argv: &[&'a str],
    optstring: &str,
    state: &mut OptState<'a>,
) -> Vec<Token<'a>> {
    drain(argv, optstring, None, false, state)
}
