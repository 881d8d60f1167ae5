//! The reentrant parsing core: one token per call.
//!
//! Everything mutable lives in the caller's [`OptState`], so any number of
//! parses may run concurrently over unrelated argument vectors. Each call
//! classifies exactly one thing: an option character out of a cluster, a
//! whole long option, or a terminal condition.

use log::{debug, trace};

use crate::longopt::{match_long, LongMatch, LongOpt};
use crate::optspec::OptSpec;
use crate::state::{OptState, SCAN_DONE};

/// Result of one parse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A matched option, with its argument if it took one.
    Opt { opt: char, arg: Option<&'a str> },
    /// A long option with a flag target; the declared value was stored
    /// into the target.
    Flag,
    /// An undeclared option character or long name (classic code `?`).
    Unknown(char),
    /// A declared option whose required argument is missing (classic code
    /// `:` in colon mode, `?` otherwise).
    MissingArg(char),
    /// No more options: the vector is exhausted, an operand was reached,
    /// or `--` was consumed. Operands start at `optind`.
    End,
}

/// Internal outcome, still carrying integer option values and the
/// colon-mode decision so both public surfaces derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Matched(i32),
    FlagSet,
    Unknown(i32),
    MissingArg { opt: i32, colon: bool },
    End,
}

impl Outcome {
    fn code(self) -> i32 {
        match self {
            Outcome::Matched(v) => v,
            Outcome::FlagSet => 0,
            Outcome::Unknown(_) => '?' as i32,
            Outcome::MissingArg { colon: true, .. } => ':' as i32,
            Outcome::MissingArg { colon: false, .. } => '?' as i32,
            Outcome::End => -1,
        }
    }

    fn token<'a>(self, state: &OptState<'a>) -> Token<'a> {
        match self {
            Outcome::Matched(v) => Token::Opt {
                opt: value_char(v),
                arg: state.optarg,
            },
            Outcome::FlagSet => Token::Flag,
            Outcome::Unknown(v) => Token::Unknown(value_char(v)),
            Outcome::MissingArg { opt, .. } => Token::MissingArg(value_char(opt)),
            Outcome::End => Token::End,
        }
    }
}

/// Option values are integers by convention; anything that is not a valid
/// code point shows up as U+FFFD in the token view.
fn value_char(v: i32) -> char {
    u32::try_from(v)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn step<'a>(
    argv: &[&'a str],
    optstring: &str,
    longopts: Option<&[LongOpt<'_>]>,
    longonly: bool,
    state: &mut OptState<'a>,
) -> Outcome {
    if state.optind < 1 {
        state.rewind();
        trace!("cursor restarted");
    } else if state.optind != state.scan_index {
        // The cursor moved since the last call, by us or by the caller:
        // any saved mid-cluster offset belongs to a different element.
        state.scan_pos = 1;
        state.scan_index = state.optind;
        trace!("scan resynced to element {}", state.optind);
    } else if state.scan_pos == SCAN_DONE {
        // `--` was consumed and the cursor has not been repositioned.
        state.optarg = None;
        state.longindex = None;
        return Outcome::End;
    }
    state.optarg = None;
    state.longindex = None;

    let spec = OptSpec::compile(optstring);

    if state.optind >= argv.len() {
        trace!("argument vector exhausted at index {}", state.optind);
        return Outcome::End;
    }

    let i = state.optind;
    let arg = argv[i];

    if !arg.starts_with('-') || arg == "-" {
        // An operand; options never resume past it.
        debug!("stopping at operand {:?} (index {})", arg, i);
        return Outcome::End;
    }
    if arg == "--" {
        state.optind = i + 1;
        state.scan_index = state.optind;
        state.scan_pos = SCAN_DONE;
        debug!("end-of-options marker at index {}", i);
        return Outcome::End;
    }

    if let Some(table) = longopts {
        match match_long(argv, i, &spec, table, longonly, state) {
            LongMatch::Done(outcome) => return outcome,
            LongMatch::NotLong => {}
        }
    }

    // Short-option cluster scan, one character per call. The offset is
    // only trusted while it points inside the current element.
    let bytes = arg.as_bytes();
    if state.scan_pos < 1 || state.scan_pos >= bytes.len() {
        state.scan_pos = 1;
    }
    state.scan_index = i;

    let c = bytes[state.scan_pos] as char;
    state.optopt = c as i32;

    if !spec.is_known(c) {
        state.optind = i;
        debug!("unknown option -{}", c);
        return Outcome::Unknown(c as i32);
    }

    if spec.wants_arg(c) {
        return if state.scan_pos + 1 < bytes.len() {
            // Adjacent form: the remainder of this element is the value.
            state.optarg = Some(&arg[state.scan_pos + 1..]);
            state.optind = i + 1;
            debug!("option -{} with adjacent argument", c);
            Outcome::Matched(c as i32)
        } else if i + 1 < argv.len() {
            state.optarg = Some(argv[i + 1]);
            state.optind = i + 2;
            debug!("option -{} with separate argument", c);
            Outcome::Matched(c as i32)
        } else {
            state.optind = i;
            debug!("missing argument for option -{}", c);
            Outcome::MissingArg {
                opt: c as i32,
                colon: spec.colon_mode(),
            }
        };
    }

    if state.scan_pos + 1 < bytes.len() {
        // More characters in this cluster: stay on the element.
        state.scan_pos += 1;
        state.optind = i;
    } else {
        state.optind = i + 1;
        state.scan_pos = 0;
    }
    debug!("option -{}", c);
    Outcome::Matched(c as i32)
}

/// Parse one token from `argv`.
///
/// `argv[0]` is the program name and is never examined. `longopts` enables
/// long-option recognition; `longonly` additionally lets single-dash
/// elements match the table before falling back to short scanning.
///
/// The cursor is advanced in place; see [`OptState`] for how callers may
/// reposition or restart it between calls.
pub fn parse_next<'a>(
    argv: &[&'a str],
    optstring: &str,
    longopts: Option<&[LongOpt<'_>]>,
    longonly: bool,
    state: &mut OptState<'a>,
) -> Token<'a> {
    step(argv, optstring, longopts, longonly, state).token(state)
}

/// Classic-convention variant of [`parse_next`]: returns the matched
/// option value, `0` for a flag-setting long option, `-1` at the end of
/// options, `'?'` for an unknown option, and `':'` or `'?'` for a missing
/// argument depending on colon mode.
pub fn getopt_r<'a>(argv: &[&'a str], optstring: &str, state: &mut OptState<'a>) -> i32 {
    step(argv, optstring, None, false, state).code()
}

/// [`getopt_r`] with long-option recognition for `--name` elements.
pub fn getopt_long_r<'a>(
    argv: &[&'a str],
    optstring: &str,
    longopts: &[LongOpt<'_>],
    state: &mut OptState<'a>,
) -> i32 {
    step(argv, optstring, Some(longopts), false, state).code()
}

/// [`getopt_long_r`] that also offers single-dash elements to the long
/// table before short scanning.
pub fn getopt_long_only_r<'a>(
    argv: &[&'a str],
    optstring: &str,
    longopts: &[LongOpt<'_>],
    state: &mut OptState<'a>,
) -> i32 {
    step(argv, optstring, Some(longopts), true, state).code()
}
