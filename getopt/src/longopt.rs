//! Long-option descriptors and the long-option matcher.

use std::sync::atomic::{AtomicI32, Ordering};

use log::debug;

use crate::optspec::{mask_index, OptSpec};
use crate::parser::Outcome;
use crate::state::OptState;

/// Argument arity of a long option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasArg {
    /// The option takes no argument; `--name=value` does not match it.
    No,
    /// The option requires an argument, inline (`--name=value`) or in the
    /// following element (`--name value`).
    Required,
    /// The argument is optional and only ever taken from an inline
    /// `=value`; the following element is never consumed.
    Optional,
}

/// One entry of a long-option table.
///
/// Tables are read-only during a parse and may be shared between threads;
/// flag targets are atomics so a shared table stays `Sync`.
pub struct LongOpt<'a> {
    /// Option name, without the leading dashes.
    pub name: &'a str,
    pub has_arg: HasArg,
    /// When set, a match stores `val` here and the parser reports a flag
    /// token (return code 0) instead of `val` itself.
    pub flag: Option<&'a AtomicI32>,
    /// Value identifying the option, conventionally its short-form
    /// character.
    pub val: i32,
}

impl<'a> LongOpt<'a> {
    /// An entry reporting `val` when matched.
    pub fn new(name: &'a str, has_arg: HasArg, val: i32) -> Self {
        LongOpt {
            name,
            has_arg,
            flag: None,
            val,
        }
    }

    /// An argument-less entry that stores `val` into `flag` when matched.
    pub fn flag(name: &'a str, flag: &'a AtomicI32, val: i32) -> Self {
        LongOpt {
            name,
            has_arg: HasArg::No,
            flag: Some(flag),
            val,
        }
    }

    /// The conventional all-zero sentinel; table scanning stops here even
    /// if more entries follow.
    pub fn end() -> Self {
        LongOpt {
            name: "",
            has_arg: HasArg::No,
            flag: None,
            val: 0,
        }
    }

    fn is_terminator(&self) -> bool {
        self.name.is_empty() && self.has_arg == HasArg::No && self.flag.is_none() && self.val == 0
    }
}

/// Outcome of offering an argument-vector element to the long matcher.
pub(crate) enum LongMatch {
    /// The element was consumed as a long option (or rejected with a
    /// definite long-option error).
    Done(Outcome),
    /// Not a long option; the caller falls back to short-option scanning.
    NotLong,
}

/// Try to parse `argv[idx]` as a long option against `longopts`.
///
/// `--name` is always a long-option candidate. A single-dash `-name` is
/// one only under `longonly`, and falls back to short scanning when no
/// table entry matches. Entries match in declaration order: the candidate
/// must begin with the full entry name, followed by nothing or by `=`
/// (and for [`HasArg::No`] by nothing at all).
pub(crate) fn match_long<'a>(
    argv: &[&'a str],
    idx: usize,
    spec: &OptSpec,
    longopts: &[LongOpt<'_>],
    longonly: bool,
    state: &mut OptState<'a>,
) -> LongMatch {
    let arg = argv[idx];
    let definite = arg.starts_with("--");
    let candidate = if let Some(rest) = arg.strip_prefix("--") {
        rest
    } else if longonly {
        match arg.strip_prefix('-') {
            Some(rest) => rest,
            None => return LongMatch::NotLong,
        }
    } else {
        return LongMatch::NotLong;
    };

    for (n, opt) in longopts.iter().enumerate() {
        if opt.is_terminator() {
            break;
        }
        let Some(rest) = candidate.strip_prefix(opt.name) else {
            continue;
        };
        let shape_ok = match opt.has_arg {
            HasArg::No => rest.is_empty(),
            HasArg::Required | HasArg::Optional => rest.is_empty() || rest.starts_with('='),
        };
        if !shape_ok {
            continue;
        }
        debug!("matched long option --{} (table index {})", opt.name, n);
        return LongMatch::Done(take_argument(argv, idx, spec, opt, n, rest, state));
    }

    if definite {
        debug!("unknown long option {:?}", arg);
        state.optopt = 0;
        return LongMatch::Done(Outcome::Unknown(0));
    }
    LongMatch::NotLong
}

/// Finish a table match: cross-check arity against the short-form
/// counterpart, extract the argument, advance the cursor.
fn take_argument<'a>(
    argv: &[&'a str],
    idx: usize,
    spec: &OptSpec,
    opt: &LongOpt<'_>,
    table_index: usize,
    rest: &'a str,
    state: &mut OptState<'a>,
) -> Outcome {
    let colon = spec.colon_mode();

    // A long option whose value doubles as a short option character must
    // agree with the option-string about taking an argument.
    let short = char::from_u32(opt.val as u32).filter(|c| mask_index(*c).is_some());
    let conflict = match opt.has_arg {
        HasArg::No => short.is_some_and(|c| spec.wants_arg(c)),
        HasArg::Required | HasArg::Optional => short.is_some_and(|c| !spec.wants_arg(c)),
    };
    if conflict {
        debug!("long option --{} disagrees with the option-string arity", opt.name);
        state.optopt = opt.val;
        return Outcome::MissingArg {
            opt: opt.val,
            colon,
        };
    }

    match opt.has_arg {
        HasArg::No => {
            state.optind = idx + 1;
        }
        HasArg::Required => {
            if let Some(value) = rest.strip_prefix('=') {
                if value.is_empty() {
                    debug!("missing argument for long option --{}", opt.name);
                    state.optopt = opt.val;
                    return Outcome::MissingArg {
                        opt: opt.val,
                        colon,
                    };
                }
                state.optarg = Some(value);
                state.optind = idx + 1;
            } else if idx + 1 < argv.len() {
                state.optarg = Some(argv[idx + 1]);
                state.optind = idx + 2;
            } else {
                debug!("missing argument for long option --{}", opt.name);
                state.optopt = opt.val;
                return Outcome::MissingArg {
                    opt: opt.val,
                    colon,
                };
            }
        }
        HasArg::Optional => {
            if let Some(value) = rest.strip_prefix('=') {
                state.optarg = Some(value);
            }
            state.optind = idx + 1;
        }
    }

    state.longindex = Some(table_index);
    if let Some(flag) = opt.flag {
        flag.store(opt.val, Ordering::Relaxed);
        state.optopt = 0;
        return Outcome::FlagSet;
    }
    state.optopt = opt.val;
    Outcome::Matched(opt.val)
}
