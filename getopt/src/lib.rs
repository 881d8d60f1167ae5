//! Reentrant POSIX `getopt` for threaded hosts.
//!
//! Classic `getopt(3)` keeps its scan position in process globals, which
//! falls apart as soon as two threads parse unrelated argument vectors.
//! This crate moves every mutable cell into a caller-owned [`OptState`]
//! cursor and implements the POSIX short-option grammar plus GNU-style
//! long options on top of it:
//!
//! - option-strings such as `":ab:c"` compiled into 62-bit membership and
//!   arity masks ([`OptSpec`]);
//! - long-option tables with required and optional `=`-arguments and
//!   flag-setting entries ([`LongOpt`], [`HasArg`]);
//! - one parsed token per call ([`parse_next`] / [`Token`]), or the
//!   traditional integer codes ([`getopt_r`], [`getopt_long_r`],
//!   [`getopt_long_only_r`]);
//! - `getopt(3)`-shaped implicit-state wrappers in [`classic`] for
//!   callers porting single-threaded code.
//!
//! The parse path never fails as a `Result`: unknown options and missing
//! arguments are ordinary tokens, and malformed option-strings degrade
//! per POSIX instead of erroring. Diagnostics go through the `log` facade.
//!
//! ```
//! use getopt::{parse_next, OptState, Token};
//!
//! let argv = ["cmd", "-a", "-o", "arg", "path", "path"];
//! let mut state = OptState::new();
//!
//! assert_eq!(
//!     parse_next(&argv, ":abf:o:", None, false, &mut state),
//!     Token::Opt { opt: 'a', arg: None }
//! );
//! assert_eq!(
//!     parse_next(&argv, ":abf:o:", None, false, &mut state),
//!     Token::Opt { opt: 'o', arg: Some("arg") }
//! );
//! assert_eq!(parse_next(&argv, ":abf:o:", None, false, &mut state), Token::End);
//! assert_eq!(&argv[state.optind..], ["path", "path"]);
//! ```

pub mod classic;
mod longopt;
mod optspec;
mod parser;
mod state;

pub use longopt::{HasArg, LongOpt};
pub use optspec::OptSpec;
pub use parser::{getopt_long_only_r, getopt_long_r, getopt_r, parse_next, Token};
pub use state::OptState;
