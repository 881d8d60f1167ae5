//! Traditional implicit-state entry points.
//!
//! `getopt(3)`-shaped callers expect `optind`, `optarg` and `optopt` to
//! live in ambient storage rather than in an explicit cursor. This module
//! adapts the reentrant core to that shape using per-thread cells: callers
//! on one thread share a single implicit cursor, exactly like the C
//! globals, while each thread gets its own so unrelated threads cannot
//! corrupt each other's scan.

use std::cell::RefCell;

use crate::longopt::LongOpt;
use crate::state::OptState;

struct Cells {
    optind: usize,
    optopt: i32,
    optarg: Option<String>,
    longindex: Option<usize>,
    scan_index: usize,
    scan_pos: usize,
}

impl Cells {
    const fn new() -> Self {
        Cells {
            optind: 1,
            optopt: 0,
            optarg: None,
            longindex: None,
            scan_index: 1,
            scan_pos: 0,
        }
    }
}

thread_local! {
    static CELLS: RefCell<Cells> = const { RefCell::new(Cells::new()) };
}

fn run(argv: &[&str], optstring: &str, longopts: Option<&[LongOpt<'_>]>, longonly: bool) -> i32 {
    CELLS.with(|cells| {
        let mut cells = cells.borrow_mut();
        let mut state = OptState {
            optind: cells.optind,
            optopt: cells.optopt,
            optarg: None,
            longindex: None,
            scan_index: cells.scan_index,
            scan_pos: cells.scan_pos,
        };
        let ret = match longopts {
            None => crate::getopt_r(argv, optstring, &mut state),
            Some(table) if longonly => crate::getopt_long_only_r(argv, optstring, table, &mut state),
            Some(table) => crate::getopt_long_r(argv, optstring, table, &mut state),
        };
        cells.optind = state.optind;
        cells.optopt = state.optopt;
        cells.optarg = state.optarg.map(str::to_owned);
        cells.longindex = state.longindex;
        cells.scan_index = state.scan_index;
        cells.scan_pos = state.scan_pos;
        ret
    })
}

/// Parse one short option using this thread's implicit cursor.
pub fn getopt(argv: &[&str], optstring: &str) -> i32 {
    run(argv, optstring, None, false)
}

/// Parse one option, recognizing `--name` long options.
pub fn getopt_long(argv: &[&str], optstring: &str, longopts: &[LongOpt<'_>]) -> i32 {
    run(argv, optstring, Some(longopts), false)
}

/// Parse one option, also offering single-dash elements to the long table.
pub fn getopt_long_only(argv: &[&str], optstring: &str, longopts: &[LongOpt<'_>]) -> i32 {
    run(argv, optstring, Some(longopts), true)
}

/// Index of the next argument-vector element this thread will examine.
pub fn optind() -> usize {
    CELLS.with(|cells| cells.borrow().optind)
}

/// Reposition this thread's implicit cursor; `0` restarts the scan.
pub fn set_optind(value: usize) {
    CELLS.with(|cells| cells.borrow_mut().optind = value);
}

/// Argument of the option returned by the last call on this thread.
pub fn optarg() -> Option<String> {
    CELLS.with(|cells| cells.borrow().optarg.clone())
}

/// The option value most recently matched or rejected on this thread.
pub fn optopt() -> i32 {
    CELLS.with(|cells| cells.borrow().optopt)
}

/// Table index of the long option matched by the last call on this thread.
pub fn longindex() -> Option<usize> {
    CELLS.with(|cells| cells.borrow().longindex)
}

/// Restart this thread's implicit cursor from scratch.
pub fn reset() {
    CELLS.with(|cells| *cells.borrow_mut() = Cells::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_cursor_tracks_a_scan() {
        reset();
        let argv = ["cmd", "-a", "-o", "value", "rest"];
        assert_eq!(getopt(&argv, "ao:"), 'a' as i32);
        assert_eq!(getopt(&argv, "ao:"), 'o' as i32);
        assert_eq!(optarg().as_deref(), Some("value"));
        assert_eq!(getopt(&argv, "ao:"), -1);
        assert_eq!(optind(), 4);
    }

    #[test]
    fn set_optind_zero_restarts() {
        reset();
        let argv = ["cmd", "-a", "-b"];
        assert_eq!(getopt(&argv, "ab"), 'a' as i32);
        set_optind(0);
        assert_eq!(getopt(&argv, "ab"), 'a' as i32);
        assert_eq!(getopt(&argv, "ab"), 'b' as i32);
    }

    #[test]
    fn threads_do_not_share_the_cursor() {
        reset();
        let argv = ["cmd", "-a", "-b", "-c"];
        assert_eq!(getopt(&argv, "abc"), 'a' as i32);

        std::thread::spawn(|| {
            let argv = ["other", "-x", "-y"];
            assert_eq!(getopt(&argv, "xy"), 'x' as i32);
            assert_eq!(optind(), 2);
        })
        .join()
        .unwrap();

        // The spawned thread's scan left this thread's cursor alone.
        assert_eq!(getopt(&argv, "abc"), 'b' as i32);
        assert_eq!(optind(), 3);
    }
}
