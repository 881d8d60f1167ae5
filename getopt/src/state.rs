//! The caller-owned parse cursor.

/// Sentinel for the scan offset once `--` has been consumed: with the
/// element index unchanged, later calls keep reporting the end of options
/// instead of rescanning whatever follows the terminator.
pub(crate) const SCAN_DONE: usize = usize::MAX;

/// Scan state for one argument vector.
///
/// Every mutable cell of a parse lives here, so concurrent parses need
/// nothing more than distinct cursors. The lifetime ties `optarg` to the
/// argument vector being parsed.
///
/// `optind` is the caller's handle on the scan: it starts at 1 (element 0
/// is the program name), is advanced by the parser, and may be assigned by
/// the caller to reposition the scan. Assigning 0 forces a full restart on
/// the next call.
#[derive(Debug, Clone)]
pub struct OptState<'a> {
    /// Index of the next argument-vector element to examine.
    pub optind: usize,
    /// The most recently matched or rejected option value. An integer
    /// rather than a `char` because flag-setting long options may declare
    /// arbitrary values.
    pub optopt: i32,
    /// Argument of the option produced by the last call, if it took one.
    pub optarg: Option<&'a str>,
    /// Table index of the long option matched by the last call.
    pub longindex: Option<usize>,
    /// Element index the short-option scanner is working on.
    pub(crate) scan_index: usize,
    /// Character offset at which scanning of that element resumes.
    pub(crate) scan_pos: usize,
}

impl<'a> OptState<'a> {
    /// A fresh cursor positioned at the first argument.
    pub fn new() -> Self {
        OptState {
            optind: 1,
            optopt: 0,
            optarg: None,
            longindex: None,
            scan_index: 1,
            scan_pos: 0,
        }
    }

    /// Rewind to the beginning of the argument vector.
    pub fn rewind(&mut self) {
        *self = OptState::new();
    }
}

impl Default for OptState<'_> {
    fn default() -> Self {
        OptState::new()
    }
}
