//! Step-selection transition rules, kept pure so they can be tested
//! exhaustively without a chart.

/// Resolve a requested drill-down index against the current series length.
///
/// - An in-range index is selected as-is.
/// - Anything else clears the selection, unless `enforce` is set and the
///   series is non-empty, in which case the newest bucket (index 0) is
///   force-selected. Views that must always highlight the current period
///   rely on that fallback.
///
/// Never errors: an out-of-range request is a state transition, not a fault.
pub(crate) const fn resolve(requested: Option<usize>, len: usize, enforce: bool) -> Option<usize> {
    match requested {
        Some(index) if index < len => Some(index),
        _ if enforce && len > 0 => Some(0),
        _ => None,
    }
}
