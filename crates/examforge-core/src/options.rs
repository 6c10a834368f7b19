use crate::text::clean_option_label;

/// Decide how many columns an options grid gets, from the longest cleaned
/// option's character length.
///
/// Long answer text must not be truncated or overlapped inside a fixed-width
/// page, so length buys width: over 45 characters collapses the grid to a
/// single column, 15 or fewer packs four per row. This is a presentation
/// heuristic, not a hard limit.
pub fn column_count(options: &[String]) -> usize {
    let longest = options
        .iter()
        .map(|opt| clean_option_label(opt).chars().count())
        .max()
        .unwrap_or(0);

    if longest > 45 {
        1
    } else if longest > 25 {
        2
    } else if longest > 15 {
        3
    } else {
        4
    }
}
