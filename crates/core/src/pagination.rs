//! Page-number strategy for pagination controls.
//!
//! Produces the truncated marker sequence rendered between the previous
//! and next buttons: always page 1, a window around the current page,
//! ellipses where pages are elided, and always the last page.

use std::fmt;

/// A paginator shows at most this many pages before truncating.
const MAX_VISIBLE_PAGES: u32 = 5;

/// One slot in the rendered page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => write!(f, "..."),
        }
    }
}

/// Compute the marker sequence for `current_page` of `total_pages`.
///
/// Page 1 always opens the sequence.  Up to [`MAX_VISIBLE_PAGES`] total
/// pages are shown in full; beyond that, a window of
/// `max(2, current-1) ..= min(total-1, current+1)` surrounds the current
/// page, with an ellipsis on each side where pages are skipped, and the
/// last page closes the sequence.  Page numbers are strictly ascending
/// and never duplicated, including at the boundaries.
pub fn page_markers(current_page: u32, total_pages: u32) -> Vec<PageMarker> {
    let mut markers = vec![PageMarker::Page(1)];

    if total_pages <= MAX_VISIBLE_PAGES {
        for page in 2..=total_pages {
            markers.push(PageMarker::Page(page));
        }
        return markers;
    }

    if current_page > 3 {
        markers.push(PageMarker::Ellipsis);
    }

    let start = current_page.saturating_sub(1).max(2);
    let end = (current_page + 1).min(total_pages - 1);
    for page in start..=end {
        markers.push(PageMarker::Page(page));
    }

    if current_page < total_pages - 2 {
        markers.push(PageMarker::Ellipsis);
    }

    if total_pages > 1 {
        markers.push(PageMarker::Page(total_pages));
    }

    markers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page};
    use super::*;

    /// Every page number in the sequence must be strictly ascending and
    /// duplicate-free.
    fn assert_strictly_ascending(markers: &[PageMarker]) {
        let pages: Vec<u32> = markers
            .iter()
            .filter_map(|m| match m {
                Page(n) => Some(*n),
                Ellipsis => None,
            })
            .collect();
        for pair in pages.windows(2) {
            assert!(pair[0] < pair[1], "not ascending: {pages:?}");
        }
    }

    // -- small totals (no truncation) ----------------------------------------

    #[test]
    fn single_page() {
        assert_eq!(page_markers(1, 1), vec![Page(1)]);
    }

    #[test]
    fn zero_total_pages_still_shows_page_one() {
        assert_eq!(page_markers(1, 0), vec![Page(1)]);
    }

    #[test]
    fn five_pages_shown_in_full() {
        assert_eq!(
            page_markers(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    // -- truncated sequences -------------------------------------------------

    #[test]
    fn first_page_of_ten() {
        assert_eq!(
            page_markers(1, 10),
            vec![Page(1), Page(2), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn last_page_of_ten() {
        assert_eq!(
            page_markers(10, 10),
            vec![Page(1), Ellipsis, Page(9), Page(10)]
        );
    }

    #[test]
    fn middle_page_gets_both_ellipses() {
        assert_eq!(
            page_markers(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn page_three_has_no_leading_ellipsis() {
        assert_eq!(
            page_markers(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn second_to_last_page_has_no_trailing_ellipsis() {
        assert_eq!(
            page_markers(9, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    // -- structural properties -----------------------------------------------

    #[test]
    fn sequences_are_ascending_and_duplicate_free() {
        for total in 0..=20 {
            for current in 1..=total.max(1) {
                assert_strictly_ascending(&page_markers(current, total));
            }
        }
    }

    #[test]
    fn first_marker_is_always_page_one() {
        for total in 0..=20 {
            for current in 1..=total.max(1) {
                assert_eq!(page_markers(current, total)[0], Page(1));
            }
        }
    }

    #[test]
    fn last_page_always_present_when_multiple() {
        for total in 2..=20u32 {
            for current in 1..=total {
                let markers = page_markers(current, total);
                assert!(
                    markers.contains(&Page(total)),
                    "missing last page for current={current}, total={total}"
                );
            }
        }
    }
}
