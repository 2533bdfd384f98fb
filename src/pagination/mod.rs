use std::fmt;

/// Number of pages shown on each side of the current one by default.
pub const DEFAULT_SIBLING_COUNT: u32 = 1;

/// A single entry in a pager: either a clickable page number or a gap marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl PageMarker {
    pub fn page(&self) -> Option<u32> {
        match self {
            PageMarker::Page(n) => Some(*n),
            PageMarker::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => f.write_str("..."),
        }
    }
}

/// Build the ordered list of pager entries for `current_page` out of `last_page`.
///
/// The first and last pages are always present, as is every page within
/// `sibling_count` of the current one. A skipped run of exactly one page shows
/// that page; longer runs collapse into a single [`PageMarker::Ellipsis`].
///
/// `last_page == 0` is treated as a single page and `current_page` is clamped
/// into `[1, last_page]`, so the output never names a page that does not exist.
pub fn build_pagination_control(
    current_page: u32,
    last_page: u32,
    sibling_count: u32,
) -> Vec<PageMarker> {
    let last = last_page.max(1);
    if last == 1 {
        return vec![PageMarker::Page(1)];
    }

    let current = current_page.clamp(1, last);
    let window_start = current.saturating_sub(sibling_count).max(2);
    let window_end = current.saturating_add(sibling_count).min(last - 1);

    let mut shown = Vec::with_capacity(window_end.saturating_sub(window_start) as usize + 3);
    shown.push(1);
    if window_start <= window_end {
        shown.extend(window_start..=window_end);
    }
    shown.push(last);

    let mut markers = Vec::with_capacity(shown.len() + 2);
    let mut previous: Option<u32> = None;
    for page in shown {
        if let Some(prev) = previous {
            match page - prev {
                1 => {}
                2 => markers.push(PageMarker::Page(prev + 1)),
                _ => markers.push(PageMarker::Ellipsis),
            }
        }
        markers.push(PageMarker::Page(page));
        previous = Some(page);
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageMarker::{Ellipsis, Page};

    fn pages(markers: &[PageMarker]) -> Vec<u32> {
        markers.iter().filter_map(PageMarker::page).collect()
    }

    #[test]
    fn single_page_is_just_one() {
        assert_eq!(build_pagination_control(1, 1, 1), vec![Page(1)]);
        assert_eq!(build_pagination_control(1, 1, 0), vec![Page(1)]);
    }

    #[test]
    fn zero_last_page_is_treated_as_one() {
        assert_eq!(build_pagination_control(1, 0, 1), vec![Page(1)]);
    }

    #[test]
    fn first_page_of_ten() {
        assert_eq!(
            build_pagination_control(1, 10, 1),
            vec![Page(1), Page(2), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn last_page_of_ten() {
        assert_eq!(
            build_pagination_control(10, 10, 1),
            vec![Page(1), Ellipsis, Page(9), Page(10)]
        );
    }

    #[test]
    fn middle_page_has_ellipsis_on_both_sides() {
        assert_eq!(
            build_pagination_control(5, 10, 1),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn single_skipped_page_is_shown_instead_of_ellipsis() {
        assert_eq!(
            build_pagination_control(3, 5, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        // 1 .. 3 4 5 .. 10 would hide only page 2 on the left.
        assert_eq!(
            build_pagination_control(4, 10, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn small_range_fits_without_ellipsis() {
        assert_eq!(
            build_pagination_control(2, 3, 1),
            vec![Page(1), Page(2), Page(3)]
        );
        assert_eq!(build_pagination_control(1, 2, 0), vec![Page(1), Page(2)]);
    }

    #[test]
    fn zero_siblings_shows_only_current_and_edges() {
        assert_eq!(
            build_pagination_control(5, 10, 0),
            vec![Page(1), Ellipsis, Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            build_pagination_control(1, 10, 0),
            vec![Page(1), Ellipsis, Page(10)]
        );
        assert_eq!(
            build_pagination_control(3, 10, 0),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn huge_sibling_count_shows_everything() {
        assert_eq!(pages(&build_pagination_control(4, 7, u32::MAX)), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn current_page_past_the_end_is_clamped() {
        assert_eq!(
            build_pagination_control(42, 10, 1),
            build_pagination_control(10, 10, 1)
        );
    }

    #[test]
    fn display_matches_pager_labels() {
        let labels: Vec<String> = build_pagination_control(1, 10, 1)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, ["1", "2", "...", "10"]);
    }

    #[test]
    fn invariants_hold_across_inputs() {
        for last in 1..=30u32 {
            for current in 1..=last {
                for siblings in 0..=4u32 {
                    let markers = build_pagination_control(current, last, siblings);
                    let numbers = pages(&markers);

                    assert_eq!(numbers.first(), Some(&1));
                    assert_eq!(numbers.last(), Some(&last));
                    assert!(numbers.windows(2).all(|w| w[0] < w[1]), "{markers:?}");
                    assert!(numbers.iter().all(|n| (1..=last).contains(n)));

                    let lo = current.saturating_sub(siblings).max(1);
                    let hi = (current + siblings).min(last);
                    assert!((lo..=hi).all(|n| numbers.contains(&n)), "{markers:?}");

                    for (i, marker) in markers.iter().enumerate() {
                        if *marker != Ellipsis {
                            continue;
                        }
                        // Never at an edge, never doubled, always hiding 2+ pages.
                        let before = markers[i - 1].page().expect("page before ellipsis");
                        let after = markers[i + 1].page().expect("page after ellipsis");
                        assert!(after - before > 2, "{markers:?}");
                    }

                    assert_eq!(markers, build_pagination_control(current, last, siblings));
                }
            }
        }
    }
}
