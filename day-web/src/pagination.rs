//! Pagination utilities for search pages
//!
//! Search pages are 0-indexed, as in the hosted index's API. A page past the
//! end is not clamped: it is simply empty, so infinite scrolling can detect
//! the end of the result set.

use std::ops::Range;

/// Upper bound on hits per page
pub const MAX_HITS_PER_PAGE: u32 = 1000;

/// Pagination metadata for one requested page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Requested page number (0-indexed)
    pub page: u32,
    /// Total number of pages
    pub nb_pages: u32,
    /// Index range of the page's hits in the full result set
    pub range: Range<usize>,
}

/// Calculate the slice of `total_results` that page `page` covers
///
/// `hits_per_page` is clamped to `1..=MAX_HITS_PER_PAGE`.
///
/// # Examples
/// ```
/// use day_web::pagination::page_window;
///
/// // 45 results at 20 per page = 3 pages (20 + 20 + 5)
/// let w = page_window(45, 2, 20);
/// assert_eq!(w.nb_pages, 3);
/// assert_eq!(w.range, 40..45);
///
/// // Past the end: empty
/// let w = page_window(45, 7, 20);
/// assert!(w.range.is_empty());
/// ```
pub fn page_window(total_results: usize, page: u32, hits_per_page: u32) -> PageWindow {
    let per_page = hits_per_page.clamp(1, MAX_HITS_PER_PAGE) as usize;
    let nb_pages = total_results.div_ceil(per_page);

    let start = (page as usize).saturating_mul(per_page).min(total_results);
    let end = start.saturating_add(per_page).min(total_results);

    PageWindow {
        page,
        nb_pages: u32::try_from(nb_pages).unwrap_or(u32::MAX),
        range: start..end,
    }
}
