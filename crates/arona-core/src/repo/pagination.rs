//! Client-side pagination over the fetched repository list.

use std::fmt;
use std::ops::Range;

/// Entries shown per page.
pub const PAGE_SIZE: usize = 6;

/// Page buttons shown before the window collapses into ellipses.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Page buttons shown on narrow viewports.
pub const MAX_VISIBLE_PAGES_NARROW: usize = 3;

/// Viewport width below which the narrow pager is used.
pub const NARROW_VIEWPORT_WIDTH: u16 = 640;

/// Returns how many page buttons fit a viewport of `width` columns/pixels.
pub fn max_visible_pages(width: u16) -> usize {
    if width < NARROW_VIEWPORT_WIDTH {
        MAX_VISIBLE_PAGES_NARROW
    } else {
        MAX_VISIBLE_PAGES
    }
}

/// One slot of the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Number(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Number(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Current page over a list of fixed page size.
///
/// Pages are 1-based. Changing page never touches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pagination {
    /// Start on page 1 with the given page size (minimum 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `len` entries.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Whether the pager is rendered at all.
    pub fn shows_pager(&self, len: usize) -> bool {
        self.total_pages(len) > 1
    }

    /// Index range of the current page, clipped to `len`.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let end = self.current_page * self.page_size;
        let start = end - self.page_size;
        start.min(len)..end.min(len)
    }

    /// The entries on the current page.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.bounds(items.len())]
    }

    /// Jump to `page`, kept inside `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.current_page = page.clamp(1, self.total_pages(len).max(1));
    }

    /// Advance one page unless already on the last.
    pub fn next(&mut self, len: usize) {
        if self.current_page < self.total_pages(len) {
            self.current_page += 1;
        }
    }

    /// Go back one page unless already on the first.
    pub fn previous(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Pull the current page back after the list shrank.
    ///
    /// Returns true if the page changed.
    pub fn clamp(&mut self, len: usize) -> bool {
        let last = self.total_pages(len).max(1);
        if self.current_page > last {
            self.current_page = last;
            true
        } else {
            false
        }
    }

    /// Page buttons for the current position.
    pub fn page_numbers(&self, len: usize, max_visible: usize) -> Vec<PageItem> {
        page_numbers(self.current_page, self.total_pages(len), max_visible)
    }
}

/// Windowed page numbering with ellipses.
///
/// With `total <= max_visible` every page is listed. Otherwise the first and
/// last page are always shown, with the start (`1 2 3 ... N`), the end
/// (`1 ... N-2 N-1 N`) or the current page (`1 ... c ... N`) in between,
/// depending on whether the current page's neighbors touch either edge.
pub fn page_numbers(current: usize, total: usize, max_visible: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Number};

    if total <= max_visible {
        return (1..=total).map(Number).collect();
    }

    let left_sibling = current.saturating_sub(1).max(1);
    let right_sibling = (current + 1).min(total);

    let left_dots = left_sibling > 2;
    let right_dots = right_sibling < total.saturating_sub(1);

    match (left_dots, right_dots) {
        (false, true) => vec![Number(1), Number(2), Number(3), Ellipsis, Number(total)],
        (true, false) => vec![
            Number(1),
            Ellipsis,
            Number(total.saturating_sub(2)),
            Number(total - 1),
            Number(total),
        ],
        (true, true) => vec![Number(1), Ellipsis, Number(current), Ellipsis, Number(total)],
        // Only reachable with a narrow window over four or five pages.
        (false, false) => (1..=total).map(Number).collect(),
    }
}
