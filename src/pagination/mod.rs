//! Offset pagination over an in-memory alert list.
//!
//! Pages are 1-indexed. Page numbers are signed because the pager click
//! handler does not clamp, so a caller can step below page 1; such pages are
//! simply empty.

use std::ops::Range;
use std::str::FromStr;

use crate::error::AppError;

/// Number of pages needed for `total` items
pub fn pages_num(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (total + page_size - 1) / page_size // Ceiling division
}

/// Index range of `current_page` within a list of `total` items
pub fn page_range(current_page: i64, page_size: usize, total: usize) -> Range<usize> {
    if current_page < 1 || page_size == 0 {
        return 0..0;
    }
    let start = (current_page as usize - 1).saturating_mul(page_size);
    if start >= total {
        return 0..0;
    }
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// Items shown on `current_page`
pub fn page_slice<T>(items: &[T], current_page: i64, page_size: usize) -> &[T] {
    &items[page_range(current_page, page_size, items.len())]
}

/// Width of the pager window: at most half a page worth of page links
pub fn pagination_size(pages_num: usize, page_size: usize) -> usize {
    pages_num.min(page_size / 2)
}

/// Page numbers shown by the pager widget
///
/// The window is centered on `current_page` where possible and never leaves
/// `[1, pages_num]`. A single page gets no window at all.
pub fn view_pages(current_page: i64, pages_num: usize, page_size: usize) -> Vec<i64> {
    if pages_num == 1 {
        return Vec::new();
    }

    let size = pagination_size(pages_num, page_size) as i64;
    let max = pages_num as i64;
    let step = size / 2;

    let start = if max.saturating_sub(current_page) < step {
        (max - size + 1).max(1)
    } else {
        current_page.saturating_sub(step).max(1)
    };

    (0..size).map(|offset| start + offset).collect()
}

// =============================================================================
// Pager Clicks
// =============================================================================

/// What the user clicked in the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Previous,
    Next,
    Page(i64),
}

impl PageTarget {
    /// Page number after the click, relative to `current_page`
    pub fn resolve(self, current_page: i64) -> i64 {
        match self {
            PageTarget::Previous => current_page.saturating_sub(1),
            PageTarget::Next => current_page.saturating_add(1),
            PageTarget::Page(page) => page,
        }
    }
}

impl FromStr for PageTarget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "previous" => Ok(PageTarget::Previous),
            "next" => Ok(PageTarget::Next),
            other => other
                .trim()
                .parse()
                .map(PageTarget::Page)
                .map_err(|_| AppError::Validation(format!("Invalid page target: {}", other))),
        }
    }
}
