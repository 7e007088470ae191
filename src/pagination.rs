//! Pagination Utilities
//!
//! Page arithmetic and the windowed page-link list shown under the gallery.

use crate::query;

/// Posts requested per page
pub const POSTS_PER_PAGE: u32 = 18;

/// Pages shown on each side of the current page
const WINDOW_RADIUS: u32 = 3;

/// Number of pages needed for `total_posts`; zero when the total is unknown
pub fn num_pages(total_posts: Option<u64>) -> u32 {
    match total_posts {
        Some(total) => total.div_ceil(u64::from(POSTS_PER_PAGE)).min(u64::from(u32::MAX)) as u32,
        None => 0,
    }
}

/// What a link says
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    First,
    Last,
    Number,
}

/// One entry of the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Clickable link to `page`
    Link { page: u32, label: PageLabel },
    /// The current page, not clickable
    Active(u32),
    /// Gap marker, not clickable
    Ellipsis,
}

impl PageItem {
    pub fn text(&self) -> String {
        match self {
            PageItem::Link { label: PageLabel::First, .. } => "\u{ab} First".to_string(),
            PageItem::Link { label: PageLabel::Last, .. } => "Last \u{bb}".to_string(),
            PageItem::Link { page, label: PageLabel::Number } | PageItem::Active(page) => {
                page.to_string()
            }
            PageItem::Ellipsis => "...".to_string(),
        }
    }

    /// Target page for clickable items
    pub fn target(&self) -> Option<u32> {
        match self {
            PageItem::Link { page, .. } => Some(*page),
            _ => None,
        }
    }

    pub fn href(&self) -> Option<String> {
        self.target().map(query::page_search)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PageItem::Active(_))
    }
}

/// Contiguous range of page numbers rendered around the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

impl PageWindow {
    pub fn around(current_page: u32, last_page: u32) -> Self {
        Self {
            start: current_page.saturating_sub(WINDOW_RADIUS).max(1),
            end: last_page.min(current_page.saturating_add(WINDOW_RADIUS)),
        }
    }
}

/// Build the pagination control for `current_page` out of `last_page` pages.
///
/// A single page (or an unknown page count) yields no items.
pub fn generate_pagination(current_page: u32, last_page: u32) -> Vec<PageItem> {
    let mut items = Vec::new();
    if last_page <= 1 {
        return items;
    }

    let window = PageWindow::around(current_page, last_page);

    if window.start > 1 {
        items.push(PageItem::Link { page: 1, label: PageLabel::First });
    }
    if window.start > 2 {
        items.push(PageItem::Ellipsis);
    }
    for page in window.start..=window.end {
        if page == current_page {
            items.push(PageItem::Active(page));
        } else {
            items.push(PageItem::Link { page, label: PageLabel::Number });
        }
    }
    if last_page.saturating_sub(window.end) > 1 {
        items.push(PageItem::Ellipsis);
    }
    if window.end < last_page {
        items.push(PageItem::Link { page: last_page, label: PageLabel::Last });
    }

    items
}
