//! Pagination arithmetic and the page-control state machine.

use serde::Serialize;

/// Upper bound on plain page numbers before the window collapses gaps into
/// ellipsis markers.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// One page of results plus the totals a view needs to render controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page actually served (clamped into `[1, total_pages]`).
    pub page: u32,
    pub total_pages: u32,
    pub total_items: usize,
}

/// Number of pages needed for `item_count` items; never zero.
pub fn total_pages(item_count: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    (item_count.div_ceil(page_size) as u32).max(1)
}

/// Slice out one page. `page` is clamped into `[1, total_pages]` first, so a
/// stale cursor degrades to the nearest valid page instead of an empty one.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> Page<T> {
    let page_size_n = page_size.max(1) as usize;
    let total = total_pages(items.len(), page_size);
    let page = page.clamp(1, total);

    let start = (page as usize - 1) * page_size_n;
    let end = (start + page_size_n).min(items.len());
    let items_out = if start < items.len() {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items: items_out,
        page,
        total_pages: total,
        total_items: items.len(),
    }
}

/// An entry in the rendered pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEntry {
    Page(u32),
    Ellipsis,
}

/// The bounded set of page numbers shown around `current`, with the default
/// visibility limit of [`MAX_VISIBLE_PAGES`].
pub fn page_window(current: u32, total: u32) -> Vec<PageEntry> {
    page_window_with(current, total, MAX_VISIBLE_PAGES)
}

/// The bounded set of page numbers shown around `current`.
///
/// Page 1 and page `total` are always present (for `total > 1`), the pages
/// adjacent to `current` are shown when in range, and a single ellipsis
/// stands in for each run of hidden pages. With `total <= max_visible`
/// every page is listed outright.
pub fn page_window_with(current: u32, total: u32, max_visible: u32) -> Vec<PageEntry> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= max_visible {
        return (1..=total).map(PageEntry::Page).collect();
    }

    let mut window = Vec::new();
    window.push(PageEntry::Page(1));

    let lo = current.saturating_sub(1).max(2);
    let hi = (current + 1).min(total - 1);

    if lo > 2 {
        window.push(PageEntry::Ellipsis);
    }
    for n in lo..=hi {
        window.push(PageEntry::Page(n));
    }
    if hi < total - 1 {
        window.push(PageEntry::Ellipsis);
    }

    window.push(PageEntry::Page(total));
    window
}

/// Pagination control state machine.
///
/// States are the pages `1..=total_pages`. `prev`/`next` saturate at the
/// boundaries, and `jump` only accepts a page number the current window
/// actually surfaces; ellipsis markers are not transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    total_pages: u32,
}

impl PageCursor {
    pub fn new(page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn at_first(&self) -> bool {
        self.page == 1
    }

    pub fn at_last(&self) -> bool {
        self.page == self.total_pages
    }

    pub fn prev(self) -> Self {
        Self {
            page: (self.page - 1).max(1),
            ..self
        }
    }

    pub fn next(self) -> Self {
        Self {
            page: (self.page + 1).min(self.total_pages),
            ..self
        }
    }

    /// Jump to a surfaced page number; anything else is a no-op.
    pub fn jump(self, target: u32) -> Self {
        let surfaced = page_window(self.page, self.total_pages)
            .iter()
            .any(|e| *e == PageEntry::Page(target));
        if surfaced {
            Self {
                page: target,
                ..self
            }
        } else {
            self
        }
    }

    /// The window rendered for this cursor.
    pub fn window(&self) -> Vec<PageEntry> {
        page_window(self.page, self.total_pages)
    }
}
