// src/pagination.rs

/// One slot in the page-index control. `Ellipsis` is a distinct non-clickable
/// marker, never a real page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaginationState {
    /// 1-indexed.
    pub current_page: usize,
    pub page_size: usize,
    pub sibling_count: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
            sibling_count: 2,
        }
    }
}

impl PaginationState {
    /// `ceil(visible_count / page_size)`, clamped to minimum 1.
    pub fn total_pages(&self, visible_count: usize) -> usize {
        visible_count.div_ceil(self.page_size).max(1)
    }
}

fn pages(start: usize, end: usize) -> impl Iterator<Item = PageItem> {
    (start..=end).map(PageItem::Page)
}

/// Compact page-index layout: real page numbers with ellipsis markers where
/// runs collapse. Assumes `current_page` is already clamped into
/// `[1, total_pages]`; the session guarantees that.
pub fn range(total_pages: usize, current_page: usize, sibling_count: usize) -> Vec<PageItem> {
    if total_pages <= 1 {
        return vec![PageItem::Page(1)];
    }

    // first, last, current, and siblings on each side, at minimum
    let visible_slots = 5 + sibling_count;
    // An ellipsis must stand for at least two pages; below this width any
    // collapse would elide fewer, so show everything.
    let min_collapsible = 2 * sibling_count + 6;
    if total_pages <= visible_slots || total_pages < min_collapsible {
        return pages(1, total_pages).collect();
    }

    let left_sibling = current_page.saturating_sub(sibling_count).max(1);
    let right_sibling = (current_page + sibling_count).min(total_pages);

    let show_left_dots = left_sibling > 3;
    let show_right_dots = right_sibling < total_pages - 2;

    if !show_left_dots && show_right_dots {
        let left_items = 3 + 2 * sibling_count;
        let mut out: Vec<PageItem> = pages(1, left_items).collect();
        out.push(PageItem::Ellipsis);
        out.push(PageItem::Page(total_pages));
        out
    } else if show_left_dots && !show_right_dots {
        let right_items = 3 + 2 * sibling_count;
        let mut out = vec![PageItem::Page(1), PageItem::Ellipsis];
        out.extend(pages(total_pages - right_items + 1, total_pages));
        out
    } else {
        let mut out = vec![PageItem::Page(1), PageItem::Ellipsis];
        out.extend(pages(left_sibling, right_sibling));
        out.push(PageItem::Ellipsis);
        out.push(PageItem::Page(total_pages));
        out
    }
}
