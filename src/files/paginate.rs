use serde::Serialize;

/// One window of an ordered item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub total_pages: usize,
    pub items_per_page: usize,
    /// Index of `items[0]` in the full list.
    pub offset: usize,
}

pub fn total_pages(item_count: usize, items_per_page: usize) -> usize {
    let per = items_per_page.max(1);
    item_count.div_ceil(per).max(1)
}

/// Clamps `requested` into `[1, total_pages]` and slices that page out of `items`.
pub fn paginate<T: Clone>(items: &[T], requested: i64, items_per_page: usize) -> Page<T> {
    let per = items_per_page.max(1);
    let total = total_pages(items.len(), per);
    let page = requested.clamp(1, total as i64) as usize;
    let start = ((page - 1) * per).min(items.len());
    let end = (start + per).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        page_number: page,
        total_pages: total,
        items_per_page: per,
        offset: start,
    }
}
