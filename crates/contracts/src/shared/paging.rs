//! Client-side paging of an in-memory list

/// One page of a longer list; `page` is 0-based
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Cuts out page `page` of `page_size` items. A page past the end is clamped
/// to the last one; an empty list has zero pages.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size);
    let page = page.min(total_pages.saturating_sub(1));
    let start = page * page_size;
    let end = (start + page_size).min(total_count);

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(&items, 0, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!((first.total_pages, first.total_count), (3, 23));

        let last = paginate(&items, 2, 10);
        assert_eq!(last.items, vec![21, 22, 23]);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let items: Vec<u32> = (1..=12).collect();
        let page = paginate(&items, 9, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![11, 12]);
    }

    #[test]
    fn test_empty_list() {
        let page = paginate::<u32>(&[], 4, 10);
        assert!(page.items.is_empty());
        assert_eq!((page.page, page.total_pages, page.total_count), (0, 0, 0));
    }
}
