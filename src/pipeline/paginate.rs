use crate::common::types::Page;

/// Clamps a requested page number to the first page.
pub fn clamp_page(page: i64) -> u32 {
    page.clamp(1, u32::MAX as i64) as u32
}

/// Lookahead pagination over an already filtered and sorted set.
///
/// Takes up to `page_size + 1` records from the page's window; the extra one
/// only signals that a following page exists and is not returned.
pub fn paginate<T: Clone>(sorted: &[T], page_size: usize, page: i64) -> Page<T> {
    if page_size == 0 {
        return Page { items: Vec::new(), has_next: false };
    }
    let page = clamp_page(page) as usize;
    let offset = (page - 1).saturating_mul(page_size);

    let mut items: Vec<T> = sorted.iter().skip(offset).take(page_size + 1).cloned().collect();
    let has_next = items.len() > page_size;
    items.truncate(page_size);
    Page { items, has_next }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_twenty_one_records_has_next() {
        let page = paginate(&numbers(21), 20, 1);
        assert!(page.has_next);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[19], 19);
    }

    #[test]
    fn test_exactly_twenty_records() {
        let page = paginate(&numbers(20), 20, 1);
        assert!(!page.has_next);
        assert_eq!(page.items.len(), 20);
    }

    #[test]
    fn test_no_records() {
        let page = paginate::<usize>(&[], 20, 1);
        assert!(!page.has_next);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_page_below_one_is_first_page() {
        assert_eq!(clamp_page(0), 1);
        assert_eq!(clamp_page(-4), 1);
        assert_eq!(paginate(&numbers(30), 20, 0), paginate(&numbers(30), 20, 1));
        assert_eq!(paginate(&numbers(30), 20, -7), paginate(&numbers(30), 20, 1));
    }

    #[test]
    fn test_second_and_past_end_pages() {
        let second = paginate(&numbers(30), 20, 2);
        assert_eq!(second.items, (20..30).collect::<Vec<_>>());
        assert!(!second.has_next);

        let past = paginate(&numbers(30), 20, 5);
        assert!(past.items.is_empty());
        assert!(!past.has_next);
    }
}
