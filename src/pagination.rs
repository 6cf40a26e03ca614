//! Pagination envelope for listing responses.

use serde::Serialize;

/// Pagination counters carried in the `meta` object.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
}

/// Hypermedia page links; `prev`/`next` are absent at the edges.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// A page of items plus the metadata and links the listing endpoints return.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub links: PageLinks,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Wraps one page of items. `base` is the request path the page links are
    /// built from, e.g. `/api/leads`.
    pub fn new(data: Vec<T>, current_page: usize, per_page: usize, total: usize, base: &str) -> Self {
        let current_page = current_page.max(1);
        let per_page = per_page.max(1);
        let last_page = total.div_ceil(per_page).max(1);

        let link = |page: usize| format!("{base}?page={page}&per_page={per_page}");

        let links = PageLinks {
            first: link(1),
            last: link(last_page),
            prev: (current_page > 1).then(|| link(current_page - 1)),
            next: (current_page < last_page).then(|| link(current_page + 1)),
        };

        Self {
            data,
            links,
            meta: PageMeta {
                current_page,
                last_page,
                per_page,
                total,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_no_prev() {
        let page = Paginated::new(vec![1, 2, 3], 1, 10, 25, "/api/leads");
        assert_eq!(page.meta.last_page, 3);
        assert!(page.links.prev.is_none());
        assert_eq!(
            page.links.next.as_deref(),
            Some("/api/leads?page=2&per_page=10")
        );
        assert_eq!(page.links.first, "/api/leads?page=1&per_page=10");
        assert_eq!(page.links.last, "/api/leads?page=3&per_page=10");
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Paginated::new(vec![1], 3, 10, 25, "/api/leads");
        assert!(page.links.next.is_none());
        assert_eq!(
            page.links.prev.as_deref(),
            Some("/api/leads?page=2&per_page=10")
        );
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let page = Paginated::<i32>::new(vec![], 1, 10, 0, "/api/leads");
        assert_eq!(page.meta.last_page, 1);
        assert!(page.links.prev.is_none());
        assert!(page.links.next.is_none());
    }

    #[test]
    fn exact_multiple_of_per_page() {
        let page = Paginated::new(vec![1, 2], 2, 10, 20, "/api/leads");
        assert_eq!(page.meta.last_page, 2);
        assert!(page.links.next.is_none());
    }
}
