//! Pagination envelope used by every list endpoint.

use serde::{Deserialize, Serialize};

/// Zero-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    pub fn next(self) -> Self {
        Self::new(self.page.saturating_add(1), self.size)
    }

    pub fn previous(self) -> Self {
        Self::new(self.page.saturating_sub(1), self.size)
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

/// One page of results as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Default for PageResponse<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            page: 0,
            size: 0,
            total_elements: 0,
            total_pages: 0,
        }
    }
}

impl<T> PageResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Human page label, one-based: "2 / 5".
    pub fn label(&self) -> String {
        format!("{} / {}", u64::from(self.page) + 1, self.total_pages.max(1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backend_envelope() {
        let json = r#"{"content":[1,2,3],"page":1,"size":3,"totalElements":7,"totalPages":3}"#;
        let page: PageResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 7);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.label(), "2 / 3");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let page: PageResponse<u32> = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.label(), "1 / 1");
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = PageResponse::<u32> {
            page: 2,
            total_pages: 3,
            ..PageResponse::default()
        };
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_at_u32_max_does_not_overflow() {
        let json = r#"{"content":[],"page":4294967295,"totalPages":3}"#;
        let page: PageResponse<u32> = serde_json::from_str(json).unwrap();
        assert!(!page.has_next());
        assert_eq!(page.label(), "4294967296 / 3");
        assert_eq!(PageRequest::new(u32::MAX, 10).next().page, u32::MAX);
    }

    #[test]
    fn test_request_navigation() {
        let first = PageRequest::first(0);
        assert_eq!(first.size, 1);
        assert_eq!(first.previous().page, 0);
        assert_eq!(PageRequest::new(3, 20).next().page, 4);
        assert_eq!(
            PageRequest::new(2, 10).query(),
            vec![("page", "2".to_string()), ("size", "10".to_string())]
        );
    }

    #[test]
    fn test_map_keeps_counts() {
        let page = PageResponse {
            content: vec![1, 2],
            page: 0,
            size: 2,
            total_elements: 2,
            total_pages: 1,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.content, vec![10, 20]);
        assert_eq!(mapped.total_elements, 2);
    }
}
