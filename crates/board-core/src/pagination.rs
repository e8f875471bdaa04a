/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Page requests and page results

use serde::{Deserialize, Serialize};

use crate::errors::{BoardError, BoardResult};

/// Page number used when the caller does not give one
pub const DEFAULT_PAGE: u32 = 0;

/// Page size used when the caller does not give one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A zero-based page number and a page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Number of records to skip before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// A page must hold at least one element; there is no upper bound
    pub fn validate(&self) -> BoardResult<()> {
        if self.size == 0 {
            return Err(BoardError::InvalidPageRequest {
                message: "page size must not be less than one".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// A slice of a collection plus the metadata needed to walk the rest of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub number_of_elements: usize,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size.max(1));
        let total_pages = total_elements.div_ceil(size);
        let number = request.page;

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            number,
            size: request.size,
            total_elements,
            total_pages,
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
        }
    }

    /// Convert the content while keeping the page metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            number_of_elements: self.number_of_elements,
            empty: self.empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let request = PageRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 10);
        assert_eq!(request.offset(), 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 25).offset(), 75);
    }

    #[test]
    fn test_validate_rejects_empty_size() {
        assert!(PageRequest::new(0, 0).validate().is_err());
        assert!(PageRequest::new(7, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_large_sizes() {
        assert!(PageRequest::new(0, 5000).validate().is_ok());
        assert!(PageRequest::new(u32::MAX, u32::MAX).validate().is_ok());
        assert_eq!(
            PageRequest::new(u32::MAX, u32::MAX).offset(),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_large_size_on_small_collection() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(0, 5000), 3);
        assert_eq!(page.size, 5000);
        assert_eq!(page.total_pages, 1);
        assert!(page.first);
        assert!(page.last);
    }

    #[test]
    fn test_single_page_metadata() {
        let page = Page::new(vec![1, 2, 3], PageRequest::default(), 3);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.number_of_elements, 3);
        assert!(page.first);
        assert!(page.last);
        assert!(!page.empty);
    }

    #[test]
    fn test_middle_page_metadata() {
        let page = Page::new(vec![4, 5], PageRequest::new(1, 2), 5);
        assert_eq!(page.total_pages, 3);
        assert!(!page.first);
        assert!(!page.last);
    }

    #[test]
    fn test_empty_collection() {
        let page: Page<i32> = Page::new(vec![], PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
        assert!(page.empty);
    }

    #[test]
    fn test_page_past_the_end() {
        let page: Page<i32> = Page::new(vec![], PageRequest::new(4, 10), 3);
        assert!(page.last);
        assert!(page.empty);
        assert_eq!(page.number, 4);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::new(0, 2), 3).map(|n| n.to_string());
        assert_eq!(page.content, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert!(!page.last);
    }
}
