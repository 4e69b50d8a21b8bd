//! Client-side post filtering and pagination

use super::types::Post;

/// Posts shown per page
pub const POSTS_PER_PAGE: usize = 5;

/// Tag, category and text filters; empty fields match everything
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Exact tag
    pub tag: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Case-insensitive text in title or content
    pub search: Option<String>,
}

impl PostFilter {
    /// Filter matching everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Require a category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Require text
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Whether a post passes every set filter
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        let tag_ok = non_empty(&self.tag).map_or(true, |tag| post.tags.iter().any(|t| t == tag));
        let category_ok = non_empty(&self.category).map_or(true, |c| post.category == c);
        let search_ok = non_empty(&self.search).map_or(true, |needle| {
            let needle = needle.to_lowercase();
            post.title.to_lowercase().contains(&needle)
                || post.content.to_lowercase().contains(&needle)
        });
        tag_ok && category_ok && search_ok
    }

    /// Posts that pass, in their original order
    #[must_use]
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|p| self.matches(p)).collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// One page of a list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number
    pub number: usize,
    /// Number of pages (0 for an empty list)
    pub total_pages: usize,
    /// Items across all pages
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Whether a later page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether an earlier page exists
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Slice `items` into page `number` of `per_page`
///
/// Page numbers are 1-based; 0 is treated as 1. A page past the end is empty.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], number: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let number = number.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let start = (number - 1).saturating_mul(per_page).min(total_items);
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        number,
        total_pages,
        total_items,
    }
}
