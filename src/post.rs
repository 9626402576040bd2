//! Content-feed posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One syndicated content entry (a "post") from the external feed.
///
/// Use the builder pattern to construct posts:
///
/// ```
/// use bulletin::Post;
/// use chrono::Utc;
///
/// let post = Post::new(1, "Release Notes", "https://example.com/notes")
///     .excerpt("Everything that changed this week.")
///     .author("Product Team")
///     .published_at(Utc::now())
///     .category("Updates");
/// ```
///
/// Posts are immutable inputs to rendering. Excerpt truncation happens at
/// render time, per layout; the source item is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique within a render batch.
    pub id: u64,
    pub title: String,
    /// Plain text summary, arbitrary length.
    #[serde(default)]
    pub excerpt: String,
    pub url: String,
    /// Optional hero/thumbnail image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub author: String,
    pub published_at: DateTime<Utc>,
    /// Ordered; layouts show the first category as the item's tag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Post {
    /// Create a post with the required fields.
    pub fn new(id: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            excerpt: String::new(),
            url: url.into(),
            featured_image: None,
            author: String::new(),
            published_at: DateTime::<Utc>::UNIX_EPOCH,
            categories: Vec::new(),
        }
    }

    /// Set the plain-text excerpt.
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Set the featured image URL.
    pub fn featured_image(mut self, url: impl Into<String>) -> Self {
        self.featured_image = Some(url.into());
        self
    }

    /// Set the author byline.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the publish timestamp.
    pub fn published_at(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = at;
        self
    }

    /// Append a category. Order is preserved.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// First category, used as the display tag in tag-bearing layouts.
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let post = Post::new(3, "Title", "https://example.com/p/3")
            .excerpt("Summary")
            .author("Team")
            .category("News")
            .category("Guide");

        assert_eq!(post.id, 3);
        assert_eq!(post.primary_category(), Some("News"));
        assert_eq!(post.categories.len(), 2);
    }

    #[test]
    fn test_wire_format() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Hello",
                "excerpt": "World",
                "url": "https://example.com/hello",
                "featuredImage": "https://example.com/img.png",
                "author": "Admin",
                "publishedAt": "2025-01-05T12:00:00Z",
                "categories": ["Tutorial"]
            }"#,
        )
        .unwrap();

        assert_eq!(post.featured_image.as_deref(), Some("https://example.com/img.png"));
        assert_eq!(post.published_at.to_rfc3339(), "2025-01-05T12:00:00+00:00");
    }
}
