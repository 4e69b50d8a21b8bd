//! Blog post shapes as served by `/api/blog/*`

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of attached media
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Video clip
    Video,
}

/// Media attached to a post
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Image or video
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Where the file lives
    pub url: String,
    /// Optional caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A stored post
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned id
    #[serde(rename = "_id")]
    pub id: String,
    /// Title
    pub title: String,
    /// Body; paragraphs separated by newlines
    pub content: String,
    /// Upper-cased tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// One of [`Category`], as stored
    #[serde(default)]
    pub category: String,
    /// Attachments
    #[serde(default)]
    pub media: Vec<Media>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Body split into paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    /// Creation time as `YYYY-MM-DD HH:MM:SS`, or `UNKNOWN`
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.created_at.map_or_else(
            || "UNKNOWN".to_string(),
            |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
    }
}

/// Fixed category list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// TECHNOLOGY
    Technology,
    /// PROGRAMMING
    Programming,
    /// AI
    Ai,
    /// RETRO
    Retro,
    /// GAMING
    Gaming,
    /// OTHER
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 6] = [
        Self::Technology,
        Self::Programming,
        Self::Ai,
        Self::Retro,
        Self::Gaming,
        Self::Other,
    ];

    /// Stored name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "TECHNOLOGY",
            Self::Programming => "PROGRAMMING",
            Self::Ai => "AI",
            Self::Retro => "RETRO",
            Self::Gaming => "GAMING",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown category {s:?}, expected one of {}", names.join(", "))
            })
    }
}

/// Body for create and update
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    /// Title, trimmed
    pub title: String,
    /// Body, trimmed
    pub content: String,
    /// Upper-cased tags
    pub tags: Vec<String>,
    /// Category
    pub category: Category,
    /// Attachments
    #[serde(default)]
    pub media: Vec<Media>,
}

impl PostDraft {
    /// Build a draft from form-style input
    ///
    /// `tags` is comma-separated text; see [`parse_tags`].
    pub fn new(
        title: &str,
        content: &str,
        tags: &str,
        category: Category,
    ) -> Result<Self, String> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() {
            return Err("title must not be empty".to_string());
        }
        if content.is_empty() {
            return Err("content must not be empty".to_string());
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            tags: parse_tags(tags),
            category,
            media: Vec::new(),
        })
    }

    /// Attach media
    #[must_use]
    pub fn with_media(mut self, media: Vec<Media>) -> Self {
        self.media = media;
        self
    }

    /// Draft pre-filled from a stored post (for editing)
    ///
    /// Returns `None` if the stored category is not one of [`Category::ALL`].
    #[must_use]
    pub fn from_post(post: &Post) -> Option<Self> {
        Some(Self {
            title: post.title.clone(),
            content: post.content.clone(),
            tags: post.tags.clone(),
            category: post.category.parse().ok()?,
            media: post.media.clone(),
        })
    }
}

/// `" retro, ai ,,Gaming"` -> `["RETRO", "AI", "GAMING"]`
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|tag| tag.trim().to_uppercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" retro, ai ,,Gaming"), vec!["RETRO", "AI", "GAMING"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_category_parse_and_display() {
        assert_eq!("ai".parse::<Category>().unwrap(), Category::Ai);
        assert_eq!(" Retro ".parse::<Category>().unwrap(), Category::Retro);
        assert!("cooking".parse::<Category>().is_err());
        assert_eq!(Category::Technology.to_string(), "TECHNOLOGY");
        assert_eq!(
            serde_json::to_string(&Category::Programming).unwrap(),
            "\"PROGRAMMING\""
        );
    }

    #[test]
    fn test_post_decodes_server_shape() {
        let json = r#"{
            "_id": "65f0c0ffee",
            "title": "HELLO WORLD",
            "content": "line one\nline two",
            "tags": ["RETRO"],
            "category": "RETRO",
            "media": [{"type": "image", "url": "http://x/a.png", "caption": "A"}],
            "createdAt": "2024-03-01T12:30:00.000Z",
            "__v": 0
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "65f0c0ffee");
        assert_eq!(post.media[0].kind, MediaKind::Image);
        assert_eq!(post.paragraphs().collect::<Vec<_>>(), vec!["line one", "line two"]);
        assert_eq!(post.timestamp(), "2024-03-01 12:30:00");
        assert_eq!(PostDraft::from_post(&post).unwrap().category, Category::Retro);
    }

    #[test]
    fn test_draft_trims_and_validates() {
        let draft = PostDraft::new("  Title ", " Body\n", "a, b", Category::Other).unwrap();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.content, "Body");
        assert_eq!(draft.tags, vec!["A", "B"]);

        assert!(PostDraft::new("   ", "body", "", Category::Ai).is_err());
        assert!(PostDraft::new("title", "", "", Category::Ai).is_err());

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["category"], "OTHER");
        assert_eq!(json["media"], serde_json::json!([]));
    }
}
