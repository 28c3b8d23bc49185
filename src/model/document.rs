//! Searchable documents and the corpus that owns them.
//!
//! The corpus is produced once by the site generator (`search.json`) and is
//! read-only afterwards. The matcher only ever borrows documents.

use crate::model::error::ParseError;
use serde::Deserialize;

// ===== Frontmatter =====

/// Frontmatter block of a content page.
///
/// Only `title` is required. The optional fields are skipped by the
/// matcher when absent rather than treated as empty strings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Frontmatter {
    /// Page title, always shown.
    pub title: String,
    /// One-line summary, searched and used as the fallback excerpt.
    #[serde(default)]
    pub description: Option<String>,
    /// Category names, in site order.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Tag names, in site order.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

// ===== Document =====

/// One entry of the search corpus.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Page metadata.
    pub frontmatter: Frontmatter,
    /// Plain-text body of the page.
    pub content: String,
    /// Site-relative path of the page, when the generator emits one.
    #[serde(default)]
    pub slug: Option<String>,
}

impl Document {
    /// Build a document with only the required fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            frontmatter: Frontmatter {
                title: title.into(),
                description: None,
                categories: None,
                tags: None,
            },
            content: content.into(),
            slug: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.frontmatter.description = Some(description.into());
        self
    }

    /// Set the categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frontmatter.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frontmatter.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Set the site-relative slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Page title.
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    /// Description, if the page has one.
    pub fn description(&self) -> Option<&str> {
        self.frontmatter.description.as_deref()
    }

    /// Plain-text body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Categories joined with single spaces, `None` when the field is absent.
    pub fn categories_joined(&self) -> Option<String> {
        self.frontmatter.categories.as_ref().map(|c| c.join(" "))
    }

    /// Tags joined with single spaces, `None` when the field is absent.
    pub fn tags_joined(&self) -> Option<String> {
        self.frontmatter.tags.as_ref().map(|t| t.join(" "))
    }

    /// Link target used when the document is activated.
    ///
    /// `base_url` and `slug` are joined with exactly one `/`. Documents
    /// without a slug fall back to their title.
    pub fn link(&self, base_url: &str) -> String {
        match &self.slug {
            Some(slug) if base_url.is_empty() => slug.clone(),
            Some(slug) => format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                slug.trim_start_matches('/')
            ),
            None => self.frontmatter.title.clone(),
        }
    }
}

// ===== Corpus =====

/// Ordered, immutable collection of searchable documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Wrap `documents`, keeping their order.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Empty corpus, used when acquisition fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the `search.json` array format.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidJson` when the text is not a JSON array of
    /// documents (including records missing `title` or `content`).
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        let documents: Vec<Document> =
            serde_json::from_str(text).map_err(|e| ParseError::InvalidJson {
                message: e.to_string(),
            })?;
        Ok(Self { documents })
    }

    /// All documents in corpus order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Document at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True for a corpus with no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_parses_full_record() {
        let json = r#"[{
            "frontmatter": {
                "title": "Intro to Rust",
                "description": "Getting started",
                "categories": ["Programming", "Systems"],
                "tags": ["rust", "beginner"]
            },
            "content": "ownership and borrowing",
            "slug": "blog/intro-to-rust"
        }]"#;

        let corpus = Corpus::from_json(json).expect("valid corpus");

        assert_eq!(corpus.len(), 1);
        let doc = corpus.get(0).unwrap();
        assert_eq!(doc.title(), "Intro to Rust");
        assert_eq!(doc.description(), Some("Getting started"));
        assert_eq!(doc.categories_joined().as_deref(), Some("Programming Systems"));
        assert_eq!(doc.tags_joined().as_deref(), Some("rust beginner"));
        assert_eq!(doc.slug.as_deref(), Some("blog/intro-to-rust"));
    }

    #[test]
    fn from_json_accepts_missing_optional_fields() {
        let json = r#"[{"frontmatter": {"title": "Go Basics"}, "content": "goroutines"}]"#;

        let corpus = Corpus::from_json(json).expect("valid corpus");
        let doc = corpus.get(0).unwrap();

        assert_eq!(doc.description(), None);
        assert_eq!(doc.categories_joined(), None);
        assert_eq!(doc.tags_joined(), None);
        assert_eq!(doc.slug, None);
    }

    #[test]
    fn from_json_ignores_unknown_fields() {
        let json = r#"[{"frontmatter": {"title": "T", "draft": false, "image": "x.png"},
                       "content": "c", "id": 7}]"#;

        assert!(Corpus::from_json(json).is_ok());
    }

    #[test]
    fn from_json_rejects_missing_title() {
        let json = r#"[{"frontmatter": {}, "content": "c"}]"#;

        let err = Corpus::from_json(json).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { .. }));
    }

    #[test]
    fn from_json_rejects_non_array() {
        assert!(Corpus::from_json(r#"{"frontmatter": {"title": "T"}}"#).is_err());
    }

    #[test]
    fn empty_categories_join_to_empty_string() {
        let doc = Document::new("T", "c").with_categories(Vec::<String>::new());

        assert_eq!(doc.categories_joined().as_deref(), Some(""));
    }

    #[test]
    fn link_joins_base_and_slug_with_single_slash() {
        let doc = Document::new("T", "c").with_slug("/blog/post");

        assert_eq!(doc.link("https://example.com/"), "https://example.com/blog/post");
        assert_eq!(doc.link("https://example.com"), "https://example.com/blog/post");
    }

    #[test]
    fn link_without_base_url_is_slug() {
        let doc = Document::new("T", "c").with_slug("blog/post");

        assert_eq!(doc.link(""), "blog/post");
    }

    #[test]
    fn link_without_slug_falls_back_to_title() {
        let doc = Document::new("Go Basics", "goroutines");

        assert_eq!(doc.link("https://example.com"), "Go Basics");
    }
}
