//! Query matching over the corpus (pure).
//!
//! A raw query is normalized (lower-cased, backslashes removed), escaped, and
//! compiled once into a case-insensitive literal pattern. The pattern is then
//! tested against the five searchable fields of every document. Matching is
//! boolean: there is no scoring and results keep corpus order.

use crate::model::{Corpus, Document};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::ops::Range;
use tracing::warn;

// ===== Normalization =====

/// Normalize raw user input for matching.
///
/// Lower-cases the text and removes every `\` character. Lower-casing is
/// the same per-character folding applied to document text.
pub fn normalize_query(raw: &str) -> String {
    lower_chars(raw).replace('\\', "")
}

/// Lower-case `text` one character at a time.
///
/// Unlike `str::to_lowercase` there is no context-sensitive final sigma, so
/// every output byte can be traced back to exactly one input character.
fn lower_chars(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

// ===== SearchField =====

/// The document attributes a query is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// Frontmatter title.
    Title,
    /// Frontmatter description.
    Description,
    /// Categories, joined with spaces.
    Categories,
    /// Tags, joined with spaces.
    Tags,
    /// Page body.
    Content,
}

impl SearchField {
    /// All searchable fields, in evaluation order.
    pub const ALL: [SearchField; 5] = [
        SearchField::Title,
        SearchField::Description,
        SearchField::Categories,
        SearchField::Tags,
        SearchField::Content,
    ];

    /// Text of this field for `doc`, or `None` when the optional field is absent.
    ///
    /// List fields are joined with single spaces.
    pub fn text<'a>(self, doc: &'a Document) -> Option<Cow<'a, str>> {
        match self {
            SearchField::Title => Some(Cow::Borrowed(doc.title())),
            SearchField::Description => doc.description().map(Cow::Borrowed),
            SearchField::Categories => doc.categories_joined().map(Cow::Owned),
            SearchField::Tags => doc.tags_joined().map(Cow::Owned),
            SearchField::Content => Some(Cow::Borrowed(doc.content())),
        }
    }
}

// ===== SearchPattern =====

/// Compiled, literal, case-insensitive matcher for one query.
///
/// Never constructed for an empty normalized query.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    normalized: String,
    regex: Regex,
}

impl SearchPattern {
    /// Normalize, escape and compile `raw_query`.
    ///
    /// Returns `None` when the normalized query is empty ("search has not
    /// started") or when the escaped literal cannot be compiled.
    pub fn compile(raw_query: &str) -> Option<Self> {
        let normalized = normalize_query(raw_query);
        if normalized.is_empty() {
            return None;
        }

        let escaped = regex::escape(&normalized);
        match RegexBuilder::new(&escaped).case_insensitive(true).build() {
            Ok(regex) => Some(Self { normalized, regex }),
            Err(error) => {
                warn!(query = %normalized, %error, "Failed to compile search pattern");
                None
            }
        }
    }

    /// The normalized query text.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Whether `text` contains the query, ignoring case.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(&lower_chars(text))
    }

    /// Whether a specific field of `doc` matches. Absent fields never match.
    pub fn matches_field(&self, doc: &Document, field: SearchField) -> bool {
        field
            .text(doc)
            .is_some_and(|text| self.is_match(text.as_ref()))
    }

    /// Whether any searchable field of `doc` matches.
    pub fn matches(&self, doc: &Document) -> bool {
        SearchField::ALL
            .iter()
            .any(|&field| self.matches_field(doc, field))
    }

    /// Byte ranges of every match in `text`.
    ///
    /// Matching runs on the same lower-cased text as [`Self::is_match`], so
    /// a text matches iff it has at least one range. Ranges are mapped back
    /// to whole characters of `text` itself, ready for slicing, and ranges
    /// that touch after mapping are merged.
    pub fn match_ranges(&self, text: &str) -> Vec<Range<usize>> {
        let mut lowered = String::with_capacity(text.len());
        // Source character range for every byte of `lowered`.
        let mut origin: Vec<Range<usize>> = Vec::with_capacity(text.len());
        for (start, ch) in text.char_indices() {
            let source = start..start + ch.len_utf8();
            for lower in ch.to_lowercase() {
                lowered.push(lower);
                origin.extend(std::iter::repeat(source.clone()).take(lower.len_utf8()));
            }
        }

        let mut ranges: Vec<Range<usize>> = Vec::new();
        for found in self.regex.find_iter(&lowered) {
            if found.is_empty() {
                continue;
            }
            let range = origin[found.start()].start..origin[found.end() - 1].end;
            match ranges.last_mut() {
                Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
                _ => ranges.push(range),
            }
        }
        ranges
    }
}

// ===== ResultSet =====

/// Ordered subsequence of the corpus matching the current query.
///
/// Stored as corpus indices in ascending order. Always derived fresh; never
/// edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    indices: Vec<usize>,
}

impl ResultSet {
    /// No matches; the result of an empty query.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Run one complete filter pass for `raw_query`.
    pub fn compute(corpus: &Corpus, raw_query: &str) -> Self {
        match SearchPattern::compile(raw_query) {
            Some(pattern) => Self::from_pattern(corpus, &pattern),
            None => Self::empty(),
        }
    }

    /// Filter `corpus` with an already compiled pattern.
    pub fn from_pattern(corpus: &Corpus, pattern: &SearchPattern) -> Self {
        let indices = corpus
            .documents()
            .iter()
            .enumerate()
            .filter(|(_, doc)| pattern.matches(doc))
            .map(|(i, _)| i)
            .collect();
        Self { indices }
    }

    /// Number of matching documents.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Corpus indices of the matching documents.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Resolve the result at `position` against `corpus`.
    pub fn document<'a>(&self, corpus: &'a Corpus, position: usize) -> Option<&'a Document> {
        self.indices.get(position).and_then(|&i| corpus.get(i))
    }

    /// Iterate matching documents in corpus order.
    pub fn documents<'a>(&'a self, corpus: &'a Corpus) -> impl Iterator<Item = &'a Document> + 'a {
        self.indices.iter().filter_map(move |&i| corpus.get(i))
    }
}

// ===== Convenience =====

/// Filter a slice of documents by `raw_query`.
///
/// Empty (normalized) queries yield an empty result, not the whole corpus.
pub fn match_corpus<'a>(corpus: &'a [Document], raw_query: &str) -> Vec<&'a Document> {
    let Some(pattern) = SearchPattern::compile(raw_query) else {
        return Vec::new();
    };
    corpus.iter().filter(|doc| pattern.matches(doc)).collect()
}

// ===== Tests =====

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
