//! Content type classification attached to every generation request.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Kind of content a caller wants generated.
///
/// The tag selects which instruction template and which cleaning rule apply.
/// Tags that do not match any variant resolve to [`ContentType::Content`] via
/// [`ContentType::resolve`], so an unknown tag never fails a request on its own.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Long-form blog post.
    Blog,
    /// Professional email.
    Email,
    /// Persuasive marketing copy.
    Copy,
    /// Search-engine optimized article.
    Seo,
    /// Video script.
    Video,
    /// Summary of caller-supplied text.
    Summarize,
    /// Generic creative content; also the fallback for unknown tags.
    #[default]
    Content,
}

impl ContentType {
    /// Every supported content type, in display order.
    pub const ALL: [Self; 7] = [
        Self::Blog,
        Self::Email,
        Self::Copy,
        Self::Seo,
        Self::Video,
        Self::Summarize,
        Self::Content,
    ];

    /// Returns the wire tag for this content type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Email => "email",
            Self::Copy => "copy",
            Self::Seo => "seo",
            Self::Video => "video",
            Self::Summarize => "summarize",
            Self::Content => "content",
        }
    }

    /// Parses a wire tag, returning `None` for unsupported tags.
    ///
    /// Matching is exact: tags are lowercase on the wire.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Resolves a wire tag, falling back to [`ContentType::Content`].
    #[must_use]
    pub fn resolve(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_default()
    }

    /// Returns `true` when the tag names a supported content type.
    #[must_use]
    pub fn is_supported(tag: &str) -> bool {
        Self::parse(tag).is_some()
    }

    /// Short human-readable description of what this type produces.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Blog => {
                "Generate comprehensive blog posts with introduction, body, and conclusion"
            }
            Self::Email => "Create professional emails with proper structure and formatting",
            Self::Copy => "Write persuasive marketing copy with strong call-to-action",
            Self::Seo => "Generate SEO-optimized content with relevant keywords",
            Self::Video => "Create engaging video scripts with hooks and CTAs",
            Self::Summarize => "Provide concise summaries of longer text content",
            Self::Content => "Generate general creative content on any topic",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| Error::invalid_request(format!("unsupported content type `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_parse() {
        for kind in ContentType::ALL {
            assert_eq!(ContentType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_tags_fall_back_to_content() {
        assert_eq!(ContentType::resolve("poem"), ContentType::Content);
        assert_eq!(ContentType::resolve(""), ContentType::Content);
        assert_eq!(ContentType::resolve("BLOG"), ContentType::Content);
        assert!(!ContentType::is_supported("poem"));
    }

    #[test]
    fn strict_parsing_rejects_unknown_tags() {
        let err = "poem".parse::<ContentType>().expect_err("unknown tag");
        assert!(matches!(err, Error::InvalidRequest { .. }));
        assert_eq!("seo".parse::<ContentType>().unwrap(), ContentType::Seo);
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&ContentType::Summarize).unwrap();
        assert_eq!(json, "\"summarize\"");
        let parsed: ContentType = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(parsed, ContentType::Video);
    }

    #[test]
    fn every_type_has_a_description() {
        for kind in ContentType::ALL {
            assert!(!kind.description().is_empty());
        }
    }
}
