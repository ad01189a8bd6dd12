//! Post-processing of raw model output.

use writer_primitives::ContentType;

/// End-of-text markers some backends leak into generated text.
///
/// Scanned in this order; each one found truncates the text before it.
pub const ARTIFACT_MARKERS: [&str; 5] = ["[END]", "[DONE]", "<|endoftext|>", "<END>", "</s>"];

/// Subject line prepended to emails that do not start with one.
pub const DEFAULT_EMAIL_SUBJECT: &str = "Subject: Re: Your Inquiry";

const VIDEO_HOOK_MARKERS: [&str; 2] = ["[Opening Hook]", "[Hook]"];
const SUMMARY_LABEL: &str = "Summary:";
const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];
const CLEAN_ENDINGS: [char; 6] = ['.', '!', '?', '"', '\'', ')'];

/// Texts at or below this many characters are never sentence-trimmed.
const SENTENCE_TRIM_MIN_CHARS: usize = 100;

/// Cleans raw generated text for the given content type.
///
/// Normalizes whitespace, cuts generation artifacts, applies the content
/// type's structural fix-up and drops a dangling final sentence fragment.
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use writer_primitives::ContentType;
/// use writer_prompts::clean_output;
///
/// assert_eq!(clean_output("  Hello<|endoftext|>world ", ContentType::Blog), "Hello");
/// ```
#[must_use]
pub fn clean_output(raw: &str, content_type: ContentType) -> String {
    let text = collapse_spaces(&collapse_newlines(raw.trim()));
    let text = strip_artifacts(&text);
    let text = apply_fix_up(text.to_owned(), content_type);
    let trimmed = trim_incomplete_sentence(text.trim());

    // A hook marker may sit in the fragment that was just cut away.
    let text = if trimmed.len() < text.trim().len() {
        apply_fix_up(trimmed.to_owned(), content_type)
    } else {
        trimmed.to_owned()
    };

    text.trim().to_owned()
}

fn collapse_newlines(text: &str) -> String {
    let mut text = text.to_owned();
    while text.contains("\n\n\n") {
        text = text.replace("\n\n\n", "\n\n");
    }
    text
}

fn collapse_spaces(text: &str) -> String {
    let mut text = text.to_owned();
    while text.contains("  ") {
        text = text.replace("  ", " ");
    }
    text
}

fn strip_artifacts(text: &str) -> &str {
    ARTIFACT_MARKERS.iter().fold(text, |text, marker| {
        text.find(marker).map_or(text, |index| &text[..index])
    })
}

fn apply_fix_up(text: String, content_type: ContentType) -> String {
    match content_type {
        ContentType::Email if !text.starts_with("Subject:") => {
            format!("{DEFAULT_EMAIL_SUBJECT}\n\n{text}")
        }
        ContentType::Video if !VIDEO_HOOK_MARKERS.iter().any(|marker| text.contains(marker)) => {
            format!("{}\n{text}", VIDEO_HOOK_MARKERS[0])
        }
        ContentType::Summarize => {
            let mut text = text.as_str();
            while let Some(rest) = text.strip_prefix(SUMMARY_LABEL) {
                text = rest.trim();
            }
            text.to_owned()
        }
        _ => text,
    }
}

/// Cuts a trailing sentence fragment when the last sentence end falls within
/// the final 30% of the text.
fn trim_incomplete_sentence(text: &str) -> &str {
    let length = text.chars().count();
    if length <= SENTENCE_TRIM_MIN_CHARS || text.ends_with(CLEAN_ENDINGS) {
        return text;
    }

    let Some(byte_index) = text.rfind(SENTENCE_ENDINGS) else {
        return text;
    };

    let char_index = text[..byte_index].chars().count();
    // Integer form of `char_index > length * 0.7`.
    if char_index * 10 > length * 7 {
        &text[..=byte_index]
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text_with_period_at(period_at: usize, total: usize) -> String {
        let mut text = "a".repeat(period_at);
        text.push('.');
        text.push_str(&"b".repeat(total - period_at - 1));
        text
    }

    #[test]
    fn truncates_at_artifact_marker() {
        assert_eq!(clean_output("Hello<|endoftext|>world", ContentType::Blog), "Hello");
    }

    #[test]
    fn artifact_scan_follows_list_order() {
        // `</s>` is listed after `[END]` but occurs earlier; both cut.
        let cleaned = clean_output("Intro</s>middle[END]tail", ContentType::Content);
        assert_eq!(cleaned, "Intro");
    }

    #[test]
    fn collapses_newlines_and_spaces() {
        let cleaned = clean_output("First\n\n\n\n\nSecond   line  here", ContentType::Seo);
        assert_eq!(cleaned, "First\n\nSecond line here");
    }

    #[test]
    fn email_gets_default_subject() {
        let cleaned = clean_output("Thanks for reaching out.", ContentType::Email);
        assert!(cleaned.starts_with("Subject: Re: Your Inquiry"));
        assert_eq!(cleaned, "Subject: Re: Your Inquiry\n\nThanks for reaching out.");
    }

    #[test]
    fn email_keeps_existing_subject() {
        let raw = "Subject: Launch update\n\nHi team.";
        assert_eq!(clean_output(raw, ContentType::Email), raw);
    }

    #[test]
    fn video_gets_hook_marker_unless_present() {
        assert_eq!(
            clean_output("Welcome back!", ContentType::Video),
            "[Opening Hook]\nWelcome back!"
        );
        let hooked = "[Hook] Did you know?";
        assert_eq!(clean_output(hooked, ContentType::Video), hooked);
    }

    #[test]
    fn summary_label_is_removed() {
        assert_eq!(clean_output("Summary: The cat sat.", ContentType::Summarize), "The cat sat.");
    }

    #[test]
    fn summary_label_only_removed_at_start() {
        let raw = "The report ends. Summary: all good.";
        assert_eq!(clean_output(raw, ContentType::Summarize), raw);
    }

    #[test]
    fn trims_dangling_fragment_in_last_thirty_percent() {
        let text = long_text_with_period_at(120, 150);
        assert_eq!(text.chars().count(), 150);
        let cleaned = clean_output(&text, ContentType::Blog);
        assert_eq!(cleaned.chars().count(), 121);
        assert!(cleaned.ends_with("a."));
    }

    #[test]
    fn keeps_text_when_last_period_is_early() {
        let text = long_text_with_period_at(90, 150);
        assert_eq!(clean_output(&text, ContentType::Blog), text);
    }

    #[test]
    fn short_text_is_not_sentence_trimmed() {
        let text = "One sentence. And a fragment";
        assert_eq!(clean_output(text, ContentType::Content), text);
    }

    #[test]
    fn unknown_types_clean_like_content() {
        let raw = "Some  text\n\n\n\nwith [DONE] junk";
        assert_eq!(
            clean_output(raw, ContentType::resolve("newsletter")),
            clean_output(raw, ContentType::Content)
        );
    }

    #[test]
    fn cleaning_is_idempotent() {
        let fragment = "x".repeat(40);
        let samples = [
            "  Hello<|endoftext|>world  ".to_owned(),
            "Summary: Summary: nested labels.".to_owned(),
            "Thanks!\n\n\n\nBest,   Sam".to_owned(),
            format!("{}. [Hook] xx", "w".repeat(100)),
            format!("{} end. tail {fragment} <END>", "q ".repeat(60)),
            long_text_with_period_at(120, 150),
            "[END]".to_owned(),
            String::new(),
        ];

        for kind in ContentType::ALL {
            for sample in &samples {
                let once = clean_output(sample, kind);
                let twice = clean_output(&once, kind);
                assert_eq!(once, twice, "{kind}: {sample:?}");
                assert!(!once.contains("\n\n\n"));
                assert!(!once.contains("  "));
            }
        }
    }
}
