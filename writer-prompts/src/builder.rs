//! Instruction prompts for each content type.

use writer_primitives::ContentType;

use crate::template::interpolate;

const BLOG: &str = "Write a comprehensive and engaging blog post about: {{input}}

Create a well-structured blog post with the following elements:
- An attention-grabbing introduction
- Clear and informative main content with multiple paragraphs
- Practical examples or insights
- A strong conclusion

Blog Post:
";

const EMAIL: &str = "Write a professional email about: {{input}}

The email should include:
- A clear and relevant subject line
- Professional greeting
- Well-structured body with main message
- Appropriate closing and sign-off

Email:
Subject: \n\
Dear [Recipient],

";

const COPY: &str = "Write persuasive marketing copy for: {{input}}

Create compelling marketing copy that includes:
- An attention-grabbing headline
- Benefits-focused body text that resonates with the audience
- Emotional appeal and value proposition
- Strong call-to-action that motivates readers

Marketing Copy:
";

const SEO: &str = "Write SEO-optimized content about: {{input}}

Create search engine optimized content that includes:
- Relevant keywords naturally integrated throughout
- Clear headings and subheadings
- Informative and valuable content for readers
- Meta description friendly structure

SEO Content:
";

const VIDEO: &str = "Write an engaging video script about: {{input}}

Create a video script with:
- A powerful hook to grab attention in the first 5 seconds
- Clear and engaging main content
- Natural conversational tone
- Strong call-to-action at the end

Video Script:
[Opening Hook]
";

// The input is the text to condense, not a topic phrase.
const SUMMARIZE: &str = "Provide a clear and concise summary of the following text. Capture the main points and key information:

{{input}}

Summary:
";

const CONTENT: &str = "Generate creative and engaging content about: {{input}}

Create original content that is:
- Well-written and easy to read
- Informative and valuable
- Properly structured with clear flow

Content:
";

/// Paragraph separator used when splicing extra context into a prompt.
const PARAGRAPH_BREAK: &str = "\n\n";

const fn template(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Blog => BLOG,
        ContentType::Email => EMAIL,
        ContentType::Copy => COPY,
        ContentType::Seo => SEO,
        ContentType::Video => VIDEO,
        ContentType::Summarize => SUMMARIZE,
        ContentType::Content => CONTENT,
    }
}

const fn short_template(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Blog => "Write a blog post about {{input}}:\n\n",
        ContentType::Email => "Write a professional email about {{input}}:\n\n",
        ContentType::Copy => "Write marketing copy for {{input}}:\n\n",
        ContentType::Seo => "Write SEO content about {{input}}:\n\n",
        ContentType::Video => "Write a video script about {{input}}:\n\n",
        ContentType::Summarize => "Summarize: {{input}}\n\nSummary:\n",
        ContentType::Content => "Write about {{input}}:\n\n",
    }
}

/// Builds the structured instruction prompt for `content_type`.
///
/// # Examples
///
/// ```
/// use writer_primitives::ContentType;
/// use writer_prompts::build_prompt;
///
/// let prompt = build_prompt(ContentType::Blog, "urban beekeeping");
/// assert!(prompt.starts_with("Write a comprehensive and engaging blog post about: urban beekeeping"));
/// assert!(prompt.ends_with("Blog Post:\n"));
/// ```
#[must_use]
pub fn build_prompt(content_type: ContentType, input: &str) -> String {
    interpolate(template(content_type), input)
}

/// Builds the single-line prompt variant used for cheaper generation.
#[must_use]
pub fn build_short_prompt(content_type: ContentType, input: &str) -> String {
    interpolate(short_template(content_type), input)
}

/// Builds the structured prompt and splices `context` in before the final
/// generation cue. An empty `context` returns the plain prompt.
#[must_use]
pub fn add_context(content_type: ContentType, input: &str, context: &str) -> String {
    insert_context(&build_prompt(content_type, input), context)
}

/// Inserts an `Additional Context` paragraph before the last blank-line
/// separated segment of `base`.
///
/// A base prompt with a single paragraph has no cue segment to precede, so it
/// is returned unchanged, as is any prompt when `context` is empty.
#[must_use]
pub fn insert_context(base: &str, context: &str) -> String {
    if context.is_empty() {
        return base.to_owned();
    }

    let mut parts: Vec<&str> = base.split(PARAGRAPH_BREAK).collect();
    if parts.len() < 2 {
        return base.to_owned();
    }

    let section = format!("Additional Context: {context}");
    let cue = parts.len() - 1;
    parts.insert(cue, &section);
    parts.join(PARAGRAPH_BREAK)
}
