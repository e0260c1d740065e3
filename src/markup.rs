//! Telegram MarkdownV2 escaping and a span-based message builder.
//!
//! Every outgoing text is assembled from spans that are either literal text
//! (always escaped) or formatting tokens (emitted verbatim around escaped
//! content). The builder renders the MarkdownV2 string and a plain-text twin
//! in one pass, so no caller ever has to undo escaping to re-enable markup.

/// Characters MarkdownV2 reserves outside of entities.
pub const RESERVED: &str = "_*[]()~`>#+-=|{}.!";

/// Marker placed in front of each reserved character.
pub const ESCAPE: char = '\\';

pub fn is_reserved(c: char) -> bool {
    RESERVED.contains(c)
}

/// Prefix every reserved character in `text`, and the escape marker itself,
/// with [`ESCAPE`]. A bare backslash in the input would otherwise swallow the
/// marker inserted after it.
///
/// Not idempotent: escaping an already escaped string escapes it again.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if c == ESCAPE || is_reserved(c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// A rendered message: the MarkdownV2 form and the same content with no
/// formatting, for transports that refuse the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedText {
    pub markdown: String,
    pub plain: String,
}

#[derive(Debug, Clone)]
enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

/// Collects spans and renders them once.
///
/// ```
/// use idea_bot::markup::MessageBuilder;
///
/// let msg = MessageBuilder::new()
///     .bold("Done!")
///     .text(" Cost: 1.5$")
///     .finish();
/// assert_eq!(msg.markdown, "*Done\\!* Cost: 1\\.5$");
/// assert_eq!(msg.plain, "Done! Cost: 1.5$");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    spans: Vec<Span>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal text, escaped on render.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Text(text.into()));
        self
    }

    /// Literal text followed by a newline.
    pub fn line(self, text: impl Into<String>) -> Self {
        self.text(text).text("\n")
    }

    /// An empty line.
    pub fn blank(self) -> Self {
        self.text("\n")
    }

    pub fn bold(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Bold(text.into()));
        self
    }

    pub fn italic(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Italic(text.into()));
        self
    }

    pub fn code(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Code(text.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Append every span of `other`.
    pub fn extend(mut self, other: MessageBuilder) -> Self {
        self.spans.extend(other.spans);
        self
    }

    pub fn finish(&self) -> FormattedText {
        let mut markdown = String::new();
        let mut plain = String::new();
        for span in &self.spans {
            match span {
                Span::Text(t) => {
                    markdown.push_str(&escape(t));
                    plain.push_str(t);
                }
                Span::Bold(t) => {
                    markdown.push('*');
                    markdown.push_str(&escape(t));
                    markdown.push('*');
                    plain.push_str(t);
                }
                Span::Italic(t) => {
                    markdown.push('_');
                    markdown.push_str(&escape(t));
                    markdown.push('_');
                    plain.push_str(t);
                }
                Span::Code(t) => {
                    markdown.push('`');
                    markdown.push_str(&escape(t));
                    markdown.push('`');
                    plain.push_str(t);
                }
            }
        }
        FormattedText { markdown, plain }
    }
}

/// Convert completion output written in loose Markdown into spans.
///
/// Balanced `*…*` (or `**…**`) pairs on one line become bold; a leading
/// `* ` or `- ` bullet becomes `•`; everything else, including unbalanced
/// markers, is literal text.
pub fn render_model_text(text: &str) -> FormattedText {
    let mut builder = MessageBuilder::new();
    for (i, raw_line) in text.lines().enumerate() {
        if i > 0 {
            builder = builder.text("\n");
        }
        builder = render_line(builder, raw_line);
    }
    builder.finish()
}

fn render_line(mut builder: MessageBuilder, raw_line: &str) -> MessageBuilder {
    let line = raw_line.replace("**", "*");
    let indent_len = line.len() - line.trim_start().len();
    let (indent, body) = line.split_at(indent_len);

    let body = match body.strip_prefix("* ").or_else(|| body.strip_prefix("- ")) {
        Some(rest) => {
            builder = builder.text(format!("{indent}• "));
            rest
        }
        None => {
            if !indent.is_empty() {
                builder = builder.text(indent);
            }
            body
        }
    };

    let markers: Vec<usize> = body.match_indices('*').map(|(i, _)| i).collect();
    let paired = markers.len() - markers.len() % 2;

    let mut pos = 0;
    for pair in markers[..paired].chunks(2) {
        let (open, close) = (pair[0], pair[1]);
        let inner = &body[open + 1..close];
        if inner.trim().is_empty() {
            continue;
        }
        if open > pos {
            builder = builder.text(&body[pos..open]);
        }
        builder = builder.bold(inner);
        pos = close + 1;
    }
    if pos < body.len() {
        builder = builder.text(&body[pos..]);
    }
    builder
}

/// Reserved characters in `text` that are not preceded by an escape marker,
/// in order of appearance.
#[cfg(test)]
pub(crate) fn bare_reserved(text: &str) -> Vec<char> {
    let chars: Vec<char> = text.chars().collect();
    let mut bare = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ESCAPE && chars.get(i + 1).is_some_and(|c| *c == ESCAPE || is_reserved(*c)) {
            i += 2;
            continue;
        }
        if is_reserved(chars[i]) {
            bare.push(chars[i]);
        }
        i += 1;
    }
    bare
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Remove exactly the markers `escape` inserts.
    fn strip_escapes(text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == ESCAPE && chars.get(i + 1).is_some_and(|c| *c == ESCAPE || is_reserved(*c)) {
                out.push(chars[i + 1]);
                i += 2;
            } else {
                out.push(chars[i]);
                i += 1;
            }
        }
        out
    }

    fn fully_escaped(text: &str) -> bool {
        bare_reserved(text).is_empty()
    }

    #[test]
    fn escapes_every_reserved_character() {
        assert_eq!(escape(RESERVED), "\\_\\*\\[\\]\\(\\)\\~\\`\\>\\#\\+\\-\\=\\|\\{\\}\\.\\!");
    }

    #[test]
    fn leaves_other_text_alone() {
        assert_eq!(escape("Hello 🚀 world, ok?"), "Hello 🚀 world, ok?");
    }

    #[test]
    fn escaping_twice_double_escapes() {
        let once = escape(".");
        assert_eq!(once, "\\.");
        assert_eq!(escape(&once), "\\\\\\.");
        assert_ne!(escape(&once), once);
    }

    #[test]
    fn builder_escapes_text_but_not_markers() {
        let msg = MessageBuilder::new()
            .bold("Welcome to Business Ideas Generator Bot!")
            .blank()
            .text("• /start - Show this welcome message")
            .finish();
        assert_eq!(
            msg.markdown,
            "*Welcome to Business Ideas Generator Bot\\!*\n• /start \\- Show this welcome message"
        );
        assert_eq!(
            msg.plain,
            "Welcome to Business Ideas Generator Bot!\n• /start - Show this welcome message"
        );
    }

    #[test]
    fn builder_italic_and_code() {
        let msg = MessageBuilder::new()
            .italic("Category: a_b")
            .text(" ")
            .code("x`y\\z.")
            .finish();
        assert_eq!(msg.markdown, "_Category: a\\_b_ `x\\`y\\\\z\\.`");
        assert_eq!(msg.plain, "Category: a_b x`y\\z.");
    }

    #[test]
    fn builder_extend_appends() {
        let head = MessageBuilder::new().bold("A");
        let tail = MessageBuilder::new().text("b.");
        assert_eq!(head.extend(tail).finish().markdown, "*A*b\\.");
    }

    #[test]
    fn model_text_pairs_become_bold() {
        let out = render_model_text("*🚀 Business Idea: Foo.io*\nGreat - really!");
        assert_eq!(out.markdown, "*🚀 Business Idea: Foo\\.io*\nGreat \\- really\\!");
        assert_eq!(out.plain, "🚀 Business Idea: Foo.io\nGreat - really!");
    }

    #[test]
    fn model_text_double_star_is_bold() {
        let out = render_model_text("**Core Concept** here");
        assert_eq!(out.markdown, "*Core Concept* here");
    }

    #[test]
    fn model_text_unbalanced_marker_is_escaped() {
        let out = render_model_text("5 * 3 = 15");
        assert_eq!(out.markdown, "5 \\* 3 \\= 15");
        assert!(fully_escaped(&out.markdown));
    }

    #[test]
    fn model_text_bullets() {
        let out = render_model_text("* one\n  - two");
        assert_eq!(out.markdown, "• one\n  • two");
    }

    #[test]
    fn model_text_empty_pair_stays_literal() {
        let out = render_model_text("a ** b");
        // `**` collapses to a single unbalanced marker.
        assert_eq!(out.markdown, "a \\* b");
    }

    proptest! {
        #[test]
        fn escape_round_trips(text in "[_*\\[\\]()~`>#+\\-=|{}.!\\\\a-z 🚀]{0,64}") {
            let escaped = escape(&text);
            prop_assert_eq!(strip_escapes(&escaped), text);
        }

        #[test]
        fn escape_leaves_no_bare_reserved(text in ".{0,64}") {
            prop_assert!(fully_escaped(&escape(&text)));
        }

        #[test]
        fn builder_plain_matches_inputs(a in ".{0,24}", b in ".{0,24}") {
            let msg = MessageBuilder::new().text(a.clone()).bold(b.clone()).finish();
            prop_assert_eq!(msg.plain, format!("{a}{b}"));
        }
    }
}
