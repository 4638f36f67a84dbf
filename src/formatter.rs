//! Light markup for chat messages.
//!
//! Recognises, in priority order: fenced code blocks, inline code, `**bold**`
//! emphasis and bare `http(s)://` URLs. Everything else is plain text.
//! The lexer is total: unterminated delimiters fall back to plain text, so it
//! can run on a reply that is still being typed out.

const FENCE: &str = "```";
const TICK: char = '`';
const BOLD: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Plain,
    CodeBlock,
    InlineCode,
    Link,
    Emphasis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(SegmentKind::Plain, content)
    }
}

/// Splits `text` into styled segments. Adjacent plain runs are merged, and
/// text without markup (including the empty string) is one plain segment.
pub fn format(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        return vec![Segment::plain("")];
    }

    let mut segments: Vec<Segment> = Vec::new();

    for token in Lexer::new(text) {
        match (segments.last_mut(), token.kind) {
            (Some(prev), SegmentKind::Plain) if prev.kind == SegmentKind::Plain => {
                prev.content.push_str(token.text);
            }
            _ => segments.push(Segment::new(token.kind, token.text)),
        }
    }

    segments
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    kind: SegmentKind,
    text: &'a str,
}

/// Single-pass scanner over the message text. Each call to `next` consumes
/// exactly one recognised span or one run of plain text.
struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn token(&mut self, kind: SegmentKind, text: &'a str, consumed: usize) -> Token<'a> {
        self.pos += consumed;
        Token { kind, text }
    }

    fn code_block(&mut self) -> Option<Token<'a>> {
        let body = self.rest().strip_prefix(FENCE)?;
        let end = body.find(FENCE)?;
        Some(self.token(SegmentKind::CodeBlock, &body[..end], end + 2 * FENCE.len()))
    }

    fn inline_code(&mut self) -> Option<Token<'a>> {
        let body = self.rest().strip_prefix(TICK)?;
        let end = body.find(TICK)?;
        if end == 0 {
            return None;
        }
        Some(self.token(SegmentKind::InlineCode, &body[..end], end + 2 * TICK.len_utf8()))
    }

    fn emphasis(&mut self) -> Option<Token<'a>> {
        let body = self.rest().strip_prefix(BOLD)?;
        let end = body.find('*')?;
        if end == 0 || !body[end..].starts_with(BOLD) {
            return None;
        }
        Some(self.token(SegmentKind::Emphasis, &body[..end], end + 2 * BOLD.len()))
    }

    fn link(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        let scheme = ["https://", "http://"]
            .into_iter()
            .find(|scheme| rest.starts_with(scheme))?;
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if len == scheme.len() {
            return None;
        }
        Some(self.token(SegmentKind::Link, &rest[..len], len))
    }

    fn starts_span(s: &str) -> bool {
        s.starts_with(TICK) || s.starts_with(BOLD) || s.starts_with("http")
    }

    /// Plain text up to the next position where a span could start. Only the
    /// first character of a delimiter that failed to open a span is consumed,
    /// so a broken fence can still lead into inline code.
    fn plain(&mut self) -> Token<'a> {
        let rest = self.rest();
        let skip = rest.chars().next().map_or(0, char::len_utf8);

        let end = rest[skip..]
            .char_indices()
            .map(|(i, _)| skip + i)
            .find(|&i| Self::starts_span(&rest[i..]))
            .unwrap_or(rest.len());

        self.token(SegmentKind::Plain, &rest[..end], end)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.src.len() {
            return None;
        }

        let token = self
            .code_block()
            .or_else(|| self.inline_code())
            .or_else(|| self.emphasis())
            .or_else(|| self.link())
            .unwrap_or_else(|| self.plain());
        Some(token)
    }
}

/// Concatenated segment contents, i.e. the text as displayed.
pub fn display_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.content.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(segments: &[Segment]) -> Vec<SegmentKind> {
        segments.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_plain_text_is_single_segment() {
        let text = "just some words, with punctuation! and * stars";
        assert_eq!(format(text), vec![Segment::plain(text)]);
    }

    #[test]
    fn test_empty_text_is_single_plain_segment() {
        assert_eq!(format(""), vec![Segment::plain("")]);
    }

    #[test]
    fn test_code_block_strips_fences() {
        assert_eq!(
            format("```code```"),
            vec![Segment::new(SegmentKind::CodeBlock, "code")]
        );
    }

    #[test]
    fn test_multiline_code_block() {
        let segments = format("Try:\n```rust\nfn main() {}\n```\ndone");
        assert_eq!(
            kinds(&segments),
            vec![SegmentKind::Plain, SegmentKind::CodeBlock, SegmentKind::Plain]
        );
        assert_eq!(segments[1].content, "rust\nfn main() {}\n");
        assert_eq!(segments[2].content, "\ndone");
    }

    #[test]
    fn test_unterminated_fence_is_plain() {
        let segments = format("```abc");
        assert_eq!(segments, vec![Segment::plain("```abc")]);
        assert!(display_text(&segments).contains("abc"));
    }

    #[test]
    fn test_inline_code() {
        let segments = format("call `foo()` now");
        assert_eq!(
            segments,
            vec![
                Segment::plain("call "),
                Segment::new(SegmentKind::InlineCode, "foo()"),
                Segment::plain(" now"),
            ]
        );
    }

    #[test]
    fn test_double_backtick_falls_through_to_inline_code() {
        let segments = format("``x`");
        assert_eq!(
            segments,
            vec![
                Segment::plain("`"),
                Segment::new(SegmentKind::InlineCode, "x"),
            ]
        );
    }

    #[test]
    fn test_unopened_fence_leads_into_inline_code() {
        let segments = format("```abc` def");
        assert_eq!(
            segments,
            vec![
                Segment::plain("``"),
                Segment::new(SegmentKind::InlineCode, "abc"),
                Segment::plain(" def"),
            ]
        );
    }

    #[test]
    fn test_emphasis() {
        let segments = format("this is **important** stuff");
        assert_eq!(segments[1], Segment::new(SegmentKind::Emphasis, "important"));
        assert_eq!(display_text(&segments), "this is important stuff");
    }

    #[test]
    fn test_unterminated_emphasis_is_plain() {
        assert_eq!(format("**bold"), vec![Segment::plain("**bold")]);
        assert_eq!(format("a **b* c"), vec![Segment::plain("a **b* c")]);
    }

    #[test]
    fn test_triple_star_keeps_leading_star() {
        let segments = format("***x**");
        assert_eq!(
            segments,
            vec![
                Segment::plain("*"),
                Segment::new(SegmentKind::Emphasis, "x"),
            ]
        );
    }

    #[test]
    fn test_links_stop_at_whitespace() {
        let segments = format("see https://example.com/a?b=c and http://x.io");
        assert_eq!(
            segments,
            vec![
                Segment::plain("see "),
                Segment::new(SegmentKind::Link, "https://example.com/a?b=c"),
                Segment::plain(" and "),
                Segment::new(SegmentKind::Link, "http://x.io"),
            ]
        );
    }

    #[test]
    fn test_bare_scheme_is_not_a_link() {
        assert_eq!(format("https:// "), vec![Segment::plain("https:// ")]);
        assert_eq!(format("httpx"), vec![Segment::plain("httpx")]);
    }

    #[test]
    fn test_markup_inside_code_is_literal() {
        let segments = format("```**no** https://a.b```");
        assert_eq!(
            segments,
            vec![Segment::new(SegmentKind::CodeBlock, "**no** https://a.b")]
        );

        let segments = format("`**x**`");
        assert_eq!(segments, vec![Segment::new(SegmentKind::InlineCode, "**x**")]);
    }

    #[test]
    fn test_streaming_prefixes_never_panic() {
        let full = "Olá! Use `cargo run` e veja **isto**:\n```sh\necho 🚀\n```\nhttps://é.com fim";
        for (i, _) in full.char_indices() {
            let partial = &full[..i];
            let shown = display_text(&format(partial));
            assert!(shown.len() <= partial.len());
        }
        let segments = format(full);
        assert!(segments.iter().any(|s| s.kind == SegmentKind::CodeBlock));
        assert!(segments.iter().any(|s| s.kind == SegmentKind::Link));
    }
}
