//! Allow-list HTML builder.
//!
//! Fragments are assembled from typed elements whose tags and attributes are
//! checked against an explicit allow-list. Anything outside the list is
//! dropped, not escaped-and-kept. This is a security boundary: user data
//! only ever reaches output through escaped attribute values or escaped
//! text nodes.

use tracing::warn;

/// Per-tag attribute allow-list.
///
/// `div`, `iframe` and `video` carry the attributes gallery embeds need;
/// the remaining tags exist solely for the facade and provider placeholders
/// the renderer itself emits.
const ALLOWED: &[(&str, &[&str])] = &[
    ("div", &["class", "style", "data-embed-url", "data-provider", "role", "aria-label"]),
    (
        "iframe",
        &[
            "src",
            "width",
            "height",
            "frameborder",
            "allowfullscreen",
            "style",
            "title",
            "class",
            "loading",
        ],
    ),
    (
        "video",
        &[
            "src",
            "poster",
            "width",
            "height",
            "style",
            "controls",
            "loop",
            "muted",
            "autoplay",
            "playsinline",
            "class",
            "tabindex",
        ],
    ),
    ("img", &["src", "alt", "class", "style", "loading"]),
    ("button", &["type", "class", "aria-label"]),
    ("p", &["class"]),
    (
        "blockquote",
        &[
            "class",
            "cite",
            "style",
            "data-video-id",
            "data-instgrm-permalink",
            "data-instgrm-version",
        ],
    ),
    ("section", &[]),
    ("script", &["async", "src"]),
];

fn is_allowed(tag: &str, attr: &str) -> bool {
    // aria-* is permitted wherever the tag itself is allowed.
    if attr.starts_with("aria-") {
        return ALLOWED.iter().any(|(t, _)| *t == tag);
    }
    ALLOWED
        .iter()
        .find(|(t, _)| *t == tag)
        .map_or(false, |(_, attrs)| attrs.contains(&attr))
}

fn tag_allowed(tag: &str) -> bool {
    ALLOWED.iter().any(|(t, _)| *t == tag)
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text node content.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode characters that are unsafe inside a URL attribute.
///
/// Second line of defense after scheme rejection: quotes, whitespace,
/// angle brackets and non-ASCII are encoded so a crafted file URL cannot
/// break out of its attribute.
pub fn sanitize_url(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => out.push(c),
            '-' | '_' | '.' | '~' | ':' | '/' | '?' | '#' | '[' | ']' | '@' | '!' | '$' | '&'
            | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '%' => out.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    out
}

enum Node {
    Element(Element),
    Text(String),
    /// Compile-time constant markup (play-button SVG); never user data.
    StaticRaw(&'static str),
}

/// An element under construction.
///
/// Disallowed tags render to nothing; disallowed attributes are dropped
/// with a warning.
pub struct Element {
    tag: &'static str,
    attrs: Vec<(String, String)>,
    flags: Vec<&'static str>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        if !tag_allowed(tag) {
            warn!(tag = %tag, "Dropping element outside the allow-list");
        }
        Self {
            tag,
            attrs: Vec::new(),
            flags: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute; escaped on output.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if is_allowed(self.tag, name) {
            self.attrs.push((name.to_string(), value.to_string()));
        } else {
            warn!(tag = %self.tag, attr = %name, "Dropping attribute outside the allow-list");
        }
        self
    }

    /// Add a URL-valued attribute; percent-encoded then escaped on output.
    pub fn url_attr(self, name: &str, value: &str) -> Self {
        let sanitized = sanitize_url(value);
        self.attr(name, &sanitized)
    }

    /// Add a boolean attribute (`controls`, `muted`, ...).
    pub fn flag(mut self, name: &'static str) -> Self {
        if is_allowed(self.tag, name) {
            self.flags.push(name);
        } else {
            warn!(tag = %self.tag, attr = %name, "Dropping flag outside the allow-list");
        }
        self
    }

    /// Conditionally add a boolean attribute.
    pub fn flag_if(self, name: &'static str, condition: bool) -> Self {
        if condition {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    pub fn text(mut self, value: &str) -> Self {
        self.children.push(Node::Text(value.to_string()));
        self
    }

    pub(crate) fn static_raw(mut self, markup: &'static str) -> Self {
        self.children.push(Node::StaticRaw(markup));
        self
    }

    /// Render to an HTML string.
    pub fn build(&self) -> String {
        if !tag_allowed(self.tag) {
            return String::new();
        }

        let mut out = String::new();
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        for name in &self.flags {
            out.push(' ');
            out.push_str(name);
        }
        out.push('>');

        // img is the one void element in the allow-list; no closing tag.
        if self.tag == "img" {
            return out;
        }

        for child in &self.children {
            match child {
                Node::Element(el) => out.push_str(&el.build()),
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::StaticRaw(raw) => out.push_str(raw),
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_element() {
        let html = Element::new("div").attr("class", "wrapper").build();
        assert_eq!(html, r#"<div class="wrapper"></div>"#);
    }

    #[test]
    fn test_disallowed_tag_renders_nothing() {
        let html = Element::new("embed").attr("src", "x").build();
        assert_eq!(html, "");
    }

    #[test]
    fn test_disallowed_attribute_dropped_not_escaped() {
        let html = Element::new("iframe")
            .attr("src", "https://player.vimeo.com/video/1")
            .attr("onload", "alert(1)")
            .build();
        assert!(!html.contains("onload"));
        assert!(!html.contains("alert"));
        assert!(html.contains("src="));
    }

    #[test]
    fn test_attribute_value_escaped() {
        let html = Element::new("div")
            .attr("class", "\"><script>alert(1)</script>")
            .build();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_url_attr_breakout_blocked() {
        let html = Element::new("video")
            .url_attr("src", "https://example.com/clip.mp4\" onerror=\"alert(1)")
            .build();
        assert!(!html.contains("onerror=\"alert"));
        assert!(html.contains("%22"));
    }

    #[test]
    fn test_sanitize_url_keeps_reserved_chars() {
        assert_eq!(
            sanitize_url("https://example.com/a/b.mp4?x=1&y=2"),
            "https://example.com/a/b.mp4?x=1&y=2"
        );
        assert_eq!(sanitize_url("a b"), "a%20b");
        assert_eq!(sanitize_url("a\"b"), "a%22b");
        assert_eq!(sanitize_url("a'b"), "a%27b");
    }

    #[test]
    fn test_boolean_flags() {
        let html = Element::new("video")
            .url_attr("src", "https://example.com/v.mp4")
            .flag("controls")
            .flag_if("loop", false)
            .flag_if("muted", true)
            .build();
        assert!(html.contains(" controls"));
        assert!(html.contains(" muted"));
        assert!(!html.contains(" loop"));
    }

    #[test]
    fn test_text_node_escaped() {
        let html = Element::new("p").text("<b>bold</b> & more").build();
        assert_eq!(html, "<p>&lt;b&gt;bold&lt;/b&gt; &amp; more</p>");
    }

    #[test]
    fn test_aria_attributes_allowed() {
        let html = Element::new("video")
            .url_attr("src", "https://example.com/v.mp4")
            .attr("aria-label", "Product Video")
            .attr("aria-hidden", "true")
            .build();
        assert!(html.contains(r#"aria-label="Product Video""#));
        assert!(html.contains(r#"aria-hidden="true""#));
    }

    #[test]
    fn test_nested_children() {
        let html = Element::new("div")
            .attr("class", "outer")
            .child(Element::new("img").attr("src", "x.jpg").attr("alt", "t"))
            .build();
        assert!(html.starts_with(r#"<div class="outer"><img"#));
        assert!(html.ends_with("</div>"));
    }
}
