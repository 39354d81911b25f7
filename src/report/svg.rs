//! Minimal SVG element tree and serializer
//!
//! Charts are assembled as [`SvgNode`] trees and turned into text by a single
//! serializer, which owns all escaping and number formatting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::pipeline::Result;

/// An SVG element with attributes, children and optional text content
#[derive(Debug, Clone, PartialEq)]
pub struct SvgNode {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<SvgNode>,
    text: Option<String>,
}

impl SvgNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Add a string attribute
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    /// Add a numeric attribute, formatted with [`fmt_num`]
    pub fn num(self, name: &str, value: f64) -> Self {
        self.attr(name, fmt_num(value))
    }

    pub fn child(mut self, node: SvgNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = SvgNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Serialize the tree, two spaces of indentation per level
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }

        match (&self.text, self.children.is_empty()) {
            (None, true) => out.push_str("/>\n"),
            (Some(text), true) => {
                out.push('>');
                out.push_str(&escape(text));
                out.push_str("</");
                out.push_str(&self.tag);
                out.push_str(">\n");
            }
            (text, false) => {
                out.push_str(">\n");
                if let Some(text) = text {
                    out.push_str(&indent);
                    out.push_str("  ");
                    out.push_str(&escape(text));
                    out.push('\n');
                }
                for child in &self.children {
                    child.write_into(out, depth + 1);
                }
                out.push_str(&indent);
                out.push_str("</");
                out.push_str(&self.tag);
                out.push_str(">\n");
            }
        }
    }
}

/// Escape text for XML content and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Format a coordinate: at most two decimals, trailing zeros dropped.
pub fn fmt_num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// A fully rendered SVG document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDocument {
    svg: String,
}

impl ChartDocument {
    /// Render a root `<svg>` node into a document
    pub fn from_root(root: &SvgNode) -> Self {
        Self {
            svg: root.render(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.svg
    }

    /// Write the document to `path`, flushing before returning.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.svg.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for ChartDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(52.5), "52.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.33");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(440.0), "440");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_render_nested() {
        let node = SvgNode::new("g")
            .attr("class", "bars")
            .child(SvgNode::new("rect").num("width", 12.5))
            .child(SvgNode::new("text").text("Q&A"));
        assert_eq!(
            node.render(),
            "<g class=\"bars\">\n  <rect width=\"12.5\"/>\n  <text>Q&amp;A</text>\n</g>\n"
        );
    }
}
