//! Doc comment to markup conversion.
//!
//! Doc comments are free text. The only structure recognized is indentation:
//! a run of indented lines is treated as verbatim text and wrapped in a
//! `<pre>` block. Everything else is escaped and passed through line by line.

use serde::{Deserialize, Serialize};
use std::fmt;

const PRE_OPEN: &str = "<pre>\n\n";
const PRE_CLOSE: &str = "</pre>\n";

/// A fragment of escaped markup, safe to embed in a rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wraps text that is already known to be safe markup.
    pub fn from_trusted(markup: impl Into<String>) -> Self {
        Markup(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts raw doc comment text into markup.
///
/// A line starting with whitespace opens a preformatted block; the next
/// non-empty line that does not start with whitespace closes it. Empty lines
/// never change the state. A block still open after the last line is closed.
///
/// # Examples
///
/// ```
/// use propdoc::markup::format_text;
///
/// let markup = format_text("a\n  b\nc");
/// assert_eq!(markup.as_str(), "a\n<pre>\n\n  b\n</pre>\nc\n");
/// ```
pub fn format_text(text: &str) -> Markup {
    let mut html = String::with_capacity(text.len() + 16);
    let mut preformatted = false;

    for line in text.split('\n') {
        let indent = line.chars().next().is_some_and(char::is_whitespace);
        if indent && !preformatted {
            html.push_str(PRE_OPEN);
            preformatted = true;
        } else if !indent && !line.is_empty() && preformatted {
            html.push_str(PRE_CLOSE);
            preformatted = false;
        }
        escape_into(&mut html, line);
        html.push('\n');
    }

    if preformatted {
        html.push_str(PRE_CLOSE);
    }

    Markup(html)
}

/// Escapes text for embedding in HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '\0' => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
}
