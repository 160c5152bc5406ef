//! Ordered HTML attribute map.
//!
//! Attribute names are case-insensitive in HTML, so keys are lower-cased on
//! insert. Insertion order is the output order; setting a name again replaces
//! the value in place instead of moving it to the end.
//!
//! Values are typed:
//!
//! | Value | Renders as |
//! |---|---|
//! | `Text("a b")` | `name="a b"` (entity-escaped) |
//! | `Int(3)` | `name="3"` |
//! | `Flag` | `name` (boolean attribute) |
//! | `Null` | nothing; the entry is kept but omitted |

use maud::html;
use std::fmt;

/// Computed attributes that callers cannot override on `<img>` and `<source>`.
pub const PROTECTED: [&str; 3] = ["src", "srcset", "sizes"];

pub(crate) fn is_protected(name: &str) -> bool {
    PROTECTED.iter().any(|p| p.eq_ignore_ascii_case(name.trim()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Flag,
    Null,
}

impl AttrValue {
    /// Text that renders as `name=""`, or a null entry.
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Text(text) => text.is_empty(),
            AttrValue::Null => true,
            AttrValue::Int(_) | AttrValue::Flag => false,
        }
    }

    /// String form of a valued attribute.
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttrValue::Text(text) => Some(text.clone()),
            AttrValue::Int(n) => Some(n.to_string()),
            AttrValue::Flag | AttrValue::Null => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Text(value.clone())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

/// `true` is a boolean attribute, `false` removes it from the output.
impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        if value { AttrValue::Flag } else { AttrValue::Null }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Blank names are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> &mut Self {
        let key = name.trim().to_ascii_lowercase();
        if key.is_empty() {
            return self;
        }
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Consuming form of [`set`](Self::set), for filter closures.
    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        let key = name.trim().to_ascii_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let key = name.trim().to_ascii_lowercase();
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as an opening tag: `<tag a="1" b>`, or `<tag>` when nothing
    /// is emitted.
    ///
    /// Null entries are always skipped; names listed in `omit_if_empty` are
    /// skipped when their text is empty.
    pub fn render_tag(&self, tag: &str, omit_if_empty: &[&str]) -> String {
        let mut out = format!("<{tag}");
        for (name, value) in &self.entries {
            if value.is_empty() && (*value == AttrValue::Null || omit_if_empty.contains(&name.as_str())) {
                continue;
            }
            out.push(' ');
            out.push_str(&escape(name));
            if let Some(text) = value.as_text() {
                out.push_str("=\"");
                out.push_str(&escape(&text));
                out.push('"');
            }
        }
        out.push('>');
        out
    }
}

impl fmt::Display for Attributes {
    /// Attribute list only, without the surrounding tag.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.render_tag("", &[]);
        f.write_str(tag.trim_start_matches('<').trim_end_matches('>').trim_start())
    }
}

impl<'a, V: Into<AttrValue>> FromIterator<(&'a str, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

/// Entity-escape text through maud.
fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}
