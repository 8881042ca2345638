use serde_json::{Map, Value};
use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::common::error::{Result, ShowMapError};

/// Tokenizer filtered down to elements, text and CDATA.
struct Iter<'a>(Tokenizer<'a>);

impl<'a> Iterator for Iter<'a> {
    type Item = <Tokenizer<'a> as Iterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        // Attributes, declarations, comments and DTDs carry nothing the
        // registry payloads use.
        self.0.find(|token| {
            matches!(
                token,
                Err(_)
                    | Ok(Token::ElementStart { .. })
                    | Ok(Token::ElementEnd { .. })
                    | Ok(Token::Text { .. })
                    | Ok(Token::Cdata { .. })
            )
        })
    }
}

/// An element still being read.
struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), children: Map::new(), text: String::new() }
    }

    /// Elements with children become objects, leaf elements become their
    /// trimmed text, and empty elements become `null`.
    fn into_value(self) -> Value {
        if !self.children.is_empty() {
            return Value::Object(self.children);
        }
        let text = self.text.trim();
        if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_string())
        }
    }

    /// Repeated child names collect into an array in document order.
    fn insert(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }
}

/// Converts an XML document into a JSON-like tree keyed by element name.
///
/// `<dbs><db><a>1</a></db></dbs>` becomes `{"dbs": {"db": {"a": "1"}}}`, and
/// a second `<db>` sibling turns `db` into an array. Leaf text is never coerced
/// to numbers. Attributes are dropped.
pub fn to_value(src: &str) -> Result<Value> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut root = Map::new();

    for token in Iter(Tokenizer::from(src)) {
        match token? {
            Token::ElementStart { local, .. } => {
                stack.push(Frame::new(local.as_str()));
            }
            Token::ElementEnd { end, .. } => {
                if end == ElementEnd::Open {
                    continue;
                }
                let frame = stack
                    .pop()
                    .ok_or_else(|| ShowMapError::Markup("unbalanced closing tag".into()))?;
                if let ElementEnd::Close(_, local) = end {
                    if local.as_str() != frame.name {
                        return Err(ShowMapError::Markup(format!(
                            "expected </{}>, found </{}>",
                            frame.name,
                            local.as_str()
                        )));
                    }
                }
                let name = frame.name.clone();
                let value = frame.into_value();
                match stack.last_mut() {
                    Some(parent) => parent.insert(name, value),
                    None => {
                        root.insert(name, value);
                    }
                }
            }
            Token::Text { text } => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&unescape(text.as_str()));
                }
            }
            Token::Cdata { text, .. } => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(text.as_str());
                }
            }
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ShowMapError::Markup(format!("unclosed element <{}>", open.name)));
    }
    if root.is_empty() {
        return Err(ShowMapError::Markup("document has no root element".into()));
    }
    Ok(Value::Object(root))
}

/// Resolves the predefined entities and numeric character references.
fn unescape(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
