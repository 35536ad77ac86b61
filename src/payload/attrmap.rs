//! Element text form of attribute-map payload trees.
//!
//! A tree serializes as `<map><entry key=".." type="..">..</entry>..</map>`
//! with nested maps as nested entry lists. Keys and text values are escaped
//! so arbitrary characters survive the round trip; the `null` type is the
//! explicit empty marker, distinct from a missing key.

use super::node::{Number, PayloadMap, PayloadNode};
use crate::error::{EvokitError, Result};

/// Canonical text of the empty default tree.
pub const EMPTY_ATTR_MAP: &str = "<map></map>";

pub fn serialize(node: &PayloadNode) -> Result<String> {
    let map = match node {
        PayloadNode::Object(map) => map,
        _ => {
            return Err(EvokitError::PayloadParse(
                "attribute-map root must be a map".to_string(),
            ))
        }
    };
    let mut out = String::from("<map>");
    write_entries(map, &mut out)?;
    out.push_str("</map>");
    Ok(out)
}

pub fn deserialize(text: &str) -> Result<PayloadNode> {
    let mut parser = Parser { text, pos: 0 };
    let root = parser.parse_root()?;
    Ok(root)
}

fn write_entries(map: &PayloadMap, out: &mut String) -> Result<()> {
    for (key, value) in map {
        out.push_str("<entry key=\"");
        escape_into(key, true, out);
        out.push_str("\" type=\"");
        out.push_str(type_name(value)?);
        out.push_str("\">");
        match value {
            PayloadNode::Null => {}
            PayloadNode::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            PayloadNode::Num(Number::Int(i)) => out.push_str(&i.to_string()),
            PayloadNode::Num(Number::Float(f)) => out.push_str(&f.to_string()),
            PayloadNode::Text(s) => escape_into(s, false, out),
            PayloadNode::Object(nested) => write_entries(nested, out)?,
            PayloadNode::Array(_) => unreachable!("rejected by type_name"),
        }
        out.push_str("</entry>");
    }
    Ok(())
}

fn type_name(value: &PayloadNode) -> Result<&'static str> {
    match value {
        PayloadNode::Null => Ok("null"),
        PayloadNode::Bool(_) => Ok("bool"),
        PayloadNode::Num(Number::Int(_)) => Ok("int"),
        PayloadNode::Num(Number::Float(_)) => Ok("float"),
        PayloadNode::Text(_) => Ok("str"),
        PayloadNode::Object(_) => Ok("map"),
        PayloadNode::Array(_) => Err(EvokitError::PayloadParse(
            "arrays are not representable in the attribute-map form".to_string(),
        )),
    }
}

fn escape_into(s: &str, quote_attr: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote_attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

fn unescape(s: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let semi = after
            .find(';')
            .ok_or_else(|| EvokitError::PayloadParse("unterminated entity".to_string()))?;
        match &after[1..semi] {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            other => {
                return Err(EvokitError::PayloadParse(format!(
                    "unknown entity &{};",
                    other
                )))
            }
        }
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_root(&mut self) -> Result<PayloadNode> {
        self.skip_ws();
        self.expect("<map>")?;
        let map = self.parse_entries("</map>")?;
        self.skip_ws();
        if self.pos != self.text.len() {
            return Err(self.err("trailing content after root map"));
        }
        Ok(PayloadNode::Object(map))
    }

    fn parse_entries(&mut self, closing: &str) -> Result<PayloadMap> {
        let mut map = PayloadMap::new();
        loop {
            self.skip_ws();
            if self.eat(closing) {
                return Ok(map);
            }
            self.expect("<entry key=\"")?;
            let key = self.parse_quoted()?;
            self.expect(" type=\"")?;
            let type_name = self.parse_quoted()?;
            self.expect(">")?;
            let value = match type_name.as_str() {
                "null" => {
                    self.expect("</entry>")?;
                    PayloadNode::Null
                }
                "bool" => {
                    let raw = self.parse_scalar()?;
                    match raw.as_str() {
                        "true" => PayloadNode::Bool(true),
                        "false" => PayloadNode::Bool(false),
                        _ => return Err(self.err("invalid bool payload")),
                    }
                }
                "int" => {
                    let raw = self.parse_scalar()?;
                    let parsed = raw
                        .parse::<i64>()
                        .map_err(|_| self.err("invalid int payload"))?;
                    PayloadNode::Num(Number::Int(parsed))
                }
                "float" => {
                    let raw = self.parse_scalar()?;
                    let parsed = raw
                        .parse::<f64>()
                        .map_err(|_| self.err("invalid float payload"))?;
                    PayloadNode::Num(Number::Float(parsed))
                }
                "str" => PayloadNode::Text(self.parse_scalar()?),
                "map" => PayloadNode::Object(self.parse_entries("</entry>")?),
                _ => return Err(self.err("unknown entry type")),
            };
            map.insert(key, value);
        }
    }

    /// Reads up to the closing quote of an attribute value and unescapes it.
    fn parse_quoted(&mut self) -> Result<String> {
        let rest = &self.text[self.pos..];
        let end = rest
            .find('"')
            .ok_or_else(|| self.err("unterminated attribute value"))?;
        let raw = &rest[..end];
        self.pos += end + 1;
        unescape(raw)
    }

    /// Reads a scalar payload up to its closing tag and unescapes it.
    fn parse_scalar(&mut self) -> Result<String> {
        let rest = &self.text[self.pos..];
        let end = rest
            .find('<')
            .ok_or_else(|| self.err("unterminated entry payload"))?;
        let raw = &rest[..end];
        self.pos += end;
        self.expect("</entry>")?;
        unescape(raw)
    }

    fn skip_ws(&mut self) {
        let rest = &self.text[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.text[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.err(&format!("expected `{}`", token)))
        }
    }

    fn err(&self, message: &str) -> EvokitError {
        EvokitError::PayloadParse(format!("{} at byte {}", message, self.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(node: PayloadNode) {
        let text = serialize(&node).unwrap();
        assert_eq!(deserialize(&text).unwrap(), node);
    }

    fn map_of(entries: Vec<(&str, PayloadNode)>) -> PayloadNode {
        let mut map = PayloadMap::new();
        for (key, value) in entries {
            map.insert(key.to_string(), value);
        }
        PayloadNode::Object(map)
    }

    #[test]
    fn empty_map_round_trips() {
        assert_eq!(serialize(&PayloadNode::empty_object()).unwrap(), EMPTY_ATTR_MAP);
        assert_eq!(
            deserialize(EMPTY_ATTR_MAP).unwrap(),
            PayloadNode::empty_object()
        );
    }

    #[test]
    fn scalar_values_round_trip() {
        round_trip(map_of(vec![
            ("missing", PayloadNode::Null),
            ("flag", PayloadNode::Bool(true)),
            ("count", PayloadNode::Num(Number::Int(-7))),
            ("ratio", PayloadNode::Num(Number::Float(2.0))),
            ("name", PayloadNode::Text("plain".to_string())),
            ("empty", PayloadNode::Text(String::new())),
        ]));
    }

    #[test]
    fn nested_maps_round_trip() {
        round_trip(map_of(vec![(
            "outer",
            map_of(vec![
                ("inner", map_of(vec![("leaf", PayloadNode::Num(Number::Int(1)))])),
                ("beside", PayloadNode::Bool(false)),
            ]),
        )]));
    }

    #[test]
    fn hostile_keys_and_text_round_trip() {
        round_trip(map_of(vec![
            ("a\"b<c>&d", PayloadNode::Text("x & <y> \"z\"".to_string())),
            ("", PayloadNode::Text("空 whitespace  kept ".to_string())),
        ]));
    }

    #[test]
    fn null_marker_differs_from_absent_key() {
        let with_marker = map_of(vec![("k", PayloadNode::Null)]);
        let text = serialize(&with_marker).unwrap();
        assert!(text.contains("type=\"null\""));
        assert_ne!(deserialize(&text).unwrap(), PayloadNode::empty_object());
    }

    #[test]
    fn whitespace_between_entries_is_tolerated() {
        let text = "<map>\n  <entry key=\"a\" type=\"int\">3</entry>\n</map>";
        assert_eq!(
            deserialize(text).unwrap(),
            map_of(vec![("a", PayloadNode::Num(Number::Int(3)))])
        );
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(deserialize("").is_err());
        assert!(deserialize("<map>").is_err());
        assert!(deserialize("<map><entry key=\"a\">3</entry></map>").is_err());
        assert!(deserialize("<map><entry key=\"a\" type=\"int\">x</entry></map>").is_err());
        assert!(deserialize("<map></map> extra").is_err());
    }

    #[test]
    fn arrays_are_rejected_by_the_writer() {
        let node = map_of(vec![("bad", PayloadNode::Array(vec![]))]);
        assert!(serialize(&node).is_err());
    }
}
