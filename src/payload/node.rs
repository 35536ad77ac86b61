use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered string-keyed map used for object nodes. Entries keep insertion
/// order and are addressable by position, which uniform random selection
/// relies on.
pub type PayloadMap = IndexMap<String, PayloadNode>;

/// Serialization family of a structured payload gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadKind {
    /// Full JSON documents: any node shape is legal at any position.
    Json,
    /// String-keyed attribute maps: one top-level map, values restricted to
    /// null marker, booleans, numbers, text and nested maps.
    AttrMap,
}

/// Numeric payload value. Integer and floating literals stay distinct
/// through mutation and serialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// One node of a structured payload tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadNode {
    Null,
    Bool(bool),
    Num(Number),
    Text(String),
    Array(Vec<PayloadNode>),
    Object(PayloadMap),
}

impl PayloadNode {
    pub fn empty_object() -> Self {
        PayloadNode::Object(PayloadMap::new())
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, PayloadNode::Array(_) | PayloadNode::Object(_))
    }

    /// Number of direct children. Zero for leaves.
    pub fn child_count(&self) -> usize {
        match self {
            PayloadNode::Array(items) => items.len(),
            PayloadNode::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub(crate) fn child_at_mut(&mut self, index: usize) -> Option<&mut PayloadNode> {
        match self {
            PayloadNode::Array(items) => items.get_mut(index),
            PayloadNode::Object(map) => map.get_index_mut(index).map(|(_, v)| v),
            _ => None,
        }
    }

    pub(crate) fn remove_child(&mut self, index: usize) -> Option<PayloadNode> {
        match self {
            PayloadNode::Array(items) => {
                if index < items.len() {
                    Some(items.remove(index))
                } else {
                    None
                }
            }
            PayloadNode::Object(map) => map.shift_remove_index(index).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Positions of direct children that are themselves containers.
    pub(crate) fn compound_child_indices(&self) -> Vec<usize> {
        match self {
            PayloadNode::Array(items) => items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.is_compound())
                .map(|(i, _)| i)
                .collect(),
            PayloadNode::Object(map) => map
                .values()
                .enumerate()
                .filter(|(_, value)| value.is_compound())
                .map(|(i, _)| i)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Serialize for PayloadNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PayloadNode::Null => serializer.serialize_unit(),
            PayloadNode::Bool(b) => serializer.serialize_bool(*b),
            PayloadNode::Num(Number::Int(i)) => serializer.serialize_i64(*i),
            PayloadNode::Num(Number::Float(f)) => serializer.serialize_f64(*f),
            PayloadNode::Text(s) => serializer.serialize_str(s),
            PayloadNode::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PayloadNode::Object(map) => {
                let mut obj = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    obj.serialize_entry(key, value)?;
                }
                obj.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PayloadNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = PayloadNode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a structured payload value")
            }

            fn visit_unit<E>(self) -> std::result::Result<PayloadNode, E>
            where
                E: de::Error,
            {
                Ok(PayloadNode::Null)
            }

            fn visit_bool<E>(self, v: bool) -> std::result::Result<PayloadNode, E>
            where
                E: de::Error,
            {
                Ok(PayloadNode::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<PayloadNode, E>
            where
                E: de::Error,
            {
                Ok(PayloadNode::Num(Number::Int(v)))
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<PayloadNode, E>
            where
                E: de::Error,
            {
                // Literals beyond the signed range lose exactness either way;
                // follow the float route.
                if v <= i64::MAX as u64 {
                    Ok(PayloadNode::Num(Number::Int(v as i64)))
                } else {
                    Ok(PayloadNode::Num(Number::Float(v as f64)))
                }
            }

            fn visit_f64<E>(self, v: f64) -> std::result::Result<PayloadNode, E>
            where
                E: de::Error,
            {
                Ok(PayloadNode::Num(Number::Float(v)))
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<PayloadNode, E>
            where
                E: de::Error,
            {
                Ok(PayloadNode::Text(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<PayloadNode, E>
            where
                E: de::Error,
            {
                Ok(PayloadNode::Text(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<PayloadNode, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(PayloadNode::Array(items))
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<PayloadNode, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = PayloadMap::new();
                while let Some((key, value)) = access.next_entry::<String, PayloadNode>()? {
                    map.insert(key, value);
                }
                Ok(PayloadNode::Object(map))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_equality_ignores_entry_order() {
        let mut a = PayloadMap::new();
        a.insert("x".to_string(), PayloadNode::Bool(true));
        a.insert("y".to_string(), PayloadNode::Num(Number::Int(3)));

        let mut b = PayloadMap::new();
        b.insert("y".to_string(), PayloadNode::Num(Number::Int(3)));
        b.insert("x".to_string(), PayloadNode::Bool(true));

        assert_eq!(PayloadNode::Object(a), PayloadNode::Object(b));
    }

    #[test]
    fn integer_and_float_literals_stay_distinct() {
        assert_ne!(
            PayloadNode::Num(Number::Int(1)),
            PayloadNode::Num(Number::Float(1.0))
        );
    }

    #[test]
    fn compound_children_are_listed_by_position() {
        let mut map = PayloadMap::new();
        map.insert("a".to_string(), PayloadNode::Null);
        map.insert("b".to_string(), PayloadNode::empty_object());
        map.insert("c".to_string(), PayloadNode::Text("leaf".to_string()));
        map.insert("d".to_string(), PayloadNode::Array(vec![]));
        let node = PayloadNode::Object(map);

        assert_eq!(node.compound_child_indices(), vec![1, 3]);
        assert_eq!(node.child_count(), 4);
    }

    #[test]
    fn leaves_have_no_children() {
        let mut leaf = PayloadNode::Text("abc".to_string());
        assert_eq!(leaf.child_count(), 0);
        assert!(leaf.child_at_mut(0).is_none());
        assert!(leaf.remove_child(0).is_none());
        assert!(leaf.compound_child_indices().is_empty());
    }
}
