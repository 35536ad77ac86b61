use crate::payload::{attrmap, json, PayloadKind, PayloadNode};

/// Position of a statement inside its genome. Call statements use these to
/// point at the statements holding their parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamRef(pub usize);

impl ParamRef {
    pub fn position(self) -> usize {
        self.0
    }
}

/// Constructor or method invocation. The signature string is the serialized
/// call shape used for compatibility matching across genomes.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
    pub declaring_type: String,
    pub signature: String,
    pub parameters: Vec<ParamRef>,
}

impl CallStatement {
    pub fn new(declaring_type: &str, signature: &str, parameters: Vec<ParamRef>) -> Self {
        Self {
            declaring_type: declaring_type.to_string(),
            signature: signature.to_string(),
            parameters,
        }
    }
}

/// Scalar numeric gene. Crossover only blends two genes of the same variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericGene {
    Int(i32),
    Long(i64),
    Short(i16),
    Float(f32),
    Double(f64),
}

/// Structured payload gene: a tree plus the cached serialized text for its
/// kind. The cache is regenerable from the tree at any time; mutation entry
/// points refresh it before returning.
#[derive(Debug, Clone)]
pub struct StructuredGene {
    kind: PayloadKind,
    tree: PayloadNode,
    text: String,
}

impl StructuredGene {
    /// Empty default gene: `{}` for the JSON kind, the empty map form for
    /// the attribute-map kind.
    pub fn new(kind: PayloadKind) -> Self {
        Self {
            kind,
            tree: PayloadNode::empty_object(),
            text: default_text(kind).to_string(),
        }
    }

    /// Parses `text` into a gene. Malformed input is logged and replaced by
    /// the empty default; a bad payload must never abort the run.
    pub fn from_text(kind: PayloadKind, text: &str) -> Self {
        let mut gene = Self::new(kind);
        gene.set_text(text);
        gene
    }

    pub fn set_text(&mut self, text: &str) {
        let parsed = match self.kind {
            PayloadKind::Json => json::deserialize(text),
            PayloadKind::AttrMap => attrmap::deserialize(text),
        };
        match parsed {
            Ok(tree) => {
                self.tree = tree;
                self.text = text.to_string();
            }
            Err(e) => {
                log::warn!("Discarding malformed payload text: {}", e);
                self.tree = PayloadNode::empty_object();
                self.text = default_text(self.kind).to_string();
            }
        }
    }

    pub fn set_tree(&mut self, tree: PayloadNode) {
        self.tree = tree;
        self.refresh_text();
    }

    /// Resets to the empty default tree.
    pub fn zero(&mut self) {
        self.tree = PayloadNode::empty_object();
        self.text = default_text(self.kind).to_string();
    }

    pub fn kind(&self) -> PayloadKind {
        self.kind
    }

    pub fn tree(&self) -> &PayloadNode {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut PayloadNode {
        &mut self.tree
    }

    pub(crate) fn refresh_text(&mut self) {
        let serialized = match self.kind {
            PayloadKind::Json => json::serialize(&self.tree),
            PayloadKind::AttrMap => attrmap::serialize(&self.tree),
        };
        match serialized {
            Ok(text) => self.text = text,
            Err(e) => log::warn!("Payload tree has no serialized form: {}", e),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

// The cache is excluded: two genes are equal when their kinds and trees are.
impl PartialEq for StructuredGene {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.tree == other.tree
    }
}

fn default_text(kind: PayloadKind) -> &'static str {
    match kind {
        PayloadKind::Json => json::EMPTY_JSON,
        PayloadKind::AttrMap => attrmap::EMPTY_ATTR_MAP,
    }
}

/// One statement of a genome: a call or a leaf value gene.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Constructor(CallStatement),
    Method(CallStatement),
    String(String),
    Numeric(NumericGene),
    Structured(StructuredGene),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::node::Number;

    #[test]
    fn malformed_text_resets_to_empty_default() {
        let gene = StructuredGene::from_text(PayloadKind::Json, "{broken");
        assert_eq!(gene.tree(), &PayloadNode::empty_object());
        assert_eq!(gene.text(), "{}");

        let gene = StructuredGene::from_text(PayloadKind::AttrMap, "<map><oops>");
        assert_eq!(gene.tree(), &PayloadNode::empty_object());
        assert_eq!(gene.text(), "<map></map>");
    }

    #[test]
    fn set_text_keeps_raw_cache_until_refresh() {
        let spaced = "{ \"a\": 1 }";
        let mut gene = StructuredGene::from_text(PayloadKind::Json, spaced);
        assert_eq!(gene.text(), spaced);

        gene.refresh_text();
        assert_eq!(gene.text(), "{\"a\":1}");
    }

    #[test]
    fn zero_restores_the_empty_default() {
        let mut gene = StructuredGene::from_text(PayloadKind::Json, "[1,2,3]");
        gene.zero();
        assert_eq!(gene.tree(), &PayloadNode::empty_object());
        assert_eq!(gene.text(), "{}");
    }

    #[test]
    fn equality_ignores_the_text_cache() {
        let a = StructuredGene::from_text(PayloadKind::Json, "{ \"k\": 2 }");
        let b = StructuredGene::from_text(PayloadKind::Json, "{\"k\":2}");
        assert_eq!(a, b);
        assert_ne!(a.text(), b.text());
    }

    #[test]
    fn set_tree_refreshes_the_cache() {
        let mut gene = StructuredGene::new(PayloadKind::Json);
        gene.set_tree(PayloadNode::Num(Number::Int(7)));
        assert_eq!(gene.text(), "7");
    }
}
