use std::fmt::{self, Display};

/// A node in a parse tree: a syntactic category name plus ordered children.
///
/// Child order is significant. Trees are single-owner structures with no
/// shared subtrees; normalization builds new nodes instead of rewriting
/// existing ones.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    pub name: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, vec![])
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(node: &Node, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for _ in 0..depth {
                write!(f, "    ")?;
            }
            writeln!(f, "{}", node.name)?;
            for child in &node.children {
                write_node(child, depth + 1, f)?;
            }
            Ok(())
        }

        write_node(self, 0, f)
    }
}
