/*!
 * Directory tree construction and ASCII rendering
 */

use std::collections::BTreeMap;

/// Heading placed above the rendered tree
pub const TREE_HEADING: &str = "# Project Structure\n";

/// One path segment and its children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    /// Segment name (empty for the root)
    pub name: String,
    /// Children keyed by segment name
    pub children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    /// Create a node with no children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    /// Insert a path, creating intermediate nodes as needed
    pub fn insert<I, S>(&mut self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self;
        for segment in segments {
            let segment = segment.as_ref();
            current = current
                .children
                .entry(segment.to_string())
                .or_insert_with(|| TreeNode::new(segment));
        }
    }

    /// Whether this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Render the children of this node as tree lines
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_into("", &mut lines);
        lines
    }

    fn render_into(&self, prefix: &str, lines: &mut Vec<String>) {
        let count = self.children.len();
        for (i, child) in self.children.values().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            lines.push(format!("{}{}{}", prefix, connector, child.name));

            if !child.is_leaf() {
                let extension = if is_last { "    " } else { "│   " };
                child.render_into(&format!("{}{}", prefix, extension), lines);
            }
        }
    }
}

/// Build the tree for a set of relative paths and wrap it in a fenced block
pub fn build_tree<P, I, S>(paths: P) -> Vec<String>
where
    P: IntoIterator<Item = I>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = TreeNode::default();
    for segments in paths {
        root.insert(segments);
    }

    let mut lines = vec![TREE_HEADING.to_string(), "```".to_string()];
    lines.extend(root.render());
    lines.push("```\n".to_string());
    lines
}
