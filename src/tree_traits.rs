/*
Rendering lives in a trait so the domain types stay free of display concerns.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Direction, EnumTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

// Each edge is labelled with its direction symbol, leaves add their content.
impl<D: Direction> TreeNodeConvert for EnumTree<D> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<D: Direction>(
            tree: &EnumTree<D>,
            node_idx: Index,
            parent_tree: &mut Tree<String>,
        ) {
            for (slot, child_idx) in tree.arena()[node_idx].occupied() {
                let child = &tree.arena()[child_idx];
                let symbol = D::from_ordinal(slot).map_or('?', |d| d.symbol());
                let label = if child.is_leaf() {
                    format!("{} {:?}", symbol, child.content)
                } else {
                    symbol.to_string()
                };
                let mut child_tree = Tree::new(label);
                build_tree(tree, child_idx, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }

        if self.arena().is_empty() {
            return Tree::new("Empty tree".to_string());
        }
        let root_idx = self.arena().root();
        let mut root = Tree::new(self.arena()[root_idx].to_string());
        build_tree(self, root_idx, &mut root);
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dir4::{self, *};

    #[test]
    fn test_tree_string_labels_edges_and_leaves() {
        let mut tree = EnumTree::<Dir4>::new();
        tree.insert_path("h", &[Up, Down]).unwrap();
        tree.insert_path("e", &[Left]).unwrap();

        let rendered = tree.to_tree_string().to_string();

        assert_eq!(rendered.lines().next(), Some("·"));
        assert!(rendered.contains("D \"h\""));
        assert!(rendered.contains("L \"e\""));
    }

    #[test]
    fn test_root_only_tree_renders_empty() {
        let tree = EnumTree::<Dir4>::new();
        assert_eq!(tree.to_tree_string().to_string().trim_end(), "Empty tree");
    }
}
