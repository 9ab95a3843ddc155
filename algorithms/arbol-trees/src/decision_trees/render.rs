use super::{DecisionTree, SplitTest, TreeNode};
use std::fmt;

/// Struct to print a fitted decision tree as indented text, one line per branch.
///
/// Leaves show the predicted label followed by the number of covered training examples and,
/// if any, the number of those misclassified.
///
/// ### Usage
///
/// ```rust
/// use arbol::prelude::*;
/// use arbol_trees::DecisionTree;
///
/// // Load dataset
/// let dataset = arbol_datasets::weather_nominal();
/// // Fit the tree
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
/// // Export to text
/// let text = tree.export_to_text().with_statistics(false).to_string();
/// assert!(text.starts_with("outlook = sunny\n|   humidity = high: no (3.0)"));
/// ```
pub struct TextTree<'a> {
    statistics: bool,
    tree: &'a DecisionTree,
}

impl<'a> TextTree<'a> {
    pub fn new(tree: &'a DecisionTree) -> Self {
        TextTree {
            statistics: true,
            tree,
        }
    }

    /// Whether the number of leaves and the tree size are appended
    pub fn with_statistics(mut self, statistics: bool) -> Self {
        self.statistics = statistics;

        self
    }

    fn attribute_name(&self, idx: usize) -> &str {
        self.tree
            .attributes()
            .get(idx)
            .map(|attribute| attribute.name())
            .unwrap_or("?")
    }

    fn class_label(&self, idx: usize) -> &str {
        self.tree
            .class_labels()
            .get(idx)
            .map(String::as_str)
            .unwrap_or("?")
    }

    fn format_leaf(&self, node: &TreeNode) -> String {
        let errors = node.errors();
        if errors > 0 {
            format!(
                ": {} ({:.1}/{:.1})",
                self.class_label(node.prediction()),
                node.covered() as f64,
                errors as f64
            )
        } else {
            format!(
                ": {} ({:.1})",
                self.class_label(node.prediction()),
                node.covered() as f64
            )
        }
    }

    fn condition(&self, attribute: usize, test: &SplitTest, branch: usize) -> String {
        let name = self.attribute_name(attribute);
        match test {
            SplitTest::Nominal(categories) => {
                let category = self
                    .tree
                    .attributes()
                    .get(attribute)
                    .and_then(|attribute| attribute.category(categories[branch]))
                    .unwrap_or("?");
                format!("{} = {}", name, category)
            }
            SplitTest::Threshold(threshold) if branch == 0 => {
                format!("{} <= {}", name, threshold)
            }
            SplitTest::Threshold(threshold) => format!("{} > {}", name, threshold),
        }
    }

    fn format_node(&self, node: &TreeNode, depth: usize, out: &mut String) {
        let (attribute, test) = match node.split() {
            Some(split) => split,
            None => return,
        };
        let indent = "|   ".repeat(depth);

        for (branch, child) in node.children().iter().enumerate() {
            out.push('\n');
            out.push_str(&indent);
            out.push_str(&self.condition(attribute, test, branch));

            if child.is_leaf() {
                out.push_str(&self.format_leaf(child));
            } else {
                self.format_node(child, depth + 1, out);
            }
        }
    }
}

impl<'a> fmt::Display for TextTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let root = self.tree.root_node();
        let mut out = String::new();

        if root.is_leaf() {
            out.push_str(&self.format_leaf(root));
        } else {
            self.format_node(root, 0, &mut out);
            // drop the leading line break
            out.remove(0);
        }

        if self.statistics {
            out.push_str(&format!(
                "\n\nNumber of Leaves  : {}\n\nSize of the tree : {}",
                self.tree.num_leaves(),
                self.tree.size()
            ));
        }

        writeln!(f, "{}", out)
    }
}

impl DecisionTree {
    /// Generates a [`TextTree`](struct.TextTree.html) structure to print the
    /// fitted decision tree as indented text.
    pub fn export_to_text(&self) -> TextTree<'_> {
        TextTree::new(self)
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.export_to_text())
    }
}

#[cfg(test)]
mod tests {
    use crate::DecisionTree;
    use arbol::prelude::*;
    use ndarray::array;

    #[test]
    fn renders_weather_tree() {
        let dataset = arbol_datasets::weather_nominal();
        let tree = DecisionTree::params().fit(&dataset).unwrap();

        let expected = "\
outlook = sunny
|   humidity = high: no (3.0)
|   humidity = normal: yes (2.0)
outlook = overcast: yes (4.0)
outlook = rainy
|   windy = TRUE: no (2.0)
|   windy = FALSE: yes (3.0)

Number of Leaves  : 5

Size of the tree : 8
";
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn renders_mixed_weather_tree() {
        // numeric temperature and humidity lose against outlook at the root
        let dataset = arbol_datasets::weather();
        let tree = DecisionTree::params().fit(&dataset).unwrap();

        let expected = "\
outlook = sunny
|   humidity <= 77.5: yes (2.0)
|   humidity > 77.5: no (3.0)
outlook = overcast: yes (4.0)
outlook = rainy
|   windy = TRUE: no (2.0)
|   windy = FALSE: yes (3.0)

Number of Leaves  : 5

Size of the tree : 8
";
        assert_eq!(tree.to_string(), expected);
        assert_eq!(tree.features(), vec![0, 2, 3]);
    }

    #[test]
    fn renders_single_leaf_with_errors() -> Result<()> {
        let attributes = vec![
            Attribute::numeric("x"),
            Attribute::nominal("class", vec!["no", "yes"]),
        ];
        // a single example is below the minimum partition size
        let dataset = Dataset::new(attributes, array![[1.0, 1.0]])?.with_class_index(1)?;
        let tree = DecisionTree::params().min_partition_size(2).fit(&dataset)?;
        assert_eq!(
            tree.export_to_text().with_statistics(false).to_string(),
            ": yes (1.0)\n"
        );

        let attributes = vec![
            Attribute::numeric("x"),
            Attribute::nominal("class", vec!["no", "yes"]),
        ];
        let dataset = Dataset::new(attributes, array![[1.0, 1.0], [1.0, 0.0], [1.0, 1.0]])?
            .with_class_index(1)?;
        let tree = DecisionTree::params().fit(&dataset)?;
        assert_eq!(
            tree.export_to_text().with_statistics(false).to_string(),
            ": yes (3.0/1.0)\n"
        );

        Ok(())
    }

    #[test]
    fn renders_thresholds() -> Result<()> {
        let attributes = vec![
            Attribute::numeric("age"),
            Attribute::nominal("class", vec!["young", "old"]),
        ];
        let dataset = Dataset::new(
            attributes,
            array![[20., 0.], [25., 0.], [30., 0.], [60., 1.], [65., 1.], [70., 1.]],
        )?
        .with_class_index(1)?;
        let tree = DecisionTree::params().fit(&dataset)?;

        assert_eq!(
            tree.export_to_text().with_statistics(false).to_string(),
            "age <= 45: young (3.0)\nage > 45: old (3.0)\n"
        );

        Ok(())
    }
}
