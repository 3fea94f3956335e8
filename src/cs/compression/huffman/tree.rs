use super::frequency::FrequencyTable;
use log::trace;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

/// Codeword for every byte that has one, as a string of '0' and '1'.
pub type CodeMap = BTreeMap<u8, String>;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node holds a byte value and its occurrence count.
    Leaf { byte: u8, weight: u64 },
    /// An internal node with left and right children and their combined weight.
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the weight of the node.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Follows the edge labelled `bit`. Leaves have no edges and any
    /// character other than '0' or '1' names no edge.
    pub fn child(&self, bit: char) -> Option<&HuffmanNode> {
        match (self, bit) {
            (HuffmanNode::Internal { left, .. }, '0') => Some(left.as_ref()),
            (HuffmanNode::Internal { right, .. }, '1') => Some(right.as_ref()),
            _ => None,
        }
    }
}

/// Heap entry for a pending subtree.
/// The lightest subtree has the highest priority; equal weights leave the
/// heap in the order they entered it.
#[derive(Debug)]
struct NodeWrapper {
    node: Box<HuffmanNode>,
    seq: u64,
}

impl PartialEq for NodeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeWrapper {}

impl Ord for NodeWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower weight, then earlier insertion, should come first.
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman tree over byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest subtrees.
    ///
    /// Leaves enter the heap in ascending byte order and merged subtrees
    /// after them, so ties between equal weights resolve the same way on
    /// every run. The first subtree taken from the heap becomes the left
    /// child.
    ///
    /// Returns `None` if the table is empty.
    pub fn build(freq_table: &FrequencyTable) -> Option<Self> {
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        for (byte, weight) in freq_table.iter() {
            heap.push(NodeWrapper {
                node: Box::new(HuffmanNode::Leaf { byte, weight }),
                seq,
            });
            seq += 1;
        }

        // Two lightest out, their parent back in, down to a single root.
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let weight = left.node.weight() + right.node.weight();
            heap.push(NodeWrapper {
                node: Box::new(HuffmanNode::Internal {
                    weight,
                    left: left.node,
                    right: right.node,
                }),
                seq,
            });
            seq += 1;
        }

        heap.pop().map(|wrapper| HuffmanTree {
            root: *wrapper.node,
        })
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total weight of the tree, i.e. the number of bytes it was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Whether the whole tree is one leaf (a single distinct byte).
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    /// Returns the byte whose root-to-leaf path is spelled by `codeword`.
    ///
    /// Characters after the leaf is reached are ignored. A codeword that
    /// stops at an internal node, or follows an edge that does not exist,
    /// yields `None`. For a single-leaf tree the only edge is '0'.
    pub fn symbol_for(&self, codeword: &str) -> Option<u8> {
        if let HuffmanNode::Leaf { byte, .. } = self.root {
            return codeword.starts_with('0').then_some(byte);
        }

        let mut current = &self.root;
        for bit in codeword.chars() {
            current = current.child(bit)?;
            if let HuffmanNode::Leaf { byte, .. } = current {
                return Some(*byte);
            }
        }
        None
    }
}

/// Huffman tree for `freq_table`, or `None` when no byte was counted.
pub fn build_huffman_tree(freq_table: &FrequencyTable) -> Option<HuffmanTree> {
    HuffmanTree::build(freq_table)
}

/// Derives the [`CodeMap`] of `tree`: each byte's codeword is its
/// root-to-leaf path, '0' for a left edge and '1' for a right edge.
///
/// A tree that is a single leaf has no edges; its byte gets "0".
pub fn build_code_table(tree: &HuffmanTree) -> CodeMap {
    let mut table = CodeMap::new();
    if let HuffmanNode::Leaf { byte, .. } = tree.root() {
        table.insert(*byte, "0".to_string());
        return table;
    }
    let mut path = String::new();
    assign_codewords(tree.root(), &mut path, &mut table);
    table
}

/// Depth-first, left before right; `path` holds the edges from the root to `node`.
fn assign_codewords(node: &HuffmanNode, path: &mut String, table: &mut CodeMap) {
    match node {
        HuffmanNode::Leaf { byte, .. } => {
            trace!("byte {:#04x} -> {}", byte, path);
            table.insert(*byte, path.clone());
        }
        HuffmanNode::Internal { left, right, .. } => {
            for (bit, child) in [('0', left), ('1', right)] {
                path.push(bit);
                assign_codewords(child, path, table);
                path.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::compression::huffman::frequency::build_frequency_table;

    fn tree_for(input: &[u8]) -> HuffmanTree {
        build_huffman_tree(&build_frequency_table(input)).expect("Tree should be built")
    }

    fn count_leaves(node: &HuffmanNode) -> usize {
        match node {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => count_leaves(left) + count_leaves(right),
        }
    }

    fn weights_are_sums(node: &HuffmanNode) -> bool {
        match node {
            HuffmanNode::Leaf { .. } => true,
            HuffmanNode::Internal {
                weight,
                left,
                right,
            } => {
                *weight == left.weight() + right.weight()
                    && weights_are_sums(left)
                    && weights_are_sums(right)
            }
        }
    }

    #[test]
    fn test_empty_table_has_no_tree() {
        assert!(build_huffman_tree(&FrequencyTable::new()).is_none());
    }

    #[test]
    fn test_tree_shape() {
        let input = b"this is an example for huffman encoding";
        let tree = tree_for(input);
        assert_eq!(tree.weight(), input.len() as u64);
        assert_eq!(count_leaves(tree.root()), build_frequency_table(input).distinct());
        assert!(weights_are_sums(tree.root()));
    }

    #[test]
    fn test_merge_order() {
        // e(1) + d(2) first, then c, b and a in turn; lighter subtree on the left.
        let tree = tree_for(b"aaaaaaaaaaaaaaaabbbbbbbbccccdde");
        let table = build_code_table(&tree);
        assert_eq!(table[&b'a'], "1");
        assert_eq!(table[&b'b'], "01");
        assert_eq!(table[&b'c'], "001");
        assert_eq!(table[&b'd'], "0001");
        assert_eq!(table[&b'e'], "0000");
    }

    #[test]
    fn test_equal_weights_are_deterministic() {
        let input = b"abcdabcd";
        let first = build_code_table(&tree_for(input));
        for _ in 0..10 {
            assert_eq!(build_code_table(&tree_for(input)), first);
        }
        // Four equal weights produce a balanced tree.
        assert!(first.values().all(|code| code.len() == 2));
    }

    #[test]
    fn test_single_leaf() {
        let tree = tree_for(b"zzzz");
        assert!(tree.is_single_leaf());
        let table = build_code_table(&tree);
        assert_eq!(table.len(), 1);
        assert_eq!(table[&b'z'], "0");
        assert_eq!(tree.symbol_for("0"), Some(b'z'));
        assert_eq!(tree.symbol_for("1"), None);
        assert_eq!(tree.symbol_for(""), None);
    }

    #[test]
    fn test_symbol_for() {
        let tree = tree_for(b"aaaaaaaaaaaaaaaabbbbbbbbccccdde");
        assert_eq!(tree.symbol_for("1"), Some(b'a'));
        assert_eq!(tree.symbol_for("0001"), Some(b'd'));
        // Trailing bits after a leaf are ignored.
        assert_eq!(tree.symbol_for("0111"), Some(b'b'));
        // Stops at an internal node.
        assert_eq!(tree.symbol_for("00"), None);
        assert_eq!(tree.symbol_for(""), None);
        assert_eq!(tree.symbol_for("0x"), None);
    }

    #[test]
    fn test_child() {
        let tree = tree_for(b"ab");
        let root = tree.root();
        assert!(!root.is_leaf());
        let left = root.child('0').unwrap();
        assert!(left.is_leaf());
        assert!(left.child('0').is_none());
        assert!(root.child('2').is_none());
    }
}
