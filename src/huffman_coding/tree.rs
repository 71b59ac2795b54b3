use log::{debug, error, info, trace};

use super::priority_queue::PriorityQueue;
use crate::error::HuffmanError;
use crate::tools::freq_count::FrequencyTable;

/// Index of a node in the tree arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeData {
    Leaf(u8),
    /// Children of an internal node. Only the synthetic root of a one symbol tree has
    /// an empty right side.
    Kids(NodeId, Option<NodeId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub weight: u64,
    pub parent: Option<NodeId>,
    pub node_data: NodeData,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

/// A Huffman code tree held in an arena. Parent and child links are indexes into `nodes`,
/// so walking from a leaf to the root needs no shared ownership, and dropping the tree is
/// a single Vec drop however skewed the tree is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    /// Leaves in ascending byte order.
    leaves: Vec<NodeId>,
}

impl HuffmanTree {
    /// Build the tree for every byte with a non-zero count in freqs.
    ///
    /// Leaves are queued in ascending byte order. Each merge takes the two lightest nodes;
    /// the first one extracted becomes the left child and the second the right child.
    pub fn build(freqs: &FrequencyTable) -> Result<Self, HuffmanError> {
        let n = freqs.distinct_count();
        if n == 0 {
            return Err(HuffmanError::EmptyAlphabet);
        }
        // Every node weight is a partial sum of the counts, so a total that fits means no merge
        // can overflow.
        if freqs.total().is_none() {
            error!("Frequency counts of {} byte values overflow a u64", n);
            return Err(HuffmanError::WeightOverflow);
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(2 * n);
        let mut leaves = Vec::with_capacity(n);
        let mut queue = PriorityQueue::with_capacity(n);

        for (byte, weight) in freqs.present() {
            let id = nodes.len();
            nodes.push(Node {
                weight,
                parent: None,
                node_data: NodeData::Leaf(byte),
            });
            leaves.push(id);
            queue.insert(weight, id);
        }

        // One symbol: hang the leaf off a root of its own so it gets the one bit code "0".
        if n == 1 {
            let leaf = leaves[0];
            let root = nodes.len();
            let weight = nodes[leaf].weight;
            nodes.push(Node {
                weight,
                parent: None,
                node_data: NodeData::Kids(leaf, None),
            });
            nodes[leaf].parent = Some(root);
            if let NodeData::Leaf(byte) = nodes[leaf].node_data {
                debug!("Single symbol tree, byte {} gets code 0", byte);
            }
            return Ok(Self { nodes, root, leaves });
        }

        let ran_dry = |e: HuffmanError| {
            error!("Priority queue ran dry while merging {} leaves", n);
            e
        };
        for _ in 1..n {
            let (x_weight, x) = queue.extract_min().map_err(ran_dry)?;
            let (y_weight, y) = queue.extract_min().map_err(ran_dry)?;

            let z = nodes.len();
            let weight = x_weight
                .checked_add(y_weight)
                .ok_or(HuffmanError::WeightOverflow)?;
            nodes.push(Node {
                weight,
                parent: None,
                node_data: NodeData::Kids(x, Some(y)),
            });
            nodes[x].parent = Some(z);
            nodes[y].parent = Some(z);
            trace!("merge {} + {} -> node {} [weight: {}]", x, y, z, weight);
            queue.insert(weight, z);
        }

        let (_, root) = queue.extract_min()?;
        if !queue.is_empty() {
            error!("{} nodes left in the queue after building the tree", queue.len());
            return Err(HuffmanError::EmptyQueue);
        }

        let tree = Self { nodes, root, leaves };
        info!(
            "Huffman tree built: {} leaves, depth {}, weight {}",
            tree.leaf_count(),
            tree.depth(),
            tree.root_weight()
        );
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Leaves in ascending byte order.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaves.len()
    }

    pub fn root_weight(&self) -> u64 {
        self.nodes[self.root].weight
    }

    /// Step from an internal node to the child selected by bit (0 = left, 1 = right).
    /// None if id is a leaf or has no child on that side.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id].node_data {
            NodeData::Kids(left, right) => {
                if bit {
                    right
                } else {
                    Some(left)
                }
            }
            NodeData::Leaf(_) => None,
        }
    }

    /// Byte value of a leaf, None for internal nodes.
    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.nodes[id].node_data {
            NodeData::Leaf(byte) => Some(byte),
            NodeData::Kids(..) => None,
        }
    }

    /// Branch decisions from leaf up to the root: false where the node is its parent's
    /// left child, true where it is the right child.
    pub fn path_to_root(&self, leaf: NodeId) -> impl Iterator<Item = bool> + '_ {
        let mut current = leaf;
        std::iter::from_fn(move || {
            if current == self.root {
                return None;
            }
            let parent = self.nodes[current].parent?;
            let is_right = match self.nodes[parent].node_data {
                NodeData::Kids(left, _) => left != current,
                NodeData::Leaf(_) => return None,
            };
            current = parent;
            Some(is_right)
        })
    }

    /// Length of the longest root to leaf path.
    pub fn depth(&self) -> usize {
        self.leaves
            .iter()
            .map(|&leaf| self.path_to_root(leaf).count())
            .max()
            .unwrap_or(0)
    }

    /// Indented dump of the tree, left branches first.
    pub fn structure(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0_usize, "root")];
        while let Some((id, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            let node = &self.nodes[id];
            match node.node_data {
                NodeData::Leaf(byte) => out.push_str(&format!(
                    "{}{}-> Leaf: {:?} ({}) [weight: {}]\n",
                    indent, label, byte as char, byte, node.weight
                )),
                NodeData::Kids(left, right) => {
                    out.push_str(&format!(
                        "{}{}-> Internal [weight: {}]\n",
                        indent, label, node.weight
                    ));
                    if let Some(right) = right {
                        stack.push((right, depth + 1, "R"));
                    }
                    stack.push((left, depth + 1, "L"));
                }
            }
        }
        out
    }
}
