//! Unweighted adjacency structure over a fixed number of nodes.
//!
//! Edges live in a single growable pool. Every node keeps the first and last
//! pool slot of its outgoing chain, and every slot links to the next edge of
//! the same source. Edges can be added but never removed.

use std::fmt;

use crate::error::{Error, Result};

/// A directed connection yielded by the edge iterators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

/// First and last pool slot of a node's outgoing chain.
#[derive(Copy, Clone, Debug, Default)]
struct NodeLimit {
    head: Option<usize>,
    tail: Option<usize>,
}

/// Target of a connection and the slot of the next connection from the same source.
#[derive(Copy, Clone, Debug)]
struct Link {
    target: usize,
    next: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct Graph {
    nodes: usize,
    /// Edge capacity of the pool. Doubles when exhausted.
    capacity: usize,
    limits: Vec<NodeLimit>,
    links: Vec<Link>,
}

impl Graph {
    /// Create a graph of `nodes` nodes with room for `edge_capacity` edges.
    pub fn new(nodes: usize, edge_capacity: usize) -> Self {
        Self {
            nodes,
            capacity: edge_capacity,
            limits: vec![NodeLimit::default(); nodes],
            links: Vec::with_capacity(edge_capacity),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Number of directed edges. A bidirected edge counts as two.
    pub fn edge_count(&self) -> usize {
        self.links.len()
    }

    pub fn edge_capacity(&self) -> usize {
        self.capacity
    }

    fn check_node(&self, node: usize) -> Result<()> {
        if node < self.nodes {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                node,
                nodes: self.nodes,
            })
        }
    }

    /// Connect `from` to `to`, and `to` to `from` as well when `bidirectional`.
    ///
    /// Directions that already exist are left untouched.
    ///
    /// # Errors
    /// [`Error::NodeOutOfRange`] if either node is outside the graph.
    pub fn connect(&mut self, from: usize, to: usize, bidirectional: bool) -> Result<()> {
        self.check_node(from)?;
        self.check_node(to)?;

        if !self.are_connected(from, to) {
            self.insert(from, to);
        }
        if bidirectional && !self.are_connected(to, from) {
            self.insert(to, from);
        }
        Ok(())
    }

    /// Connect two nodes in both directions.
    pub fn connect_bidirected(&mut self, from: usize, to: usize) -> Result<()> {
        self.connect(from, to, true)
    }

    /// Connect `from` to `to` only.
    pub fn connect_directed(&mut self, from: usize, to: usize) -> Result<()> {
        self.connect(from, to, false)
    }

    /// Append one directed edge and link it at the tail of `from`'s chain.
    fn insert(&mut self, from: usize, to: usize) {
        self.reserve_if_needed();

        let edge = self.links.len();
        self.links.push(Link {
            target: to,
            next: None,
        });

        let limit = &mut self.limits[from];
        match limit.tail {
            Some(tail) => self.links[tail].next = Some(edge),
            None => limit.head = Some(edge),
        }
        limit.tail = Some(edge);
    }

    fn reserve_if_needed(&mut self) {
        if self.links.len() < self.capacity {
            return;
        }
        self.capacity = (self.capacity * 2).max(1);
        self.links.reserve_exact(self.capacity - self.links.len());
    }

    /// Direct adjacency test. Out-of-range nodes are never connected.
    pub fn are_connected(&self, from: usize, to: usize) -> bool {
        if from >= self.nodes || to >= self.nodes {
            return false;
        }
        self.edges_from(from).any(|edge| edge.to == to)
    }

    /// Outgoing edges of `node`, in insertion order.
    ///
    /// A node outside the graph has no edges.
    pub fn edges_from(&self, node: usize) -> EdgesFrom<'_> {
        let cursor = self.limits.get(node).and_then(|limit| limit.head);
        EdgesFrom {
            graph: self,
            node,
            cursor,
        }
    }

    /// Every edge of the graph, in node order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.nodes).flat_map(move |node| self.edges_from(node))
    }
}

/// Iterator over the outgoing chain of one node.
pub struct EdgesFrom<'a> {
    graph: &'a Graph,
    node: usize,
    cursor: Option<usize>,
}

impl Iterator for EdgesFrom<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        let slot = self.cursor?;
        let link = self.graph.links[slot];
        self.cursor = link.next;
        Some(Edge {
            from: self.node,
            to: link.target,
        })
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in self.edges() {
            writeln!(f, "({}) > ({})", edge.from, edge.to)?;
        }
        Ok(())
    }
}
