//! Reachability queries over a [`Graph`].
//!
//! All edges have unit cost, so the shortest path is found with a
//! breadth-first search. The finder keeps its working buffers between calls
//! and borrows the graph only for the duration of a query, which lets the
//! board keep growing its graphs between win checks.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::graph::Graph;

#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    previous: Vec<Option<usize>>,
    visited: Vec<bool>,
    frontier: VecDeque<usize>,
    /// Edge count of the last path found.
    distance: Option<usize>,
}

impl PathFinder {
    /// Create a finder with buffers sized for `nodes` nodes.
    pub fn new(nodes: usize) -> Self {
        Self {
            previous: vec![None; nodes],
            visited: vec![false; nodes],
            frontier: VecDeque::with_capacity(nodes),
            distance: None,
        }
    }

    fn reset(&mut self, nodes: usize) {
        self.previous.clear();
        self.previous.resize(nodes, None);
        self.visited.clear();
        self.visited.resize(nodes, false);
        self.frontier.clear();
        self.distance = None;
    }

    /// Find a shortest path from `start` to `end`.
    ///
    /// Returns the nodes from `start` to `end` inclusive, or an empty vector
    /// when `end` is unreachable.
    ///
    /// # Errors
    /// [`Error::NodeOutOfRange`] if either endpoint is outside the graph.
    pub fn shortest_path(&mut self, graph: &Graph, start: usize, end: usize) -> Result<Vec<usize>> {
        let nodes = graph.node_count();
        for node in [start, end] {
            if node >= nodes {
                return Err(Error::NodeOutOfRange { node, nodes });
            }
        }

        self.reset(nodes);
        self.visited[start] = true;
        self.frontier.push_back(start);

        while let Some(current) = self.frontier.pop_front() {
            if current == end {
                break;
            }
            for edge in graph.edges_from(current) {
                if self.visited[edge.to] {
                    continue;
                }
                self.visited[edge.to] = true;
                self.previous[edge.to] = Some(current);
                self.frontier.push_back(edge.to);
            }
        }

        if !self.visited[end] {
            return Ok(Vec::new());
        }

        let mut path = vec![end];
        let mut at = end;
        while let Some(prev) = self.previous[at] {
            path.push(prev);
            at = prev;
        }
        path.reverse();
        self.distance = Some(path.len() - 1);
        Ok(path)
    }

    /// Whether any path joins `start` to `end`.
    pub fn connected(&mut self, graph: &Graph, start: usize, end: usize) -> Result<bool> {
        Ok(!self.shortest_path(graph, start, end)?.is_empty())
    }

    /// Number of edges on the last path found, if the last query found one.
    pub fn distance(&self) -> Option<usize> {
        self.distance
    }
}
