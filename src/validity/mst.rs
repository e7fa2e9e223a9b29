//! Per-cluster minimum spanning tree over the mutual reachability graph.
//!
//! Array-based Prim's algorithm restricted to one cluster's members. Runs on
//! the host over the reachability matrix every backend reads back, so the
//! tree is identical regardless of which backend produced the weights.

use crate::validity::traits::backend::MutualReachability;

/// One tree edge between two object indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// Minimum spanning tree of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterTree {
    members: Vec<usize>,
    edges: Vec<TreeEdge>,
    degrees: Vec<usize>,
}

impl ClusterTree {
    /// Build the tree of `members` (ascending object indices) using `mreach` weights.
    ///
    /// Starts from the lowest index. Each round adds the not-yet-added member
    /// with the smallest connecting weight; ties go to the first member in
    /// scan order, so the tree is fully deterministic.
    pub fn build(mreach: &MutualReachability, members: &[usize]) -> Self {
        let m = members.len();
        let mut added = vec![false; m];
        let mut key = vec![f64::INFINITY; m];
        // Unrelaxed members hang off the start until a finite offer arrives.
        let mut parent = vec![0usize; m];
        let mut degrees = vec![0usize; m];
        let mut edges = Vec::with_capacity(m.saturating_sub(1));

        if m == 0 {
            return Self {
                members: Vec::new(),
                edges,
                degrees,
            };
        }

        let mut v = 0;
        key[v] = 0.0;

        for _ in 1..m {
            added[v] = true;
            let row = mreach.row(members[v]);

            let mut next: Option<usize> = None;
            for w in 0..m {
                if added[w] {
                    continue;
                }
                let weight = row[members[w]];
                if key[w] > weight {
                    key[w] = weight;
                    parent[w] = v;
                }
                match next {
                    Some(best) if key[w] >= key[best] => {}
                    _ => next = Some(w),
                }
            }

            // Loop runs m - 1 times and adds one member each round, so a
            // candidate always remains.
            let Some(next) = next else { break };
            let p = parent[next];
            edges.push(TreeEdge {
                from: members[p],
                to: members[next],
                weight: key[next],
            });
            degrees[p] += 1;
            degrees[next] += 1;
            v = next;
        }

        Self {
            members: members.to_vec(),
            edges,
            degrees,
        }
    }

    /// Member object indices, ascending.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Degree of each member, parallel to [`members`](Self::members).
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Degree of object `object`, or 0 if it is not part of this tree.
    pub fn degree_of(&self, object: usize) -> usize {
        self.members
            .binary_search(&object)
            .map(|pos| self.degrees[pos])
            .unwrap_or(0)
    }

    /// Members with degree > 1.
    pub fn internal_nodes(&self) -> Vec<usize> {
        self.members
            .iter()
            .zip(&self.degrees)
            .filter(|(_, &d)| d > 1)
            .map(|(&m, _)| m)
            .collect()
    }

    /// Whether any member has degree > 1.
    pub fn has_internal_node(&self) -> bool {
        self.degrees.iter().any(|&d| d > 1)
    }
}
