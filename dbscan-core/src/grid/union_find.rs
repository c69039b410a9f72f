//! Union-find (disjoint set union) over point indices.
//!
//! The grid engine merges core–core edges into connected components with this
//! forest. It is owned and mutated by a single thread, so the parent and rank
//! arrays are plain vectors addressed by point index.

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the root of `node`, compressing the path behind it.
    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Joins the sets holding `left` and `right` by rank and returns the
    /// surviving root.
    pub(super) fn union(&mut self, left: usize, right: usize) -> usize {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return left;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::test_utils::suite_proptest_config;

    #[test]
    fn singletons_are_their_own_roots() {
        let mut forest = DisjointSet::new(4);
        assert!((0..4).all(|node| forest.find(node) == node));
    }

    #[test]
    fn union_links_transitively() {
        let mut forest = DisjointSet::new(5);
        forest.union(0, 1);
        forest.union(3, 4);
        forest.union(1, 4);
        let root = forest.find(0);
        assert!([1, 3, 4].iter().all(|&node| forest.find(node) == root));
        assert_ne!(forest.find(2), root);
    }

    fn edges_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1_usize..64).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n), 0..(n * 2)),
            )
        })
    }

    /// Naive reachability over the same edges, used as the connectivity
    /// reference.
    fn component_labels(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
        let mut labels: Vec<usize> = (0..n).collect();
        let mut changed = true;
        while changed {
            changed = false;
            for &(left, right) in edges {
                let low = labels[left].min(labels[right]);
                for node in [left, right] {
                    if labels[node] != low {
                        labels[node] = low;
                        changed = true;
                    }
                }
            }
        }
        labels
    }

    proptest! {
        #![proptest_config(suite_proptest_config(128))]

        #[test]
        fn find_converges_and_roots_are_idempotent((n, edges) in edges_strategy()) {
            let mut forest = DisjointSet::new(n);
            for &(left, right) in &edges {
                forest.union(left, right);
            }
            for node in 0..n {
                // A parent walk longer than `n` hops can only be a cycle.
                let mut hops = 0;
                let mut current = node;
                while forest.parent[current] != current {
                    current = forest.parent[current];
                    hops += 1;
                    prop_assert!(hops <= n, "cycle detected from node {node}");
                }
                let root = forest.find(node);
                prop_assert_eq!(root, current);
                prop_assert_eq!(forest.find(root), root);
            }
        }

        #[test]
        fn union_matches_naive_connectivity((n, edges) in edges_strategy()) {
            let mut forest = DisjointSet::new(n);
            for &(left, right) in &edges {
                forest.union(left, right);
            }
            let reference = component_labels(n, &edges);
            for left in 0..n {
                for right in 0..n {
                    prop_assert_eq!(
                        forest.find(left) == forest.find(right),
                        reference[left] == reference[right],
                    );
                }
            }
        }
    }
}
