//! Union-find over a flat index space `0..len`.

/// Disjoint sets with union by size and path halving.
///
/// Every index starts as its own root. There is no removal.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    pub fn new(len: usize) -> Self {
        DisjointSet {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `index`.
    ///
    /// The result is stable until the next `union` that merges this set.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn find(&mut self, index: usize) -> usize {
        let mut i = index;
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Merges the sets containing `a` and `b` and returns the resulting root.
    ///
    /// # Examples
    /// ```
    /// use swapmatch_solver::disjoint_set::DisjointSet;
    /// let mut sets = DisjointSet::new(4);
    /// let root = sets.union(0, 3);
    /// assert_eq!(sets.find(0), root);
    /// assert_eq!(sets.find(3), root);
    /// assert_ne!(sets.find(1), root);
    /// ```
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }
        let (big, small) = if self.size[root_a] >= self.size[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        big
    }
}
