//! Connectivity index over the cells of a grid.
//!
//! `GroupIndex` translates `Loc`s to flat indices on top of a `DisjointSet`
//! and keeps a running count of distinct groups. Groups are identified by the
//! root index of their set and are only materialized on request.
use crate::disjoint_set::DisjointSet;
use crate::engine::Loc;
use std::collections::HashMap;

/// Identifier of a connected group: the flat index of its root cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(usize);

/// Grid-aware wrapper around `DisjointSet`.
#[derive(Clone, Debug)]
pub struct GroupIndex {
    width: usize,
    height: usize,
    sets: DisjointSet,
    root_count: usize,
}

impl GroupIndex {
    /// Creates an index where every one of the `width * height` cells is its own group.
    pub fn new(width: usize, height: usize) -> Self {
        GroupIndex {
            width,
            height,
            sets: DisjointSet::new(width * height),
            root_count: width * height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn to_index(&self, loc: Loc) -> usize {
        loc.row * self.width + loc.col
    }

    pub fn from_index(&self, index: usize) -> Loc {
        Loc::new(index / self.width, index % self.width)
    }

    /// Merges the groups of `a` and `b`.
    ///
    /// The root count drops only when two distinct groups are merged; joining
    /// two cells that already share a group changes nothing.
    pub fn join(&mut self, a: Loc, b: Loc) -> GroupId {
        let root_a = self.group_of(a);
        let root_b = self.group_of(b);
        if root_a == root_b {
            return root_a;
        }
        self.root_count -= 1;
        GroupId(self.sets.union(root_a.0, root_b.0))
    }

    /// Returns the group containing `loc`.
    pub fn group_of(&mut self, loc: Loc) -> GroupId {
        let index = self.to_index(loc);
        GroupId(self.sets.find(index))
    }

    /// Counts the members of `group` with a full scan of the grid.
    pub fn size_of(&mut self, group: GroupId) -> usize {
        (0..self.sets.len())
            .filter(|&i| self.sets.find(i) == group.0)
            .count()
    }

    /// Sizes of every group, computed in a single pass.
    pub fn sizes(&mut self) -> HashMap<GroupId, usize> {
        let mut sizes = HashMap::new();
        for i in 0..self.sets.len() {
            *sizes.entry(GroupId(self.sets.find(i))).or_insert(0) += 1;
        }
        sizes
    }

    /// All locations belonging to `group`, in row-major order.
    pub fn members(&mut self, group: GroupId) -> Vec<Loc> {
        let width = self.width;
        let sets = &mut self.sets;
        (0..sets.len())
            .filter(|&i| sets.find(i) == group.0)
            .map(|i| Loc::new(i / width, i % width))
            .collect()
    }

    /// Current number of distinct groups, singletons included.
    pub fn num_roots(&self) -> usize {
        self.root_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_translation() {
        let index = GroupIndex::new(4, 3);
        assert_eq!(index.to_index(Loc::new(2, 1)), 9);
        assert_eq!(index.from_index(9), Loc::new(2, 1));
        assert_eq!(index.from_index(3), Loc::new(0, 3));
    }

    #[test]
    fn test_join_decrements_roots_once() {
        let mut index = GroupIndex::new(3, 3);
        assert_eq!(index.num_roots(), 9);

        index.join(Loc::new(0, 0), Loc::new(0, 1));
        assert_eq!(index.num_roots(), 8);

        // Same group again: no change.
        index.join(Loc::new(0, 1), Loc::new(0, 0));
        assert_eq!(index.num_roots(), 8);

        index.join(Loc::new(0, 1), Loc::new(1, 1));
        index.join(Loc::new(1, 1), Loc::new(0, 0));
        assert_eq!(index.num_roots(), 7);
    }

    #[test]
    fn test_group_sizes_and_members() {
        let mut index = GroupIndex::new(3, 2);
        index.join(Loc::new(0, 0), Loc::new(1, 0));
        index.join(Loc::new(1, 0), Loc::new(1, 1));

        let group = index.group_of(Loc::new(1, 1));
        assert_eq!(index.group_of(Loc::new(0, 0)), group);
        assert_eq!(index.size_of(group), 3);
        assert_eq!(
            index.members(group),
            vec![Loc::new(0, 0), Loc::new(1, 0), Loc::new(1, 1)]
        );

        let sizes = index.sizes();
        assert_eq!(sizes.len(), 4);
        assert_eq!(sizes[&group], 3);
        let lone = index.group_of(Loc::new(0, 2));
        assert_eq!(sizes[&lone], 1);
    }
}
