use std::collections::{HashSet, VecDeque};

use super::Grid;

/// Breadth-first reachability from `entry` to `exit` through open edges.
///
/// A freshly generated maze is always a spanning tree, so this is a
/// regression guard for the generator rather than a real search.
pub fn is_solvable(grid: &Grid, entry: (usize, usize), exit: (usize, usize)) -> bool {
    let mut visited = HashSet::from([entry]);
    let mut queue = VecDeque::from([entry]);

    while let Some((x, y)) = queue.pop_front() {
        if (x, y) == exit {
            return true;
        }
        for next in grid.open_neighbors(x, y) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    false
}
