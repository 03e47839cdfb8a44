use rand::Rng;
use rand::seq::SliceRandom;

use super::{Grid, Side};

/// Carves a spanning tree into `grid` with an iterative randomized
/// depth-first search starting from the entry cell.
///
/// Every cell is visited exactly once, so exactly `width * height - 1`
/// interior walls are opened. The explicit stack keeps large grids off the
/// call stack.
pub fn generate<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let start = grid.entry();
    grid.cell_mut(start.0, start.1).visited = true;
    let mut stack = vec![start];

    while let Some(&(x, y)) = stack.last() {
        let unvisited: Vec<(Side, (usize, usize))> = Side::ALL
            .into_iter()
            .filter_map(|side| grid.neighbor(x, y, side).map(|n| (side, n)))
            .filter(|&(_, (nx, ny))| !grid.cell(nx, ny).visited)
            .collect();

        match unvisited.choose(rng) {
            Some(&(side, (nx, ny))) => {
                grid.remove_wall(x, y, side);
                grid.cell_mut(nx, ny).visited = true;
                stack.push((nx, ny));
            }
            None => {
                stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn opens_exactly_a_spanning_tree() {
        let mut rng = StdRng::seed_from_u64(7);
        for (w, h) in [(1, 1), (1, 5), (5, 1), (3, 3), (20, 12)] {
            let mut grid = Grid::new(w, h);
            generate(&mut grid, &mut rng);
            assert_eq!(grid.removed_wall_count(), w * h - 1, "{}x{}", w, h);
            assert!(grid.cells().all(|c| c.visited));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let mut a = Grid::new(12, 8);
        let mut b = Grid::new(12, 8);
        generate(&mut a, &mut StdRng::seed_from_u64(42));
        generate(&mut b, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let mut a = Grid::new(12, 8);
        let mut b = Grid::new(12, 8);
        generate(&mut a, &mut StdRng::seed_from_u64(1));
        generate(&mut b, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn wall_flags_stay_consistent_between_neighbours() {
        let mut grid = Grid::new(9, 6);
        generate(&mut grid, &mut StdRng::seed_from_u64(3));
        for cell in grid.cells() {
            for side in Side::ALL {
                if let Some((nx, ny)) = grid.neighbor(cell.x, cell.y, side) {
                    assert_eq!(
                        grid.has_wall(cell.x, cell.y, side),
                        grid.has_wall(nx, ny, side.opposite())
                    );
                }
            }
        }
    }
}
