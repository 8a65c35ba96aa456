use std::collections::VecDeque;

use crate::board::Board;

/// Cluster adjacency is strictly 4-neighbor.
const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Collect the maximal same-color connected cluster containing
/// `(row, col)`. Breadth-first over an explicit queue with a visited
/// marker array; returns the member cells, seed included.
pub fn same_color_cluster(board: &Board, row: u32, col: u32) -> Vec<(u32, u32)> {
    let Some(color) = board.get(row as i32, col as i32) else {
        return Vec::new();
    };

    let mut visited = vec![false; (board.cols * board.rows) as usize];
    let mut queue = VecDeque::new();
    let mut cluster = Vec::new();

    visited[board.index(row, col)] = true;
    queue.push_back((row as i32, col as i32));

    while let Some((r, c)) = queue.pop_front() {
        cluster.push((r as u32, c as u32));
        for (dr, dc) in NEIGHBORS {
            let (nr, nc) = (r + dr, c + dc);
            if board.get(nr, nc) != Some(color) {
                continue;
            }
            let i = board.index(nr as u32, nc as u32);
            if !visited[i] {
                visited[i] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    cluster
}

/// Clear every occupied cell not reachable from the ceiling row via
/// occupied-cell adjacency. Returns the number of cells dropped.
pub fn drop_floating(board: &mut Board) -> u32 {
    let mut grounded = vec![false; (board.cols * board.rows) as usize];
    let mut queue = VecDeque::new();

    for col in 0..board.cols as i32 {
        if board.is_occupied(0, col) {
            grounded[board.index(0, col as u32)] = true;
            queue.push_back((0i32, col));
        }
    }

    while let Some((r, c)) = queue.pop_front() {
        for (dr, dc) in NEIGHBORS {
            let (nr, nc) = (r + dr, c + dc);
            if !board.is_occupied(nr, nc) {
                continue;
            }
            let i = board.index(nr as u32, nc as u32);
            if !grounded[i] {
                grounded[i] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    let mut dropped = 0;
    for row in 0..board.rows {
        for col in 0..board.cols {
            if board.is_occupied(row as i32, col as i32) && !grounded[board.index(row, col)] {
                board.set(row, col, None);
                dropped += 1;
            }
        }
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BubbleColor;

    fn board() -> Board {
        Board::new(8, 10)
    }

    #[test]
    fn cluster_of_one() {
        let mut b = board();
        b.set(2, 2, Some(BubbleColor::Red));
        let cluster = same_color_cluster(&b, 2, 2);
        assert_eq!(cluster, vec![(2, 2)]);
    }

    #[test]
    fn cluster_on_empty_seed_is_empty() {
        let b = board();
        assert!(same_color_cluster(&b, 2, 2).is_empty());
    }

    #[test]
    fn cluster_spans_connected_same_color() {
        let mut b = board();
        b.set(2, 2, Some(BubbleColor::Red));
        b.set(2, 3, Some(BubbleColor::Red));
        b.set(3, 3, Some(BubbleColor::Red));
        b.set(3, 4, Some(BubbleColor::Blue)); // different color
        b.set(5, 5, Some(BubbleColor::Red)); // disconnected

        let mut cluster = same_color_cluster(&b, 2, 2);
        cluster.sort_unstable();
        assert_eq!(cluster, vec![(2, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn cluster_does_not_cross_diagonals() {
        let mut b = board();
        b.set(2, 2, Some(BubbleColor::Red));
        b.set(3, 3, Some(BubbleColor::Red));
        assert_eq!(same_color_cluster(&b, 2, 2).len(), 1);
    }

    #[test]
    fn grounded_cells_survive_cleanup() {
        let mut b = board();
        b.set(0, 4, Some(BubbleColor::Green));
        b.set(1, 4, Some(BubbleColor::Red));
        b.set(2, 4, Some(BubbleColor::Blue));

        let dropped = drop_floating(&mut b);

        assert_eq!(dropped, 0);
        assert_eq!(b.occupied_count(), 3);
    }

    #[test]
    fn floating_cells_are_dropped() {
        let mut b = board();
        b.set(0, 1, Some(BubbleColor::Green));
        // Floating pair with no path to row 0
        b.set(5, 5, Some(BubbleColor::Red));
        b.set(5, 6, Some(BubbleColor::Red));

        let dropped = drop_floating(&mut b);

        assert_eq!(dropped, 2);
        assert!(!b.is_occupied(5, 5));
        assert!(!b.is_occupied(5, 6));
        assert!(b.is_occupied(0, 1));
    }

    #[test]
    fn grounding_crosses_colors() {
        let mut b = board();
        b.set(0, 2, Some(BubbleColor::Red));
        b.set(1, 2, Some(BubbleColor::Blue));
        b.set(2, 2, Some(BubbleColor::Green));

        assert_eq!(drop_floating(&mut b), 0, "any-color chains anchor cells");
    }

    #[test]
    fn cleanup_is_idempotent() {
        let mut b = board();
        b.set(0, 1, Some(BubbleColor::Green));
        b.set(1, 1, Some(BubbleColor::Red));
        b.set(4, 4, Some(BubbleColor::Blue));

        let first = drop_floating(&mut b);
        assert_eq!(first, 1);
        let snapshot: Vec<_> = b.occupied().collect();

        let second = drop_floating(&mut b);
        assert_eq!(second, 0, "second pass must change nothing");
        assert_eq!(b.occupied().collect::<Vec<_>>(), snapshot);
    }

    #[test]
    fn empty_ceiling_drops_everything() {
        let mut b = board();
        b.set(3, 3, Some(BubbleColor::Red));
        b.set(4, 3, Some(BubbleColor::Blue));

        assert_eq!(drop_floating(&mut b), 2);
        assert_eq!(b.occupied_count(), 0);
    }

    // ================================================================
    // Property-based tests (proptest)
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        proptest! {
            #[test]
            fn cleanup_idempotent_on_random_boards(seed in 0u64..300, fill in 0.0f64..1.0) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut b = Board::new(8, 10);
                for row in 0..10 {
                    for col in 0..8 {
                        if rng.random_bool(fill) {
                            b.set(row, col, Some(BubbleColor::sample(&mut rng, 4)));
                        }
                    }
                }

                drop_floating(&mut b);
                let after_first: Vec<_> = b.occupied().collect();
                let second = drop_floating(&mut b);

                prop_assert_eq!(second, 0);
                prop_assert_eq!(b.occupied().collect::<Vec<_>>(), after_first);
            }

            #[test]
            fn survivors_touch_the_ceiling_row(seed in 0u64..300, fill in 0.0f64..1.0) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut b = Board::new(8, 10);
                for row in 0..10 {
                    for col in 0..8 {
                        if rng.random_bool(fill) {
                            b.set(row, col, Some(BubbleColor::sample(&mut rng, 4)));
                        }
                    }
                }

                drop_floating(&mut b);

                // Every remaining occupied cell must have a 4-neighbor chain
                // to row 0: repeating the BFS finds them all grounded.
                let remaining = b.occupied_count();
                let mut copy = b.clone();
                prop_assert_eq!(drop_floating(&mut copy), 0);
                prop_assert_eq!(copy.occupied_count(), remaining);
            }
        }
    }
}
