// Adjacency graph derived from a grid snapshot
//
// Rebuilt from scratch every turn and treated as an immutable value for the
// rest of that turn; all path and food queries run against the same graph.

use std::collections::HashMap;

use crate::types::{Direction, Grid, Position};

/// Adjacency mapping over passable cells
///
/// `graph[&u]` maps each reachable cardinal neighbor `v` of `u` to the edge
/// cost, which is always 1. Non-passable cells have no entry at all.
pub type Graph = HashMap<Position, HashMap<Position, u32>>;

/// Uniform cost of every edge in the graph
pub const EDGE_WEIGHT: u32 = 1;

/// Builds the navigable graph for the given grid
///
/// For every passable position, keeps the in-bounds passable cardinal
/// neighbors as weight-1 edges. Deterministic, O(width^2).
pub fn build_graph(grid: &Grid) -> Graph {
    let width = grid.width();
    let mut graph = Graph::new();

    for pos in grid.positions() {
        if !grid.cell(pos).is_passable() {
            continue;
        }

        let edges: HashMap<Position, u32> = Direction::all()
            .iter()
            .filter_map(|d| d.apply(pos, width))
            .filter(|&n| grid.cell(n).is_passable())
            .map(|n| (n, EDGE_WEIGHT))
            .collect();

        graph.insert(pos, edges);
    }

    graph
}

/// Reachable one-step neighbors of a position, in no particular order
///
/// Empty when the position is absent from the graph or has no open sides.
pub fn neighbors(graph: &Graph, pos: Position) -> Vec<Position> {
    graph
        .get(&pos)
        .map(|edges| edges.keys().copied().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn open_grid(map: &str, width: usize) -> Grid {
        Grid::parse(map, width).expect("test map should parse")
    }

    #[test]
    fn test_open_grid_interior_has_four_edges() {
        let grid = open_grid("000000000", 3);
        let graph = build_graph(&grid);

        let center = Position::new(1, 1);
        assert_eq!(graph[&center].len(), 4);
        assert_eq!(graph[&Position::new(0, 0)].len(), 2, "corner has two edges");
        assert_eq!(graph[&Position::new(0, 1)].len(), 3, "edge cell has three");
    }

    #[test]
    fn test_walls_have_no_adjacency_entry() {
        // wall in the center
        let grid = open_grid("000040000", 3);
        let graph = build_graph(&grid);

        assert!(!graph.contains_key(&Position::new(1, 1)));
        for (u, edges) in &graph {
            assert!(grid.cell(*u).is_passable());
            for v in edges.keys() {
                assert!(
                    grid.cell(*v).is_passable(),
                    "edge {} -> {} points into a wall",
                    u,
                    v
                );
            }
        }
    }

    #[test]
    fn test_all_edge_weights_are_one() {
        let grid = open_grid("020010005", 3);
        let graph = build_graph(&grid);

        for edges in graph.values() {
            for weight in edges.values() {
                assert_eq!(*weight, 1);
            }
        }
    }

    #[test]
    fn test_ghost_cells_are_part_of_the_graph() {
        // Ghosts are passable, so paths may run through them; the strategy is
        // what keeps the agent away from them.
        let grid = open_grid("000050000", 3);
        let graph = build_graph(&grid);
        assert!(graph.contains_key(&Position::new(1, 1)));
        assert!(graph[&Position::new(0, 1)].contains_key(&Position::new(1, 1)));
    }

    #[test]
    fn test_fully_walled_grid_is_empty() {
        let grid = Grid::from_rows(vec![
            vec![Cell::Wall, Cell::Wall],
            vec![Cell::Wall, Cell::Wall],
        ])
        .expect("square rows");
        assert!(build_graph(&grid).is_empty());
    }
}
