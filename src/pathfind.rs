// Uniform-cost shortest paths over the turn's adjacency graph
//
// Dijkstra with a binary heap. All edges cost 1, so this returns minimum-hop
// paths; ties between equally short paths fall wherever the heap ordering
// lands them, which is acceptable for the strategy. Queries are cheap enough
// to re-run per candidate rather than precomputing an all-pairs table.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::Graph;
use crate::types::Position;

/// Computes a shortest path from `start` to `end`, inclusive of both
///
/// Returns `None` when `end` is unreachable or `start` is not in the graph.
/// The returned path always begins with `start`; for `start == end` it is the
/// single-element path.
pub fn shortest_path(graph: &Graph, start: Position, end: Position) -> Option<Vec<Position>> {
    if !graph.contains_key(&start) {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let mut dist: HashMap<Position, u32> = HashMap::new();
    let mut prev: HashMap<Position, Position> = HashMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(start, 0);
    heap.push(Reverse((0u32, start)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == end {
            return Some(reconstruct(&prev, start, end));
        }

        // Stale heap entry; a shorter route to this node was already settled
        if cost > *dist.get(&node).unwrap_or(&u32::MAX) {
            continue;
        }

        if let Some(edges) = graph.get(&node) {
            for (&next, &weight) in edges {
                let next_cost = cost + weight;
                if next_cost < *dist.get(&next).unwrap_or(&u32::MAX) {
                    dist.insert(next, next_cost);
                    prev.insert(next, node);
                    heap.push(Reverse((next_cost, next)));
                }
            }
        }
    }

    None
}

/// Number of hops on a shortest path from `start` to `end`
///
/// `None` when unreachable; zero when `start == end`.
pub fn distance(graph: &Graph, start: Position, end: Position) -> Option<usize> {
    shortest_path(graph, start, end).map(|path| path.len() - 1)
}

/// Walks the predecessor chain back from `end` to `start`
fn reconstruct(prev: &HashMap<Position, Position>, start: Position, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut node = end;
    while node != start {
        node = prev[&node];
        path.push(node);
    }
    path.reverse();
    path
}
