// The Hide strategy: chase nearby food while staying away from ghosts
//
// One decision per turn. The graph is rebuilt from the turn's grid snapshot,
// every candidate is scored with two shortest-path queries, and the ranked
// list is filtered for suicidal steps before a destination is committed.
// A short history of chosen destinations breaks oscillation cycles.

use log::{debug, info};
use rayon::prelude::*;
use std::collections::VecDeque;

use crate::config::StrategyConfig;
use crate::error::BotError;
use crate::food::find_food;
use crate::graph::{build_graph, neighbors, Graph};
use crate::pathfind::{distance, shortest_path};
use crate::types::{Direction, Grid, Position};

/// Per-game mutable agent state
///
/// The destination history is per-instance and freshly initialized each game
/// session; it is never shared between agents or carried across games.
#[derive(Debug)]
pub struct AgentState {
    /// Where the agent currently stands
    pub pos: Position,
    /// Most recent chosen destinations, oldest first, bounded
    history: VecDeque<Position>,
    capacity: usize,
}

impl AgentState {
    fn new(pos: Position, capacity: usize) -> Self {
        AgentState {
            pos,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a confirmed destination, evicting the oldest beyond capacity
    fn record(&mut self, destination: Position) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(destination);
    }

    /// Whether `pos` appears among the `n` most recent destinations
    fn recently_visited(&self, pos: Position, n: usize) -> bool {
        self.history.iter().rev().take(n).any(|&p| p == pos)
    }

    fn in_history(&self, pos: Position) -> bool {
        self.history.contains(&pos)
    }

    #[cfg(test)]
    pub fn history(&self) -> impl Iterator<Item = &Position> {
        self.history.iter()
    }
}

/// A scored first step towards one food position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    /// Hops from the agent to the food
    distance: usize,
    /// Shortest-path node count, both endpoints included, from `first_step`
    /// to the nearest ghost; `usize::MAX` when no ghost is reachable (or
    /// none exist)
    ghost_distance: usize,
    /// The position the agent would move to this turn
    first_step: Position,
}

/// The committed outcome of one decision
#[derive(Debug, Clone, Copy)]
pub struct Decision {
    pub direction: Direction,
    pub destination: Position,
}

/// Hide strategy engine; owns the agent state for one game session
pub struct HideStrategy {
    config: StrategyConfig,
    state: AgentState,
}

impl HideStrategy {
    /// Creates the strategy from the opening grid
    ///
    /// Fails when the agent cell is missing from the snapshot.
    pub fn new(config: StrategyConfig, grid: &Grid) -> Result<Self, BotError> {
        let pos = grid
            .pakku_position()
            .ok_or_else(|| BotError::Protocol("agent not found in opening map".to_string()))?;
        let capacity = config.history_capacity;

        Ok(HideStrategy {
            config,
            state: AgentState::new(pos, capacity),
        })
    }

    pub fn position(&self) -> Position {
        self.state.pos
    }

    /// Picks the next move for the given grid snapshot
    ///
    /// Pure with respect to agent state; call [`HideStrategy::confirm_move`]
    /// once the server has accepted the move.
    pub fn decide(&self, grid: &Grid) -> Result<Decision, BotError> {
        let graph = build_graph(grid);
        let ghosts = grid.ghost_positions();
        let pos = self.state.pos;

        let food: Vec<Position> = find_food(
            &graph,
            grid,
            pos,
            Some(self.config.food_search_depth),
            self.config.food_cap,
        )
        .into_iter()
        .collect();

        debug!("{} food candidates near {}", food.len(), pos);

        let mut candidates = Self::score_candidates(&graph, pos, &food, &ghosts);

        // Closest food first; among equally close food, prefer the step that
        // keeps the most room to the nearest ghost
        candidates.sort_by_key(|c| (c.distance, std::cmp::Reverse(c.ghost_distance)));

        // Steps that land within reach of a ghost are suicide
        candidates.retain(|c| c.ghost_distance > self.config.suicide_distance);

        let destination = if candidates.is_empty() {
            info!("no safe food near {}, retreating from ghosts", pos);
            self.retreat_step(&graph, pos, &ghosts)?
        } else {
            self.pick_candidate(&candidates)
        };

        let direction = Direction::between(pos, destination).ok_or(
            BotError::PathInconsistency {
                from: pos,
                step: destination,
            },
        )?;

        Ok(Decision {
            direction,
            destination,
        })
    }

    /// Applies a server-confirmed move: adopts the new grid's positions and
    /// records the destination in the oscillation history
    pub fn confirm_move(&mut self, grid: &Grid, decision: &Decision) {
        self.state.pos = grid.pakku_position().unwrap_or(decision.destination);
        self.state.record(decision.destination);
    }

    /// Scores every reachable food position
    ///
    /// Each candidate needs one path to the food and one path per ghost, all
    /// independent reads of the same immutable graph, so they are evaluated
    /// in parallel. Unreachable food is silently dropped.
    fn score_candidates(
        graph: &Graph,
        pos: Position,
        food: &[Position],
        ghosts: &[Position],
    ) -> Vec<Candidate> {
        food.par_iter()
            .filter_map(|&food_pos| {
                let path = shortest_path(graph, pos, food_pos)?;
                // The path starts at the agent; anything shorter has no step
                // to take
                if path.len() < 2 {
                    return None;
                }

                let first_step = path[1];
                // Counted as path nodes including both endpoints, the metric
                // the suicide threshold is calibrated against: a step one hop
                // from a ghost scores 2, a step two hops away scores 3 and is
                // still worth taking
                let ghost_distance = ghosts
                    .iter()
                    .filter_map(|&g| distance(graph, first_step, g).map(|hops| hops + 1))
                    .min()
                    .unwrap_or(usize::MAX);

                Some(Candidate {
                    distance: path.len() - 1,
                    ghost_distance,
                    first_step,
                })
            })
            .collect()
    }

    /// Chooses from the ranked candidate list, avoiding short oscillation
    /// cycles
    ///
    /// The best candidate wins unless its step is one of the two most recent
    /// destinations; then the first candidate not seen anywhere in the
    /// history is taken instead, falling back to the best when every option
    /// was visited recently.
    fn pick_candidate(&self, ranked: &[Candidate]) -> Position {
        let best = ranked[0].first_step;

        if !self
            .state
            .recently_visited(best, self.config.recent_window)
        {
            return best;
        }

        debug!("best step {} was just visited, looking for a fresh one", best);
        ranked
            .iter()
            .map(|c| c.first_step)
            .find(|&step| !self.state.in_history(step))
            .unwrap_or(best)
    }

    /// Fallback when no safe food exists: step to the reachable neighbor
    /// farthest from the nearest ghost
    ///
    /// Ties go to iteration order. Fails with `NoLegalMove` when the agent
    /// has no reachable neighbor at all.
    fn retreat_step(
        &self,
        graph: &Graph,
        pos: Position,
        ghosts: &[Position],
    ) -> Result<Position, BotError> {
        let options = neighbors(graph, pos);
        if options.is_empty() {
            return Err(BotError::NoLegalMove { from: pos });
        }

        let farthest = options
            .into_iter()
            .max_by_key(|&n| {
                ghosts
                    .iter()
                    .filter_map(|&g| distance(graph, n, g))
                    .min()
                    .unwrap_or(usize::MAX)
            })
            .ok_or(BotError::NoLegalMove { from: pos })?;

        Ok(farthest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn strategy_for(grid: &Grid) -> HideStrategy {
        let config = Config::default_hardcoded();
        HideStrategy::new(config.strategy, grid).expect("agent should be on the map")
    }

    fn grid(map: &str, width: usize) -> Grid {
        Grid::parse(map, width).expect("test map should parse")
    }

    #[test]
    fn test_moves_toward_clear_corridor_food() {
        // Agent top-left, dot two cells right, ghost far away bottom-right
        let map = "10200\n00000\n00000\n00000\n00005".replace('\n', "");
        let g = grid(&map, 5);
        let strategy = strategy_for(&g);

        let decision = strategy.decide(&g).expect("a move should exist");
        assert_eq!(decision.direction, Direction::Right);
        assert_eq!(decision.destination, Position::new(0, 1));
    }

    #[test]
    fn test_skips_suicidal_candidate_when_safe_food_exists() {
        // Closest dot sits right next to a ghost; the farther dot is safe
        let map = "00000\n00000\n20125\n00000\n00000".replace('\n', "");
        let g = grid(&map, 5);
        let strategy = strategy_for(&g);

        let decision = strategy.decide(&g).expect("a move should exist");
        // Stepping onto (2,3) leaves one hop to the ghost at (2,4), so that
        // candidate is discarded despite being closer
        assert_eq!(decision.destination, Position::new(2, 1));
        assert_eq!(decision.direction, Direction::Left);
    }

    #[test]
    fn test_walled_in_agent_has_no_legal_move() {
        let map = "444\n414\n444".replace('\n', "");
        let g = grid(&map, 3);
        let strategy = strategy_for(&g);

        match strategy.decide(&g) {
            Err(BotError::NoLegalMove { from }) => assert_eq!(from, Position::new(1, 1)),
            other => panic!("expected NoLegalMove, got {:?}", other.map(|d| d.direction)),
        }
    }

    #[test]
    fn test_retreat_maximizes_ghost_distance() {
        // A corridor with no food; ghost to the left, so the agent flees right
        let map = "44444\n44444\n50100\n44444\n44444".replace('\n', "");
        let g = grid(&map, 5);
        let strategy = strategy_for(&g);

        let decision = strategy.decide(&g).expect("retreat should find a step");
        assert_eq!(decision.destination, Position::new(2, 3));
        assert_eq!(decision.direction, Direction::Right);
    }

    #[test]
    fn test_oscillation_breaker_picks_fresh_destination() {
        // Best food is one step left, an alternative sits two steps up
        let map = "00200\n00000\n02100\n00000\n00000".replace('\n', "");
        let g = grid(&map, 5);
        let mut strategy = strategy_for(&g);

        let first = strategy.decide(&g).expect("turn 1");
        assert_eq!(first.destination, Position::new(2, 1), "closest dot wins");
        strategy.confirm_move(&g, &first);

        // Identical grid again; the best step is now in recent history, so a
        // fresh destination must be chosen while an alternative exists
        let second = strategy.decide(&g).expect("turn 2");
        assert_ne!(second.destination, first.destination);
        strategy.confirm_move(&g, &second);

        let third = strategy.decide(&g).expect("turn 3");
        let destinations = [first.destination, second.destination, third.destination];
        assert!(
            destinations.iter().any(|&d| d != first.destination),
            "three identical turns must not repeat one destination throughout"
        );
    }

    #[test]
    fn test_history_is_bounded() {
        let map = "00200\n00000\n02100\n00000\n00000".replace('\n', "");
        let g = grid(&map, 5);
        let mut strategy = strategy_for(&g);

        for _ in 0..12 {
            let decision = strategy.decide(&g).expect("a move should exist");
            strategy.confirm_move(&g, &decision);
        }
        assert!(strategy.state.history().count() <= 5);
    }

    #[test]
    fn test_missing_agent_fails_construction() {
        let g = grid("000000000", 3);
        let config = Config::default_hardcoded();
        assert!(HideStrategy::new(config.strategy, &g).is_err());
    }
}
