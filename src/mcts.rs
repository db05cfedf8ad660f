//! Monte Carlo Tree Search (MCTS) over game states.
//!
//! The search runs a fixed number of episodes. Each episode walks the tree
//! by UCT, extends it by exactly one node the first time a path is reached,
//! evaluates the new node with a random playout, and adds the resulting
//! score to every node it passed through. Scores are absolute (positive for
//! White), so selection and the final reduction read them through the side
//! to move instead of negating on the way up.
//!
//! The tree lives for a single [`find_move`] call. Each node owns its
//! children directly, index-aligned with its shuffled copy of the legal
//! move list, so a child's statistics are found by position, never by key.

use log::{debug, log_enabled, trace, Level};

use crate::board::Color;
use crate::constants::EXPLORATION;
use crate::playout::playout;
use crate::state::{GameState, Move};

/// One node of the search tree.
struct Node {
    /// Episodes that have passed through this node.
    visits: u32,
    /// Sum of the scores those episodes produced.
    total_value: f64,
    /// The node state's legal moves, shuffled once at creation. `children`
    /// is index-aligned with this ordering, and the shuffle is what breaks
    /// ties between siblings the statistics cannot separate.
    moves: Vec<Move>,
    /// A `None` slot is a child the search has never reached.
    children: Vec<Option<Box<Node>>>,
}

impl Node {
    fn new(state: &GameState, rng: &mut fastrand::Rng) -> Self {
        let mut moves = state.legal_moves().to_vec();
        rng.shuffle(&mut moves);
        let children = moves.iter().map(|_| None).collect();
        Node {
            visits: 0,
            total_value: 0.0,
            moves,
            children,
        }
    }

    fn mean_value(&self) -> f64 {
        self.total_value / self.visits as f64
    }

    /// The child index to descend into for `to_move`.
    ///
    /// The first never-visited child wins outright, in move order. With all
    /// children visited, the pick maximizes UCT: an exploration bonus that
    /// shrinks as a child absorbs visits, plus the child's mean score read
    /// from the mover's side (White likes high means, Black low ones),
    /// shifted into positive range.
    fn select_child(&self, to_move: Color) -> usize {
        let mut best = 0;
        let mut best_score = -1.0;
        for (i, child) in self.children.iter().enumerate() {
            let Some(child) = child else { return i };
            let exploration = EXPLORATION
                * ((self.visits as f64).ln() / (child.visits as f64 + 1.0)).sqrt();
            let value = match to_move {
                Color::White => 1.0 + child.mean_value(),
                Color::Black => 1.0 - child.mean_value(),
            };
            let score = exploration + value;
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }
}

/// Runs one episode through `slot`, creating the node on first visit, and
/// returns the episode's score.
///
/// Every node on the episode's path absorbs the score on the way back out,
/// the freshly created leaf and terminal nodes included, so a node's visit
/// count always equals the episodes that reached it.
fn simulate(state: &GameState, slot: &mut Option<Box<Node>>, rng: &mut fastrand::Rng) -> f64 {
    let fresh = slot.is_none();
    let node = slot.get_or_insert_with(|| Box::new(Node::new(state, rng)));

    let value = if fresh {
        playout(state, rng)
    } else if let Some(score) = state.score() {
        score
    } else {
        let choice = node.select_child(state.to_move());
        let mv = node.moves[choice];
        let child_state = state
            .get_child(mv)
            .expect("search move drawn from the legal list");
        simulate(&child_state, &mut node.children[choice], rng)
    };

    node.visits += 1;
    node.total_value += value;
    value
}

/// The root child with the best mean score for `to_move`, or a pass when no
/// visited child beats the trivial bound (a mean can never leave
/// `[-1.0, 1.0]`, so something always qualifies if anything was visited).
fn best_root_move(root: &Node, to_move: Color) -> Move {
    let mut best = None;
    let mut best_value = match to_move {
        Color::White => -1.0,
        Color::Black => 1.0,
    };
    for (i, child) in root.children.iter().enumerate() {
        let Some(child) = child else { continue };
        let mean = child.mean_value();
        let improves = match to_move {
            Color::White => mean > best_value,
            Color::Black => mean < best_value,
        };
        if improves {
            best_value = mean;
            best = Some(i);
        }
    }
    match best {
        Some(i) => root.moves[i],
        None => Move::Pass,
    }
}

/// Picks a move for the side to play in `state` by running `simulations`
/// search episodes.
///
/// A state whose only legal move is the pass is answered immediately,
/// without building a tree. Otherwise the tree is built afresh, episode by
/// episode, and the reduction picks the root child with the best mean score
/// for the mover. Ties keep the earlier child, which the creation-time
/// shuffle has already randomized.
pub fn find_move(state: &GameState, simulations: usize, rng: &mut fastrand::Rng) -> Move {
    if state.legal_moves().len() <= 1 {
        return Move::Pass;
    }

    let mut root: Option<Box<Node>> = None;
    for _ in 0..simulations {
        simulate(state, &mut root, rng);
    }

    let Some(root) = root else {
        // Zero episodes budgeted; nothing to reduce.
        return Move::Pass;
    };

    let chosen = best_root_move(&root, state.to_move());
    if log_enabled!(Level::Debug) {
        let explored = root.children.iter().flatten().count();
        debug!(
            "{} episodes, {}/{} root children explored, {} plays {chosen}",
            root.visits,
            explored,
            root.children.len(),
            state.to_move()
        );
    }
    if log_enabled!(Level::Trace) {
        for (i, child) in root.children.iter().enumerate() {
            if let Some(child) = child {
                trace!(
                    "  {} visits={} mean={:+.3}",
                    root.moves[i],
                    child.visits,
                    child.mean_value()
                );
            }
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn stats_node(visits: u32, total_value: f64) -> Option<Box<Node>> {
        Some(Box::new(Node {
            visits,
            total_value,
            moves: Vec::new(),
            children: Vec::new(),
        }))
    }

    #[test]
    fn test_every_episode_lands_in_the_root_stats() {
        let state = GameState::new(Color::Black, Board::new(3));
        let mut rng = fastrand::Rng::with_seed(9);
        let mut root = None;
        let episodes = 40;
        for _ in 0..episodes {
            simulate(&state, &mut root, &mut rng);
        }

        let root = root.unwrap();
        assert_eq!(root.visits, episodes);
        // The first episode stops at the root; every later one descends
        // into exactly one child.
        let child_visits: u32 = root.children.iter().flatten().map(|c| c.visits).sum();
        assert_eq!(child_visits, episodes - 1);
        let child_total: f64 = root
            .children
            .iter()
            .flatten()
            .map(|c| c.total_value)
            .sum();
        assert!((root.total_value - child_total).abs() <= 2.0);
    }

    #[test]
    fn test_unexplored_children_are_selected_first_in_order() {
        let node = Node {
            visits: 5,
            total_value: 0.0,
            moves: vec![Move::Place(0, 0), Move::Place(0, 1), Move::Place(0, 2)],
            children: vec![stats_node(5, 0.0), None, None],
        };
        assert_eq!(node.select_child(Color::White), 1);
    }

    #[test]
    fn test_selection_reads_means_through_the_mover() {
        // Equal visits make the exploration bonus a wash; only the mean
        // decides, in opposite directions for the two sides.
        let node = Node {
            visits: 10,
            total_value: 0.0,
            moves: vec![Move::Place(0, 0), Move::Place(1, 1)],
            children: vec![stats_node(5, 2.5), stats_node(5, -2.5)],
        };
        assert_eq!(node.select_child(Color::White), 0);
        assert_eq!(node.select_child(Color::Black), 1);
    }

    #[test]
    fn test_exploration_pulls_toward_the_rarely_tried() {
        // Identical means; the child with fewer visits carries the larger
        // exploration bonus.
        let node = Node {
            visits: 100,
            total_value: 0.0,
            moves: vec![Move::Place(0, 0), Move::Place(1, 1)],
            children: vec![stats_node(90, 0.0), stats_node(4, 0.0)],
        };
        assert_eq!(node.select_child(Color::White), 1);
    }

    #[test]
    fn test_reduction_picks_the_best_mean_per_side() {
        let root = Node {
            visits: 30,
            total_value: 0.0,
            moves: vec![Move::Pass, Move::Place(0, 0), Move::Place(1, 1)],
            children: vec![stats_node(10, 2.0), stats_node(10, -6.0), None],
        };
        // White wants the +0.2 mean, Black the -0.6 one; the unvisited
        // child is skipped by both.
        assert_eq!(best_root_move(&root, Color::White), Move::Pass);
        assert_eq!(best_root_move(&root, Color::Black), Move::Place(0, 0));
    }

    #[test]
    fn test_reduction_with_no_visited_children_passes() {
        let root = Node {
            visits: 0,
            total_value: 0.0,
            moves: vec![Move::Place(0, 0)],
            children: vec![None],
        };
        assert_eq!(best_root_move(&root, Color::White), Move::Pass);
    }

    #[test]
    fn test_lone_pass_answers_without_searching() {
        let board = Board::parse(&[
            "XOX", //
            "OXO",
            "XOX",
        ]);
        let state = GameState::new(Color::White, board);
        let mut rng = fastrand::Rng::with_seed(1);
        // Zero simulations: only the fast path can produce this answer.
        assert_eq!(find_move(&state, 0, &mut rng), Move::Pass);
    }

    #[test]
    fn test_chosen_move_is_always_legal() {
        let state = GameState::new(Color::Black, Board::new(3));
        let mut rng = fastrand::Rng::with_seed(77);
        let mv = find_move(&state, 60, &mut rng);
        assert!(state.legal_moves().contains(&mv));
    }
}
