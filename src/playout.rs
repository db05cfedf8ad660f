//! Monte Carlo playouts (random game completion).
//!
//! A playout finishes a game with uniformly random legal moves, pass
//! included, and reports the terminal area score. It is the leaf evaluator
//! for the tree search: crude per game, informative in aggregate.

use crate::constants::PLAYOUT_LEN_FACTOR;
use crate::state::GameState;

/// Plays random legal moves from `state` until the game ends and returns
/// the final score, positive for White.
///
/// Random games on small boards can chase captures in circles, so the
/// playout is capped at `PLAYOUT_LEN_FACTOR * size * size` plies; one
/// still running at the cap is scored as it stands. `state` itself is
/// left untouched.
pub fn playout(state: &GameState, rng: &mut fastrand::Rng) -> f64 {
    let mut current = state.clone();
    let max_plies = PLAYOUT_LEN_FACTOR * current.size() * current.size();

    for _ in 0..max_plies {
        if let Some(score) = current.score() {
            return score;
        }
        let moves = current.legal_moves();
        let mv = moves[rng.usize(..moves.len())];
        current
            .make_move(mv)
            .expect("playout move drawn from the legal list");
    }

    match current.score() {
        Some(score) => score,
        None => current.area_score(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Color};
    use crate::state::Move;

    #[test]
    fn test_playout_score_stays_in_range() {
        let state = GameState::new(Color::Black, Board::new(3));
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..50 {
            let score = playout(&state, &mut rng);
            assert!((-1.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_playout_leaves_the_state_alone() {
        let state = GameState::new(Color::Black, Board::new(3));
        let mut rng = fastrand::Rng::with_seed(3);
        playout(&state, &mut rng);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_moves().len(), 10);
    }

    #[test]
    fn test_terminal_state_scores_immediately() {
        let mut state = GameState::new(Color::Black, Board::new(2));
        state.make_move(Move::Pass).unwrap();
        state.make_move(Move::Pass).unwrap();
        let mut rng = fastrand::Rng::with_seed(0);
        assert_eq!(playout(&state, &mut rng), 0.0);
    }

    #[test]
    fn test_playout_is_reproducible_under_a_seed() {
        let state = GameState::new(Color::White, Board::new(3));
        let mut a = fastrand::Rng::with_seed(42);
        let mut b = fastrand::Rng::with_seed(42);
        assert_eq!(playout(&state, &mut a), playout(&state, &mut b));
    }
}
