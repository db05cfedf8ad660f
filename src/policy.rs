//! Pluggable move policies.
//!
//! [`MovePolicy`] is the seam between "pick a move for this state" and any
//! particular way of doing so. [`MctsPolicy`] is the real engine;
//! [`RandomPolicy`] is the baseline opponent. A policy that defers to a
//! remote evaluator would slot in here as well, serializing the state out
//! and decoding the answer with [`Move::from_index`].

use crate::constants::N_SIMS;
use crate::mcts::find_move;
use crate::state::{GameState, Move};

/// Chooses one move for the side to play in `state`.
///
/// Implementations may only return moves from the state's legal list.
pub trait MovePolicy {
    fn choose(&mut self, state: &GameState) -> Move;
}

/// The tree-search policy: a fixed budget of search episodes per decision.
pub struct MctsPolicy {
    simulations: usize,
    rng: fastrand::Rng,
}

impl MctsPolicy {
    /// A policy with the default episode budget.
    pub fn new() -> Self {
        Self::with_simulations(N_SIMS)
    }

    pub fn with_simulations(simulations: usize) -> Self {
        MctsPolicy {
            simulations,
            rng: fastrand::Rng::new(),
        }
    }

    /// Fixed-seed variant; the same seed and states replay the same game.
    pub fn seeded(simulations: usize, seed: u64) -> Self {
        MctsPolicy {
            simulations,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for MctsPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePolicy for MctsPolicy {
    fn choose(&mut self, state: &GameState) -> Move {
        find_move(state, self.simulations, &mut self.rng)
    }
}

/// Uniform random choice over the legal list, pass included.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        RandomPolicy {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomPolicy {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePolicy for RandomPolicy {
    fn choose(&mut self, state: &GameState) -> Move {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Move::Pass;
        }
        moves[self.rng.usize(..moves.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Color};

    #[test]
    fn test_random_policy_stays_legal() {
        let state = GameState::new(Color::Black, Board::new(3));
        let mut policy = RandomPolicy::seeded(5);
        for _ in 0..20 {
            let mv = policy.choose(&state);
            assert!(state.legal_moves().contains(&mv));
        }
    }

    #[test]
    fn test_seeded_policies_replay_their_choices() {
        let state = GameState::new(Color::Black, Board::new(3));
        let mut a = MctsPolicy::seeded(50, 123);
        let mut b = MctsPolicy::seeded(50, 123);
        assert_eq!(a.choose(&state), b.choose(&state));
    }

    #[test]
    fn test_policies_are_interchangeable_behind_the_trait() {
        let state = GameState::new(Color::White, Board::new(2));
        let mut policies: Vec<Box<dyn MovePolicy>> = vec![
            Box::new(RandomPolicy::seeded(1)),
            Box::new(MctsPolicy::seeded(10, 1)),
        ];
        for policy in &mut policies {
            let mv = policy.choose(&state);
            assert!(state.legal_moves().contains(&mv));
        }
    }
}
