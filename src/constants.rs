//! Constants for search parameters and board defaults.
//!
//! The board side length is a runtime value (small hosts report anything
//! from 1x1 up), so only the search knobs and the fallback board size live
//! here. Everything is overridable from the command line; the values below
//! are the tuned defaults.

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default number of search episodes per move decision.
pub const N_SIMS: usize = 1000;

/// UCT exploration constant. Larger values spread visits across siblings,
/// smaller values commit to the current best child sooner.
pub const EXPLORATION: f64 = 1.5;

// =============================================================================
// Playout Limits
// =============================================================================

/// Playout length cap as a multiple of the board area. Random games on small
/// boards occasionally cycle through captures; a playout that reaches
/// `PLAYOUT_LEN_FACTOR * size * size` plies is scored as it stands.
pub const PLAYOUT_LEN_FACTOR: usize = 2;

// =============================================================================
// Board Defaults
// =============================================================================

/// Board side length used when the caller does not specify one.
pub const DEFAULT_BOARD_SIZE: usize = 5;
