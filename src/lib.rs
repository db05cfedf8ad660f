//! Tengen: a small-board Go engine built on Monte Carlo Tree Search.
//!
//! The engine answers one question: given a position, which move should the
//! side to play make? It keeps a rules-correct game state (captures,
//! suicide, superko via board history, two-pass scoring) and searches over
//! it with UCT-guided episodes finished by random playouts.
//!
//! ## Modules
//!
//! - [`board`] - Board grid and flood-fill analysis (liberties, chains, captures)
//! - [`state`] - Game state: legality, move execution, history, scoring
//! - [`mcts`] - The tree search and move selection
//! - [`playout`] - Random game completion for leaf evaluation
//! - [`policy`] - Pluggable move policies
//! - [`constants`] - Search parameters and board defaults
//!
//! ## Example
//!
//! ```
//! use tengen::board::{Board, Color};
//! use tengen::mcts::find_move;
//! use tengen::state::GameState;
//!
//! // Black to open on an empty 5x5 board.
//! let state = GameState::new(Color::Black, Board::new(5));
//! let mut rng = fastrand::Rng::with_seed(1);
//! let mv = find_move(&state, 100, &mut rng);
//! assert!(state.legal_moves().contains(&mv));
//! ```

pub mod board;
pub mod constants;
pub mod mcts;
pub mod playout;
pub mod policy;
pub mod state;
