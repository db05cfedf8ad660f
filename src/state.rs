//! Game state and move execution.
//!
//! This module owns everything legality depends on:
//! - whose turn it is and the current board
//! - the snapshot history backing the superko rule
//! - the precomputed legal move list, pass first
//! - terminal detection (two passes in a row) and area scoring
//!
//! A state is value-like: applying a move to a clone never disturbs the
//! original, which is what lets the search fan out cheaply. History
//! snapshots are shared between clones through `Rc`, so a clone copies a
//! vector of pointers rather than a vector of boards.

use std::fmt;
use std::rc::Rc;

use crate::board::{Board, Color};

/// A move: either a pass or a stone placement at `(x, y)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Pass,
    Place(usize, usize),
}

impl Move {
    /// Linear wire form: `-1` for a pass, `x * size + y` otherwise.
    pub fn to_index(self, size: usize) -> isize {
        match self {
            Move::Pass => -1,
            Move::Place(x, y) => (x * size + y) as isize,
        }
    }

    /// Inverse of [`Move::to_index`]; any negative index decodes to a pass.
    pub fn from_index(index: isize, size: usize) -> Move {
        if index < 0 {
            return Move::Pass;
        }
        let index = index as usize;
        assert!(
            index < size * size,
            "index {index} is off a board with {} cells",
            size * size
        );
        Move::Place(index / size, index % size)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => write!(f, "pass"),
            Move::Place(x, y) => write!(f, "({x}, {y})"),
        }
    }
}

/// Why a move application was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The move is not in the state's legal move list.
    Illegal(Move),
    /// The game has already ended and been scored.
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Illegal(mv) => write!(f, "illegal move: {mv}"),
            MoveError::GameOver => write!(f, "game is already over"),
        }
    }
}

impl std::error::Error for MoveError {}

/// One Go position plus the context needed to continue the game from it.
#[derive(Clone)]
pub struct GameState {
    to_move: Color,
    board: Board,
    /// Boards as they stood before each applied move, oldest first.
    history: Vec<Rc<Board>>,
    /// Legal moves for `to_move`, pass first; empty once the game is over.
    legal_moves: Vec<Move>,
    /// Final area score, set exactly when the game has ended.
    score: Option<f64>,
}

impl GameState {
    /// A fresh game from a starting board, `to_move` to play, no history.
    pub fn new(to_move: Color, board: Board) -> Self {
        Self::with_history(to_move, board, Vec::new())
    }

    /// A game resumed mid-flight: the host hands over the current board
    /// plus the prior snapshots its superko bookkeeping has seen.
    pub fn with_history(to_move: Color, board: Board, history: Vec<Board>) -> Self {
        for past in &history {
            assert_eq!(
                past.size, board.size,
                "history snapshot size does not match the board"
            );
        }
        let mut state = GameState {
            to_move,
            board,
            history: history.into_iter().map(Rc::new).collect(),
            legal_moves: Vec::new(),
            score: None,
        };
        state.legal_moves = state.compute_legal_moves();
        state
    }

    pub fn size(&self) -> usize {
        self.board.size
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Legal moves for the side to move. Pass is always first, and always
    /// present while the game runs; the list is empty once it has ended.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// The snapshots behind the repetition rule, oldest first. A caller
    /// handing the game off (to a remote evaluator, say) serializes these
    /// along with the current board.
    pub fn history(&self) -> impl Iterator<Item = &Board> + '_ {
        self.history.iter().map(|past| past.as_ref())
    }

    /// Final score, in White's favor when positive. `None` while the game
    /// is still running.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn is_terminal(&self) -> bool {
        self.score.is_some()
    }

    /// Applies `mv` in place: snapshot the board, place the stone (or not,
    /// for a pass), flip the side to move, recompute legality.
    ///
    /// A pass while the newest snapshot still equals the current board
    /// means the opponent passed too; that second pass ends the game and
    /// freezes the score instead of mutating anything else.
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.score.is_some() {
            return Err(MoveError::GameOver);
        }
        if !self.legal_moves.contains(&mv) {
            return Err(MoveError::Illegal(mv));
        }

        if mv == Move::Pass {
            if let Some(last) = self.history.last() {
                if **last == self.board {
                    self.score = Some(self.area_score());
                    self.legal_moves.clear();
                    return Ok(());
                }
            }
        }

        self.history.push(Rc::new(self.board.clone()));
        if let Move::Place(x, y) = mv {
            self.board = self.board.place(x, y, self.to_move);
        }
        self.to_move = self.to_move.opposite();
        self.legal_moves = self.compute_legal_moves();
        Ok(())
    }

    /// The successor state after `mv`, leaving `self` untouched.
    pub fn get_child(&self, mv: Move) -> Result<GameState, MoveError> {
        let mut child = self.clone();
        child.make_move(mv)?;
        Ok(child)
    }

    /// Legal placements for the side to move, after the unconditional pass.
    ///
    /// Each empty cell runs through a cascade of cheap accepts before the
    /// expensive full placement simulation:
    /// 1. an adjacent empty cell makes it legal outright,
    /// 2. so does joining a chain that keeps a liberty,
    /// 3. so does capturing: every adjacent enemy chain out of liberties.
    /// The quick accepts are withheld from cells where a history snapshot
    /// shows our own stone, since refilling a capture site is how repeats
    /// happen; those cells fall through to the simulation, which rejects
    /// the move only if the resulting board matches a snapshot. Cells with
    /// no liberties from any source are suicide and dropped without
    /// simulating.
    fn compute_legal_moves(&self) -> Vec<Move> {
        let size = self.board.size;
        let own = self.to_move;
        let enemy = own.opposite();
        let mut moves = vec![Move::Pass];

        for x in 0..size {
            for y in 0..size {
                if self.board.get(x, y).is_some() {
                    continue;
                }

                let possible_repeat = self.history.iter().any(|past| past.get(x, y) == Some(own));

                let has_empty_neighbor = self
                    .board
                    .neighbors(x, y)
                    .any(|(nx, ny)| self.board.get(nx, ny).is_none());
                if !possible_repeat && has_empty_neighbor {
                    moves.push(Move::Place(x, y));
                    continue;
                }

                let own_liberties = self.board.liberties(x, y, own);
                if !possible_repeat && own_liberties != 0 {
                    moves.push(Move::Place(x, y));
                    continue;
                }

                let enemy_liberties = self.board.liberties(x, y, enemy);
                let adjacent_enemy = self
                    .board
                    .neighbors(x, y)
                    .any(|(nx, ny)| self.board.get(nx, ny) == Some(enemy));
                if !possible_repeat && enemy_liberties == 0 && adjacent_enemy {
                    moves.push(Move::Place(x, y));
                    continue;
                }

                // Suicide: boxed in, no liberties of our own, and the
                // adjacent enemy chains keep at least one of theirs.
                if !has_empty_neighbor
                    && own_liberties == 0
                    && (enemy_liberties != 0 || !adjacent_enemy)
                {
                    continue;
                }

                let result = self.board.place(x, y, own);
                if !self.history.iter().any(|past| **past == result) {
                    moves.push(Move::Place(x, y));
                }
            }
        }

        moves
    }

    /// Area score of the standing board, in `[-1.0, 1.0]`, positive for
    /// White. Stones count for their color; an empty region counts for a
    /// color only if it touches that color alone. A stoneless board scores
    /// `0.0`.
    pub fn area_score(&self) -> f64 {
        let size = self.board.size;
        let mut white = 0usize;
        let mut black = 0usize;
        for x in 0..size {
            for y in 0..size {
                match self.board.get(x, y) {
                    Some(Color::White) => white += 1,
                    Some(Color::Black) => black += 1,
                    None => {}
                }
            }
        }

        let mut visited = vec![false; size * size];
        for x in 0..size {
            for y in 0..size {
                if visited[x * size + y] || self.board.get(x, y).is_some() {
                    continue;
                }
                let mut stack = vec![(x, y)];
                let mut area = 0usize;
                let mut touches_white = false;
                let mut touches_black = false;
                while let Some((cx, cy)) = stack.pop() {
                    match self.board.get(cx, cy) {
                        Some(Color::White) => {
                            touches_white = true;
                            continue;
                        }
                        Some(Color::Black) => {
                            touches_black = true;
                            continue;
                        }
                        None => {}
                    }
                    let i = cx * size + cy;
                    if visited[i] {
                        continue;
                    }
                    visited[i] = true;
                    area += 1;
                    for n in self.board.neighbors(cx, cy) {
                        stack.push(n);
                    }
                }
                if touches_white && !touches_black {
                    white += area;
                } else if touches_black && !touches_white {
                    black += area;
                }
            }
        }

        let total = white + black;
        if total == 0 {
            return 0.0;
        }
        (white as f64 - black as f64) / total as f64
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} to move", self.to_move)?;
        write!(f, "{}", self.board)
    }
}
