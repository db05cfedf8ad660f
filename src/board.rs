//! Board grid and flood-fill analysis.
//!
//! The board is a plain square grid of cells; it knows nothing about turn
//! order, history, or legality. What it does know is connectivity: liberty
//! counting, chain discovery, and capture resolution, all via iterative
//! flood fills with an explicit stack.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other side.
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A 0-indexed board coordinate `(x, y)`, both components in `[0, size)`.
pub type Point = (usize, usize);

/// A square grid of cells, `size * size` of them, row `x` first.
///
/// Out-of-bounds coordinates are programming errors and panic; callers
/// iterate `0..size` or walk [`Board::neighbors`], which only yields
/// in-bounds points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// An empty board with the given side length.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be at least 1");
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Builds a board from row strings using the marks `X` (Black),
    /// `O` (White) and `.` (empty), one string per row.
    ///
    /// Panics on jagged rows or unknown marks; this is a constructor for
    /// fixtures and driver glue, not a lenient parser.
    pub fn parse(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut board = Board::new(size);
        for (x, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                size,
                "row {x} has length {}, expected {size}",
                row.len()
            );
            for (y, mark) in row.bytes().enumerate() {
                let cell = match mark {
                    b'.' => None,
                    b'X' => Some(Color::Black),
                    b'O' => Some(Color::White),
                    other => panic!("unknown board mark {:?}", other as char),
                };
                board.set(x, y, cell);
            }
        }
        board
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.size && y < self.size,
            "({x}, {y}) is off the {0}x{0} board",
            self.size
        );
        x * self.size + y
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Option<Color>) {
        let i = self.idx(x, y);
        self.cells[i] = cell;
    }

    /// The 2-4 orthogonal neighbors of `(x, y)` that are on the board.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        let mut v = Vec::new();
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < s {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < s {
            v.push((x, y + 1));
        }
        v.into_iter()
    }

    /// Liberties of the chain a `color` stone at `(x, y)` would belong to,
    /// with the stone treated as present whether or not it is.
    ///
    /// The fill starts from the neighbors with `(x, y)` already marked, so
    /// the cell's own emptiness never counts, and each empty cell counts
    /// exactly once no matter how many chain stones touch it. If `(x, y)`
    /// touches several separate `color` chains, this is the liberty count
    /// of their union, which is what placement legality needs.
    pub fn liberties(&self, x: usize, y: usize, color: Color) -> usize {
        let mut visited = vec![false; self.size * self.size];
        visited[self.idx(x, y)] = true;
        let mut stack: Vec<Point> = self.neighbors(x, y).collect();
        let mut liberties = 0;
        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            match self.get(cx, cy) {
                None => liberties += 1,
                Some(c) if c == color => {
                    for n in self.neighbors(cx, cy) {
                        stack.push(n);
                    }
                }
                _ => {}
            }
        }
        liberties
    }

    /// The chain of `color` stones connected to `(x, y)`, together with its
    /// liberty count.
    ///
    /// Unlike [`Board::liberties`] the fill starts at `(x, y)` itself, so
    /// the result describes the chain as it stands on the board.
    pub fn chain(&self, x: usize, y: usize, color: Color) -> (Vec<Point>, usize) {
        let mut visited = vec![false; self.size * self.size];
        let mut stack = vec![(x, y)];
        let mut chain = Vec::new();
        let mut liberties = 0;
        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            match self.get(cx, cy) {
                None => liberties += 1,
                Some(c) if c == color => {
                    chain.push((cx, cy));
                    for n in self.neighbors(cx, cy) {
                        stack.push(n);
                    }
                }
                _ => {}
            }
        }
        (chain, liberties)
    }

    /// The board after `color` plays at `(x, y)`: the stone is placed and
    /// every adjacent enemy chain left without liberties is removed.
    ///
    /// `self` is untouched. No legality check happens here; in particular
    /// the placed stone may end up with no liberties itself. Whether that
    /// is allowed is the caller's question, not the board's.
    pub fn place(&self, x: usize, y: usize, color: Color) -> Board {
        let mut next = self.clone();
        next.set(x, y, Some(color));
        next.resolve_captures(x, y, color);
        next
    }

    fn resolve_captures(&mut self, x: usize, y: usize, placed: Color) {
        let enemy = placed.opposite();
        let adjacent: Vec<Point> = self.neighbors(x, y).collect();
        for (nx, ny) in adjacent {
            // A neighbor already cleared as part of an earlier chain reads
            // as empty here and is skipped.
            if self.get(nx, ny) != Some(enemy) {
                continue;
            }
            let (chain, liberties) = self.chain(nx, ny, enemy);
            if liberties == 0 {
                for (cx, cy) in chain {
                    self.set(cx, cy, None);
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..self.size {
            for y in 0..self.size {
                let ch = match self.get(x, y) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
