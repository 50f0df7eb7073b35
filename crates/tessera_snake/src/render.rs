//! # Text Rendering
//!
//! Draws a world as a framed character grid. Output is plain text with no
//! terminal control sequences; callers decide how to display it.

use crate::world::{Board, SnakeWorld, VISIBLE};

/// Character of an empty cell.
pub const EMPTY_CELL: char = '.';

/// Renders `world` on `board` followed by a score line.
///
/// Entities are drawn in ascending id order, so a higher id wins a shared
/// cell. Off-board entities are skipped.
#[must_use]
pub fn render(world: &SnakeWorld, board: Board) -> String {
    let width = board.width.unsigned_abs() as usize;
    let mut grid = vec![EMPTY_CELL; board.cells()];

    for e in VISIBLE.iter(world) {
        let (Some(drawable), Some(&pos)) = (world.drawable.get(e), world.position.get(e)) else {
            continue;
        };
        if let Some(idx) = board.cell_index(pos) {
            grid[idx] = drawable.symbol;
        }
    }

    let border = "─".repeat(width);
    let mut out = String::with_capacity((width + 3) * (grid.len() / width.max(1) + 3) * 3);

    out.push('┌');
    out.push_str(&border);
    out.push_str("┐\n");
    for row in grid.chunks(width.max(1)) {
        out.push('│');
        out.extend(row.iter());
        out.push_str("│\n");
    }
    out.push('└');
    out.push_str(&border);
    out.push_str("┘\n");
    out.push_str(&format!("Score: {}\n", world.score));

    out
}
