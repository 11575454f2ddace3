#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized structural carving over an all-wall grid.
//!
//! Odd-indexed interior coordinates form the passage lattice; even-offset
//! cells between them represent the original wall lattice, which is why the
//! carver always jumps by two cells and opens the midpoint behind it. All
//! randomness flows through the injected generator so a fixed seed replays
//! the same maze.

use maze_forge_core::{CellKind, GridCoord};
use maze_forge_world::MazeGrid;
use rand::{seq::SliceRandom, Rng};

/// Two-step moves toward the four cardinal neighbors on the passage lattice.
const JUMPS: [(i64, i64); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

/// Carves a perfect maze into `grid` by iterative randomized depth-first
/// backtracking.
///
/// Starting from `start`, the carver repeatedly shuffles the four two-step
/// jumps, takes the first one landing on an interior wall cell, opens both
/// the midpoint and the destination, and backtracks when no jump is valid.
/// When the traversal stack empties, every odd-indexed interior coordinate
/// belongs to exactly one connected acyclic passage network.
///
/// # Panics
///
/// Panics when `start` is not an odd-by-odd interior coordinate.
pub fn carve_passages(grid: &mut MazeGrid, start: GridCoord, rng: &mut impl Rng) {
    assert!(
        start.row() % 2 == 1 && start.column() % 2 == 1,
        "carve start ({}, {}) must have odd row and column",
        start.row(),
        start.column(),
    );
    assert!(
        start.row() < grid.height() - 1 && start.column() < grid.width() - 1,
        "carve start ({}, {}) must lie in the grid interior",
        start.row(),
        start.column(),
    );

    grid.set_kind(start, CellKind::Road);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut jumps = JUMPS;
        jumps.shuffle(rng);

        let mut advanced = false;
        for (row_jump, column_jump) in jumps {
            let Some(target) = interior_jump(grid, current, row_jump, column_jump) else {
                continue;
            };
            if grid.kind_at(target) != CellKind::Wall {
                continue;
            }

            let midpoint = offset(current, row_jump / 2, column_jump / 2);
            grid.set_kind(midpoint, CellKind::Road);
            grid.set_kind(target, CellKind::Road);
            stack.push(target);
            advanced = true;
            break;
        }

        if !advanced {
            let _ = stack.pop();
        }
    }
}

/// Force-opens perimeter cells adjacent to interior passages.
///
/// Invoked when the perimeter scan yields fewer than two road candidates:
/// every odd perimeter index whose one-step interior neighbor is a road is
/// opened to road. Pathological tiny carves may still come up short, so
/// callers keep a fixed fallback endpoint pair.
pub fn open_border_access(grid: &mut MazeGrid) {
    let width = grid.width();
    let height = grid.height();

    for column in (1..width - 1).step_by(2) {
        if grid.kind_at(GridCoord::new(1, column)) == CellKind::Road {
            grid.set_kind(GridCoord::new(0, column), CellKind::Road);
        }
        if grid.kind_at(GridCoord::new(height - 2, column)) == CellKind::Road {
            grid.set_kind(GridCoord::new(height - 1, column), CellKind::Road);
        }
    }

    for row in (1..height - 1).step_by(2) {
        if grid.kind_at(GridCoord::new(row, 1)) == CellKind::Road {
            grid.set_kind(GridCoord::new(row, 0), CellKind::Road);
        }
        if grid.kind_at(GridCoord::new(row, width - 2)) == CellKind::Road {
            grid.set_kind(GridCoord::new(row, width - 1), CellKind::Road);
        }
    }
}

fn interior_jump(
    grid: &MazeGrid,
    from: GridCoord,
    row_jump: i64,
    column_jump: i64,
) -> Option<GridCoord> {
    let row = i64::from(from.row()) + row_jump;
    let column = i64::from(from.column()) + column_jump;
    let interior = row >= 1
        && column >= 1
        && row < i64::from(grid.height()) - 1
        && column < i64::from(grid.width()) - 1;
    interior.then(|| GridCoord::new(row as u32, column as u32))
}

fn offset(from: GridCoord, row_delta: i64, column_delta: i64) -> GridCoord {
    let row = i64::from(from.row()) + row_delta;
    let column = i64::from(from.column()) + column_delta;
    GridCoord::new(row as u32, column as u32)
}
