//! Breadth-first route searches over the maze grid.
//!
//! Both searches share one breadth-first core over an abstract state graph.
//! The plain search walks coordinates directly, while the hazard-aware
//! search widens each state with the consecutive-trap budget so a cell can
//! be revisited when a later approach arrives with a smaller trap streak.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use maze_forge_core::{CellKind, GridCoord, CONSECUTIVE_TRAP_LIMIT};

use crate::MazeGrid;

/// Shortest entrance-to-exit route by plain reachability.
///
/// Traversable neighbor kinds are [`CellKind::Road`] and [`CellKind::Exit`];
/// the start cell itself is never inspected. Returns the coordinate sequence
/// from `start` to `goal`, or an empty vector when the goal is unreachable.
#[must_use]
pub fn shortest_path(grid: &MazeGrid, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
    breadth_first(
        start,
        |cell| {
            neighbor_cells(grid, cell)
                .filter(|&next| {
                    matches!(grid.kind_at(next), CellKind::Road | CellKind::Exit)
                })
                .collect::<Vec<_>>()
        },
        |cell| cell == goal,
        |cell| cell,
    )
}

/// Hazard-aware route that certifies the maze is still beatable.
///
/// Search state is the pair of coordinate and consecutive-trap streak. Road,
/// exit, and treasure cells reset the streak; a trap increments it and the
/// transition is pruned once the incremented streak would reach
/// [`CONSECUTIVE_TRAP_LIMIT`]. Walls and the entrance are never traversed as
/// interior hops. The search succeeds on any state whose coordinate equals
/// `goal`; the returned sequence discards the streak component. Returns an
/// empty vector when no hazard-safe route exists.
#[must_use]
pub fn safe_path(grid: &MazeGrid, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
    let origin = SafeState {
        cell: start,
        streak: 0,
    };
    breadth_first(
        origin,
        |state: SafeState| {
            let mut successors = Vec::new();
            for next in neighbor_cells(grid, state.cell) {
                let streak = match grid.kind_at(next) {
                    CellKind::Trap => {
                        let lengthened = state.streak + 1;
                        if lengthened >= CONSECUTIVE_TRAP_LIMIT {
                            continue;
                        }
                        lengthened
                    }
                    CellKind::Road | CellKind::Exit | CellKind::Treasure => 0,
                    CellKind::Wall | CellKind::Entrance => continue,
                };
                successors.push(SafeState { cell: next, streak });
            }
            successors
        },
        |state| state.cell == goal,
        |state| state.cell,
    )
}

/// Coordinate paired with the consecutive-trap streak accrued to reach it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct SafeState {
    cell: GridCoord,
    streak: u32,
}

/// Breadth-first search over an arbitrary state graph.
///
/// Parent pointers are recorded in discovery order, so the first goal state
/// found reconstructs a shortest path in transition count. `project` maps a
/// state back to its grid coordinate for reconstruction.
fn breadth_first<S, I>(
    start: S,
    mut expand: impl FnMut(S) -> I,
    is_goal: impl Fn(S) -> bool,
    project: impl Fn(S) -> GridCoord,
) -> Vec<GridCoord>
where
    S: Copy + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    if is_goal(start) {
        return vec![project(start)];
    }

    let mut parents: HashMap<S, Option<S>> = HashMap::new();
    let _ = parents.insert(start, None);
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(state) = queue.pop_front() {
        for next in expand(state) {
            if parents.contains_key(&next) {
                continue;
            }
            let _ = parents.insert(next, Some(state));
            if is_goal(next) {
                return reconstruct(&parents, next, &project);
            }
            queue.push_back(next);
        }
    }

    Vec::new()
}

fn reconstruct<S>(
    parents: &HashMap<S, Option<S>>,
    goal: S,
    project: &impl Fn(S) -> GridCoord,
) -> Vec<GridCoord>
where
    S: Copy + Eq + Hash,
{
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(state) = cursor {
        path.push(project(state));
        cursor = parents.get(&state).copied().flatten();
    }
    path.reverse();
    path
}

/// In-bounds 4-neighbors in the fixed exploration order down, up, right,
/// left. The order is not semantically significant but keeps tie-breaking
/// among equal-length routes deterministic.
fn neighbor_cells(grid: &MazeGrid, cell: GridCoord) -> impl Iterator<Item = GridCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = cell.row().checked_add(1) {
        if row < grid.height() {
            candidates[count] = Some(GridCoord::new(row, cell.column()));
            count += 1;
        }
    }

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(GridCoord::new(row, cell.column()));
        count += 1;
    }

    if let Some(column) = cell.column().checked_add(1) {
        if column < grid.width() {
            candidates[count] = Some(GridCoord::new(cell.row(), column));
            count += 1;
        }
    }

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(GridCoord::new(cell.row(), column));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}
