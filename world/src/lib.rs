#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze grid state for maze-forge.
//!
//! The grid is owned exclusively by its generator for its whole lifetime:
//! carving and decoration systems mutate it in place, the orchestrator resets
//! it between attempts, and external consumers read it only through the
//! [`query`] module and the searches in [`pathing`].

pub mod pathing;

use maze_forge_core::{CellKind, GridCoord, GridSize};

/// Rectangular grid of maze cells with normalized odd dimensions.
///
/// Freshly constructed grids are entirely [`CellKind::Wall`]. Out-of-bounds
/// access is a caller bug and panics; every mutating collaborator is expected
/// to pre-validate coordinates against [`MazeGrid::size`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    size: GridSize,
    cells: Vec<CellKind>,
    entrance: Option<GridCoord>,
    exit: Option<GridCoord>,
}

impl MazeGrid {
    /// Creates an all-wall grid, rounding even extents up to the next odd
    /// value and clamping both to the supported minimum.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = GridSize::odd_normalized(width, height);
        let capacity = usize::try_from(size.cell_count())
            .expect("normalized grid exceeds addressable memory");
        Self {
            size,
            cells: vec![CellKind::Wall; capacity],
            entrance: None,
            exit: None,
        }
    }

    /// Normalized dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Number of cell columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width()
    }

    /// Number of cell rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height()
    }

    /// Kind currently held by the cell at the provided coordinate.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the grid.
    #[must_use]
    pub fn kind_at(&self, coord: GridCoord) -> CellKind {
        self.cells[self.index(coord)]
    }

    /// Overwrites the kind held by the cell at the provided coordinate.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the grid.
    pub fn set_kind(&mut self, coord: GridCoord, kind: CellKind) {
        let index = self.index(coord);
        self.cells[index] = kind;
    }

    /// Reports whether the coordinate falls inside the grid.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.row() < self.size.height() && coord.column() < self.size.width()
    }

    /// Restores the grid to its all-wall state and clears the endpoints.
    pub fn reset(&mut self) {
        self.cells.fill(CellKind::Wall);
        self.entrance = None;
        self.exit = None;
    }

    /// Marks the provided cells as the unique entrance and exit.
    ///
    /// # Panics
    ///
    /// Panics when the two coordinates coincide or lie outside the grid.
    pub fn assign_entrance_exit(&mut self, entrance: GridCoord, exit: GridCoord) {
        assert!(
            entrance != exit,
            "entrance and exit must be distinct cells"
        );
        self.set_kind(entrance, CellKind::Entrance);
        self.set_kind(exit, CellKind::Exit);
        self.entrance = Some(entrance);
        self.exit = Some(exit);
    }

    /// Entrance coordinate, once assigned.
    #[must_use]
    pub const fn entrance(&self) -> Option<GridCoord> {
        self.entrance
    }

    /// Exit coordinate, once assigned.
    #[must_use]
    pub const fn exit(&self) -> Option<GridCoord> {
        self.exit
    }

    /// Iterates every coordinate of the grid in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let width = self.size.width();
        let height = self.size.height();
        (0..height).flat_map(move |row| (0..width).map(move |column| GridCoord::new(row, column)))
    }

    fn index(&self, coord: GridCoord) -> usize {
        assert!(
            self.contains(coord),
            "coordinate ({}, {}) lies outside the {}x{} grid",
            coord.row(),
            coord.column(),
            self.size.width(),
            self.size.height(),
        );
        coord.row() as usize * self.size.width() as usize + coord.column() as usize
    }
}

/// Query functions that provide read-only access to the grid state.
pub mod query {
    use super::{pathing, MazeGrid};
    use maze_forge_core::{CellKind, GridCoord, MazeStats};

    /// Bounds-checked cell lookup exposed to external renderers.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the grid.
    #[must_use]
    pub fn cell_at(grid: &MazeGrid, coord: GridCoord) -> CellKind {
        grid.kind_at(coord)
    }

    /// Scans all four perimeter edges for road cells usable as endpoints.
    ///
    /// Top and bottom edges are visited column by column, then the left and
    /// right edges row by row; the order is fixed so endpoint sampling stays
    /// deterministic under a fixed random source.
    #[must_use]
    pub fn border_road_cells(grid: &MazeGrid) -> Vec<GridCoord> {
        let width = grid.width();
        let height = grid.height();
        let mut cells = Vec::new();

        for column in 0..width {
            let top = GridCoord::new(0, column);
            if grid.kind_at(top) == CellKind::Road {
                cells.push(top);
            }
            let bottom = GridCoord::new(height - 1, column);
            if grid.kind_at(bottom) == CellKind::Road {
                cells.push(bottom);
            }
        }

        for row in 0..height {
            let left = GridCoord::new(row, 0);
            if grid.kind_at(left) == CellKind::Road {
                cells.push(left);
            }
            let right = GridCoord::new(row, width - 1);
            if grid.kind_at(right) == CellKind::Road {
                cells.push(right);
            }
        }

        cells
    }

    /// Locates the treasure cell, if one was placed.
    #[must_use]
    pub fn treasure_cell(grid: &MazeGrid) -> Option<GridCoord> {
        grid.coords()
            .find(|&coord| grid.kind_at(coord) == CellKind::Treasure)
    }

    /// Computes a fresh statistics snapshot for the grid.
    ///
    /// Nothing is cached; the hazard-safe route is recomputed on every call.
    ///
    /// # Panics
    ///
    /// Panics when the entrance or exit has not been assigned yet, since a
    /// statistics request before endpoint assignment is a caller bug.
    #[must_use]
    pub fn stats(grid: &MazeGrid) -> MazeStats {
        let entrance = grid
            .entrance()
            .expect("stats requested before the entrance was assigned");
        let exit = grid
            .exit()
            .expect("stats requested before the exit was assigned");

        let mut road_cells = 0;
        let mut trap_cells = 0;
        let mut has_treasure = false;
        for coord in grid.coords() {
            match grid.kind_at(coord) {
                CellKind::Road => road_cells += 1,
                CellKind::Trap => trap_cells += 1,
                CellKind::Treasure => has_treasure = true,
                CellKind::Wall | CellKind::Entrance | CellKind::Exit => {}
            }
        }

        let safe = pathing::safe_path(grid, entrance, exit);

        MazeStats {
            width: grid.width(),
            height: grid.height(),
            entrance,
            exit,
            total_cells: grid.size().cell_count(),
            road_cells,
            trap_cells,
            has_treasure,
            has_safe_path: !safe.is_empty(),
            safe_path_length: safe.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{query, MazeGrid};
    use maze_forge_core::{CellKind, GridCoord};

    #[test]
    fn new_grid_is_normalized_and_walled() {
        let grid = MazeGrid::new(10, 8);
        assert_eq!(grid.width(), 11);
        assert_eq!(grid.height(), 9);
        assert!(grid
            .coords()
            .all(|coord| grid.kind_at(coord) == CellKind::Wall));
        assert_eq!(grid.entrance(), None);
        assert_eq!(grid.exit(), None);
    }

    #[test]
    fn tiny_requests_clamp_to_minimum_extent() {
        let grid = MazeGrid::new(1, 2);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
    }

    #[test]
    fn set_kind_round_trips_through_lookup() {
        let mut grid = MazeGrid::new(5, 5);
        let coord = GridCoord::new(2, 3);
        grid.set_kind(coord, CellKind::Road);
        assert_eq!(grid.kind_at(coord), CellKind::Road);
        assert_eq!(query::cell_at(&grid, coord), CellKind::Road);
    }

    #[test]
    #[should_panic(expected = "outside the 5x5 grid")]
    fn out_of_bounds_lookup_panics() {
        let grid = MazeGrid::new(5, 5);
        let _ = grid.kind_at(GridCoord::new(5, 0));
    }

    #[test]
    #[should_panic(expected = "distinct cells")]
    fn coincident_endpoints_panic() {
        let mut grid = MazeGrid::new(5, 5);
        grid.assign_entrance_exit(GridCoord::new(1, 0), GridCoord::new(1, 0));
    }

    #[test]
    fn reset_restores_the_all_wall_state() {
        let mut grid = MazeGrid::new(5, 5);
        grid.set_kind(GridCoord::new(1, 1), CellKind::Road);
        grid.assign_entrance_exit(GridCoord::new(1, 0), GridCoord::new(3, 4));
        grid.reset();
        assert!(grid
            .coords()
            .all(|coord| grid.kind_at(coord) == CellKind::Wall));
        assert_eq!(grid.entrance(), None);
        assert_eq!(grid.exit(), None);
    }

    #[test]
    fn assign_entrance_exit_records_endpoints() {
        let mut grid = MazeGrid::new(5, 5);
        let entrance = GridCoord::new(1, 0);
        let exit = GridCoord::new(3, 4);
        grid.assign_entrance_exit(entrance, exit);
        assert_eq!(grid.entrance(), Some(entrance));
        assert_eq!(grid.exit(), Some(exit));
        assert_eq!(grid.kind_at(entrance), CellKind::Entrance);
        assert_eq!(grid.kind_at(exit), CellKind::Exit);
    }

    #[test]
    fn border_scan_reports_perimeter_roads_in_fixed_order() {
        let mut grid = MazeGrid::new(7, 7);
        grid.set_kind(GridCoord::new(0, 3), CellKind::Road);
        grid.set_kind(GridCoord::new(6, 1), CellKind::Road);
        grid.set_kind(GridCoord::new(5, 0), CellKind::Road);
        grid.set_kind(GridCoord::new(3, 6), CellKind::Road);
        // Interior roads must never show up in the scan.
        grid.set_kind(GridCoord::new(3, 3), CellKind::Road);

        let cells = query::border_road_cells(&grid);
        assert_eq!(
            cells,
            vec![
                GridCoord::new(6, 1),
                GridCoord::new(0, 3),
                GridCoord::new(3, 6),
                GridCoord::new(5, 0),
            ]
        );
    }

    #[test]
    fn treasure_scan_finds_the_first_treasure_cell() {
        let mut grid = MazeGrid::new(5, 5);
        assert_eq!(query::treasure_cell(&grid), None);
        grid.set_kind(GridCoord::new(3, 2), CellKind::Treasure);
        assert_eq!(query::treasure_cell(&grid), Some(GridCoord::new(3, 2)));
    }

    #[test]
    fn stats_counts_cells_and_reports_safe_route() {
        let mut grid = MazeGrid::new(9, 5);
        for column in 1..8 {
            grid.set_kind(GridCoord::new(1, column), CellKind::Road);
        }
        grid.set_kind(GridCoord::new(1, 4), CellKind::Trap);
        grid.set_kind(GridCoord::new(1, 6), CellKind::Treasure);
        grid.assign_entrance_exit(GridCoord::new(1, 0), GridCoord::new(1, 8));

        let stats = query::stats(&grid);
        assert_eq!(stats.width, 9);
        assert_eq!(stats.height, 5);
        assert_eq!(stats.total_cells, 45);
        assert_eq!(stats.road_cells, 5);
        assert_eq!(stats.trap_cells, 1);
        assert!(stats.has_treasure);
        assert!(stats.has_safe_path);
        assert_eq!(stats.safe_path_length, 9);
    }

    #[test]
    #[should_panic(expected = "before the entrance was assigned")]
    fn stats_before_endpoint_assignment_panics() {
        let grid = MazeGrid::new(5, 5);
        let _ = query::stats(&grid);
    }
}
