#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze-forge workspace.
//!
//! This crate defines the vocabulary that connects the authoritative grid,
//! the pure carving and decoration systems, and the generation orchestrator.
//! External renderers consume only these types plus the read-only snapshots
//! the world derives from them; no rendering or persistence surface lives
//! here.

use serde::{Deserialize, Serialize};

/// Number of consecutive trap cells that exhausts the hazard budget.
///
/// A traversal that would step onto its third trap in a row is considered
/// lethal and is pruned from hazard-aware path searches.
pub const CONSECUTIVE_TRAP_LIMIT: u32 = 3;

/// Smallest width or height a grid may have after normalization.
pub const MIN_GRID_EXTENT: u32 = 5;

/// Kinds a single maze cell may hold.
///
/// The set is closed; generation moves cells from [`CellKind::Wall`] to
/// [`CellKind::Road`] while carving and from road to one of the decorated
/// kinds afterwards, and only a full grid reset ever reverts a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Solid cell that can never be traversed.
    Wall,
    /// Carved passage cell.
    Road,
    /// Unique cell where traversal begins.
    Entrance,
    /// Unique cell where traversal ends.
    Exit,
    /// Hazard cell that drains the hazard budget when crossed.
    Trap,
    /// Optional reward cell placed on a certified safe path.
    Treasure,
}

impl CellKind {
    /// Single-character symbol renderers use to draw the cell.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '█',
            Self::Road => ' ',
            Self::Entrance => 'E',
            Self::Exit => 'X',
            Self::Trap => 'T',
            Self::Treasure => '$',
        }
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    row: u32,
    column: u32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: GridCoord) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

/// Normalized dimensions of a maze grid.
///
/// Construction rounds even extents up to the next odd value and clamps both
/// extents to [`MIN_GRID_EXTENT`], so a carver always receives a populated
/// odd-by-odd interior lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Normalizes the requested dimensions into valid odd extents.
    #[must_use]
    pub fn odd_normalized(width: u32, height: u32) -> Self {
        Self {
            width: normalize_extent(width),
            height: normalize_extent(height),
        }
    }

    /// Number of cell columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of cell rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells covered by the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

fn normalize_extent(extent: u32) -> u32 {
    let odd = if extent % 2 == 0 {
        extent.saturating_add(1)
    } else {
        extent
    };
    odd.max(MIN_GRID_EXTENT)
}

/// Reasons a decorated maze may fail validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationFailure {
    /// No entrance-to-exit route exists at all.
    NoRoute,
    /// A route exists but every variant crosses a lethal trap run.
    NoSafeRoute,
    /// A treasure was placed but no safe route reaches it.
    UnreachableTreasure,
}

/// Terminal result of the bounded generate-validate-regenerate loop.
///
/// Exhaustion is an expected best-effort outcome rather than an error: the
/// last grid produced stays in place and callers decide whether to surface
/// it or retry externally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationOutcome {
    /// The maze passed validation.
    Valid {
        /// Number of full pipeline attempts consumed, including the last.
        attempts: u32,
    },
    /// Every attempt up to the retry bound failed validation.
    Exhausted {
        /// Number of full pipeline attempts consumed.
        attempts: u32,
        /// Failure observed on the final attempt.
        failure: ValidationFailure,
    },
}

impl GenerationOutcome {
    /// Reports whether the maze carried by this outcome passed validation.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Number of pipeline attempts consumed before the loop terminated.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Valid { attempts } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// On-demand statistics snapshot describing a generated maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeStats {
    /// Width of the grid in cells.
    pub width: u32,
    /// Height of the grid in cells.
    pub height: u32,
    /// Coordinate of the entrance cell.
    pub entrance: GridCoord,
    /// Coordinate of the exit cell.
    pub exit: GridCoord,
    /// Total number of cells in the grid.
    pub total_cells: u64,
    /// Number of plain road cells.
    pub road_cells: u64,
    /// Number of trap cells.
    pub trap_cells: u64,
    /// Whether a treasure cell is present.
    pub has_treasure: bool,
    /// Whether a hazard-safe entrance-to-exit route exists.
    pub has_safe_path: bool,
    /// Cell count of the hazard-safe route, zero when none exists.
    pub safe_path_length: u64,
}
