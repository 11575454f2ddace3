#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maze generation orchestration for maze-forge.
//!
//! Drives the carving and decoration systems through an explicit phase
//! machine, validates the decorated grid, and retries the whole pipeline up
//! to a fixed bound. Exceeding the bound is reported as a best-effort
//! outcome carrying the last grid produced; callers must inspect
//! [`GenerationOutcome`] rather than rely on a panic that never comes.

use maze_forge_core::{GenerationOutcome, GridCoord, MazeStats, ValidationFailure};
use maze_forge_system_carving as carving;
use maze_forge_system_decoration as decoration;
use maze_forge_world::{pathing, query, MazeGrid};
use rand::{seq::index, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use maze_forge_core::CellKind;

/// Upper bound on full pipeline attempts before generation gives up.
const MAX_GENERATION_ATTEMPTS: u32 = 10;

/// Interior lattice coordinate every carve starts from.
const CARVE_START: GridCoord = GridCoord::new(1, 1);

/// Phases of a single generation attempt.
///
/// Each attempt walks `Carving → EntranceExitAssigned → Decorated →
/// Validated`; a validation failure aborts the attempt and the orchestrator
/// decides between another round of carving and the terminal best-effort
/// fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Carving,
    EntranceExitAssigned,
    Decorated,
    Validated,
}

/// A generated maze together with the outcome of its generation run.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: MazeGrid,
    outcome: GenerationOutcome,
}

impl Maze {
    /// Generates a maze from OS entropy.
    ///
    /// Width and height are rounded up to the next odd value and clamped to
    /// the supported minimum before carving.
    #[must_use]
    pub fn generate(width: u32, height: u32) -> Self {
        Self::generate_with(width, height, &mut ChaCha8Rng::from_entropy())
    }

    /// Generates a maze from a fixed seed.
    ///
    /// The same seed and dimensions reproduce a bit-identical grid.
    #[must_use]
    pub fn generate_seeded(width: u32, height: u32, seed: u64) -> Self {
        Self::generate_with(width, height, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generates a maze using the provided random source.
    #[must_use]
    pub fn generate_with(width: u32, height: u32, rng: &mut impl Rng) -> Self {
        let mut grid = MazeGrid::new(width, height);
        let mut attempts = 0;

        loop {
            attempts += 1;
            match run_attempt(&mut grid, rng) {
                Ok(()) => {
                    return Self {
                        grid,
                        outcome: GenerationOutcome::Valid { attempts },
                    }
                }
                Err(failure) => {
                    if attempts >= MAX_GENERATION_ATTEMPTS {
                        return Self {
                            grid,
                            outcome: GenerationOutcome::Exhausted { attempts, failure },
                        };
                    }
                }
            }
        }
    }

    /// Read-only access to the generated grid.
    #[must_use]
    pub const fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Outcome of the bounded generation loop.
    #[must_use]
    pub const fn outcome(&self) -> GenerationOutcome {
        self.outcome
    }

    /// Entrance coordinate of the maze.
    #[must_use]
    pub fn entrance(&self) -> GridCoord {
        self.grid
            .entrance()
            .expect("generation always assigns an entrance")
    }

    /// Exit coordinate of the maze.
    #[must_use]
    pub fn exit(&self) -> GridCoord {
        self.grid.exit().expect("generation always assigns an exit")
    }

    /// Bounds-checked cell lookup.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the grid.
    #[must_use]
    pub fn kind_at(&self, coord: GridCoord) -> CellKind {
        self.grid.kind_at(coord)
    }

    /// Computes a fresh statistics snapshot for the maze.
    #[must_use]
    pub fn stats(&self) -> MazeStats {
        query::stats(&self.grid)
    }
}

/// Checks the three validity conditions of a decorated grid.
///
/// The grid is valid when a plain entrance-to-exit route exists, a
/// hazard-safe route exists, and any treasure present is reachable on a
/// hazard-safe route. Calling this twice on an unmutated grid yields the
/// same result.
///
/// # Panics
///
/// Panics when the entrance or exit has not been assigned yet.
pub fn validate(grid: &MazeGrid) -> Result<(), ValidationFailure> {
    let entrance = grid
        .entrance()
        .expect("validation requires an assigned entrance");
    let exit = grid.exit().expect("validation requires an assigned exit");

    if pathing::shortest_path(grid, entrance, exit).is_empty() {
        return Err(ValidationFailure::NoRoute);
    }

    if pathing::safe_path(grid, entrance, exit).is_empty() {
        return Err(ValidationFailure::NoSafeRoute);
    }

    if let Some(treasure) = query::treasure_cell(grid) {
        if pathing::safe_path(grid, entrance, treasure).is_empty() {
            return Err(ValidationFailure::UnreachableTreasure);
        }
    }

    Ok(())
}

fn run_attempt(grid: &mut MazeGrid, rng: &mut impl Rng) -> Result<(), ValidationFailure> {
    let mut phase = Phase::Carving;
    loop {
        phase = match phase {
            Phase::Carving => {
                grid.reset();
                carving::carve_passages(grid, CARVE_START, rng);
                assign_endpoints(grid, rng);
                Phase::EntranceExitAssigned
            }
            Phase::EntranceExitAssigned => {
                let entrance = grid
                    .entrance()
                    .expect("endpoint assignment precedes decoration");
                let exit = grid.exit().expect("endpoint assignment precedes decoration");
                let baseline = pathing::shortest_path(grid, entrance, exit);
                let _ = decoration::place_traps(grid, &baseline, rng);
                let _ = decoration::place_treasure(grid, &baseline, rng);
                Phase::Decorated
            }
            Phase::Decorated => {
                validate(grid)?;
                Phase::Validated
            }
            Phase::Validated => return Ok(()),
        };
    }
}

/// Selects and records the entrance and exit cells.
///
/// The perimeter is scanned for road candidates; when fewer than two exist
/// the border is force-opened next to interior passages and rescanned. Two
/// distinct candidates are sampled uniformly at random, or the fixed
/// fallback pair is used when even the rescan comes up short.
fn assign_endpoints(grid: &mut MazeGrid, rng: &mut impl Rng) {
    let mut border = query::border_road_cells(grid);
    if border.len() < 2 {
        carving::open_border_access(grid);
        border = query::border_road_cells(grid);
    }

    let (entrance, exit) = if border.len() >= 2 {
        let picked = index::sample(rng, border.len(), 2);
        (border[picked.index(0)], border[picked.index(1)])
    } else {
        fallback_endpoints(grid)
    };

    grid.assign_entrance_exit(entrance, exit);
}

fn fallback_endpoints(grid: &MazeGrid) -> (GridCoord, GridCoord) {
    (
        GridCoord::new(1, 0),
        GridCoord::new(grid.height() - 2, grid.width() - 1),
    )
}
