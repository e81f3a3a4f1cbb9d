//! # grid_route
//!
//! Shortest-cost route planning on a bounded 2D grid with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Movement is 4-directional; every
//! step costs the traversal cost of the cell being entered, which is [BASE_COST] for free
//! cells and [BASE_COST] + [WATER_SURCHARGE] for water. Blocked cells are never entered. The
//! heuristic is the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), so the first path to
//! reach the goal is optimal. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use grid_route::{Coord, PathFinder, Terrain, TerrainGrid};
//!
//! let mut grid = TerrainGrid::new(3, 3);
//! grid.set_terrain(Coord::new(1, 1), Terrain::Blocked)?;
//! let result = PathFinder::new().find_path(&grid, Coord::new(0, 0), Coord::new(2, 2))?;
//! assert_eq!(result.path().map(|p| p.cost()), Some(4));
//! # Ok::<(), grid_route::GridError>(())
//! ```
pub mod astar;
mod coord;
mod error;
mod pathfinder;
mod render;
mod terrain_grid;

pub use coord::Coord;
pub use error::GridError;
pub use pathfinder::{path_cost, Heuristic, Path, PathFinder, PathResult};
pub use render::RouteView;
pub use terrain_grid::{Terrain, TerrainGrid};

/// Cost of entering any passable cell.
pub const BASE_COST: i32 = 1;
/// Extra cost of entering a [Terrain::Water] cell.
pub const WATER_SURCHARGE: i32 = 2;
