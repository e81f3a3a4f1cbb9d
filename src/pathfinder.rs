use crate::astar::astar;
use crate::coord::Coord;
use crate::error::GridError;
use crate::terrain_grid::TerrainGrid;
use crate::BASE_COST;
use itertools::Itertools;
use log::info;

/// An ordered route from start to goal, both inclusive, with the summed cost of every cell
/// entered after the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Coord>,
    cost: i32,
}

impl Path {
    pub fn steps(&self) -> &[Coord] {
        &self.steps
    }
    pub fn cost(&self) -> i32 {
        self.cost
    }
    /// Number of coordinates, one more than the number of moves.
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    pub fn contains(&self, coord: &Coord) -> bool {
        self.steps.contains(coord)
    }
    pub fn into_steps(self) -> Vec<Coord> {
        self.steps
    }
}

/// Outcome of a search. An unreachable goal is a normal outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    Found(Path),
    NotFound,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }
    pub fn into_path(self) -> Option<Path> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }
}

/// Estimate used to order the frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Manhattan distance times the base step cost. Never overestimates on a 4-grid.
    #[default]
    Manhattan,
    /// Always zero, which turns the search into Dijkstra's algorithm.
    Zero,
}

/// A* search over a [TerrainGrid] with 4-directional movement. The grid is only borrowed for
/// the duration of [find_path](Self::find_path) and never modified.
#[derive(Clone, Debug)]
pub struct PathFinder {
    pub heuristic: Heuristic,
    /// Maximum number of cells to expand before reporting [PathResult::NotFound].
    pub expansion_budget: Option<usize>,
    /// Use the grid's connected components to reject unreachable goals without searching.
    /// Ignored while the components are dirty.
    pub use_components: bool,
}

impl Default for PathFinder {
    fn default() -> PathFinder {
        PathFinder {
            heuristic: Heuristic::Manhattan,
            expansion_budget: None,
            use_components: true,
        }
    }
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder::default()
    }

    pub fn dijkstra() -> PathFinder {
        PathFinder {
            heuristic: Heuristic::Zero,
            ..PathFinder::default()
        }
    }

    pub fn with_expansion_budget(mut self, budget: usize) -> PathFinder {
        self.expansion_budget = Some(budget);
        self
    }

    pub fn with_components(mut self, use_components: bool) -> PathFinder {
        self.use_components = use_components;
        self
    }

    pub fn heuristic(&self, p1: &Coord, p2: &Coord) -> i32 {
        match self.heuristic {
            Heuristic::Manhattan => p1.manhattan_distance(p2) * BASE_COST,
            Heuristic::Zero => 0,
        }
    }

    /// Computes a lowest-cost path from `start` to `goal`.
    ///
    /// An empty grid yields [PathResult::NotFound]. Otherwise both endpoints must lie inside
    /// the grid ([GridError::InvalidCoordinate]) and must not be blocked
    /// ([GridError::Impassable]). If `start == goal` the path is just that cell with cost 0.
    pub fn find_path(
        &self,
        grid: &TerrainGrid,
        start: Coord,
        goal: Coord,
    ) -> Result<PathResult, GridError> {
        if grid.is_empty() {
            info!("Grid has no cells, no path from {} to {}", start, goal);
            return Ok(PathResult::NotFound);
        }
        for point in [start, goal] {
            grid.check_bounds(point)?;
            if !grid.is_passable(point) {
                return Err(GridError::Impassable(point));
            }
        }
        if self.use_components && !grid.components_dirty && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(PathResult::NotFound);
        }
        let result = astar(
            &start,
            |node| grid.neighborhood_points_and_cost(node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
            self.expansion_budget,
        );
        Ok(match result {
            Some((steps, cost)) => {
                info!(
                    "Found path from {} to {} with {} steps and cost {}",
                    start,
                    goal,
                    steps.len() - 1,
                    cost
                );
                PathResult::Found(Path { steps, cost })
            }
            None => {
                info!("No path from {} to {}", start, goal);
                PathResult::NotFound
            }
        })
    }
}

/// Recomputes the cost of walking `steps` on `grid`: the traversal cost of every cell entered
/// after the first. Returns [None] if the sequence is empty, leaves the grid, crosses a blocked
/// cell or contains a move that is not a single orthogonal step.
pub fn path_cost(grid: &TerrainGrid, steps: &[Coord]) -> Option<i32> {
    let first = steps.first()?;
    if !grid.is_passable(*first) {
        return None;
    }
    steps
        .iter()
        .tuple_windows()
        .map(|(a, b)| {
            if a.is_adjacent(b) {
                grid.traversal_cost(*b).ok()
            } else {
                None
            }
        })
        .sum()
}
