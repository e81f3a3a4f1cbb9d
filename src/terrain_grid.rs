use crate::coord::Coord;
use crate::error::GridError;
use crate::{BASE_COST, WATER_SURCHARGE};
use core::fmt;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::seq::index;
use rand::Rng;

/// What occupies a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terrain {
    #[default]
    Free,
    Blocked,
    Water,
}

impl Terrain {
    pub fn is_passable(self) -> bool {
        self != Terrain::Blocked
    }

    /// Cost of stepping onto a cell of this kind, [None] for [Terrain::Blocked].
    pub fn cost(self) -> Option<i32> {
        match self {
            Terrain::Free => Some(BASE_COST),
            Terrain::Water => Some(BASE_COST + WATER_SURCHARGE),
            Terrain::Blocked => None,
        }
    }
}

/// [TerrainGrid] stores a row-major matrix of [Terrain] together with connected components of
/// the passable cells, kept in a [UnionFind] structure. Opening up a cell merges components in
/// place; blocking one may split a component, which only marks the components as dirty until
/// [update](Self::update) or [generate_components](Self::generate_components) is called.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Terrain>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl TerrainGrid {
    /// Creates an all-[Terrain::Free] grid. Zero-sized grids are allowed and contain no cells.
    pub fn new(rows: usize, cols: usize) -> TerrainGrid {
        let mut grid = TerrainGrid {
            rows,
            cols,
            cells: vec![Terrain::Free; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.rows
            && (coord.col as usize) < self.cols
    }

    /// Returns the coordinate unchanged if it lies inside the grid.
    pub fn check_bounds(&self, coord: Coord) -> Result<Coord, GridError> {
        if self.in_bounds(coord) {
            Ok(coord)
        } else {
            Err(GridError::InvalidCoordinate {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Only valid for in-bounds coordinates.
    fn ix(&self, coord: Coord) -> usize {
        coord.row as usize * self.cols + coord.col as usize
    }

    pub fn terrain(&self, coord: Coord) -> Result<Terrain, GridError> {
        let coord = self.check_bounds(coord)?;
        Ok(self.cells[self.ix(coord)])
    }

    /// False for blocked cells and for anything outside the grid.
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self.cells[self.ix(coord)].is_passable()
    }

    pub fn traversal_cost(&self, coord: Coord) -> Result<i32, GridError> {
        self.terrain(coord)?
            .cost()
            .ok_or(GridError::Impassable(coord))
    }

    /// Passable 4-neighbours of `coord` with the cost of stepping onto each of them.
    pub fn neighborhood_points_and_cost(&self, coord: &Coord) -> Vec<(Coord, i32)> {
        coord
            .neumann_neighborhood()
            .into_iter()
            .filter(|p| self.in_bounds(*p))
            .filter_map(|p| self.cells[self.ix(p)].cost().map(|c| (p, c)))
            .collect()
    }

    /// Sets a single cell. Out-of-bounds coordinates are rejected and leave the grid unchanged.
    pub fn set_terrain(&mut self, coord: Coord, kind: Terrain) -> Result<(), GridError> {
        let coord = self.check_bounds(coord)?;
        let ix = self.ix(coord);
        let previous = self.cells[ix];
        self.cells[ix] = kind;
        if previous.is_passable() && !kind.is_passable() {
            self.components_dirty = true;
        } else if kind.is_passable() {
            for n in coord.neumann_neighborhood() {
                if self.is_passable(n) {
                    let n_ix = self.ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }

    /// Counts the cells currently holding `kind`.
    pub fn count(&self, kind: Terrain) -> usize {
        self.cells.iter().filter(|&&t| t == kind).count()
    }

    /// Turns `count` distinct [Terrain::Free] cells, chosen with `rng`, into [Terrain::Water].
    /// Fails without modifying the grid if fewer than `count` free cells exist.
    pub fn scatter_water<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<(), GridError> {
        let free: Vec<usize> = (0..self.cells.len())
            .filter(|&ix| self.cells[ix] == Terrain::Free)
            .collect();
        if count > free.len() {
            return Err(GridError::InsufficientFreeCells {
                requested: count,
                available: free.len(),
            });
        }
        for i in index::sample(rng, free.len(), count) {
            self.cells[free[i]] = Terrain::Water;
        }
        info!("Scattered {} water cells", count);
        Ok(())
    }

    /// Retrieves the component id a given [Coord] belongs to.
    pub fn get_component(&self, coord: &Coord) -> Result<usize, GridError> {
        let coord = self.check_bounds(*coord)?;
        Ok(self.components.find(self.ix(coord)))
    }

    /// Checks if start and goal are passable and on the same component.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        self.is_passable(*start)
            && self.is_passable(*goal)
            && self.components.equiv(self.ix(*start), self.ix(*goal))
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Coord, goal: &Coord) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable 4-neighbours.
    pub fn generate_components(&mut self) {
        info!(
            "Generating connected components for {}x{} grid",
            self.rows, self.cols
        );
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let point = Coord::new(row, col);
                if !self.is_passable(point) {
                    continue;
                }
                let parent_ix = self.ix(point);
                // Down and right suffice since every edge is seen from one of its ends.
                for p in [Coord::new(row + 1, col), Coord::new(row, col + 1)] {
                    if self.is_passable(p) {
                        let ix = self.ix(p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in self.cells.chunks(self.cols.max(1)) {
            let values = row
                .iter()
                .map(|t| match t {
                    Terrain::Free => 0,
                    Terrain::Blocked => 1,
                    Terrain::Water => 2,
                })
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn costs_per_terrain() {
        let mut grid = TerrainGrid::new(2, 2);
        grid.set_terrain(Coord::new(0, 1), Terrain::Water).unwrap();
        grid.set_terrain(Coord::new(1, 0), Terrain::Blocked).unwrap();
        assert_eq!(grid.traversal_cost(Coord::new(0, 0)), Ok(1));
        assert_eq!(grid.traversal_cost(Coord::new(0, 1)), Ok(3));
        assert_eq!(
            grid.traversal_cost(Coord::new(1, 0)),
            Err(GridError::Impassable(Coord::new(1, 0)))
        );
        assert!(grid.is_passable(Coord::new(0, 1)));
        assert!(!grid.is_passable(Coord::new(1, 0)));
        assert!(!grid.is_passable(Coord::new(-1, 0)));
        assert!(!grid.is_passable(Coord::new(0, 2)));
    }

    #[test]
    fn out_of_bounds_set_is_rejected() {
        let mut grid = TerrainGrid::new(3, 4);
        let before = grid.cells.clone();
        let err = grid
            .set_terrain(Coord::new(3, 0), Terrain::Blocked)
            .unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCoordinate {
                coord: Coord::new(3, 0),
                rows: 3,
                cols: 4
            }
        );
        assert!(grid.set_terrain(Coord::new(0, -1), Terrain::Water).is_err());
        assert_eq!(grid.cells, before);
        assert!(grid.terrain(Coord::new(2, 3)).is_ok());
        assert!(grid.terrain(Coord::new(2, 4)).is_err());
    }

    #[test]
    fn neighbours_skip_blocked_and_edges() {
        let mut grid = TerrainGrid::new(3, 3);
        grid.set_terrain(Coord::new(0, 1), Terrain::Blocked).unwrap();
        grid.set_terrain(Coord::new(1, 0), Terrain::Water).unwrap();
        let n = grid.neighborhood_points_and_cost(&Coord::new(0, 0));
        assert_eq!(n, vec![(Coord::new(1, 0), 3)]);
        assert_eq!(grid.neighborhood_points_and_cost(&Coord::new(1, 1)).len(), 3);
    }

    /// Tests whether cells are correctly mapped to different connected components.
    #[test]
    fn test_component_generation() {
        // | # |
        // | # |
        let mut grid = TerrainGrid::new(2, 3);
        grid.set_terrain(Coord::new(0, 1), Terrain::Blocked).unwrap();
        grid.set_terrain(Coord::new(1, 1), Terrain::Blocked).unwrap();
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        let left = Coord::new(0, 0);
        assert!(grid.reachable(&left, &Coord::new(1, 0)));
        assert!(grid.unreachable(&left, &Coord::new(0, 2)));
        assert!(grid.unreachable(&left, &Coord::new(0, 1)));
        assert_ne!(
            grid.get_component(&left).unwrap(),
            grid.get_component(&Coord::new(1, 2)).unwrap()
        );
    }

    #[test]
    fn opening_a_cell_joins_components() {
        let mut grid = TerrainGrid::new(1, 3);
        grid.set_terrain(Coord::new(0, 1), Terrain::Blocked).unwrap();
        grid.generate_components();
        assert!(grid.unreachable(&Coord::new(0, 0), &Coord::new(0, 2)));
        grid.set_terrain(Coord::new(0, 1), Terrain::Water).unwrap();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&Coord::new(0, 0), &Coord::new(0, 2)));
    }

    #[test]
    fn scatter_water_only_on_free_cells() {
        let mut grid = TerrainGrid::new(4, 4);
        for col in 0..4 {
            grid.set_terrain(Coord::new(0, col), Terrain::Blocked).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(7);
        grid.scatter_water(12, &mut rng).unwrap();
        assert_eq!(grid.count(Terrain::Blocked), 4);
        assert_eq!(grid.count(Terrain::Water), 12);
        assert_eq!(grid.count(Terrain::Free), 0);
    }

    #[test]
    fn scatter_water_rejects_overfull_request() {
        let mut grid = TerrainGrid::new(2, 2);
        grid.set_terrain(Coord::new(0, 0), Terrain::Blocked).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            grid.scatter_water(4, &mut rng),
            Err(GridError::InsufficientFreeCells {
                requested: 4,
                available: 3
            })
        );
        assert_eq!(grid.count(Terrain::Water), 0);
    }

    #[test]
    fn scatter_water_is_reproducible() {
        let scatter = |seed| {
            let mut grid = TerrainGrid::new(6, 6);
            grid.scatter_water(10, &mut StdRng::seed_from_u64(seed)).unwrap();
            grid.cells
        };
        assert_eq!(scatter(3), scatter(3));
    }

    #[test]
    fn empty_grid_has_no_cells() {
        let grid = TerrainGrid::new(0, 5);
        assert!(grid.is_empty());
        assert!(!grid.is_passable(Coord::new(0, 0)));
        assert!(grid.unreachable(&Coord::new(0, 0), &Coord::new(0, 0)));
    }
}
