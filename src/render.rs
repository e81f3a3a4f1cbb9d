use crate::coord::Coord;
use crate::pathfinder::Path;
use crate::terrain_grid::{Terrain, TerrainGrid};
use core::fmt;
use fxhash::FxHashSet;

/// Console view of a grid with optional start, goal and route overlays.
///
/// ```text
///     0  1  2
///  +---------+
///  0| S ** ## |
///  1|    ** ~~ |
/// ```
///
/// Blocked cells are drawn as `##`, water as `~~`, route cells as `**` and the endpoints as
/// ` S` and ` E`.
#[derive(Clone, Debug)]
pub struct RouteView<'a> {
    grid: &'a TerrainGrid,
    start: Option<Coord>,
    goal: Option<Coord>,
    route: FxHashSet<Coord>,
}

impl<'a> RouteView<'a> {
    pub fn new(grid: &'a TerrainGrid) -> RouteView<'a> {
        RouteView {
            grid,
            start: None,
            goal: None,
            route: FxHashSet::default(),
        }
    }

    pub fn with_endpoints(mut self, start: Coord, goal: Coord) -> RouteView<'a> {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }

    pub fn with_path(mut self, path: &Path) -> RouteView<'a> {
        self.route = path.steps().iter().copied().collect();
        self
    }

    fn symbol(&self, coord: Coord) -> &'static str {
        if self.start == Some(coord) {
            " S"
        } else if self.goal == Some(coord) {
            " E"
        } else if self.route.contains(&coord) {
            "**"
        } else {
            match self.grid.terrain(coord) {
                Ok(Terrain::Blocked) => "##",
                Ok(Terrain::Water) => "~~",
                _ => "  ",
            }
        }
    }
}

impl fmt::Display for RouteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cols = self.grid.cols();
        write!(f, "  ")?;
        let header = (0..cols).map(|col| format!("{col:2}")).collect::<Vec<_>>();
        writeln!(f, "{}", header.join(" "))?;
        let border = format!(" +{}+", "---".repeat(cols));
        writeln!(f, "{border}")?;
        for row in 0..self.grid.rows() {
            write!(f, "{row:2}|")?;
            for col in 0..cols {
                write!(f, "{} ", self.symbol(Coord::new(row as i32, col as i32)))?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathFinder;

    #[test]
    fn draws_terrain_and_route() {
        let mut grid = TerrainGrid::new(2, 3);
        grid.set_terrain(Coord::new(0, 2), Terrain::Blocked).unwrap();
        grid.set_terrain(Coord::new(1, 2), Terrain::Water).unwrap();
        let start = Coord::new(0, 0);
        let goal = Coord::new(1, 1);
        let result = PathFinder::new().find_path(&grid, start, goal).unwrap();
        let view = RouteView::new(&grid)
            .with_endpoints(start, goal)
            .with_path(result.path().unwrap());
        let rendered = view.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "   0  1  2");
        assert_eq!(lines[1], " +---------+");
        assert!(lines[2].starts_with(" 0| S "));
        assert!(lines[2].ends_with("## |"));
        assert!(lines[3].starts_with(" 1|"));
        assert!(lines[3].contains(" E"));
        assert!(lines[3].ends_with("~~ |"));
        assert!(rendered.contains("**"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn plain_grid_has_no_overlays() {
        let grid = TerrainGrid::new(1, 2);
        let rendered = RouteView::new(&grid).to_string();
        assert_eq!(rendered.lines().nth(2), Some(" 0|      |"));
    }
}
