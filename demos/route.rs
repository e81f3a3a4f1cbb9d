use grid_route::{Coord, GridError, PathFinder, PathResult, RouteView, Terrain, TerrainGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Plans a route across a 10x10 city with a handful of buildings and ten scattered water cells.
//
//     cargo run --example route -- 0,0 9,9
//
// The optional arguments are the start and goal as "row,col". Set RUST_LOG=info to see the
// search being logged.

const BUILDINGS: [(i32, i32); 8] = [(1, 1), (1, 2), (2, 5), (3, 5), (4, 5), (6, 2), (7, 7), (8, 3)];

fn main() -> Result<(), GridError> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let start: Coord = args.next().as_deref().unwrap_or("0,0").parse()?;
    let goal: Coord = args.next().as_deref().unwrap_or("9,9").parse()?;

    let mut grid = TerrainGrid::new(10, 10);
    for building in BUILDINGS {
        grid.set_terrain(building.into(), Terrain::Blocked)?;
    }
    grid.update();
    grid.scatter_water(10, &mut StdRng::seed_from_u64(42))?;
    println!("Map with obstacles:");
    println!("{}", RouteView::new(&grid));

    grid.check_bounds(start)?;
    grid.check_bounds(goal)?;
    if grid.terrain(start)? != Terrain::Free || grid.terrain(goal)? != Terrain::Free {
        println!("Start and goal must be free cells.");
        return Ok(());
    }

    let result = PathFinder::new().find_path(&grid, start, goal)?;
    let mut view = RouteView::new(&grid).with_endpoints(start, goal);
    if let Some(path) = result.path() {
        view = view.with_path(path);
    }
    println!("Map with route:");
    println!("{}", view);
    match result {
        PathResult::Found(path) => {
            let steps = path.steps().iter().map(|p| p.to_string()).collect::<Vec<_>>();
            println!("Route found (cost {}): {}", path.cost(), steps.join(" -> "));
        }
        PathResult::NotFound => println!("No route found."),
    }
    Ok(())
}
