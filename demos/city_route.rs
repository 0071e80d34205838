use emergency_routing::{render_path, search, CityGrid, Strategy};
use std::fs;

// The ambulance S has to reach the hospital H on a 9x9 city map, where
// - T marks a traffic jam that cannot be passed
// - . marks an open road
//
// Usage: city_route [gbfs|astar] [map file]
const CITY_MAP: &str = "
    . . . . . . . . .
    . S . . T T . . .
    . . . . T . . . .
    . T T T T . T T .
    . . . . . . . . .
    . . T T . T T . .
    . . . . . . T . .
    . T . T T . . H .
    . . . . . . . . .
";

fn main() {
    let mut args = std::env::args().skip(1);
    let strategies = match args.next() {
        Some(name) => match name.parse::<Strategy>() {
            Ok(strategy) => vec![strategy],
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        },
        None => vec![Strategy::Greedy, Strategy::AStar],
    };
    let map = match args.next() {
        Some(path) => match fs::read_to_string(&path) {
            Ok(map) => map,
            Err(e) => {
                eprintln!("Could not read {}: {}", path, e);
                return;
            }
        },
        None => CITY_MAP.to_owned(),
    };
    let grid: CityGrid = match map.parse() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid map: {}", e);
            return;
        }
    };
    let (start, goal) = match grid.find_markers() {
        Ok(markers) => markers,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    println!("Ambulance position: {}", start);
    println!("Hospital position: {}", goal);

    let mut routes = Vec::new();
    for strategy in strategies {
        println!("\nSearching for a route with {}...", strategy);
        match search(&grid, start, goal, strategy) {
            Ok(result) => {
                println!("{}", result);
                routes.push((strategy, result));
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    println!("\nCity map:");
    print!("{}", grid);
    for (strategy, result) in routes {
        println!("\n{} route:", strategy);
        print!("{}", render_path(&grid, result.path.as_deref()));
    }
}
