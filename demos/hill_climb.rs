//! Shortest climb over a height map, driven by the min-heap

use parq::heap::{Keyed, MinHeap};
use std::collections::HashMap;

const MAP: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi";

type Point = (usize, usize);

fn height(c: u8) -> u8 {
    match c {
        b'S' => b'a',
        b'E' => b'z',
        c => c,
    }
}

fn find(grid: &[&[u8]], target: u8) -> Option<Point> {
    grid.iter()
        .enumerate()
        .find_map(|(x, row)| row.iter().position(|&c| c == target).map(|y| (x, y)))
}

fn neighbours<'a>(grid: &'a [&'a [u8]], (x, y): Point) -> impl Iterator<Item = Point> + 'a {
    let here = height(grid[x][y]);
    let candidates = [
        x.checked_sub(1).map(|nx| (nx, y)),
        (x + 1 < grid.len()).then_some((x + 1, y)),
        y.checked_sub(1).map(|ny| (x, ny)),
        (y + 1 < grid[x].len()).then_some((x, y + 1)),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter(move |&(nx, ny)| height(grid[nx][ny]) <= here + 1)
}

fn shortest(grid: &[&[u8]], start: Point, end: Point) -> Option<(usize, Vec<Point>)> {
    let mut queue = MinHeap::new();
    let mut best: HashMap<Point, usize> = HashMap::from([(start, 0)]);
    let mut parent: HashMap<Point, Point> = HashMap::new();
    let mut visited = 0;

    queue.push(Keyed::new(0, start));
    while let Ok(entry) = queue.pop() {
        let (dist, point) = entry.into_parts();
        visited += 1;

        if best.get(&point).is_some_and(|&d| dist > d) {
            continue;
        }
        if point == end {
            let mut path = vec![end];
            let mut current = end;
            while let Some(&prev) = parent.get(&current) {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            tracing::info!(visited, "end reached");
            return Some((dist, path));
        }

        for next in neighbours(grid, point) {
            let cost = dist + 1;
            if cost < best.get(&next).copied().unwrap_or(usize::MAX) {
                best.insert(next, cost);
                parent.insert(next, point);
                queue.push(Keyed::new(cost, next));
            }
        }
    }

    None
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Hill Climb Example ===\n");

    let grid: Vec<&[u8]> = MAP.lines().map(str::as_bytes).collect();
    let start = find(&grid, b'S').expect("map has a start");
    let end = find(&grid, b'E').expect("map has an end");

    match shortest(&grid, start, end) {
        Some((dist, path)) => {
            println!("Shortest climb: {} steps", dist);
            for (x, row) in grid.iter().enumerate() {
                let line: String = row
                    .iter()
                    .enumerate()
                    .map(|(y, &c)| if path.contains(&(x, y)) { '#' } else { c as char })
                    .collect();
                println!("  {}", line);
            }
        }
        None => println!("No route to the summit"),
    }

    println!("\n=== Example Complete ===");
}
