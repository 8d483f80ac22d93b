//! Paced trail search from every trailhead, a few at a time

use parq::prelude::*;
use std::time::Duration;

const MAP: &str = "\
89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732";

type Grid = Vec<Vec<u8>>;

async fn count_trails(
    grid: &Grid,
    (x, y): (usize, usize),
    delay: Duration,
    token: &CancelToken,
) -> std::result::Result<usize, TaskError> {
    let mut visited = vec![vec![false; grid[0].len()]; grid.len()];
    let mut stack = vec![(x, y)];
    let mut trails = 0;

    while let Some((x, y)) = stack.pop() {
        if visited[x][y] {
            continue;
        }
        visited[x][y] = true;
        sleep(delay, Some(token)).await?;

        let depth = grid[x][y];
        if depth == 9 {
            trails += 1;
            continue;
        }

        let steps = [
            x.checked_sub(1).map(|nx| (nx, y)),
            (x + 1 < grid.len()).then_some((x + 1, y)),
            y.checked_sub(1).map(|ny| (x, ny)),
            (y + 1 < grid[x].len()).then_some((x, y + 1)),
        ];
        stack.extend(
            steps
                .into_iter()
                .flatten()
                .filter(|&(nx, ny)| grid[nx][ny] == depth + 1),
        );
    }

    Ok(trails)
}

#[tokio::main]
async fn main() -> parq::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Trailheads Example ===\n");

    let grid: Grid = MAP
        .lines()
        .map(|row| row.bytes().map(|b| b - b'0').collect())
        .collect();
    let heads: Vec<(usize, usize)> = grid
        .iter()
        .enumerate()
        .flat_map(|(x, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &h)| h == 0)
                .map(move |(y, _)| (x, y))
        })
        .collect();

    println!("Found {} trailheads", heads.len());

    let tasks: Vec<TaskFactory<usize>> = heads
        .iter()
        .map(|&head| {
            let grid = grid.clone();
            task(move |token: CancelToken| async move {
                count_trails(&grid, head, Duration::from_millis(5), &token).await
            })
        })
        .collect();

    let effects = Effects::new()
        .on_start(|pos| println!("  search {} started", pos))
        .on_complete(|pos| println!("  search {} complete", pos));
    let runner = run_parallel_queue(tasks, RunOptions::default().parallel(3).effects(effects))?;
    let result = runner.run().await;

    let score: usize = result.fulfilled.iter().sum();
    println!("\nTotal trailhead score: {}", score);
    for (head, outcome) in heads.iter().zip(&result.results) {
        println!("  {:?} -> {:?}", head, outcome);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
