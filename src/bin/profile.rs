use std::time::Instant;

use gridpath::{
    generators::{GenerationParams, generate_maze},
    maze::Maze,
    solvers::{Solver, solve_maze},
};

fn main() -> gridpath::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);

    let side = u8::MAX as u16;
    let params = GenerationParams {
        blocks: side as usize * side as usize / 3,
        ensure_path: true,
        max_retries: 10,
    };

    for solver in [Solver::Backtracking, Solver::AStar] {
        let started = Instant::now();
        let mut found = 0;
        for i in 0..num_iters {
            let mut maze = Maze::new(side, side, None);
            generate_maze(&mut maze, params, Some(i as u64));
            if solve_maze(&maze, solver)?.is_some() {
                found += 1;
            }
        }
        println!(
            "{solver}: {num_iters} runs on {side}x{side} in {:?} ({found} paths found)",
            started.elapsed()
        );
    }
    Ok(())
}
