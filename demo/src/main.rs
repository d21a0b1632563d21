//! Print a route across a tile map.
//!
//! Run: cargo run --bin pathdemo -- [MAP_FILE] [--diagonal] [--max-expansions N] [--random SEED]
//!
//! Set `RUST_LOG=debug` to see search diagnostics.

use tactile_demo::{DemoArgs, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = DemoArgs::parse(std::env::args().skip(1))?;
    let report = run(&args)?;
    println!("{report}");
    Ok(())
}
