//! Minimal stdin/stdout driver for the plain text wire format:
//!
//! ```text
//! cargo run --example tripod_cli < triangulation.txt
//! ```
//!
//! Reads a triangulation (face count + CCW face list). If `2n-4` faces are
//! given, the first line's face is taken as the outer face; if `2n-5`, the
//! outer face is synthesized as `[0, 1, 2]`. Prints `k = |tripods|-1`
//! followed by 3 legs per tripod `1..=k`, one leg per line.

use std::io::{self, Read};

use clap::Parser;

use tripod::wire::{format_partition, parse_triangulation};
use tripod::{PartitionOptions, TripodPartition};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    worst_case: bool,
    #[arg(long)]
    verify: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let (rs, outer_face) = match parse_triangulation(&input) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let options = PartitionOptions { worst_case: args.worst_case, verify: args.verify };
    match TripodPartition::build(&rs, outer_face, options) {
        Ok(partition) => print!("{}", format_partition(&partition)),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
