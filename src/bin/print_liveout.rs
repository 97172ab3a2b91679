use clap::Parser;

use tac_flow_analysis::analysis::liveness;
use tac_flow_analysis::cli::Args;
use tac_flow_analysis::ir::parser;

fn run(args: &Args) -> anyhow::Result<()> {
    let cfg = parser::parse_file(&args.file)?;

    let mut on_iteration = |iteration: u32, live_out: &[tac_flow_analysis::bitset::Bitset]| {
        println!("After iteration {iteration}");
        for (i, set) in live_out.iter().enumerate() {
            println!("BB{i}: {set}");
        }
    };

    let _live_out = liveness::compute(&cfg, cfg.max_register(), Some(&mut on_iteration));

    Ok(())
}

fn main() {
    let args = Args::parse();
    args.init_logging();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
