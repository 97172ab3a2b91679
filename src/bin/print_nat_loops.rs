use clap::Parser;

use tac_flow_analysis::analysis::dominators::{chk, lengauer_tarjan};
use tac_flow_analysis::analysis::loops;
use tac_flow_analysis::cli::Args;
use tac_flow_analysis::common::config::{AnalysisConfig, DominatorAlgorithm};
use tac_flow_analysis::ir::parser;

fn run(args: &Args) -> anyhow::Result<()> {
    let cfg = parser::parse_file(&args.file)?;
    let config = AnalysisConfig::load_beside(&args.file)?;

    let dtree = match config.dominators.algorithm {
        DominatorAlgorithm::Chk => chk::build(&cfg),
        DominatorAlgorithm::LengauerTarjan => lengauer_tarjan::build(&cfg),
    };

    for l in loops::find_loops(&cfg, &dtree) {
        println!("Loop: %{} <- %{}", l.header.index(), l.latch.index());
        let body: Vec<String> = l.body.iter().map(|b| b.index().to_string()).collect();
        println!("  {}", body.join(" "));
    }

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
