use clap::Parser;

use tac_flow_analysis::analysis::dom_frontiers;
use tac_flow_analysis::analysis::dominators::{chk, lengauer_tarjan};
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

    for b in cfg.block_ids() {
        let chain: Vec<String> = dtree.dominator_chain(b).iter().map(|id| id.index().to_string()).collect();
        println!("{}: {}", b.index(), chain.join(" "));
    }

    let df = dom_frontiers::compute(&cfg, &dtree);
    for b in cfg.block_ids() {
        println!("{}: {}", b.index(), df.frontier_of(b));
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
