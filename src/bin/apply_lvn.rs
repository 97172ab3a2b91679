use clap::Parser;

use tac_flow_analysis::analysis::lvn;
use tac_flow_analysis::cli::Args;
use tac_flow_analysis::common::config::AnalysisConfig;
use tac_flow_analysis::ir::parser;

fn run(args: &Args) -> anyhow::Result<()> {
    let mut cfg = parser::parse_file(&args.file)?;
    let config = AnalysisConfig::load_beside(&args.file)?;

    if config.lvn.enabled {
        lvn::apply_to_cfg(&mut cfg);
    }

    for b in cfg.block_ids() {
        println!("{b}:");
        for inst in &cfg.block(b).insts {
            println!("  {inst}");
        }
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
