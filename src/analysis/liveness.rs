//! LiveOut: a backward dataflow fixed point over `UEVar` (upward-exposed
//! uses) and `VarKill` (locally redefined registers) per block.
//!
//! `LiveOut[b] = union over successors s of (UEVar[s] | (LiveOut[s] & !VarKill[s]))`

use tracing::debug;

use crate::bitset::Bitset;
use crate::ir::{BasicBlock, Cfg, Instruction, Value};

/// Per-block upward-exposed uses and locally-killed registers.
struct LiveInitialInfo {
    ue_var: Vec<Bitset>,
    var_kill: Vec<Bitset>,
}

fn add_if_not_in_var_kill(v: Value, ue_var: &mut Bitset, var_kill: &Bitset) {
    if let Some(reg) = v.as_register() {
        if !var_kill.contains(reg as usize) {
            ue_var.add(reg as usize);
        }
    }
}

fn gather_info_for_block(bb: &BasicBlock, ue_var: &mut Bitset, var_kill: &mut Bitset) {
    for inst in &bb.insts {
        match inst {
            Instruction::Def { reg, op } => {
                add_if_not_in_var_kill(op.lhs, ue_var, var_kill);
                if op.is_add() {
                    add_if_not_in_var_kill(op.rhs, ue_var, var_kill);
                }
                var_kill.add(*reg as usize);
            }
            Instruction::Print { op } => {
                add_if_not_in_var_kill(op.lhs, ue_var, var_kill);
                if op.is_add() {
                    add_if_not_in_var_kill(op.rhs, ue_var, var_kill);
                }
            }
            Instruction::BrCond { cond, .. } => add_if_not_in_var_kill(*cond, ue_var, var_kill),
            Instruction::BrUncond { .. } => {}
        }
    }
}

fn gather_initial_info(cfg: &Cfg, num_registers: usize) -> LiveInitialInfo {
    let mut ue_var: Vec<Bitset> = (0..cfg.len()).map(|_| Bitset::new(num_registers)).collect();
    let mut var_kill: Vec<Bitset> = (0..cfg.len()).map(|_| Bitset::new(num_registers)).collect();
    for (i, bb) in cfg.blocks().iter().enumerate() {
        gather_info_for_block(bb, &mut ue_var[i], &mut var_kill[i]);
    }
    LiveInitialInfo { ue_var, var_kill }
}

/// `LiveOut[b]` for every block, plus (if requested) the sequence of
/// per-iteration snapshots the `print_liveout` driver prints.
pub struct LiveOut {
    sets: Vec<Bitset>,
}

impl LiveOut {
    pub fn of(&self, bb: crate::ir::BlockId) -> &Bitset {
        &self.sets[bb.index()]
    }
}

fn solve_equation_for_block(
    live_out: &[Bitset],
    init: &LiveInitialInfo,
    succs: &[crate::ir::BlockId],
    num_registers: usize,
) -> Bitset {
    let mut contribution = Bitset::new(num_registers);
    for &succ in succs {
        let mut temp = Bitset::new(num_registers);
        temp.copy_from(&init.var_kill[succ.index()]);
        temp.complement();
        temp.intersect_with(&live_out[succ.index()]);
        temp.union_with(&init.ue_var[succ.index()]);
        contribution.union_with(&temp);
    }
    contribution
}

/// Run the LiveOut fixed point to convergence. If `on_iteration` is
/// provided, it is called with the 1-based iteration number and the
/// current `LiveOut` sets after each pass (used by `print_liveout` to show
/// every intermediate iteration, per spec.md §6).
pub fn compute(cfg: &Cfg, max_register: u32, mut on_iteration: Option<&mut dyn FnMut(u32, &[Bitset])>) -> LiveOut {
    let num_registers = max_register as usize + 1;
    let init = gather_initial_info(cfg, num_registers);

    let mut live_out: Vec<Bitset> = (0..cfg.len()).map(|_| Bitset::new(num_registers)).collect();

    let mut changed = true;
    let mut iteration = 0u32;
    while changed {
        changed = false;
        iteration += 1;
        for (i, bb) in cfg.blocks().iter().enumerate() {
            let before = live_out[i].clone();
            let contribution = solve_equation_for_block(&live_out, &init, &bb.succs, num_registers);
            live_out[i].union_with(&contribution);
            if live_out[i] != before {
                changed = true;
            }
        }
        debug!(iteration, "LiveOut fixed-point pass");
        if let Some(cb) = on_iteration.as_deref_mut() {
            cb(iteration, &live_out);
        }
    }

    LiveOut { sets: live_out }
}
