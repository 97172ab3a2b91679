//! Depth-first postorder traversal, the building block every analysis in
//! this crate is layered on: dominator construction numbers blocks by it,
//! natural-loop and liveness passes walk it in reverse.

use crate::ir::{BlockId, Cfg};

/// Postorder over `cfg`, starting from the entry block and visiting
/// successors in the order they're listed. The entry block is always last:
/// it's the DFS root, so nothing finishes after it.
pub fn postorder(cfg: &Cfg) -> Vec<BlockId> {
    let mut visited = vec![false; cfg.len()];
    let mut order = Vec::with_capacity(cfg.len());
    visit(cfg, cfg.entry(), &mut visited, &mut order);
    order
}

/// Reverse postorder: parents before children along forward edges, modulo
/// back edges. The standard visiting order for forward dataflow problems.
pub fn reverse_postorder(cfg: &Cfg) -> Vec<BlockId> {
    let mut order = postorder(cfg);
    order.reverse();
    order
}

fn visit(cfg: &Cfg, block: BlockId, visited: &mut [bool], order: &mut Vec<BlockId>) {
    if visited[block.index()] {
        return;
    }
    visited[block.index()] = true;
    for &succ in &cfg.block(block).succs {
        visit(cfg, succ, visited, order);
    }
    order.push(block);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Cfg {
        let mut cfg = Cfg::new();
        for _ in 0..4 {
            cfg.add_block();
        }
        cfg.add_edge(BlockId(0), BlockId(1));
        cfg.add_edge(BlockId(0), BlockId(2));
        cfg.add_edge(BlockId(1), BlockId(3));
        cfg.add_edge(BlockId(2), BlockId(3));
        cfg
    }

    #[test]
    fn entry_is_last_in_postorder() {
        let cfg = diamond();
        let po = postorder(&cfg);
        assert_eq!(po.len(), 4);
        assert_eq!(*po.last().unwrap(), BlockId(0));
    }

    #[test]
    fn reverse_postorder_starts_at_entry() {
        let cfg = diamond();
        let rpo = reverse_postorder(&cfg);
        assert_eq!(rpo[0], BlockId(0));
    }

    #[test]
    fn unreachable_blocks_are_skipped() {
        let mut cfg = Cfg::new();
        cfg.add_block();
        cfg.add_block(); // never linked in, unreachable from entry
        let po = postorder(&cfg);
        assert_eq!(po, vec![BlockId(0)]);
    }
}
