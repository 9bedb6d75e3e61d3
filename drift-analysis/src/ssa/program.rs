//! `Program`: the arena owning every node/block/function for one analysis
//! pass, plus the CFG queries the propagation engine needs (dominance,
//! forward reachability).

use drift_core::types::FxHashSet;

use super::types::{BasicBlock, BlockId, Function, FunctionId, NodeId, SsaNode};

#[derive(Debug, Default)]
pub struct Program {
    pub nodes: Vec<SsaNode>,
    pub blocks: Vec<BasicBlock>,
    pub functions: Vec<Function>,
}

impl Program {
    pub fn node(&self, id: NodeId) -> &SsaNode {
        &self.nodes[id.0 as usize]
    }

    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.0 as usize]
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.0 as usize]
    }

    /// §4.3.2 / §4.4: `a` dominates `b` iff `a == b` or walking `b`'s
    /// immediate-dominator chain reaches `a`.
    pub fn dominates(&self, a: BlockId, b: BlockId) -> bool {
        if a == b {
            return true;
        }
        let mut cur = self.block(b).idom;
        while let Some(idom) = cur {
            if idom == a {
                return true;
            }
            cur = self.block(idom).idom;
        }
        false
    }

    /// Forward DFS over block successors: can control flow reach `dest` from
    /// `start`, ignoring dominance? Used as the fallback in §4.3.2 point 3
    /// when `start` does not dominate `dest`.
    pub fn reachable(&self, start: BlockId, dest: BlockId) -> bool {
        if start == dest {
            return true;
        }
        let mut stack = vec![start];
        let mut seen: FxHashSet<BlockId> = FxHashSet::default();
        seen.insert(start);
        while let Some(current) = stack.pop() {
            if current == dest {
                return true;
            }
            for &succ in &self.block(current).succs {
                if seen.insert(succ) {
                    stack.push(succ);
                }
            }
        }
        false
    }

    /// §4.3.2 point 3: can control flow reach `dest` from `start`, via
    /// dominance or forward reachability.
    pub fn can_reach(&self, start: BlockId, dest: BlockId) -> bool {
        self.dominates(start, dest) || self.reachable(start, dest)
    }

    /// Index of `node` within its parent block's instruction list. `None`
    /// signals an SSA inconsistency (§7): an instruction absent from its own
    /// block's list, which can only indicate a bug in the frontend.
    pub fn index_in_block(&self, id: NodeId) -> Option<usize> {
        let node = self.node(id);
        let block = self.block(node.block?);
        block.instrs.iter().position(|&i| i == id)
    }
}
