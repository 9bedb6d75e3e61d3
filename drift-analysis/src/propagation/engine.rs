//! The propagation engine (§4.3) — the heart of the analyzer. A constrained
//! depth-first traversal of the SSA def-use graph from one seed, respecting
//! the per-opcode taint policy (§4.3.1) and intra-procedural control-flow
//! pruning (§4.3.2).

use drift_core::types::{FxHashMap, FxHashSet};
use tracing::warn;

use crate::config::Configuration;
use crate::source::Seed;
use crate::ssa::{BlockId, NodeId, Opcode, Program};

/// A sanitizer call encountered while propagating taint from one seed.
#[derive(Debug, Clone, Copy)]
pub struct SanitizerRecord {
    pub call: NodeId,
}

/// The result of propagating taint from one seed: the set of nodes the
/// taint can reach, in what order they were first visited, and which
/// sanitizer calls it passed through along the way. Immutable once built.
#[derive(Debug)]
pub struct Propagation {
    pub seed: Seed,
    marked: FxHashSet<NodeId>,
    visit_log: Vec<NodeId>,
    pub sanitizers: Vec<SanitizerRecord>,
}

impl Propagation {
    /// §4.4: is `n` part of the declaration-use graph reachable from this
    /// propagation's seed?
    pub fn has_path_to(&self, n: NodeId) -> bool {
        self.marked.contains(&n)
    }

    pub fn visit_log(&self) -> &[NodeId] {
        &self.visit_log
    }
}

/// Build the Propagation record for `seed` by depth-first traversal.
///
/// Mirrors the original's `Dfs`, which calls `visitReferrers` on the root
/// once before entering `dfs` proper. This pre-call matters beyond the
/// usual referrer traversal: `visit()`'s `Alloc` arm only follows referrers
/// when the allocated type is an array (§4.3.1 — a non-array `Alloc` is
/// either itself a seed or irrelevant), so without it a non-array
/// `Allocation` seed would be marked and then dead-end immediately, never
/// reaching any of its uses.
pub fn propagate(program: &Program, config: &Configuration, seed: Seed) -> Propagation {
    let mut walker = Walker {
        program,
        config,
        marked: drift_core::types::FxHashSet::default(),
        visit_log: Vec::new(),
        sanitizers: Vec::new(),
    };
    walker.visit_referrers(seed.node, &FxHashMap::default(), None);
    walker.dfs(seed.node, &FxHashMap::default(), None, false);
    Propagation {
        seed,
        marked: walker.marked,
        visit_log: walker.visit_log,
        sanitizers: walker.sanitizers,
    }
}

struct Walker<'a> {
    program: &'a Program,
    config: &'a Configuration,
    marked: FxHashSet<NodeId>,
    visit_log: Vec<NodeId>,
    sanitizers: Vec<SanitizerRecord>,
}

impl<'a> Walker<'a> {
    fn dfs(&mut self, n: NodeId, max_instr_reached: &FxHashMap<BlockId, usize>, last_block_visited: Option<BlockId>, is_referrer: bool) {
        if self.should_not_visit(n, max_instr_reached, last_block_visited, is_referrer) {
            return;
        }
        self.visit_log.push(n);
        self.marked.insert(n);

        let mut mir = max_instr_reached.clone();
        let mut last_block = last_block_visited;

        let node = self.program.node(n);
        if let Some(block) = node.block {
            if let Some(index) = node.index_in_block {
                let entry = mir.entry(block).or_insert(0);
                if *entry < index {
                    *entry = index;
                }
                last_block = Some(block);
            }
        }

        self.visit(n, &mir, last_block);
    }

    /// §4.3.2: the four pruning checks, in order.
    fn should_not_visit(
        &self,
        n: NodeId,
        max_instr_reached: &FxHashMap<BlockId, usize>,
        last_block_visited: Option<BlockId>,
        is_referrer: bool,
    ) -> bool {
        if self.marked.contains(&n) {
            return true;
        }

        let node = self.program.node(n);
        if !node.ty.is_taintable() {
            return true;
        }

        let Some(block) = node.block else {
            return false;
        };
        let Some(index) = node.index_in_block else {
            warn!(node = n.0, "SSA inconsistency: instruction missing from its block's instruction list");
            return true;
        };

        if let Some(last) = last_block_visited {
            if block != last && !self.program.can_reach(last, block) {
                return true;
            }
        }

        if matches!(node.opcode, Opcode::Call { .. }) && is_referrer {
            let max = max_instr_reached.get(&block).copied().unwrap_or(0);
            if index < max {
                return true;
            }
        }

        false
    }

    /// §4.3.1: the per-opcode taint policy table, as an exhaustive match —
    /// the compile-time stand-in for the runtime "unknown opcode" check.
    fn visit(&mut self, n: NodeId, mir: &FxHashMap<BlockId, usize>, last_block: Option<BlockId>) {
        let node = self.program.node(n);
        match &node.opcode {
            Opcode::Alloc => {
                if node.ty.pointee().is_array() {
                    self.visit_referrers(n, mir, last_block);
                }
            }

            Opcode::Call {
                callee, receiver_type, ..
            } => {
                if let Some(callee) = callee {
                    let receiver = callee.receiver.as_deref().unwrap_or("");
                    if self.config.is_sanitizer(&callee.package, receiver, &callee.method) {
                        self.sanitizers.push(SanitizerRecord { call: n });
                        return;
                    }
                }

                if let Some(recv_ty) = receiver_type {
                    if let Some((path, name)) = recv_ty.named() {
                        if self.config.is_source_type(path, name) {
                            return;
                        }
                    }
                }

                self.visit_referrers(n, mir, last_block);
                for operand in node.operands.clone() {
                    if self.program.node(operand).ty.can_be_tainted_by_call() {
                        self.dfs(operand, mir, last_block, false);
                    }
                }
            }

            // §4.3.1: "otherwise prune the whole node" — an innocuous field
            // access must not propagate, so an unmatched field skips both
            // referrers and operands rather than falling through to the
            // general value-and-instruction case.
            Opcode::FieldAddr { field_name, field_tag } => {
                if crate::source::field_addr_is_source(self.program, n, field_name, field_tag, self.config) {
                    self.visit_referrers(n, mir, last_block);
                    self.visit_operands(n, mir, last_block);
                }
            }

            Opcode::Index | Opcode::IndexAddr => {
                self.visit_referrers(n, mir, last_block);
                if let Some(&aggregate) = node.operands.first() {
                    self.dfs(aggregate, mir, last_block, false);
                }
            }

            Opcode::Store => {
                if let Some(&addr) = node.operands.first() {
                    self.dfs(addr, mir, last_block, false);
                }
            }

            Opcode::MapUpdate => {
                if let Some(&map) = node.operands.first() {
                    self.dfs(map, mir, last_block, false);
                }
            }

            Opcode::Send => {
                if let Some(&chan) = node.operands.first() {
                    self.dfs(chan, mir, last_block, false);
                }
            }

            Opcode::BinOp
            | Opcode::ChangeInterface
            | Opcode::ChangeType
            | Opcode::Convert
            | Opcode::Extract
            | Opcode::MakeChan
            | Opcode::MakeMap
            | Opcode::MakeSlice
            | Opcode::Phi
            | Opcode::Range => {
                self.visit_referrers(n, mir, last_block);
            }

            Opcode::Const | Opcode::FreeVar | Opcode::Global | Opcode::Lookup | Opcode::Parameter => {
                self.visit_referrers(n, mir, last_block);
            }

            Opcode::Go => {
                self.visit_operands(n, mir, last_block);
            }

            Opcode::Field
            | Opcode::MakeInterface
            | Opcode::Select
            | Opcode::Slice
            | Opcode::TypeAssert
            | Opcode::UnOp => {
                self.visit_referrers(n, mir, last_block);
                self.visit_operands(n, mir, last_block);
            }

            Opcode::Builtin
            | Opcode::DebugRef
            | Opcode::Defer
            | Opcode::Function
            | Opcode::If
            | Opcode::Jump
            | Opcode::MakeClosure
            | Opcode::Next
            | Opcode::Panic
            | Opcode::Return
            | Opcode::RunDefers => {}
        }
    }

    fn visit_referrers(&mut self, n: NodeId, mir: &FxHashMap<BlockId, usize>, last_block: Option<BlockId>) {
        for r in self.program.node(n).referrers.clone() {
            self.dfs(r, mir, last_block, true);
        }
    }

    fn visit_operands(&mut self, n: NodeId, mir: &FxHashMap<BlockId, usize>, last_block: Option<BlockId>) {
        for o in self.program.node(n).operands.clone() {
            self.dfs(o, mir, last_block, false);
        }
    }
}
