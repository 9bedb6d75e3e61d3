//! Suppression (§4.5): elides a diagnostic at a source position carrying an
//! opt-out comment (e.g. `levee.DoNotReport`).
//!
//! Attaching a freestanding comment to the AST node it precedes is a job
//! for whatever frontend walks the original source text — out of scope
//! here the same way SSA construction is (§6). This layer consumes the
//! result of that pre-pass — the set of positions a marker comment was
//! found attached to — and answers `is_suppressed` against the three
//! AST-path positions §4.5 names for a call-shaped sink: the call
//! expression itself, its immediate statement wrapper, and the identifier
//! or selector naming the called function.

use drift_core::types::FxHashSet;

use crate::ssa::{NodeId, Opcode, Position, Program};

/// Precomputed marker-comment positions, built once per analysis run
/// alongside `Configuration` and handed to every `analyze_function` call.
#[derive(Debug, Clone, Default)]
pub struct SuppressionMap {
    positions: FxHashSet<Position>,
}

impl SuppressionMap {
    pub fn new(positions: impl IntoIterator<Item = Position>) -> Self {
        SuppressionMap {
            positions: positions.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// §4.5: true iff `sink`'s own position, or — for a `Call` — its
    /// statement wrapper or callee identifier position, carries a marker.
    pub fn is_suppressed(&self, program: &Program, sink: NodeId) -> bool {
        let node = program.node(sink);
        if self.positions.contains(&node.pos) {
            return true;
        }
        if let Opcode::Call {
            stmt_pos, callee_pos, ..
        } = &node.opcode
        {
            if stmt_pos.as_ref().is_some_and(|p| self.positions.contains(p)) {
                return true;
            }
            if callee_pos.as_ref().is_some_and(|p| self.positions.contains(p)) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssa::{BasicBlock, Callee, Function, FunctionId, NamedType, SsaNode, Type};
    use std::sync::Arc;

    fn pos(line: u32) -> Position {
        Position {
            file: Arc::from("f.go"),
            line,
            column: 1,
        }
    }

    fn sink_program(stmt_pos: Option<Position>, callee_pos: Option<Position>) -> (Program, NodeId) {
        let mut program = Program::default();
        let function_id = FunctionId(0);
        let call = SsaNode {
            id: NodeId(0),
            opcode: Opcode::Call {
                callee: Some(Callee {
                    package: "core".to_string(),
                    receiver: None,
                    method: "Sink".to_string(),
                }),
                receiver_type: None,
                stmt_pos,
                callee_pos,
            },
            ty: Type::Named(NamedType {
                package: "".to_string(),
                name: "".to_string(),
                underlying: Box::new(Type::Interface),
            }),
            block: Some(crate::ssa::BlockId(0)),
            index_in_block: Some(0),
            function: function_id,
            operands: Default::default(),
            referrers: Default::default(),
            pos: pos(10),
        };
        program.nodes.push(call);
        program.blocks.push(BasicBlock {
            id: crate::ssa::BlockId(0),
            function: function_id,
            instrs: vec![NodeId(0)],
            succs: Default::default(),
            idom: None,
            index_in_function: 0,
        });
        program.functions.push(Function {
            id: function_id,
            name: "f".to_string(),
            params: vec![],
            free_vars: vec![],
            blocks: vec![crate::ssa::BlockId(0)],
            entry_block: Some(crate::ssa::BlockId(0)),
            recover_block: None,
            package_imports: vec![],
        });
        (program, NodeId(0))
    }

    #[test]
    fn suppressed_at_call_position_itself() {
        let (program, sink) = sink_program(None, None);
        let map = SuppressionMap::new([pos(10)]);
        assert!(map.is_suppressed(&program, sink));
    }

    #[test]
    fn suppressed_at_statement_wrapper() {
        let (program, sink) = sink_program(Some(pos(9)), None);
        let map = SuppressionMap::new([pos(9)]);
        assert!(map.is_suppressed(&program, sink));
    }

    #[test]
    fn suppressed_at_callee_identifier() {
        let (program, sink) = sink_program(None, Some(pos(10)));
        let map = SuppressionMap::new([pos(10)]);
        assert!(map.is_suppressed(&program, sink));
    }

    #[test]
    fn unmarked_position_is_not_suppressed() {
        let (program, sink) = sink_program(None, None);
        let map = SuppressionMap::new([pos(999)]);
        assert!(!map.is_suppressed(&program, sink));
    }

    /// §8 property 4: idempotence — adding/removing the marker flips exactly
    /// this one diagnostic's suppression and nothing else.
    #[test]
    fn suppression_idempotence() {
        let (program, sink) = sink_program(None, None);
        let mut map = SuppressionMap::new([]);
        assert!(!map.is_suppressed(&program, sink));
        map = SuppressionMap::new([pos(10)]);
        assert!(map.is_suppressed(&program, sink));
        map = SuppressionMap::new([]);
        assert!(!map.is_suppressed(&program, sink));
    }
}
