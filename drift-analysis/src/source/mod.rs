//! Source discovery (§4.2): finds the seed nodes a `Function` feeds into the
//! propagation engine. Performs no graph traversal of its own — only
//! inspects the type and opcode of each already-enumerated node.

use tracing::debug;

use crate::config::Configuration;
use crate::ssa::{Function, NodeId, Opcode, Program};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKind {
    Parameter,
    FreeVariable,
    Allocation,
    FieldAddress,
}

#[derive(Debug, Clone, Copy)]
pub struct Seed {
    pub node: NodeId,
    pub kind: SeedKind,
}

/// Does `ty`, after stripping every leading pointer layer, name a
/// configured source type?
fn is_source_typed(ty: &crate::ssa::Type, config: &Configuration) -> bool {
    match ty.dereference_recursive().named() {
        Some((path, name)) => config.is_source_type(path, name),
        None => false,
    }
}

/// §4.2: enumerate every Seed in `function`, in discovery order (parameters,
/// free variables, then blocks in CFG order) — the order §5 promises is
/// deterministic for diagnostic ordering downstream.
pub fn discover_seeds(program: &Program, function: &Function, config: &Configuration) -> Vec<Seed> {
    let mut seeds = Vec::new();

    for &param in &function.params {
        if is_source_typed(&program.node(param).ty, config) {
            seeds.push(Seed {
                node: param,
                kind: SeedKind::Parameter,
            });
        }
    }

    for &free_var in &function.free_vars {
        if is_source_typed(&program.node(free_var).ty, config) {
            seeds.push(Seed {
                node: free_var,
                kind: SeedKind::FreeVariable,
            });
        }
    }

    for &block_id in &function.blocks {
        if Some(block_id) == function.recover_block {
            continue;
        }
        let block = program.block(block_id);
        for &instr in &block.instrs {
            let node = program.node(instr);
            match &node.opcode {
                Opcode::Alloc => {
                    if is_source_typed(&node.ty, config) {
                        seeds.push(Seed {
                            node: instr,
                            kind: SeedKind::Allocation,
                        });
                    }
                }
                Opcode::FieldAddr { field_name, field_tag } => {
                    if field_addr_is_source(program, instr, field_name, field_tag, config) {
                        seeds.push(Seed {
                            node: instr,
                            kind: SeedKind::FieldAddress,
                        });
                    }
                }
                // Field (by-value) reads are not seeded: §9 open question,
                // decided against seeding to stay faithful to the documented
                // gap rather than silently widening source coverage.
                _ => {}
            }
        }
    }

    debug!(function = %function.name, seed_count = seeds.len(), "source discovery complete");
    seeds
}

/// Shared by source discovery (is this FieldAddr a seed?) and the
/// propagation engine (§4.3.1: does this FieldAddr, reached mid-traversal,
/// match a source-field rule, or must the whole node be pruned?). Both
/// questions are "does this field address yield a source-typed pointer,
/// directly or via a configured source-field/field-tag rule".
pub(crate) fn field_addr_is_source(
    program: &Program,
    instr: NodeId,
    field_name: &str,
    field_tag: &str,
    config: &Configuration,
) -> bool {
    let node = program.node(instr);

    // The field's own type (FieldAddr.ty is a pointer to the field type).
    if is_source_typed(&node.ty, config) {
        return true;
    }

    if config.is_tagged_source_field(field_tag) {
        return true;
    }

    // The surrounding struct's type, to check a configured source-field rule.
    let Some(&base_operand) = node.operands.first() else {
        return false;
    };
    let base_ty = program.node(base_operand).ty.dereference_recursive();
    if let Some((path, type_name)) = base_ty.named() {
        if config.is_source_field(path, type_name, field_name) {
            return true;
        }
    }

    false
}
