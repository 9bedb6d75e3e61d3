//! The external SSA data model: opcodes, basic blocks, functions, and the
//! `Program` arena that owns them. Read-only from the core's perspective —
//! built by whatever frontend schedules analysis passes.

pub mod program;
pub mod types;

pub use program::Program;
pub use types::{
    BasicBlock, BasicKind, BlockId, Callee, Function, FunctionId, NamedType, NodeId, Opcode,
    Position, SsaNode, StructField, Type,
};
