//! The SSA data model the engine traverses. Owned by whatever frontend
//! builds it (the analyzer framework, out of scope here); `Program` holds it
//! in flat arenas and every cross-reference is a stable index, never a
//! pointer or a borrow, so a `Program` can be handed to the core by value.

use std::sync::Arc;

use drift_core::types::SmallVec4;

/// Index into `Program::nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Index into `Program::blocks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u32);

/// Index into `Program::functions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionId(pub u32);

/// Source position, carried through to `Diagnostic`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicKind {
    Bool,
    Other,
}

/// A struct field as seen by the configuration matcher and source discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
    /// Raw, unparsed struct tag string (Go-style `key:"v1,v2"` pairs).
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub package: String,
    pub name: String,
    pub underlying: Box<Type>,
}

/// A stripped-down type system: just enough structure to answer the
/// questions the matcher and the propagation policy ask of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Named(NamedType),
    Pointer(Box<Type>),
    Array(Box<Type>),
    Slice(Box<Type>),
    Map(Box<Type>, Box<Type>),
    Chan(Box<Type>),
    Interface,
    /// A function type (as opposed to `Opcode::Function`, a value of that type).
    Signature,
    Struct(Vec<StructField>),
    Basic(BasicKind),
}

impl Type {
    /// Strip exactly one pointer layer, if any.
    pub fn pointee(&self) -> &Type {
        match self {
            Type::Pointer(inner) => inner,
            other => other,
        }
    }

    /// Strip every leading pointer layer.
    pub fn dereference_recursive(&self) -> &Type {
        let mut t = self;
        while let Type::Pointer(inner) = t {
            t = inner;
        }
        t
    }

    pub fn named(&self) -> Option<(&str, &str)> {
        match self.dereference_recursive() {
            Type::Named(n) => Some((n.package.as_str(), n.name.as_str())),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Basic(BasicKind::Bool))
    }

    pub fn is_signature(&self) -> bool {
        matches!(self, Type::Signature)
    }

    /// §4.3.2 point 2: bool and function-signature values are never taintable.
    pub fn is_taintable(&self) -> bool {
        !(self.is_bool() || self.is_signature())
    }

    /// Pointer-like per §4.3.1: pointer, slice, map, channel, interface,
    /// function. A named type (e.g. `type Reader interface{…}`) is unwrapped
    /// to its underlying structural type first, the way the original's
    /// `CanPoint` unwraps `*types.Named` before the structural check — a
    /// named pointer-like type must read as pointer-like too.
    pub fn can_point(&self) -> bool {
        let ty = match self {
            Type::Named(n) => n.underlying.as_ref(),
            other => other,
        };
        matches!(
            ty,
            Type::Pointer(_) | Type::Slice(_) | Type::Map(_, _) | Type::Chan(_) | Type::Interface | Type::Signature
        )
    }

    /// A type can be tainted by a call's return value iff it is itself
    /// pointer-like, or an array/struct transitively holding a pointer-like
    /// field. Cannot recurse infinitely: a struct can only refer to itself
    /// through a pointer.
    pub fn can_be_tainted_by_call(&self) -> bool {
        if self.can_point() {
            return true;
        }
        match self {
            Type::Named(n) => n.underlying.can_be_tainted_by_call(),
            Type::Array(elem) => elem.can_be_tainted_by_call(),
            Type::Struct(fields) => fields.iter().any(|f| f.ty.can_be_tainted_by_call()),
            _ => false,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn struct_fields(&self) -> Option<&[StructField]> {
        match self.dereference_recursive() {
            Type::Named(n) => n.underlying.struct_fields(),
            Type::Struct(fields) => Some(fields),
            _ => None,
        }
    }
}

/// A statically resolved call target: `path.Receiver.Method` or, for a free
/// function, `path.Method` with `receiver: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callee {
    pub package: String,
    pub receiver: Option<String>,
    pub method: String,
}

/// The opcode family of an `SsaNode`, carrying exactly the data the taint
/// policy and source discovery need beyond the generic operand/referrer
/// lists and the node's own `Type` — everything else is a unit variant.
/// Exhaustive match is the compile-time stand-in for the "unknown opcode"
/// runtime check described in the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    Alloc,
    Call {
        /// `None` when the callee could not be statically resolved.
        callee: Option<Callee>,
        receiver_type: Option<Type>,
        /// §4.5 suppression: position of the statement wrapping this call,
        /// one of the three AST-path positions a `levee.DoNotReport`
        /// comment may be attached to.
        stmt_pos: Option<Position>,
        /// §4.5 suppression: position of the identifier or selector naming
        /// the called function.
        callee_pos: Option<Position>,
    },
    FieldAddr {
        field_name: String,
        field_tag: String,
    },
    Index,
    IndexAddr,
    Store,
    MapUpdate,
    Send,
    BinOp,
    ChangeInterface,
    ChangeType,
    Convert,
    Extract,
    MakeChan,
    MakeMap,
    MakeSlice,
    Phi,
    Range,
    Const,
    FreeVar,
    Global,
    Lookup,
    Parameter,
    Go,
    Field,
    MakeInterface,
    Select,
    Slice,
    TypeAssert,
    UnOp,
    Builtin,
    DebugRef,
    Defer,
    Function,
    If,
    Jump,
    MakeClosure,
    Next,
    Panic,
    Return,
    RunDefers,
}

/// A node in the SSA def-use graph. Every cross-reference (`operands`,
/// `referrers`, `block`, `function`) is a stable index into the owning
/// `Program`.
#[derive(Debug, Clone)]
pub struct SsaNode {
    pub id: NodeId,
    pub opcode: Opcode,
    pub ty: Type,
    /// `None` for free-standing values (constants, parameters, globals,
    /// free variables) that do not belong to a block.
    pub block: Option<BlockId>,
    /// Position of this node within its block's instruction list, if any.
    pub index_in_block: Option<usize>,
    pub function: FunctionId,
    pub operands: SmallVec4<NodeId>,
    pub referrers: SmallVec4<NodeId>,
    pub pos: Position,
}

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub id: BlockId,
    pub function: FunctionId,
    pub instrs: Vec<NodeId>,
    pub succs: SmallVec4<BlockId>,
    /// Immediate dominator; `None` only for the entry block.
    pub idom: Option<BlockId>,
    pub index_in_function: usize,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub id: FunctionId,
    pub name: String,
    pub params: Vec<NodeId>,
    pub free_vars: Vec<NodeId>,
    pub blocks: Vec<BlockId>,
    pub entry_block: Option<BlockId>,
    /// Go's `recover`-block equivalent: excluded from source discovery.
    pub recover_block: Option<BlockId>,
    /// Packages imported by this function's containing package, used for
    /// the test-package skip (§B.1 / scenario S6).
    pub package_imports: Vec<String>,
}
