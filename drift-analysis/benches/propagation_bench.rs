use criterion::{criterion_group, criterion_main, Criterion};

use drift_analysis::config::{Configuration, FuncMatcher, Rule, TypeMatcher};
use drift_analysis::propagation::propagate;
use drift_analysis::source::{Seed, SeedKind};
use drift_analysis::ssa::{
    BasicBlock, BasicKind, BlockId, Function, FunctionId, NamedType, NodeId, Opcode, Position, Program, Type,
};

fn source_type() -> Type {
    Type::Named(NamedType {
        package: "core".to_string(),
        name: "Source".to_string(),
        underlying: Box::new(Type::Struct(vec![])),
    })
}

fn pos(line: u32) -> Position {
    Position {
        file: std::sync::Arc::from("bench.go"),
        line,
        column: 1,
    }
}

/// A straight-line def-use chain of `n` `UnaryOp` instructions in one
/// block, each reading the previous — the worst case for the propagation
/// engine's per-node operand/referrer fan-out, without triggering any of
/// the control-flow pruning branches.
fn build_chain(n: usize) -> (Program, Seed) {
    let mut program = Program::default();
    let function_id = FunctionId(0);
    let block_id = BlockId(0);

    let param = NodeId(0);
    program.nodes.push(drift_analysis::ssa::SsaNode {
        id: param,
        opcode: Opcode::Parameter,
        ty: source_type(),
        block: None,
        index_in_block: None,
        function: function_id,
        operands: Default::default(),
        referrers: [NodeId(1)].into_iter().collect(),
        pos: pos(1),
    });

    let mut instrs = Vec::with_capacity(n);
    for i in 0..n {
        let id = NodeId((i + 1) as u32);
        let referrers = if i + 2 <= n {
            vec![NodeId((i + 2) as u32)]
        } else {
            vec![]
        };
        program.nodes.push(drift_analysis::ssa::SsaNode {
            id,
            opcode: Opcode::UnOp,
            ty: Type::Basic(BasicKind::Other),
            block: Some(block_id),
            index_in_block: Some(i),
            function: function_id,
            operands: [NodeId(i as u32)].into_iter().collect(),
            referrers: referrers.into_iter().collect(),
            pos: pos((i + 2) as u32),
        });
        instrs.push(id);
    }

    program.blocks.push(BasicBlock {
        id: block_id,
        function: function_id,
        instrs,
        succs: Default::default(),
        idom: None,
        index_in_function: 0,
    });
    program.functions.push(Function {
        id: function_id,
        name: "chain".to_string(),
        params: vec![param],
        free_vars: vec![],
        blocks: vec![block_id],
        entry_block: Some(block_id),
        recover_block: None,
        package_imports: vec![],
    });

    (
        program,
        Seed {
            node: param,
            kind: SeedKind::Parameter,
        },
    )
}

fn config() -> Configuration {
    Configuration {
        sources: vec![TypeMatcher {
            package: Rule::Literal("core".to_string()),
            ty: Rule::Literal("Source".to_string()),
            field: Rule::Any,
            exclude: vec![],
        }],
        sinks: vec![FuncMatcher {
            package: Rule::Literal("core".to_string()),
            receiver: Rule::Any,
            method: Rule::Literal("Sink".to_string()),
            exclude: vec![],
        }],
        ..Configuration::default()
    }
}

fn bench_propagation_chain_1000(c: &mut Criterion) {
    let (program, seed) = build_chain(1000);
    let config = config();

    c.bench_function("propagate_chain_1000", |b| {
        b.iter(|| {
            propagate(&program, &config, seed);
        });
    });
}

criterion_group!(benches, bench_propagation_chain_1000);
criterion_main!(benches);
