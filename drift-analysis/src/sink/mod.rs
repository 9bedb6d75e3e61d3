//! Sink identification and the report driver (§4.4): walks every
//! instruction of a function, finds sink calls (and, optionally, runtime
//! aborts), and for each emits at most one diagnostic — the first seed
//! whose taint reaches it, unless a dominating sanitizer or a suppression
//! comment applies.

use tracing::{debug, info};

use crate::config::Configuration;
use crate::propagation::{propagate, Propagation};
use crate::source::discover_seeds;
use crate::ssa::{Function, NodeId, Opcode, Position, Program};
use crate::suppression::SuppressionMap;

/// One reported source-to-sink flow (§3 Diagnostic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source_pos: Position,
    pub sink_pos: Position,
    pub message: String,
}

impl Diagnostic {
    fn new(source_pos: Position, sink_pos: Position, report_message: Option<&str>) -> Diagnostic {
        let mut message = format!("a source has reached a sink, source: {source_pos}");
        if let Some(extra) = report_message {
            message.push_str(", ");
            message.push_str(extra);
        }
        Diagnostic {
            source_pos,
            sink_pos,
            message,
        }
    }
}

/// §4.4 point 2: a Call whose statically known callee matches a sink rule,
/// or a runtime abort when `allow_panic_on_tainted_values` is false.
fn classify_sink(config: &Configuration, node: &crate::ssa::SsaNode) -> bool {
    match &node.opcode {
        Opcode::Call { callee: Some(callee), .. } => {
            let receiver = callee.receiver.as_deref().unwrap_or("");
            config.is_sink(&callee.package, receiver, &callee.method)
        }
        Opcode::Call { callee: None, .. } => false,
        Opcode::Panic => !config.allow_panic_on_tainted_values,
        _ => false,
    }
}

/// §4.4 sanitizer dominance: does `sanitizer_call`'s block dominate
/// `sink`'s block (or precede it within the same block)?
fn dominates_sink(program: &Program, sanitizer_call: NodeId, sink: NodeId) -> bool {
    let call_node = program.node(sanitizer_call);
    let sink_node = program.node(sink);
    let (Some(call_block), Some(sink_block)) = (call_node.block, sink_node.block) else {
        return false;
    };
    if call_block == sink_block {
        match (call_node.index_in_block, sink_node.index_in_block) {
            (Some(ci), Some(si)) => ci < si,
            _ => false,
        }
    } else {
        program.dominates(call_block, sink_block)
    }
}

/// §4.4 "Sanitizer dominance": does some sanitizer call this `propagation`
/// collected dominate `sink` on every path, i.e. is `sink` laundered for
/// this source?
fn is_sanitized_at(program: &Program, propagation: &Propagation, sink: NodeId) -> bool {
    propagation
        .sanitizers
        .iter()
        .any(|record| dominates_sink(program, record.call, sink))
}

/// §4.4: build one `Propagation` per seed discovered in `function`, then
/// scan every instruction for sinks. Per sink, the loop over
/// `(seed, propagation)` pairs breaks after the first reporting source —
/// at most one diagnostic per sink per analysis pass.
pub fn analyze_function(
    program: &Program,
    function: &Function,
    config: &Configuration,
    suppression: &SuppressionMap,
) -> Vec<Diagnostic> {
    let seeds = discover_seeds(program, function, config);
    let propagations: Vec<Propagation> = seeds.into_iter().map(|seed| propagate(program, config, seed)).collect();

    let mut diagnostics = Vec::new();
    for &block_id in &function.blocks {
        for &instr in &program.block(block_id).instrs {
            if !classify_sink(config, program.node(instr)) {
                continue;
            }
            if suppression.is_suppressed(program, instr) {
                debug!(node = instr.0, "sink suppressed by opt-out comment");
                continue;
            }
            for propagation in &propagations {
                if !propagation.has_path_to(instr) {
                    continue;
                }
                if is_sanitized_at(program, propagation, instr) {
                    continue;
                }
                let source_pos = program.node(propagation.seed.node).pos.clone();
                let sink_pos = program.node(instr).pos.clone();
                diagnostics.push(Diagnostic::new(source_pos, sink_pos, config.report_message.as_deref()));
                break;
            }
        }
    }

    info!(
        function = %function.name,
        diagnostic_count = diagnostics.len(),
        "analyzed function for tainted sinks"
    );
    diagnostics
}

/// Analyze every function in `program`, skipping test packages (§B.1 /
/// scenario S6), and returning diagnostics in a deterministic order (§8
/// property 1): sorted by sink position then source position, both of
/// which are themselves totally ordered (file, line, column).
pub fn analyze_package(program: &Program, config: &Configuration, suppression: &SuppressionMap) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for function in &program.functions {
        let imports: Vec<&str> = function.package_imports.iter().map(String::as_str).collect();
        if config.is_test_package(&imports) {
            debug!(function = %function.name, "skipping test package");
            continue;
        }
        diagnostics.extend(analyze_function(program, function, config, suppression));
    }
    diagnostics.sort_by(|a, b| (&a.sink_pos, &a.source_pos).cmp(&(&b.sink_pos, &b.source_pos)));
    diagnostics
}
