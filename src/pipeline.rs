//! Stage driver: ties the code-level and node-level transformer stages, the parser, and the
//! generator into one obfuscation call. This is the one place that knows the full stage order;
//! every other module only knows its own stage(s).

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use crate::ast::{Node, NodeIdAllocator, NodeKind};
use crate::config::Options;
use crate::error::{ObfuscationError, Result};
use crate::generator::{Generator, GeneratorConfig};
use crate::logger::{self, Message};
use crate::parser;
use crate::random::RandomGenerator;
use crate::transformer::catalog::{self, Collaborators};
use crate::transformer::scheduler::{self, Candidate};
use crate::transformer::{
    CodeTransformationStage, CodeTransformer, NodeTransformationStage, Transformer, TransformerName,
};
use crate::visitor;

/// Crate version logged at the start of every call.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result of one obfuscation call. `map` is `""` when source maps are disabled.
#[derive(Debug, Clone)]
pub struct ObfuscationResult {
    pub code: String,
    pub map: String,
}

/// Runs the full pipeline once: code-level preparing stage, parse, node stages, generate,
/// code-level finalizing stage.
pub fn obfuscate(source: &str, options: &Options) -> Result<ObfuscationResult> {
    logger::info(Message::Version(VERSION));
    logger::info(Message::ObfuscationStarted { input_file_name: options.input_file_name.clone() });

    let rng = RandomGenerator::new(options.seed);
    logger::info(Message::RandomGeneratorSeed(rng.seed()));

    let alloc = NodeIdAllocator::new();
    let collaborators = Collaborators::new(rng, alloc);

    let mut code_catalog = catalog::code_catalog();
    let mut node_catalog = catalog::node_catalog(&collaborators);

    let source = run_code_stage(source.to_string(), CodeTransformationStage::PreparingTransformers, &mut code_catalog)?;

    let mut root = parser::parse(&source, &collaborators.alloc)?;

    run_node_stage(&mut root, NodeTransformationStage::Initializing, &mut node_catalog)?;
    catalog::rebuild_parentification(&mut root, &collaborators.parents);

    if is_empty_program(&root) {
        logger::warn(Message::EmptySourceCode);
    } else {
        run_node_stage(&mut root, NodeTransformationStage::Preparing, &mut node_catalog)?;
        if options.dead_code_injection {
            run_node_stage(&mut root, NodeTransformationStage::DeadCodeInjection, &mut node_catalog)?;
        }
        if options.control_flow_flattening {
            run_node_stage(&mut root, NodeTransformationStage::ControlFlowFlattening, &mut node_catalog)?;
        }
        if options.rename_properties {
            run_node_stage(&mut root, NodeTransformationStage::RenameProperties, &mut node_catalog)?;
        }
        run_node_stage(&mut root, NodeTransformationStage::Converting, &mut node_catalog)?;
        run_node_stage(&mut root, NodeTransformationStage::RenameIdentifiers, &mut node_catalog)?;
        run_node_stage(&mut root, NodeTransformationStage::StringArray, &mut node_catalog)?;
        if options.simplify {
            run_node_stage(&mut root, NodeTransformationStage::Simplifying, &mut node_catalog)?;
        }
        run_node_stage(&mut root, NodeTransformationStage::Finalizing, &mut node_catalog)?;
    }

    let generator = Generator::new(GeneratorConfig::from(options));
    let generated = generator
        .generate(&root, &source)
        .map_err(|e| ObfuscationError::GenerateError(e.to_string()))?;

    let map = match generated.source_map {
        Some(map) => map.to_json().map_err(|e| ObfuscationError::GenerateError(e.to_string()))?,
        None => String::new(),
    };

    let code = run_code_stage(generated.code, CodeTransformationStage::FinalizingTransformers, &mut code_catalog)?;

    logger::success(Message::ObfuscationCompleted);
    Ok(ObfuscationResult { code, map })
}

fn is_empty_program(root: &Node) -> bool {
    matches!(&root.kind, NodeKind::Program { body } if body.is_empty())
        && root.leading_comments.is_empty()
        && root.trailing_comments.is_empty()
}

/// Builds the active set for `stage` from `catalog`, schedules it into dependency-respecting
/// batches, and runs the traversal engine once per batch with a fused visitor. A panic inside a
/// batch's traversal is caught and reported as [`ObfuscationError::TransformerFailure`], naming
/// the first transformer in the batch.
fn run_node_stage(
    root: &mut Node,
    stage: NodeTransformationStage,
    catalog: &mut [Box<dyn Transformer>],
) -> Result<()> {
    logger::info(Message::NodeTransformationStage(stage));

    let mut candidates = Vec::new();
    for (i, t) in catalog.iter_mut().enumerate() {
        if t.get_visitor(stage).is_some() {
            candidates.push(Candidate { name: t.name(), dependencies: t.dependencies(), catalog_index: i });
        }
    }
    if candidates.is_empty() {
        return Ok(());
    }

    let batches = scheduler::build_batches(candidates)?;

    for batch in batches {
        let batch_names: HashSet<TransformerName> = batch.iter().copied().collect();

        let mut visitors = Vec::new();
        for t in catalog.iter_mut() {
            if batch_names.contains(&t.name()) {
                t.prepare(stage);
                if let Some(v) = t.get_visitor(stage) {
                    visitors.push(v);
                }
            }
        }

        let mut fused = visitor::fuse(visitors);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            crate::traversal::replace(root, &mut fused);
        }));

        for t in catalog.iter_mut() {
            if batch_names.contains(&t.name()) {
                t.finalize(stage);
            }
        }

        if outcome.is_err() {
            return Err(ObfuscationError::TransformerFailure {
                name: batch[0],
                stage: node_stage_label(stage),
                message: "transformer panicked during traversal".to_string(),
            });
        }
    }

    Ok(())
}

/// Symmetric to [`run_node_stage`] but over strings: within a batch, active code transformers are
/// applied left-to-right. Activity is probed with an empty string, which every catalog
/// transformer gates purely on `stage` before touching its input.
fn run_code_stage(
    source: String,
    stage: CodeTransformationStage,
    catalog: &mut [Box<dyn CodeTransformer>],
) -> Result<String> {
    logger::info(Message::CodeTransformationStage(stage));

    let mut candidates = Vec::new();
    for (i, t) in catalog.iter().enumerate() {
        if t.is_active(stage) {
            candidates.push(Candidate { name: t.name(), dependencies: t.dependencies(), catalog_index: i });
        }
    }
    if candidates.is_empty() {
        return Ok(source);
    }

    let batches = scheduler::build_batches(candidates)?;

    let mut source = source;
    for batch in batches {
        let batch_names: HashSet<TransformerName> = batch.into_iter().collect();
        for t in catalog.iter_mut() {
            if batch_names.contains(&t.name()) {
                source = t
                    .apply(stage, source)
                    .expect("transformer active in this stage's batch must return Some");
            }
        }
    }
    Ok(source)
}

fn node_stage_label(stage: NodeTransformationStage) -> &'static str {
    match stage {
        NodeTransformationStage::Initializing => "Initializing",
        NodeTransformationStage::Preparing => "Preparing",
        NodeTransformationStage::DeadCodeInjection => "DeadCodeInjection",
        NodeTransformationStage::ControlFlowFlattening => "ControlFlowFlattening",
        NodeTransformationStage::RenameProperties => "RenameProperties",
        NodeTransformationStage::Converting => "Converting",
        NodeTransformationStage::RenameIdentifiers => "RenameIdentifiers",
        NodeTransformationStage::StringArray => "StringArray",
        NodeTransformationStage::Simplifying => "Simplifying",
        NodeTransformationStage::Finalizing => "Finalizing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_produces_empty_output_without_error() {
        let result = obfuscate("", &Options::default()).unwrap();
        assert_eq!(result.code, "");
        assert_eq!(result.map, "");
    }

    #[test]
    fn simple_declaration_round_trips() {
        let result = obfuscate("let x = 5;", &Options::default()).unwrap();
        assert!(!result.code.is_empty());
        assert_eq!(result.map, "");
    }

    #[test]
    fn hashbang_is_stripped_and_restored() {
        let source = "#!/usr/bin/env node\nlet x = 1;";
        let result = obfuscate(source, &Options::default()).unwrap();
        assert!(result.code.starts_with("#!/usr/bin/env node\n"));
    }

    #[test]
    fn source_map_is_populated_when_requested() {
        let options = Options { source_map: true, ..Options::default() };
        let result = obfuscate("let x = 1;", &options).unwrap();
        assert!(!result.map.is_empty());
    }

    #[test]
    fn seed_is_reproducible_across_calls() {
        let options = Options { seed: Some(42), ..Options::default() };
        let a = obfuscate("let value = 1;", &options).unwrap();
        let b = obfuscate("let value = 1;", &options).unwrap();
        assert_eq!(a.code, b.code);
    }
}
