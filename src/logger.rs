//! Closed message enumeration logged through `tracing`, per the original design note that the
//! pipeline should avoid emitting free-form log strings. Each variant carries the structured
//! fields a listener needs; formatting them into text is `tracing`'s job, not this module's.

use crate::transformer::{CodeTransformationStage, NodeTransformationStage};

#[derive(Debug, Clone)]
pub enum Message {
    Version(&'static str),
    ObfuscationStarted { input_file_name: Option<String> },
    RandomGeneratorSeed(u64),
    CodeTransformationStage(CodeTransformationStage),
    NodeTransformationStage(NodeTransformationStage),
    EmptySourceCode,
    ObfuscationCompleted,
}

pub fn info(message: Message) {
    match message {
        Message::Version(v) => tracing::info!(version = v, "obfuscator version"),
        Message::ObfuscationStarted { input_file_name } => {
            tracing::info!(input_file_name = ?input_file_name, "obfuscation started")
        }
        Message::RandomGeneratorSeed(seed) => tracing::info!(seed = seed, "random generator seeded"),
        Message::CodeTransformationStage(stage) => {
            tracing::info!(stage = ?stage, "code transformation stage")
        }
        Message::NodeTransformationStage(stage) => {
            tracing::info!(stage = ?stage, "node transformation stage")
        }
        other => tracing::info!(?other, "obfuscation event"),
    }
}

pub fn warn(message: Message) {
    match message {
        Message::EmptySourceCode => tracing::warn!("source produced an empty program"),
        other => tracing::warn!(?other, "warning during obfuscation"),
    }
}

pub fn success(message: Message) {
    match message {
        Message::ObfuscationCompleted => tracing::info!("obfuscation completed"),
        other => tracing::info!(?other, "obfuscation succeeded"),
    }
}
