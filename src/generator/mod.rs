//! Converts a (possibly transformed) [`crate::ast::Node`] tree back into JavaScript source text,
//! with optional Source Map V3 output. This is the mirror image of [`crate::parser`]: where the
//! parser narrows OXC's AST into this crate's owned tree, the generator widens it back out to
//! text. It does not depend on OXC at all — printing is a plain recursive walk over `NodeKind`.

use crate::ast::Node;
use crate::config::{Options, SourceMapSourcesMode};

pub mod printer;
pub mod source_maps;

/// Generator configuration. Narrower than the teacher's `GeneratorConfig` (no ECMA target,
/// quote/semicolon/newline strategies, or charset escaping knobs) since [`Options`] exposes a
/// single `compact` switch and this crate's grammar coverage is fixed.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Collapse all non-essential whitespace; when false, indent with two spaces per level and
    /// emit real newlines between statements.
    pub compact: bool,
    pub source_map: bool,
    pub source_root: Option<String>,
    pub include_sources_content: bool,
    pub input_file_name: Option<String>,
}

impl From<&Options> for GeneratorConfig {
    fn from(options: &Options) -> Self {
        Self {
            compact: options.compact,
            source_map: options.source_map,
            source_root: None,
            include_sources_content: matches!(
                options.source_map_sources_mode,
                SourceMapSourcesMode::SourcesContent
            ),
            input_file_name: options.input_file_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub code: String,
    pub source_map: Option<source_maps::SourceMap>,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("malformed AST: {message} at node {node_type}")]
    MalformedAst { message: String, node_type: &'static str },
    #[error("generated output exceeded {limit} bytes")]
    OutputSizeLimitExceeded { limit: usize },
    #[error("source map serialization failed: {0}")]
    SourceMapError(#[from] serde_json::Error),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Prints `root` and, when `config.source_map` is set, builds a Source Map V3 document
    /// mapping every statement and declaration back to its byte span in `source`.
    pub fn generate(&self, root: &Node, source: &str) -> GeneratorResult<GenerationResult> {
        let mut printer = printer::Printer::new(&self.config);
        let code = printer.print_program(root)?;

        let source_map = if self.config.source_map {
            Some(self.build_source_map(&printer, &code, source)?)
        } else {
            None
        };

        Ok(GenerationResult { code, source_map })
    }

    fn build_source_map(
        &self,
        printer: &printer::Printer,
        code: &str,
        source: &str,
    ) -> GeneratorResult<source_maps::SourceMap> {
        let generated_index = source_maps::LineIndex::new(code);
        let original_index = source_maps::LineIndex::new(source);

        let mut builder = source_maps::SourceMapBuilder::new();
        let file_name = self.config.input_file_name.as_deref().unwrap_or("input.js");
        let source_index = builder.add_source(file_name);
        if self.config.include_sources_content {
            builder.add_source_content(source);
        }

        for mapping in printer.mappings() {
            let (generated_line, generated_column) = generated_index.line_col(mapping.generated_offset);
            let (original_line, original_column) = original_index.line_col(mapping.source_offset);
            builder.add_mapping(source_maps::Mapping {
                generated: source_maps::Position { line: generated_line, column: generated_column },
                original: Some(source_maps::Position { line: original_line, column: original_column }),
                source_index: Some(source_index),
                name_index: None,
            });
        }

        let mut map = builder.build();
        map.source_root = self.config.source_root.clone();
        Ok(map)
    }
}
