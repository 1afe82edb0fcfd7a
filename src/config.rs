//! Obfuscation options. One flat, `Default`-derived struct rather than the original's open
//! passthrough bag: the transformer catalog here is closed, so there is nothing for an unknown
//! option to reach.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceMapSourcesMode {
    /// Embed the original source text in the emitted map.
    SourcesContent,
    /// Only reference the original file by name; don't embed its content.
    Sources,
}

impl Default for SourceMapSourcesMode {
    fn default() -> Self {
        SourceMapSourcesMode::Sources
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    pub compact: bool,
    pub control_flow_flattening: bool,
    pub dead_code_injection: bool,
    pub rename_properties: bool,
    pub simplify: bool,
    pub source_map: bool,
    pub source_map_sources_mode: SourceMapSourcesMode,
    pub input_file_name: Option<String>,
    /// Seeds the PRNG collaborator; drawn from OS entropy and logged when absent.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            compact: true,
            control_flow_flattening: false,
            dead_code_injection: false,
            rename_properties: false,
            simplify: false,
            source_map: false,
            source_map_sources_mode: SourceMapSourcesMode::default(),
            input_file_name: None,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_compact_true_everything_else_off() {
        let options = Options::default();
        assert!(options.compact);
        assert!(!options.control_flow_flattening);
        assert!(!options.dead_code_injection);
        assert!(!options.rename_properties);
        assert!(!options.simplify);
        assert!(!options.source_map);
        assert!(options.seed.is_none());
    }

    #[test]
    fn options_roundtrip_through_json() {
        let options = Options { seed: Some(42), ..Options::default() };
        let json = serde_json::to_string(&options).unwrap();
        let back: Options = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(42));
    }
}
