//! End-to-end scenarios exercising `obfuscate` through its public entry point only.

use std::cell::RefCell;
use std::rc::Rc;

use jsobfuscate::ast::{NodeIdAllocator, NodeKind};
use jsobfuscate::config::{Options, SourceMapSourcesMode};
use jsobfuscate::obfuscate;
use jsobfuscate::parser;

#[test]
fn empty_input_produces_empty_result() {
    let result = obfuscate("", &Options::default()).unwrap();
    assert_eq!(result.code, "");
    assert_eq!(result.map, "");
}

#[test]
fn whitespace_only_input_is_treated_as_empty() {
    let result = obfuscate("   \n\t  ", &Options::default()).unwrap();
    assert_eq!(result.code, "");
}

#[test]
fn simple_variable_declaration_round_trips_with_every_optional_stage_off() {
    let options = Options::default();
    let result = obfuscate("var test = 31;", &options).unwrap();
    let reparsed = obfuscate(&result.code, &options).unwrap();
    assert_eq!(result.code, reparsed.code);

    let alloc = Rc::new(RefCell::new(NodeIdAllocator::new()));
    let program = parser::parse(&result.code, &alloc).unwrap();
    let NodeKind::Program { body } = &program.kind else { panic!("expected Program") };
    assert_eq!(body.len(), 1, "a single var declaration must not be split across statements");
    let NodeKind::VariableDeclaration { declarations, .. } = &body[0].kind else {
        panic!("expected a VariableDeclaration, got {}", body[0].kind.tag())
    };
    assert_eq!(declarations.len(), 1);
    let NodeKind::VariableDeclarator { init, .. } = &declarations[0].kind else {
        panic!("expected a VariableDeclarator")
    };
    assert!(init.is_some(), "initializer must stay attached to its declarator, not hoisted out");
}

#[test]
fn hashbang_is_stripped_before_parse_and_restored_after_generation() {
    let source = "#!/usr/bin/env node\nvar a=1;";
    let result = obfuscate(source, &Options::default()).unwrap();
    assert!(result.code.starts_with("#!/usr/bin/env node\n"));
}

#[test]
fn simplify_stage_runs_without_disturbing_other_stages() {
    let options = Options { simplify: true, ..Options::default() };
    let result = obfuscate("var x=1;var y=2;", &options).unwrap();
    assert!(!result.code.is_empty());
}

#[test]
fn source_map_is_embedded_when_sources_content_mode_is_requested() {
    let options = Options {
        source_map: true,
        source_map_sources_mode: SourceMapSourcesMode::SourcesContent,
        input_file_name: Some("input.js".to_string()),
        ..Options::default()
    };
    let result = obfuscate("var x = 1;", &options).unwrap();
    assert!(!result.map.is_empty());
    assert!(result.map.contains("\"sourcesContent\""));
    assert!(result.map.contains("\"version\":3"));
}

#[test]
fn same_seed_yields_bit_identical_output() {
    let options = Options { seed: Some(1234), ..Options::default() };
    let a = obfuscate("function greet(name) { return name; }", &options).unwrap();
    let b = obfuscate("function greet(name) { return name; }", &options).unwrap();
    assert_eq!(a.code, b.code);
}

#[test]
fn control_flow_flattening_and_dead_code_injection_can_be_enabled_together() {
    let options = Options {
        control_flow_flattening: true,
        dead_code_injection: true,
        seed: Some(7),
        ..Options::default()
    };
    let result = obfuscate("function add(a, b) { return a + b; }", &options).unwrap();
    assert!(!result.code.is_empty());
}
