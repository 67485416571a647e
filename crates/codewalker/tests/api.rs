//! Integration tests for the public API

use codewalker::prelude::*;
use codewalker::{sanitize, sanitize_diagram, sanitize_with_config};

#[test]
fn test_sanitize_fenced_diagram() {
    let fixed = sanitize("```mermaid\ngraph LR\n  A[Start] --> B{OK?}\n```");
    assert_eq!(fixed, "graph LR\n  A[\"Start\"] --> B{\"OK?\"}");
}

#[test]
fn test_sanitize_matches_sanitizer_run() {
    let input = "A[x] -- f(y) --> B;";
    assert_eq!(sanitize(input), Sanitizer::new().run(input));
    assert_eq!(sanitize(input), Sanitizer::default().run(input));
}

#[test]
fn test_individual_passes() {
    let input = "```\nA -- f(x) --> B[y];\n```";

    let fences = FenceStripper::new().apply(input);
    assert_eq!(fences, "A -- f(x) --> B[y];");

    let edges = EdgeLabelQuoter::new().apply(&fences);
    assert_eq!(edges, "A -- \"f(x)\" --> B[y];");

    let nodes = BracketScanner::new().apply(&edges);
    assert_eq!(nodes, "A -- \"f(x)\" --> B[\"y\"];");

    let done = SemicolonStripper::new().apply(&nodes);
    assert_eq!(done, "A -- \"f(x)\" --> B[\"y\"]\n");
    assert_eq!(done, sanitize(input));
}

#[test]
fn test_pass_names_match_config_names() {
    let passes: Vec<Box<dyn Pass>> = vec![
        Box::new(FenceStripper::new()),
        Box::new(EdgeLabelQuoter::new()),
        Box::new(BracketScanner::new()),
        Box::new(SemicolonStripper::new()),
    ];
    let names: Vec<&str> = passes.iter().map(|p| p.name()).collect();
    assert_eq!(names, codewalker::core::PASS_NAMES.to_vec());
}

#[test]
fn test_disable_single_pass() {
    let config = SanitizeConfig::all().with_node_labels(false);
    assert_eq!(sanitize_with_config("A[x];", &config), "A[x]\n");

    let config = SanitizeConfig::all().with_edge_labels(false);
    // Without edge quoting the scanner reads `(x)` in the edge as a node label
    assert_eq!(
        sanitize_with_config("A -- f(x) --> B", &config),
        "A -- f(\"x\") --> B"
    );
}

#[test]
fn test_sanitized_diagram_serializes() {
    let diagram = sanitize_diagram("A(x);");
    let json = serde_json::to_value(&diagram).unwrap();
    assert_eq!(json["original"], "A(x);");
    assert_eq!(json["sanitized"], "A(\"x\")\n");
    assert_eq!(json["passes"].as_array().unwrap().len(), 4);
    assert_eq!(json["passes"][2]["pass"], "node-labels");
    assert_eq!(json["passes"][2]["changed"], true);
}

#[test]
fn test_render_failure_surfaces_original() {
    let original = "```mermaid\nA[x] -->\n```";
    let diagram = sanitize_diagram(original);
    let error = diagram.render_failure("Parse error on line 1: Expecting 'NODE_STRING'");

    assert_eq!(error.original_source(), Some(original));
    let message = error.to_string();
    assert!(message.contains("Expecting 'NODE_STRING'"));
    assert!(message.contains("A[x] -->"));
}

#[test]
fn test_sanitizer_shared_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let sanitizer = Arc::new(Sanitizer::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let sanitizer = Arc::clone(&sanitizer);
            thread::spawn(move || sanitizer.run(&format!("N{}[label {}]", i, i)))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("N{}[\"label {}\"]", i, i));
    }
}

#[test]
fn test_token_family_table() {
    let pairs: Vec<(&str, &str)> = TokenFamily::ALL
        .iter()
        .map(|f| (f.open(), f.close()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("((", "))"),
            ("[(", ")]"),
            ("[[", "]]"),
            ("{{", "}}"),
            ("[", "]"),
            ("(", ")"),
            ("{", "}"),
        ]
    );
}
