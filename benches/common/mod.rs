#![allow(dead_code)]
use std::path::Path;

use tasklang::ast::Program;
use tasklang::{lexer, parser, semantic};

/// Copies of a full search session concatenated into one script.
const LONG_REPEAT: usize = 500;

const LONG_SESSION: &str = r#"open chrome
go https://example.com/search
type "rust compiler" id "query"
click css "button.search, input[type=submit]"
enter
wait 1
screenshot results.png
close
"#;

/// Every bench-enabled fixture program plus a synthetic long script, as
/// `(label, source)` pairs.
pub fn workloads() -> Vec<(String, String)> {
    let cases = test_support::load_cases(Path::new("tests/programs"))
        .unwrap_or_else(|err| panic!("load fixtures: {err}"));
    let mut workloads: Vec<(String, String)> = cases
        .into_iter()
        .filter(|case| case.spec.bench.enabled)
        .map(|case| {
            let source = case
                .read_program()
                .unwrap_or_else(|err| panic!("read {}: {err}", case.name));
            (case.name, source)
        })
        .collect();
    workloads.push(("long".to_string(), LONG_SESSION.repeat(LONG_REPEAT)));
    workloads
}

pub fn load_program(label: &str, source: &str) -> Program {
    let tokens = lexer::tokenize(source).unwrap_or_else(|err| panic!("tokenize {label}: {err}"));
    let program = parser::parse(&tokens).unwrap_or_else(|err| panic!("parse {label}: {err}"));
    semantic::analyze(&program).unwrap_or_else(|err| panic!("analyze {label}: {err}"));
    program
}
