use anyhow::{Context, Result, bail, ensure};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use tasklang::ast::Program;
use tasklang::{codegen, lexer, parser, semantic};
use test_support::{
    Case, CaseClass, detect_python_interpreter, ensure_in_order, load_cases, normalize_output,
    python_compile_check,
};

fn expect_position(case: &Case, line: usize, column: usize) -> Result<()> {
    let expected = &case.spec.expected;
    if let Some(expected_line) = expected.line {
        ensure!(
            expected_line == line,
            "Case {} expected error on line {expected_line}, got {line}",
            case.name
        );
    }
    if let Some(expected_column) = expected.column {
        ensure!(
            expected_column == column,
            "Case {} expected error at column {expected_column}, got {column}",
            case.name
        );
    }
    Ok(())
}

fn expect_message(case: &Case, actual: &str) -> Result<()> {
    let expected = case
        .spec
        .expected
        .error_contains
        .as_deref()
        .with_context(|| format!("Missing error_contains in {}", case.name))?;
    ensure!(
        actual.contains(expected),
        "Expected error containing '{expected}' in {}, got '{actual}'",
        case.name
    );
    Ok(())
}

/// Runs the front end over a success case and returns its program.
fn compile_front(case: &Case, source: &str) -> Result<Program> {
    let tokens = lexer::tokenize(source).with_context(|| format!("Tokenizing {}", case.name))?;
    if let Some(expected) = case.spec.expected.tokens {
        ensure!(
            tokens.len() == expected,
            "Case {} expected {expected} tokens, got {}",
            case.name,
            tokens.len()
        );
    }

    let program = parser::parse(&tokens).with_context(|| format!("Parsing {}", case.name))?;
    let keywords = tokens.iter().filter(|token| token.kind.is_keyword()).count();
    ensure!(
        keywords == program.statements.len(),
        "Case {} has {keywords} keywords but {} statements",
        case.name,
        program.statements.len()
    );
    if let Some(expected) = case.spec.expected.statements {
        ensure!(
            program.statements.len() == expected,
            "Case {} expected {expected} statements, got {}",
            case.name,
            program.statements.len()
        );
    }

    semantic::analyze(&program).with_context(|| format!("Analyzing {}", case.name))?;
    Ok(program)
}

fn run_case(case: &Case) -> Result<()> {
    if case.spec.bench.enabled {
        ensure!(
            !case.spec.bench.tags.is_empty(),
            "Case {} has bench enabled but no tags",
            case.name
        );
    }

    let source = case.read_program()?;
    match case.spec.class {
        CaseClass::Success => {
            let program = compile_front(case, &source)?;
            let output = codegen::generate(&program);
            ensure!(
                output.ends_with('\n'),
                "Generated script for {} must end with a newline",
                case.name
            );
            if let Some(file) = case.spec.expected.generated_file.as_deref() {
                let expected = case.read_text(file)?;
                let snippets: Vec<&str> = expected
                    .lines()
                    .map(str::trim_end)
                    .filter(|line| !line.is_empty())
                    .collect();
                ensure_in_order(&normalize_output(&output), &snippets)
                    .with_context(|| format!("Checking generated script for {}", case.name))?;
            }
        }
        CaseClass::LexerError => {
            let Err(error) = lexer::tokenize(&source) else {
                bail!("Expected lexer error in {}, but tokenizing succeeded", case.name);
            };
            expect_message(case, &error.to_string())?;
            expect_position(case, error.line(), error.column())?;
        }
        CaseClass::ParserError => {
            let tokens =
                lexer::tokenize(&source).with_context(|| format!("Tokenizing {}", case.name))?;
            let Err(error) = parser::parse(&tokens) else {
                bail!("Expected parser error in {}, but parsing succeeded", case.name);
            };
            expect_message(case, &error.to_string())?;
            expect_position(case, error.line, error.column)?;
        }
        CaseClass::SemanticError => {
            let tokens =
                lexer::tokenize(&source).with_context(|| format!("Tokenizing {}", case.name))?;
            let program =
                parser::parse(&tokens).with_context(|| format!("Parsing {}", case.name))?;
            let Err(error) = semantic::analyze(&program) else {
                bail!("Expected semantic error in {}, but analysis passed", case.name);
            };
            expect_message(case, &error.to_string())?;
            if let Some(index) = case.spec.expected.statement_index {
                ensure!(
                    error.statement_index == index,
                    "Case {} expected failure at statement {index}, got {}",
                    case.name,
                    error.statement_index
                );
            }
        }
    }
    Ok(())
}

#[test]
fn compiles_fixture_programs() -> Result<()> {
    for case in load_cases(Path::new("tests/programs"))? {
        run_case(&case)?;
    }
    Ok(())
}

#[test]
fn generated_scripts_are_valid_python() -> Result<()> {
    let Some(interpreter) = detect_python_interpreter() else {
        eprintln!("Skipping py_compile check: no PYTHON env or python3 interpreter found.");
        return Ok(());
    };

    let out_dir = TempDir::new().context("Creating script directory")?;

    for case in load_cases(Path::new("tests/programs"))? {
        if case.spec.class != CaseClass::Success {
            continue;
        }
        let source = case.read_program()?;
        let program = compile_front(&case, &source)?;
        let script_path = out_dir.path().join(format!("{}.py", case.name));
        fs::write(&script_path, codegen::generate(&program))
            .with_context(|| format!("Writing {}", script_path.display()))?;
        python_compile_check(&interpreter, &script_path)
            .with_context(|| format!("Compiling generated script for {}", case.name))?;
    }
    Ok(())
}
