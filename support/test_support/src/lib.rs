use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;

/// Stage at which a fixture program is expected to stop.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseClass {
    Success,
    LexerError,
    ParserError,
    SemanticError,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BenchConfig {
    pub enabled: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ExpectedOutcome {
    pub tokens: Option<usize>,
    pub statements: Option<usize>,
    /// File listing snippets, one per line, that must appear in the generated
    /// script in the same order.
    pub generated_file: Option<String>,
    pub error_contains: Option<String>,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub statement_index: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseSpec {
    pub class: CaseClass,
    #[serde(default)]
    pub bench: BenchConfig,
    #[serde(default)]
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub program_path: PathBuf,
    pub spec: CaseSpec,
}

impl Case {
    pub fn read_text(&self, relative_path: &str) -> Result<String> {
        fs::read_to_string(self.dir.join(relative_path))
            .with_context(|| format!("Reading {} fixture file {}", self.name, relative_path))
    }

    pub fn read_program(&self) -> Result<String> {
        fs::read_to_string(&self.program_path)
            .with_context(|| format!("Reading {}", self.program_path.display()))
    }
}

pub fn load_cases(programs_dir: &Path) -> Result<Vec<Case>> {
    let mut cases = Vec::new();

    for entry in
        fs::read_dir(programs_dir).with_context(|| format!("Reading {}", programs_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let case_path = path.join("case.yaml");
        if !case_path.exists() {
            continue;
        }

        let program_path = path.join("program.task");
        ensure!(
            program_path.exists(),
            "Missing program.task for case {}",
            path.display()
        );

        let case_name = path
            .file_name()
            .and_then(|value| value.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid case directory name {}", path.display()))?;
        let case_raw = fs::read_to_string(&case_path)
            .with_context(|| format!("Reading {}", case_path.display()))?;
        let spec: CaseSpec = serde_yaml::from_str(&case_raw)
            .with_context(|| format!("Parsing {}", case_path.display()))?;

        cases.push(Case {
            name: case_name,
            dir: path,
            program_path,
            spec,
        });
    }

    ensure!(
        !cases.is_empty(),
        "No test cases found in {}",
        programs_dir.display()
    );
    cases.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(cases)
}

pub fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").trim_end().to_string()
}

/// Checks that every snippet occurs in `haystack`, each one after the end of
/// the previous match.
pub fn ensure_in_order(haystack: &str, snippets: &[&str]) -> Result<()> {
    let mut offset = 0;
    for snippet in snippets {
        let Some(found) = haystack[offset..].find(snippet) else {
            bail!("Expected '{snippet}' after byte {offset} of generated output:\n{haystack}");
        };
        offset += found + snippet.len();
    }
    Ok(())
}

pub fn detect_python_interpreter() -> Option<String> {
    if let Ok(python) = std::env::var("PYTHON")
        && run_python_startup(&python).is_ok()
    {
        return Some(python);
    }

    ["python3", "python"]
        .into_iter()
        .find(|candidate| run_python_startup(candidate).is_ok())
        .map(str::to_string)
}

pub fn run_python_startup(interpreter: &str) -> Result<()> {
    let status = Command::new(interpreter)
        .arg("-c")
        .arg("pass")
        .status()
        .with_context(|| format!("Running '{interpreter} -c pass'"))?;
    ensure!(status.success(), "python startup command failed");
    Ok(())
}

/// Byte-compiles a generated script without running it; Selenium does not
/// need to be installed.
pub fn python_compile_check(interpreter: &str, path: &Path) -> Result<()> {
    let output = Command::new(interpreter)
        .arg("-m")
        .arg("py_compile")
        .arg(path)
        .output()
        .with_context(|| format!("Running py_compile on {}", path.display()))?;
    ensure!(
        output.status.success(),
        "py_compile failed for {}: {}",
        path.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(())
}
