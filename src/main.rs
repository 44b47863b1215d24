use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail, ensure};

use tasklang::codegen::{Generator, GeneratorOptions};
use tasklang::{lexer, parser, semantic};

const USAGE: &str =
    "usage: tasklang [--output|-o DIR] [--config|-c FILE] [--tokens] [--ast] <input.task>";

enum Command {
    Help,
    Compile(RunConfig),
}

struct RunConfig {
    input: PathBuf,
    output_dir: PathBuf,
    config: Option<PathBuf>,
    print_tokens: bool,
    print_ast: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut input = None;
    let mut output_dir = PathBuf::from("output");
    let mut config = None;
    let mut print_tokens = false;
    let mut print_ast = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" | "-o" => {
                output_dir = args
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| anyhow!("Missing directory after {arg}"))?;
            }
            "--config" | "-c" => {
                config = Some(
                    args.next()
                        .map(PathBuf::from)
                        .ok_or_else(|| anyhow!("Missing file after {arg}"))?,
                );
            }
            "--tokens" => print_tokens = true,
            "--ast" => print_ast = true,
            "--help" | "-h" => return Ok(Command::Help),
            flag if flag.starts_with('-') => bail!("Unknown option '{flag}'\n{USAGE}"),
            _ => {
                ensure!(input.is_none(), "Only one input file is supported");
                input = Some(PathBuf::from(arg));
            }
        }
    }

    let input = input.ok_or_else(|| anyhow!("{USAGE}"))?;
    Ok(Command::Compile(RunConfig {
        input,
        output_dir,
        config,
        print_tokens,
        print_ast,
    }))
}

fn load_options(path: Option<&Path>) -> Result<GeneratorOptions> {
    let Some(path) = path else {
        return Ok(GeneratorOptions::default());
    };
    let raw =
        fs::read_to_string(path).with_context(|| format!("Reading config {}", path.display()))?;
    GeneratorOptions::from_yaml_str(&raw).with_context(|| format!("Parsing {}", path.display()))
}

fn run(config: RunConfig) -> Result<()> {
    let input = &config.input;
    ensure!(
        input.extension().and_then(|ext| ext.to_str()) == Some("task"),
        "File must have .task extension: {}",
        input.display()
    );
    ensure!(input.exists(), "File not found: {}", input.display());
    let options = load_options(config.config.as_deref())?;

    let source =
        fs::read_to_string(input).with_context(|| format!("Reading {}", input.display()))?;

    let tokens = lexer::tokenize(&source).context("Lexing failed")?;
    if config.print_tokens {
        println!("Tokens:");
        for token in &tokens {
            println!("{token}");
        }
        println!();
    }

    let program = parser::parse(&tokens).context("Parsing failed")?;
    if config.print_ast {
        println!("AST:");
        println!("{program}");
        println!();
    }

    semantic::analyze(&program).context("Semantic analysis failed")?;
    println!("Semantic analysis passed");

    let code = Generator::new(options).generate(&program);
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("Invalid input file name {}", input.display()))?;
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Creating {}", config.output_dir.display()))?;
    let output_path = config.output_dir.join(format!("{stem}.py"));
    fs::write(&output_path, code).with_context(|| format!("Writing {}", output_path.display()))?;

    println!("Python automation script generated at {}", output_path.display());
    Ok(())
}

fn main() -> Result<()> {
    match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Compile(config) => run(config),
    }
}
