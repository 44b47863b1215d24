//! Compiler for TaskLang browser-automation scripts.
//!
//! Source text goes through four stages, each consuming the previous one's
//! output: [`lexer::tokenize`], [`parser::parse`], [`semantic::analyze`] and
//! [`codegen::generate`], which emits a Python script driving Selenium.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod token;

use crate::codegen::{Generator, GeneratorOptions};

pub use crate::error::CompileError;

/// Runs the whole pipeline with the default generator options.
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with_options(source, &GeneratorOptions::default())
}

pub fn compile_with_options(
    source: &str,
    options: &GeneratorOptions,
) -> Result<String, CompileError> {
    let tokens = lexer::tokenize(source)?;
    let program = parser::parse(&tokens)?;
    semantic::analyze(&program)?;
    Ok(Generator::new(options.clone()).generate(&program))
}
