//! Main module for cfgl library functionality

pub mod assembler;
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod evaluator;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod value;
