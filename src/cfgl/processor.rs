//! Compilation pipeline and processing API
//!
//! [`compile`] runs the whole pipeline on one source text:
//!
//! ```text
//! text -> lex -> parse -> evaluate -> assemble -> document
//! ```
//!
//! Lexical and undefined-constant faults are recorded and the pipeline keeps going, so a
//! document can come out degraded. Syntax faults and empty input stop it. With
//! [`CompileOptions::strict`] any recorded fault fails the compilation.
//!
//! [`process`] wraps the pipeline for tools. A processing spec selects what to emit:
//! a document format registered in [`DEFAULT_REGISTRY`], the token stream
//! (`token-simple`, `token-json`) or the syntax tree (`ast-treeviz`).

use thiserror::Error;
use tracing::debug;

use crate::cfgl::assembler::assemble;
use crate::cfgl::ast::{Script, SourceLocation};
use crate::cfgl::config::DiagnosticsConfig;
use crate::cfgl::diagnostics::Fault;
use crate::cfgl::evaluator::evaluate;
use crate::cfgl::formats::{script_to_treeviz_str, FormatError, DEFAULT_REGISTRY};
use crate::cfgl::lexer::{lex, Lexed, Token};
use crate::cfgl::parser::parse;
use crate::cfgl::value::Value;

/// Knobs for a single compilation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Treat recoverable faults as failures
    pub strict: bool,
}

impl CompileOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl From<&DiagnosticsConfig> for CompileOptions {
    fn from(config: &DiagnosticsConfig) -> Self {
        Self {
            strict: config.strict,
        }
    }
}

/// A successfully compiled document
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub document: Value,
    /// Recoverable faults, in source order per stage
    pub faults: Vec<Fault>,
}

impl Compilation {
    /// A degraded document was produced despite recorded faults
    pub fn is_degraded(&self) -> bool {
        !self.faults.is_empty()
    }
}

/// Compilation produced no document
#[derive(Debug, Clone, PartialEq, Error)]
#[error("compilation failed: {}", summarize(.faults))]
pub struct CompileError {
    /// Every fault recorded before the compilation stopped
    pub faults: Vec<Fault>,
}

fn summarize(faults: &[Fault]) -> String {
    match faults {
        [] => "no faults recorded".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

fn check_not_empty(source: &str) -> Result<(), CompileError> {
    if source.trim().is_empty() {
        debug!("rejecting empty input");
        return Err(CompileError {
            faults: vec![Fault::EmptyInput],
        });
    }
    Ok(())
}

/// Lex and parse, returning the tree plus the lexical faults recorded on the way
fn parse_source(source: &str) -> Result<(Script, Vec<Fault>), CompileError> {
    check_not_empty(source)?;

    let Lexed { tokens, mut faults } = lex(source);
    match parse(tokens, source) {
        Ok(script) => Ok((script, faults)),
        Err(syntax) => {
            faults.extend(syntax);
            Err(CompileError { faults })
        }
    }
}

/// Compile cfgl source into a document
pub fn compile(source: &str, options: &CompileOptions) -> Result<Compilation, CompileError> {
    let (script, mut faults) = parse_source(source)?;

    let evaluation = evaluate(&script, source);
    faults.extend(evaluation.faults);

    let Some(document) = assemble(evaluation.elements) else {
        let end = SourceLocation::new(source).end_offset();
        faults.push(Fault::UnexpectedEnd { offset: end });
        return Err(CompileError { faults });
    };

    if options.strict && !faults.is_empty() {
        debug!(faults = faults.len(), "strict mode rejects degraded document");
        return Err(CompileError { faults });
    }

    debug!(
        document = document.type_name(),
        faults = faults.len(),
        "compiled document"
    );
    Ok(Compilation { document, faults })
}

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    Document,
}

/// Represents the output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Treeviz,
    /// A document format looked up in the registry
    Named(String),
}

/// Represents a complete processing specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple", "ast-treeviz" or "yaml"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        if DEFAULT_REGISTRY.has(format_str) {
            return Ok(Self::document(format_str));
        }

        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match (&stage, format) {
            (ProcessingStage::Token, "simple") => OutputFormat::Simple,
            (ProcessingStage::Token, "json") => OutputFormat::Json,
            (ProcessingStage::Ast, "treeviz") => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format_str.to_string())),
        };

        Ok(ProcessingSpec { stage, format })
    }

    /// Spec emitting the compiled document in a registered format
    pub fn document(name: &str) -> Self {
        ProcessingSpec {
            stage: ProcessingStage::Document,
            format: OutputFormat::Named(name.to_string()),
        }
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let mut specs = vec![
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Treeviz,
            },
        ];
        specs.extend(
            DEFAULT_REGISTRY
                .list_formats()
                .iter()
                .map(|name| Self::document(name)),
        );
        specs
    }

    /// One-line description for format listings
    pub fn description(&self) -> String {
        match (&self.stage, &self.format) {
            (_, OutputFormat::Named(name)) => DEFAULT_REGISTRY
                .get(name)
                .map(|formatter| formatter.description().to_string())
                .unwrap_or_default(),
            (ProcessingStage::Token, OutputFormat::Simple) => {
                "Token stream in display form".to_string()
            }
            (ProcessingStage::Token, OutputFormat::Json) => "Token stream as JSON".to_string(),
            (ProcessingStage::Ast, OutputFormat::Treeviz) => {
                "Tree visualization of the syntax tree".to_string()
            }
            _ => String::new(),
        }
    }

    /// The format string this spec parses from
    pub fn as_format_string(&self) -> String {
        match (&self.stage, &self.format) {
            (_, OutputFormat::Named(name)) => name.clone(),
            (ProcessingStage::Token, OutputFormat::Simple) => "token-simple".to_string(),
            (ProcessingStage::Token, OutputFormat::Json) => "token-json".to_string(),
            (ProcessingStage::Ast, OutputFormat::Treeviz) => "ast-treeviz".to_string(),
            // Combinations that from_string never produces
            (stage, format) => format!("{:?}-{:?}", stage, format).to_lowercase(),
        }
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Output of [`process`]: the rendered text plus recoverable faults
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub output: String,
    pub faults: Vec<Fault>,
}

/// Process cfgl source according to the given specification
pub fn process(
    source: &str,
    spec: &ProcessingSpec,
    options: &CompileOptions,
) -> Result<Processed, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let Lexed { tokens, faults } = lex(source);
            let tokens: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
            let output = format_tokens(&tokens, &spec.format)?;
            Ok(Processed { output, faults })
        }
        ProcessingStage::Ast => {
            let (script, faults) = parse_source(source)?;
            match spec.format {
                OutputFormat::Treeviz => Ok(Processed {
                    output: script_to_treeviz_str(&script),
                    faults,
                }),
                _ => Err(ProcessingError::InvalidFormatType(
                    "Only the treeviz format is supported for the AST stage".to_string(),
                )),
            }
        }
        ProcessingStage::Document => {
            let OutputFormat::Named(name) = &spec.format else {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "{:?} is not a document format",
                    spec.format
                )));
            };
            let compilation = compile(source, options)?;
            let output = DEFAULT_REGISTRY.serialize(&compilation.document, name)?;
            Ok(Processed {
                output,
                faults: compilation.faults,
            })
        }
    }
}

/// Format tokens according to the specified format
fn format_tokens(tokens: &[Token], format: &OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = tokens
                .iter()
                .map(|token| token.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            result.push('\n');
            Ok(result)
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(tokens)
                .map_err(|e| FormatError::SerializationError(e.to_string()))?;
            Ok(json)
        }
        other => Err(ProcessingError::InvalidFormatType(format!(
            "{:?} only works with the document stage",
            other
        ))),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::as_format_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfgl::diagnostics::FaultClass;
    use crate::cfgl::value::Map;

    fn lenient(source: &str) -> Result<Compilation, CompileError> {
        compile(source, &CompileOptions::default())
    }

    #[test]
    fn test_compile_declaration() {
        let compilation = lenient("x = 5;").unwrap();
        assert_eq!(
            compilation.document,
            Value::Map(Map::singleton("x", Value::Integer(5)))
        );
        assert!(!compilation.is_degraded());
    }

    #[test]
    fn test_compile_empty_input() {
        for source in ["", "   \n\t "] {
            let error = lenient(source).unwrap_err();
            assert_eq!(error.faults, vec![Fault::EmptyInput]);
            assert_eq!(error.to_string(), "compilation failed: input is empty");
        }
    }

    #[test]
    fn test_comment_only_input_is_a_syntax_fault() {
        let error = lenient("--[[ nothing ]]").unwrap_err();
        assert_eq!(error.faults, vec![Fault::UnexpectedEnd { offset: 15 }]);
    }

    #[test]
    fn test_lexical_fault_degrades_but_compiles() {
        let compilation = lenient("{ a: 1 } @").unwrap();
        assert!(compilation.is_degraded());
        assert_eq!(compilation.faults[0].class(), FaultClass::Lexical);
        assert_eq!(compilation.document.get("a"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_lexical_faults_are_kept_when_parsing_fails() {
        let error = lenient("{ a: 1 @ }}").unwrap_err();
        let classes: Vec<_> = error.faults.iter().map(Fault::class).collect();
        assert_eq!(classes, vec![FaultClass::Lexical, FaultClass::Syntax]);
        assert_eq!(
            error.to_string(),
            "compilation failed: lexical error at line 1: unexpected character '@' (and 1 more)"
        );
    }

    #[test]
    fn test_strict_mode_rejects_degraded_document() {
        let source = "{ a: §missing§ }";
        assert!(lenient(source).is_ok());

        let error = compile(source, &CompileOptions::strict()).unwrap_err();
        assert_eq!(error.faults.len(), 1);
        assert_eq!(error.faults[0].class(), FaultClass::UndefinedConstant);
    }

    #[test]
    fn test_options_from_config() {
        let config = DiagnosticsConfig {
            strict: true,
            color: false,
        };
        assert_eq!(CompileOptions::from(&config), CompileOptions::strict());
    }

    #[test]
    fn test_processing_spec_from_string() {
        assert_eq!(
            ProcessingSpec::from_string("token-simple").unwrap(),
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            }
        );
        assert_eq!(
            ProcessingSpec::from_string("yaml").unwrap(),
            ProcessingSpec::document("yaml")
        );
        assert_eq!(
            ProcessingSpec::from_string("ast-treeviz").unwrap().stage,
            ProcessingStage::Ast
        );
    }

    #[test]
    fn test_processing_spec_errors() {
        assert_eq!(
            ProcessingSpec::from_string("toml"),
            Err(ProcessingError::InvalidFormat("toml".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("bytes-simple"),
            Err(ProcessingError::InvalidStage("bytes".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("ast-json"),
            Err(ProcessingError::InvalidFormatType("ast-json".to_string()))
        );
    }

    #[test]
    fn test_available_formats_round_trip() {
        let formats = available_formats();
        assert_eq!(
            formats,
            vec![
                "token-simple",
                "token-json",
                "ast-treeviz",
                "cfgl",
                "json",
                "treeviz",
                "yaml"
            ]
        );
        for format in formats {
            let spec = ProcessingSpec::from_string(&format).unwrap();
            assert_eq!(spec.as_format_string(), format);
        }
    }

    #[test]
    fn test_spec_descriptions() {
        assert_eq!(
            ProcessingSpec::document("yaml").description(),
            "Block-style YAML (default)"
        );
        assert_eq!(
            ProcessingSpec::from_string("token-json").unwrap().description(),
            "Token stream as JSON"
        );
    }

    #[test]
    fn test_process_tokens_simple() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let processed = process("x = §y§;", &spec, &CompileOptions::default()).unwrap();
        assert_eq!(
            processed.output,
            "<name:x> <equals> <const-ref:y> <semicolon>\n"
        );
        assert!(processed.faults.is_empty());
    }

    #[test]
    fn test_process_tokens_json() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let processed = process("{ }", &spec, &CompileOptions::default()).unwrap();
        assert_eq!(processed.output, "[\n  \"LBrace\",\n  \"RBrace\"\n]");
    }

    #[test]
    fn test_process_document_yaml() {
        let spec = ProcessingSpec::document("yaml");
        let processed = process("x = 5; { a: §x§ }", &spec, &CompileOptions::default()).unwrap();
        assert_eq!(processed.output, "x: 5\na: 5\n");
    }

    #[test]
    fn test_process_ast_reports_syntax_faults() {
        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        let result = process("x = ;", &spec, &CompileOptions::default());
        assert!(matches!(result, Err(ProcessingError::Compile(_))));
    }

    #[test]
    fn test_process_unrepresentable_document() {
        let spec = ProcessingSpec::document("cfgl");
        let result = process("{ a: §nope§ }", &spec, &CompileOptions::default());
        assert!(matches!(
            result,
            Err(ProcessingError::Format(FormatError::Unrepresentable(_)))
        ));
    }
}
