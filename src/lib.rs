//! A compiler for a strict subset of SCSS: nested style rules and
//! `$`-variables in, flat CSS out. Nesting becomes descendant-combinator
//! selectors and every variable reference is replaced by the literal value of
//! its nearest visible binding.

use std::cell::Cell;

use log::{info, trace};

mod css;
mod scss;

pub use scss::CompileError;

#[derive(Default, Debug, Clone)]
struct DebugFlags {
    dump_tokens: bool,
    dump_ast: bool,
    dump_flat: bool,
}

impl DebugFlags {
    fn from_env() -> Self {
        let mut result = Self::default();

        if let Ok(s) = std::env::var("SASSLING_DEBUG") {
            for token in s.split(",") {
                match token {
                    "dump_tokens" => result.dump_tokens = true,
                    "dump_ast" => result.dump_ast = true,
                    "dump_flat" => result.dump_flat = true,
                    _ => (),
                }
            }
        }

        result
    }
}

pub struct Sassling {
    logger: log::RootLogger,
    did_log_version: Cell<bool>,
    debug: DebugFlags,
}

impl Sassling {
    pub fn init() -> Self {
        Self {
            logger: log::RootLogger::new(),
            did_log_version: Cell::new(false),
            debug: DebugFlags::from_env(),
        }
    }
}

// allows for convenient logging with trace!(ssl, ...)
impl log::AsLogger for Sassling {
    fn as_logger(&self) -> &impl log::Logger {
        &self.logger
    }
}

/// Compiles one source text to CSS. The whole pipeline runs to completion or
/// stops at the first error; no partial output is ever produced.
pub fn compile(ssl: &Sassling, source: &str) -> Result<String, CompileError> {
    if !ssl.did_log_version.get() {
        ssl.did_log_version.set(true);
        info!(ssl, "sassling version {}", env!("CARGO_PKG_VERSION"));
    }

    trace!(ssl, "compiling {} bytes of input", source.len());

    let tokens = scss::tokenizer::tokenize(ssl, source)?;
    if ssl.debug.dump_tokens {
        for token in &tokens {
            trace!(
                ssl,
                "{:?} {:?} [{}..{}]",
                token.kind,
                token.lexeme(source),
                token.start,
                token.end
            );
        }
    }

    let mut sheet = scss::parse::parse_style_sheet(&tokens, source)?;
    if ssl.debug.dump_ast {
        trace!(ssl, "{sheet:#?}");
    }

    scss::resolve::resolve_style_sheet(&mut sheet)?;

    let flat = scss::convert::flatten_style_sheet(&sheet);
    if ssl.debug.dump_flat {
        trace!(ssl, "{flat:#?}");
    }

    Ok(flat.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    fn check_compile(source: &str, expected: &str) {
        assert_eq!(
            compile(&Sassling::init(), source).as_deref(),
            Ok(expected),
            "output mismatch for {source:?}"
        );
    }

    fn check_compile_error(source: &str, expected: CompileError) {
        assert_eq!(compile(&Sassling::init(), source), Err(expected));
    }

    #[test]
    fn empty_input_compiles_to_empty_output() {
        check_compile("", "");
    }

    #[test]
    fn single_flat_rule() {
        check_compile("S { color: red; }", "S {\n  color: red;\n}\n");
    }

    #[test]
    fn two_rules_with_properties() {
        check_compile(
            ".button{ margin: 0; padding:0; } h1{ color: red; }",
            ".button {\n  margin: 0;\n  padding: 0;\n}\n\nh1 {\n  color: red;\n}\n",
        );
    }

    #[test]
    fn nested_rule_is_flattened() {
        check_compile(
            ".button{ margin: 0; h1 { color: red; } }",
            ".button {\n  margin: 0;\n}\n\n.button h1 {\n  color: red;\n}\n",
        );
    }

    #[test]
    fn variable_reference_is_substituted() {
        check_compile(
            "$zig-orange: #f7a41d; .button { color: $zig-orange; }",
            ".button {\n  color: #f7a41d;\n}\n",
        );
    }

    #[test]
    fn forward_reference_fails() {
        check_compile_error(
            "$my-color: $zig-orange; $zig-orange: #f7a41d;",
            CompileError::UndefinedVariable("$zig-orange".into()),
        );
    }

    #[test]
    fn shadowed_variable_resolves_in_inner_scope() {
        check_compile(
            "$c: #111; .a { $c: #222; .b { color: $c; } }",
            ".a {\n}\n\n.a .b {\n  color: #222;\n}\n",
        );
    }

    #[test]
    fn empty_property_value_fails() {
        check_compile_error(".x{margin:;}", CompileError::PropertyValueCannotBeEmpty);
    }

    #[test]
    fn triple_nesting() {
        check_compile(
            "A { B { C {} } }",
            "A {\n}\n\nA B {\n}\n\nA B C {\n}\n",
        );
    }

    #[test]
    fn deeply_shadowed_references() {
        check_compile(
            "$c: #111; .t { color: $c; } .a { $c: #222; color: $c; .b { $c: #333; color: $c; } }",
            ".t {\n  color: #111;\n}\n\n.a {\n  color: #222;\n}\n\n.a .b {\n  color: #333;\n}\n",
        );
    }
}
