use thiserror::Error;

pub(crate) mod convert;
pub(crate) mod parse;
pub(crate) mod resolve;
pub(crate) mod tokenizer;

// Byte classes of the input language. The tokenizer works on raw bytes, so
// these take `u8`; anything non-ASCII is simply in no class.

fn is_identifier_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_')
}

fn is_selector_start_char(byte: u8) -> bool {
    is_identifier_char(byte) || matches!(byte, b'.' | b'#')
}

// `$` is a value byte so that references like `color: $accent;` lex as one
// value token; the resolver strips them out before anything is printed.
fn is_value_char(byte: u8) -> bool {
    is_identifier_char(byte) || matches!(byte, b' ' | b'\t' | b'#' | b'$')
}

fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Everything that can go wrong between source text and CSS output.
///
/// One flat enum for the whole pipeline; the first failure aborts the
/// compilation, so an error value never wraps another.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unexpected end of file")]
    UnexpectedEndOfFile,
    #[error("class selector can only contain alphanumeric characters, '-' or '_'")]
    ClassSelectorCanOnlyContainsAlphaChar,
    #[error("id selector can only contain alphanumeric characters, '-' or '_'")]
    IdSelectorCanOnlyContainsAlphaChar,
    #[error("identifier can only contain alphanumeric characters, '-' or '_'")]
    IdentifierCanOnlyContainsAlphaChar,
    #[error("property name can only contain alphanumeric characters, '-' or '_'")]
    PropertyNameCanOnlyContainsAlphaChar,
    #[error("property value contains a byte that is not allowed in value text")]
    PropertyValueCanOnlyContainsAlphaChar,
    #[error("property value cannot be empty")]
    PropertyValueCannotBeEmpty,
    #[error("property value cannot contain CR or LF")]
    PropertyValueCannotContainCRLF,
    #[error("property value must end with a semicolon")]
    PropertyValueMustEndWithASemicolon,
    #[error("no CR or LF allowed between a property value and its semicolon")]
    NoCRLFBetweenPropertyValueAndSemicolon,
    #[error("variable name can only contain alphanumeric characters, '-' or '_'")]
    VariableNameCanOnlyContainsAlphaChar,
    #[error("variable name cannot contain CR or LF")]
    VariableNameCannotContainCRLF,
    #[error("variable value cannot contain CR or LF")]
    VariableValueCannotContainCRLF,
    #[error("construct is not part of the supported subset")]
    NotImplemented,
    #[error("undefined variable `{0}`")]
    UndefinedVariable(Box<str>),
    #[error("out of memory")]
    OutOfMemory,
}
