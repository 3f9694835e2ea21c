//! Byte-level tokenizer for the nested style language.
//!
//! A single forward pass over the input driven by an explicit state machine.
//! End of input is handled by the same dispatch as real bytes: reading past
//! the buffer yields a `\0` sentinel, so every state spells out what a
//! truncated construct means.

use log::error;

use super::{
    is_blank, is_identifier_char, is_selector_start_char, is_space, is_value_char, CompileError,
};
use crate::Sassling;

const NUL: u8 = b'\0';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Selector,
    BlockStart,
    BlockEnd,
    PropertyName,
    PropertyValue,
    EndStatement,
    VariableName,
    VariableValue,
    EndOfFile,
}

/// A token is its kind plus the half-open byte range `[start, end)` it was
/// read from; the text itself stays in the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// The `EndOfFile` token's range extends one byte past the input, so the
    /// slice end is clamped.
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end.min(source.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Selector,
    SelectorLookup,
    StartBlock,
    Done,
}

// Which byte opened the selector currently being read; decides the error
// reported for a bad byte inside the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectorKind {
    Type,
    Class,
    Id,
}

impl SelectorKind {
    fn of(byte: u8) -> Self {
        match byte {
            b'.' => Self::Class,
            b'#' => Self::Id,
            _ => Self::Type,
        }
    }

    fn bad_char_error(self) -> CompileError {
        match self {
            Self::Type => CompileError::IdentifierCanOnlyContainsAlphaChar,
            Self::Class => CompileError::ClassSelectorCanOnlyContainsAlphaChar,
            Self::Id => CompileError::IdSelectorCanOnlyContainsAlphaChar,
        }
    }
}

struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    state: State,
    token_start: usize,
    selector_kind: SelectorKind,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            state: State::Start,
            token_start: 0,
            selector_kind: SelectorKind::Type,
            tokens: Vec::new(),
        }
    }

    fn current(&self) -> u8 {
        self.input
            .as_bytes()
            .get(self.position)
            .copied()
            .unwrap_or(NUL)
    }

    fn read_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.position < self.input.len() && predicate(self.input.as_bytes()[self.position]) {
            self.position += 1;
        }
    }

    fn skip_blanks(&mut self) {
        self.read_while(is_blank);
    }

    fn push_token(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token { kind, start, end });
    }

    fn run(&mut self) -> Result<(), CompileError> {
        loop {
            let byte = self.current();

            match self.state {
                State::Start => match byte {
                    b if is_space(b) => self.position += 1,
                    b'$' => self.tokenize_variable()?,
                    NUL => self.state = State::Done,
                    b if is_selector_start_char(b) => {
                        self.token_start = self.position;
                        self.selector_kind = SelectorKind::of(b);
                        self.position += 1;
                        self.state = State::Selector;
                    }
                    _ => return Err(CompileError::UnexpectedCharacter),
                },
                State::Selector => match byte {
                    b if is_identifier_char(b) => self.position += 1,
                    b if is_space(b) => {
                        self.push_token(TokenKind::Selector, self.token_start, self.position);
                        self.position += 1;
                        self.state = State::SelectorLookup;
                    }
                    b'{' => {
                        self.push_token(TokenKind::Selector, self.token_start, self.position);
                        self.push_token(TokenKind::BlockStart, self.position, self.position + 1);
                        self.position += 1;
                        self.state = State::StartBlock;
                    }
                    NUL => return Err(CompileError::UnexpectedEndOfFile),
                    _ => return Err(self.selector_kind.bad_char_error()),
                },
                State::SelectorLookup => match byte {
                    b if is_space(b) => self.position += 1,
                    b'{' => {
                        self.push_token(TokenKind::BlockStart, self.position, self.position + 1);
                        self.position += 1;
                        self.state = State::StartBlock;
                    }
                    // A selector was opened and never got its block.
                    NUL => return Err(CompileError::UnexpectedEndOfFile),
                    b if is_selector_start_char(b) => {
                        self.token_start = self.position;
                        self.selector_kind = SelectorKind::of(b);
                        self.position += 1;
                        self.state = State::Selector;
                    }
                    _ => return Err(CompileError::UnexpectedCharacter),
                },
                State::StartBlock => match byte {
                    b if is_space(b) => self.position += 1,
                    b'$' => self.tokenize_variable()?,
                    b'}' => {
                        self.push_token(TokenKind::BlockEnd, self.position, self.position + 1);
                        self.position += 1;
                    }
                    NUL => self.state = State::Done,
                    b if is_selector_start_char(b) => self.tokenize_name_shaped()?,
                    _ => return Err(CompileError::UnexpectedCharacter),
                },
                State::Done => return Ok(()),
            }
        }
    }

    /// An identifier inside a block is a property name or a nested selector;
    /// which one is only known once its follow byte (`:` vs `{`) is seen.
    fn tokenize_name_shaped(&mut self) -> Result<(), CompileError> {
        let start = self.position;
        self.position += 1;
        self.read_while(is_identifier_char);
        let name_end = self.position;

        self.skip_blanks();
        match self.current() {
            b':' => {
                self.push_token(TokenKind::PropertyName, start, name_end);
                self.position += 1;
                self.tokenize_property_value()
            }
            b'{' => {
                self.push_token(TokenKind::Selector, start, name_end);
                self.push_token(TokenKind::BlockStart, self.position, self.position + 1);
                self.position += 1;
                Ok(())
            }
            NUL => Err(CompileError::UnexpectedEndOfFile),
            _ => Err(CompileError::NotImplemented),
        }
    }

    fn tokenize_property_value(&mut self) -> Result<(), CompileError> {
        self.skip_blanks();
        let start = self.position;
        self.read_while(is_value_char);
        let end = self.position;

        match self.current() {
            b';' => {
                // Trailing blanks stay part of the token; only emptiness is
                // judged on the trimmed range.
                if trim_end_blanks(self.input, start, end) == start {
                    return Err(CompileError::PropertyValueCannotBeEmpty);
                }
                self.push_token(TokenKind::PropertyValue, start, end);
                self.push_token(TokenKind::EndStatement, self.position, self.position + 1);
                self.position += 1;
                Ok(())
            }
            b'}' => Err(CompileError::PropertyValueMustEndWithASemicolon),
            b'\r' | b'\n' => Err(CompileError::PropertyValueCannotContainCRLF),
            NUL => Err(CompileError::UnexpectedEndOfFile),
            _ => Err(CompileError::PropertyValueCanOnlyContainsAlphaChar),
        }
    }

    /// `$name` up to `;`, emitted as name, value and end-of-statement tokens.
    /// The name token keeps the `$`; references in value position carry it
    /// too, so lookups compare full `$name` keys.
    fn tokenize_variable(&mut self) -> Result<(), CompileError> {
        let start = self.position;
        self.position += 1;
        self.read_while(is_identifier_char);
        let name_end = self.position;
        if name_end == start + 1 {
            return Err(CompileError::VariableNameCanOnlyContainsAlphaChar);
        }
        self.push_token(TokenKind::VariableName, start, name_end);

        self.skip_blanks();
        match self.current() {
            b':' => self.position += 1,
            b'\r' | b'\n' => return Err(CompileError::VariableNameCannotContainCRLF),
            NUL => return Err(CompileError::UnexpectedEndOfFile),
            _ => return Err(CompileError::VariableNameCanOnlyContainsAlphaChar),
        }

        self.skip_blanks();
        let value_start = self.position;
        self.read_while(is_value_char);

        match self.current() {
            b';' => {
                let value_end = trim_end_blanks(self.input, value_start, self.position);
                self.push_token(TokenKind::VariableValue, value_start, value_end);
                self.push_token(TokenKind::EndStatement, self.position, self.position + 1);
                self.position += 1;
                Ok(())
            }
            b'\r' | b'\n' => Err(CompileError::VariableValueCannotContainCRLF),
            NUL => Err(CompileError::UnexpectedEndOfFile),
            _ => Err(CompileError::PropertyValueCanOnlyContainsAlphaChar),
        }
    }
}

fn trim_end_blanks(input: &str, start: usize, end: usize) -> usize {
    let bytes = input.as_bytes();
    let mut end = end;
    while end > start && is_blank(bytes[end - 1]) {
        end -= 1;
    }
    end
}

pub(crate) fn tokenize(ssl: &Sassling, source: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokenizer = Tokenizer::new(source);
    match tokenizer.run() {
        Ok(()) => {
            tokenizer.push_token(TokenKind::EndOfFile, source.len(), source.len() + 1);
            Ok(tokenizer.tokens)
        }
        Err(err) => {
            error!(ssl, "lexical error at byte {}: {err}", tokenizer.position);
            Err(err)
        }
    }
}
