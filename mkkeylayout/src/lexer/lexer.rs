use super::LineToken;
use keylayout_core::Result;
use logos::{Lexer as LogosLexer, Logos};

/// Line-tracking wrapper around a logos lexer
pub struct Lexer<'a, T: Logos<'a>> {
    inner: LogosLexer<'a, T>,
    current_line: usize,
}

impl<'a, T> Lexer<'a, T>
where
    T: Logos<'a, Source = str> + LineToken,
    T::Extras: Default,
{
    pub fn new(input: &'a str) -> Self {
        // A leading byte order mark is not part of the first token
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            inner: T::lexer(input),
            current_line: 1,
        }
    }

    pub fn next_token(&mut self) -> Result<Option<T>> {
        match self.inner.next() {
            Some(Ok(token)) => {
                if token.is_newline() {
                    self.current_line += 1;
                }
                Ok(Some(token))
            }
            Some(Err(_)) => Err(T::invalid(self.inner.slice())),
            None => Ok(None),
        }
    }

    /// Line of the most recent token; after a newline, the line it starts
    pub fn current_line(&self) -> usize {
        self.current_line
    }
}
