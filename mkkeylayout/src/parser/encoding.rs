//! Row parsers for base encodings and mapping files
//!
//! Base encoding rows are `code shiftless shifty capslock`; mapping rows are
//! `output key-token...`. Blank lines are skipped.

use crate::lexer::{DataToken, Lexer};
use keylayout_core::{BaseRow, KeyCode, LayoutError, MappingRow, Result, ResultExt, SourceLocation};

/// The words of one non-blank line
#[derive(Debug)]
struct Row {
    line: usize,
    words: Vec<String>,
    /// Whether the line ended with a newline rather than the end of input
    terminated: bool,
}

impl Row {
    fn too_short(&self) -> LayoutError {
        row_end(self.terminated)
    }
}

struct RowReader<'a> {
    lexer: Lexer<'a, DataToken>,
    source: &'a str,
}

impl<'a> RowReader<'a> {
    fn new(source: &'a str, input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            source,
        }
    }

    fn location(&self, line: usize) -> SourceLocation {
        SourceLocation::new(self.source, line)
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        let mut words = Vec::new();
        let mut line = self.lexer.current_line();

        loop {
            let token = self
                .lexer
                .next_token()
                .context(self.location(self.lexer.current_line()))?;

            match token {
                Some(DataToken::Word(word)) => {
                    if words.is_empty() {
                        line = self.lexer.current_line();
                    }
                    words.push(word);
                }
                Some(DataToken::Newline) if words.is_empty() => {}
                Some(DataToken::Newline) => {
                    return Ok(Some(Row {
                        line,
                        words,
                        terminated: true,
                    }))
                }
                Some(DataToken::Whitespace) => {}
                None if words.is_empty() => return Ok(None),
                None => {
                    return Ok(Some(Row {
                        line,
                        words,
                        terminated: false,
                    }))
                }
            }
        }
    }
}

/// Leading decimal key code of a base row, which must be followed by whitespace
fn parse_code(word: &str) -> Result<KeyCode> {
    let end = word
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(word.len());
    if end == 0 {
        return Err(LayoutError::MissingCode);
    }

    // Anything too long for a u64 is too high anyway
    let value = word[..end].parse::<u64>().unwrap_or(u64::MAX);
    let code = KeyCode::new(value)?;

    match word[end..].chars().next() {
        Some(delimiter) => Err(LayoutError::BadDelimiter(delimiter.to_string())),
        None => Ok(code),
    }
}

fn base_row(source: &str, row: Row) -> Result<BaseRow> {
    let location = SourceLocation::new(source, row.line);
    let terminated = row.terminated;
    let mut words = row.words.into_iter();

    let code = parse_code(&words.next().unwrap_or_default()).context(&location)?;
    let shiftless = words
        .next()
        .ok_or_else(|| row_end(terminated))
        .context(&location)?;
    let shifty = words
        .next()
        .ok_or_else(|| row_end(terminated))
        .context(&location)?;
    // Columns after capslock are ignored
    let capslock = words.next();

    Ok(BaseRow {
        location,
        code,
        shiftless,
        shifty,
        capslock,
    })
}

/// Error for a row that stops before its required columns
fn row_end(terminated: bool) -> LayoutError {
    if terminated {
        LayoutError::UnexpectedEndOfLine
    } else {
        LayoutError::UnexpectedEndOfFile
    }
}

/// Parses a base encoding; `source` names it in error messages
pub fn parse_base_rows(source: &str, input: &str) -> Result<Vec<BaseRow>> {
    let mut reader = RowReader::new(source, input);
    let mut rows = Vec::new();
    while let Some(row) = reader.next_row()? {
        rows.push(base_row(source, row)?);
    }
    log::debug!("{}: {} base rows", source, rows.len());
    Ok(rows)
}

/// Parses a mapping file; `source` names it in error messages
pub fn parse_mapping_rows(source: &str, input: &str) -> Result<Vec<MappingRow>> {
    let mut reader = RowReader::new(source, input);
    let mut rows = Vec::new();
    while let Some(row) = reader.next_row()? {
        let location = SourceLocation::new(source, row.line);
        if row.words.len() < 2 {
            return Err(row.too_short().context(location));
        }

        let mut words = row.words.into_iter();
        let output = words.next().unwrap_or_default();
        rows.push(MappingRow {
            location,
            output,
            keys: words.collect(),
        });
    }
    log::debug!("{}: {} mapping rows", source, rows.len());
    Ok(rows)
}
