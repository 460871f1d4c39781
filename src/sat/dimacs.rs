#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The format:
//! - Comment lines whose first token is `c` are ignored.
//! - A problem line `p cnf <num_variables> <num_clauses>` precedes the
//!   clause data.
//! - Clause data is a whitespace-separated stream of literal tokens; each
//!   clause is terminated by a `0` token, and a `-` prefix marks negative
//!   polarity.
//! - An optional `%` line marks end-of-data (used in competition data).
//!
//! Variable names are the tokens themselves, so alphabetic identifiers are
//! accepted alongside the classic integers. The declared variable count is
//! not used to invent variables: only names that actually occur in clauses
//! enter the formula.

use crate::sat::cnf::Cnf;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Ways the input can fail to parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Clause data arrived before any `p cnf` header, or there was no
    /// header at all.
    #[error("missing 'p cnf <vars> <clauses>' header")]
    MissingHeader,

    /// A problem line that is not `p cnf <vars> <clauses>` with two
    /// readable counts.
    #[error("malformed header: '{0}'")]
    MalformedHeader(String),

    /// A literal token with no variable name behind its sign.
    #[error("literal token '{0}' has no variable name")]
    EmptyName(String),

    /// The input ended before the declared number of clauses was read.
    #[error("input ended after {found} of {declared} declared clauses")]
    Truncated {
        /// Clause count announced by the header.
        declared: usize,
        /// Complete clauses actually read.
        found: usize,
    },

    /// The underlying reader failed.
    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Parses DIMACS text.
///
/// # Errors
///
/// Returns a [`ParseError`] when the header is absent or ill-formed, a
/// literal token is empty, or the input ends early.
pub fn parse_text(input: &str) -> Result<Cnf, ParseError> {
    parse(io::Cursor::new(input))
}

/// Parses DIMACS data from a buffered reader.
///
/// Reading stops once the declared number of clauses is complete or a `%`
/// marker is reached; trailing content is ignored.
///
/// # Errors
///
/// Returns a [`ParseError`] when the header is absent or ill-formed, a
/// literal token is empty, the input ends early, or reading fails.
pub fn parse<R: BufRead>(reader: R) -> Result<Cnf, ParseError> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<(String, bool)>> = Vec::new();
    let mut current: Vec<(String, bool)> = Vec::new();

    'lines: for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            None | Some(&"c") => {}
            Some(&"%") => break,
            Some(&"p") => {
                if header.is_some() {
                    return Err(ParseError::MalformedHeader(line.trim().to_string()));
                }
                header = Some(parse_header(line.trim())?);
            }
            Some(_) => {
                let Some((_, declared)) = header else {
                    return Err(ParseError::MissingHeader);
                };
                for token in tokens {
                    if token == "0" {
                        clauses.push(std::mem::take(&mut current));
                        if clauses.len() == declared {
                            break 'lines;
                        }
                        continue;
                    }
                    let (name, polarity) = token
                        .strip_prefix('-')
                        .map_or((token, true), |name| (name, false));
                    if name.is_empty() {
                        return Err(ParseError::EmptyName(token.to_string()));
                    }
                    current.push((name.to_string(), polarity));
                }
            }
        }
    }

    let (_, declared) = header.ok_or(ParseError::MissingHeader)?;
    if clauses.len() < declared {
        return Err(ParseError::Truncated {
            declared,
            found: clauses.len(),
        });
    }

    Ok(Cnf::from_named(clauses))
}

/// Parses a DIMACS file at `path`.
///
/// # Errors
///
/// Returns a [`ParseError`] when the file cannot be opened or its content
/// fails to parse.
pub fn parse_path(path: &Path) -> Result<Cnf, ParseError> {
    let file = std::fs::File::open(path)?;
    parse(io::BufReader::new(file))
}

/// Reads the two counts out of a `p cnf <vars> <clauses>` line.
fn parse_header(line: &str) -> Result<(usize, usize), ParseError> {
    let malformed = || ParseError::MalformedHeader(line.to_string());

    let mut fields = line.split_whitespace();
    if fields.next() != Some("p") || fields.next() != Some("cnf") {
        return Err(malformed());
    }
    let vars = fields
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(malformed)?;
    let clauses = fields
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(malformed)?;
    if fields.next().is_some() {
        return Err(malformed());
    }
    Ok((vars, clauses))
}
