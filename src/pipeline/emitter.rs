//! # Equation Emitter Module
//!
//! Turns the filtered candidate list into the tabular form the downstream
//! equation-selection tool reads: each surviving candidate's tokenized infix
//! text is rewritten to plain algebraic notation, parsed and fully expanded,
//! and written out as an `(equation, loss, complexity)` row. The `loss` and
//! `complexity` columns are fixed placeholders (`0` and `1`); the consumer
//! recomputes both and only requires the columns to exist.
//!
//! The result is an owned, fully materialized [`EquationTable`]. It can be
//! rendered to any writer, to an in-memory CSV string, or to an owned
//! [`tempfile::NamedTempFile`] handle that is rewound to the start and deleted
//! automatically when dropped.

use crate::pipeline::filter::filter_expressions;
use crate::pipeline::operators::PredictedFunction;
use crate::symbolic::symbolic_engine::Expr;
use csv::Writer;
use log::{debug, info, warn};
use std::fmt;
use std::io::{Seek, SeekFrom, Write as IoWrite};
use tempfile::NamedTempFile;

/// Token substitution table mapping the model's operator tokens to algebraic
/// notation. The order is contractual: replacements are textual, applied top
/// to bottom, each globally, so a different order would produce different
/// strings.
const REPLACE_OPS: [(&str, &str); 5] = [
    ("add", "+"),
    ("mul", "*"),
    ("sub", "-"),
    ("pow", "**"),
    ("inv", "1/"),
];

/// Applies the fixed [`REPLACE_OPS`] substitutions to the infix text, in table
/// order, each replacement global.
pub fn rewrite_operations(input: &str) -> String {
    REPLACE_OPS
        .iter()
        .fold(input.to_string(), |text, (token, replacement)| {
            text.replace(token, replacement)
        })
}

/// One output row for the equation-selection tool.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationRecord {
    pub equation: String,
    pub loss: f64,
    pub complexity: u32,
}

/// Errors the emitter can surface. A parse failure is fatal for the whole
/// invocation (a silently wrong equation is worse than a visible failure);
/// IO/CSV failures let the caller tell a broken output resource apart from a
/// successful empty table.
#[derive(Debug)]
pub enum EmitError {
    /// A rewritten candidate could not be parsed or expanded.
    Parse(String),
    /// The output resource could not be created or written.
    Io(std::io::Error),
    /// CSV serialization failed.
    Csv(csv::Error),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EmitError::Parse(msg) => write!(f, "failed to parse candidate equation: {}", msg),
            EmitError::Io(err) => write!(f, "output resource failure: {}", err),
            EmitError::Csv(err) => write!(f, "CSV serialization failure: {}", err),
        }
    }
}

impl std::error::Error for EmitError {}

impl From<std::io::Error> for EmitError {
    fn from(err: std::io::Error) -> Self {
        EmitError::Io(err)
    }
}

impl From<csv::Error> for EmitError {
    fn from(err: csv::Error) -> Self {
        EmitError::Csv(err)
    }
}

/// The fully materialized output table, rows in the same relative order as the
/// filtered candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationTable {
    records: Vec<EquationRecord>,
}

impl EquationTable {
    pub fn records(&self) -> &[EquationRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the table as CSV with the header `equation,loss,complexity`.
    pub fn write_csv<W: IoWrite>(&self, writer: W) -> Result<(), EmitError> {
        let mut csv_writer = Writer::from_writer(writer);
        csv_writer.write_record(["equation", "loss", "complexity"])?;
        for record in &self.records {
            let loss = record.loss.to_string();
            let complexity = record.complexity.to_string();
            csv_writer.write_record([record.equation.as_str(), loss.as_str(), complexity.as_str()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Renders the table to an in-memory CSV string.
    pub fn to_csv_string(&self) -> Result<String, EmitError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| EmitError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Writes the table to a named temporary file and returns the open handle,
    /// rewound to the start so the caller can read it back immediately. The
    /// file is removed when the handle drops, on every exit path.
    pub fn into_temp_csv(self) -> Result<NamedTempFile, EmitError> {
        let mut temp_csv = NamedTempFile::new()?;
        self.write_csv(temp_csv.as_file_mut())?;
        temp_csv.as_file_mut().seek(SeekFrom::Start(0))?;
        Ok(temp_csv)
    }
}

/// Runs the full post-processing pipeline: consistency-filters `candidates`,
/// rewrites each survivor's infix text, expands it algebraically and collects
/// one [`EquationRecord`] per survivor with placeholder `loss = 0` and
/// `complexity = 1`.
///
/// An unparseable survivor aborts the invocation with [`EmitError::Parse`];
/// an empty candidate list is not an error and yields an empty table.
pub fn emit_records(candidates: &[PredictedFunction]) -> Result<EquationTable, EmitError> {
    let mut records = Vec::new();
    for candidate in filter_expressions(candidates) {
        let rewritten = rewrite_operations(candidate.infix());
        debug!("rewritten candidate: {}", rewritten);
        let parsed = Expr::parse_expression(&rewritten).map_err(|msg| {
            warn!("dropping batch: candidate '{}' failed to parse", rewritten);
            EmitError::Parse(msg)
        })?;
        records.push(EquationRecord {
            equation: parsed.expand().to_string(),
            loss: 0.0,
            complexity: 1,
        });
    }
    info!(
        "emitting {} equation records from {} candidates",
        records.len(),
        candidates.len()
    );
    Ok(EquationTable { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_table_order() {
        // substitutions compose top to bottom: add first, pow later
        assert_eq!(rewrite_operations("add(pow(x,2))"), "+(**(x,2))");
    }

    #[test]
    fn test_rewrite_all_tokens() {
        assert_eq!(
            rewrite_operations("x_0 add x_1 mul x_2 sub x_3 pow 2"),
            "x_0 + x_1 * x_2 - x_3 ** 2"
        );
        assert_eq!(rewrite_operations("inv(x_0)"), "1/(x_0)");
    }

    #[test]
    fn test_emit_single_expression() {
        let candidates = vec![PredictedFunction::new("x_0 add 1")];
        let table = emit_records(&candidates).unwrap();
        assert_eq!(table.records().len(), 1);
        assert_eq!(table.records()[0].equation, "(1 + x_0)");
        assert_eq!(table.records()[0].loss, 0.0);
        assert_eq!(table.records()[0].complexity, 1);
    }

    #[test]
    fn test_emit_expands_products() {
        let candidates = vec![PredictedFunction::new("(x_0 add 1) mul (x_0 sub 1)")];
        let table = emit_records(&candidates).unwrap();
        assert_eq!(table.records()[0].equation, "(-1 + (x_0 ^ 2))");
    }

    #[test]
    fn test_emit_empty_input_is_ok() {
        let table = emit_records(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(
            table.to_csv_string().unwrap(),
            "equation,loss,complexity\n"
        );
    }

    #[test]
    fn test_parse_failure_propagates() {
        let candidates = vec![PredictedFunction::new("x_0 add )(")];
        assert!(matches!(
            emit_records(&candidates),
            Err(EmitError::Parse(_))
        ));
    }

    #[test]
    fn test_csv_header_and_rows() {
        let candidates = vec![
            PredictedFunction::new("sin(x_0)"),
            PredictedFunction::new("x_0 add 1"),
        ];
        let csv = emit_records(&candidates).unwrap().to_csv_string().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("equation,loss,complexity"));
        assert_eq!(lines.next(), Some("sin(x_0),0,1"));
        assert_eq!(lines.next(), Some("(1 + x_0),0,1"));
        assert_eq!(lines.next(), None);
    }
}
