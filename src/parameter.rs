// pertmap/src/parameter.rs

use crate::position::Position;
use crate::table::{line_of, parse_f64, table_reader, table_writer, tokens};
use crate::variable::VariableType;
use log::debug;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Solved value of one variable in one voxel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnownParameter {
    pub position: Position,
    pub variable: VariableType,
    pub value: f64,
}

impl KnownParameter {
    pub fn new(position: Position, variable: VariableType, value: f64) -> Self {
        Self {
            position,
            variable,
            value,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParameterListError {
    #[error("File IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid known parameter list: {0}")]
    InvalidFormat(String),
}

/// Reads a known parameter list: one `VARIABLE lat lon radius value` per line.
pub fn read_known_parameters(path: &Path) -> Result<Vec<KnownParameter>, ParameterListError> {
    let file = File::open(path)?;
    let knowns = read_known_parameters_from(file)?;
    debug!("Read {} known parameters from {}", knowns.len(), path.display());
    Ok(knowns)
}

pub fn read_known_parameters_from<R: Read>(
    rdr: R,
) -> Result<Vec<KnownParameter>, ParameterListError> {
    let mut reader = table_reader(rdr);
    let mut knowns = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = line_of(&record);
        let row = tokens(&record);
        if row.is_empty() {
            continue;
        }
        if row.len() != 5 {
            return Err(ParameterListError::InvalidFormat(format!(
                "line {}: expected 5 columns, found {}",
                line,
                row.len()
            )));
        }
        let variable = row[0]
            .parse::<VariableType>()
            .map_err(|e| ParameterListError::InvalidFormat(format!("line {}: {}", line, e)))?;
        let numbers = row[1..]
            .iter()
            .map(|token| parse_f64(token, line))
            .collect::<Result<Vec<f64>, String>>()
            .map_err(ParameterListError::InvalidFormat)?;
        let position = Position::new(numbers[0], numbers[1], numbers[2]);
        knowns.push(KnownParameter::new(position, variable, numbers[3]));
    }
    Ok(knowns)
}

pub fn write_known_parameters(
    knowns: &[KnownParameter],
    path: &Path,
) -> Result<(), ParameterListError> {
    let file = File::create(path)?;
    write_known_parameters_to(knowns, file)
}

pub fn write_known_parameters_to<W: Write>(
    knowns: &[KnownParameter],
    wtr: W,
) -> Result<(), ParameterListError> {
    let mut writer = table_writer(wtr);
    for known in knowns {
        writer.write_record([
            known.variable.to_string(),
            known.position.to_string(),
            known.value.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
