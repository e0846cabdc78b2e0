// pertmap/src/percent.rs

use crate::perturbation::PerturbationModel;
use crate::table::table_writer;
use crate::variable::VariableType;
use log::debug;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Decimals of the percent column.
pub const PERCENT_DECIMALS: usize = 6;

#[derive(Error, Debug)]
pub enum PercentListError {
    #[error("File IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub fn percent_list_file_name(variable: VariableType) -> String {
    format!("{}Percent.lst", variable)
}

/// Writes `lat lon radius percent` for every entry of `variable`, in model
/// order. Returns the number of lines written.
pub fn write_percent_for_type(
    variable: VariableType,
    model: &PerturbationModel,
    path: &Path,
) -> Result<usize, PercentListError> {
    let file = File::create(path)?;
    let nlines = write_percent_for_type_to(variable, model, file)?;
    debug!("Wrote {} {} percentages to {}", nlines, variable, path.display());
    Ok(nlines)
}

pub fn write_percent_for_type_to<W: Write>(
    variable: VariableType,
    model: &PerturbationModel,
    wtr: W,
) -> Result<usize, PercentListError> {
    let mut writer = table_writer(wtr);
    let mut nlines = 0;
    for entry in model.entries_for(variable) {
        writer.write_record([
            entry.position.to_string(),
            format!("{:.prec$}", entry.percent, prec = PERCENT_DECIMALS),
        ])?;
        nlines += 1;
    }
    writer.flush()?;
    Ok(nlines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::KnownParameter;
    use crate::perturbation::PerturbationModelBuilder;
    use crate::position::Position;
    use crate::structure::{ReferenceStructure, StructureSource};
    use std::sync::Arc;

    fn model() -> PerturbationModel {
        let prem: Arc<ReferenceStructure> = Arc::new(StructureSource::default().resolve().unwrap());
        let knowns = vec![
            KnownParameter::new(Position::new(0., 10., 6371.), VariableType::Vsv, 0.032),
            KnownParameter::new(Position::new(1., 10., 6371.), VariableType::Rho, 0.026),
            KnownParameter::new(Position::new(2., 10., 6371.), VariableType::Vsv, -0.064),
        ];
        PerturbationModelBuilder::default()
            .knowns(&knowns)
            .structure(prem)
            .build()
            .unwrap()
    }

    #[test]
    fn test_writes_only_requested_variable_in_order() {
        let mut buffer = Vec::new();
        let nlines = write_percent_for_type_to(VariableType::Vsv, &model(), &mut buffer).unwrap();
        assert_eq!(nlines, 2);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "0.0000 10.0000 6371.0000 1.000000\n2.0000 10.0000 6371.0000 -2.000000\n"
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(percent_list_file_name(VariableType::Vs), "VsPercent.lst");
    }

    #[test]
    fn test_missing_parent_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("VsPercent.lst");
        assert!(matches!(
            write_percent_for_type(VariableType::Vs, &model(), &path),
            Err(PercentListError::Io(_))
        ));
    }
}
