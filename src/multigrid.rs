// pertmap/src/multigrid.rs

use crate::parameter::KnownParameter;
use crate::position::Position;
use crate::table::{line_of, parse_f64, table_reader, tokens};
use crate::variable::VariableType;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// One coarse cell and the fine voxels fused into it.
#[derive(Clone, Debug, PartialEq)]
pub struct FusedCell {
    pub fused: Position,
    pub originals: Vec<Position>,
}

/// Coarse-to-fine mapping of a multigrid parameterization.
///
/// The cells form a partition: no fine position belongs to two cells.
#[derive(Clone, Debug, Default)]
pub struct MultigridDesign {
    cells: Vec<FusedCell>,
    index: HashMap<Position, usize>,
}

#[derive(Error, Debug)]
pub enum MultigridError {
    #[error("File IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid multigrid design: {0}")]
    InvalidDesign(String),
    #[error("Duplicate parameter {1} at {0} after reverse fusion")]
    DuplicateParameter(Position, VariableType),
}

impl MultigridDesign {
    pub fn new(cells: Vec<FusedCell>) -> Result<Self, MultigridError> {
        let mut index = HashMap::with_capacity(cells.len());
        let mut owners: HashMap<Position, usize> = HashMap::new();
        for (i, cell) in cells.iter().enumerate() {
            if cell.originals.is_empty() {
                return Err(MultigridError::InvalidDesign(format!(
                    "cell at {} has no fine positions",
                    cell.fused
                )));
            }
            if index.insert(cell.fused, i).is_some() {
                return Err(MultigridError::InvalidDesign(format!(
                    "cell at {} is defined twice",
                    cell.fused
                )));
            }
            for original in &cell.originals {
                if let Some(owner) = owners.insert(*original, i) {
                    return Err(MultigridError::InvalidDesign(format!(
                        "fine position {} is assigned to cells at {} and {}",
                        original, cells[owner].fused, cell.fused
                    )));
                }
            }
        }
        Ok(Self { cells, index })
    }

    /// Reads a design file; each line is a fused position followed by the
    /// fine positions it replaces, all as `lat lon radius` triplets.
    pub fn load(path: &Path) -> Result<Self, MultigridError> {
        let file = File::open(path)?;
        let design = Self::load_from(file)?;
        info!(
            "Loaded multigrid design with {} fused cells from {}",
            design.len(),
            path.display()
        );
        Ok(design)
    }

    pub fn load_from<R: Read>(rdr: R) -> Result<Self, MultigridError> {
        let mut reader = table_reader(rdr);
        let mut cells = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = line_of(&record);
            let row = tokens(&record);
            if row.is_empty() {
                continue;
            }
            if row.len() < 6 || row.len() % 3 != 0 {
                return Err(MultigridError::InvalidDesign(format!(
                    "line {}: expected a fused position and at least one fine position \
                     as lat lon radius triplets, found {} values",
                    line,
                    row.len()
                )));
            }
            let numbers = row
                .iter()
                .map(|token| parse_f64(token, line))
                .collect::<Result<Vec<f64>, String>>()
                .map_err(MultigridError::InvalidDesign)?;
            let mut positions = numbers
                .chunks(3)
                .map(|triplet| Position::new(triplet[0], triplet[1], triplet[2]));
            let fused = positions.next().ok_or_else(|| {
                MultigridError::InvalidDesign(format!("line {}: empty cell", line))
            })?;
            cells.push(FusedCell {
                fused,
                originals: positions.collect(),
            });
        }
        Self::new(cells)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[FusedCell] {
        &self.cells
    }

    /// Fine positions represented by `fused`, if it is a coarse cell.
    pub fn originals_of(&self, fused: &Position) -> Option<&[Position]> {
        self.index
            .get(fused)
            .map(|&i| self.cells[i].originals.as_slice())
    }
}

/// Spreads every known parameter sitting on a fused cell back onto the fine
/// positions of that cell; all other parameters pass through unchanged.
pub fn reverse_fusion(
    knowns: &[KnownParameter],
    design: &MultigridDesign,
) -> Result<Vec<KnownParameter>, MultigridError> {
    let mut expanded = Vec::with_capacity(knowns.len());
    let mut seen: HashSet<(Position, VariableType)> = HashSet::with_capacity(knowns.len());
    let mut nfused = 0;
    for known in knowns {
        let targets: &[Position] = match design.originals_of(&known.position) {
            Some(originals) => {
                nfused += 1;
                originals
            }
            None => std::slice::from_ref(&known.position),
        };
        for position in targets {
            if !seen.insert((*position, known.variable)) {
                return Err(MultigridError::DuplicateParameter(*position, known.variable));
            }
            expanded.push(KnownParameter::new(*position, known.variable, known.value));
        }
    }
    debug!(
        "Reverse fusion expanded {} fused of {} parameters into {}",
        nfused,
        knowns.len(),
        expanded.len()
    );
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DESIGN: &str = "\
# fused cell, then fine voxels
10.0 10.0 5000.0   9.0 9.0 5000.0   11.0 11.0 5000.0
20.0 20.0 5000.0  19.0 19.0 5000.0  21.0 21.0 5000.0  20.0 21.0 5000.0
";

    fn design() -> MultigridDesign {
        MultigridDesign::load_from(DESIGN.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_design() {
        let design = design();
        assert_eq!(design.len(), 2);
        assert_eq!(
            design
                .originals_of(&Position::new(20., 20., 5000.))
                .map(|o| o.len()),
            Some(3)
        );
        assert!(design.originals_of(&Position::new(9., 9., 5000.)).is_none());
    }

    #[test]
    fn test_reverse_fusion_expands_and_passes_through() {
        let design = design();
        let knowns = vec![
            KnownParameter::new(Position::new(10., 10., 5000.), VariableType::Vs, 0.5),
            KnownParameter::new(Position::new(0., 0., 5000.), VariableType::Vs, -0.2),
            KnownParameter::new(Position::new(10., 10., 5000.), VariableType::Rho, 0.1),
        ];
        let expanded = reverse_fusion(&knowns, &design).unwrap();
        assert_eq!(expanded.len(), 5);
        assert_eq!(
            expanded[0],
            KnownParameter::new(Position::new(9., 9., 5000.), VariableType::Vs, 0.5)
        );
        assert_eq!(
            expanded[1],
            KnownParameter::new(Position::new(11., 11., 5000.), VariableType::Vs, 0.5)
        );
        assert_eq!(expanded[2], knowns[1]);
        assert!(expanded[3..]
            .iter()
            .all(|k| k.variable == VariableType::Rho && k.value == 0.1));
    }

    #[test]
    fn test_overlapping_cells_rejected() {
        let overlapping = "\
0 0 100  1 1 100  2 2 100
5 5 100  2 2 100
";
        assert!(matches!(
            MultigridDesign::load_from(overlapping.as_bytes()),
            Err(MultigridError::InvalidDesign(_))
        ));
    }

    #[test]
    fn test_malformed_line_rejected() {
        assert!(matches!(
            MultigridDesign::load_from("0 0 100 1 1\n".as_bytes()),
            Err(MultigridError::InvalidDesign(_))
        ));
        assert!(matches!(
            MultigridDesign::load_from("0 0 100\n".as_bytes()),
            Err(MultigridError::InvalidDesign(_))
        ));
    }

    #[test]
    fn test_duplicate_after_expansion_rejected() {
        let design = design();
        let knowns = vec![
            KnownParameter::new(Position::new(10., 10., 5000.), VariableType::Vs, 0.5),
            KnownParameter::new(Position::new(9., 9., 5000.), VariableType::Vs, 0.3),
        ];
        assert!(matches!(
            reverse_fusion(&knowns, &design),
            Err(MultigridError::DuplicateParameter(_, VariableType::Vs))
        ));
    }

    proptest! {
        #[test]
        fn prop_fused_value_reaches_every_fine_voxel(
            cells in prop::collection::vec((1usize..5, -1.0f64..1.0), 1..10),
        ) {
            let design = MultigridDesign::new(
                cells
                    .iter()
                    .enumerate()
                    .map(|(i, (nfine, _))| FusedCell {
                        fused: Position::new(10. * i as f64, 0., 5000.),
                        originals: (0..*nfine)
                            .map(|j| Position::new(10. * i as f64 + 0.5 * (j + 1) as f64, 0., 5000.))
                            .collect(),
                    })
                    .collect(),
            )
            .unwrap();
            let knowns: Vec<KnownParameter> = design
                .cells()
                .iter()
                .zip(cells.iter())
                .map(|(cell, (_, value))| KnownParameter::new(cell.fused, VariableType::Vs, *value))
                .collect();
            let expanded = reverse_fusion(&knowns, &design).unwrap();
            let nfine: usize = cells.iter().map(|(n, _)| n).sum();
            prop_assert_eq!(expanded.len(), nfine);
            for (cell, known) in design.cells().iter().zip(knowns.iter()) {
                for original in &cell.originals {
                    let found = expanded.iter().find(|k| k.position == *original);
                    prop_assert_eq!(found.map(|k| k.value), Some(known.value));
                }
            }
        }
    }
}
