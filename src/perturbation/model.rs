// pertmap/src/perturbation/model.rs

use super::errors::PerturbationError;
use crate::position::{distinct_radii, Position};
use crate::structure::{ReferenceStructure, Structure};
use crate::variable::VariableType;
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// One voxel and variable of a perturbation model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerturbationEntry {
    pub position: Position,
    pub variable: VariableType,
    /// Deviation from the reference, in the unit of the variable.
    pub absolute: f64,
    /// Reference value at the radius of the position.
    pub reference: f64,
    pub percent: f64,
}

pub(crate) fn percent_of(
    position: Position,
    variable: VariableType,
    absolute: f64,
    reference: f64,
) -> Result<f64, PerturbationError> {
    if reference == 0. {
        return Err(PerturbationError::ZeroReference(position, variable));
    }
    Ok(absolute / reference * 100.)
}

/// Perturbations of a model against one reference structure, kept in the
/// order they were inserted.
#[derive(Clone, Debug)]
pub struct PerturbationModel {
    entries: Vec<PerturbationEntry>,
    index: HashMap<(Position, VariableType), usize>,
    structure: Arc<ReferenceStructure>,
}

impl PerturbationModel {
    pub(crate) fn new(
        entries: Vec<PerturbationEntry>,
        structure: Arc<ReferenceStructure>,
    ) -> Result<Self, PerturbationError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert((entry.position, entry.variable), i).is_some() {
                return Err(PerturbationError::DuplicateParameter(
                    entry.position,
                    entry.variable,
                ));
            }
        }
        Ok(Self {
            entries,
            index,
            structure,
        })
    }

    pub fn structure(&self) -> &ReferenceStructure {
        &self.structure
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PerturbationEntry] {
        &self.entries
    }

    pub fn get(&self, position: &Position, variable: VariableType) -> Option<&PerturbationEntry> {
        self.index
            .get(&(*position, variable))
            .map(|&i| &self.entries[i])
    }

    /// Entries of one variable, in model order.
    pub fn entries_for(
        &self,
        variable: VariableType,
    ) -> impl Iterator<Item = &PerturbationEntry> + '_ {
        self.entries.iter().filter(move |e| e.variable == variable)
    }

    pub fn variables(&self) -> BTreeSet<VariableType> {
        self.entries.iter().map(|e| e.variable).collect()
    }

    pub fn positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for entry in &self.entries {
            if seen.insert(entry.position) {
                positions.push(entry.position);
            }
        }
        positions
    }

    /// Distinct radii of the model, ascending; these define the map shells.
    pub fn radii(&self) -> Vec<f64> {
        distinct_radii(self.entries.iter().map(|e| &e.position))
    }

    /// Re-expresses the model as percentages of another reference structure,
    /// keeping the total value `reference + absolute` of every entry.
    ///
    /// A structure with the same profile returns the model untouched, under
    /// its original name.
    pub fn rebase(self, structure: Arc<ReferenceStructure>) -> Result<Self, PerturbationError> {
        if self.structure.same_profile(&structure) {
            debug!(
                "Rebase onto {} skipped: same reference structure",
                structure.name()
            );
            return Ok(self);
        }
        info!(
            "Rebasing {} entries from {} onto {}",
            self.entries.len(),
            self.structure.name(),
            structure.name()
        );
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                let reference = structure.value_at(entry.variable, entry.position.radius())?;
                let absolute = entry.absolute + (entry.reference - reference);
                let percent = percent_of(entry.position, entry.variable, absolute, reference)?;
                Ok(PerturbationEntry {
                    position: entry.position,
                    variable: entry.variable,
                    absolute,
                    reference,
                    percent,
                })
            })
            .collect::<Result<Vec<_>, PerturbationError>>()?;
        Ok(Self {
            entries,
            index: self.index,
            structure,
        })
    }
}
