// pertmap/src/perturbation/builder.rs

use super::errors::PerturbationError;
use super::model::{percent_of, PerturbationEntry, PerturbationModel};
use crate::parameter::KnownParameter;
use crate::structure::{ReferenceStructure, Structure};
use humantime::format_duration;
use log::{debug, info, trace};
use std::sync::Arc;
use std::time::Instant;

#[derive(Default)]
pub struct PerturbationModelBuilder<'a> {
    knowns: Option<&'a [KnownParameter]>,
    structure: Option<Arc<ReferenceStructure>>,
}

impl<'a> PerturbationModelBuilder<'a> {
    pub fn build(&self) -> Result<PerturbationModel, PerturbationError> {
        let start = Instant::now();
        let knowns = self
            .knowns
            .ok_or_else(|| PerturbationError::UninitializedFieldError("knowns".to_string()))?;
        let structure = self
            .structure
            .clone()
            .ok_or_else(|| PerturbationError::UninitializedFieldError("structure".to_string()))?;
        info!(
            "Building perturbation model of {} parameters against {}",
            knowns.len(),
            structure.name()
        );
        let entries = knowns
            .iter()
            .map(|known| {
                let radius = known.position.radius();
                let reference = structure.value_at(known.variable, radius)?;
                let percent = percent_of(known.position, known.variable, known.value, reference)?;
                trace!(
                    "{} {} reference={} absolute={} percent={}",
                    known.variable,
                    known.position,
                    reference,
                    known.value,
                    percent
                );
                Ok(PerturbationEntry {
                    position: known.position,
                    variable: known.variable,
                    absolute: known.value,
                    reference,
                    percent,
                })
            })
            .collect::<Result<Vec<_>, PerturbationError>>()?;
        let model = PerturbationModel::new(entries, structure)?;
        debug!(
            "Perturbation model built in {}",
            format_duration(start.elapsed())
        );
        Ok(model)
    }

    pub fn knowns(&mut self, knowns: &'a [KnownParameter]) -> &mut Self {
        self.knowns = Some(knowns);
        self
    }

    pub fn structure(&mut self, structure: Arc<ReferenceStructure>) -> &mut Self {
        self.structure = Some(structure);
        self
    }
}
