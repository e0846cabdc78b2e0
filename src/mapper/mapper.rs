// pertmap/src/mapper/mapper.rs

use super::context::{create_output_folder, MappedModel, MappingContext};
use super::errors::MapperError;
use super::settings::MapSettings;
use crate::parameter::read_known_parameters;
use humantime::format_duration;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Maps one inverted model to percent lists and GMT scripts.
pub struct PerturbationMapper {
    model_path: PathBuf,
    settings: MapSettings,
}

impl PerturbationMapper {
    pub fn new(model_path: PathBuf, settings: MapSettings) -> Self {
        Self {
            model_path,
            settings,
        }
    }

    pub fn run(&self) -> Result<MappedModel, MapperError> {
        let start = Instant::now();
        let model_path = self.settings.resolve_path(&self.model_path);
        if !model_path.is_file() {
            return Err(MapperError::Configuration(format!(
                "model file {} does not exist",
                model_path.display()
            )));
        }
        let context = MappingContext::prepare(&self.settings)?;
        let knowns = read_known_parameters(&model_path)?;
        if knowns.is_empty() {
            return Err(MapperError::Configuration(format!(
                "model file {} holds no known parameters",
                model_path.display()
            )));
        }
        info!(
            "Read {} known parameters from {}",
            knowns.len(),
            model_path.display()
        );

        let output_folder = create_output_folder(
            &self.settings.work_path,
            "perturbation",
            self.settings.tag.as_deref(),
        )?;
        let mapped = context.map_model(&knowns, &output_folder)?;
        info!(
            "Perturbation mapping finished in {}",
            format_duration(start.elapsed())
        );
        Ok(mapped)
    }
}
