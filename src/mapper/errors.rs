// pertmap/src/mapper/errors.rs

use super::settings::MapSettingsBuilderError;
use crate::mapping::MapRegionError;
use crate::multigrid::MultigridError;
use crate::parameter::ParameterListError;
use crate::percent::PercentListError;
use crate::perturbation::PerturbationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    SettingsError(#[from] MapSettingsBuilderError),
    #[error(transparent)]
    ParameterListError(#[from] ParameterListError),
    #[error(transparent)]
    MultigridError(#[from] MultigridError),
    #[error(transparent)]
    PerturbationError(#[from] PerturbationError),
    #[error(transparent)]
    PercentListError(#[from] PercentListError),
    #[error(transparent)]
    MapRegionError(#[from] MapRegionError),
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
}
