// pertmap/src/mapper/mod.rs

mod context;
mod errors;
mod mapper;
mod settings;

pub(crate) use context::MappingContext;
pub use context::{create_output_folder, MappedModel};
pub use errors::MapperError;
pub use mapper::PerturbationMapper;
pub use settings::{MapSettings, MapSettingsBuilder, MapSettingsBuilderError};
