use pretty_env_logger;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn _setup_pretty_env_logger_default() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

pub use batch::{BatchReport, InverseMethod, ModelSetMapper};
pub use mapper::{MapSettings, MapSettingsBuilder, MappedModel, MapperError, PerturbationMapper};
pub use parameter::KnownParameter;
pub use position::Position;
pub use variable::VariableType;

pub mod batch;
pub mod mapper;
pub mod mapping;
pub mod multigrid;
pub mod parameter;
pub mod percent;
pub mod perturbation;
pub mod position;
pub mod structure;
mod table;
pub mod variable;
