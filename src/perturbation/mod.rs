// pertmap/src/perturbation/mod.rs

mod builder;
mod errors;
mod model;

pub use builder::PerturbationModelBuilder;
pub use errors::PerturbationError;
pub use model::{PerturbationEntry, PerturbationModel};
