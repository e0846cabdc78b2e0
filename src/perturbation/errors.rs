// pertmap/src/perturbation/errors.rs

use crate::position::Position;
use crate::structure::StructureError;
use crate::variable::VariableType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerturbationError {
    #[error("Unitialized field on PerturbationModelBuilder: {0}")]
    UninitializedFieldError(String),
    #[error(transparent)]
    StructureError(#[from] StructureError),
    #[error("Reference {1} is zero at {0}; cannot express a percentage")]
    ZeroReference(Position, VariableType),
    #[error("Parameter {1} at {0} is given more than once")]
    DuplicateParameter(Position, VariableType),
}
