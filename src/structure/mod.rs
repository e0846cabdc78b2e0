// pertmap/src/structure/mod.rs

mod errors;
mod nodal;
mod polynomial;
mod reference;
mod traits;

pub use errors::StructureError;
pub use nodal::NodalStructure;
pub use polynomial::{PolynomialStructure, Zone, EARTH_RADIUS};
pub use reference::{ReferenceStructure, StructureSource};
pub use traits::{ElasticSample, Structure};
