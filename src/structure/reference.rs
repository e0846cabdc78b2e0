// pertmap/src/structure/reference.rs

use super::errors::StructureError;
use super::nodal::NodalStructure;
use super::polynomial::PolynomialStructure;
use super::traits::{ElasticSample, Structure};
use log::info;
use std::fmt;
use std::path::PathBuf;

/// A reference structure after resolution, whatever its origin.
#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceStructure {
    Polynomial(PolynomialStructure),
    Nodal(NodalStructure),
}

impl ReferenceStructure {
    pub fn name(&self) -> &str {
        match self {
            ReferenceStructure::Polynomial(s) => s.name(),
            ReferenceStructure::Nodal(s) => s.name(),
        }
    }

    /// Structural equality of the profiles; names are not compared.
    pub fn same_profile(&self, other: &ReferenceStructure) -> bool {
        match (self, other) {
            (ReferenceStructure::Polynomial(a), ReferenceStructure::Polynomial(b)) => {
                a.same_profile(b)
            }
            (ReferenceStructure::Nodal(a), ReferenceStructure::Nodal(b)) => a.same_profile(b),
            _ => false,
        }
    }
}

impl Structure for ReferenceStructure {
    fn radius_range(&self) -> (f64, f64) {
        match self {
            ReferenceStructure::Polynomial(s) => s.radius_range(),
            ReferenceStructure::Nodal(s) => s.radius_range(),
        }
    }

    fn elastic_at(&self, radius: f64) -> Result<ElasticSample, StructureError> {
        match self {
            ReferenceStructure::Polynomial(s) => s.elastic_at(radius),
            ReferenceStructure::Nodal(s) => s.elastic_at(radius),
        }
    }
}

impl fmt::Display for ReferenceStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = self.radius_range();
        write!(f, "{} [{} km, {} km]", self.name(), min, max)
    }
}

/// Where a reference structure comes from: a built-in name or a file.
#[derive(Clone, Debug, PartialEq)]
pub enum StructureSource {
    Named(String),
    File(PathBuf),
}

impl Default for StructureSource {
    fn default() -> Self {
        StructureSource::Named("PREM".to_string())
    }
}

impl StructureSource {
    /// A file path wins over a name; with neither, the default name is used.
    pub fn from_options(path: Option<PathBuf>, name: Option<String>) -> Self {
        match (path, name) {
            (Some(path), _) => StructureSource::File(path),
            (None, Some(name)) => StructureSource::Named(name),
            (None, None) => StructureSource::default(),
        }
    }

    pub fn resolve(&self) -> Result<ReferenceStructure, StructureError> {
        let structure = match self {
            StructureSource::Named(name) => PolynomialStructure::named(name)
                .map(ReferenceStructure::Polynomial)
                .ok_or_else(|| StructureError::UnknownName(name.clone()))?,
            StructureSource::File(path) => {
                ReferenceStructure::Nodal(NodalStructure::try_from_file(path)?)
            }
        };
        info!("Resolved reference structure {}", structure);
        Ok(structure)
    }
}

impl fmt::Display for StructureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureSource::Named(name) => write!(f, "{}", name),
            StructureSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VariableType;
    use std::io::Write;

    #[test]
    fn test_resolve_named() {
        let prem = StructureSource::default().resolve().unwrap();
        assert_eq!(prem.name(), "PREM");
        assert_eq!(prem.radius_range(), (0., 6371.));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let source = StructureSource::Named("NOPE".to_string());
        assert!(matches!(source.resolve(), Err(StructureError::UnknownName(_))));
    }

    #[test]
    fn test_resolve_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "3480 5.5 13.7 13.7 7.2 7.2 1 312 57823").unwrap();
        writeln!(file, "6371 2.6 8.0 8.0 4.5 4.5 1 600 57823").unwrap();
        let source = StructureSource::from_options(
            Some(file.path().to_path_buf()),
            Some("PREM".to_string()),
        );
        let structure = source.resolve().unwrap();
        assert!(matches!(structure, ReferenceStructure::Nodal(_)));
        assert!((structure.value_at(VariableType::Rho, 6371.).unwrap() - 2.6).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = StructureSource::File(PathBuf::from("/nonexistent/structure.txt"));
        assert!(matches!(source.resolve(), Err(StructureError::Io(_))));
    }

    #[test]
    fn test_same_profile_ignores_names() {
        let nodes = "3480 5.5 13.7 13.7 7.2 7.2 1 312 57823\n6371 2.6 8.0 8.0 4.5 4.5 1 600 57823\n";
        let a = ReferenceStructure::Nodal(NodalStructure::try_from_reader("a", nodes.as_bytes()).unwrap());
        let b = ReferenceStructure::Nodal(NodalStructure::try_from_reader("b", nodes.as_bytes()).unwrap());
        assert_ne!(a, b);
        assert!(a.same_profile(&b));

        let prem = StructureSource::Named("PREM".to_string()).resolve().unwrap();
        let iprem = StructureSource::Named("IPREM".to_string()).resolve().unwrap();
        assert!(prem.same_profile(&prem.clone()));
        assert!(!prem.same_profile(&iprem));
        assert!(!prem.same_profile(&a));
    }
}
