// pertmap/src/mapper/settings.rs

use crate::mapping::MapRegion;
use crate::structure::StructureSource;
use crate::variable::VariableType;
use derive_builder::Builder;
use std::path::{Path, PathBuf};

/// Options shared by the single-run and batch mappers.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct MapSettings {
    /// Folder in which outputs are created; relative input paths start here.
    #[builder(setter(into), default = "PathBuf::from(\".\")")]
    pub work_path: PathBuf,
    #[builder(setter(into, strip_option), default)]
    pub tag: Option<String>,
    /// Structure the inversion was carried out against.
    #[builder(default)]
    pub structure: StructureSource,
    /// Structure the percentages are expressed against, when it differs.
    #[builder(setter(strip_option), default)]
    pub reference_structure: Option<StructureSource>,
    #[builder(setter(into, strip_option), default)]
    pub multigrid_path: Option<PathBuf>,
    #[builder(default = "vec![VariableType::Vs]")]
    pub variable_types: Vec<VariableType>,
    #[builder(setter(strip_option), default)]
    pub map_region: Option<MapRegion>,
    /// Color scale bound of the maps, in percent.
    #[builder(default = "3.")]
    pub scale: f64,
    /// Grid spacing of the interpolated maps, in degrees.
    #[builder(default = "0.5")]
    pub grid_interval: f64,
}

impl MapSettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(scale) = self.scale {
            if !(scale > 0.) {
                return Err(format!("scale must be > 0, but got {}", scale));
            }
        }
        if let Some(grid_interval) = self.grid_interval {
            if !(grid_interval > 0.) {
                return Err(format!(
                    "grid_interval must be > 0, but got {}",
                    grid_interval
                ));
            }
        }
        if let Some(variable_types) = &self.variable_types {
            if variable_types.is_empty() {
                return Err("at least one variable type is needed".to_string());
            }
        }
        Ok(())
    }
}

impl MapSettings {
    /// Relative paths are taken relative to the work path.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_path.join(path)
        }
    }

    pub(crate) fn resolve_source(&self, source: &StructureSource) -> StructureSource {
        match source {
            StructureSource::File(path) => StructureSource::File(self.resolve_path(path)),
            named => named.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = MapSettingsBuilder::default().build().unwrap();
        assert_eq!(settings.work_path, PathBuf::from("."));
        assert_eq!(settings.tag, None);
        assert_eq!(settings.structure, StructureSource::Named("PREM".to_string()));
        assert_eq!(settings.reference_structure, None);
        assert_eq!(settings.variable_types, vec![VariableType::Vs]);
        assert_eq!(settings.scale, 3.);
        assert!(settings.map_region.is_none());
    }

    #[test]
    fn test_validation() {
        assert!(MapSettingsBuilder::default().scale(0.).build().is_err());
        assert!(MapSettingsBuilder::default().grid_interval(-1.).build().is_err());
        assert!(MapSettingsBuilder::default()
            .variable_types(vec![])
            .build()
            .is_err());
    }

    #[test]
    fn test_resolve_path() {
        let settings = MapSettingsBuilder::default()
            .work_path("/data/run")
            .build()
            .unwrap();
        assert_eq!(
            settings.resolve_path(Path::new("model.lst")),
            PathBuf::from("/data/run/model.lst")
        );
        assert_eq!(
            settings.resolve_path(Path::new("/abs/model.lst")),
            PathBuf::from("/abs/model.lst")
        );
    }
}
