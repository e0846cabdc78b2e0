// pertmap/src/mapper/context.rs

use super::errors::MapperError;
use super::settings::MapSettings;
use crate::mapping::{decide_map_region, MapRegion, PerturbationMapShellscript};
use crate::multigrid::{reverse_fusion, MultigridDesign, MultigridError};
use crate::parameter::KnownParameter;
use crate::percent::{percent_list_file_name, write_percent_for_type};
use crate::perturbation::PerturbationModelBuilder;
use crate::structure::{ReferenceStructure, StructureSource};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Outcome of mapping one model into one folder.
#[derive(Clone, Debug)]
pub struct MappedModel {
    pub output_folder: PathBuf,
    pub radii: Vec<f64>,
    pub region: MapRegion,
    pub nentries: usize,
    pub percent_files: Vec<PathBuf>,
}

/// Inputs resolved once per run and shared by every model mapped in it.
pub(crate) struct MappingContext {
    settings: MapSettings,
    structure: Arc<ReferenceStructure>,
    reference: Option<Arc<ReferenceStructure>>,
    design: Option<MultigridDesign>,
}

fn resolve_structure(source: &StructureSource) -> Result<Arc<ReferenceStructure>, MapperError> {
    source.resolve().map(Arc::new).map_err(|e| {
        MapperError::Configuration(format!("could not resolve structure {}: {}", source, e))
    })
}

impl MappingContext {
    pub(crate) fn prepare(settings: &MapSettings) -> Result<Self, MapperError> {
        if !settings.work_path.is_dir() {
            return Err(MapperError::Configuration(format!(
                "work path {} is not a directory",
                settings.work_path.display()
            )));
        }
        let structure = resolve_structure(&settings.resolve_source(&settings.structure))?;
        let reference = settings
            .reference_structure
            .as_ref()
            .map(|source| resolve_structure(&settings.resolve_source(source)))
            .transpose()?;
        let design = match &settings.multigrid_path {
            Some(path) => {
                let path = settings.resolve_path(path);
                if path.is_file() {
                    Some(MultigridDesign::load(&path).map_err(|e| match e {
                        MultigridError::InvalidDesign(msg) => MapperError::Configuration(
                            format!("multigrid design {}: {}", path.display(), msg),
                        ),
                        other => other.into(),
                    })?)
                } else {
                    warn!(
                        "Multigrid design {} not found; mapping without reverse fusion",
                        path.display()
                    );
                    None
                }
            }
            None => None,
        };
        Ok(Self {
            settings: settings.clone(),
            structure,
            reference,
            design,
        })
    }

    pub(crate) fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Reverse fusion, perturbation model, optional rebase, percent lists
    /// and scripts for one set of known parameters.
    pub(crate) fn map_model(
        &self,
        knowns: &[KnownParameter],
        output_folder: &Path,
    ) -> Result<MappedModel, MapperError> {
        let expanded;
        let knowns = match &self.design {
            Some(design) => {
                expanded = reverse_fusion(knowns, design)?;
                expanded.as_slice()
            }
            None => knowns,
        };
        let mut model = PerturbationModelBuilder::default()
            .knowns(knowns)
            .structure(self.structure.clone())
            .build()?;
        if let Some(reference) = &self.reference {
            model = model.rebase(reference.clone())?;
        }

        let radii = model.radii();
        let region = match self.settings.map_region {
            Some(region) => region,
            None => {
                let region = decide_map_region(&model.positions())?;
                debug!("Decided map region {}", region);
                region
            }
        };

        let mut percent_files = Vec::with_capacity(self.settings.variable_types.len());
        for &variable in &self.settings.variable_types {
            let path = output_folder.join(percent_list_file_name(variable));
            let nlines = write_percent_for_type(variable, &model, &path)?;
            if nlines == 0 {
                warn!("No {} entries in the model; {} is empty", variable, path.display());
            }
            PerturbationMapShellscript::new(
                variable,
                &radii,
                region,
                self.settings.scale,
                self.settings.grid_interval,
            )
            .write(output_folder)?;
            percent_files.push(path);
        }
        info!(
            "Mapped {} entries on {} shells into {}",
            model.len(),
            radii.len(),
            output_folder.display()
        );
        Ok(MappedModel {
            output_folder: output_folder.to_path_buf(),
            radii,
            region,
            nentries: model.len(),
            percent_files,
        })
    }
}

/// Creates `{prefix}[_{tag}]_{yyyymmddHHMMSS}` under `work_path`; an existing
/// folder of that name is an error.
pub fn create_output_folder(
    work_path: &Path,
    prefix: &str,
    tag: Option<&str>,
) -> std::io::Result<PathBuf> {
    let stamp: String = humantime::format_rfc3339_seconds(SystemTime::now())
        .to_string()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    let name = match tag {
        Some(tag) => format!("{}_{}_{}", prefix, tag, stamp),
        None => format!("{}_{}", prefix, stamp),
    };
    let folder = work_path.join(name);
    fs::create_dir(&folder)?;
    info!("Created output folder {}", folder.display());
    Ok(folder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_folder_name() {
        let dir = tempfile::tempdir().unwrap();
        let folder = create_output_folder(dir.path(), "perturbation", Some("run1")).unwrap();
        let name = folder.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("perturbation_run1_"));
        assert_eq!(name.len(), "perturbation_run1_".len() + 14);
        assert!(folder.is_dir());
    }

    #[test]
    fn test_output_folder_needs_parent() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(create_output_folder(&missing, "perturbation", None).is_err());
    }
}
