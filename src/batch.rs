// pertmap/src/batch.rs

use crate::mapper::{create_output_folder, MappedModel, MapperError, MapSettings, MappingContext};
use crate::mapping::write_all_map_shellscript;
use crate::parameter::read_known_parameters;
use humantime::format_duration;
use log::{info, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;

/// Solvers whose results may be found under a result folder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InverseMethod {
    /// Conjugate gradient
    CG,
    /// Singular value decomposition
    SVD,
    /// Least squares
    LS,
    /// Non-negative least squares
    NNLS,
    /// Biconjugate gradient stabilized
    BCGS,
    /// Fast conjugate gradient
    FCG,
    /// Fast conjugate gradient, damped
    FCGD,
    /// Non-linear conjugate gradient
    NCG,
    /// Constrained conjugate gradient
    CCG,
}

impl InverseMethod {
    pub const ALL: [InverseMethod; 9] = [
        InverseMethod::CG,
        InverseMethod::SVD,
        InverseMethod::LS,
        InverseMethod::NNLS,
        InverseMethod::BCGS,
        InverseMethod::FCG,
        InverseMethod::FCGD,
        InverseMethod::NCG,
        InverseMethod::CCG,
    ];

    pub fn simple_name(&self) -> &'static str {
        match self {
            InverseMethod::CG => "CG",
            InverseMethod::SVD => "SVD",
            InverseMethod::LS => "LS",
            InverseMethod::NNLS => "NNLS",
            InverseMethod::BCGS => "BCGS",
            InverseMethod::FCG => "FCG",
            InverseMethod::FCGD => "FCGD",
            InverseMethod::NCG => "NCG",
            InverseMethod::CCG => "CCG",
        }
    }
}

impl fmt::Display for InverseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown inverse method: {0}")]
pub struct UnknownInverseMethod(pub String);

impl FromStr for InverseMethod {
    type Err = UnknownInverseMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InverseMethod::ALL
            .iter()
            .find(|m| m.simple_name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| UnknownInverseMethod(s.to_string()))
    }
}

/// What a batch run produced and what it had to skip.
#[derive(Clone, Debug)]
pub struct BatchReport {
    pub output_folder: PathBuf,
    /// Subfolder names, `{method}{k}`, in method then index order.
    pub produced: Vec<String>,
    pub skipped_methods: Vec<InverseMethod>,
    pub missing_results: Vec<PathBuf>,
    pub all_map_scripts: Vec<PathBuf>,
}

struct BatchTask {
    name: String,
    result_path: PathBuf,
}

/// Maps every `{method}{k}` solution found under a result folder.
pub struct ModelSetMapper {
    result_path: PathBuf,
    inverse_methods: Vec<InverseMethod>,
    max_num: usize,
    settings: MapSettings,
}

impl ModelSetMapper {
    /// A method listed more than once is mapped once, at its first place.
    pub fn new(
        result_path: PathBuf,
        inverse_methods: Vec<InverseMethod>,
        max_num: usize,
        settings: MapSettings,
    ) -> Self {
        let mut seen = HashSet::new();
        let inverse_methods: Vec<InverseMethod> = inverse_methods
            .into_iter()
            .filter(|method| seen.insert(*method))
            .collect();
        Self {
            result_path,
            inverse_methods,
            max_num,
            settings,
        }
    }

    fn collect_tasks(
        &self,
        result_path: &Path,
        skipped_methods: &mut Vec<InverseMethod>,
        missing_results: &mut Vec<PathBuf>,
    ) -> Vec<BatchTask> {
        let mut tasks = Vec::new();
        for method in &self.inverse_methods {
            let method_folder = result_path.join(method.simple_name());
            if !method_folder.is_dir() {
                warn!(
                    "Results for {} not found in {}; skipping",
                    method,
                    method_folder.display()
                );
                skipped_methods.push(*method);
                continue;
            }
            for k in 1..=self.max_num {
                let name = format!("{}{}", method.simple_name(), k);
                let path = method_folder.join(format!("{}.lst", name));
                if path.is_file() {
                    tasks.push(BatchTask {
                        name,
                        result_path: path,
                    });
                } else {
                    warn!("{} not found; skipping", path.display());
                    missing_results.push(path);
                }
            }
        }
        tasks
    }

    pub fn run(&self) -> Result<BatchReport, MapperError> {
        let start = Instant::now();
        let result_path = self.settings.resolve_path(&self.result_path);
        if !result_path.is_dir() {
            return Err(MapperError::Configuration(format!(
                "result folder {} does not exist",
                result_path.display()
            )));
        }
        if self.max_num == 0 {
            return Err(MapperError::Configuration(
                "max_num must be at least 1".to_string(),
            ));
        }
        let context = MappingContext::prepare(&self.settings)?;

        let mut skipped_methods = Vec::new();
        let mut missing_results = Vec::new();
        let tasks = self.collect_tasks(&result_path, &mut skipped_methods, &mut missing_results);
        info!(
            "Mapping {} solutions from {} methods",
            tasks.len(),
            self.inverse_methods.len() - skipped_methods.len()
        );

        let output_folder = create_output_folder(
            &context.settings().work_path,
            "modelSet",
            context.settings().tag.as_deref(),
        )?;
        let mapped = tasks
            .par_iter()
            .map(|task| -> Result<MappedModel, MapperError> {
                let knowns = read_known_parameters(&task.result_path)?;
                if knowns.is_empty() {
                    return Err(MapperError::Configuration(format!(
                        "result file {} holds no known parameters",
                        task.result_path.display()
                    )));
                }
                let folder = output_folder.join(&task.name);
                fs::create_dir(&folder)?;
                context.map_model(&knowns, &folder)
            })
            .collect::<Result<Vec<_>, MapperError>>()?;

        let produced: Vec<String> = tasks.into_iter().map(|task| task.name).collect();
        let mut all_map_scripts = Vec::with_capacity(context.settings().variable_types.len());
        for &variable in &context.settings().variable_types {
            all_map_scripts.push(write_all_map_shellscript(
                variable,
                &produced,
                &output_folder,
            )?);
        }
        info!(
            "Mapped {} solutions into {} in {}",
            mapped.len(),
            output_folder.display(),
            format_duration(start.elapsed())
        );
        Ok(BatchReport {
            output_folder,
            produced,
            skipped_methods,
            missing_results,
            all_map_scripts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inverse_method() {
        assert_eq!("cg".parse::<InverseMethod>().unwrap(), InverseMethod::CG);
        assert_eq!("SVD".parse::<InverseMethod>().unwrap(), InverseMethod::SVD);
        assert!("QR".parse::<InverseMethod>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(InverseMethod::NNLS.to_string(), "NNLS");
    }

    #[test]
    fn test_repeated_methods_mapped_once() {
        let settings = crate::MapSettingsBuilder::default().build().unwrap();
        let mapper = ModelSetMapper::new(
            PathBuf::from("results"),
            vec![InverseMethod::SVD, InverseMethod::CG, InverseMethod::SVD],
            1,
            settings,
        );
        assert_eq!(mapper.inverse_methods, vec![InverseMethod::SVD, InverseMethod::CG]);
    }
}
