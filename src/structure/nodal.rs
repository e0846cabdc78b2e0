// pertmap/src/structure/nodal.rs

use super::errors::StructureError;
use super::traits::{ElasticSample, Structure};
use crate::table::{line_of, parse_f64, table_reader, tokens};
use log::debug;
use ndarray::{Array1, Array2, Axis};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Structure given as a table of nodes, linearly interpolated in radius.
///
/// Each row holds `radius rho vpv vph vsv vsh eta qmu qkappa`. Radii must be
/// non-decreasing; a radius listed twice marks a discontinuity, and a value
/// looked up exactly there is taken from the layer above.
#[derive(Clone, Debug, PartialEq)]
pub struct NodalStructure {
    name: String,
    radii: Array1<f64>,
    values: Array2<f64>,
}

impl NodalStructure {
    pub fn new(name: &str, radii: Array1<f64>, values: Array2<f64>) -> Result<Self, StructureError> {
        if radii.len() < 2 {
            return Err(StructureError::InvalidNodes(format!(
                "at least 2 nodes are needed, got {}",
                radii.len()
            )));
        }
        if values.nrows() != radii.len() || values.ncols() != ElasticSample::NUM_FIELDS {
            return Err(StructureError::InvalidNodes(format!(
                "value table has shape {:?}, expected ({}, {})",
                values.shape(),
                radii.len(),
                ElasticSample::NUM_FIELDS
            )));
        }
        if !radii.iter().zip(radii.iter().skip(1)).all(|(a, b)| a <= b) {
            return Err(StructureError::InvalidNodes(
                "radii must be non-decreasing".to_string(),
            ));
        }
        if radii[0] == radii[radii.len() - 1] {
            return Err(StructureError::InvalidNodes(
                "structure covers an empty radius range".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            radii,
            values,
        })
    }

    pub fn try_from_file(path: &Path) -> Result<Self, StructureError> {
        let file = File::open(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::try_from_reader(&name, file)
    }

    pub fn try_from_reader<R: Read>(name: &str, rdr: R) -> Result<Self, StructureError> {
        let mut reader = table_reader(rdr);
        let mut radii = Vec::new();
        let mut values = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = line_of(&record);
            let row = tokens(&record);
            if row.is_empty() {
                continue;
            }
            if row.len() != ElasticSample::NUM_FIELDS + 1 {
                return Err(StructureError::Parse(format!(
                    "line {}: expected {} columns, found {}",
                    line,
                    ElasticSample::NUM_FIELDS + 1,
                    row.len()
                )));
            }
            let parsed = row
                .iter()
                .map(|token| parse_f64(token, line))
                .collect::<Result<Vec<f64>, String>>()
                .map_err(StructureError::Parse)?;
            radii.push(parsed[0]);
            values.extend_from_slice(&parsed[1..]);
        }
        let nnodes = radii.len();
        let values = Array2::from_shape_vec((nnodes, ElasticSample::NUM_FIELDS), values)
            .map_err(|e| StructureError::InvalidNodes(e.to_string()))?;
        debug!("Loaded nodal structure {} with {} nodes", name, nnodes);
        Self::new(name, Array1::from_vec(radii), values)
    }

    /// Same nodes and values, whatever the names.
    pub fn same_profile(&self, other: &Self) -> bool {
        self.radii == other.radii && self.values == other.values
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nnodes(&self) -> usize {
        self.radii.len()
    }

    /// Index of the first node of the segment containing `radius`.
    fn segment_of(&self, radius: f64) -> Option<usize> {
        let mut segment = None;
        for i in 0..self.radii.len() - 1 {
            let (r0, r1) = (self.radii[i], self.radii[i + 1]);
            if r0 > radius {
                break;
            }
            if r0 < r1 && radius <= r1 {
                segment = Some(i);
            }
        }
        segment
    }
}

impl Structure for NodalStructure {
    fn radius_range(&self) -> (f64, f64) {
        (self.radii[0], self.radii[self.radii.len() - 1])
    }

    fn elastic_at(&self, radius: f64) -> Result<ElasticSample, StructureError> {
        self.check_radius(radius)?;
        let (min, max) = self.radius_range();
        let i = self
            .segment_of(radius)
            .ok_or(StructureError::OutOfRange { radius, min, max })?;
        let (r0, r1) = (self.radii[i], self.radii[i + 1]);
        let t = (radius - r0) / (r1 - r0);
        let lower = self.values.index_axis(Axis(0), i);
        let upper = self.values.index_axis(Axis(0), i + 1);
        let interpolated = &lower * (1. - t) + &upper * t;
        Ok(ElasticSample::from_slice(&interpolated.to_vec()))
    }
}
