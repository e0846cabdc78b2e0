// pertmap/src/mapping/region.rs

use crate::position::Position;
use ndarray::Array1;
use ndarray_stats::errors::MinMaxError;
use ndarray_stats::QuantileExt;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Smallest margin, in degrees, added around the points.
pub const MIN_MAP_MARGIN: f64 = 1.;
/// Margin as a fraction of the spread of the points.
pub const MAP_MARGIN_RATIO: f64 = 0.1;

/// Map bounds in degrees, written the GMT `-R` way: `lonMin/lonMax/latMin/latMax`.
///
/// Longitudes may follow either the [-180, 180] or the [0, 360] convention;
/// a region spans at most 360 degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapRegion {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

#[derive(Error, Debug)]
pub enum MapRegionError {
    #[error("Cannot decide a map region without positions")]
    EmptyPositions,
    #[error(transparent)]
    MinMaxError(#[from] MinMaxError),
    #[error("Map region must look like lonMin/lonMax/latMin/latMax, got '{0}'")]
    InvalidFormat(String),
    #[error("Map region {0} is empty or outside longitude [-180, 360], latitude [-90, 90]")]
    OutOfBounds(String),
    #[error("Position {0} is outside longitude [-180, 360], latitude [-90, 90]")]
    PositionOutOfBounds(Position),
}

impl MapRegion {
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Result<Self, MapRegionError> {
        let region = Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        };
        let legal = -180. <= lon_min
            && lon_min < lon_max
            && lon_max <= 360.
            && lon_max - lon_min <= 360.
            && -90. <= lat_min
            && lat_min < lat_max
            && lat_max <= 90.;
        if !legal {
            return Err(MapRegionError::OutOfBounds(region.to_string()));
        }
        Ok(region)
    }

    pub fn center_longitude(&self) -> f64 {
        (self.lon_min + self.lon_max) / 2.
    }

    /// Longitudes are compared modulo 360.
    pub fn contains(&self, position: &Position) -> bool {
        let lon = position.longitude();
        [lon - 360., lon, lon + 360.]
            .iter()
            .any(|l| (self.lon_min..=self.lon_max).contains(l))
            && (self.lat_min..=self.lat_max).contains(&position.latitude())
    }
}

impl fmt::Display for MapRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.lon_min, self.lon_max, self.lat_min, self.lat_max
        )
    }
}

impl FromStr for MapRegion {
    type Err = MapRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bounds = s
            .trim()
            .split('/')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| MapRegionError::InvalidFormat(s.to_string()))?;
        if bounds.len() != 4 {
            return Err(MapRegionError::InvalidFormat(s.to_string()));
        }
        MapRegion::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }
}

fn padded(min: f64, max: f64, legal_min: f64, legal_max: f64) -> (f64, f64) {
    let margin = ((max - min) * MAP_MARGIN_RATIO).max(MIN_MAP_MARGIN);
    let lower = (min - margin).floor().max(legal_min);
    let upper = (max + margin).ceil().min(legal_max);
    (lower, upper)
}

/// Bounds enclosing every position with a margin of
/// `max(MIN_MAP_MARGIN, MAP_MARGIN_RATIO * spread)` degrees per axis,
/// rounded outward to whole degrees and clamped to the legal ranges.
///
/// Longitudes stay in [-180, 180] unless one exceeds 180; then the region is
/// taken in [0, 360], with negative longitudes shifted by 360.
pub fn decide_map_region(positions: &[Position]) -> Result<MapRegion, MapRegionError> {
    if positions.is_empty() {
        return Err(MapRegionError::EmptyPositions);
    }
    if let Some(position) = positions.iter().find(|p| {
        !(-180. ..=360.).contains(&p.longitude()) || !(-90. ..=90.).contains(&p.latitude())
    }) {
        return Err(MapRegionError::PositionOutOfBounds(*position));
    }
    let eastern = positions.iter().any(|p| p.longitude() > 180.);
    let (legal_lon_min, legal_lon_max) = if eastern { (0., 360.) } else { (-180., 180.) };
    let longitudes: Array1<f64> = positions
        .iter()
        .map(|p| match p.longitude() {
            lon if eastern && lon < 0. => lon + 360.,
            lon => lon,
        })
        .collect();
    let latitudes: Array1<f64> = positions.iter().map(|p| p.latitude()).collect();
    let (lon_min, lon_max) = padded(
        *longitudes.min()?,
        *longitudes.max()?,
        legal_lon_min,
        legal_lon_max,
    );
    let (lat_min, lat_max) = padded(*latitudes.min()?, *latitudes.max()?, -90., 90.);
    MapRegion::new(lon_min, lon_max, lat_min, lat_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_encloses_points() {
        let positions: Vec<Position> = [(30., 10.), (40., 20.), (35., 15.)]
            .iter()
            .map(|&(lat, lon)| Position::new(lat, lon, 6371.))
            .collect();
        let region = decide_map_region(&positions).unwrap();
        assert!(region.lon_min <= 10. && region.lon_max >= 20.);
        assert!(region.lat_min <= 30. && region.lat_max >= 40.);
        assert!(region.lon_min >= -180. && region.lon_max <= 180.);
        assert!(region.lat_min >= -90. && region.lat_max <= 90.);
        assert_eq!(region, MapRegion::new(9., 21., 29., 41.).unwrap());
        assert!(positions.iter().all(|p| region.contains(p)));
    }

    #[test]
    fn test_region_is_clamped() {
        let positions = vec![
            Position::new(-89.5, -179.5, 6000.),
            Position::new(89.5, 179.5, 6000.),
        ];
        let region = decide_map_region(&positions).unwrap();
        assert_eq!(region, MapRegion::new(-180., 180., -90., 90.).unwrap());
    }

    #[test]
    fn test_single_point_gets_minimum_margin() {
        let region = decide_map_region(&[Position::new(0.5, 0.5, 6000.)]).unwrap();
        assert_eq!(region.to_string(), "-1/2/-1/2");
    }

    #[test]
    fn test_eastern_longitudes_keep_their_convention() {
        let positions = vec![Position::new(10., 200., 6000.), Position::new(12., 210., 6000.)];
        let region = decide_map_region(&positions).unwrap();
        assert_eq!(region, MapRegion::new(199., 211., 9., 13.).unwrap());
        assert!(region.lon_min < region.lon_max);
        assert!(positions.iter().all(|p| region.contains(p)));
    }

    #[test]
    fn test_mixed_conventions_across_the_dateline() {
        let positions = vec![Position::new(0., -175., 6000.), Position::new(0., 190., 6000.)];
        let region = decide_map_region(&positions).unwrap();
        assert_eq!(region, MapRegion::new(184., 191., -1., 1.).unwrap());
        assert!(positions.iter().all(|p| region.contains(p)));
    }

    #[test]
    fn test_illegal_position_rejected() {
        assert!(matches!(
            decide_map_region(&[Position::new(0., 400., 6000.)]),
            Err(MapRegionError::PositionOutOfBounds(_))
        ));
        assert!(matches!(
            decide_map_region(&[Position::new(95., 0., 6000.)]),
            Err(MapRegionError::PositionOutOfBounds(_))
        ));
    }

    #[test]
    fn test_empty_positions() {
        assert!(matches!(
            decide_map_region(&[]),
            Err(MapRegionError::EmptyPositions)
        ));
    }

    #[test]
    fn test_parse_region() {
        let region: MapRegion = "120/150/20/50".parse().unwrap();
        assert_eq!(region.center_longitude(), 135.);
        assert_eq!(region.to_string(), "120/150/20/50");
        assert!("120/150/20".parse::<MapRegion>().is_err());
        assert!("150/120/20/50".parse::<MapRegion>().is_err());
        assert!("a/b/c/d".parse::<MapRegion>().is_err());
    }
}
