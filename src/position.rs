// pertmap/src/position.rs

use std::fmt;
use std::hash::{Hash, Hasher};

/// Number of decimals kept when positions are compared, hashed or written.
pub const POSITION_DECIMALS: usize = 4;

const QUANTUM: f64 = 1e4;

/// A point inside the earth: geographic latitude and longitude in degrees,
/// radius in km from the center.
///
/// Two positions are equal when their coordinates agree to
/// [`POSITION_DECIMALS`] decimals, so a position read back from an output
/// list is equal to the one that produced it.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    latitude: f64,
    longitude: f64,
    radius: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, radius: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn key(&self) -> (i64, i64, i64) {
        (
            quantize(self.latitude),
            quantize(self.longitude),
            quantize(self.radius),
        )
    }
}

/// Distinct radii, sorted ascending and rounded to [`POSITION_DECIMALS`]
/// decimals, so each one reads back equal to a radius column value written
/// through [`Position`]'s Display.
pub fn distinct_radii<'a, I>(positions: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Position>,
{
    let mut radii: Vec<i64> = positions.into_iter().map(|p| quantize(p.radius())).collect();
    radii.sort_unstable();
    radii.dedup();
    radii.into_iter().map(|r| r as f64 / QUANTUM).collect()
}

fn quantize(value: f64) -> i64 {
    (value * QUANTUM).round() as i64
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.prec$} {:.prec$} {:.prec$}",
            self.latitude,
            self.longitude,
            self.radius,
            prec = POSITION_DECIMALS
        )
    }
}
