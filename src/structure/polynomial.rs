// pertmap/src/structure/polynomial.rs

use super::errors::StructureError;
use super::traits::{ElasticSample, Structure};

/// Radius used to normalize polynomial arguments.
pub const EARTH_RADIUS: f64 = 6371.;

type Poly = [f64; 4];

const ONE: Poly = [1., 0., 0., 0.];

fn eval(poly: &Poly, x: f64) -> f64 {
    poly[0] + x * (poly[1] + x * (poly[2] + x * poly[3]))
}

#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    rmin: f64,
    rmax: f64,
    rho: Poly,
    vpv: Poly,
    vph: Poly,
    vsv: Poly,
    vsh: Poly,
    eta: Poly,
    qmu: f64,
    qkappa: f64,
}

impl Zone {
    pub fn isotropic(
        rmin: f64,
        rmax: f64,
        rho: Poly,
        vp: Poly,
        vs: Poly,
        qmu: f64,
        qkappa: f64,
    ) -> Self {
        Self {
            rmin,
            rmax,
            rho,
            vpv: vp,
            vph: vp,
            vsv: vs,
            vsh: vs,
            eta: ONE,
            qmu,
            qkappa,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn anisotropic(
        rmin: f64,
        rmax: f64,
        rho: Poly,
        vpv: Poly,
        vph: Poly,
        vsv: Poly,
        vsh: Poly,
        eta: Poly,
        qmu: f64,
        qkappa: f64,
    ) -> Self {
        Self {
            rmin,
            rmax,
            rho,
            vpv,
            vph,
            vsv,
            vsh,
            eta,
            qmu,
            qkappa,
        }
    }

    fn sample(&self, radius: f64) -> ElasticSample {
        let x = radius / EARTH_RADIUS;
        ElasticSample {
            rho: eval(&self.rho, x),
            vpv: eval(&self.vpv, x),
            vph: eval(&self.vph, x),
            vsv: eval(&self.vsv, x),
            vsh: eval(&self.vsh, x),
            eta: eval(&self.eta, x),
            qmu: self.qmu,
            qkappa: self.qkappa,
        }
    }
}

/// Structure made of radial zones, each described by cubic polynomials of
/// the normalized radius.
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialStructure {
    name: String,
    zones: Vec<Zone>,
}

impl PolynomialStructure {
    pub fn new(name: &str, zones: Vec<Zone>) -> Result<Self, StructureError> {
        if zones.is_empty() {
            return Err(StructureError::InvalidNodes(format!(
                "{} has no zones",
                name
            )));
        }
        for pair in zones.windows(2) {
            if pair[0].rmax != pair[1].rmin {
                return Err(StructureError::InvalidNodes(format!(
                    "{}: zones are not contiguous at {} / {}",
                    name, pair[0].rmax, pair[1].rmin
                )));
            }
        }
        if zones.iter().any(|z| z.rmin >= z.rmax) {
            return Err(StructureError::InvalidNodes(format!(
                "{}: zone with empty radius range",
                name
            )));
        }
        Ok(Self {
            name: name.to_string(),
            zones,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn same_profile(&self, other: &Self) -> bool {
        self.zones == other.zones
    }

    /// Built-in structures, looked up case-insensitively.
    pub fn named(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "PREM" => Some(Self::prem()),
            "IPREM" => Some(Self::iprem()),
            _ => None,
        }
    }

    pub fn builtin_names() -> &'static [&'static str] {
        &["PREM", "IPREM"]
    }

    /// Anisotropic PREM (Dziewonski & Anderson, 1981) with the ocean layer
    /// replaced by the upper crust.
    pub fn prem() -> Self {
        let mut zones = Self::prem_deep_zones();
        let rho = [2.6910, 0.6924, 0., 0.];
        let vpv = [0.8317, 7.2180, 0., 0.];
        let vph = [3.5908, 4.6172, 0., 0.];
        let vsv = [5.8582, -1.4678, 0., 0.];
        let vsh = [-1.0839, 5.7176, 0., 0.];
        let eta = [3.3687, -2.4778, 0., 0.];
        zones.push(Zone::anisotropic(
            6151., 6291., rho, vpv, vph, vsv, vsh, eta, 80., 57823.,
        ));
        zones.push(Zone::anisotropic(
            6291., 6346.6, rho, vpv, vph, vsv, vsh, eta, 600., 57823.,
        ));
        zones.extend(Self::prem_crust_zones());
        Self {
            name: "PREM".to_string(),
            zones,
        }
    }

    /// Isotropic PREM with the ocean layer replaced by the upper crust.
    pub fn iprem() -> Self {
        let mut zones = Self::prem_deep_zones();
        let rho = [2.6910, 0.6924, 0., 0.];
        let vp = [4.1875, 3.9382, 0., 0.];
        let vs = [2.1519, 2.3481, 0., 0.];
        zones.push(Zone::isotropic(6151., 6291., rho, vp, vs, 80., 57823.));
        zones.push(Zone::isotropic(6291., 6346.6, rho, vp, vs, 600., 57823.));
        zones.extend(Self::prem_crust_zones());
        Self {
            name: "IPREM".to_string(),
            zones,
        }
    }

    fn prem_deep_zones() -> Vec<Zone> {
        let lower_mantle_rho = [7.9565, -6.4761, 5.5283, -3.0807];
        vec![
            // inner core
            Zone::isotropic(
                0.,
                1221.5,
                [13.0885, 0., -8.8381, 0.],
                [11.2622, 0., -6.3640, 0.],
                [3.6678, 0., -4.4475, 0.],
                84.6,
                1327.7,
            ),
            // outer core
            Zone::isotropic(
                1221.5,
                3480.,
                [12.5815, -1.2638, -3.6426, -5.5281],
                [11.0487, -4.0362, 4.8023, -13.5732],
                [0., 0., 0., 0.],
                0.,
                57823.,
            ),
            // D''
            Zone::isotropic(
                3480.,
                3630.,
                lower_mantle_rho,
                [15.3891, -5.3181, 5.5242, -2.5514],
                [6.9254, 1.4672, -2.0834, 0.9783],
                312.,
                57823.,
            ),
            Zone::isotropic(
                3630.,
                5600.,
                lower_mantle_rho,
                [24.9520, -40.4673, 51.4832, -26.6419],
                [11.1671, -13.7818, 17.4575, -9.2777],
                312.,
                57823.,
            ),
            Zone::isotropic(
                5600.,
                5701.,
                lower_mantle_rho,
                [29.2766, -23.6027, 5.5242, -2.5514],
                [22.3459, -17.2473, -2.0834, 0.9783],
                312.,
                57823.,
            ),
            // transition zone
            Zone::isotropic(
                5701.,
                5771.,
                [5.3197, -1.4836, 0., 0.],
                [19.0957, -9.8672, 0., 0.],
                [9.9839, -4.9324, 0., 0.],
                143.,
                57823.,
            ),
            Zone::isotropic(
                5771.,
                5971.,
                [11.2494, -8.0298, 0., 0.],
                [39.7027, -32.6166, 0., 0.],
                [22.3512, -18.5856, 0., 0.],
                143.,
                57823.,
            ),
            Zone::isotropic(
                5971.,
                6151.,
                [7.1089, -3.8045, 0., 0.],
                [20.3926, -12.2569, 0., 0.],
                [8.9496, -4.4597, 0., 0.],
                143.,
                57823.,
            ),
        ]
    }

    fn prem_crust_zones() -> Vec<Zone> {
        vec![
            Zone::isotropic(
                6346.6,
                6356.,
                [2.9, 0., 0., 0.],
                [6.8, 0., 0., 0.],
                [3.9, 0., 0., 0.],
                600.,
                57823.,
            ),
            Zone::isotropic(
                6356.,
                EARTH_RADIUS,
                [2.6, 0., 0., 0.],
                [5.8, 0., 0., 0.],
                [3.2, 0., 0., 0.],
                600.,
                57823.,
            ),
        ]
    }

    /// Zone containing `radius`; a boundary radius belongs to the zone above it.
    fn zone_of(&self, radius: f64) -> Option<&Zone> {
        let last = self.zones.last()?;
        if radius == last.rmax {
            return Some(last);
        }
        self.zones
            .iter()
            .find(|zone| zone.rmin <= radius && radius < zone.rmax)
    }
}

impl Structure for PolynomialStructure {
    fn radius_range(&self) -> (f64, f64) {
        let min = self.zones.first().map(|z| z.rmin).unwrap_or(0.);
        let max = self.zones.last().map(|z| z.rmax).unwrap_or(0.);
        (min, max)
    }

    fn elastic_at(&self, radius: f64) -> Result<ElasticSample, StructureError> {
        self.check_radius(radius)?;
        let (min, max) = self.radius_range();
        let zone = self
            .zone_of(radius)
            .ok_or(StructureError::OutOfRange { radius, min, max })?;
        Ok(zone.sample(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VariableType;

    #[test]
    fn test_prem_reference_values() {
        let prem = PolynomialStructure::prem();
        // mantle side of the core-mantle boundary
        let vs = prem.value_at(VariableType::Vs, 3480.).unwrap();
        assert!((vs - 7.2649).abs() < 1e-3, "vs={}", vs);
        let rho = prem.value_at(VariableType::Rho, 3480.).unwrap();
        assert!((rho - 5.5664).abs() < 1e-3, "rho={}", rho);
        // top of the upper crust
        let vs = prem.value_at(VariableType::Vs, 6371.).unwrap();
        assert!((vs - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_outer_core_has_no_shear() {
        let prem = PolynomialStructure::prem();
        assert_eq!(prem.value_at(VariableType::Vs, 2000.).unwrap(), 0.);
    }

    #[test]
    fn test_boundary_belongs_to_upper_zone() {
        let prem = PolynomialStructure::prem();
        let at_boundary = prem.value_at(VariableType::Vs, 5701.).unwrap();
        let above = prem.value_at(VariableType::Vs, 5701.0001).unwrap();
        assert!((at_boundary - above).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_range() {
        let prem = PolynomialStructure::prem();
        match prem.value_at(VariableType::Vs, 6400.) {
            Err(StructureError::OutOfRange { radius, .. }) => assert_eq!(radius, 6400.),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
        assert!(prem.value_at(VariableType::Vs, -1.).is_err());
    }

    #[test]
    fn test_iprem_is_isotropic_and_differs_from_prem() {
        let prem = PolynomialStructure::prem();
        let iprem = PolynomialStructure::iprem();
        let sample = iprem.elastic_at(6200.).unwrap();
        assert_eq!(sample.vsv, sample.vsh);
        assert_ne!(prem, iprem);
        assert_eq!(
            prem.value_at(VariableType::Vs, 5000.).unwrap(),
            iprem.value_at(VariableType::Vs, 5000.).unwrap()
        );
    }

    #[test]
    fn test_named_lookup() {
        assert!(PolynomialStructure::named("prem").is_some());
        assert!(PolynomialStructure::named("IPREM").is_some());
        assert!(PolynomialStructure::named("AK999").is_none());
    }

    #[test]
    fn test_non_contiguous_zones_rejected() {
        let zone_a = Zone::isotropic(0., 10., ONE, ONE, ONE, 1., 1.);
        let zone_b = Zone::isotropic(11., 20., ONE, ONE, ONE, 1., 1.);
        assert!(PolynomialStructure::new("broken", vec![zone_a, zone_b]).is_err());
    }
}
