// pertmap/src/structure/traits.rs

use super::errors::StructureError;
use crate::variable::VariableType;

/// Transversely isotropic elastic parameters plus attenuation at one radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElasticSample {
    pub rho: f64,
    pub vpv: f64,
    pub vph: f64,
    pub vsv: f64,
    pub vsh: f64,
    pub eta: f64,
    pub qmu: f64,
    pub qkappa: f64,
}

impl ElasticSample {
    pub(crate) const NUM_FIELDS: usize = 8;

    pub(crate) fn from_slice(values: &[f64]) -> Self {
        Self {
            rho: values[0],
            vpv: values[1],
            vph: values[2],
            vsv: values[3],
            vsh: values[4],
            eta: values[5],
            qmu: values[6],
            qkappa: values[7],
        }
    }

    pub fn a(&self) -> f64 {
        self.rho * self.vph * self.vph
    }

    pub fn c(&self) -> f64 {
        self.rho * self.vpv * self.vpv
    }

    pub fn l(&self) -> f64 {
        self.rho * self.vsv * self.vsv
    }

    pub fn n(&self) -> f64 {
        self.rho * self.vsh * self.vsh
    }

    pub fn f(&self) -> f64 {
        self.eta * (self.a() - 2. * self.l())
    }

    /// Voigt-averaged isotropic P velocity.
    pub fn vp(&self) -> f64 {
        ((8. * self.a() + 3. * self.c() + 4. * self.f() + 8. * self.l()) / (15. * self.rho)).sqrt()
    }

    /// Voigt-averaged isotropic S velocity.
    pub fn vs(&self) -> f64 {
        let vs2 = (self.a() + self.c() - 2. * self.f() + 5. * self.n() + 6. * self.l())
            / (15. * self.rho);
        vs2.max(0.).sqrt()
    }

    pub fn mu(&self) -> f64 {
        self.rho * self.vs().powi(2)
    }

    pub fn kappa(&self) -> f64 {
        self.rho * (self.vp().powi(2) - 4. / 3. * self.vs().powi(2))
    }

    pub fn lambda(&self) -> f64 {
        self.rho * (self.vp().powi(2) - 2. * self.vs().powi(2))
    }

    pub fn value(&self, variable: VariableType) -> f64 {
        match variable {
            VariableType::Rho => self.rho,
            VariableType::Vp => self.vp(),
            VariableType::Vpv => self.vpv,
            VariableType::Vph => self.vph,
            VariableType::Vs => self.vs(),
            VariableType::Vsv => self.vsv,
            VariableType::Vsh => self.vsh,
            VariableType::Eta => self.eta,
            VariableType::A => self.a(),
            VariableType::C => self.c(),
            VariableType::F => self.f(),
            VariableType::L => self.l(),
            VariableType::N => self.n(),
            VariableType::Mu => self.mu(),
            VariableType::Kappa => self.kappa(),
            VariableType::Lambda => self.lambda(),
            VariableType::Qmu => self.qmu,
            VariableType::Qkappa => self.qkappa,
        }
    }
}

/// A 1D radial earth model.
pub trait Structure {
    /// Smallest and largest radius (km) the structure is defined on.
    fn radius_range(&self) -> (f64, f64);

    fn elastic_at(&self, radius: f64) -> Result<ElasticSample, StructureError>;

    fn value_at(&self, variable: VariableType, radius: f64) -> Result<f64, StructureError> {
        Ok(self.elastic_at(radius)?.value(variable))
    }

    fn check_radius(&self, radius: f64) -> Result<(), StructureError> {
        let (min, max) = self.radius_range();
        if radius.is_nan() || radius < min || radius > max {
            return Err(StructureError::OutOfRange { radius, min, max });
        }
        Ok(())
    }
}
