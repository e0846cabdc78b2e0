// pertmap/src/variable.rs

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Physical quantities that can be inverted for and mapped.
///
/// Velocities are in km/s, density in g/cm^3, moduli in GPa.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariableType {
    Rho,
    Vp,
    Vpv,
    Vph,
    Vs,
    Vsv,
    Vsh,
    Eta,
    A,
    C,
    F,
    L,
    N,
    Mu,
    Kappa,
    Lambda,
    Qmu,
    Qkappa,
}

impl VariableType {
    pub const ALL: [VariableType; 18] = [
        VariableType::Rho,
        VariableType::Vp,
        VariableType::Vpv,
        VariableType::Vph,
        VariableType::Vs,
        VariableType::Vsv,
        VariableType::Vsh,
        VariableType::Eta,
        VariableType::A,
        VariableType::C,
        VariableType::F,
        VariableType::L,
        VariableType::N,
        VariableType::Mu,
        VariableType::Kappa,
        VariableType::Lambda,
        VariableType::Qmu,
        VariableType::Qkappa,
    ];

    /// Canonical spelling, also used to build output file names.
    pub fn name(&self) -> &'static str {
        match self {
            VariableType::Rho => "RHO",
            VariableType::Vp => "Vp",
            VariableType::Vpv => "Vpv",
            VariableType::Vph => "Vph",
            VariableType::Vs => "Vs",
            VariableType::Vsv => "Vsv",
            VariableType::Vsh => "Vsh",
            VariableType::Eta => "ETA",
            VariableType::A => "A",
            VariableType::C => "C",
            VariableType::F => "F",
            VariableType::L => "L",
            VariableType::N => "N",
            VariableType::Mu => "MU",
            VariableType::Kappa => "KAPPA",
            VariableType::Lambda => "LAMBDA",
            VariableType::Qmu => "Qmu",
            VariableType::Qkappa => "Qkappa",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown variable type: {0}")]
pub struct UnknownVariableType(pub String);

impl FromStr for VariableType {
    type Err = UnknownVariableType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariableType::ALL
            .iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| UnknownVariableType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("VS".parse::<VariableType>().unwrap(), VariableType::Vs);
        assert_eq!("rho".parse::<VariableType>().unwrap(), VariableType::Rho);
        assert_eq!("Qkappa".parse::<VariableType>().unwrap(), VariableType::Qkappa);
        assert!("Vx".parse::<VariableType>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for variable in VariableType::ALL {
            assert_eq!(variable.to_string().parse::<VariableType>().unwrap(), variable);
        }
    }
}
