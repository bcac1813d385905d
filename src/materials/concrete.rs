//! Parabola-rectangle concrete law

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};
use crate::materials::UniaxialLaw;

/// Parabola-rectangle concrete diagram
///
/// Zero stress in tension. In compression, a parabola rising to the peak
/// stress `fc` at strain `eps_c0`, then a constant plateau up to the
/// crushing strain `eps_cu`. Strain magnitudes are stored positive;
/// compressive strain and stress are negative at the call boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteLaw {
    /// Compressive strength (Pa, positive)
    pub fc: f64,
    /// Strain at peak stress (positive magnitude, typically 0.002)
    pub eps_c0: f64,
    /// Crushing strain (positive magnitude, typically 0.0035)
    pub eps_cu: f64,
}

impl ConcreteLaw {
    /// Create a parabola-rectangle law
    pub fn new(fc: f64, eps_c0: f64, eps_cu: f64) -> SectionResult<Self> {
        if fc <= 0.0 {
            return Err(SectionError::InvalidMaterial(
                "concrete strength must be positive".to_string(),
            ));
        }
        if eps_c0 <= 0.0 {
            return Err(SectionError::InvalidMaterial(
                "peak-stress strain must be positive".to_string(),
            ));
        }
        if eps_cu < eps_c0 {
            return Err(SectionError::InvalidMaterial(
                "crushing strain must not be below the peak-stress strain".to_string(),
            ));
        }
        Ok(Self { fc, eps_c0, eps_cu })
    }

    /// Stress at a given strain (clamped at the plateau beyond `eps_cu`;
    /// limit violations are flagged by the caller, not here)
    pub fn stress(&self, strain: f64) -> f64 {
        if strain >= 0.0 {
            return 0.0;
        }
        let u = -strain / self.eps_c0;
        if u <= 1.0 {
            -self.fc * (2.0 * u - u * u)
        } else {
            -self.fc
        }
    }

    /// Tangent modulus at a given strain
    pub fn tangent(&self, strain: f64) -> f64 {
        if strain >= 0.0 {
            return 0.0;
        }
        let u = -strain / self.eps_c0;
        if u <= 1.0 {
            2.0 * self.fc * (1.0 - u) / self.eps_c0
        } else {
            0.0
        }
    }

    /// Slope of the parabola at the origin
    pub fn initial_modulus(&self) -> f64 {
        2.0 * self.fc / self.eps_c0
    }
}

/// Physical parameters of a concrete grade, from which the characteristic
/// and design law variants are produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteGrade {
    /// Characteristic compressive strength (Pa)
    pub fck: f64,
    /// Partial safety factor
    pub gamma_c: f64,
    /// Strain at peak stress (positive magnitude)
    pub eps_c0: f64,
    /// Crushing strain (positive magnitude)
    pub eps_cu: f64,
}

impl ConcreteGrade {
    /// Create a grade record
    pub fn new(fck: f64, gamma_c: f64, eps_c0: f64, eps_cu: f64) -> Self {
        Self {
            fck,
            gamma_c,
            eps_c0,
            eps_cu,
        }
    }

    /// EHE HA-25 concrete (fck = 25 MPa, gamma_c = 1.5)
    pub fn ha25() -> Self {
        Self::new(25e6, 1.5, 0.002, 0.0035)
    }

    /// EHE HA-30 concrete (fck = 30 MPa, gamma_c = 1.5)
    pub fn ha30() -> Self {
        Self::new(30e6, 1.5, 0.002, 0.0035)
    }

    /// Characteristic diagram (unreduced strength)
    pub fn characteristic(&self) -> SectionResult<UniaxialLaw> {
        Ok(UniaxialLaw::Concrete(ConcreteLaw::new(
            self.fck,
            self.eps_c0,
            self.eps_cu,
        )?))
    }

    /// Design diagram (strength reduced by the partial factor)
    pub fn design(&self) -> SectionResult<UniaxialLaw> {
        if self.gamma_c <= 0.0 {
            return Err(SectionError::InvalidMaterial(
                "partial safety factor must be positive".to_string(),
            ));
        }
        Ok(UniaxialLaw::Concrete(ConcreteLaw::new(
            self.fck / self.gamma_c,
            self.eps_c0,
            self.eps_cu,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_tension_capacity() {
        let law = ConcreteLaw::new(25e6, 0.002, 0.0035).unwrap();
        assert_eq!(law.stress(1e-4), 0.0);
        assert_eq!(law.stress(0.01), 0.0);
        assert_eq!(law.tangent(1e-4), 0.0);
    }

    #[test]
    fn test_parabola_and_plateau() {
        let law = ConcreteLaw::new(25e6, 0.002, 0.0035).unwrap();
        // Peak of the parabola
        assert_relative_eq!(law.stress(-0.002), -25e6, max_relative = 1e-12);
        // Plateau
        assert_relative_eq!(law.stress(-0.003), -25e6, max_relative = 1e-12);
        assert_relative_eq!(law.stress(-0.0035), -25e6, max_relative = 1e-12);
        // Halfway up the parabola: 2u - u^2 with u = 0.5 -> 0.75
        assert_relative_eq!(law.stress(-0.001), -0.75 * 25e6, max_relative = 1e-12);
        // Tangent vanishes at the peak
        assert_relative_eq!(law.tangent(-0.002), 0.0);
    }

    #[test]
    fn test_monotonic_in_strain() {
        let law = ConcreteLaw::new(25e6, 0.002, 0.0035).unwrap();
        let mut prev = law.stress(-0.0035);
        for i in 1..=100 {
            let eps = -0.0035 + 0.0040 * (i as f64) / 100.0;
            let s = law.stress(eps);
            assert!(s >= prev - 1e-9, "stress must be non-decreasing in strain");
            prev = s;
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(ConcreteLaw::new(0.0, 0.002, 0.0035).is_err());
        assert!(ConcreteLaw::new(-25e6, 0.002, 0.0035).is_err());
        assert!(ConcreteLaw::new(25e6, 0.0, 0.0035).is_err());
        assert!(ConcreteLaw::new(25e6, 0.002, 0.001).is_err());
    }

    #[test]
    fn test_characteristic_vs_design() {
        let grade = ConcreteGrade::ha25();
        let k = grade.characteristic().unwrap();
        let d = grade.design().unwrap();
        assert_relative_eq!(k.stress(-0.002), -25e6, max_relative = 1e-12);
        assert_relative_eq!(d.stress(-0.002), -25e6 / 1.5, max_relative = 1e-12);
    }
}
