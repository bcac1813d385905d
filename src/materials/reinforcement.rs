//! Bilinear reinforcement law

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};
use crate::materials::UniaxialLaw;

/// Bilinear elastic/hardening steel diagram, symmetric in tension and
/// compression, clipped at the rupture strain `eps_u`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementLaw {
    /// Yield strength (Pa)
    pub fy: f64,
    /// Elastic modulus (Pa)
    pub es: f64,
    /// Rupture strain (positive magnitude)
    pub eps_u: f64,
    /// Hardening modulus beyond yield (Pa, zero for a flat plateau)
    pub hardening: f64,
}

impl ReinforcementLaw {
    /// Create a bilinear law
    pub fn new(fy: f64, es: f64, eps_u: f64, hardening: f64) -> SectionResult<Self> {
        if fy <= 0.0 {
            return Err(SectionError::InvalidMaterial(
                "yield strength must be positive".to_string(),
            ));
        }
        if es <= 0.0 {
            return Err(SectionError::InvalidMaterial(
                "elastic modulus must be positive".to_string(),
            ));
        }
        if eps_u <= fy / es {
            return Err(SectionError::InvalidMaterial(
                "rupture strain must exceed the yield strain".to_string(),
            ));
        }
        if hardening < 0.0 {
            return Err(SectionError::InvalidMaterial(
                "hardening modulus must not be negative".to_string(),
            ));
        }
        Ok(Self {
            fy,
            es,
            eps_u,
            hardening,
        })
    }

    /// Yield strain (positive magnitude)
    pub fn eps_y(&self) -> f64 {
        self.fy / self.es
    }

    /// Stress at a given strain (clamped at the rupture-strain stress
    /// beyond `eps_u`; limit violations are flagged by the caller)
    pub fn stress(&self, strain: f64) -> f64 {
        let s = strain.abs().min(self.eps_u);
        let magnitude = if s <= self.eps_y() {
            self.es * s
        } else {
            self.fy + self.hardening * (s - self.eps_y())
        };
        magnitude.copysign(strain)
    }

    /// Tangent modulus at a given strain
    pub fn tangent(&self, strain: f64) -> f64 {
        let s = strain.abs();
        if s > self.eps_u {
            0.0
        } else if s <= self.eps_y() {
            self.es
        } else {
            self.hardening
        }
    }
}

/// Physical parameters of a reinforcement grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementGrade {
    /// Characteristic yield strength (Pa)
    pub fyk: f64,
    /// Partial safety factor
    pub gamma_s: f64,
    /// Elastic modulus (Pa)
    pub es: f64,
    /// Rupture strain (positive magnitude)
    pub eps_u: f64,
    /// Hardening modulus (Pa)
    pub hardening: f64,
}

impl ReinforcementGrade {
    /// Create a grade record with a flat post-yield plateau
    pub fn new(fyk: f64, gamma_s: f64, es: f64, eps_u: f64) -> Self {
        Self {
            fyk,
            gamma_s,
            es,
            eps_u,
            hardening: 0.0,
        }
    }

    /// Set a hardening modulus for the post-yield branch
    pub fn with_hardening(mut self, hardening: f64) -> Self {
        self.hardening = hardening;
        self
    }

    /// EHE B400S reinforcing steel (fyk = 400 MPa, gamma_s = 1.15)
    pub fn b400s() -> Self {
        Self::new(400e6, 1.15, 200e9, 0.01)
    }

    /// EHE B500S reinforcing steel (fyk = 500 MPa, gamma_s = 1.15) with
    /// the inclined top branch of the EHE bilinear diagram
    pub fn b500s() -> Self {
        Self::new(500e6, 1.15, 200e9, 0.01).with_hardening(5.0906e8)
    }

    /// Characteristic diagram (unreduced strength)
    pub fn characteristic(&self) -> SectionResult<UniaxialLaw> {
        Ok(UniaxialLaw::Reinforcement(ReinforcementLaw::new(
            self.fyk,
            self.es,
            self.eps_u,
            self.hardening,
        )?))
    }

    /// Design diagram (strength reduced by the partial factor)
    pub fn design(&self) -> SectionResult<UniaxialLaw> {
        if self.gamma_s <= 0.0 {
            return Err(SectionError::InvalidMaterial(
                "partial safety factor must be positive".to_string(),
            ));
        }
        Ok(UniaxialLaw::Reinforcement(ReinforcementLaw::new(
            self.fyk / self.gamma_s,
            self.es,
            self.eps_u,
            self.hardening,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_response() {
        let law = ReinforcementLaw::new(500e6, 200e9, 0.01, 0.0).unwrap();
        for eps in [1e-4, 1e-3, 5e-3, 0.01] {
            assert_relative_eq!(law.stress(eps), -law.stress(-eps), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_elastic_then_plateau() {
        let law = ReinforcementLaw::new(500e6, 200e9, 0.01, 0.0).unwrap();
        let eps_y = 500e6 / 200e9;
        assert_relative_eq!(law.stress(eps_y / 2.0), 250e6, max_relative = 1e-12);
        assert_relative_eq!(law.stress(eps_y), 500e6, max_relative = 1e-12);
        assert_relative_eq!(law.stress(0.009), 500e6, max_relative = 1e-12);
        assert_relative_eq!(law.tangent(eps_y / 2.0), 200e9, max_relative = 1e-12);
        assert_relative_eq!(law.tangent(0.009), 0.0);
    }

    #[test]
    fn test_hardening_branch() {
        let law = ReinforcementLaw::new(500e6, 200e9, 0.01, 1e9).unwrap();
        let eps_y = 500e6 / 200e9;
        let expected = 500e6 + 1e9 * (0.01 - eps_y);
        assert_relative_eq!(law.stress(0.01), expected, max_relative = 1e-12);
        assert_relative_eq!(law.tangent(0.009), 1e9, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(ReinforcementLaw::new(0.0, 200e9, 0.01, 0.0).is_err());
        assert!(ReinforcementLaw::new(500e6, 0.0, 0.01, 0.0).is_err());
        // Rupture strain below yield strain
        assert!(ReinforcementLaw::new(500e6, 200e9, 0.001, 0.0).is_err());
        assert!(ReinforcementLaw::new(500e6, 200e9, 0.01, -1.0).is_err());
    }

    #[test]
    fn test_design_reduces_yield_only() {
        let grade = ReinforcementGrade::new(500e6, 1.15, 200e9, 0.01);
        let d = grade.design().unwrap();
        assert_relative_eq!(d.stress(0.01), 500e6 / 1.15, max_relative = 1e-12);
        let k = grade.characteristic().unwrap();
        assert_relative_eq!(k.stress(0.01), 500e6, max_relative = 1e-12);
    }

    #[test]
    fn test_b500s_design_capacity_at_rupture() {
        // Four 16 mm B500S bars at rupture carry the EHE worked-example
        // design axial capacity of 352877 N
        let law = ReinforcementGrade::b500s().design().unwrap();
        let as_total = 4.0 * std::f64::consts::PI * 0.008_f64.powi(2);
        assert_relative_eq!(
            law.stress(0.01) * as_total,
            352_877.0,
            max_relative = 1e-5
        );
    }
}
