//! Uniaxial stress-strain laws for section fibers
//!
//! The domain needs exactly three kinds of law: concrete (compression-only,
//! parabola-rectangle), reinforcement (bilinear, symmetric) and a generic
//! linear material. They form a closed set behind [`UniaxialLaw`], so fibers
//! dispatch on the law without open-ended trait objects.
//!
//! Sign convention: tensile strain and stress are positive.

mod concrete;
mod elastic;
mod reinforcement;

pub use concrete::{ConcreteGrade, ConcreteLaw};
pub use elastic::ElasticLaw;
pub use reinforcement::{ReinforcementGrade, ReinforcementLaw};

use serde::{Deserialize, Serialize};

/// A uniaxial material law mapping strain to stress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UniaxialLaw {
    /// Concrete: parabola-rectangle in compression, no tension capacity
    Concrete(ConcreteLaw),
    /// Reinforcing steel: bilinear elastic/hardening, symmetric
    Reinforcement(ReinforcementLaw),
    /// Generic linear elastic material
    Elastic(ElasticLaw),
}

impl UniaxialLaw {
    /// Stress (Pa) at a given strain
    pub fn stress(&self, strain: f64) -> f64 {
        match self {
            UniaxialLaw::Concrete(law) => law.stress(strain),
            UniaxialLaw::Reinforcement(law) => law.stress(strain),
            UniaxialLaw::Elastic(law) => law.stress(strain),
        }
    }

    /// Tangent modulus (Pa) at a given strain
    ///
    /// Used by diagnostic and stiffness-estimate consumers only; the
    /// envelope sweep works on direct force balance.
    pub fn tangent(&self, strain: f64) -> f64 {
        match self {
            UniaxialLaw::Concrete(law) => law.tangent(strain),
            UniaxialLaw::Reinforcement(law) => law.tangent(strain),
            UniaxialLaw::Elastic(law) => law.tangent(strain),
        }
    }

    /// Elastic modulus at the origin (Pa)
    pub fn initial_modulus(&self) -> f64 {
        match self {
            UniaxialLaw::Concrete(law) => law.initial_modulus(),
            UniaxialLaw::Reinforcement(law) => law.es,
            UniaxialLaw::Elastic(law) => law.e,
        }
    }

    /// Compressive strain limit (negative), beyond which the fiber fails
    pub fn crushing_strain(&self) -> f64 {
        match self {
            UniaxialLaw::Concrete(law) => -law.eps_cu,
            UniaxialLaw::Reinforcement(law) => -law.eps_u,
            UniaxialLaw::Elastic(law) => -law.eps_u,
        }
    }

    /// Tensile rupture strain (positive), or `None` for materials that
    /// crack without bounding the section (concrete)
    pub fn rupture_strain(&self) -> Option<f64> {
        match self {
            UniaxialLaw::Concrete(_) => None,
            UniaxialLaw::Reinforcement(law) => Some(law.eps_u),
            UniaxialLaw::Elastic(law) => Some(law.eps_u),
        }
    }

    /// Whether a strain is within the law's failure limits
    pub fn strain_within_limits(&self, strain: f64) -> bool {
        if strain < self.crushing_strain() {
            return false;
        }
        match self.rupture_strain() {
            Some(eps_u) => strain <= eps_u,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_strain_gives_zero_stress() {
        let laws = [
            ConcreteGrade::ha25().design().unwrap(),
            ReinforcementGrade::b500s().design().unwrap(),
            UniaxialLaw::Elastic(ElasticLaw::new(200e9, 0.01).unwrap()),
        ];
        for law in &laws {
            assert_eq!(law.stress(0.0), 0.0);
        }
    }

    #[test]
    fn test_initial_modulus_matches_tangent_at_origin() {
        let law = ConcreteGrade::ha25().design().unwrap();
        assert_relative_eq!(
            law.initial_modulus(),
            law.tangent(-1e-12),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_limit_checks() {
        let law = ConcreteGrade::ha25().design().unwrap();
        assert!(law.strain_within_limits(-0.0035));
        assert!(!law.strain_within_limits(-0.0036));
        // Concrete cracks but never bounds the tension side
        assert!(law.strain_within_limits(0.5));

        let steel = ReinforcementGrade::b500s().design().unwrap();
        assert!(steel.strain_within_limits(0.01));
        assert!(!steel.strain_within_limits(0.011));
        assert!(!steel.strain_within_limits(-0.011));
    }
}
