//! Generic linear elastic law

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};

/// Linear elastic material, symmetric, clipped at `eps_u`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticLaw {
    /// Elastic modulus (Pa)
    pub e: f64,
    /// Failure strain (positive magnitude)
    pub eps_u: f64,
}

impl ElasticLaw {
    /// Create a linear law
    pub fn new(e: f64, eps_u: f64) -> SectionResult<Self> {
        if e <= 0.0 {
            return Err(SectionError::InvalidMaterial(
                "elastic modulus must be positive".to_string(),
            ));
        }
        if eps_u <= 0.0 {
            return Err(SectionError::InvalidMaterial(
                "failure strain must be positive".to_string(),
            ));
        }
        Ok(Self { e, eps_u })
    }

    /// Stress at a given strain (clamped beyond the failure strain)
    pub fn stress(&self, strain: f64) -> f64 {
        self.e * strain.clamp(-self.eps_u, self.eps_u)
    }

    /// Tangent modulus at a given strain
    pub fn tangent(&self, strain: f64) -> f64 {
        if strain.abs() > self.eps_u {
            0.0
        } else {
            self.e
        }
    }
}
