//! Deformation planes and internal-force triples
//!
//! Sign convention, fixed once for the whole crate:
//! - section-local axes (y, z); tensile strain and stress positive
//! - strain field: `eps(y, z) = eps0 - kappa_y * z + kappa_z * y`
//! - resultants over the fibers: `N = sum(sigma * A)`,
//!   `My = sum(sigma * A * z)`, `Mz = -sum(sigma * A * y)`

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// An affine strain field over the cross-section
///
/// Transient: recreated for every sampled configuration of the sweep and
/// never stored on fibers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeformationPlane {
    /// Strain at the section origin
    pub eps0: f64,
    /// Curvature about the local y axis
    pub kappa_y: f64,
    /// Curvature about the local z axis
    pub kappa_z: f64,
}

impl DeformationPlane {
    /// Create a plane from its three scalars
    pub fn new(eps0: f64, kappa_y: f64, kappa_z: f64) -> Self {
        Self {
            eps0,
            kappa_y,
            kappa_z,
        }
    }

    /// Uniform strain field (zero curvature)
    pub fn uniform(eps0: f64) -> Self {
        Self::new(eps0, 0.0, 0.0)
    }

    /// Strain at a fiber position
    pub fn strain_at(&self, position: &Point2<f64>) -> f64 {
        self.eps0 - self.kappa_y * position.y + self.kappa_z * position.x
    }

    /// Curvature magnitude
    pub fn curvature(&self) -> f64 {
        self.kappa_y.hypot(self.kappa_z)
    }
}

/// An (N, My, Mz) triple: either a section resultant or an applied load
/// point supplied by an external solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalForces {
    /// Axial force (positive = tension)
    pub n: f64,
    /// Bending moment about the local y axis
    pub my: f64,
    /// Bending moment about the local z axis
    pub mz: f64,
}

impl InternalForces {
    /// Create a force triple
    pub fn new(n: f64, my: f64, mz: f64) -> Self {
        Self { n, my, mz }
    }

    /// Pure axial load
    pub fn axial(n: f64) -> Self {
        Self::new(n, 0.0, 0.0)
    }

    /// Magnitude of the bending moment vector
    pub fn moment_magnitude(&self) -> f64 {
        self.my.hypot(self.mz)
    }

    /// Euclidean norm of the full (N, My, Mz) triple
    pub fn norm(&self) -> f64 {
        (self.n * self.n + self.my * self.my + self.mz * self.mz).sqrt()
    }

    /// Scale all three components
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.n * factor, self.my * factor, self.mz * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_strain_field_is_affine() {
        // eps(y, z) = eps0 - ky*z + kz*y, with Point2 { x: y, y: z }
        let plane = DeformationPlane::new(1e-3, 2e-3, 3e-3);
        let p = Point2::new(0.1, 0.2);
        let expected = 1e-3 - 2e-3 * 0.2 + 3e-3 * 0.1;
        assert_relative_eq!(plane.strain_at(&p), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_uniform_plane_has_no_gradient() {
        let plane = DeformationPlane::uniform(-0.0035);
        assert_eq!(plane.curvature(), 0.0);
        assert_eq!(plane.strain_at(&Point2::new(0.3, -0.7)), -0.0035);
    }

    #[test]
    fn test_force_helpers() {
        let f = InternalForces::new(3.0, 4.0, 0.0);
        assert_relative_eq!(f.moment_magnitude(), 4.0);
        assert_relative_eq!(f.norm(), 5.0);
        let half = f.scaled(0.5);
        assert_relative_eq!(half.n, 1.5);
    }
}
