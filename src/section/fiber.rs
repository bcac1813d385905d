//! The atomic unit of section discretization

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Index of a material law owned by a [`FiberSection`](crate::section::FiberSection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub(crate) usize);

impl MaterialId {
    /// Position of the law in the section's material table
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A small patch of section area with uniform strain
///
/// Fibers are created during discretization and never mutated. Strain is a
/// transient value computed from a deformation plane at evaluation time,
/// not state carried by the fiber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fiber {
    /// Fiber area (m², positive)
    pub area: f64,
    /// Fiber centroid in section-local (y, z) coordinates
    pub position: Point2<f64>,
    /// Material law the fiber follows (shared with other fibers)
    pub material: MaterialId,
}

impl Fiber {
    /// Create a fiber
    pub fn new(area: f64, position: Point2<f64>, material: MaterialId) -> Self {
        Self {
            area,
            position,
            material,
        }
    }
}
