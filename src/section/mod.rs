//! Fiber-section container and aggregate queries

mod fiber;
mod geometry;

pub use fiber::{Fiber, MaterialId};
pub use geometry::{BarLayout, RegionShape};

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};
use crate::materials::UniaxialLaw;
use crate::plane::{DeformationPlane, InternalForces};

/// Second moments of area about the section centroid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondMoments {
    /// Moment about the local y axis, `sum(A * z^2)`
    pub iy: f64,
    /// Moment about the local z axis, `sum(A * y^2)`
    pub iz: f64,
    /// Product of inertia, `sum(A * y * z)`
    pub iyz: f64,
}

/// A cross-section discretized into fibers
///
/// Material laws are owned by the section and referenced by index, with no
/// name-keyed registry. The section is built once from regions and
/// reinforcement layers and then consumed read-only; the envelope builder
/// takes it by shared reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiberSection {
    materials: Vec<UniaxialLaw>,
    fibers: Vec<Fiber>,
}

impl FiberSection {
    /// Create an empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material law and return its id
    pub fn add_material(&mut self, law: UniaxialLaw) -> MaterialId {
        self.materials.push(law);
        MaterialId(self.materials.len() - 1)
    }

    /// Look up a material law
    pub fn material(&self, id: MaterialId) -> SectionResult<&UniaxialLaw> {
        self.materials
            .get(id.0)
            .ok_or(SectionError::MaterialNotFound(id.0))
    }

    fn check_material(&self, id: MaterialId) -> SectionResult<()> {
        if id.0 >= self.materials.len() {
            return Err(SectionError::MaterialNotFound(id.0));
        }
        Ok(())
    }

    /// Discretize a geometric region into `n1 x n2` fibers of `material`
    ///
    /// Returns the number of fibers added.
    pub fn add_region(
        &mut self,
        shape: &RegionShape,
        material: MaterialId,
        n1: usize,
        n2: usize,
    ) -> SectionResult<usize> {
        self.check_material(material)?;
        let cells = shape.sample(n1, n2)?;
        let count = cells.len();
        self.fibers.extend(
            cells
                .into_iter()
                .map(|(position, area)| Fiber::new(area, position, material)),
        );
        Ok(count)
    }

    /// Add one fiber of area `bar_area` per bar in the layout
    pub fn add_reinforcement_layer(
        &mut self,
        layout: &BarLayout,
        bar_area: f64,
        material: MaterialId,
    ) -> SectionResult<usize> {
        let positions = layout.positions()?;
        self.add_reinforcement_at(&positions, bar_area, material)
    }

    /// Add one fiber of area `bar_area` per explicit bar position
    pub fn add_reinforcement_at(
        &mut self,
        positions: &[Point2<f64>],
        bar_area: f64,
        material: MaterialId,
    ) -> SectionResult<usize> {
        for position in positions {
            self.add_bar(*position, bar_area, material)?;
        }
        Ok(positions.len())
    }

    /// Add a single bar fiber
    pub fn add_bar(
        &mut self,
        position: Point2<f64>,
        area: f64,
        material: MaterialId,
    ) -> SectionResult<()> {
        if area <= 0.0 {
            return Err(SectionError::InvalidGeometry(
                "fiber area must be positive".to_string(),
            ));
        }
        self.check_material(material)?;
        self.fibers.push(Fiber::new(area, position, material));
        Ok(())
    }

    /// Fibers in insertion order
    pub fn fibers(&self) -> &[Fiber] {
        &self.fibers
    }

    /// Number of fibers
    pub fn fiber_count(&self) -> usize {
        self.fibers.len()
    }

    fn require_fibers(&self) -> SectionResult<()> {
        if self.fibers.is_empty() {
            return Err(SectionError::EmptySection);
        }
        Ok(())
    }

    /// Resultant (N, My, Mz) of the stress field induced by a plane
    ///
    /// `N = sum(sigma * A)`, `My = sum(sigma * A * z)`,
    /// `Mz = -sum(sigma * A * y)`; tension positive.
    pub fn resultant(&self, plane: &DeformationPlane) -> SectionResult<InternalForces> {
        self.require_fibers()?;
        let mut n = 0.0;
        let mut my = 0.0;
        let mut mz = 0.0;
        for fiber in &self.fibers {
            let strain = plane.strain_at(&fiber.position);
            let force = self.materials[fiber.material.0].stress(strain) * fiber.area;
            n += force;
            my += force * fiber.position.y;
            mz -= force * fiber.position.x;
        }
        Ok(InternalForces::new(n, my, mz))
    }

    /// Total fiber area
    pub fn area(&self) -> SectionResult<f64> {
        self.require_fibers()?;
        Ok(self.fibers.iter().map(|f| f.area).sum())
    }

    /// Area-weighted centroid of the undeformed fiber positions
    pub fn centroid(&self) -> SectionResult<Point2<f64>> {
        let area = self.area()?;
        let mut y = 0.0;
        let mut z = 0.0;
        for fiber in &self.fibers {
            y += fiber.area * fiber.position.x;
            z += fiber.area * fiber.position.y;
        }
        Ok(Point2::new(y / area, z / area))
    }

    /// Second moments of area about the centroid
    ///
    /// Used for initial-stiffness estimates only; the strength sweep never
    /// reads them, so they are computed on demand rather than cached.
    pub fn second_moments(&self) -> SectionResult<SecondMoments> {
        let c = self.centroid()?;
        let mut iy = 0.0;
        let mut iz = 0.0;
        let mut iyz = 0.0;
        for fiber in &self.fibers {
            let dy = fiber.position.x - c.x;
            let dz = fiber.position.y - c.y;
            iy += fiber.area * dz * dz;
            iz += fiber.area * dy * dy;
            iyz += fiber.area * dy * dz;
        }
        Ok(SecondMoments { iy, iz, iyz })
    }

    /// Failure-strain pivots over the materials actually used by fibers:
    /// the most restrictive crushing strain (negative) and the most
    /// restrictive tensile rupture strain (zero if no fiber material can
    /// rupture in tension, e.g. plain concrete)
    pub fn strain_pivots(&self) -> SectionResult<(f64, f64)> {
        self.require_fibers()?;
        let mut used = vec![false; self.materials.len()];
        for fiber in &self.fibers {
            used[fiber.material.0] = true;
        }
        let mut crush = f64::NEG_INFINITY;
        let mut rupture = f64::INFINITY;
        for (law, used) in self.materials.iter().zip(&used) {
            if !used {
                continue;
            }
            crush = crush.max(law.crushing_strain());
            if let Some(eps_u) = law.rupture_strain() {
                rupture = rupture.min(eps_u);
            }
        }
        if rupture == f64::INFINITY {
            rupture = 0.0;
        }
        Ok((crush, rupture))
    }

    /// Extreme fiber coordinates projected on the direction
    /// `(cos(theta), sin(theta))` in the (y, z) plane
    pub fn projected_extent(&self, theta: f64) -> SectionResult<(f64, f64)> {
        self.require_fibers()?;
        let (c, s) = (theta.cos(), theta.sin());
        let mut t_min = f64::INFINITY;
        let mut t_max = f64::NEG_INFINITY;
        for fiber in &self.fibers {
            let t = fiber.position.x * c + fiber.position.y * s;
            t_min = t_min.min(t);
            t_max = t_max.max(t);
        }
        Ok((t_min, t_max))
    }

    /// Whether every fiber strain under the plane stays within its
    /// material's failure limits
    pub fn within_limits(&self, plane: &DeformationPlane) -> bool {
        const TOL: f64 = 1e-12;
        self.fibers.iter().all(|fiber| {
            let strain = plane.strain_at(&fiber.position);
            let law = &self.materials[fiber.material.0];
            strain >= law.crushing_strain() - TOL
                && law
                    .rupture_strain()
                    .map_or(true, |eps_u| strain <= eps_u + TOL)
        })
    }
}
