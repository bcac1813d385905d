//! Limit-state deformation planes
//!
//! A failure mode is parametrized by the neutral-axis orientation `theta`
//! and a level fraction along the compression/tension continuum. For each
//! pair, one extreme-fiber strain is pinned at a material failure limit and
//! the other is swept linearly between the limits. The strain field is
//! affine in position, so the plane follows from a closed-form two-point
//! solve with no iteration.

use crate::error::{SectionError, SectionResult};
use crate::plane::DeformationPlane;
use crate::section::FiberSection;

/// Relative span below which the projected section is treated as degenerate
const DEGENERATE_SPAN_TOL: f64 = 1e-9;

/// Generator of limit-state planes for one frozen section
#[derive(Debug, Clone, Copy)]
pub struct LimitPlanes<'a> {
    section: &'a FiberSection,
    eps_crush: f64,
    eps_rupture: f64,
}

impl<'a> LimitPlanes<'a> {
    /// Bind to a section, resolving its failure-strain pivots
    pub fn new(section: &'a FiberSection) -> SectionResult<Self> {
        let (eps_crush, eps_rupture) = section.strain_pivots()?;
        if !(eps_crush < eps_rupture) {
            return Err(SectionError::SweepFailed(format!(
                "failure-strain pivots are not ordered: crushing {eps_crush}, rupture {eps_rupture}"
            )));
        }
        Ok(Self {
            section,
            eps_crush,
            eps_rupture,
        })
    }

    /// Compressive pivot strain (negative)
    pub fn eps_crush(&self) -> f64 {
        self.eps_crush
    }

    /// Tensile pivot strain (zero when nothing can rupture in tension)
    pub fn eps_rupture(&self) -> f64 {
        self.eps_rupture
    }

    /// Extreme-fiber strains for a level fraction `s` in `[0, 1]`
    ///
    /// Returns `(strain at the t_min extreme, strain at the t_max extreme)`.
    /// The compression extreme is the fiber with maximum projected
    /// coordinate. Phase one (`s <= 0.5`) pins it at the crushing pivot and
    /// sweeps the opposite extreme from crushing to rupture; phase two pins
    /// the tension extreme at the rupture pivot and sweeps the compression
    /// extreme over the same range. The endpoints are the zero-curvature
    /// pure-compression and pure-tension states.
    fn end_strains(&self, s: f64) -> (f64, f64) {
        let span = self.eps_rupture - self.eps_crush;
        if s <= 0.5 {
            (self.eps_crush + 2.0 * s * span, self.eps_crush)
        } else {
            (self.eps_rupture, self.eps_crush + (2.0 * s - 1.0) * span)
        }
    }

    /// The deformation plane for one sweep cell, or `None` when the section
    /// projected on `theta` collapses to a point (degenerate orientation)
    pub fn plane_at(
        &self,
        theta: f64,
        level: usize,
        n_levels: usize,
    ) -> SectionResult<Option<DeformationPlane>> {
        if n_levels < 2 {
            return Err(SectionError::InvalidInput(
                "a sweep needs at least 2 levels per angle".to_string(),
            ));
        }
        if level >= n_levels {
            return Err(SectionError::InvalidInput(format!(
                "level {level} out of range for {n_levels} levels"
            )));
        }

        let (t_min, t_max) = self.section.projected_extent(theta)?;
        let span = t_max - t_min;
        if span <= DEGENERATE_SPAN_TOL * t_min.abs().max(t_max.abs()).max(1.0) {
            return Ok(None);
        }

        let s = level as f64 / (n_levels - 1) as f64;
        let (eps_at_min, eps_at_max) = self.end_strains(s);

        // Affine strain along t = y*cos(theta) + z*sin(theta):
        // eps = a + b*t, pinned at both extremes
        let b = (eps_at_max - eps_at_min) / span;
        let a = eps_at_min - b * t_min;
        Ok(Some(DeformationPlane::new(
            a,
            -b * theta.sin(),
            b * theta.cos(),
        )))
    }
}
