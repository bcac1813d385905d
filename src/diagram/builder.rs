//! Sweep orchestration: from a fiber section to an interaction diagram

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diagram::{AngleRow, DiagramPoint, InteractionDiagram, SweepWarning};
use crate::error::{SectionError, SectionResult};
use crate::section::FiberSection;
use crate::sweep::LimitPlanes;

/// Options for building an interaction diagram
///
/// Every sweep cell is independent: each (angle, level) pair reads only the
/// immutable section and writes its own grid slot, so angle rows are
/// computed in parallel without synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramBuilder {
    /// Number of neutral-axis orientations over the full circle
    pub n_angles: usize,
    /// Number of levels per orientation, pure compression to pure tension
    pub n_levels: usize,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self {
            n_angles: 48,
            n_levels: 25,
        }
    }
}

impl DiagramBuilder {
    /// Builder with default resolution
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the angular resolution
    pub fn with_angles(mut self, n_angles: usize) -> Self {
        self.n_angles = n_angles;
        self
    }

    /// Set the number of levels per angle
    pub fn with_levels(mut self, n_levels: usize) -> Self {
        self.n_levels = n_levels;
        self
    }

    /// Sweep the section and assemble its interaction diagram
    ///
    /// Degenerate orientations and unusable rows are skipped and recorded
    /// as warnings on the diagram; the build fails only when no usable row
    /// remains (or the section/options are invalid).
    pub fn build(&self, section: &FiberSection) -> SectionResult<InteractionDiagram> {
        if self.n_angles < 4 {
            return Err(SectionError::InvalidInput(
                "a closed envelope surface needs at least 4 angles".to_string(),
            ));
        }
        if self.n_levels < 3 {
            return Err(SectionError::InvalidInput(
                "a sweep needs at least 3 levels per angle".to_string(),
            ));
        }

        let planes = LimitPlanes::new(section)?;
        let n_levels = self.n_levels;

        let swept: Vec<(Option<(f64, Vec<DiagramPoint>)>, Vec<SweepWarning>)> = (0..self
            .n_angles)
            .into_par_iter()
            .map(|angle_idx| self.sweep_row(section, &planes, angle_idx))
            .collect::<SectionResult<_>>()?;

        let mut rows = Vec::with_capacity(self.n_angles);
        let mut warnings = Vec::new();
        for (row, mut row_warnings) in swept {
            if let Some((theta, points)) = row {
                rows.push(AngleRow { theta, points });
            }
            warnings.append(&mut row_warnings);
        }
        for warning in &warnings {
            log::warn!(
                "sweep warning at angle {} (theta {:.4} rad): {}",
                warning.angle_idx,
                warning.theta,
                warning.reason
            );
        }
        log::debug!(
            "interaction diagram built: {} of {} angle rows, {} levels",
            rows.len(),
            self.n_angles,
            n_levels
        );

        InteractionDiagram::from_rows(rows, self.n_angles, n_levels, warnings)
    }

    /// Sweep one angle row; `Ok((None, warnings))` marks an omitted row
    #[allow(clippy::type_complexity)]
    fn sweep_row(
        &self,
        section: &FiberSection,
        planes: &LimitPlanes<'_>,
        angle_idx: usize,
    ) -> SectionResult<(Option<(f64, Vec<DiagramPoint>)>, Vec<SweepWarning>)> {
        let theta = std::f64::consts::TAU * angle_idx as f64 / self.n_angles as f64;
        let mut points = Vec::with_capacity(self.n_levels);
        let mut warnings = Vec::new();

        for level_idx in 0..self.n_levels {
            let plane = match planes.plane_at(theta, level_idx, self.n_levels)? {
                Some(plane) => plane,
                None => {
                    warnings.push(SweepWarning {
                        angle_idx,
                        theta,
                        reason: "projected section is degenerate at this orientation"
                            .to_string(),
                    });
                    return Ok((None, warnings));
                }
            };
            // The level schedule pins strains at the limits, so a violation
            // here means a fiber sits outside the pinned extremes
            if !section.within_limits(&plane) {
                warnings.push(SweepWarning {
                    angle_idx,
                    theta,
                    reason: format!("level {level_idx} pushes a fiber past its strain limit"),
                });
                continue;
            }
            let r = section.resultant(&plane)?;
            points.push(DiagramPoint {
                n: r.n,
                my: r.my,
                mz: r.mz,
                angle_idx,
                level_idx,
            });
        }

        if points.len() < 2 {
            warnings.push(SweepWarning {
                angle_idx,
                theta,
                reason: format!("only {} valid levels, row omitted", points.len()),
            });
            return Ok((None, warnings));
        }
        Ok((Some((theta, points)), warnings))
    }
}
