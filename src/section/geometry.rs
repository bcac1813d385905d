//! Geometric regions and bar layouts for section discretization
//!
//! Positions are `Point2<f64>` whose components are the section-local
//! (y, z) coordinates. Sampling is deterministic: identical inputs always
//! produce identical fiber grids.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};

/// A 2D patch of section material to be discretized into fibers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionShape {
    /// Axis-aligned rectangle between two corners
    Rectangle {
        /// Corner with minimum (y, z)
        corner_min: Point2<f64>,
        /// Corner with maximum (y, z)
        corner_max: Point2<f64>,
    },
    /// Annular sector (full circles and rings are the `0..2*PI` span)
    AnnularSector {
        /// Center of the circle
        center: Point2<f64>,
        /// Inner radius (zero for a solid sector)
        inner_radius: f64,
        /// Outer radius
        outer_radius: f64,
        /// Start of the angular span (radians)
        start_angle: f64,
        /// End of the angular span (radians)
        end_angle: f64,
    },
}

impl RegionShape {
    /// Full rectangle helper
    pub fn rectangle(y_min: f64, z_min: f64, y_max: f64, z_max: f64) -> Self {
        Self::Rectangle {
            corner_min: Point2::new(y_min, z_min),
            corner_max: Point2::new(y_max, z_max),
        }
    }

    /// Solid circle helper
    pub fn circle(center: Point2<f64>, radius: f64) -> Self {
        Self::AnnularSector {
            center,
            inner_radius: 0.0,
            outer_radius: radius,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
        }
    }

    fn validate(&self) -> SectionResult<()> {
        match self {
            RegionShape::Rectangle {
                corner_min,
                corner_max,
            } => {
                if corner_max.x <= corner_min.x || corner_max.y <= corner_min.y {
                    return Err(SectionError::InvalidGeometry(
                        "rectangle corners must satisfy min < max on both axes".to_string(),
                    ));
                }
            }
            RegionShape::AnnularSector {
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                ..
            } => {
                if *inner_radius < 0.0 || *outer_radius <= *inner_radius {
                    return Err(SectionError::InvalidGeometry(
                        "annular sector requires 0 <= inner radius < outer radius".to_string(),
                    ));
                }
                if *end_angle <= *start_angle {
                    return Err(SectionError::InvalidGeometry(
                        "annular sector requires a positive angular span".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Sample the patch into `n1 x n2` sub-fibers, each at its sub-patch
    /// centroid with the exact sub-patch area
    ///
    /// For rectangles `n1` divides y and `n2` divides z; for annular
    /// sectors `n1` is radial and `n2` circumferential.
    pub fn sample(&self, n1: usize, n2: usize) -> SectionResult<Vec<(Point2<f64>, f64)>> {
        if n1 == 0 || n2 == 0 {
            return Err(SectionError::InvalidInput(
                "region subdivisions must be positive".to_string(),
            ));
        }
        self.validate()?;

        let mut cells = Vec::with_capacity(n1 * n2);
        match self {
            RegionShape::Rectangle {
                corner_min,
                corner_max,
            } => {
                let dy = (corner_max.x - corner_min.x) / n1 as f64;
                let dz = (corner_max.y - corner_min.y) / n2 as f64;
                let area = dy * dz;
                for i in 0..n1 {
                    let y = corner_min.x + (i as f64 + 0.5) * dy;
                    for j in 0..n2 {
                        let z = corner_min.y + (j as f64 + 0.5) * dz;
                        cells.push((Point2::new(y, z), area));
                    }
                }
            }
            RegionShape::AnnularSector {
                center,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
            } => {
                let dr = (outer_radius - inner_radius) / n1 as f64;
                let dt = (end_angle - start_angle) / n2 as f64;
                for i in 0..n1 {
                    let r1 = inner_radius + i as f64 * dr;
                    let r2 = r1 + dr;
                    let area = 0.5 * (r2 * r2 - r1 * r1) * dt;
                    // Exact centroid radius of an annular sector cell
                    let rc = (2.0 / 3.0) * (r2.powi(3) - r1.powi(3)) / (r2 * r2 - r1 * r1)
                        * ((dt / 2.0).sin() / (dt / 2.0));
                    for j in 0..n2 {
                        let theta = start_angle + (j as f64 + 0.5) * dt;
                        let y = center.x + rc * theta.cos();
                        let z = center.y + rc * theta.sin();
                        cells.push((Point2::new(y, z), area));
                    }
                }
            }
        }
        Ok(cells)
    }
}

/// Arrangement of reinforcing bars within the section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BarLayout {
    /// Bars evenly spaced on a straight segment, endpoints included
    Straight {
        /// First bar position
        start: Point2<f64>,
        /// Last bar position
        end: Point2<f64>,
        /// Number of bars (a single bar sits at the segment midpoint)
        bars: usize,
    },
    /// Bars evenly spaced on a circle
    Circular {
        /// Center of the circle
        center: Point2<f64>,
        /// Circle radius
        radius: f64,
        /// Number of bars
        bars: usize,
        /// Angular position of the first bar (radians)
        start_angle: f64,
    },
}

impl BarLayout {
    /// Bar positions, in layout order
    pub fn positions(&self) -> SectionResult<Vec<Point2<f64>>> {
        match self {
            BarLayout::Straight { start, end, bars } => {
                if *bars == 0 {
                    return Err(SectionError::InvalidInput(
                        "bar layout requires at least one bar".to_string(),
                    ));
                }
                if *bars == 1 {
                    return Ok(vec![nalgebra::center(start, end)]);
                }
                let step = 1.0 / (*bars as f64 - 1.0);
                Ok((0..*bars)
                    .map(|i| {
                        let t = i as f64 * step;
                        Point2::new(
                            start.x + t * (end.x - start.x),
                            start.y + t * (end.y - start.y),
                        )
                    })
                    .collect())
            }
            BarLayout::Circular {
                center,
                radius,
                bars,
                start_angle,
            } => {
                if *bars == 0 {
                    return Err(SectionError::InvalidInput(
                        "bar layout requires at least one bar".to_string(),
                    ));
                }
                if *radius <= 0.0 {
                    return Err(SectionError::InvalidGeometry(
                        "circular bar layout requires a positive radius".to_string(),
                    ));
                }
                let dt = std::f64::consts::TAU / *bars as f64;
                Ok((0..*bars)
                    .map(|i| {
                        let theta = start_angle + i as f64 * dt;
                        Point2::new(
                            center.x + radius * theta.cos(),
                            center.y + radius * theta.sin(),
                        )
                    })
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_sampling_preserves_area() {
        let shape = RegionShape::rectangle(-0.1, -0.2, 0.1, 0.2);
        let cells = shape.sample(4, 10).unwrap();
        assert_eq!(cells.len(), 40);
        let total: f64 = cells.iter().map(|(_, a)| a).sum();
        assert_relative_eq!(total, 0.08, max_relative = 1e-12);
    }

    #[test]
    fn test_rectangle_sampling_is_symmetric() {
        let shape = RegionShape::rectangle(-0.1, -0.2, 0.1, 0.2);
        let cells = shape.sample(4, 10).unwrap();
        let sy: f64 = cells.iter().map(|(p, a)| p.x * a).sum();
        let sz: f64 = cells.iter().map(|(p, a)| p.y * a).sum();
        assert_relative_eq!(sy, 0.0, epsilon = 1e-15);
        assert_relative_eq!(sz, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_circle_sampling_approximates_area_exactly() {
        // Cell areas are exact sector areas, so they sum to the circle area
        let shape = RegionShape::circle(Point2::new(0.0, 0.0), 0.25);
        let cells = shape.sample(8, 16).unwrap();
        let total: f64 = cells.iter().map(|(_, a)| a).sum();
        assert_relative_eq!(
            total,
            std::f64::consts::PI * 0.25 * 0.25,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_degenerate_shapes_rejected() {
        assert!(RegionShape::rectangle(0.1, 0.0, 0.1, 0.2).sample(2, 2).is_err());
        assert!(RegionShape::circle(Point2::new(0.0, 0.0), 0.0)
            .sample(2, 2)
            .is_err());
        assert!(RegionShape::rectangle(0.0, 0.0, 0.1, 0.2).sample(0, 2).is_err());
    }

    #[test]
    fn test_straight_layout_endpoints() {
        let layout = BarLayout::Straight {
            start: Point2::new(-0.07, -0.15),
            end: Point2::new(0.07, -0.15),
            bars: 2,
        };
        let pos = layout.positions().unwrap();
        assert_eq!(pos.len(), 2);
        assert_relative_eq!(pos[0].x, -0.07);
        assert_relative_eq!(pos[1].x, 0.07);
        assert_relative_eq!(pos[0].y, -0.15);
    }

    #[test]
    fn test_single_bar_sits_at_midpoint() {
        let layout = BarLayout::Straight {
            start: Point2::new(0.0, 0.0),
            end: Point2::new(0.1, 0.2),
            bars: 1,
        };
        let pos = layout.positions().unwrap();
        assert_relative_eq!(pos[0].x, 0.05);
        assert_relative_eq!(pos[0].y, 0.1);
    }

    #[test]
    fn test_circular_layout_radius() {
        let layout = BarLayout::Circular {
            center: Point2::new(0.0, 0.0),
            radius: 0.12,
            bars: 8,
            start_angle: 0.0,
        };
        let pos = layout.positions().unwrap();
        assert_eq!(pos.len(), 8);
        for p in &pos {
            assert_relative_eq!(p.coords.norm(), 0.12, max_relative = 1e-12);
        }
    }
}
