//! Interaction diagrams: the queryable (N, My, Mz) strength envelope

mod builder;
mod io;

pub use builder::DiagramBuilder;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};
use crate::plane::InternalForces;

/// Moment fraction below which a load ray is treated as pure axial
const AXIAL_RAY_TOL: f64 = 1e-9;

/// Tolerance on the barycentric coordinates of ray/patch intersections
const BARY_TOL: f64 = 1e-9;

/// One computed boundary point of the admissible (N, My, Mz) region,
/// tagged with the sweep cell that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    /// Axial force (positive = tension)
    pub n: f64,
    /// Bending moment about the local y axis
    pub my: f64,
    /// Bending moment about the local z axis
    pub mz: f64,
    /// Index of the neutral-axis orientation that produced the point
    pub angle_idx: usize,
    /// Index along the compression-to-tension continuum
    pub level_idx: usize,
}

impl DiagramPoint {
    /// The point as a force triple
    pub fn forces(&self) -> InternalForces {
        InternalForces::new(self.n, self.my, self.mz)
    }

    fn vertex(&self) -> Vector3<f64> {
        Vector3::new(self.my, self.mz, self.n)
    }
}

/// A non-fatal irregularity recorded while sweeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepWarning {
    /// Angle index of the affected row
    pub angle_idx: usize,
    /// Neutral-axis orientation of the affected row (radians)
    pub theta: f64,
    /// Human-readable cause
    pub reason: String,
}

/// One angle row: the boundary polyline for a fixed neutral-axis
/// orientation, ordered from pure compression to pure tension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleRow {
    /// Neutral-axis orientation that generated the row (radians)
    pub theta: f64,
    /// Boundary points, compression first
    pub points: Vec<DiagramPoint>,
}

/// The strength envelope of a fiber section
///
/// Built once by [`DiagramBuilder`], immutable afterwards; queries take
/// `&self` and the diagram is safe to share across threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDiagram {
    /// Angle rows in neutral-axis orientation order
    rows: Vec<AngleRow>,
    /// Requested angular resolution
    n_angles: usize,
    /// Requested levels per angle
    n_levels: usize,
    /// Irregularities recorded during the sweep
    warnings: Vec<SweepWarning>,
}

impl InteractionDiagram {
    pub(crate) fn from_rows(
        mut rows: Vec<AngleRow>,
        n_angles: usize,
        n_levels: usize,
        warnings: Vec<SweepWarning>,
    ) -> SectionResult<Self> {
        if rows.is_empty() {
            return Err(SectionError::SweepFailed(
                "every angle row was degenerate".to_string(),
            ));
        }
        rows.sort_by(|a, b| a.theta.total_cmp(&b.theta));
        Ok(Self {
            rows,
            n_angles,
            n_levels,
            warnings,
        })
    }

    /// Angle rows in neutral-axis orientation order
    pub fn rows(&self) -> &[AngleRow] {
        &self.rows
    }

    /// Requested angular resolution
    pub fn n_angles(&self) -> usize {
        self.n_angles
    }

    /// Requested levels per angle
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    /// Warnings recorded during the sweep
    pub fn warnings(&self) -> &[SweepWarning] {
        &self.warnings
    }

    /// Axial capacity at the pure-compression end of the sweep (negative)
    pub fn pure_compression(&self) -> f64 {
        self.rows
            .iter()
            .filter_map(|r| r.points.first())
            .map(|p| p.n)
            .fold(f64::INFINITY, f64::min)
    }

    /// Axial capacity at the pure-tension end of the sweep
    /// (zero for sections with no tensile capacity)
    pub fn pure_tension(&self) -> f64 {
        self.rows
            .iter()
            .filter_map(|r| r.points.last())
            .map(|p| p.n)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Capacity factor of an applied load point
    ///
    /// The ray from the origin through the load point is intersected with
    /// the stored envelope surface, triangulated between adjacent angle
    /// rows. Near the axial poles the moment directions of neighboring
    /// points can zigzag and the triangulated strip folds onto itself; the
    /// boundary of the enclosed region is then the outermost crossing, so
    /// the query keeps the largest intersection scale. CF = 1 on the
    /// boundary, CF < 1 inside (reserve is 1/CF), CF > 1 over-stressed.
    /// The origin itself maps to CF = 0. Returns
    /// [`SectionError::OutOfRange`] when the ray misses the stored
    /// surface, so callers can never mistake it for a valid utilization.
    pub fn capacity_factor(&self, load: &InternalForces) -> SectionResult<f64> {
        if load.n == 0.0 && load.my == 0.0 && load.mz == 0.0 {
            return Ok(0.0);
        }
        if load.moment_magnitude() <= AXIAL_RAY_TOL * load.n.abs() {
            return self.axial_capacity_factor(load.n);
        }

        let dir = Vector3::new(load.my, load.mz, load.n);
        let mut best: Option<f64> = None;
        let n_rows = self.rows.len();
        for i in 0..n_rows {
            let row_a = &self.rows[i];
            let row_b = &self.rows[(i + 1) % n_rows];
            // Matched-level quads between the two polylines, split into
            // triangles; the quads collapse cleanly at the axial poles
            let levels = row_a.points.len().min(row_b.points.len());
            for j in 0..levels.saturating_sub(1) {
                let a0 = row_a.points[j].vertex();
                let a1 = row_a.points[j + 1].vertex();
                let b0 = row_b.points[j].vertex();
                let b1 = row_b.points[j + 1].vertex();
                for (p, q, r) in [(a0, a1, b1), (a0, b1, b0)] {
                    if let Some(k) = ray_triangle_scale(&dir, &p, &q, &r) {
                        best = Some(best.map_or(k, |b| b.max(k)));
                    }
                }
            }
        }
        match best {
            Some(k) => Ok(1.0 / k),
            None => Err(SectionError::OutOfRange),
        }
    }

    /// Capacity factor for a pure axial ray. The envelope patches collapse
    /// toward the N axis at the sweep poles, so the ray is resolved
    /// directly against the shared pure-compression and pure-tension
    /// endpoints.
    fn axial_capacity_factor(&self, n: f64) -> SectionResult<f64> {
        let capacity = if n > 0.0 {
            self.pure_tension()
        } else {
            self.pure_compression()
        };
        if capacity.abs() <= AXIAL_RAY_TOL * n.abs() || capacity.signum() != n.signum() {
            return Err(SectionError::OutOfRange);
        }
        Ok(n / capacity)
    }
}

/// Positive scale `k` such that `k * dir` lies on the triangle
/// `(a, b, c)`: the Moller-Trumbore solve with the ray anchored at the
/// origin, tolerant at the triangle edges so rays through shared edges
/// and vertices register from either side
fn ray_triangle_scale(
    dir: &Vector3<f64>,
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    c: &Vector3<f64>,
) -> Option<f64> {
    let e1 = *b - *a;
    let e2 = *c - *a;
    let p = dir.cross(&e2);
    let det = e1.dot(&p);
    if det.abs() <= 1e-14 * dir.norm() * e1.norm() * e2.norm() {
        return None;
    }
    let inv = 1.0 / det;
    let origin_to_a = -*a;
    let u = origin_to_a.dot(&p) * inv;
    if !(-BARY_TOL..=1.0 + BARY_TOL).contains(&u) {
        return None;
    }
    let q = origin_to_a.cross(&e1);
    let v = dir.dot(&q) * inv;
    if v < -BARY_TOL || u + v > 1.0 + BARY_TOL {
        return None;
    }
    let k = e2.dot(&q) * inv;
    (k > 0.0).then_some(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(n: f64, my: f64, mz: f64, angle_idx: usize, level_idx: usize) -> DiagramPoint {
        DiagramPoint {
            n,
            my,
            mz,
            angle_idx,
            level_idx,
        }
    }

    /// Hand-built octahedral envelope: rows along the four moment
    /// half-axes, each a compression -> tension polyline bulging to
    /// moment 10 at N = 0
    fn diamond() -> InteractionDiagram {
        let dirs = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
        let rows = dirs
            .iter()
            .enumerate()
            .map(|(i, (cy, cz))| AngleRow {
                theta: i as f64,
                points: vec![
                    point(-100.0, 0.0, 0.0, i, 0),
                    point(0.0, 10.0 * cy, 10.0 * cz, i, 1),
                    point(50.0, 0.0, 0.0, i, 2),
                ],
            })
            .collect();
        InteractionDiagram::from_rows(rows, 4, 3, Vec::new()).unwrap()
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let d = diamond();
        assert_eq!(d.capacity_factor(&InternalForces::new(0.0, 0.0, 0.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_axial_endpoints() {
        let d = diamond();
        assert_relative_eq!(d.pure_compression(), -100.0);
        assert_relative_eq!(d.pure_tension(), 50.0);
        let cf = d.capacity_factor(&InternalForces::axial(50.0)).unwrap();
        assert_relative_eq!(cf, 1.0, max_relative = 1e-12);
        let cf = d.capacity_factor(&InternalForces::axial(-50.0)).unwrap();
        assert_relative_eq!(cf, 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_row_aligned_moment_query() {
        let d = diamond();
        // On-axis pure moment: boundary at My = 10
        let cf = d.capacity_factor(&InternalForces::new(0.0, 5.0, 0.0)).unwrap();
        assert_relative_eq!(cf, 0.5, max_relative = 1e-12);
        let cf = d.capacity_factor(&InternalForces::new(0.0, 0.0, 10.0)).unwrap();
        assert_relative_eq!(cf, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_stored_vertices_sit_on_boundary() {
        let d = diamond();
        for row in d.rows() {
            let mid = &row.points[1];
            let cf = d.capacity_factor(&mid.forces()).unwrap();
            assert_relative_eq!(cf, 1.0, max_relative = 1e-12);
        }
    }

    /// Near the tension pole the moment components are tiny and their
    /// directions can zigzag between neighboring points, folding the
    /// triangulated strip onto itself. The stored vertices must still
    /// query back to CF = 1 through the fold.
    #[test]
    fn test_folded_strip_vertices_stay_on_boundary() {
        let tops = [
            (-1.0, 0.1),
            (-1.5, -0.6),
            (-1.6, 0.4),
            (0.9, -0.2),
        ];
        let mids = [(6.0, 0.5), (0.5, 6.0), (-6.0, 0.4), (0.4, -6.0)];
        let rows = (0..4)
            .map(|i| AngleRow {
                theta: i as f64,
                points: vec![
                    point(-100.0, 0.0, 0.0, i, 0),
                    point(80.0, mids[i].0, mids[i].1, i, 1),
                    point(100.0, tops[i].0, tops[i].1, i, 2),
                ],
            })
            .collect();
        let d = InteractionDiagram::from_rows(rows, 4, 3, Vec::new()).unwrap();
        for row in d.rows() {
            for p in &row.points[1..] {
                let cf = d.capacity_factor(&p.forces()).unwrap();
                assert_relative_eq!(cf, 1.0, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_scaling_law() {
        let d = diamond();
        let p = InternalForces::new(-20.0, 4.0, 3.0);
        let cf = d.capacity_factor(&p).unwrap();
        for k in [0.1, 0.5, 2.0, 7.3] {
            let cf_k = d.capacity_factor(&p.scaled(k)).unwrap();
            assert_relative_eq!(cf_k, k * cf, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_intermediate_sector_query() {
        let d = diamond();
        // 45 degrees between the My and Mz rows: the boundary is the
        // octahedron edge My + Mz = 10 at N = 0, hit at (0, 5, 5)
        let cf = d
            .capacity_factor(&InternalForces::new(0.0, 7.0, 7.0))
            .unwrap();
        assert_relative_eq!(cf, 1.4, max_relative = 1e-12);
    }

    #[test]
    fn test_wraparound_sector_query() {
        let d = diamond();
        // Sector between the last row (-Mz) and the first (+My)
        let cf = d
            .capacity_factor(&InternalForces::new(0.0, 7.0, -7.0))
            .unwrap();
        assert_relative_eq!(cf, 1.4, max_relative = 1e-12);
    }

    #[test]
    fn test_empty_diagram_rejected() {
        assert!(InteractionDiagram::from_rows(Vec::new(), 4, 3, Vec::new()).is_err());
    }
}
