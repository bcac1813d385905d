//! Section Capacity - fiber-section strength envelopes
//!
//! This library computes the interaction diagram (the 3D surface of
//! (N, My, Mz) combinations a cross-section can sustain at the ultimate
//! limit state) for sections discretized into material fibers, and answers
//! how close an applied load point is to failure:
//! - Nonlinear uniaxial material laws (concrete, reinforcement, elastic)
//! - Fiber sections built from geometric regions and reinforcement layers
//! - A parametric sweep over limit-state deformation planes
//! - Capacity-factor queries by ray intersection with the envelope
//!
//! ## Example
//! ```rust
//! use section_capacity::prelude::*;
//! use nalgebra::Point2;
//!
//! // 0.2 m x 0.4 m concrete column with two bars top and bottom
//! let mut section = FiberSection::new();
//! let concrete = section.add_material(ConcreteGrade::ha25().design().unwrap());
//! let steel = section.add_material(ReinforcementGrade::b500s().design().unwrap());
//! section
//!     .add_region(&RegionShape::rectangle(-0.1, -0.2, 0.1, 0.2), concrete, 4, 8)
//!     .unwrap();
//! for z in [-0.15, 0.15] {
//!     let layer = BarLayout::Straight {
//!         start: Point2::new(-0.07, z),
//!         end: Point2::new(0.07, z),
//!         bars: 2,
//!     };
//!     section.add_reinforcement_layer(&layer, 2.01e-4, steel).unwrap();
//! }
//!
//! // Sweep the failure planes and assemble the envelope
//! let diagram = DiagramBuilder::new()
//!     .with_angles(8)
//!     .with_levels(9)
//!     .build(&section)
//!     .unwrap();
//!
//! // How close is this load combination to the boundary?
//! let cf = diagram
//!     .capacity_factor(&InternalForces::new(-3e5, 2e4, 0.0))
//!     .unwrap();
//! assert!(cf > 0.0);
//! ```

pub mod diagram;
pub mod error;
pub mod materials;
pub mod plane;
pub mod section;
pub mod sweep;

// Re-export common types
pub mod prelude {
    pub use crate::diagram::{
        AngleRow, DiagramBuilder, DiagramPoint, InteractionDiagram, SweepWarning,
    };
    pub use crate::error::{SectionError, SectionResult};
    pub use crate::materials::{
        ConcreteGrade, ConcreteLaw, ElasticLaw, ReinforcementGrade, ReinforcementLaw, UniaxialLaw,
    };
    pub use crate::plane::{DeformationPlane, InternalForces};
    pub use crate::section::{
        BarLayout, Fiber, FiberSection, MaterialId, RegionShape, SecondMoments,
    };
    pub use crate::sweep::LimitPlanes;
}
