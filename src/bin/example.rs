//! Section Capacity Example - EHE rectangular column

use anyhow::Context;
use nalgebra::Point2;
use section_capacity::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Section Capacity Example: 0.2 m x 0.4 m RC Column ===\n");

    // Materials: HA-25 concrete and B500S reinforcement, design diagrams
    let mut section = FiberSection::new();
    let concrete = section.add_material(ConcreteGrade::ha25().design()?);
    let steel = section.add_material(ReinforcementGrade::b500s().design()?);

    // Concrete core: 0.2 m wide (y), 0.4 m deep (z)
    section.add_region(
        &RegionShape::rectangle(-0.1, -0.2, 0.1, 0.2),
        concrete,
        10,
        20,
    )?;

    // Two 16 mm bars top and bottom, 50 mm cover to bar center
    let bar_area = std::f64::consts::PI * 0.008_f64.powi(2);
    for z in [-0.15, 0.15] {
        let layer = BarLayout::Straight {
            start: Point2::new(-0.07, z),
            end: Point2::new(0.07, z),
            bars: 2,
        };
        section.add_reinforcement_layer(&layer, bar_area, steel)?;
    }

    println!("Section:");
    println!("  fibers:    {}", section.fiber_count());
    println!("  area:      {:.4} m2", section.area()?);
    let moments = section.second_moments()?;
    println!("  Iy:        {:.6e} m4", moments.iy);
    println!("  Iz:        {:.6e} m4", moments.iz);

    // Sweep the limit planes and assemble the envelope
    println!("\nBuilding interaction diagram...");
    let diagram = DiagramBuilder::new()
        .with_angles(48)
        .with_levels(25)
        .build(&section)
        .context("diagram build failed")?;
    println!(
        "  rows: {}, warnings: {}",
        diagram.rows().len(),
        diagram.warnings().len()
    );
    println!(
        "  pure tension:     {:>10.1} kN",
        diagram.pure_tension() / 1000.0
    );
    println!(
        "  pure compression: {:>10.1} kN",
        diagram.pure_compression() / 1000.0
    );

    // Capacity factors for a few load combinations (N in N, M in N.m)
    let loads = [
        ("full tensile capacity", InternalForces::axial(diagram.pure_tension())),
        ("half tensile capacity", InternalForces::axial(diagram.pure_tension() / 2.0)),
        ("compression + strong-axis moment", InternalForces::new(-4e5, 6e4, 0.0)),
        ("compression + biaxial moment", InternalForces::new(-3e5, 4e4, 1.5e4)),
        ("over-stressed bending", InternalForces::new(-1e5, 2e5, 0.0)),
    ];

    println!("\nCapacity factors:");
    for (label, load) in &loads {
        match diagram.capacity_factor(load) {
            Ok(cf) => println!(
                "  {label:35} N={:>8.1} kN  |M|={:>7.1} kN.m  CF={cf:.3}",
                load.n / 1000.0,
                load.moment_magnitude() / 1000.0
            ),
            Err(SectionError::OutOfRange) => {
                println!("  {label:35} out of range of the diagram")
            }
            Err(e) => return Err(e).context("capacity query failed"),
        }
    }

    // Flat-text dump for offline inspection
    let mut dump = Vec::new();
    diagram.write_points(&mut dump)?;
    println!("\nPoint dump: {} bytes ({} points)", dump.len(), 48 * 25);

    println!("\n=== Done ===");
    Ok(())
}
