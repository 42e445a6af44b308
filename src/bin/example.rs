//! Laminate Solver Example - 20-ply T300/5208 panel under membrane load

use anyhow::Result;
use laminate_solver::math::{Mat3, Vec3};
use laminate_solver::prelude::*;

fn print_matrix(label: &str, m: &Mat3) {
    println!("{label}:");
    for i in 0..3 {
        println!(
            "  {:14.4e} {:14.4e} {:14.4e}",
            m[(i, 0)],
            m[(i, 1)],
            m[(i, 2)]
        );
    }
}

fn fmt_vec(v: &Vec3) -> String {
    format!("[{:.4e}, {:.4e}, {:.4e}]", v[0], v[1], v[2])
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Laminate Solver Example: 20-ply T300/5208 ===\n");

    let materials = MaterialCatalog::with_defaults();
    let angles = [
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0,
    ];
    let layup = LayupSpec::uniform(&angles, 0.005, T300_5208);
    let laminate = Laminate::from_layup(&layup, &materials)?;

    println!(
        "Plies: {}, total thickness: {} in\n",
        laminate.ply_count(),
        laminate.total_thickness()
    );
    print_matrix("A (lb/in)", laminate.a());
    print_matrix("B (lb)", laminate.b());
    print_matrix("D (lb-in)", laminate.d());
    println!(
        "ABD condition estimate: {:.3e}\n",
        laminate.condition_estimate()
    );

    let load = LoadState::new([6251.9936, 0.0, 2500.176], [0.0, 0.0, 0.0]);
    let analysis = laminate.analyze(&load, &SolverOptions::default().with_logging())?;

    println!("Midplane strain: {}", fmt_vec(&analysis.response.midplane_strain));
    println!("Curvature:       {}\n", fmt_vec(&analysis.response.curvature));

    println!("Ply states (material axes):");
    println!(
        "  {:>3} {:>6} {:>10} {:>14} {:>14} {:>14}",
        "ply", "angle", "z_mid", "sigma_1", "sigma_2", "tau_12"
    );
    for s in &analysis.plies {
        println!(
            "  {:>3} {:>6.1} {:>10.4} {:>14.2} {:>14.2} {:>14.2}",
            s.ply, s.angle, s.z_mid, s.local_stress[0], s.local_stress[1], s.local_stress[2]
        );
    }

    if let Some(critical) = analysis.max_fiber_stress() {
        println!(
            "\nLargest fiber stress: ply {} at {:.2} psi",
            critical.ply, critical.local_stress[0]
        );
    }

    let ec = &analysis.engineering_constants;
    println!("\nEngineering constants:");
    println!("  Ex   = {:.4e} psi", ec.ex);
    println!("  Ey   = {:.4e} psi", ec.ey);
    println!("  Gxy  = {:.4e} psi", ec.gxy);
    println!("  nuxy = {:.4}", ec.nu_xy);
    println!("  nuyx = {:.4}", ec.nu_yx);

    let layup = &analysis.layup;
    println!("\nLayup ({} plies):", layup.total_plies);
    println!("  0 deg:      {:5.1}%", layup.zero_percent);
    println!("  +/-45 deg:  {:5.1}%", layup.plus_minus_45_percent);
    println!("  90 deg:     {:5.1}%", layup.ninety_percent);

    println!("\n=== Component presets ===\n");
    let components = ComponentCatalog::with_defaults();
    let conditions = FlightConditions::new(800.0, 0.002377, 4.0)
        .with_axial_load(1500.0)
        .with_bending_moment(2000.0);
    for name in components.names() {
        let result = components
            .require(name)?
            .analyze(&conditions, &materials, &SolverOptions::default())?;
        println!(
            "{:<18} N = {}  M = {}",
            name,
            fmt_vec(&result.analysis.load.forces),
            fmt_vec(&result.analysis.load.moments)
        );
    }

    Ok(())
}
