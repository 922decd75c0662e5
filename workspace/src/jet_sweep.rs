use std::{ fs::{ self, File }, path::PathBuf };
use ndarray as nd;
use ndarray_npy::NpzWriter;
use symstab::{ config::Config, growth, normalize, sweep::Sweep };

fn main() -> anyhow::Result<()> {
    let config = Config::default();
    let sweep = Sweep::new(&config)?;
    let result = sweep.run()?;
    for warning in result.warnings.iter() {
        eprintln!("warning: {warning}");
    }

    let field = growth::compute_growth_rates(
        &result.eigen_value,
        &result.lambda,
        &result.m2,
        &config.viscosity,
        config.f,
    )?;
    let summary = growth::extract_unstable_mode(&field);
    let k_ref = sweep.reference_index()?;
    let eigfns = normalize::normalize(&result.psi, k_ref)?;

    let unstable = sweep.jet().unstable_region(&result.x);
    let unstable_x: Vec<f64>
        = result.x.iter().zip(&unstable)
        .filter_map(|(x, u)| u.then_some(*x))
        .collect();
    match (unstable_x.first(), unstable_x.last()) {
        (Some(x0), Some(x1)) => println!(
            "f ζ < 0 for x in [{:.1}, {:.1}] km ({} points)",
            x0 / 1e3, x1 / 1e3, unstable_x.len(),
        ),
        _ => println!("f ζ ≥ 0 everywhere"),
    }
    println!("reference point: x = {:.1} km", result.x[k_ref] / 1e3);
    println!("{:>12} {:>10} {:>12} {:>10}", "A_r", "λ* (m)", "σ*/f", "days");
    for (((a, l), s), t) in summary.viscosity.iter()
        .zip(&summary.lambda_star)
        .zip(&summary.sigma_star)
        .zip(&summary.timescale_days)
    {
        println!("{:12.3e} {:10.1} {:12.4} {:10.3}", a, l, s / config.f, t);
    }

    let eigen_re: nd::Array1<f64> = result.eigen_value.mapv(|z| z.re);
    let eigen_im: nd::Array1<f64> = result.eigen_value.mapv(|z| z.im);
    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;
    let file = File::create(outdir.join("jet_sweep.npz"))?;
    let mut writer = NpzWriter::new(file);
    writer.add_array("x", &result.x)?;
    writer.add_array("zeta", sweep.zeta())?;
    writer.add_array("unstable", &unstable.mapv(u8::from))?;
    writer.add_array("lambda", &result.lambda)?;
    writer.add_array("m2", &result.m2)?;
    writer.add_array("eigen_value_re", &eigen_re)?;
    writer.add_array("eigen_value_im", &eigen_im)?;
    writer.add_array("psi", &result.psi)?;
    writer.add_array("viscosity", &field.viscosity)?;
    writer.add_array("sigma", &field.sigma)?;
    writer.add_array("sigma_normalised", &field.sigma_normalised)?;
    writer.add_array("lambda_star", &summary.lambda_star)?;
    writer.add_array("sigma_star", &summary.sigma_star)?;
    writer.add_array("timescale_days", &summary.timescale_days)?;
    writer.add_array("psi_sign_corrected", &eigfns.sign_corrected)?;
    writer.add_array("psi_area_normalized", &eigfns.area_normalized)?;
    writer.add_array("psi_max_normalized", &eigfns.max_normalized)?;
    writer.finish()?;
    Ok(())
}
