use ndarray as nd;
use symstab::{ config::Config, growth, sweep::Sweep, units };

fn main() -> anyhow::Result<()> {
    let base = Config::default();
    let config = base.with_viscosity(nd::array![base.a_r]);
    let sweep = Sweep::new(&config)?;
    let result = sweep.run()?;
    let field = growth::compute_growth_rates(
        &result.eigen_value,
        &result.lambda,
        &result.m2,
        &config.viscosity,
        config.f,
    )?;
    let summary = growth::extract_unstable_mode(&field);

    let jet = sweep.jet();
    println!("inviscid bound σ/f  = {:.4}", jet.inviscid_growth_bound() / jet.f);
    println!("A_r                 = {:.1e} m²/s", config.a_r);
    println!("λ*                  = {:.1} m", summary.lambda_star[0]);
    println!("m*                  = {:.4} 1/m",
        units::wavenumber(summary.lambda_star[0]));
    println!("σ*/f                = {:.4}", summary.sigma_star[0] / config.f);
    println!("e-folding time      = {:.3} days", summary.timescale_days[0]);
    Ok(())
}
