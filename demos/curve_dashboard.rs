// Example: curve_dashboard.rs
// Evaluates the option-price curve and the holder profit curve over the
// configured spot range and writes both as SVG charts plus CSV tables.
//
// Usage:
//     cargo run --example curve_dashboard -- [config.toml] [output_dir]
//
// Without a config file the curve preset is used (K=13, S=5..30 step 0.5,
// premiums priced at S=12.25, 1000 days to expiry).

use std::env;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use payoff_lib::render::{curve_svg, profit_curve_svg, write_curve_csv, write_profit_curve_csv, write_svg};
use payoff_lib::{default_configs, evaluate_curve, evaluate_profit_curve, DashboardConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => DashboardConfig::from_file(path)?,
        None => default_configs::curve(),
    };
    let out_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let params = config.parameters;
    println!("Option price curve");
    println!("==================");
    println!(
        "q = {:.2}%, r = {:.2}%, vol = {:.0}%, days = {} (t = {:.4}y)",
        params.dividend_yield * 100.0,
        params.risk_free_rate * 100.0,
        params.volatility * 100.0,
        params.days_to_expiry,
        params.years_to_expiry()
    );

    let spots = config.curve.spots.build()?;
    let curve = evaluate_curve(spots.values(), config.curve.strike, &params)?;

    println!("\n  S      | Call      | Put");
    for p in curve.points.iter().step_by(5) {
        println!(
            "  {:6.2} | {:9.4} | {:9.4}",
            p.spot, p.result.call_value, p.result.put_value
        );
    }

    write_svg(out_dir.join("option_curve.svg"), &curve_svg(&curve)?)?;
    write_curve_csv(&curve, File::create(out_dir.join("option_curve.csv"))?)?;

    let reference = config.curve.reference_point();
    let profit = evaluate_profit_curve(spots.values(), reference, &params)?;
    let (call_be, put_be) = profit.break_even();
    println!(
        "\nPremiums at S = {}: call {:.4}, put {:.4}",
        reference.spot, profit.call_premium, profit.put_premium
    );
    println!("Break-even: call above {:.4}, put below {:.4}", call_be, put_be);

    write_svg(out_dir.join("profit_curve.svg"), &profit_curve_svg(&profit)?)?;
    write_profit_curve_csv(&profit, File::create(out_dir.join("profit_curve.csv"))?)?;

    println!("\nCharts saved to {}", out_dir.display());
    Ok(())
}
