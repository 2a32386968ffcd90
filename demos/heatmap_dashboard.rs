// Example: heatmap_dashboard.rs
// Evaluates the N(d2) and call-price heatmaps over the configured (S, K) grid
// and writes each as an annotated SVG heatmap plus a pivoted CSV table.
//
// Usage:
//     cargo run --example heatmap_dashboard -- [config.toml] [output_dir]
//
// Without a config file the heatmap preset is used (both axes 5..29 step 1.5,
// 200 days to expiry).

use std::env;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use payoff_lib::render::{heatmap_svg, heatmap_title, write_grid_csv, write_svg};
use payoff_lib::{default_configs, evaluate_grid, DashboardConfig, GridField};

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
        None => default_configs::heatmap(),
    };
    let out_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let spots = config.grid.spot_axis.build()?;
    let strikes = config.grid.strike_axis.build()?;
    println!(
        "Heatmaps over {} spots x {} strikes, {} days to expiry",
        spots.len(),
        strikes.len(),
        config.parameters.days_to_expiry
    );

    for field in [GridField::Nd2, GridField::TheoreticalCall] {
        // A bad cell aborts the whole map; report it instead of drawing a partial grid.
        let matrix = match evaluate_grid(spots.values(), strikes.values(), &config.parameters, field) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Skipping {} heatmap: {}", field.label(), e);
                continue;
            }
        };

        if let Some((lo, hi)) = matrix.value_range() {
            println!("  {:<16} range [{:.4}, {:.4}]", field.label(), lo, hi);
        }

        let svg = heatmap_svg(&matrix, heatmap_title(field))?;
        write_svg(out_dir.join(format!("heatmap_{}.svg", field.label())), &svg)?;
        write_grid_csv(
            &matrix,
            File::create(out_dir.join(format!("heatmap_{}.csv", field.label())))?,
        )?;
    }

    println!("Heatmaps saved to {}", out_dir.display());
    Ok(())
}
