//
// Densify a coarse SE(2) solution and plot it against the raw waypoints.
//
// usage: path_interpolation [max_dist_between_pathframes]
//

use std::f64::consts::PI;

use log::{error, info};

use se2_global_planner::{interpolate_path, Path2D, PlannerConfig, Pose2D};
use se2_global_planner::utils::plot_interpolation;

fn waypoints() -> Vec<Pose2D> {
    vec![
        Pose2D::new(0.0, 0.0, 0.0),
        Pose2D::new(1.0, 0.0, PI / 4.0),
        Pose2D::new(1.5, 0.8, PI / 2.0),
        Pose2D::new(1.5, 1.6, 3.0 * PI / 4.0),
        Pose2D::new(0.6, 2.0, PI),
        Pose2D::new(0.0, 2.0, -3.0 * PI / 4.0),
    ]
}

fn run(max_spacing: f64) -> anyhow::Result<()> {
    let raw = Path2D::from_poses(waypoints());
    let dense = Path2D::from_poses(interpolate_path(&raw.poses, max_spacing)?);

    info!("{} waypoints densified to {} frames (max spacing {:.3} m)", raw.len(), dense.len(), max_spacing);
    for (i, pose) in dense.poses.iter().enumerate() {
        info!("frame {:3}: x={:.3} y={:.3} yaw={:.3}", i, pose.x, pose.y, pose.yaw);
    }
    info!("path length: {:.3} m", dense.total_length());

    std::fs::create_dir_all("./img")?;
    let vis = plot_interpolation(&raw, &dense, "Path interpolation");
    vis.save_png("./img/path_interpolation.png", 800, 600)
        .map_err(|e| anyhow::anyhow!("failed to save plot: {}", e))?;
    info!("plot saved to ./img/path_interpolation.png");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = PlannerConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        config.max_dist_between_pathframes = arg.parse().unwrap_or(f64::NAN);
    }
    config.sanitize();

    if let Err(e) = run(config.max_dist_between_pathframes) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
