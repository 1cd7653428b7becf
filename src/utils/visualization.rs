//! Visualization utilities for planned paths
//!
//! Renders raw and interpolated paths with gnuplot.

use gnuplot::{Figure, Caption, Color, PointSymbol, PointSize, LineWidth, AxesCommon, AutoOption};
use crate::common::{Pose2D, Path2D};

/// Color palette for consistent styling
pub mod colors {
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const CYAN: &str = "#00FFFF";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const RAW_PATH: &str = GRAY;
    pub const HEADING: &str = CYAN;
    pub const INTERPOLATED: &str = "#35C788";
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

/// Data queued for drawing
#[derive(Debug, Clone)]
enum Series {
    Path { xs: Vec<f64>, ys: Vec<f64>, style: PathStyle },
    Points { xs: Vec<f64>, ys: Vec<f64>, style: PointStyle },
    /// Disjoint segments separated by NaN entries
    Ticks { xs: Vec<f64>, ys: Vec<f64> },
}

/// Main visualizer struct
///
/// Everything is drawn on a single set of axes, so all series share one
/// scale.
pub struct Visualizer {
    series: Vec<Series>,
    title: String,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            title: String::new(),
            aspect_ratio: Some(1.0),
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Plot a path as a polyline
    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        self.series.push(Series::Path {
            xs: path.x_coords(),
            ys: path.y_coords(),
            style: style.clone(),
        });
        self
    }

    /// Plot every pose of a path with a short heading tick
    pub fn plot_poses(&mut self, path: &Path2D, style: &PointStyle, tick_length: f64) -> &mut Self {
        self.series.push(Series::Points {
            xs: path.x_coords(),
            ys: path.y_coords(),
            style: style.clone(),
        });

        let (xs, ys) = heading_ticks(path, tick_length);
        self.series.push(Series::Ticks { xs, ys });
        self
    }

    /// Plot a single pose
    pub fn plot_point(&mut self, pose: &Pose2D, style: &PointStyle) -> &mut Self {
        self.series.push(Series::Points {
            xs: vec![pose.x],
            ys: vec![pose.y],
            style: style.clone(),
        });
        self
    }

    pub fn plot_start(&mut self, pose: &Pose2D) -> &mut Self {
        self.plot_point(pose, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    pub fn plot_goal(&mut self, pose: &Pose2D) -> &mut Self {
        self.plot_point(pose, &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Save plot to PNG file
    pub fn save_png(&self, path: &str, width: u32, height: u32) -> Result<(), String> {
        let mut figure = self.render();
        figure.save_to_png(path, width, height).map_err(|e| e.to_string())
    }

    fn render(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        for series in &self.series {
            match series {
                Series::Path { xs, ys, style } => {
                    axes.lines(xs, ys, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        LineWidth(style.line_width),
                    ]);
                }
                Series::Points { xs, ys, style } => {
                    axes.points(xs, ys, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        PointSymbol(style.symbol),
                        PointSize(style.size),
                    ]);
                }
                Series::Ticks { xs, ys } => {
                    axes.lines(xs, ys, &[
                        Color(colors::HEADING),
                        LineWidth(1.0),
                    ]);
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label("X [m]", &[]);
        axes.set_y_label("Y [m]", &[]);
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }

        figure
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// One segment per pose along its heading, NaN-separated so a single line
/// series draws them all
fn heading_ticks(path: &Path2D, length: f64) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::with_capacity(path.poses.len() * 3);
    let mut ys = Vec::with_capacity(path.poses.len() * 3);
    for pose in &path.poses {
        let (end_x, end_y) = heading_tip(pose, length);
        xs.extend([pose.x, end_x, f64::NAN]);
        ys.extend([pose.y, end_y, f64::NAN]);
    }
    (xs, ys)
}

fn heading_tip(pose: &Pose2D, length: f64) -> (f64, f64) {
    (pose.x + length * pose.yaw.cos(), pose.y + length * pose.yaw.sin())
}

/// Raw solution against its interpolated counterpart
pub fn plot_interpolation(raw: &Path2D, dense: &Path2D, title: &str) -> Visualizer {
    let mut vis = Visualizer::new();
    vis.set_title(title);

    vis.plot_path(raw, &PathStyle::new(colors::RAW_PATH, "Raw path").with_line_width(1.0));
    vis.plot_poses(
        dense,
        &PointStyle::new(colors::INTERPOLATED, "Interpolated").with_size(0.5).with_symbol('o'),
        0.05,
    );
    if let (Some(start), Some(goal)) = (raw.poses.first(), raw.poses.last()) {
        vis.plot_start(start);
        vis.plot_goal(goal);
    }

    vis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualizer_creation() {
        let vis = Visualizer::default();
        assert!(vis.aspect_ratio.is_some());
        assert!(vis.title.is_empty());
        assert!(vis.series.is_empty());
    }

    #[test]
    fn test_path_style() {
        let style = PathStyle::new(colors::GRAY, "Test Path")
            .with_line_width(3.0);
        assert_eq!(style.line_width, 3.0);
        assert_eq!(style.color, colors::GRAY);
    }

    #[test]
    fn test_all_series_share_one_axes() {
        let path = Path2D::from_poses(vec![Pose2D::new(0.0, 0.0, 0.0), Pose2D::new(1.0, 0.0, 0.0)]);
        let vis = plot_interpolation(&path, &path, "shared");
        // raw line, dense points, heading ticks, start, goal
        assert_eq!(vis.series.len(), 5);
        assert_eq!(vis.title, "shared");
    }

    #[test]
    fn test_heading_ticks_are_nan_separated() {
        let path = Path2D::from_poses(vec![Pose2D::new(0.0, 0.0, 0.0), Pose2D::new(1.0, 1.0, std::f64::consts::PI)]);
        let (xs, ys) = heading_ticks(&path, 0.5);
        assert_eq!(xs.len(), 6);
        assert_eq!(&xs[..2], &[0.0, 0.5]);
        assert!(xs[2].is_nan() && ys[2].is_nan());
        assert!((xs[4] - 0.5).abs() < 1e-12);
        assert!((ys[4] - 1.0).abs() < 1e-12);
        assert!(xs[5].is_nan());
    }

    #[test]
    fn test_heading_tip() {
        let (x, y) = heading_tip(&Pose2D::new(1.0, 1.0, std::f64::consts::FRAC_PI_2), 0.5);
        assert!((x - 1.0).abs() < 1e-12);
        assert!((y - 1.5).abs() < 1e-12);
    }
}
