//! Zoom-dependent sizing for graph visuals.
//!
//! Values are configured once and resolved per frame into world-space sizes
//! (ready to use after the canvas transform) for the current zoom `k`.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value for a base value at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Base sizes for nodes, labels, arrows and dashes.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node radius in world units.
	pub node_radius: f64,
	/// How the node radius follows zoom.
	pub node_behavior: ScaleBehavior,
	/// Extra world units around a node that still count as a hit.
	pub hit_padding: f64,
	/// Label font size in world units.
	pub label_size: f64,
	/// How the label size follows zoom.
	pub label_behavior: ScaleBehavior,
	/// Arrow head length in world units.
	pub arrow_size: f64,
	/// Bend of curved links relative to their length.
	pub curvature: f64,
	/// Dash pattern for links to unplaced courses, in screen pixels.
	pub dash_pattern: (f64, f64),
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 3.0,
				max_screen: 24.0,
			},
			hit_padding: 4.0,
			label_size: 12.0,
			label_behavior: ScaleBehavior::Screen,
			arrow_size: 3.5,
			curvature: 0.25,
			dash_pattern: (6.0, 4.0),
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom these values were resolved for.
	pub k: f64,
	/// Node radius in world units.
	pub node_radius: f64,
	/// Radius within which a press hits the node.
	pub hit_radius: f64,
	/// Font string for labels (e.g., "10px sans-serif").
	pub label_font: String,
	/// Distance from node center to label baseline.
	pub label_offset: f64,
	/// Arrow head length.
	pub arrow_size: f64,
	/// Dash and gap lengths for links to unplaced courses.
	pub dash_pattern: (f64, f64),
}

impl ScaledValues {
	/// Resolve `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_radius = config.node_behavior.apply(config.node_radius, k);
		let label_size = config.label_behavior.apply(config.label_size, k);
		Self {
			k,
			node_radius,
			hit_radius: node_radius + config.hit_padding / k,
			label_font: format!("{}px sans-serif", label_size),
			label_offset: node_radius + label_size,
			arrow_size: config.arrow_size.max(node_radius * 0.7),
			dash_pattern: (config.dash_pattern.0 / k, config.dash_pattern.1 / k),
		}
	}

	/// Convert a screen-pixel stroke width to world space.
	pub fn line_width(&self, screen_px: f64) -> f64 {
		screen_px / self.k
	}
}
