use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::geometry::Point;
use crate::core::shape::{Rgba, Shape};
use crate::error::FractalError;

use super::{
    cantor::{generate_cantor, CantorRegion, CantorStyle},
    carpet::{generate_carpet, CarpetRegion, CarpetStyle},
    depth_limit::{expected_vertex_count, MAX_VERTEX_BUDGET},
    koch_snowflake::{generate_snowflake, SnowflakeStyle},
    pythagoras_tree::{generate_tree, TreeRegion, TreeStyle},
    sierpinski::{generate_sierpinski, SierpinskiStyle, TriangleRegion},
};

/// Height of the top Cantor line in the default layout.
const DEFAULT_CANTOR_Y: f64 = 50.0;
/// Side of the trunk square in the default layout.
const DEFAULT_TREE_SIZE: f64 = 150.0;
/// Heading of the trunk in the default layout: straight up the canvas.
const DEFAULT_TREE_ROTATION_DEGREES: f64 = -90.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FractalKind {
    Cantor,
    Sierpinski,
    Tree,
    Carpet,
    Snowflake,
}

impl FractalKind {
    pub const ALL: [FractalKind; 5] = [
        FractalKind::Cantor,
        FractalKind::Sierpinski,
        FractalKind::Tree,
        FractalKind::Carpet,
        FractalKind::Snowflake,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FractalKind::Cantor => "cantor",
            FractalKind::Sierpinski => "sierpinski",
            FractalKind::Tree => "tree",
            FractalKind::Carpet => "carpet",
            FractalKind::Snowflake => "snowflake",
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/**
 * Style of every figure, with defaults matching the classic color scheme:
 * random line colors for Cantor, a blue gasket, a purple carpet, and a brown
 * tree with green outlines.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Palette {
    pub cantor: CantorStyle,
    pub sierpinski: SierpinskiStyle,
    pub carpet: CarpetStyle,
    pub tree: TreeStyle,
    pub snowflake: SnowflakeStyle,
}

/// Area of the canvas a figure is generated in; one variant per fractal kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum FractalRegion {
    Cantor(CantorRegion),
    Sierpinski(TriangleRegion),
    Tree(TreeRegion),
    Carpet(CarpetRegion),
    Snowflake(TriangleRegion),
}

fn require_finite(name: &'static str, value: f64) -> Result<(), FractalError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FractalError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

fn require_point(name: &'static str, point: &Point) -> Result<(), FractalError> {
    require_finite(name, point[0])?;
    require_finite(name, point[1])
}

fn require_positive(name: &'static str, value: f64) -> Result<(), FractalError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(FractalError::invalid_parameter(
            name,
            format!("must be positive, got {}", value),
        ))
    }
}

impl FractalRegion {
    pub fn kind(&self) -> FractalKind {
        match self {
            FractalRegion::Cantor(_) => FractalKind::Cantor,
            FractalRegion::Sierpinski(_) => FractalKind::Sierpinski,
            FractalRegion::Tree(_) => FractalKind::Tree,
            FractalRegion::Carpet(_) => FractalKind::Carpet,
            FractalRegion::Snowflake(_) => FractalKind::Snowflake,
        }
    }

    /**
     * Places the figure on a `width` x `height` canvas the way the figures
     * are classically laid out: triangles hang from the top center, the
     * carpet is centered, Cantor spans the full width, and the tree trunk
     * sits in the middle pointing up.
     */
    pub fn default_layout(kind: FractalKind, width: f64, height: f64) -> FractalRegion {
        let size = width.min(height);
        let top_center = Point::new(0.5 * width, 0.0);
        match kind {
            FractalKind::Cantor => FractalRegion::Cantor(CantorRegion::new(0.0, width, DEFAULT_CANTOR_Y)),
            FractalKind::Sierpinski => FractalRegion::Sierpinski(TriangleRegion {
                apex: top_center,
                size,
            }),
            FractalKind::Tree => FractalRegion::Tree(TreeRegion {
                center: Point::new(0.5 * width, 0.5 * height),
                size: DEFAULT_TREE_SIZE,
                rotation_degrees: DEFAULT_TREE_ROTATION_DEGREES,
            }),
            FractalKind::Carpet => FractalRegion::Carpet(CarpetRegion {
                top_left: Point::new(0.5 * (width - size), 0.5 * (height - size)),
                size,
            }),
            // The star is 2/sqrt(3) times taller than its base triangle is wide.
            FractalKind::Snowflake => FractalRegion::Snowflake(TriangleRegion {
                apex: top_center,
                size: width.min(height * 3.0_f64.sqrt() / 2.0),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), FractalError> {
        match self {
            FractalRegion::Cantor(region) => {
                require_finite("start", region.start)?;
                require_finite("y", region.y)?;
                require_finite("line_spacing", region.line_spacing)?;
                require_positive("end - start", region.end - region.start)
            }
            FractalRegion::Sierpinski(region) | FractalRegion::Snowflake(region) => {
                require_point("apex", &region.apex)?;
                require_positive("size", region.size)
            }
            FractalRegion::Tree(region) => {
                require_point("center", &region.center)?;
                require_finite("rotation_degrees", region.rotation_degrees)?;
                require_positive("size", region.size)
            }
            FractalRegion::Carpet(region) => {
                require_point("top_left", &region.top_left)?;
                require_positive("size", region.size)
            }
        }
    }
}

/**
 * Generates the ordered sequence of shapes for `kind` at `depth` inside
 * `region`. This is a pure function of its arguments.
 *
 * The depth is expected to already be clamped to `kind.max_depth()` by the
 * caller; it is not re-checked against that limit here. Negative depths,
 * non-positive sizes, and depths whose output would exceed
 * `MAX_VERTEX_BUDGET` are rejected.
 */
pub fn generate(
    kind: FractalKind,
    depth: i64,
    region: &FractalRegion,
    palette: &Palette,
) -> Result<Vec<Shape>, FractalError> {
    let depth = u32::try_from(depth).map_err(|_| {
        FractalError::invalid_parameter(
            "depth",
            format!("must be a non-negative 32-bit integer, got {}", depth),
        )
    })?;

    if region.kind() != kind {
        return Err(FractalError::RegionMismatch {
            kind,
            region: region.kind(),
        });
    }
    region.validate()?;

    let vertex_count = expected_vertex_count(kind, depth);
    if vertex_count > MAX_VERTEX_BUDGET {
        return Err(FractalError::ShapeBudgetExceeded {
            kind,
            depth,
            vertex_count,
            budget: MAX_VERTEX_BUDGET,
        });
    }

    let shapes = match region {
        FractalRegion::Cantor(region) => generate_cantor(region, depth, &palette.cantor),
        FractalRegion::Sierpinski(region) => {
            generate_sierpinski(region, depth, &palette.sierpinski)
        }
        FractalRegion::Tree(region) => generate_tree(region, depth, &palette.tree),
        FractalRegion::Carpet(region) => generate_carpet(region, depth, &palette.carpet),
        FractalRegion::Snowflake(region) => {
            generate_snowflake(region, depth, &palette.snowflake)
        }
    };

    debug!(%kind, depth, shape_count = shapes.len(), "generated fractal shapes");
    Ok(shapes)
}

fn default_background_color_rgba() -> Rgba {
    [255, 255, 255, 255]
}

/**
 * Complete set of parameters that are read from a JSON file to render one
 * figure. The region is optional; when missing, the figure is placed with
 * `FractalRegion::default_layout` for the image resolution.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FigureParams {
    pub kind: FractalKind,
    /// Requested depth; clamped into `[0, kind.max_depth()]` before use.
    pub depth: i64,
    #[serde(default)]
    pub region: Option<FractalRegion>,
    pub resolution: nalgebra::Vector2<u32>,
    #[serde(default = "default_background_color_rgba")]
    pub background_color_rgba: Rgba,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub write_svg: bool,
}

impl FigureParams {
    pub fn new(kind: FractalKind, depth: i64, resolution: nalgebra::Vector2<u32>) -> FigureParams {
        FigureParams {
            kind,
            depth,
            region: None,
            resolution,
            background_color_rgba: default_background_color_rgba(),
            palette: Palette::default(),
            write_svg: false,
        }
    }

    pub fn region(&self) -> FractalRegion {
        self.region.clone().unwrap_or_else(|| {
            FractalRegion::default_layout(
                self.kind,
                self.resolution[0] as f64,
                self.resolution[1] as f64,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fractals::depth_limit::{clamp_depth, expected_shape_count};

    const WIDTH: f64 = 800.0;
    const HEIGHT: f64 = 600.0;

    #[test]
    fn test_depth_zero_yields_one_shape_for_every_kind() {
        for kind in FractalKind::ALL.iter() {
            let region = FractalRegion::default_layout(*kind, WIDTH, HEIGHT);
            let shapes = generate(*kind, 0, &region, &Palette::default()).unwrap();
            assert_eq!(shapes.len(), 1, "kind: {}", kind);
        }
    }

    #[test]
    fn test_counts_match_closed_form() {
        for kind in FractalKind::ALL.iter() {
            let region = FractalRegion::default_layout(*kind, WIDTH, HEIGHT);
            for depth in 0..=4 {
                let shapes = generate(*kind, depth as i64, &region, &Palette::default()).unwrap();
                assert_eq!(shapes.len() as u64, expected_shape_count(*kind, depth));
            }
        }
    }

    #[test]
    fn test_negative_depth_is_rejected() {
        let region = FractalRegion::default_layout(FractalKind::Carpet, WIDTH, HEIGHT);
        let result = generate(FractalKind::Carpet, -1, &region, &Palette::default());
        assert!(matches!(
            result,
            Err(FractalError::InvalidParameter { name: "depth", .. })
        ));
    }

    #[test]
    fn test_non_positive_size_is_rejected() {
        let region = FractalRegion::Sierpinski(TriangleRegion {
            apex: Point::new(0.0, 0.0),
            size: 0.0,
        });
        let result = generate(FractalKind::Sierpinski, 2, &region, &Palette::default());
        assert!(matches!(
            result,
            Err(FractalError::InvalidParameter { name: "size", .. })
        ));

        let region = FractalRegion::Cantor(CantorRegion::new(300.0, 0.0, 50.0));
        assert!(generate(FractalKind::Cantor, 2, &region, &Palette::default()).is_err());

        let region = FractalRegion::Tree(TreeRegion {
            center: Point::new(f64::NAN, 0.0),
            size: 10.0,
            rotation_degrees: 0.0,
        });
        assert!(generate(FractalKind::Tree, 2, &region, &Palette::default()).is_err());
    }

    #[test]
    fn test_region_must_match_kind() {
        let region = FractalRegion::default_layout(FractalKind::Carpet, WIDTH, HEIGHT);
        assert_eq!(
            generate(FractalKind::Tree, 1, &region, &Palette::default()),
            Err(FractalError::RegionMismatch {
                kind: FractalKind::Tree,
                region: FractalKind::Carpet,
            })
        );
    }

    #[test]
    fn test_budget_refuses_deepest_snowflake() {
        let kind = FractalKind::Snowflake;
        let region = FractalRegion::default_layout(kind, WIDTH, HEIGHT);
        let depth = clamp_depth(kind, 99);
        assert_eq!(depth, 12);
        let result = generate(kind, depth as i64, &region, &Palette::default());
        assert!(matches!(
            result,
            Err(FractalError::ShapeBudgetExceeded { depth: 12, .. })
        ));
    }

    #[test]
    fn test_generate_is_idempotent() {
        for kind in FractalKind::ALL.iter() {
            let region = FractalRegion::default_layout(*kind, WIDTH, HEIGHT);
            let first = generate(*kind, 3, &region, &Palette::default()).unwrap();
            let second = generate(*kind, 3, &region, &Palette::default()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_default_layout_fits_the_canvas() {
        for kind in [
            FractalKind::Sierpinski,
            FractalKind::Carpet,
            FractalKind::Snowflake,
        ] {
            let region = FractalRegion::default_layout(kind, WIDTH, HEIGHT);
            for shape in generate(kind, 3, &region, &Palette::default()).unwrap() {
                let (min, max) = shape.bounding_box().unwrap();
                let tol = 1e-9;
                assert!(min[0] >= -tol && min[1] >= -tol, "{}: {:?}", kind, min);
                assert!(max[0] <= WIDTH + tol && max[1] <= HEIGHT + tol, "{}: {:?}", kind, max);
            }
        }

        match FractalRegion::default_layout(FractalKind::Carpet, WIDTH, HEIGHT) {
            FractalRegion::Carpet(region) => {
                assert_relative_eq!(region.top_left[0], 100.0);
                assert_relative_eq!(region.top_left[1], 0.0);
                assert_relative_eq!(region.size, 600.0);
            }
            other => panic!("unexpected region: {:?}", other),
        }
    }

    #[test]
    fn test_params_fill_in_defaults() {
        let text = r#"{ "kind": "tree", "depth": 4, "resolution": [400, 300] }"#;
        let params: FigureParams = serde_json::from_str(text).unwrap();
        assert_eq!(params.kind, FractalKind::Tree);
        assert_eq!(params.background_color_rgba, [255, 255, 255, 255]);
        assert_eq!(params.palette, Palette::default());
        assert!(!params.write_svg);
        assert_eq!(
            params.region(),
            FractalRegion::Tree(TreeRegion {
                center: Point::new(200.0, 150.0),
                size: 150.0,
                rotation_degrees: -90.0,
            })
        );
    }

    #[test]
    fn test_kind_names() {
        for kind in FractalKind::ALL.iter() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }
}
