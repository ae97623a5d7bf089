use serde::{Deserialize, Serialize};

/// One command inside a region or polygon fill path.
///
/// The `Type` tag survives serialization so nested commands round-trip
/// unambiguously; it reuses the `Line`/`Arc` discriminators of the top-level
/// elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum PathCommand {
    Line {
        x: f64,
        y: f64,
    },
    Arc {
        rx: f64,
        ry: f64,
        large_arc: f64,
        sweep: f64,
        x: f64,
        y: f64,
        cx: f64,
        cy: f64,
    },
}

/// One resolved geometric element, tagged with the source line it came from.
///
/// Coordinates are raw integers of the file's coordinate format (stored as
/// f64 so that half-unit values from centering and radius halving survive),
/// in Gerber orientation: Y grows upward and is negated only when the SVG is
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum Element {
    Line {
        line: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width: f64,
        cap: String,
        stroke: String,
    },
    Arc {
        line: usize,
        xs: f64,
        ys: f64,
        xe: f64,
        ye: f64,
        rx: f64,
        ry: f64,
        large_arc: f64,
        sweep: f64,
        cx: f64,
        cy: f64,
        stroke_width: f64,
        stroke: String,
    },
    Circle {
        line: usize,
        x: f64,
        y: f64,
        radius: f64,
        fill: String,
    },
    Rectangle {
        line: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
        fill: String,
        aperture: String,
    },
    Path {
        line: usize,
        x: f64,
        y: f64,
        fill: String,
        commands: Vec<PathCommand>,
    },
}

/// The parsed document: global rendering parameters, the bounding box of
/// everything emitted, and the ordered element buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// `10^frac_digits` of the coordinate format.
    pub decimal: f64,
    /// Color of dark-polarity elements; also the stroke/fill captured at
    /// emission time while LPD is active.
    pub polarity_dark: String,
    /// Color of clear-polarity elements and of the document background.
    pub polarity_clear: String,
    /// Optional output scale; `> 0` derives `width`/`height` attributes when
    /// they are unset.
    pub scale: f64,
    /// Optional `width` attribute for the `<svg>` element.
    pub width: String,
    /// Optional `height` attribute for the `<svg>` element.
    pub height: String,
    /// Embed the interactive pan/zoom script when writing.
    pub pan_zoom: bool,
    pub data: Vec<Element>,
}

impl Default for Processor {
    fn default() -> Self {
        Processor {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
            decimal: 0.0,
            polarity_dark: "white".to_string(),
            polarity_clear: "black".to_string(),
            scale: 0.0,
            width: String::new(),
            height: String::new(),
            pan_zoom: true,
            data: Vec::new(),
        }
    }
}

impl Processor {
    pub fn new() -> Processor {
        Processor::default()
    }

    /// Width of the bounding box.
    pub fn bounds_width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box.
    pub fn bounds_height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Encode to the tagged JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from the tagged JSON form produced by [`Processor::to_json`].
    pub fn from_json(encoded: &str) -> serde_json::Result<Processor> {
        serde_json::from_str(encoded)
    }
}
