/// Circle aperture parameters from `%ADD<d>C,…*%`.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub diameter: f64,
    pub hole_diameter: Option<f64>,
}

/// Axis-aligned rectangular dimensions, shared by the rectangle (`R`) and
/// obround (`O`) templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangular {
    pub x: f64,
    pub y: f64,
    pub hole_diameter: Option<f64>,
}

/// Regular polygon aperture parameters from `%ADD<d>P,…*%`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub diameter: f64,
    pub vertices: u8,
    pub rotation: Option<f64>,
    pub hole_diameter: Option<f64>,
}

/// A resolved standard aperture template.
///
/// The four templates are a closed set; aperture macros are rejected at
/// parse time. Holes are parsed and carried but ignored by the SVG output.
#[derive(Debug, Clone, PartialEq)]
pub enum Aperture {
    Circle(Circle),
    Rectangle(Rectangular),
    Obround(Rectangular),
    Polygon(Polygon),
}

impl Aperture {
    /// Stroke width of a trace drawn with this aperture, in the file's
    /// decimal unit (the caller scales by the coordinate format factor).
    ///
    /// Rectangles and obrounds cannot be stroked exactly as SVG lines; the
    /// smaller dimension is used, which the emitted line cap records.
    pub fn stroke_width(&self) -> f64 {
        match self {
            Aperture::Circle(c) => c.diameter,
            Aperture::Rectangle(r) | Aperture::Obround(r) => r.x.min(r.y),
            Aperture::Polygon(p) => p.diameter,
        }
    }

    /// `stroke-linecap` value for traces drawn with this aperture.
    pub fn stroke_cap(&self) -> &'static str {
        match self {
            Aperture::Rectangle(_) => "square",
            _ => "round",
        }
    }
}
