use std::collections::HashMap;
use std::f64::consts::PI;
use std::io::{BufReader, Read};

use crate::aperture::{Aperture, Rectangular};
use crate::command::{
    Command, CoordinateTokens, InterpolationMode, OpCode, Polarity, QuadrantMode,
};
use crate::error::{ContentError, GerberSvgError};
use crate::format::{decode_coordinate, CoordinateFormat, CoordinateMode, Unit};
use crate::parser::parse_block;
use crate::processor::{Element, PathCommand, Processor};
use crate::tokenizer::{Block, Tokenizer};

/// Endpoints may differ from the I/J-implied radius by at most one
/// coordinate unit.
const RADIUS_TOLERANCE: f64 = 1.0;

/// An open region contour: the anchor point set by D02 and the edges
/// accumulated by D01 until the contour is closed.
#[derive(Debug)]
struct RegionPath {
    x: f64,
    y: f64,
    line: usize,
    commands: Vec<PathCommand>,
}

/// The modal state carried between blocks.
#[derive(Debug)]
pub struct GraphicsState {
    pub format: Option<CoordinateFormat>,
    pub unit: Option<Unit>,
    pub apertures: HashMap<i32, Aperture>,
    pub current_aperture: Option<i32>,
    pub interpolation: InterpolationMode,
    pub quadrant: QuadrantMode,
    pub polarity: Polarity,
    pub current_point: (i64, i64),
    unit_from_mo: bool,
    region_mode: bool,
    region: Option<RegionPath>,
    last_op: Option<OpCode>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        GraphicsState {
            format: None,
            unit: None,
            apertures: HashMap::new(),
            current_aperture: None,
            interpolation: InterpolationMode::Linear,
            // Legacy default; modern files select G75 explicitly.
            quadrant: QuadrantMode::Single,
            polarity: Polarity::Dark,
            current_point: (0, 0),
            unit_from_mo: false,
            region_mode: false,
            region: None,
            last_op: None,
        }
    }
}

/// One SVG arc segment resolved from a circular interpolation.
struct ArcSegment {
    xs: f64,
    ys: f64,
    xe: f64,
    ye: f64,
    radius: f64,
    large_arc: f64,
    sweep: f64,
    cx: f64,
    cy: f64,
}

/// Parse a Gerber byte stream into a [`Processor`].
///
/// The stream is consumed once, block by block; the first error aborts the
/// call and carries the offending block's line number and text.
pub fn parse<T: Read>(reader: BufReader<T>) -> Result<Processor, GerberSvgError> {
    let mut tokenizer = Tokenizer::new(reader);
    let mut interpreter = Interpreter::new();

    while let Some(block_result) = tokenizer.next_block() {
        let block = block_result
            .map_err(|e| e.to_with_context(Some((tokenizer.line(), String::new()))))?;

        let commands = parse_block(&block)
            .map_err(|e| e.to_with_context(Some((block.line, block.text.clone()))))?;
        for command in commands {
            log::debug!("Found command: {:?}", command);
            interpreter
                .handle(command, &block)
                .map_err(|e| e.to_with_context(Some((block.line, block.text.clone()))))?;
            if interpreter.finished {
                break;
            }
        }
        // M02 terminates the stream; anything after it is discarded.
        if interpreter.finished {
            break;
        }
    }

    if !interpreter.finished {
        if interpreter.state.region_mode {
            return Err(ContentError::RegionNotClosed {}.to_with_context(None));
        }
        log::warn!("input ended without an M02 end-of-file marker");
    }

    Ok(interpreter.into_processor())
}

/// The streaming state machine: consumes commands in order, mutates the
/// graphics state, and appends resolved elements to the processor.
struct Interpreter {
    state: GraphicsState,
    processor: Processor,
    bounds_started: bool,
    finished: bool,
}

impl Interpreter {
    fn new() -> Interpreter {
        Interpreter {
            state: GraphicsState::default(),
            processor: Processor::new(),
            bounds_started: false,
            finished: false,
        }
    }

    fn into_processor(self) -> Processor {
        self.processor
    }

    fn handle(&mut self, command: Command, block: &Block) -> Result<(), ContentError> {
        match command {
            Command::Comment(text) => log::debug!("comment: {}", text),
            Command::InterpolationMode(mode) => self.state.interpolation = mode,
            Command::QuadrantMode(mode) => self.state.quadrant = mode,
            Command::RegionMode(true) => self.state.region_mode = true,
            Command::RegionMode(false) => {
                if !self.state.region_mode {
                    return Err(ContentError::RegionNotOpen {});
                }
                self.state.region_mode = false;
                match self.state.region.take() {
                    Some(path) => self.emit_region(path)?,
                    None => return Err(ContentError::RegionTooFewEdges { edges: 0 }),
                }
            }
            Command::Unit(unit) => {
                if self.state.unit_from_mo {
                    return Err(ContentError::TriedToSetUnitsTwice {});
                }
                self.state.unit = Some(unit);
                self.state.unit_from_mo = true;
            }
            Command::DeprecatedUnit(unit) => {
                if self.state.unit_from_mo {
                    log::debug!("ignoring deprecated unit code, %MO% already seen");
                } else {
                    log::warn!("unit set by deprecated G70/G71");
                    self.state.unit = Some(unit);
                }
            }
            Command::CoordinateFormat(format) => {
                if self.state.format.is_some() {
                    return Err(ContentError::TriedToFormatTwice {});
                }
                self.state.format = Some(format);
                self.processor.decimal = format.factor();
            }
            Command::DeprecatedNotation(_) => {
                // The notation always arrives with %FS%; G90/G91 only matter
                // in its absence, where operations are rejected anyway.
                log::debug!("ignoring deprecated notation code");
            }
            Command::ApertureDefinition(code, aperture) => {
                if self.state.apertures.contains_key(&code) {
                    return Err(ContentError::ApertureDefinedTwice {
                        aperture_code: code,
                    });
                }
                self.state.apertures.insert(code, aperture);
            }
            Command::SelectAperture(code) => {
                if !self.state.apertures.contains_key(&code) {
                    return Err(ContentError::ApertureNotDefined {
                        aperture_code: code,
                    });
                }
                self.state.current_aperture = Some(code);
            }
            Command::LoadPolarity(polarity) => self.state.polarity = polarity,
            Command::LevelName(name) => log::info!("level name: {}", name),
            Command::ImageName(name) => log::info!("image name: {}", name),
            Command::Attribute(text) => log::debug!("ignoring attribute: {}", text),
            Command::OptionalStop => log::debug!("optional stop (M01) ignored"),
            Command::ProgramStop | Command::EndOfFile => {
                if self.state.region_mode {
                    return Err(ContentError::RegionNotClosed {});
                }
                self.finished = true;
            }
            Command::Operation { coords, op } => self.operation(coords, op, block.line)?,
        }
        Ok(())
    }

    fn operation(
        &mut self,
        coords: CoordinateTokens,
        op: Option<OpCode>,
        line: usize,
    ) -> Result<(), ContentError> {
        let op = op
            .or(self.state.last_op)
            .ok_or(ContentError::OperationWithoutCode {})?;
        self.state.last_op = Some(op);

        let format = self.state.format.ok_or(ContentError::OperationBeforeFormat {})?;
        if self.state.unit.is_none() {
            return Err(ContentError::OperationBeforeUnit {});
        }
        if self.state.current_aperture.is_none() {
            return Err(ContentError::NoApertureSelected {});
        }

        let decode = |token: &Option<String>| -> Result<Option<i64>, ContentError> {
            token
                .as_deref()
                .map(|t| decode_coordinate(t, &format))
                .transpose()
        };
        let x = decode(&coords.x)?;
        let y = decode(&coords.y)?;
        let i = decode(&coords.i)?.unwrap_or(0);
        let j = decode(&coords.j)?.unwrap_or(0);

        let (cur_x, cur_y) = self.state.current_point;
        // A coordinate left out of the block is modal: it stays at the
        // current point (absolute) or does not move (incremental).
        let target = match format.mode {
            CoordinateMode::Absolute => (x.unwrap_or(cur_x), y.unwrap_or(cur_y)),
            CoordinateMode::Incremental => (cur_x + x.unwrap_or(0), cur_y + y.unwrap_or(0)),
        };

        match op {
            OpCode::Move => self.op_move(target, line)?,
            OpCode::Interpolate => self.op_interpolate(target, i, j, line)?,
            OpCode::Flash => self.op_flash(target, line)?,
        }
        self.state.current_point = target;
        Ok(())
    }

    fn op_move(&mut self, target: (i64, i64), line: usize) -> Result<(), ContentError> {
        if self.state.region_mode {
            if let Some(path) = self.state.region.take() {
                if path.commands.is_empty() {
                    // An anchor that was never drawn from is replaced.
                    log::warn!("region contour anchored twice without edges");
                } else {
                    self.emit_region(path)?;
                }
            }
            self.state.region = Some(RegionPath {
                x: target.0 as f64,
                y: target.1 as f64,
                line,
                commands: Vec::new(),
            });
        }
        Ok(())
    }

    fn op_interpolate(
        &mut self,
        target: (i64, i64),
        i: i64,
        j: i64,
        line: usize,
    ) -> Result<(), ContentError> {
        let start = self.state.current_point;
        match self.state.interpolation {
            InterpolationMode::Linear => {
                if self.state.region_mode {
                    let path = self
                        .state
                        .region
                        .as_mut()
                        .ok_or(ContentError::RegionWithoutAnchor {})?;
                    path.commands.push(PathCommand::Line {
                        x: target.0 as f64,
                        y: target.1 as f64,
                    });
                } else {
                    let (stroke_width, cap) = self.stroke_parameters()?;
                    let stroke = self.polarity_color();
                    self.expand_bounds(start.0 as f64, start.1 as f64);
                    self.expand_bounds(target.0 as f64, target.1 as f64);
                    self.processor.data.push(Element::Line {
                        line,
                        x1: start.0 as f64,
                        y1: start.1 as f64,
                        x2: target.0 as f64,
                        y2: target.1 as f64,
                        stroke_width,
                        cap,
                        stroke,
                    });
                }
            }
            InterpolationMode::ClockwiseCircular | InterpolationMode::CounterclockwiseCircular => {
                let clockwise = matches!(
                    self.state.interpolation,
                    InterpolationMode::ClockwiseCircular
                );
                let segments = self.resolve_arc(start, target, i, j, clockwise)?;
                if self.state.region_mode {
                    let path = self
                        .state
                        .region
                        .as_mut()
                        .ok_or(ContentError::RegionWithoutAnchor {})?;
                    for segment in segments {
                        path.commands.push(PathCommand::Arc {
                            rx: segment.radius,
                            ry: segment.radius,
                            large_arc: segment.large_arc,
                            sweep: segment.sweep,
                            x: segment.xe,
                            y: segment.ye,
                            cx: segment.cx,
                            cy: segment.cy,
                        });
                    }
                } else {
                    let (stroke_width, _cap) = self.stroke_parameters()?;
                    let stroke = self.polarity_color();
                    for segment in segments {
                        self.expand_bounds(segment.xs, segment.ys);
                        self.expand_bounds(segment.xe, segment.ye);
                        self.processor.data.push(Element::Arc {
                            line,
                            xs: segment.xs,
                            ys: segment.ys,
                            xe: segment.xe,
                            ye: segment.ye,
                            rx: segment.radius,
                            ry: segment.radius,
                            large_arc: segment.large_arc,
                            sweep: segment.sweep,
                            cx: segment.cx,
                            cy: segment.cy,
                            stroke_width,
                            stroke: stroke.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn op_flash(&mut self, target: (i64, i64), line: usize) -> Result<(), ContentError> {
        if self.state.region_mode {
            return Err(ContentError::FlashInRegion {});
        }
        let code = self
            .state
            .current_aperture
            .ok_or(ContentError::NoApertureSelected {})?;
        let aperture = self
            .state
            .apertures
            .get(&code)
            .ok_or(ContentError::ApertureNotDefined {
                aperture_code: code,
            })?
            .clone();

        let factor = self.processor.decimal;
        let fill = self.polarity_color();
        let (fx, fy) = (target.0 as f64, target.1 as f64);

        match aperture {
            Aperture::Circle(circle) => {
                let radius = (circle.diameter * factor).round() / 2.0;
                self.expand_bounds(fx - radius, fy - radius);
                self.expand_bounds(fx + radius, fy + radius);
                self.processor.data.push(Element::Circle {
                    line,
                    x: fx,
                    y: fy,
                    radius,
                    fill,
                });
            }
            Aperture::Rectangle(rect) => {
                self.flash_rectangular(&rect, fx, fy, false, code, fill, line, factor);
            }
            Aperture::Obround(rect) => {
                self.flash_rectangular(&rect, fx, fy, true, code, fill, line, factor);
            }
            Aperture::Polygon(polygon) => {
                let radius = (polygon.diameter * factor).round() / 2.0;
                let rotation = polygon.rotation.unwrap_or(0.0).to_radians();
                let count = polygon.vertices as usize;
                let mut points = Vec::with_capacity(count);
                for k in 0..count {
                    let angle = rotation + (k as f64) * 2.0 * PI / (count as f64);
                    // Snap to whole coordinate units.
                    points.push((
                        (fx + radius * angle.cos()).round(),
                        (fy + radius * angle.sin()).round(),
                    ));
                }
                for &(x, y) in &points {
                    self.expand_bounds(x, y);
                }
                let (x0, y0) = points[0];
                let commands = points[1..]
                    .iter()
                    .map(|&(x, y)| PathCommand::Line { x, y })
                    .collect();
                self.processor.data.push(Element::Path {
                    line,
                    x: x0,
                    y: y0,
                    fill,
                    commands,
                });
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn flash_rectangular(
        &mut self,
        rect: &Rectangular,
        fx: f64,
        fy: f64,
        rounded: bool,
        code: i32,
        fill: String,
        line: usize,
        factor: f64,
    ) {
        let width = (rect.x * factor).round();
        let height = (rect.y * factor).round();
        // Obrounds get stadium ends via the corner radii.
        let corner = if rounded { width.min(height) / 2.0 } else { 0.0 };
        let x = fx - width / 2.0;
        let y = fy - height / 2.0;
        self.expand_bounds(x, y);
        self.expand_bounds(x + width, y + height);
        self.processor.data.push(Element::Rectangle {
            line,
            x,
            y,
            width,
            height,
            rx: corner,
            ry: corner,
            fill,
            aperture: format!("D{}", code),
        });
    }

    /// Reconstruct the arc center per the active quadrant mode and resolve
    /// the SVG arc flags.
    ///
    /// A multi-quadrant arc whose endpoints coincide is a full circle and is
    /// returned as two half arcs, since a single SVG `A` segment with
    /// coincident endpoints renders as nothing.
    fn resolve_arc(
        &self,
        start: (i64, i64),
        end: (i64, i64),
        i: i64,
        j: i64,
        clockwise: bool,
    ) -> Result<Vec<ArcSegment>, ContentError> {
        let (sx, sy) = (start.0 as f64, start.1 as f64);
        let (ex, ey) = (end.0 as f64, end.1 as f64);

        match self.state.quadrant {
            QuadrantMode::Multi => {
                let cx = sx + i as f64;
                let cy = sy + j as f64;
                let start_radius = (sx - cx).hypot(sy - cy);
                let end_radius = (ex - cx).hypot(ey - cy);
                if (start_radius - end_radius).abs() > RADIUS_TOLERANCE {
                    return Err(ContentError::ArcRadiusMismatch {
                        start_radius,
                        end_radius,
                    });
                }
                if start == end {
                    let (mx, my) = (2.0 * cx - sx, 2.0 * cy - sy);
                    let sweep = sweep_flag(clockwise);
                    return Ok(vec![
                        ArcSegment {
                            xs: sx,
                            ys: sy,
                            xe: mx,
                            ye: my,
                            radius: start_radius,
                            large_arc: 0.0,
                            sweep,
                            cx,
                            cy,
                        },
                        ArcSegment {
                            xs: mx,
                            ys: my,
                            xe: ex,
                            ye: ey,
                            radius: start_radius,
                            large_arc: 0.0,
                            sweep,
                            cx,
                            cy,
                        },
                    ]);
                }
                let angle = sweep_angle(sx, sy, ex, ey, cx, cy, clockwise);
                Ok(vec![ArcSegment {
                    xs: sx,
                    ys: sy,
                    xe: ex,
                    ye: ey,
                    radius: start_radius,
                    large_arc: if angle > PI { 1.0 } else { 0.0 },
                    sweep: sweep_flag(clockwise),
                    cx,
                    cy,
                }])
            }
            QuadrantMode::Single => {
                // I and J arrive unsigned; pick the signed combination whose
                // center keeps both endpoints on the circle and sweeps at
                // most a quarter turn in the commanded direction.
                let di = (i.abs()) as f64;
                let dj = (j.abs()) as f64;
                let mut best: Option<(f64, ArcSegment)> = None;
                for (si, sj) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
                    let cx = sx + si * di;
                    let cy = sy + sj * dj;
                    let start_radius = (sx - cx).hypot(sy - cy);
                    let end_radius = (ex - cx).hypot(ey - cy);
                    if (start_radius - end_radius).abs() > RADIUS_TOLERANCE {
                        continue;
                    }
                    let angle = sweep_angle(sx, sy, ex, ey, cx, cy, clockwise);
                    if angle > PI / 2.0 + 1e-9 {
                        continue;
                    }
                    let keep = match &best {
                        Some((best_angle, _)) => angle < *best_angle,
                        None => true,
                    };
                    if keep {
                        best = Some((
                            angle,
                            ArcSegment {
                                xs: sx,
                                ys: sy,
                                xe: ex,
                                ye: ey,
                                radius: start_radius,
                                large_arc: 0.0,
                                sweep: sweep_flag(clockwise),
                                cx,
                                cy,
                            },
                        ));
                    }
                }
                best.map(|(_, segment)| vec![segment])
                    .ok_or(ContentError::SingleQuadrantNoSolution {})
            }
        }
    }

    fn emit_region(&mut self, path: RegionPath) -> Result<(), ContentError> {
        if path.commands.len() < 3 {
            return Err(ContentError::RegionTooFewEdges {
                edges: path.commands.len(),
            });
        }
        self.expand_bounds(path.x, path.y);
        for command in &path.commands {
            match command {
                PathCommand::Line { x, y } | PathCommand::Arc { x, y, .. } => {
                    self.expand_bounds(*x, *y)
                }
            }
        }
        let fill = self.polarity_color();
        self.processor.data.push(Element::Path {
            line: path.line,
            x: path.x,
            y: path.y,
            fill,
            commands: path.commands,
        });
        Ok(())
    }

    fn stroke_parameters(&self) -> Result<(f64, String), ContentError> {
        let code = self
            .state
            .current_aperture
            .ok_or(ContentError::NoApertureSelected {})?;
        let aperture = self
            .state
            .apertures
            .get(&code)
            .ok_or(ContentError::ApertureNotDefined {
                aperture_code: code,
            })?;
        let stroke_width = (aperture.stroke_width() * self.processor.decimal).round();
        Ok((stroke_width, aperture.stroke_cap().to_string()))
    }

    fn polarity_color(&self) -> String {
        match self.state.polarity {
            Polarity::Dark => self.processor.polarity_dark.clone(),
            Polarity::Clear => self.processor.polarity_clear.clone(),
        }
    }

    fn expand_bounds(&mut self, x: f64, y: f64) {
        if self.bounds_started {
            self.processor.min_x = self.processor.min_x.min(x);
            self.processor.max_x = self.processor.max_x.max(x);
            self.processor.min_y = self.processor.min_y.min(y);
            self.processor.max_y = self.processor.max_y.max(y);
        } else {
            self.bounds_started = true;
            self.processor.min_x = x;
            self.processor.max_x = x;
            self.processor.min_y = y;
            self.processor.max_y = y;
        }
    }
}

/// Swept angle from start to end around the center, in the commanded
/// direction, normalized to `[0, 2π)`.
fn sweep_angle(sx: f64, sy: f64, ex: f64, ey: f64, cx: f64, cy: f64, clockwise: bool) -> f64 {
    let start_angle = (sy - cy).atan2(sx - cx);
    let end_angle = (ey - cy).atan2(ex - cx);
    let delta = if clockwise {
        start_angle - end_angle
    } else {
        end_angle - start_angle
    };
    delta.rem_euclid(2.0 * PI)
}

/// SVG sweep flag: after Y negation a Gerber-clockwise arc runs in SVG's
/// positive-angle direction.
fn sweep_flag(clockwise: bool) -> f64 {
    if clockwise {
        1.0
    } else {
        0.0
    }
}
