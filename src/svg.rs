use std::io::{self, Write};

use crate::processor::{Element, PathCommand, Processor};

/// Self-contained wheel-zoom / drag-pan handler embedded when
/// [`Processor::pan_zoom`] is set. It only rewrites the root `viewBox`.
const PAN_ZOOM_SCRIPT: &str = r#"<script type="text/ecmascript"><![CDATA[
(function () {
  var svg = document.documentElement;
  var view = svg.viewBox.baseVal;
  svg.addEventListener("wheel", function (event) {
    event.preventDefault();
    var factor = event.deltaY < 0 ? 0.8 : 1.25;
    var px = view.x + (event.offsetX / svg.clientWidth) * view.width;
    var py = view.y + (event.offsetY / svg.clientHeight) * view.height;
    view.x = px - (px - view.x) * factor;
    view.y = py - (py - view.y) * factor;
    view.width *= factor;
    view.height *= factor;
  });
  var drag = null;
  svg.addEventListener("pointerdown", function (event) {
    drag = { x: event.clientX, y: event.clientY };
  });
  svg.addEventListener("pointermove", function (event) {
    if (!drag) return;
    view.x -= (event.clientX - drag.x) * (view.width / svg.clientWidth);
    view.y -= (event.clientY - drag.y) * (view.height / svg.clientHeight);
    drag = { x: event.clientX, y: event.clientY };
  });
  svg.addEventListener("pointerup", function () { drag = null; });
})();
]]></script>"#;

impl Processor {
    /// Write the document as SVG.
    ///
    /// Stored coordinates are in Gerber orientation (Y up); every Y value is
    /// negated on emission, which also turns a zero into `-0` exactly as the
    /// reference output formats it. One line is written per element, so
    /// partial writes never leave a torn element behind.
    pub fn write<W: Write>(&self, mut sink: W) -> io::Result<()> {
        write!(
            sink,
            "<svg viewBox=\"{} {} {} {}\"",
            self.min_x,
            -self.max_y,
            self.bounds_width(),
            self.bounds_height()
        )?;
        if !self.width.is_empty() {
            write!(sink, " width=\"{}\"", self.width)?;
        } else if self.scale > 0.0 {
            write!(sink, " width=\"{}\"", self.bounds_width() * self.scale)?;
        }
        if !self.height.is_empty() {
            write!(sink, " height=\"{}\"", self.height)?;
        } else if self.scale > 0.0 {
            write!(sink, " height=\"{}\"", self.bounds_height() * self.scale)?;
        }
        writeln!(
            sink,
            " style=\"background-color: {};\" xmlns=\"http://www.w3.org/2000/svg\">",
            self.polarity_clear
        )?;

        for element in &self.data {
            match element {
                Element::Line {
                    line,
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke_width,
                    cap,
                    stroke,
                } => {
                    writeln!(
                        sink,
                        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\" stroke=\"{}\" line=\"{}\"/>",
                        x1, -y1, x2, -y2, stroke_width, cap, stroke, line
                    )?;
                }
                Element::Arc {
                    line,
                    xs,
                    ys,
                    xe,
                    ye,
                    rx,
                    ry,
                    large_arc,
                    sweep,
                    stroke_width,
                    stroke,
                    ..
                } => {
                    writeln!(
                        sink,
                        "<path d=\"M {},{} A {} {} 0 {} {} {},{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" line=\"{}\"/>",
                        xs, -ys, rx, ry, large_arc, sweep, xe, -ye, stroke, stroke_width, line
                    )?;
                }
                Element::Circle {
                    line,
                    x,
                    y,
                    radius,
                    fill,
                } => {
                    writeln!(
                        sink,
                        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" line=\"{}\"/>",
                        x, -y, radius, fill, line
                    )?;
                }
                Element::Rectangle {
                    line,
                    x,
                    y,
                    width,
                    height,
                    rx,
                    ry,
                    fill,
                    aperture,
                } => {
                    write!(
                        sink,
                        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{}\"",
                        x,
                        -(y + height),
                        width,
                        height,
                        rx,
                        ry,
                        fill
                    )?;
                    if !aperture.is_empty() {
                        write!(sink, " aperture=\"{}\"", aperture)?;
                    }
                    writeln!(sink, " line=\"{}\"/>", line)?;
                }
                Element::Path {
                    line,
                    x,
                    y,
                    fill,
                    commands,
                } => {
                    write!(sink, "<path d=\"M {},{}", x, -y)?;
                    for command in commands {
                        match command {
                            PathCommand::Line { x, y } => {
                                write!(sink, " L {},{}", x, -y)?;
                            }
                            PathCommand::Arc {
                                rx,
                                ry,
                                large_arc,
                                sweep,
                                x,
                                y,
                                ..
                            } => {
                                write!(
                                    sink,
                                    " A {} {} 0 {} {} {},{}",
                                    rx, ry, large_arc, sweep, x, -y
                                )?;
                            }
                        }
                    }
                    writeln!(sink, " Z\" fill=\"{}\" line=\"{}\"/>", fill, line)?;
                }
            }
        }

        if self.pan_zoom {
            writeln!(sink, "{}", PAN_ZOOM_SCRIPT)?;
        }
        writeln!(sink, "</svg>")?;
        Ok(())
    }
}
