//! # Gerber-svg
//!
//! A streaming Gerber (RS-274X) interpreter that renders PCB image layers
//! to SVG.
//!
//! Gerber files are the de-facto file format for PCB manufacturing. The
//! [specification is well documented](https://www.ucamco.com/en/guest/downloads/gerber-format)
//! and the format is plaintext, but it carries a lot of baggage: sticky
//! modal state, packed coordinates against a declared fixed-point format,
//! and quadrant-mode-sensitive circular interpolation. [`parse`] runs the
//! whole pipeline (tokenizer, command parser, graphics-state machine) and
//! produces a [`Processor`]: the resolved element buffer plus its bounding
//! box, which [`Processor::write`] serializes as SVG and
//! [`Processor::to_json`] round-trips as tagged JSON.
//!
//! Only the standard aperture templates (C, R, O, P) are supported;
//! aperture macros and step-and-repeat are rejected as unsupported.
//! Aperture holes are parsed but not subtracted in the output, and clear
//! polarity (LPC) is rendered as the clear color rather than as a true
//! knockout of earlier geometry.

// These modules are not public, instead we re-export the public types from them below.
mod aperture;
mod command;
mod error;
mod format;
mod interpreter;
mod parser;
mod processor;
mod svg;
mod tokenizer;

pub mod util;

pub use aperture::*;
pub use command::*;
pub use error::*;
pub use format::*;
pub use interpreter::{parse, GraphicsState};
pub use parser::parse_block;
pub use processor::*;
pub use tokenizer::*;
