use crate::aperture::Aperture;
use crate::format::{CoordinateFormat, CoordinateMode, Unit};

/// Interpolation mode selected by G01/G02/G03.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    ClockwiseCircular,
    CounterclockwiseCircular,
}

/// Arc quadrant mode selected by G74/G75.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadrantMode {
    /// I/J are unsigned, arcs sweep at most 90 degrees.
    Single,
    /// I/J are signed, arcs sweep any angle.
    Multi,
}

/// Layer polarity selected by `%LPD*%` / `%LPC*%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Dark,
    Clear,
}

/// Operation code of a coordinate block: D01, D02 or D03.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Interpolate,
    Move,
    Flash,
}

/// Raw coordinate tokens captured from a data block.
///
/// Tokens stay undecoded here: decoding needs the modal coordinate format,
/// which is graphics state the interpreter owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateTokens {
    pub x: Option<String>,
    pub y: Option<String>,
    pub i: Option<String>,
    pub j: Option<String>,
}

impl CoordinateTokens {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.i.is_none() && self.j.is_none()
    }
}

/// One parsed Gerber command.
///
/// A single data block can yield up to two of these (a G code followed by an
/// operation, as in `G01X0Y0D01*`).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// G04; consumed and ignored.
    Comment(String),
    InterpolationMode(InterpolationMode),
    QuadrantMode(QuadrantMode),
    /// G36 (`true`) / G37 (`false`).
    RegionMode(bool),
    /// `%MO…*%`.
    Unit(Unit),
    /// G70/G71; honored only while `%MO%` has not been seen.
    DeprecatedUnit(Unit),
    /// `%FS…*%`.
    CoordinateFormat(CoordinateFormat),
    /// G90/G91; honored only while `%FS%` has not been seen.
    DeprecatedNotation(CoordinateMode),
    /// `%ADD…*%`.
    ApertureDefinition(i32, Aperture),
    /// `Dnn*` with nn >= 10.
    SelectAperture(i32),
    /// `%LP…*%`.
    LoadPolarity(Polarity),
    /// `%LN…*%`; logged and otherwise ignored.
    LevelName(String),
    /// `%IN…*%`; logged and otherwise ignored.
    ImageName(String),
    /// `%TF/TA/TO/TD…*%`; consumed and ignored.
    Attribute(String),
    /// A coordinate-bearing block: D01/D02/D03 (or a bare coordinate block
    /// repeating the modal operation code).
    Operation {
        coords: CoordinateTokens,
        op: Option<OpCode>,
    },
    /// M00.
    ProgramStop,
    /// M01.
    OptionalStop,
    /// M02.
    EndOfFile,
}
