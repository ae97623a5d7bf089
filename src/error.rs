use regex::Regex;
use std::fmt;
use std::fmt::Formatter;
use thiserror::Error;

/// Coarse classification of a [`ContentError`].
///
/// Every fine-grained error variant collapses into one of these kinds; tests
/// and callers that only care about the failure class match on this instead
/// of the full variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexer/parser could not form a valid block, or a numeric field is
    /// unparsable.
    MalformedInput,
    /// A `Dnn` command referenced an aperture that was never defined.
    UndefinedAperture,
    /// A command arrived while the graphics state cannot accept it.
    InvalidState,
    /// The command is valid Gerber but outside the supported subset.
    Unsupported,
    /// The input or output stream failed.
    Io,
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Document included a block that isn't valid.")]
    UnknownCommand {},
    #[error("Document included a block that isn't supported.")]
    UnsupportedCommand {},
    #[error("Input ended inside a '%' parameter block.")]
    UnterminatedParameterBlock {},
    #[error("Block was uniquely identified, but did not match regex: {regex}.")]
    NoRegexMatch { regex: Regex },
    #[error(
        "Block was uniquely identified, and matched expected regex, \
    but did not contain the expected capture.\nRegex: {regex}. capture index: {capture_index}"
    )]
    MissingRegexCapture { regex: Regex, capture_index: usize },
    #[error("After the document was already assigned a unit, another unit command was found.")]
    TriedToSetUnitsTwice {},
    #[error(
        "After the document was already assigned a format specification, \
    another format specification command was found."
    )]
    TriedToFormatTwice {},
    #[error("Set unit command included unrecognized units: {units_str}.")]
    InvalidUnitFormat { units_str: String },
    #[error(
        "Error parsing format spec block. Looking for 2 digits but found 1 or none. \
    Expected something like 'FSLAX23Y23*'."
    )]
    ParseFormatErrorWrongNumDigits {},
    #[error("format spec digit count must be between 1 and 6. Found {digit_found}.")]
    ParseFormatErrorInvalidDigit { digit_found: u8 },
    #[error("Error parsing char as base 10 digit: '{char_found:?}'.")]
    ParseDigitError { char_found: char },
    #[error(
        "tried to parse '{aperture_code_str}' as an aperture code (integer) greater than 9 but failed."
    )]
    ApertureCodeParseFailed { aperture_code_str: String },
    #[error("tried to parse the definition of aperture '{aperture_code}' but failed.")]
    ParseApertureDefinitionBodyError { aperture_code: i32 },
    #[error(
        "aperture '{aperture_code}' of type '{aperture_name}' is missing its definition arguments."
    )]
    MissingApertureDefinitionArgs {
        aperture_code: i32,
        aperture_name: String,
    },
    #[error(
        "tried to parse the definition of aperture, but it uses an unknown type: '{type_str}'."
    )]
    UnknownApertureType { type_str: String },
    #[error("polygon aperture vertex count must be between 3 and 12. Found {vertices}.")]
    PolygonVertexCount { vertices: u32 },
    #[error("tried to parse the definition of aperture '{aperture_code}' but it already exists.")]
    ApertureDefinedTwice { aperture_code: i32 },
    #[error("aperture 'D{aperture_code}' was selected before it was defined.")]
    ApertureNotDefined { aperture_code: i32 },
    #[error("operation statement before any aperture was selected.")]
    NoApertureSelected {},
    #[error(
        "tried to parse coordinate number out of '{coord_num_str}' but failed. \
    This means a coordinate was captured, but could not be parsed as an i64."
    )]
    FailedToParseCoordinate { coord_num_str: String },
    #[error(
        "coordinate '{coord_num_str}' has more digits than the declared format allows ({max_digits})."
    )]
    CoordinateTooLong {
        coord_num_str: String,
        max_digits: u8,
    },
    #[error("Operation statement called before format specification.")]
    OperationBeforeFormat {},
    #[error("Operation statement called before unit specification.")]
    OperationBeforeUnit {},
    #[error("Coordinate block carries no operation code and none is in effect.")]
    OperationWithoutCode {},
    #[error("Flash (D03) inside a region.")]
    FlashInRegion {},
    #[error("Draw (D01) inside a region before a move (D02) anchored the contour.")]
    RegionWithoutAnchor {},
    #[error("Region closed with {edges} edge(s); at least 3 are required.")]
    RegionTooFewEdges { edges: usize },
    #[error("G37 without a matching G36.")]
    RegionNotOpen {},
    #[error("End of stream while a region is still open.")]
    RegionNotClosed {},
    #[error(
        "Arc endpoints are not equidistant from the center implied by I/J \
    (start radius {start_radius}, end radius {end_radius})."
    )]
    ArcRadiusMismatch { start_radius: f64, end_radius: f64 },
    #[error(
        "No signed combination of the I/J offsets yields a single-quadrant arc \
    between the given endpoints."
    )]
    SingleQuadrantNoSolution {},
    #[error("IO error occurred: {0}")]
    IoError(String),
}

impl ContentError {
    /// Collapse this error into the coarse classification used by callers.
    pub fn kind(&self) -> ErrorKind {
        use ContentError::*;
        match self {
            UnknownCommand {}
            | UnterminatedParameterBlock {}
            | NoRegexMatch { .. }
            | MissingRegexCapture { .. }
            | InvalidUnitFormat { .. }
            | ParseFormatErrorWrongNumDigits {}
            | ParseFormatErrorInvalidDigit { .. }
            | ParseDigitError { .. }
            | ApertureCodeParseFailed { .. }
            | ParseApertureDefinitionBodyError { .. }
            | MissingApertureDefinitionArgs { .. }
            | UnknownApertureType { .. }
            | PolygonVertexCount { .. }
            | FailedToParseCoordinate { .. }
            | CoordinateTooLong { .. }
            | OperationWithoutCode {} => ErrorKind::MalformedInput,
            ApertureNotDefined { .. } => ErrorKind::UndefinedAperture,
            TriedToSetUnitsTwice {}
            | TriedToFormatTwice {}
            | ApertureDefinedTwice { .. }
            | NoApertureSelected {}
            | OperationBeforeFormat {}
            | OperationBeforeUnit {}
            | FlashInRegion {}
            | RegionWithoutAnchor {}
            | RegionTooFewEdges { .. }
            | RegionNotOpen {}
            | RegionNotClosed {}
            | ArcRadiusMismatch { .. }
            | SingleQuadrantNoSolution {} => ErrorKind::InvalidState,
            UnsupportedCommand {} => ErrorKind::Unsupported,
            IoError(_) => ErrorKind::Io,
        }
    }

    /// Attach the offending block's line number and text.
    pub fn to_with_context(self, line: Option<(usize, String)>) -> GerberSvgError {
        GerberSvgError { error: self, line }
    }
}

/// A [`ContentError`] together with the line number and text of the block
/// that caused it.
#[derive(Error, Debug)]
pub struct GerberSvgError {
    pub error: ContentError,
    /// Line number as counted by the tokenizer, plus the block text.
    pub line: Option<(usize, String)>,
}

impl GerberSvgError {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl fmt::Display for GerberSvgError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.line {
            Some((number, content)) if !content.is_empty() => {
                write!(f, "Error: {}\nLine {}: '{}'", self.error, number, content)
            }
            Some((number, _)) => {
                write!(f, "Error: {}\nLine {}", self.error, number)
            }
            None => {
                write!(f, "Error at unspecified line: {}", self.error)
            }
        }
    }
}
