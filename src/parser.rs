use lazy_regex::*;
use regex::Regex;

use crate::aperture::{Aperture, Circle, Polygon, Rectangular};
use crate::command::{Command, CoordinateTokens, InterpolationMode, OpCode, Polarity, QuadrantMode};
use crate::error::ContentError;
use crate::format::{CoordinateFormat, CoordinateMode, Unit, ZeroOmission};
use crate::tokenizer::{Block, BlockKind};

// Block texts arrive with whitespace already stripped by the tokenizer;
// parameter blocks keep their interior '*' terminators, data blocks do not.
static RE_UNITS: Lazy<Regex> = lazy_regex!(r"^MO(.*)\*$");
static RE_FORMAT_SPEC: Lazy<Regex> = lazy_regex!(r"^FS([LT])([AI])X([0-9])([0-9])Y([0-9])([0-9])\*$");
static RE_APERTURE: Lazy<Regex> =
    lazy_regex!(r"^ADD([0-9]+)([._$a-zA-Z][._$a-zA-Z0-9]{0,126})(?:,(.*))?\*$");
static RE_OPERATION: Lazy<Regex> = lazy_regex!(
    r"^(?:X(?P<x>[+-]?[0-9]+))?(?:Y(?P<y>[+-]?[0-9]+))?(?:I(?P<i>[+-]?[0-9]+))?(?:J(?P<j>[+-]?[0-9]+))?(?:D(?P<d>[0-9]+))?$"
);

/// Parse one tokenized block into commands.
///
/// Most blocks yield exactly one command; a data block that combines a G
/// code with coordinates and an operation (e.g. `G01X0Y0D01*`) yields two,
/// in source order.
pub fn parse_block(block: &Block) -> Result<Vec<Command>, ContentError> {
    match block.kind {
        BlockKind::Parameter => parse_parameter_block(&block.text).map(|command| vec![command]),
        BlockKind::Data => parse_data_block(&block.text),
    }
}

fn parse_parameter_block(text: &str) -> Result<Command, ContentError> {
    let mut linechars = text.chars();

    match linechars.next().ok_or(ContentError::UnknownCommand {})? {
        'M' => match linechars.next().ok_or(ContentError::UnknownCommand {})? {
            'O' => parse_units(text).map(Command::Unit),
            _ => Err(ContentError::UnknownCommand {}),
        },
        'F' => match linechars.next().ok_or(ContentError::UnknownCommand {})? {
            'S' => parse_format_spec(text).map(Command::CoordinateFormat),
            _ => Err(ContentError::UnknownCommand {}),
        },
        'A' => match linechars.next().ok_or(ContentError::UnknownCommand {})? {
            'D' => {
                let (code, aperture) = parse_aperture_def(text)?;
                Ok(Command::ApertureDefinition(code, aperture))
            }
            // Aperture macros are outside the supported subset.
            'M' => Err(ContentError::UnsupportedCommand {}),
            _ => Err(ContentError::UnknownCommand {}),
        },
        'L' => match linechars.next().ok_or(ContentError::UnknownCommand {})? {
            'P' => match linechars.next().ok_or(ContentError::UnknownCommand {})? {
                'D' => Ok(Command::LoadPolarity(Polarity::Dark)),
                'C' => Ok(Command::LoadPolarity(Polarity::Clear)),
                _ => Err(ContentError::UnknownCommand {}),
            },
            'N' => Ok(Command::LevelName(parameter_body(text, 2)?)),
            'M' | 'R' | 'S' => Err(ContentError::UnsupportedCommand {}),
            _ => Err(ContentError::UnknownCommand {}),
        },
        'S' => match linechars.next().ok_or(ContentError::UnknownCommand {})? {
            // Step and repeat is outside the supported subset.
            'R' => Err(ContentError::UnsupportedCommand {}),
            _ => Err(ContentError::UnknownCommand {}),
        },
        'T' => match linechars.next().ok_or(ContentError::UnknownCommand {})? {
            'F' | 'A' | 'O' | 'D' => Ok(Command::Attribute(text.to_string())),
            _ => Err(ContentError::UnknownCommand {}),
        },
        'I' => match linechars.next().ok_or(ContentError::UnknownCommand {})? {
            // Image name, deprecated but still emitted by some CAD exports.
            'N' => Ok(Command::ImageName(parameter_body(text, 2)?)),
            'P' => Err(ContentError::UnsupportedCommand {}),
            _ => Err(ContentError::UnknownCommand {}),
        },
        _ => Err(ContentError::UnknownCommand {}),
    }
}

/// Strip a two-letter parameter code prefix and the trailing `*`.
fn parameter_body(text: &str, prefix: usize) -> Result<String, ContentError> {
    text.strip_suffix('*')
        .map(|inner| inner[prefix..].to_string())
        .ok_or(ContentError::UnknownCommand {})
}

fn parse_data_block(text: &str) -> Result<Vec<Command>, ContentError> {
    let mut linechars = text.chars();

    match linechars.next().ok_or(ContentError::UnknownCommand {})? {
        'G' => {
            // G codes carry at most two digits; anything beyond belongs to
            // the payload (comment text after G04 may start with a digit).
            let digits: String = linechars
                .clone()
                .take_while(|c| c.is_ascii_digit())
                .take(2)
                .collect();
            let rest = &text[1 + digits.len()..];
            let code: u32 = digits
                .parse()
                .map_err(|_| ContentError::UnknownCommand {})?;

            let command = match code {
                1 => Command::InterpolationMode(InterpolationMode::Linear),
                2 => Command::InterpolationMode(InterpolationMode::ClockwiseCircular),
                3 => Command::InterpolationMode(InterpolationMode::CounterclockwiseCircular),
                4 => return Ok(vec![Command::Comment(rest.to_string())]),
                36 => Command::RegionMode(true),
                37 => Command::RegionMode(false),
                // Deprecated select-aperture prefix: re-dispatch whatever it wraps.
                54 => {
                    return if rest.is_empty() {
                        Ok(vec![])
                    } else {
                        parse_data_block(rest)
                    };
                }
                70 => Command::DeprecatedUnit(Unit::Inches),
                71 => Command::DeprecatedUnit(Unit::Millimeters),
                74 => Command::QuadrantMode(QuadrantMode::Single),
                75 => Command::QuadrantMode(QuadrantMode::Multi),
                90 => Command::DeprecatedNotation(CoordinateMode::Absolute),
                91 => Command::DeprecatedNotation(CoordinateMode::Incremental),
                _ => return Err(ContentError::UnknownCommand {}),
            };

            if rest.is_empty() {
                Ok(vec![command])
            } else {
                // A G code may prefix a coordinate block, e.g. 'G01X0Y0D01*'.
                let operation = parse_operation(rest)?;
                Ok(vec![command, operation])
            }
        }
        'X' | 'Y' | 'I' | 'J' | 'D' => Ok(vec![parse_operation(text)?]),
        'M' => {
            let digits: String = linechars.take_while(|c| c.is_ascii_digit()).collect();
            match digits.parse::<u32>() {
                Ok(0) => Ok(vec![Command::ProgramStop]),
                Ok(1) => Ok(vec![Command::OptionalStop]),
                Ok(2) => Ok(vec![Command::EndOfFile]),
                _ => Err(ContentError::UnknownCommand {}),
            }
        }
        _ => Err(ContentError::UnknownCommand {}),
    }
}

/// Parse a coordinate/operation statement: any of X/Y/I/J followed by an
/// optional D code, or a bare D code (operation or aperture selection).
fn parse_operation(text: &str) -> Result<Command, ContentError> {
    let captures = RE_OPERATION
        .captures(text)
        .ok_or(ContentError::NoRegexMatch {
            regex: RE_OPERATION.clone(),
        })?;

    let coords = CoordinateTokens {
        x: captures.name("x").map(|m| m.as_str().to_string()),
        y: captures.name("y").map(|m| m.as_str().to_string()),
        i: captures.name("i").map(|m| m.as_str().to_string()),
        j: captures.name("j").map(|m| m.as_str().to_string()),
    };

    match captures.name("d") {
        Some(code_match) => {
            let code_str = code_match.as_str();
            let code: u32 = code_str
                .parse()
                .map_err(|_| ContentError::ApertureCodeParseFailed {
                    aperture_code_str: code_str.to_string(),
                })?;
            match code {
                1 => Ok(Command::Operation {
                    coords,
                    op: Some(OpCode::Interpolate),
                }),
                2 => Ok(Command::Operation {
                    coords,
                    op: Some(OpCode::Move),
                }),
                3 => Ok(Command::Operation {
                    coords,
                    op: Some(OpCode::Flash),
                }),
                10.. => {
                    if coords.is_empty() {
                        Ok(Command::SelectAperture(code as i32))
                    } else {
                        Err(ContentError::UnknownCommand {})
                    }
                }
                _ => Err(ContentError::UnknownCommand {}),
            }
        }
        None => {
            if coords.is_empty() {
                Err(ContentError::UnknownCommand {})
            } else {
                // Bare coordinates repeat the modal operation code.
                Ok(Command::Operation { coords, op: None })
            }
        }
    }
}

/// Parse a unit statement (e.g. 'MOMM*').
fn parse_units(text: &str) -> Result<Unit, ContentError> {
    match RE_UNITS.captures(text) {
        Some(regmatch) => {
            let units_str = regmatch
                .get(1)
                .ok_or(ContentError::MissingRegexCapture {
                    regex: RE_UNITS.clone(),
                    capture_index: 1,
                })?
                .as_str();
            match units_str {
                "MM" => Ok(Unit::Millimeters),
                "IN" => Ok(Unit::Inches),
                _ => Err(ContentError::InvalidUnitFormat {
                    units_str: text.to_string(),
                }),
            }
        }
        None => Err(ContentError::NoRegexMatch {
            regex: RE_UNITS.clone(),
        }),
    }
}

/// Parse a format spec statement (e.g. 'FSLAX23Y23*').
fn parse_format_spec(text: &str) -> Result<CoordinateFormat, ContentError> {
    let Some(captures) = RE_FORMAT_SPEC.captures(text) else {
        return Err(ContentError::NoRegexMatch {
            regex: RE_FORMAT_SPEC.clone(),
        });
    };

    let single_char = |index: usize| -> Result<char, ContentError> {
        captures
            .get(index)
            .ok_or(ContentError::MissingRegexCapture {
                regex: RE_FORMAT_SPEC.clone(),
                capture_index: index,
            })?
            .as_str()
            .chars()
            .next()
            .ok_or(ContentError::ParseFormatErrorWrongNumDigits {})
    };

    let zero_omission = match single_char(1)? {
        'L' => ZeroOmission::Leading,
        _ => ZeroOmission::Trailing,
    };
    let mode = match single_char(2)? {
        'A' => CoordinateMode::Absolute,
        _ => CoordinateMode::Incremental,
    };
    let integer = parse_char(single_char(3)?)?;
    let decimal = parse_char(single_char(4)?)?;

    // The Gerber format bounds both digit counts to 1..=6.
    for digit in [integer, decimal] {
        if !(1..=6).contains(&digit) {
            return Err(ContentError::ParseFormatErrorInvalidDigit { digit_found: digit });
        }
    }

    Ok(CoordinateFormat::new(zero_omission, mode, integer, decimal))
}

fn parse_char(char_in: char) -> Result<u8, ContentError> {
    Ok(char_in
        .to_digit(10)
        .ok_or(ContentError::ParseDigitError { char_found: char_in })? as u8)
}

/// Parse an aperture definition (e.g. 'ADD44R,2.0X3.0*').
fn parse_aperture_def(text: &str) -> Result<(i32, Aperture), ContentError> {
    let Some(captures) = RE_APERTURE.captures(text) else {
        return Err(ContentError::NoRegexMatch {
            regex: RE_APERTURE.clone(),
        });
    };

    // Sync captures with [`RE_APERTURE`] definition.
    const CAPTURE_APERTURE_CODE: usize = 1;
    const CAPTURE_APERTURE_NAME: usize = 2;
    const CAPTURE_APERTURE_ARGS: usize = 3;

    let code_str = captures
        .get(CAPTURE_APERTURE_CODE)
        .ok_or(ContentError::MissingRegexCapture {
            regex: RE_APERTURE.clone(),
            capture_index: CAPTURE_APERTURE_CODE,
        })?
        .as_str();
    let code = parse_aperture_code(code_str)?;

    let aperture_name = captures
        .get(CAPTURE_APERTURE_NAME)
        .ok_or(ContentError::MissingRegexCapture {
            regex: RE_APERTURE.clone(),
            capture_index: CAPTURE_APERTURE_NAME,
        })?
        .as_str();

    // A multi-character name references an aperture macro.
    if aperture_name.len() > 1 {
        return Err(ContentError::UnsupportedCommand {});
    }

    let args: Option<Vec<&str>> = captures
        .get(CAPTURE_APERTURE_ARGS)
        .map(|m| m.as_str().split('X').collect());

    let parse_arg = |arg: &str| -> Result<f64, ContentError> {
        arg.parse::<f64>()
            .map_err(|_| ContentError::ParseApertureDefinitionBodyError {
                aperture_code: code,
            })
    };

    match (aperture_name, args) {
        ("C", Some(args)) => {
            let diameter = parse_arg(args.first().ok_or(
                ContentError::ParseApertureDefinitionBodyError {
                    aperture_code: code,
                },
            )?)?;
            let hole_diameter = args.get(1).map(|arg| parse_arg(arg)).transpose()?;
            Ok((
                code,
                Aperture::Circle(Circle {
                    diameter,
                    hole_diameter,
                }),
            ))
        }
        ("R", Some(args)) => Ok((code, Aperture::Rectangle(parse_rectangular(&args, code, parse_arg)?))),
        ("O", Some(args)) => Ok((code, Aperture::Obround(parse_rectangular(&args, code, parse_arg)?))),
        // Note that for polygon we HAVE TO specify rotation if we want to add a hole.
        ("P", Some(args)) => {
            let diameter = parse_arg(args.first().ok_or(
                ContentError::ParseApertureDefinitionBodyError {
                    aperture_code: code,
                },
            )?)?;
            let vertices: u32 = args
                .get(1)
                .ok_or(ContentError::ParseApertureDefinitionBodyError {
                    aperture_code: code,
                })?
                .parse()
                .map_err(|_| ContentError::ParseApertureDefinitionBodyError {
                    aperture_code: code,
                })?;
            if !(3..=12).contains(&vertices) {
                return Err(ContentError::PolygonVertexCount { vertices });
            }
            let rotation = args.get(2).map(|arg| parse_arg(arg)).transpose()?;
            let hole_diameter = args.get(3).map(|arg| parse_arg(arg)).transpose()?;
            Ok((
                code,
                Aperture::Polygon(Polygon {
                    diameter,
                    vertices: vertices as u8,
                    rotation,
                    hole_diameter,
                }),
            ))
        }
        (name, None) if ["C", "R", "O", "P"].contains(&name) => {
            Err(ContentError::MissingApertureDefinitionArgs {
                aperture_code: code,
                aperture_name: name.to_string(),
            })
        }
        (unknown_type, _args) => Err(ContentError::UnknownApertureType {
            type_str: unknown_type.to_string(),
        }),
    }
}

fn parse_rectangular(
    args: &[&str],
    code: i32,
    parse_arg: impl Fn(&str) -> Result<f64, ContentError>,
) -> Result<Rectangular, ContentError> {
    let x = parse_arg(args.first().ok_or(
        ContentError::ParseApertureDefinitionBodyError {
            aperture_code: code,
        },
    )?)?;
    let y = parse_arg(args.get(1).ok_or(
        ContentError::ParseApertureDefinitionBodyError {
            aperture_code: code,
        },
    )?)?;
    let hole_diameter = args.get(2).map(|arg| parse_arg(arg)).transpose()?;
    Ok(Rectangular {
        x,
        y,
        hole_diameter,
    })
}

fn parse_aperture_code(code_str: &str) -> Result<i32, ContentError> {
    match code_str.parse::<i32>() {
        Ok(v) if v >= 10 => Ok(v),
        _ => Err(ContentError::ApertureCodeParseFailed {
            aperture_code_str: code_str.to_string(),
        }),
    }
}
