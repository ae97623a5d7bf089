use gerber_svg::parse;
use gerber_svg::util::{gerber_to_reader, svg_to_string};

/// `two_square_boxes.gbr` is Ucamco's example 1 ("Two square boxes"); the
/// expected SVG bytes are the reference renderer's output for it, so this
/// test pins the whole pipeline byte-for-byte: line numbering, Y negation
/// (including the `-0` spelling), stroke resolution and the viewBox.
#[test]
fn two_square_boxes_to_svg() {
    let gbr_string = include_str!("../assets/reference_files/two_square_boxes.gbr");
    let expected = include_str!("../assets/reference_files/two_square_boxes.svg");

    let mut processor = parse(gerber_to_reader(gbr_string)).unwrap();
    processor.pan_zoom = false;

    assert_eq!(svg_to_string(&processor), expected);
}

#[test]
fn two_square_boxes_bounding_box() {
    let gbr_string = include_str!("../assets/reference_files/two_square_boxes.gbr");

    let processor = parse(gerber_to_reader(gbr_string)).unwrap();

    assert_eq!(
        (
            processor.min_x,
            processor.min_y,
            processor.max_x,
            processor.max_y
        ),
        (0.0, 0.0, 11000000.0, 5000000.0)
    );
    assert_eq!(processor.decimal, 1000000.0);
}

/// Covers every flash template, a region and a quarter arc against pinned
/// output bytes.
#[test]
fn flashes_and_regions_to_svg() {
    let gbr_string = include_str!("../assets/reference_files/flashes_and_regions.gbr");
    let expected = include_str!("../assets/reference_files/flashes_and_regions.svg");

    let mut processor = parse(gerber_to_reader(gbr_string)).unwrap();
    processor.pan_zoom = false;

    assert_eq!(svg_to_string(&processor), expected);
}

/// The JSON form must survive a full parse as well, not just hand-built
/// processors.
#[test]
fn two_square_boxes_json_round_trip() {
    let gbr_string = include_str!("../assets/reference_files/two_square_boxes.gbr");

    let processor = parse(gerber_to_reader(gbr_string)).unwrap();
    let decoded = gerber_svg::Processor::from_json(&processor.to_json().unwrap()).unwrap();

    assert_eq!(decoded, processor);
}
