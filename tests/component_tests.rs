use gerber_svg::util::{gerber_to_reader, svg_to_string};
use gerber_svg::{parse, Element, ErrorKind, PathCommand};

mod util;
use util::testing::logging_init;

/// This macro is used by the tests to parse, then filter elements based on the closure $c which
/// takes a single `&Element` as an argument; the closure should return 'true' to keep the element,
/// false otherwise. The closure is often implemented using `matches!(element, ...)`
macro_rules! parse_and_filter {
    ($reader:ident, $elements:ident, $filtered_elements:ident, $c:expr) => {
        let $elements = parse($reader).unwrap().data;
        println!("parsed elements:");
        dump_elements(&$elements);

        // then
        let filter_elements =
            |elements: Vec<Element>| -> Vec<Element> { elements.into_iter().filter($c).collect() };

        let $filtered_elements = filter_elements($elements);
        println!("filtered elements:");
        dump_elements(&$filtered_elements);
    };
}

fn dump_elements(elements: &[Element]) {
    for element in elements {
        println!("{:?}", element);
    }
    println!();
}

#[test]
fn format_specification() {
    // given
    logging_init();

    let reader_fs_1 = gerber_to_reader(
        "
    %FSLAX15Y15*%
    %MOMM*%
    M02*
    ",
    );

    let reader_fs_2 = gerber_to_reader(
        "
    %FSLAX36Y36*%
    %MOIN*%
    G04 Actual apertures and draw commands go here*
    M02*
    ",
    );

    // then
    assert_eq!(parse(reader_fs_1).unwrap().decimal, 100000.0);
    assert_eq!(parse(reader_fs_2).unwrap().decimal, 1000000.0);
}

#[test]
fn format_specification_must_not_repeat() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX15Y15*%
    %FSLAX15Y15*%
    %MOMM*%
    M02*
    ",
    );

    // then
    assert_eq!(parse(reader).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn units() {
    // given
    logging_init();

    let reader_mm = gerber_to_reader(
        "
    G04 The next line specifies the precision of the units*
    %FSLAX23Y23*%
    G04 The next line specifies the units (inches or mm)*
    %MOMM*%
    M02*
    ",
    );

    let reader_in = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOIN*%
    M02*
    ",
    );

    let reader_double = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %MOIN*%
    M02*
    ",
    );

    // then
    assert!(parse(reader_mm).is_ok());
    assert!(parse(reader_in).is_ok());
    assert_eq!(
        parse(reader_double).unwrap_err().kind(),
        ErrorKind::InvalidState
    );
}

#[test]
fn operation_before_format_or_unit_fails() {
    // given
    logging_init();

    let reader_no_format = gerber_to_reader(
        "
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    M02*
    ",
    );

    let reader_no_unit = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    M02*
    ",
    );

    // then
    assert_eq!(
        parse(reader_no_format).unwrap_err().kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(
        parse(reader_no_unit).unwrap_err().kind(),
        ErrorKind::InvalidState
    );
}

#[test]
fn aperture_referencing() {
    // given
    logging_init();

    let reader_undefined = gerber_to_reader(
        "%FSLAX26Y26*%
%MOMM*%
D11*
M02*
",
    );

    let reader_defined = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD11C,0.01*%
    D11*
    M02*
    ",
    );

    // when
    let error = parse(reader_undefined).unwrap_err();

    // then
    assert_eq!(error.kind(), ErrorKind::UndefinedAperture);
    // Two full lines precede the offending block.
    assert_eq!(error.line, Some((2, "D11".to_string())));

    assert!(parse(reader_defined).is_ok());
}

#[test]
fn aperture_redefinition_fails() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    %ADD10C,0.02*%
    M02*
    ",
    );

    // then
    assert_eq!(parse(reader).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn operation_before_aperture_selection_fails() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    X0Y0D02*
    M02*
    ",
    );

    // then
    assert_eq!(parse(reader).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn lines_capture_polarity_at_emission_time() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    G01*
    X1000D01*
    %LPC*%
    X2000D01*
    %LPD*%
    X3000D01*
    M02*
    ",
    );

    // when
    parse_and_filter!(reader, elements, filtered_elements, |element| matches!(
        element,
        Element::Line { .. }
    ));

    // then
    let strokes: Vec<&str> = filtered_elements
        .iter()
        .map(|element| match element {
            Element::Line { stroke, .. } => stroke.as_str(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(strokes, vec!["white", "black", "white"]);
}

#[test]
fn rectangle_aperture_strokes_use_the_smaller_dimension_and_square_caps() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %ADD20R,0.5X1.5*%
    D20*
    X0Y0D02*
    G01*
    X5000D01*
    M02*
    ",
    );

    // when
    parse_and_filter!(reader, elements, filtered_elements, |element| matches!(
        element,
        Element::Line { .. }
    ));

    // then
    assert_eq!(filtered_elements.len(), 1);
    match &filtered_elements[0] {
        Element::Line {
            stroke_width, cap, ..
        } => {
            assert_eq!(*stroke_width, 500.0);
            assert_eq!(cap, "square");
        }
        _ => unreachable!(),
    }
}

#[test]
fn modal_coordinates_default_to_the_current_point() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X1000Y2000D02*
    G01*
    Y5000D01*
    M02*
    ",
    );

    // when
    parse_and_filter!(reader, elements, filtered_elements, |element| matches!(
        element,
        Element::Line { .. }
    ));

    // then
    assert_eq!(
        filtered_elements,
        vec![Element::Line {
            line: 7,
            x1: 1000.0,
            y1: 2000.0,
            x2: 1000.0,
            y2: 5000.0,
            stroke_width: 10.0,
            cap: "round".to_string(),
            stroke: "white".to_string(),
        }]
    );
}

#[test]
fn bare_coordinates_repeat_the_modal_operation() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    G01*
    X1000D01*
    Y1000*
    M02*
    ",
    );

    // when
    parse_and_filter!(reader, elements, filtered_elements, |element| matches!(
        element,
        Element::Line { .. }
    ));

    // then
    assert_eq!(filtered_elements.len(), 2);
}

#[test]
fn incremental_notation_accumulates() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLIX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X1000Y1000D02*
    G01*
    X500Y-250D01*
    M02*
    ",
    );

    // when
    parse_and_filter!(reader, elements, filtered_elements, |element| matches!(
        element,
        Element::Line { .. }
    ));

    // then
    match &filtered_elements[0] {
        Element::Line { x1, y1, x2, y2, .. } => {
            assert_eq!((*x1, *y1), (1000.0, 1000.0));
            assert_eq!((*x2, *y2), (1500.0, 750.0));
        }
        _ => unreachable!(),
    }
}

#[test]
fn trailing_zero_omission_pads_low_order_digits() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSTAX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    G01*
    X1D01*
    M02*
    ",
    );

    // when
    parse_and_filter!(reader, elements, filtered_elements, |element| matches!(
        element,
        Element::Line { .. }
    ));

    // then
    match &filtered_elements[0] {
        Element::Line { x2, .. } => assert_eq!(*x2, 10000.0),
        _ => unreachable!(),
    }
}

#[test]
fn deprecated_unit_and_notation_codes_yield_to_mo_and_fs() {
    // given
    logging_init();

    // No %MO% at all: the deprecated G71 supplies the unit, so the draw
    // commands are accepted.
    let reader_substitute = gerber_to_reader(
        "
    %FSLAX23Y23*%
    G71*
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    G01*
    X1000Y1000D01*
    M02*
    ",
    );

    // %MO% and %FS% already seen: the conflicting G70 and G91 are ignored
    // instead of overriding the unit or switching to incremental notation.
    let reader_ignored = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    G70*
    G91*
    %ADD10C,0.01*%
    D10*
    X500Y500D02*
    G01*
    X1000Y1000D01*
    M02*
    ",
    );

    // then
    assert_eq!(parse(reader_substitute).unwrap().data.len(), 1);

    parse_and_filter!(reader_ignored, elements, filtered_elements, |element| matches!(
        element,
        Element::Line { .. }
    ));
    // Absolute notation kept: an honored G91 would have landed at (1500, 1500).
    assert_eq!(
        filtered_elements,
        vec![Element::Line {
            line: 9,
            x1: 500.0,
            y1: 500.0,
            x2: 1000.0,
            y2: 1000.0,
            stroke_width: 10.0,
            cap: "round".to_string(),
            stroke: "white".to_string(),
        }]
    );
}

#[test]
fn single_and_multi_quadrant_quarter_circles_agree() {
    // given
    logging_init();

    // In single-quadrant mode I and J are unsigned; the interpreter has to
    // recover the signed center offset itself.
    let reader_single = gerber_to_reader(
        "%FSLAX26Y26*%
%MOMM*%
%ADD10C,0.01*%
D10*
G74*
G03*
X100000Y0D02*
X0Y100000I100000J0D01*
M02*
",
    );

    let reader_multi = gerber_to_reader(
        "%FSLAX26Y26*%
%MOMM*%
%ADD10C,0.01*%
D10*
G75*
G03*
X100000Y0D02*
X0Y100000I-100000J0D01*
M02*
",
    );

    // when
    parse_and_filter!(reader_single, elements, single_arcs, |element| matches!(
        element,
        Element::Arc { .. }
    ));
    parse_and_filter!(reader_multi, elements, multi_arcs, |element| matches!(
        element,
        Element::Arc { .. }
    ));

    // then
    assert_eq!(single_arcs.len(), 1);
    assert_eq!(single_arcs, multi_arcs);
    match &single_arcs[0] {
        Element::Arc {
            xs,
            ys,
            xe,
            ye,
            rx,
            ry,
            large_arc,
            sweep,
            cx,
            cy,
            ..
        } => {
            assert_eq!((*xs, *ys), (100000.0, 0.0));
            assert_eq!((*xe, *ye), (0.0, 100000.0));
            assert_eq!((*cx, *cy), (0.0, 0.0));
            assert_eq!((*rx, *ry), (100000.0, 100000.0));
            assert_eq!(*large_arc, 0.0);
            // A counterclockwise Gerber arc runs against SVG's positive
            // angle direction once Y is negated.
            assert_eq!(*sweep, 0.0);
        }
        _ => unreachable!(),
    }
}

#[test]
fn clockwise_arcs_set_the_sweep_flag() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    G75*
    G02*
    X0Y100000D02*
    X100000Y0I0J-100000D01*
    M02*
    ",
    );

    // when
    parse_and_filter!(reader, elements, filtered_elements, |element| matches!(
        element,
        Element::Arc { .. }
    ));

    // then
    match &filtered_elements[0] {
        Element::Arc {
            sweep, large_arc, ..
        } => {
            assert_eq!(*sweep, 1.0);
            assert_eq!(*large_arc, 0.0);
        }
        _ => unreachable!(),
    }
}

#[test]
fn arc_with_inconsistent_center_fails() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    G75*
    G02*
    X100000Y0D02*
    X0Y100000I5000J0D01*
    M02*
    ",
    );

    // then
    assert_eq!(parse(reader).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn multi_quadrant_full_circle_is_split_into_two_arcs() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    G75*
    G03*
    X100000Y0D02*
    X100000Y0I-100000J0D01*
    M02*
    ",
    );

    // when
    parse_and_filter!(reader, elements, filtered_elements, |element| matches!(
        element,
        Element::Arc { .. }
    ));

    // then
    assert_eq!(filtered_elements.len(), 2);
    match (&filtered_elements[0], &filtered_elements[1]) {
        (
            Element::Arc {
                xs, ys, xe, ye, ..
            },
            Element::Arc {
                xs: xs2,
                ys: ys2,
                xe: xe2,
                ye: ye2,
                ..
            },
        ) => {
            assert_eq!((*xs, *ys), (100000.0, 0.0));
            assert_eq!((*xe, *ye), (-100000.0, 0.0));
            assert_eq!((*xs2, *ys2), (-100000.0, 0.0));
            assert_eq!((*xe2, *ye2), (100000.0, 0.0));
        }
        _ => unreachable!(),
    }
}

#[test]
fn region_mode_emits_a_single_filled_path() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    G36*
    X0Y0D02*
    G01*
    X1000000D01*
    Y1000000D01*
    X0D01*
    Y0D01*
    G37*
    M02*
    ",
    );

    // when
    let data = parse(reader).unwrap().data;

    // then
    assert_eq!(data.len(), 1);
    match &data[0] {
        Element::Path {
            x, y, fill, commands, ..
        } => {
            assert_eq!((*x, *y), (0.0, 0.0));
            assert_eq!(fill, "white");
            assert_eq!(commands.len(), 4);
            assert!(commands
                .iter()
                .all(|command| matches!(command, PathCommand::Line { .. })));
        }
        _ => unreachable!(),
    }
}

#[test]
fn region_with_clear_polarity_fills_with_the_clear_color() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    %LPC*%
    G36*
    X0Y0D02*
    G01*
    X1000000D01*
    Y1000000D01*
    X0D01*
    G37*
    M02*
    ",
    );

    // when
    let data = parse(reader).unwrap().data;

    // then
    match &data[0] {
        Element::Path { fill, .. } => assert_eq!(fill, "black"),
        _ => unreachable!(),
    }
}

#[test]
fn region_with_an_arc_edge_appends_a_path_arc() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    G75*
    G36*
    X0Y0D02*
    G01*
    X100000D01*
    G03*
    X0Y100000I-100000J0D01*
    G01*
    Y0D01*
    G37*
    M02*
    ",
    );

    // when
    let data = parse(reader).unwrap().data;

    // then
    assert_eq!(data.len(), 1);
    match &data[0] {
        Element::Path { commands, .. } => {
            assert_eq!(commands.len(), 3);
            assert!(matches!(commands[1], PathCommand::Arc { .. }));
        }
        _ => unreachable!(),
    }
}

#[test]
fn region_with_too_few_edges_fails() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    G36*
    X0Y0D02*
    G01*
    X1000000D01*
    G37*
    M02*
    ",
    );

    // then
    assert_eq!(parse(reader).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn flash_inside_a_region_fails() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    G36*
    X0Y0D02*
    X1000Y0D03*
    G37*
    M02*
    ",
    );

    // then
    assert_eq!(parse(reader).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn flashes_resolve_the_aperture_geometry() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX24Y24*%
    %MOMM*%
    %ADD10C,1*%
    %ADD11R,2X1*%
    %ADD12O,2X1*%
    %ADD13P,2X4*%
    D10*
    X0Y0D03*
    D11*
    X30000Y0D03*
    D12*
    X60000Y0D03*
    D13*
    X90000Y0D03*
    M02*
    ",
    );

    // when
    let data = parse(reader).unwrap().data;

    // then
    assert_eq!(data.len(), 4);
    match &data[0] {
        Element::Circle { x, y, radius, .. } => {
            assert_eq!((*x, *y), (0.0, 0.0));
            assert_eq!(*radius, 5000.0);
        }
        _ => unreachable!(),
    }
    match &data[1] {
        Element::Rectangle {
            x,
            y,
            width,
            height,
            rx,
            ry,
            aperture,
            ..
        } => {
            assert_eq!((*x, *y), (20000.0, -5000.0));
            assert_eq!((*width, *height), (20000.0, 10000.0));
            assert_eq!((*rx, *ry), (0.0, 0.0));
            assert_eq!(aperture, "D11");
        }
        _ => unreachable!(),
    }
    match &data[2] {
        Element::Rectangle { rx, ry, .. } => {
            // Obrounds get stadium ends.
            assert_eq!((*rx, *ry), (5000.0, 5000.0));
        }
        _ => unreachable!(),
    }
    match &data[3] {
        Element::Path { x, y, commands, .. } => {
            assert_eq!((*x, *y), (100000.0, 0.0));
            assert_eq!(commands.len(), 3);
            assert_eq!(
                commands[0],
                PathCommand::Line {
                    x: 90000.0,
                    y: 10000.0,
                }
            );
        }
        _ => unreachable!(),
    }
}

#[test]
fn bounding_box_grows_with_the_emitted_geometry() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X1000Y2000D02*
    G01*
    X5000Y7000D01*
    M02*
    ",
    );

    // when
    let processor = parse(reader).unwrap();

    // then
    assert_eq!(processor.min_x, 1000.0);
    assert_eq!(processor.min_y, 2000.0);
    assert_eq!(processor.max_x, 5000.0);
    assert_eq!(processor.max_y, 7000.0);
    assert_eq!(processor.bounds_width(), 4000.0);
    assert_eq!(processor.bounds_height(), 5000.0);
}

#[test]
fn y_values_are_negated_with_signed_zero() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX26Y26*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    G01*
    X5000000D01*
    M02*
    ",
    );

    // when
    let mut processor = parse(reader).unwrap();
    processor.pan_zoom = false;
    let svg = svg_to_string(&processor);

    // then
    assert!(svg.contains("y1=\"-0\""));
    assert!(svg.contains("y2=\"-0\""));
    assert!(!svg.contains("y1=\"0\""));
}

#[test]
fn pan_zoom_controls_the_embedded_script() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    M02*
    ",
    );

    // when
    let mut processor = parse(reader).unwrap();

    // then
    assert!(processor.pan_zoom);
    assert!(svg_to_string(&processor).contains("<script"));

    processor.pan_zoom = false;
    assert!(!svg_to_string(&processor).contains("<script"));
}

#[test]
fn sizing_attributes_are_emitted_when_configured() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    G01*
    X1000Y1000D01*
    M02*
    ",
    );

    // when
    let mut processor = parse(reader).unwrap();
    processor.pan_zoom = false;
    let plain = svg_to_string(&processor);

    processor.width = "400px".to_string();
    processor.height = "300px".to_string();
    let sized = svg_to_string(&processor);

    processor.width = String::new();
    processor.height = String::new();
    processor.scale = 0.5;
    let scaled = svg_to_string(&processor);

    // then
    assert!(!plain.contains(" width=\""));
    assert!(sized.contains(" width=\"400px\" height=\"300px\""));
    assert!(scaled.contains(" width=\"500\" height=\"500\""));
}

#[test]
fn blocks_after_m02_are_discarded() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    M02*
    G01*
    X1000Y1000D01*
    ",
    );

    // when
    let processor = parse(reader).unwrap();

    // then
    assert!(processor.data.is_empty());
}

#[test]
fn missing_end_of_file_is_accepted() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %ADD10C,0.01*%
    D10*
    X0Y0D02*
    G01*
    X1000Y1000D01*
    ",
    );

    // then
    assert_eq!(parse(reader).unwrap().data.len(), 1);
}

#[test]
fn aperture_macros_and_step_repeat_are_unsupported() {
    // given
    logging_init();

    let reader_macro = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %AMDONUT*1,1,1.5,0,0*%
    M02*
    ",
    );

    let reader_step_repeat = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*%
    %SRX2Y2I1.0J1.0*%
    M02*
    ",
    );

    // then
    assert_eq!(
        parse(reader_macro).unwrap_err().kind(),
        ErrorKind::Unsupported
    );
    assert_eq!(
        parse(reader_step_repeat).unwrap_err().kind(),
        ErrorKind::Unsupported
    );
}

#[test]
fn attributes_and_names_are_consumed_silently() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %TF.Part,Single*%
    %FSLAX23Y23*%
    %MOMM*%
    %TA.AperFunction,Conductor*%
    %LNcopper-top*%
    %INdemo-board*%
    %TD*%
    M02*
    ",
    );

    // when
    let processor = parse(reader).unwrap();

    // then
    assert!(processor.data.is_empty());
}

#[test]
fn malformed_blocks_fail_with_context() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "%FSLAX23Y23*%
%MOMM*%
XNONSENSE*
M02*
",
    );

    // when
    let error = parse(reader).unwrap_err();

    // then
    assert_eq!(error.kind(), ErrorKind::MalformedInput);
    assert_eq!(
        error.line.as_ref().map(|(number, _)| *number),
        Some(2)
    );
}

#[test]
fn unterminated_parameter_block_fails() {
    // given
    logging_init();

    let reader = gerber_to_reader(
        "
    %FSLAX23Y23*%
    %MOMM*
    ",
    );

    // then
    assert_eq!(
        parse(reader).unwrap_err().kind(),
        ErrorKind::MalformedInput
    );
}
