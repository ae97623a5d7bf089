use gerber_svg::parse;
use gerber_svg::util::gerber_to_reader;

use std::io;

fn main() {
    let reader = gerber_to_reader(
        "%FSLAX23Y23*%
    %MOMM*%

    G04 Define the apertures*
    %ADD801C,0.1*%
    %ADD802C,0.5*%
    %ADD803R,0.5X1.5*%

    G04 Outline with a rounded corner*
    D801*
    G75*
    G01*
    X0Y0D02*
    X4000Y0D01*
    X4000Y1000D01*
    G03*
    X3000Y2000I-1000J0D01*
    G01*
    X0Y2000D01*
    Y0D01*

    G04 A few pads*
    D802*
    X1000Y1000D03*
    X2000Y1000D03*
    D803*
    X3000Y750D03*

    M02*
    ",
    );

    let mut processor = parse(reader).unwrap();
    processor.pan_zoom = false;

    let stdout = io::stdout();
    processor.write(stdout.lock()).unwrap();
}
