use crate::processor::Processor;
use std::io::BufReader;
use std::str;

#[must_use]
pub fn gerber_to_reader(gerber_string: &str) -> BufReader<&[u8]> {
    let bytes = gerber_string.as_bytes();
    BufReader::new(bytes)
}

/// Render a processor to an in-memory SVG string.
///
/// Writing into a `Vec` cannot fail and the serializer only emits ASCII, so
/// the unwraps here are unreachable; this is a convenience for tests and
/// small tools, real sinks should use [`Processor::write`].
#[must_use]
pub fn svg_to_string(processor: &Processor) -> String {
    let mut buffer = Vec::<u8>::new();
    processor.write(&mut buffer).unwrap();
    str::from_utf8(&buffer).unwrap().to_string()
}
