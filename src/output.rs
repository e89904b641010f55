//! # Output Module
//!
//! Destinations for rendered pixels. The camera hands each sink byte triples
//! in row-major order, starting from the top scanline:
//! - [`PpmSink`] streams ASCII PPM (P3) to any writer
//! - [`PngSink`] buffers an 8-bit image and encodes it as PNG on `finish`
//!
//! Both receive the same gamma-mapped bytes, so a PNG and a PPM of one render
//! carry identical pixels.

use std::io::{self, Write};
use std::path::PathBuf;

use image::{Rgb, RgbImage};
use log::{debug, info};

use crate::error::RenderError;

/// Receiver of a rendered image, one pixel at a time.
pub trait PixelSink {
    /// Called once before any pixel with the final image dimensions.
    fn begin(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    /// Called `width * height` times, row-major from the top scanline.
    fn write_pixel(&mut self, rgb: [u8; 3]) -> Result<(), RenderError>;

    /// Called once after the last pixel.
    fn finish(&mut self) -> Result<(), RenderError>;
}

/// ASCII PPM writer.
///
/// Layout: `P3`, `<width> <height>`, `255`, then one `"<r> <g> <b>"` line per pixel.
pub struct PpmSink<W: Write> {
    writer: W,
}

impl<W: Write> PpmSink<W> {
    /// Wrap a writer. Buffering is the caller's choice.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PixelSink for PpmSink<W> {
    fn begin(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        write!(self.writer, "P3\n{} {}\n255\n", width, height)?;
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> Result<(), RenderError> {
        writeln!(self.writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// PNG writer backed by an in-memory `RgbImage`.
pub struct PngSink {
    path: PathBuf,
    image: RgbImage,
    cursor: u32,
}

impl PngSink {
    /// Create a sink that saves to `path` once the render completes.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            image: RgbImage::new(0, 0),
            cursor: 0,
        }
    }

    /// Pixels received so far.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

impl PixelSink for PngSink {
    fn begin(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.image = RgbImage::new(width, height);
        self.cursor = 0;
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> Result<(), RenderError> {
        let width = self.image.width();
        if width == 0 || self.cursor >= width * self.image.height() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "pixel {} written past the end of a {}x{} image",
                    self.cursor,
                    width,
                    self.image.height()
                ),
            )
            .into());
        }
        self.image.put_pixel(self.cursor % width, self.cursor / width, Rgb(rgb));
        self.cursor += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        debug!("Encoding {}x{} PNG", self.image.width(), self.image.height());
        self.image.save(&self.path)?;
        info!("Image saved as {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppm_layout() {
        let mut sink = PpmSink::new(Vec::new());
        sink.begin(2, 1).unwrap();
        sink.write_pixel([255, 0, 12]).unwrap();
        sink.write_pixel([0, 128, 255]).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 0 12\n0 128 255\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_ppm_write_failure_is_reported() {
        let mut sink = PpmSink::new(BrokenPipe);
        match sink.begin(1, 1) {
            Err(RenderError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_png_sink_fills_row_major() {
        let mut sink = PngSink::new("unused.png");
        sink.begin(2, 2).unwrap();
        for i in 0..4u8 {
            sink.write_pixel([i, i, i]).unwrap();
        }
        assert_eq!(sink.image().get_pixel(1, 0), &Rgb([1, 1, 1]));
        assert_eq!(sink.image().get_pixel(0, 1), &Rgb([2, 2, 2]));
        match sink.write_pixel([9, 9, 9]) {
            Err(RenderError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidInput),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
