//! PNG encoding and the ZIP archive of all results.
//!
//! Archive layout is a fixed contract: DEFLATE-compressed entries, one per
//! result, named `<lowercased label>.png`, in result-set order.

use std::io::{Cursor, Write};

use image::{ImageFormat, RgbImage};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ResizeError, ResizeResult};
use crate::processing::ResultSet;

pub use crop_scale::presets::label_file_name;

/// Encode one result as PNG bytes.
pub fn encode_png(image: &RgbImage) -> ResizeResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ResizeError::encode(format!("{}x{}", image.width(), image.height()), e))?;
    Ok(buffer.into_inner())
}

/// Incrementally builds the in-memory archive.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: 0,
        }
    }

    /// Append `image` as `<lowercased label>.png`.
    pub fn add(&mut self, label: &str, image: &RgbImage) -> ResizeResult<()> {
        let entry = label_file_name(label);
        let png = encode_png(image).map_err(|e| e.with_context(format!("archive entry {entry}")))?;

        self.writer
            .start_file(entry.as_str(), self.options)
            .map_err(|e| ResizeError::archive(&entry, e))?;
        self.writer
            .write_all(&png)
            .map_err(|e| ResizeError::io("write archive entry", e).with_context(entry.clone()))?;
        self.entries += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Finish the central directory and return the archive bytes.
    pub fn finish(self) -> ResizeResult<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| ResizeError::archive("central directory", e))?;
        Ok(cursor.into_inner())
    }
}

/// Package every result of `results` into one ZIP archive.
pub fn build_archive(results: &ResultSet) -> ResizeResult<Vec<u8>> {
    let mut builder = ArchiveBuilder::new();
    for (label, image) in results.iter() {
        builder.add(label, image)?;
    }
    log::debug!("archive built with {} entries", builder.len());
    builder.finish()
}
