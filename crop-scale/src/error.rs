// SPDX-License-Identifier: MIT
use fast_image_resize as fir;

/// Failures of the crop/resample core.
///
/// None of these are transient: they are precondition violations or
/// buffer-shape bugs, so callers should fail fast rather than retry.
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("crop window for source {src_w}x{src_h} at ratio {ratio:.4} has zero size")]
    EmptyCrop { src_w: u32, src_h: u32, ratio: f64 },

    #[error("image buffer error: {0}")]
    ImageBuffer(#[from] fir::ImageBufferError),

    #[error("resize error: {0}")]
    Resize(#[from] fir::ResizeError),

    #[error("output buffer has {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
}

impl CropError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}
