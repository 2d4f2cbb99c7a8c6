//! # Post Rendering Pipeline
//!
//! Turns one decoded source image into a [`ResultSet`] of exact-size posts and
//! fans that set out to any number of output sinks.
//!
//! ## Architecture
//!
//! The pipeline is linear:
//! 1. **render_posts**: one smart crop per configured target, optionally on the
//!    rayon pool
//! 2. **ResultSet**: insertion-ordered `label -> image` map with unique keys
//! 3. **OutputSink trait**: destination interface (directory, archive, ...)
//! 4. **SinkSet**: delivers every result to every sink, in order
//!
//! ## Concurrency
//!
//! Targets are independent: each reads the shared RGB working copy and owns
//! its output buffer, so no locking is needed. Parallel and sequential runs
//! produce identical result sets in identical order.

use std::fs;
use std::path::PathBuf;

use image::{DynamicImage, RgbImage};
use rayon::prelude::*;

use crop_scale::{SmartCropResizer, TargetSpec};

use crate::archive::{encode_png, label_file_name, ArchiveBuilder};
use crate::config::RenderConfig;
use crate::error::{ResizeError, ResizeResult};

/// Rendered posts keyed by label, in configured target order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    entries: Vec<(String, RgbImage)>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result. Labels must map to distinct output file names, so
    /// labels differing only in case collide.
    pub fn insert(&mut self, label: impl Into<String>, image: RgbImage) -> ResizeResult<()> {
        let label = label.into();
        let file = label_file_name(&label);
        let clash = self
            .entries
            .iter()
            .map(|(l, _)| l)
            .find(|l| label_file_name(l) == file);
        if let Some(existing) = clash {
            return Err(ResizeError::duplicate_label(label)
                .with_context(format!("{existing} already writes {file}")));
        }
        self.entries.push((label, image));
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&RgbImage> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, img)| img)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RgbImage)> {
        self.entries.iter().map(|(l, img)| (l.as_str(), img))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = (String, RgbImage);
    type IntoIter = std::vec::IntoIter<(String, RgbImage)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Render every configured target from `image` with the resizer the config
/// describes.
pub fn render_posts(image: &DynamicImage, config: &RenderConfig) -> ResizeResult<ResultSet> {
    render_posts_with(&config.resizer(), image, config)
}

/// [`render_posts`] with an explicitly configured resizer. The config's
/// scoring settings are ignored.
pub fn render_posts_with(
    resizer: &SmartCropResizer,
    image: &DynamicImage,
    config: &RenderConfig,
) -> ResizeResult<ResultSet> {
    config.validate()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ResizeError::invalid_argument(
            "image",
            format!("source is {}x{}", image.width(), image.height()),
        ));
    }

    let rgb = image.to_rgb8();
    log::info!(
        "rendering {} targets from {}x{} source ({})",
        config.targets.len(),
        rgb.width(),
        rgb.height(),
        if config.parallel { "parallel" } else { "sequential" }
    );

    let render_one = |target: &TargetSpec| -> ResizeResult<(String, RgbImage)> {
        let out = resizer
            .resize_rgb(&rgb, target.size())
            .map_err(|e| ResizeError::crop(target.label(), e))?;
        log::debug!("rendered {}", target.label());
        Ok((target.label(), out))
    };

    let rendered: Vec<(String, RgbImage)> = if config.parallel {
        config
            .targets
            .par_iter()
            .map(render_one)
            .collect::<ResizeResult<_>>()?
    } else {
        config
            .targets
            .iter()
            .map(render_one)
            .collect::<ResizeResult<_>>()?
    };

    let mut results = ResultSet::new();
    for (label, img) in rendered {
        results.insert(label, img)?;
    }
    Ok(results)
}

/// Destination for rendered results.
pub trait OutputSink {
    /// Accept one result. Called in result-set order.
    fn accept(&mut self, label: &str, image: &RgbImage) -> ResizeResult<()>;

    /// Flush and return the files written by this sink.
    fn finish(&mut self) -> ResizeResult<Vec<PathBuf>>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Writes one `<lowercased label>.png` per result into a directory.
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }
}

impl OutputSink for DirectorySink {
    fn accept(&mut self, label: &str, image: &RgbImage) -> ResizeResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| ResizeError::io("create output directory", e).with_path(&self.dir))?;
        let path = self.dir.join(label_file_name(label));
        let png = encode_png(image).map_err(|e| e.with_context(label.to_string()))?;
        fs::write(&path, png).map_err(|e| ResizeError::io("write image", e).with_path(&path))?;
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> ResizeResult<Vec<PathBuf>> {
        Ok(std::mem::take(&mut self.written))
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

/// Collects results into a ZIP archive and writes it on `finish`.
pub struct ArchiveSink {
    path: PathBuf,
    builder: Option<ArchiveBuilder>,
}

impl ArchiveSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            builder: Some(ArchiveBuilder::new()),
        }
    }

    fn builder(&mut self) -> ResizeResult<&mut ArchiveBuilder> {
        self.builder.as_mut().ok_or_else(|| {
            ResizeError::invalid_argument("archive", "sink already finished")
                .with_context(self.path.display().to_string())
        })
    }
}

impl OutputSink for ArchiveSink {
    fn accept(&mut self, label: &str, image: &RgbImage) -> ResizeResult<()> {
        self.builder()?.add(label, image)
    }

    fn finish(&mut self) -> ResizeResult<Vec<PathBuf>> {
        let Some(builder) = self.builder.take() else {
            return Ok(Vec::new());
        };
        let bytes = builder.finish()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ResizeError::io("create output directory", e).with_path(parent))?;
        }
        fs::write(&self.path, bytes)
            .map_err(|e| ResizeError::io("write archive", e).with_path(&self.path))?;
        Ok(vec![self.path.clone()])
    }

    fn name(&self) -> &'static str {
        "archive"
    }
}

/// Delivers results to several sinks.
#[derive(Default)]
pub struct SinkSet {
    pub sinks: Vec<Box<dyn OutputSink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn push(&mut self, sink: Box<dyn OutputSink>) {
        self.sinks.push(sink);
    }

    /// Send every result to every sink, then finish all sinks.
    ///
    /// Returns all written paths, grouped by sink in registration order.
    pub fn deliver(&mut self, results: &ResultSet) -> ResizeResult<Vec<PathBuf>> {
        for sink in &mut self.sinks {
            for (label, image) in results.iter() {
                sink.accept(label, image)
                    .map_err(|e| e.with_operation(format!("{} sink", sink.name())))?;
            }
        }

        let mut written = Vec::new();
        for sink in &mut self.sinks {
            let paths = sink.finish()?;
            log::info!("{} sink wrote {} file(s)", sink.name(), paths.len());
            written.extend(paths);
        }
        Ok(written)
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}
