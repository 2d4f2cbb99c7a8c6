// SPDX-License-Identifier: MIT
//! Information-density score for a luminance region.
//!
//! `score = H + contrast_weight * σ`, where `H` is the Shannon entropy of a
//! fixed 32-bin density histogram over `[0, 255]` and `σ` is the population
//! standard deviation of the raw values.
//!
//! The density entropy of a region is `H_p / w + log2(w) / w`, with `H_p` the
//! entropy in bits of the bin probabilities and `w = 255 / bins` the bin
//! width. The default drops the constant `log2(w) / w`, so a single-valued
//! region scores exactly 0 while every window keeps the same ranking as the
//! raw density score.
//!
//! All statistics come from a single 256-entry count table, so a region is
//! read exactly once regardless of how many statistics are derived.

use crate::luma::LumaRegion;

/// Number of histogram bins over the value range.
pub const DEFAULT_BINS: usize = 32;
/// Weight of the standard deviation term.
pub const DEFAULT_CONTRAST_WEIGHT: f64 = 0.01;

const VALUE_RANGE: f64 = 255.0;

/// How bin counts become the entropy term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum HistogramNormalization {
    /// Density entropy shifted so a single-valued region scores 0.
    #[default]
    Density,
    /// Entropy of `count / (N * bin_width)`, unshifted. Uniform regions all
    /// score the same positive constant.
    RawDensity,
    /// Entropy in bits of `count / N`. Weights contrast about 8x less than
    /// the density forms.
    Probability,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreConfig {
    pub bins: usize,
    pub contrast_weight: f64,
    pub normalization: HistogramNormalization,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            contrast_weight: DEFAULT_CONTRAST_WEIGHT,
            normalization: HistogramNormalization::Density,
        }
    }
}

impl ScoreConfig {
    pub fn with_normalization(mut self, normalization: HistogramNormalization) -> Self {
        self.normalization = normalization;
        self
    }
}

/// Exact per-value counts of a region.
#[derive(Clone, Debug)]
pub struct ValueCounts {
    counts: [u64; 256],
    total: u64,
}

impl ValueCounts {
    pub fn from_region(region: &LumaRegion<'_>) -> Self {
        let mut counts = [0u64; 256];
        for row in region.rows() {
            for &v in row {
                counts[v as usize] += 1;
            }
        }
        let total = region.len() as u64;
        Self { counts, total }
    }

    pub fn from_values<I: IntoIterator<Item = u8>>(values: I) -> Self {
        let mut counts = [0u64; 256];
        let mut total = 0u64;
        for v in values {
            counts[v as usize] += 1;
            total += 1;
        }
        Self { counts, total }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Fold the 256 counts into `bins` equal-width bins over `[0, 255]`.
    ///
    /// Edges sit at `255 * i / bins`; the last bin is closed so 255 lands in it.
    pub fn histogram(&self, bins: usize) -> Vec<u64> {
        let bins = bins.max(1);
        let mut hist = vec![0u64; bins];
        for (v, &c) in self.counts.iter().enumerate() {
            if c > 0 {
                hist[bin_index(v, bins)] += c;
            }
        }
        hist
    }

    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(v, &c)| v as u64 * c)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let ss: f64 = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(v, &c)| {
                let d = v as f64 - mean;
                d * d * c as f64
            })
            .sum();
        (ss / self.total as f64).sqrt()
    }
}

#[inline]
fn bin_index(value: usize, bins: usize) -> usize {
    // Integer form of floor(value * bins / 255), exact for 8-bit values.
    (value * bins / 255).min(bins - 1)
}

/// Scores regions by entropy plus a small contrast nudge.
#[derive(Clone, Copy, Debug, Default)]
pub struct CropScorer {
    config: ScoreConfig,
}

impl CropScorer {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Score a borrowed region. The region must be non-empty.
    pub fn score(&self, region: &LumaRegion<'_>) -> f64 {
        debug_assert!(!region.is_empty(), "scoring an empty region");
        self.score_counts(&ValueCounts::from_region(region))
    }

    pub fn score_counts(&self, counts: &ValueCounts) -> f64 {
        if counts.total() == 0 {
            return 0.0;
        }
        self.entropy(counts) + self.config.contrast_weight * counts.std_dev()
    }

    /// Entropy term of the score, per the configured normalization.
    pub fn entropy(&self, counts: &ValueCounts) -> f64 {
        let bins = self.config.bins.max(1);
        let total = counts.total() as f64;
        let width = VALUE_RANGE / bins as f64;
        let hist = counts.histogram(bins);

        match self.config.normalization {
            HistogramNormalization::Density => shannon(&hist, total) / width,
            HistogramNormalization::RawDensity => shannon(&hist, total * width),
            HistogramNormalization::Probability => shannon(&hist, total),
        }
    }
}

/// `-sum(v * log2 v)` over `v = count / scale`. Empty bins are skipped, never
/// fed to `log2`.
fn shannon(hist: &[u64], scale: f64) -> f64 {
    let h: f64 = hist
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let v = c as f64 / scale;
            v * v.log2()
        })
        .sum();
    // -0.0 for single-bin regions
    if h == 0.0 { 0.0 } else { -h }
}
