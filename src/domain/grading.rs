//! Relative performance grading.
//!
//! A metric value is placed on a five-tier red (best) to blue (worst) scale by
//! its min-max percentile inside the cohort currently loaded. The scale is
//! date-relative: the same raw value can grade differently on another day.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const BEST_THRESHOLD: f64 = 0.8;
pub const GOOD_THRESHOLD: f64 = 0.6;
pub const AVERAGE_THRESHOLD: f64 = 0.4;
pub const POOR_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Best,
    Good,
    Average,
    Poor,
    Worst,
    /// Degenerate cohort (empty or zero variance).
    Neutral,
}

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPalette {
    pub background: Rgb,
    pub border: Rgb,
    pub text: Rgb,
}

const BEST_PALETTE: TierPalette = TierPalette {
    background: Rgb(0x7f, 0x1d, 0x1d),
    border: Rgb(0xdc, 0x26, 0x26),
    text: Rgb(0xfc, 0xa5, 0xa5),
};

const GOOD_PALETTE: TierPalette = TierPalette {
    background: Rgb(0x92, 0x40, 0x0e),
    border: Rgb(0xd9, 0x77, 0x06),
    text: Rgb(0xfb, 0xbf, 0x24),
};

const AVERAGE_PALETTE: TierPalette = TierPalette {
    background: Rgb(0x37, 0x41, 0x51),
    border: Rgb(0x4b, 0x55, 0x63),
    text: Rgb(0x9c, 0xa3, 0xaf),
};

const POOR_PALETTE: TierPalette = TierPalette {
    background: Rgb(0x1e, 0x3a, 0x8a),
    border: Rgb(0x25, 0x63, 0xeb),
    text: Rgb(0x93, 0xc5, 0xfd),
};

const WORST_PALETTE: TierPalette = TierPalette {
    background: Rgb(0x1e, 0x1b, 0x4b),
    border: Rgb(0x37, 0x30, 0xa3),
    text: Rgb(0xa5, 0xb4, 0xfc),
};

impl Tier {
    pub fn from_percentile(percentile: f64) -> Self {
        if percentile >= BEST_THRESHOLD {
            Tier::Best
        } else if percentile >= GOOD_THRESHOLD {
            Tier::Good
        } else if percentile >= AVERAGE_THRESHOLD {
            Tier::Average
        } else if percentile >= POOR_THRESHOLD {
            Tier::Poor
        } else {
            Tier::Worst
        }
    }

    /// Ordinal used for comparisons: Worst = 0 .. Best = 4. Neutral sits with Average.
    pub fn rank(self) -> u8 {
        match self {
            Tier::Worst => 0,
            Tier::Poor => 1,
            Tier::Average | Tier::Neutral => 2,
            Tier::Good => 3,
            Tier::Best => 4,
        }
    }

    pub fn palette(self) -> TierPalette {
        match self {
            Tier::Best => BEST_PALETTE,
            Tier::Good => GOOD_PALETTE,
            Tier::Average | Tier::Neutral => AVERAGE_PALETTE,
            Tier::Poor => POOR_PALETTE,
            Tier::Worst => WORST_PALETTE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Best => "Best",
            Tier::Good => "Good",
            Tier::Average => "Average",
            Tier::Poor => "Poor",
            Tier::Worst => "Worst",
            Tier::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Min-max percentile of `value` within `cohort_values`.
///
/// With `reverse_scale` the endpoints are taken from a descending ordering, so
/// the cohort maximum becomes the 0.0 end. Returns `None` when the cohort is
/// empty or has zero variance. Values outside the cohort range are not clamped.
pub fn percentile(value: f64, cohort_values: &[f64], reverse_scale: bool) -> Option<f64> {
    let (lo, hi) = cohort_values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    if lo == hi {
        return None;
    }

    let (min, max) = if reverse_scale { (hi, lo) } else { (lo, hi) };
    Some((value - min) / (max - min))
}

/// Grade `value` against the cohort. Degenerate cohorts grade [`Tier::Neutral`].
pub fn grade(value: f64, cohort_values: &[f64], reverse_scale: bool) -> Tier {
    match percentile(value, cohort_values, reverse_scale) {
        Some(p) => Tier::from_percentile(p),
        None => Tier::Neutral,
    }
}
