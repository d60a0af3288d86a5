//! Plot data preparation.
//!
//! Rendering is left to whatever plotting tool consumes the exported data;
//! this module covers the data-side decisions a plot needs: axis scaling,
//! time windows around an impulse response, engineering-prefix tick labels,
//! and reference curves.

use crate::error::{Bound, Error, Result};
use rustfft::num_complex::Complex;
use std::f64::consts::PI;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Axis scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AxisScale {
    /// Linear axis.
    #[default]
    Linear,
    /// Base-10 logarithmic axis.
    Log,
}

impl FromStr for AxisScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lin" | "linear" => Ok(AxisScale::Linear),
            "log" | "logarithmic" => Ok(AxisScale::Log),
            other => Err(Error::InvalidArgument(format!(
                "unknown axis scale '{other}' (expected 'lin' or 'log')"
            ))),
        }
    }
}

impl fmt::Display for AxisScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisScale::Linear => f.write_str("lin"),
            AxisScale::Log => f.write_str("log"),
        }
    }
}

/// Scale selection for both axes of a plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotScales {
    /// Horizontal axis.
    pub x: AxisScale,
    /// Vertical axis.
    pub y: AxisScale,
}

impl PlotScales {
    /// Create from both axis scales.
    pub fn new(x: AxisScale, y: AxisScale) -> Self {
        Self { x, y }
    }

    /// Keep only the points that can be drawn on these axes.
    ///
    /// Logarithmic axes cannot show non-positive values, so those points
    /// are dropped.
    pub fn plottable(&self, x: &[f64], y: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        if x.len() != y.len() {
            return Err(Error::shape("y values", x.len(), y.len()));
        }
        let keep = |v: f64, scale: AxisScale| scale == AxisScale::Linear || v > 0.0;
        Ok(x.iter()
            .zip(y)
            .filter(|&(&xv, &yv)| keep(xv, self.x) && keep(yv, self.y))
            .map(|(&xv, &yv)| (xv, yv))
            .unzip())
    }
}

/// Visible portion of a centered impulse response.
#[derive(Debug, Clone, PartialEq)]
pub struct IrWindow {
    /// Left plot limit in seconds.
    pub start: f64,
    /// Right plot limit in seconds.
    pub end: f64,
    /// Sample indices whose time stamps fall within the limits.
    pub indices: Range<usize>,
}

impl IrWindow {
    /// Borrow the part of `data` inside the window.
    ///
    /// Fails with [`Error::ShapeMismatch`] when `data` is shorter than the
    /// axis the window was computed on.
    pub fn slice<'a>(&self, data: &'a [f64]) -> Result<&'a [f64]> {
        data.get(self.indices.clone())
            .ok_or_else(|| Error::shape("windowed data", self.indices.end, data.len()))
    }
}

/// Compute the plot window `center ± width` over a time axis.
///
/// `width` defaults to the last time stamp, which shows the whole response
/// for a zero-centered axis. A window reaching before the first or past the
/// last time stamp is rejected with [`Error::OutOfRange`] naming the
/// violated bound.
pub fn ir_window(time: &[f64], width: Option<f64>, center: f64) -> Result<IrWindow> {
    let (&first, &last) = match (time.first(), time.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::InvalidArgument("time axis is empty".to_string())),
    };
    if !center.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "window center must be finite, got {center}"
        )));
    }
    let width = width.unwrap_or(last);
    if width.is_nan() || width < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "window width must be non-negative, got {width}"
        )));
    }

    let start = center - width;
    if start < first {
        return Err(Error::OutOfRange {
            bound: Bound::Start,
            value: start,
            limit: first,
        });
    }
    let end = center + width;
    if end > last {
        return Err(Error::OutOfRange {
            bound: Bound::End,
            value: end,
            limit: last,
        });
    }

    let lo = time.partition_point(|&t| t < start);
    let hi = time.partition_point(|&t| t <= end);
    Ok(IrWindow {
        start,
        end,
        indices: lo..hi.max(lo),
    })
}

const PREFIXES: [(i32, &str); 9] = [
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

/// Format a value with an engineering prefix, e.g. `10 kHz` or `1.5 ms`.
///
/// The mantissa keeps up to three decimals with trailing zeros removed.
pub fn format_eng(value: f64, unit: &str) -> String {
    let join = |num: String, prefix: &str| {
        let suffix = format!("{prefix}{unit}");
        if suffix.is_empty() {
            num
        } else {
            format!("{num} {suffix}")
        }
    };

    if value == 0.0 || !value.is_finite() {
        return join(format!("{value}"), "");
    }

    let (min_exp, max_exp) = (PREFIXES[0].0, PREFIXES[PREFIXES.len() - 1].0);
    let mut exp = ((value.abs().log10() / 3.0).floor() as i32 * 3).clamp(min_exp, max_exp);
    let mut mantissa = (value / 10f64.powi(exp) * 1000.0).round() / 1000.0;
    if mantissa.abs() >= 1000.0 && exp < max_exp {
        exp += 3;
        mantissa /= 1000.0;
    }

    let mut num = format!("{mantissa:.3}");
    while num.ends_with('0') {
        num.pop();
    }
    if num.ends_with('.') {
        num.pop();
    }

    let prefix = PREFIXES
        .iter()
        .find(|(e, _)| *e == exp)
        .map_or("", |&(_, p)| p);
    join(num, prefix)
}

/// Points on a circle of the given radius in the complex plane.
///
/// `resolution` points are spaced evenly in angle starting at 0.
pub fn unit_circle(radius: f64, resolution: usize) -> Vec<Complex<f64>> {
    (0..resolution)
        .map(|i| Complex::from_polar(radius, 2.0 * PI * i as f64 / resolution as f64))
        .collect()
}
