//! Derived dated series: returns, equity and drawdown.
//!
//! All three share the same shape, a strictly date-ordered list of
//! [`SeriesPoint`]s, and the same read-only accessors via [`TimeSeries`].
//! They differ in what the values mean and in which invariants the
//! constructors enforce.

use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{TailRiskError, TailRiskResult};

/// A dated real value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Observation date.
    pub date: Date,
    /// Observation value.
    pub value: f64,
}

impl SeriesPoint {
    /// Creates a new point.
    #[must_use]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// Read-only access shared by the dated series types.
pub trait TimeSeries {
    /// Returns the points in date order.
    fn points(&self) -> &[SeriesPoint];

    /// Returns the number of points.
    fn len(&self) -> usize {
        self.points().len()
    }

    /// Returns true if the series has no points.
    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// Returns the values in date order.
    fn values(&self) -> Vec<f64> {
        self.points().iter().map(|p| p.value).collect()
    }

    /// Returns the dates in order.
    fn dates(&self) -> Vec<Date> {
        self.points().iter().map(|p| p.date).collect()
    }

    /// Returns the first point.
    fn first(&self) -> Option<&SeriesPoint> {
        self.points().first()
    }

    /// Returns the last point.
    fn last(&self) -> Option<&SeriesPoint> {
        self.points().last()
    }
}

pub(crate) fn ensure_strictly_increasing<I>(dates: I, name: &str) -> TailRiskResult<()>
where
    I: IntoIterator<Item = Date>,
{
    let mut previous: Option<Date> = None;
    for date in dates {
        if let Some(prev) = previous {
            if date <= prev {
                return Err(TailRiskError::invalid_parameter(
                    name,
                    format!("dates must be strictly increasing, {date} follows {prev}"),
                ));
            }
        }
        previous = Some(date);
    }
    Ok(())
}

fn ensure_finite(points: &[SeriesPoint], name: &str) -> TailRiskResult<()> {
    match points.iter().find(|p| !p.value.is_finite()) {
        Some(p) => Err(TailRiskError::invalid_parameter(
            name,
            format!("value on {} is not finite", p.date),
        )),
        None => Ok(()),
    }
}

/// Simple period returns, `p[i] / p[i-1] - 1`, stamped with the later date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SeriesPoint>", into = "Vec<SeriesPoint>")]
pub struct ReturnSeries {
    points: Vec<SeriesPoint>,
}

impl ReturnSeries {
    /// Creates a return series from dated points.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` if dates are not strictly
    /// increasing, or a value is not finite or is below -1 (a loss of more
    /// than everything).
    pub fn new(points: Vec<SeriesPoint>) -> TailRiskResult<Self> {
        ensure_finite(&points, "returns")?;
        if let Some(p) = points.iter().find(|p| p.value < -1.0) {
            return Err(TailRiskError::invalid_parameter(
                "returns",
                format!("return on {} is below -100%: {}", p.date, p.value),
            ));
        }
        ensure_strictly_increasing(points.iter().map(|p| p.date), "returns")?;
        Ok(Self { points })
    }

    /// Creates a return series from bare values, dating them on consecutive
    /// calendar days starting at `start`.
    pub fn from_values(start: Date, values: &[f64]) -> TailRiskResult<Self> {
        let mut points = Vec::with_capacity(values.len());
        let mut date = start;
        for &value in values {
            points.push(SeriesPoint::new(date, value));
            date = date.add_days(1);
        }
        Self::new(points)
    }
}

/// Cumulative growth of one unit of wealth, compounded from a base of 1.0.
///
/// Aligned index-for-index with the [`ReturnSeries`] it was compounded from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SeriesPoint>", into = "Vec<SeriesPoint>")]
pub struct EquityCurve {
    points: Vec<SeriesPoint>,
}

impl EquityCurve {
    /// Creates an equity curve from dated points.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` if dates are not strictly
    /// increasing, or a value is not finite or is negative.
    pub fn new(points: Vec<SeriesPoint>) -> TailRiskResult<Self> {
        ensure_finite(&points, "equity")?;
        if let Some(p) = points.iter().find(|p| p.value < 0.0) {
            return Err(TailRiskError::invalid_parameter(
                "equity",
                format!("equity on {} must be >= 0, got {}", p.date, p.value),
            ));
        }
        ensure_strictly_increasing(points.iter().map(|p| p.date), "equity")?;
        Ok(Self { points })
    }

    /// Total compounded return over the curve, `equity[last] - 1`.
    #[must_use]
    pub fn total_return(&self) -> Option<f64> {
        self.points.last().map(|p| p.value - 1.0)
    }
}

/// Decline of an equity curve from its running peak; every value is `<= 0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SeriesPoint>", into = "Vec<SeriesPoint>")]
pub struct DrawdownCurve {
    points: Vec<SeriesPoint>,
}

impl DrawdownCurve {
    /// Creates a drawdown curve from dated points.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` if dates are not strictly
    /// increasing, or a value is not finite or is positive.
    pub fn new(points: Vec<SeriesPoint>) -> TailRiskResult<Self> {
        ensure_finite(&points, "drawdown")?;
        if let Some(p) = points.iter().find(|p| p.value > 0.0) {
            return Err(TailRiskError::invalid_parameter(
                "drawdown",
                format!("drawdown on {} must be <= 0, got {}", p.date, p.value),
            ));
        }
        ensure_strictly_increasing(points.iter().map(|p| p.date), "drawdown")?;
        Ok(Self { points })
    }

    /// The deepest point of the curve, or `None` for an empty curve.
    ///
    /// Returns the earliest point when several share the minimum.
    #[must_use]
    pub fn max_drawdown(&self) -> Option<SeriesPoint> {
        self.points
            .iter()
            .copied()
            .reduce(|worst, p| if p.value < worst.value { p } else { worst })
    }
}

impl TimeSeries for ReturnSeries {
    fn points(&self) -> &[SeriesPoint] {
        &self.points
    }
}

impl TimeSeries for EquityCurve {
    fn points(&self) -> &[SeriesPoint] {
        &self.points
    }
}

impl TimeSeries for DrawdownCurve {
    fn points(&self) -> &[SeriesPoint] {
        &self.points
    }
}

impl TryFrom<Vec<SeriesPoint>> for ReturnSeries {
    type Error = TailRiskError;

    fn try_from(points: Vec<SeriesPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl TryFrom<Vec<SeriesPoint>> for EquityCurve {
    type Error = TailRiskError;

    fn try_from(points: Vec<SeriesPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl TryFrom<Vec<SeriesPoint>> for DrawdownCurve {
    type Error = TailRiskError;

    fn try_from(points: Vec<SeriesPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<ReturnSeries> for Vec<SeriesPoint> {
    fn from(series: ReturnSeries) -> Self {
        series.points
    }
}

impl From<EquityCurve> for Vec<SeriesPoint> {
    fn from(series: EquityCurve) -> Self {
        series.points
    }
}

impl From<DrawdownCurve> for Vec<SeriesPoint> {
    fn from(series: DrawdownCurve) -> Self {
        series.points
    }
}
