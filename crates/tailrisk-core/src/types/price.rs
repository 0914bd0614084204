//! Daily closing prices.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::series::ensure_strictly_increasing;
use super::Date;
use crate::error::{TailRiskError, TailRiskResult};

/// A single dated closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Closing price, adjusted for splits and dividends where the provider supports it.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point. Not validated until placed in a [`PriceSeries`].
    #[must_use]
    pub fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

impl fmt::Display for PricePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.4}", self.date, self.close)
    }
}

/// An ordered, immutable sequence of daily closes for one instrument.
///
/// Invariants, checked by [`PriceSeries::new`] and on deserialization:
///
/// - dates are strictly increasing (no duplicates)
/// - every close is finite and strictly positive
///
/// A series may hold fewer than two points; the minimum length needed for
/// returns is enforced where returns are built.
///
/// # Example
///
/// ```rust
/// use tailrisk_core::types::{Date, PricePoint, PriceSeries};
///
/// let d = Date::from_ymd(2024, 1, 2).unwrap();
/// let series = PriceSeries::new(vec![
///     PricePoint::new(d, 100.0),
///     PricePoint::new(d.add_days(1), 101.5),
/// ]).unwrap();
///
/// assert_eq!(series.closes(), vec![100.0, 101.5]);
/// assert!(PriceSeries::new(vec![PricePoint::new(d, 0.0)]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a validated price series.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` if dates are not strictly
    /// increasing or any close is non-finite or not positive.
    pub fn new(points: Vec<PricePoint>) -> TailRiskResult<Self> {
        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(TailRiskError::invalid_parameter(
                    "price",
                    format!("close on {} must be finite and > 0, got {}", point.date, point.close),
                ));
            }
        }
        ensure_strictly_increasing(points.iter().map(|p| p.date), "price")?;
        Ok(Self { points })
    }

    /// Builds a series from `(date, close)` pairs.
    pub fn from_pairs<I>(pairs: I) -> TailRiskResult<Self>
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, close)| PricePoint::new(date, close))
                .collect(),
        )
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points in date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Returns an iterator over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// Returns the closing prices in date order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Returns the observation dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Returns the first observation.
    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Returns the last observation.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Returns the sub-series with dates in the closed range `[start, end]`.
    #[must_use]
    pub fn between(&self, start: Date, end: Date) -> Self {
        let points = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .copied()
            .collect();
        Self { points }
    }

    /// Consumes the series and returns its points.
    #[must_use]
    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = TailRiskError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
