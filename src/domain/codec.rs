//! Persisted curve encodings
//!
//! The canonical form is a single comma-separated string of `temp:pwm`
//! pairs (`35:0,45:36,60:90,85:255`). Older configurations store one
//! `"temp pwm"` string per list entry; those are read for migration and
//! rewritten in the canonical form.
//!
//! Decoding never fails: malformed tokens are dropped and a curve with
//! fewer than two usable points is replaced by the default curve. Strict
//! parsing for free-text input lives in [`parse_strict`].

use crate::domain::curve::{ControlPoint, Curve};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which textual form a curve is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveEncoding {
    /// `t:p,t:p,...` in one scalar option
    #[default]
    Pairs,
    /// one `"t p"` entry per list item
    List,
}

/// A curve as it appears in the configuration store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistedCurve {
    /// Scalar option value
    Scalar(String),
    /// List option values
    List(Vec<String>),
}

impl PersistedCurve {
    /// Encoding implied by the value's shape
    pub fn encoding(&self) -> CurveEncoding {
        match self {
            PersistedCurve::Scalar(_) => CurveEncoding::Pairs,
            PersistedCurve::List(_) => CurveEncoding::List,
        }
    }
}

/// Parse one `t:p` token
fn parse_pair(token: &str) -> Option<(i32, i32)> {
    let (t, p) = token.split_once(':')?;
    Some((t.trim().parse().ok()?, p.trim().parse().ok()?))
}

/// Parse one `"t p"` list entry
fn parse_entry(entry: &str) -> Option<(i32, i32)> {
    let mut parts = entry.split_whitespace();
    let t = parts.next()?.parse().ok()?;
    let p = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((t, p))
}

fn collect_points<'a, I>(tokens: I, parse: fn(&str) -> Option<(i32, i32)>) -> Vec<ControlPoint>
where
    I: Iterator<Item = &'a str>,
{
    tokens
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match parse(token) {
            Some((t, p)) => Some(ControlPoint::clamped(t, p)),
            None => {
                log::debug!("Dropping malformed curve token '{}'", token);
                None
            }
        })
        .collect()
}

/// Decode a persisted value, repairing silently
pub fn decode(persisted: &PersistedCurve) -> Curve {
    let points = match persisted {
        PersistedCurve::Scalar(value) => collect_points(value.split(','), parse_pair),
        PersistedCurve::List(entries) => {
            collect_points(entries.iter().map(String::as_str), parse_entry)
        }
    };
    Curve::from_points_lenient(points)
}

/// Decode an optional value; a missing option yields the default curve
pub fn decode_or_default(persisted: Option<&PersistedCurve>) -> Curve {
    match persisted {
        Some(value) => decode(value),
        None => Curve::default_curve(),
    }
}

/// Encode a curve in the requested form
pub fn encode(curve: &Curve, encoding: CurveEncoding) -> PersistedCurve {
    match encoding {
        CurveEncoding::Pairs => PersistedCurve::Scalar(curve.to_string()),
        CurveEncoding::List => PersistedCurve::List(
            curve
                .points()
                .iter()
                .map(|p| format!("{} {}", p.temperature, p.speed))
                .collect(),
        ),
    }
}

/// Rewrite legacy list entries as the canonical pair string
pub fn migrate(entries: &[String]) -> String {
    let curve = decode(&PersistedCurve::List(entries.to_vec()));
    curve.to_string()
}

/// Parse one user-entered `t:p` point
///
/// # Errors
/// `DomainError::InvalidToken` if the text is not `int:int`, or the range
/// errors from [`ControlPoint::new`].
pub fn parse_point(text: &str) -> Result<ControlPoint, DomainError> {
    let token = text.trim();
    let (t, p) = parse_pair(token).ok_or_else(|| DomainError::InvalidToken(token.to_string()))?;
    ControlPoint::new(t, p)
}

/// Parse user-entered `t:p,...` text, reporting the first problem
///
/// # Errors
/// - `DomainError::InvalidToken` for a token that is not `int:int`
/// - `DomainError::InvalidTemperature` / `InvalidSpeed` for out-of-range values
/// - `DomainError::DuplicateTemperature` / `TooFewPoints` from curve validation
pub fn parse_strict(text: &str) -> Result<Curve, DomainError> {
    let mut points = Vec::new();
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        points.push(parse_point(token)?);
    }
    Curve::new(points)
}
