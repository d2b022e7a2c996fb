use std::fmt::Display;

use serde::Serializer;

/// Round to one decimal, f.e. `31.46` to `31.5`, and `25.0` to `25`.
pub(super) fn round_tenths(x: f64) -> String {
    format!("{}", (x * 10.0).round() / 10.0)
}

/// Display a rating rounded to one decimal, or leave it blank.
pub(super) fn format_rating<S>(x: &Option<f64>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match x {
        Some(x) if x.is_finite() => s.serialize_str(&round_tenths(*x)),
        _ => s.serialize_str(""),
    }
}

/// Display a value as it is, or leave it blank.
pub(super) fn format_or_blank<T, S>(x: &Option<T>, s: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match x {
        Some(x) => s.collect_str(x),
        None => s.serialize_str(""),
    }
}

/// Display a number of seconds rounded to one decimal, f.e. `"1.5s"`.
pub(super) fn format_secs<S>(x: &Option<f64>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match x {
        Some(x) if x.is_finite() => s.serialize_str(&format!("{}s", round_tenths(x.max(0.0)))),
        _ => s.serialize_str(""),
    }
}
