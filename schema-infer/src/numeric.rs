//! Numeric parsing shared by the percentage, currency, integer and float rules.

/// A parsed numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// The literal parsed natively as an integer
    Int(i64),
    /// The literal needed a floating-point parse
    Float(f64),
}

impl Numeric {
    /// True when the value is a whole number.
    ///
    /// Integer literals always are. Floats qualify when finite and within
    /// `1e-8 + 1e-5 * |t|` of their truncation `t`.
    pub fn is_integral(&self) -> bool {
        match *self {
            Numeric::Int(_) => true,
            Numeric::Float(v) => {
                if !v.is_finite() {
                    return false;
                }
                let truncated = v.trunc();
                (v - truncated).abs() <= ABS_TOLERANCE + REL_TOLERANCE * truncated.abs()
            }
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Numeric::Float(_))
    }
}

const ABS_TOLERANCE: f64 = 1e-8;
const REL_TOLERANCE: f64 = 1e-5;

/// Parses a numeric literal, trying an integer parse before a float parse.
///
/// Surrounding whitespace is ignored. Scientific notation, `inf` and `nan`
/// are accepted by the float parse; thousands separators are not.
pub fn parse_numeric(value: &str) -> Option<Numeric> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(Numeric::Int(v));
    }
    trimmed.parse::<f64>().ok().map(Numeric::Float)
}

/// Parses every value, failing as a whole if any single value fails.
pub fn parse_all<'a, I>(values: I) -> Option<Vec<Numeric>>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().map(parse_numeric).collect()
}
