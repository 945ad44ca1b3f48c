//! The ordered rule cascade that assigns a [`ColumnType`] to a sample.
//!
//! Rules live in [`CASCADE`], a plain array evaluated front to back. The first
//! rule whose detector accepts the [`SampleContext`] decides the type; the last
//! rule always accepts, so every sample gets exactly one type.
//!
//! | # | Type       | Accepts when                                                    |
//! |---|------------|-----------------------------------------------------------------|
//! | 1 | Boolean    | exactly two distinct values, both boolean tokens                |
//! | 2 | Percentage | every value ends in `%` and the rest is numeric                 |
//! | 3 | Currency   | every value has a symbol or ISO code and the rest is numeric    |
//! | 4 | Integer    | every value is numeric and integral                             |
//! | 5 | Float      | every value is numeric and at least one is floating             |
//! | 6 | Timestamp  | enough leading values parse with a nonzero time of day          |
//! | 7 | Date       | strict `YYYY-MM-DD` / `DD/MM/YYYY`, or enough midnight parses   |
//! | 8 | Id         | full-column distinct ratio reaches the cardinality threshold    |
//! | 9 | String     | always                                                          |

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::column::Column;
use crate::config::InferenceConfig;
use crate::numeric::{parse_all, Numeric};
use crate::sampling::Sample;
use crate::temporal::{has_time_component, is_midnight, matches_dmy, matches_ymd, parse_datetime};
use crate::types::ColumnType;

/// Percent sign the percentage rule looks for.
pub const PERCENTAGE_SYMBOL: char = '%';

static ISO_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{3}\b").unwrap());
static LEADING_ISO_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}\b").unwrap());
static TRAILING_ISO_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{3}$").unwrap());

/// Everything a detector may look at.
///
/// Most rules only read the sample. The identifier rule reads the distinct
/// count and row count of the full column, which are computed once up front.
#[derive(Debug)]
pub struct SampleContext<'a> {
    values: &'a [String],
    distinct: HashSet<&'a str>,
    column_distinct: usize,
    total_rows: usize,
    config: &'a InferenceConfig,
}

impl<'a> SampleContext<'a> {
    /// Builds the context for a sample drawn from `column`.
    pub fn new(sample: &'a Sample, column: &Column, config: &'a InferenceConfig) -> Self {
        Self::from_parts(
            sample.values(),
            column.distinct_count(),
            column.total_rows(),
            config,
        )
    }

    /// Builds a context from raw parts, mainly for exercising rules in isolation.
    pub fn from_parts(
        values: &'a [String],
        column_distinct: usize,
        total_rows: usize,
        config: &'a InferenceConfig,
    ) -> Self {
        Self {
            values,
            distinct: values.iter().map(String::as_str).collect(),
            column_distinct,
            total_rows,
            config,
        }
    }

    pub fn values(&self) -> &[String] {
        self.values
    }

    /// Distinct values within the sample.
    pub fn distinct(&self) -> &HashSet<&'a str> {
        &self.distinct
    }

    pub fn column_distinct(&self) -> usize {
        self.column_distinct
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn config(&self) -> &InferenceConfig {
        self.config
    }

    /// True when the sample is non-empty and every value satisfies `predicate`.
    fn all_values(&self, predicate: impl Fn(&str) -> bool) -> bool {
        !self.values.is_empty() && self.values.iter().all(|v| predicate(v.as_str()))
    }

    /// Parses every value after `strip`, failing if any one does not parse.
    fn parse_stripped<'v>(&'v self, strip: impl Fn(&'v str) -> &'v str) -> Option<Vec<Numeric>> {
        if self.values.is_empty() {
            return None;
        }
        parse_all(self.values.iter().map(|v| strip(v.as_str())))
    }
}

/// A detector decides whether its rule accepts a sample.
pub type Detector = fn(&SampleContext<'_>) -> bool;

/// One step of the cascade.
#[derive(Clone, Copy)]
pub struct Rule {
    pub column_type: ColumnType,
    pub detect: Detector,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        self.column_type.as_str()
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("column_type", &self.column_type)
            .finish()
    }
}

/// The rules in precedence order.
pub const CASCADE: [Rule; 9] = [
    Rule {
        column_type: ColumnType::Boolean,
        detect: detect_boolean,
    },
    Rule {
        column_type: ColumnType::Percentage,
        detect: detect_percentage,
    },
    Rule {
        column_type: ColumnType::Currency,
        detect: detect_currency,
    },
    Rule {
        column_type: ColumnType::Integer,
        detect: detect_integer,
    },
    Rule {
        column_type: ColumnType::Float,
        detect: detect_float,
    },
    Rule {
        column_type: ColumnType::Timestamp,
        detect: detect_timestamp,
    },
    Rule {
        column_type: ColumnType::Date,
        detect: detect_date,
    },
    Rule {
        column_type: ColumnType::Id,
        detect: detect_id,
    },
    Rule {
        column_type: ColumnType::String,
        detect: detect_string,
    },
];

/// Runs the cascade, returning the matched type and its 1-based position.
pub fn classify(ctx: &SampleContext<'_>) -> (ColumnType, usize) {
    for (index, rule) in CASCADE.iter().enumerate() {
        if (rule.detect)(ctx) {
            return (rule.column_type, index + 1);
        }
        trace!(rule = rule.name(), "Rule did not match");
    }
    // The String rule accepts everything.
    (ColumnType::String, CASCADE.len())
}

/// True when `distinct / total` reaches `threshold`; false for an empty column.
///
/// ```rust
/// use schema_infer::cascade::is_high_cardinality;
///
/// assert!(is_high_cardinality(80, 100, 0.8));
/// assert!(!is_high_cardinality(79, 100, 0.8));
/// assert!(!is_high_cardinality(0, 0, 0.8));
/// ```
pub fn is_high_cardinality(distinct_count: usize, total_count: usize, threshold: f64) -> bool {
    total_count > 0 && distinct_count as f64 / total_count as f64 >= threshold
}

pub fn detect_boolean(ctx: &SampleContext<'_>) -> bool {
    ctx.distinct.len() == 2
        && ctx
            .distinct
            .iter()
            .all(|v| ctx.config.boolean_tokens.contains(*v))
}

pub fn detect_percentage(ctx: &SampleContext<'_>) -> bool {
    ctx.all_values(|v| v.ends_with(PERCENTAGE_SYMBOL))
        && ctx
            .parse_stripped(|v| v.trim_matches(PERCENTAGE_SYMBOL))
            .is_some()
}

pub fn detect_currency(ctx: &SampleContext<'_>) -> bool {
    let symbols = &ctx.config.currency_symbols;
    ctx.all_values(|v| has_currency_marker(v, symbols))
        && ctx
            .parse_stripped(|v| currency_residue(v, symbols))
            .is_some()
}

pub fn detect_integer(ctx: &SampleContext<'_>) -> bool {
    ctx.parse_stripped(|v| v)
        .is_some_and(|nums| nums.iter().all(Numeric::is_integral))
}

pub fn detect_float(ctx: &SampleContext<'_>) -> bool {
    ctx.parse_stripped(|v| v)
        .is_some_and(|nums| nums.iter().any(Numeric::is_float))
}

pub fn detect_timestamp(ctx: &SampleContext<'_>) -> bool {
    !ctx.values.is_empty()
        && meets_threshold(
            count_until_unparseable(ctx.values, has_time_component),
            ctx.values.len(),
            ctx.config.date_threshold,
        )
}

pub fn detect_date(ctx: &SampleContext<'_>) -> bool {
    if ctx.all_values(matches_ymd) || ctx.all_values(matches_dmy) {
        return true;
    }
    !ctx.values.is_empty()
        && meets_threshold(
            count_until_unparseable(ctx.values, is_midnight),
            ctx.values.len(),
            ctx.config.date_threshold,
        )
}

pub fn detect_id(ctx: &SampleContext<'_>) -> bool {
    is_high_cardinality(
        ctx.column_distinct,
        ctx.total_rows,
        ctx.config.cardinality_threshold,
    )
}

pub fn detect_string(_ctx: &SampleContext<'_>) -> bool {
    true
}

/// A value carries a currency marker if it contains a configured symbol
/// anywhere, or a standalone three-letter uppercase code such as `USD`.
fn has_currency_marker(value: &str, symbols: &BTreeSet<char>) -> bool {
    value.chars().any(|c| symbols.contains(&c)) || ISO_CODE.is_match(value)
}

/// Strips symbols from both ends, then one leading or trailing ISO code.
fn currency_residue<'v>(value: &'v str, symbols: &BTreeSet<char>) -> &'v str {
    let is_symbol = |c: char| symbols.contains(&c);
    let mut residue = value.trim().trim_matches(is_symbol).trim();
    if let Some(m) = LEADING_ISO_CODE.find(residue) {
        residue = &residue[m.end()..];
    }
    if let Some(m) = TRAILING_ISO_CODE.find(residue) {
        residue = &residue[..m.start()];
    }
    residue.trim().trim_matches(is_symbol).trim()
}

/// Counts values satisfying `predicate`, stopping at the first value that
/// does not parse as a date or time at all.
fn count_until_unparseable(values: &[String], predicate: fn(&NaiveDateTime) -> bool) -> usize {
    let mut count = 0;
    for value in values {
        let Some(dt) = parse_datetime(value) else {
            break;
        };
        if predicate(&dt) {
            count += 1;
        }
    }
    count
}

fn meets_threshold(count: usize, sample_len: usize, threshold: f64) -> bool {
    count as f64 >= sample_len as f64 * threshold
}
