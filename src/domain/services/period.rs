use crate::domain::model::{Period, YearSpan};
use crate::utils::error::{AssemblyError, Result};
use crate::utils::validation::{MAX_YEAR, MIN_YEAR};

/// End value meaning the project is still running.
pub const PRESENT: &str = "present";

/// Converts a `MM.YYYY` period into an inclusive year span.
///
/// `current_year` is what an open-ended (`present`) period resolves to.
pub fn parse_period(period: &Period, current_year: i32) -> Result<YearSpan> {
    let start = parse_year("start", &period.start)?;
    let end = if period.end == PRESENT {
        check_range("end", &period.end, current_year)?
    } else {
        parse_year("end", &period.end)?
    };
    Ok(YearSpan::new(start, end))
}

fn parse_year(field: &str, value: &str) -> Result<i32> {
    let format_error = |reason: String| AssemblyError::PeriodFormatError {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    };

    let year = value
        .split('.')
        .nth(1)
        .ok_or_else(|| format_error("expected MM.YYYY".to_string()))?;

    let year = year
        .trim()
        .parse::<i32>()
        .map_err(|e| format_error(format!("year '{}' is not a number: {}", year, e)))?;
    check_range(field, value, year)
}

fn check_range(field: &str, value: &str, year: i32) -> Result<i32> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(AssemblyError::PeriodFormatError {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("year {} is outside {}..={}", year, MIN_YEAR, MAX_YEAR),
        })
    }
}
