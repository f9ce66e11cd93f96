use crate::domain::model::YearSpan;

/// Collapses overlapping or adjacent year spans, sorted by start.
///
/// Spans are inclusive, so a span ending in 2019 and one starting in 2020
/// form a single run.
pub fn merge_intervals(mut spans: Vec<YearSpan>) -> Vec<YearSpan> {
    spans.sort_unstable();

    let mut merged: Vec<YearSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(running) if span.start <= running.end.saturating_add(1) => {
                running.end = running.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Inclusive number of years covered by already merged spans.
pub fn total_years(merged: &[YearSpan]) -> i32 {
    merged.iter().map(YearSpan::years).sum()
}

pub fn last_used(merged: &[YearSpan]) -> Option<i32> {
    merged.iter().map(|span| span.end).max()
}
