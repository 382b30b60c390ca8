use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

/// A date string that is not valid ISO `YYYY-MM-DD`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid date '{input}': {source}")]
pub struct ParseError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Signed day count from `a` to `b`. Negative when `b` is earlier.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Shift a date by whole days. Negative moves backwards.
///
/// Saturates at the edge of the representable range instead of panicking.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Clamp `date` into `[min, max]`. Callers must ensure `min <= max`.
pub fn clamp_date(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> NaiveDate {
    if date < min {
        min
    } else if date > max {
        max
    } else {
        date
    }
}

/// Earliest of the given dates, `None` for an empty iterator.
pub fn min_date<I>(dates: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    dates.into_iter().min()
}

/// Latest of the given dates, `None` for an empty iterator.
pub fn max_date<I>(dates: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    dates.into_iter().max()
}

/// Parse a strict ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|source| ParseError {
        input: input.to_string(),
        source,
    })
}

/// Canonical ISO `YYYY-MM-DD` form.
pub fn iso_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Compact day label for bars and tooltips, e.g. "05. Mar".
pub fn short_label(date: NaiveDate) -> String {
    date.format("%d. %b").to_string()
}

/// ISO week label, e.g. "W09".
pub fn week_label(date: NaiveDate) -> String {
    date.format("W%V").to_string()
}

/// Short month name, e.g. "Mar".
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

/// Quarter label, e.g. "Q1 2023".
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{} {}", date.month0() / 3 + 1, date.year())
}

/// Four-digit year label.
pub fn year_label(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1990i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn days_between_crosses_month_and_year_boundaries() {
        assert_eq!(days_between(date("2022-12-30"), date("2023-01-02")), 3);
        assert_eq!(days_between(date("2023-01-02"), date("2022-12-30")), -3);
        assert_eq!(days_between(date("2024-02-28"), date("2024-03-01")), 2);
        assert_eq!(days_between(date("2023-02-28"), date("2023-03-01")), 1);
        assert_eq!(days_between(date("2023-05-10"), date("2023-05-10")), 0);
    }

    #[test]
    fn add_days_moves_in_both_directions() {
        assert_eq!(add_days(date("2023-01-30"), 3), date("2023-02-02"));
        assert_eq!(add_days(date("2023-01-01"), -1), date("2022-12-31"));
        assert_eq!(add_days(date("2024-02-28"), 1), date("2024-02-29"));
    }

    #[test]
    fn add_days_saturates_instead_of_panicking() {
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(add_days(date("2023-06-15"), i64::MAX), NaiveDate::MAX);
        assert_eq!(add_days(date("2023-06-15"), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn clamp_date_scenarios() {
        let min = date("2023-01-05");
        let max = date("2023-01-15");
        assert_eq!(clamp_date(date("2023-01-01"), min, max), min);
        assert_eq!(clamp_date(date("2023-01-20"), min, max), max);
        assert_eq!(clamp_date(date("2023-01-10"), min, max), date("2023-01-10"));
        assert_eq!(clamp_date(min, min, max), min);
        assert_eq!(clamp_date(max, min, max), max);
    }

    #[test]
    fn min_max_date_handle_empty_input() {
        assert_eq!(min_date(std::iter::empty()), None);
        assert_eq!(max_date(std::iter::empty()), None);
        let dates = [date("2023-03-01"), date("2023-01-15"), date("2023-02-10")];
        assert_eq!(min_date(dates.iter().copied()), Some(date("2023-01-15")));
        assert_eq!(max_date(dates.iter().copied()), Some(date("2023-03-01")));
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(parse_date("2023-03-05").unwrap(), date("2023-03-05"));
        assert!(parse_date("05.03.2023").is_err());
        assert!(parse_date("2023-13-01").is_err());
        assert!(parse_date("not-a-date").is_err());

        let err = parse_date("2023-13-01").unwrap_err();
        assert!(err.to_string().contains("2023-13-01"));
    }

    #[test]
    fn labels_format_as_expected() {
        let d = date("2023-03-05");
        assert_eq!(iso_string(d), "2023-03-05");
        assert_eq!(short_label(d), "05. Mar");
        assert_eq!(month_label(d), "Mar");
        assert_eq!(year_label(d), "2023");
        assert_eq!(week_label(date("2023-01-05")), "W01");
        assert_eq!(quarter_label(date("2023-01-05")), "Q1 2023");
        assert_eq!(quarter_label(date("2023-04-01")), "Q2 2023");
        assert_eq!(quarter_label(date("2023-12-31")), "Q4 2023");
    }

    proptest! {
        #[test]
        fn add_then_diff_round_trips(start in any_date(), days in -20_000i64..20_000) {
            let shifted = add_days(start, days);
            prop_assert_eq!(days_between(start, shifted), days);
        }

        #[test]
        fn parse_iso_round_trips(d in any_date()) {
            prop_assert_eq!(parse_date(&iso_string(d)).unwrap(), d);
        }

        #[test]
        fn clamp_is_idempotent_and_in_bounds(d in any_date(), a in any_date(), b in any_date()) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let once = clamp_date(d, min, max);
            prop_assert!(min <= once && once <= max);
            prop_assert_eq!(clamp_date(once, min, max), once);
        }
    }
}
