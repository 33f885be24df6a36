use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

macro_rules! duration_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

duration_pattern!(RE_YEARS, r"([0-9]+)\s*(?:year|yr)");
duration_pattern!(RE_MONTHS, r"([0-9]+)\s*(?:month|mo)");
duration_pattern!(RE_WEEKS, r"([0-9]+)\s*(?:week|wk)");

/// Completed years between `birth` and `today`.
pub(crate) fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Reads free-text durations such as "2 years", "18 months" or "6 weeks".
///
/// Units are tried in order years, months, weeks and only the first unit that
/// matches anywhere in the text is used. Phrases without a digit ("a couple
/// years") read as zero.
pub(crate) fn years_from_text(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let lower = text.to_lowercase();
    let units: [(&LazyLock<Option<Regex>>, f64); 3] =
        [(&RE_YEARS, 1.0), (&RE_MONTHS, 12.0), (&RE_WEEKS, 52.0)];

    for (pattern, per_year) in units {
        let Some(regex) = LazyLock::force(pattern) else {
            continue;
        };
        if let Some(amount) = regex
            .captures(&lower)
            .and_then(|captures| captures.get(1))
            .and_then(|digits| digits.as_str().parse::<f64>().ok())
        {
            return amount / per_year;
        }
    }

    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn reads_each_unit() {
        assert_eq!(years_from_text("2 years"), 2.0);
        assert_eq!(years_from_text("18 months"), 1.5);
        assert!((years_from_text("6 weeks") - 6.0 / 52.0).abs() < 1e-9);
        assert!((years_from_text("6 weeks") - 0.1154).abs() < 1e-4);
    }

    #[test]
    fn unreadable_text_is_zero() {
        assert_eq!(years_from_text(""), 0.0);
        assert_eq!(years_from_text("unknown"), 0.0);
        assert_eq!(years_from_text("a couple years"), 0.0);
        assert_eq!(years_from_text("on and off for a while"), 0.0);
    }

    #[test]
    fn year_unit_wins_over_earlier_months() {
        assert_eq!(years_from_text("8 months, maybe 3 years total"), 3.0);
        assert_eq!(years_from_text("1 year 6 months"), 1.0);
    }

    #[test]
    fn matching_is_case_insensitive_and_tolerates_abbreviations() {
        assert_eq!(years_from_text("4 YRS"), 4.0);
        assert_eq!(years_from_text("24mo"), 2.0);
        assert_eq!(years_from_text("about 26 Wks"), 0.5);
    }

    #[test]
    fn age_counts_completed_years() {
        let today = date(2025, 10, 19);
        assert_eq!(age_on(date(1965, 10, 19), today), 60);
        assert_eq!(age_on(date(1965, 10, 20), today), 59);
        assert_eq!(age_on(date(1965, 11, 1), today), 59);
        assert_eq!(age_on(date(1965, 9, 30), today), 60);
    }

    #[test]
    fn leap_day_birthdays_complete_on_march_first() {
        let birth = date(1964, 2, 29);
        assert_eq!(age_on(birth, date(2025, 2, 28)), 60);
        assert_eq!(age_on(birth, date(2024, 2, 28)), 59);
        assert_eq!(age_on(birth, date(2024, 2, 29)), 60);
    }
}
