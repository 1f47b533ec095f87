use crate::calendar::MAX_EVENTS;
use crate::error::ArgumentError;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Width of one YYYY-MM-DD token
const DATE_WIDTH: usize = 10;

/// Parse a result-count argument. Blank means "as many as allowed".
pub fn parse_count(arg: &str) -> Result<u32, ArgumentError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Ok(MAX_EVENTS);
    }
    let count: i64 = arg.parse().map_err(|_| ArgumentError::NotANumber)?;
    if count <= 0 {
        return Err(ArgumentError::NonPositive);
    }
    if count > MAX_EVENTS as i64 {
        return Err(ArgumentError::TooLarge);
    }
    Ok(count as u32)
}

/// Parse a single-date argument. Blank falls back to the given today;
/// otherwise only the first fixed-width token is considered.
pub fn parse_single_date(arg: &str, today: NaiveDate) -> Result<NaiveDate, ArgumentError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Ok(today);
    }
    let token: String = arg.chars().take(DATE_WIDTH).collect();
    NaiveDate::parse_from_str(&token, DATE_FORMAT).map_err(|_| ArgumentError::BadDateFormat)
}

/// Parse a date-pair argument by fixed offsets: the first 10 characters are
/// the start, the last 10 characters are the end. Whatever sits between the
/// two tokens (the designed " - " separator included) is ignored, and an
/// input shorter than two tokens makes them overlap. This slicing contract
/// is observable behavior; keep it positional.
pub fn parse_date_pair(arg: &str) -> Result<(NaiveDate, NaiveDate), ArgumentError> {
    let chars: Vec<char> = arg.chars().collect();

    let first: String = chars.iter().take(DATE_WIDTH).collect();
    if first.trim().is_empty() {
        return Err(ArgumentError::BadDateFormat);
    }
    let start =
        NaiveDate::parse_from_str(&first, DATE_FORMAT).map_err(|_| ArgumentError::BadDateFormat)?;

    let last: String = chars[chars.len().saturating_sub(DATE_WIDTH)..].iter().collect();
    let end =
        NaiveDate::parse_from_str(&last, DATE_FORMAT).map_err(|_| ArgumentError::BadDateFormat)?;

    if end < start {
        return Err(ArgumentError::RangeInverted);
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_accepts_full_range() {
        for n in 1..=MAX_EVENTS {
            assert_eq!(parse_count(&n.to_string()), Ok(n));
        }
    }

    #[test]
    fn test_parse_count_blank_defaults_to_maximum() {
        assert_eq!(parse_count(""), Ok(MAX_EVENTS));
        assert_eq!(parse_count("   "), Ok(MAX_EVENTS));
    }

    #[test]
    fn test_parse_count_rejections() {
        assert_eq!(parse_count("abc"), Err(ArgumentError::NotANumber));
        assert_eq!(parse_count("3.5"), Err(ArgumentError::NotANumber));
        assert_eq!(parse_count("0"), Err(ArgumentError::NonPositive));
        assert_eq!(parse_count("-5"), Err(ArgumentError::NonPositive));
        assert_eq!(parse_count("101"), Err(ArgumentError::TooLarge));
        assert_eq!(parse_count("10000"), Err(ArgumentError::TooLarge));
    }

    #[test]
    fn test_parse_single_date() {
        let today = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        assert_eq!(parse_single_date("", today), Ok(today));
        assert_eq!(
            parse_single_date("2023-01-15", today),
            Ok(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
        // Only the first fixed-width token counts
        assert_eq!(
            parse_single_date("2023-01-15 trailing junk", today),
            Ok(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
        assert_eq!(
            parse_single_date("15.01.2023", today),
            Err(ArgumentError::BadDateFormat)
        );
    }

    #[test]
    fn test_parse_date_pair() {
        let (start, end) = parse_date_pair("2023-01-01 - 2023-01-10").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 1, 10).unwrap());
    }

    #[test]
    fn test_parse_date_pair_ignores_text_between_tokens() {
        let (start, end) = parse_date_pair("2023-01-01 until some day 2023-01-10").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 1, 10).unwrap());
    }

    #[test]
    fn test_parse_date_pair_short_input_overlaps() {
        // A bare date is both the first and the last 10 characters
        let (start, end) = parse_date_pair("2023-01-01").unwrap();
        assert_eq!(start, end);
    }

    #[test]
    fn test_parse_date_pair_inverted_range() {
        assert_eq!(
            parse_date_pair("2023-01-10 - 2023-01-01"),
            Err(ArgumentError::RangeInverted)
        );
    }

    #[test]
    fn test_parse_date_pair_rejections() {
        assert_eq!(parse_date_pair(""), Err(ArgumentError::BadDateFormat));
        assert_eq!(
            parse_date_pair("not-a-date - 2023-01-10"),
            Err(ArgumentError::BadDateFormat)
        );
        assert_eq!(
            parse_date_pair("2023-01-01 - not-a-date"),
            Err(ArgumentError::BadDateFormat)
        );
    }
}
