use crate::error::SunriseError;
use crate::types::SunriseRecord;

/// Returns the record with the earliest `sunrise` instant.
///
/// Ties keep the first record seen.
///
/// # Errors
///
/// Returns [`SunriseError::EmptyInput`] if `records` is empty.
pub fn earliest(records: &[SunriseRecord]) -> Result<&SunriseRecord, SunriseError> {
    let (first, rest) = records.split_first().ok_or(SunriseError::EmptyInput)?;
    Ok(rest.iter().fold(first, |best, candidate| {
        if candidate.sunrise < best.sunrise {
            candidate
        } else {
            best
        }
    }))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn record(sunrise: &str, day_length: u64) -> SunriseRecord {
        let t: DateTime<Utc> = sunrise.parse().unwrap();
        SunriseRecord {
            sunrise: t,
            sunset: t,
            solar_noon: t,
            day_length,
            civil_twilight_begin: t,
            civil_twilight_end: t,
            nautical_twilight_begin: t,
            nautical_twilight_end: t,
            astronomical_twilight_begin: t,
            astronomical_twilight_end: t,
        }
    }

    #[test]
    fn picks_earliest_sunrise() {
        let records = vec![
            record("2024-01-01T06:00:00Z", 1),
            record("2024-01-01T05:30:00Z", 2),
            record("2024-01-01T07:00:00Z", 3),
        ];
        let best = earliest(&records).unwrap();
        assert_eq!(best.day_length, 2);
    }

    #[test]
    fn first_seen_wins_ties() {
        let records = vec![
            record("2024-01-01T07:00:00Z", 1),
            record("2024-01-01T05:30:00Z", 2),
            record("2024-01-01T05:30:00Z", 3),
        ];
        assert_eq!(earliest(&records).unwrap().day_length, 2);
    }

    #[test]
    fn compares_instants_not_text() {
        // 06:00+02:00 is 04:00 UTC, earlier than 05:00Z despite sorting later
        // as a string.
        let records = vec![
            record("2024-01-01T05:00:00Z", 1),
            record("2024-01-01T06:00:00+02:00", 2),
        ];
        assert_eq!(earliest(&records).unwrap().day_length, 2);
    }

    #[test]
    fn single_record_is_returned() {
        let records = vec![record("2024-01-01T05:00:00Z", 7)];
        assert_eq!(earliest(&records).unwrap().day_length, 7);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(earliest(&[]), Err(SunriseError::EmptyInput)));
    }
}
