//! Time zone the callback `timestamp` is rendered in

use crate::error::MockError;
use crate::error::MockResult;
use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Offset;
use chrono::Utc;
use chrono_tz::Tz;

/// Names that render as `UTC` rather than `+0000`
const UTC_NAMES: [&str; 8] = [
    "UTC",
    "Etc/UTC",
    "UCT",
    "Etc/UCT",
    "Universal",
    "Etc/Universal",
    "Zulu",
    "Etc/Zulu",
];

/// A fixed offset or an IANA zone whose offset follows daylight saving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningZone {
    /// `UTC`, `Z`, `+HH:MM`, `-HHMM`
    Fixed(FixedOffset),
    /// `America/New_York`, `Europe/London`, ...
    Named(Tz),
}

impl Default for SigningZone {
    fn default() -> Self {
        SigningZone::Named(Tz::UTC)
    }
}

impl SigningZone {
    /// Parse `UTC`, `Z`, a `±HH:MM`/`±HHMM` offset or an IANA zone name
    pub fn parse(raw: &str) -> MockResult<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Self::default());
        }

        if trimmed.starts_with(['+', '-']) {
            return trimmed
                .parse::<FixedOffset>()
                .map(SigningZone::Fixed)
                .map_err(|e| MockError::Config(format!("invalid UTC offset '{raw}': {e}")));
        }

        trimmed
            .parse::<Tz>()
            .map(SigningZone::Named)
            .map_err(|e| MockError::Config(format!("unknown time zone '{raw}': {e}")))
    }

    /// Offset in effect at `instant`
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            SigningZone::Fixed(offset) => *offset,
            SigningZone::Named(tz) => instant.with_timezone(tz).offset().fix(),
        }
    }

    /// Whether timestamps carry the literal `UTC` suffix
    pub fn is_utc(&self) -> bool {
        match self {
            SigningZone::Fixed(offset) => offset.local_minus_utc() == 0,
            SigningZone::Named(tz) => UTC_NAMES.contains(&tz.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_offsets_and_names() {
        assert_eq!(SigningZone::parse("UTC").unwrap(), SigningZone::default());
        assert_eq!(
            SigningZone::parse("+09:00").unwrap(),
            SigningZone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap())
        );
        assert_eq!(
            SigningZone::parse("-05:30").unwrap(),
            SigningZone::Fixed(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap())
        );
        assert_eq!(
            SigningZone::parse(" America/New_York ").unwrap(),
            SigningZone::Named(Tz::America__New_York)
        );
    }

    #[test]
    fn rejects_unknown_zones() {
        assert!(matches!(
            SigningZone::parse("Mars/Olympus_Mons"),
            Err(MockError::Config(_))
        ));
        assert!(matches!(SigningZone::parse("+25:00"), Err(MockError::Config(_))));
    }

    #[test]
    fn named_zone_offset_follows_daylight_saving() {
        let zone = SigningZone::parse("America/New_York").unwrap();
        let january = Utc.with_ymd_and_hms(2013, 1, 15, 12, 0, 0).unwrap();
        let july = Utc.with_ymd_and_hms(2013, 7, 15, 12, 0, 0).unwrap();

        assert_eq!(zone.offset_at(january).local_minus_utc(), -5 * 3600);
        assert_eq!(zone.offset_at(july).local_minus_utc(), -4 * 3600);
        assert!(!zone.is_utc());
    }

    #[test]
    fn utc_detection() {
        assert!(SigningZone::default().is_utc());
        assert!(SigningZone::parse("Etc/UTC").unwrap().is_utc());
        assert!(SigningZone::parse("+00:00").unwrap().is_utc());
        // London sits at +0000 in winter but is not UTC
        assert!(!SigningZone::parse("Europe/London").unwrap().is_utc());
    }
}
