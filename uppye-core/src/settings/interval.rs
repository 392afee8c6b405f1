use serde::Deserialize;
use serde::{de::Error, Deserializer};

/// A human-readable duration used for token lifetimes and the session
/// cleanup schedule, e.g. `900s`, `15m`, `12h` or `7d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Seconds(u32),
    Minutes(u32),
    Hours(u32),
    Days(u32),
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        if s.len() < 2 || !s.is_ascii() {
            return Err(D::Error::custom("Invalid interval"));
        }
        let (num, unit) = s.split_at(s.len() - 1);
        let num: u32 = num.parse().map_err(D::Error::custom)?;

        match unit {
            "s" => Ok(Interval::Seconds(num)),
            "m" => Ok(Interval::Minutes(num)),
            "h" => Ok(Interval::Hours(num)),
            "d" => Ok(Interval::Days(num)),
            _ => Err(D::Error::custom("Invalid time unit")),
        }
    }
}

impl From<Interval> for clokwerk::Interval {
    fn from(val: Interval) -> Self {
        match val {
            Interval::Seconds(s) => clokwerk::Interval::Seconds(s),
            Interval::Minutes(m) => clokwerk::Interval::Minutes(m),
            Interval::Hours(h) => clokwerk::Interval::Hours(h),
            Interval::Days(d) => clokwerk::Interval::Days(d),
        }
    }
}

impl From<Interval> for chrono::Duration {
    fn from(val: Interval) -> Self {
        match val {
            Interval::Seconds(s) => chrono::Duration::seconds(s as i64),
            Interval::Minutes(m) => chrono::Duration::minutes(m as i64),
            Interval::Hours(h) => chrono::Duration::hours(h as i64),
            Interval::Days(d) => chrono::Duration::days(d as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_units() {
        assert_eq!(
            serde_norway::from_str::<Interval>("900s").unwrap(),
            Interval::Seconds(900)
        );
        assert_eq!(
            serde_norway::from_str::<Interval>("15m").unwrap(),
            Interval::Minutes(15)
        );
        assert_eq!(
            serde_norway::from_str::<Interval>("12h").unwrap(),
            Interval::Hours(12)
        );
        assert_eq!(
            serde_norway::from_str::<Interval>("7d").unwrap(),
            Interval::Days(7)
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(serde_norway::from_str::<Interval>("\"15x\"").is_err());
        assert!(serde_norway::from_str::<Interval>("\"m\"").is_err());
        assert!(serde_norway::from_str::<Interval>("\"\"").is_err());
    }

    #[test]
    fn test_converts_to_chrono_duration() {
        assert_eq!(
            chrono::Duration::from(Interval::Minutes(15)),
            chrono::Duration::seconds(900)
        );
        assert_eq!(
            chrono::Duration::from(Interval::Days(7)),
            chrono::Duration::seconds(604_800)
        );
    }
}
