//! Timestamp rendering in the script time zone.
//!
//! Patterns use the `yyyy-MM-dd HH:mm:ss` letter style: `y` year, `M` month,
//! `d` day, `H` hour (0-23), `m` minute, `s` second. Text inside single quotes
//! is copied verbatim and `''` is a literal quote. Any other ASCII letter is
//! rejected so a typo never silently becomes literal text.

use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{EngineError, Result};

/// Pattern of the last-edit timestamp written to ledger rows.
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Field {
    Year,
    ShortYear,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Field { field: Field, width: usize },
    Literal(String),
}

/// A compiled timestamp pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimestampPattern {
    source: String,
    tokens: Vec<Token>,
}

impl TimestampPattern {
    pub fn parse(pattern: &str) -> Result<TimestampPattern> {
        let invalid = |message: String| EngineError::InvalidTimestampPattern {
            pattern: pattern.to_string(),
            message,
        };

        let mut tokens = Vec::new();
        let mut literal = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                if chars.get(i + 1) == Some(&'\'') {
                    literal.push('\'');
                    i += 2;
                    continue;
                }
                let close = chars[i + 1..]
                    .iter()
                    .position(|&q| q == '\'')
                    .ok_or_else(|| invalid("unterminated quote".to_string()))?;
                literal.extend(&chars[i + 1..i + 1 + close]);
                i += close + 2;
                continue;
            }

            if !c.is_ascii_alphabetic() {
                literal.push(c);
                i += 1;
                continue;
            }

            let width = chars[i..].iter().take_while(|&&n| n == c).count();
            let field = match (c, width) {
                ('y', 2) => Field::ShortYear,
                ('y', _) => Field::Year,
                ('M', 1..=2) => Field::Month,
                ('M', _) => return Err(invalid("month names are not supported".to_string())),
                ('d', _) => Field::Day,
                ('H', _) => Field::Hour,
                ('m', _) => Field::Minute,
                ('s', _) => Field::Second,
                _ => return Err(invalid(format!("unsupported pattern letter '{}'", c))),
            };
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field { field, width });
            i += width;
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(TimestampPattern {
            source: pattern.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render an instant in the given time zone.
    pub fn render(&self, instant: DateTime<Utc>, zone: ScriptTimeZone) -> String {
        match zone {
            ScriptTimeZone::Local => self.render_in(&instant.with_timezone(&Local)),
            ScriptTimeZone::Utc => self.render_in(&instant),
            ScriptTimeZone::Fixed(offset) => self.render_in(&instant.with_timezone(&offset)),
            ScriptTimeZone::Named(tz) => self.render_in(&instant.with_timezone(&tz)),
        }
    }

    fn render_in<Z: TimeZone>(&self, at: &DateTime<Z>) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field { field, width } => {
                    let value = match field {
                        Field::Year => i64::from(at.year()),
                        Field::ShortYear => i64::from(at.year().rem_euclid(100)),
                        Field::Month => i64::from(at.month()),
                        Field::Day => i64::from(at.day()),
                        Field::Hour => i64::from(at.hour()),
                        Field::Minute => i64::from(at.minute()),
                        Field::Second => i64::from(at.second()),
                    };
                    out.push_str(&format!("{:0width$}", value, width = *width));
                }
            }
        }
        out
    }
}

impl Default for TimestampPattern {
    fn default() -> Self {
        TimestampPattern {
            source: DEFAULT_TIMESTAMP_PATTERN.to_string(),
            tokens: vec![
                Token::Field { field: Field::Year, width: 4 },
                Token::Literal("-".to_string()),
                Token::Field { field: Field::Month, width: 2 },
                Token::Literal("-".to_string()),
                Token::Field { field: Field::Day, width: 2 },
                Token::Literal(" ".to_string()),
                Token::Field { field: Field::Hour, width: 2 },
                Token::Literal(":".to_string()),
                Token::Field { field: Field::Minute, width: 2 },
                Token::Literal(":".to_string()),
                Token::Field { field: Field::Second, width: 2 },
            ],
        }
    }
}

/// The time zone timestamps are rendered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScriptTimeZone {
    /// The machine's local zone.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
    /// An IANA zone such as `Asia/Jakarta`; follows its daylight-saving rules.
    Named(Tz),
}

impl FromStr for ScriptTimeZone {
    type Err = EngineError;

    /// Accepts `local`, `UTC`/`GMT`/`Z`, offsets such as `+07:00`, `-0530`,
    /// `+7` or `UTC+07:00`, and IANA names such as `Asia/Jakarta`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(ScriptTimeZone::Local);
        }
        if let Some(zone) = parse_offset(trimmed) {
            return Ok(zone);
        }
        trimmed
            .parse::<Tz>()
            .map(ScriptTimeZone::Named)
            .map_err(|_| EngineError::InvalidTimeZone(s.to_string()))
    }
}

fn parse_offset(trimmed: &str) -> Option<ScriptTimeZone> {
    let offset = ["UTC", "GMT", "utc", "gmt"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    if offset.is_empty() || offset == "Z" {
        return Some(ScriptTimeZone::Utc);
    }

    let (sign, rest) = match offset.as_bytes().first() {
        Some(b'+') => (1, &offset[1..]),
        Some(b'-') => (-1, &offset[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    if hours.is_empty() || hours.len() > 2 || minutes.len() > 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).map(ScriptTimeZone::Fixed)
}

impl TryFrom<String> for ScriptTimeZone {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ScriptTimeZone> for String {
    fn from(zone: ScriptTimeZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for ScriptTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptTimeZone::Local => write!(f, "local"),
            ScriptTimeZone::Utc => write!(f, "UTC"),
            ScriptTimeZone::Fixed(offset) => write!(f, "{}", offset),
            ScriptTimeZone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 23, 5, 7).unwrap()
    }

    #[test]
    fn test_default_pattern_matches_parsed() {
        let parsed = TimestampPattern::parse(DEFAULT_TIMESTAMP_PATTERN).unwrap();
        assert_eq!(parsed, TimestampPattern::default());
    }

    #[test]
    fn test_render_utc() {
        let pattern = TimestampPattern::default();
        assert_eq!(pattern.render(instant(), ScriptTimeZone::Utc), "2024-03-09 23:05:07");
    }

    #[test]
    fn test_render_fixed_offset_crosses_midnight() {
        let pattern = TimestampPattern::default();
        let jakarta: ScriptTimeZone = "+07:00".parse().unwrap();
        assert_eq!(pattern.render(instant(), jakarta), "2024-03-10 06:05:07");
    }

    #[test]
    fn test_quoted_literals_and_short_year() {
        let pattern = TimestampPattern::parse("dd/MM/yy 'at' H''m").unwrap();
        assert_eq!(pattern.render(instant(), ScriptTimeZone::Utc), "09/03/24 at 23'5");
    }

    #[test]
    fn test_unknown_letters_are_rejected() {
        assert!(TimestampPattern::parse("yyyy-MM-dd hh:mm").is_err());
        assert!(TimestampPattern::parse("MMM dd").is_err());
        assert!(TimestampPattern::parse("'open").is_err());
    }

    #[test]
    fn test_parse_time_zones() {
        assert_eq!("local".parse::<ScriptTimeZone>().unwrap(), ScriptTimeZone::Local);
        assert_eq!("UTC".parse::<ScriptTimeZone>().unwrap(), ScriptTimeZone::Utc);
        assert_eq!(
            "-0530".parse::<ScriptTimeZone>().unwrap(),
            ScriptTimeZone::Fixed(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap())
        );
        assert_eq!(
            "GMT+7".parse::<ScriptTimeZone>().unwrap(),
            ScriptTimeZone::Fixed(FixedOffset::east_opt(7 * 3600).unwrap())
        );
        assert_eq!(
            "Asia/Jakarta".parse::<ScriptTimeZone>().unwrap(),
            ScriptTimeZone::Named(chrono_tz::Asia::Jakarta)
        );
        assert!("Mars/Olympus".parse::<ScriptTimeZone>().is_err());
        assert!("+25:00".parse::<ScriptTimeZone>().is_err());
        assert!("GMT+x".parse::<ScriptTimeZone>().is_err());
    }

    #[test]
    fn test_named_zone_follows_daylight_saving() {
        let pattern = TimestampPattern::default();
        let new_york: ScriptTimeZone = "America/New_York".parse().unwrap();
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(pattern.render(winter, new_york), "2024-01-15 07:00:00");
        assert_eq!(pattern.render(summer, new_york), "2024-07-15 08:00:00");
    }

    #[test]
    fn test_named_zone_display_round_trips() {
        let zone: ScriptTimeZone = "Asia/Jakarta".parse().unwrap();
        assert_eq!(zone.to_string(), "Asia/Jakarta");
        assert_eq!(zone.to_string().parse::<ScriptTimeZone>().unwrap(), zone);
        assert_eq!(TimestampPattern::default().render(instant(), zone), "2024-03-10 06:05:07");
    }
}
