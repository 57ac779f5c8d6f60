//! Event-type interest patterns
//!
//! A pattern is a dot-separated list of segments. A segment that is exactly
//! `*` matches any single token; every other segment matches literally.
//! Matching compares segment counts first, so `network.update.*` matches
//! `network.update.end` but never `network.update` or `network.update.a.b`.

use netmeter_common::RegistryError;
use std::fmt;

const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Literal(String),
    Any,
}

/// Parsed interest pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl EventPattern {
    /// Parse a pattern such as `network.update.*`
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("pattern is empty"));
        }

        let segments = raw
            .split('.')
            .map(|segment| match segment {
                "" => Err(invalid("empty segment")),
                WILDCARD => Ok(Segment::Any),
                s if s.contains('*') => Err(invalid("wildcard must be a whole segment")),
                s => Ok(Segment::Literal(s.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Check whether an event type matches this pattern
    pub fn matches(&self, event_type: &str) -> bool {
        let mut tokens = event_type.split('.');
        for segment in &self.segments {
            match (segment, tokens.next()) {
                (_, None) => return false,
                (Segment::Any, Some(token)) => {
                    if token.is_empty() {
                        return false;
                    }
                }
                (Segment::Literal(expected), Some(token)) => {
                    if expected != token {
                        return false;
                    }
                }
            }
        }
        tokens.next().is_none()
    }

    /// Pattern as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for EventPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = EventPattern::parse("network.create.end").unwrap();
        assert!(pattern.matches("network.create.end"));
        assert!(!pattern.matches("network.create.start"));
        assert!(!pattern.matches("network.create"));
        assert!(!pattern.matches("network.create.end.extra"));
    }

    #[test]
    fn test_trailing_wildcard() {
        let pattern = EventPattern::parse("network.update.*").unwrap();
        assert!(pattern.matches("network.update.start"));
        assert!(pattern.matches("network.update.end"));
        assert!(!pattern.matches("network.update"));
        assert!(!pattern.matches("network.update."));
        assert!(!pattern.matches("network.update.end.more"));
        assert!(!pattern.matches("subnet.update.end"));
    }

    #[test]
    fn test_leading_wildcard() {
        let pattern = EventPattern::parse("*.update.*").unwrap();
        assert!(pattern.matches("port.update.start"));
        assert!(!pattern.matches("port.create.end"));
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        // "firewall" must not claim "firewall_policy" events
        let pattern = EventPattern::parse("firewall.exists").unwrap();
        assert!(!pattern.matches("firewall_policy.exists"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(EventPattern::parse("").is_err());
        assert!(EventPattern::parse("network..end").is_err());
        assert!(EventPattern::parse("network.upd*").is_err());
        assert!(EventPattern::parse("network.").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let pattern = EventPattern::parse("l3.meter").unwrap();
        assert_eq!(pattern.to_string(), "l3.meter");
        assert_eq!(pattern.as_str(), "l3.meter");
    }
}
