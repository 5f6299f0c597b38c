use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Category of a discovered value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Hostname,
    Ipv4,
    Ipv6,
}

/// Classify a resolver answer by address family.
///
/// Dotted-quad is `Ipv4`, colon-hex is `Ipv6`, anything else (a PTR target or a
/// subdomain name) is `Hostname`.
pub fn classify(answer: &str) -> RecordKind {
    if answer.parse::<Ipv4Addr>().is_ok() {
        RecordKind::Ipv4
    } else if answer.parse::<Ipv6Addr>().is_ok() {
        RecordKind::Ipv6
    } else {
        RecordKind::Hostname
    }
}

/// One successful fact about a candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub kind: RecordKind,
    pub value: String,
    /// Candidate this fact was derived from
    pub source: String,
}

impl ResolutionResult {
    /// A subdomain that was itself found to be live.
    pub fn subdomain(name: &str) -> Self {
        ResolutionResult {
            kind: RecordKind::Hostname,
            value: name.to_string(),
            source: name.to_string(),
        }
    }

    /// An answer record obtained by resolving `source`.
    pub fn answer(source: &str, answer: &str) -> Self {
        let value = answer.trim_end_matches('.').to_string();
        ResolutionResult {
            kind: classify(&value),
            value,
            source: source.to_string(),
        }
    }

    /// True if the value was derived from the candidate rather than being it.
    pub fn is_answer(&self) -> bool {
        self.value != self.source
    }
}

/// Result of one enumeration run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnumResult {
    /// Mode name
    pub mode: String,
    /// Every emitted record, in emission order
    pub results: Vec<ResolutionResult>,
    /// Number of distinct successful candidates
    pub discovered: usize,
    /// Time from start to end of the run
    pub scan_time: Duration,
}

impl EnumResult {
    pub fn new(mode: &str) -> EnumResult {
        EnumResult {
            mode: mode.to_string(),
            results: vec![],
            discovered: 0,
            scan_time: Duration::from_millis(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_total() {
        assert_eq!(classify("8.8.8.8"), RecordKind::Ipv4);
        assert_eq!(classify("2001:4860:4860::8888"), RecordKind::Ipv6);
        assert_eq!(classify("::1"), RecordKind::Ipv6);
        assert_eq!(classify("dns.google"), RecordKind::Hostname);
        assert_eq!(classify(""), RecordKind::Hostname);
        assert_eq!(classify("999.1.1.1"), RecordKind::Hostname);
    }

    #[test]
    fn answer_strips_root_dot() {
        let r = ResolutionResult::answer("8.8.8.8", "dns.google.");
        assert_eq!(r.kind, RecordKind::Hostname);
        assert_eq!(r.value, "dns.google");
        assert!(r.is_answer());
        assert!(!ResolutionResult::subdomain("www.example.com").is_answer());
    }
}
