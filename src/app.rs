use clap::{crate_version, crate_description};

use crate::config::EnumSettings;

// APP information
pub const CRATE_BIN_NAME: &str = "subscout";

/// Enumeration strategy selected for a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumMode {
    /// Domain only: scrape public endpoints
    Passive,
    /// Domain + wordlist: HTTP probes
    Active,
    /// Domain + wordlist + --dns: A/AAAA lookups
    Dns,
    /// IP list only: PTR lookups
    ReverseDns,
    /// No strategy matches the given inputs
    Invalid(String),
}

impl EnumMode {
    /// Select the single mode matching `settings`.
    pub fn classify(settings: &EnumSettings) -> EnumMode {
        let domain = settings.domain.is_some();
        let wordlist = settings.wordlist.is_some();
        let ip_list = settings.ip_list.is_some();
        match (domain, wordlist, settings.dns_mode, ip_list) {
            (true, false, false, false) => EnumMode::Passive,
            (true, true, false, false) => EnumMode::Active,
            (true, true, true, false) => EnumMode::Dns,
            (false, false, false, true) => EnumMode::ReverseDns,
            (true, false, true, false) => {
                EnumMode::Invalid("DNS enumeration requires a wordlist (-w)".into())
            }
            (false, _, _, false) => {
                EnumMode::Invalid("Please specify a target domain (-d) or an IP list (--rdns)".into())
            }
            (_, _, _, true) => EnumMode::Invalid(
                "An IP list (--rdns) cannot be combined with a domain, wordlist or --dns".into(),
            ),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EnumMode::Passive => "passive",
            EnumMode::Active => "active",
            EnumMode::Dns => "dns",
            EnumMode::ReverseDns => "rdns",
            EnumMode::Invalid(_) => "invalid",
        }
    }
}

pub fn show_banner_with_starttime() {
    println!("{} v{}", CRATE_BIN_NAME, crate_version!());
    println!("{}", crate_description!());
    println!();
    println!("Starting at {}", crate::time::local_timestamp());
    println!();
}
