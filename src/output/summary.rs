use std::time::Duration;

use super::progress::format_elapsed;

/// Message when a passive run collected nothing.
pub const NO_RESULTS_MESSAGE: &str = "[-] Could not determine subdomains :(";

/// One-line run summary.
pub fn summary_line(discovered: usize, elapsed: Duration) -> String {
    let noun = if discovered == 1 { "result" } else { "results" };
    format!(
        "[*] {} {} obtained in {}",
        discovered,
        noun,
        format_elapsed(elapsed)
    )
}
