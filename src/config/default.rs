/// Default per-request timeout for HTTP probes and endpoint fetches (ms)
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
/// Default per-lookup DNS timeout (ms)
pub const DEFAULT_DNS_TIMEOUT_MS: u64 = 2000;
/// Default directory for result files
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// File stem used for reverse-DNS results when the IP list has no usable name
pub const DEFAULT_RDNS_FILE_STEM: &str = "rdns";
/// Extension enforced on every result file
pub const RESULT_FILE_EXTENSION: &str = "txt";
/// Placeholder replaced by the target domain in endpoint templates
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";
/// Default log file name under the user config directory
pub const DEFAULT_LOG_FILE_NAME: &str = "subscout.log";
/// User config directory name under the home directory
pub const USER_CONFIG_DIR_NAME: &str = ".subscout";
