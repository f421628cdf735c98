const LOCALHOST_HOSTNAMES: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

// Local by Flywheel, Laravel Herd and Valet, DDEV
const LOCAL_TLD_SUFFIXES: [&str; 4] = ["localhost", "local", "test", "ddev.site"];

/// Whether `hostname` belongs to a local development setup
pub fn is_local_dev(hostname: &str) -> bool {
    LOCALHOST_HOSTNAMES.contains(&hostname)
        || LOCAL_TLD_SUFFIXES.iter().any(|suffix| {
            hostname
                .strip_suffix(suffix)
                .is_some_and(|rest| rest.ends_with('.'))
        })
}
