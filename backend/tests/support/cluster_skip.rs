//! Skip policy for suites that need an embedded PostgreSQL cluster.
//!
//! A cluster that fails to start fails the run. Machines that cannot host
//! the embedded binaries opt out with `SKIP_TEST_CLUSTER=1`, which turns the
//! failure into a `SKIP-TEST-CLUSTER` marker.

/// Whether `SKIP_TEST_CLUSTER` is set to `1`, `true` or `yes` (any case).
pub fn should_skip_test_cluster() -> bool {
    skip_flag_enabled(std::env::var("SKIP_TEST_CLUSTER").ok().as_deref())
}

fn skip_flag_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Report a cluster setup failure.
///
/// Panics unless skipping was requested, in which case it prints the skip
/// marker and returns `None`.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        return None;
    }
    panic!("embedded cluster unavailable: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, false)]
    #[case(Some(""), false)]
    #[case(Some("0"), false)]
    #[case(Some("no"), false)]
    #[case(Some("1"), true)]
    #[case(Some("TRUE"), true)]
    #[case(Some(" yes "), true)]
    fn skipping_is_opt_in(#[case] value: Option<&str>, #[case] expected: bool) {
        assert_eq!(skip_flag_enabled(value), expected);
    }
}
