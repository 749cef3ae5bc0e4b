//! Property tests for the pure arithmetic and pattern helpers

use proptest::prelude::*;

use shepherd::utils::helpers::{
    average_progress, escape_like_pattern, percent_used, total_pages,
};

proptest! {
    #[test]
    fn percent_used_is_always_clamped(used in 0i64..10_000_000, allocated in 0i64..10_000_000) {
        let pct = percent_used(used, allocated);
        prop_assert!((0..=100).contains(&pct));
    }

    #[test]
    fn percent_used_full_allocation_is_100(allocated in 1i64..10_000_000) {
        prop_assert_eq!(percent_used(allocated, allocated), 100);
    }

    #[test]
    fn escaped_pattern_has_no_bare_wildcards(input in ".{0,64}") {
        let escaped = escape_like_pattern(&input);
        let chars: Vec<char> = escaped.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if *c == '%' || *c == '_' {
                prop_assert!(i > 0 && chars[i - 1] == '\\');
            }
        }
    }

    #[test]
    fn total_pages_covers_every_row(total in 0i64..1_000_000, limit in 1i64..100) {
        let pages = total_pages(total, limit);
        prop_assert!(pages * limit >= total);
        prop_assert!((pages - 1) * limit < total || total == 0);
    }

    #[test]
    fn average_progress_stays_in_range(values in proptest::collection::vec(0i32..=100, 0..50)) {
        let avg = average_progress(&values);
        prop_assert!((0..=100).contains(&avg));
    }
}

#[test]
fn percent_used_matches_dashboard_example() {
    // allocated=25000, used=18500 renders as 74% on the department card
    assert_eq!(percent_used(18_500, 25_000), 74);
}
