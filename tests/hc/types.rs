// Unit tests for HC levels, table sizes and the match record.

use lz4::hc::types::{
    max_attempts, normalize_level, Match, CHAIN_MASK, CHAIN_SIZE, HASH_LOG_HC, HASH_TABLE_SIZE_HC,
    OPTIMAL_ML,
};
use lz4::hc::{HC_CLEVEL_DEFAULT, HC_CLEVEL_MAX, HC_CLEVEL_MIN};

#[test]
fn level_constants() {
    assert_eq!(HC_CLEVEL_MIN, 1);
    assert_eq!(HC_CLEVEL_DEFAULT, 9);
    assert_eq!(HC_CLEVEL_MAX, 17);
}

#[test]
fn levels_below_one_select_default() {
    assert_eq!(normalize_level(0), HC_CLEVEL_DEFAULT);
    assert_eq!(normalize_level(-5), HC_CLEVEL_DEFAULT);
    assert_eq!(normalize_level(i32::MIN), HC_CLEVEL_DEFAULT);
}

#[test]
fn levels_above_max_are_clamped() {
    assert_eq!(normalize_level(18), HC_CLEVEL_MAX);
    assert_eq!(normalize_level(i32::MAX), HC_CLEVEL_MAX);
    for level in 1..=17 {
        assert_eq!(normalize_level(level), level);
    }
}

#[test]
fn attempts_double_per_level() {
    assert_eq!(max_attempts(1), 1);
    assert_eq!(max_attempts(2), 2);
    assert_eq!(max_attempts(9), 256);
    assert_eq!(max_attempts(17), 65_536);
    assert_eq!(max_attempts(0), 256);
    assert_eq!(max_attempts(40), 65_536);
}

#[test]
fn table_sizes() {
    assert_eq!(HASH_LOG_HC, 15);
    assert_eq!(HASH_TABLE_SIZE_HC, 32_768);
    assert_eq!(CHAIN_SIZE, 65_536);
    assert_eq!(CHAIN_MASK, 0xFFFF);
    assert_eq!(OPTIMAL_ML, 18);
}

#[test]
fn match_fix_trims_the_front() {
    let mut m = Match {
        start: 100,
        reference: 40,
        len: 20,
    };
    assert_eq!(m.end(), 120);
    m.fix(6);
    assert_eq!(
        m,
        Match {
            start: 106,
            reference: 46,
            len: 14
        }
    );
    assert_eq!(m.end(), 120);
}
