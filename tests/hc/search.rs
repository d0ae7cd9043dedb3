// Unit tests for the hash-chain match finder.

use lz4::hc::search::HashChain;
use lz4::hc::types::Match;

fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            ((x >> 24) as u8) | 1
        })
        .collect()
}

#[test]
fn insert_advances_lazily() {
    let buf = noise(64, 3);
    let mut chain = HashChain::new(16);
    assert_eq!(chain.max_attempts(), 16);
    assert_eq!(chain.next_to_update(), 0);
    chain.insert(&buf, 10);
    assert_eq!(chain.next_to_update(), 10);
    chain.insert(&buf, 4);
    assert_eq!(chain.next_to_update(), 10);
}

#[test]
fn reset_forgets_positions() {
    let buf = b"0123456789ABCDEF-0123456789ABCDEF-tail!";
    let mut chain = HashChain::new(16);
    let mut m = Match::default();
    assert!(chain.insert_and_find_best_match(buf, 17, buf.len() - 5, &mut m));

    chain.reset(4);
    assert_eq!(chain.next_to_update(), 0);
    assert_eq!(chain.max_attempts(), 4);
    // Searching from the start of a fresh chain sees no history.
    assert!(!chain.insert_and_find_best_match(buf, 0, buf.len() - 5, &mut m));
}

#[test]
fn best_match_finds_earlier_copy() {
    let buf = b"0123456789ABCDEF-0123456789ABCDEF-tail!";
    let mut chain = HashChain::new(16);
    let mut m = Match::default();
    assert!(chain.insert_and_find_best_match(buf, 17, buf.len() - 5, &mut m));
    assert_eq!(
        m,
        Match {
            start: 17,
            reference: 0,
            len: 17
        }
    );
    assert_eq!(chain.next_to_update(), 17);
}

#[test]
fn best_match_stops_at_match_limit() {
    let buf = b"0123456789ABCDEF-0123456789ABCDEF-tail!";
    let mut chain = HashChain::new(16);
    let mut m = Match::default();
    assert!(chain.insert_and_find_best_match(buf, 17, 25, &mut m));
    assert_eq!(m.len, 8);
}

#[test]
fn no_match_in_unique_data() {
    let buf = noise(256, 11);
    let mut chain = HashChain::new(256);
    let mut m = Match::default();
    for off in 0..200 {
        assert!(!chain.insert_and_find_best_match(&buf, off, 250, &mut m), "off {off}");
    }
}

#[test]
fn repetition_is_indexed_in_bulk() {
    let mut buf = vec![b'r'; 200];
    buf.extend_from_slice(&noise(16, 5));
    let mut chain = HashChain::new(8);
    let mut m = Match::default();
    assert!(chain.insert_and_find_best_match(&buf, 1, buf.len() - 5, &mut m));
    assert_eq!(m.reference, 0);
    assert_eq!(m.len, 199);
    assert!(chain.next_to_update() > 100);
}

/// `pattern`, zeros, then `pattern` again at `distance`.
fn far_repeat(distance: usize) -> Vec<u8> {
    let pattern = noise(64, 0x9E37_79B9);
    let mut buf = pattern.clone();
    buf.resize(distance, 0);
    buf.extend_from_slice(&pattern);
    buf.extend_from_slice(&[0; 8]);
    buf
}

#[test]
fn window_edge_is_inclusive() {
    let buf = far_repeat(65_535);
    let mut chain = HashChain::new(256);
    let mut m = Match::default();
    assert!(chain.insert_and_find_best_match(&buf, 65_535, buf.len() - 5, &mut m));
    assert_eq!(m.reference, 0);
    assert!(m.len >= 64);
}

#[test]
fn beyond_window_is_not_found() {
    let buf = far_repeat(65_536);
    let mut chain = HashChain::new(256);
    let mut m = Match::default();
    assert!(!chain.insert_and_find_best_match(&buf, 65_536, buf.len() - 5, &mut m));
}

#[test]
fn wider_match_extends_backward() {
    let buf = b"abcdefghijkl#abcdefghijkl#####";
    let mut chain = HashChain::new(16);
    let mut m = Match::default();
    assert!(chain.insert_and_find_wider_match(buf, 17, 13, 25, 4, &mut m));
    assert_eq!(
        m,
        Match {
            start: 13,
            reference: 0,
            len: 12
        }
    );
}

#[test]
fn wider_match_must_beat_minimum() {
    let buf = b"abcdefghijkl#abcdefghijkl#####";
    let mut chain = HashChain::new(16);
    let mut m = Match::default();
    assert!(!chain.insert_and_find_wider_match(buf, 17, 13, 25, 12, &mut m));
}
