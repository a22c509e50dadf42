//! Wall-clock expiry behavior with real (short) TTLs.

use std::time::Duration;

use modkit_cache::TimedCache;

const TTL: Duration = Duration::from_millis(100);
const PAST_TTL: Duration = Duration::from_millis(150);

#[test]
fn entry_survives_within_the_window() {
    let mut cache = TimedCache::new(TTL);
    cache.insert("a", 1);
    assert_eq!(cache.get("a"), Some(&1));
}

#[test]
fn entry_expires_after_the_window() {
    let mut cache = TimedCache::new(TTL);
    cache.insert("a", 1);
    std::thread::sleep(PAST_TTL);
    assert_eq!(cache.get("a"), None);
}

#[test]
fn len_reports_stale_entries_until_accessed() {
    let mut cache = TimedCache::new(TTL);
    cache.insert("a", 1);
    std::thread::sleep(PAST_TTL);
    // No access has happened yet, so the stale entry still counts.
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.len(), 0);
}

#[test]
fn ttl_is_write_time_not_sliding() {
    let mut cache = TimedCache::new(TTL);
    cache.insert("a", 1);
    // Repeated reads must not push the deadline out.
    for _ in 0..3 {
        std::thread::sleep(Duration::from_millis(40));
        let _ = cache.get("a");
    }
    assert_eq!(cache.get("a"), None);
}

#[test]
fn get_or_compute_recomputes_after_the_window() {
    let mut cache = TimedCache::new(TTL);
    let mut calls = 0;
    cache.get_or_compute("k", || {
        calls += 1;
        1
    });
    std::thread::sleep(PAST_TTL);
    cache.get_or_compute("k", || {
        calls += 1;
        2
    });
    assert_eq!(calls, 2);
    assert_eq!(cache.get("k"), Some(&2));
}

#[test]
fn overwrite_restarts_the_window() {
    let mut cache = TimedCache::new(Duration::from_millis(300));
    cache.insert("a", 1);
    std::thread::sleep(Duration::from_millis(200));
    cache.insert("a", 2);
    std::thread::sleep(Duration::from_millis(200));
    // 400ms after the first write but only 200ms after the overwrite.
    assert_eq!(cache.get("a"), Some(&2));
}

#[test]
fn remove_is_immediate_within_the_window() {
    let mut cache = TimedCache::new(TTL);
    cache.insert("a", 1);
    assert_eq!(cache.remove("a"), Some(1));
    assert_eq!(cache.get("a"), None);
}
