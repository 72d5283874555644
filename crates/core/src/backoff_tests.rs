// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    first  = { 1, 2 },
    second = { 2, 4 },
    third  = { 3, 8 },
    fourth = { 4, 16 },
    fifth  = { 5, 32 },
)]
fn default_delays_double(retry: u32, secs: u64) {
    assert_eq!(Backoff::default().delay(retry), Duration::from_secs(secs));
}

#[test]
fn custom_base_scales_every_delay() {
    let backoff = Backoff::with_base(Duration::from_millis(10));
    assert_eq!(backoff.delay(1), Duration::from_millis(20));
    assert_eq!(backoff.delay(3), Duration::from_millis(80));
}

#[test]
fn clamps_to_max() {
    let backoff = Backoff {
        base: Duration::from_secs(1),
        max: Duration::from_secs(10),
    };
    assert_eq!(backoff.delay(3), Duration::from_secs(8));
    assert_eq!(backoff.delay(4), Duration::from_secs(10));
}

#[test]
fn huge_retry_numbers_do_not_overflow() {
    let backoff = Backoff::default();
    assert_eq!(backoff.delay(200), backoff.max);
}
