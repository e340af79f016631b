use super::*;

#[test]
fn default_clock_advances_one_millisecond_per_sequence() {
    let clock = DeterministicClock::default();

    let first = clock.timestamp_for(1);
    let second = clock.timestamp_for(2);

    assert_eq!(first.to_rfc3339(), "2024-01-01T00:00:00.001+00:00");
    assert_eq!((second - first).num_milliseconds(), 1);
}

#[test]
fn custom_step_scales_with_sequence() {
    let base = Utc
        .with_ymd_and_hms(2020, 6, 1, 12, 0, 0)
        .single()
        .unwrap();
    let clock = DeterministicClock::new(base, 250);

    assert_eq!(clock.timestamp_for(4), base + Duration::milliseconds(1000));
}

#[test]
fn same_sequence_is_reproducible() {
    let clock = DeterministicClock::default();
    assert_eq!(clock.timestamp_for(7), clock.timestamp_for(7));
}
