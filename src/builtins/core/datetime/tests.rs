use core::cmp::Ordering;

use alloc::format;
use writeable::assert_writeable_eq;

use crate::{
    construct::PositionalDateTime,
    error::ErrorKind,
    host::test_hosts::{CentralEuropeHost, FALL_BACK, SPRING_FORWARD},
    partial::{PartialDate, PartialDateTime, PartialTime, PartialTimeDelta},
    Date, FixedHostSystem, Instant, Time, TimeDelta, MS_PER_HOUR,
};

use super::{Anchor, DateTime};

const NOW: i64 = 1_583_125_567_008;

fn hosts() -> [FixedHostSystem; 4] {
    [
        FixedHostSystem::new(NOW, 0),
        FixedHostSystem::new(NOW, 9 * MS_PER_HOUR),
        FixedHostSystem::new(NOW, -5 * MS_PER_HOUR),
        FixedHostSystem::new(NOW, 5 * MS_PER_HOUR + 30 * 60_000),
    ]
}

#[test]
fn projections_round_trip() {
    let cases = [
        (2020, 3, 2, 5, 6, 7, 8),
        (2020, 2, 29, 23, 59, 59, 999),
        (1969, 12, 31, 0, 0, 0, 0),
        (1, 1, 1, 12, 0, 0, 0),
    ];
    for (y, mo, d, h, mi, s, ms) in cases {
        let dt = DateTime::from_components(y, mo, d, h, mi, s, ms);
        let date = dt.date();
        let time = dt.time();
        assert_eq!((date.year(), date.month(), date.day()), (y, mo, d));
        assert_eq!(
            (time.hour(), time.minute(), time.second(), time.millisecond()),
            (h, mi, s, ms)
        );
    }
}

#[test]
fn instant_round_trip() {
    for host in hosts() {
        for ms in [0, NOW, -1, -62_135_596_800_000, 8_640_000_000_000_000 - MS_PER_HOUR * 12] {
            let dt = DateTime::new_with_host(Instant::try_new(ms).unwrap(), &host).unwrap();
            assert_eq!(dt.anchor(), Anchor::Local);
            assert_eq!(dt.epoch_milliseconds_with_host(&host), Ok(ms));
        }
    }

    let host = CentralEuropeHost { now: NOW };
    // The repeated hour at FALL_BACK resolves to its first occurrence.
    for ms in [SPRING_FORWARD - 1, SPRING_FORWARD, FALL_BACK - 1, FALL_BACK + MS_PER_HOUR] {
        let dt = DateTime::from_epoch_milliseconds_with_host(ms, &host).unwrap();
        assert_eq!(dt.epoch_milliseconds_with_host(&host), Ok(ms));
    }
}

#[test]
fn lone_number_is_epoch_milliseconds() {
    let host = FixedHostSystem::new(NOW, 0);
    let dt = DateTime::new_with_host(2020_i64, &host).unwrap();
    assert_eq!(dt, DateTime::from_components(1970, 1, 1, 0, 0, 2, 20));

    let dt = DateTime::new_with_host(NOW, &host).unwrap();
    assert_eq!(dt, DateTime::from_components(2020, 3, 2, 5, 6, 7, 8));

    // A month or a day makes the year a year.
    let dt = DateTime::new_with_host(
        PositionalDateTime {
            year: 2020,
            month: Some(3),
            ..Default::default()
        },
        &host,
    )
    .unwrap();
    assert_eq!(dt, DateTime::from_components(2020, 3, 1, 0, 0, 0, 0));

    assert_eq!(
        DateTime::new_with_host(i64::MAX, &host).unwrap_err().kind(),
        ErrorKind::Range
    );
}

#[test]
fn copy_sources() {
    let host = FixedHostSystem::new(NOW, 0);
    let utc = DateTime::from_components_utc(2020, 3, 2, 5, 6, 7, 8);
    assert_eq!(DateTime::new_with_host(utc, &host), Ok(utc));
    assert_eq!(DateTime::copy_from(utc), utc);

    let from_date = DateTime::new_with_host(Date::new(2020, 3, 2), &host).unwrap();
    assert_eq!(from_date, DateTime::from_components(2020, 3, 2, 0, 0, 0, 0));
    assert_eq!(DateTime::copy_from(Date::new(2020, 3, 2)), from_date);
}

#[test]
fn from_partial() {
    let partial = PartialDateTime::new()
        .with_year(Some(2020))
        .with_month(Some(3))
        .with_hour(Some(5));
    assert_eq!(
        DateTime::from_partial(partial),
        Ok(DateTime::from_components(2020, 3, 1, 5, 0, 0, 0))
    );

    let partial = PartialDateTime::new()
        .with_date(PartialDate::new().with_year(Some(2020)).with_month(Some(3)))
        .with_time(PartialTime::new().with_minute(Some(30)));
    assert_eq!(
        DateTime::from_partial(partial),
        Ok(DateTime::from_components(2020, 3, 1, 0, 30, 0, 0))
    );

    let err = DateTime::from_partial(PartialDateTime::new().with_year(Some(2020))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(PartialDateTime::new().is_empty());
}

#[test]
fn minus_days() {
    for host in hosts() {
        let dt = DateTime::from_components(2020, 3, 12, 0, 0, 0, 0);
        assert_eq!(
            dt.minus_with_host(&TimeDelta::new(3, 0, 0, 0, 0, 0), &host),
            Ok(DateTime::from_components(2020, 3, 9, 0, 0, 0, 0))
        );
    }
}

#[test]
fn minus_mixed_units() {
    for host in hosts() {
        let dt = DateTime::from_components(2020, 3, 12, 10, 10, 10, 10);
        assert_eq!(
            dt.minus_with_host(&TimeDelta::new(1, 2, 3, 4, 5, 0), &host),
            Ok(DateTime::from_components(2020, 3, 11, 5, 6, 8, 7))
        );
    }
}

#[test]
fn minus_weeks_record() {
    let host = FixedHostSystem::new(NOW, -5 * MS_PER_HOUR);
    let dt = DateTime::from_components(2020, 3, 15, 0, 0, 0, 0);
    let delta = TimeDelta::from_partial(PartialTimeDelta::new().with_weeks(Some(2)));
    assert_eq!(
        dt.minus_with_host(&delta, &host),
        Ok(DateTime::from_components(2020, 3, 1, 0, 0, 0, 0))
    );
    assert_eq!(
        dt.plus_with_host(&delta, &host),
        Ok(DateTime::from_components(2020, 3, 29, 0, 0, 0, 0))
    );
}

#[test]
fn arithmetic_keeps_the_anchor() {
    let host = FixedHostSystem::new(NOW, 9 * MS_PER_HOUR);
    let utc = DateTime::from_components_utc(2020, 3, 2, 23, 0, 0, 0);
    assert_eq!(
        utc.plus_with_host(&TimeDelta::from_hours(2), &host),
        Ok(DateTime::from_components_utc(2020, 3, 3, 1, 0, 0, 0))
    );
    assert!(DateTime::from_components(275_760, 9, 13, 0, 0, 0, 0)
        .plus_with_host(&TimeDelta::from_days(1), &host)
        .is_err());
}

#[test]
fn arithmetic_across_a_transition() {
    let host = CentralEuropeHost { now: NOW };
    let dt = DateTime::from_components(2020, 3, 29, 1, 30, 0, 0);
    assert_eq!(
        dt.plus_with_host(&TimeDelta::from_hours(1), &host),
        Ok(DateTime::from_components(2020, 3, 29, 3, 30, 0, 0))
    );
    let dt = DateTime::from_components(2020, 10, 25, 2, 30, 0, 0);
    assert_eq!(
        dt.plus_with_host(&TimeDelta::from_hours(1), &host),
        Ok(DateTime::from_components(2020, 10, 25, 2, 30, 0, 0))
    );
}

#[test]
fn datetime_minus_date() {
    for host in hosts() {
        let since = DateTime::from_components(2020, 1, 11, 12, 0, 0, 0)
            .since_with_host(&Date::new(2020, 1, 1), &host)
            .unwrap();
        let expected = TimeDelta::from_partial(
            PartialTimeDelta::new()
                .with_days(Some(10))
                .with_hours(Some(12)),
        );
        assert_eq!(since, expected);
        assert_eq!(since.total_milliseconds(), expected.total_milliseconds());
    }
}

#[test]
fn str_forms() {
    for host in hosts() {
        let dt = DateTime::from_components(2020, 3, 2, 5, 6, 7, 8);
        assert_eq!(
            dt.str_with_host(&host).unwrap(),
            "2020-03-02 05:06:07.008000"
        );
        assert_writeable_eq!(dt, "2020-03-02 05:06:07.008000");
    }
    assert_writeable_eq!(
        DateTime::from_components(2020, 2, 30, 24, 0, 0, 0),
        "2020-03-02 00:00:00.000000"
    );
}

#[test]
fn text_form_of_fields_beyond_the_instant_range() {
    assert_writeable_eq!(
        DateTime::from_components(2_000_000_000, 1, 1, 0, 0, 0, -1),
        "+1999999999-12-31 23:59:59.999000"
    );
    assert_writeable_eq!(
        DateTime::from_components(2_000_000_000, 1, 1, 0, 0, 0, 5_000),
        "+2000000000-01-01 00:00:05.000000"
    );
    assert_writeable_eq!(
        DateTime::from_components(i32::MAX, 13, 1, 0, 0, 0, -1),
        "+2147483647-12-31 23:59:59.999000"
    );
    // Balancing would leave the i32 year range, so the stored fields are
    // written as signed numbers.
    assert_writeable_eq!(
        DateTime::from_components(i32::MAX, 13, 2, 0, 0, 0, -1),
        "+2147483647-13-02 00:00:00.-001000"
    );
    assert!(DateTime::from_components(2_000_000_000, 1, 1, 0, 0, 0, 0)
        .str_with_host(&())
        .is_err());
}

#[test]
fn str_of_utc_values_renders_utc_fields() {
    // UTC anchored values render their UTC fields, not the host's local
    // reading of the same instant.
    let host = FixedHostSystem::new(NOW, 9 * MS_PER_HOUR);
    let utc = DateTime::from_components_utc(2020, 3, 2, 5, 6, 7, 8);
    assert_eq!(
        utc.str_with_host(&host).unwrap(),
        "2020-03-02 05:06:07.008000"
    );
    assert_eq!(
        utc.with_anchor(Anchor::Local)
            .str_with_host(&host)
            .unwrap(),
        "2020-03-02 05:06:07.008000"
    );
    let instant = utc.to_instant_with_host(&host).unwrap();
    let local_reading = DateTime::from_instant_with_host(instant, &host).unwrap();
    assert_eq!(
        local_reading.str_with_host(&host).unwrap(),
        "2020-03-02 14:06:07.008000"
    );
}

#[test]
fn strftime() {
    let host = FixedHostSystem::new(NOW, 0);
    let dt = DateTime::from_components(2020, 3, 2, 17, 6, 7, 8);
    assert_eq!(
        dt.strftime_with_host("%A %d %B %Y %I:%M %p (%j)", &host).unwrap(),
        "Monday 02 March 2020 05:06 PM (062)"
    );
}

#[test]
fn strptime_utc_is_independent_of_the_host() {
    let parsed = DateTime::strptime("2020-04-12", "%Y-%m-%d", Anchor::Utc).unwrap();
    assert!(parsed.is_utc());
    for host in hosts() {
        let utc = DateTime::utc_with_host(parsed, &host).unwrap();
        let date = utc.date();
        assert_eq!((date.year(), date.month(), date.day()), (2020, 4, 12));
    }
}

#[test]
fn strptime_local() {
    let parsed =
        DateTime::strptime("2020-04-12 10:30", "%Y-%m-%d %H:%M", Anchor::Local).unwrap();
    assert_eq!(parsed, DateTime::from_components(2020, 4, 12, 10, 30, 0, 0));
    let host = FixedHostSystem::new(NOW, 2 * MS_PER_HOUR);
    let utc = DateTime::utc_with_host(parsed, &host).unwrap();
    assert_eq!(utc, DateTime::from_components_utc(2020, 4, 12, 8, 30, 0, 0));
}

#[test]
fn strptime_mismatch() {
    let err = DateTime::strptime("bogus", "%Y-%m-%d", Anchor::Local).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    let mismatch = err.format_mismatch_details().unwrap();
    assert_eq!(mismatch.text(), "bogus");
    assert_eq!(mismatch.pattern(), "%Y-%m-%d");
    assert!(err.message().contains("bogus"));
    assert!(err.message().contains("%Y-%m-%d"));
}

#[test]
fn utc_sources() {
    let host = FixedHostSystem::new(NOW, -5 * MS_PER_HOUR);
    let expected = DateTime::from_components_utc(2020, 3, 2, 5, 6, 7, 8);
    assert_eq!(DateTime::utc_with_host(NOW, &host), Ok(expected));
    assert_eq!(
        DateTime::utc_with_host(Instant::try_new(NOW).unwrap(), &host),
        Ok(expected)
    );
    assert_eq!(DateTime::utc_from_epoch_milliseconds(NOW), Ok(expected));
    let local = DateTime::from_components(2020, 3, 2, 0, 6, 7, 8);
    assert_eq!(DateTime::utc_with_host(local, &host), Ok(expected));
    assert!(DateTime::utc_with_host(i64::MIN, &host).is_err());
}

#[test]
fn now() {
    let host = FixedHostSystem::new(NOW, 9 * MS_PER_HOUR);
    assert_eq!(
        DateTime::now_with_host(&host),
        Ok(DateTime::from_components(2020, 3, 2, 14, 6, 7, 8))
    );
}

#[test]
fn combine() {
    let date_part = DateTime::from_components_utc(2020, 3, 2, 5, 6, 7, 8);
    let combined = DateTime::combine(date_part, Time::new(23, 0, 0, 1));
    assert_eq!(combined, DateTime::from_components_utc(2020, 3, 2, 23, 0, 0, 1));

    let combined = DateTime::combine(Date::new(2020, 3, 2), Time::new(1, 2, 3, 4));
    assert_eq!(combined, DateTime::from_components(2020, 3, 2, 1, 2, 3, 4));

    let host = FixedHostSystem::new(NOW, 0);
    let combined = DateTime::combine_with_host(NOW, Time::default(), &host);
    assert_eq!(combined, Ok(DateTime::from_components(2020, 3, 2, 0, 0, 0, 0)));
}

#[test]
fn replace() {
    let dt = DateTime::from_components_utc(2020, 3, 2, 5, 6, 7, 8);
    let replaced = dt.replace(
        PartialDateTime::new()
            .with_month(Some(12))
            .with_hour(Some(0)),
    );
    assert_eq!(replaced, DateTime::from_components_utc(2020, 12, 2, 0, 6, 7, 8));
    assert_eq!(dt.replace(PartialDateTime::new()), dt);
    assert_eq!(
        dt.replace((Some(2021), None, Some(0))),
        DateTime::from_components_utc(2021, 3, 0, 5, 6, 7, 8)
    );
    assert_eq!(
        dt.replace((None, None, None, Some(1), None, None, Some(0))),
        DateTime::from_components_utc(2020, 3, 2, 1, 6, 7, 0)
    );
    assert_eq!(dt.replace((Some(1999),)).year(), 1999);
    let rebuilt = DateTime::from_partial(dt.to_partial()).unwrap();
    assert_eq!(rebuilt.with_anchor(Anchor::Utc), dt);
}

#[test]
fn weekdays() {
    let dt = DateTime::from_components(2020, 3, 2, 23, 0, 0, 0);
    assert_eq!(dt.weekday(), 0);
    assert_eq!(dt.isoweekday(), 1);
}

#[test]
fn comparison_by_instant() {
    let host = FixedHostSystem::new(NOW, 9 * MS_PER_HOUR);
    let local = DateTime::from_components(2020, 3, 2, 14, 0, 0, 0);
    let utc = DateTime::from_components_utc(2020, 3, 2, 5, 0, 0, 0);
    assert_ne!(local, utc);
    assert_eq!(local.eq_with_host(&utc, &host), Ok(true));
    assert_eq!(
        DateTime::from_components(2020, 3, 2, 13, 0, 0, 0).cmp_with_host(&utc, &host),
        Ok(Ordering::Less)
    );
}

#[test]
fn normalized() {
    let host = CentralEuropeHost { now: NOW };
    let dt = DateTime::from_components(2020, 3, 29, 2, 30, 0, 0);
    assert_eq!(
        dt.normalized_with_host(&host),
        Ok(DateTime::from_components(2020, 3, 29, 3, 30, 0, 0))
    );
    let carried = DateTime::from_components_utc(2020, 12, 31, 24, 0, 0, 0);
    assert_eq!(
        carried.normalized_with_host(&host),
        Ok(DateTime::from_components_utc(2021, 1, 1, 0, 0, 0, 0))
    );
}

#[test]
fn absent_and_zero_days() {
    let host = FixedHostSystem::new(NOW, 0);
    let dt = DateTime::new_with_host((2020, 3, 0), &host).unwrap();
    assert_eq!(dt.day(), 0);
    assert_eq!(dt.date(), Date::new(2020, 2, 29));
}
