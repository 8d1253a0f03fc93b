//! Time-of-day and UTC-offset normalization.
//!
//! The lexed time converts to integer nanoseconds since local midnight —
//! fractions of an hour or minute scale through exactly and truncate
//! toward zero at the nanosecond. The zone resolves to signed nanoseconds,
//! and `utc = local - offset` folds across the day boundary at most once.
//! A written leap second (`:60`) may carry the value to a full day or past
//! it; that carry window survives this stage and is folded by the epoch
//! stage, after the zone rollover, so the two adjustments chain.

use crate::error::EpochError;
use crate::iso::IsoDate;
use crate::records::{Fraction, FractionalUnit, ParsedDateTime, TimeRecord, ZoneRecord};
use crate::{EpochResult, NS_PER_DAY, NS_PER_SECOND};

/// A date plus validated nanoseconds since UTC midnight.
///
/// `nanosecond_of_day` sits in `[0, NS_PER_DAY)` except for a pending
/// leap-second carry, which the epoch stage resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NormalizedDateTime {
    pub(crate) date: IsoDate,
    pub(crate) nanosecond_of_day: i64,
    pub(crate) fractional: bool,
}

/// Scales a written fraction to nanoseconds of its unit, truncating toward
/// zero at the ninth decimal of a second.
fn fraction_nanoseconds(fraction: Fraction, unit: FractionalUnit) -> i64 {
    let unit_nanos: u128 = match unit {
        FractionalUnit::Second => 1_000_000_000,
        FractionalUnit::Minute => 60_000_000_000,
        FractionalUnit::Hour => 3_600_000_000_000,
    };
    let scale = 10u128.pow(u32::from(fraction.len));
    (u128::from(fraction.digits) * unit_nanos / scale) as i64
}

/// Nanoseconds since local midnight for a validated time record.
fn local_nanoseconds(time: &TimeRecord, input: &str) -> EpochResult<i64> {
    if time.hour > 23 {
        return Err(EpochError::component("hour", time.hour, input));
    }
    let minute = time.minute.unwrap_or(0);
    if minute > 59 {
        return Err(EpochError::component("minute", minute, input));
    }
    let second = time.second.unwrap_or(0);
    if second > 60 {
        return Err(EpochError::component("second", second, input));
    }

    let whole =
        i64::from(time.hour) * 3600 + i64::from(minute) * 60 + i64::from(second);
    let fraction = time
        .fraction
        .map_or(0, |f| fraction_nanoseconds(f, time.unit));
    Ok(whole * NS_PER_SECOND + fraction)
}

/// Signed offset nanoseconds for the record's zone; 0 when absent or `Z`.
fn offset_nanoseconds(record: &ParsedDateTime<'_>) -> EpochResult<i64> {
    let Some(ZoneRecord::Offset(offset)) = record.zone else {
        return Ok(0);
    };

    let minutes = offset.minutes.unwrap_or(0);
    if minutes > 59 {
        return Err(EpochError::component(
            "timezone offset",
            offset.text,
            record.input,
        ));
    }
    let fraction = offset
        .fraction
        .map_or(0, |f| fraction_nanoseconds(f, FractionalUnit::Hour));
    let magnitude =
        (i64::from(offset.hours) * 3600 + i64::from(minutes) * 60) * NS_PER_SECOND + fraction;
    if magnitude >= NS_PER_DAY {
        return Err(EpochError::component(
            "timezone offset",
            offset.text,
            record.input,
        ));
    }
    Ok(i64::from(offset.sign) * magnitude)
}

/// Validates the time and zone and applies `utc = local - offset` with the
/// single-day rollover.
pub(crate) fn normalize_time(
    date: IsoDate,
    record: &ParsedDateTime<'_>,
) -> EpochResult<NormalizedDateTime> {
    let (local, has_fraction) = match &record.time {
        None => (0, false),
        Some(time) => (local_nanoseconds(time, record.input)?, time.fraction.is_some()),
    };
    let offset = offset_nanoseconds(record)?;

    let mut date = date;
    let mut utc = local - offset;
    // The leap second occupies [NS_PER_DAY, NS_PER_DAY + 1s); it is not a
    // zone artifact and is left for the epoch stage to fold.
    let upper = NS_PER_DAY + if record.leap_second { NS_PER_SECOND } else { 0 };
    if utc < 0 {
        utc += NS_PER_DAY;
        date = date.add_days(-1);
    } else if utc >= upper {
        utc -= NS_PER_DAY;
        date = date.add_days(1);
    }

    let fractional = has_fraction || utc % NS_PER_SECOND != 0;
    Ok(NormalizedDateTime {
        date,
        nanosecond_of_day: utc,
        fractional,
    })
}
