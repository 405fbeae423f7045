//! Calendar-day ranges converted to epoch milliseconds.
//!
//! `--from` starts at 00:00:00.000 and `--to` ends at 23:59:59.999 in the
//! requested UTC offset, so both days are fully included.

use anyhow::{Context, Result, bail};
use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};

/// Parse `+09:00`, `-0530`, `+9`, `Z` or `UTC` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("zero offset");
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => bail!("invalid UTC offset '{raw}': expected +HH:MM or -HH:MM"),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => match (rest.get(..2), rest.get(2..)) {
            (Some(h), Some(m)) => (h, m),
            _ => bail!("invalid UTC offset '{raw}': bad hours"),
        },
        None => (rest, "0"),
    };
    let hours: i32 = hours
        .parse()
        .with_context(|| format!("invalid UTC offset '{raw}': bad hours"))?;
    let minutes: i32 = minutes
        .parse()
        .with_context(|| format!("invalid UTC offset '{raw}': bad minutes"))?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        bail!("invalid UTC offset '{raw}': out of range");
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("invalid UTC offset '{raw}'"))
}

/// Epoch-millisecond bounds for an inclusive day range.
///
/// Either end may be open. Fails when `from` is after `to`.
pub fn day_range_millis(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    offset: FixedOffset,
) -> Result<(Option<i64>, Option<i64>)> {
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        bail!("--from ({from}) must not be after --to ({to})");
    }

    let start_of_day = NaiveTime::from_hms_opt(0, 0, 0).context("start of day")?;
    let start = from
        .map(|day| local_millis(day, start_of_day, offset))
        .transpose()?;
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).context("end of day")?;
    let end = to
        .map(|day| local_millis(day, end_of_day, offset))
        .transpose()?;

    Ok((start, end))
}

fn local_millis(day: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Result<i64> {
    offset
        .from_local_datetime(&day.and_time(time))
        .single()
        .map(|dt| dt.timestamp_millis())
        .with_context(|| format!("{day} {time} does not exist at offset {offset}"))
}
