/*
 * Copyright (c) 2020-2022, Stalwart Labs Ltd.
 *
 * This file is part of the Stalwart EWS Server.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of
 * the License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 * in the LICENSE file at the top-level directory of this distribution.
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 *
 * You can be released from the requirements of the AGPLv3 license by
 * purchasing a commercial license. Please contact licensing@stalw.art
 * for more details.
*/

use store::chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use crate::types::recurrence::{Recurrence, RecurrencePattern, RecurrenceRange};

struct Collector {
    dates: Vec<NaiveDate>,
    limit: usize,
    end_date: Option<NaiveDate>,
}

impl Collector {
    /// Returns `false` once no further dates are accepted.
    fn push(&mut self, date: NaiveDate) -> bool {
        if self.dates.len() >= self.limit || self.end_date.map_or(false, |end| date > end) {
            return false;
        }
        self.dates.push(date);
        self.dates.len() < self.limit
    }
}

/// Original start times of every occurrence of a series whose first
/// instance starts at `first_start`, capped at `max` occurrences.
pub fn expand(recurrence: &Recurrence, first_start: DateTime<Utc>, max: usize) -> Vec<DateTime<Utc>> {
    let range_start = recurrence.range.start_date();
    let mut collector = Collector {
        dates: Vec::new(),
        limit: match &recurrence.range {
            RecurrenceRange::Numbered {
                number_of_occurrences,
                ..
            } => (*number_of_occurrences as usize).min(max),
            RecurrenceRange::NoEnd { .. } | RecurrenceRange::EndDate { .. } => max,
        },
        end_date: match &recurrence.range {
            RecurrenceRange::EndDate { end_date, .. } => Some(*end_date),
            _ => None,
        },
    };
    if collector.limit == 0 {
        return Vec::new();
    }

    match &recurrence.pattern {
        RecurrencePattern::Daily { interval } => {
            expand_daily(&mut collector, range_start, *interval)
        }
        RecurrencePattern::Weekly {
            interval,
            days_of_week,
        } => {
            let mut days = days_of_week
                .iter()
                .map(|day| Weekday::from(*day).num_days_from_sunday())
                .collect::<Vec<_>>();
            days.sort_unstable();
            days.dedup();
            expand_weekly(&mut collector, range_start, *interval, &days)
        }
        RecurrencePattern::AbsoluteMonthly {
            interval,
            day_of_month,
        } => expand_monthly(&mut collector, range_start, *interval, *day_of_month),
    }

    let time = first_start.naive_utc().time();
    collector
        .dates
        .into_iter()
        .map(|date| at_time(date, time))
        .collect()
}

fn at_time(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(time))
}

fn expand_daily(collector: &mut Collector, range_start: NaiveDate, interval: u32) {
    let step = Duration::days(interval.max(1) as i64);
    let mut date = range_start;
    while collector.push(date) {
        date = match date.checked_add_signed(step) {
            Some(date) => date,
            None => break,
        };
    }
}

fn expand_weekly(collector: &mut Collector, range_start: NaiveDate, interval: u32, days: &[u32]) {
    if days.is_empty() {
        return;
    }

    let step = Duration::weeks(interval.max(1) as i64);
    let mut week_start = match range_start.checked_sub_signed(Duration::days(
        range_start.weekday().num_days_from_sunday() as i64,
    )) {
        Some(date) => date,
        None => return,
    };

    loop {
        for offset in days {
            let date = match week_start.checked_add_signed(Duration::days(*offset as i64)) {
                Some(date) => date,
                None => return,
            };
            if date >= range_start && !collector.push(date) {
                return;
            }
        }
        week_start = match week_start.checked_add_signed(step) {
            Some(date) => date,
            None => return,
        };
    }
}

fn expand_monthly(
    collector: &mut Collector,
    range_start: NaiveDate,
    interval: u32,
    day_of_month: u32,
) {
    let interval = interval.max(1);
    let (mut year, mut month) = (range_start.year(), range_start.month());

    loop {
        let date = match NaiveDate::from_ymd_opt(
            year,
            month,
            day_of_month.clamp(1, days_in_month(year, month)),
        ) {
            Some(date) => date,
            None => return,
        };
        if date >= range_start && !collector.push(date) {
            return;
        }

        month += interval;
        while month > 12 {
            month -= 12;
            year += 1;
        }
        if year > 9999 {
            return;
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|date| date.pred_opt())
        .map(|date| date.day())
        .unwrap_or(28)
}
