// Copyright 2026 Sqlfold Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Date/time field extraction
//!
//! Datetime scalars are int64 epoch seconds interpreted on the UTC
//! calendar. TIMEZONE_HOUR and TIMEZONE_MINUTE are always 0.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::ast::ExtractField;
use crate::core::{Error, Result};

fn datetime(epoch_seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(epoch_seconds, 0)
        .ok_or_else(|| Error::invalid_argument(format!("timestamp out of range: {}", epoch_seconds)))
}

/// Extract a calendar field from an epoch-seconds datetime scalar
pub fn extract(field: ExtractField, epoch_seconds: i64) -> Result<i64> {
    // timezone fields never touch the calendar
    match field {
        ExtractField::TimezoneHour | ExtractField::TimezoneMinute => return Ok(0),
        _ => {}
    }

    let ts = datetime(epoch_seconds)?;
    let result = match field {
        ExtractField::Century => ts.year() as i64 / 100,
        ExtractField::Year => ts.year() as i64,
        ExtractField::Quarter => ((ts.month() - 1) / 3 + 1) as i64,
        ExtractField::Month => ts.month() as i64,
        ExtractField::Week => ts.iso_week().week() as i64,
        ExtractField::Day | ExtractField::DayOfMonth => ts.day() as i64,
        // ISO numbering, 1 = Monday .. 7 = Sunday
        ExtractField::DayOfWeek | ExtractField::Dow => {
            ts.weekday().num_days_from_monday() as i64 + 1
        }
        ExtractField::DayOfYear | ExtractField::Doy => ts.ordinal() as i64,
        ExtractField::Hour => ts.hour() as i64,
        ExtractField::Minute => ts.minute() as i64,
        ExtractField::Second => ts.second() as i64,
        ExtractField::TimezoneHour | ExtractField::TimezoneMinute => 0,
    };
    Ok(result)
}
