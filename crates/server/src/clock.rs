// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Where handlers get "now" and "today" from.

use chrono_tz::Tz;
use fairway::ApplyContext;
use fairway_domain::{DomainError, local_date};
use time::OffsetDateTime;

/// The clock every command and status refresh runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// The system clock, with "today" taken in the club's time zone.
    System(Tz),
    /// A frozen instant.
    Fixed(ApplyContext),
}

impl Clock {
    /// Reads the clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the local date cannot be represented.
    pub fn context(&self) -> Result<ApplyContext, DomainError> {
        match self {
            Self::System(tz) => {
                let today = local_date(chrono::Utc::now(), *tz)?;
                Ok(ApplyContext::new(today, OffsetDateTime::now_utc()))
            }
            Self::Fixed(ctx) => Ok(*ctx),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_fixed_clock_never_moves() {
        let ctx: ApplyContext =
            ApplyContext::new(date!(2026 - 05 - 02), datetime!(2026-05-02 14:30 UTC));
        let clock: Clock = Clock::Fixed(ctx);

        assert_eq!(clock.context().unwrap(), ctx);
        assert_eq!(clock.context().unwrap(), ctx);
    }

    #[test]
    fn test_system_clock_today_is_within_a_day_of_utc() {
        let clock: Clock = Clock::System(chrono_tz::Pacific::Kiritimati);

        let ctx: ApplyContext = clock.context().unwrap();

        let utc_today: time::Date = ctx.now.date();
        let gap: i64 = (ctx.today - utc_today).whole_days().abs();
        assert!(gap <= 1);
    }
}
