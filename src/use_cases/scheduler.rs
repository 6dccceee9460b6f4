// Daily sweep of the inhibit table at a fixed local time of day.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone};

use crate::use_cases::inhibitor::Inhibitor;

/// Next instant strictly after `now` whose local wall-clock time is `at`.
///
/// Local times skipped by a DST jump move on to the following day; repeated
/// local times resolve to their earliest instant.
pub fn next_occurrence<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> DateTime<Tz> {
    let timezone = now.timezone();
    let mut day = now.date_naive();

    for _ in 0..3 {
        if let Some(candidate) = timezone.from_local_datetime(&day.and_time(at)).earliest() {
            if candidate > *now {
                return candidate;
            }
        }
        let Some(next_day) = day.succ_opt() else {
            break;
        };
        day = next_day;
    }

    now.clone() + TimeDelta::days(1)
}

// Runs for the lifetime of the process. A fire time missed while the
// process was down is not caught up.
pub async fn daily_clear_task(inhibitor: Arc<Inhibitor>, at: NaiveTime) {
    clear_daily(&inhibitor, at, Local::now).await;
}

/// Sweep loop driven by an injected wall clock.
pub async fn clear_daily<Tz, F>(inhibitor: &Inhibitor, at: NaiveTime, now: F)
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    F: Fn() -> DateTime<Tz>,
{
    loop {
        let wait = wait_until_next(now(), at);
        sweep_after(inhibitor, wait).await;
    }
}

/// Sleeps for `wait`, then wipes the table. Returns how many records were dropped.
pub async fn sweep_after(inhibitor: &Inhibitor, wait: Duration) -> usize {
    tokio::time::sleep(wait).await;

    let cleared = inhibitor.clear_all().await;
    tracing::info!(cleared, "daily inhibit sweep cleared table.");
    cleared
}

fn wait_until_next<Tz>(now: DateTime<Tz>, at: NaiveTime) -> Duration
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let next_run = next_occurrence(&now, at);
    tracing::debug!(next_run = %next_run, "inhibit sweep scheduled.");
    next_run
        .signed_duration_since(now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}
