use chrono::{DateTime, Duration, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Half-open `[start, end)` UTC interval covering one calendar day in the
/// configured timezone. The one-response-per-day rule is defined against
/// this window, so two submissions count as the same day exactly when
/// their local dates match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The local day containing `moment`. On DST transition days the
    /// local midnight may be skipped or ambiguous; we take the earliest
    /// valid instant, which matches how the day is experienced.
    pub fn containing(moment: DateTime<Utc>, timezone: Tz) -> Self {
        let local_date = moment.with_timezone(&timezone).date_naive();
        let start = local_midnight(local_date, timezone);
        let end = local_midnight(local_date + Duration::days(1), timezone);
        debug!(%start, %end, %timezone, "resolved day window");
        Self { start, end }
    }

    pub fn contains(&self, moment: DateTime<Utc>) -> bool {
        self.start <= moment && moment < self.end
    }
}

fn local_midnight(date: chrono::NaiveDate, timezone: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match timezone.from_local_datetime(&midnight) {
        LocalResult::Single(instant) | LocalResult::Ambiguous(instant, _) => {
            instant.with_timezone(&Utc)
        }
        // Midnight was skipped by a forward DST jump; the day starts at
        // the first instant after the gap.
        LocalResult::None => {
            let mut probe = midnight;
            loop {
                probe += Duration::minutes(15);
                if let Some(instant) = timezone.from_local_datetime(&probe).earliest() {
                    return instant.with_timezone(&Utc);
                }
            }
        }
    }
}
