use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{TallyError, TimeInterval};

const DAY: i64 = 86_400;

/// The user-selected date range being charted.
///
/// A window is `duration_days` whole UTC days ending at the end of
/// `end_date` (exclusive upper bound at the following midnight). The
/// optional `selected_step` records a drill-down into one bucket of the
/// most recently loaded series, where index 0 is the newest bucket.
///
/// Windows validate on construction; a zero-length window indicates a
/// caller or routing bug and is rejected rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    duration_days: u32,
    end_date: NaiveDate,
    selected_step: Option<usize>,
}

impl DateWindow {
    /// Build a window of `duration_days` days ending on `end_date`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `duration_days` is zero.
    pub fn new(duration_days: u32, end_date: NaiveDate) -> Result<Self, TallyError> {
        if duration_days == 0 {
            return Err(TallyError::invalid_arg(
                "window duration must be at least one day",
            ));
        }
        Ok(Self {
            duration_days,
            end_date,
            selected_step: None,
        })
    }

    /// Carry a bucket drill-down with the window.
    #[must_use]
    pub const fn with_selected_step(mut self, step: Option<usize>) -> Self {
        self.selected_step = step;
        self
    }

    /// Window length in whole days.
    #[must_use]
    pub const fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// Last calendar day covered by the window.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Drill-down bucket index, if any (0 = newest bucket).
    #[must_use]
    pub const fn selected_step(&self) -> Option<usize> {
        self.selected_step
    }

    /// Exclusive upper bound: midnight UTC after `end_date`, in Unix seconds.
    #[must_use]
    pub fn end_time(&self) -> i64 {
        self.end_date.and_time(NaiveTime::MIN).and_utc().timestamp() + DAY
    }

    /// Inclusive lower bound in Unix seconds.
    #[must_use]
    pub fn start_time(&self) -> i64 {
        self.end_time() - i64::from(self.duration_days) * DAY
    }

    /// First calendar day covered by the window.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.end_date - chrono::Days::new(u64::from(self.duration_days) - 1)
    }

    /// Bucket width implied by the window length.
    #[must_use]
    pub const fn interval(&self) -> TimeInterval {
        TimeInterval::step_for(self.duration_days)
    }

    /// Whether `ts` falls inside the window (`start_time <= ts < end_time`).
    #[must_use]
    pub fn covers(&self, ts: i64) -> bool {
        self.start_time() <= ts && ts < self.end_time()
    }
}

/// Route/query-parameter encoding of a window and its drill-down.
///
/// This is the wire contract: `step` is `-1` when no bucket is selected.
/// Encoding and decoding round-trip exactly, so a params value can be
/// written to a URL, read back, and re-written without drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Window length in whole days.
    pub days: u32,
    /// Last calendar day covered by the window.
    pub end: NaiveDate,
    /// Selected bucket index, or `-1` for "no selection".
    pub step: i64,
}

impl WindowParams {
    /// Encode as a query fragment, e.g. `days=7&end=2026-08-05&step=-1`.
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("days={}&end={}&step={}", self.days, self.end, self.step)
    }

    /// Decode from a query fragment produced by [`WindowParams::to_query`].
    ///
    /// Unknown keys are ignored; `step` defaults to `-1` when absent.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `days` or `end` are missing or malformed.
    pub fn from_query(query: &str) -> Result<Self, TallyError> {
        let mut days: Option<u32> = None;
        let mut end: Option<NaiveDate> = None;
        let mut step: i64 = -1;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(TallyError::invalid_arg(format!(
                    "malformed query pair: {pair}"
                )));
            };
            match key {
                "days" => {
                    days = Some(value.parse().map_err(|_| {
                        TallyError::invalid_arg(format!("bad days value: {value}"))
                    })?);
                }
                "end" => {
                    end = Some(value.parse().map_err(|_| {
                        TallyError::invalid_arg(format!("bad end date: {value}"))
                    })?);
                }
                "step" => {
                    step = value.parse().map_err(|_| {
                        TallyError::invalid_arg(format!("bad step value: {value}"))
                    })?;
                }
                _ => {}
            }
        }
        let days = days.ok_or_else(|| TallyError::invalid_arg("missing days parameter"))?;
        let end = end.ok_or_else(|| TallyError::invalid_arg("missing end parameter"))?;
        Ok(Self { days, end, step })
    }
}

impl From<DateWindow> for WindowParams {
    fn from(w: DateWindow) -> Self {
        Self {
            days: w.duration_days(),
            end: w.end_date(),
            step: w
                .selected_step()
                .and_then(|s| i64::try_from(s).ok())
                .unwrap_or(-1),
        }
    }
}

impl TryFrom<WindowParams> for DateWindow {
    type Error = TallyError;

    fn try_from(p: WindowParams) -> Result<Self, Self::Error> {
        let step = usize::try_from(p.step).ok();
        Ok(Self::new(p.days, p.end)?.with_selected_step(step))
    }
}
