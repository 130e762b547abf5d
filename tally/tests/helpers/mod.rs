#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{Days, Utc};
use rust_decimal::Decimal;
use tally::{ChartEvents, DateWindow, SelectedStep, TimeDescendingSeries, UsageChart};
use tally_core::{CostData, Sample};
use tally_mock::{MockController, MockLoader};

pub const DAY: i64 = 86_400;

/// One observed chart callback, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Window { start: i64, end: i64 },
    Data(TimeDescendingSeries<CostData>),
    Step(Option<SelectedStep>),
}

/// Event sink that records every callback for later assertions.
#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<Event>>,
}

impl RecordingEvents {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn data_events(&self) -> Vec<TimeDescendingSeries<CostData>> {
        self.snapshot()
            .into_iter()
            .filter_map(|e| match e {
                Event::Data(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn step_events(&self) -> Vec<Option<SelectedStep>> {
        self.snapshot()
            .into_iter()
            .filter_map(|e| match e {
                Event::Step(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl ChartEvents<CostData> for RecordingEvents {
    fn on_window_selected(&self, start: i64, end: i64, _window: &DateWindow) {
        self.events.lock().unwrap().push(Event::Window { start, end });
    }

    fn on_data_loaded(&self, series: TimeDescendingSeries<CostData>) {
        self.events.lock().unwrap().push(Event::Data(series));
    }

    fn on_step_selected(&self, selection: Option<SelectedStep>) {
        self.events.lock().unwrap().push(Event::Step(selection));
    }
}

/// A window safely in the past, so no live fetch or ticker ever triggers.
pub fn past_window(days: u32) -> DateWindow {
    let end = Utc::now().date_naive() - Days::new(40);
    DateWindow::new(days, end).unwrap()
}

/// Contiguous daily buckets filling the newest `count` buckets of `window`.
pub fn daily_series(window: &DateWindow, count: usize, value: i64) -> Vec<Sample<CostData>> {
    let newest = window.end_time() - DAY;
    (0..count as i64)
        .map(|k| Sample::new(newest - k * DAY, CostData::new(Decimal::from(value))))
        .collect()
}

/// Chart + controller + recorder over a scripted mock loader.
pub fn scripted_chart() -> (
    UsageChart<CostData>,
    MockController<CostData>,
    Arc<RecordingEvents>,
) {
    let (loader, ctrl) = MockLoader::<CostData>::scripted();
    let recorder = RecordingEvents::new();
    let chart = UsageChart::<CostData>::builder()
        .with_loader(loader)
        .events(recorder.clone())
        .build()
        .unwrap();
    (chart, ctrl, recorder)
}
