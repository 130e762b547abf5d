use std::time::Duration;

use crate::helpers::{Event, daily_series, past_window, scripted_chart};
use tally_mock::{MockBehavior, RequestClass};

/// A fetch resolving after `dispose()` must be a no-op: no state update, no
/// callback, no error.
#[tokio::test]
async fn in_flight_load_resolving_after_dispose_fires_nothing() {
    let (chart, ctrl, recorder) = scripted_chart();
    let window = past_window(7);
    ctrl.push(
        RequestClass::Historical,
        MockBehavior::Delayed(80, daily_series(&window, 7, 9)),
    )
    .await;

    let in_flight = {
        let chart = chart.clone();
        tokio::spawn(async move { chart.set_window(window).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    chart.dispose();

    in_flight.await.unwrap().unwrap();

    // Only the optimistic window event fired before disposal.
    let events = recorder.snapshot();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::Window { .. }));
    assert!(chart.series().is_empty());
}

#[tokio::test]
async fn dispose_is_safe_repeatedly_and_before_first_load() {
    let (chart, _ctrl, recorder) = scripted_chart();
    chart.dispose();
    chart.dispose();
    assert!(recorder.snapshot().is_empty());
    assert!(chart.series().is_empty());
    assert_eq!(chart.window(), None);
}
