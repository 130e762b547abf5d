use crate::helpers::{DAY, Event, daily_series, past_window, scripted_chart};
use rust_decimal::Decimal;
use tally_mock::{MockBehavior, RequestClass};

#[tokio::test]
async fn loads_blends_and_backfills_a_past_window() {
    let (chart, ctrl, recorder) = scripted_chart();
    let window = past_window(7);
    ctrl.set_default(
        RequestClass::Historical,
        MockBehavior::Return(daily_series(&window, 3, 100)),
    )
    .await;

    chart.set_window(window).await.unwrap();

    // The optimistic window event precedes everything else.
    let events = recorder.snapshot();
    match &events[0] {
        Event::Window { start, end } => {
            assert_eq!(*start, window.start_time());
            assert_eq!(*end, window.end_time());
        }
        other => panic!("expected window event first, got {other:?}"),
    }

    // Three real daily buckets plus four zero-filled ones tile the window.
    let series = chart.series();
    assert_eq!(series.len(), 7);
    for pair in series.as_slice().windows(2) {
        assert_eq!(pair[0].time - pair[1].time, DAY);
    }
    for p in &series.as_slice()[..3] {
        assert_eq!(p.data.cost, Decimal::from(100));
    }
    for p in &series.as_slice()[3..] {
        assert_eq!(p.data.cost, Decimal::ZERO);
    }
    assert_eq!(series.most_recent().unwrap().time, window.end_time() - DAY);

    // The window is in the past, so only the historical fetch ran.
    let calls = ctrl.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bucket_seconds, DAY);
    assert_eq!(calls[0].start, window.start_time());
    assert_eq!(calls[0].end, Some(window.end_time()));

    // The published copy matches the accessor, and no selection was made.
    assert_eq!(recorder.data_events(), vec![series]);
    assert_eq!(recorder.step_events(), vec![None]);
}

#[tokio::test]
async fn hour_buckets_for_short_windows() {
    let (chart, ctrl, _recorder) = scripted_chart();
    let window = past_window(2);
    chart.set_window(window).await.unwrap();

    let calls = ctrl.calls().await;
    assert_eq!(calls[0].bucket_seconds, 3_600);
    // Two days of hourly buckets, all zero-filled (loader had nothing).
    let series = chart.series();
    assert_eq!(series.len(), 48);
    assert_eq!(series.most_recent().unwrap().time, window.end_time() - 3_600);
    assert_eq!(series.at(47).unwrap().time, window.start_time());
}
