use std::time::Duration;

use crate::helpers::{daily_series, past_window, scripted_chart};
use rust_decimal::Decimal;
use tally_mock::{MockBehavior, RequestClass};

/// A second `set_window` logically supersedes the first: the slow first
/// response must neither overwrite state nor fire callbacks, regardless of
/// arrival order.
#[tokio::test]
async fn late_response_from_superseded_window_is_dropped() {
    let (chart, ctrl, recorder) = scripted_chart();
    let slow_window = past_window(7);
    let fast_window = past_window(5);

    ctrl.push(
        RequestClass::Historical,
        MockBehavior::Delayed(80, daily_series(&slow_window, 7, 111)),
    )
    .await;
    ctrl.push(
        RequestClass::Historical,
        MockBehavior::Return(daily_series(&fast_window, 5, 222)),
    )
    .await;

    let first = {
        let chart = chart.clone();
        tokio::spawn(async move { chart.set_window(slow_window).await })
    };
    // Let the slow load get in flight before superseding it.
    tokio::time::sleep(Duration::from_millis(10)).await;
    chart.set_window(fast_window).await.unwrap();

    // The superseded call resolves quietly.
    first.await.unwrap().unwrap();

    let series = chart.series();
    assert_eq!(series.len(), 5);
    assert!(series.iter().all(|p| p.data.cost == Decimal::from(222)));

    // Exactly one publish: the fast window's. The slow result vanished.
    let published = recorder.data_events();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0], series);
}
