use crate::helpers::{daily_series, past_window, scripted_chart};
use tally_core::TallyError;
use tally_mock::{MockBehavior, RequestClass};

/// A failed load leaves the previous good series visible; nothing is
/// published for the failed window.
#[tokio::test]
async fn failure_keeps_last_good_series() {
    let (chart, ctrl, recorder) = scripted_chart();
    let window = past_window(7);
    ctrl.push(
        RequestClass::Historical,
        MockBehavior::Return(daily_series(&window, 7, 50)),
    )
    .await;
    chart.set_window(window).await.unwrap();
    let good = chart.series();
    assert_eq!(good.len(), 7);

    ctrl.push(
        RequestClass::Historical,
        MockBehavior::Fail(TallyError::loader("tally-mock", "upstream 500")),
    )
    .await;
    let err = chart.set_window(past_window(5)).await.unwrap_err();
    assert!(matches!(err, TallyError::Loader { .. }));

    // Stale but consistent: the old series is still what the chart serves.
    assert_eq!(chart.series(), good);
    assert_eq!(recorder.data_events().len(), 1);
}
