use std::time::Duration;

use crate::helpers::{RecordingEvents, daily_series, past_window};
use tally::{TallyError, UsageChart};
use tally_core::CostData;
use tally_mock::{MockBehavior, MockLoader, RequestClass};

#[tokio::test]
async fn stalled_loader_maps_to_loader_timeout() {
    let (loader, ctrl) = MockLoader::<CostData>::scripted();
    let recorder = RecordingEvents::new();
    let chart = UsageChart::<CostData>::builder()
        .with_loader(loader)
        .events(recorder.clone())
        .loader_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    ctrl.push(RequestClass::Historical, MockBehavior::Hang).await;
    let err = chart.set_window(past_window(7)).await.unwrap_err();
    assert!(matches!(err, TallyError::LoaderTimeout { .. }));
    assert!(recorder.data_events().is_empty());
    assert!(chart.series().is_empty());
}

#[tokio::test]
async fn overall_deadline_maps_to_request_timeout() {
    let (loader, ctrl) = MockLoader::<CostData>::scripted();
    let chart = UsageChart::<CostData>::builder()
        .with_loader(loader)
        .request_timeout(Duration::from_millis(30))
        .build()
        .unwrap();

    let window = past_window(7);
    ctrl.push(
        RequestClass::Historical,
        MockBehavior::Delayed(200, daily_series(&window, 7, 1)),
    )
    .await;
    let err = chart.set_window(window).await.unwrap_err();
    assert!(matches!(err, TallyError::RequestTimeout));
}
