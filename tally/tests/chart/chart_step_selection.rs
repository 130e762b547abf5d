use crate::helpers::{DAY, RecordingEvents, daily_series, past_window, scripted_chart};
use tally::{SelectedStep, UsageChart};
use tally_core::CostData;
use tally_mock::{MockBehavior, MockLoader, RequestClass};

#[tokio::test]
async fn valid_selection_reports_span_and_is_idempotent() {
    let (chart, ctrl, recorder) = scripted_chart();
    let window = past_window(7);
    ctrl.set_default(
        RequestClass::Historical,
        MockBehavior::Return(daily_series(&window, 7, 10)),
    )
    .await;
    chart.set_window(window).await.unwrap();

    chart.select_step(Some(1));
    chart.select_step(Some(1));

    let newest = window.end_time() - DAY;
    let expected = SelectedStep {
        start: newest - DAY,
        end: newest,
        index: 1,
    };
    // set_window applied the pending (empty) selection first, then the two
    // identical drill-downs.
    assert_eq!(
        recorder.step_events(),
        vec![None, Some(expected), Some(expected)]
    );
    assert_eq!(chart.selected_step(), Some(1));
}

#[tokio::test]
async fn out_of_range_clears_the_selection() {
    let (chart, ctrl, recorder) = scripted_chart();
    let window = past_window(7);
    ctrl.set_default(
        RequestClass::Historical,
        MockBehavior::Return(daily_series(&window, 7, 10)),
    )
    .await;
    chart.set_window(window).await.unwrap();

    chart.select_step(Some(2));
    chart.select_step(Some(99));

    assert_eq!(chart.selected_step(), None);
    assert_eq!(recorder.step_events().last().unwrap(), &None);
}

#[tokio::test]
async fn enforcement_falls_back_to_newest_bucket() {
    let (loader, ctrl) = MockLoader::<CostData>::scripted();
    let recorder = RecordingEvents::new();
    let chart = UsageChart::<CostData>::builder()
        .with_loader(loader)
        .events(recorder.clone())
        .enforce_step_selection(true)
        .build()
        .unwrap();

    // With no data yet, even enforcement cannot select anything.
    chart.select_step(Some(0));
    assert_eq!(recorder.step_events(), vec![None]);

    let window = past_window(7);
    ctrl.set_default(
        RequestClass::Historical,
        MockBehavior::Return(daily_series(&window, 7, 10)),
    )
    .await;
    chart.set_window(window).await.unwrap();

    chart.select_step(Some(99));
    assert_eq!(chart.selected_step(), Some(0));

    let newest = window.end_time() - DAY;
    let last = recorder.step_events().pop().unwrap();
    assert_eq!(
        last,
        Some(SelectedStep {
            start: newest,
            end: newest + DAY,
            index: 0,
        })
    );
}
