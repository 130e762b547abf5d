use crate::helpers::{DAY, daily_series, past_window, scripted_chart};
use tally::SelectedStep;
use tally_mock::{MockBehavior, RequestClass};

/// `refresh()` re-runs the current window and re-applies the selection; a
/// still-valid index resolves to the same span both times.
#[tokio::test]
async fn refresh_reloads_and_reapplies_selection() {
    let (chart, ctrl, recorder) = scripted_chart();
    let window = past_window(7);
    ctrl.set_default(
        RequestClass::Historical,
        MockBehavior::Return(daily_series(&window, 7, 10)),
    )
    .await;
    chart.set_window(window).await.unwrap();
    chart.select_step(Some(1));

    chart.refresh().await.unwrap();

    assert_eq!(ctrl.call_count().await, 2);
    assert_eq!(recorder.data_events().len(), 2);
    assert_eq!(chart.selected_step(), Some(1));

    let newest = window.end_time() - DAY;
    let expected = SelectedStep {
        start: newest - DAY,
        end: newest,
        index: 1,
    };
    assert_eq!(recorder.step_events().last().unwrap(), &Some(expected));
}

#[tokio::test]
async fn refresh_before_any_window_is_a_no_op() {
    let (chart, ctrl, recorder) = scripted_chart();
    chart.refresh().await.unwrap();
    assert_eq!(ctrl.call_count().await, 0);
    assert!(recorder.snapshot().is_empty());
}
