use crate::helpers::scripted_chart;
use rust_decimal::Decimal;
use tally::{DateWindow, TallyError, WindowParams};
use tally_core::Sample;
use tally_mock::{MockBehavior, RequestClass};

const DAY: i64 = 86_400;

/// Restoring a chart from route parameters and encoding its state back
/// round-trips exactly, including the drill-down index.
#[tokio::test]
async fn params_round_trip_through_a_loaded_chart() {
    let (chart, ctrl, _recorder) = scripted_chart();

    let query = "days=7&end=2026-06-01&step=1";
    let params = WindowParams::from_query(query).unwrap();
    let window = DateWindow::try_from(params).unwrap();
    let newest = window.end_time() - DAY;
    ctrl.set_default(
        RequestClass::Historical,
        MockBehavior::Return(
            (0..7)
                .map(|k| {
                    Sample::new(
                        newest - k * DAY,
                        tally_core::CostData::new(Decimal::from(5)),
                    )
                })
                .collect(),
        ),
    )
    .await;

    chart.set_params(params).await.unwrap();

    assert_eq!(chart.selected_step(), Some(1));
    let encoded = chart.params().unwrap();
    assert_eq!(encoded, params);
    assert_eq!(encoded.to_query(), query);
}

#[tokio::test]
async fn malformed_params_are_rejected_before_any_fetch() {
    let (chart, ctrl, recorder) = scripted_chart();
    let params = WindowParams::from_query("days=0&end=2026-06-01&step=-1").unwrap();
    let err = chart.set_params(params).await.unwrap_err();
    assert!(matches!(err, TallyError::InvalidArg(_)));
    assert_eq!(ctrl.call_count().await, 0);
    assert!(recorder.snapshot().is_empty());
}
