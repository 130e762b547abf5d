use tally_core::{CostData, TallyError, UsageLoader};
use tally_mock::{LoadCall, MockBehavior, MockLoader, RequestClass, fixtures};

#[tokio::test]
async fn scripts_are_consumed_in_order_then_fall_back() {
    let (loader, ctrl) = MockLoader::<CostData>::scripted();
    ctrl.push(
        RequestClass::Historical,
        MockBehavior::Fail(TallyError::loader("tally-mock", "boom")),
    )
    .await;
    ctrl.push(
        RequestClass::Historical,
        MockBehavior::Return(fixtures::cost_series(7_200, 2, 3_600, 5)),
    )
    .await;

    let first = loader.load_series(3_600, 0, Some(7_200)).await;
    assert!(matches!(first, Err(TallyError::Loader { .. })));

    let second = loader.load_series(3_600, 0, Some(7_200)).await.unwrap();
    assert_eq!(second.len(), 2);

    // Script exhausted; the default answers with nothing.
    let third = loader.load_series(3_600, 0, Some(7_200)).await.unwrap();
    assert!(third.is_empty());
}

#[tokio::test]
async fn calls_are_recorded_and_classified() {
    let (loader, ctrl) = MockLoader::<CostData>::scripted();
    loader.load_series(3_600, 100, Some(200)).await.unwrap();
    loader.load_series(60, 150, None).await.unwrap();

    let calls = ctrl.calls().await;
    assert_eq!(
        calls,
        vec![
            LoadCall {
                bucket_seconds: 3_600,
                start: 100,
                end: Some(200)
            },
            LoadCall {
                bucket_seconds: 60,
                start: 150,
                end: None
            },
        ]
    );
    assert_eq!(calls[0].class(), RequestClass::Historical);
    assert_eq!(calls[1].class(), RequestClass::Live);
}

#[tokio::test]
async fn returning_serves_historical_only() {
    let loader = MockLoader::returning(fixtures::cost_series(7_200, 3, 3_600, 1));
    assert_eq!(loader.load_series(3_600, 0, Some(7_200)).await.unwrap().len(), 3);
    assert!(loader.load_series(60, 0, None).await.unwrap().is_empty());
}
