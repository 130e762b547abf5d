use std::sync::Arc;

use chrono::{Days, Utc};
use tally::{ChartEvents, DateWindow, TimeDescendingSeries, UsageChart};
use tally_core::CostData;
use tally_mock::{MockBehavior, MockLoader, RequestClass, fixtures};

struct PrintSink;

impl ChartEvents<CostData> for PrintSink {
    fn on_window_selected(&self, start: i64, end: i64, _window: &DateWindow) {
        println!("window selected: [{start}, {end})");
    }

    fn on_data_loaded(&self, series: TimeDescendingSeries<CostData>) {
        println!("loaded {} buckets:", series.len());
        for point in &series {
            println!("  {:>12}  {}", point.time, point.data.cost);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Script a loader with one week of daily spend (a REST loader from
    //    tally-rest would slot in here unchanged).
    let window = DateWindow::new(7, Utc::now().date_naive() - Days::new(10))?;
    let (loader, ctrl) = MockLoader::<CostData>::scripted();
    ctrl.set_default(
        RequestClass::Historical,
        MockBehavior::Return(fixtures::cost_series(
            window.end_time() - 86_400,
            5,
            86_400,
            120,
        )),
    )
    .await;

    // 2. Build the chart with a printing event sink.
    let chart = UsageChart::<CostData>::builder()
        .with_loader(loader)
        .events(Arc::new(PrintSink))
        .build()?;

    // 3. Load the window; the two missing leading days come back zero-filled.
    chart.set_window(window).await?;

    Ok(())
}
