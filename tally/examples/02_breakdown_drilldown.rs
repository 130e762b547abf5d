use std::sync::Arc;

use chrono::{Days, Utc};
use tally::{ChartEvents, DateWindow, SelectedStep, UsageChart};
use tally_core::BreakdownData;
use tally_mock::{MockBehavior, MockLoader, RequestClass, fixtures};

struct DrilldownSink;

impl ChartEvents<BreakdownData> for DrilldownSink {
    fn on_step_selected(&self, selection: Option<SelectedStep>) {
        match selection {
            Some(step) => println!(
                "drill-down: bucket #{} spans [{}, {})",
                step.index, step.start, step.end
            ),
            None => println!("drill-down cleared"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let window = DateWindow::new(14, Utc::now().date_naive() - Days::new(20))?;
    let (loader, ctrl) = MockLoader::<BreakdownData>::scripted();
    ctrl.set_default(
        RequestClass::Historical,
        MockBehavior::Return(fixtures::breakdown_series(
            window.end_time() - 86_400,
            14,
            86_400,
            &[("api", 40), ("compute", 95), ("storage", 12)],
        )),
    )
    .await;

    let chart = UsageChart::<BreakdownData>::builder()
        .with_loader(loader)
        .events(Arc::new(DrilldownSink))
        .build()?;
    chart.set_window(window).await?;

    // Walk a few buckets, then clear.
    chart.select_step(Some(0));
    chart.select_step(Some(3));
    chart.select_step(None);

    // Encode the final state for the host's router.
    if let Some(params) = chart.params() {
        println!("route: ?{}", params.to_query());
    }

    Ok(())
}
