//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `billdesk_core` linkage without a UI host.
//! - Render a snapshot file as dashboard totals, series and calendar feed.
//!
//! Usage: `billdesk [SNAPSHOT_JSON]`. Set `BILLDESK_LOG_DIR` (absolute path)
//! and optionally `BILLDESK_LOG_LEVEL` to enable file logging.

use billdesk_core::{
    core_version, init_logging, ping, ChartMetric, DashboardConfig, DashboardService, LogLevel,
    MonthlySeriesBuilder, Snapshot, SnapshotData,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("billdesk_core ping={}", ping());
    println!("billdesk_core version={}", core_version());

    if let Ok(log_dir) = std::env::var("BILLDESK_LOG_DIR") {
        let level = std::env::var("BILLDESK_LOG_LEVEL")
            .unwrap_or_else(|_| LogLevel::build_default().as_str().to_string());
        if let Err(err) = init_logging(level.as_str(), log_dir.as_str()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match run(path.as_str()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("event=cli_run module=cli status=error");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<(), String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read snapshot `{path}`: {err}"))?;
    let data: SnapshotData = serde_json::from_str(raw.as_str())
        .map_err(|err| format!("failed to parse snapshot `{path}`: {err}"))?;
    let snapshot = Snapshot::try_from(data).map_err(|err| format!("invalid snapshot: {err}"))?;

    let mut service = DashboardService::new(
        snapshot,
        MonthlySeriesBuilder::from_local_clock(),
        DashboardConfig::default(),
    )
    .map_err(|err| err.to_string())?;

    let metrics = service.metrics();
    println!("total_revenue={}", metrics.total_revenue);
    println!("total_outstanding={}", metrics.total_outstanding);
    println!("total_due={}", metrics.total_due);
    println!("total_retainers={}", metrics.total_retainers);
    if let Some(drift) = metrics.owed_drift() {
        println!(
            "warning: cached outstanding {} differs from live due {}",
            drift.cached, drift.live
        );
    }

    for metric in ChartMetric::ALL {
        let points: Vec<String> = service
            .chart_series(metric)
            .iter()
            .map(|point| format!("{}={}", point.month, point.value))
            .collect();
        println!("series {}: {}", metric.as_str(), points.join(", "));
    }

    for event in service.calendar_events() {
        let detail = event
            .amount()
            .map(|amount| amount.to_string())
            .or_else(|| event.contract_number().map(str::to_string))
            .unwrap_or_default();
        println!(
            "{} {:<19} {} {}",
            event.day(),
            event.kind.as_str(),
            event.client_name,
            detail
        );
    }

    let orphans = &service.collect_report().orphan_contract_ids;
    if !orphans.is_empty() {
        println!("skipped contracts without client: {}", orphans.join(", "));
    }

    Ok(())
}
