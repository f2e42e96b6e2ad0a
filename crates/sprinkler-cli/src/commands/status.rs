//! Status command handlers.

use std::fmt::Write as _;

use sprinkler_api::{ApiInvoker, DeviceStatus};
use tracing::info;

use crate::cli::StatusArgs;
use crate::error::CliError;

pub async fn handle(api: &mut ApiInvoker, args: &StatusArgs) -> Result<(), CliError> {
    let body = api.get_status().await?;
    info!(addr = api.host_ip().unwrap_or_default(), "controller address");

    if args.json {
        let value: serde_json::Value = serde_json::from_str(&body)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{body}");
    }
    Ok(())
}

pub async fn summary(api: &mut ApiInvoker) -> Result<(), CliError> {
    let status = api.device_status().await?;
    print!("{}", render_summary(&status));
    Ok(())
}

fn render_summary(status: &DeviceStatus) -> String {
    let zones_on = if status.on.is_empty() {
        "none".to_owned()
    } else {
        status
            .on
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut rows: Vec<(&str, String)> = vec![
        ("hostname", status.hostname.clone().unwrap_or_else(|| "-".into())),
        ("address", status.addr.clone()),
        ("zones on", zones_on),
    ];
    if let Some(n) = status.num_zones {
        rows.push(("zones", n.to_string()));
    }
    if let Some(ref state) = status.scheduler_state {
        rows.push(("scheduler", state.clone()));
    }
    if let Some(next) = status.next_cycle.as_ref().filter(|c| !c.is_empty()) {
        let start = status.start_date_time.as_deref().unwrap_or("?");
        rows.push(("next cycle", format!("{next} at {start}")));
    }
    if let Some(ref resume) = status.resume {
        rows.push(("system", resume.clone()));
    }
    if let Some(ref up) = status.up_time {
        rows.push(("uptime", up.clone()));
    }

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in rows {
        let _ = writeln!(out, "{key:<width$}  {value}");
    }
    out
}
