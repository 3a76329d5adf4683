use crypto_dashboard_sdk::{
    constants::SUPPORTED_CURRENCIES, Currency, Dashboard, DashboardConfig, DashboardEvent,
    JsonFileStorage,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

fn help() -> String {
    format!(
        "commands: search <term> | currency <{}> | fav <id> | chart <id> | refresh | help | quit",
        SUPPORTED_CURRENCIES.join("|")
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("Crypto Market Dashboard");
    println!("=======================");

    let config = DashboardConfig::default();
    let provider = Arc::new(config.coingecko_provider()?);
    let storage = Arc::new(JsonFileStorage::new("crypto-dashboard.json"));
    let dashboard = Dashboard::new(provider, storage, config);

    if let Ok(view) = dashboard.init().await {
        println!("{}", view);
    }
    show_chart(&dashboard).await;
    show_notifications(&dashboard).await;

    println!("{}", help());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        let event = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", help());
                continue;
            }
            "search" => DashboardEvent::SearchChanged(arg.to_string()),
            "currency" => match Currency::new(arg) {
                Ok(currency) if SUPPORTED_CURRENCIES.contains(&currency.code()) => {
                    DashboardEvent::CurrencyChanged(currency)
                }
                Ok(currency) => {
                    println!(
                        "unsupported currency {}, choose one of: {}",
                        currency.display_code(),
                        SUPPORTED_CURRENCIES.join(", ")
                    );
                    continue;
                }
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            "fav" => DashboardEvent::FavoriteToggled(arg.to_string()),
            "chart" => DashboardEvent::AssetSelected(arg.to_string()),
            "refresh" => DashboardEvent::Refresh,
            other => {
                println!("unknown command: {}", other);
                continue;
            }
        };

        let redraw_chart = matches!(
            event,
            DashboardEvent::AssetSelected(_)
                | DashboardEvent::CurrencyChanged(_)
                | DashboardEvent::Refresh
        );

        if let Ok(view) = dashboard.handle(event).await {
            println!("{}", view);
        }
        if redraw_chart {
            show_chart(&dashboard).await;
        }
        show_notifications(&dashboard).await;
    }

    Ok(())
}

async fn show_chart(dashboard: &Dashboard) {
    let Some(chart) = dashboard.chart().await else {
        return;
    };

    let currency = &chart.currency;
    let range = match (chart.min(), chart.max()) {
        (Some(lo), Some(hi)) => format!(
            "{} .. {}",
            crypto_dashboard_sdk::format::format_currency_f64(lo, currency),
            crypto_dashboard_sdk::format::format_currency_f64(hi, currency)
        ),
        _ => "no data".to_string(),
    };

    println!(
        "{} history: {}  {}  ({})",
        chart.asset_id,
        chart.sparkline(60),
        range,
        chart
            .change_percent()
            .map(|c| format!("{:+.2}%", c))
            .unwrap_or_else(|| "n/a".to_string())
    );
}

async fn show_notifications(dashboard: &Dashboard) {
    for notification in dashboard.take_notifications().await {
        eprintln!("{}", notification);
    }
}
