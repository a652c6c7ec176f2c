//! Stockifai - Workshop inventory API client
//!
//! Command line access to stock, forecasts, alerts and the parts locator.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockifai::models::{
    ForecastingFilter, MovimientosFilter, NivelAlerta, RepuestosFilter, StockFilter,
};
use stockifai::services::DEFAULT_ALERT_PAGE_SIZE;
use stockifai::{spawn_alert_summary_poller, spawn_cleanup_task, AppState, Config};

#[derive(Parser, Debug)]
#[command(name = "stockifai")]
#[command(about = "Query the workshop inventory API", long_about = None)]
struct Cli {
    /// API base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (overrides API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stock levels of a workshop
    Stock {
        #[arg(long)]
        taller: u64,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        /// Free text search
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        categoria: Option<u64>,
    },
    /// Stock movements of a workshop
    Movements {
        #[arg(long)]
        taller: u64,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long)]
        deposito: Option<u64>,
        #[arg(long)]
        search: Option<String>,
        /// First day, YYYY-MM-DD
        #[arg(long)]
        desde: Option<chrono::NaiveDate>,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        hasta: Option<chrono::NaiveDate>,
    },
    /// Demand forecast of one part, or the forecasting list without --repuesto
    Forecast {
        #[arg(long)]
        taller: u64,
        #[arg(long)]
        repuesto: Option<u64>,
        #[arg(long)]
        q: Option<String>,
    },
    /// Alert summary, or alerts of the given levels
    Alerts {
        #[arg(long)]
        taller: u64,
        /// Levels to list, e.g. CRITICO,ADVERTENCIA
        #[arg(long, value_delimiter = ',', value_parser = parse_nivel)]
        niveles: Vec<NivelAlerta>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Print the alert summary every time it changes, until Ctrl-C
    WatchAlerts {
        #[arg(long)]
        taller: u64,
    },
    /// Find workshops holding a part number
    Locate {
        #[arg(long)]
        taller: u64,
        #[arg(long)]
        part: String,
    },
    /// Catalog parts, brands and categories
    Catalog {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Upload a movements file
    ImportMovements {
        #[arg(long)]
        taller: u64,
        file: PathBuf,
        /// Date applied to rows without one, YYYY-MM-DD
        #[arg(long)]
        fecha: Option<chrono::NaiveDate>,
    },
}

impl Command {
    fn is_long_running(&self) -> bool {
        matches!(self, Command::WatchAlerts { .. })
    }
}

fn parse_nivel(value: &str) -> Result<NivelAlerta, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_uppercase()))
        .map_err(|_| format!("unknown alert level: {value}"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockifai=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config.api_token = Some(token);
    }
    info!(
        "Configuration loaded: base_url={}, default_ttl={}ms, hit_delay={}ms",
        config.base_url,
        config.cache_default_ttl.as_millis(),
        config.cache_hit_delay.as_millis()
    );

    let state = AppState::from_config(&config).context("failed to build API client")?;

    // One-shot commands exit before anything could expire
    let cleanup_handle = cli
        .command
        .is_long_running()
        .then(|| spawn_cleanup_task(state.cache.clone(), config.cleanup_interval));

    let outcome = run(&state, &config, cli.command).await;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }
    outcome
}

async fn run(state: &AppState, config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Stock {
            taller,
            page,
            page_size,
            q,
            categoria,
        } => {
            let filter = StockFilter {
                search_text: q,
                categoria_id: categoria,
            };
            let stock = state.stock().stock(taller, page, page_size, &filter).await?;
            print_json(&stock)
        }
        Command::Movements {
            taller,
            page,
            page_size,
            deposito,
            search,
            desde,
            hasta,
        } => {
            let filter = MovimientosFilter {
                deposito_id: deposito,
                search_text: search,
                desde,
                hasta,
            };
            let movimientos = state
                .stock()
                .movimientos(taller, page, page_size, &filter)
                .await?;
            print_json(&movimientos)
        }
        Command::Forecast {
            taller,
            repuesto: Some(repuesto),
            ..
        } => print_json(&state.stock().forecast(taller, repuesto).await?),
        Command::Forecast {
            taller,
            repuesto: None,
            q,
        } => {
            let filter = ForecastingFilter { search_text: q };
            let list = state
                .stock()
                .forecasting_list(taller, 1, 10, &filter)
                .await?;
            print_json(&list)
        }
        Command::Alerts {
            taller,
            niveles,
            page,
        } => {
            let alerts = state.alerts();
            if niveles.is_empty() {
                print_json(&alerts.resumen(taller).await)
            } else {
                let page = alerts
                    .alertas(taller, &niveles, page, DEFAULT_ALERT_PAGE_SIZE)
                    .await?;
                print_json(&page)
            }
        }
        Command::WatchAlerts { taller } => {
            let poller =
                spawn_alert_summary_poller(state.alerts(), taller, config.alert_poll_interval);
            let mut updates = poller.subscribe();

            loop {
                tokio::select! {
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let resumen = *updates.borrow_and_update();
                        print_json(&resumen)?;
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("Stopping alert watch");
                        break;
                    }
                }
            }

            poller.abort();
            Ok(())
        }
        Command::Locate { taller, part } => {
            let respuesta = state
                .locator()
                .buscar_por_numero_parte(taller, &part)
                .await?;
            print_json(&respuesta)
        }
        Command::Catalog {
            page,
            page_size,
            search,
        } => {
            let catalog = state.catalog();
            let filter = RepuestosFilter {
                search_text: search,
                ..RepuestosFilter::default()
            };
            print_json(&serde_json::json!({
                "marcas": catalog.marcas().await?,
                "categorias": catalog.categorias().await?,
                "repuestos": catalog.repuestos(page, page_size, &filter).await?,
            }))
        }
        Command::ImportMovements {
            taller,
            file,
            fecha,
        } => {
            let result = state
                .stock()
                .importar_movimientos(taller, &file, fecha)
                .await
                .with_context(|| format!("failed to import {}", file.display()))?;
            print_json(&result)
        }
    }
}
