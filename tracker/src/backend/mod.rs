//! # Backend Module
//!
//! Contains all non-UI logic for the expense tracker application.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Validation, filtering, totals and chart data
//! - **Storage**: The JSON document holding every expense
//! - **IO**: The command line front end and the SVG chart renderer
//!
//! ## Architecture
//!
//! ```text
//! CLI (clap) / chart renderer (plotters)
//!     ↓
//! Domain Layer (ExpenseService, queries, table and chart preparation)
//!     ↓
//! Storage Layer (ExpenseStorage, JSON document)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Resolve the data directory and read the optional config
//! - Build the application state once per run
//! - Re-render charts from the current expenses on request

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use log::{error, info};
use std::path::{Path, PathBuf};

use crate::backend::config::AppConfig;
use crate::backend::domain::{ChartService, ExpenseService, ExpenseTableConfig, ExpenseTableService};
use crate::backend::io::{ChartError, ChartRenderer};
use crate::backend::storage::{JsonConnection, JsonExpenseStore};

/// Main application state that holds all services
pub struct AppState {
    pub config: AppConfig,
    pub expense_service: ExpenseService<JsonExpenseStore>,
    pub expense_table_service: ExpenseTableService,
    pub chart_service: ChartService,
    pub chart_renderer: ChartRenderer,
}

impl AppState {
    /// Redraw the charts from the current expenses
    ///
    /// Writes to `output` when given, otherwise to the configured charts file.
    /// Returns the written file, or `None` when there is nothing to plot.
    pub fn render_charts(&self, output: Option<&Path>) -> Result<Option<PathBuf>, ChartError> {
        let renderer = match output {
            Some(path) => ChartRenderer::new(path),
            None => self.chart_renderer.clone(),
        };
        match self
            .chart_service
            .prepare_chart_data(self.expense_service.expenses())
        {
            Some(data) => {
                renderer.render(&data)?;
                Ok(Some(renderer.output_path().to_path_buf()))
            }
            None => {
                info!("No expenses yet, skipping charts");
                Ok(None)
            }
        }
    }

    /// Redraw the default charts file, logging instead of failing
    pub fn refresh_charts(&self) -> Option<PathBuf> {
        match self.render_charts(None) {
            Ok(path) => path,
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.expense_service.shutdown();
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(data_dir: &Path) -> Result<AppState> {
    info!("Using data directory {:?}", data_dir);
    let config = AppConfig::load(data_dir);

    info!("Setting up storage");
    let connection = JsonConnection::new(data_dir, config.expenses_file.clone())?;
    let mut expense_service = ExpenseService::new(JsonExpenseStore::new(connection));
    expense_service.load_expenses();

    info!("Setting up application state");
    let expense_table_service = ExpenseTableService::with_config(ExpenseTableConfig {
        currency_symbol: config.currency_symbol.clone(),
    });
    let chart_renderer = ChartRenderer::new(data_dir.join(&config.charts_file));

    Ok(AppState {
        config,
        expense_service,
        expense_table_service,
        chart_service: ChartService::new(),
        chart_renderer,
    })
}
