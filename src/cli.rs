use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::api::run_http_server;
use crate::core::{Page, ProgressView, load_blueprint, render_page};
use crate::error::{BlueprintError, Result};

#[derive(Parser, Debug)]
#[command(
    name = "blueprint",
    about = "Personal finance blueprint: dashboard pages and derived metrics as JSON"
)]
pub struct Cli {
    #[arg(long, short, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[arg(
        long,
        global = true,
        env = "BLUEPRINT_DATA",
        help = "JSON data file; defaults to the built-in sample household"
    )]
    pub data: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API over HTTP
    Serve {
        #[arg(long, env = "BLUEPRINT_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Print one page view
    Page {
        #[arg(help = "summary, profile, quantitative, qualitative, protection, mindset or action-plan")]
        page: String,
        #[arg(
            long,
            value_delimiter = ',',
            help = "Action ids to treat as completed, e.g. 1,3"
        )]
        completed: Vec<u32>,
    },
    /// Evaluate progress of a current amount against a target
    Progress {
        #[arg(long)]
        current: f64,
        #[arg(long)]
        target: f64,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn progress(current: f64, target: f64) -> Result<ProgressView> {
    if !current.is_finite() || current < 0.0 {
        return Err(BlueprintError::Invalid("--current must be >= 0".to_string()));
    }
    if !target.is_finite() || target <= 0.0 {
        return Err(BlueprintError::Invalid("--target must be > 0".to_string()));
    }
    Ok(ProgressView::new("Progress", current, target))
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { port } => {
            let blueprint = load_blueprint(cli.data.as_deref())?;
            run_http_server(port, blueprint).await?;
        }
        Command::Page { page, completed } => {
            let page: Page = page.parse()?;
            let blueprint = load_blueprint(cli.data.as_deref())?;
            let completed: BTreeSet<u32> = completed.into_iter().collect();
            print_json(&render_page(&blueprint, page, &completed))?;
        }
        Command::Progress { current, target } => {
            print_json(&progress(current, target)?)?;
        }
    }
    Ok(())
}
