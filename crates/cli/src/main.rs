use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use controller::FormController;
use rec_client::RecommendClient;
use session::{project, Projection, SUBMIT_LABEL_BUSY};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// GitGraph - GNN-based GitHub repository recommendations
#[derive(Parser)]
#[command(name = "gitgraph")]
#[command(about = "Get repository recommendations for a GitHub user", long_about = None)]
struct Cli {
    /// Base URL of the recommendation service
    #[arg(long, default_value = "http://localhost:8000")]
    service_url: String,

    /// Number of recommendations to request (service default: 10)
    #[arg(long)]
    limit: Option<u32>,

    /// GitHub username to search once; omit to start the interactive prompt
    username: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let client = RecommendClient::new(&cli.service_url)
        .context("Failed to create recommendation client")?;
    debug!(
        "Using recommendation service at {}",
        client.service_address()
    );
    let mut controller = FormController::new(client, cli.limit);

    match cli.username {
        Some(username) => run_once(&mut controller, &username).await,
        None => run_interactive(&mut controller).await,
    }
}

/// One-shot mode: submit a single username and exit.
async fn run_once(controller: &mut FormController, username: &str) -> Result<()> {
    controller.submit(username).await;
    render(&project(controller.state()));

    if !controller.state().error.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

/// Interactive mode: the prompt is the "form"; each line is one submission.
async fn run_interactive(controller: &mut FormController) -> Result<()> {
    println!("{}", "Git Graph".bold().blue());
    println!("GNN-based repository recommendations. Enter a GitHub username, or 'quit' to exit.");

    let stdin = io::stdin();
    loop {
        let projection = project(controller.state());
        print!("{} > ", projection.submit_label);
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            // EOF
            println!();
            break;
        }

        // Strip the line ending only; emptiness is checked exactly, untrimmed.
        let input = line.trim_end_matches(['\r', '\n']);
        if input == "quit" || input == "exit" {
            break;
        }

        // Validation failures never enter the loading presentation; the busy
        // label only shows once a request is actually going out.
        if !input.is_empty() {
            println!("{}", SUBMIT_LABEL_BUSY.dimmed());
        }
        controller.submit(input).await;
        render(&project(controller.state()));
    }
    Ok(())
}

/// Print the rendered projection of the session state.
fn render(projection: &Projection) {
    if let Some(error) = &projection.error {
        println!("{}", error.red());
        return;
    }

    if let Some(heading) = &projection.heading {
        println!("{}", heading.bold().blue());
        for (rank, line) in projection.results.iter().enumerate() {
            match line.score {
                Some(score) => println!(
                    "{}. {} - Score: {:.3}",
                    (rank + 1).to_string().green(),
                    line.repo,
                    score
                ),
                None => println!("{}. {}", (rank + 1).to_string().green(), line.repo),
            }
            println!("   {}", line.url.cyan());
        }
    }
}
