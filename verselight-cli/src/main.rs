//! VerseLight CLI
//!
//! Runs the API server, or performs a single lookup from the terminal.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use verselight_api::{ApiConfig, ApiServer, AppState};
use verselight_core::types::{
    ContextResponse, CrossRefResponse, ExplainResponse, HistoricalContext, TranslateResponse,
    ValidatedVerse, VideoResponse,
};
use verselight_enrich::Enricher;

/// VerseLight - Bible verse study assistant
#[derive(Parser)]
#[command(name = "verselight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Print raw JSON results instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Text to enrich; looked up by reference when not given.
#[derive(clap::Args)]
struct VerseArgs {
    /// Verse reference ("John 3:16")
    reference: String,
    /// Verse text; fetched from the scripture service when omitted
    #[arg(short, long)]
    text: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on; overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
        /// Bind address; overrides BIND_ADDR
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Validate a reference and print its text
    Verse {
        /// Verse reference ("john 3:16")
        reference: String,
    },

    /// Explain a verse in five bullet points
    Explain(VerseArgs),

    /// Historical and literary context
    Context(VerseArgs),

    /// Cross-references with a primary theme
    Crossref(VerseArgs),

    /// Word-by-word Greek or Hebrew breakdown
    Translate {
        #[command(flatten)]
        verse: VerseArgs,
        /// Testament (NT or OT); derived from the book when omitted
        #[arg(long)]
        testament: Option<String>,
    },

    /// Search related sermon and study videos
    Videos {
        /// Verse reference
        reference: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "verselight=debug,info"
    } else {
        "verselight=info,warn"
    };

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()));
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let json = cli.json;
    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, bind).await,
        Commands::Verse { reference } => cmd_verse(&reference, json).await,
        Commands::Explain(args) => cmd_explain(args, json).await,
        Commands::Context(args) => cmd_context(args, json).await,
        Commands::Crossref(args) => cmd_crossref(args, json).await,
        Commands::Translate { verse, testament } => cmd_translate(verse, testament, json).await,
        Commands::Videos { reference } => cmd_videos(&reference, json).await,
    }
}

/// Enrichment service built from the environment.
fn enricher() -> Result<Enricher> {
    let state = AppState::new(ApiConfig::from_env()).context("Failed to build upstream clients")?;
    Ok(state.enricher)
}

fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolves the reference (and text, if not given) through verse validation.
async fn resolve(enricher: &Enricher, args: &VerseArgs) -> Result<(String, String)> {
    if let Some(text) = &args.text {
        return Ok((args.reference.clone(), text.clone()));
    }
    let verse = lookup(enricher, &args.reference).await?;
    Ok((verse.reference, verse.verse_text))
}

async fn lookup(enricher: &Enricher, reference: &str) -> Result<ValidatedVerse> {
    let pb = spinner(format!("Looking up {}...", reference))?;
    let verse = enricher.validate_verse(reference).await;
    pb.finish_and_clear();
    verse.context("Verse lookup failed")
}

/// Applies command-line overrides on top of the environment config.
fn serve_config(mut config: ApiConfig, port: Option<u16>, bind: Option<String>) -> ApiConfig {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    config
}

/// Run API server
async fn cmd_serve(port: Option<u16>, bind: Option<String>) -> Result<()> {
    let config = serve_config(ApiConfig::from_env(), port, bind);
    let addr = config.socket_addr().context("Invalid bind address")?;

    println!("{}", "📖 Starting VerseLight API server...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), addr);
    println!("   {} http://{}/api/health", "Health check:".dimmed(), addr);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Failed to build upstream clients")?;
    server.run(addr).await?;

    Ok(())
}

/// Validate a reference
async fn cmd_verse(reference: &str, json: bool) -> Result<()> {
    let enricher = enricher()?;
    let verse = lookup(&enricher, reference).await?;

    if json {
        return print_json(&verse);
    }

    println!("{} {}", "✅".green(), verse.reference.bold());
    println!("\n{}\n", verse.verse_text);
    println!("   {} {}", "Book:".dimmed(), verse.book);
    if let Some(chapter) = verse.chapter {
        println!("   {} {}", "Chapter:".dimmed(), chapter);
    }
    if let Some(v) = &verse.verse {
        println!("   {} {}", "Verse:".dimmed(), v);
    }
    println!("   {} {}", "Testament:".dimmed(), verse.testament);
    println!("\n{}", verse.copyright.dimmed());
    Ok(())
}

/// Explain a verse
async fn cmd_explain(args: VerseArgs, json: bool) -> Result<()> {
    let enricher = enricher()?;
    let (reference, text) = resolve(&enricher, &args).await?;

    let pb = spinner(format!("Explaining {}...", reference))?;
    let response = enricher.explain(&reference, &text).await;
    pb.finish_and_clear();
    let response: ExplainResponse = response.context("Failed to generate explanation")?;

    if json {
        return print_json(&response);
    }

    println!("{} {}\n", "💡".yellow(), response.reference.bold());
    for point in &response.bullet_points {
        println!("  {} {}", "•".cyan(), point);
    }
    Ok(())
}

/// Historical context
async fn cmd_context(args: VerseArgs, json: bool) -> Result<()> {
    let enricher = enricher()?;
    let (reference, text) = resolve(&enricher, &args).await?;

    let pb = spinner(format!("Gathering context for {}...", reference))?;
    let response = enricher.context(&reference, &text).await;
    pb.finish_and_clear();
    let response: ContextResponse = response.context("Failed to generate context")?;

    if json {
        return print_json(&response);
    }

    let HistoricalContext {
        author,
        audience,
        date_written,
        geographical_context,
        political_context,
        cultural_context,
        literary_context,
    } = &response.context;

    println!("{} {}", "📜".yellow(), response.reference.bold());
    for (title, body) in [
        ("Author", author),
        ("Audience", audience),
        ("Date written", date_written),
        ("Geography", geographical_context),
        ("Politics", political_context),
        ("Culture", cultural_context),
        ("Literary context", literary_context),
    ] {
        println!("\n{}", title.cyan().bold());
        println!("  {}", body);
    }
    Ok(())
}

/// Cross-references
async fn cmd_crossref(args: VerseArgs, json: bool) -> Result<()> {
    let enricher = enricher()?;
    let (reference, text) = resolve(&enricher, &args).await?;

    let pb = spinner(format!("Finding cross-references for {}...", reference))?;
    let response = enricher.crossref(&reference, &text).await;
    pb.finish_and_clear();
    let response: CrossRefResponse = response.context("Failed to generate cross-references")?;

    if json {
        return print_json(&response);
    }

    println!("{} {}", "🔗".yellow(), response.reference.bold());
    println!("   {} {}\n", "Theme:".dimmed(), response.crossref.primary_theme);
    for item in &response.crossref.cross_references {
        println!("  {} {}", item.reference.green().bold(), format!("({})", item.kind).dimmed());
        println!("     {}", item.explanation);
    }
    Ok(())
}

/// Word-by-word translation
async fn cmd_translate(args: VerseArgs, testament: Option<String>, json: bool) -> Result<()> {
    let enricher = enricher()?;

    let (reference, text, testament) = match (&args.text, testament) {
        (Some(text), Some(testament)) => (args.reference.clone(), text.clone(), testament),
        (text, testament) => {
            let verse = lookup(&enricher, &args.reference).await?;
            let text = text.clone().unwrap_or(verse.verse_text);
            let testament = testament.unwrap_or_else(|| verse.testament.code().to_string());
            (verse.reference, text, testament)
        }
    };

    let pb = spinner(format!("Translating {}...", reference))?;
    let response = enricher.translate(&reference, &text, &testament).await;
    pb.finish_and_clear();
    let response: TranslateResponse = response.context("Failed to generate translation")?;

    if json {
        return print_json(&response);
    }

    println!(
        "{} {} ({})",
        "🔤".yellow(),
        response.reference.bold(),
        response.language
    );
    println!("\n   {}\n", response.translation.original_text.bold());
    for word in &response.translation.words {
        println!(
            "  {:<16} {:<20} {:<8} {}",
            word.original,
            word.transliteration.italic(),
            word.strongs.cyan(),
            word.meaning
        );
        println!("  {}", word.grammar.dimmed());
    }
    Ok(())
}

/// Related videos
async fn cmd_videos(reference: &str, json: bool) -> Result<()> {
    let enricher = enricher()?;

    let pb = spinner(format!("Searching videos for {}...", reference))?;
    let response = enricher.videos(reference).await;
    pb.finish_and_clear();
    let response: VideoResponse = response.context("Video search failed")?;

    if json {
        return print_json(&response);
    }

    if response.videos.is_empty() {
        println!("{}", "No videos found.".yellow());
        return Ok(());
    }

    println!("{} {} video(s) for {}\n", "🎥".yellow(), response.videos.len(), response.reference.bold());
    for video in &response.videos {
        println!("  {}", video.title.bold());
        println!(
            "     {} · https://www.youtube.com/watch?v={}",
            video.channel.dimmed(),
            video.video_id
        );
    }
    Ok(())
}
