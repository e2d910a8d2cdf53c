//! CLI binary for pdf2note.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, writes the requested artefacts and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2note::config::DEFAULT_DATE_FORMAT;
use pdf2note::convert::write_atomic;
use pdf2note::{
    convert_file, convert_to_file, inspect, split_sections, user_message, write_sections,
    ConversionConfig, ConversionOutput, ConversionProgressCallback, Language, ProgressCallback,
    RendererKind, Stage,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner shown while a conversion is in flight.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new(converting: &str) -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix(converting.to_string());
        Arc::new(Self { bar })
    }

    /// Remove the spinner line, e.g. before printing an error.
    fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, file_name: &str, byte_len: usize) {
        // Ticking starts only once the input passed the PDF check.
        self.bar.set_message(format!("{file_name} ({byte_len} bytes)"));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_stage_complete(&self, stage: Stage, output_len: usize) {
        self.bar.println(format!(
            "  {} {:<8} {}",
            green("✓"),
            stage,
            dim(&format!("{output_len:>6} bytes"))
        ));
    }

    fn on_conversion_complete(&self, _file_name: &str, _markdown_len: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print the note to stdout (pipe it to a clipboard tool to copy)
  pdf2note document.pdf

  # Save the note as document.md in ./notes/
  pdf2note document.pdf -o notes/

  # Also write the HTML preview
  pdf2note document.pdf -o document.md --html document.html

  # Japanese labels, older regex preview renderer
  pdf2note --language ja --renderer legacy 資料.pdf -o 資料.md

  # One file per ## section
  pdf2note document.pdf --split-dir sections/

  # Only show what the extractor finds
  pdf2note --inspect-only document.pdf

LIMITATIONS:
  Text is recovered by scraping ( … ) literals from the raw bytes. PDFs with
  compressed content streams, encryption or scanned pages produce an empty
  or garbled overview.

ENVIRONMENT VARIABLES:
  RUST_LOG                 tracing filter, overrides -v / -q
  PDF2NOTE_OUTPUT          Default for --output
  PDF2NOTE_LANGUAGE        Default for --language
  PDF2NOTE_RENDERER        Default for --renderer
  PDF2NOTE_DATE_FORMAT     Default for --date-format
"#;

/// Turn a PDF into a Markdown note with an HTML preview.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2note",
    version,
    about = "Turn a PDF into a Markdown knowledge-base note",
    long_about = "Extract the text of a simple PDF and wrap it in a fixed Markdown note \
(title, date, overview, notes, reference links), optionally with an HTML preview.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to convert.
    input: PathBuf,

    /// Write the note to this file, or into this directory as <name>.md.
    #[arg(short, long, env = "PDF2NOTE_OUTPUT")]
    output: Option<PathBuf>,

    /// Also write the rendered HTML preview to this file.
    #[arg(long, env = "PDF2NOTE_HTML")]
    html: Option<PathBuf>,

    /// Treat the input as this media type instead of detecting it.
    #[arg(long)]
    media_type: Option<String>,

    /// Language of note labels and messages.
    #[arg(long, env = "PDF2NOTE_LANGUAGE", value_enum, default_value = "en")]
    language: LanguageArg,

    /// Preview renderer.
    #[arg(long, env = "PDF2NOTE_RENDERER", value_enum, default_value = "tree")]
    renderer: RendererArg,

    /// strftime pattern for the creation date.
    #[arg(long, env = "PDF2NOTE_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Drop paragraphs at or below this many characters.
    #[arg(long, env = "PDF2NOTE_MIN_PARAGRAPH_CHARS", default_value_t = 20)]
    min_paragraph_chars: usize,

    /// Write one Markdown file per ## section into this directory.
    #[arg(long)]
    split_dir: Option<PathBuf>,

    /// Output structured JSON (ConversionOutput) instead of Markdown.
    #[arg(long, env = "PDF2NOTE_JSON")]
    json: bool,

    /// Run the extractor only and print what it found.
    #[arg(long)]
    inspect_only: bool,

    /// Disable the spinner.
    #[arg(long, env = "PDF2NOTE_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2NOTE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2NOTE_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LanguageArg {
    En,
    Ja,
}

impl From<LanguageArg> for Language {
    fn from(v: LanguageArg) -> Self {
        match v {
            LanguageArg::En => Language::English,
            LanguageArg::Ja => Language::Japanese,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum RendererArg {
    Tree,
    Legacy,
}

impl From<RendererArg> for RendererKind {
    fn from(v: RendererArg) -> Self {
        match v {
            RendererArg::Tree => RendererKind::Tree,
            RendererArg::Legacy => RendererKind::Legacy,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let language = Language::from(cli.language);

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner already says what is happening; keep INFO logs out of its way.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let media_type = cli.media_type.as_deref();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let extraction = inspect(&cli.input, media_type)
            .await
            .map_err(|e| anyhow::anyhow!(user_message(&e, language)))?;

        if cli.json {
            let json = serde_json::json!({
                "literal_runs": extraction.literal_runs,
                "chars": extraction.text.chars().count(),
                "text": extraction.text,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).context("Failed to serialise extraction")?
            );
        } else {
            println!("File:          {}", cli.input.display());
            println!("Literal runs:  {}", extraction.literal_runs);
            println!("Characters:    {}", extraction.text.chars().count());
            println!();
            println!("{}", extraction.text);
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let spinner = show_progress.then(|| CliProgressCallback::new(language.template().converting));
    let progress_cb: Option<ProgressCallback> = spinner
        .clone()
        .map(|cb| cb as Arc<dyn ConversionProgressCallback>);
    let config = build_config(&cli, language, progress_cb)?;
    let fail = |e: pdf2note::Pdf2NoteError| {
        if let Some(ref spinner) = spinner {
            spinner.clear();
        }
        anyhow::anyhow!(user_message(&e, language))
    };

    // ── Run conversion ───────────────────────────────────────────────────
    let output = if let Some(ref output_path) = cli.output {
        let (output, written) = convert_to_file(&cli.input, output_path, media_type, &config)
            .await
            .map_err(fail)?;
        if !cli.quiet {
            eprintln!(
                "{}  {} paragraphs  {}ms  →  {}",
                green("✔"),
                output.stats.paragraphs_kept,
                output.stats.duration_ms,
                bold(&written.display().to_string()),
            );
        }
        output
    } else {
        let output = convert_file(&cli.input, media_type, &config)
            .await
            .map_err(fail)?;
        print_to_stdout(&output, cli.json)?;
        output
    };

    if cli.json && cli.output.is_some() {
        print_to_stdout(&output, true)?;
    }

    // ── Extra artefacts ──────────────────────────────────────────────────
    if let Some(ref html_path) = cli.html {
        let html = output
            .html
            .as_deref()
            .context("HTML preview was not rendered")?;
        write_atomic(html_path, html)
            .await
            .context("Failed to write HTML preview")?;
        if !cli.quiet {
            eprintln!("   preview  →  {}", bold(&html_path.display().to_string()));
        }
    }

    if let Some(ref dir) = cli.split_dir {
        let sections = split_sections(&output.markdown);
        let written = write_sections(&sections, dir)
            .await
            .context("Failed to write sections")?;
        if !cli.quiet {
            eprintln!(
                "   {} sections  →  {}",
                written.len(),
                bold(&dir.display().to_string())
            );
        }
    }

    if !cli.quiet && !show_progress && !cli.json {
        eprintln!(
            "{}",
            dim(&format!(
                "{} literal runs, {} chars extracted, {} short paragraphs dropped",
                output.stats.literal_runs,
                output.stats.extracted_chars,
                output.stats.paragraphs_dropped
            ))
        );
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(
    cli: &Cli,
    language: Language,
    progress: Option<ProgressCallback>,
) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .language(language)
        .renderer(cli.renderer.into())
        .date_format(cli.date_format.clone())
        .min_paragraph_chars(cli.min_paragraph_chars)
        .render_html(cli.html.is_some() || cli.json);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Print the note (or the whole output record as JSON) to stdout.
fn print_to_stdout(output: &ConversionOutput, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if json {
        let json = serde_json::to_string_pretty(output).context("Failed to serialise output")?;
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    } else {
        handle
            .write_all(output.markdown.as_bytes())
            .context("Failed to write to stdout")?;
    }
    Ok(())
}
