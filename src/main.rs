use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use console::style;
use coursefetch::course::{download_all_courses, download_course, CourseReport};
use coursefetch::download::Status;
use coursefetch::downloader::DownloaderBuilder;
use coursefetch::fetch::YtDlpFetcher;
use coursefetch::render::{Credentials, HttpPageRenderer, PageRenderer, RendererConfig};
use coursefetch::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Download the video lessons of a course, resuming earlier runs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the course page. Not needed with --all.
    #[arg(required_unless_present = "all")]
    course_url: Option<String>,

    /// Account email.
    #[arg(short, long, requires = "password")]
    email: Option<String>,

    /// Account password.
    #[arg(short, long, requires = "email")]
    password: Option<String>,

    /// Output directory. Each course gets its own folder inside it.
    #[arg(short, long, default_value = "./downloads")]
    directory: PathBuf,

    /// Download every course listed on the site.
    #[arg(short, long)]
    all: bool,

    /// Download again, even lessons already on disk.
    #[arg(short, long)]
    force: bool,

    /// Root of the course site.
    #[arg(long, default_value = "https://vueschool.io")]
    base_url: String,

    /// Path to the yt-dlp binary. Looked up on PATH by default.
    #[arg(long)]
    yt_dlp: Option<PathBuf>,

    /// Hide the progress bars.
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let fetcher = match args.yt_dlp {
        Some(ref path) => YtDlpFetcher::new(path.clone()),
        None => YtDlpFetcher::from_path().ok_or_else(|| {
            Error::ExternalTool("yt-dlp was not found on PATH, use --yt-dlp".into())
        })?,
    };
    info!(binary = %fetcher.binary_path().display(), "Using yt-dlp");

    let mut renderer = HttpPageRenderer::new(RendererConfig {
        base_url: args.base_url.clone(),
        ..RendererConfig::default()
    })?;

    if let (Some(email), Some(password)) = (&args.email, &args.password) {
        renderer.login(&Credentials::new(email, password)).await?;
    }

    let builder = if args.no_progress {
        DownloaderBuilder::hidden()
    } else {
        DownloaderBuilder::new()
    };
    let downloader = builder
        .user_agent(renderer.user_agent())
        .overwrite(args.force)
        .fetcher(fetcher)
        .build();

    let reports = if args.all {
        let courses_url = renderer.site_url("/courses")?;
        download_all_courses(
            &mut renderer,
            &downloader,
            &courses_url,
            &args.directory,
            args.force,
        )
        .await?
    } else {
        let course_url = args
            .course_url
            .as_deref()
            .ok_or_else(|| eyre!("A course URL is required without --all"))?;
        vec![
            download_course(
                &mut renderer,
                &downloader,
                course_url,
                &args.directory,
                args.force,
            )
            .await?,
        ]
    };

    for report in &reports {
        print_report(report);
    }
    let processed: usize = reports.iter().map(CourseReport::processed).sum();
    println!(
        "\n{} {} videos processed",
        style("Done!").green().bold(),
        processed
    );
    Ok(())
}

fn print_report(report: &CourseReport) {
    println!(
        "\n{} {}",
        style("Course:").bold(),
        style(&report.course_title).cyan()
    );

    if report.is_up_to_date() {
        println!(
            "All {} videos already downloaded in {}",
            report.expected_count,
            report.directory.display()
        );
        return;
    }

    if !report.queued.is_empty() {
        let queued: Vec<String> = report.queued.iter().map(ToString::to_string).collect();
        println!("{} {}", style("Queued").bold(), queued.join(", "));
    }
    for failure in &report.resolution_failures {
        println!("{} {}", style("Unresolved").yellow(), failure);
    }
    for dup in &report.discarded {
        println!(
            "{} lesson {} \"{}\" shares its video with lesson {} \"{}\"",
            style("Duplicate").dim(),
            dup.discarded.lesson.ordinal,
            dup.discarded.lesson.title,
            dup.kept_ordinal,
            dup.kept_title
        );
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "File", "Status", "Attempts", "Details"]);

    for summary in &report.summaries {
        let (status, color, details) = match summary.status() {
            Status::Success => ("done", Color::Green, String::new()),
            Status::Skipped(reason) => ("skipped", Color::Blue, reason.clone()),
            Status::Fail(msg) => ("failed", Color::Red, msg.clone()),
            Status::NotStarted => ("pending", Color::Grey, String::new()),
        };
        table.add_row(vec![
            Cell::new(summary.job().sequence_number),
            Cell::new(summary.job().file_name()),
            Cell::new(status).fg(color),
            Cell::new(summary.attempts()),
            Cell::new(details),
        ]);
    }
    println!("{table}");
    println!(
        "{} processed, {} failed",
        report.processed(),
        report.failed()
    );
}
