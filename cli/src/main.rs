//! unoutline CLI - heading outline inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unoutline::{
    detect_input_from_path, ExtractOptions, FragmentDocument, InputKind, JsonFormat,
    OutlineOptions, OutlineReport, Unoutline,
};

#[derive(Parser)]
#[command(name = "unoutline")]
#[command(version)]
#[command(about = "Infer heading outlines from extracted document text", long_about = None)]
struct Cli {
    /// Input file (fragment JSON, page chunk JSON, or markdown)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Outline from font-sized text fragments
    Fonts {
        /// Input JSON array of {page, size, text} fragments
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of heading levels (1-6)
        #[arg(long, env = "UNOUTLINE_MAX_LEVELS", default_value = "3")]
        max_levels: usize,

        /// Number of extraction workers
        #[arg(long, env = "UNOUTLINE_WORKERS")]
        workers: Option<usize>,

        /// Extract pages sequentially
        #[arg(long)]
        sequential: bool,

        /// Fail on the first unreadable page
        #[arg(long, env = "UNOUTLINE_STRICT")]
        strict: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Outline from markdown page chunks or a markdown file
    #[command(alias = "md")]
    Markdown {
        /// Input page chunk JSON or markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Drop headings starting with a lowercase letter
        #[arg(long, env = "UNOUTLINE_SKIP_LOWERCASE")]
        skip_lowercase: bool,

        /// Renumber the levels present to H1..Hk
        #[arg(long)]
        compact_levels: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Process every .json and .md file in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Print an indented plain text outline
    Text {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Fonts {
            input,
            output,
            max_levels,
            workers,
            sequential,
            strict,
            compact,
        }) => {
            let mut extract_options = ExtractOptions::new().with_parallel(!sequential);
            if let Some(n) = workers {
                extract_options = extract_options.with_workers(n);
            }
            if strict {
                extract_options = extract_options.strict();
            }
            let outline_options = OutlineOptions::new().with_max_levels(max_levels);
            cmd_fonts(
                &input,
                output.as_deref(),
                extract_options,
                outline_options,
                json_format(compact),
            )
        }
        Some(Commands::Markdown {
            input,
            output,
            skip_lowercase,
            compact_levels,
            compact,
        }) => {
            let mut options = OutlineOptions::new().with_compact_levels(compact_levels);
            if skip_lowercase {
                options = options.skip_lowercase();
            }
            cmd_markdown(&input, output.as_deref(), options, json_format(compact))
        }
        Some(Commands::Batch { input, output }) => cmd_batch(&input, output.as_deref()),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: detect and print JSON if input is provided
            if let Some(input) = cli.input {
                cmd_auto(&input, json_format(cli.compact))
            } else {
                println!("{}", "Usage: unoutline <FILE>".yellow());
                println!("       unoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content.trim_end());
    }
    Ok(())
}

fn warn_if_degraded(report: &OutlineReport) {
    if !report.is_degraded() {
        return;
    }
    let pages: Vec<String> = report
        .failed_pages
        .iter()
        .map(|f| f.page.to_string())
        .collect();
    eprintln!(
        "{} {} of {} pages could not be extracted ({}); the outline may be incomplete",
        "Warning:".yellow().bold(),
        report.failed_pages.len(),
        report.page_count,
        pages.join(", ")
    );
}

fn cmd_fonts(
    input: &Path,
    output: Option<&Path>,
    extract_options: ExtractOptions,
    outline_options: OutlineOptions,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = FragmentDocument::open(input)?;

    let report = Unoutline::new()
        .with_extract_options(extract_options)
        .with_outline_options(outline_options)
        .process_source(&doc)?;
    warn_if_degraded(&report);

    emit(&report.to_json(format)?, output)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    options: OutlineOptions,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = detect_input_from_path(input)?;
    if kind == InputKind::Fragments {
        return Err(format!(
            "{} holds font fragments; use `unoutline fonts`",
            input.display()
        )
        .into());
    }

    let report = Unoutline::new()
        .with_outline_options(options)
        .process(input)?;

    emit(&report.to_json(format)?, output)
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let report = Unoutline::new().process(input)?;
    warn_if_degraded(&report);

    emit(&report.to_text(), output)
}

fn cmd_auto(input: &Path, format: JsonFormat) -> Result<(), Box<dyn std::error::Error>> {
    let report = Unoutline::new().process(input)?;
    warn_if_degraded(&report);

    emit(&report.to_json(format)?, None)
}

fn is_batch_input(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("md"))
}

fn cmd_batch(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_outlines", name))
    });
    fs::create_dir_all(&output_dir)?;

    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_batch_input(path))
        .collect();
    files.sort();
    log::debug!("Batch of {} files from {}", files.len(), input.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let builder = Unoutline::new();
    let mut failed = 0;
    for path in &files {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.to_string());

        let result = builder.process(path).and_then(|report| {
            if report.is_degraded() {
                pb.println(format!(
                    "{} {}: {} pages skipped",
                    "Warning:".yellow(),
                    name,
                    report.failed_pages.len()
                ));
            }
            report.to_json(JsonFormat::Pretty)
        });

        match result {
            Ok(json) => {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                fs::write(output_dir.join(format!("{}.json", stem)), json)?;
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "Failed".red(), name, e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} outlines written to {}",
        "Done!".green().bold(),
        files.len() - failed,
        output_dir.display()
    );
    if failed > 0 {
        println!("{} {} files failed", "Warning:".yellow().bold(), failed);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Heading outline inference tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_batch_input() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("a.json");
        let md = dir.path().join("b.MD");
        let txt = dir.path().join("c.txt");
        for path in [&json, &md, &txt] {
            fs::write(path, "# x").unwrap();
        }

        assert!(is_batch_input(&json));
        assert!(is_batch_input(&md));
        assert!(!is_batch_input(&txt));
        assert!(!is_batch_input(dir.path()));
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(
            input.path().join("fonts.json"),
            r#"[{"page": 1, "size": 20, "text": "Title"}, {"page": 1, "size": 12, "text": "Body"}]"#,
        )
        .unwrap();
        fs::write(input.path().join("notes.md"), "# Notes\n## First").unwrap();
        fs::write(input.path().join("broken.json"), "[1, 2, 3]").unwrap();

        cmd_batch(input.path(), Some(output.path())).unwrap();

        assert!(output.path().join("fonts.json").exists());
        assert!(output.path().join("notes.json").exists());
        assert!(!output.path().join("broken.json").exists());

        let notes = fs::read_to_string(output.path().join("notes.json")).unwrap();
        assert!(notes.contains("\"title\": \"Notes\""));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["unoutline", "fonts", "in.json", "--max-levels", "4", "--strict"]);
        match cli.command {
            Some(Commands::Fonts {
                max_levels, strict, ..
            }) => {
                assert_eq!(max_levels, 4);
                assert!(strict);
            }
            _ => panic!("expected fonts command"),
        }

        let cli = Cli::parse_from(["unoutline", "report.md"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.input, Some(PathBuf::from("report.md")));
    }
}
