//! cvforge CLI - tailor CVs and cover letters onto DOCX templates

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cvforge::render::{self, JsonFormat};
use cvforge::{
    AssembleOptions, AssemblyStats, ContentModel, CoverLetter, CoverLetterAssembler, CvData,
    DocumentAssembler, FingerprintOptions, StyleOverrides, Template,
};

#[derive(Parser)]
#[command(name = "cvforge")]
#[command(author = "cvforge contributors")]
#[command(version)]
#[command(about = "Assemble CVs and cover letters in the style of a DOCX template", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a CV from content JSON
    Assemble {
        /// Template document
        #[arg(short, long, value_name = "FILE", env = "CVFORGE_TEMPLATE")]
        template: PathBuf,

        /// Content model JSON (sections and blocks)
        #[arg(value_name = "CONTENT", required_unless_present = "cv_data")]
        content: Option<PathBuf>,

        /// Structured CV data JSON instead of a content model
        #[arg(long, value_name = "FILE", conflicts_with = "content")]
        cv_data: Option<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "cv.docx")]
        output: PathBuf,

        /// Empty page headers and footers
        #[arg(long, env = "CVFORGE_CLEAR_HEADERS")]
        clear_headers: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Assemble a cover letter
    Letter {
        /// Template document
        #[arg(short, long, value_name = "FILE", env = "CVFORGE_TEMPLATE")]
        template: PathBuf,

        /// Letter JSON (salutation, body, signature, sender, contact, date)
        #[arg(long, value_name = "FILE", conflicts_with_all = ["salutation", "body", "body_file"])]
        letter: Option<PathBuf>,

        /// Opening line
        #[arg(long, default_value = "Dear Hiring Manager,")]
        salutation: String,

        /// Body paragraph (repeat for more)
        #[arg(long)]
        body: Vec<String>,

        /// Plain text file holding the letter; blank lines separate paragraphs
        #[arg(long, value_name = "FILE", conflicts_with = "body")]
        body_file: Option<PathBuf>,

        /// Closing and name; "\n" separates lines
        #[arg(long, env = "CVFORGE_SIGNATURE", default_value = "Sincerely,")]
        signature: String,

        /// Letter date (YYYY-MM-DD or "today")
        #[arg(long)]
        date: Option<String>,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "cover_letter.docx")]
        output: PathBuf,

        /// Keep page headers and footers from the template
        #[arg(long)]
        keep_headers: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Show the style fingerprint of a template
    Inspect {
        /// Template document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output the profile as JSON
        #[arg(long)]
        json: bool,

        /// Compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// List every classified paragraph
        #[arg(short, long)]
        paragraphs: bool,

        /// Do not infer headings from bold section titles
        #[arg(long)]
        no_infer: bool,
    },

    /// Compare the style fingerprints of two documents
    Compare {
        /// First document
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Second document
        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        /// Output differences as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct StyleArgs {
    /// Style override, e.g. font=Georgia or header=ArialBold (repeatable)
    #[arg(
        short,
        long = "suggest",
        value_name = "KEY=VALUE",
        env = "CVFORGE_SUGGEST",
        value_delimiter = ','
    )]
    suggest: Vec<String>,

    /// Drop characters a document cannot hold instead of failing
    #[arg(long)]
    strip_invalid: bool,

    /// Keep text exactly as given (no normalization or space cleanup)
    #[arg(long)]
    raw_text: bool,
}

impl StyleArgs {
    fn overrides(&self) -> cvforge::Result<StyleOverrides> {
        StyleOverrides::from_pairs(&self.suggest)
    }

    fn apply(&self, mut options: AssembleOptions) -> AssembleOptions {
        if self.strip_invalid {
            options = options.strip_invalid_chars();
        }
        if self.raw_text {
            options = options.raw_text();
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assemble {
            template,
            content,
            cv_data,
            output,
            clear_headers,
            style,
        } => cmd_assemble(
            &template,
            content.as_deref(),
            cv_data.as_deref(),
            &output,
            clear_headers,
            &style,
        ),
        Commands::Letter {
            template,
            letter,
            salutation,
            body,
            body_file,
            signature,
            date,
            output,
            keep_headers,
            style,
        } => {
            let source = LetterSource {
                letter,
                salutation,
                body,
                body_file,
                signature,
                date,
            };
            cmd_letter(&template, source, &output, keep_headers, &style)
        }
        Commands::Inspect {
            input,
            json,
            compact,
            paragraphs,
            no_infer,
        } => cmd_inspect(&input, json, compact, paragraphs, no_infer),
        Commands::Compare { left, right, json } => cmd_compare(&left, &right, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress(steps: u64) -> ProgressBar {
    let pb = ProgressBar::new(steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

fn cmd_assemble(
    template_path: &Path,
    content_path: Option<&Path>,
    cv_data_path: Option<&Path>,
    output: &Path,
    clear_headers: bool,
    style: &StyleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = style.overrides()?;
    log::debug!("{} style overrides", overrides.len());
    let options = style.apply(AssembleOptions::new().with_clear_page_headers(clear_headers));

    let pb = progress(3);

    pb.set_message("Fingerprinting template...");
    let template = Template::open_with_options(template_path, &options.fingerprint)?;
    pb.inc(1);

    pb.set_message("Reading content...");
    let content = match (content_path, cv_data_path) {
        (_, Some(path)) => {
            let include_header = clear_headers || !template.has_header_text();
            CvData::from_json(&fs::read_to_string(path)?)?.to_content_model_with(include_header)
        }
        (Some(path), None) => ContentModel::from_json(&fs::read_to_string(path)?)?,
        (None, None) => return Err("either CONTENT or --cv-data is required".into()),
    };
    pb.inc(1);

    pb.set_message("Assembling...");
    let result = DocumentAssembler::new(&template)
        .with_overrides(overrides)
        .with_options(options)
        .assemble(&content)?;
    fs::write(output, &result.bytes)?;
    pb.inc(1);

    pb.finish_with_message("Done!");
    print_stats(&result.stats);
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

struct LetterSource {
    letter: Option<PathBuf>,
    salutation: String,
    body: Vec<String>,
    body_file: Option<PathBuf>,
    signature: String,
    date: Option<String>,
}

impl LetterSource {
    fn into_letter(self) -> Result<CoverLetter, Box<dyn std::error::Error>> {
        let signature = self.signature.replace("\\n", "\n");
        let mut letter = if let Some(path) = &self.letter {
            serde_json::from_str::<CoverLetter>(&fs::read_to_string(path)?)?
        } else if let Some(path) = &self.body_file {
            let text = fs::read_to_string(path)?;
            let mut letter = CoverLetter::from_text(&text, &signature)?;
            if letter.salutation.is_empty() {
                letter.salutation = self.salutation.clone();
            }
            letter
        } else {
            CoverLetter::new(self.salutation.as_str(), self.body.iter().map(String::as_str), signature)
        };

        if let Some(date) = self.date.as_deref() {
            letter = letter.with_date(parse_date(date)?);
        }
        Ok(letter)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    if value.eq_ignore_ascii_case("today") {
        return Ok(chrono::Local::now().date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e).into())
}

fn cmd_letter(
    template_path: &Path,
    source: LetterSource,
    output: &Path,
    keep_headers: bool,
    style: &StyleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = style.overrides()?;
    let options = style.apply(AssembleOptions::letter().with_clear_page_headers(!keep_headers));
    let letter = source.into_letter()?;

    let template = Template::open_with_options(template_path, &options.fingerprint)?;
    let result = CoverLetterAssembler::new(&template)
        .with_overrides(overrides)
        .with_options(options)
        .assemble(&letter)?;
    fs::write(output, &result.bytes)?;

    print_stats(&result.stats);
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

fn print_stats(stats: &AssemblyStats) {
    println!();
    println!("{}", "Assembly".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Bullets".bold(), stats.bullet_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Contact lines".bold(), stats.contact_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!(
        "{}: {} replaced, {} kept",
        "Template body".bold(),
        stats.replaced_count,
        stats.preserved_count
    );
    if stats.cleared_story_count > 0 {
        println!("{}: {}", "Headers cleared".bold(), stats.cleared_story_count);
    }
}

fn cmd_inspect(
    input: &Path,
    json: bool,
    compact: bool,
    paragraphs: bool,
    no_infer: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = FingerprintOptions::new().with_infer_headings(!no_infer);
    let template = Template::open_with_options(input, &options)?;

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", render::to_json(template.profile(), format)?);
        return Ok(());
    }

    println!("{}", "Template Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}", render::summary_text(&template.summary()));

    println!();
    println!("{}", "Style Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", render::to_text(template.profile()));

    if paragraphs {
        println!();
        println!("{}", "Paragraphs".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", render::paragraphs_text(template.paragraphs()));
    }

    Ok(())
}

fn cmd_compare(left: &Path, right: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let a = cvforge::fingerprint_file(left)?;
    let b = cvforge::fingerprint_file(right)?;

    if json {
        let diffs = render::compare(&a, &b);
        println!("{}", render::serialize(&diffs, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        left.display().to_string().bold(),
        "vs".dimmed(),
        right.display().to_string().bold()
    );
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", render::compare_text(&a, &b));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "cvforge".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Template-aware CV and cover letter assembly");
    println!();
    println!("License: Apache-2.0");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> LetterSource {
        LetterSource {
            letter: None,
            salutation: "Dear Hiring Manager,".to_string(),
            body: vec!["First.".to_string()],
            body_file: None,
            signature: "Sincerely,\\nJane".to_string(),
            date: None,
        }
    }

    #[test]
    fn test_letter_from_flags() {
        let letter = source().into_letter().unwrap();
        assert_eq!(letter.salutation, "Dear Hiring Manager,");
        assert_eq!(letter.body, vec!["First.".to_string()]);
        assert_eq!(letter.signature_lines(), vec!["Sincerely,", "Jane"]);
    }

    #[test]
    fn test_letter_from_body_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letter.txt");
        fs::write(&path, "I am writing to apply.\n\nThank you.\n").unwrap();

        let letter = LetterSource {
            body_file: Some(path),
            date: Some("2026-03-04".to_string()),
            ..source()
        }
        .into_letter()
        .unwrap();
        assert_eq!(letter.salutation, "Dear Hiring Manager,");
        assert_eq!(letter.body.len(), 2);
        assert_eq!(letter.date_line().as_deref(), Some("March 04, 2026"));
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("today").is_ok());
        assert!(parse_date("04/03/2026").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "cvforge", "inspect", "template.docx", "--json", "--compact",
        ]);
        assert!(cli.is_ok());
    }
}
