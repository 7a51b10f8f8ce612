//! Command-line interface for coursebook.
//!
//! Provides commands for listing and inspecting the catalog, linting
//! course documents and exporting the catalog for a front-end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, ResolvedConfig};
use crate::domain::{Course, LessonBody};
use crate::library::{check_document, parse_document, Catalog, DocumentFormat};

/// coursebook - Static course catalog and content linter
#[derive(Parser, Debug)]
#[command(name = "coursebook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List courses in the catalog
    List,

    /// Show the outline of a course
    Show {
        /// Course ID
        course_id: String,

        /// Print lesson bodies
        #[arg(short, long)]
        full: bool,
    },

    /// Lint course documents
    Validate {
        /// Course documents (.json, .yaml or .yml)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Export the catalog
    Export {
        /// Export a single course
        #[arg(long)]
        id: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Export serialization format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::List => list_courses().await,
            Commands::Show { course_id, full } => show_course(&course_id, full).await,
            Commands::Validate { files } => validate_files(&files).await,
            Commands::Export { id, format } => export_catalog(id.as_deref(), format).await,
            Commands::Config => show_config().await,
        }
    }
}

/// Load the catalog described by the resolved configuration
async fn load_catalog(cfg: &ResolvedConfig) -> Result<Catalog> {
    let loader = cfg.asset_loader();
    Catalog::load(cfg, &loader)
        .await
        .with_context(|| format!("Failed to load catalog from {}", cfg.content.display()))
}

/// Print the course table
async fn list_courses() -> Result<()> {
    let cfg = config::config()?;
    let catalog = load_catalog(cfg).await?;

    if catalog.is_empty() {
        println!("Catalog is empty. Add course documents to {}", cfg.content.display());
        return Ok(());
    }

    println!(
        "{:<14} {:<24} {:<24} {:>8} {:>8} {:>6}",
        "ID", "TITLE", "LEVELS", "SECTIONS", "LESSONS", "HOURS"
    );
    println!("{}", "-".repeat(89));

    for course in catalog.list_courses() {
        let title = if course.title.chars().count() > 23 {
            format!("{}...", course.title.chars().take(20).collect::<String>())
        } else {
            course.title.clone()
        };
        println!(
            "{:<14} {:<24} {:<24} {:>8} {:>8} {:>6}",
            course.id,
            title,
            level_span(course),
            course.sections.len(),
            course.total_lessons,
            course.estimated_hours
        );
    }

    println!("\nTotal: {} courses", catalog.len());

    Ok(())
}

fn level_span(course: &Course) -> String {
    match course.level_span() {
        Some((low, high)) if low == high => low.to_string(),
        Some((low, high)) => format!("{} - {}", low, high),
        None => "-".to_string(),
    }
}

/// Print a course outline
async fn show_course(course_id: &str, full: bool) -> Result<()> {
    let cfg = config::config()?;
    let catalog = load_catalog(cfg).await?;
    let course = catalog.get_course(course_id)?;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("  {} ({})", course.title, course.id);
    if !course.description.is_empty() {
        println!("  {}", course.description);
    }
    println!("  Levels: {}", level_span(course));
    println!(
        "  Lessons: {}  Questions: {}  Projects: {}  Hours: {}",
        course.total_lessons,
        course.question_count(),
        course.project_count(),
        course.estimated_hours
    );
    println!("╚═══════════════════════════════════════════════════════════════╝");

    for section in &course.sections {
        println!("\n[{}] {} ({})", section.id, section.title, section.level);

        for lesson in &section.lessons {
            println!("  - {:<40} {:>10}  {}", lesson.title, lesson.duration, lesson.body.kind());
            if full {
                print_body(&lesson.body);
            }
        }
        if let Some(quiz) = &section.quiz {
            println!("  ? {} ({} questions)", quiz.title, quiz.questions.len());
        }
        for project in &section.projects {
            println!("  * {}", project.title);
            if full {
                println!("      {}", project.description);
                println!("      Checkpoint: {}", project.checkpoint);
            }
        }
    }

    if !full {
        println!("\nUse --full to show lesson bodies");
    }

    Ok(())
}

fn print_body(body: &LessonBody) {
    match body {
        LessonBody::Text(text) | LessonBody::Markdown(text) => {
            println!();
            for line in text.lines() {
                println!("      {}", line);
            }
            println!();
        }
        LessonBody::Subtopics(subtopics) => {
            for subtopic in subtopics {
                println!("      # {}", subtopic.title);
                println!("        {}", subtopic.description);
                for code in &subtopic.code_lessons {
                    println!("        ── {} ──", code.title);
                    for line in code.code.lines() {
                        println!("        | {}", line);
                    }
                    println!("        {}", code.explanation);
                }
            }
        }
    }
}

/// Lint course documents, exiting non-zero if any has violations
async fn validate_files(files: &[PathBuf]) -> Result<()> {
    let cfg = config::config()?;
    let loader = cfg.asset_loader();
    let rules = cfg.catalog_options().rules;

    let mut failed = 0;

    for path in files {
        let format = DocumentFormat::from_path(path).with_context(|| {
            format!(
                "Unsupported document extension (expected .json, .yaml or .yml): {}",
                path.display()
            )
        })?;
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read document: {}", path.display()))?;

        let report = match parse_document(&text, format) {
            Ok(document) => check_document(document, &loader, &rules),
            Err(e) => {
                println!("✗ {}: {}", path.display(), e);
                failed += 1;
                continue;
            }
        };

        if report.is_valid() {
            println!("✓ {}", path.display());
        } else {
            println!("✗ {} ({} violations)", path.display(), report.violations.len());
            failed += 1;
        }
        for violation in &report.violations {
            println!("    error:   {}", violation);
        }
        for warning in &report.warnings {
            println!("    warning: {}", warning);
        }
    }

    if failed > 0 {
        eprintln!("\n[{} of {} documents failed validation]", failed, files.len());
        std::process::exit(1);
    }

    Ok(())
}

/// Print the export envelope
async fn export_catalog(id: Option<&str>, format: ExportFormat) -> Result<()> {
    let cfg = config::config()?;
    let catalog = load_catalog(cfg).await?;

    let export = match id {
        Some(id) => catalog.export_course(id)?,
        None => catalog.export()?,
    };

    let output = match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&export).context("Failed to serialize export")?
        }
        ExportFormat::Yaml => {
            serde_yaml::to_string(&export).context("Failed to serialize export")?
        }
    };
    println!("{}", output);

    Ok(())
}

/// Show resolved configuration
async fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("  Coursebook Configuration");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:     {}", cfg.home.display());
    println!("  Content:  {}", cfg.content.display());
    println!("  Assets:   {}", cfg.assets.display());
    println!();
    println!("Catalog:");
    println!("  Include built-in:  {}", cfg.include_builtin);
    println!("  Recompute totals:  {}", cfg.recompute_totals);
    println!("  Strict levels:     {}", cfg.strict_levels);
    println!("  Document pattern:  {}", cfg.document_pattern);

    Ok(())
}
