use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use mdpress::config::{
    BorderStyle, PageNumberPosition, RenderConfig, ThemeColor, TitleStyle,
};

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(about = "Convert Markdown documents to styled, paginated PDFs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct StyleArgs {
    #[arg(long, help = "Base font size in points", default_value = "11")]
    font_size: f32,
    #[arg(long, help = "Line height multiplier", default_value = "1.6")]
    line_height: f32,
    #[arg(long, help = "Page margins (all four sides)", default_value = "20")]
    margins: f32,
    #[arg(long, help = "Theme color (blue, cyan, purple, green, orange, red, pink, yellow, indigo, teal)", default_value = "cyan")]
    theme: String,
    #[arg(long, help = "Heading style (bold, underline, background)", default_value = "bold")]
    title_style: String,
    #[arg(long, help = "Draw page borders")]
    borders: bool,
    #[arg(long, help = "Border style (simple, double, rounded, decorative, gradient)", default_value = "simple")]
    border_style: String,
    #[arg(long, help = "Add a diagonal watermark")]
    watermark: bool,
    #[arg(long, help = "Disable page numbers")]
    no_page_numbers: bool,
    #[arg(long, help = "Page number position (center, left, right)", default_value = "center")]
    page_number_position: String,
    #[arg(long, help = "Header text stamped on every page", default_value = "")]
    header: String,
    #[arg(long, help = "Footer text stamped on every page", default_value = "")]
    footer: String,
    #[arg(long, help = "JSON render options file; style flags are ignored when set")]
    options: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Convert a Markdown file to PDF")]
    Convert {
        #[arg(help = "Input Markdown file")]
        input: String,
        #[arg(help = "Output PDF file")]
        output: String,
        #[arg(long, help = "Document title stored in the PDF metadata")]
        title: Option<String>,
        #[command(flatten)]
        style: StyleArgs,
    },
    #[command(about = "Print the parsed document as plain text")]
    Text {
        #[arg(help = "Input Markdown file")]
        input: String,
    },
    #[command(about = "Convert many Markdown files in parallel")]
    Batch {
        #[arg(help = "Input Markdown files", num_args = 1..)]
        inputs: Vec<String>,
        #[arg(short, long, help = "Output directory")]
        out_dir: String,
        #[command(flatten)]
        style: StyleArgs,
    },
}

fn build_config(style: &StyleArgs) -> Result<RenderConfig> {
    if let Some(path) = &style.options {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {}", path))?;
        let config: RenderConfig = serde_json::from_str(&text)
            .with_context(|| format!("invalid options file {}", path))?;
        return Ok(config);
    }

    let Some(theme) = ThemeColor::from_name(&style.theme) else {
        bail!("unknown theme color '{}'", style.theme);
    };
    let Some(title_style) = TitleStyle::from_name(&style.title_style) else {
        bail!("unknown title style '{}'", style.title_style);
    };
    let Some(border_style) = BorderStyle::from_name(&style.border_style) else {
        bail!("unknown border style '{}'", style.border_style);
    };
    let Some(position) = PageNumberPosition::from_name(&style.page_number_position) else {
        bail!("unknown page number position '{}'", style.page_number_position);
    };

    let mut config = RenderConfig::default()
        .with_font_size(style.font_size)
        .with_line_height(style.line_height)
        .with_margins(style.margins)
        .with_theme(theme)
        .with_title_style(title_style)
        .with_watermark(style.watermark)
        .with_page_numbers(!style.no_page_numbers, position)
        .with_header(&style.header)
        .with_footer(&style.footer);
    if style.borders {
        config = config.with_borders(border_style);
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output, title, style } => {
            let config = build_config(&style)?;
            mdpress::convert_file(&input, &output, &config, title.as_deref())?;
            println!("[convert] {} -> {}", input, output);
        }
        Commands::Text { input } => {
            let markdown = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input))?;
            print!("{}", mdpress::markdown_to_text(&markdown));
        }
        Commands::Batch { inputs, out_dir, style } => {
            let config = build_config(&style)?;
            let out_dir = PathBuf::from(out_dir);
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("failed to create {}", out_dir.display()))?;

            let results =
                mdpress::parallel::convert_files_parallel(&inputs, Path::new(&out_dir), &config);
            let mut failed = 0usize;
            for item in &results {
                match &item.result {
                    Ok(()) => println!(
                        "[batch] {} -> {}",
                        item.input.display(),
                        item.output.display()
                    ),
                    Err(e) => {
                        failed += 1;
                        eprintln!("[batch] {} failed: {}", item.input.display(), e);
                    }
                }
            }
            println!("[batch] {} converted, {} failed", results.len() - failed, failed);
            if failed > 0 {
                bail!("{} of {} conversions failed", failed, results.len());
            }
        }
    }
    Ok(())
}
