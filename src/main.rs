//! postpress - blog post export tool

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use postpress::export::{self, Format};
use postpress::Post;

#[derive(Parser)]
#[command(name = "postpress")]
#[command(version, about = "Export blog posts to XLSX, CSV, DOCX, or PDF", long_about = None)]
#[command(after_help = "EXAMPLES:
    postpress posts.json posts.xlsx          Spreadsheet of all posts
    postpress posts.json posts.csv           Delimited table of all posts
    postpress -p 3 posts.json post_3.docx    Rich-text document for post 3
    postpress posts.json posts.pdf           Print collection
    postpress -p 3 posts.json post_3.pdf     Print document for post 3")]
struct Cli {
    /// Input file: JSON array of posts
    #[arg(value_name = "POSTS")]
    input: String,

    /// Output file (.xlsx, .csv, .docx, .pdf)
    #[arg(value_name = "OUTPUT")]
    output: String,

    /// Export a single post by id (required for .docx)
    #[arg(short, long)]
    post: Option<u64>,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let data = std::fs::read_to_string(&cli.input).map_err(|e| e.to_string())?;
    let posts: Vec<Post> = serde_json::from_str(&data).map_err(|e| e.to_string())?;

    let ext = Path::new(&cli.output)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    let format = Format::from_extension(ext).map_err(|e| e.to_string())?;

    let bytes = match (format, cli.post) {
        (Format::Spreadsheet, None) => {
            export::export_spreadsheet(&posts).map_err(|e| e.to_string())?
        }
        (Format::DelimitedTable, None) => export::export_delimited_table(&posts)
            .map_err(|e| e.to_string())?
            .into_bytes(),
        (Format::RichText, Some(id)) => {
            export::export_rich_text(&posts, id).map_err(|e| e.to_string())?
        }
        (Format::RichText, None) => {
            return Err("rich-text export needs --post <id>".to_string());
        }
        (Format::Print, Some(id)) => {
            export::export_print_single(&posts, id).map_err(|e| e.to_string())?
        }
        (Format::Print, None) => {
            let author = posts
                .first()
                .map(|p| p.author.clone())
                .ok_or("no posts to export")?;
            export::export_print_collection(&posts, &author).map_err(|e| e.to_string())?
        }
        (Format::Spreadsheet | Format::DelimitedTable, Some(_)) => {
            return Err("--post only applies to .docx and .pdf output".to_string());
        }
    };

    std::fs::write(&cli.output, &bytes).map_err(|e| e.to_string())?;

    if !cli.quiet {
        println!("Wrote {} ({} bytes)", cli.output, bytes.len());
    }
    Ok(())
}
