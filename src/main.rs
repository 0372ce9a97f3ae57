use clap::{Parser, Subcommand};
use playcards::{config, output, pdf, process, sheet};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "playcards")]
#[command(about = "Generate Play & Guess song cards from a spreadsheet")]
#[command(long_about = "\
Generate Play & Guess song cards from a spreadsheet

Every row of the first worksheet becomes one card folder: a click-to-play
player page, a QR code linking to that page once published, and an info
image with the answer. A list index links every card.

Spreadsheet columns (any order, extra columns ignored):

  ID | Código YouTube | Título de la Canción | Cantante | Año

Output structure:

  output/
  └── lista1/
      ├── index.html               # Links to every card, sheet order
      ├── cancion03/
      │   ├── index.html           # Player page for the row with ID 3
      │   ├── qr.png               # → <domain>/output/lista1/cancion03/
      │   └── info.png             # Title, artist, year, \"ID: 03\"
      └── pdfs/
          └── cancion03.pdf        # Printable A4 card (--pdfs or 'pdfs')

Run 'playcards gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Root of the generated tree
    #[arg(long, default_value = "output", global = true)]
    output: PathBuf,

    /// Config file (optional; stock defaults when absent)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a list: one card folder per row plus the list index
    Build {
        /// Spreadsheet (xlsx, xlsm, xls or ods)
        sheet: PathBuf,
        /// List name; becomes the directory under the output root
        #[arg(long)]
        list: String,
        /// Base URL the output tree is published under
        #[arg(long)]
        domain: String,
        /// Also compose the printable PDFs
        #[arg(long)]
        pdfs: bool,
    },
    /// Compose printable PDFs for an already generated list
    Pdfs {
        /// List name under the output root
        #[arg(long)]
        list: String,
    },
    /// Parse the spreadsheet and show its rows without writing anything
    Check {
        sheet: PathBuf,
        /// Print the rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            sheet,
            list,
            domain,
            pdfs,
        } => {
            let config = config::load_config(&cli.config)?;
            println!("==> Building {} from {}", list, sheet.display());
            let request = process::BuildRequest {
                sheet,
                list_name: list,
                domain,
            };
            let report = process::build(&request, &cli.output, &config)?;
            output::print_build_output(&report);

            if pdfs {
                println!("==> Composing PDFs");
                let pdf_report = pdf::generate_pdfs(&report.list_root, &config)?;
                output::print_pdf_output(&pdf_report);
            }
            println!("==> Build complete: {}", report.list_root.display());
        }
        Command::Pdfs { list } => {
            let config = config::load_config(&cli.config)?;
            let list_root = process::list_root(&cli.output, &list)?;
            if !list_root.is_dir() {
                return Err(format!("list directory not found: {}", list_root.display()).into());
            }
            println!("==> Composing PDFs for {}", list_root.display());
            let pdf_report = pdf::generate_pdfs(&list_root, &config)?;
            output::print_pdf_output(&pdf_report);
        }
        Command::Check { sheet, json } => {
            let rows = sheet::read_sheet(&sheet)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                output::print_check_output(&rows, &sheet);
                println!("==> Spreadsheet is valid");
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
