//! Extract command - turn a folder of ticket PDFs into one table.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use tix_core::ticket::rules::format_german_amount;
use tix_core::{
    normalize_text, parse_delimiter, OutputEncoding, OutputError, PdfExtractor, PdfProcessor,
    PdfType, ResultTable, TableWriter, TicketExtractor, TicketFields, TicketParser, TicketRecord,
    TixConfig,
};

use super::config;

/// Arguments for extracting a folder of tickets.
#[derive(Args)]
pub struct ExtractArgs {
    /// Folder containing the PDF tickets
    #[arg(required_unless_present = "init_config")]
    folder: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long, default_value = "tickets.csv")]
    out: PathBuf,

    /// Field delimiter (e.g. ';' ',' '\t' '|')
    #[arg(long, default_value = ";", value_parser = parse_delimiter)]
    sep: u8,

    /// Search subfolders recursively
    #[arg(long)]
    recursive: bool,

    /// Output encoding (utf-8-sig adds a BOM for spreadsheet applications)
    #[arg(long, default_value = "utf-8-sig", value_parser = parse_encoding)]
    encoding: OutputEncoding,
}

fn parse_encoding(label: &str) -> Result<OutputEncoding, OutputError> {
    label.parse()
}

pub fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let folder = args
        .folder
        .as_deref()
        .context("No input folder given")?;

    // Load configuration and build the rules before touching any file
    let config = config::load(config_path)?;
    let parser = TicketParser::from_config(&config.extraction)
        .context("Invalid extraction rules in configuration")?;
    let writer = TableWriter::new()
        .with_delimiter(args.sep)
        .with_encoding(args.encoding);

    if !folder.is_dir() {
        anyhow::bail!("Input folder not found: {}", folder.display());
    }
    fs::read_dir(folder)
        .with_context(|| format!("Cannot read input folder {}", folder.display()))?;

    let files = discover_pdfs(folder, args.recursive);

    println!(
        "{} Found {} PDF files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut table = ResultTable::new();

    for path in &files {
        let source = source_name(folder, path);
        info!("Processing {}", source);

        match process_file(path, &parser, &config) {
            Ok(fields) => table.push(TicketRecord::extracted(source, fields)),
            Err(e) => {
                let error_msg = format!("{:#}", e);
                warn!("Failed to process {}: {}", path.display(), error_msg);
                table.push(TicketRecord::failed(source, error_msg));
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if table.is_empty() {
        warn!("No PDF files found in {}, writing header only", folder.display());
    }

    writer
        .write(&table, &args.out)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    print_report(&table, &args, start);

    Ok(())
}

/// Find `*.pdf` files (any case) below `folder`, sorted by path.
///
/// Symlinked directories are not descended into; symlinks to files count.
fn discover_pdfs(folder: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(folder).min_depth(1).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file() || (e.path_is_symlink() && e.path().is_file()))
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        })
        .collect();

    files.sort();
    debug!("Discovered {} PDF files under {}", files.len(), folder.display());
    files
}

/// Identifier of a file in the output table: its path relative to the input folder.
fn source_name(folder: &Path, path: &Path) -> String {
    let relative = path
        .strip_prefix(folder)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(path);

    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn process_file(
    path: &Path,
    parser: &TicketParser,
    config: &TixConfig,
) -> anyhow::Result<TicketFields> {
    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new().with_min_text_length(config.pdf.min_text_length);
    extractor.load(&data)?;

    debug!("{} has {} pages", path.display(), extractor.page_count());

    let text = normalize_text(&extractor.extract_text()?);
    if extractor.analyze(&text) == PdfType::Empty {
        warn!(
            "{} has no usable text layer (scanned ticket?), fields will be empty",
            path.display()
        );
    }

    Ok(parser.extract(&text))
}

fn print_report(table: &ResultTable, args: &ExtractArgs, start: Instant) {
    println!(
        "{} CSV written: {} (sep={:?}, {}) in {:.2?}",
        style("✓").green(),
        args.out.display(),
        args.sep as char,
        args.encoding,
        start.elapsed()
    );

    let failed = table.failed_count();
    println!(
        "   {} files processed, {} failed, {} fields unresolved",
        style(table.len()).green(),
        if failed > 0 {
            style(failed).red()
        } else {
            style(failed).green()
        },
        style(table.unresolved_fields()).yellow()
    );
    println!(
        "   Total price: {} €",
        format_german_amount(table.total_price())
    );

    if failed > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for record in table.records().iter().filter(|r| r.is_failed()) {
            println!(
                "  - {}: {}",
                record.source,
                record.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"%PDF-1.4").unwrap();
    }

    #[test]
    fn test_discover_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b.pdf"));
        touch(&root.join("A.PDF"));
        touch(&root.join("notes.txt"));
        touch(&root.join("2024").join("c.pdf"));
        fs::create_dir_all(root.join("folder.pdf")).unwrap();

        let flat: Vec<String> = discover_pdfs(root, false)
            .iter()
            .map(|p| source_name(root, p))
            .collect();
        assert_eq!(flat, vec!["A.PDF", "b.pdf"]);

        let deep: Vec<String> = discover_pdfs(root, true)
            .iter()
            .map(|p| source_name(root, p))
            .collect();
        assert_eq!(deep, vec!["2024/c.pdf", "A.PDF", "b.pdf"]);
    }

    #[test]
    fn test_discover_folder_with_brackets() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tickets [2024]");
        touch(&root.join("a.pdf"));

        assert_eq!(discover_pdfs(&root, false).len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_symlinked_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tickets");
        touch(&root.join("a.pdf"));
        touch(&dir.path().join("elsewhere").join("b.pdf"));
        std::os::unix::fs::symlink(&root, root.join("loop")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("elsewhere").join("b.pdf"), root.join("b.pdf"))
            .unwrap();

        let found: Vec<String> = discover_pdfs(&root, true)
            .iter()
            .map(|p| source_name(&root, p))
            .collect();
        assert_eq!(found, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_source_name() {
        let folder = Path::new("tickets");
        assert_eq!(source_name(folder, Path::new("tickets/a.pdf")), "a.pdf");
        assert_eq!(source_name(folder, Path::new("tickets/2024/b.pdf")), "2024/b.pdf");
        assert_eq!(source_name(folder, Path::new("other/c.pdf")), "other/c.pdf");
        assert_eq!(source_name(Path::new("./tickets"), Path::new("./tickets/a.pdf")), "a.pdf");
    }
}
