//! Application loop: wires CLI arguments to scanners and cleaners.
//!
//! Each subcommand maps to one runner. Runners own the progress display, the
//! Ctrl+C flag plumbing for scans, and the exit-code decision; rendering goes
//! through [`crate::output`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::cleaner::{delete_folders_batch, move_file};
use crate::cli::{CleanArgs, Cli, Commands, DuplicatesArgs, LargeFilesArgs, MoveArgs, OutputFormat};
use crate::discovery::{DuplicateScanner, LargeFileScanner};
use crate::error::ExitCode;
use crate::output::{
    render_clean, render_duplicates, render_large_files, render_move, CleanCsv, CleanReport,
    DuplicateCsv, DuplicateReport, LargeFileCsv, LargeFileReport, MoveCsv, MoveReport,
};
use crate::progress::{DeleteProgress, ScanProgress, ScanProgressCallback};
use crate::signal::install_handler;

/// Run the application with parsed CLI arguments.
///
/// Returns the exit code the process should terminate with. `Err` is
/// reserved for failures that abort the operation outright; an interrupted
/// scan still returns `Ok` with [`ExitCode::Interrupted`] and whatever
/// results were gathered.
///
/// # Errors
///
/// Returns an error when a scan target is invalid, a deletion or move fails
/// outright, or output cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Duplicates(args) => run_duplicates(&args, cli.quiet),
        Commands::LargeFiles(args) => run_large_files(&args, cli.quiet),
        Commands::Clean(args) => run_clean(&args, cli.quiet),
        Commands::Move(args) => run_move(&args),
    }
}

fn run_duplicates(args: &DuplicatesArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    let handler = install_handler()?;
    let progress = Arc::new(ScanProgress::new(quiet));

    let scanner = DuplicateScanner::new()
        .with_min_size(args.min_size)
        .with_cancel_flag(handler.get_flag())
        .with_progress(Arc::clone(&progress) as Arc<dyn ScanProgressCallback>);

    let (groups, stats) = scanner.scan(&args.path)?;
    progress.finish();

    let exit_code = if stats.interrupted {
        ExitCode::Interrupted
    } else if groups.is_empty() {
        ExitCode::NothingFound
    } else {
        ExitCode::Success
    };

    let rendered = match args.output {
        OutputFormat::Text => render_duplicates(&groups, &stats),
        OutputFormat::Json => {
            let mut json = DuplicateReport::new(&groups, &stats, exit_code).to_json_pretty()?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => DuplicateCsv::new(&groups).to_string()?,
    };
    emit(&rendered, args.report.as_deref())?;

    Ok(exit_code)
}

fn run_large_files(args: &LargeFilesArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    let handler = install_handler()?;
    let progress = Arc::new(ScanProgress::new(quiet));

    let scanner = LargeFileScanner::new()
        .with_threshold(args.threshold)
        .with_cancel_flag(handler.get_flag())
        .with_progress(Arc::clone(&progress) as Arc<dyn ScanProgressCallback>);

    let (records, stats) = scanner.scan(&args.path)?;
    progress.finish();

    let exit_code = if stats.interrupted {
        ExitCode::Interrupted
    } else if records.is_empty() {
        ExitCode::NothingFound
    } else {
        ExitCode::Success
    };

    let rendered = match args.output {
        OutputFormat::Text => render_large_files(&records, &stats),
        OutputFormat::Json => {
            let mut json = LargeFileReport::new(&records, &stats, exit_code).to_json_pretty()?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => LargeFileCsv::new(&records).to_string()?,
    };
    emit(&rendered, args.report.as_deref())?;

    Ok(exit_code)
}

fn run_clean(args: &CleanArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    if !args.yes && !confirm_clean(&args.paths)? {
        println!("Aborted.");
        return Ok(ExitCode::GeneralError);
    }

    let progress = DeleteProgress::new(quiet);
    let result = delete_folders_batch(&args.paths, Some(&progress));

    let exit_code = if result.all_succeeded() {
        ExitCode::Success
    } else if result.success_count() == 0 {
        ExitCode::GeneralError
    } else {
        ExitCode::PartialSuccess
    };

    let rendered = match args.output {
        OutputFormat::Text => render_clean(&result),
        OutputFormat::Json => {
            let mut json = CleanReport::new(&result, exit_code).to_json_pretty()?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => CleanCsv::new(&result).to_string()?,
    };
    emit(&rendered, None)?;

    Ok(exit_code)
}

fn run_move(args: &MoveArgs) -> anyhow::Result<ExitCode> {
    let result = move_file(&args.source, &args.dest_dir)?;

    let rendered = match args.output {
        OutputFormat::Text => render_move(&result),
        OutputFormat::Json => {
            let mut json = MoveReport::new(&result).to_json_pretty()?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => MoveCsv::new(&result).to_string()?,
    };
    emit(&rendered, None)?;

    Ok(ExitCode::Success)
}

/// Ask the user to confirm a batch deletion. EOF counts as "no".
fn confirm_clean(paths: &[PathBuf]) -> anyhow::Result<bool> {
    println!("About to permanently delete {} folder(s):", paths.len());
    for path in paths {
        println!("  {}", path.display());
    }
    print!("Continue? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Send rendered output to stdout, or to the report file when one was given.
fn emit(rendered: &str, report: Option<&Path>) -> anyhow::Result<()> {
    match report {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            print!("{rendered}");
            io::stdout().flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cli_with(command: Commands) -> Cli {
        Cli {
            verbose: 0,
            quiet: true,
            no_color: true,
            json_errors: false,
            command,
        }
    }

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_duplicates_run_finds_pair() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.bin", b"same bytes in both files");
        write_file(dir.path(), "b.bin", b"same bytes in both files");
        write_file(dir.path(), "c.bin", b"unique contents here");

        let cli = cli_with(Commands::Duplicates(DuplicatesArgs {
            path: dir.path().to_path_buf(),
            min_size: 1,
            output: OutputFormat::Text,
            report: None,
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_duplicates_run_nothing_found() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "only.bin", b"by itself");

        let cli = cli_with(Commands::Duplicates(DuplicatesArgs {
            path: dir.path().to_path_buf(),
            min_size: 1,
            output: OutputFormat::Json,
            report: None,
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::NothingFound);
    }

    #[test]
    fn test_duplicates_run_missing_root_errors() {
        let dir = TempDir::new().unwrap();
        let cli = cli_with(Commands::Duplicates(DuplicatesArgs {
            path: dir.path().join("does-not-exist"),
            min_size: 1,
            output: OutputFormat::Text,
            report: None,
        }));

        assert!(run_app(cli).is_err());
    }

    #[test]
    fn test_duplicates_run_writes_report_file() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.bin", b"matching pair of files!!");
        write_file(dir.path(), "b.bin", b"matching pair of files!!");
        let report = dir.path().join("report.json");

        let cli = cli_with(Commands::Duplicates(DuplicatesArgs {
            path: dir.path().to_path_buf(),
            min_size: 1,
            output: OutputFormat::Json,
            report: Some(report.clone()),
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::Success);

        let contents = fs::read_to_string(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["summary"]["duplicate_groups"], 1);
    }

    #[test]
    fn test_large_files_run_with_threshold() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "big.bin", &[0u8; 4096]);
        write_file(dir.path(), "small.bin", &[0u8; 16]);

        let cli = cli_with(Commands::LargeFiles(LargeFilesArgs {
            path: dir.path().to_path_buf(),
            threshold: 1024,
            output: OutputFormat::Csv,
            report: None,
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_large_files_run_none_above_threshold() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "small.bin", &[0u8; 16]);

        let cli = cli_with(Commands::LargeFiles(LargeFilesArgs {
            path: dir.path().to_path_buf(),
            threshold: 1024,
            output: OutputFormat::Text,
            report: None,
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::NothingFound);
    }

    #[test]
    fn test_clean_run_deletes_folders() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("cache");
        fs::create_dir(&target).unwrap();
        write_file(&target, "blob.bin", &[0u8; 256]);

        let cli = cli_with(Commands::Clean(CleanArgs {
            paths: vec![target.clone()],
            yes: true,
            output: OutputFormat::Text,
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::Success);
        assert!(!target.exists());
    }

    #[test]
    fn test_clean_run_partial_failure() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good");
        fs::create_dir(&good).unwrap();
        let bad = write_file(dir.path(), "file-not-folder", b"x");

        let cli = cli_with(Commands::Clean(CleanArgs {
            paths: vec![bad, good.clone()],
            yes: true,
            output: OutputFormat::Json,
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::PartialSuccess);
        assert!(!good.exists());
    }

    #[test]
    fn test_clean_run_all_failed() {
        let dir = TempDir::new().unwrap();
        let bad = write_file(dir.path(), "file-not-folder", b"x");

        let cli = cli_with(Commands::Clean(CleanArgs {
            paths: vec![bad],
            yes: true,
            output: OutputFormat::Text,
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::GeneralError);
    }

    #[test]
    fn test_move_run_happy_path() {
        let dir = TempDir::new().unwrap();
        let source = write_file(dir.path(), "video.mp4", b"payload");
        let dest_dir = dir.path().join("archive");

        let cli = cli_with(Commands::Move(MoveArgs {
            source: source.clone(),
            dest_dir: dest_dir.clone(),
            output: OutputFormat::Text,
        }));

        let code = run_app(cli).unwrap();
        assert_eq!(code, ExitCode::Success);
        assert!(!source.exists());
        assert!(dest_dir.join("video.mp4").exists());
    }

    #[test]
    fn test_move_run_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let source = write_file(dir.path(), "video.mp4", b"new");
        let dest_dir = dir.path().join("archive");
        fs::create_dir(&dest_dir).unwrap();
        write_file(&dest_dir, "video.mp4", b"old");

        let cli = cli_with(Commands::Move(MoveArgs {
            source: source.clone(),
            dest_dir,
            output: OutputFormat::Text,
        }));

        let err = run_app(cli).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(source.exists());
    }
}
