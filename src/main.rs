//! matfmt - Column aligner for keymap matrix definitions

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use matfmt::process::format_matrices;
use matfmt::{parse_args, CliArgs, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

/// File extensions considered when walking directories.
/// Explicitly listed files are processed regardless of extension.
const KEYMAP_EXTENSIONS: &[&str] = &["c", "h"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        return process_stdin();
    }

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No keymap files found to format.");
        }
        return Ok(());
    }

    // stdout output must stay in input order, so only in-place runs go parallel
    let use_sequential = !args.in_place || args.jobs == Some(1);
    let errors = if use_sequential {
        process_files_sequential(&files, &args)
    } else {
        process_files_parallel(&files, &args)
    };

    if errors > 0 {
        anyhow::bail!("failed to format {errors} file(s)");
    }

    Ok(())
}

/// Collect all files to process, handling directories and the recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // WalkDir detects symlink loops with follow_links(true) and
                // returns errors for them; we skip errors via filter_map(ok).
                // max_depth bounds runaway traversal.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_keymap_file(path)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_keymap_file(&path)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        } else {
            // Nonexistent path: keep it so processing reports the error
            files.push(input.clone());
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check if a file has a keymap-bearing extension
fn is_keymap_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| KEYMAP_EXTENSIONS.contains(&ext))
}

/// Process files one at a time, reporting errors as they occur.
/// Returns the number of files that failed.
fn process_files_sequential(files: &[PathBuf], args: &CliArgs) -> usize {
    let mut errors = 0;
    for path in files {
        if let Err(e) = process_single_file(path, args) {
            errors += 1;
            eprintln!("Error formatting {}: {}", path.display(), e);
        }
    }
    errors
}

/// Process files in parallel using Rayon (in-place mode only).
/// Returns the number of files that failed.
fn process_files_parallel(files: &[PathBuf], args: &CliArgs) -> usize {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        match process_single_file(path, args) {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error formatting {}: {}", path.display(), e);
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Formatted {success} files successfully.");
        } else {
            eprintln!("Formatted {success} files, {errors} errors.");
        }
    }

    errors
}

/// Process a single file
fn process_single_file(path: &PathBuf, args: &CliArgs) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(());
    }

    // Read input file into memory
    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    if !args.silent && args.in_place {
        eprintln!("Formatting: {}", path.display());
    }

    let reader = BufReader::new(Cursor::new(&file_contents));
    let mut output = Vec::new();
    format_matrices(reader, &mut output)?;

    if args.in_place {
        std::fs::write(path, &output)?;
    } else {
        io::stdout().write_all(&output)?;
    }

    Ok(())
}

/// Process input from stdin, output to stdout
fn process_stdin() -> Result<()> {
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    let reader = BufReader::new(Cursor::new(&stdin_contents));
    let mut output = Vec::new();
    format_matrices(reader, &mut output)?;

    io::stdout().write_all(&output)?;

    Ok(())
}

fn print_usage() {
    println!(
        "matfmt v{} - column aligner for keymap matrix definitions",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Lays out comma-separated matrix blocks (e.g. QMK keymaps) in aligned columns.");
    println!();
    println!("Usage:");
    println!("  matfmt [OPTIONS] <FILE>...");
    println!("  matfmt [OPTIONS] -r <DIRECTORY>");
    println!("  matfmt [OPTIONS] -              # Read from stdin");
    println!("  cat keymap.c | matfmt           # Pipe input");
    println!();
    println!("Examples:");
    println!("  matfmt keymap.c                 # Format to stdout");
    println!("  matfmt keymap.c > aligned.c     # Redirect the result");
    println!("  matfmt -i keymap.c              # Format in-place");
    println!("  matfmt -i -r keyboards/         # Recursively format a directory");
    println!();
    println!("Options:");
    println!("  -i, --in-place                  Write back to the input files");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -j, --jobs <NUM>                Parallel jobs for in-place runs (0=auto)");
    println!("  -S, --silent                    Silent mode");
    println!("  -h, --help                      Print help");
    println!();
    println!("Directory walks select .c and .h files; explicit file arguments are");
    println!("always processed regardless of extension.");
}
