// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use nmv::dir;
use nmv::logging;
use nmv::name::{self, PrefixedFile};
use nmv::plan::{self, PlanOptions};

#[derive(Parser)]
#[command(name = "nmv")]
#[command(about = "Numeric move: renumber numerically prefixed files", long_about = None)]
#[command(after_help = "EXAMPLES:
  # Move 0001_intro.md to ordinal 3, shifting siblings only as needed
  nmv notes/0001_intro.md 3

  # Show what would happen without touching anything
  nmv -n notes/0001_intro.md 3")]
struct Cli {
    /// Prefixed file to move
    from: PathBuf,

    /// New ordinal (non-negative decimal)
    to: String,

    /// Rename without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// Print the renames and exit
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Shift later files up instead of absorbing free ordinals
    #[arg(long)]
    no_squash: bool,

    /// Always rename through temporary names
    #[arg(long)]
    stage: bool,

    /// Verbose output with timestamps, including the ordinal layout
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let new_ordinal = name::parse_ordinal(&cli.to).context("failed to parse TO argument")?;

    let from = PrefixedFile::from_path(&cli.from)
        .with_context(|| format!("FROM must name a prefixed file: {:?}", cli.from))?;
    let file_name = from.file_name();
    let directory = if from.directory.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        from.directory.clone()
    };

    let names = dir::scan(&directory)
        .with_context(|| format!("failed to list {:?}", directory))?;
    let options = PlanOptions {
        squash: !cli.no_squash,
    };
    let plan = plan::plan_with(&names, &file_name, new_ordinal, options)
        .with_context(|| format!("failed to plan move in {:?}", directory))?;

    log::info!("layout before: {}", plan.layout_before);
    log::info!("layout after:  {}", plan.layout_after);

    if plan.is_empty() {
        println!("nothing to rename");
        return Ok(());
    }

    for rename in &plan.renames {
        println!("{} -> {}", rename.from, rename.to);
    }
    if !plan.sequential_safe || cli.stage {
        println!("(renames are staged through temporary names)");
    }

    if cli.dry_run {
        return Ok(());
    }

    if !cli.yes && !confirm(plan.renames.len())? {
        println!("aborted, nothing renamed");
        return Ok(());
    }

    dir::apply(&directory, &plan, cli.stage).context("failed to rename files")?;
    return Ok(());
}

/// Ask on stdin. Anything but y/yes declines.
fn confirm(count: usize) -> Result<bool> {
    print!("rename {} file(s)? [y/N] ", count);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    return Ok(answer == "y" || answer == "yes");
}
