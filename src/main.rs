//! CLI entry point for canopy

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use canopy::output::report;
use canopy::{
    Columns, JsonNode, OutputConfig, SizeFormat, SortFlags, TreeFormatter, TreeWalker,
    WalkerConfig, print_json,
};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Sort key selectable with --sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortKey {
    Name,
    Version,
    Size,
    Mtime,
    Ctime,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "List directory contents as an annotated, colorized tree")]
#[command(version, disable_help_flag = true)]
struct Args {
    /// Directories to display
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Show hidden files (names starting with '.')
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// List directories only
    #[arg(short = 'd', long = "dirs-only")]
    dirs_only: bool,

    /// Follow symbolic links to directories
    #[arg(short = 'l', long = "follow")]
    follow: bool,

    /// Print the full path of each entry
    #[arg(short = 'f', long = "full-path")]
    full_path: bool,

    /// Descend only N levels deep (0 = unlimited)
    #[arg(short = 'L', long = "level", value_name = "N")]
    level: Option<usize>,

    /// List only files whose name matches the regex
    #[arg(short = 'P', long = "pattern", value_name = "REGEX")]
    pattern: Option<String>,

    /// Do not list files whose name matches the regex
    #[arg(short = 'I', long = "ignore", value_name = "REGEX")]
    ignore: Option<String>,

    /// Match -P and -I patterns case-insensitively
    #[arg(long = "ignore-case")]
    ignore_case: bool,

    /// Omit the directory and file count at the end
    #[arg(long = "noreport")]
    noreport: bool,

    /// Print the size of each file in bytes
    #[arg(short = 's', long = "size")]
    size: bool,

    /// Print sizes in a human readable format (e.g. 1.5K)
    #[arg(short = 'h', long = "human")]
    human: bool,

    /// Print file type and permissions
    #[arg(short = 'p', long = "perms")]
    perms: bool,

    /// Print the file owner (or uid)
    #[arg(short = 'u', long = "owner")]
    owner: bool,

    /// Print the file group id
    #[arg(short = 'g', long = "group")]
    group: bool,

    /// Print the date of last modification
    #[arg(short = 'D', long = "date")]
    date: bool,

    /// Print the inode number of each file
    #[arg(long = "inodes")]
    inodes: bool,

    /// Print the device number of each file
    #[arg(long = "device")]
    device: bool,

    /// Quote file names in double quotes
    #[arg(short = 'Q', long = "quote")]
    quote: bool,

    /// Sort files by version
    #[arg(short = 'v')]
    version_sort: bool,

    /// Sort files by last modification time
    #[arg(short = 't')]
    mtime_sort: bool,

    /// Sort files by last status change time
    #[arg(short = 'c')]
    ctime_sort: bool,

    /// Leave files unsorted
    #[arg(short = 'U', long = "unsorted")]
    unsorted: bool,

    /// Reverse the order of the sort
    #[arg(short = 'r', long = "reverse")]
    reverse: bool,

    /// List directories before files
    #[arg(long = "dirsfirst")]
    dirs_first: bool,

    /// Select sort key
    #[arg(long = "sort", value_name = "KEY")]
    sort: Option<SortKey>,

    /// Don't print indentation lines
    #[arg(short = 'i', long = "no-indent")]
    no_indent: bool,

    /// Turn colorization on always
    #[arg(short = 'C', conflicts_with = "no_color")]
    force_color: bool,

    /// Turn colorization off always
    #[arg(short = 'n')]
    no_color: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,
}

impl Args {
    fn color_mode(&self) -> ColorMode {
        if self.no_color {
            ColorMode::Never
        } else if self.force_color {
            ColorMode::Always
        } else {
            self.color
        }
    }

    fn sort_flags(&self) -> SortFlags {
        let sort = |key: SortKey| self.sort == Some(key);
        SortFlags {
            no_sort: self.unsorted,
            mod_time: self.mtime_sort || sort(SortKey::Mtime),
            change_time: self.ctime_sort || sort(SortKey::Ctime),
            dirs_first: self.dirs_first,
            version: self.version_sort || sort(SortKey::Version),
            size: sort(SortKey::Size),
            name: sort(SortKey::Name),
        }
    }

    fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            show_all: self.all,
            max_depth: self.level,
            dirs_only: self.dirs_only,
            pattern: self.pattern.clone(),
            ignore_pattern: self.ignore.clone(),
            ignore_case: self.ignore_case,
            sort: self.sort_flags().resolve(),
            reverse: self.reverse,
        }
    }

    fn output_config(&self) -> OutputConfig {
        let size = if self.human {
            Some(SizeFormat::Human)
        } else if self.size {
            Some(SizeFormat::Bytes)
        } else {
            None
        };
        OutputConfig {
            use_color: !self.json && should_use_color(self.color_mode()),
            full_path: self.full_path,
            no_indent: self.no_indent,
            quote_names: self.quote,
            follow_links: self.follow,
            columns: Columns {
                inode: self.inodes,
                device: self.device,
                mode: self.perms,
                owner: self.owner,
                group: self.group,
                size,
                mtime: self.date,
            },
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CANOPY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> io::Result<()> {
    let walker = TreeWalker::new(args.walker_config());
    let formatter = TreeFormatter::new(args.output_config(), &walker);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (mut dirs, mut files) = (0, 0);
    let mut json_roots = Vec::new();
    for path in &args.paths {
        let (tree, (d, f)) = walker.walk(path);
        tracing::debug!(root = %path.display(), dirs = d, files = f, "walked");
        // the root directory itself is not counted
        dirs += d.saturating_sub(1);
        files += f;

        if args.json {
            json_roots.push(JsonNode::from_tree(&tree, &walker, args.follow));
        } else {
            formatter.print(&tree, &mut out)?;
        }
    }

    if args.json {
        print_json(&json_roots, (dirs, files), &mut out)?;
    } else if !args.noreport {
        writeln!(out)?;
        writeln!(out, "{}", report(dirs, files, args.dirs_only))?;
    }
    out.flush()
}

fn main() {
    let args = Args::parse();
    init_logging();

    if let Err(e) = run(&args) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return;
        }
        eprintln!("canopy: error writing output: {}", e);
        process::exit(1);
    }
}
