use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use md2jira::{ConvertOptions, Direction, convert_file, convert_str, convert_tree};

/// Convert between a Markdown dialect and Jira wiki markup.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Input file; `-` or nothing reads stdin.
    file: Option<PathBuf>,

    /// Convert Jira wiki markup to Markdown instead.
    #[arg(short, long)]
    reverse: bool,

    /// Spaces per list-nesting level.
    #[arg(long, default_value_t = 2, value_name = "N")]
    indent_width: usize,

    /// Indent Markdown list items with tabs instead of spaces.
    #[arg(long)]
    tabs: bool,

    /// Bulk mode: convert every matching file under SRC into DST,
    /// mirroring the directory layout.
    #[arg(long, num_args = 2, value_names = ["SRC", "DST"])]
    all: Option<Vec<PathBuf>>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let direction = if args.reverse {
        Direction::ToMarkdown
    } else {
        Direction::ToJira
    };
    let opts = ConvertOptions {
        indent_unit: args.indent_width,
        list_indent_tabs: args.tabs,
    };

    if let Some(roots) = &args.all {
        if let [src, dst] = roots.as_slice() {
            convert_tree(src, dst, direction, &opts)?;
        }
        return Ok(());
    }

    let output = match &args.file {
        Some(path) if path.as_os_str() != "-" => convert_file(path, direction, &opts)?,
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;

            // if we ever encounter invalid UTF-8, fallback to lossy conversion
            let text = String::from_utf8(buf)
                .unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).to_string());
            convert_str(&text, direction, &opts)
        }
    };

    // exactly one trailing newline on stdout
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}
