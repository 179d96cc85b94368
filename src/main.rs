//! `stylepath` — show how a stylesheet's `@import` tree resolves.

use stylepath::follow::{self, FollowConfig};

struct CliArgs {
    include_paths: Vec<String>,
    depth: Option<usize>,
    no_follow: bool,
    show_candidates: bool,
    files: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut include_paths = Vec::new();
    let mut depth: Option<usize> = None;
    let mut no_follow = false;
    let mut show_candidates = false;
    let mut files = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--no-follow" => no_follow = true,
            "--candidates" => show_candidates = true,
            "--include-path" | "-I" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    return Err("--include-path requires a directory argument".to_string());
                };
                include_paths.push(path.clone());
            }
            "--depth" | "-d" => {
                i += 1;
                let Some(raw) = args.get(i) else {
                    return Err("--depth requires a number argument".to_string());
                };
                let n: usize = raw
                    .parse()
                    .map_err(|_| format!("--depth: invalid number '{raw}'"))?;
                if n == 0 {
                    return Err("--depth must be at least 1".to_string());
                }
                depth = Some(n);
            }
            arg if arg.starts_with("-I") && arg.len() > 2 => {
                include_paths.push(arg[2..].to_string());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}"));
            }
            _ => files.push(args[i].clone()),
        }
        i += 1;
    }

    if no_follow && depth.is_some() {
        return Err("--no-follow and --depth are mutually exclusive".to_string());
    }

    Ok(CliArgs {
        include_paths,
        depth,
        no_follow,
        show_candidates,
        files,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let raw: Vec<String> = std::env::args().skip(1).collect();

    if raw.is_empty() || raw[0] == "-h" || raw[0] == "--help" {
        print_help();
        std::process::exit(0);
    }

    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("stylepath: {msg}");
            std::process::exit(1);
        }
    };

    if args.files.is_empty() {
        eprintln!("stylepath: no files specified");
        std::process::exit(1);
    }

    let config = FollowConfig {
        max_depth: if args.no_follow { Some(1) } else { args.depth },
        show_candidates: args.show_candidates,
    };

    let multi = args.files.len() > 1;
    for (i, entry) in args.files.iter().enumerate() {
        if i > 0 && multi {
            println!("\n---\n");
        }
        if let Err(e) = follow::run(entry, &args.include_paths, &config) {
            eprintln!("stylepath: {e}");
        }
    }
}

fn print_help() {
    eprintln!("stylepath — resolve and display stylesheet @import trees");
    eprintln!("Usage: stylepath [options] <file> [file2 ...]");
    eprintln!();
    eprintln!("Each import is looked up next to the importing stylesheet first,");
    eprintln!("then in the searchPaths of the nearest stylepath.json, then in");
    eprintln!("the -I directories, in the order given.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -I DIR, --include-path DIR   Extra search root (repeatable)");
    eprintln!("  --depth N, -d N              Max import depth (default: unlimited)");
    eprintln!("  --no-follow                  Show direct imports only");
    eprintln!("  --candidates                 List every candidate location");
    eprintln!("  -h, --help                   Show help");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace each candidate.");
}
