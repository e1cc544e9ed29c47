#![forbid(unsafe_code)]

mod logger;
mod show;
mod walk;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::{error, info, warn};

use tagger::config::Config;
use tagger::id3v2::{self, write, Tag};
use tagger::template::{TemplateConfig, Vars};
use tagger::id3v1;

fn main() {
    logger::CliLogger::setup();

    let matches = App::new("tagger")
        .about("Read, edit, and batch-rewrite ID3v2.3 tags")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("info")
                .about("Show the tag of a file")
                .arg(Arg::with_name("file").value_name("FILE").required(true)),
        )
        .subcommand(
            SubCommand::with_name("tag")
                .about("Apply a JSON frame config to one file")
                .arg(
                    Arg::with_name("config")
                        .long("config")
                        .value_name("CONFIG")
                        .takes_value(true)
                        .required(true),
                )
                .arg(Arg::with_name("file").value_name("FILE").required(true)),
        )
        .subcommand(
            SubCommand::with_name("template-tag")
                .about("Tag every matching file in a directory from a template config")
                .arg(
                    Arg::with_name("template-config")
                        .long("template-config")
                        .value_name("CONFIG")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("apply")
                        .long("apply")
                        .help("Write the changes instead of just reporting them"),
                )
                .arg(Arg::with_name("dir").value_name("DIR").required(true)),
        )
        .subcommand(
            SubCommand::with_name("strip-v1")
                .about("Remove a trailing ID3v1 footer from a file")
                .arg(Arg::with_name("file").value_name("FILE").required(true)),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("info", Some(args)) => run_info(args),
        ("tag", Some(args)) => run_tag(args),
        ("template-tag", Some(args)) => run_template_tag(args),
        ("strip-v1", Some(args)) => run_strip_v1(args),
        _ => unreachable!(),
    };

    if let Err(err) = result {
        error!("{}", err);
        process::exit(1);
    }
}

fn run_info(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let path = args.value_of("file").unwrap();

    let tag = Tag::read_from(path)?;
    show::print_tag(path, &tag)?;

    Ok(())
}

fn run_tag(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let path = args.value_of("file").unwrap();

    let config = Config::from_json(&fs::read_to_string(args.value_of("config").unwrap())?)?;

    let mut tag = Tag::read_from(path)?;
    tag.apply_frames(config)?;
    write::write(&tag, path, path)?;

    show::print_tag(path, &Tag::read_from(path)?)?;

    Ok(())
}

fn run_template_tag(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = TemplateConfig::load(args.value_of("template-config").unwrap())?;
    let dir = Path::new(args.value_of("dir").unwrap());
    let apply = args.is_present("apply");

    // First pass counts the matches so templates can reference {total}
    // before the files they cover have been visited.
    let matched: Vec<(PathBuf, Vars)> = walk::files(dir)?
        .into_iter()
        .filter_map(|path| {
            let vars = config.match_path(&path.to_string_lossy())?;
            Some((path, vars))
        })
        .collect();

    let total = matched.len();
    info!("{} file(s) match the pattern", total);

    for (index, (path, mut vars)) in matched.into_iter().enumerate() {
        vars.insert(String::from("count"), (index + 1).to_string());
        vars.insert(String::from("total"), total.to_string());

        tag_file(&config, &path, &vars, apply)?;
    }

    if !apply {
        info!("dry run, nothing was written (pass --apply to write)");
    }

    Ok(())
}

/// Tags one matched file. Per-file conditions (no tag, wrong version,
/// undecodable frames) are reported and skipped; template errors and I/O
/// failures abort the whole run.
fn tag_file(
    config: &TemplateConfig,
    path: &Path,
    vars: &Vars,
    apply: bool,
) -> Result<(), Box<dyn Error>> {
    let frames = config.render_frames(vars)?;

    let mut tag = match Tag::read_from(path) {
        Ok(tag) => tag,
        Err(id3v2::Error::NoIdentifier) => {
            if !config.add_missing_tag() {
                info!("{}: no ID3 identifier, skipping", path.display());
                return Ok(());
            }

            Tag::new()
        }
        Err(err @ id3v2::Error::UnsupportedVersion { .. })
        | Err(err @ id3v2::Error::MalformedHeader)
        | Err(err @ id3v2::Error::UnknownFrameKind(_)) => {
            warn!("{}: {}, skipping", path.display(), err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    tag.apply_frames(frames)?;

    let dst = match config.render_output(vars)? {
        // Output names are rendered next to the source file.
        Some(name) => path.parent().unwrap_or_else(|| Path::new(".")).join(name),
        None => path.to_path_buf(),
    };

    if !apply {
        info!("would write {}", dst.display());
        return Ok(());
    }

    write::write(&tag, path, &dst)?;
    info!("wrote {}", dst.display());

    Ok(())
}

fn run_strip_v1(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let path = args.value_of("file").unwrap();

    if id3v1::strip(path)? {
        info!("stripped the ID3v1 footer from {}", path);
    } else {
        info!("{} has no ID3v1 footer", path);
    }

    Ok(())
}
