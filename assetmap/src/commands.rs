use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("assetmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("assetmap")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scan")
                .about(
                    "Statically scan a project tree and inventory its backend endpoints, \
                frontend menus, API call sites and the relations between them.",
                )
                .arg(
                    arg!(<SOURCE_DIR>)
                        .required(true)
                        .help("Root directory of the project to scan"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help(
                            "Write the report to this file (default: <SOURCE_DIR>/asset-inventory.json \
                        for json, stdout otherwise)",
                        ),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, markdown, csv")
                        .value_parser(["text", "json", "markdown", "md", "csv"])
                        .default_value("json"),
                )
                .arg(
                    arg!(-t --"threads" <NUM_WORKERS>)
                        .required(false)
                        .help("The number of blocking workers that read and scan files.")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4"),
                )
                .arg(
                    arg!(--"max-depth" <DEPTH>)
                        .required(false)
                        .help("Maximum directory depth below SOURCE_DIR (default: unlimited)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"ext" <EXT>)
                        .required(false)
                        .help("Only scan files with this extension (repeatable, comma separated)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"exclude" <DIR>)
                        .required(false)
                        .help("Additional directory name to skip (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"no-gitignore")
                        .required(false)
                        .help("Scan files even when .gitignore excludes them")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-v --"verbose")
                        .required(false)
                        .help("Enable debug logging on stderr")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
