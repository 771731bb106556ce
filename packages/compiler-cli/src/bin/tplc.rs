/**
 * Template Compiler CLI - tplc
 *
 * Compiles template files against a component context and prints the results
 */
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process;

use template_compiler_cli::logging::ConsoleLogger;
use template_compiler_cli::perform_compile::{perform_compilation, CompileOptions};

fn main() {
    let matches = Command::new("tplc")
        .version(template_compiler_cli::version())
        .about("Template expression compiler")
        .arg(
            Arg::new("context")
                .short('c')
                .long("context")
                .value_name("PATH")
                .required(true)
                .help("Context descriptor JSON (component, imports, local components)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Compiler configuration JSON"),
        )
        .arg(
            Arg::new("out")
                .short('o')
                .long("out")
                .value_name("DIR")
                .help("Write one .json file per template, mirroring the template tree, instead of printing"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log imports, scopes and accepted expressions"),
        )
        .arg(
            Arg::new("templates")
                .value_name("TEMPLATE")
                .num_args(1..)
                .required(true)
                .help("Template files or glob patterns"),
        )
        .get_matches();

    let options = CompileOptions {
        context: matches
            .get_one::<String>("context")
            .map(PathBuf::from)
            .unwrap_or_default(),
        config: matches.get_one::<String>("config").map(PathBuf::from),
        out_dir: matches.get_one::<String>("out").map(PathBuf::from),
        templates: matches
            .get_many::<String>("templates")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    };
    let logger = ConsoleLogger::for_verbosity(matches.get_flag("verbose"));

    match perform_compilation(&options, &logger) {
        Ok(summary) => process::exit(summary.exit_code()),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(2);
        }
    }
}
