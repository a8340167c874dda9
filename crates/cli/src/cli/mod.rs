use crate::args::{
    Args, CommandSpec, FlagSpec, ParamSpec, ParseError, ParseErrorKind, Registry,
};

pub mod ops;
pub mod run;

pub const FLAGS: &[FlagSpec] = &[
    FlagSpec {
        name: "--help",
        aliases: &["-h", "help"],
        description: "show help",
    },
    FlagSpec {
        name: "--version",
        aliases: &["-V"],
        description: "show version",
    },
];

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "--host",
        description: "host fixture JSON (defaults to $DOMSHIM_HOST)",
    },
    ParamSpec {
        name: "--surface",
        description: "DOM surface to install: full | query-only",
    },
];

pub const COMMANDS: &[CommandSpec] = &[run::COMMAND, ops::COMMAND];

pub fn registry() -> Registry {
    Registry {
        commands: COMMANDS,
        flags: FLAGS,
        params: PARAMS,
    }
}

/// Parse the process arguments and dispatch. Returns the exit code.
pub fn execute(registry: &Registry) -> i32 {
    execute_args(registry, std::env::args().skip(1).collect())
}

/// Exit code is 0 on success and 1 on any parse or command error.
pub fn execute_args(registry: &Registry, argv: Vec<String>) -> i32 {
    let outcome = Args::collect(argv, registry);
    if !outcome.errors.is_empty() {
        for error in &outcome.errors {
            print_parse_error(error);
        }
        return 1;
    }

    let args = outcome.args;
    if args.has_flag("--version") {
        println!("domshim {}", env!("CARGO_PKG_VERSION"));
        return 0;
    }

    let command = match args.command.as_deref().and_then(|name| registry.command(name)) {
        Some(command) if !args.has_flag("--help") => command,
        _ => {
            print_help(registry);
            return 0;
        }
    };

    match (command.handler)(&args) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("[{}] {:#}", command.name, err);
            eprintln!("[{}] {:#}", command.name, err);
            1
        }
    }
}

fn print_parse_error(error: &ParseError) {
    let message = match error.kind {
        ParseErrorKind::UnknownToken => format!("unknown argument: {}", error.token),
        ParseErrorKind::MissingParamValue => format!("missing value for {}", error.token),
    };
    if error.suggestions.is_empty() {
        eprintln!("[args] {}", message);
    } else {
        eprintln!(
            "[args] {} (did you mean {}?)",
            message,
            error.suggestions.join(", ")
        );
    }
}

fn print_help(registry: &Registry) {
    println!("usage: domshim <command> [options]");
    println!();
    println!("commands:");
    for command in registry.commands {
        println!("  {:<28} {}", command.usage, command.summary);
    }
    println!();
    println!("options:");
    for param in registry.params {
        println!("  {:<28} {}", format!("{} <value>", param.name), param.description);
    }
    for flag in registry.flags {
        println!("  {:<28} {}", flag.name, flag.description);
    }
}

pub(crate) fn first_positional<'a>(args: &'a Args, what: &str) -> anyhow::Result<&'a str> {
    args.positionals
        .first()
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("missing {}", what))
}
