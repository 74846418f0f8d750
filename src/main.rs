use std::fs;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record};
use reckon::{
    Emit, ExecutionContext, RunOptions, evaluate, interpreter::evaluator::function::library::install, parse,
    run,
};

/// reckon evaluates, optimizes and pretty-prints small formula programs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells reckon to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Optimize the program before evaluating or emitting it.
    #[arg(short = 'O', long)]
    optimize: bool,

    /// Also propagate single-assignment constants while optimizing. Names
    /// given with --var are never propagated.
    #[arg(long, requires = "optimize")]
    propagate: bool,

    /// What to print.
    #[arg(long, value_enum, default_value_t = EmitArg::Value)]
    emit: EmitArg,

    /// Supplies a host variable as NAME=EXPR. The expression is evaluated on
    /// its own, and assignments to NAME in the program are overridden.
    #[arg(long = "var", value_name = "NAME=EXPR")]
    vars: Vec<String>,

    /// Increases log output on stderr. Repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EmitArg {
    Value,
    Source,
    Ast,
    Scope,
}

impl From<EmitArg> for Emit {
    fn from(emit: EmitArg) -> Self {
        match emit {
            EmitArg::Value => Self::Value,
            EmitArg::Source => Self::Source,
            EmitArg::Ast => Self::Ast,
            EmitArg::Scope => Self::Scope,
        }
    }
}

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Evaluates one `NAME=EXPR` argument.
fn host_variable(binding: &str, functions: &ExecutionContext) -> Result<(String, reckon::Value), String> {
    let Some((name, expression)) = binding.split_once('=') else {
        return Err(format!("Expected NAME=EXPR, found '{binding}'."));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Missing variable name in '{binding}'."));
    }
    let tree = parse(expression).map_err(|e| format!("In --var {name}: {e}"))?;
    let value = evaluate(&tree, functions).map_err(|e| format!("In --var {name}: {e}"))?;
    Ok((name.to_string(), value))
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let library = install(ExecutionContext::new());
    let mut context = library.clone();
    for binding in &args.vars {
        match host_variable(binding, &library) {
            Ok((name, value)) => {
                context.variables.insert(name, value);
            },
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            },
        }
    }

    let options = RunOptions { optimize:  args.optimize,
                               propagate: args.propagate,
                               emit:      args.emit.into(), };

    match run(&script, &context, &options) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
