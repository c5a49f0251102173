//! godocs: CLI tool to translate Godot documentation markup

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use bbcode_parser::{BbcodeInterpreter, Interpreter, InterpreterOptions};
use godocs_core::{DocContext, Pipeline, PipelineOptions, Syntax, translate_context};

use crate::config::{CONFIG_FILE_NAME, Config};

#[derive(Parser, Debug)]
#[command(name = "godocs")]
#[command(about = "Translate Godot documentation markup to reStructuredText or Markdown")]
#[command(version)]
#[command(after_help = "Examples:
  godocs translate brief.txt              # Print reStructuredText to stdout
  godocs translate brief.txt -t md        # Translate to Markdown
  cat brief.txt | godocs translate -      # Read markup from stdin
  godocs ast brief.txt --json             # Show the interpreted tree as JSON
  godocs classes docs.json -o out.json    # Translate every class description
  godocs init                             # Write a sample _godocs.toml")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to _godocs.toml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a markup file
    Translate {
        /// Input markup file (stdin when absent or "-")
        input: Option<PathBuf>,

        #[command(flatten)]
        translation: TranslationArgs,

        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the interpreted tree of a markup file
    Ast {
        /// Input markup file (stdin when absent or "-")
        input: Option<PathBuf>,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,

        /// Maximum nesting depth of interpreted markup
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Translate every description of a JSON documentation context
    Classes {
        /// Input JSON file with a "classes" array
        input: PathBuf,

        #[command(flatten)]
        translation: TranslationArgs,

        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of parallel jobs (defaults to number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Create a sample configuration file
    Init {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the JSON schema of the configuration instead
        #[arg(long)]
        schema: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Translation flags shared by commands; they override the config file
#[derive(Args, Debug)]
struct TranslationArgs {
    /// Target syntax: rst or md
    #[arg(short = 't', long = "to")]
    syntax: Option<Syntax>,

    /// Fail on tags the target syntax cannot render
    #[arg(long)]
    strict: bool,

    /// Drop tags the target syntax cannot render, even if the config sets strict
    #[arg(long, conflicts_with = "strict")]
    no_strict: bool,

    /// Maximum nesting depth of interpreted markup
    #[arg(long)]
    max_depth: Option<usize>,
}

impl TranslationArgs {
    /// Strict mode requested on the command line, if any
    fn strict(&self) -> Option<bool> {
        match (self.strict, self.no_strict) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Effective translation settings after merging flags and config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Settings {
    syntax: Syntax,
    strict: bool,
    max_depth: Option<usize>,
}

impl Settings {
    fn resolve(args: &TranslationArgs, config: &Config) -> Result<Self> {
        let syntax = match (args.syntax, &config.translation.syntax) {
            (Some(syntax), _) => syntax,
            (None, Some(name)) => name
                .parse()
                .with_context(|| format!("Invalid syntax in config: {}", name))?,
            (None, None) => Syntax::default(),
        };

        Ok(Settings {
            syntax,
            strict: args
                .strict()
                .or(config.translation.strict)
                .unwrap_or(false),
            max_depth: args.max_depth.or(config.translation.max_depth),
        })
    }

    fn pipeline(&self) -> Pipeline {
        Pipeline::for_syntax(
            self.syntax,
            InterpreterOptions {
                max_depth: self.max_depth,
            },
            PipelineOptions {
                strict: self.strict,
            },
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.quiet);

    let config = || load_config(cli.config.as_deref());

    match &cli.command {
        Command::Translate {
            input,
            translation,
            output,
        } => run_translate(
            input.as_deref(),
            translation,
            output.as_deref(),
            &config()?,
            cli.quiet,
        ),
        Command::Ast {
            input,
            json,
            max_depth,
        } => run_ast(input.as_deref(), *json, *max_depth, &config()?, cli.quiet),
        Command::Classes {
            input,
            translation,
            output,
            jobs,
            compact,
        } => run_classes(
            input,
            translation,
            output.as_deref(),
            *jobs,
            *compact,
            &config()?,
            cli.quiet,
        ),
        Command::Init {
            output,
            schema,
            force,
        } => run_init(output.as_deref(), *schema, *force, cli.quiet),
    }
}

fn run_translate(
    input: Option<&Path>,
    translation: &TranslationArgs,
    output: Option<&Path>,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    let settings = Settings::resolve(translation, config)?;
    let text = read_input(input)?;

    tracing::debug!(syntax = %settings.syntax, strict = settings.strict, "translating markup");
    let translated = settings
        .pipeline()
        .translate(&text)
        .with_context(|| format!("Failed to translate: {}", describe_input(input)))?;

    write_output(output, &translated, quiet)
}

fn run_ast(
    input: Option<&Path>,
    json: bool,
    max_depth: Option<usize>,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    let text = read_input(input)?;
    let interpreter = BbcodeInterpreter::with_options(InterpreterOptions {
        max_depth: max_depth.or(config.translation.max_depth),
    });
    let root = interpreter.interpret(&text);

    let rendered = if json {
        root.to_json_pretty().context("Failed to serialize tree")?
    } else {
        root.to_string()
    };

    write_output(None, &rendered, quiet)
}

fn run_classes(
    input: &Path,
    translation: &TranslationArgs,
    output: Option<&Path>,
    jobs: Option<usize>,
    compact: bool,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    let settings = Settings::resolve(translation, config)?;
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;
    let context = DocContext::from_json(&content).with_context(|| {
        format!(
            "Failed to parse documentation context: {}",
            input.display()
        )
    })?;

    // Configure thread pool if jobs specified
    if let Some(n) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    tracing::info!(
        classes = context.classes.len(),
        syntax = %settings.syntax,
        "translating classes"
    );
    let translated = translate_context(&context, &settings.pipeline())
        .with_context(|| format!("Failed to translate: {}", input.display()))?;

    let pretty = !compact && config.output.pretty.unwrap_or(true);
    let json = if pretty {
        translated.to_json_pretty()?
    } else {
        translated.to_json()?
    };

    write_output(output, &json, quiet)
}

/// Load the config given on the command line, or `_godocs.toml` if present
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::load_from_dir(Path::new("."))?.unwrap_or_default()),
    }
}

fn run_init(output: Option<&Path>, schema: bool, force: bool, quiet: bool) -> Result<()> {
    if schema {
        let schema = Config::json_schema_string()?;
        return match output {
            Some(path) => write_file(path, &schema, force, quiet),
            None => write_output(None, &schema, quiet),
        };
    }

    let path = output.unwrap_or(Path::new(CONFIG_FILE_NAME));
    let content = Config::sample().to_toml_with_schema()?;
    write_file(path, &content, force, quiet)
}

/// Write a new file, refusing to replace an existing one unless forced
fn write_file(path: &Path, content: &str, force: bool, quiet: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "File already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    write_output(Some(path), content, quiet)
}

fn is_stdin(input: Option<&Path>) -> bool {
    input.is_none_or(|path| path == Path::new("-"))
}

fn describe_input(input: Option<&Path>) -> String {
    match input {
        Some(path) if !is_stdin(Some(path)) => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

/// Read markup from a file, or from stdin for `None` and `-`
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if !is_stdin(Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Write to a file (creating parent directories), or to stdout for `None`
fn write_output(output: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    let Some(path) = output else {
        if content.ends_with('\n') {
            print!("{}", content);
        } else {
            println!("{}", content);
        }
        return Ok(());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write: {}", path.display()))?;

    if !quiet {
        println!("{}", path.display());
    }

    Ok(())
}
