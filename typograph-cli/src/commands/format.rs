//! Format command implementation

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use typograph_core::{EntityFormat, RuleOptions, Typograph};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{file_reader::STDIN, resolve_patterns, FileReader};
use crate::output::{Document, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use crate::rules_source::RulesSource;

/// Arguments for the format command
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Input files or patterns (supports glob); standard input when omitted or `-`
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from the configuration file, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output form of special characters
    #[arg(short, long, value_enum)]
    pub entities: Option<EntityArg>,

    /// Embedded rule preset
    #[arg(short = 'P', long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Rule options file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// CLI configuration file
    #[arg(short, long, value_name = "FILE", env = "TYPOGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Force parallel processing even for a few files
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads (default: from the configuration, else all CPUs)
    #[arg(short, long, value_name = "COUNT")]
    pub threads: Option<usize>,

    /// Record which rules touched each token (visible in JSON output)
    #[arg(long)]
    pub debug: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Entity output forms accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EntityArg {
    /// `&laquo;`
    Named,
    /// `&#171;`
    Numeric,
    /// `&#xab;`
    Hex,
    /// Literal characters
    Raw,
}

impl From<EntityArg> for EntityFormat {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Named => EntityFormat::Named,
            EntityArg::Numeric => EntityFormat::Numeric,
            EntityArg::Hex => EntityFormat::Hex,
            EntityArg::Raw => EntityFormat::Raw,
        }
    }
}

/// An input before formatting
struct Source {
    name: String,
    text: String,
}

impl FormatArgs {
    /// Execute the format command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting formatting");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let options = self.rule_options(&config)?;
        let entities = options.entities;
        let typograph = Typograph::with_options(options).map_err(CliError::from)?;
        log::debug!("{} rules enabled", typograph.rules().rules().len());

        let sources = self.read_sources()?;
        let documents = self.process(&typograph, sources, &config)?;

        let format = self.format.unwrap_or(config.output.default_format);
        let mut formatter = self.formatter(format, entities, &config)?;
        for document in &documents {
            formatter.write_document(document)?;
        }
        formatter.finish()?;

        log::info!("Formatted {} document(s)", documents.len());
        Ok(())
    }

    /// Options from the selected source with command-line overrides applied
    fn rule_options(&self, config: &CliConfig) -> Result<RuleOptions> {
        let source = RulesSource::from_args(self.preset.as_deref(), self.rules.as_ref());
        log::info!("Rules: {}", source.display_name());

        let mut options = source.load(config)?;
        if let Some(entities) = self.entities {
            options.entities = entities.into();
        }
        if self.debug {
            options.debug = true;
        }
        Ok(options)
    }

    fn read_sources(&self) -> Result<Vec<Source>> {
        if self.input.is_empty() || self.input.iter().all(|i| i == "-") {
            return Ok(vec![Source {
                name: STDIN.to_string(),
                text: FileReader::read_stdin()?,
            }]);
        }

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to format", files.len());

        files
            .iter()
            .map(|path| -> Result<Source> {
                log::debug!(
                    "Reading {} ({} bytes)",
                    path.display(),
                    FileReader::file_size(path)?
                );
                Ok(Source {
                    name: path.display().to_string(),
                    text: FileReader::read_text(path)?,
                })
            })
            .collect()
    }

    fn process(
        &self,
        typograph: &Typograph,
        sources: Vec<Source>,
        config: &CliConfig,
    ) -> Result<Vec<Document>> {
        let mut progress = ProgressReporter::new(self.quiet || sources.len() < 2);
        progress.init_files(sources.len() as u64);

        let format_one = |source: Source| {
            let result = typograph.process(&source.text);
            progress.file_completed(&source.name);
            Document {
                source: source.name,
                original: source.text,
                result,
            }
        };

        let parallel = self.parallel || sources.len() >= config.performance.parallel_min_files;
        let documents: Vec<Document> = if parallel && sources.len() > 1 {
            let threads = self.threads.unwrap_or_else(|| config.performance.threads());
            log::info!("Formatting in parallel on {threads} thread(s)");
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| CliError::ProcessingError(e.to_string()))?;
            pool.install(|| sources.into_par_iter().map(format_one).collect())
        } else {
            sources.into_iter().map(format_one).collect()
        };

        progress.finish();
        Ok(documents)
    }

    fn formatter(
        &self,
        format: OutputFormat,
        entities: EntityFormat,
        config: &CliConfig,
    ) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        Ok(match format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(
                writer,
                entities,
                config.output.token_limit,
                config.output.pretty_json,
            )),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
