use crate::config::{Config, Preset, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use panelgen_introspect::{snapshot, Generator, RuleSet};
use panelgen_runtime::{HostVersion, Logger};
use serde_json::{Map, Value as Json};
use std::fs::{self, File};
use std::io::{self, BufReader, Stderr, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Snapshot file, or a directory of `.json` snapshots
    pub input: PathBuf,

    /// Config file (defaults to panelgen.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Property of the snapshot root to generate for (overrides config)
    #[arg(short, long)]
    pub global: Option<String>,

    /// Root interface name (overrides config)
    #[arg(long)]
    pub root_name: Option<String>,

    /// Write declarations to this file instead of stdout
    #[arg(short, long, conflicts_with = "out_dir")]
    pub out: Option<PathBuf>,

    /// Write one `.d.ts` file per snapshot into this directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// Everything needed to turn one snapshot into declarations
struct Pipeline {
    generator: Generator<RuleSet>,
    global: Option<String>,
    inject: Map<String, Json>,
    detect_host: bool,
}

pub fn generate(args: GenerateArgs, cwd: &str) -> Result<()> {
    let cwd = PathBuf::from(cwd);
    let mut logger = Logger::new("panelgen").with_output(io::stderr());

    let mut config = match &args.config {
        Some(path) => Config::load_file(&cwd.join(path))?,
        None => Config::load(&cwd.display().to_string())?,
    };
    if args.global.is_some() {
        config.global = args.global.clone();
    }
    if args.root_name.is_some() {
        config.root_name = args.root_name.clone();
    }

    let pipeline = Pipeline {
        generator: Generator::new(config.generator_options()).with_resolver(config.rule_set()),
        global: config.global.clone(),
        inject: config.inject.clone(),
        detect_host: config.preset == Preset::KirbyPanel,
    };

    let input = cwd.join(&args.input);
    if input.is_file() {
        let output = pipeline.run(&input, &mut logger)?;
        let Some(output) = output else {
            return Ok(());
        };

        match (&args.out, &args.out_dir) {
            (Some(out), _) => write_output(&cwd.join(out), &output, &mut logger)?,
            (None, Some(out_dir)) => {
                let name = input.file_name().map(PathBuf::from).unwrap_or_default();
                let target = cwd.join(out_dir).join(name).with_extension("d.ts");
                write_output(&target, &output, &mut logger)?;
            }
            (None, None) => print!("{}", output),
        }
        return Ok(());
    }

    if !input.is_dir() {
        bail!("Input path does not exist: {}", input.display());
    }
    if args.out.is_some() {
        bail!("--out takes a single snapshot; use --out-dir for directories");
    }

    let snapshots = find_snapshots(&input);
    if snapshots.is_empty() {
        logger.warn(format!("No snapshots found in {}", input.display()));
        return Ok(());
    }
    logger.log(format!("Found {} snapshots", snapshots.len()));

    let mut success_count = 0;
    let mut error_count = 0;

    for path in &snapshots {
        let relative_path = path.strip_prefix(&input).unwrap_or(path);

        match pipeline.run(path, &mut logger) {
            Ok(Some(output)) => {
                match &args.out_dir {
                    Some(out_dir) => {
                        let target = cwd.join(out_dir).join(relative_path).with_extension("d.ts");
                        write_output(&target, &output, &mut logger)?;
                    }
                    None => {
                        println!("// {}", relative_path.display());
                        print!("{}", output);
                    }
                }
                success_count += 1;
            }
            Ok(None) => {}
            Err(err) => {
                error_count += 1;
                logger.error(format!("{}: {:#}", relative_path.display(), err));
            }
        }
    }

    if error_count > 0 {
        return Err(anyhow!(
            "Generated {} snapshots, {} failed",
            success_count,
            error_count
        ));
    }

    logger.success(format!("Generated {} snapshots", success_count));
    Ok(())
}

impl Pipeline {
    /// Declarations for one snapshot file; `None` when the configured global
    /// is absent
    fn run(&self, path: &Path, logger: &mut Logger<Stderr, Stderr>) -> Result<Option<String>> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut snapshot = snapshot::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to decode snapshot {}", path.display()))?;

        let target = match &self.global {
            Some(key) => match snapshot.global(key) {
                Some(value) => value.clone(),
                None => {
                    warn!(key = %key, path = %path.display(), "Global not found");
                    logger.warn(format!("{} has no `{}`, skipping", path.display(), key));
                    return Ok(None);
                }
            },
            None => snapshot.root.clone(),
        };

        if self.detect_host {
            let version = HostVersion::detect(&snapshot.graph, &target);
            logger.info(format!("{} looks like {}", path.display(), version));
        }

        let root = if self.inject.is_empty() {
            target
        } else {
            snapshot.inject(&target, &self.inject)?
        };

        let document = self.generator.generate(&snapshot.graph, &root)?;
        debug!(path = %path.display(), declarations = document.declarations.len(), "Generated");
        Ok(Some(document.to_typescript()))
    }
}

fn find_snapshots(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path.extension().and_then(|s| s.to_str()) == Some("json")
                && path.file_name().and_then(|s| s.to_str()) != Some(DEFAULT_CONFIG_NAME)
        })
        .collect();
    files.sort();
    files
}

fn write_output(target: &Path, output: &str, logger: &mut Logger<Stderr, Stderr>) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(target).with_context(|| format!("Failed to create {}", target.display()))?;
    file.write_all(output.as_bytes())?;
    logger.success(format!("Wrote {}", target.display()));
    Ok(())
}
