use crate::config::{Config, Preset, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use panelgen_runtime::Logger;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Preset the config starts from
    #[arg(short, long, value_enum, default_value_t = Preset::KirbyPanel)]
    pub preset: Preset,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let mut logger = Logger::new("panelgen").with_output(io::stderr());
    write_starter(args, cwd, &mut logger)
}

fn write_starter<O: Write, E: Write>(
    args: InitArgs,
    cwd: &str,
    logger: &mut Logger<O, E>,
) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        logger.warn(format!(
            "{} already exists, use --force to overwrite",
            DEFAULT_CONFIG_NAME
        ));
        return Ok(());
    }

    let config = Config::starter(args.preset);
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json + "\n")?;

    logger.success(format!("Created {}", DEFAULT_CONFIG_NAME));
    logger.log("Next: dump the host object graph to a snapshot, e.g. window.json");
    logger.log("Then run: panelgen generate window.json --out panel.d.ts");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger() -> Logger<Vec<u8>, Vec<u8>> {
        Logger::with_writers("panelgen", Vec::new(), Vec::new()).plain()
    }

    fn text(buffer: &[u8]) -> String {
        String::from_utf8_lossy(buffer).into_owned()
    }

    #[test]
    fn test_init_writes_starter_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(
            InitArgs {
                preset: Preset::KirbyPanel,
                force: false,
            },
            &cwd,
        )
        .unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config, Config::starter(Preset::KirbyPanel));
    }

    #[test]
    fn test_init_reports_through_logger() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let mut logger = logger();

        write_starter(
            InitArgs {
                preset: Preset::None,
                force: false,
            },
            &cwd,
            &mut logger,
        )
        .unwrap();

        let output = text(logger.output());
        assert!(output.starts_with("[panelgen:success] Created panelgen.config.json\n"));
        assert!(output.contains("[panelgen] Then run: panelgen generate"));
        assert!(logger.errors().is_empty());
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, r#"{ "preset": "none" }"#).unwrap();

        let mut logger = logger();
        write_starter(
            InitArgs {
                preset: Preset::KirbyPanel,
                force: false,
            },
            &cwd,
            &mut logger,
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{ "preset": "none" }"#);
        assert_eq!(
            text(logger.output()),
            "[panelgen:warn] panelgen.config.json already exists, use --force to overwrite\n"
        );

        init(
            InitArgs {
                preset: Preset::None,
                force: true,
            },
            &cwd,
        )
        .unwrap();
        assert_eq!(Config::load(&cwd).unwrap().root_name.as_deref(), Some("Root"));
    }
}
