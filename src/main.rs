use anyhow::{Context, Result};
use cimorph::cli::{Cli, Commands, OutputFormat};
use cimorph::plugins::compat::CompatibilityTable;
use cimorph::{MigrationSummary, TranslationConfig, TranslationEngine};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            script,
            format,
            output,
            tier,
            vars_dir,
            config,
        } => translate(script, format, output, tier, vars_dir, config),
        Commands::Checklist { script, output } => checklist(script, output),
        Commands::Vars { script, dir } => vars(script, dir),
    }
}

fn build_engine(
    config_path: Option<PathBuf>,
    tier: Option<cimorph::cli::TierArg>,
) -> Result<TranslationEngine> {
    let mut config = match config_path {
        Some(path) => TranslationConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TranslationConfig::load_or_default(Path::new("."))?,
    };
    if let Some(tier) = tier {
        config.tier = tier.into();
    }

    let mut compat = CompatibilityTable::builtin();
    if let Some(overrides) = &config.compat_overrides {
        compat = compat
            .merge_from_toml(overrides)
            .with_context(|| format!("loading compat overrides from {}", overrides.display()))?;
    }

    Ok(TranslationEngine::new(config).with_compat_table(compat))
}

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("reading source script {}", path.display()))
}

fn write_or_print(output: Option<PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, text)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn translate(
    script: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    tier: Option<cimorph::cli::TierArg>,
    vars_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let engine = build_engine(config_path, tier)?;
    let source = read_script(&script)?;
    let outcome = engine.translate(&source);

    for warning in &outcome.validation.warnings {
        log::warn!("{warning}");
    }

    let rendered = match format {
        OutputFormat::Yaml => outcome.config_text.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(&outcome)?,
    };
    write_or_print(output, &rendered)?;

    if let Some(dir) = vars_dir {
        write_var_artifacts(&dir, &outcome.env_template, &outcome.provisioning_script)?;
    }

    eprintln!("{}", summary_line(&outcome.summary));
    Ok(())
}

fn summary_line(summary: &MigrationSummary) -> String {
    let score = format!("{}/100", summary.score);
    let score = match summary.score {
        80..=100 => score.green(),
        50..=79 => score.yellow(),
        _ => score.red(),
    };
    format!(
        "readiness {score} — {} native, {} templated, {} limited, {} unsupported",
        summary.native, summary.templated, summary.limited, summary.unsupported
    )
}

fn checklist(script: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let engine = build_engine(None, None)?;
    let source = read_script(&script)?;
    let outcome = engine.translate(&source);
    write_or_print(output, &outcome.checklist)
}

fn vars(script: PathBuf, dir: PathBuf) -> Result<()> {
    let engine = build_engine(None, None)?;
    let source = read_script(&script)?;
    let outcome = engine.translate(&source);
    write_var_artifacts(&dir, &outcome.env_template, &outcome.provisioning_script)
}

fn write_var_artifacts(dir: &Path, env_template: &str, script: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    let env_path = dir.join("variables.env.template");
    let script_path = dir.join("provision-variables.sh");
    fs::write(&env_path, env_template)?;
    fs::write(&script_path, script)?;
    log::info!("wrote {} and {}", env_path.display(), script_path.display());
    Ok(())
}
