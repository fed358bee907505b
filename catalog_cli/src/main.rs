use catalog_core::*;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "exsel")]
#[command(about = "Exercise catalog selection for workout planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the exercise catalog for a questionnaire profile
    Select {
        /// Profile answers (JSON)
        #[arg(long)]
        profile: PathBuf,

        /// Directory of JSON catalog files (overrides config)
        #[arg(long)]
        catalog_dir: Option<PathBuf>,

        /// Exclude an exercise id (repeatable)
        #[arg(long = "exclude", value_name = "ID")]
        excluded: Vec<String>,

        /// Catalog language (en, nb); overrides the profile
        #[arg(long)]
        locale: Option<String>,

        /// List equipment for every exercise
        #[arg(long)]
        verbose_equipment: bool,

        /// Require the machine behind indoor cardio in custom environments
        #[arg(long)]
        gate_cardio_equipment: bool,
    },

    /// Check a catalog for consistency problems
    Validate {
        /// Directory of JSON catalog files (overrides config)
        #[arg(long)]
        catalog_dir: Option<PathBuf>,
    },

    /// Print the effective equipment for a profile
    Equipment {
        /// Profile answers (JSON)
        #[arg(long)]
        profile: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    catalog_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Select {
            profile,
            catalog_dir,
            excluded,
            locale,
            verbose_equipment,
            gate_cardio_equipment,
        } => cmd_select(
            &profile,
            catalog_dir.or_else(|| config.catalog.dir.clone()),
            excluded,
            locale,
            verbose_equipment || config.output.verbose_equipment,
            gate_cardio_equipment,
            &config,
        ),
        Commands::Validate { catalog_dir } => {
            cmd_validate(catalog_dir.or_else(|| config.catalog.dir.clone()))
        }
        Commands::Equipment { profile } => cmd_equipment(&profile, &config),
    }
}

/// Read profile answers, filling in the configured default language
fn load_profile(path: &Path, config: &Config, locale: Option<String>) -> Result<Profile> {
    let mut answers = ProfileAnswers::load(path)?;
    if let Some(code) = locale {
        if Locale::from_code(&code).is_none() {
            return Err(Error::InvalidProfile(format!("Unsupported locale: {}", code)));
        }
        answers.language = Some(code);
    } else if answers.language.is_none() {
        answers.language = Some(config.output.default_locale.code().to_string());
    }
    Ok(Profile::from_answers(answers))
}

fn cmd_select(
    profile_path: &Path,
    catalog_dir: Option<PathBuf>,
    excluded: Vec<String>,
    locale: Option<String>,
    verbose: bool,
    gate_cardio_equipment: bool,
    config: &Config,
) -> Result<()> {
    let mut profile = load_profile(profile_path, config, locale)?;
    profile.excluded_ids.extend(excluded);

    let mut engine_config = config.engine.clone();
    engine_config.gate_cardio_equipment |= gate_cardio_equipment;

    let document = match catalog_dir {
        Some(dir) => {
            let loader = JsonCatalogLoader::new(dir)?;
            assemble_catalog(&loader, &profile, &engine_config)?
        }
        None => assemble_catalog(get_default_catalog(), &profile, &engine_config)?,
    };

    tracing::info!(
        "Selected {} exercises for {:?} profile",
        document.total_count,
        profile.modality
    );
    println!("{}", document.to_json(verbose)?);
    Ok(())
}

fn cmd_validate(catalog_dir: Option<PathBuf>) -> Result<()> {
    let (catalog, source) = match catalog_dir {
        Some(dir) => {
            let loader = JsonCatalogLoader::new(&dir)?;
            (loader.read_all()?, dir.display().to_string())
        }
        None => (build_default_catalog(), "built-in catalog".to_string()),
    };

    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation(format!(
            "{} problems in {}",
            errors.len(),
            source
        )));
    }

    println!("✓ {} exercises in {} are valid", catalog.len(), source);
    Ok(())
}

fn cmd_equipment(profile_path: &Path, config: &Config) -> Result<()> {
    let profile = load_profile(profile_path, config, None)?;
    let equipment = resolve_equipment(&profile.declared_equipment, &profile.environment);

    println!("Environment: {:?}", profile.environment);
    for item in equipment.iter() {
        println!("  - {}", item);
    }
    Ok(())
}
