//! MKM identity CLI: the `mkm` command.
//!
//! Validates identity record fixtures, generates new identities, parses
//! IDs and lists the immortal accounts.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use mkm_identity::crypto::DEFAULT_KEY_BITS;
use mkm_identity::storage::{load_record, save_record};
use mkm_identity::{
    IdentityRecord, Identifier, Immortals, MetaType, NetworkType, RecordVerification,
};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// MKM identity CLI: validate identity records, generate accounts and
/// inspect IDs.
#[derive(Parser, Debug)]
#[command(
    name = "mkm",
    about = "MKM identity CLI",
    version,
    long_about = "mkm: MKM identity CLI\n\nValidate identity record fixtures, generate new identities,\nparse IDs and list the built-in immortal accounts."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a record file: structure, fingerprint, ID derivation, key pair
    Validate {
        /// Record file (JSON)
        file: PathBuf,
    },

    /// Display a record
    Show {
        /// Record file (JSON)
        file: PathBuf,
    },

    /// Generate a new identity record
    Generate {
        /// Seed, which becomes the ID name (required for mkm, exbtc, exeth)
        #[arg(long)]
        seed: Option<String>,

        /// Meta version (mkm, btc, exbtc, eth, exeth or a number)
        #[arg(long, default_value = "mkm")]
        meta: String,

        /// Display names, first one is the primary name
        #[arg(long = "name", required = true)]
        names: Vec<String>,

        /// Network type (main, group, station, robot, ... or a byte)
        #[arg(long, default_value = "main")]
        network: String,

        /// RSA key size in bits (ignored for ETH metas)
        #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
        bits: usize,

        /// Output file path (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Parse an ID string
    ParseId {
        /// ID, e.g. hulk@4YeVEN3aUnvC1DNUufCq1bs9zoBSJTzVEj
        id: String,
    },

    /// List immortal accounts
    Immortals {
        /// Also load record files from this directory
        #[arg(long, env = "MKM_FIXTURE_DIR")]
        dir: Option<PathBuf>,
    },
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn mark(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "FAILED"
    }
}

fn print_verification(result: &RecordVerification, verbose: bool) {
    println!("  Structure:   {}", mark(result.structure.is_empty()));
    for violation in &result.structure {
        println!("    - {violation}");
    }
    println!("  Meta:        {}", mark(result.meta_valid));
    println!("  Meta ↔ ID:   {}", mark(result.meta_matches_id));
    println!("  Key pair:    {}", mark(result.key_pair_matches));
    match result.profile_signature {
        Some(ok) => println!("  Profile sig: {}", mark(ok)),
        None => println!("  Profile sig: unsigned"),
    }
    if verbose {
        for error in &result.errors {
            println!("    ! {error}");
        }
    }
}

fn load(file: &Path) -> Result<IdentityRecord> {
    load_record(file).with_context(|| format!("failed to load {}", file.display()))
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_validate(file: &Path, verbose: bool) -> Result<()> {
    let record = load(file)?;
    let result = record.verify();

    println!("Record: {}", record.id);
    print_verification(&result, verbose);

    if result.is_valid {
        println!("  Result:      valid");
        Ok(())
    } else {
        Err(anyhow!("record {} is invalid", record.id))
    }
}

fn cmd_show(file: &Path, verbose: bool) -> Result<()> {
    let record = load(file)?;
    let id = &record.id;

    println!("Identity: {id}");
    println!("  Name:      {}", id.name().unwrap_or("-"));
    println!("  Address:   {}", id.address());
    println!("  Network:   {}", id.network());
    if let Some(terminal) = id.terminal() {
        println!("  Terminal:  {terminal}");
    }
    println!("  Meta:      {}", record.meta.version);
    if let Some(seed) = &record.meta.seed {
        println!("  Seed:      {seed}");
    }

    match record.meta.public_key() {
        Ok(key) => println!(
            "  Key:       {} {} bits",
            record.meta.key.algorithm,
            key.bits()
        ),
        Err(e) => println!("  Key:       INVALID ({e})"),
    }

    if record.profile.names.is_empty() {
        println!("  Names:     none");
    } else {
        println!("  Names ({}):", record.profile.names.len());
        for (i, name) in record.profile.names.iter().enumerate() {
            println!("    [{}] {name}", i + 1);
        }
    }

    if verbose {
        if let Some(fingerprint) = &record.meta.fingerprint {
            println!("  Fingerprint: {fingerprint}");
        }
    }

    Ok(())
}

struct GenerateArgs {
    seed: Option<String>,
    meta: String,
    names: Vec<String>,
    network: String,
    bits: usize,
}

fn cmd_generate(args: GenerateArgs, output: Option<&Path>, verbose: bool) -> Result<()> {
    let network: NetworkType = args.network.parse()?;
    let version = MetaType::parse(&args.meta)?;
    if verbose {
        let key = if version.is_eth() {
            "secp256k1".to_string()
        } else {
            format!("{}-bit RSA", args.bits)
        };
        eprintln!(
            "Generating {key} key for {version} '{}' on {network}...",
            args.seed.as_deref().unwrap_or("-")
        );
    }

    let record = IdentityRecord::generate_meta(
        version,
        args.seed.as_deref(),
        args.names,
        network,
        args.bits,
    )
    .context("failed to generate identity")?;

    match output {
        Some(path) => {
            save_record(&record, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Created identity {}", record.id);
            println!("  Saved to: {}", path.display());
        }
        None => println!("{}", record.to_json_pretty()?),
    }

    Ok(())
}

fn cmd_parse_id(id: &str, _verbose: bool) -> Result<()> {
    let identifier = Identifier::parse(id)?;

    println!("ID: {identifier}");
    println!("  Name:      {}", identifier.name().unwrap_or("-"));
    println!("  Address:   {}", identifier.address());
    println!("  Terminal:  {}", identifier.terminal().unwrap_or("-"));
    println!("  Network:   {}", identifier.network());
    if identifier.is_broadcast() {
        println!("  Broadcast: yes");
    }

    Ok(())
}

fn cmd_immortals(dir: Option<&Path>, verbose: bool) -> Result<()> {
    let mut immortals = Immortals::builtin().context("failed to load built-in immortals")?;

    if let Some(dir) = dir {
        let admitted = immortals
            .load_dir(dir)
            .with_context(|| format!("failed to read {}", dir.display()))?;
        if verbose {
            eprintln!("Loaded {admitted} record(s) from {}", dir.display());
        }
    }

    println!("Immortals ({}):", immortals.len());
    for record in immortals.records() {
        println!("  {}  {}", record.id, record.name().unwrap_or("-"));
        if verbose {
            for name in record.profile.names.iter().skip(1) {
                println!("      aka {name}");
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Validate { file } => cmd_validate(&file, verbose),
        Commands::Show { file } => cmd_show(&file, verbose),
        Commands::Generate {
            seed,
            meta,
            names,
            network,
            bits,
            output,
        } => cmd_generate(
            GenerateArgs {
                seed,
                meta,
                names,
                network,
                bits,
            },
            output.as_deref(),
            verbose,
        ),
        Commands::ParseId { id } => cmd_parse_id(&id, verbose),
        Commands::Immortals { dir } => cmd_immortals(dir.as_deref(), verbose),
    };

    if let Err(e) = result {
        log::debug!("command failed: {e:?}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
