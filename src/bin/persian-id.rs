//! CLI tool for Iranian identifier validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate and parse a national ID
//! persian-id national-id validate ۲۷۹۱۵۶۷۸۹۵
//! persian-id national-id parse 2791567895 --output json
//!
//! # Validate a card number and find its bank
//! persian-id card validate 6037701689095443
//! persian-id card bank 6037701689095443
//!
//! # Normalize text
//! persian-id digits "۱۲۳٤٥"
//! persian-id normalize "علي"
//!
//! # Generate test identifiers
//! persian-id generate national-id --hometown 279 --count 5
//!
//! # Use a custom hometown registry
//! persian-id --hometowns registry.json national-id hometown 2791567895
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use persian_id::data::{self, Bank, Collection, Hometown, Record};
use persian_id::{card_number, format, generate, mask, national_id, normalize, ParseError};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "persian-id")]
#[command(
    author,
    version,
    about = "Iranian national ID and bank card validation tool"
)]
struct Cli {
    /// Load the bank table from a JSON file instead of the bundled one
    #[arg(long, global = true)]
    banks: Option<PathBuf>,

    /// Load the hometown table from a JSON file instead of the bundled one
    #[arg(long, global = true)]
    hometowns: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bank card number commands
    #[command(subcommand)]
    Card(CardCommand),

    /// National ID commands
    #[command(subcommand, name = "national-id")]
    NationalId(NationalIdCommand),

    /// Convert Persian and Arabic digits to ASCII
    Digits {
        /// Text to convert
        text: String,
    },

    /// Normalize Arabic letter variants to Persian
    Normalize {
        /// Text to normalize
        text: String,
    },

    /// Check whether text is written in Persian
    IsPersian {
        /// Text to check
        text: String,
    },

    /// Generate test identifiers (for testing only)
    #[command(subcommand)]
    Generate(GenerateCommand),
}

#[derive(Subcommand)]
enum CardCommand {
    /// Validate a card number
    Validate {
        /// 16-digit card number
        number: String,
    },

    /// Show the issuing bank of a card
    Bank {
        /// 16-digit card number
        number: String,
    },

    /// Format a card number in groups of four
    Format {
        /// Card number
        number: String,

        /// Separator to use
        #[arg(short, long, default_value = " ")]
        separator: String,
    },

    /// Mask a card number for display
    Mask {
        /// Card number
        number: String,

        /// Keep the BIN (first 6 digits) visible
        #[arg(short, long)]
        with_bin: bool,
    },
}

#[derive(Subcommand)]
enum NationalIdCommand {
    /// Validate a national ID
    Validate {
        /// National ID (8 to 10 digits)
        id: String,
    },

    /// Split a national ID and resolve its hometown
    Parse {
        /// National ID (8 to 10 digits)
        id: String,
    },

    /// List every hometown registered under the ID's prefix
    Hometown {
        /// National ID (8 to 10 digits)
        id: String,
    },
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate card numbers
    Card {
        /// BIN to generate for (random bundled bank if omitted)
        #[arg(short, long)]
        bin: Option<String>,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output formatted (with spaces)
        #[arg(short, long)]
        formatted: bool,
    },

    /// Generate national IDs
    #[command(name = "national-id")]
    NationalId {
        /// Hometown code to generate for (random bundled code if omitted)
        #[arg(long)]
        hometown: Option<String>,

        /// Number of IDs to generate
        #[arg(short, long, default_value = "1")]
        count: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Reference tables, bundled unless overridden on the command line.
struct Tables {
    banks: Option<Collection<Bank>>,
    hometowns: Option<Collection<Hometown>>,
}

impl Tables {
    fn load(cli: &Cli) -> Self {
        Self {
            banks: cli.banks.as_deref().map(load_table),
            hometowns: cli.hometowns.as_deref().map(load_table),
        }
    }

    fn banks(&self) -> &Collection<Bank> {
        self.banks.as_ref().unwrap_or_else(|| data::banks())
    }

    fn hometowns(&self) -> &Collection<Hometown> {
        self.hometowns.as_ref().unwrap_or_else(|| data::hometowns())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tables = Tables::load(&cli);
    let output = cli.output;

    match cli.command {
        Commands::Card(command) => match command {
            CardCommand::Validate { number } => cmd_card_validate(&number, output),
            CardCommand::Bank { number } => cmd_card_bank(&number, &tables, output),
            CardCommand::Format { number, separator } => {
                println!("{}", format::format_with_separator(&number, &separator));
            }
            CardCommand::Mask { number, with_bin } => cmd_card_mask(&number, with_bin),
        },
        Commands::NationalId(command) => match command {
            NationalIdCommand::Validate { id } => cmd_id_validate(&id, output),
            NationalIdCommand::Parse { id } => cmd_id_parse(&id, &tables, output),
            NationalIdCommand::Hometown { id } => cmd_id_hometown(&id, &tables, output),
        },
        Commands::Digits { text } => println!("{}", normalize::to_ascii_digits(&text)),
        Commands::Normalize { text } => println!("{}", normalize::normalize_persian(&text)),
        Commands::IsPersian { text } => cmd_is_persian(&text, output),
        Commands::Generate(command) => match command {
            GenerateCommand::Card {
                bin,
                count,
                formatted,
            } => cmd_generate_cards(bin, count, formatted),
            GenerateCommand::NationalId { hometown, count } => cmd_generate_ids(hometown, count),
        },
    }
}

fn load_table<T: Record>(path: &Path) -> Collection<T> {
    Collection::from_json_file(path)
        .unwrap_or_else(|e| fail(&format!("{}: {}", path.display(), e)))
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(2);
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => fail(&e.to_string()),
    }
}

fn report_invalid(error: &dyn std::fmt::Display, output: OutputFormat) -> ! {
    match output {
        OutputFormat::Text => {
            println!("Valid: no");
            println!("Error: {}", error);
        }
        OutputFormat::Json => print_json(&json!({ "valid": false, "error": error.to_string() })),
    }
    process::exit(1);
}

fn cmd_card_validate(number: &str, output: OutputFormat) {
    match card_number::validate(number) {
        Ok(card) => match output {
            OutputFormat::Text => {
                println!("Valid: yes");
                println!("BIN: {}", card.bin());
                println!("Last Four: {}", card.last_four());
                println!("Masked: {}", card.masked());
            }
            OutputFormat::Json => print_json(&json!({
                "valid": true,
                "bin": card.bin(),
                "last_four": card.last_four(),
                "masked": card.masked(),
            })),
        },
        Err(e) => report_invalid(&e, output),
    }
}

fn cmd_card_bank(number: &str, tables: &Tables, output: OutputFormat) {
    match card_number::find_bank_in(number, tables.banks()) {
        Ok(Some(bank)) => match output {
            OutputFormat::Text => {
                println!("Bank: {}", bank.name);
                println!("Persian Name: {}", bank.persian_name);
                println!("Codes: {}", bank.codes.join(", "));
            }
            OutputFormat::Json => print_json(&json!({ "valid": true, "bank": bank })),
        },
        Ok(None) => {
            match output {
                OutputFormat::Text => println!("Bank: unknown"),
                OutputFormat::Json => print_json(&json!({ "valid": true, "bank": null })),
            }
            process::exit(1);
        }
        Err(e) => report_invalid(&e, output),
    }
}

fn cmd_card_mask(number: &str, with_bin: bool) {
    if with_bin {
        match card_number::validate(number) {
            Ok(card) => println!("{}", card.masked_with_bin()),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", mask::mask_string(number));
    }
}

fn cmd_id_validate(id: &str, output: OutputFormat) {
    match national_id::validate(id) {
        Ok(normalized) => match output {
            OutputFormat::Text => {
                println!("Valid: yes");
                println!("National ID: {}", normalized);
            }
            OutputFormat::Json => print_json(&json!({ "valid": true, "id": normalized })),
        },
        Err(e) => report_invalid(&e, output),
    }
}

fn cmd_id_parse(id: &str, tables: &Tables, output: OutputFormat) {
    match national_id::parse_in(id, tables.hometowns()) {
        Ok(parsed) => match output {
            OutputFormat::Text => {
                println!("National ID: {}", parsed.id());
                println!("Hometown Code: {}", parsed.hometown_code());
                println!("Personal Code: {}", parsed.personal_code());
                println!("Control Digit: {}", parsed.control_digit());
                for hometown in parsed.hometowns() {
                    println!("Hometown: {} / {}", hometown.province, hometown.city);
                }
            }
            OutputFormat::Json => print_json(&json!({ "valid": true, "nationalId": parsed })),
        },
        Err(ParseError::HometownNotFound { national_id }) => {
            match output {
                OutputFormat::Text => {
                    println!("Valid: yes");
                    println!("Hometown: not found for {}", national_id);
                }
                OutputFormat::Json => print_json(&json!({
                    "valid": true,
                    "id": national_id,
                    "error": "hometown not found",
                })),
            }
            process::exit(1);
        }
        Err(ParseError::Invalid(e)) => report_invalid(&e, output),
    }
}

fn cmd_id_hometown(id: &str, tables: &Tables, output: OutputFormat) {
    match national_id::find_hometown_in(id, tables.hometowns()) {
        Ok(found) => match output {
            OutputFormat::Text => {
                if found.is_empty() {
                    println!("No hometown registered for this prefix");
                }
                for hometown in &found {
                    println!("{} / {}", hometown.province, hometown.city);
                }
            }
            OutputFormat::Json => print_json(&json!({ "valid": true, "hometowns": found })),
        },
        Err(e) => report_invalid(&e, output),
    }
}

fn cmd_is_persian(text: &str, output: OutputFormat) {
    let persian = normalize::is_persian_text(text);
    match output {
        OutputFormat::Text => println!("Persian: {}", if persian { "yes" } else { "no" }),
        OutputFormat::Json => print_json(&json!({ "persian": persian })),
    }
    if !persian {
        process::exit(1);
    }
}

fn cmd_generate_cards(bin: Option<String>, count: usize, formatted: bool) {
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let bin = match &bin {
            Some(b) => b.clone(),
            None => generate::random_bin(&mut rng).unwrap_or_else(|| fail("bank table is empty")),
        };
        match generate::generate_card_number_with_rng(&bin, &mut rng) {
            Ok(card) if formatted => println!("{}", format::format_card_number(&card)),
            Ok(card) => println!("{}", card),
            Err(e) => fail(&format!("invalid BIN {:?}: {}", bin, e)),
        }
    }
}

fn cmd_generate_ids(hometown: Option<String>, count: usize) {
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let code = match &hometown {
            Some(c) => c.clone(),
            None => generate::random_hometown_code(&mut rng)
                .unwrap_or_else(|| fail("hometown table is empty")),
        };
        match generate::generate_national_id_with_rng(&code, &mut rng) {
            Ok(id) => println!("{}", id),
            Err(e) => fail(&format!("invalid hometown code {:?}: {}", code, e)),
        }
    }
}
