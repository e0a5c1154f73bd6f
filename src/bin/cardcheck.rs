//! CLI tool for card validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate full card data
//! cardcheck validate --number 4532875311640795 --month 1 --year 2030 \
//!     --cvv 123 --holder-name "John Doe"
//!
//! # Validate an options record given as JSON
//! cardcheck validate --options '{"token": "0123456789"}' --context token
//!
//! # Detect the brand of a number
//! cardcheck detect 341419371821943
//!
//! # Run the Luhn check
//! cardcheck luhn 4111111111111111
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use cc_card::{detect_brand, luhn, Card, CardBrand, CardOptions, ConfigError, Context, Validator};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Local plausibility checks for payment cards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a card and print the field-keyed error report
    Validate {
        /// Options record as a JSON object; flags below override its keys
        #[arg(long)]
        options: Option<String>,

        /// Card number
        #[arg(short, long)]
        number: Option<String>,

        /// Expiry month
        #[arg(short, long)]
        month: Option<String>,

        /// Expiry year (two or four digits)
        #[arg(short, long)]
        year: Option<String>,

        /// Card verification value
        #[arg(short, long)]
        cvv: Option<String>,

        /// Card holder name
        #[arg(long)]
        holder_name: Option<String>,

        /// Fallback brand code (e.g. visa, american_express)
        #[arg(short, long)]
        brand: Option<String>,

        /// Skip the CVV check
        #[arg(long)]
        no_cvv: bool,

        /// Stored-card token reference
        #[arg(short, long)]
        token: Option<String>,

        /// Validation context: credit-card or token
        #[arg(long, default_value = "credit-card")]
        context: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Detect card brand from number
    Detect {
        /// Card number
        card_number: String,
    },

    /// Check if a number passes the Luhn algorithm
    Luhn {
        /// Card number
        card_number: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

struct ValidateArgs {
    options: Option<String>,
    number: Option<String>,
    month: Option<String>,
    year: Option<String>,
    cvv: Option<String>,
    holder_name: Option<String>,
    brand: Option<String>,
    no_cvv: bool,
    token: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            options,
            number,
            month,
            year,
            cvv,
            holder_name,
            brand,
            no_cvv,
            token,
            context,
            output,
        } => {
            let args = ValidateArgs {
                options,
                number,
                month,
                year,
                cvv,
                holder_name,
                brand,
                no_cvv,
                token,
            };
            match cmd_validate(args, &context, output) {
                Ok(code) => code,
                Err(e) => {
                    tracing::error!(error = %e, "configuration error");
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }
        Commands::Detect { card_number } => cmd_detect(&card_number),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
    }
}

fn build_options(args: ValidateArgs) -> Result<CardOptions, ConfigError> {
    let mut options = match args.options.as_deref() {
        Some(json) => CardOptions::from_json(json)?,
        None => CardOptions::new(),
    };

    if let Some(number) = args.number {
        options = options.number(number);
    }
    if let Some(month) = args.month {
        options = options.month(month);
    }
    if let Some(year) = args.year {
        options = options.year(year);
    }
    if let Some(cvv) = args.cvv {
        options = options.cvv(cvv);
    }
    if let Some(holder_name) = args.holder_name {
        options = options.holder_name(holder_name);
    }
    if let Some(brand) = args.brand {
        options = options.brand(brand.parse::<CardBrand>()?);
    }
    if args.no_cvv {
        options = options.require_cvv(false);
    }
    if let Some(token) = args.token {
        options = options.token(token);
    }
    Ok(options)
}

fn cmd_validate(
    args: ValidateArgs,
    context: &str,
    output: OutputFormat,
) -> Result<ExitCode, ConfigError> {
    let validator = Validator::new(context.parse::<Context>()?);
    let card = Card::new(build_options(args)?);
    let errors = validator.validate(&card);

    match output {
        OutputFormat::Text => {
            println!("Context: {}", validator.context());
            println!("Number: {}", card.masked());
            println!("Brand: {}", card.brand().map_or("unknown", |b| b.code()));
            if errors.is_empty() {
                println!("Valid: yes");
            } else {
                println!("Valid: no");
                for (field, violation) in errors.iter() {
                    println!("  {}: {}", field, violation);
                }
            }
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "valid": errors.is_empty(),
                "context": validator.context().as_str(),
                "brand": card.brand(),
                "bin": card.bin(),
                "errors": errors,
            });
            println!("{}", report);
        }
    }

    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_detect(card_number: &str) -> ExitCode {
    match detect_brand(card_number) {
        Some(brand) => {
            println!("Detected Brand: {} ({})", brand.name(), brand.code());
            ExitCode::SUCCESS
        }
        None => {
            println!("Detected Brand: Unknown");
            ExitCode::FAILURE
        }
    }
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    if luhn::passes(card_number) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}
