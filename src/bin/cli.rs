//! personkv CLI Client
//!
//! Command-line interface for interacting with a personkv server.
//!
//! Input is validated here before it is sent; the server itself stores
//! whatever bytes it receives.

use clap::{Parser, Subcommand};
use personkv::protocol::Status;
use personkv::{Client, Person, PersonKvError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// personkv CLI
#[derive(Parser, Debug)]
#[command(name = "personkv-cli")]
#[command(about = "CLI for the personkv record store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert a person
    Insert {
        /// CPF, 11 digits ('.' and '-' are allowed and stripped)
        #[arg(long)]
        cpf: String,

        /// Full name (at most 255 bytes)
        #[arg(long)]
        name: String,

        /// Birth date, DD/MM/YYYY or DDMMYYYY
        #[arg(long)]
        birth_date: String,

        /// Phone, 11 digits (area code + number)
        #[arg(long)]
        phone: String,
    },

    /// List every stored person
    List,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();
    let client = Client::new(&args.server);

    let result = match args.command {
        Commands::Insert {
            cpf,
            name,
            birth_date,
            phone,
        } => insert(&client, &cpf, &name, &birth_date, &phone),
        Commands::List => list(&client),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn insert(client: &Client, cpf: &str, name: &str, birth_date: &str, phone: &str) -> Result<()> {
    let person = Person::new(
        &normalize_cpf(cpf)?,
        name,
        &normalize_birth_date(birth_date)?,
        &normalize_phone(phone)?,
    )?;

    match client.insert(&person)? {
        Status::Success => println!("Person inserted."),
        Status::DuplicateCpf => println!("CPF already registered."),
        Status::InternalError => println!("Server could not store the record."),
        other => println!("Unexpected status: {:?}", other),
    }

    Ok(())
}

fn list(client: &Client) -> Result<()> {
    let people = client.list()?;

    if people.is_empty() {
        println!("No people registered.");
    }
    for person in &people {
        println!("{}", person);
    }

    Ok(())
}

// =============================================================================
// Input validation
// =============================================================================

fn normalize_cpf(input: &str) -> Result<String> {
    let cpf: String = input.chars().filter(|c| *c != '.' && *c != '-').collect();
    if cpf.len() != 11 || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PersonKvError::InvalidInput(
            "CPF must contain 11 digits".to_string(),
        ));
    }
    Ok(cpf)
}

fn normalize_phone(input: &str) -> Result<String> {
    let phone = input.trim();
    if phone.len() != 11 || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PersonKvError::InvalidInput(
            "phone must contain exactly 11 digits".to_string(),
        ));
    }
    Ok(phone.to_string())
}

/// Accepts `DD/MM/YYYY` or `DDMMYYYY` and returns `DD/MM/YYYY`
fn normalize_birth_date(input: &str) -> Result<String> {
    let invalid = || PersonKvError::InvalidInput("birth date must be DDMMYYYY".to_string());

    let digits: String = input.chars().filter(|c| *c != '/').collect();
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let day: u32 = digits[0..2].parse().map_err(|_| invalid())?;
    let month: u32 = digits[2..4].parse().map_err(|_| invalid())?;
    let year: u32 = digits[4..8].parse().map_err(|_| invalid())?;

    if month == 0 || month > 12 || day == 0 || day > days_in_month(month, year) {
        return Err(invalid());
    }

    Ok(format!("{}/{}/{}", &digits[0..2], &digits[2..4], &digits[4..8]))
}

fn days_in_month(month: u32, year: u32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
