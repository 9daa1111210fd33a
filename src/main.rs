//! preventivi - a command line front-end for the loan-quote service.
//!
//! This binary consumes the core library (session store + API client) to
//! log in, register, and list the authenticated user's quotes. Navigation
//! decisions stay here: an expired session prints a re-login hint and
//! exits non-zero instead of surfacing a generic error.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use preventivi_core::utils::format::{format_date, format_euro, format_optional};
use preventivi_core::{ApiClient, ApiError, Config, SessionStore};

const USAGE: &str = "\
preventivi - client per il servizio preventivi

Usage:
  preventivi login [email]       Accedi e salva la sessione
  preventivi register            Registra un nuovo account
  preventivi quotes              Elenca i preventivi dell'utente
  preventivi whoami              Mostra l'utente autenticato
  preventivi logout              Cancella la sessione locale
";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn build_client(config: &Config) -> Result<ApiClient> {
    let store = SessionStore::new(config.session_dir()?);
    let client = match config.api_base_url() {
        Some(url) => ApiClient::with_base_url(store, &url),
        None => ApiClient::new(store),
    };
    client.context("Failed to build HTTP client")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let mut config = Config::load().unwrap_or_default();
    let client = build_client(&config)?;

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("");

    match command {
        "login" => {
            let email = match args.get(2) {
                Some(email) => email.clone(),
                None => match config.last_email.clone() {
                    Some(last) => {
                        let entered = prompt(&format!("Email [{}]", last))?;
                        if entered.is_empty() { last } else { entered }
                    }
                    None => prompt("Email")?,
                },
            };
            let password = rpassword::prompt_password("Password: ")?;

            match client.login(&email, &password).await {
                Ok(session) => {
                    info!(user_id = session.user.id, "Logged in");
                    println!("Benvenuto, {}!", session.user.full_name());
                    config.last_email = Some(email);
                    if let Err(e) = config.save() {
                        warn!(error = %e, "Failed to save config");
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        "register" => {
            let first_name = prompt("Nome")?;
            let last_name = prompt("Cognome (opzionale)")?;
            let email = prompt("Email")?;
            let password = rpassword::prompt_password("Password: ")?;

            match client.register(&first_name, &last_name, &email, &password).await {
                Ok(session) => {
                    println!(
                        "Registrazione completata. Benvenuto, {}!",
                        session.user.full_name()
                    );
                    config.last_email = Some(email);
                    if let Err(e) = config.save() {
                        warn!(error = %e, "Failed to save config");
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        "quotes" => match client.get_quotes().await {
            Ok(quotes) => {
                if quotes.is_empty() {
                    println!("Nessun preventivo trovato.");
                } else {
                    for quote in &quotes {
                        println!(
                            "#{:<5} {:<25} {:<10} {:>4} rate  rata {:<10} {:<12} {}",
                            quote.id,
                            quote.applicant_name(),
                            format_euro(&quote.requested_amount),
                            quote.installments,
                            format_euro(&quote.monthly_installment),
                            quote.status(),
                            format_date(&quote.created_at),
                        );
                        println!(
                            "       finalità: {}",
                            format_optional(&quote.purpose, "Non specificata")
                        );
                    }
                    println!("{} preventivi.", quotes.len());
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(e) if e.requires_login() => {
                eprintln!("{}", e);
                eprintln!("Esegui `preventivi login` per continuare.");
                Ok(ExitCode::FAILURE)
            }
            Err(e @ ApiError::Network(_)) => {
                eprintln!("{}", e);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => {
                eprintln!("Errore: {}", e);
                Ok(ExitCode::FAILURE)
            }
        },

        "whoami" => {
            match client.store().get()? {
                Some(session) => println!(
                    "{} <{}> (id {})",
                    session.user.full_name(),
                    session.user.email,
                    session.user.id
                ),
                None => {
                    println!("Nessuna sessione attiva.");
                    return Ok(ExitCode::FAILURE);
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        "logout" => {
            client.logout()?;
            println!("Sessione cancellata.");
            Ok(ExitCode::SUCCESS)
        }

        _ => {
            print!("{}", USAGE);
            Ok(ExitCode::FAILURE)
        }
    }
}
