//! `hunter` - command-line front end for the hunter.io API.

use clap::{Parser, Subcommand};
use hunter_client::{
    Client, Department, DomainSearchQuery, EmailCountQuery, EmailFinderQuery, EmailType,
    EmailVerifierQuery, Error, PersonName, Seniority, Target,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hunter", version)]
#[command(about = "Query the hunter.io API from the command line", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pretty-print the JSON result
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get information regarding your hunter.io account
    ///
    /// This call is free.
    Account,

    /// Search all the email addresses corresponding to one website or company
    ///
    /// Each response returns up to 100 emails; use --offset to page through
    /// the rest. You must send at least the domain name or the company name.
    Search {
        /// Domain name to search, e.g. `stripe.com`
        #[arg(long)]
        domain: Option<String>,

        /// Company name to search, e.g. `stripe`; the domain wins if both are given
        #[arg(long)]
        company: Option<String>,

        /// Maximum number of email addresses to return
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Number of email addresses to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Only `personal` or `generic` addresses
        #[arg(long = "type", value_name = "TYPE")]
        email_type: Option<EmailType>,

        /// Seniority levels to keep (comma-delimited: junior, senior, executive)
        #[arg(long, value_delimiter = ',')]
        seniority: Vec<Seniority>,

        /// Departments to keep (comma-delimited, e.g. `it,sales`)
        #[arg(long, value_delimiter = ',')]
        department: Vec<Department>,
    },

    /// Find the most likely email address from a domain name, a first name and a last name
    ///
    /// You must send the domain name or the company name, and either the
    /// first and last name or the full name.
    Find {
        /// Domain name of the company
        #[arg(long)]
        domain: Option<String>,

        /// Company name
        #[arg(long)]
        company: Option<String>,

        /// The person's first name
        #[arg(long)]
        first_name: Option<String>,

        /// The person's last name
        #[arg(long)]
        last_name: Option<String>,

        /// The person's full name
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Verify the deliverability of an email address
    ///
    /// If the verification takes too long hunter.io answers with status 202;
    /// run the same command again later to get the result.
    Verify {
        /// The email address to verify
        #[arg(long)]
        email: Option<String>,
    },

    /// Count the email addresses hunter.io knows for a domain
    Count {
        /// Domain name to count addresses for
        #[arg(long)]
        domain: Option<String>,

        /// Only count `personal` or `generic` addresses
        #[arg(long = "type", value_name = "TYPE")]
        email_type: Option<EmailType>,
    },
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the verbosity flags.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "warn,hunter_client=info,hunter=info",
            2 => "info,hunter_client=debug,hunter=debug",
            _ => "debug,hunter_client=trace,hunter=trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Ctrl-C cancels the in-flight request and exits cleanly.
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let client = match Client::new() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let result = run(&client, cli.command, &cancel)
        .await
        .and_then(|value| render(&value, cli.pretty));

    match result {
        Ok(json) => println!("{json}"),
        Err(Error::Cancelled) => {
            tracing::info!("interrupted");
            std::process::exit(0);
        }
        Err(Error::InvalidQuery(message)) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}

async fn run(
    client: &Client,
    command: Commands,
    cancel: &CancellationToken,
) -> Result<serde_json::Value, Error> {
    match command {
        Commands::Account => to_value(client.account_with_cancel(cancel).await?),
        Commands::Search {
            domain,
            company,
            limit,
            offset,
            email_type,
            seniority,
            department,
        } => {
            let mut query = DomainSearchQuery::new(Target::from_parts(domain, company)?)
                .limit(limit)
                .offset(offset)
                .seniority(seniority)
                .department(department);
            if let Some(email_type) = email_type {
                query = query.email_type(email_type);
            }
            to_value(client.domain_search_with_cancel(&query, cancel).await?)
        }
        Commands::Find {
            domain,
            company,
            first_name,
            last_name,
            full_name,
        } => {
            let query = EmailFinderQuery::new(
                Target::from_parts(domain, company)?,
                PersonName::from_parts(first_name, last_name, full_name)?,
            );
            to_value(client.find_email_with_cancel(&query, cancel).await?)
        }
        Commands::Verify { email } => {
            let email = email.ok_or(Error::InvalidQuery("missing the `--email` flag"))?;
            let query = EmailVerifierQuery::new(email)?;
            to_value(client.verify_email_with_cancel(&query, cancel).await?)
        }
        Commands::Count { domain, email_type } => {
            let domain = domain.ok_or(Error::InvalidQuery("missing the `--domain` flag"))?;
            let mut query = EmailCountQuery::new(domain)?;
            if let Some(email_type) = email_type {
                query = query.email_type(email_type);
            }
            to_value(client.count_emails_with_cancel(&query, cancel).await?)
        }
    }
}

fn to_value<T: Serialize>(result: T) -> Result<serde_json::Value, Error> {
    Ok(serde_json::to_value(result)?)
}

fn render(value: &serde_json::Value, pretty: bool) -> Result<String, Error> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_flags_parse_into_typed_filters() {
        let cli = Cli::try_parse_from([
            "hunter",
            "search",
            "--domain",
            "stripe.com",
            "--type",
            "personal",
            "--seniority",
            "senior,executive",
            "--department",
            "it,hr",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                domain,
                limit,
                offset,
                email_type,
                seniority,
                department,
                ..
            } => {
                assert_eq!(domain.as_deref(), Some("stripe.com"));
                assert_eq!(limit, 10);
                assert_eq!(offset, 0);
                assert_eq!(email_type, Some(EmailType::Personal));
                assert_eq!(seniority, vec![Seniority::Senior, Seniority::Executive]);
                assert_eq!(department, vec![Department::It, Department::Hr]);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn unknown_seniority_is_rejected() {
        let parsed = Cli::try_parse_from([
            "hunter",
            "search",
            "--domain",
            "a.com",
            "--seniority",
            "boss",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn find_accepts_kebab_case_name_flags() {
        let cli = Cli::try_parse_from([
            "hunter",
            "find",
            "--domain",
            "asana.com",
            "--first-name",
            "Dustin",
            "--last-name",
            "Moskovitz",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Find { .. }));
    }
}
