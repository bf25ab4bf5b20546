use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dental_dashboard::{
    auth::{jwt, AuthConfig},
    local_today, render,
    repository::{AppointmentSource, JsonFileAppointments},
    services,
};
use reqwest::Client;
use shared_types::{Appointment, NextAppointmentResponse};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dental-cli")]
#[command(about = "CLI for previewing and querying the patient dashboard")]
#[command(
    long_about = "A command-line interface for the dental patient dashboard.\n\n\
    Previews the next-appointment card from a local appointments snapshot,\n\
    queries a running dashboard server, and mints development tokens."
)]
struct Cli {
    /// Dashboard server URL, used by the `fetch` command.
    #[arg(
        short,
        long,
        default_value = "http://localhost:3000",
        env = "DENTAL_API_URL"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the next appointment card for a user from a snapshot file
    ///
    /// Applies the same selection rule as the dashboard: the first
    /// confirmed appointment dated today or later.
    Next {
        /// Appointments snapshot (JSON object keyed by user email).
        #[arg(short, long, env = "APPOINTMENTS_FILE", value_name = "PATH")]
        file: PathBuf,

        /// Email of the patient whose dashboard to preview.
        #[arg(short, long)]
        user: String,

        /// Evaluate as of this day (YYYY-MM-DD) instead of today.
        #[arg(short, long, value_name = "DATE")]
        today: Option<NaiveDate>,

        /// Print the API JSON instead of the text card.
        #[arg(long)]
        json: bool,
    },

    /// List every appointment for a user from a snapshot file
    List {
        #[arg(short, long, env = "APPOINTMENTS_FILE", value_name = "PATH")]
        file: PathBuf,

        #[arg(short, long)]
        user: String,
    },

    /// Ask a running server for the current user's next appointment
    Fetch {
        /// Bearer token issued by the identity provider.
        #[arg(short, long, env = "DENTAL_API_TOKEN")]
        token: String,
    },

    /// Mint a development token signed with JWT_SECRET
    ///
    /// Only for local testing; production tokens come from the
    /// identity provider.
    Token {
        /// Email to put in the token subject.
        email: String,

        /// Display name claim.
        #[arg(short, long)]
        name: Option<String>,

        #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
        secret: String,

        /// Token lifetime in days.
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i64).range(1..=365))]
        days: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Next {
            file,
            user,
            today,
            json,
        } => {
            let appointments = load(&file, &user).await?;
            let today = today.unwrap_or_else(local_today);
            let response = services::next_appointment_response(&appointments, today);

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_response(&response);
            }
        }
        Commands::List { file, user } => {
            let appointments = load(&file, &user).await?;
            if appointments.is_empty() {
                println!("No appointments found.");
            }
            for appointment in appointments {
                println!(
                    "{} {:<9} {} - {} ({})",
                    appointment.date,
                    appointment.status,
                    appointment.time,
                    appointment.doctor_name,
                    appointment.reason
                );
            }
        }
        Commands::Fetch { token } => {
            let url = format!("{}/api/appointments/next", cli.base_url);
            let response: NextAppointmentResponse = Client::new()
                .get(&url)
                .bearer_auth(&token)
                .send()
                .await
                .with_context(|| format!("Failed to reach {}", url))?
                .error_for_status()?
                .json()
                .await
                .context("Invalid response from dashboard server")?;
            print_response(&response);
        }
        Commands::Token {
            email,
            name,
            secret,
            days,
        } => {
            let config = AuthConfig {
                jwt_secret: secret,
                allowed_emails: vec![],
                token_duration_days: days,
                cookie_name: "auth_token".to_string(),
                issuer: None,
                audience: None,
            };
            let token = jwt::create_token(&config, &email, name)?;
            println!("{}", token);
        }
    }

    Ok(())
}

async fn load(file: &Path, user: &str) -> anyhow::Result<Vec<Appointment>> {
    JsonFileAppointments::new(file)
        .user_appointments(user)
        .await
        .context("Failed to load appointments snapshot")
}

fn print_response(response: &NextAppointmentResponse) {
    match &response.next {
        Some(card) => println!("{}", render::card_text(card)),
        None => println!("No upcoming appointments."),
    }
}
