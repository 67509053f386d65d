use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use breeze_app::{AppSnapshot, NavEvent, WeatherApp};
use breeze_auth::password::strength_fraction;
use breeze_auth::{check_password, CredentialForm, FieldValidation, PasswordStrength};
use breeze_core::Config;
use breeze_weather::{Coordinates, ManualLocation};
use clap::{Parser, Subcommand};

/// How long the command waits for the backend before giving up
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(60);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "breeze", version, about = "Weather and account client")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current conditions and the forecast
    Weather {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Sign in to an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Check a password against the signup policy
    Password { candidate: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    breeze_core::init()?;

    if let Command::Password { candidate } = &cli.command {
        print_password_report(candidate);
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let mut app = WeatherApp::from_config(&config, runtime.handle().clone())
        .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;

    tracing::info!("Breeze started");

    let result = match cli.command {
        Command::Weather { lat, lon } => run_weather(&mut app, lat.zip(lon)),
        Command::Login { email, password } => run_login(&mut app, &email, &password),
        Command::Signup {
            email,
            password,
            confirm,
        } => run_signup(&mut app, &email, &password, &confirm),
        Command::Password { .. } => Ok(()),
    };

    app.shutdown();
    result
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => return Ok(Config::load_validated()?.0),
    };

    let validation = config.validate();
    if !validation.is_valid() {
        anyhow::bail!(
            "Configuration validation failed: {}",
            validation.error_summary()
        );
    }
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }
    Ok(config)
}

/// Apply async results until `done` holds, the way a UI frame loop would.
fn pump(app: &mut WeatherApp, done: impl Fn(&WeatherApp) -> bool) -> Result<()> {
    let deadline = Instant::now() + RESPONSE_TIMEOUT;
    while Instant::now() < deadline {
        app.process_messages();
        app.tick(Instant::now());
        if done(app) {
            return Ok(());
        }
        std::thread::sleep(POLL_INTERVAL);
    }
    anyhow::bail!("Timed out waiting for a response")
}

fn run_weather(app: &mut WeatherApp, at: Option<(f64, f64)>) -> Result<()> {
    match at {
        Some((lat, lon)) => app.set_location(Arc::new(ManualLocation::at(Coordinates::new(
            lat, lon,
        )))),
        None => app.mount(),
    }
    pump(app, |a| !a.is_weather_loading())?;

    print_weather(&app.snapshot());
    Ok(())
}

fn print_weather(snapshot: &AppSnapshot) {
    let weather = &snapshot.weather;
    let current = &weather.current;
    println!("{}", current.city);
    println!(
        "  {} {} ({})",
        current.temperature, current.description, current.icon
    );

    if !weather.hourly.is_empty() {
        println!();
        for cell in &weather.hourly {
            println!("  {:>5}  {:>6}  {}", cell.hour, cell.temperature, cell.icon);
        }
    }

    if !weather.daily.is_empty() {
        println!();
        for row in &weather.daily {
            println!("  {:<10} {:<16} {}", row.day, row.range, row.icon);
        }
    }
}

fn run_login(app: &mut WeatherApp, email: &str, password: &str) -> Result<()> {
    app.navigate(NavEvent::LoginTapped);
    app.edit_email(email);
    app.edit_password(password);

    if !app.submit_login() {
        if let Some(form) = app.snapshot().login {
            print_field_errors(&[&form.email_error, &form.password_error]);
        }
        anyhow::bail!("Login form is incomplete");
    }

    pump(app, |a| {
        a.snapshot().login.map_or(true, |f| !f.is_loading())
    })?;
    report_auth(app, app.snapshot().login.and_then(|f| f.api_error))
}

fn run_signup(app: &mut WeatherApp, email: &str, password: &str, confirm: &str) -> Result<()> {
    app.navigate(NavEvent::SignupTapped);
    app.edit_email(email);
    app.edit_password(password);
    app.edit_confirm_password(confirm);

    if !app.submit_signup() {
        if let Some(form) = app.snapshot().signup {
            print_field_errors(&[
                &form.email_error,
                &form.password_error,
                &form.confirm_password_error,
            ]);
        }
        anyhow::bail!("Signup form is incomplete");
    }

    pump(app, |a| {
        a.snapshot().signup.map_or(true, |f| !f.is_loading())
    })?;
    report_auth(app, app.snapshot().signup.and_then(|f| f.api_error))
}

fn report_auth(app: &WeatherApp, api_error: Option<String>) -> Result<()> {
    let snapshot = app.snapshot();
    match (snapshot.banner, api_error) {
        (Some(banner), _) => {
            println!("{}", banner.message);
            Ok(())
        }
        (None, Some(message)) => anyhow::bail!(message),
        (None, None) => anyhow::bail!("No response from the account service"),
    }
}

fn print_field_errors(fields: &[&FieldValidation]) {
    for field in fields.iter().filter(|f| f.is_error) {
        eprintln!("  {}", field.message);
    }
}

fn print_password_report(candidate: &str) {
    let strength = PasswordStrength::of(candidate);
    println!(
        "{} ({:.0}%)",
        strength.label(),
        strength_fraction(candidate) * 100.0
    );
    for rule in check_password(candidate) {
        println!("  missing: {}", rule);
    }
}
