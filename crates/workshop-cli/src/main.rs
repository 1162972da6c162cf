use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use workshop_client::documents::map_repair_to_document_data;
use workshop_client::models::{FuelType, VehicleForm, VehicleSummary};
use workshop_client::router::{CLIENTS_PATH, REPAIRS_PATH, VEHICLES_PATH};
use workshop_client::{ApiError, ClientConfig, Navigation, ProgressCallback, WorkshopApp};
use workshop_http::safe_file_name;

#[derive(Parser)]
#[command(name = "workshop")]
#[command(about = "Workshop Manager command-line client")]
struct Cli {
    /// Override the API base URL for this run
    #[arg(long, global = true, env = "WORKSHOP_API_BASE_URL")]
    api: Option<String>,

    /// Log every request at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Local settings, no API access
    #[command(subcommand)]
    Config(ConfigCmd),
    #[command(flatten)]
    Api(ApiCmd),
}

/// Commands that talk to the API.
#[derive(Subcommand)]
enum ApiCmd {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "WORKSHOP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Show the stored session
    Whoami,
    #[command(subcommand)]
    Clients(ClientCmd),
    #[command(subcommand)]
    Vehicles(VehicleCmd),
    #[command(subcommand)]
    Repairs(RepairCmd),
    #[command(subcommand)]
    Files(FileCmd),
    #[command(subcommand)]
    Templates(TemplateCmd),
}

#[derive(Subcommand)]
enum ClientCmd {
    List,
    /// Id and full name only
    Names,
    Get { id: i64 },
    Find { surname: String },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum VehicleCmd {
    List,
    Get { id: i64 },
    Vin { vin: String },
    Plate { plate: String },
    Create {
        #[arg(long)]
        vin: String,
        #[arg(long)]
        manufacturer: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        plate: Option<String>,
        /// GASOLINE, DIESEL, LPG or ELECTRIC
        #[arg(long)]
        fuel: Option<FuelType>,
        /// Owner client id, repeatable
        #[arg(long = "client")]
        clients: Vec<i64>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum RepairCmd {
    List {
        #[arg(long)]
        with_clients: bool,
    },
    Get {
        id: i64,
        #[arg(long)]
        with_clients: bool,
    },
    Number { number: String },
    Delete { id: i64 },
    /// Field values for printing documents of a repair
    Document { id: i64 },
}

#[derive(Subcommand)]
enum FileCmd {
    List { repair_id: i64 },
    Upload {
        repair_id: i64,
        path: PathBuf,
        #[arg(long)]
        content_type: Option<String>,
    },
    Download {
        repair_id: i64,
        file_id: i64,
        /// Defaults to the name the server sends
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    Delete { repair_id: i64, file_id: i64 },
}

#[derive(Subcommand)]
enum TemplateCmd {
    List,
    Show { name: String },
    ImageUrl { name: String },
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Persist the API base URL
    SetUrl { url: String },
    Show,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Surface the server's message rather than the variant.
fn api<T>(result: Result<T, ApiError>) -> anyhow::Result<T> {
    result.map_err(|e| match e.status() {
        0 => anyhow::anyhow!("{}", e.message()),
        status => anyhow::anyhow!("{} (HTTP {})", e.message(), status),
    })
}

/// Run the navigation guard for `path`.
fn require_session(app: &WorkshopApp, path: &str) -> anyhow::Result<()> {
    if let Navigation::Redirect(_) = app.router.navigate(path) {
        bail!("Not logged in. Run `workshop login` first.");
    }
    Ok(())
}

fn build_app(api: Option<String>, verbose: bool) -> anyhow::Result<WorkshopApp> {
    let base_url = api.unwrap_or_else(workshop_common::api_base_url);
    let config = ClientConfig::new(base_url).with_logging(verbose);
    let storage = Arc::new(workshop_client::FileSessionStorage::default_location());
    WorkshopApp::new(config, storage).context("Failed to build HTTP client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "workshop_http=debug,workshop_client=debug,info"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Config(cmd) => run_config(&cmd),
        Command::Api(cmd) => {
            let app = build_app(cli.api, cli.verbose)?;
            info!("Using API at {}", app.http.base_url());
            run_api(&app, cmd).await
        }
    }
}

async fn run_api(app: &WorkshopApp, cmd: ApiCmd) -> anyhow::Result<()> {
    match cmd {
        ApiCmd::Login { username, password } => {
            app.auth
                .login(&username, &password)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e.message()))?;
            println!("Logged in as {}", username);
        }
        ApiCmd::Logout => {
            app.auth.logout();
            println!("Logged out");
        }
        ApiCmd::Whoami => match app.session.user() {
            Some(user) => print_json(&user.claims)?,
            None => bail!("Not logged in"),
        },
        ApiCmd::Clients(cmd) => {
            require_session(app, CLIENTS_PATH)?;
            run_clients(app, cmd).await?;
        }
        ApiCmd::Vehicles(cmd) => {
            require_session(app, VEHICLES_PATH)?;
            run_vehicles(app, cmd).await?;
        }
        ApiCmd::Repairs(cmd) => {
            require_session(app, REPAIRS_PATH)?;
            run_repairs(app, cmd).await?;
        }
        ApiCmd::Files(cmd) => {
            require_session(app, REPAIRS_PATH)?;
            run_files(app, cmd).await?;
        }
        ApiCmd::Templates(cmd) => {
            require_session(app, REPAIRS_PATH)?;
            run_templates(app, cmd).await?;
        }
    }
    Ok(())
}

/// Where a download lands when no `--out` is given: the server's name,
/// kept inside the working directory, or `file-<id>`.
fn download_path(server_name: Option<&str>, file_id: i64) -> PathBuf {
    server_name
        .and_then(safe_file_name)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("file-{}", file_id)))
}

fn run_config(cmd: &ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::SetUrl { url } => {
            let path = workshop_common::save_persistent_base_url(url)?;
            println!("Saved to {}", path.display());
        }
        ConfigCmd::Show => {
            println!("api_base_url = {}", workshop_common::api_base_url());
            println!("session      = {}", workshop_common::session_path().display());
        }
    }
    Ok(())
}

async fn run_clients(app: &WorkshopApp, cmd: ClientCmd) -> anyhow::Result<()> {
    let clients = &app.clients;
    match cmd {
        ClientCmd::List => print_json(&api(clients.get_all().await)?),
        ClientCmd::Names => print_json(&api(clients.get_id_and_name().await)?),
        ClientCmd::Get { id } => print_json(&api(clients.get_by_id(id).await)?),
        ClientCmd::Find { surname } => print_json(&api(clients.find_by_surname(&surname).await)?),
        ClientCmd::Delete { id } => {
            api(clients.delete(id).await)?;
            println!("Deleted client {}", id);
            Ok(())
        }
    }
}

async fn run_vehicles(app: &WorkshopApp, cmd: VehicleCmd) -> anyhow::Result<()> {
    let vehicles = &app.vehicles;
    match cmd {
        VehicleCmd::List => print_json(&api(vehicles.get_all().await)?),
        VehicleCmd::Get { id } => print_json(&api(vehicles.get_by_id(id).await)?),
        VehicleCmd::Vin { vin } => print_json(&api(vehicles.find_by_vin(&vin).await)?),
        VehicleCmd::Plate { plate } => {
            print_json(&api(vehicles.find_by_licence_plate(&plate).await)?)
        }
        VehicleCmd::Create {
            vin,
            manufacturer,
            model,
            plate,
            fuel,
            clients,
        } => {
            let form = VehicleForm {
                details: VehicleSummary {
                    vin,
                    manufacturer,
                    model,
                    licence_plate: plate,
                    fuel_type: fuel,
                    ..Default::default()
                },
                clients,
            };
            print_json(&api(vehicles.create(&form).await)?)
        }
        VehicleCmd::Delete { id } => {
            api(vehicles.delete(id).await)?;
            println!("Deleted vehicle {}", id);
            Ok(())
        }
    }
}

async fn run_repairs(app: &WorkshopApp, cmd: RepairCmd) -> anyhow::Result<()> {
    let repairs = &app.repairs;
    match cmd {
        RepairCmd::List { with_clients: true } => {
            print_json(&api(repairs.get_all_with_clients().await)?)
        }
        RepairCmd::List { with_clients: false } => print_json(&api(repairs.get_all().await)?),
        RepairCmd::Get {
            id,
            with_clients: true,
        } => print_json(&api(repairs.get_by_id_with_clients(id).await)?),
        RepairCmd::Get {
            id,
            with_clients: false,
        } => print_json(&api(repairs.get_by_id(id).await)?),
        RepairCmd::Number { number } => print_json(&api(repairs.find_by_number(&number).await)?),
        RepairCmd::Delete { id } => {
            api(repairs.delete(id).await)?;
            println!("Deleted repair {}", id);
            Ok(())
        }
        RepairCmd::Document { id } => {
            let repair = api(repairs.get_by_id_with_clients(id).await)?;
            let data = map_repair_to_document_data(
                Some(&repair.repair),
                repair.primary_client(),
                repair.vehicle.as_ref(),
            );
            print_json(&data)
        }
    }
}

async fn run_files(app: &WorkshopApp, cmd: FileCmd) -> anyhow::Result<()> {
    let files = &app.files;
    match cmd {
        FileCmd::List { repair_id } => print_json(&api(files.get_by_repair_id(repair_id).await)?),
        FileCmd::Upload {
            repair_id,
            path,
            content_type,
        } => {
            let data = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .context("Path has no file name")?;

            let on_progress: ProgressCallback =
                Arc::new(|percent: u8| eprint!("\rUploading... {:>3}%", percent));
            let res = api(
                files
                    .upload(repair_id, &file_name, content_type, data, Some(on_progress))
                    .await,
            )?;
            eprintln!();
            match res.data {
                Some(data) => print_json(&data),
                None => {
                    println!("Uploaded {} (HTTP {})", file_name, res.status);
                    Ok(())
                }
            }
        }
        FileCmd::Download {
            repair_id,
            file_id,
            out,
        } => {
            let blob = api(files.download(repair_id, file_id).await)?;
            let out = out.unwrap_or_else(|| download_path(blob.filename.as_deref(), file_id));
            tokio::fs::write(&out, &blob.data)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Saved {} bytes to {}", blob.len(), out.display());
            Ok(())
        }
        FileCmd::Delete { repair_id, file_id } => {
            api(files.delete(repair_id, file_id).await)?;
            println!("Deleted file {}", file_id);
            Ok(())
        }
    }
}

async fn run_templates(app: &WorkshopApp, cmd: TemplateCmd) -> anyhow::Result<()> {
    let documents = &app.documents;
    match cmd {
        TemplateCmd::List => print_json(&api(documents.get_available_templates().await)?),
        TemplateCmd::Show { name } => {
            println!("{}", api(documents.get_template_content(&name).await)?);
            Ok(())
        }
        TemplateCmd::ImageUrl { name } => {
            println!("{}", documents.template_image_url(&name));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_download_path_stays_in_working_dir() {
        assert_eq!(download_path(Some("../../.bashrc"), 3), Path::new(".bashrc"));
        assert_eq!(
            download_path(Some("/home/u/.ssh/authorized_keys"), 3),
            Path::new("authorized_keys")
        );
        assert_eq!(download_path(Some(".."), 3), Path::new("file-3"));
        assert_eq!(download_path(Some(""), 3), Path::new("file-3"));
        assert_eq!(download_path(None, 9), Path::new("file-9"));
        assert_eq!(download_path(Some("faktura.pdf"), 9), Path::new("faktura.pdf"));
    }

    #[test]
    fn test_config_and_api_commands_parse() {
        let cli = Cli::try_parse_from(["workshop", "config", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCmd::Show)));

        let cli = Cli::try_parse_from(["workshop", "clients", "get", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Api(ApiCmd::Clients(ClientCmd::Get { id: 7 }))
        ));

        let cli = Cli::try_parse_from(["workshop", "logout"]).unwrap();
        assert!(matches!(cli.command, Command::Api(ApiCmd::Logout)));
    }
}
