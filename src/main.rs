use std::io::Read;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use vm_aws::config::{Settings, DEFAULT_HOST, DEFAULT_PORT};
use vm_aws::form::{Configuration, FormContext, FormValues};
use vm_aws::models::{FormParameter, RemoteObject, Subscription};
use vm_aws::picker::{self, LookupClient, SearchOutcome};
use vm_aws::profile::{Profile, RegionSource, Schema};
use vm_aws::server::{self, AppState};
use vm_aws::{DefaultHost, ParameterConfigurator, VmAwsError, VmRenderer};

#[derive(Parser)]
#[command(
    name = "vm-aws",
    author,
    version,
    about = "AWS VM subscription plugin: renderers and instance picker",
    long_about = r#"vm-aws: render AWS VM subscriptions and exercise the instance picker outside the host UI.

Examples:
  1) Render the details card of a subscription:
      vm-aws render details --file subscription.json
  2) Look up instances with credentials not yet saved:
      vm-aws lookup web --access-key AKIA... --secret-key ...
  3) Serve the renderers for the host:
      vm-aws serve --port 8080
"#,
    after_help = "Use `vm-aws <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Renderer {
    Key,
    Features,
    Details,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a subscription read from a JSON file (or stdin with `-`)
    Render {
        #[arg(value_enum)]
        renderer: Renderer,
        #[arg(long, default_value = "-")]
        file: String,
        /// Infer the region from the availability zone when the parameter is missing
        #[arg(long)]
        infer_region: bool,
    },
    /// Search instances through the remote lookup endpoint
    Lookup {
        term: String,
        /// Node to search in, defaults to the provider node
        #[arg(long)]
        node: Option<String>,
        #[arg(long)]
        access_key: Option<String>,
        #[arg(long)]
        secret_key: Option<String>,
    },
    /// Print the subscription form with the instance picker installed
    Form {
        #[arg(long)]
        node: Option<String>,
    },
    /// Start the preview server
    Serve {
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Validate configuration
    CheckConfig,
}

fn read_subscription(file: &str) -> Result<Subscription, VmAwsError> {
    let raw = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };
    Ok(serde_json::from_str(&raw)?)
}

fn print_results(results: &[RemoteObject]) {
    if results.is_empty() {
        println!("(empty list)");
        return;
    }
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(vec!["Id", "Name", "Key", "Description", "New"]);
    for r in results {
        table.add_row(vec![
            r.id.clone(),
            r.name.clone().unwrap_or_default(),
            r.display_key().unwrap_or_default().to_string(),
            r.description.clone().unwrap_or_default(),
            if r.new { "yes".to_string() } else { String::new() },
        ]);
    }
    println!("\n{table}\n");
}

async fn run(cli: Cli) -> Result<(), VmAwsError> {
    let settings = Settings::from_env(cli.env_file.as_deref())?;
    let host = DefaultHost::new(settings.locale);
    let profile = Profile::aws(settings.schema);

    match cli.command {
        Commands::Render {
            renderer,
            file,
            infer_region,
        } => {
            let subscription = read_subscription(&file)?;
            let profile = if infer_region {
                profile.with_region_source(RegionSource::ParameterOrZone)
            } else {
                profile
            };
            let r = VmRenderer::new(&host, profile);
            let html = match renderer {
                Renderer::Key => r.render_key(&subscription),
                Renderer::Features => r.render_features(&subscription),
                Renderer::Details => r.render_details_key(&subscription),
            };
            println!("{}", html);
        }
        Commands::Lookup {
            term,
            node,
            access_key,
            secret_key,
        } => {
            let mut configuration = Configuration::new(
                node.as_deref(),
                vec![
                    FormParameter::new(&profile.access_key_parameter, false),
                    FormParameter::new(&profile.secret_key_parameter, false),
                    FormParameter::new(&profile.instance_parameter, true),
                ],
            );
            ParameterConfigurator::new(&host, profile.clone()).configure_subscription_parameters(&mut configuration);
            let fieldsets = configuration.render();
            let values = FormValues::new()
                .with(&profile.access_key_parameter, access_key.as_deref().unwrap_or(""))
                .with(&profile.secret_key_parameter, secret_key.as_deref().unwrap_or(""));
            let context = FormContext {
                node: configuration.node.clone(),
                values,
            };
            let picker = fieldsets
                .iter()
                .find_map(|f| f.picker(&profile.instance_parameter))
                .ok_or_else(|| VmAwsError::Config("instance picker not installed".into()))?;
            let client = LookupClient::new(&settings.api_base_url)?;
            match picker.search(&term, &context, &client).await? {
                SearchOutcome::Results(results) => print_results(&results),
                SearchOutcome::TooShort => println!("Type at least one character"),
                SearchOutcome::Superseded => {}
            }
        }
        Commands::Form { node } => {
            let mut configuration = Configuration::new(
                node.as_deref(),
                vec![
                    FormParameter::new(&profile.access_key_parameter, true),
                    FormParameter::new(&profile.secret_key_parameter, true),
                    FormParameter::new(&profile.account_parameter, false),
                    FormParameter::new(&profile.region_parameter, false),
                    FormParameter::new(&profile.instance_parameter, true),
                ],
            );
            ParameterConfigurator::new(&host, profile).configure_subscription_parameters(&mut configuration);
            configuration.render();
            println!("{}", configuration.container.to_html());
        }
        Commands::Serve { host: bind, port } => {
            server::start_server(AppState::new(host, profile), &bind, port).await?;
        }
        Commands::CheckConfig => {
            println!("API base URL: {}", settings.api_base_url);
            println!("Locale:       {:?}", settings.locale);
            println!("Profile:      {:?}", settings.schema);
            if settings.schema == Schema::Legacy {
                println!("{}", yansi::Paint::yellow("Legacy detail schema selected"));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    if cli.silent {
        picker::client::set_silent(true);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(%e, "Command failed");
        eprintln!("{}: {}", yansi::Paint::red("Error"), e);
        process::exit(1);
    }
}
