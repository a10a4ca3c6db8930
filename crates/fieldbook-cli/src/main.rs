//! CLI entry point for Fieldbook: one-shot commands and an interactive shell.

use std::env;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use fieldbook_core::{
    app_data_dir, load_config, set_endpoint, status, App, ChangeEvent, Config,
    FieldName, HttpClient, Note, Person, Resource, ResourceClient, ResourceKind, SubmitEvent,
    Url,
};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fieldbook")]
#[command(about = "Fieldbook: notes and persons on a REST backend")]
struct Cli {
    /// Notes endpoint for this run (overrides config).
    #[arg(long, global = true, value_name = "URL")]
    notes_url: Option<String>,
    /// Persons endpoint for this run (overrides config).
    #[arg(long, global = true, value_name = "URL")]
    persons_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show core status (for dev).
    Status,
    /// Show where Fieldbook stores its config.
    DataDir,
    /// Show the resolved endpoints and request timeout.
    Config,
    /// Save an endpoint URL to the config file.
    SetUrl {
        #[arg(value_enum)]
        kind: Kind,
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Fetch and list every item of one resource.
    List {
        #[arg(value_enum)]
        kind: Kind,
        /// Print the JSON array as returned by the server.
        #[arg(long)]
        json: bool,
    },
    /// Fill the note form, submit it and print the page.
    AddNote {
        #[arg(value_name = "CONTENT")]
        content: String,
    },
    /// Fill the person form, submit it and print the page.
    AddPerson {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "NUMBER")]
        number: String,
    },
    /// Load both lists and print the page.
    Show,
    /// Interactive session: edit fields, submit forms, watch the page update.
    Shell,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Notes,
    Persons,
}

impl From<Kind> for ResourceKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Notes => ResourceKind::Notes,
            Kind::Persons => ResourceKind::Persons,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config();
    if let Some(url) = cli.notes_url {
        config.notes_url = Some(url);
    }
    if let Some(url) = cli.persons_url {
        config.persons_url = Some(url);
    }
    tracing::debug!(?config, "resolved config");

    match run(cli.command.unwrap_or(Commands::Show), &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

async fn run(command: Commands, config: &Config) -> CliResult {
    match command {
        Commands::Status => {
            println!("Fieldbook");
            println!("  core: {}", status());
        }
        Commands::DataDir => match app_data_dir() {
            Some(p) => println!("{}", p.display()),
            None => eprintln!("Could not determine app data directory."),
        },
        Commands::Config => {
            let endpoints = config.endpoints()?;
            println!("notes:   {}", endpoints.notes);
            println!("persons: {}", endpoints.persons);
            match config.request_timeout() {
                Some(t) => println!("timeout: {}s", t.as_secs()),
                None => println!("timeout: none"),
            }
        }
        Commands::SetUrl { kind, url } => {
            let url = set_endpoint(kind.into(), &url)?;
            println!("Saved {}", url);
        }
        Commands::List { kind, json } => {
            let endpoints = config.endpoints()?;
            let http = config.http_client()?;
            match kind {
                Kind::Notes => list::<Note>(http, endpoints.notes, json).await?,
                Kind::Persons => list::<Person>(http, endpoints.persons, json).await?,
            }
        }
        Commands::AddNote { content } => {
            let mut app = App::from_config(config)?;
            // A failed load must not block the submit; only the create decides the exit code.
            let _ = app.mount().await;
            app.on_change(FieldName::Content, &ChangeEvent::new(content));
            app.handle_note_submit(&mut SubmitEvent::new()).await?;
            print!("{}", app.render());
        }
        Commands::AddPerson { name, number } => {
            let mut app = App::from_config(config)?;
            let _ = app.mount().await;
            app.on_change(FieldName::Name, &ChangeEvent::new(name));
            app.on_change(FieldName::Number, &ChangeEvent::new(number));
            app.handle_person_submit(&mut SubmitEvent::new()).await?;
            print!("{}", app.render());
        }
        Commands::Show => {
            let mut app = App::from_config(config)?;
            // A failed load still renders; the notice explains what went wrong.
            let _ = app.mount().await;
            print!("{}", app.render());
        }
        Commands::Shell => shell(App::from_config(config)?).await?,
    }
    Ok(())
}

async fn list<T: Resource>(http: HttpClient, endpoint: Url, json: bool) -> CliResult {
    let mut client: ResourceClient<T> = ResourceClient::new(http, endpoint);
    let items = client.load().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{:>6}  {}", item.id().to_string(), item.display_line());
        }
    }
    Ok(())
}

const SHELL_HELP: &str = "\
commands:
  content <text>    set the note content field
  name <text>       set the person name field
  number <text>     set the person number field
  submit-note       submit the notes form
  submit-person     submit the persons form
  reload            fetch both lists again
  render            print the page
  help              show this help
  quit              leave the shell";

async fn write_help<W: AsyncWrite + Unpin>(out: &mut W) -> std::io::Result<()> {
    out.write_all(SHELL_HELP.as_bytes()).await?;
    out.write_all(b"\n").await
}

async fn shell(mut app: App) -> CliResult {
    let _ = app.mount().await;
    let mut stdout = tokio::io::stdout();
    stdout.write_all(app.render().to_string().as_bytes()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        let rerender = match command.trim() {
            "" => false,
            "quit" | "exit" => break,
            "help" => {
                write_help(&mut stdout).await?;
                false
            }
            "render" => true,
            "reload" => {
                let _ = app.reload().await;
                true
            }
            "submit-note" => {
                let _ = app.handle_note_submit(&mut SubmitEvent::new()).await;
                true
            }
            "submit-person" => {
                let _ = app.handle_person_submit(&mut SubmitEvent::new()).await;
                true
            }
            other => match other.parse::<FieldName>() {
                Ok(field) => {
                    app.on_change(field, &ChangeEvent::new(rest));
                    true
                }
                Err(e) => {
                    eprintln!("{e}; type `help` for commands");
                    false
                }
            },
        };
        if rerender {
            stdout.write_all(app.render().to_string().as_bytes()).await?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FIELDBOOK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "fieldbook=debug,info"
        } else {
            "fieldbook=info,warn"
        })
    });

    let format = env::var("FIELDBOOK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldbook_core::parse_url;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn cli_parses_add_person() {
        let cli = Cli::try_parse_from(["fieldbook", "add-person", "Ada", "040-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::AddPerson { ref name, ref number }) if name == "Ada" && number == "040-1"
        ));
    }

    #[test]
    fn url_flags_are_global() {
        let cli = Cli::try_parse_from([
            "fieldbook",
            "list",
            "notes",
            "--notes-url",
            "http://example.com/n",
        ])
        .unwrap();
        assert_eq!(cli.notes_url.as_deref(), Some("http://example.com/n"));
        assert!(parse_url(cli.notes_url.as_deref().unwrap()).is_ok());
    }

    fn config_for(server: &MockServer) -> Config {
        Config {
            notes_url: Some(format!("{}/notes", server.uri())),
            persons_url: Some(format!("{}/persons", server.uri())),
            request_timeout_secs: None,
        }
    }

    #[tokio::test]
    async fn add_note_submits_even_when_persons_load_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/persons"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/notes"))
            .and(body_json(json!({"content": "hello"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "content": "hello"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = run(
            Commands::AddNote {
                content: "hello".into(),
            },
            &config_for(&server),
        )
        .await;
        assert!(result.is_ok(), "add-note failed: {:?}", result.err().map(|e| e.to_string()));
    }

    #[tokio::test]
    async fn add_person_submits_even_when_notes_load_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/persons"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/persons"))
            .and(body_json(json!({"name": "Ada", "number": "040-1"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"id": 1, "name": "Ada", "number": "040-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = run(
            Commands::AddPerson {
                name: "Ada".into(),
                number: "040-1".into(),
            },
            &config_for(&server),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn add_note_fails_when_create_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let result = run(
            Commands::AddNote {
                content: "hello".into(),
            },
            &config_for(&server),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn help_goes_through_the_given_writer() {
        let mut out = Vec::new();
        write_help(&mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("commands:\n"));
        assert!(text.ends_with("leave the shell\n"));
    }

    #[test]
    fn kind_maps_to_core() {
        assert_eq!(ResourceKind::from(Kind::Persons), ResourceKind::Persons);
    }
}
