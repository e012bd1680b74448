//! Command-line boundary for the album store.
//!
//! # Responsibility
//! - Load configuration, start logging and bootstrap the keyspace.
//! - Map one subcommand onto one album/image use-case call.
//! - Print the success body on stdout or a JSON error body on stderr.

use albumstore_core::{
    bootstrap, core_version, init_logging, AlbumService, ClusterAlbumStore, ClusterConfig,
    ClusterHandle, ClusterImageStore, ErrorKind, LogSettings, StoreError,
};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use std::process::ExitCode;

#[derive(Args, Debug)]
struct AlbumArgs {
    album: String,
}

#[derive(Args, Debug)]
struct ImageArgs {
    album: String,
    image: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all album names (GET /).
    List,
    /// Create an empty album (POST /{album}).
    Create(AlbumArgs),
    /// Delete an album and its images (DELETE /{album}).
    Delete(AlbumArgs),
    /// List images in an album (GET /{album}).
    Images(AlbumArgs),
    /// Show one image of an album (GET /{album}/{image}).
    Get(ImageArgs),
    /// Add an image to an album (POST /{album}/{image}).
    Add(ImageArgs),
    /// Remove an image from an album (DELETE /{album}/{image}).
    Remove(ImageArgs),
    /// Create the keyspace and album table, then exit.
    Bootstrap,
    /// Print the core version.
    Version,
}

#[derive(Parser, Debug)]
#[command(name = "albumstore", about = "Manage albums of images")]
struct Arguments {
    #[clap(subcommand)]
    command: Commands,
}

enum Output {
    Text(String),
    Names(Vec<String>),
}

type Service = AlbumService<ClusterAlbumStore, ClusterImageStore>;

fn dispatch(service: &Service, command: Commands) -> Result<Output, StoreError> {
    let output = match command {
        Commands::List => Output::Names(service.list_albums()?),
        Commands::Create(args) => Output::Text(service.create_album(&args.album)?),
        Commands::Delete(args) => Output::Text(service.delete_album(&args.album)?),
        Commands::Images(args) => Output::Names(service.list_images(&args.album)?),
        Commands::Get(args) => Output::Text(service.get_image(&args.album, &args.image)?),
        Commands::Add(args) => Output::Text(service.add_image(&args.album, &args.image)?),
        Commands::Remove(args) => Output::Text(service.delete_image(&args.album, &args.image)?),
        Commands::Bootstrap | Commands::Version => Output::Text(String::new()),
    };
    Ok(output)
}

fn exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::Internal => ExitCode::from(1),
        ErrorKind::Validation => ExitCode::from(2),
        ErrorKind::NotFound => ExitCode::from(3),
        ErrorKind::Conflict => ExitCode::from(4),
    }
}

fn print_names(names: &[String]) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(names)?);
    Ok(())
}

fn main() -> ExitCode {
    let code = run(Arguments::parse());
    // File logs are buffered; push them out before the process exits.
    log::logger().flush();
    code
}

fn run(args: Arguments) -> ExitCode {
    if let Commands::Version = args.command {
        println!("albumstore {}", core_version());
        return ExitCode::SUCCESS;
    }

    let config = match ClusterConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("albumstore: {err}");
            return ExitCode::from(1);
        }
    };

    let log_settings = LogSettings::from_env();
    if let Some(dir) = log_settings.dir.as_deref() {
        if let Err(err) = init_logging(&log_settings.level, dir) {
            eprintln!("albumstore: {err}");
            return ExitCode::from(1);
        }
    }

    let cluster = ClusterHandle::new(config);
    // The store cannot serve without its schema.
    if let Err(err) = bootstrap(&cluster) {
        error!("event=cli_start module=cli status=error error_code=bootstrap_failed");
        eprintln!("albumstore: bootstrap failed: {err}");
        return ExitCode::from(1);
    }
    info!("event=cli_start module=cli status=ok");

    if let Commands::Bootstrap = args.command {
        println!("Keyspace ready at {}", cluster.keyspace_path().display());
        return ExitCode::SUCCESS;
    }

    let service = AlbumService::from_cluster(&cluster);
    match dispatch(&service, args.command) {
        Ok(Output::Text(text)) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Ok(Output::Names(names)) => match print_names(&names) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("albumstore: {err}");
                ExitCode::from(1)
            }
        },
        Err(err) => {
            let body = err.to_body();
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{}", body.message),
            }
            exit_code(err.kind())
        }
    }
}
