use arbol_cli::{run, Options};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = Options::from_args();
    let stdout = std::io::stdout();

    if let Err(err) = run(&options, &mut stdout.lock()) {
        tracing::error!("failed to build or evaluate the model: {}", err);
        return Err(err);
    }

    Ok(())
}
