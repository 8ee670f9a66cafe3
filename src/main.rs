use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = account_forest::app::run(std::env::args()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
