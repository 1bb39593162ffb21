use std::error::Error;
use std::io;

use dotenv::dotenv;
use log::{info, warn};
use quiz_generator::config::Config;
use quiz_generator::profile::{ProfileRegistry, ProfileStore};
use quiz_generator::quiz::QuizCatalog;
use quiz_generator::shell::Shell;

fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine, the defaults cover everything.
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting quiz generator...");

    let config = Config::from_env()?;
    let registry = ProfileRegistry::open(ProfileStore::new(&config.profiles_path))?;
    let catalog = QuizCatalog::open(&config.categories_path)?;
    if catalog.is_empty() {
        warn!("No quizzes in {}", config.categories_path.display());
    }

    let stdin = io::stdin();
    let mut shell = Shell::new(
        registry,
        catalog,
        config.max_questions,
        stdin.lock(),
        io::stdout(),
    );
    shell.run()?;
    Ok(())
}
