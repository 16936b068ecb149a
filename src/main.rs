use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use heavyjob_sync::api_client::ApiClient;
use heavyjob_sync::config::Config;
use heavyjob_sync::scheduler::Scheduler;
use heavyjob_sync::session::{ClientCredentials, SessionManager};
use heavyjob_sync::store::MemoryStore;
use heavyjob_sync::tasks;

/// Periodically copy HeavyJob jobs, employees, equipment and timecards into a local store.
#[derive(Parser)]
#[command(version)]
struct Options {
	/// Configuration file (TOML).
	#[arg(short, long)]
	#[arg(value_name = "FILE")]
	config: PathBuf,

	/// Override the API root from the configuration file.
	#[arg(long)]
	#[arg(value_name = "URL")]
	api_root: Option<String>,

	/// Run every refresh task once and exit.
	#[arg(long)]
	once: bool,

	/// Write the synchronized data as JSON after a single run.
	#[arg(long)]
	#[arg(value_name = "FILE")]
	#[arg(requires = "once")]
	snapshot: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	if do_main(Options::parse()).await.is_err() {
		std::process::exit(1);
	}
}

async fn do_main(options: Options) -> Result<(), ()> {
	let mut config = Config::from_file(&options.config)?;
	if let Some(api_root) = options.api_root {
		config.general.api_root = api_root;
	}

	let http = reqwest::Client::new();
	let provider = ClientCredentials::new(http.clone(), config.identity.clone());
	let sessions = Arc::new(SessionManager::new(config.general.api_root.clone(), Arc::new(provider)));

	// There is no previous token to fall back to yet.
	sessions.refresh_session()
		.await
		.map_err(|e| log::error!("{}", e))?;

	let api = ApiClient::new(http, sessions.handle());
	let store = Arc::new(MemoryStore::new());

	let mut scheduler = Scheduler::new();
	tasks::register(&mut scheduler, &config.intervals, sessions, api, store.clone())
		.map_err(|e| log::error!("{}", e))?;

	if options.once {
		run_once(&scheduler, &store, options.snapshot.as_deref()).await
	} else {
		let handle = scheduler.start();
		tokio::signal::ctrl_c()
			.await
			.map_err(|e| log::error!("Failed to wait for interrupt signal: {}", e))?;
		log::info!("Shutting down");
		handle.shutdown();
		Ok(())
	}
}

async fn run_once(scheduler: &Scheduler, store: &MemoryStore, snapshot: Option<&std::path::Path>) -> Result<(), ()> {
	let mut failed = false;
	for (name, result) in scheduler.run_all_once().await {
		if let Err(e) = result {
			log::error!("Job {} failed: {}", name, e);
			failed = true;
		}
	}

	if let Some(path) = snapshot {
		let data = serde_json::to_vec_pretty(&store.snapshot())
			.map_err(|e| log::error!("Failed to serialize snapshot: {}", e))?;
		std::fs::write(path, data)
			.map_err(|e| log::error!("Failed to write snapshot to {}: {}", path.display(), e))?;
		log::info!("Wrote snapshot to {}", path.display());
	}

	if failed {
		Err(())
	} else {
		Ok(())
	}
}
