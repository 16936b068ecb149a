use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
	pub general: GeneralConfig,
	pub identity: IdentityConfig,
	#[serde(default)]
	pub intervals: Intervals,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GeneralConfig {
	pub api_root: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct IdentityConfig {
	pub url: String,
	pub client_id: String,
	pub client_secret: String,
	#[serde(default = "default_scope")]
	pub scope: String,
}

/// Refresh intervals, in minutes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Intervals {
	pub token: u64,
	pub jobs: u64,
	pub employees: u64,
	pub equipment: u64,
	pub timecards: u64,
}

impl Default for Intervals {
	fn default() -> Self {
		Self {
			token: 30,
			jobs: 60,
			employees: 60,
			equipment: 60,
			timecards: 15,
		}
	}
}

fn default_scope() -> String {
	String::from("heavyjob:read")
}

pub fn minutes(minutes: u64) -> Duration {
	Duration::from_secs(minutes.saturating_mul(60))
}

impl Config {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ()> {
		let path = path.as_ref();
		let data = std::fs::read_to_string(path)
			.map_err(|e| log::error!("Failed to read configuration file: {}: {e}", path.display()))?;
		Self::parse(&data)
			.map_err(|e| log::error!("Failed to parse configuration file: {}: {e}", path.display()))
	}

	pub fn parse(data: &str) -> Result<Self, crate::Error> {
		let config: Self = toml::from_str(data)
			.map_err(|e| crate::Error::Config(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), crate::Error> {
		let intervals = [
			("token", self.intervals.token),
			("jobs", self.intervals.jobs),
			("employees", self.intervals.employees),
			("equipment", self.intervals.equipment),
			("timecards", self.intervals.timecards),
		];
		for (name, value) in intervals {
			if value == 0 {
				return Err(crate::Error::Config(format!("Intervals.{} must be at least one minute", name)));
			}
		}
		if self.general.api_root.is_empty() {
			return Err(crate::Error::Config("General.api_root must not be empty".into()));
		}
		Ok(())
	}
}
