//! Authenticated session shared by all refresh tasks.

use crate::config::IdentityConfig;
use crate::Error;
use std::sync::{Arc, RwLock};

/// API root and bearer token used for outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
	pub api_root: String,
	pub token: String,
}

/// Shared handle to the current [`Session`].
///
/// Readers get an immutable snapshot, so a request never sees the root of one
/// session paired with the token of another. Replacing the session does not
/// affect snapshots already handed out.
#[derive(Debug, Clone)]
pub struct SessionHandle {
	current: Arc<RwLock<Arc<Session>>>,
}

impl SessionHandle {
	pub fn new(session: Session) -> Self {
		Self {
			current: Arc::new(RwLock::new(Arc::new(session))),
		}
	}

	pub fn current(&self) -> Arc<Session> {
		let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
		guard.clone()
	}

	pub fn replace(&self, session: Session) {
		let session = Arc::new(session);
		let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
		*guard = session;
	}
}

/// Source of fresh bearer tokens.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
	async fn access_token(&self) -> Result<String, Error>;
}

/// OAuth2 client-credentials grant against the HCSS identity service.
pub struct ClientCredentials {
	http: reqwest::Client,
	config: IdentityConfig,
}

impl ClientCredentials {
	pub fn new(http: reqwest::Client, config: IdentityConfig) -> Self {
		Self { http, config }
	}
}

#[async_trait::async_trait]
impl IdentityProvider for ClientCredentials {
	async fn access_token(&self) -> Result<String, Error> {
		#[derive(serde::Deserialize)]
		struct Response {
			access_token: String,
		}

		let url = format!("{}/connect/token", self.config.url.trim_end_matches('/'));
		let form = [
			("grant_type", "client_credentials"),
			("client_id", self.config.client_id.as_str()),
			("client_secret", self.config.client_secret.as_str()),
			("scope", self.config.scope.as_str()),
		];

		let response = self.http.post(&url)
			.form(&form)
			.send()
			.await
			.map_err(|e| Error::Identity(format!("error sending request to {}: {}", url, e)))?;

		if !response.status().is_success() {
			return Err(Error::Identity(format!("{} responded with status code {}", url, response.status())));
		}

		let response: Response = response.json()
			.await
			.map_err(|e| Error::Identity(format!("error parsing response from {}: {}", url, e)))?;
		if response.access_token.is_empty() {
			return Err(Error::Identity(format!("{} returned an empty access token", url)));
		}
		Ok(response.access_token)
	}
}

/// Keeps [`SessionHandle`] supplied with fresh tokens.
pub struct SessionManager {
	handle: SessionHandle,
	provider: Arc<dyn IdentityProvider>,
}

impl SessionManager {
	/// Create a manager with an empty token.
	///
	/// Requests made before the first successful [`refresh_session`](Self::refresh_session) will be rejected by the API.
	pub fn new(api_root: impl Into<String>, provider: Arc<dyn IdentityProvider>) -> Self {
		let handle = SessionHandle::new(Session {
			api_root: api_root.into(),
			token: String::new(),
		});
		Self { handle, provider }
	}

	pub fn handle(&self) -> SessionHandle {
		self.handle.clone()
	}

	/// Fetch a new token and swap it in.
	///
	/// On failure the previous session stays in place.
	pub async fn refresh_session(&self) -> Result<(), Error> {
		log::info!("Refreshing access token...");
		let token = self.provider.access_token().await?;
		let api_root = self.handle.current().api_root.clone();
		self.handle.replace(Session { api_root, token });
		log::debug!("Access token refreshed");
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct Sequence {
		calls: AtomicUsize,
		fail_after: usize,
	}

	#[async_trait::async_trait]
	impl IdentityProvider for Sequence {
		async fn access_token(&self) -> Result<String, Error> {
			let call = self.calls.fetch_add(1, Ordering::SeqCst);
			if call >= self.fail_after {
				Err(Error::Identity("identity service unavailable".into()))
			} else {
				Ok(format!("token-{}", call))
			}
		}
	}

	#[tokio::test]
	async fn refresh_replaces_token() {
		let manager = SessionManager::new("https://api.example", Arc::new(Sequence { calls: AtomicUsize::new(0), fail_after: 2 }));
		let handle = manager.handle();
		manager.refresh_session().await.unwrap();
		let first = handle.current();
		assert_eq!(first.token, "token-0");
		manager.refresh_session().await.unwrap();
		assert_eq!(handle.current().token, "token-1");
		assert_eq!(handle.current().api_root, "https://api.example");
		// Snapshots taken earlier are unaffected.
		assert_eq!(first.token, "token-0");
	}

	#[tokio::test]
	async fn failed_refresh_keeps_previous_token() {
		let manager = SessionManager::new("https://api.example", Arc::new(Sequence { calls: AtomicUsize::new(0), fail_after: 1 }));
		manager.refresh_session().await.unwrap();
		let result = manager.refresh_session().await;
		assert!(matches!(result, Err(Error::Identity(_))));
		assert_eq!(manager.handle().current().token, "token-0");
	}
}
