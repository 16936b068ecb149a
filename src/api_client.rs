use crate::session::SessionHandle;
use crate::types;
use crate::Error;
use serde::de::DeserializeOwned;

/// Filters for a cursor-paginated listing.
pub trait CursorFilters: Clone {
	fn cursor(&self) -> Option<&str>;

	fn set_cursor(&mut self, cursor: String);

	/// Non-empty query parameters, in the order they are sent.
	fn query_pairs(&self) -> Vec<(&'static str, String)>;

	fn to_query(&self) -> String {
		let pairs = self.query_pairs();
		if pairs.is_empty() {
			return String::new();
		}
		let encoded: Vec<String> = pairs.iter()
			.map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
			.collect();
		format!("?{}", encoded.join("&"))
	}
}

/// Client for the HeavyJob API.
///
/// Every request reads the current session from the shared handle.
#[derive(Clone)]
pub struct ApiClient {
	http: reqwest::Client,
	session: SessionHandle,
}

impl ApiClient {
	pub fn new(http: reqwest::Client, session: SessionHandle) -> Self {
		Self { http, session }
	}

	pub async fn get_jobs(&self) -> Result<Vec<types::Job>, Error> {
		self.get_auth("/jobs").await
	}

	pub async fn get_employees(&self) -> Result<Vec<types::Employee>, Error> {
		self.get_auth("/employees").await
	}

	pub async fn get_equipment(&self) -> Result<Vec<types::Equipment>, Error> {
		self.get_auth("/equipment").await
	}

	/// Get every timecard summary matching the filters, across all pages.
	pub async fn get_timecard_summaries(&self, filters: &types::TimecardFilters) -> Result<Vec<types::TimecardSummary>, Error> {
		self.fetch_all("/timeCardInfo", filters).await
	}

	pub async fn get_timecard(&self, id: &str) -> Result<types::Timecard, Error> {
		self.get_auth(&format!("/timeCards/{}", urlencoding::encode(id))).await
	}

	/// Get a single page, returning its records and the cursor of the next page.
	///
	/// An empty or missing cursor means this was the last page.
	pub async fn fetch_page<T, F>(&self, path: &str, filters: &F) -> Result<(Vec<T>, Option<String>), Error>
	where
		T: DeserializeOwned,
		F: CursorFilters,
	{
		let page: types::Page<T> = self.get_auth(&format!("{}{}", path, filters.to_query())).await?;
		let next_cursor = page.metadata.next_cursor.filter(|x| !x.is_empty());
		Ok((page.results, next_cursor))
	}

	/// Follow cursors until the last page, concatenating records in page order.
	///
	/// A failure on any page fails the whole call, as does a page that hands
	/// back the cursor it was requested with.
	pub async fn fetch_all<T, F>(&self, path: &str, filters: &F) -> Result<Vec<T>, Error>
	where
		T: DeserializeOwned,
		F: CursorFilters,
	{
		let mut filters = filters.clone();
		let mut records = Vec::new();
		let mut pages = 0usize;
		loop {
			let (page, next_cursor) = self.fetch_page(path, &filters).await?;
			pages += 1;
			records.extend(page);
			match next_cursor {
				Some(cursor) if filters.cursor() == Some(cursor.as_str()) => {
					return Err(Error::RepeatedCursor { path: path.to_string(), cursor });
				},
				Some(cursor) => filters.set_cursor(cursor),
				None => break,
			}
		}
		log::debug!("Fetched {} records from {} in {} pages", records.len(), path, pages);
		Ok(records)
	}

	async fn get_auth<T: DeserializeOwned>(&self, relative_url: &str) -> Result<T, Error> {
		let session = self.session.current();
		let url = format!("{}{}", session.api_root.trim_end_matches('/'), relative_url);
		log::debug!("GET {}", url);

		let response = self.http.get(&url)
			.bearer_auth(&session.token)
			.header(reqwest::header::ACCEPT, "application/json")
			.send()
			.await
			.map_err(|source| Error::Request { path: relative_url.to_string(), source })?;

		if !response.status().is_success() {
			Err(Error::Status { path: relative_url.to_string(), status: response.status() })
		} else {
			response.json().await.map_err(|source| Error::Decode { path: relative_url.to_string(), source })
		}
	}
}
