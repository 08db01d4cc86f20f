//! REST implementation of the remote store.
//!
//! Speaks a PostgREST-style dialect against the hosted service: one route
//! per table under `/rest/v1/`, filters as `column=eq.value` query
//! parameters, and `Prefer: return=representation` so writes echo the
//! stored row back.

use crate::config::RemoteConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::http::{HttpClient, HttpResponse, ReqwestClient};
use crate::remote::RemoteStore;
use crate::wire::{user_patch_body, EntryRow, NewEntryRow, NewUserRow, UserRow};
use milepost_model::{Entry, User, UserPatch};
use serde::de::DeserializeOwned;

const USERS_TABLE: &str = "users";
const ENTRIES_TABLE: &str = "entries";

/// The hosted relational service, reached over authenticated HTTPS.
pub struct RestRemote<C: HttpClient> {
    base_url: String,
    api_key: String,
    client: C,
}

impl RestRemote<ReqwestClient> {
    /// Builds a remote over a blocking `reqwest` client with the
    /// configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn open(config: RemoteConfig) -> RemoteResult<Self> {
        let client = ReqwestClient::new(config.timeout)?;
        Ok(Self::with_client(config, client))
    }
}

impl<C: HttpClient> RestRemote<C> {
    /// Builds a remote over an arbitrary HTTP client.
    pub fn with_client(config: RemoteConfig, client: C) -> Self {
        Self {
            base_url: config.base_url,
            api_key: config.api_key,
            client,
        }
    }

    /// Returns the service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}{query}", self.base_url)
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("apikey".into(), self.api_key.clone()),
            ("Authorization".into(), format!("Bearer {}", self.api_key)),
            ("Content-Type".into(), "application/json".into()),
            ("Prefer".into(), "return=representation".into()),
        ]
    }

    fn decode<T: DeserializeOwned>(&self, response: HttpResponse) -> RemoteResult<T> {
        if let Some(err) = status_error(&response) {
            return Err(err);
        }
        serde_json::from_str(&response.body)
            .map_err(|e| RemoteError::Malformed(format!("{e}: {}", truncated(&response.body))))
    }

    fn get_rows<T: DeserializeOwned>(&self, table: &str, query: &str) -> RemoteResult<Vec<T>> {
        let response = self
            .client
            .get(&self.table_url(table, query), &self.headers())
            .map_err(RemoteError::http_retryable)?;
        self.decode(response)
    }

    fn post_rows<T: DeserializeOwned>(&self, table: &str, body: &str) -> RemoteResult<Vec<T>> {
        let response = self
            .client
            .post(&self.table_url(table, ""), &self.headers(), body)
            .map_err(RemoteError::http_retryable)?;
        self.decode(response)
    }

    fn patch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
        body: &str,
    ) -> RemoteResult<Vec<T>> {
        let response = self
            .client
            .patch(&self.table_url(table, query), &self.headers(), body)
            .map_err(RemoteError::http_retryable)?;
        self.decode(response)
    }
}

fn status_error(response: &HttpResponse) -> Option<RemoteError> {
    let body = truncated(&response.body);
    match response.status {
        200..=299 => None,
        401 | 403 => Some(RemoteError::Auth(body)),
        409 => Some(RemoteError::Constraint(body)),
        status => Some(RemoteError::Http {
            message: format!("status {status}: {body}"),
            retryable: status >= 500,
        }),
    }
}

fn truncated(body: &str) -> String {
    const LIMIT: usize = 200;
    if body.len() <= LIMIT {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < LIMIT)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…", &body[..cut])
    }
}

impl<C: HttpClient> RemoteStore for RestRemote<C> {
    fn create_user(&self, user: &User) -> RemoteResult<User> {
        let body = serde_json::to_string(&[NewUserRow::from(user)])
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;
        let rows: Vec<UserRow> = self.post_rows(USERS_TABLE, &body)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::Malformed("insert returned no row".into()))?;
        Ok(row.merge_into(user))
    }

    fn user_by_identifier(&self, identifier: &str) -> RemoteResult<Option<User>> {
        let query = format!("?select=*&email=eq.{identifier}&limit=1");
        let rows: Vec<UserRow> = self.get_rows(USERS_TABLE, &query)?;
        Ok(rows.into_iter().next().map(UserRow::into_user))
    }

    fn update_user(&self, id: &str, patch: &UserPatch) -> RemoteResult<User> {
        let body = user_patch_body(patch).to_string();
        let query = format!("?id=eq.{id}");
        let rows: Vec<UserRow> = self.patch_rows(USERS_TABLE, &query, &body)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::http_fatal(format!("update matched no row for id {id}")))?;
        Ok(row.into_user())
    }

    fn create_entry(&self, entry: &Entry) -> RemoteResult<Entry> {
        let body = serde_json::to_string(&[NewEntryRow::from(entry)])
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;
        let rows: Vec<EntryRow> = self.post_rows(ENTRIES_TABLE, &body)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::Malformed("insert returned no row".into()))?;
        Ok(row.into_entry())
    }

    fn entries_for_user(&self, user_id: &str) -> RemoteResult<Vec<Entry>> {
        let query = format!("?select=*&userid=eq.{user_id}&order=createdat.desc");
        let rows: Vec<EntryRow> = self.get_rows(ENTRIES_TABLE, &query)?;
        Ok(rows.into_iter().map(EntryRow::into_entry).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Records requests and replays a canned response.
    struct CannedClient {
        response: Mutex<Result<HttpResponse, String>>,
        requests: Mutex<Vec<(String, String, Option<String>)>>,
    }

    impl CannedClient {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: Mutex::new(Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                })),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Mutex::new(Err(message.to_string())),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, method: &str, url: &str, body: Option<&str>) {
            self.requests
                .lock()
                .push((method.to_string(), url.to_string(), body.map(String::from)));
        }

        fn requests(&self) -> Vec<(String, String, Option<String>)> {
            self.requests.lock().clone()
        }
    }

    impl HttpClient for CannedClient {
        fn get(&self, url: &str, _headers: &[(String, String)]) -> Result<HttpResponse, String> {
            self.record("GET", url, None);
            self.response.lock().clone()
        }

        fn post(
            &self,
            url: &str,
            _headers: &[(String, String)],
            body: &str,
        ) -> Result<HttpResponse, String> {
            self.record("POST", url, Some(body));
            self.response.lock().clone()
        }

        fn patch(
            &self,
            url: &str,
            _headers: &[(String, String)],
            body: &str,
        ) -> Result<HttpResponse, String> {
            self.record("PATCH", url, Some(body));
            self.response.lock().clone()
        }
    }

    fn remote(client: CannedClient) -> RestRemote<CannedClient> {
        RestRemote::with_client(
            RemoteConfig::new("https://svc.example.com", "anon-key"),
            client,
        )
    }

    #[test]
    fn create_user_merges_service_defaults() {
        let client = CannedClient::new(
            201,
            r#"[{"id":"u1","createdat":"2024-06-01T00:00:00Z"}]"#,
        );
        let remote = remote(client);

        let user = User::new("alice", "a@x.com", "p1", "Alice");
        let created = remote.create_user(&user).unwrap();

        assert_eq!(created.created_at, "2024-06-01T00:00:00Z");
        assert_eq!(created.username, "alice");

        let requests = remote.client.requests();
        assert_eq!(requests[0].0, "POST");
        assert_eq!(requests[0].1, "https://svc.example.com/rest/v1/users");
        // minimal insert: no counters on the wire
        let body = requests[0].2.as_ref().unwrap();
        assert!(!body.contains("totalentries"));
        assert!(body.contains("\"email\":\"a@x.com\""));
    }

    #[test]
    fn lookup_miss_is_none_not_error() {
        let remote = remote(CannedClient::new(200, "[]"));
        assert_eq!(remote.user_by_identifier("nobody@x.com").unwrap(), None);
    }

    #[test]
    fn lookup_builds_email_filter() {
        let remote = remote(CannedClient::new(200, "[]"));
        remote.user_by_identifier("a@x.com").unwrap();
        let url = &remote.client.requests()[0].1;
        assert!(url.contains("email=eq.a@x.com"));
        assert!(url.contains("limit=1"));
    }

    #[test]
    fn transport_failure_is_retryable_http_error() {
        let remote = remote(CannedClient::failing("connection refused"));
        let err = remote.entries_for_user("u1").unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn auth_status_maps_to_auth_error() {
        let remote = remote(CannedClient::new(401, "bad key"));
        let err = remote.user_by_identifier("a@x.com").unwrap_err();
        assert!(matches!(err, RemoteError::Auth(_)));
    }

    #[test]
    fn conflict_status_maps_to_constraint() {
        let remote = remote(CannedClient::new(409, "duplicate key"));
        let user = User::new("alice", "a@x.com", "p1", "Alice");
        let err = remote.create_user(&user).unwrap_err();
        assert!(matches!(err, RemoteError::Constraint(_)));
    }

    #[test]
    fn malformed_body_maps_to_malformed() {
        let remote = remote(CannedClient::new(200, "not json"));
        let err = remote.entries_for_user("u1").unwrap_err();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }

    #[test]
    fn entries_query_orders_newest_first() {
        let remote = remote(CannedClient::new(200, "[]"));
        remote.entries_for_user("u1").unwrap();
        let url = &remote.client.requests()[0].1;
        assert!(url.contains("userid=eq.u1"));
        assert!(url.contains("order=createdat.desc"));
    }

    #[test]
    fn update_with_no_match_is_an_error() {
        let remote = remote(CannedClient::new(200, "[]"));
        let err = remote
            .update_user("ghost", &UserPatch::new().with_full_name("X"))
            .unwrap_err();
        assert!(!err.is_retryable());
    }

    #[test]
    fn update_sends_wire_column_names() {
        let remote = remote(CannedClient::new(200, r#"[{"id":"u1"}]"#));
        remote
            .update_user("u1", &UserPatch::new().with_progress(3, 1, 2, "2024-06-01"))
            .unwrap();

        let requests = remote.client.requests();
        assert!(requests[0].1.ends_with("/rest/v1/users?id=eq.u1"));
        let body = requests[0].2.as_ref().unwrap();
        assert!(body.contains("totalentries"));
        assert!(!body.contains("totalEntries"));
    }
}
