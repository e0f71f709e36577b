use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::ResourceClient;
use crate::error::{ErrorContext, OrgError, OrgResult};
use crate::models::*;

pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(api_key: &str, base_url: &str) -> OrgResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| OrgError::ConfigError("Invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Request to a path built from raw segments, each percent-encoded.
    fn request_at(&self, method: Method, segments: &[&str]) -> OrgResult<RequestBuilder> {
        let url = segment_url(&self.base_url, segments)?;
        Ok(self.client.request(method, url))
    }

    async fn send(&self, request: RequestBuilder) -> OrgResult<Response> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> OrgResult<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> OrgResult<T> {
        self.get_json(self.request(Method::POST, path).json(body)).await
    }

    /// Lookups by name: a 404 means "no such thing", not a failure.
    async fn find<T: DeserializeOwned>(&self, request: RequestBuilder) -> OrgResult<Option<T>> {
        match self.get_json::<T>(request).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

pub(crate) fn segment_url(base_url: &str, segments: &[&str]) -> OrgResult<Url> {
    let mut url = Url::parse(base_url).with_context(|| format!("Invalid API url '{}'", base_url))?;
    url.path_segments_mut()
        .ok()
        .context("API url cannot carry a path")?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Map a non-2xx response onto the error taxonomy.
pub(crate) fn status_error(status: StatusCode, body: &str) -> OrgError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.text().map(str::to_string))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                body.trim().to_string()
            }
        });

    match status {
        StatusCode::NOT_FOUND => OrgError::NotFound(message),
        StatusCode::CONFLICT => OrgError::Conflict(message),
        StatusCode::FORBIDDEN => OrgError::PermissionDenied(message),
        StatusCode::UNAUTHORIZED => OrgError::Unauthorized(message),
        _ => OrgError::ApiError(format!(
            "API request failed with status {}: {}",
            status, message
        )),
    }
}

pub(crate) fn membership_query(
    org_id: &Id,
    team_id: Option<&Id>,
    owner_id: Option<&Id>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("org_id", org_id.to_string())];
    if let Some(team_id) = team_id {
        query.push(("team_id", team_id.to_string()));
    }
    if let Some(owner_id) = owner_id {
        query.push(("owner_id", owner_id.to_string()));
    }
    query
}

#[async_trait]
impl ResourceClient for HttpClient {
    async fn who_am_i(&self) -> OrgResult<Session> {
        self.get_json(self.request(Method::GET, "/self")).await
    }

    async fn list_orgs(&self) -> OrgResult<Vec<Org>> {
        self.get_json(self.request(Method::GET, "/orgs")).await
    }

    async fn get_org_by_name(&self, name: &str) -> OrgResult<Option<Org>> {
        let request = self.request(Method::GET, "/orgs").query(&[("name", name)]);
        let orgs: Option<Vec<Org>> = self.find(request).await?;
        Ok(orgs.and_then(|orgs| orgs.into_iter().next()))
    }

    async fn create_org(&self, name: &str) -> OrgResult<Org> {
        self.post_json("/orgs", &OrgCreateInput { name }).await
    }

    async fn remove_org_member(&self, org_id: &Id, user_id: &Id) -> OrgResult<()> {
        let request = self.request_at(
            Method::DELETE,
            &["orgs", org_id.as_str(), "members", user_id.as_str()],
        )?;
        self.send(request).await?;
        Ok(())
    }

    async fn list_teams(&self, org_id: &Id) -> OrgResult<Vec<Team>> {
        let request = self
            .request(Method::GET, "/teams")
            .query(&[("org_id", org_id.as_str())]);
        self.get_json(request).await
    }

    async fn get_teams_by_name(&self, org_id: &Id, name: &str) -> OrgResult<Vec<Team>> {
        let request = self
            .request(Method::GET, "/teams")
            .query(&[("org_id", org_id.as_str()), ("name", name)]);
        Ok(self.find(request).await?.unwrap_or_default())
    }

    async fn create_team(&self, org_id: &Id, name: &str, team_type: TeamType) -> OrgResult<Team> {
        let input = TeamCreateInput {
            org_id,
            name,
            team_type,
        };
        self.post_json("/teams", &input).await
    }

    async fn list_memberships(
        &self,
        org_id: &Id,
        team_id: Option<&Id>,
        owner_id: Option<&Id>,
    ) -> OrgResult<Vec<Membership>> {
        let request = self
            .request(Method::GET, "/memberships")
            .query(&membership_query(org_id, team_id, owner_id));
        self.get_json(request).await
    }

    async fn create_membership(&self, owner_id: &Id, org_id: &Id, team_id: &Id) -> OrgResult<()> {
        let input = MembershipCreateInput {
            owner_id,
            org_id,
            team_id,
        };
        let request = self.request(Method::POST, "/memberships").json(&input);
        self.send(request).await?;
        Ok(())
    }

    async fn delete_membership(&self, membership_id: &Id) -> OrgResult<()> {
        let request = self.request_at(Method::DELETE, &["memberships", membership_id.as_str()])?;
        self.send(request).await?;
        Ok(())
    }

    async fn list_profiles_by_id(&self, ids: &[Id]) -> OrgResult<Vec<Profile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("id", id.as_str())).collect();
        let request = self.request(Method::GET, "/profiles").query(&query);
        self.get_json(request).await
    }

    async fn get_profile_by_username(&self, username: &str) -> OrgResult<Option<Profile>> {
        let request = self.request_at(Method::GET, &["profiles", username])?;
        self.find(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"error":"resource exists"}"#;
        let err = status_error(StatusCode::CONFLICT, body);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "resource exists");

        let err = status_error(StatusCode::NOT_FOUND, "");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Not Found");

        let err = status_error(StatusCode::FORBIDDEN, r#"{"message":"must be a member of the admin team"}"#);
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        let err = status_error(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, OrgError::Unauthorized(_)));
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded");
        match err {
            OrgError::ApiError(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("upstream exploded"));
            }
            other => panic!("Expected OrgError::ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_membership_query_only_includes_given_filters() {
        let org = Id::new("org1");
        let team = Id::new("team1");
        let user = Id::new("user1");

        assert_eq!(
            membership_query(&org, None, None),
            vec![("org_id", "org1".to_string())]
        );
        assert_eq!(
            membership_query(&org, None, Some(&user)),
            vec![("org_id", "org1".to_string()), ("owner_id", "user1".to_string())]
        );
        assert_eq!(membership_query(&org, Some(&team), Some(&user)).len(), 3);
    }

    #[test]
    fn test_path_segments_are_escaped() {
        let url = segment_url("https://api.example.org/v1", &["profiles", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.org/v1/profiles/a%2Fb%3Fc%23d");

        let url = segment_url("https://api.example.org", &["memberships", "m1"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.org/memberships/m1");
    }

    #[test]
    fn test_segment_url_rejects_bad_base() {
        let err = segment_url("not a url", &["profiles"]).unwrap_err();
        assert!(matches!(err, OrgError::Unknown(msg) if msg.contains("Invalid API url")));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = HttpClient::new("key", "https://api.example.org/v1/").unwrap();
        assert_eq!(client.base_url(), "https://api.example.org/v1");
    }

    #[test]
    fn test_rejects_unprintable_api_key() {
        assert!(HttpClient::new("bad\nkey", "https://api.example.org").is_err());
    }
}
