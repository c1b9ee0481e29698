use crate::{
    RequestId, UserId,
    requests::{self, DonationAction},
    responses,
};
use reqwest::{StatusCode, header::CONTENT_TYPE};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the donation backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    async fn get(&self, path: &str, query: &impl Serialize) -> ReqwestResult {
        self.inner_client
            .get(self.format_url(path))
            .query(query)
            .send()
            .await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.inner_client.get(self.format_url(path)).send().await
    }

    /// A PUT with a JSON content type but no body; the backend reads both ids
    /// from the URL.
    async fn empty_put(&self, path: &str, query: &impl Serialize) -> ReqwestResult {
        self.inner_client
            .put(self.format_url(path))
            .header(CONTENT_TYPE, "application/json")
            .query(query)
            .send()
            .await
    }
}

fn donor_query(action: &DonationAction) -> requests::DonorQuery {
    requests::DonorQuery {
        donor_id: action.donor_id,
    }
}

/// Methods on the backend API
impl APIClient {
    /// Get the dashboard summary for a user, including their own requests.
    pub async fn dashboard(
        &self,
        user_id: UserId,
    ) -> Result<responses::Dashboard, ClientError> {
        let query = requests::UserQuery { user_id };
        let response = self.get("users/dashboard/", &query).await?;
        ok_body(response).await
    }

    /// Requests a donor can pick up or has already accepted.
    pub async fn available_requests(
        &self,
        donor_id: UserId,
    ) -> Result<Vec<crate::DonationRequest>, ClientError> {
        let query = requests::DonorQuery { donor_id };
        let response = self.get("users/available/requests/", &query).await?;
        ok_body(response).await
    }

    pub async fn donor_details(
        &self,
        donor_id: UserId,
    ) -> Result<responses::DonorDetails, ClientError> {
        let response =
            self.empty_get(&format!("users/donor/{donor_id}/")).await?;
        ok_body(response).await
    }

    /// Commit a donor to a pending request.
    pub async fn accept_request(
        &self,
        action: &DonationAction,
    ) -> Result<(), ClientError> {
        let path = request_path("accept/request", action.request_id);
        let response = self.empty_put(&path, &donor_query(action)).await?;
        ok_empty(response).await
    }

    /// Withdraw a donor's commitment to a request.
    pub async fn cancel_donation(
        &self,
        action: &DonationAction,
    ) -> Result<(), ClientError> {
        let path = request_path("cancel/donate", action.request_id);
        let response = self.empty_put(&path, &donor_query(action)).await?;
        ok_empty(response).await
    }

    /// Confirm that the accepted donor has donated.
    pub async fn approve_request(
        &self,
        action: &DonationAction,
    ) -> Result<(), ClientError> {
        let path = request_path("approve/request", action.request_id);
        let response = self.empty_put(&path, &donor_query(action)).await?;
        ok_empty(response).await
    }

    /// Cancel a running request, releasing the accepted donor.
    pub async fn cancel_request(
        &self,
        action: &DonationAction,
    ) -> Result<(), ClientError> {
        let path = request_path("cancel/request", action.request_id);
        let response = self.empty_put(&path, &donor_query(action)).await?;
        ok_empty(response).await
    }

    pub async fn delete_request(
        &self,
        action: &DonationAction,
    ) -> Result<(), ClientError> {
        let path = request_path("delete/request", action.request_id);
        let response = self.empty_put(&path, &donor_query(action)).await?;
        ok_empty(response).await
    }
}

fn request_path(action: &str, request_id: RequestId) -> String {
    format!("users/{action}/{request_id}/")
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
