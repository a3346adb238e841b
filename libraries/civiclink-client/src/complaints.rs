//! Complaint operations for the CivicLink backend.

use crate::error::{ClientError, Result};
use crate::response::{endpoint, read_json};
use crate::types::{CreateComplaintRequest, MessageResponse, StatusUpdateRequest};
use civiclink_core::{Attachment, Complaint, ComplaintId, NewComplaint, Status};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};
use url::Url;

/// Complaint client for the CivicLink backend.
///
/// Carries the caller's identity: the bearer token is attached to every
/// request when present, and the user's email accompanies new complaints.
pub struct ComplaintClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    token: Option<&'a str>,
    user_email: Option<&'a str>,
}

impl<'a> ComplaintClient<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a Url,
        token: Option<&'a str>,
        user_email: Option<&'a str>,
    ) -> Self {
        Self {
            http,
            base_url,
            token,
            user_email,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_list(&self, segments: &[&str]) -> Result<Vec<Complaint>> {
        let url = endpoint(self.base_url, segments)?;
        debug!(url = %url, "Fetching complaints");

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let complaints: Vec<Complaint> = read_json(response, "complaint list").await?;
        debug!(count = complaints.len(), "Fetched complaints");

        Ok(complaints)
    }

    /// Every complaint on the server.
    pub async fn list(&self) -> Result<Vec<Complaint>> {
        self.fetch_list(&["complaints"]).await
    }

    /// Complaints submitted by the current user.
    pub async fn list_mine(&self) -> Result<Vec<Complaint>> {
        self.fetch_list(&["complaints", "my"]).await
    }

    /// A single complaint by ID.
    pub async fn get(&self, id: &ComplaintId) -> Result<Complaint> {
        let url = endpoint(self.base_url, &["complaints", id.as_str()])?;
        debug!(url = %url, complaint_id = %id, "Fetching complaint");

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        read_json(response, "complaint").await
    }

    /// Submit a validated complaint.
    ///
    /// A non-empty photo switches the body to `multipart/form-data`;
    /// otherwise the complaint is sent as JSON.
    pub async fn create(&self, complaint: &NewComplaint) -> Result<Complaint> {
        let user_email = self.user_email.ok_or(ClientError::AuthRequired)?;
        let url = endpoint(self.base_url, &["complaints"])?;

        let request = self.authorize(self.http.post(url));
        let request = match complaint.attachment() {
            Some(photo) => {
                debug!(
                    title = %complaint.title,
                    photo = %photo.file_name,
                    size = photo.len(),
                    "Submitting complaint with photo"
                );
                request.multipart(multipart_form(complaint, user_email, photo)?)
            }
            None => {
                debug!(title = %complaint.title, "Submitting complaint");
                request.json(&CreateComplaintRequest {
                    title: complaint.title.clone(),
                    description: complaint.description.clone(),
                    category: complaint.category,
                    location: complaint.location.clone(),
                    priority: complaint.priority,
                    user_email: user_email.to_string(),
                })
            }
        };

        let response = request.send().await.map_err(ClientError::from_send)?;
        let created: Complaint = read_json(response, "created complaint").await?;

        info!(
            complaint_id = %created.id,
            category = %created.category,
            priority = %created.priority,
            "Complaint submitted"
        );

        Ok(created)
    }

    /// Move a complaint to a new status.
    pub async fn update_status(&self, id: &ComplaintId, status: Status) -> Result<Complaint> {
        let url = endpoint(self.base_url, &["complaints", id.as_str(), "status"])?;
        debug!(url = %url, complaint_id = %id, status = %status, "Updating status");

        let response = self
            .authorize(self.http.put(url))
            .json(&StatusUpdateRequest { status })
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let updated: Complaint = read_json(response, "updated complaint").await?;
        info!(complaint_id = %updated.id, status = %updated.status, "Status updated");

        Ok(updated)
    }

    /// Add one upvote to a complaint.
    pub async fn upvote(&self, id: &ComplaintId) -> Result<Complaint> {
        let url = endpoint(self.base_url, &["complaints", id.as_str(), "upvote"])?;
        debug!(url = %url, complaint_id = %id, "Upvoting");

        let response = self
            .authorize(self.http.put(url))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let updated: Complaint = read_json(response, "upvoted complaint").await?;
        info!(complaint_id = %updated.id, upvotes = updated.upvotes, "Upvoted");

        Ok(updated)
    }

    /// Check that the backend is up.
    pub async fn ping(&self) -> Result<String> {
        self.fetch_message(&["complaints", "test"]).await
    }

    /// Ask the backend to seed its sample complaints (no-op when it already
    /// has data).
    pub async fn populate_sample_data(&self) -> Result<String> {
        self.fetch_message(&["complaints", "populate"]).await
    }

    async fn fetch_message(&self, segments: &[&str]) -> Result<String> {
        let url = endpoint(self.base_url, segments)?;
        debug!(url = %url, "Calling backend");

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let body: MessageResponse = read_json(response, "message").await?;
        Ok(body.message)
    }
}

fn multipart_form(complaint: &NewComplaint, user_email: &str, photo: &Attachment) -> Result<Form> {
    let photo_part = Part::bytes(photo.bytes.clone())
        .file_name(photo.file_name.clone())
        .mime_str(&photo.content_type)?;

    Ok(Form::new()
        .text("title", complaint.title.clone())
        .text("description", complaint.description.clone())
        .text("category", complaint.category.as_str())
        .text("location", complaint.location.clone())
        .text("priority", complaint.priority.as_str())
        .text("userEmail", user_email.to_string())
        .part("photo", photo_part))
}
