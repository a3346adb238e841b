//! Command handlers.
//!
//! Each handler returns the text to print so the binary stays a thin shell.

use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::render::{render_complaint, render_dashboard, render_profile};
use civiclink_client::{
    submit, AuthGate, CivicClient, Dashboard, FileSessionStore, GateDecision, ListScope, View,
};
use civiclink_core::{Attachment, Category, ComplaintDraft, ComplaintFilter, ComplaintId, Status};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Dashboard listing options
#[derive(Debug, Clone, Default)]
pub struct DashboardArgs {
    pub mine: bool,
    pub search: Option<String>,
    pub status: Option<Status>,
    pub category: Option<Category>,
}

/// Raw report fields, validated by the draft
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub priority: Option<String>,
    pub photo: Option<PathBuf>,
}

pub struct App {
    client: CivicClient,
    config: AppConfig,
}

impl App {
    /// Build the client and restore any saved session.
    pub async fn connect(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(FileSessionStore::new(config.session.dir.clone()));
        let client = CivicClient::new(config.client_config(), store)?;
        let session = client.hydrate().await?;
        debug!(authenticated = session.is_authenticated(), "Session restored");

        Ok(Self { client, config })
    }

    pub fn client(&self) -> &CivicClient {
        &self.client
    }

    async fn require(&self, view: View) -> Result<()> {
        match AuthGate::check(&self.client, view).await {
            GateDecision::Render(_) => Ok(()),
            GateDecision::Redirect(_) => Err(CliError::LoginRequired(view)),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let response = self.client.login(email, password).await?;
        info!(email = %response.user.email, "Signed in");
        Ok(format!("Signed in as {}", render_profile(&response.user)))
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: Option<&str>,
    ) -> Result<String> {
        let response = self.client.signup(email, password, full_name, phone).await?;
        info!(email = %response.user.email, "Account created");
        Ok(format!(
            "Account created. Signed in as {}",
            render_profile(&response.user)
        ))
    }

    pub async fn logout(&self) -> Result<String> {
        self.client.logout().await?;
        Ok("Signed out".to_string())
    }

    pub async fn whoami(&self) -> Result<String> {
        Ok(match self.client.current_user().await {
            Some(profile) => render_profile(&profile),
            None => "Not signed in".to_string(),
        })
    }

    pub async fn dashboard(&self, args: DashboardArgs) -> Result<String> {
        self.require(View::Dashboard).await?;

        let scope = if args.mine {
            ListScope::Mine
        } else {
            ListScope::All
        };

        let mut dashboard = Dashboard::new(self.config.fetch_timeout());
        dashboard.load(&self.client, scope).await;

        let mut filter = ComplaintFilter::new();
        if let Some(search) = args.search {
            filter = filter.with_search(search);
        }
        if let Some(status) = args.status {
            filter = filter.with_status(status);
        }
        if let Some(category) = args.category {
            filter = filter.with_category(category);
        }
        dashboard.set_filter(filter);

        Ok(render_dashboard(
            dashboard.stats(),
            dashboard.warning(),
            &dashboard.visible(),
        ))
    }

    pub async fn report(&self, args: ReportArgs) -> Result<String> {
        self.require(View::ReportIssue).await?;

        let mut draft = ComplaintDraft::new()
            .title(args.title)
            .description(args.description)
            .category(args.category)
            .location(args.location);
        if let Some(priority) = args.priority {
            draft = draft.priority(priority);
        }
        if let Some(path) = args.photo {
            draft = draft.photo(Attachment::from_path(&path).await?);
        }

        let created = submit(&self.client, &draft, &self.config.retry_policy()).await?;
        Ok(format!(
            "Complaint submitted successfully!\n\n{}",
            render_complaint(&created)
        ))
    }

    pub async fn set_status(&self, id: &str, status: Status) -> Result<String> {
        self.require(View::Dashboard).await?;

        let updated = self
            .client
            .update_status(&ComplaintId::new(id), status)
            .await?;
        Ok(format!(
            "#{} is now {}",
            updated.id,
            updated.status.label()
        ))
    }

    pub async fn upvote(&self, id: &str) -> Result<String> {
        self.require(View::Dashboard).await?;

        let updated = self.client.upvote(&ComplaintId::new(id)).await?;
        Ok(format!("#{} has {} upvotes", updated.id, updated.upvotes))
    }

    pub async fn show(&self, id: &str) -> Result<String> {
        let complaint = self.client.get_complaint(&ComplaintId::new(id)).await?;
        Ok(render_complaint(&complaint))
    }

    pub async fn ping(&self) -> Result<String> {
        Ok(self.client.ping().await?)
    }

    pub async fn populate(&self) -> Result<String> {
        Ok(self.client.populate_sample_data().await?)
    }
}
