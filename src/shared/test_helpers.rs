//! Fixtures shared by the unit and router tests.
//!
//! `TestGraph` wires every service over in-memory stores and scripted AI
//! collaborators, the same way `main` wires the production graph.

use axum::{extract::Request, middleware::Next, response::Response, Router};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::core::middleware::resolve_user_middleware;
use crate::features::admin::AdminService;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::catalogs::stores::MemoryCatalogStore;
use crate::features::catalogs::CatalogService;
use crate::features::resources::models::{
    EnrichmentEvent, EnrichmentStatus, FileType, Resource, ResourceDetails, ResourceStatus,
    StoredFile, UploadedFile,
};
use crate::features::resources::services::{
    AssistantService, LifecycleService, ResourceQueryService,
};
use crate::features::resources::stores::MemoryResourceStore;
use crate::features::resources::workers::BackgroundEnrichment;
use crate::features::users::models::{User, UserRole};
use crate::features::users::stores::MemoryUserStore;
use crate::features::users::UserService;
use crate::features::{protected_routes, public_routes, AppServices};
use crate::modules::ai::testing::{ScriptedAssistant, ScriptedSummarizer, SummarizerStep};
use crate::modules::storage::MemoryBlobStore;
use crate::shared::constants::{NOTES_GENERATING, SUMMARY_GENERATING};

const TEST_MAX_FILE_SIZE: usize = 1024 * 1024;

/// How long a test waits for an enrichment job to settle
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn resource_details(title: &str) -> ResourceDetails {
    ResourceDetails {
        title: title.to_string(),
        description: Sentence(4..10).fake(),
        university: "City College".to_string(),
        department: "Computer Science".to_string(),
        semester: "2nd".to_string(),
        subject: "Data Structures".to_string(),
        file_type: FileType::Note,
    }
}

pub fn text_file(name: &str, body: &str) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        content_type: "text/plain".to_string(),
        bytes: body.as_bytes().to_vec(),
    }
}

pub fn pending_resource(uploader: &str, title: &str) -> Resource {
    let file = StoredFile {
        key: format!("resources/{}/0-{}.txt", uploader, title),
        url: format!("memory://blobs/resources/{}/0-{}.txt", uploader, title),
        name: format!("{}.txt", title),
        content_type: "text/plain".to_string(),
        size: 64,
    };
    Resource::pending(resource_details(title), file, uploader)
}

/// Approved resource whose enrichment `attempt` is running
pub fn approved_resource(uploader: &str, attempt: i32) -> Resource {
    let mut resource = pending_resource(uploader, "Binary Heaps Overview");
    resource.status = ResourceStatus::Approved;
    resource.content = Sentence(8..16).fake();
    resource.summary = SUMMARY_GENERATING.to_string();
    resource.short_notes = NOTES_GENERATING.to_string();
    resource.enrichment_status = EnrichmentStatus::Generating;
    resource.enrichment_attempt = attempt;
    resource
}

pub fn identity(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        email: Some(format!("{}@campus.edu", sub)),
        name: None,
    }
}

pub fn user_with_role(uid: &str, role: UserRole) -> User {
    let mut user = User::student(&identity(uid));
    user.role = role;
    user
}

/// Waits for the next settled enrichment job
pub async fn next_event(events: &mut broadcast::Receiver<EnrichmentEvent>) -> EnrichmentEvent {
    tokio::time::timeout(SETTLE_TIMEOUT, events.recv())
        .await
        .expect("enrichment did not settle in time")
        .expect("enrichment channel closed")
}

pub struct TestGraph {
    pub resources: Arc<MemoryResourceStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub user_store: Arc<MemoryUserStore>,
    pub summarizer: Arc<ScriptedSummarizer>,
    pub assistant: Arc<ScriptedAssistant>,
    pub enrichment: BackgroundEnrichment,
    pub catalogs: Arc<CatalogService>,
    pub users: Arc<UserService>,
    pub lifecycle: Arc<LifecycleService>,
    pub queries: Arc<ResourceQueryService>,
    pub assistant_service: Arc<AssistantService>,
    pub admin: Arc<AdminService>,
}

impl TestGraph {
    pub fn new() -> Self {
        Self::build(
            ScriptedSummarizer::always(SummarizerStep::succeed("A summary.", "- a note")),
            ScriptedAssistant::replying("An answer."),
            SETTLE_TIMEOUT,
        )
    }

    pub fn with_summarizer(summarizer: ScriptedSummarizer) -> Self {
        Self::build(summarizer, ScriptedAssistant::replying("An answer."), SETTLE_TIMEOUT)
    }

    pub fn with_assistant(assistant: ScriptedAssistant) -> Self {
        Self::build(
            ScriptedSummarizer::always(SummarizerStep::succeed("A summary.", "- a note")),
            assistant,
            SETTLE_TIMEOUT,
        )
    }

    pub fn with_timeout(summarizer: ScriptedSummarizer, timeout: Duration) -> Self {
        Self::build(summarizer, ScriptedAssistant::replying("An answer."), timeout)
    }

    fn build(summarizer: ScriptedSummarizer, assistant: ScriptedAssistant, timeout: Duration) -> Self {
        let resources = Arc::new(MemoryResourceStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let user_store = Arc::new(MemoryUserStore::new());
        let summarizer = Arc::new(summarizer);
        let assistant = Arc::new(assistant);

        let enrichment = BackgroundEnrichment::new(resources.clone(), summarizer.clone(), timeout);
        let catalogs = Arc::new(CatalogService::new(Arc::new(MemoryCatalogStore::new())));
        let users = Arc::new(UserService::new(user_store.clone(), catalogs.clone()));
        let lifecycle = Arc::new(LifecycleService::new(
            resources.clone(),
            blobs.clone(),
            Arc::new(enrichment.clone()),
            catalogs.clone(),
            TEST_MAX_FILE_SIZE,
        ));
        let queries = Arc::new(ResourceQueryService::new(resources.clone()));
        let assistant_service = Arc::new(AssistantService::new(queries.clone(), assistant.clone()));
        let admin = Arc::new(AdminService::new(
            lifecycle.clone(),
            queries.clone(),
            users.clone(),
            catalogs.clone(),
        ));

        Self {
            resources,
            blobs,
            user_store,
            summarizer,
            assistant,
            enrichment,
            catalogs,
            users,
            lifecycle,
            queries,
            assistant_service,
            admin,
        }
    }

    pub fn services(&self) -> AppServices {
        AppServices {
            lifecycle: self.lifecycle.clone(),
            queries: self.queries.clone(),
            assistant: self.assistant_service.clone(),
            users: self.users.clone(),
            catalogs: self.catalogs.clone(),
            admin: self.admin.clone(),
        }
    }

    /// Registers the identity in the directory with the given role
    pub async fn register(&self, sub: &str, role: UserRole) -> User {
        let user = self.users.resolve_or_create(&identity(sub)).await.unwrap();
        match role {
            UserRole::Student => user,
            UserRole::Admin => self.users.set_role(sub, role).await.unwrap(),
        }
    }

    /// The application router with the token check replaced by a fixed
    /// identity. `None` leaves protected routes unauthenticated.
    pub fn router(&self, sub: Option<&str>) -> Router {
        let services = self.services();
        let mut protected = protected_routes(&services).route_layer(
            axum::middleware::from_fn_with_state(self.users.clone(), resolve_user_middleware),
        );

        if let Some(sub) = sub {
            let who = identity(sub);
            protected = protected.route_layer(axum::middleware::from_fn(
                move |mut request: Request, next: Next| {
                    let who = who.clone();
                    async move {
                        request.extensions_mut().insert(who);
                        let response: Response = next.run(request).await;
                        response
                    }
                },
            ));
        }

        Router::new()
            .merge(public_routes(&services))
            .merge(protected)
    }
}
