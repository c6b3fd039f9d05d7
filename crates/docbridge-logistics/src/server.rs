// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture server session proxy.
//
// The session state machine lives natively:
//
//   Unregistered -> Registered -> LoggedIn | AnonymouslyLoggedIn
//                                      -> Submitting -> (logged in again)
//
// Calls out of sequence fail with a native error. The proxy only remembers the
// last state implied by a successful outcome, for diagnostics; it never
// refuses a call because of it.

use std::sync::{Arc, Mutex, PoisonError};

use docbridge_core::{
    DocumentId, DocumentTypeRecord, Result, SendImageParameters, ServerParameters,
    ServerProperties, SessionState, SubmissionJobId, SubmissionProgress, UserProfile,
};
use docbridge_native::dispatcher::{arg, decode};
use docbridge_native::{CommandDispatcher, Subscription, ops, subscribe};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::document_type::DocumentType;

#[derive(Debug)]
struct Observed {
    state: SessionState,
    /// State to return to once a submission finishes.
    logged_in: Option<SessionState>,
}

/// Proxy for one native capture-server session.
#[derive(Debug, Clone)]
pub struct CaptureServer {
    dispatcher: CommandDispatcher,
    parameters: ServerParameters,
    observed: Arc<Mutex<Observed>>,
}

impl CaptureServer {
    /// Create the native session for `parameters.server_url`.
    ///
    /// A configured `server_timeout_secs` other than the native default is
    /// pushed to the new session before it is returned.
    #[instrument(skip_all, fields(url = %parameters.server_url))]
    pub async fn create(dispatcher: &CommandDispatcher, parameters: ServerParameters) -> Result<Self> {
        dispatcher
            .call_unit(ops::capture_server::CREATE, vec![arg(&parameters)?])
            .await?;
        info!(server_type = ?parameters.server_type, "capture server session created");
        let server = Self {
            dispatcher: dispatcher.clone(),
            parameters,
            observed: Arc::new(Mutex::new(Observed {
                state: SessionState::Unregistered,
                logged_in: None,
            })),
        };

        let server_timeout = dispatcher.config().server_timeout_secs;
        if server_timeout != ServerProperties::default().server_timeout {
            debug!(server_timeout, "applying configured server timeout");
            server.set_properties(&ServerProperties { server_timeout }).await?;
        }
        Ok(server)
    }

    pub fn parameters(&self) -> &ServerParameters {
        &self.parameters
    }

    /// Last session state implied by a successful call.
    pub fn observed_state(&self) -> SessionState {
        self.observed().state
    }

    fn observed(&self) -> std::sync::MutexGuard<'_, Observed> {
        self.observed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn observe(&self, state: SessionState) {
        let mut observed = self.observed();
        match state {
            SessionState::LoggedIn | SessionState::AnonymouslyLoggedIn => observed.logged_in = Some(state),
            SessionState::Unregistered | SessionState::Registered => observed.logged_in = None,
            SessionState::Submitting => {}
        }
        debug!(from = ?observed.state, to = ?state, "session state observed");
        observed.state = state;
    }

    fn submission_finished(&self) {
        let back = self.observed().logged_in.unwrap_or(SessionState::Registered);
        self.observe(back);
    }

    /// Check the device against the server licence. Resolves to
    /// `"KMC_SUCCESS"`.
    pub async fn register_device(&self) -> Result<Value> {
        let outcome = self.dispatcher.call(ops::capture_server::REGISTER_DEVICE, Vec::new()).await?;
        self.observe(SessionState::Registered);
        Ok(outcome)
    }

    /// Log in and download the server's document types. The login request
    /// times out natively after the configured server timeout.
    #[instrument(skip_all, fields(user = %profile.user_name))]
    pub async fn login(&self, profile: &UserProfile) -> Result<Vec<DocumentTypeRecord>> {
        let types: Vec<DocumentTypeRecord> = self
            .dispatcher
            .call_as(ops::capture_server::LOGIN, vec![arg(profile)?])
            .await?;
        self.observe(SessionState::LoggedIn);
        info!(document_types = types.len(), "logged in");
        Ok(types)
    }

    pub async fn login_anonymously(&self) -> Result<Vec<DocumentTypeRecord>> {
        let types: Vec<DocumentTypeRecord> = self
            .dispatcher
            .call_as(ops::capture_server::LOGIN_ANONYMOUSLY, Vec::new())
            .await?;
        self.observe(SessionState::AnonymouslyLoggedIn);
        info!(document_types = types.len(), "logged in anonymously");
        Ok(types)
    }

    pub async fn logout(&self) -> Result<Value> {
        let outcome = self.dispatcher.call(ops::capture_server::LOGOUT, Vec::new()).await?;
        self.observe(SessionState::Registered);
        Ok(outcome)
    }

    /// Release the native session's memory.
    pub async fn clean(&self) -> Result<Value> {
        let outcome = self.dispatcher.call(ops::capture_server::CLEAN, Vec::new()).await?;
        self.observe(SessionState::Unregistered);
        Ok(outcome)
    }

    /// Open a sequential submission job.
    pub async fn start_job(&self) -> Result<SubmissionJobId> {
        let job: SubmissionJobId = self
            .dispatcher
            .call_as(ops::capture_server::START_JOB, Vec::new())
            .await?;
        self.observe(SessionState::Submitting);
        info!(job = %job, "submission job started");
        Ok(job)
    }

    /// Send one page image of a job started with [`start_job`](Self::start_job).
    #[instrument(skip_all, fields(job = %params.submission_job_id, index = params.image_index))]
    pub async fn send_image(&self, params: &SendImageParameters) -> Result<Value> {
        let outcome = self
            .dispatcher
            .call(ops::capture_server::SEND_IMAGE, vec![arg(params)?])
            .await?;
        if params.is_last_image {
            self.submission_finished();
        }
        Ok(outcome)
    }

    /// Submit a fully assembled document in one go. Native validates every
    /// page first and submits nothing if any page is invalid.
    #[instrument(skip_all, fields(document = %document))]
    pub async fn submit_document(&self, document: &DocumentId) -> Result<Value> {
        let outcome = self
            .dispatcher
            .call(ops::capture_server::SUBMIT_DOCUMENT, vec![json!(document)])
            .await?;
        self.submission_finished();
        info!("document submitted");
        Ok(outcome)
    }

    /// Best effort. Takes effect at the next page boundary, so the
    /// submission may still complete.
    pub async fn cancel_submission(&self, job: &SubmissionJobId) -> Result<Value> {
        let outcome = self
            .dispatcher
            .call(ops::capture_server::CANCEL_SUBMISSION, vec![json!(job)])
            .await?;
        self.submission_finished();
        Ok(outcome)
    }

    /// Receive submission progress reports.
    pub async fn add_progress_listener<H>(&self, handler: H) -> Result<Subscription>
    where
        H: FnMut(Result<SubmissionProgress>) + Send + 'static,
    {
        let map = |payload: Value| decode::<SubmissionProgress>(ops::capture_server::PROGRESS.add, payload);
        subscribe(&self.dispatcher, ops::capture_server::PROGRESS, Vec::new(), map, handler).await
    }

    /// Look up a document type from the list obtained at login.
    pub async fn document_type(&self, name: &str) -> Result<DocumentType> {
        let record: DocumentTypeRecord = self
            .dispatcher
            .call_as(ops::capture_server::GET_DOCUMENT_TYPE, vec![json!(name)])
            .await?;
        Ok(DocumentType::new(self.dispatcher.clone(), record))
    }

    pub async fn properties(&self) -> Result<ServerProperties> {
        self.dispatcher
            .call_as(ops::capture_server::GET_PROPERTIES, Vec::new())
            .await
    }

    pub async fn set_properties(&self, properties: &ServerProperties) -> Result<()> {
        self.dispatcher
            .call_unit(ops::capture_server::SET_PROPERTIES, vec![arg(properties)?])
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use docbridge_core::{ImageId, ServerType};
    use docbridge_native::scripted::ScriptedBoundary;

    fn parameters() -> ServerParameters {
        ServerParameters {
            server_url: "https://capture.example.com/mobilesdk".into(),
            server_type: ServerType::Kfs,
        }
    }

    async fn server(native: &Arc<ScriptedBoundary>) -> CaptureServer {
        native.respond(ops::capture_server::CREATE, Value::Null);
        CaptureServer::create(&CommandDispatcher::new(native.clone()), parameters())
            .await
            .expect("create")
    }

    #[tokio::test]
    async fn create_sends_parameters() {
        let native = Arc::new(ScriptedBoundary::new());
        let server = server(&native).await;
        assert_eq!(server.observed_state(), SessionState::Unregistered);
        assert_eq!(
            native.calls()[0].args,
            vec![json!({"serverUrl": "https://capture.example.com/mobilesdk", "serverType": "SERVER_KFS"})]
        );
    }

    #[tokio::test]
    async fn login_passes_the_profile() {
        let native = Arc::new(ScriptedBoundary::new());
        let server = server(&native).await;
        native.respond(ops::capture_server::LOGIN, json!([{"typeName": "Invoice"}, {"typeName": "Receipt"}]));

        let profile = UserProfile {
            user_name: "ops".into(),
            password: "secret".into(),
            ..Default::default()
        };
        let types = server.login(&profile).await.expect("login");
        assert_eq!(types.len(), 2);
        assert_eq!(types[1].type_name, "Receipt");
        assert_eq!(server.observed_state(), SessionState::LoggedIn);
        let sent = &native.calls_to(ops::capture_server::LOGIN)[0].args[0];
        assert_eq!(sent["userName"], "ops");
        assert_eq!(sent["password"], "secret");
    }

    #[tokio::test]
    async fn out_of_sequence_errors_pass_through() {
        let native = Arc::new(ScriptedBoundary::new());
        let server = server(&native).await;
        let payload = json!({"ErrorMsg": "KMC_LO_NOT_REGISTERED", "ErrorDesc": "register first"});
        native.fail(ops::capture_server::LOGIN_ANONYMOUSLY, payload.clone());

        let err = server.login_anonymously().await.expect_err("must fail");
        assert_eq!(err.as_native().map(|e| &e.payload), Some(&payload));
        assert_eq!(server.observed_state(), SessionState::Unregistered);
    }

    #[tokio::test]
    async fn sequential_submission_returns_to_logged_in() {
        let native = Arc::new(ScriptedBoundary::new());
        let server = server(&native).await;
        native.respond(ops::capture_server::LOGIN_ANONYMOUSLY, json!([]));
        native.respond(ops::capture_server::START_JOB, json!("job-7"));
        native.respond(ops::capture_server::SEND_IMAGE, json!("KMC_SUCCESS"));

        server.login_anonymously().await.expect("login");
        let job = server.start_job().await.expect("job");
        assert_eq!(job.as_str(), "job-7");
        assert_eq!(server.observed_state(), SessionState::Submitting);

        for (index, last) in [(0, false), (1, true)] {
            server
                .send_image(&SendImageParameters {
                    document_id: DocumentId::new("doc1"),
                    image_id: ImageId::new(format!("img{index}")),
                    submission_job_id: job.clone(),
                    image_index: index,
                    is_last_image: last,
                })
                .await
                .expect("send");
        }
        assert_eq!(server.observed_state(), SessionState::AnonymouslyLoggedIn);
        let sent = &native.calls_to(ops::capture_server::SEND_IMAGE)[1].args[0];
        assert_eq!(sent["submissionJobID"], "job-7");
        assert_eq!(sent["isLastImage"], true);
    }

    #[tokio::test]
    async fn properties_default_timeout() {
        let native = Arc::new(ScriptedBoundary::new());
        let server = server(&native).await;
        native.respond(ops::capture_server::GET_PROPERTIES, json!({}));
        native.respond(ops::capture_server::SET_PROPERTIES, Value::Null);

        assert_eq!(server.properties().await.expect("get").server_timeout, 20);
        server
            .set_properties(&ServerProperties { server_timeout: 45 })
            .await
            .expect("set");
        assert_eq!(
            native.calls_to(ops::capture_server::SET_PROPERTIES)[0].args,
            vec![json!({"serverTimeout": 45})]
        );
    }

    #[tokio::test]
    async fn configured_timeout_is_applied_on_create() {
        let native = Arc::new(ScriptedBoundary::new());
        native.respond(ops::capture_server::CREATE, Value::Null);
        native.respond(ops::capture_server::SET_PROPERTIES, Value::Null);
        let config = docbridge_core::BridgeConfig {
            server_timeout_secs: 45,
            ..Default::default()
        };
        let dispatcher = CommandDispatcher::with_config(native.clone(), config);

        CaptureServer::create(&dispatcher, parameters()).await.expect("create");
        assert_eq!(
            native.calls_to(ops::capture_server::SET_PROPERTIES)[0].args,
            vec![json!({"serverTimeout": 45})]
        );

        let native = Arc::new(ScriptedBoundary::new());
        server(&native).await;
        assert!(native.calls_to(ops::capture_server::SET_PROPERTIES).is_empty());
    }

    #[tokio::test]
    async fn cancel_passes_the_job_id() {
        let native = Arc::new(ScriptedBoundary::new());
        let server = server(&native).await;
        native.respond(ops::capture_server::CANCEL_SUBMISSION, json!("KMC_SUCCESS"));

        server
            .cancel_submission(&SubmissionJobId::new("job-9"))
            .await
            .expect("cancel");
        assert_eq!(native.calls_to(ops::capture_server::CANCEL_SUBMISSION)[0].args, vec![json!("job-9")]);
    }
}
