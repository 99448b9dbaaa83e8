//! Client-side session: who is logged in, and with which bearer token.
//!
//! [`SessionStore`] is the single owner of that state. It is built once per
//! process, restored from durable storage, and shared by reference (usually an
//! `Arc`) with whatever drives the UI. The state machine has two states:
//!
//! ```text
//! anonymous --login ok--> authenticated --logout--> anonymous
//! ```
//!
//! `signup` never changes state; the gateway wants the email confirmed before
//! it will issue a token. Every mutation is written through to storage, and a
//! failed call leaves both memory and storage untouched.

pub mod client;
pub mod errors;
pub mod notifier;
pub mod storage;
pub mod types;
pub mod validation;

pub use self::client::{ApiClient, ApiError};
pub use self::errors::{SessionError, ValidationError};
pub use self::notifier::{ConsoleNotifier, Notice, Notifier, SilentNotifier};
pub use self::storage::{FileStorage, MemoryStorage, SessionStorage, StorageKeys};
pub use self::types::{Identity, Session, SessionState};
pub use self::validation::SignupForm;

use self::errors::{GENERIC_LOGIN_ERROR, GENERIC_SIGNUP_ERROR};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    PoisonError, RwLock, RwLockReadGuard,
};
use tracing::{debug, error, info, instrument, warn};

pub struct SessionStore {
    api: ApiClient,
    storage: Box<dyn SessionStorage>,
    notifier: Box<dyn Notifier>,
    session: RwLock<Session>,
    busy: AtomicBool,
}

/// Holds the busy flag for the duration of one submission.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SessionStore {
    /// A store in the anonymous state. Call [`SessionStore::restore`] to pick
    /// up a persisted session, or use [`SessionStore::open`].
    pub fn new(
        api: ApiClient,
        storage: Box<dyn SessionStorage>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            storage,
            notifier,
            session: RwLock::new(Session::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Build a store and restore it in one step.
    pub fn open(
        api: ApiClient,
        storage: Box<dyn SessionStorage>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let store = Self::new(api, storage, notifier);
        store.restore();
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, session: Session) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.read().state()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.read().identity().cloned()
    }

    /// The bearer token, for callers that attach it to API requests.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read().token().cloned()
    }

    /// True while a login or signup request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Load the persisted session. Both entries must be present and the
    /// identity must decode; anything else leaves the store anonymous. The
    /// token is trusted as-is, there is no expiry check.
    pub fn restore(&self) -> SessionState {
        let session = match (
            self.storage.get(StorageKeys::USER),
            self.storage.get(StorageKeys::TOKEN),
        ) {
            (Ok(Some(user)), Ok(Some(token))) => match serde_json::from_str::<Identity>(&user) {
                Ok(identity) => {
                    debug!("Restored session for user {}", identity.id);
                    Session::authenticated(identity, SecretString::from(token))
                }
                Err(err) => {
                    warn!("Ignoring unreadable persisted identity: {}", err);
                    Session::default()
                }
            },
            (Err(err), _) | (_, Err(err)) => {
                warn!("Failed to read persisted session: {}", err);
                Session::default()
            }
            _ => Session::default(),
        };

        let state = session.state();
        self.replace(session);
        state
    }

    /// Log in with email and password.
    ///
    /// # Errors
    /// `Busy` if another submission is in flight, `Validation` for empty
    /// fields, `Authentication` when the gateway rejects the credentials,
    /// `Connectivity` when it cannot be reached, `Storage` if the session
    /// cannot be persisted. On any error the session is unchanged, unless
    /// the previous one cannot be written back after a failed persist, in
    /// which case the store ends up anonymous.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: SecretString) -> Result<Identity, SessionError> {
        let _busy = BusyGuard::acquire(&self.busy).ok_or(SessionError::Busy)?;

        let result = self.try_login(email.trim(), &password).await;

        match &result {
            Ok(identity) => {
                info!("Logged in as user {}", identity.id);
                self.notifier
                    .notify(Notice::Success(format!("Welcome back, {}!", identity.name)));
            }
            Err(err) => self.report(err),
        }

        result
    }

    async fn try_login(&self, email: &str, password: &SecretString) -> Result<Identity, SessionError> {
        validation::validate_login(email, password)?;

        let authenticated = self.api.login(email, password).await.map_err(|err| match err {
            ApiError::Rejected { status, message } => {
                debug!(status = %status, "Login rejected");
                SessionError::Authentication(
                    message.unwrap_or_else(|| GENERIC_LOGIN_ERROR.to_string()),
                )
            }
            other => SessionError::Connectivity(other.to_string()),
        })?;

        let identity = Identity::from_gateway(&authenticated.user);
        let token = SecretString::from(authenticated.session.access_token);

        self.persist(&identity, &token)?;
        self.replace(Session::authenticated(identity.clone(), token));

        Ok(identity)
    }

    fn persist(&self, identity: &Identity, token: &SecretString) -> Result<(), SessionError> {
        let user = serde_json::to_string(identity)
            .map_err(|err| SessionError::Storage(err.into()))?;

        let previous = [StorageKeys::USER, StorageKeys::TOKEN]
            .into_iter()
            .map(|key| self.storage.get(key).map(|value| (key, value)))
            .collect::<Result<Vec<_>, _>>()?;

        let written = self
            .storage
            .set(StorageKeys::USER, &user)
            .and_then(|()| self.storage.set(StorageKeys::TOKEN, token.expose_secret()));

        if let Err(err) = written {
            if let Err(restore_err) = self.put_back(&previous) {
                // Storage no longer holds a usable session; memory must agree.
                error!("Failed to restore previous session: {}", restore_err);
                self.wipe_storage();
                self.replace(Session::default());
            }
            return Err(err.into());
        }

        Ok(())
    }

    fn put_back(&self, entries: &[(&str, Option<String>)]) -> storage::StorageResult<()> {
        for (key, value) in entries {
            match value {
                Some(value) => self.storage.set(key, value)?,
                None => {
                    self.storage.delete(key)?;
                }
            }
        }
        Ok(())
    }

    /// Register a new account. The session stays as it was; on success the
    /// relay's confirmation message is returned.
    ///
    /// # Errors
    /// `Busy`, `Validation` (no request is sent), `Registration` when the
    /// gateway rejects the signup, `Connectivity` when it cannot be reached.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn signup(&self, form: &SignupForm) -> Result<String, SessionError> {
        let _busy = BusyGuard::acquire(&self.busy).ok_or(SessionError::Busy)?;

        let result = self.try_signup(form).await;

        match &result {
            Ok(message) => {
                info!("Signup accepted, awaiting email confirmation");
                self.notifier.notify(Notice::Success(message.clone()));
            }
            Err(err) => self.report(err),
        }

        result
    }

    async fn try_signup(&self, form: &SignupForm) -> Result<String, SessionError> {
        form.validate()?;

        let registered = self
            .api
            .register(form.name.trim(), form.email.trim(), &form.password)
            .await
            .map_err(|err| match err {
                ApiError::Rejected { status, message } => {
                    debug!(status = %status, "Signup rejected");
                    SessionError::Registration(
                        message.unwrap_or_else(|| GENERIC_SIGNUP_ERROR.to_string()),
                    )
                }
                other => SessionError::Connectivity(other.to_string()),
            })?;

        Ok(registered.message)
    }

    /// Forget the session in memory and in storage. Always succeeds; calling
    /// it while anonymous changes nothing.
    pub fn logout(&self) {
        let was_authenticated = self.is_authenticated();

        self.replace(Session::default());
        self.wipe_storage();

        if was_authenticated {
            info!("Logged out");
            self.notifier
                .notify(Notice::Success("You have been logged out.".to_string()));
        }
    }

    fn wipe_storage(&self) {
        for key in [StorageKeys::USER, StorageKeys::TOKEN] {
            if let Err(err) = self.storage.delete(key) {
                error!("Failed to clear persisted {}: {}", key, err);
            }
        }
    }

    fn report(&self, err: &SessionError) {
        match err {
            SessionError::Connectivity(detail) => error!("Auth request failed: {}", detail),
            SessionError::Storage(inner) => error!("Session storage failed: {}", inner),
            other => debug!("Auth request failed: {}", other),
        }
        self.notifier.notify(Notice::Error(err.to_string()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::storage::{StorageError, StorageResult};
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Lets a test keep a handle on the storage it hands to the store.
    struct Shared(Arc<MemoryStorage>);

    impl SessionStorage for Shared {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.0.set(key, value)
        }

        fn delete(&self, key: &str) -> StorageResult<bool> {
            self.0.delete(key)
        }
    }

    /// Refuses the next token write, then behaves.
    struct TokenWriteFails {
        inner: MemoryStorage,
        armed: AtomicBool,
    }

    impl TokenWriteFails {
        fn over(inner: MemoryStorage) -> Self {
            Self {
                inner,
                armed: AtomicBool::new(true),
            }
        }
    }

    impl SessionStorage for TokenWriteFails {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            if key == StorageKeys::TOKEN && self.armed.swap(false, Ordering::AcqRel) {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> StorageResult<bool> {
            self.inner.delete(key)
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Notice>>>);

    impl Recorder {
        fn notices(&self) -> Vec<Notice> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    fn store_with(uri: &str, storage: Box<dyn SessionStorage>) -> SessionStore {
        SessionStore::new(
            ApiClient::new(uri).unwrap(),
            storage,
            Box::new(SilentNotifier),
        )
    }

    fn login_ok() -> serde_json::Value {
        json!({
            "user": {
                "id": "8d1c",
                "email": "jane@x.com",
                "user_metadata": {"full_name": "Jane Doe"}
            },
            "session": {"access_token": "jwt-abc"}
        })
    }

    fn signup_form(password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            password: SecretString::from(password),
            confirm_password: SecretString::from(confirm),
        }
    }

    #[tokio::test]
    async fn login_authenticates_and_persists() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_ok()))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(&server.uri(), Box::new(Shared(storage.clone())));
        assert_eq!(store.state(), SessionState::Anonymous);

        let identity = store
            .login("jane@x.com", SecretString::from("secret123"))
            .await
            .unwrap();

        assert_eq!(identity.id, "8d1c");
        assert_eq!(identity.name, "Jane Doe");
        assert_eq!(store.state(), SessionState::Authenticated);
        assert_eq!(store.identity(), Some(identity.clone()));
        assert_eq!(
            store.token().map(|t| t.expose_secret().to_string()).as_deref(),
            Some("jwt-abc")
        );

        let persisted: Identity =
            serde_json::from_str(&storage.get(StorageKeys::USER).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, identity);
        assert_eq!(
            storage.get(StorageKeys::TOKEN).unwrap().as_deref(),
            Some("jwt-abc")
        );
        assert_eq!(storage.writes(), 2);
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn rejected_login_stays_anonymous_without_writes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid login credentials"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(&server.uri(), Box::new(Shared(storage.clone())));

        let err = store
            .login("bad@x.com", SecretString::from("wrong"))
            .await
            .unwrap_err();

        match err {
            SessionError::Authentication(message) => assert_eq!(message, "Invalid login credentials"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(storage.writes(), 0);
        assert_eq!(storage.get(StorageKeys::TOKEN).unwrap(), None);
    }

    #[tokio::test]
    async fn rejection_without_message_uses_generic_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let store = store_with(&server.uri(), Box::new(MemoryStorage::new()));
        let err = store
            .login("bad@x.com", SecretString::from("wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), GENERIC_LOGIN_ERROR);
    }

    #[tokio::test]
    async fn unreachable_relay_is_connectivity() {
        let store = store_with("http://127.0.0.1:1", Box::new(MemoryStorage::new()));

        let err = store
            .login("jane@x.com", SecretString::from("secret123"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Connectivity(_)));
        assert_eq!(err.to_string(), errors::CONNECTIVITY_MESSAGE);
        assert!(!store.is_authenticated());
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn empty_fields_never_reach_the_relay() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_ok()))
            .expect(0)
            .mount(&server)
            .await;

        let store = store_with(&server.uri(), Box::new(MemoryStorage::new()));
        let err = store
            .login("  ", SecretString::from("secret123"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::Required("Email"))
        ));
    }

    #[tokio::test]
    async fn failed_persist_rolls_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_ok()))
            .mount(&server)
            .await;

        let store = store_with(&server.uri(), Box::new(TokenWriteFails::over(MemoryStorage::new())));
        let err = store
            .login("jane@x.com", SecretString::from("secret123"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!store.is_authenticated());
        assert_eq!(store.storage.get(StorageKeys::USER).unwrap(), None);
    }

    #[tokio::test]
    async fn failed_persist_keeps_the_active_session() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_ok()))
            .expect(1)
            .mount(&server)
            .await;

        let old = Identity {
            id: "old".to_string(),
            email: "old@x.com".to_string(),
            name: "Old User".to_string(),
        };
        let old_json = serde_json::to_string(&old).unwrap();

        let seeded = MemoryStorage::new();
        seeded.set(StorageKeys::USER, &old_json).unwrap();
        seeded.set(StorageKeys::TOKEN, "old-token").unwrap();

        let store = SessionStore::open(
            ApiClient::new(server.uri()).unwrap(),
            Box::new(TokenWriteFails::over(seeded)),
            Box::new(SilentNotifier),
        );
        assert_eq!(store.identity(), Some(old.clone()));

        let err = store
            .login("jane@x.com", SecretString::from("secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));

        assert_eq!(store.identity(), Some(old.clone()));
        assert_eq!(
            store.token().map(|t| t.expose_secret().to_string()).as_deref(),
            Some("old-token")
        );
        assert_eq!(
            store.storage.get(StorageKeys::USER).unwrap().as_deref(),
            Some(old_json.as_str())
        );
        assert_eq!(
            store.storage.get(StorageKeys::TOKEN).unwrap().as_deref(),
            Some("old-token")
        );

        assert_eq!(store.restore(), SessionState::Authenticated);
        assert_eq!(store.identity(), Some(old));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_ok()))
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let recorder = Recorder::default();
        let store = SessionStore::new(
            ApiClient::new(server.uri()).unwrap(),
            Box::new(Shared(storage.clone())),
            Box::new(recorder.clone()),
        );

        store
            .login("jane@x.com", SecretString::from("secret123"))
            .await
            .unwrap();

        store.logout();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(storage.get(StorageKeys::USER).unwrap(), None);
        assert_eq!(storage.get(StorageKeys::TOKEN).unwrap(), None);
        let writes = storage.writes();

        store.logout();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(storage.writes(), writes);

        assert_eq!(
            recorder.notices(),
            vec![
                Notice::Success("Welcome back, Jane Doe!".to_string()),
                Notice::Success("You have been logged out.".to_string()),
            ]
        );
    }

    #[test]
    fn restore_empty_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(DEFAULT_API, Box::new(FileStorage::new(dir.path())));

        assert_eq!(store.restore(), SessionState::Anonymous);
        assert_eq!(store.identity(), None);
    }

    const DEFAULT_API: &str = client::DEFAULT_API_URL;

    #[tokio::test]
    async fn restore_round_trip_through_file_storage() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_ok()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();

        let identity = store_with(&server.uri(), Box::new(FileStorage::new(dir.path())))
            .login("jane@x.com", SecretString::from("secret123"))
            .await
            .unwrap();

        let restored = SessionStore::open(
            ApiClient::new(server.uri()).unwrap(),
            Box::new(FileStorage::new(dir.path())),
            Box::new(SilentNotifier),
        );

        assert_eq!(restored.state(), SessionState::Authenticated);
        assert_eq!(restored.identity(), Some(identity));
        assert_eq!(
            restored.token().map(|t| t.expose_secret().to_string()).as_deref(),
            Some("jwt-abc")
        );
    }

    #[test]
    fn restore_ignores_partial_or_corrupt_data() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(StorageKeys::TOKEN, "jwt-abc").unwrap();

        let store = store_with(DEFAULT_API, Box::new(Shared(storage.clone())));
        assert_eq!(store.restore(), SessionState::Anonymous);

        storage.set(StorageKeys::USER, "{not json").unwrap();
        assert_eq!(store.restore(), SessionState::Anonymous);

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FileStorage::FILE_NAME), "garbage").unwrap();
        let store = store_with(DEFAULT_API, Box::new(FileStorage::new(dir.path())));
        assert_eq!(store.restore(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn signup_mismatch_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let recorder = Recorder::default();
        let store = SessionStore::new(
            ApiClient::new(server.uri()).unwrap(),
            Box::new(MemoryStorage::new()),
            Box::new(recorder.clone()),
        );

        let err = store
            .signup(&signup_form("secret123", "secret124"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::PasswordMismatch)
        ));
        assert_eq!(
            recorder.notices(),
            vec![Notice::Error("Passwords do not match".to_string())]
        );
    }

    #[tokio::test]
    async fn signup_does_not_log_in() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "User created successfully. Please check your email to confirm.",
                "user": {"id": "8d1c", "email": "jane@x.com"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(&server.uri(), Box::new(Shared(storage.clone())));

        let message = store
            .signup(&signup_form("secret123", "secret123"))
            .await
            .unwrap();

        assert!(message.contains("confirm"));
        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(storage.writes(), 0);
    }

    #[tokio::test]
    async fn signup_rejection_carries_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "User already registered"})),
            )
            .mount(&server)
            .await;

        let store = store_with(&server.uri(), Box::new(MemoryStorage::new()));
        let err = store
            .signup(&signup_form("secret123", "secret123"))
            .await
            .unwrap_err();

        match err {
            SessionError::Registration(message) => assert_eq!(message, "User already registered"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn second_submission_while_busy_is_refused() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(login_ok())
                    .set_delay(std::time::Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(store_with(&server.uri(), Box::new(MemoryStorage::new())));

        let first = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .login("jane@x.com", SecretString::from("secret123"))
                    .await
            })
        };

        while !store.is_busy() {
            tokio::task::yield_now().await;
        }

        let err = store
            .signup(&signup_form("secret123", "secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Busy));

        first.await.unwrap().unwrap();
        assert!(store.is_authenticated());
        assert!(!store.is_busy());
    }
}
