//! Test wiring: in-memory SQLite and a recording mailer.

use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
use async_trait::async_trait;

use bookstore_core::domain::{NewUser, Role, User};
use bookstore_core::ports::{MailError, MailMessage, Mailer};
use bookstore_infra::database::{SqlUserRepository, connect, init_user_schema};
use bookstore_infra::{Argon2PasswordService, DatabaseConfig};
use bookstore_web::json_config;

use crate::config::ResetSettings;
use crate::handlers::configure_routes;
use crate::state::UserState;

pub const TEST_SECRET: &str = "user-service-test-secret";
pub const RESET_URL: &str = "http://frontend.test/reset-password";

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub async fn test_state() -> (UserState, Arc<RecordingMailer>) {
    let db = connect(&DatabaseConfig::in_memory()).await.unwrap();
    init_user_schema(&db).await.unwrap();
    let mailer = Arc::new(RecordingMailer::default());

    let state = UserState {
        users: Arc::new(SqlUserRepository::new(db)),
        passwords: Arc::new(Argon2PasswordService::new()),
        mailer: mailer.clone(),
        reset: ResetSettings {
            secret_key: TEST_SECRET.to_string(),
            token_ttl: chrono::Duration::hours(1),
            reset_url: RESET_URL.to_string(),
        },
    };
    (state, mailer)
}

/// Insert a customer directly through the repository.
pub async fn seed_user(state: &UserState, username: &str, email: &str, password: &str) -> User {
    state
        .users
        .create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: state.passwords.hash(password).unwrap(),
            first_name: None,
            last_name: None,
            role: Role::Customer,
            profile_pic: None,
        })
        .await
        .unwrap()
}

pub fn test_app(
    state: UserState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(json_config())
        .app_data(web::Data::new(state))
        .configure(configure_routes)
}
