//! gRPC Auth service implementation
//!
//! Thin adapter over the [`Auth`] capability:
//! - request fields are passed through as-is, validation lives in the core
//! - outcomes are counted per result and timed per method

use std::sync::Arc;
use std::time::Instant;

use sso_auth_core::{Auth, AuthError};
use sso_proto::auth_service::auth_server::Auth as AuthRpc;
use sso_proto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use sso_types::AppId;
use tonic::{Request, Response, Status};

use crate::error::auth_status;

/// gRPC service implementation
pub struct GrpcAuthService {
    auth: Arc<dyn Auth>,
}

impl GrpcAuthService {
    pub fn new(auth: Arc<dyn Auth>) -> Self {
        Self { auth }
    }
}

fn result_label<T>(result: &Result<T, AuthError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => e.error_code(),
    }
}

#[tonic::async_trait]
impl AuthRpc for GrpcAuthService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let start = Instant::now();
        let req = request.into_inner();

        let result = self.auth.register(&req.email, &req.password).await;

        metrics::counter!("sso_register_total", "result" => result_label(&result)).increment(1);
        metrics::histogram!("grpc_request_duration_seconds", "method" => "register")
            .record(start.elapsed().as_secs_f64());

        let user_id = result.map_err(|e| auth_status(&e))?;
        Ok(Response::new(RegisterResponse {
            user_id: user_id.get(),
        }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let start = Instant::now();
        let req = request.into_inner();

        let result = self
            .auth
            .login(&req.email, &req.password, AppId(req.app_id))
            .await;

        metrics::counter!("sso_login_total", "result" => result_label(&result)).increment(1);
        metrics::histogram!("grpc_request_duration_seconds", "method" => "login")
            .record(start.elapsed().as_secs_f64());

        let token = result.map_err(|e| auth_status(&e))?;
        Ok(Response::new(LoginResponse { token }))
    }
}
