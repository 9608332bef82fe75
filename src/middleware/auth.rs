use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use crate::auth::jwt::{verify_token, Claims, Role};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Clone, Debug)]
pub struct AuthContext {
    pub subject: String,
    pub role: Role,
}

fn authenticate(req: &Request, secret: &str) -> Result<Claims, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    // Expect "Bearer <token>"
    let token = auth_header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization format"))?;

    verify_token(token, secret)
}

async fn require_role(
    state: &AppState,
    mut req: Request,
    next: Next,
    allowed: fn(Role) -> bool,
) -> Response {
    let claims = match authenticate(&req, &state.config.jwt_secret) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    if !allowed(claims.role) {
        tracing::warn!(subject = %claims.sub, role = ?claims.role, "Role not allowed on route");
        return AppError::forbidden("Insufficient permissions").into_response();
    }

    // Attach context
    req.extensions_mut().insert(AuthContext {
        subject: claims.sub,
        role: claims.role,
    });

    next.run(req).await
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_role(&state, req, next, Role::is_admin).await
}

pub async fn require_dealer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_role(&state, req, next, |role| role == Role::Dealer).await
}
