use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;

/// Authenticated caller extracted from the bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl AuthUser {
    /// Ownership check: does the caller own a resource stored with `owner_id`?
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub }
    }
}

/// JWT authentication middleware that validates tokens and injects [`AuthUser`]
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = validate_jwt(&token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Token inválido")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Token não informado".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Token mal formatado".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err("Token não informado".to_string()),
        None => Err("Token mal formatado".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_jwt_from_headers(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert!(extract_jwt_from_headers(&HeaderMap::new()).is_err());
        assert!(extract_jwt_from_headers(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_jwt_from_headers(&headers("Bearer   ")).is_err());
    }

    #[test]
    fn ownership_compares_ids() {
        let me = Uuid::new_v4();
        let caller = AuthUser { user_id: me };
        assert!(caller.owns(me));
        assert!(!caller.owns(Uuid::new_v4()));
    }
}
