use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use mime::Mime;
use serde::de::DeserializeOwned;
use shared::api::error::ValidationError;

/// Request body that is either JSON or an urlencoded form, picked by the
/// content type. Anything that isn't JSON is read as a form.
///
/// Routes take `Result<Payload<T>, ValidationError>` so a bad body is only
/// reported once the route has done its own lookups
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Mime>().ok())
        .map_or(false, |content_type| {
            content_type.subtype() == mime::JSON || content_type.suffix() == Some(mime::JSON)
        })
}

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ValidationError::new(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ValidationError::new(e.body_text()))?;
            Ok(Self(value))
        }
    }
}
