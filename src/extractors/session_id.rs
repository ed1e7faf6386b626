use actix_web::{dev::Payload, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::AppError;

/// Session id extracted from the `X-Session-Id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let header = req
                .headers()
                .get("x-session-id")
                .ok_or_else(AppError::unauthorized)?;

            let value = header.to_str().map_err(|_| AppError::unauthorized())?;

            let id = Uuid::parse_str(value).map_err(|_| AppError::unauthorized())?;

            Ok(SessionId(id))
        })
    }
}
