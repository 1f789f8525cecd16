use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, error, trace};

use crate::errors::FlatlinkerError;
use crate::services::LinkService;

use super::helpers::{error_from_flatlinker, error_response};

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> HttpResponse {
        let captured_path = path.into_inner();
        let key = captured_path.trim_matches('/');

        if key.contains('/') {
            trace!("Rejected nested path: {}", req.path());
            return error_response(StatusCode::BAD_REQUEST, "URL shouldn't contain '/'");
        }

        match link_service.resolve(key).await {
            Ok(target) => HttpResponse::build(StatusCode::FOUND)
                .insert_header((LOCATION, target))
                .finish(),
            Err(FlatlinkerError::NotFound(_)) => {
                debug!("Shorturl not found: {}", req.path());
                error_response(
                    StatusCode::NOT_FOUND,
                    &format!("shorturl {} doesn't exist", req.path()),
                )
            }
            Err(e @ FlatlinkerError::StorageFault(_)) => {
                error!("Storage error during redirect lookup: {}", e);
                error_from_flatlinker(&e)
            }
            Err(e) => error_from_flatlinker(&e),
        }
    }
}
