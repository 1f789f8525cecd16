use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::errors::FlatlinkerError;
use crate::services::{CreateLinkRequest, LinkService};

use super::ShortUrlSettings;
use super::helpers::{error_from_flatlinker, error_response, text_response};

/// `POST /` 的请求体，缺失的字段视为空字符串
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostInfo {
    #[serde(rename = "key", default)]
    pub secret_key: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub hash: String,
}

pub struct CreateService;

impl CreateService {
    pub async fn handle_create(
        body: web::Bytes,
        link_service: web::Data<Arc<LinkService>>,
        settings: web::Data<ShortUrlSettings>,
    ) -> HttpResponse {
        let post: PostInfo = match serde_json::from_slice(&body) {
            Ok(post) => post,
            Err(e) => {
                debug!("Rejected POST body: {}", e);
                return error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("decoding POST body into JSON: {}", e),
                );
            }
        };

        if !settings.secret_matches(&post.secret_key) {
            warn!("Rejected POST with incorrect secret key");
            return error_from_flatlinker(&FlatlinkerError::forbidden("incorrect secret key"));
        }

        let request = CreateLinkRequest {
            hash: Some(post.hash),
            url: post.url,
        };

        match link_service.create_link(request).await {
            Ok(created) => text_response(StatusCode::OK, format!("{}\n", created.key)),
            Err(FlatlinkerError::StorageFault(msg)) => {
                error!("Failed to store shorturl: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("Couldn't create shorturl file: {}", msg),
                )
            }
            Err(e) => error_from_flatlinker(&e),
        }
    }
}
