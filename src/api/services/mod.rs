pub mod create;
pub mod helpers;
pub mod index;
pub mod redirect;

use actix_web::web;
use subtle::ConstantTimeEq;

pub use create::{CreateService, PostInfo};
pub use index::IndexService;
pub use redirect::RedirectService;

/// Per-server settings the handlers read through `web::Data`.
#[derive(Clone, Debug)]
pub struct ShortUrlSettings {
    pub secret_key: String,
    pub port: u16,
}

impl ShortUrlSettings {
    pub fn new(secret_key: impl Into<String>, port: u16) -> Self {
        Self {
            secret_key: secret_key.into(),
            port,
        }
    }

    /// 常量时间比较 POST 中的 key 与配置的密钥
    pub fn secret_matches(&self, candidate: &str) -> bool {
        candidate
            .as_bytes()
            .ct_eq(self.secret_key.as_bytes())
            .into()
    }
}

/// Register every shorturl route on an app.
///
/// - `POST /` creates a link, any other method on `/` prints usage
/// - everything else is treated as a key lookup
pub fn shorturl_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::post().to(CreateService::handle_create))
            .default_service(web::route().to(IndexService::usage)),
    )
    .service(web::resource("/{path:.*}").to(RedirectService::handle_redirect));
}
