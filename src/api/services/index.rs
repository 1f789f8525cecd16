use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use super::ShortUrlSettings;
use super::helpers::text_response;

pub struct IndexService;

impl IndexService {
    pub async fn usage(settings: web::Data<ShortUrlSettings>) -> HttpResponse {
        text_response(StatusCode::OK, usage_text(settings.port))
    }
}

/// `GET /` 的说明文字
pub fn usage_text(port: u16) -> String {
    format!(
        r#"The base endpoint not using a POST request does nothing.
To add a shortened URL, make a POST request to this endpoint. Example:

curl --header "Content-Type: application/json" --request POST --data '{{"key":"your_secret_key","url":"https://example.com"}}' http://localhost:{port}

or to specify the path to create the shorturl on:

curl --header "Content-Type: application/json" --request POST --data '{{"key":"your_secret_key","url":"https://example.com","hash":"short"}}' http://localhost:{port}
"#
    )
}
