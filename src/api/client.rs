//! HTTP client for the remote product catalog

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::envelope::{Body, Envelope, WireEnvelope};
use crate::error::{Error, Result};
use crate::state::data::Product;

/// Client for the catalog API
///
/// Every call issues exactly one request: no retry, no caching and no
/// timeout beyond reqwest's defaults. Anything that goes wrong (transport,
/// status, body) comes back as `Envelope::Failure`, never as an error or
/// a panic.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client rooted at `base_url` (e.g. `https://api.example.com/api/`)
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::Config {
                message: format!("{base_url} cannot be used as a base URL"),
                key: Some("CATALOG_API_URL".to_string()),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("golden-extreme/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /products`
    pub async fn get_products(&self) -> Envelope<Vec<Product>> {
        let url = match self.endpoint(&["products"]) {
            Ok(url) => url,
            Err(e) => return Envelope::Failure(e.to_string()),
        };
        let envelope = self
            .get_json::<Vec<Product>>(url, "catalog response did not include products")
            .await;
        if let Envelope::Success(products) = &envelope {
            debug!(count = products.len(), "fetched product list");
        }
        envelope
    }

    /// `GET /products/{id}`
    pub async fn get_product_by_id(&self, id: &str) -> Envelope<Product> {
        let url = match self.endpoint(&["products", id]) {
            Ok(url) => url,
            Err(e) => return Envelope::Failure(e.to_string()),
        };
        self.get_json(url, "not found").await
    }

    /// Download product artwork; relative URLs resolve against the API base
    pub async fn fetch_image(&self, image_url: &str) -> Envelope<Vec<u8>> {
        match self.try_fetch_image(image_url).await {
            Ok(bytes) => Envelope::Success(bytes),
            Err(e) => {
                warn!(url = image_url, error = %e, "image download failed");
                Envelope::Failure(e.to_string())
            }
        }
    }

    async fn try_fetch_image(&self, image_url: &str) -> Result<Vec<u8>> {
        let url = self.base_url.join(image_url)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, missing: &str) -> Envelope<T> {
        match self.try_get_json(url.clone(), missing).await {
            Ok(envelope) => {
                if let Envelope::Failure(message) = &envelope {
                    debug!(url = %url, error = %message, "catalog reported failure");
                }
                envelope
            }
            Err(e) => {
                warn!(url = %url, error = %e, "catalog request failed");
                Envelope::Failure(e.to_string())
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: Url, missing: &str) -> Result<Envelope<T>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Ok(Envelope::Failure(failure_message(status, &bytes)));
        }

        let body: Body<T> = serde_json::from_slice(&bytes)?;
        Ok(body.into_envelope(missing))
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::NotSupported(format!("{} cannot take path segments", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Error text for a non-2xx response, using the server's message when it sent one
fn failure_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<WireEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|mut wire| wire.failure_text())
        .unwrap_or_else(|| format!("server responded with {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CatalogClient {
        let base = Url::parse(&format!("{}/api/", server.uri())).unwrap();
        CatalogClient::new(base).unwrap()
    }

    fn battery(id: &str) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "name": format!("Battery {id}"),
            "category": "battery",
            "subcategory": "AGM",
            "image": format!("/img/{id}.webp"),
            "description": "12V"
        })
    }

    #[tokio::test]
    async fn test_get_products_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": [battery("a"), battery("b")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let products = client_for(&server).get_products().await.into_result().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "a");
        assert_eq!(products[1].name, "Battery b");
    }

    #[tokio::test]
    async fn test_get_products_with_id_virtuals() {
        let server = MockServer::start().await;
        let mut with_virtual = battery("a");
        with_virtual["id"] = serde_json::json!("a");
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": [with_virtual, battery("b")]
            })))
            .mount(&server)
            .await;

        let products = client_for(&server).get_products().await.into_result().unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_get_product_by_id_not_found_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error": "not found"
            })))
            .mount(&server)
            .await;

        let envelope = client_for(&server).get_product_by_id("x").await;
        assert_eq!(envelope, Envelope::Failure("not found".to_string()));
    }

    #[tokio::test]
    async fn test_get_product_by_id_null_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/gone"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true, "data": null })),
            )
            .mount(&server)
            .await;

        let envelope = client_for(&server).get_product_by_id("gone").await;
        assert_eq!(envelope.error(), Some("not found"));
    }

    #[tokio::test]
    async fn test_http_error_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/bad"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "success": false,
                "message": "Product not found"
            })))
            .mount(&server)
            .await;

        let envelope = client_for(&server).get_product_by_id("bad").await;
        assert_eq!(envelope.error(), Some("Product not found"));
    }

    #[tokio::test]
    async fn test_http_error_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let envelope = client_for(&server).get_products().await;
        assert_eq!(
            envelope.error(),
            Some("server responded with 500 Internal Server Error")
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let envelope = client_for(&server).get_products().await;
        assert!(envelope.error().unwrap().starts_with("malformed response"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_failure() {
        // Nothing listens on port 9 (discard) in the test environment
        let client = CatalogClient::new(Url::parse("http://127.0.0.1:9/api/").unwrap()).unwrap();
        let envelope = client.get_products().await;
        assert!(envelope.error().unwrap().starts_with("network error"));
    }

    #[tokio::test]
    async fn test_id_is_encoded_as_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/a%2Fb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": battery("a/b")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let product = client_for(&server).get_product_by_id("a/b").await.into_result().unwrap();
        assert_eq!(product.id, "a/b");
    }

    #[tokio::test]
    async fn test_fetch_image_resolves_relative_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img/a.webp"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let bytes = client_for(&server).fetch_image("/img/a.webp").await.into_result().unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = CatalogClient::new(Url::parse("https://shop.example.com/api/").unwrap()).unwrap();
        let url = client.endpoint(&["products", "42"]).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/products/42");
    }
}
