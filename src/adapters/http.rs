use crate::domain::model::Shipment;
use crate::domain::ports::{ConfigProvider, ShipmentRepository};
use crate::utils::error::{ColisError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// 透過 REST 後端（json-server 相容）存取 `cargaisons` 集合
#[derive(Debug, Clone)]
pub struct HttpShipmentRepository {
    collection_url: String,
    client: Client,
}

impl HttpShipmentRepository {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            collection_url: format!(
                "{}/{}",
                config.base_url().trim_end_matches('/'),
                config.collection()
            ),
            client,
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    fn ensure_success(method: &str, url: &str, response: &Response) -> Result<()> {
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, url, status);

        if status.is_success() {
            return Ok(());
        }
        Err(ColisError::HttpStatusError {
            method: method.to_string(),
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ShipmentRepository for HttpShipmentRepository {
    async fn list(&self) -> Result<Vec<Shipment>> {
        tracing::debug!("Fetching shipments from: {}", self.collection_url);
        let response = self.client.get(&self.collection_url).send().await?;
        Self::ensure_success("GET", &self.collection_url, &response)?;

        let shipments: Vec<Shipment> = response.json().await?;
        tracing::debug!("Fetched {} shipments", shipments.len());
        Ok(shipments)
    }

    async fn get(&self, id: &str) -> Result<Shipment> {
        let url = self.item_url(id);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("GET {} -> 404", url);
            return Err(ColisError::ShipmentNotFoundError { id: id.to_string() });
        }
        Self::ensure_success("GET", &url, &response)?;

        Ok(response.json().await?)
    }

    async fn replace(&self, shipment: &Shipment) -> Result<()> {
        let url = self.item_url(shipment.id.as_str());
        // .json() 會帶上 Content-Type: application/json
        let response = self.client.put(&url).json(shipment).send().await?;
        Self::ensure_success("PUT", &url, &response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    struct MockConfig {
        base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn collection(&self) -> &str {
            "cargaisons"
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }
    }

    fn repository(server: &MockServer) -> HttpShipmentRepository {
        HttpShipmentRepository::new(&MockConfig {
            base_url: format!("{}/", server.base_url()),
        })
        .unwrap()
    }

    fn shipment_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "numero": format!("CRG-{}", id),
            "etatGlobal": "OUVERT",
            "type": "ROUTIERE",
            "colis": [],
            "poidsMax": 800.5,
            "lieuDepart": {"pays": "Mali"},
            "lieuArrivee": {"pays": "Sénégal"}
        })
    }

    #[test]
    fn test_collection_url_trims_trailing_slash() {
        let repo = HttpShipmentRepository::new(&MockConfig {
            base_url: "http://localhost:3000/".to_string(),
        })
        .unwrap();
        assert_eq!(repo.collection_url(), "http://localhost:3000/cargaisons");
    }

    #[tokio::test]
    async fn test_list_shipments() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/cargaisons");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([shipment_json("1"), shipment_json("2")]));
        });

        let shipments = repository(&server).list().await.unwrap();

        api_mock.assert();
        assert_eq!(shipments.len(), 2);
        assert_eq!(shipments[1].numero, "CRG-2");
    }

    #[tokio::test]
    async fn test_list_server_error_is_http_status_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/cargaisons");
            then.status(503);
        });

        let result = repository(&server).list().await;

        api_mock.assert();
        assert!(matches!(
            result,
            Err(ColisError::HttpStatusError { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_get_missing_shipment_is_not_found() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/cargaisons/42");
            then.status(404).json_body(json!({}));
        });

        let result = repository(&server).get("42").await;

        api_mock.assert();
        assert!(matches!(
            result,
            Err(ColisError::ShipmentNotFoundError { ref id }) if id == "42"
        ));
    }

    #[tokio::test]
    async fn test_replace_sends_full_record() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/cargaisons/9")
                .header("content-type", "application/json")
                .json_body(shipment_json("9"));
            then.status(200).json_body(shipment_json("9"));
        });

        let shipment: Shipment = serde_json::from_value(shipment_json("9")).unwrap();
        repository(&server).replace(&shipment).await.unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let repo = HttpShipmentRepository::new(&MockConfig {
            base_url: "http://127.0.0.1:9".to_string(),
        })
        .unwrap();

        let result = repo.list().await;
        assert!(matches!(result, Err(ColisError::TransportError(_))));
    }
}
