//! HTTP adapters against mock provider APIs.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use remittance_hub::application::services::RemittanceHub;
use remittance_hub::domain::entities::{Address, Recipient, TransactionRequest};
use remittance_hub::domain::value_objects::{
    CountryCode, Currency, Money, ProviderName, RecipientId, SenderId, TransactionId,
    TransactionStatus,
};
use remittance_hub::infrastructure::providers::signing::hmac_sha256_hex;
use remittance_hub::infrastructure::providers::worldremit::{
    API_KEY_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use remittance_hub::infrastructure::providers::{
    ProviderError, RemitlyConfig, RemitlyProvider, RemittanceProvider, WiseConfig, WiseProvider,
    WorldRemitConfig, WorldRemitProvider,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn d(value: &str) -> Decimal {
    value.parse().unwrap()
}

fn usd_to_php() -> TransactionRequest {
    let recipient = Recipient::new(
        RecipientId::new("acct-991"),
        "Maria Santos",
        Address::in_country(CountryCode::new("PH").unwrap()),
    );
    TransactionRequest::builder(
        SenderId::new("snd-7"),
        CountryCode::new("US").unwrap(),
        recipient,
        Money::new(d("1000"), Currency::USD),
        Currency::PHP,
    )
    .purpose("family support")
    .reference("INV-2026-001")
    .build()
    .unwrap()
}

fn wise(server: &MockServer) -> WiseProvider {
    WiseProvider::new(WiseConfig::new("wise-token", "42").with_base_url(server.uri())).unwrap()
}

fn remitly(server: &MockServer) -> RemitlyProvider {
    RemitlyProvider::new(RemitlyConfig::new("remitly-token").with_base_url(server.uri())).unwrap()
}

fn worldremit(server: &MockServer) -> WorldRemitProvider {
    WorldRemitProvider::new(
        WorldRemitConfig::new("wr-key", "wr-secret").with_base_url(server.uri()),
    )
    .unwrap()
}

mod wise {
    use super::*;

    #[tokio::test]
    async fn quote_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/quotes"))
            .and(header("authorization", "Bearer wise-token"))
            .and(body_partial_json(json!({
                "profile": "42",
                "source": "USD",
                "target": "PHP",
                "sourceAmount": 1000.0,
                "type": "REGULAR"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 8812,
                "fee": 7.5,
                "rate": 56.25,
                "targetAmount": 55828.13
            })))
            .expect(1)
            .mount(&server)
            .await;

        let quote = wise(&server).get_quote(&usd_to_php()).await.unwrap();

        assert_eq!(quote.provider().as_str(), "Wise");
        assert_eq!(quote.fee().amount(), d("7.5"));
        assert_eq!(quote.total_cost().amount(), d("1007.5"));
        assert_eq!(quote.exchange_rate(), d("56.25"));
        assert_eq!(quote.received_amount().amount(), d("55828.13"));
        assert_eq!(quote.received_amount().currency(), Currency::PHP);
        assert!(!quote.is_expired());
    }

    #[tokio::test]
    async fn send_creates_quote_then_transfer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/quotes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "q-77",
                "fee": 7.5,
                "rate": 56.25
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .and(body_partial_json(json!({
                "targetAccount": "acct-991",
                "quote": "q-77",
                "customerTransactionId": "INV-2026-001",
                "details": { "reference": "family support" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 50012,
                "status": "incoming_payment_waiting"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = wise(&server).send_money(&usd_to_php()).await.unwrap();

        assert_eq!(response.transaction_id().as_str(), "50012");
        assert_eq!(response.status(), TransactionStatus::Pending);
        assert_eq!(response.fee().unwrap().amount(), d("7.5"));
        assert_eq!(response.tracking_url(), Some("https://wise.com/track/50012"));
    }

    #[tokio::test]
    async fn status_lookup_maps_states() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/transfers/50012"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 50012,
                "status": "outgoing_payment_sent"
            })))
            .mount(&server)
            .await;

        let response = wise(&server)
            .get_transaction_status(&TransactionId::new("50012"))
            .await
            .unwrap();
        assert_eq!(response.status(), TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn unknown_transfer_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/transfers/404404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = wise(&server)
            .get_transaction_status(&TransactionId::new("404404"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::TransactionNotFound { .. }));
    }

    #[tokio::test]
    async fn empty_rate_list_is_quote_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/rates"))
            .and(query_param("source", "USD"))
            .and(query_param("target", "PHP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = wise(&server)
            .get_exchange_rate(Currency::USD, Currency::PHP)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::QuoteUnavailable { .. }));
    }

    #[tokio::test]
    async fn rate_is_first_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/rates"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "rate": 56.3 }, { "rate": 50 }])),
            )
            .mount(&server)
            .await;

        let rate = wise(&server)
            .get_exchange_rate(Currency::USD, Currency::PHP)
            .await
            .unwrap();
        assert_eq!(rate.rate(), d("56.3"));
        assert_eq!(rate.from(), Currency::USD);
        assert_eq!(rate.to(), Currency::PHP);
    }
}

mod remitly {
    use super::*;

    #[tokio::test]
    async fn quote_uses_reported_payout_and_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/quotes"))
            .and(header("authorization", "Bearer remitly-token"))
            .and(body_partial_json(json!({
                "source_currency": "USD",
                "target_currency": "PHP",
                "destination_country": "PH"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fee": 3.99,
                "rate": 56.1,
                "receive_amount": 56100,
                "delivery_estimate": "Within 1 hour",
                "expires_at": "2099-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let quote = remitly(&server).get_quote(&usd_to_php()).await.unwrap();

        assert_eq!(quote.total_cost().amount(), d("1003.99"));
        assert_eq!(quote.received_amount().amount(), d("56100"));
        assert_eq!(quote.estimated_time(), "Within 1 hour");
        assert_eq!(quote.valid_until().to_rfc3339(), "2099-01-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn malformed_quote_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/quotes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "fee": "lots" })))
            .mount(&server)
            .await;

        let err = remitly(&server).get_quote(&usd_to_php()).await.unwrap_err();
        assert!(matches!(err, ProviderError::ProtocolError { .. }));
    }

    #[tokio::test]
    async fn transfer_status_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .and(body_partial_json(json!({
                "sender_id": "snd-7",
                "recipient": { "id": "acct-991", "country": "PH" },
                "reference": "INV-2026-001"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "RM-1",
                "status": "PENDING",
                "fee": 3.99,
                "rate": 56.1
            })))
            .mount(&server)
            .await;

        let response = remitly(&server).send_money(&usd_to_php()).await.unwrap();
        assert_eq!(response.transaction_id().as_str(), "RM-1");
        assert_eq!(response.status(), TransactionStatus::Pending);
        assert_eq!(response.exchange_rate(), Some(d("56.1")));
    }

    #[tokio::test]
    async fn rate_limit_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/quotes"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "3"))
            .mount(&server)
            .await;

        let err = remitly(&server).get_quote(&usd_to_php()).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.retry_after_ms(), Some(3_000));
    }
}

mod worldremit {
    use super::*;

    #[tokio::test]
    async fn requests_are_signed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/quotes"))
            .and(header(API_KEY_HEADER, "wr-key"))
            .and(header_exists(TIMESTAMP_HEADER))
            .and(header_exists(SIGNATURE_HEADER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fee": 5.99,
                "rate": 56.0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let quote = worldremit(&server).get_quote(&usd_to_php()).await.unwrap();
        assert_eq!(quote.total_cost().amount(), d("1005.99"));
        assert_eq!(quote.estimated_time(), "Minutes");

        let requests = server.received_requests().await.unwrap();
        let request = &requests[0];
        let timestamp = request.headers.get(TIMESTAMP_HEADER).unwrap().to_str().unwrap();
        let signature = request.headers.get(SIGNATURE_HEADER).unwrap().to_str().unwrap();
        let body = std::str::from_utf8(&request.body).unwrap();

        let message = format!("POST\n/v1/quotes\n{timestamp}\n{body}");
        let expected = hmac_sha256_hex(b"wr-secret", message.as_bytes()).unwrap();
        assert_eq!(signature, expected);
    }

    #[tokio::test]
    async fn unknown_transfer_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/transfers/WR-missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = worldremit(&server)
            .get_transaction_status(&TransactionId::new("WR-missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::TransactionNotFound { .. }));
    }

    #[tokio::test]
    async fn bad_credentials_are_authentication_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid signature"))
            .mount(&server)
            .await;

        let err = worldremit(&server).send_money(&usd_to_php()).await.unwrap_err();
        assert!(err.is_client_error());
        assert!(matches!(err, ProviderError::Authentication { .. }));
    }
}

#[tokio::test]
async fn hub_skips_failing_http_provider() {
    let wise_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/quotes"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&wise_server)
        .await;

    let remitly_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fee": 3.99,
            "rate": 56.1
        })))
        .mount(&remitly_server)
        .await;

    let providers: Vec<Arc<dyn RemittanceProvider>> = vec![
        Arc::new(wise(&wise_server)),
        Arc::new(remitly(&remitly_server)),
    ];
    let hub = RemittanceHub::new(providers).unwrap();

    let result = hub.aggregate_quotes(&usd_to_php()).await;
    assert_eq!(result.providers_queried, 2);
    assert_eq!(result.providers_failed, 1);

    let quotes = result.into_quotes();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].provider(), &ProviderName::new("Remitly"));

    let err = hub
        .send_money_with_provider(&ProviderName::new("Wise"), &usd_to_php())
        .await
        .unwrap_err();
    assert!(matches!(err.provider_error(), Some(ProviderError::Connection { .. })));
}
