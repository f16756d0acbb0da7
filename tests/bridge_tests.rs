use paybridge::application::bridge::PaymentsBridge;
use paybridge::domain::card::CardDetails;
use paybridge::infrastructure::sandbox::{
    CardBehavior, DeviceDataBehavior, SandboxConnector, SandboxHost,
};
use std::sync::Arc;

fn card_details() -> CardDetails {
    CardDetails {
        number: "4111111111111111".into(),
        expiration_month: "12".into(),
        expiration_year: "2030".into(),
        cvv: "123".into(),
        cardholder_name: None,
        postal_code: None,
    }
}

fn bridge_with(connector: Arc<SandboxConnector>) -> PaymentsBridge {
    PaymentsBridge::new(connector, Arc::new(SandboxHost::default()))
}

#[tokio::test]
async fn test_operations_before_initialize_fail_without_gateway_calls() {
    let connector = Arc::new(SandboxConnector::new());
    let bridge = bridge_with(connector.clone());

    let err = bridge.tokenize_card(card_details()).await.unwrap_err();
    assert_eq!(err.code(), "NOT_INITIALIZED");

    let err = bridge
        .request_paypal_checkout("10.00", None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_INITIALIZED");

    let err = bridge.request_paypal_vault(None).await.unwrap_err();
    assert_eq!(err.code(), "NOT_INITIALIZED");

    let err = bridge.collect_device_data().await.unwrap_err();
    assert_eq!(err.code(), "NOT_INITIALIZED");

    // No session was ever constructed, no gateway was ever touched.
    assert_eq!(connector.connect_count(), 0);
    assert!(connector.handles().is_none());
}

#[tokio::test]
async fn test_initialize_resolves_true() {
    let bridge = bridge_with(Arc::new(SandboxConnector::new()));
    assert!(bridge.initialize("sandbox_key").await.unwrap());
}

#[tokio::test]
async fn test_initialize_failure_carries_gateway_message() {
    let bridge = bridge_with(Arc::new(SandboxConnector::refusing("merchant not found")));

    let err = bridge.initialize("sandbox_key").await.unwrap_err();
    assert_eq!(err.code(), "INITIALIZATION_ERROR");
    assert!(err.to_string().contains("merchant not found"));
}

#[tokio::test]
async fn test_initialize_runs_on_the_dedicated_session_thread() {
    let connector = Arc::new(SandboxConnector::new());
    let bridge = bridge_with(connector.clone());

    bridge.initialize("sandbox_key").await.unwrap();
    bridge.initialize("sandbox_key").await.unwrap();

    let threads = connector.connect_threads();
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0], threads[1]);
    assert_ne!(threads[0], std::thread::current().id());
}

#[tokio::test]
async fn test_reinitialize_replaces_the_session() {
    let connector = Arc::new(SandboxConnector::new());
    let bridge = bridge_with(connector.clone());

    bridge.initialize("first_key").await.unwrap();
    let old_card = connector.handles().unwrap().card;

    bridge.initialize("second_key").await.unwrap();
    let new_card = connector.handles().unwrap().card;
    assert!(!Arc::ptr_eq(&old_card, &new_card));

    // Tokenization goes through the replacement sub-client only.
    bridge.tokenize_card(card_details()).await.unwrap();
    assert_eq!(old_card.call_count(), 0);
    assert_eq!(new_card.call_count(), 1);
}

#[tokio::test]
async fn test_tokenize_card_success_returns_wire_map() {
    let bridge = bridge_with(Arc::new(SandboxConnector::new()));
    bridge.initialize("sandbox_key").await.unwrap();

    let map = bridge.tokenize_card(card_details()).await.unwrap();
    assert!(map["nonce"].as_str().unwrap().starts_with("tokencc_sandbox_"));
    assert_eq!(map["isDefault"], false);
    assert_eq!(map["type"], "Card");
    assert_eq!(map["cardType"], "Visa");
    assert_eq!(map["lastTwo"], "11");
    assert_eq!(map["lastFour"], "1111");
    assert_eq!(map["bin"], "411111");
    assert_eq!(map["expirationMonth"], "12");
    assert_eq!(map["expirationYear"], "2030");
}

#[tokio::test]
async fn test_tokenize_card_error_branch() {
    let connector = SandboxConnector::new().with_card(CardBehavior::Decline("card declined".into()));
    let bridge = bridge_with(Arc::new(connector));
    bridge.initialize("sandbox_key").await.unwrap();

    let err = bridge.tokenize_card(card_details()).await.unwrap_err();
    assert_eq!(err.code(), "TOKENIZATION_ERROR");
    assert!(err.to_string().contains("card declined"));
}

#[tokio::test]
async fn test_tokenize_card_neither_branch_is_a_generic_error() {
    let connector = SandboxConnector::new().with_card(CardBehavior::Empty);
    let bridge = bridge_with(Arc::new(connector));
    bridge.initialize("sandbox_key").await.unwrap();

    let err = bridge.tokenize_card(card_details()).await.unwrap_err();
    assert_eq!(err.code(), "TOKENIZATION_ERROR");
    assert!(err.to_string().contains("unknown error occurred"));
}

#[tokio::test]
async fn test_collect_device_data_returns_fingerprint() {
    let bridge = bridge_with(Arc::new(SandboxConnector::new()));
    bridge.initialize("sandbox_key").await.unwrap();

    let data = bridge.collect_device_data().await.unwrap();
    assert!(data.contains("correlation_id"));
}

#[tokio::test]
async fn test_collect_device_data_empty_payload_resolves_empty_string() {
    let connector = SandboxConnector::new().with_device_data(DeviceDataBehavior::Empty);
    let bridge = bridge_with(Arc::new(connector));
    bridge.initialize("sandbox_key").await.unwrap();

    assert_eq!(bridge.collect_device_data().await.unwrap(), "");
}

#[tokio::test]
async fn test_collect_device_data_failure() {
    let connector =
        SandboxConnector::new().with_device_data(DeviceDataBehavior::Fail("collector down".into()));
    let bridge = bridge_with(Arc::new(connector));
    bridge.initialize("sandbox_key").await.unwrap();

    let err = bridge.collect_device_data().await.unwrap_err();
    assert_eq!(err.code(), "DEVICE_DATA_ERROR");
    assert!(err.to_string().contains("collector down"));
}
