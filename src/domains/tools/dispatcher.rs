//! Dispatcher - the single path every façade call goes through.
//!
//! lookup, validate, route, then one outbound call. No caching and no
//! retries: each dispatch that reaches the client makes exactly one request.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::DispatchError;
use super::registry::OperationRegistry;
use super::router::route;
use super::validator::{Arguments, validate};
use crate::domains::holded::HoldedApi;

/// Shared, stateless entry point for executing operations.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<OperationRegistry>,
    api: Arc<dyn HoldedApi>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("operations", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(registry: Arc<OperationRegistry>, api: Arc<dyn HoldedApi>) -> Self {
        Self { registry, api }
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Execute one named operation.
    #[instrument(skip(self, arguments), fields(operation = %name))]
    pub async fn dispatch(&self, name: &str, arguments: Arguments) -> Result<Value, DispatchError> {
        let operation = self.registry.lookup(name).ok_or_else(|| {
            warn!("Unknown operation requested: {}", name);
            DispatchError::not_found(name)
        })?;

        let arguments =
            validate(&operation.schema, arguments).map_err(DispatchError::ValidationFailed)?;
        let request = route(&operation.route, arguments)?;
        debug!(method = %request.method, target = %request.target(), "Routed operation");

        let payload = self.api.send(request).await.map_err(DispatchError::from)?;
        Ok(payload)
    }

    /// Like `dispatch`, for callers holding arbitrary JSON. `null` counts as
    /// no arguments; anything else that is not an object is rejected.
    pub async fn dispatch_json(&self, name: &str, arguments: Value) -> Result<Value, DispatchError> {
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => Arguments::new(),
            _ => {
                return Err(DispatchError::invalid_field(
                    "arguments",
                    "expected object",
                ));
            }
        };
        self.dispatch(name, arguments).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording fake of the Holded API shared by the façade tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::domains::holded::{ApiRequest, ClientError, HoldedApi};

    /// Records every request and answers from a queue of canned replies,
    /// falling back to an empty object.
    #[derive(Default)]
    pub struct FakeApi {
        pub calls: Mutex<Vec<ApiRequest>>,
        replies: Mutex<VecDeque<Result<Value, ClientError>>>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, reply: Result<Value, ClientError>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub fn calls(&self) -> Vec<ApiRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HoldedApi for FakeApi {
        async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
            self.calls.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Value::Object(Default::default())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeApi;
    use super::*;
    use crate::domains::holded::ClientError;
    use crate::domains::tools::error::ErrorKind;
    use reqwest::Method;
    use serde_json::json;

    fn dispatcher(api: FakeApi) -> (Dispatcher, Arc<FakeApi>) {
        let api = Arc::new(api);
        let registry = Arc::new(OperationRegistry::builtin().unwrap());
        (Dispatcher::new(registry, api.clone()), api)
    }

    #[tokio::test]
    async fn test_create_contact_passes_payload_through() {
        let created = json!({"status": 1, "id": "c-123", "info": "Created"});
        let (dispatcher, api) = dispatcher(FakeApi::new().reply(Ok(created.clone())));

        let result = dispatcher
            .dispatch_json("create_contact", json!({"name": "Acme"}))
            .await
            .unwrap();

        assert_eq!(result, created);
        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].target(), "invoicing/v1/contacts");
        assert_eq!(calls[0].body, Some(json!({"name": "Acme"})));
    }

    #[tokio::test]
    async fn test_update_invoice_keeps_id_in_path_only() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        dispatcher
            .dispatch_json("update_invoice", json!({"invoiceId": "i1", "notes": "paid"}))
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(calls[0].method, Method::PUT);
        assert_eq!(calls[0].path(), "invoicing/v1/documents/invoice/i1");
        assert_eq!(calls[0].body, Some(json!({"notes": "paid"})));
    }

    #[tokio::test]
    async fn test_missing_required_field_makes_no_call() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        let err = dispatcher.dispatch_json("get_contact", json!({})).await.unwrap_err();

        match err {
            DispatchError::ValidationFailed(violations) => {
                let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["contactId"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_is_not_retried() {
        let (dispatcher, api) = dispatcher(
            FakeApi::new().reply(Err(ClientError::remote(500, r#"{"error":"boom"}"#))),
        );
        let err = dispatcher.dispatch_json("get_products", json!({})).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RemoteError);
        assert!(matches!(err, DispatchError::Remote { status: 500, .. }));
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_internal() {
        let (dispatcher, _api) = dispatcher(
            FakeApi::new().reply(Err(ClientError::InvalidBaseUrl("unreachable".into()))),
        );
        let err = dispatcher.dispatch_json("get_services", Value::Null).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }

    #[tokio::test]
    async fn test_unknown_operation_makes_no_call() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        let err = dispatcher.dispatch_json("drop_database", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_arguments_rejected() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        let err = dispatcher.dispatch_json("get_contacts", json!([1, 2])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_reads_are_not_cached() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        for _ in 0..2 {
            dispatcher
                .dispatch_json("get_contact", json!({"contactId": "c1"}))
                .await
                .unwrap();
        }
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_list_defaults_to_first_page() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        dispatcher.dispatch_json("get_contacts", json!({})).await.unwrap();
        assert_eq!(api.calls()[0].target(), "invoicing/v1/contacts?page=1");
    }

    #[tokio::test]
    async fn test_stock_update_body_shape() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        dispatcher
            .dispatch_json(
                "update_product_stock",
                json!({"productId": "p1", "stock": 12, "warehouseId": "w1"}),
            )
            .await
            .unwrap();
        let call = &api.calls()[0];
        assert_eq!(call.path(), "invoicing/v1/products/p1/stock");
        assert_eq!(call.body, Some(json!({"stock": {"stock": 12, "warehouseId": "w1"}})));
    }

    #[tokio::test]
    async fn test_generic_document_operation() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        dispatcher
            .dispatch_json(
                "send_document",
                json!({"docType": "salesorder", "documentId": "d1", "email": "a@b.co"}),
            )
            .await
            .unwrap();
        let call = &api.calls()[0];
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path(), "invoicing/v1/documents/salesorder/d1/send");
        assert_eq!(call.body, Some(json!({"email": "a@b.co"})));
    }

    #[tokio::test]
    async fn test_unknown_doc_type_rejected_before_call() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        let err = dispatcher
            .dispatch_json("get_documents", json!({"docType": "receipt"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_are_independent() {
        let (dispatcher, api) = dispatcher(FakeApi::new());
        let calls = (0..8).map(|i| {
            let dispatcher = dispatcher.clone();
            async move {
                dispatcher
                    .dispatch_json("get_contact", json!({"contactId": format!("c{i}")}))
                    .await
            }
        });
        let results = futures::future::join_all(calls).await;

        assert!(results.iter().all(Result::is_ok));
        let mut paths: Vec<_> = api.calls().iter().map(|c| c.path()).collect();
        paths.sort();
        assert_eq!(paths.len(), 8);
        assert_eq!(paths[0], "invoicing/v1/contacts/c0");
    }
}
