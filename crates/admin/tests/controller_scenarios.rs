//! End-to-end controller behavior over an in-memory store.

use chrono::NaiveDate;

use catalogx_admin::{
    AdminConfig, CatalogController, DeleteError, DeleteOutcome, ExportFailure, ExportSink,
    InMemoryCatalogStore, MemorySink, Notice, Session, SinkError, StoreError, TableBody,
};
use catalogx_core::{ProductId, UserId};
use catalogx_products::{ExportError, ProductRecord};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn session() -> Session {
    Session::new(UserId::new(), "token")
}

async fn loaded(
    records: Vec<ProductRecord>,
) -> (CatalogController<InMemoryCatalogStore>, InMemoryCatalogStore) {
    let store = InMemoryCatalogStore::new(records);
    let mut controller =
        CatalogController::new(store.clone(), session(), &AdminConfig::default()).unwrap();
    controller.refresh().await.unwrap();
    (controller, store)
}

/// Ten records, three of which mention "coil" somewhere.
fn mixed_catalog() -> Vec<ProductRecord> {
    let mut records: Vec<ProductRecord> = (1..=7)
        .map(|i| {
            ProductRecord::new(format!("v-{i}"), format!("Valve {i}"), "brass body")
                .with_categories(["Valves"])
        })
        .collect();
    records.push(
        ProductRecord::new("c-1", "Copper Coil", "heavy gauge").with_categories(["Coils"]),
    );
    records.push(
        ProductRecord::new("c-2", "Heater", "spiral COIL element").with_categories(["Heating"]),
    );
    records.push(ProductRecord::new("c-3", "Bracket", "mount").with_sku("COIL-BRK"));
    records
}

#[tokio::test]
async fn export_of_empty_catalog_is_aborted_with_notice() {
    let (mut controller, _) = loaded(Vec::new()).await;
    let sink = MemorySink::new();

    let result = controller.export(&sink, today());

    assert!(matches!(
        result,
        Err(ExportFailure::Export(ExportError::NothingToExport))
    ));
    assert!(sink.deliveries().is_empty());
    assert_eq!(controller.take_notices(), vec![Notice::error("No products to export")]);
}

/// Sink that refuses every delivery, like a full disk or a blocked download.
struct RefusingSink;

impl ExportSink for RefusingSink {
    fn deliver(
        &self,
        _payload: &[u8],
        _filename: &str,
        _mime_type: &str,
    ) -> Result<(), SinkError> {
        Err(SinkError::Rejected("download blocked".to_string()))
    }
}

#[tokio::test]
async fn refused_delivery_reports_generic_export_failure() {
    let (mut controller, _) = loaded(mixed_catalog()).await;
    controller.set_query("coil");
    controller.next_page();

    let result = controller.export(&RefusingSink, today());

    assert!(matches!(result, Err(ExportFailure::Sink(SinkError::Rejected(_)))));
    assert_eq!(
        controller.take_notices(),
        vec![Notice::error("Failed to export products")]
    );
    assert_eq!(controller.catalog().len(), 10);
    assert_eq!(controller.query(), "coil");
    assert_eq!(controller.page(), 1);
    assert!(controller.pending_delete().is_none());
}

#[tokio::test]
async fn unusable_date_format_reports_generic_export_failure() {
    let mut config = AdminConfig::default();
    config.export.date_format = "%Q".to_string();
    let store = InMemoryCatalogStore::new(mixed_catalog());
    let mut controller = CatalogController::new(store, session(), &config).unwrap();
    controller.refresh().await.unwrap();
    let sink = MemorySink::new();

    let result = controller.export(&sink, today());

    assert!(matches!(
        result,
        Err(ExportFailure::Export(ExportError::Serialization(_)))
    ));
    assert!(sink.deliveries().is_empty());
    assert_eq!(
        controller.take_notices(),
        vec![Notice::error("Failed to export products")]
    );
    assert_eq!(controller.catalog().len(), 10);
}

#[tokio::test]
async fn search_narrows_to_one_page() {
    let (mut controller, _) = loaded(mixed_catalog()).await;
    assert_eq!(controller.total_pages(), 2);

    controller.set_query("coil");

    let view = controller.view();
    assert_eq!(view.summary.total, 10);
    assert_eq!(view.summary.matched, 3);
    assert_eq!(view.total_pages, 1);
    assert!(!view.show_pagination);
    let TableBody::Rows(rows) = &view.body else {
        panic!("expected rows, got {:?}", view.body);
    };
    let ids: Vec<&str> = rows.iter().map(|r| r.record.id.as_str()).collect();
    assert_eq!(ids, ["c-1", "c-2", "c-3"]);
    assert_eq!(rows.iter().map(|r| r.serial).collect::<Vec<_>>(), [1, 2, 3]);
}

#[tokio::test]
async fn facets_ignore_the_query_and_select_sets_it() {
    let (mut controller, _) = loaded(mixed_catalog()).await;
    controller.set_query("coil");

    assert_eq!(controller.facets(), ["Coils", "Heating", "Valves"]);

    controller.select_facet("Valves");
    assert_eq!(controller.query(), "Valves");
    assert_eq!(controller.summary().matched, 7);

    controller.clear_search();
    assert_eq!(controller.query(), "");
    assert_eq!(controller.export_label(), "Export All Products");
}

#[tokio::test]
async fn filtered_export_delivers_csv() {
    let (mut controller, _) = loaded(mixed_catalog()).await;
    controller.set_query("coil");
    let sink = MemorySink::new();

    let payload = controller.export(&sink, today()).unwrap();

    assert_eq!(payload.filename, "Products_Export_Filtered_18-10-2026.csv");
    assert_eq!(payload.row_count, 3);
    let delivered = sink.deliveries();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].mime_type, "text/csv; charset=utf-8");

    let body = String::from_utf8(delivered[0].payload.clone()).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("S.No,Part Code,Product Name,Description,Category,Sub Category,Price,Stock,Image URLs")
    );
    assert_eq!(
        lines.next(),
        Some(r#""1","N/A","Copper Coil","heavy gauge","N/A","N/A","N/A","N/A","N/A""#)
    );
    assert_eq!(body.lines().count(), 4);
    assert!(!body.ends_with('\n'));
    assert_eq!(
        controller.take_notices(),
        vec![Notice::success("Successfully exported 3 products")]
    );
}

#[tokio::test]
async fn second_request_replaces_first_candidate() {
    let (mut controller, store) = loaded(mixed_catalog()).await;

    controller.request_delete(&ProductId::new("v-1")).unwrap();
    controller.request_delete(&ProductId::new("v-2")).unwrap();
    assert_eq!(
        controller.delete_prompt().as_deref(),
        Some("Are you sure you want to delete the product \"Valve 2\"?")
    );

    let outcome = controller.confirm_delete().await;

    assert!(matches!(outcome, DeleteOutcome::Deleted(ref r) if r.id.as_str() == "v-2"));
    assert_eq!(store.delete_calls(), vec![ProductId::new("v-2")]);
    assert!(controller.catalog().iter().any(|r| r.id.as_str() == "v-1"));
}

#[tokio::test]
async fn successful_delete_refetches_catalog() {
    let (mut controller, store) = loaded(mixed_catalog()).await;
    assert_eq!(store.list_calls(), 1);

    controller.request_delete(&ProductId::new("c-1")).unwrap();
    controller.confirm_delete().await;

    assert_eq!(store.list_calls(), 2);
    assert_eq!(controller.catalog().len(), 9);
    assert!(controller.pending_delete().is_none());
    assert_eq!(
        controller.take_notices(),
        vec![Notice::success("Product deleted successfully.")]
    );
}

#[tokio::test]
async fn refused_delete_keeps_catalog_and_shows_store_message() {
    let (mut controller, store) = loaded(mixed_catalog()).await;
    store.fail_next_delete(StoreError::Api {
        status: 409,
        message: Some("Product in use".to_string()),
    });

    controller.request_delete(&ProductId::new("c-1")).unwrap();
    let outcome = controller.confirm_delete().await;

    assert!(matches!(
        outcome,
        DeleteOutcome::Failed { ref message, .. } if message == "Product in use"
    ));
    assert!(controller.pending_delete().is_none());
    assert_eq!(controller.catalog().len(), 10);
    assert_eq!(store.list_calls(), 1);
    assert_eq!(controller.take_notices(), vec![Notice::error("Product in use")]);
}

#[tokio::test]
async fn cancel_sends_nothing() {
    let (mut controller, store) = loaded(mixed_catalog()).await;

    controller.request_delete(&ProductId::new("c-1")).unwrap();
    let cancelled = controller.cancel_delete().unwrap();

    assert_eq!(cancelled.id.as_str(), "c-1");
    assert_eq!(controller.confirm_delete().await, DeleteOutcome::NothingPending);
    assert!(store.delete_calls().is_empty());
}

#[tokio::test]
async fn unknown_id_cannot_be_requested() {
    let (mut controller, _) = loaded(mixed_catalog()).await;
    assert_eq!(
        controller.request_delete(&ProductId::new("nope")),
        Err(DeleteError::NotFound(ProductId::new("nope")))
    );
}

#[tokio::test]
async fn query_change_returns_to_first_page() {
    let records: Vec<ProductRecord> = (1..=20)
        .map(|i| ProductRecord::new(format!("p-{i}"), format!("Part {i}"), "spare"))
        .collect();
    let (mut controller, _) = loaded(records).await;

    controller.next_page();
    assert_eq!(controller.page(), 2);
    controller.set_query("part");
    assert_eq!(controller.page(), 1);

    controller.go_to_page(3);
    let view = controller.view();
    let TableBody::Rows(rows) = &view.body else {
        panic!("expected rows, got {:?}", view.body);
    };
    assert_eq!(rows.iter().map(|r| r.serial).collect::<Vec<_>>(), [19, 20]);
}

#[tokio::test]
async fn fetch_failure_empties_catalog() {
    let (mut controller, store) = loaded(mixed_catalog()).await;
    store.fail_next_list(StoreError::Api {
        status: 500,
        message: None,
    });

    assert!(controller.refresh().await.is_err());

    assert!(controller.catalog().is_empty());
    assert!(!controller.is_loading());
    assert_eq!(controller.view().body, TableBody::Empty("No products available"));
    assert_eq!(
        controller.take_notices(),
        vec![Notice::error("Failed to fetch products")]
    );
}
