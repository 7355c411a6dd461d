use shopscout::db::Store;
use shopscout::entities::StoreTable;
use shopscout::models::{Product, ProductFilter, SortField, SortOrder};

async fn memory_store() -> Store {
    // Single connection so every handle sees the same in-memory database.
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

fn product(title: &str, price: Option<f64>, rating: Option<f64>, timestamp: &str) -> Product {
    Product {
        title: title.to_string(),
        price,
        rating,
        review_count: Some(100),
        product_url: Some(format!("https://www.amazon.com/dp/{title}")),
        image_url: Some(format!("https://img.example/{title}.jpg")),
        valid: price.is_some() && rating.is_some(),
        timestamp: timestamp.to_string(),
    }
}

#[tokio::test]
async fn clear_then_query_returns_empty() {
    let store = memory_store().await;

    let batch = vec![product("a", Some(10.0), Some(4.0), "2026-01-01T00:00:00+00:00")];
    store
        .insert_products(StoreTable::LiveScratch, "widgets", &batch)
        .await
        .unwrap();

    store.clear(StoreTable::LiveScratch).await.unwrap();

    let rows = store.all(StoreTable::LiveScratch).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn live_search_replaces_scratch_but_appends_to_permanent() {
    let store = memory_store().await;

    let first = vec![
        product("old-1", Some(5.0), Some(3.0), "2026-01-01T00:00:00+00:00"),
        product("old-2", Some(6.0), Some(3.5), "2026-01-01T00:00:01+00:00"),
    ];
    store
        .insert_products(StoreTable::Permanent, "gadgets", &first)
        .await
        .unwrap();
    store
        .insert_products(StoreTable::LiveScratch, "gadgets", &first)
        .await
        .unwrap();

    // Second search clears the scratch table first, like the orchestrator.
    let second = vec![product("new-1", Some(7.0), Some(4.0), "2026-01-02T00:00:00+00:00")];
    store.clear(StoreTable::LiveScratch).await.unwrap();
    store
        .insert_products(StoreTable::Permanent, "gadgets", &second)
        .await
        .unwrap();
    store
        .insert_products(StoreTable::LiveScratch, "gadgets", &second)
        .await
        .unwrap();

    let live = store.all(StoreTable::LiveScratch).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].title, "new-1");

    let permanent = store.all(StoreTable::Permanent).await.unwrap();
    assert_eq!(permanent.len(), 3);
}

#[tokio::test]
async fn history_copy_is_scoped_and_newest_first() {
    let store = memory_store().await;

    let headphones = vec![
        product("hp-early", Some(20.0), Some(4.0), "2026-01-01T00:00:00+00:00"),
        product("hp-late", Some(25.0), Some(4.5), "2026-02-01T00:00:00+00:00"),
    ];
    store
        .insert_products(StoreTable::Permanent, "headphones", &headphones)
        .await
        .unwrap();

    let mice = vec![product("mouse", Some(15.0), Some(4.2), "2026-01-15T00:00:00+00:00")];
    store
        .insert_products(StoreTable::Permanent, "mouse", &mice)
        .await
        .unwrap();

    let copied = store.copy_to_history("headphones").await.unwrap();
    let titles: Vec<_> = copied.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["hp-late", "hp-early"]);

    let scratch = store.all(StoreTable::HistoryScratch).await.unwrap();
    assert_eq!(scratch.len(), 2);
    assert!(scratch.iter().all(|p| p.title.starts_with("hp-")));

    // A copy for another query fully replaces the scratch contents.
    let copied = store.copy_to_history("mouse").await.unwrap();
    assert_eq!(copied.len(), 1);
    let scratch = store.all(StoreTable::HistoryScratch).await.unwrap();
    assert_eq!(scratch.len(), 1);
    assert_eq!(scratch[0].title, "mouse");
}

#[tokio::test]
async fn history_copy_for_unknown_query_empties_scratch() {
    let store = memory_store().await;

    store
        .insert_products(
            StoreTable::Permanent,
            "keyboard",
            &[product("kb", Some(30.0), Some(4.1), "2026-01-01T00:00:00+00:00")],
        )
        .await
        .unwrap();
    store.copy_to_history("keyboard").await.unwrap();

    let copied = store.copy_to_history("zzz-nonexistent").await.unwrap();
    assert!(copied.is_empty());
    assert!(store.all(StoreTable::HistoryScratch).await.unwrap().is_empty());
}

#[tokio::test]
async fn min_price_filter_sorts_ascending_with_nulls_excluded() {
    let store = memory_store().await;

    let batch = vec![
        product("pricey", Some(75.0), Some(4.0), "2026-01-01T00:00:00+00:00"),
        product("unpriced", None, Some(4.0), "2026-01-01T00:00:01+00:00"),
        product("mid", Some(60.0), Some(4.0), "2026-01-01T00:00:02+00:00"),
        product("cheap", Some(10.0), Some(4.0), "2026-01-01T00:00:03+00:00"),
    ];
    store
        .insert_products(StoreTable::LiveScratch, "speakers", &batch)
        .await
        .unwrap();

    let filter = ProductFilter {
        min_price: 50.0,
        ..Default::default()
    };
    let results = store.filter(StoreTable::LiveScratch, &filter).await.unwrap();

    let titles: Vec<_> = results.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["mid", "pricey"]);
}

#[tokio::test]
async fn null_sort_keys_sort_last_in_both_directions() {
    let store = memory_store().await;

    let batch = vec![
        product("no-rating", Some(10.0), None, "2026-01-01T00:00:00+00:00"),
        product("low", Some(10.0), Some(2.0), "2026-01-01T00:00:01+00:00"),
        product("high", Some(10.0), Some(5.0), "2026-01-01T00:00:02+00:00"),
    ];
    store
        .insert_products(StoreTable::LiveScratch, "cables", &batch)
        .await
        .unwrap();

    let asc = ProductFilter {
        sort_by: SortField::Rating,
        order: SortOrder::Asc,
        ..Default::default()
    };
    let results = store.filter(StoreTable::LiveScratch, &asc).await.unwrap();
    let titles: Vec<_> = results.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["low", "high", "no-rating"]);

    let desc = ProductFilter {
        sort_by: SortField::Rating,
        order: SortOrder::Desc,
        ..Default::default()
    };
    let results = store.filter(StoreTable::LiveScratch, &desc).await.unwrap();
    let titles: Vec<_> = results.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["high", "low", "no-rating"]);
}

#[tokio::test]
async fn all_zero_thresholds_apply_no_predicates() {
    let store = memory_store().await;

    let batch = vec![
        product("free", Some(0.0), None, "2026-01-01T00:00:00+00:00"),
        product("unpriced", None, None, "2026-01-01T00:00:01+00:00"),
        product("normal", Some(9.99), Some(4.0), "2026-01-01T00:00:02+00:00"),
    ];
    store
        .insert_products(StoreTable::LiveScratch, "stuff", &batch)
        .await
        .unwrap();

    let results = store
        .filter(StoreTable::LiveScratch, &ProductFilter::default())
        .await
        .unwrap();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn filtering_is_idempotent() {
    let store = memory_store().await;

    let batch = vec![
        product("a", Some(10.0), Some(3.0), "2026-01-01T00:00:00+00:00"),
        product("b", Some(20.0), Some(4.0), "2026-01-01T00:00:01+00:00"),
        product("c", Some(30.0), Some(5.0), "2026-01-01T00:00:02+00:00"),
    ];
    store
        .insert_products(StoreTable::LiveScratch, "things", &batch)
        .await
        .unwrap();

    let filter = ProductFilter {
        min_price: 15.0,
        min_rating: 3.5,
        sort_by: SortField::Price,
        order: SortOrder::Desc,
        ..Default::default()
    };

    let first = store.filter(StoreTable::LiveScratch, &filter).await.unwrap();
    let second = store.filter(StoreTable::LiveScratch, &filter).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn dedup_collapses_history_duplicates_only() {
    let store = memory_store().await;

    // Two identical scrapes land duplicate (title, price) pairs in the
    // permanent table.
    let batch = vec![product("dup", Some(10.0), Some(4.0), "2026-01-01T00:00:00+00:00")];
    store
        .insert_products(StoreTable::Permanent, "monitor", &batch)
        .await
        .unwrap();
    let batch = vec![product("dup", Some(10.0), Some(4.0), "2026-01-02T00:00:00+00:00")];
    store
        .insert_products(StoreTable::Permanent, "monitor", &batch)
        .await
        .unwrap();

    store.copy_to_history("monitor").await.unwrap();

    let deduped = ProductFilter {
        dedup: true,
        ..Default::default()
    };
    let results = store
        .filter(StoreTable::HistoryScratch, &deduped)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);

    let plain = store
        .filter(StoreTable::HistoryScratch, &ProductFilter::default())
        .await
        .unwrap();
    assert_eq!(plain.len(), 2);

    // The flag is ignored for the live table.
    store
        .insert_products(
            StoreTable::LiveScratch,
            "monitor",
            &[
                product("dup", Some(10.0), Some(4.0), "2026-01-01T00:00:00+00:00"),
                product("dup", Some(10.0), Some(4.0), "2026-01-02T00:00:00+00:00"),
            ],
        )
        .await
        .unwrap();
    let results = store.filter(StoreTable::LiveScratch, &deduped).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn title_sort_keeps_equal_titles_together() {
    let store = memory_store().await;

    let batch = vec![
        product("zeta", Some(1.0), Some(4.0), "2026-01-01T00:00:00+00:00"),
        product("alpha", Some(2.0), Some(4.0), "2026-01-01T00:00:01+00:00"),
        product("alpha", Some(3.0), Some(4.0), "2026-01-01T00:00:02+00:00"),
    ];
    store
        .insert_products(StoreTable::LiveScratch, "shelf", &batch)
        .await
        .unwrap();

    let filter = ProductFilter {
        sort_by: SortField::Title,
        ..Default::default()
    };
    let results = store.filter(StoreTable::LiveScratch, &filter).await.unwrap();
    let titles: Vec<_> = results.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["alpha", "alpha", "zeta"]);
}

#[tokio::test]
async fn invalid_records_are_stored_and_round_trip() {
    let store = memory_store().await;

    let batch = vec![
        product("complete", Some(10.0), Some(4.0), "2026-01-01T00:00:00+00:00"),
        product("incomplete", None, None, "2026-01-01T00:00:01+00:00"),
    ];
    store
        .insert_products(StoreTable::Permanent, "mixed", &batch)
        .await
        .unwrap();

    let rows = store.all(StoreTable::Permanent).await.unwrap();
    assert_eq!(rows.len(), 2);

    let complete = rows.iter().find(|p| p.title == "complete").unwrap();
    assert!(complete.valid);
    let incomplete = rows.iter().find(|p| p.title == "incomplete").unwrap();
    assert!(!incomplete.valid);
    assert_eq!(incomplete.price, None);
}
