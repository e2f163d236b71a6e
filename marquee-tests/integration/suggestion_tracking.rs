//! Search counters kept in the fake Appwrite collection.

use crate::fixtures::production_stack;

async fn search_and_track(stack: &crate::fixtures::Stack, term: &str) {
    let outcome = stack.service.search(term).await;
    if let Some(tracking) = outcome.tracking {
        tracking.await.unwrap();
    }
}

#[tokio::test]
async fn test_repeated_search_increments_one_document() {
    let stack = production_stack().await;

    search_and_track(&stack, "batman").await;
    search_and_track(&stack, "batman").await;

    let documents = stack.appwrite.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["searchTerm"], "batman");
    assert_eq!(documents[0]["count"], 2);
    assert_eq!(
        documents[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/268.jpg"
    );
    assert!(
        stack
            .appwrite
            .project_headers()
            .iter()
            .all(|project| project == "marquee")
    );
}

#[tokio::test]
async fn test_trending_is_ordered_by_count() {
    let stack = production_stack().await;

    search_and_track(&stack, "dune").await;
    for _ in 0..3 {
        search_and_track(&stack, "batman").await;
    }
    for _ in 0..2 {
        search_and_track(&stack, "matrix").await;
    }

    let trending = stack.service.trending_searches(2).await;
    let terms: Vec<_> = trending.iter().map(|r| r.search_term.as_str()).collect();
    assert_eq!(terms, ["batman", "matrix"]);
    assert_eq!(trending[0].count, 3);
    assert_eq!(
        trending[1].poster_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/603.jpg")
    );
}

#[tokio::test]
async fn test_store_outage_does_not_affect_search() {
    let stack = production_stack().await;
    stack.appwrite.set_failing(true);

    let outcome = stack.service.search("inception").await;
    assert_eq!(outcome.state.value().map(Vec::len), Some(1));
    outcome.tracking.expect("tracking task").await.unwrap();

    assert!(stack.service.trending_searches(5).await.is_empty());
    assert!(stack.appwrite.documents().is_empty());
}
