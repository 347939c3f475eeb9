use super::*;

#[tokio::test]
async fn reads_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.graphql"), "type Query { ping: String }").unwrap();

    let fetcher = FileFetcher::new(dir.path());
    let text = fetcher.fetch("heads/main", "schema.graphql").await;
    assert_eq!(text.as_deref(), Some("type Query { ping: String }"));
}

#[tokio::test]
async fn missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = FileFetcher::new(dir.path());
    assert_eq!(fetcher.fetch("heads/main", "missing.graphql").await, None);
}
