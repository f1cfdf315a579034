use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use tokio::net::TcpListener;

use super::schema::ForumSchema;
use crate::error::Result;

/// Routes: `/` and `/graphql` execute documents on POST and serve GraphiQL on
/// GET; `/health` answers `ok`.
pub fn router(schema: ForumSchema) -> Router {
    Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .with_state(schema)
}

async fn graphql_handler(State(schema): State<ForumSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

async fn health() -> &'static str {
    "ok"
}

/// Serves the schema on an already bound listener until Ctrl-C.
pub async fn run_server(listener: TcpListener, schema: ForumSchema) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Running on http://{}/", addr);

    axum::serve(listener, router(schema))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::build_schema;
    use crate::storage::MemoryStore;
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn spawn_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let schema = build_schema(Arc::new(MemoryStore::new()));
        tokio::spawn(run_server(listener, schema));
        format!("http://{}", addr)
    }

    async fn post(client: &reqwest::Client, url: String, query: &str) -> Value {
        client
            .post(url)
            .json(&json!({ "query": query }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_server().await;
        let body = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_post_executes_on_both_routes() {
        let base = spawn_server().await;
        let client = reqwest::Client::new();

        let empty = post(&client, format!("{}/graphql", base), "{ boards { id } }").await;
        assert_eq!(empty["data"]["boards"], json!([]));

        let created = post(&client, format!("{}/", base), r#"mutation { createBoard(name: "free") }"#).await;
        assert_eq!(created["data"]["createBoard"], true);

        let listed = post(&client, format!("{}/graphql", base), "{ boards { name } }").await;
        assert_eq!(listed["data"]["boards"][0]["name"], "free");
    }

    #[tokio::test]
    async fn test_get_serves_graphiql() {
        let base = spawn_server().await;
        let response = reqwest::get(format!("{}/", base)).await.unwrap();
        assert!(response.status().is_success());
        let body = response.text().await.unwrap();
        assert!(body.to_lowercase().contains("graphiql"));
    }
}
