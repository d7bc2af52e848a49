//! HTTP transport: GraphQL over `POST /graphql`, GraphiQL on `GET /graphql`,
//! and a JSON info document on `GET /`.

use std::net::SocketAddr;

use async_graphql::http::GraphiQLSource;
use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use crate::schema::EmpresaSchema;

pub fn router(schema: EmpresaSchema) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/graphql", get(graphiql).post(graphql_handler))
        .with_state(schema)
}

async fn graphql_handler(
    State(schema): State<EmpresaSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let operation = request.operation_name.clone().unwrap_or_default();
    let response = schema.execute(request).await;
    if response.is_err() {
        tracing::debug!(
            operation = %operation,
            errors = response.errors.len(),
            "GraphQL request failed"
        );
    }
    Json(response)
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Servidor GraphQL funcionando",
        "endpoints": {
            "graphql": "/graphql",
            "graphiql": "/graphql (en el navegador)"
        },
        "examples": {
            "queries": [
                "hello",
                "saludar(name: \"Tu Nombre\")",
                "empleados",
                "empleadosPorSueldo(min: 3000, max: 4000)",
                "departamentos",
                "departamento(nombre: \"Desarrollo\")",
                "gerentes"
            ],
            "mutations": [
                "createEmpleado(input: { nombre: \"...\", sueldo: 3000 })",
                "createGerente(input: { nombre: \"...\", email: \"...\" })",
                "createDepartamento(input: { nombre: \"...\", slogan: \"...\", empleados: [...] })"
            ]
        }
    }))
}

/// Serve the schema until Ctrl-C.
pub async fn serve(schema: EmpresaSchema, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "GraphQL server listening");

    axum::serve(listener, router(schema))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("GraphQL server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
