//! End-to-end GraphQL tests against the in-memory store and a store that
//! always fails.
//!
//! Run with: cargo test --package empresa-api --test graphql

use std::sync::Arc;

use async_graphql::{Request, Variables};
use async_trait::async_trait;
use serde_json::{json, Value};

use empresa_api::{build_schema, Directory, EmpresaSchema};
use empresa_core::{
    Department, Employee, EntityId, EntityKind, Manager, NewDepartment, NewEmployee, NewManager,
};
use empresa_store::{seed, EntityStore, MemoryStore, StoreError};

/// A store whose backend is unreachable: every call fails.
struct UnreachableStore;

fn refused<T>() -> Result<T, StoreError> {
    Err(StoreError::Connection("connection refused".to_string()))
}

#[async_trait]
impl EntityStore for UnreachableStore {
    async fn insert_employee(&self, _: &NewEmployee) -> Result<Employee, StoreError> {
        refused()
    }

    async fn insert_manager(&self, _: &NewManager) -> Result<Manager, StoreError> {
        refused()
    }

    async fn insert_department(&self, _: &NewDepartment) -> Result<Department, StoreError> {
        refused()
    }

    async fn save_department(&self, _: &Department) -> Result<Department, StoreError> {
        refused()
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        refused()
    }

    async fn list_managers(&self) -> Result<Vec<Manager>, StoreError> {
        refused()
    }

    async fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        refused()
    }

    async fn get_employees(&self, _: &[EntityId]) -> Result<Vec<Employee>, StoreError> {
        refused()
    }

    async fn get_manager(&self, _: &EntityId) -> Result<Option<Manager>, StoreError> {
        refused()
    }

    async fn get_department(&self, _: &EntityId) -> Result<Option<Department>, StoreError> {
        refused()
    }

    async fn find_manager_by_email(&self, _: &str) -> Result<Option<Manager>, StoreError> {
        refused()
    }

    async fn find_department_by_name(&self, _: &str) -> Result<Option<Department>, StoreError> {
        refused()
    }

    async fn find_department_matching(&self, _: &str) -> Result<Option<Department>, StoreError> {
        refused()
    }

    async fn find_employees_by_salary(&self, _: f64, _: f64) -> Result<Vec<Employee>, StoreError> {
        refused()
    }

    async fn delete_all(&self, _: EntityKind) -> Result<u64, StoreError> {
        refused()
    }
}

fn schema() -> EmpresaSchema {
    build_schema(Directory::new(Arc::new(MemoryStore::new())))
}

async fn seeded_schema() -> EmpresaSchema {
    let store = Arc::new(MemoryStore::new());
    seed::seed(store.as_ref()).await.unwrap();
    build_schema(Directory::new(store))
}

async fn run(schema: &EmpresaSchema, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let response = schema.execute(request).await;
    serde_json::to_value(&response).unwrap()
}

fn error_code(body: &Value) -> &Value {
    &body["errors"][0]["extensions"]["code"]
}

const CREATE_EMPLEADO: &str = r#"
    mutation($nombre: String!, $sueldo: Float!) {
        createEmpleado(input: { nombre: $nombre, sueldo: $sueldo }) { _id nombre sueldo }
    }
"#;

const CREATE_GERENTE: &str = r#"
    mutation($nombre: String!, $email: String!) {
        createGerente(input: { nombre: $nombre, email: $email }) { _id nombre email }
    }
"#;

#[tokio::test]
async fn test_greetings() {
    let schema = schema();
    let body = run(&schema, r#"{ hello saludar(name: "Ana") }"#, json!({})).await;
    assert_eq!(body["data"]["hello"], "¡Hola desde GraphQL!");
    assert_eq!(body["data"]["saludar"], "Hola Ana!");
}

#[tokio::test]
async fn test_create_empleado_then_list() {
    let schema = schema();
    let body = run(
        &schema,
        CREATE_EMPLEADO,
        json!({ "nombre": "Ana García", "sueldo": 3500.0 }),
    )
    .await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    let created = &body["data"]["createEmpleado"];
    assert_eq!(created["nombre"], "Ana García");
    assert_eq!(created["sueldo"], 3500.0);

    let body = run(&schema, "{ empleados { _id nombre sueldo } }", json!({})).await;
    let empleados = body["data"]["empleados"].as_array().unwrap();
    assert_eq!(empleados.len(), 1);
    assert_eq!(empleados[0]["_id"], created["_id"]);
}

#[tokio::test]
async fn test_empleado_boundaries() {
    let schema = schema();

    let body = run(
        &schema,
        CREATE_EMPLEADO,
        json!({ "nombre": "a".repeat(100), "sueldo": 0.0 }),
    )
    .await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");

    let body = run(
        &schema,
        CREATE_EMPLEADO,
        json!({ "nombre": "a".repeat(101), "sueldo": 10.0 }),
    )
    .await;
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["extensions"]["field"], "nombre");

    let body = run(
        &schema,
        CREATE_EMPLEADO,
        json!({ "nombre": "Negativo", "sueldo": -1.0 }),
    )
    .await;
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["extensions"]["field"], "sueldo");

    let body = run(&schema, "{ empleados { nombre } }", json!({})).await;
    assert_eq!(body["data"]["empleados"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_gerente_email() {
    let schema = schema();
    let body = run(
        &schema,
        CREATE_GERENTE,
        json!({ "nombre": "Roberto Silva", "email": "roberto.silva@empresa.com" }),
    )
    .await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");

    let body = run(
        &schema,
        CREATE_GERENTE,
        json!({ "nombre": "Otro", "email": "ROBERTO.SILVA@empresa.com" }),
    )
    .await;
    assert_eq!(error_code(&body), "DUPLICATE_ERROR");

    let body = run(&schema, "{ gerentes { email } }", json!({})).await;
    assert_eq!(
        body["data"]["gerentes"],
        json!([{ "email": "roberto.silva@empresa.com" }])
    );
}

#[tokio::test]
async fn test_invalid_gerente_email() {
    let schema = schema();
    let body = run(
        &schema,
        CREATE_GERENTE,
        json!({ "nombre": "Sin Arroba", "email": "no-es-un-email" }),
    )
    .await;
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["extensions"]["field"], "email");
}

#[tokio::test]
async fn test_create_departamento_with_inline_employees() {
    let schema = seeded_schema().await;
    let body = run(
        &schema,
        r#"mutation {
            createDepartamento(input: {
                nombre: "QA",
                slogan: "Calidad ante todo",
                empleados: [
                    { nombre: "Lucía Pérez", sueldo: 3100 },
                    { nombre: "Jorge Díaz", sueldo: 3300 }
                ]
            }) { nombre empleados { nombre sueldo } gerente { nombre } }
        }"#,
        json!({}),
    )
    .await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    let created = &body["data"]["createDepartamento"];
    assert_eq!(created["empleados"][0]["nombre"], "Lucía Pérez");
    assert_eq!(created["empleados"][1]["sueldo"], 3300.0);
    assert_eq!(created["gerente"], Value::Null);

    let body = run(
        &schema,
        "{ departamentos { nombre empleados { nombre } } }",
        json!({}),
    )
    .await;
    let departamentos = body["data"]["departamentos"].as_array().unwrap();
    assert_eq!(departamentos.len(), 5);
    let qa = departamentos.last().unwrap();
    assert_eq!(qa["nombre"], "QA");
    assert_eq!(
        qa["empleados"],
        json!([{ "nombre": "Lucía Pérez" }, { "nombre": "Jorge Díaz" }])
    );

    let body = run(&schema, "{ empleados { nombre } }", json!({})).await;
    assert_eq!(body["data"]["empleados"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_duplicate_departamento_name() {
    let schema = seeded_schema().await;
    let body = run(
        &schema,
        r#"mutation {
            createDepartamento(input: { nombre: "Ventas", slogan: "Otra vez" }) { nombre }
        }"#,
        json!({}),
    )
    .await;
    assert_eq!(error_code(&body), "DUPLICATE_ERROR");

    let body = run(&schema, "{ departamentos { nombre } }", json!({})).await;
    assert_eq!(body["data"]["departamentos"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_seeded_departamentos_are_populated() {
    let schema = seeded_schema().await;
    let body = run(
        &schema,
        "{ departamentos { nombre empleados { nombre } gerente { email } } }",
        json!({}),
    )
    .await;
    let desarrollo = &body["data"]["departamentos"][0];
    assert_eq!(desarrollo["nombre"], "Desarrollo");
    assert_eq!(
        desarrollo["empleados"],
        json!([{ "nombre": "Ana García" }, { "nombre": "Carlos Rodríguez" }])
    );
    assert_eq!(desarrollo["gerente"]["email"], "roberto.silva@empresa.com");
}

#[tokio::test]
async fn test_departamento_lookup_strings() {
    let schema = seeded_schema().await;
    let body = run(
        &schema,
        r#"{ hit: departamento(nombre: "Desarrollo") miss: departamento(nombre: "NoExiste") }"#,
        json!({}),
    )
    .await;
    assert_eq!(body["data"]["hit"], "Desarrollo!");
    assert_eq!(body["data"]["miss"], "Departamento NoExiste no encontrado!");
}

#[tokio::test]
async fn test_empleados_por_sueldo() {
    let schema = seeded_schema().await;
    let body = run(
        &schema,
        "{ empleadosPorSueldo(min: 4000, max: 5000) { nombre } }",
        json!({}),
    )
    .await;
    assert_eq!(
        body["data"]["empleadosPorSueldo"],
        json!([{ "nombre": "Carlos Rodríguez" }, { "nombre": "Miguel Torres" }])
    );
}

#[tokio::test]
async fn test_store_failure_on_lists_is_internal_error() {
    let schema = build_schema(Directory::new(Arc::new(UnreachableStore)));
    for query in [
        "{ empleados { nombre } }",
        "{ gerentes { nombre } }",
        "{ departamentos { nombre } }",
    ] {
        let body = run(&schema, query, json!({})).await;
        assert_eq!(error_code(&body), "INTERNAL_ERROR", "{query}: {body}");
    }
}

#[tokio::test]
async fn test_store_failure_on_departamento_is_reported_as_text() {
    let schema = build_schema(Directory::new(Arc::new(UnreachableStore)));
    let body = run(&schema, r#"{ departamento(nombre: "Ventas") }"#, json!({})).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    assert_eq!(
        body["data"]["departamento"],
        "Error buscando departamento Ventas!"
    );
}

#[tokio::test]
async fn test_departamento_lookup_patterns() {
    let schema = seeded_schema().await;
    let body = run(
        &schema,
        r#"{
            prefix: departamento(nombre: "^Des")
            any: departamento(nombre: "Recursos.Humanos")
            either: departamento(nombre: "Desarrollo|Ventas")
            broken: departamento(nombre: "Ventas(")
        }"#,
        json!({}),
    )
    .await;
    assert_eq!(body["data"]["prefix"], "Desarrollo!");
    assert_eq!(body["data"]["any"], "Recursos Humanos!");
    assert_eq!(body["data"]["either"], "Desarrollo!");
    assert_eq!(
        body["data"]["broken"],
        "Error buscando departamento Ventas(!"
    );
}
