//! Black-box tests against a real server bound to an ephemeral port.
//!
//! These need a running Postgres: they are skipped (with a note on stderr)
//! when `DATABASE_URL` is not set.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Value, json};
use tokio::net::TcpListener;

use infopan_api::app::build_app;
use infopan_db::{Database, DbConfig};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Boot the app against the database at `DATABASE_URL`, or `None` when
    /// the variable is unset.
    async fn spawn() -> Option<Self> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL no definida; test de integración omitido");
            return None;
        };

        let db = Database::connect(DbConfig::new(database_url))
            .await
            .expect("conexión a la base de pruebas");
        let app = build_app(db);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("puerto efímero");
        let addr = listener.local_addr().expect("dirección local");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("servidor de pruebas");
        });

        Some(TestServer {
            base_url: format!("http://{addr}"),
            handle,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Unique suffix so reruns against the same database never collide on
/// business keys.
fn sufijo_unico() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("reloj del sistema")
        .as_nanos()
}

#[tokio::test]
async fn health_reports_ok() {
    let Some(server) = TestServer::spawn().await else {
        return;
    };

    let res = reqwest::get(server.url("/health")).await.expect("GET /health");
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.expect("cuerpo JSON");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
}

#[tokio::test]
async fn ciclo_de_vida_de_factura() {
    let Some(server) = TestServer::spawn().await else {
        return;
    };
    let client = reqwest::Client::new();
    let sufijo = sufijo_unico();

    // Anunciante para colgar la factura.
    let res = client
        .post(server.url("/api/anunciantes"))
        .json(&json!({"nombre_empresa": format!("Panificadora Quito {sufijo}")}))
        .send()
        .await
        .expect("POST anunciante");
    assert_eq!(res.status(), 201);
    let anunciante: Value = res.json().await.expect("anunciante creado");
    let anunciante_id = anunciante["data"]["id"].as_i64().expect("id de anunciante");

    // Factura de 100 + 15% de IVA.
    let numero = format!("001-001-{sufijo}");
    let res = client
        .post(server.url("/api/facturas"))
        .json(&json!({
            "numero_factura": numero,
            "anunciante_id": anunciante_id,
            "subtotal": 100.0,
            "porcentaje_iva": 15.0,
        }))
        .send()
        .await
        .expect("POST factura");
    assert_eq!(res.status(), 201);
    let factura: Value = res.json().await.expect("factura creada");
    let data = &factura["data"];
    let factura_id = data["id"].as_i64().expect("id de factura");
    assert_eq!(data["valor_iva"], json!(15.0));
    assert_eq!(data["total"], json!(115.0));
    assert_eq!(data["saldo_pendiente"], json!(115.0));
    assert_eq!(data["estado"], json!("emitida"));

    // Cobro parcial.
    let res = client
        .post(server.url(&format!("/api/facturas/{factura_id}/cobros")))
        .json(&json!({"monto": 15.0, "metodo_pago": "efectivo"}))
        .send()
        .await
        .expect("POST cobro parcial");
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.expect("cobro registrado");
    assert_eq!(body["data"]["factura"]["estado"], json!("pagada_parcial"));
    assert_eq!(body["data"]["factura"]["saldo_pendiente"], json!(100.0));
    assert_eq!(body["data"]["cobro"]["monto"], json!(15.0));

    // Cobro por el saldo restante deja la factura pagada.
    let res = client
        .post(server.url(&format!("/api/facturas/{factura_id}/cobros")))
        .json(&json!({"monto": 100.0}))
        .send()
        .await
        .expect("POST cobro final");
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.expect("cobro final");
    assert_eq!(body["data"]["factura"]["estado"], json!("pagada"));
    assert_eq!(body["data"]["factura"]["saldo_pendiente"], json!(0.0));

    // El número de factura es único.
    let res = client
        .post(server.url("/api/facturas"))
        .json(&json!({
            "numero_factura": numero,
            "anunciante_id": anunciante_id,
            "subtotal": 50.0,
        }))
        .send()
        .await
        .expect("POST factura duplicada");
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.expect("error de duplicado");
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Ya existe una factura con este número"));

    // Con cobros registrados la factura no se puede eliminar.
    let res = client
        .delete(server.url(&format!("/api/facturas/{factura_id}")))
        .send()
        .await
        .expect("DELETE factura con cobros");
    assert_eq!(res.status(), 400);

    // Anulada, deja de aceptar cobros.
    let res = client
        .patch(server.url(&format!("/api/facturas/{factura_id}/estado")))
        .json(&json!({"estado": "anulada"}))
        .send()
        .await
        .expect("PATCH estado anulada");
    assert_eq!(res.status(), 200);

    let res = client
        .post(server.url(&format!("/api/facturas/{factura_id}/cobros")))
        .json(&json!({"monto": 1.0}))
        .send()
        .await
        .expect("POST cobro sobre anulada");
    assert_eq!(res.status(), 400);

    // Una edición completa no revierte el estado fijado externamente.
    let res = client
        .put(server.url(&format!("/api/facturas/{factura_id}")))
        .json(&json!({
            "numero_factura": numero,
            "anunciante_id": anunciante_id,
            "subtotal": 100.0,
            "porcentaje_iva": 15.0,
        }))
        .send()
        .await
        .expect("PUT factura anulada");
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.expect("factura editada");
    assert_eq!(body["data"]["estado"], json!("anulada"));
}

#[tokio::test]
async fn factura_rechaza_subtotal_no_positivo() {
    let Some(server) = TestServer::spawn().await else {
        return;
    };
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/facturas"))
        .json(&json!({
            "numero_factura": format!("001-002-{}", sufijo_unico()),
            "anunciante_id": 1,
            "subtotal": 0.0,
        }))
        .send()
        .await
        .expect("POST factura inválida");
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.expect("error de validación");
    assert_eq!(body["message"], json!("El subtotal debe ser mayor a 0"));
}

#[tokio::test]
async fn alerta_de_stock_bajo() {
    let Some(server) = TestServer::spawn().await else {
        return;
    };
    let client = reqwest::Client::new();
    let sufijo = sufijo_unico();

    let nombre_bajo = format!("Papel kraft {sufijo}");
    let res = client
        .post(server.url("/api/inventario"))
        .json(&json!({
            "nombre_item": nombre_bajo,
            "cantidad_actual": 5.0,
            "cantidad_minima": 10.0,
            "cantidad_maxima": 100.0,
        }))
        .send()
        .await
        .expect("POST item bajo");
    assert_eq!(res.status(), 201);
    let creado: Value = res.json().await.expect("item creado");
    assert_eq!(creado["data"]["nivel"], json!("bajo"));

    // Un ítem sin mínimo configurado nunca alerta.
    let nombre_sin_minimo = format!("Tinta negra {sufijo}");
    let res = client
        .post(server.url("/api/inventario"))
        .json(&json!({
            "nombre_item": nombre_sin_minimo,
            "cantidad_actual": 0.0,
        }))
        .send()
        .await
        .expect("POST item sin mínimo");
    assert_eq!(res.status(), 201);

    let res = client
        .get(server.url("/api/inventario/alertas/stock-bajo"))
        .send()
        .await
        .expect("GET stock bajo");
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.expect("alertas");
    let nombres: Vec<&str> = body["data"]
        .as_array()
        .expect("lista de alertas")
        .iter()
        .filter_map(|i| i["nombre_item"].as_str())
        .collect();
    assert!(nombres.contains(&nombre_bajo.as_str()));
    assert!(!nombres.contains(&nombre_sin_minimo.as_str()));

    // Reponer por encima del mínimo saca al ítem de la alerta.
    let item_id = creado["data"]["id"].as_i64().expect("id de item");
    let res = client
        .patch(server.url(&format!("/api/inventario/{item_id}/cantidad")))
        .json(&json!({"cantidad_actual": 50.0}))
        .send()
        .await
        .expect("PATCH cantidad");
    assert_eq!(res.status(), 200);
    let repuesto: Value = res.json().await.expect("item repuesto");
    assert_eq!(repuesto["data"]["nivel"], json!("normal"));
}

#[tokio::test]
async fn estado_fuera_de_la_lista_es_rechazado() {
    let Some(server) = TestServer::spawn().await else {
        return;
    };
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/ordenes-produccion"))
        .json(&json!({"cantidad_solicitada": 500}))
        .send()
        .await
        .expect("POST orden");
    assert_eq!(res.status(), 201);
    let orden: Value = res.json().await.expect("orden creada");
    let orden_id = orden["data"]["id"].as_i64().expect("id de orden");
    assert_eq!(orden["data"]["estado"], json!("pendiente"));

    let res = client
        .patch(server.url(&format!("/api/ordenes-produccion/{orden_id}/estado")))
        .json(&json!({"estado": "volando"}))
        .send()
        .await
        .expect("PATCH estado inválido");
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.expect("error de estado");
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn recursos_inexistentes_responden_404() {
    let Some(server) = TestServer::spawn().await else {
        return;
    };

    for path in [
        "/api/anunciantes/999999999",
        "/api/facturas/999999999",
        "/api/facturas/999999999/cobros",
        "/api/inventario/999999999",
    ] {
        let res = reqwest::get(server.url(path)).await.expect("GET inexistente");
        assert_eq!(res.status(), 404, "{path}");
        let body: Value = res.json().await.expect("cuerpo 404");
        assert_eq!(body["success"], json!(false));
    }
}
