//! Connection pool construction and repository access.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::repository::{
    AnunciantesRepo, DistribucionesRepo, FacturasRepo, FranquiciadosRepo, InventarioRepo,
    OrdenesProduccionRepo, PagosFranquiciaRepo, PanaderiasRepo,
};

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Apply embedded migrations on connect.
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        DbConfig {
            database_url: database_url.into(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }
}

/// Main database handle providing repository access.
///
/// Cheap to clone (wraps an `Arc`-backed pool); the API layer stores one in
/// its shared state and hands out repositories per request.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect, and apply embedded migrations when configured.
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;

        info!(max_connections = config.max_connections, "pool de base de datos creado");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Apply embedded migrations (idempotent).
    pub async fn run_migrations(&self) -> DbResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("migraciones aplicadas");
        Ok(())
    }

    /// Liveness probe for `/health`.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn anunciantes(&self) -> AnunciantesRepo {
        AnunciantesRepo::new(self.pool.clone())
    }

    pub fn panaderias(&self) -> PanaderiasRepo {
        PanaderiasRepo::new(self.pool.clone())
    }

    pub fn franquiciados(&self) -> FranquiciadosRepo {
        FranquiciadosRepo::new(self.pool.clone())
    }

    pub fn distribuciones(&self) -> DistribucionesRepo {
        DistribucionesRepo::new(self.pool.clone())
    }

    pub fn inventario(&self) -> InventarioRepo {
        InventarioRepo::new(self.pool.clone())
    }

    pub fn facturas(&self) -> FacturasRepo {
        FacturasRepo::new(self.pool.clone())
    }

    pub fn ordenes_produccion(&self) -> OrdenesProduccionRepo {
        OrdenesProduccionRepo::new(self.pool.clone())
    }

    pub fn pagos_franquicia(&self) -> PagosFranquiciaRepo {
        PagosFranquiciaRepo::new(self.pool.clone())
    }
}
