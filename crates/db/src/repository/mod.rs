//! One repository per entity; each issues parameterized SQL only.

pub mod anunciantes;
pub mod distribuciones;
pub mod facturas;
pub mod franquiciados;
pub mod inventario;
pub mod ordenes_produccion;
pub mod pagos_franquicia;
pub mod panaderias;

pub use anunciantes::AnunciantesRepo;
pub use distribuciones::DistribucionesRepo;
pub use facturas::{CobroError, FacturasRepo};
pub use franquiciados::FranquiciadosRepo;
pub use inventario::InventarioRepo;
pub use ordenes_produccion::OrdenesProduccionRepo;
pub use pagos_franquicia::PagosFranquiciaRepo;
pub use panaderias::PanaderiasRepo;
