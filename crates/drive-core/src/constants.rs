//! Constantes del controlador.

/// Versión lógica del formato de payload. Forma parte del `payload_hash`, así
/// que un cambio invalida las claves de idempotencia previas.
pub const ENGINE_VERSION: &str = "W1.0";

/// Título usado cuando se notifica un fallo inesperado.
pub const GENERIC_FAILURE_TITLE: &str = "Something went wrong";
