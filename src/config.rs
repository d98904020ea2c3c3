//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`)
//! con las URIs de tracking/registry y la raíz de artifacts que usan los
//! binarios de demostración.
use once_cell::sync::Lazy;
use std::env;

/// Configuración global de la aplicación (extensible para más secciones: logging, etc.).
pub struct AppConfig {
    /// Configuración específica del cliente de tracking.
    pub tracking: TrackingConfig,
}

/// Parámetros del cliente de tracking.
pub struct TrackingConfig {
    /// URI del backend de tracking (None = store en memoria).
    pub tracking_uri: Option<String>,
    /// URI del registry de modelos; su autoridad se propaga al resolver
    /// URIs `models:` sin autoridad propia.
    pub registry_uri: Option<String>,
    /// Raíz por defecto de artifacts.
    pub artifact_root: String,
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
    AppConfig {
        tracking: TrackingConfig {
            tracking_uri: env::var("TRACKFLOW_TRACKING_URI").ok(),
            registry_uri: env::var("TRACKFLOW_REGISTRY_URI").ok(),
            artifact_root: env::var("TRACKFLOW_ARTIFACT_ROOT").ok()
                .unwrap_or_else(|| "file:///trackflow".to_string()),
        },
    }
});
