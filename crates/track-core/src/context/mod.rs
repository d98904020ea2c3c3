//! Proveedores de tags de contexto.
//!
//! Un `ContextTagProvider` aporta tags por defecto en la creación de un run
//! (usuario, fuente, ...). Debe ser una función pura del entorno recibido:
//! sin efectos secundarios observables. Los tags del usuario se aplican al
//! final y ganan sobre los de cualquier proveedor.
use indexmap::IndexMap;

use crate::constants::{SOURCE_NAME_TAG, SOURCE_TYPE_TAG, USER_TAG};
use crate::env::EnvVars;

pub trait ContextTagProvider {
    /// true si el proveedor aplica en el contexto actual.
    fn in_context(&self, env: &dyn EnvVars) -> bool;

    /// Tags aportados. Sólo se consulta si `in_context` devolvió true.
    fn tags(&self, env: &dyn EnvVars) -> IndexMap<String, String>;
}

/// Usuario que origina el run, tomado de USER/USERNAME.
#[derive(Debug, Default)]
pub struct UserTagProvider;

impl ContextTagProvider for UserTagProvider {
    fn in_context(&self, env: &dyn EnvVars) -> bool {
        env.get("USER").or_else(|| env.get("USERNAME")).is_some()
    }

    fn tags(&self, env: &dyn EnvVars) -> IndexMap<String, String> {
        let mut tags = IndexMap::new();
        if let Some(user) = env.get("USER").or_else(|| env.get("USERNAME")) {
            tags.insert(USER_TAG.to_string(), user);
        }
        tags
    }
}

/// Fuente del run: nombre del ejecutable actual, tipo fijo LOCAL.
#[derive(Debug, Default)]
pub struct SourceTagProvider;

impl ContextTagProvider for SourceTagProvider {
    fn in_context(&self, _env: &dyn EnvVars) -> bool {
        true
    }

    fn tags(&self, _env: &dyn EnvVars) -> IndexMap<String, String> {
        let mut tags = IndexMap::new();
        let source = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unknown".to_string());
        tags.insert(SOURCE_NAME_TAG.to_string(), source);
        tags.insert(SOURCE_TYPE_TAG.to_string(), "LOCAL".to_string());
        tags
    }
}

/// Composición ordenada de proveedores (análoga a un inyector compuesto):
/// se fusionan en orden de registro y los tags del usuario se superponen al
/// final.
pub struct ContextTagRegistry {
    providers: Vec<Box<dyn ContextTagProvider>>,
}

impl ContextTagRegistry {
    /// Registro vacío (sin tags automáticos).
    pub fn empty() -> Self {
        Self { providers: Vec::new() }
    }

    pub fn register(&mut self, provider: Box<dyn ContextTagProvider>) {
        self.providers.push(provider);
    }

    pub fn resolve_tags(&self,
                        user_tags: &IndexMap<String, String>,
                        env: &dyn EnvVars)
                        -> IndexMap<String, String> {
        let mut tags: IndexMap<String, String> = IndexMap::new();
        for provider in &self.providers {
            if provider.in_context(env) {
                for (k, v) in provider.tags(env) {
                    tags.insert(k, v);
                }
            }
        }
        for (k, v) in user_tags {
            tags.insert(k.clone(), v.clone());
        }
        tags
    }
}

impl Default for ContextTagRegistry {
    fn default() -> Self {
        Self { providers: vec![Box::new(UserTagProvider), Box::new(SourceTagProvider)] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn user_tags_override_provider_tags() {
        let env = MapEnv::new().with("USER", "alice");
        let registry = ContextTagRegistry::default();
        let mut user_tags = IndexMap::new();
        user_tags.insert(USER_TAG.to_string(), "override".to_string());
        let tags = registry.resolve_tags(&user_tags, &env);
        assert_eq!(tags.get(USER_TAG).map(String::as_str), Some("override"));
        assert!(tags.contains_key(SOURCE_NAME_TAG));
    }

    #[test]
    fn provider_out_of_context_contributes_nothing() {
        let env = MapEnv::new();
        let registry = ContextTagRegistry::default();
        let tags = registry.resolve_tags(&IndexMap::new(), &env);
        assert!(!tags.contains_key(USER_TAG));
        assert_eq!(tags.get(SOURCE_TYPE_TAG).map(String::as_str), Some("LOCAL"));
    }
}
