//! Vista inyectable del entorno de proceso.
//!
//! La sesión no lee `std::env` directamente: recibe un `EnvVars`, lo que
//! permite ejercitar la semántica one-shot del run id en tests sin tocar el
//! entorno real del proceso.
use indexmap::IndexMap;

pub trait EnvVars {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn unset(&mut self, key: &str);

    /// Lee y borra en un solo paso (semántica one-shot del run id).
    fn take(&mut self, key: &str) -> Option<String> {
        let value = self.get(key);
        if value.is_some() {
            self.unset(key);
        }
        value
    }
}

/// Entorno real del proceso.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvVars for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
    fn unset(&mut self, key: &str) {
        std::env::remove_var(key);
    }
}

/// Entorno en memoria (tests y demos).
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    inner: IndexMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.inner.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvVars for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }
    fn set(&mut self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
    }
    fn unset(&mut self, key: &str) {
        self.inner.shift_remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_is_one_shot() {
        let mut env = MapEnv::new().with("K", "v");
        assert_eq!(env.take("K").as_deref(), Some("v"));
        assert_eq!(env.take("K"), None);
        assert_eq!(env.get("K"), None);
    }
}
