use std::collections::HashMap;

use crate::backend::AdviceBackend;
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::gemini::GeminiFactory;
use crate::ollama::OllamaFactory;

/// One implementation per text-generation service. Each backend module
/// exports a unit struct that implements this trait and is registered with
/// an [`AdvisorRegistry`] at startup.
pub trait AdvisorFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use backend from `config`.
    fn create(
        &self,
        config: &AdvisorConfig,
    ) -> Result<Box<dyn AdviceBackend>, AdvisorError>;
}

/// Registry of [`AdvisorFactory`] instances, keyed by backend name.
///
/// Typical lifetime:
/// 1. Create with `AdvisorRegistry::new()` (or [`AdvisorRegistry::with_builtin`]).
/// 2. Call `register` once per known backend.
/// 3. Call `create` with the user's [`AdvisorConfig`].
pub struct AdvisorRegistry {
    factories: HashMap<&'static str, Box<dyn AdvisorFactory>>,
}

impl AdvisorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry with the Ollama and Gemini backends.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(OllamaFactory));
        registry.register(Box::new(GeminiFactory));
        registry
    }

    /// Register a backend factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn AdvisorFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`AdvisorError::Configuration`]: no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub fn create(
        &self,
        config: &AdvisorConfig,
    ) -> Result<Box<dyn AdviceBackend>, AdvisorError> {
        let factory = self
            .factories
            .get(config.backend.to_ascii_lowercase().as_str())
            .ok_or_else(|| {
                AdvisorError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config)
    }
}

impl Default for AdvisorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;

    struct StubBackend;

    #[async_trait]
    impl AdviceBackend for StubBackend {
        fn name(&self) -> &'static str {
            "Stub"
        }

        async fn generate(
            &self,
            _prompt: &str,
        ) -> Result<String, AdvisorError> {
            Ok(String::new())
        }
    }

    /// Flips `called` so tests can prove `create` was reached.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    impl AdvisorFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }

        fn create(
            &self,
            _config: &AdvisorConfig,
        ) -> Result<Box<dyn AdviceBackend>, AdvisorError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubBackend))
        }
    }

    struct FailingFactory;

    impl AdvisorFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        fn create(
            &self,
            _config: &AdvisorConfig,
        ) -> Result<Box<dyn AdviceBackend>, AdvisorError> {
            Err(AdvisorError::MissingApiKey("Failing"))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn AdvisorFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    #[test]
    fn new_registry_has_no_backends() {
        assert!(AdvisorRegistry::new().available_backends().is_empty());
        assert!(AdvisorRegistry::default().available_backends().is_empty());
    }

    #[test]
    fn builtin_registry_lists_both_services() {
        assert_eq!(
            AdvisorRegistry::with_builtin().available_backends(),
            vec!["gemini", "ollama"]
        );
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = AdvisorRegistry::new();
        let (old, old_called) = stub_factory("ollama");
        let (new, new_called) = stub_factory("ollama");
        reg.register(old);
        reg.register(new);

        reg.create(&AdvisorConfig::new("ollama")).unwrap();

        assert_eq!(reg.available_backends(), vec!["ollama"]);
        assert!(!old_called.load(Ordering::SeqCst));
        assert!(new_called.load(Ordering::SeqCst));
    }

    #[test]
    fn create_calls_only_matching_factory() {
        let mut reg = AdvisorRegistry::new();
        let (ollama, ollama_called) = stub_factory("ollama");
        let (gemini, gemini_called) = stub_factory("gemini");
        reg.register(ollama);
        reg.register(gemini);

        let backend = reg.create(&AdvisorConfig::new("gemini")).unwrap();

        assert_eq!(backend.name(), "Stub");
        assert!(gemini_called.load(Ordering::SeqCst));
        assert!(!ollama_called.load(Ordering::SeqCst));
    }

    #[test]
    fn backend_name_is_case_insensitive() {
        let mut reg = AdvisorRegistry::new();
        let (factory, called) = stub_factory("ollama");
        reg.register(factory);

        reg.create(&AdvisorConfig::new("Ollama")).unwrap();

        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn unknown_backend_names_requested_and_available() {
        let reg = AdvisorRegistry::with_builtin();

        match reg.create(&AdvisorConfig::new("openai")) {
            Err(AdvisorError::Configuration(msg)) => {
                assert!(msg.contains("openai"), "error should name the requested backend");
                assert!(msg.contains("ollama"), "error should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a backend"),
        }
    }

    #[test]
    fn create_propagates_factory_error() {
        let mut reg = AdvisorRegistry::new();
        reg.register(Box::new(FailingFactory));

        assert!(matches!(
            reg.create(&AdvisorConfig::new("failing")),
            Err(AdvisorError::MissingApiKey("Failing"))
        ));
    }
}
