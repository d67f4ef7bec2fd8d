use {
    crate::{BuilderError, ServiceDefinition, Statement, StatementOptions},
    log::{debug, warn},
    std::{collections::HashMap, fs, path::Path, sync::Arc},
};

/// Loaded service definitions, keyed by service prefix.
///
/// Definitions are shared as `Arc<ServiceDefinition>`, so statements created from the registry can outlive it and can
/// be built on separate threads.
#[derive(Clone, Debug, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, Arc<ServiceDefinition>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every `*.json` service definition in `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, BuilderError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        Ok(registry)
    }

    /// Add a service definition, returning the definition it replaced, if any.
    pub fn insert(&mut self, service: ServiceDefinition) -> Option<Arc<ServiceDefinition>> {
        let prefix = service.prefix().to_ascii_lowercase();
        let previous = self.services.insert(prefix.clone(), Arc::new(service));
        if previous.is_some() {
            warn!("Service {} was already registered; replacing it", prefix);
        }

        previous
    }

    /// Load every `*.json` file in `dir` as a service definition. Files are read in name order. Returns the number of
    /// definitions loaded.
    ///
    /// # Errors
    ///
    /// * [BuilderError::InvalidServiceDefinition] if the directory cannot be read or any file fails to load. Files
    ///   loaded before the failure stay registered.
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize, BuilderError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .map_err(|e| BuilderError::InvalidServiceDefinition(format!("{}: {}", dir.display(), e)))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| BuilderError::InvalidServiceDefinition(format!("{}: {}", dir.display(), e)))?;
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            } else {
                debug!("Skipping {}", path.display());
            }
        }
        paths.sort();

        for path in &paths {
            let service = ServiceDefinition::from_path(path)?;
            debug!("Registered service {} from {}", service.prefix(), path.display());
            self.insert(service);
        }

        Ok(paths.len())
    }

    /// Look up a service by prefix. Prefixes are case-insensitive.
    pub fn get(&self, prefix: &str) -> Option<Arc<ServiceDefinition>> {
        self.services.get(&prefix.to_ascii_lowercase()).cloned()
    }

    #[inline]
    pub fn contains(&self, prefix: &str) -> bool {
        self.services.contains_key(&prefix.to_ascii_lowercase())
    }

    /// Start a statement for the service with the given prefix, using default options.
    pub fn statement(&self, prefix: &str) -> Result<Statement, BuilderError> {
        self.statement_with_options(prefix, StatementOptions::default())
    }

    pub fn statement_with_options(&self, prefix: &str, options: StatementOptions) -> Result<Statement, BuilderError> {
        match self.get(prefix) {
            Some(service) => Ok(Statement::with_options(service, options)),
            None => {
                debug!("No service registered for prefix {}", prefix);
                Err(BuilderError::UnknownService(prefix.to_string()))
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// The registered prefixes, sorted.
    pub fn prefixes(&self) -> Vec<&str> {
        let mut prefixes: Vec<&str> = self.services.keys().map(String::as_str).collect();
        prefixes.sort_unstable();
        prefixes
    }
}

impl FromIterator<ServiceDefinition> for ServiceRegistry {
    fn from_iter<I: IntoIterator<Item = ServiceDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for service in iter {
            registry.insert(service);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{ActionValidation, BuilderError, ServiceDefinition, ServiceRegistry, StatementOptions},
        pretty_assertions::assert_eq,
        std::{str::FromStr, sync::Arc, thread},
    };

    const SERVICES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/services");

    #[test_log::test]
    fn test_load_dir() {
        let registry = ServiceRegistry::from_dir(SERVICES).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert_eq!(registry.prefixes(), vec!["kms", "ssm"]);
        assert!(registry.contains("SSM"));
        assert_eq!(registry.get("kms").unwrap().name(), Some("AWS Key Management Service"));
        assert!(registry.get("ec2").is_none());
    }

    #[test_log::test]
    fn test_load_missing_dir() {
        let e = ServiceRegistry::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/no/such/dir")).unwrap_err();
        assert!(matches!(e, BuilderError::InvalidServiceDefinition(_)));
    }

    #[test_log::test]
    fn test_statements() {
        let registry: ServiceRegistry =
            vec![ServiceDefinition::from_str(include_str!("../data/services/ssm.json")).unwrap()].into_iter().collect();
        assert_eq!(registry.statement("ec2").unwrap_err(), BuilderError::UnknownService("ec2".to_string()));

        let options = StatementOptions::builder().action_validation(ActionValidation::Strict).build().unwrap();
        let mut s = registry.statement_with_options("ssm", options).unwrap();
        assert_eq!(
            s.select_action("Frobnicate").unwrap_err(),
            BuilderError::UnknownAction("ssm:Frobnicate".to_string())
        );
    }

    #[test_log::test]
    fn test_replace_and_share() {
        let mut registry = ServiceRegistry::new();
        let ssm = ServiceDefinition::from_str(include_str!("../data/services/ssm.json")).unwrap();
        assert!(registry.insert(ssm.clone()).is_none());
        assert!(registry.insert(ssm).is_some());
        assert_eq!(registry.len(), 1);

        // Each thread owns its own statement; the definition is shared read-only.
        let service = registry.get("ssm").unwrap();
        let handles = (0..4)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    let mut s = crate::Statement::new(service);
                    s.select_action("GetParameter")
                        .unwrap()
                        .attach_resource("parameter", [("FullyQualifiedParameterName", format!("p{}", i))])
                        .unwrap();
                    s.to_document().unwrap().to_string()
                })
            })
            .collect::<Vec<_>>();

        for (i, handle) in handles.into_iter().enumerate() {
            assert!(handle.join().unwrap().contains(&format!("parameter/p{}", i)));
        }
    }
}
