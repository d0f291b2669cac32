//! Seeding with environment controls
//!
//! Seeders build entities through factories and hand them to a sink. Where
//! the entities go (a database, a fixture file, a test vector) is up to the
//! sink; nothing here persists anything.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use crate::error::{FactoryError, FactoryResult};
use crate::factory::Factory;

/// Environment variable naming the current seeding environment
pub const ENV_VAR: &str = "SEEDLING_ENV";

/// Environment types for seeding control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Staging,
    Production,
    Custom(String),
}

impl FromStr for Environment {
    type Err = FactoryError;

    fn from_str(env: &str) -> FactoryResult<Self> {
        let env = env.trim().to_lowercase();
        if env.is_empty() {
            return Err(FactoryError::Configuration {
                field: "environment".to_string(),
                value: env,
                expected: "a non-empty environment name".to_string(),
            });
        }

        Ok(match env.as_str() {
            "development" | "dev" => Environment::Development,
            "testing" | "test" => Environment::Testing,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Custom(env),
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Environment {
    pub fn as_str(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Staging => "staging",
            Environment::Production => "production",
            Environment::Custom(name) => name,
        }
    }

    /// Production and custom environments need an explicit opt-in
    pub fn is_safe_for_seeding(&self) -> bool {
        matches!(
            self,
            Environment::Development | Environment::Testing | Environment::Staging
        )
    }

    /// Current environment from `SEEDLING_ENV`, development when unset
    pub fn current() -> FactoryResult<Self> {
        match std::env::var(ENV_VAR) {
            Ok(env) => env.parse(),
            Err(_) => Ok(Environment::Development),
        }
    }
}

/// Seeder trait for implementing data seeders
pub trait Seeder: Send + Sync {
    /// Get the seeder name for logging and dependency tracking
    fn name(&self) -> &str;

    /// Get environments where this seeder should run
    fn environments(&self) -> Vec<Environment> {
        vec![Environment::Development, Environment::Testing]
    }

    fn should_run(&self, env: &Environment) -> bool {
        self.environments().contains(env)
    }

    /// Get seeder priority (lower numbers run first)
    fn priority(&self) -> i32 {
        100
    }

    /// Names of seeders that must run first
    fn dependencies(&self) -> Vec<String> {
        vec![]
    }

    /// Run the seeder, returning how many entities it produced
    fn run(&self) -> FactoryResult<usize>;
}

type Sink<E> = Box<dyn Fn(E) -> FactoryResult<()> + Send + Sync>;

/// Factory-based seeder for bulk entity creation
pub struct FactorySeeder<E> {
    name: String,
    factory: Factory<E>,
    count: usize,
    sink: Sink<E>,
    environments: Vec<Environment>,
    priority: i32,
    dependencies: Vec<String>,
}

impl<E> FactorySeeder<E> {
    pub fn new<F>(name: impl Into<String>, factory: Factory<E>, count: usize, sink: F) -> Self
    where
        F: Fn(E) -> FactoryResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory,
            count,
            sink: Box::new(sink),
            environments: vec![Environment::Development, Environment::Testing],
            priority: 100,
            dependencies: vec![],
        }
    }

    pub fn environments(mut self, envs: Vec<Environment>) -> Self {
        self.environments = envs;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn depends_on(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

impl<E> Seeder for FactorySeeder<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn environments(&self) -> Vec<Environment> {
        self.environments.clone()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn run(&self) -> FactoryResult<usize> {
        tracing::info!(seeder = %self.name, count = self.count, "running seeder");

        let entities = self.factory.build_many(self.count)?;
        let created = entities.len();
        for entity in entities {
            (self.sink)(entity)?;
        }

        tracing::info!(seeder = %self.name, created, "seeder completed");
        Ok(created)
    }
}

/// Seeder manager for running multiple seeders
#[derive(Default)]
pub struct SeederManager {
    seeders: Vec<Box<dyn Seeder>>,
    allow_production: bool,
}

impl SeederManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a seeder to the manager
    pub fn add<S: Seeder + 'static>(mut self, seeder: S) -> Self {
        self.seeders.push(Box::new(seeder));
        self
    }

    /// Opt in to seeding environments that are not safe by default
    pub fn allow_production(mut self) -> Self {
        self.allow_production = true;
        self
    }

    pub fn len(&self) -> usize {
        self.seeders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeders.is_empty()
    }

    /// Run every seeder that applies to `env`, returning the total entity count
    pub fn run_for_environment(&self, env: &Environment) -> FactoryResult<usize> {
        if !env.is_safe_for_seeding() && !self.allow_production {
            return Err(FactoryError::Seeding {
                message: format!(
                    "Environment '{}' is not safe for automatic seeding. Use explicit opt-in.",
                    env
                ),
            });
        }

        let applicable: Vec<&dyn Seeder> = self
            .seeders
            .iter()
            .map(|s| &**s)
            .filter(|s| s.should_run(env))
            .collect();

        let ordered = resolve_dependencies(applicable)?;
        if !env.is_safe_for_seeding() {
            tracing::warn!(env = %env, seeders = ordered.len(), "seeding an opted-in environment");
        } else {
            tracing::info!(env = %env, seeders = ordered.len(), "running seeders");
        }

        let mut total = 0;
        for seeder in ordered {
            total += seeder.run()?;
        }

        tracing::info!(env = %env, total, "all seeders completed");
        Ok(total)
    }

    /// Run seeders for the environment named by `SEEDLING_ENV`
    pub fn run(&self) -> FactoryResult<usize> {
        let env = Environment::current()?;
        self.run_for_environment(&env)
    }

    /// Order of seeder names that would run in `env`
    pub fn plan(&self, env: &Environment) -> FactoryResult<Vec<String>> {
        let applicable = self
            .seeders
            .iter()
            .map(|s| &**s)
            .filter(|s| s.should_run(env))
            .collect();
        Ok(resolve_dependencies(applicable)?
            .into_iter()
            .map(|s| s.name().to_string())
            .collect())
    }
}

/// Topological order over seeder dependencies, ties broken by priority then name
fn resolve_dependencies(seeders: Vec<&dyn Seeder>) -> FactoryResult<Vec<&dyn Seeder>> {
    let mut by_name: HashMap<&str, &dyn Seeder> = HashMap::with_capacity(seeders.len());
    for seeder in &seeders {
        if by_name.insert(seeder.name(), *seeder).is_some() {
            return Err(FactoryError::Seeding {
                message: format!("Duplicate seeder name '{}'", seeder.name()),
            });
        }
    }
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut dependents: HashMap<String, Vec<&str>> = HashMap::new();

    for seeder in &seeders {
        let deps = seeder.dependencies();
        for dep in &deps {
            if !by_name.contains_key(dep.as_str()) {
                return Err(FactoryError::Seeding {
                    message: format!(
                        "Seeder '{}' depends on '{}', but '{}' was not found",
                        seeder.name(),
                        dep,
                        dep
                    ),
                });
            }
            dependents.entry(dep.clone()).or_default().push(seeder.name());
        }
        in_degree.insert(seeder.name(), deps.len());
    }

    let mut ready: Vec<&dyn Seeder> = seeders
        .iter()
        .copied()
        .filter(|s| in_degree.get(s.name()) == Some(&0))
        .collect();
    let mut result = Vec::with_capacity(seeders.len());

    while !ready.is_empty() {
        ready.sort_by(|a, b| (a.priority(), a.name()).cmp(&(b.priority(), b.name())));
        let mut queue: VecDeque<&dyn Seeder> = ready.drain(..).collect();

        while let Some(current) = queue.pop_front() {
            result.push(current);
            for dependent in dependents.get(current.name()).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        if let Some(seeder) = by_name.get(dependent) {
                            ready.push(*seeder);
                        }
                    }
                }
            }
        }
    }

    if result.len() != seeders.len() {
        let mut unprocessed: Vec<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(name, _)| *name)
            .collect();
        unprocessed.sort_unstable();
        return Err(FactoryError::Seeding {
            message: format!(
                "Circular dependency detected in seeders: {}",
                unprocessed.join(", ")
            ),
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeSet;
    use crate::factory::Collaborators;
    use crate::fake_data::Faker;
    use crate::traits::{DefaultCreator, DefaultValues, EntityUpdater, IdentityTransformer};
    use serde_json::json;
    use serial_test::serial;
    use std::sync::{Arc, Mutex};

    struct NamedSeeder {
        name: &'static str,
        priority: i32,
        deps: Vec<String>,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Seeder for NamedSeeder {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn dependencies(&self) -> Vec<String> {
            self.deps.clone()
        }

        fn run(&self) -> FactoryResult<usize> {
            self.log.lock().unwrap().push(self.name.to_string());
            Ok(1)
        }
    }

    fn named(
        name: &'static str,
        priority: i32,
        deps: &[&str],
        log: &Arc<Mutex<Vec<String>>>,
    ) -> NamedSeeder {
        NamedSeeder {
            name,
            priority,
            deps: deps.iter().map(|d| d.to_string()).collect(),
            log: Arc::clone(log),
        }
    }

    struct LabelDefaults;

    impl DefaultValues<String> for LabelDefaults {
        fn defaults(&self, faker: &mut Faker) -> FactoryResult<AttributeSet> {
            Ok(AttributeSet::new().with("label", json!(faker.word())))
        }
    }

    struct LabelUpdater;

    impl EntityUpdater<String> for LabelUpdater {
        fn update(&self, entity: &mut String, attributes: &AttributeSet) -> FactoryResult<()> {
            *entity = attributes.string("label")?;
            Ok(())
        }
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("TEST".parse::<Environment>().unwrap(), Environment::Testing);
        assert_eq!("stage".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(
            "custom".parse::<Environment>().unwrap(),
            Environment::Custom("custom".to_string())
        );
        assert!("".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_safety() {
        assert!(Environment::Development.is_safe_for_seeding());
        assert!(Environment::Testing.is_safe_for_seeding());
        assert!(Environment::Staging.is_safe_for_seeding());
        assert!(!Environment::Production.is_safe_for_seeding());
        assert!(!Environment::Custom("custom".to_string()).is_safe_for_seeding());
    }

    #[test]
    #[serial]
    fn test_current_environment() {
        std::env::remove_var(ENV_VAR);
        assert_eq!(Environment::current().unwrap(), Environment::Development);

        std::env::set_var(ENV_VAR, "testing");
        let env = Environment::current();
        std::env::remove_var(ENV_VAR);
        assert_eq!(env.unwrap(), Environment::Testing);
    }

    #[test]
    fn test_factory_seeder_feeds_sink() {
        let factory = Factory::new(Collaborators::new(
            LabelDefaults,
            IdentityTransformer,
            DefaultCreator,
            LabelUpdater,
        ))
        .with_seed(99);

        let collected = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&collected);
        let seeder = FactorySeeder::new("labels", factory.clone(), 3, move |label: String| {
            sink.lock().unwrap().push(label);
            Ok(())
        });

        assert_eq!(seeder.run().unwrap(), 3);
        assert_eq!(*collected.lock().unwrap(), factory.build_many(3).unwrap());
    }

    #[test]
    fn test_sink_error_stops_seeding() {
        let factory = Factory::new(Collaborators::new(
            LabelDefaults,
            IdentityTransformer,
            DefaultCreator,
            LabelUpdater,
        ));
        let seeder = FactorySeeder::new("failing", factory, 2, |_label: String| {
            Err(FactoryError::collaborator("sink full"))
        });

        assert_eq!(seeder.run(), Err(FactoryError::collaborator("sink full")));
    }

    #[test]
    fn test_manager_orders_by_dependencies_and_priority() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let manager = SeederManager::new()
            .add(named("shipping_methods", 10, &["zones", "channels"], &log))
            .add(named("channels", 50, &[], &log))
            .add(named("zones", 20, &[], &log));

        let total = manager.run_for_environment(&Environment::Testing).unwrap();

        assert_eq!(total, 3);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["zones", "channels", "shipping_methods"]
        );
    }

    #[test]
    fn test_manager_rejects_production_without_opt_in() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let manager = SeederManager::new().add(named("zones", 1, &[], &log));

        assert!(matches!(
            manager.run_for_environment(&Environment::Production),
            Err(FactoryError::Seeding { .. })
        ));

        let manager = manager.allow_production();
        assert_eq!(manager.run_for_environment(&Environment::Production).unwrap(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_manager_detects_problems() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let missing = SeederManager::new().add(named("a", 1, &["ghost"], &log));
        assert!(missing.plan(&Environment::Testing).is_err());

        let cycle = SeederManager::new()
            .add(named("a", 1, &["b"], &log))
            .add(named("b", 1, &["a"], &log));
        match cycle.plan(&Environment::Testing) {
            Err(FactoryError::Seeding { message }) => assert!(message.contains("a, b")),
            other => panic!("expected cycle error, got {:?}", other),
        }
    }

    #[test]
    fn test_manager_rejects_duplicate_names() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let duplicated = SeederManager::new()
            .add(named("a", 1, &[], &log))
            .add(named("a", 2, &["b"], &log))
            .add(named("b", 1, &[], &log));

        assert_eq!(
            duplicated.plan(&Environment::Testing),
            Err(FactoryError::Seeding {
                message: "Duplicate seeder name 'a'".to_string()
            })
        );
        assert!(duplicated.run_for_environment(&Environment::Testing).is_err());
        assert!(log.lock().unwrap().is_empty());
    }
}
