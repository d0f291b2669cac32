use seedling_factory::prelude::*;
use seedling_factory::{Environment, FactorySeeder, SeederManager};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Default, PartialEq)]
struct Warehouse {
    code: String,
    capacity: i64,
    active: bool,
}

struct WarehouseDefaults;

impl DefaultValues<Warehouse> for WarehouseDefaults {
    fn defaults(&self, faker: &mut Faker) -> FactoryResult<AttributeSet> {
        Ok(AttributeSet::new()
            .with("code", json!(faker.code("wh")))
            .with("capacity", json!(faker.number_between(100, 10_000)))
            .with("enabled", json!(true)))
    }
}

/// Upper-cases codes, the way a real transformer normalizes shorthand input
struct UpperCaseCodes;

impl Transformer<Warehouse> for UpperCaseCodes {
    fn transform(&self, mut attributes: AttributeSet) -> FactoryResult<AttributeSet> {
        let code = attributes.string("code")?;
        attributes.insert("code", json!(code.to_uppercase()));
        Ok(attributes)
    }
}

struct WarehouseUpdater;

impl EntityUpdater<Warehouse> for WarehouseUpdater {
    fn update(&self, warehouse: &mut Warehouse, attributes: &AttributeSet) -> FactoryResult<()> {
        warehouse.code = attributes.string("code")?;
        warehouse.capacity = attributes
            .get("capacity")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| FactoryError::invalid_attribute("capacity", "an integer"))?;
        warehouse.active = attributes.bool("enabled")?;
        Ok(())
    }
}

fn warehouses() -> Factory<Warehouse> {
    Factory::new(Collaborators::new(
        WarehouseDefaults,
        UpperCaseCodes,
        DefaultCreator,
        WarehouseUpdater,
    ))
}

#[test]
fn test_pipeline_runs_in_order() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("seedling_factory=trace")
        .with_test_writer()
        .try_init();

    let warehouse = warehouses()
        .with_seed(5)
        .with_attribute("code", json!("north"))
        .state(DisabledState)
        .build()
        .unwrap();

    // States land before the transformer, so the override is upper-cased too
    assert_eq!(warehouse.code, "NORTH");
    assert!(!warehouse.active);
}

#[test]
fn test_factory_shared_across_threads() {
    let factory = warehouses().with_seed(99).state(EnabledState);
    let expected = factory.build().unwrap();

    let built: Vec<Warehouse> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| factory.build().unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(built.iter().all(|w| *w == expected));
}

#[test]
fn test_unseeded_builds_still_succeed() {
    let batch = warehouses().build_many(3).unwrap();

    assert_eq!(batch.len(), 3);
    assert!(batch.iter().all(|w| w.code.starts_with("WH_")));
}

#[test]
fn test_seeding_through_manager() {
    let stored = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&stored);

    let factory = warehouses().with_seed(1);
    let seeder = FactorySeeder::new("warehouses", factory, 4, move |w: Warehouse| {
        sink.lock().unwrap().push(w);
        Ok(())
    });

    let created = SeederManager::new()
        .add(seeder)
        .run_for_environment(&Environment::Testing)
        .unwrap();

    assert_eq!(created, 4);
    let expected = warehouses().with_seed(1).build_many(4).unwrap();
    assert_eq!(*stored.lock().unwrap(), expected);
}

#[test]
fn test_config_value_drives_determinism() {
    let config = FactoryConfig::seeded(2024);
    let a = warehouses().with_config(config.clone()).build().unwrap();
    let b = warehouses().with_config(config).build().unwrap();

    assert_eq!(a, b);
}
