use orrery_node::parse;

use super::*;
use crate::{BindingBuilder, Hydrator, register_types};

trait Part: Polymorphic {
	fn mass(&self) -> f64;
}

#[derive(Default)]
struct Tank {
	fuel: f64,
}

#[derive(Default)]
struct Engine {
	thrust: f64,
}

impl Bindable for Tank {
	fn bind(b: &mut BindingBuilder<Self>) {
		b.value("fuel", |t| &mut t.fuel).optional();
	}
}

impl Bindable for Engine {
	fn bind(b: &mut BindingBuilder<Self>) {
		b.value("thrust", |e| &mut e.thrust).optional();
	}
}

impl Part for Tank {
	fn mass(&self) -> f64 {
		1.0 + self.fuel
	}
}

impl Part for Engine {
	fn mass(&self) -> f64 {
		self.thrust / 10.0
	}
}

#[test]
fn test_register_and_resolve() {
	let mut resolver = TypeResolver::new();
	resolver
		.register::<dyn Part, Tank>("FuelTank", |t| Box::new(t))
		.register::<dyn Part, Engine>("Engine", |e| Box::new(e));

	assert_eq!(resolver.len::<dyn Part>(), 2);
	assert!(resolver.contains::<dyn Part>("FuelTank"));
	assert!(!resolver.contains::<dyn Part>("Tank"));
	assert_eq!(
		resolver.resolve::<dyn Part>("FuelTank").map(Constructible::concrete_type),
		Some("Tank")
	);
}

#[test]
fn test_families_are_separate() {
	let mut resolver = TypeResolver::new();
	register_types!(&mut resolver, dyn Part => [Tank]);
	assert!(resolver.contains::<dyn Part>("Tank"));
	assert!(!resolver.contains::<dyn Polymorphic>("Tank"));
	assert_eq!(resolver.len::<dyn Polymorphic>(), 0);
}

#[test]
fn test_reregistering_replaces() {
	let mut resolver = TypeResolver::new();
	resolver.register::<dyn Part, Tank>("Part", |t| Box::new(t));
	resolver.register::<dyn Part, Engine>("Part", |e| Box::new(e));
	assert_eq!(resolver.len::<dyn Part>(), 1);
	assert_eq!(
		resolver.resolve::<dyn Part>("Part").map(Constructible::concrete_type),
		Some("Engine")
	);
}

#[test]
fn test_construct_and_merge() {
	let mut resolver = TypeResolver::new();
	register_types!(&mut resolver, dyn Part => [Tank, Engine]);
	let hydrator = Hydrator::new().with_resolver(&resolver);
	let mut hx = hydrator.context();
	let node = parse("fuel = 4\nthrust = 50").unwrap();

	let tank = resolver.resolve::<dyn Part>("Tank").unwrap();
	let engine = resolver.resolve::<dyn Part>("Engine").unwrap();

	let mut part = tank.construct(&node, &mut hx).unwrap();
	assert_eq!(part.mass(), 5.0);
	assert!(tank.is_instance(&*part));
	assert!(!engine.is_instance(&*part));

	assert!(!engine.merge_into(&mut *part, &node, &mut hx).unwrap());
	let refuel = parse("fuel = 1").unwrap();
	assert!(tank.merge_into(&mut *part, &refuel, &mut hx).unwrap());
	assert_eq!(part.mass(), 2.0);
}
