/* demos/singleton.rs */

use onehold::{Policy, Provider, Registry};
use std::convert::Infallible;
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
struct AirForceOne {
	tail_number: &'static str,
}

impl AirForceOne {
	fn commission() -> Result<Self, Infallible> {
		println!("Commissioning aircraft");
		Ok(Self {
			tail_number: "28000",
		})
	}

	fn fly(&self) {
		println!("Flying {}", self.tail_number);
	}
}

// Lazy providers are const, so each variant can be a process-wide static.
static LAZY: Provider<AirForceOne> = Provider::unsynchronized(AirForceOne::commission);
static SYNCHRONIZED: Provider<AirForceOne> = Provider::synchronized(AirForceOne::commission);
static DOUBLE_CHECKED: Provider<AirForceOne> = Provider::double_checked(AirForceOne::commission);

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 1. Lazy creation, single thread only
	LAZY.get_instance()?.fly();

	// 2. Eager creation, built before the first access
	let eager = Provider::eager(AirForceOne::commission)?;
	println!("Eager provider ready before access: {}", eager.is_ready());
	eager.get_instance()?.fly();

	// 3. Synchronized, every access takes the lock
	SYNCHRONIZED.get_instance()?.fly();

	// 4. Double-checked, shared by several threads
	let handles: Vec<_> = (0..4)
		.map(|_| thread::spawn(|| DOUBLE_CHECKED.get_instance()))
		.collect();
	let mut aircraft = Vec::new();
	for handle in handles {
		match handle.join() {
			Ok(result) => aircraft.push(result?),
			Err(_) => return Err("worker thread panicked".into()),
		}
	}
	let same = aircraft.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1]));
	println!(
		"Double-checked: {} threads, {} construction(s), same instance: {}",
		aircraft.len(),
		DOUBLE_CHECKED.constructions(),
		same
	);

	// 5. Policy picked at runtime, e.g. from configuration
	let policy: Policy = "synchronized".parse()?;
	let configured = Provider::builder()
		.policy(policy)
		.name("air-force-one")
		.init(AirForceOne::commission)
		.build()?;
	configured.get_instance()?.fly();
	println!("{:?}", configured);

	// 6. One instance per type in a registry
	let registry = Registry::new();
	let first = registry.get_or_try_init(AirForceOne::commission)?;
	let second = registry.get_or_try_init(AirForceOne::commission)?;
	first.fly();
	println!(
		"Registry holds {} type(s), same instance: {}",
		registry.len(),
		Arc::ptr_eq(&first, &second)
	);

	Ok(())
}
