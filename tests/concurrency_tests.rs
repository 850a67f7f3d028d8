/* tests/concurrency_tests.rs */

use onehold::{Policy, Provider};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[derive(Debug)]
struct Fleet {
	id: usize,
}

/// Builds slowly so that threads pile up behind the first constructor.
fn slow_counting(counter: &Arc<AtomicUsize>) -> impl Fn() -> Result<Fleet, Infallible> + Send + Sync + use<> {
	let counter = Arc::clone(counter);
	move || {
		let id = counter.fetch_add(1, Ordering::SeqCst) + 1;
		thread::sleep(Duration::from_millis(20));
		Ok(Fleet { id })
	}
}

/// Releases `threads` callers at once and collects their handles.
fn race<F>(provider: &Arc<Provider<Fleet, Infallible, F>>, threads: usize) -> Vec<Arc<Fleet>>
where
	F: Fn() -> Result<Fleet, Infallible> + Send + Sync + 'static,
{
	let barrier = Arc::new(Barrier::new(threads));
	let handles: Vec<_> = (0..threads)
		.map(|_| {
			let provider = Arc::clone(provider);
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				provider.get_instance().unwrap()
			})
		})
		.collect();

	handles.into_iter().map(|h| h.join().unwrap()).collect()
}

fn assert_single_identity(instances: &[Arc<Fleet>]) {
	let first = &instances[0];
	assert!(instances.iter().all(|i| Arc::ptr_eq(first, i)));
}

#[test]
fn test_synchronized_constructs_once_under_contention() {
	let counter = Arc::new(AtomicUsize::new(0));
	let provider = Arc::new(Provider::synchronized(slow_counting(&counter)));

	let instances = race(&provider, 128);

	assert_eq!(instances.len(), 128);
	assert_eq!(counter.load(Ordering::SeqCst), 1);
	assert_eq!(provider.constructions(), 1);
	assert_single_identity(&instances);
}

#[test]
fn test_double_checked_constructs_once_under_contention() {
	let counter = Arc::new(AtomicUsize::new(0));
	let provider = Arc::new(Provider::double_checked(slow_counting(&counter)));

	let instances = race(&provider, 128);

	assert_eq!(counter.load(Ordering::SeqCst), 1);
	assert_eq!(provider.attempts(), 1);
	assert_single_identity(&instances);
}

#[test]
fn test_double_checked_fifty_threads() {
	let counter = Arc::new(AtomicUsize::new(0));
	let provider = Arc::new(Provider::with_policy(Policy::DoubleChecked, slow_counting(&counter)).unwrap());

	let instances = race(&provider, 50);

	assert_eq!(instances.len(), 50);
	assert_eq!(counter.load(Ordering::SeqCst), 1);
	assert_single_identity(&instances);
	assert_eq!(instances[0].id, 1);
}

#[test]
fn test_eager_two_threads_share_instance() {
	let counter = Arc::new(AtomicUsize::new(0));
	let provider = Arc::new(Provider::eager(slow_counting(&counter)).unwrap());
	assert_eq!(counter.load(Ordering::SeqCst), 1);

	let instances = race(&provider, 2);

	assert!(Arc::ptr_eq(&instances[0], &instances[1]));
	assert_eq!(counter.load(Ordering::SeqCst), 1);
}

/// The unsynchronized policy is knowingly unsafe for concurrent first access:
/// callers racing past the empty check may each construct. One construction
/// is allowed, more are allowed, and every caller still receives an instance.
#[test]
fn test_unsynchronized_may_construct_more_than_once() {
	let counter = Arc::new(AtomicUsize::new(0));
	let provider = Arc::new(Provider::unsynchronized(slow_counting(&counter)));

	let instances = race(&provider, 128);

	let built = counter.load(Ordering::SeqCst);
	assert!(built >= 1);
	assert!(built <= instances.len());
	assert_eq!(provider.constructions() as usize, built);

	// Whatever won the race is what later callers see.
	let published = provider.get().unwrap();
	assert!(instances.iter().any(|i| Arc::ptr_eq(i, &published)));
	let later = provider.get_instance().unwrap();
	assert!(Arc::ptr_eq(&later, &published));
	assert_eq!(counter.load(Ordering::SeqCst), built);
}

#[test]
fn test_unsynchronized_race_replaces_first_instance() {
	// Both callers are inside the constructor before either publishes.
	let gate = Arc::new(Barrier::new(2));
	let counter = Arc::new(AtomicUsize::new(0));
	let provider = Arc::new(Provider::unsynchronized({
		let gate = Arc::clone(&gate);
		let counter = Arc::clone(&counter);
		move || {
			let id = counter.fetch_add(1, Ordering::SeqCst) + 1;
			gate.wait();
			Ok::<_, Infallible>(Fleet { id })
		}
	}));

	let instances = race(&provider, 2);

	assert_eq!(counter.load(Ordering::SeqCst), 2);
	assert_eq!(provider.constructions(), 2);
	assert!(!Arc::ptr_eq(&instances[0], &instances[1]));

	let meta = provider.meta().unwrap();
	assert_eq!(meta.sequence, 2);
	assert_eq!(meta.policy, Policy::Unsynchronized);

	let published = provider.get().unwrap();
	assert!(instances.iter().any(|i| Arc::ptr_eq(i, &published)));
}
