//! Mount cycles through the public API: sizing, async load, disposal.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use retro3_host::{
    AssetLocator, Canvas, Engine, EngineAdapter, EngineModule, EngineState, HostContainer,
    ModuleConfig, ModuleFactory, NativeModuleFactory, PendingModule, ViewportSize, ViewportSizer,
};

type Calls = Arc<Mutex<Vec<&'static str>>>;

struct CountingEngine(Calls);

impl Engine for CountingEngine {
    fn initialize(&mut self) -> bool {
        self.0.lock().unwrap().push("initialize");
        true
    }

    fn deinitialize(&mut self) {
        self.0.lock().unwrap().push("deinitialize");
    }

    fn delete(self: Box<Self>) {
        self.0.lock().unwrap().push("delete");
    }
}

struct CountingModule(Calls);

impl EngineModule for CountingModule {
    fn create_engine(&self) -> Result<Box<dyn Engine>> {
        self.0.lock().unwrap().push("create");
        Ok(Box::new(CountingEngine(self.0.clone())))
    }
}

/// Loads on a background thread after `delay`.
struct SlowFactory {
    calls: Calls,
    delay: Duration,
}

impl ModuleFactory for SlowFactory {
    fn load(&self, _config: ModuleConfig) -> PendingModule {
        let (calls, delay) = (self.calls.clone(), self.delay);
        PendingModule::spawn("slow", move || {
            std::thread::sleep(delay);
            Ok(Box::new(CountingModule(calls)) as Box<dyn EngineModule>)
        })
    }
}

fn poll_until_settled(adapter: &mut EngineAdapter) -> EngineState {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let state = adapter.poll();
        if state != EngineState::Loading {
            return state;
        }
        assert!(Instant::now() < deadline, "load never resolved");
        std::thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn full_cycle_with_background_load() {
    let calls: Calls = Arc::default();
    let container = HostContainer::new();
    container.set_box_size(ViewportSize::new(1280, 672));
    let canvas = Canvas::new();

    let mut sizer = ViewportSizer::new();
    sizer.attach(Some(&container), Some(&canvas));
    assert_eq!(canvas.size(), ViewportSize::new(1280, 672));

    let factory = SlowFactory { calls: calls.clone(), delay: Duration::from_millis(5) };
    let mut adapter = EngineAdapter::new(factory, ModuleConfig::new());
    adapter.mount();
    assert_eq!(adapter.state(), EngineState::Loading);

    // Layout changes while the module is loading still reach the canvas.
    container.set_box_size(ViewportSize::new(1280, 592));
    assert_eq!(canvas.height(), 592);

    assert_eq!(poll_until_settled(&mut adapter), EngineState::Ready);
    assert!(adapter.engine_mut().is_some());

    adapter.unmount();
    sizer.detach();

    assert_eq!(adapter.state(), EngineState::Disposed);
    assert_eq!(container.observer_count(), 0);
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        &["create", "initialize", "deinitialize", "delete"]
    );
}

#[test]
fn unmount_during_background_load_never_constructs() {
    let calls: Calls = Arc::default();
    let factory = SlowFactory { calls: calls.clone(), delay: Duration::from_millis(20) };
    let mut adapter = EngineAdapter::new(factory, ModuleConfig::new());
    adapter.mount();
    adapter.unmount();

    // Let the loader finish; its result has nowhere to go.
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(adapter.poll(), EngineState::Disposed);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn missing_native_library_ends_in_load_failed() {
    let locator = AssetLocator::with_base_dir(PathBuf::from("/nonexistent/retro3/assets"));
    let config = ModuleConfig::new().locate_file(locator);
    let mut adapter = EngineAdapter::new(NativeModuleFactory::default(), config);

    adapter.mount();
    assert_eq!(poll_until_settled(&mut adapter), EngineState::LoadFailed);
    assert!(adapter.failure().is_some_and(|m| m.contains("engine library not found")));

    adapter.unmount();
    assert_eq!(adapter.state(), EngineState::Disposed);
}
