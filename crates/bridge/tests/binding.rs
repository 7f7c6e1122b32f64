// Binding against real libraries that are not the frame generation library: loading fails for a
// missing file, and symbol resolution fails for a system library that lacks both entry points.

use fgbridge::{
    native::GET_MODE_SYMBOL, Binding, Bridge, BridgeConfig, BridgeError, FrameGenerationApi,
};

#[cfg(target_os = "linux")]
const SYSTEM_LIBRARY: &str = "libc.so.6";

#[cfg(target_os = "macos")]
const SYSTEM_LIBRARY: &str = "/usr/lib/libSystem.B.dylib";

#[cfg(windows)]
const SYSTEM_LIBRARY: &str = "kernel32.dll";

#[test]
fn missing_library_fails_to_load() {
    let mut binding = Binding::Unbound;

    let error = binding
        .bind("fgbridge-missing-library-for-tests.dll")
        .unwrap_err();

    match error {
        BridgeError::LoadFailed { library, .. } => {
            assert_eq!("fgbridge-missing-library-for-tests.dll", library)
        }
        other => panic!("expected LoadFailed, got {other:?}"),
    }
    assert!(!binding.is_bound());
    assert!(matches!(binding.get_mode(), Err(BridgeError::NotBound)));
}

#[test]
fn library_without_entry_points_is_released() {
    let mut binding = Binding::Unbound;

    let error = binding.bind(SYSTEM_LIBRARY).unwrap_err();

    match error {
        BridgeError::SymbolResolutionFailed { symbol, .. } => assert_eq!(GET_MODE_SYMBOL, symbol),
        other => panic!("expected SymbolResolutionFailed, got {other:?}"),
    }
    assert!(!binding.is_bound());
    assert!(binding.library().is_none());
}

#[test]
fn unbound_bridge_keeps_answering() {
    let mut bridge = Bridge::new(BridgeConfig {
        library: SYSTEM_LIBRARY.to_string(),
        ..Default::default()
    });

    assert!(!bridge.attach());
    assert!(!bridge.attach());
    assert!(!bridge.is_bound());

    bridge.detach();
    assert_eq!(SYSTEM_LIBRARY, bridge.config().library);
}
