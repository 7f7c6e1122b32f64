use std::fmt::Debug;

use fgbridge_protocol::{Mode, NativeResult};
use libloading::Library;
use tracing::instrument;

use crate::{
    error::{BridgeError, ErrorCode},
    native::{
        GetFrameGenerationModeFn, SetFrameGenerationModeFn, GET_MODE_SYMBOL, SET_MODE_SYMBOL,
        UNSET_MODE,
    },
};

/// Reading and writing the frame generation mode.
pub trait FrameGenerationApi {
    fn get_mode(&self) -> Result<Mode, BridgeError>;

    fn set_mode(&self, mode: Mode) -> Result<(), BridgeError>;

    /// Flips the current mode on its own axis and returns the mode that was written.
    ///
    /// Nothing is written when the current mode can't be read.
    fn toggle(&self) -> Result<Mode, BridgeError> {
        let next = self.get_mode()?.toggled();
        self.set_mode(next)?;

        Ok(next)
    }
}

/// Both native entry points, resolved.
#[derive(Clone, Copy)]
pub struct ResolvedApi {
    get_mode: GetFrameGenerationModeFn,
    set_mode: SetFrameGenerationModeFn,
}

impl Debug for ResolvedApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedApi")
            .field("get_mode", &(self.get_mode as *const ()))
            .field("set_mode", &(self.set_mode as *const ()))
            .finish()
    }
}

impl FrameGenerationApi for ResolvedApi {
    fn get_mode(&self) -> Result<Mode, BridgeError> {
        let mut raw = UNSET_MODE;
        let result = NativeResult::from_raw(unsafe { (self.get_mode)(&mut raw) });

        BridgeError::check(result)?;
        Mode::from_raw(raw).map_err(|invalid| BridgeError::UnrecognizedMode(invalid.0))
    }

    fn set_mode(&self, mode: Mode) -> Result<(), BridgeError> {
        let result = NativeResult::from_raw(unsafe { (self.set_mode)(mode.raw()) });

        BridgeError::check(result)
    }
}

#[derive(Debug)]
enum LibraryGuard {
    /// Released when the binding is dropped.
    Owned(Library),
    /// Functions that live as long as the process.
    Static,
}

/// A library with both entry points resolved.
///
/// Only ever constructed fully resolved, a library that is missing either symbol is released
/// before [`BoundLibrary::load`] returns.
#[derive(Debug)]
pub struct BoundLibrary {
    name: String,
    api: ResolvedApi,
    _guard: LibraryGuard,
}

/// Exported names of the getter and the setter.
#[derive(Clone, Copy, Debug)]
struct Symbols {
    get_mode: &'static str,
    set_mode: &'static str,
}

const NATIVE_SYMBOLS: Symbols = Symbols {
    get_mode: GET_MODE_SYMBOL,
    set_mode: SET_MODE_SYMBOL,
};

impl BoundLibrary {
    pub fn load(name: &str) -> Result<Self, BridgeError> {
        Self::load_symbols(name, NATIVE_SYMBOLS)
    }

    #[instrument(level = "debug")]
    fn load_symbols(name: &str, symbols: Symbols) -> Result<Self, BridgeError> {
        // SAFETY: Loading runs the library's initialization routines. The library is expected to
        // be the frame generation control library, which has no load-time requirements.
        let library = unsafe { Library::new(name) }.map_err(|source| BridgeError::LoadFailed {
            code: ErrorCode::of(&source),
            library: name.to_string(),
            source,
        })?;

        // SAFETY: The function signatures match the library's exported declarations. On error
        // `library` is dropped here, before anything resolved from it escapes.
        let get_mode = unsafe { resolve::<GetFrameGenerationModeFn>(&library, symbols.get_mode)? };
        let set_mode = unsafe { resolve::<SetFrameGenerationModeFn>(&library, symbols.set_mode)? };

        Ok(Self {
            name: name.to_string(),
            api: ResolvedApi { get_mode, set_mode },
            _guard: LibraryGuard::Owned(library),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api(&self) -> &ResolvedApi {
        &self.api
    }
}

unsafe fn resolve<T: Copy>(library: &Library, symbol: &'static str) -> Result<T, BridgeError> {
    let resolved = unsafe { library.get::<T>(symbol.as_bytes()) }.map_err(|source| {
        BridgeError::SymbolResolutionFailed {
            code: ErrorCode::of(&source),
            symbol,
            source,
        }
    })?;

    Ok(*resolved)
}

/// The connection to the native library, if any.
#[derive(Debug, Default)]
pub enum Binding {
    #[default]
    Unbound,
    Bound(BoundLibrary),
}

impl Binding {
    /// Loads `name` and resolves both entry points.
    ///
    /// Any existing binding is released first. On failure the binding is left unbound.
    pub fn bind(&mut self, name: &str) -> Result<(), BridgeError> {
        self.bind_symbols(name, NATIVE_SYMBOLS)
    }

    fn bind_symbols(&mut self, name: &str, symbols: Symbols) -> Result<(), BridgeError> {
        self.unbind();
        *self = Binding::Bound(BoundLibrary::load_symbols(name, symbols)?);

        Ok(())
    }

    /// Binds to functions that are already part of the process.
    ///
    /// # Safety
    ///
    /// Both functions must implement the native library's contract and stay callable for as long
    /// as this binding exists.
    pub unsafe fn bind_static(
        &mut self,
        name: &str,
        get_mode: GetFrameGenerationModeFn,
        set_mode: SetFrameGenerationModeFn,
    ) {
        self.unbind();
        *self = Binding::Bound(BoundLibrary {
            name: name.to_string(),
            api: ResolvedApi { get_mode, set_mode },
            _guard: LibraryGuard::Static,
        });
    }

    /// Releases the native library. Does nothing when unbound.
    pub fn unbind(&mut self) {
        *self = Binding::Unbound;
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Binding::Bound(_))
    }

    pub fn library(&self) -> Option<&BoundLibrary> {
        match self {
            Binding::Bound(library) => Some(library),
            Binding::Unbound => None,
        }
    }

    fn api(&self) -> Result<&ResolvedApi, BridgeError> {
        self.library()
            .map(BoundLibrary::api)
            .ok_or(BridgeError::NotBound)
    }
}

impl FrameGenerationApi for Binding {
    fn get_mode(&self) -> Result<Mode, BridgeError> {
        self.api()?.get_mode()
    }

    fn set_mode(&self, mode: Mode) -> Result<(), BridgeError> {
        self.api()?.set_mode(mode)
    }
}
